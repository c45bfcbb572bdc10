//! Subcommand handlers.
//!
//! Each file in this module corresponds to one user-facing command:
//!
//! | File          | Invocation                    | Description                      |
//! |---------------|-------------------------------|----------------------------------|
//! | `trigger.rs`  | `armctl new-trigger`          | Create a synchronization trigger |
//! | `restore.rs`  | `armctl restore-backup-item`  | Submit a restore job             |

pub mod restore;
pub mod trigger;
