//! `armctl` — resource-manager cmdlets as a single CLI.
//!
//! # Overview
//!
//! Two independent, stateless request-building flows against
//! resource-management REST APIs: scheduled-trigger creation on a
//! data-share account, and backup-item restore from a recovery point.
//! Each invocation validates its input, builds one request payload, makes
//! one or two sequential HTTP calls, and prints the resulting object or
//! job handle.  Nothing is shared between invocations.
//!
//! # Usage
//!
//! ```text
//! armctl new-trigger --resource-group-name rg --account-name acct \
//!        --share-subscription-name sub --name nightly \
//!        --recurrence-interval Day --synchronization-time 2024-01-01T00:00:00Z
//! armctl restore-backup-item --recovery-point-id <id> \
//!        --workload-type AzureVM --backup-management-type AzureVM \
//!        --storage-account-name myacct --storage-account-resource-group-name rg
//! armctl --print-config  …     # show parsed config without running anything
//! armctl --print-request …     # show the request payload, no network calls
//! ```
//!
//! # Module layout
//!
//! | Module                   | Responsibility                              |
//! |--------------------------|---------------------------------------------|
//! | [`cli`]                  | Argument types parsed by clap               |
//! | [`config`]               | `Config` struct + TOML loader               |
//! | [`model`]                | Domain types and wire shapes                |
//! | [`error`]                | The five error kinds                        |
//! | [`client`]               | Client traits + blocking HTTP client        |
//! | [`resolve`]              | Two-candidate storage identity resolution   |
//! | [`provider`]             | Workload → backup-provider dispatch         |
//! | [`commands::trigger`]    | `new-trigger` flow                          |
//! | [`commands::restore`]    | `restore-backup-item` flow                  |
//! | [`ui`]                   | Spinner, confirmation gate, step output     |

mod cli;
mod client;
mod commands;
mod config;
mod error;
mod model;
mod provider;
mod resolve;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config(&cli.config)?;

    if cli.print_config {
        println!("{cfg:#?}");
        return Ok(());
    }

    match &cli.command {
        Command::NewTrigger(args) => commands::trigger::run(&cli, args, &cfg),
        Command::RestoreBackupItem(args) => commands::restore::run(&cli, args, &cfg),
    }
}
