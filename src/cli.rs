//! Command-line interface definition.
//!
//! All argument parsing lives here so the rest of the codebase can stay
//! agnostic to `clap`.  The `Cli` struct is parsed once in `main` and then
//! passed (by reference) into the command handlers.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser};

use crate::model::{BackupManagementType, RecurrenceInterval, WorkloadType};

/// Top-level CLI arguments, shared across every subcommand.
#[derive(Parser, Debug)]
#[command(
    name    = "armctl",
    about   = "Resource-manager cmdlets: data-share triggers and backup-item restore",
    version,
    // Show a compact two-column help layout.
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
pub struct Cli {
    /// Path to the configuration file.
    ///
    /// Defaults to `armctl.toml` in the current working directory, falling
    /// back to `<config_dir>/armctl/config.toml`, then to built-in
    /// defaults.
    #[arg(short, long, default_value = "armctl.toml", global = true)]
    pub config: PathBuf,

    /// Print the parsed configuration and exit without running anything.
    #[arg(long, global = true)]
    pub print_config: bool,

    /// Build and print the request payload, then exit without making any
    /// network call.
    ///
    /// For `restore-backup-item` the storage-account fields are left as
    /// placeholders, since filling them in would require the identity
    /// lookup this flag suppresses.
    #[arg(long, global = true)]
    pub print_request: bool,

    /// Print diagnostic detail (which provider namespace is queried, the
    /// resolved storage id, submission confirmation).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per cmdlet.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Create a scheduled synchronization trigger on a data-share
    /// subscription.
    NewTrigger(NewTriggerArgs),

    /// Restore a backed-up item from a recovery point into a storage
    /// account.
    RestoreBackupItem(RestoreArgs),
}

// ─── new-trigger ──────────────────────────────────────────────────────────────

/// Arguments for `armctl new-trigger`.
#[derive(Args, Debug)]
pub struct NewTriggerArgs {
    /// Resource group of the data-share account.
    #[arg(long)]
    pub resource_group_name: String,

    /// Data-share account name.
    #[arg(long)]
    pub account_name: String,

    /// Share subscription receiving the trigger.
    #[arg(long)]
    pub share_subscription_name: Option<String>,

    /// Name of the trigger to create.
    #[arg(long)]
    pub name: String,

    /// How often synchronization fires.
    #[arg(long, value_enum)]
    pub recurrence_interval: RecurrenceInterval,

    /// RFC 3339 timestamp of the first synchronization,
    /// e.g. `2024-01-01T00:00:00Z`.
    #[arg(long, value_parser = parse_sync_time)]
    pub synchronization_time: DateTime<Utc>,

    /// Print the created trigger object in full.
    #[arg(long)]
    pub pass_thru: bool,

    /// Skip the confirmation prompt.
    #[arg(long)]
    pub force: bool,

    /// Submit without waiting for the trigger to finish provisioning.
    #[arg(long)]
    pub as_job: bool,
}

// ─── restore-backup-item ──────────────────────────────────────────────────────

/// Arguments for `armctl restore-backup-item`.
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Full resource id of the recovery point to restore from.
    #[arg(long)]
    pub recovery_point_id: String,

    /// Workload captured by the recovery point.
    #[arg(long, value_enum)]
    pub workload_type: WorkloadType,

    /// Backup fabric managing the protected item.
    #[arg(long, value_enum)]
    pub backup_management_type: BackupManagementType,

    /// Target storage account for restored data.  Matched
    /// case-insensitively — the name is lowercased before lookup.
    #[arg(long)]
    pub storage_account_name: String,

    /// Resource group containing the target storage account.
    #[arg(long)]
    pub storage_account_resource_group_name: String,

    /// Skip the confirmation prompt.
    #[arg(long)]
    pub force: bool,
}

/// clap value parser for `--synchronization-time`.
fn parse_sync_time(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("not an RFC 3339 timestamp: {e}"))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
