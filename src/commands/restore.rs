//! `armctl restore-backup-item` — submit a restore job from a recovery
//! point into a storage account.
//!
//! The flow runs strictly in sequence: lowercase the account name, resolve
//! its identity (classic provider first, one fallback to the current
//! provider), select the backup provider for the recovery point's
//! workload/management pair, submit the provider-built request, report the
//! job handle.  An unsupported pair fails before any submission call;
//! exhausted resolution fails before provider selection.

use anyhow::Result;

use crate::{
    cli::{Cli, RestoreArgs},
    client::{ArmClient, Resources, RestoreJobs},
    config::Config,
    error::ArmError,
    model::{JobHandle, RecoveryPoint, StorageContext},
    provider::select_provider,
    resolve::resolve_storage_account,
    ui,
};

// ─── Core ─────────────────────────────────────────────────────────────────────

/// Check mandatory fields before any network traffic.
pub fn validate(args: &RestoreArgs) -> Result<(), ArmError> {
    for (field, value) in [
        ("recovery-point-id", &args.recovery_point_id),
        ("storage-account-name", &args.storage_account_name),
        (
            "storage-account-resource-group-name",
            &args.storage_account_resource_group_name,
        ),
    ] {
        if value.trim().is_empty() {
            return Err(ArmError::validation(field, "must not be empty"));
        }
    }
    Ok(())
}

/// The recovery-point reference addressed by these arguments.
pub fn recovery_point_of(args: &RestoreArgs) -> RecoveryPoint {
    RecoveryPoint {
        id: args.recovery_point_id.clone(),
        workload_type: args.workload_type,
        backup_management_type: args.backup_management_type,
    }
}

/// Resolve, select, submit.  The whole restore pipeline minus terminal
/// I/O, generic over the client so tests can count calls.
pub fn submit_restore<C: Resources + RestoreJobs>(
    client: &C,
    rp: &RecoveryPoint,
    storage_account_name: &str,
    storage_account_resource_group: &str,
) -> Result<JobHandle, ArmError> {
    let storage =
        resolve_storage_account(client, storage_account_resource_group, storage_account_name)?;
    let provider = select_provider(rp.workload_type, rp.backup_management_type)?;
    provider.trigger_restore(client, rp, &storage)
}

// ─── Entry point ──────────────────────────────────────────────────────────────

/// Execute the full `restore-backup-item` flow.
pub fn run(cli: &Cli, args: &RestoreArgs, cfg: &Config) -> Result<()> {
    validate(args)?;

    let rp = recovery_point_of(args);

    if cli.print_request {
        // Offline: provider selection still runs (an unsupported pair
        // fails here too), but the storage fields stay as placeholders
        // since filling them in would need the identity lookup.
        let provider = select_provider(rp.workload_type, rp.backup_management_type)?;
        let placeholder = StorageContext {
            id: "<storage-account-id>".into(),
            location: "<location>".into(),
            resource_type: "<type>".into(),
        };
        let body = provider.build_restore_request(&rp, &placeholder);
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if !ui::confirm("Restore backup item", &args.recovery_point_id, args.force) {
        println!("Aborted.");
        return Ok(());
    }

    ui::debug(
        cli.verbose,
        format!(
            "resolving storage account '{}' (classic namespace first)",
            args.storage_account_name.to_lowercase()
        ),
    );

    let client = ArmClient::from_config(cfg)?;

    let (outcome, storage) = ui::run_step("Resolve storage account", || {
        resolve_storage_account(
            &client,
            &args.storage_account_resource_group_name,
            &args.storage_account_name,
        )
    });
    outcome.print();
    let Some(storage) = storage else {
        anyhow::bail!("storage account resolution failed");
    };
    ui::debug(cli.verbose, format!("storage id = {}", storage.id));

    let provider = select_provider(rp.workload_type, rp.backup_management_type)?;
    ui::debug(cli.verbose, format!("selected provider {provider:?}"));

    let (outcome, job) = ui::run_step("Submit restore", || {
        provider.trigger_restore(&client, &rp, &storage)
    });
    outcome.print();
    let Some(job) = job else {
        anyhow::bail!("restore submission failed");
    };

    ui::debug(cli.verbose, "restore submitted");
    println!("Restore job accepted: {job}");

    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
