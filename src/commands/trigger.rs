//! `armctl new-trigger` — create a scheduled synchronization trigger.
//!
//! The flow is linear: validate → confirm → build the spec → submit →
//! project the result.  `--as-job` selects the fire-and-forget client
//! call; everything else is identical between the two modes.  The
//! synchronization mode is always incremental, regardless of input.

use anyhow::Result;

use crate::{
    cli::{Cli, NewTriggerArgs},
    client::{ArmClient, Triggers},
    config::Config,
    error::ArmError,
    model::{Trigger, TriggerScope, TriggerSpec},
    ui,
};

// ─── Submission mode ──────────────────────────────────────────────────────────

/// Which of the two trigger-creation calls to make.
///
/// The two calls share one signature; this enum is the only thing that
/// distinguishes a synchronous create from a job-style create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMode {
    /// Wait for the trigger to reach a terminal provisioning state.
    Wait,
    /// Return as soon as the service accepts the request.
    AsJob,
}

impl SubmitMode {
    pub fn from_flag(as_job: bool) -> Self {
        if as_job { Self::AsJob } else { Self::Wait }
    }
}

// ─── Core ─────────────────────────────────────────────────────────────────────

/// Check mandatory fields before any network traffic.
pub fn validate(args: &NewTriggerArgs) -> Result<(), ArmError> {
    for (field, value) in [
        ("resource-group-name", &args.resource_group_name),
        ("account-name", &args.account_name),
        ("name", &args.name),
    ] {
        if value.trim().is_empty() {
            return Err(ArmError::validation(field, "must not be empty"));
        }
    }
    Ok(())
}

/// The trigger scope addressed by these arguments.
pub fn scope_of(args: &NewTriggerArgs) -> TriggerScope {
    TriggerScope {
        resource_group: args.resource_group_name.clone(),
        account_name: args.account_name.clone(),
        share_subscription: args.share_subscription_name.clone(),
    }
}

/// The spec submitted for these arguments.  Mode is always incremental.
pub fn spec_of(args: &NewTriggerArgs) -> TriggerSpec {
    TriggerSpec::new(args.recurrence_interval, args.synchronization_time)
}

/// Submit the spec through whichever call `mode` selects.
///
/// Exactly one of the two client methods is invoked per call.
pub fn submit<C: Triggers>(
    client: &C,
    scope: &TriggerScope,
    name: &str,
    spec: &TriggerSpec,
    mode: SubmitMode,
) -> Result<Trigger, ArmError> {
    match mode {
        SubmitMode::Wait => client.create(scope, name, spec),
        SubmitMode::AsJob => client.begin_create(scope, name, spec),
    }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

/// Execute the full `new-trigger` flow.
pub fn run(cli: &Cli, args: &NewTriggerArgs, cfg: &Config) -> Result<()> {
    validate(args)?;

    let spec = spec_of(args);

    if cli.print_request {
        println!("{}", serde_json::to_string_pretty(&spec.to_payload())?);
        return Ok(());
    }

    if !ui::confirm("Create trigger", &args.name, args.force) {
        println!("Aborted.");
        return Ok(());
    }

    let scope = scope_of(args);
    let mode = SubmitMode::from_flag(args.as_job);
    ui::debug(
        cli.verbose,
        format!(
            "PUT trigger '{}' on account '{}' ({mode:?})",
            args.name, args.account_name
        ),
    );

    let client = ArmClient::from_config(cfg)?;
    let (outcome, trigger) = ui::run_step("Create trigger", || {
        submit(&client, &scope, &args.name, &spec, mode)
    });
    outcome.print();

    let Some(trigger) = trigger else {
        anyhow::bail!("trigger creation failed");
    };

    match mode {
        SubmitMode::Wait => println!(
            "Trigger '{}' created ({}).",
            trigger.name,
            trigger
                .properties
                .provisioning_state
                .as_deref()
                .unwrap_or("Succeeded")
        ),
        SubmitMode::AsJob => println!("Trigger '{}' creation accepted.", trigger.name),
    }

    if args.pass_thru {
        println!("{}", serde_json::to_string_pretty(&trigger)?);
    }

    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use chrono::{DateTime, Utc};
    use clap::Parser;

    use super::*;
    use crate::model::{RecurrenceInterval, SynchronizationMode, TriggerProperties};

    fn make_args(extra: &[&str]) -> NewTriggerArgs {
        let base = [
            "armctl",
            "new-trigger",
            "--resource-group-name",
            "rg1",
            "--account-name",
            "acct",
            "--share-subscription-name",
            "share-sub",
            "--name",
            "nightly",
            "--recurrence-interval",
            "Day",
            "--synchronization-time",
            "2024-01-01T00:00:00Z",
        ];
        let cli = Cli::parse_from(base.iter().copied().chain(extra.iter().copied()));
        match cli.command {
            crate::cli::Command::NewTrigger(args) => args,
            _ => unreachable!(),
        }
    }

    /// Fake trigger client counting which of the two calls was made.
    #[derive(Default)]
    struct CountingTriggers {
        creates: Cell<u32>,
        begin_creates: Cell<u32>,
    }

    impl Triggers for CountingTriggers {
        fn create(
            &self,
            _scope: &TriggerScope,
            name: &str,
            spec: &TriggerSpec,
        ) -> Result<Trigger, ArmError> {
            self.creates.set(self.creates.get() + 1);
            Ok(echo_trigger(name, spec, "Succeeded"))
        }

        fn begin_create(
            &self,
            _scope: &TriggerScope,
            name: &str,
            spec: &TriggerSpec,
        ) -> Result<Trigger, ArmError> {
            self.begin_creates.set(self.begin_creates.get() + 1);
            Ok(echo_trigger(name, spec, "Creating"))
        }
    }

    fn echo_trigger(name: &str, spec: &TriggerSpec, state: &str) -> Trigger {
        Trigger {
            name: name.into(),
            kind: "ScheduleBased".into(),
            properties: TriggerProperties {
                recurrence_interval: Some(spec.recurrence_interval),
                synchronization_time: Some(spec.synchronization_time),
                synchronization_mode: Some(spec.synchronization_mode),
                provisioning_state: Some(state.into()),
                trigger_status: None,
            },
        }
    }

    // ── validate ──────────────────────────────────────────────────────────────

    #[test]
    fn validate_accepts_complete_args() {
        assert!(validate(&make_args(&[])).is_ok());
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut args = make_args(&[]);
        args.name = "   ".into();
        let err = validate(&args).unwrap_err();
        assert!(matches!(err, ArmError::Validation { field: "name", .. }));
    }

    // ── spec building ─────────────────────────────────────────────────────────

    #[test]
    fn spec_mode_is_incremental_for_every_interval() {
        for interval in ["Hour", "Day"] {
            let mut args = make_args(&[]);
            args.recurrence_interval = match interval {
                "Hour" => RecurrenceInterval::Hour,
                _ => RecurrenceInterval::Day,
            };
            assert_eq!(
                spec_of(&args).synchronization_mode,
                SynchronizationMode::Incremental
            );
        }
    }

    // ── mode selection ────────────────────────────────────────────────────────

    #[test]
    fn as_job_flag_maps_to_submit_mode() {
        assert_eq!(SubmitMode::from_flag(false), SubmitMode::Wait);
        assert_eq!(SubmitMode::from_flag(true), SubmitMode::AsJob);
    }

    #[test]
    fn wait_mode_invokes_only_create() {
        let client = CountingTriggers::default();
        let args = make_args(&[]);
        submit(&client, &scope_of(&args), &args.name, &spec_of(&args), SubmitMode::Wait).unwrap();
        assert_eq!(client.creates.get(), 1);
        assert_eq!(client.begin_creates.get(), 0);
    }

    #[test]
    fn as_job_mode_invokes_only_begin_create() {
        let client = CountingTriggers::default();
        let args = make_args(&["--as-job"]);
        assert!(args.as_job);
        submit(&client, &scope_of(&args), &args.name, &spec_of(&args), SubmitMode::AsJob).unwrap();
        assert_eq!(client.creates.get(), 0);
        assert_eq!(client.begin_creates.get(), 1);
    }

    // ── end-to-end scenario: Day trigger, synchronous ─────────────────────────

    #[test]
    fn day_trigger_round_trips_interval_time_and_mode() {
        let client = CountingTriggers::default();
        let args = make_args(&[]);
        let spec = spec_of(&args);
        let trigger = submit(
            &client,
            &scope_of(&args),
            &args.name,
            &spec,
            SubmitMode::from_flag(args.as_job),
        )
        .unwrap();

        assert_eq!(client.creates.get(), 1, "synchronous path taken");
        assert_eq!(
            trigger.properties.recurrence_interval,
            Some(RecurrenceInterval::Day)
        );
        assert_eq!(
            trigger.properties.synchronization_time,
            Some("2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap())
        );
        assert_eq!(
            trigger.properties.synchronization_mode,
            Some(SynchronizationMode::Incremental)
        );
    }

    // ── error propagation ─────────────────────────────────────────────────────

    #[test]
    fn service_error_propagates_unmodified() {
        struct FailingTriggers;
        impl Triggers for FailingTriggers {
            fn create(
                &self,
                _: &TriggerScope,
                _: &str,
                _: &TriggerSpec,
            ) -> Result<Trigger, ArmError> {
                Err(ArmError::Service {
                    status: 409,
                    message: "trigger already exists".into(),
                })
            }
            fn begin_create(
                &self,
                _: &TriggerScope,
                _: &str,
                _: &TriggerSpec,
            ) -> Result<Trigger, ArmError> {
                unreachable!()
            }
        }

        let args = make_args(&[]);
        let err = submit(
            &FailingTriggers,
            &scope_of(&args),
            &args.name,
            &spec_of(&args),
            SubmitMode::Wait,
        )
        .unwrap_err();
        assert!(
            matches!(err, ArmError::Service { status: 409, .. }),
            "conflict must surface as the service reported it"
        );
    }
}
