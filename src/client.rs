//! Service clients — the seams the flows are generic over.
//!
//! The three traits cover the calls the flows make: resource lookup,
//! trigger create, restore submission.  [`ArmClient`] is the blocking HTTP
//! implementation used by the binary; tests substitute counting fakes.
//!
//! There is no retry anywhere in this module.  Timeouts belong to reqwest;
//! the only "waiting" logic is the bounded provisioning poll inside
//! [`Triggers::create`], which is what makes that call synchronous.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};

use crate::{
    config::Config,
    error::ArmError,
    model::{JobHandle, ResolvedResource, ResourceIdentity, Trigger, TriggerScope, TriggerSpec},
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How long the synchronous trigger create waits for a terminal
/// provisioning state before giving up: `POLL_LIMIT × POLL_INTERVAL`.
const POLL_LIMIT: u32 = 30;
const POLL_INTERVAL: Duration = Duration::from_secs(2);

// ─── Traits ───────────────────────────────────────────────────────────────────

/// Resource-management lookups.
pub trait Resources {
    /// Fetch a resource's current metadata by identity.
    fn get_resource(
        &self,
        resource_group: &str,
        identity: &ResourceIdentity,
    ) -> Result<ResolvedResource, ArmError>;
}

/// Trigger creation against a data-share account.
///
/// Both methods share one signature; the caller picks between them with
/// [`crate::commands::trigger::SubmitMode`].
pub trait Triggers {
    /// Create the trigger and wait for a terminal provisioning state.
    fn create(
        &self,
        scope: &TriggerScope,
        name: &str,
        spec: &TriggerSpec,
    ) -> Result<Trigger, ArmError>;

    /// Create the trigger and return the in-progress representation
    /// without waiting.
    fn begin_create(
        &self,
        scope: &TriggerScope,
        name: &str,
        spec: &TriggerSpec,
    ) -> Result<Trigger, ArmError>;
}

/// Restore job submission against a recovery point.
pub trait RestoreJobs {
    /// POST the restore request and return the operation handle.
    fn trigger_restore(
        &self,
        recovery_point_id: &str,
        body: &serde_json::Value,
    ) -> Result<JobHandle, ArmError>;
}

// ─── HTTP implementation ──────────────────────────────────────────────────────

/// Blocking HTTP client for the resource-management endpoint.
#[derive(Debug)]
pub struct ArmClient {
    http: Client,
    endpoint: String,
    subscription: String,
    token: Option<String>,
    datashare_api: String,
    restore_api: String,
}

impl ArmClient {
    /// Build a client from config.  The bearer token is read once, from
    /// the environment variable named by `[api].token_env`.
    pub fn from_config(cfg: &Config) -> Result<Self, ArmError> {
        let http = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ArmError::from)?;

        Ok(Self {
            http,
            endpoint: cfg.api.endpoint.trim_end_matches('/').to_string(),
            subscription: cfg.api.subscription_id.clone(),
            token: std::env::var(&cfg.api.token_env).ok(),
            datashare_api: cfg.datashare.api_version.clone(),
            restore_api: cfg.recovery.restore_api_version.clone(),
        })
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a response to its JSON body, or to a [`ArmError::Service`] with
    /// the body carried verbatim.
    fn read_json<T: serde::de::DeserializeOwned>(
        response: reqwest::blocking::Response,
    ) -> Result<T, ArmError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ArmError::Service {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }
        response.json().map_err(ArmError::from)
    }

    fn trigger_url(&self, scope: &TriggerScope, name: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.DataShare/accounts/{}/shareSubscriptions/{}/triggers/{}?api-version={}",
            self.endpoint,
            self.subscription,
            scope.resource_group,
            scope.account_name,
            scope.share_subscription.as_deref().unwrap_or_default(),
            name,
            self.datashare_api,
        )
    }

    fn put_trigger(
        &self,
        scope: &TriggerScope,
        name: &str,
        spec: &TriggerSpec,
    ) -> Result<Trigger, ArmError> {
        let url = self.trigger_url(scope, name);
        let response = self
            .authed(self.http.put(&url))
            .json(&spec.to_payload())
            .send()?;
        Self::read_json(response)
    }

    fn get_trigger(&self, scope: &TriggerScope, name: &str) -> Result<Trigger, ArmError> {
        let response = self.authed(self.http.get(self.trigger_url(scope, name))).send()?;
        Self::read_json(response)
    }
}

impl Resources for ArmClient {
    fn get_resource(
        &self,
        resource_group: &str,
        identity: &ResourceIdentity,
    ) -> Result<ResolvedResource, ArmError> {
        // `provider_namespace` already carries the resource-type path
        // (e.g. `Microsoft.Storage/storageAccounts`), so the URL needs
        // only the name appended.
        let url = format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/{}/{}?api-version={}",
            self.endpoint,
            self.subscription,
            resource_group,
            identity.provider_namespace,
            identity.resource_name,
            identity.api_version,
        );
        let response = self.authed(self.http.get(url)).send()?;
        Self::read_json(response)
    }
}

impl Triggers for ArmClient {
    fn create(
        &self,
        scope: &TriggerScope,
        name: &str,
        spec: &TriggerSpec,
    ) -> Result<Trigger, ArmError> {
        let mut trigger = self.put_trigger(scope, name, spec)?;

        // Poll until the service reports a terminal provisioning state.
        // Bounded: a trigger stuck in "Creating" surfaces as a Service
        // error rather than hanging the invocation forever.
        for _ in 0..POLL_LIMIT {
            match trigger.properties.provisioning_state.as_deref() {
                Some("Succeeded") | None => return Ok(trigger),
                Some("Failed") | Some("Canceled") => {
                    return Err(ArmError::Service {
                        status: 200,
                        message: format!(
                            "trigger '{name}' ended in provisioning state {:?}",
                            trigger.properties.provisioning_state.as_deref().unwrap_or("?")
                        ),
                    });
                }
                Some(_) => {
                    std::thread::sleep(POLL_INTERVAL);
                    trigger = self.get_trigger(scope, name)?;
                }
            }
        }

        Err(ArmError::Service {
            status: 200,
            message: format!("trigger '{name}' did not reach a terminal state"),
        })
    }

    fn begin_create(
        &self,
        scope: &TriggerScope,
        name: &str,
        spec: &TriggerSpec,
    ) -> Result<Trigger, ArmError> {
        self.put_trigger(scope, name, spec)
    }
}

impl RestoreJobs for ArmClient {
    fn trigger_restore(
        &self,
        recovery_point_id: &str,
        body: &serde_json::Value,
    ) -> Result<JobHandle, ArmError> {
        let url = format!(
            "{}{}/restore?api-version={}",
            self.endpoint, recovery_point_id, self.restore_api,
        );
        let response = self.authed(self.http.post(url)).json(body).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ArmError::Service {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        // The operation handle lives in the async-operation headers; fall
        // back to the body for services that return a job id inline.
        let header = ["azure-asyncoperation", "location"]
            .iter()
            .find_map(|h| response.headers().get(*h))
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        let operation = match header {
            Some(h) => h,
            None => response.text().unwrap_or_default(),
        };

        Ok(JobHandle { operation })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
