//! Domain types shared by both flows.
//!
//! Everything here is plain data: request specs built from CLI arguments,
//! projections of service responses, and the identity tuples used during
//! storage-account resolution.  Serde attribute names follow the wire
//! format of the management API (camelCase properties, PascalCase enums).

use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::json;

// ─── Trigger creation ─────────────────────────────────────────────────────────

/// How often a scheduled trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum RecurrenceInterval {
    #[value(name = "Hour")]
    Hour,
    #[value(name = "Day")]
    Day,
}

/// Synchronization mode carried by every trigger.
///
/// Only incremental synchronization exists; the variant is spelled out so
/// the wire value is explicit rather than an unexplained string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynchronizationMode {
    Incremental,
}

/// A scheduled-trigger resource description, built once per invocation and
/// submitted once.  `synchronization_mode` is always
/// [`SynchronizationMode::Incremental`] regardless of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerSpec {
    pub recurrence_interval: RecurrenceInterval,
    pub synchronization_time: DateTime<Utc>,
    pub synchronization_mode: SynchronizationMode,
}

impl TriggerSpec {
    pub fn new(interval: RecurrenceInterval, time: DateTime<Utc>) -> Self {
        Self {
            recurrence_interval: interval,
            synchronization_time: time,
            synchronization_mode: SynchronizationMode::Incremental,
        }
    }

    /// The PUT body for the triggers endpoint.
    pub fn to_payload(&self) -> serde_json::Value {
        json!({
            "kind": "ScheduleBased",
            "properties": {
                "recurrenceInterval": self.recurrence_interval,
                "synchronizationTime": self.synchronization_time.to_rfc3339(),
                "synchronizationMode": self.synchronization_mode,
            }
        })
    }
}

/// A trigger as returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kind: String,
    pub properties: TriggerProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerProperties {
    pub recurrence_interval: Option<RecurrenceInterval>,
    pub synchronization_time: Option<DateTime<Utc>>,
    pub synchronization_mode: Option<SynchronizationMode>,
    #[serde(default)]
    pub provisioning_state: Option<String>,
    #[serde(default)]
    pub trigger_status: Option<String>,
}

/// Address of a trigger within a data-share account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerScope {
    pub resource_group: String,
    pub account_name: String,
    /// Optional on the CLI; the service rejects requests without one.
    pub share_subscription: Option<String>,
}

// ─── Restore submission ───────────────────────────────────────────────────────

/// Workload captured by a recovery point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum WorkloadType {
    #[value(name = "AzureVM")]
    #[serde(rename = "AzureVM")]
    AzureVm,
    #[value(name = "AzureSqlDb")]
    AzureSqlDb,
    #[value(name = "AzureFiles")]
    AzureFiles,
}

/// Which backup fabric manages the protected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum BackupManagementType {
    #[value(name = "AzureVM")]
    #[serde(rename = "AzureVM")]
    AzureVm,
    #[value(name = "AzureSql")]
    AzureSql,
    #[value(name = "AzureStorage")]
    AzureStorage,
    #[value(name = "MAB")]
    #[serde(rename = "MAB")]
    Mab,
}

impl fmt::Display for WorkloadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AzureVm => "AzureVM",
            Self::AzureSqlDb => "AzureSqlDb",
            Self::AzureFiles => "AzureFiles",
        })
    }
}

impl fmt::Display for BackupManagementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AzureVm => "AzureVM",
            Self::AzureSql => "AzureSql",
            Self::AzureStorage => "AzureStorage",
            Self::Mab => "MAB",
        })
    }
}

/// Reference to a specific backed-up state of a workload, used as the
/// restore source.  The id is an opaque resource path; the two type fields
/// drive provider selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryPoint {
    pub id: String,
    pub workload_type: WorkloadType,
    pub backup_management_type: BackupManagementType,
}

// ─── Resource identity ────────────────────────────────────────────────────────

/// The tuple used to look up a resource's current metadata.
///
/// Built from one of the two fixed candidates in
/// [`crate::resolve::STORAGE_PROVIDER_CANDIDATES`] plus the (lowercased)
/// account name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub resource_name: String,
    pub provider_namespace: &'static str,
    pub api_version: &'static str,
    /// Kept empty for storage accounts; the namespace already carries the
    /// full type path.
    pub resource_type: String,
}

/// A resource as returned by the resource-management endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolvedResource {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub resource_type: String,
}

/// The slice of a resolved storage account that restore requests need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageContext {
    pub id: String,
    pub location: String,
    pub resource_type: String,
}

impl From<ResolvedResource> for StorageContext {
    fn from(r: ResolvedResource) -> Self {
        Self {
            id: r.id,
            location: r.location,
            resource_type: r.resource_type,
        }
    }
}

// ─── Job handle ───────────────────────────────────────────────────────────────

/// Opaque reference to an asynchronous operation accepted by the service.
///
/// The core's job is to submit and hand this back, never to poll it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub operation: String,
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.operation)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
