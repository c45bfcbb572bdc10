//! Backup-provider dispatch.
//!
//! Each (workload type, backup management type) pair maps to exactly one
//! provider, and each provider knows the restore request shape its
//! workload expects.  The mapping is a match table: an unregistered pair
//! is an explicit [`ArmError::UnsupportedProvider`], never a default
//! provider or a runtime downcast.

use serde_json::{Value, json};

use crate::{
    client::RestoreJobs,
    error::ArmError,
    model::{BackupManagementType, JobHandle, RecoveryPoint, StorageContext, WorkloadType},
};

/// The registered provider strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// IaaS virtual machines managed by the recovery-services fabric.
    IaasVm,
    /// SQL databases backed up through the SQL fabric.
    AzureSql,
}

/// Look up the provider for a workload/management pair.
///
/// Pure: identical pairs always yield the same provider.
pub fn select_provider(
    workload: WorkloadType,
    management: BackupManagementType,
) -> Result<ProviderKind, ArmError> {
    match (workload, management) {
        (WorkloadType::AzureVm, BackupManagementType::AzureVm) => Ok(ProviderKind::IaasVm),
        (WorkloadType::AzureSqlDb, BackupManagementType::AzureSql) => Ok(ProviderKind::AzureSql),
        _ => Err(ArmError::UnsupportedProvider {
            workload,
            management,
        }),
    }
}

impl ProviderKind {
    /// Build the workload-specific restore request body.
    pub fn build_restore_request(&self, rp: &RecoveryPoint, storage: &StorageContext) -> Value {
        match self {
            Self::IaasVm => json!({
                "properties": {
                    "objectType": "IaasVMRestoreRequest",
                    "recoveryPointId": rp.id,
                    "recoveryType": "RestoreDisks",
                    "storageAccountId": storage.id,
                    "storageAccountType": storage.resource_type,
                    "region": storage.location,
                    "createNewCloudService": false,
                }
            }),
            Self::AzureSql => json!({
                "properties": {
                    "objectType": "AzureSqlRestoreRequest",
                    "recoveryPointId": rp.id,
                    "targetStorageAccountId": storage.id,
                    "targetRegion": storage.location,
                }
            }),
        }
    }

    /// Submit the restore request for this provider's workload.
    ///
    /// A failure here wraps the underlying error as
    /// [`ArmError::Submission`] — identity resolution and provider
    /// selection already succeeded, so the caller can tell the phases
    /// apart.
    pub fn trigger_restore<C: RestoreJobs>(
        &self,
        client: &C,
        rp: &RecoveryPoint,
        storage: &StorageContext,
    ) -> Result<JobHandle, ArmError> {
        let body = self.build_restore_request(rp, storage);
        client
            .trigger_restore(&rp.id, &body)
            .map_err(|e| ArmError::Submission(Box::new(e)))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn recovery_point() -> RecoveryPoint {
        RecoveryPoint {
            id: "/subscriptions/s/…/recoveryPoints/rp-17".into(),
            workload_type: WorkloadType::AzureVm,
            backup_management_type: BackupManagementType::AzureVm,
        }
    }

    fn storage() -> StorageContext {
        StorageContext {
            id: "/subscriptions/s/…/storageAccounts/myacct".into(),
            location: "westus".into(),
            resource_type: "Microsoft.Storage/storageAccounts".into(),
        }
    }

    // ── Dispatch table ────────────────────────────────────────────────────────

    #[test]
    fn registered_pairs_route_to_their_provider() {
        assert_eq!(
            select_provider(WorkloadType::AzureVm, BackupManagementType::AzureVm).unwrap(),
            ProviderKind::IaasVm
        );
        assert_eq!(
            select_provider(WorkloadType::AzureSqlDb, BackupManagementType::AzureSql).unwrap(),
            ProviderKind::AzureSql
        );
    }

    #[test]
    fn selection_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(
                select_provider(WorkloadType::AzureVm, BackupManagementType::AzureVm).unwrap(),
                ProviderKind::IaasVm
            );
        }
    }

    #[test]
    fn unregistered_pairs_are_unsupported() {
        let unregistered = [
            (WorkloadType::AzureVm, BackupManagementType::AzureSql),
            (WorkloadType::AzureVm, BackupManagementType::Mab),
            (WorkloadType::AzureSqlDb, BackupManagementType::AzureVm),
            (WorkloadType::AzureFiles, BackupManagementType::AzureStorage),
            (WorkloadType::AzureFiles, BackupManagementType::Mab),
        ];
        for (w, m) in unregistered {
            let err = select_provider(w, m).unwrap_err();
            assert!(
                matches!(err, ArmError::UnsupportedProvider { workload, management }
                    if workload == w && management == m),
                "expected UnsupportedProvider for {w}/{m}"
            );
        }
    }

    // ── Request bodies ────────────────────────────────────────────────────────

    #[test]
    fn iaas_vm_request_carries_storage_identity() {
        let body = ProviderKind::IaasVm.build_restore_request(&recovery_point(), &storage());
        let props = &body["properties"];
        assert_eq!(props["objectType"], "IaasVMRestoreRequest");
        assert_eq!(props["storageAccountId"], storage().id);
        assert_eq!(props["region"], "westus");
        assert_eq!(props["storageAccountType"], "Microsoft.Storage/storageAccounts");
    }

    #[test]
    fn azure_sql_request_has_its_own_shape() {
        let body = ProviderKind::AzureSql.build_restore_request(&recovery_point(), &storage());
        let props = &body["properties"];
        assert_eq!(props["objectType"], "AzureSqlRestoreRequest");
        assert_eq!(props["targetStorageAccountId"], storage().id);
        assert!(props.get("storageAccountType").is_none());
    }

    #[test]
    fn snapshot_iaas_vm_request() {
        let body = ProviderKind::IaasVm.build_restore_request(&recovery_point(), &storage());
        insta::assert_snapshot!(
            serde_json::to_string_pretty(&body).unwrap(),
            @r#"
        {
          "properties": {
            "createNewCloudService": false,
            "objectType": "IaasVMRestoreRequest",
            "recoveryPointId": "/subscriptions/s/…/recoveryPoints/rp-17",
            "recoveryType": "RestoreDisks",
            "region": "westus",
            "storageAccountId": "/subscriptions/s/…/storageAccounts/myacct",
            "storageAccountType": "Microsoft.Storage/storageAccounts"
          }
        }
        "#
        );
    }
}
