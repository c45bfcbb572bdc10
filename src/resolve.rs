//! Storage-account identity resolution.
//!
//! A storage account may live under either the classic or the current
//! storage provider.  Resolution tries the classic namespace first and
//! falls back exactly once to the current one — an ordered candidate list
//! with early return, so the "one fallback, never a third attempt"
//! invariant is visible in the shape of the code rather than buried in
//! exception handling.
//!
//! Both attempt errors are kept: when resolution fails outright, the
//! operator sees what the classic lookup said as well as the current one.

use crate::{
    client::Resources,
    error::ArmError,
    model::{ResourceIdentity, StorageContext},
};

/// One (namespace, api-version) pair to try during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityCandidate {
    pub namespace: &'static str,
    pub api_version: &'static str,
}

/// The two storage providers, in the order they are tried.
pub const STORAGE_PROVIDER_CANDIDATES: [IdentityCandidate; 2] = [
    IdentityCandidate {
        namespace: "Microsoft.ClassicStorage/storageAccounts",
        api_version: "2015-12-01",
    },
    IdentityCandidate {
        namespace: "Microsoft.Storage/storageAccounts",
        api_version: "2016-01-01",
    },
];

impl IdentityCandidate {
    /// The identity for `account_name` under this provider.
    pub fn identity_for(&self, account_name: &str) -> ResourceIdentity {
        ResourceIdentity {
            resource_name: account_name.to_string(),
            provider_namespace: self.namespace,
            api_version: self.api_version,
            resource_type: String::new(),
        }
    }
}

/// Resolve a storage account to its `{id, location, type}`.
///
/// The account name is lowercased before lookup, so `MyAcct` and `myacct`
/// resolve identically.  Any failure of the first candidate — transport,
/// not-found, type mismatch — moves on to the second; a second failure
/// yields [`ArmError::ResolutionExhausted`] carrying both errors.
pub fn resolve_storage_account<C: Resources>(
    client: &C,
    resource_group: &str,
    account_name: &str,
) -> Result<StorageContext, ArmError> {
    let account_name = account_name.to_lowercase();

    let mut first_error: Option<ArmError> = None;
    for candidate in STORAGE_PROVIDER_CANDIDATES {
        let identity = candidate.identity_for(&account_name);
        match client.get_resource(resource_group, &identity) {
            Ok(resource) => return Ok(resource.into()),
            Err(err) => match first_error {
                None => first_error = Some(err),
                Some(classic) => {
                    return Err(ArmError::ResolutionExhausted {
                        classic: Box::new(classic),
                        current: Box::new(err),
                    });
                }
            },
        }
    }

    // Unreachable while the candidate list has two entries; keeps the
    // compiler honest if the list ever changes.
    Err(first_error.unwrap_or_else(|| {
        ArmError::Transport("no storage provider candidates configured".into())
    }))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
