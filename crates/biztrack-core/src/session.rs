//! # Session Context
//!
//! The explicit authorization context passed to every repository call.
//!
//! ## Why Not a Global?
//! An ambient current-user global invites callers to skip the permission
//! checks around it. Here the session is an explicit value and the checks
//! live at the component boundary, so there is no way to reach a repository
//! operation without presenting who is acting:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Capability Checks                                    │
//! │                                                                         │
//! │  login() ──► Session ──┬──► catalog.upsert(&session, ..)               │
//! │                        │         └── require_approved                   │
//! │                        │         └── require_role(Owner|Manager)        │
//! │                        │         └── require_same_business              │
//! │                        │                                                │
//! │                        ├──► ledger.record(&session, ..)                │
//! │                        │         └── require_approved                   │
//! │                        │                                                │
//! │                        └──► ledger.delete(&session, ..)                │
//! │                                  └── require_approved                   │
//! │                                  └── require_role(Owner)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A non-approved account can hold a `Session` (it needs one to see its own
//! pending screen and re-check status); every data operation refuses it.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{AccountStatus, BusinessKey, SessionAccount, StaffRole};

/// The authenticated caller, passed explicitly to every component call.
///
/// Lifecycle: created on successful login or status re-check, dropped on
/// logout, never implicitly mutated elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    account: SessionAccount,
}

impl Session {
    /// Wraps a credential-stripped account projection.
    pub fn new(account: SessionAccount) -> Self {
        Session { account }
    }

    /// The acting account.
    #[inline]
    pub fn account(&self) -> &SessionAccount {
        &self.account
    }

    /// Id of the acting account.
    #[inline]
    pub fn account_id(&self) -> &str {
        &self.account.id
    }

    /// Partition key of the acting account's business.
    #[inline]
    pub fn business_key(&self) -> BusinessKey {
        self.account.business_key()
    }

    /// Display spelling of the acting account's business name.
    #[inline]
    pub fn business_name(&self) -> &str {
        &self.account.business_name
    }

    /// Fails unless the account has been approved by its business owner.
    pub fn require_approved(&self) -> CoreResult<()> {
        if self.account.status == AccountStatus::Approved {
            Ok(())
        } else {
            Err(CoreError::NotApproved {
                status: self.account.status,
            })
        }
    }

    /// Fails unless the account's role is one of `allowed`.
    ///
    /// `action` names the refused operation in the error message
    /// ("delete transactions", "manage the catalog").
    pub fn require_role(&self, action: &str, allowed: &[StaffRole]) -> CoreResult<()> {
        if allowed.contains(&self.account.role) {
            Ok(())
        } else {
            Err(CoreError::permission_denied(action, self.account.role))
        }
    }

    /// Fails unless `business_name` falls in the session's partition.
    ///
    /// This is the write-time referential check: Products and Transactions
    /// carry only a business-name string, so the boundary rejects writes that
    /// would land in another tenant's partition.
    pub fn require_same_business(&self, business_name: &str) -> CoreResult<()> {
        if self.business_key().matches(business_name) {
            Ok(())
        } else {
            Err(CoreError::ForeignBusiness {
                business: business_name.to_string(),
            })
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SubscriptionTier;

    fn session_with(role: StaffRole, status: AccountStatus) -> Session {
        Session::new(SessionAccount {
            id: "a-1".to_string(),
            full_name: "Jane Doe".to_string(),
            phone_number: "0970000000".to_string(),
            email: "owner@lusakamart.com".to_string(),
            business_name: "Lusaka Central Mart".to_string(),
            role,
            tier: SubscriptionTier::Paid,
            status,
        })
    }

    #[test]
    fn test_require_approved() {
        let approved = session_with(StaffRole::Owner, AccountStatus::Approved);
        assert!(approved.require_approved().is_ok());

        let pending = session_with(StaffRole::Manager, AccountStatus::Pending);
        assert_eq!(
            pending.require_approved(),
            Err(CoreError::NotApproved {
                status: AccountStatus::Pending
            })
        );

        let rejected = session_with(StaffRole::Manager, AccountStatus::Rejected);
        assert!(rejected.require_approved().is_err());
    }

    #[test]
    fn test_require_role() {
        let sales = session_with(StaffRole::SalesPerson, AccountStatus::Approved);
        let err = sales
            .require_role("delete transactions", &[StaffRole::Owner])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "SALES PERSON accounts cannot delete transactions"
        );

        let owner = session_with(StaffRole::Owner, AccountStatus::Approved);
        assert!(owner
            .require_role("delete transactions", &[StaffRole::Owner])
            .is_ok());
    }

    #[test]
    fn test_require_same_business() {
        let session = session_with(StaffRole::Owner, AccountStatus::Approved);
        assert!(session.require_same_business("LUSAKA CENTRAL MART ").is_ok());
        assert!(matches!(
            session.require_same_business("Kitwe Corner Shop"),
            Err(CoreError::ForeignBusiness { .. })
        ));
    }
}
