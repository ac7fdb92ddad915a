//! # Identity Repository
//!
//! Registration, login, the owner-approval workflow, and staff listing.
//!
//! ## Approval Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Account Lifecycle                                    │
//! │                                                                         │
//! │  register(new business)                                                │
//! │       └── role forced to OWNER, status forced to APPROVED              │
//! │                                                                         │
//! │  register(join existing)                                               │
//! │       └── requested role (MANAGER | SALES_PERSON), status PENDING      │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  set_status(owner session, id, APPROVED)  ──► full access              │
//! │  set_status(owner session, id, REJECTED)  ──► terminal                 │
//! │                                                                         │
//! │  APPROVED ──(revoke)──► REJECTED; nothing re-enters PENDING            │
//! │  Accounts are never hard-deleted, so a rejected email stays taken.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Login and registration rejections carry user-facing text and are surfaced
//! verbatim; no retry logic anywhere.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StoreResult;
use crate::store::{Collection, Database};
use biztrack_core::validation::normalize_email;
use biztrack_core::{
    new_entity_id, Account, AccountStatus, BusinessKey, CoreError, Session, SessionAccount,
    StaffRole, SubscriptionTier,
};

// =============================================================================
// Registration Candidate
// =============================================================================

/// The fully-formed registration payload supplied by the presentation layer.
///
/// Role and status on the created account are decided here, not by the
/// candidate: a new business forces OWNER/APPROVED, joining forces PENDING.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub credential: String,
    pub business_name: String,
    /// Requested role; honored only when joining an existing business.
    pub role: StaffRole,
    pub tier: SubscriptionTier,
}

// =============================================================================
// Identity Repository
// =============================================================================

/// Repository for account operations.
#[derive(Debug, Clone)]
pub struct IdentityRepository {
    db: Database,
}

impl IdentityRepository {
    /// Creates a new IdentityRepository.
    pub fn new(db: Database) -> Self {
        IdentityRepository { db }
    }

    /// Registers an account.
    ///
    /// ## Behavior
    /// - `joining_existing_business = false`: fails `BusinessNameTaken` if an
    ///   owner already holds the business name; otherwise the candidate
    ///   becomes that business's permanent OWNER, pre-approved.
    /// - `joining_existing_business = true`: fails `BusinessNotFound` without
    ///   an owner; otherwise creates a PENDING account with the requested
    ///   role, waiting for the owner's approval.
    ///
    /// Fails `DuplicateEmail` in either mode if the email (case-insensitive,
    /// trimmed) already exists anywhere in the system.
    pub fn register(
        &self,
        candidate: Registration,
        joining_existing_business: bool,
    ) -> StoreResult<Account> {
        debug!(
            email = %candidate.email,
            business = %candidate.business_name,
            joining = joining_existing_business,
            "Registering account"
        );

        let mut accounts: Vec<Account> = self.db.read_rows(Collection::Accounts)?;

        let email_key = normalize_email(&candidate.email);
        if accounts
            .iter()
            .any(|a| normalize_email(&a.email) == email_key)
        {
            return Err(CoreError::DuplicateEmail(candidate.email).into());
        }

        let business_key = BusinessKey::new(&candidate.business_name);
        let owner_exists = accounts
            .iter()
            .any(|a| a.role == StaffRole::Owner && a.business_key() == business_key);

        let account = if joining_existing_business {
            if !owner_exists {
                return Err(CoreError::BusinessNotFound(candidate.business_name).into());
            }
            if candidate.role == StaffRole::Owner {
                // The first registrant is the permanent owner; a second one
                // can only join as staff.
                return Err(CoreError::permission_denied(
                    "join an existing business as its owner",
                    StaffRole::Owner,
                )
                .into());
            }
            Account {
                id: new_entity_id(),
                full_name: candidate.full_name,
                phone_number: candidate.phone_number,
                email: candidate.email,
                credential: candidate.credential,
                business_name: candidate.business_name,
                role: candidate.role,
                tier: candidate.tier,
                status: AccountStatus::Pending,
            }
        } else {
            if owner_exists {
                return Err(CoreError::BusinessNameTaken(candidate.business_name).into());
            }
            // First registrant of the business name: permanent owner,
            // self-approving by construction.
            Account {
                id: new_entity_id(),
                full_name: candidate.full_name,
                phone_number: candidate.phone_number,
                email: candidate.email,
                credential: candidate.credential,
                business_name: candidate.business_name,
                role: StaffRole::Owner,
                tier: candidate.tier,
                status: AccountStatus::Approved,
            }
        };

        accounts.push(account.clone());
        self.db.write_rows(Collection::Accounts, &accounts)?;

        Ok(account)
    }

    /// Authenticates an account.
    ///
    /// Lookup is by email (case-insensitive); the business name, secret, and
    /// role selected at login must all match the stored account. The full
    /// account is returned; callers establish the session through
    /// [`crate::session::SessionState`], which strips the credential before
    /// any persistence.
    pub fn login(
        &self,
        business_name: &str,
        email: &str,
        credential: &str,
        role: StaffRole,
    ) -> StoreResult<Account> {
        debug!(email = %email, business = %business_name, "Login attempt");

        let accounts: Vec<Account> = self.db.read_rows(Collection::Accounts)?;

        let email_key = normalize_email(email);
        let account = accounts
            .iter()
            .find(|a| normalize_email(&a.email) == email_key)
            .ok_or_else(|| CoreError::AccountNotFound(email.to_string()))?;

        if account.business_key() != BusinessKey::new(business_name) {
            return Err(CoreError::BusinessMismatch {
                business: business_name.to_string(),
            }
            .into());
        }

        if account.credential != credential {
            return Err(CoreError::InvalidCredential.into());
        }

        if account.role != role {
            return Err(CoreError::RoleMismatch {
                actual: account.role,
            }
            .into());
        }

        Ok(account.clone())
    }

    /// Changes a staff account's approval status.
    ///
    /// The acting session must be the APPROVED owner of the target's
    /// business, and the transition must be legal for the approval state
    /// machine (PENDING→APPROVED, PENDING→REJECTED, APPROVED→REJECTED).
    /// If the persisted session projection is the target account, it is
    /// refreshed so a staff member's open session observes the change.
    pub fn set_status(
        &self,
        session: &Session,
        account_id: &str,
        new_status: AccountStatus,
    ) -> StoreResult<Account> {
        session.require_approved()?;
        session.require_role("approve or reject staff", &[StaffRole::Owner])?;

        debug!(target = %account_id, status = ?new_status, "Changing account status");

        let mut accounts: Vec<Account> = self.db.read_rows(Collection::Accounts)?;

        let target = accounts
            .iter_mut()
            .find(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;

        session.require_same_business(&target.business_name)?;

        if !target.status.can_transition(new_status) {
            return Err(CoreError::InvalidStatusChange {
                from: target.status,
                to: new_status,
            }
            .into());
        }

        target.status = new_status;
        let updated = target.clone();
        self.db.write_rows(Collection::Accounts, &accounts)?;

        self.refresh_session_projection(&updated)?;

        Ok(updated)
    }

    /// Re-reads an account's current status.
    ///
    /// This is the one read a non-approved account may perform: a pending
    /// staff member polls it from the waiting screen. The persisted session
    /// projection is refreshed to match.
    pub fn recheck_status(&self, account_id: &str) -> StoreResult<Account> {
        let accounts: Vec<Account> = self.db.read_rows(Collection::Accounts)?;

        let account = accounts
            .iter()
            .find(|a| a.id == account_id)
            .ok_or_else(|| CoreError::AccountNotFound(account_id.to_string()))?;

        self.refresh_session_projection(account)?;

        Ok(account.clone())
    }

    /// Lists the business's staff, excluding the caller.
    ///
    /// Owner-only: staff management is the owner's concern. Accounts come
    /// back in stored (registration) order.
    pub fn list_staff(&self, session: &Session) -> StoreResult<Vec<Account>> {
        session.require_approved()?;
        session.require_role("manage staff", &[StaffRole::Owner])?;

        let accounts: Vec<Account> = self.db.read_rows(Collection::Accounts)?;
        let business_key = session.business_key();

        Ok(accounts
            .into_iter()
            .filter(|a| a.business_key() == business_key && a.id != session.account_id())
            .collect())
    }

    /// Rewrites the persisted session projection if it is the given account.
    fn refresh_session_projection(&self, account: &Account) -> StoreResult<()> {
        let stored: Option<SessionAccount> = self.db.read_record(Collection::Session)?;
        if stored.is_some_and(|s| s.id == account.id) {
            self.db
                .write_record(Collection::Session, Some(&SessionAccount::from(account)))?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
