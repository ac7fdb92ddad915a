//! # Session State
//!
//! Holds the currently authenticated account for the lifetime of the process
//! and mirrors it into the `session` collection.
//!
//! ## Thread Safety
//! The state is wrapped in `Arc<Mutex<T>>` for `Send + Sync` ownership
//! hygiene; the execution model is still a single active context (one user,
//! one device), so the mutex is never contended.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Startup ────────────► restore() ───────► session collection → memory  │
//! │                                                                         │
//! │  Successful login ───► sign_in() ───────► strip credential, persist    │
//! │                                                                         │
//! │  Status re-check ────► sign_in() again ─► projection refreshed         │
//! │                                                                         │
//! │  Logout ─────────────► sign_out() ──────► memory + collection cleared  │
//! │                                                                         │
//! │  The persisted projection is a SessionAccount: the credential cannot   │
//! │  reach storage because the type does not carry it.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::error::StoreResult;
use crate::store::{Collection, Database};
use biztrack_core::{Account, Session, SessionAccount};

/// Process-wide session holder.
///
/// Components never read this implicitly: callers take a [`Session`] from it
/// and pass that to every repository call.
#[derive(Debug, Default)]
pub struct SessionState {
    current: Arc<Mutex<Option<SessionAccount>>>,
}

impl SessionState {
    /// Creates an empty session state.
    pub fn new() -> Self {
        SessionState::default()
    }

    /// Establishes a session from a freshly authenticated account.
    ///
    /// The credential is stripped by the `SessionAccount` projection before
    /// the record is persisted.
    pub fn sign_in(&self, db: &Database, account: &Account) -> StoreResult<Session> {
        let projection = SessionAccount::from(account);
        debug!(account = %projection.id, business = %projection.business_name, "Signing in");

        db.write_record(Collection::Session, Some(&projection))?;

        let mut current = self.current.lock().expect("session mutex poisoned");
        *current = Some(projection.clone());

        Ok(Session::new(projection))
    }

    /// Clears the session in memory and in storage.
    pub fn sign_out(&self, db: &Database) -> StoreResult<()> {
        debug!("Signing out");
        db.write_record::<SessionAccount>(Collection::Session, None)?;

        let mut current = self.current.lock().expect("session mutex poisoned");
        *current = None;

        Ok(())
    }

    /// Restores the persisted session, if one survived a restart.
    pub fn restore(&self, db: &Database) -> StoreResult<Option<Session>> {
        let stored: Option<SessionAccount> = db.read_record(Collection::Session)?;

        let mut current = self.current.lock().expect("session mutex poisoned");
        *current = stored.clone();

        Ok(stored.map(Session::new))
    }

    /// The in-memory session, if any.
    pub fn current(&self) -> Option<Session> {
        let current = self.current.lock().expect("session mutex poisoned");
        current.clone().map(Session::new)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::identity::Registration;
    use biztrack_core::{StaffRole, SubscriptionTier};

    fn owner(db: &Database) -> Account {
        db.identity()
            .register(
                Registration {
                    full_name: "Jane Doe".to_string(),
                    phone_number: "0970000000".to_string(),
                    email: "jane@mart.com".to_string(),
                    credential: "password123".to_string(),
                    business_name: "Lusaka Central Mart".to_string(),
                    role: StaffRole::Owner,
                    tier: SubscriptionTier::Paid,
                },
                false,
            )
            .unwrap()
    }

    #[test]
    fn test_sign_in_persists_without_credential() {
        let db = Database::in_memory();
        let state = SessionState::new();
        let account = owner(&db);

        let session = state.sign_in(&db, &account).unwrap();
        assert_eq!(session.account_id(), account.id);

        // Inspect the raw payload: the secret must not be anywhere in it.
        let raw = db
            .read_record::<serde_json::Value>(Collection::Session)
            .unwrap()
            .unwrap();
        let payload = raw.to_string();
        assert!(!payload.contains("password123"));
        assert!(!payload.contains("credential"));
    }

    #[test]
    fn test_sign_out_clears_both_copies() {
        let db = Database::in_memory();
        let state = SessionState::new();
        let account = owner(&db);

        state.sign_in(&db, &account).unwrap();
        state.sign_out(&db).unwrap();

        assert!(state.current().is_none());
        assert!(db
            .read_record::<SessionAccount>(Collection::Session)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_restore_survives_restart() {
        let db = Database::in_memory();
        let account = owner(&db);

        let first_run = SessionState::new();
        first_run.sign_in(&db, &account).unwrap();
        drop(first_run);

        // A fresh state over the same store picks the session back up.
        let second_run = SessionState::new();
        let restored = second_run.restore(&db).unwrap().unwrap();
        assert_eq!(restored.account_id(), account.id);
        assert_eq!(second_run.current().unwrap().account_id(), account.id);
    }
}
