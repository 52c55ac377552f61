//! The ticket store: issues, extends, destroys, and authenticates
//! session tickets.
//!
//! # Concurrency note
//!
//! `TicketStore` is NOT thread-safe by itself - it uses a plain
//! `HashMap`, not a concurrent one. This is intentional: the store is
//! owned by the gateway and accessed through a single mutex at that
//! level. Per-call critical sections are short and never block, so one
//! exclusive lock over the whole store is enough.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use buzztag_protocol::TicketId;
use serde_json::Value;
use uuid::Uuid;

use crate::{SessionConfig, SessionError, Ticket};

/// Manages all issued session tickets.
///
/// ## Lifecycle
///
/// ```text
/// new_session() --> extend_session() ... --> destroy_session()
///       |                  |                       |
///       |                  v                       v
///       |          (expiry slides forward)  (expiry forced to now)
///       v
///   [live] --(expiry passes, observed lazily)--> [dead] --> sweep_expired()
/// ```
///
/// A dead ticket behaves exactly like an unknown one until
/// [`sweep_expired`](Self::sweep_expired) physically reclaims it.
pub struct TicketStore {
    /// All issued tickets, keyed by identifier. May contain dead entries
    /// between sweeps.
    tickets: HashMap<TicketId, Ticket>,

    /// Expiry policy.
    config: SessionConfig,
}

impl TicketStore {
    /// Creates a new, empty store with the given expiry policy.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            tickets: HashMap::new(),
            config,
        }
    }

    /// Issues a fresh session ticket.
    ///
    /// The content of `credentials` is ignored: tickets are granted
    /// without authenticating identity. This is a known design
    /// simplification, not an oversight - the parameter exists so the
    /// signature does not change when a checking store is introduced.
    ///
    /// The returned ticket expires `expiry_timeout_s` from now unless
    /// extended.
    pub fn new_session(&mut self, _credentials: &Value) -> Ticket {
        let ticket = Ticket {
            id: TicketId(Uuid::new_v4()),
            expiry: Instant::now()
                + Duration::from_secs(self.config.expiry_timeout_s),
        };

        tracing::info!(id = %ticket.id, "session issued");
        self.tickets.insert(ticket.id, ticket.clone());
        ticket
    }

    /// Extends an existing session, sliding its expiry forward.
    ///
    /// On success the ticket's expiry becomes
    /// `now + expiry_sliding_window_s`, except that an extension never
    /// moves the expiry backwards: a ticket with more remaining lifetime
    /// than the sliding window keeps what it has.
    ///
    /// # Errors
    /// [`SessionError::InvalidSession`] if `sref` is malformed, names an
    /// unknown ticket, or names a ticket whose expiry has passed. An
    /// expired ticket is treated as already gone even though the entry
    /// may still be present until the next sweep.
    pub fn extend_session(&mut self, sref: &Value) -> Result<Ticket, SessionError> {
        let id = resolve_ref(sref)?;
        let now = Instant::now();

        let refreshed =
            now + Duration::from_secs(self.config.expiry_sliding_window_s);
        let ticket = self.live_ticket_mut(id, now)?;
        ticket.expiry = ticket.expiry.max(refreshed);

        tracing::debug!(%id, "session extended");
        Ok(ticket.clone())
    }

    /// Destroys an existing session.
    ///
    /// The ticket's expiry is forced to "now" rather than the entry
    /// being removed; any later extend or authenticate observes an
    /// expired ticket and fails, and the next sweep reclaims it. Keeping
    /// the entry means a destroyed ticket remains distinguishable from
    /// an unknown one inside the store, even though both surface as
    /// `InvalidSession` to callers.
    ///
    /// Returns the resolved identifier so the caller can deregister the
    /// matching player.
    ///
    /// # Errors
    /// Same conditions as [`extend_session`](Self::extend_session).
    pub fn destroy_session(&mut self, sref: &Value) -> Result<TicketId, SessionError> {
        let id = resolve_ref(sref)?;
        let now = Instant::now();

        let ticket = self.live_ticket_mut(id, now)?;
        ticket.expiry = now;

        tracing::info!(%id, "session destroyed");
        Ok(id)
    }

    /// Checks that a session reference names a live ticket.
    ///
    /// Side-effect free: does not slide the expiry.
    ///
    /// # Errors
    /// Same conditions as [`extend_session`](Self::extend_session).
    pub fn authenticate_session(&self, sref: &Value) -> Result<(), SessionError> {
        let id = resolve_ref(sref)?;
        let now = Instant::now();

        let ticket = self
            .tickets
            .get(&id)
            .ok_or_else(|| SessionError::InvalidSession("unknown session".into()))?;
        if !ticket.is_live(now) {
            return Err(SessionError::InvalidSession("session has expired".into()));
        }
        Ok(())
    }

    /// Reclaims every dead ticket and reports its identifier.
    ///
    /// Called on a cadence by the gateway to bound memory and to drive
    /// player deregistration in the game engine. Entries are removed as
    /// they are reported, so an identifier is never reported by two
    /// sweeps.
    pub fn sweep_expired(&mut self) -> Vec<TicketId> {
        let now = Instant::now();
        let mut expired = Vec::new();

        self.tickets.retain(|id, ticket| {
            if ticket.expiry < now {
                expired.push(*id);
                false
            } else {
                true
            }
        });

        if !expired.is_empty() {
            tracing::info!(count = expired.len(), "swept expired sessions");
        }
        expired
    }

    /// Looks up a ticket by identifier, live or not.
    pub fn get(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.get(id)
    }

    /// Number of tickets physically present (including dead ones
    /// awaiting a sweep).
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Returns `true` if no tickets are present.
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Resolves an id to a ticket that is live at `now`, for mutation.
    fn live_ticket_mut(
        &mut self,
        id: TicketId,
        now: Instant,
    ) -> Result<&mut Ticket, SessionError> {
        let ticket = self
            .tickets
            .get_mut(&id)
            .ok_or_else(|| SessionError::InvalidSession("unknown session".into()))?;
        if !ticket.is_live(now) {
            return Err(SessionError::InvalidSession("session has expired".into()));
        }
        Ok(ticket)
    }
}

/// Pulls the ticket identifier out of a raw `{ "id": "<uuid>" }`
/// session reference.
///
/// Every malformation (not an object, no `id` field, non-string `id`,
/// non-UUID string) collapses into `InvalidSession`, the same failure an
/// unknown ticket produces.
fn resolve_ref(sref: &Value) -> Result<TicketId, SessionError> {
    let field = sref
        .get("id")
        .ok_or_else(|| {
            SessionError::InvalidSession("no id field in session reference".into())
        })?
        .as_str()
        .ok_or_else(|| {
            SessionError::InvalidSession("id field is not a string".into())
        })?;
    let id = Uuid::parse_str(field).map_err(|_| {
        SessionError::InvalidSession("id field is not a valid UUID".into())
    })?;
    Ok(TicketId(id))
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `TicketStore`, following the
    //! `test_{function}_{scenario}_{expected}` convention.
    //!
    //! # Testing time-dependent behavior
    //!
    //! Expiry depends on elapsed wall time. Instead of sleeping, the
    //! tests use two configurations:
    //!   - timeouts of 0 -> tickets are dead by the next observation
    //!   - timeouts of 3600 -> tickets never die during a test
    //!
    //! This keeps the suite fast and deterministic.

    use serde_json::json;

    use super::*;

    // -- Helpers ----------------------------------------------------------

    /// A store whose tickets are already at their expiry instant when
    /// issued.
    fn store_with_instant_expiry() -> TicketStore {
        TicketStore::new(SessionConfig {
            expiry_timeout_s: 0,
            expiry_sliding_window_s: 0,
        })
    }

    /// A store whose tickets effectively never expire during a test.
    fn store_with_long_expiry() -> TicketStore {
        TicketStore::new(SessionConfig {
            expiry_timeout_s: 3600,
            expiry_sliding_window_s: 3600,
        })
    }

    /// Builds the `{ "id": ... }` reference a caller would send back.
    fn sref(ticket: &Ticket) -> Value {
        json!({ "id": ticket.id.to_string() })
    }

    fn no_credentials() -> Value {
        json!({})
    }

    // =====================================================================
    // new_session()
    // =====================================================================

    #[test]
    fn test_new_session_issues_a_stored_ticket() {
        let mut store = store_with_long_expiry();

        let ticket = store.new_session(&no_credentials());

        assert_eq!(store.len(), 1);
        let stored = store.get(&ticket.id).expect("ticket should be stored");
        assert_eq!(stored.id, ticket.id);
        assert_eq!(stored.expiry, ticket.expiry);
    }

    #[test]
    fn test_new_session_ignores_credential_content() {
        // No authentication is performed by design: arbitrary
        // credentials, or none at all, issue a ticket just the same.
        let mut store = store_with_long_expiry();

        store.new_session(&json!({ "username": "alice", "password": "hunter2" }));
        store.new_session(&json!(null));

        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_new_session_each_ticket_gets_a_unique_id() {
        let mut store = store_with_long_expiry();

        let a = store.new_session(&no_credentials());
        let b = store.new_session(&no_credentials());

        assert_ne!(a.id, b.id, "ids must be unique among live sessions");
    }

    #[test]
    fn test_new_session_fresh_ticket_is_live() {
        let mut store = store_with_long_expiry();

        let ticket = store.new_session(&no_credentials());

        assert!(ticket.is_live(Instant::now()));
    }

    // =====================================================================
    // extend_session()
    // =====================================================================

    #[test]
    fn test_extend_session_fresh_ticket_strictly_increases_expiry() {
        // With sliding window == initial timeout, any elapsed time means
        // `now + window` lands strictly after the issued expiry.
        let mut store = store_with_long_expiry();
        let issued = store.new_session(&no_credentials());

        let extended = store.extend_session(&sref(&issued)).expect("should extend");

        assert!(extended.expiry > issued.expiry);
        assert_eq!(extended.id, issued.id);
    }

    #[test]
    fn test_extend_session_never_moves_expiry_backwards() {
        // A short sliding window must not shorten a ticket that still
        // has most of its initial lifetime left.
        let mut store = TicketStore::new(SessionConfig {
            expiry_timeout_s: 3600,
            expiry_sliding_window_s: 1,
        });
        let issued = store.new_session(&no_credentials());

        let extended = store.extend_session(&sref(&issued)).unwrap();

        assert!(extended.expiry >= issued.expiry);
    }

    #[test]
    fn test_extend_session_unknown_id_fails() {
        let mut store = store_with_long_expiry();

        let result = store
            .extend_session(&json!({ "id": Uuid::new_v4().to_string() }));

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn test_extend_session_expired_ticket_fails() {
        // Lazy expiry: the entry is still physically present, but an
        // expired ticket reads as already gone.
        let mut store = store_with_instant_expiry();
        let ticket = store.new_session(&no_credentials());

        let result = store.extend_session(&sref(&ticket));

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
        assert_eq!(store.len(), 1, "entry remains until the next sweep");
    }

    #[test]
    fn test_extend_session_missing_id_field_fails() {
        let mut store = store_with_long_expiry();
        store.new_session(&no_credentials());

        let result = store.extend_session(&json!({ "ticket": "nope" }));

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn test_extend_session_non_string_id_fails() {
        let mut store = store_with_long_expiry();

        let result = store.extend_session(&json!({ "id": 42 }));

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn test_extend_session_malformed_uuid_fails() {
        let mut store = store_with_long_expiry();

        let result = store.extend_session(&json!({ "id": "not-a-uuid" }));

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    // =====================================================================
    // destroy_session()
    // =====================================================================

    #[test]
    fn test_destroy_session_then_authenticate_fails() {
        let mut store = store_with_long_expiry();
        let ticket = store.new_session(&no_credentials());

        store.destroy_session(&sref(&ticket)).expect("should destroy");

        let result = store.authenticate_session(&sref(&ticket));
        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn test_destroy_session_then_extend_fails() {
        let mut store = store_with_long_expiry();
        let ticket = store.new_session(&no_credentials());

        store.destroy_session(&sref(&ticket)).unwrap();

        let result = store.extend_session(&sref(&ticket));
        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn test_destroy_session_keeps_the_entry_until_sweep() {
        // Destroy forces the expiry into the past; reclamation is the
        // sweep's job.
        let mut store = store_with_long_expiry();
        let ticket = store.new_session(&no_credentials());

        store.destroy_session(&sref(&ticket)).unwrap();

        assert!(store.get(&ticket.id).is_some());
    }

    #[test]
    fn test_destroy_session_unknown_id_fails() {
        let mut store = store_with_long_expiry();

        let result = store
            .destroy_session(&json!({ "id": Uuid::new_v4().to_string() }));

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn test_destroy_session_twice_fails_the_second_time() {
        // The first destroy expires the ticket; the second observes an
        // expired ticket, which fails like any other dead reference.
        let mut store = store_with_long_expiry();
        let ticket = store.new_session(&no_credentials());

        store.destroy_session(&sref(&ticket)).unwrap();
        let result = store.destroy_session(&sref(&ticket));

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    // =====================================================================
    // authenticate_session()
    // =====================================================================

    #[test]
    fn test_authenticate_session_live_ticket_succeeds() {
        let mut store = store_with_long_expiry();
        let ticket = store.new_session(&no_credentials());

        assert!(store.authenticate_session(&sref(&ticket)).is_ok());
    }

    #[test]
    fn test_authenticate_session_does_not_slide_expiry() {
        let mut store = store_with_long_expiry();
        let ticket = store.new_session(&no_credentials());

        store.authenticate_session(&sref(&ticket)).unwrap();

        let stored = store.get(&ticket.id).unwrap();
        assert_eq!(stored.expiry, ticket.expiry, "authenticate is read-only");
    }

    #[test]
    fn test_authenticate_session_expired_ticket_fails() {
        let mut store = store_with_instant_expiry();
        let ticket = store.new_session(&no_credentials());

        let result = store.authenticate_session(&sref(&ticket));

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[test]
    fn test_authenticate_session_malformed_ref_fails() {
        let store = store_with_long_expiry();

        let result = store.authenticate_session(&json!("just a string"));

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    // =====================================================================
    // sweep_expired()
    // =====================================================================

    #[test]
    fn test_sweep_expired_reclaims_dead_tickets() {
        let mut store = store_with_instant_expiry();
        let a = store.new_session(&no_credentials());
        let b = store.new_session(&no_credentials());

        let mut swept = store.sweep_expired();
        swept.sort();

        let mut expected = vec![a.id, b.id];
        expected.sort();
        assert_eq!(swept, expected);
        assert!(store.is_empty(), "sweep reclaims as it reports");
    }

    #[test]
    fn test_sweep_expired_leaves_live_tickets_alone() {
        let mut store = store_with_long_expiry();
        let ticket = store.new_session(&no_credentials());

        let swept = store.sweep_expired();

        assert!(swept.is_empty());
        assert!(store.get(&ticket.id).is_some());
    }

    #[test]
    fn test_sweep_expired_never_reports_an_id_twice() {
        let mut store = store_with_instant_expiry();
        store.new_session(&no_credentials());

        let first = store.sweep_expired();
        let second = store.sweep_expired();

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }

    #[test]
    fn test_sweep_expired_collects_destroyed_tickets() {
        let mut store = store_with_long_expiry();
        let ticket = store.new_session(&no_credentials());
        store.destroy_session(&sref(&ticket)).unwrap();

        let swept = store.sweep_expired();

        assert_eq!(swept, vec![ticket.id]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_sweep_expired_empty_store_reports_nothing() {
        let mut store = store_with_long_expiry();

        assert!(store.sweep_expired().is_empty());
    }

    // =====================================================================
    // Full lifecycle
    // =====================================================================

    #[test]
    fn test_full_lifecycle_issue_extend_destroy_sweep() {
        let mut store = store_with_long_expiry();

        // 1. A caller logs in and gets a ticket.
        let ticket = store.new_session(&no_credentials());

        // 2. They keep playing; each request slides the expiry.
        store.extend_session(&sref(&ticket)).unwrap();
        store.authenticate_session(&sref(&ticket)).unwrap();

        // 3. They sign out.
        store.destroy_session(&sref(&ticket)).unwrap();
        assert!(store.authenticate_session(&sref(&ticket)).is_err());

        // 4. The background sweep reclaims the dead ticket.
        let swept = store.sweep_expired();
        assert_eq!(swept, vec![ticket.id]);
        assert!(store.is_empty());
    }

    #[test]
    fn test_zero_timeout_ticket_is_immediately_unusable() {
        // Scenario from the expiry contract: a ticket issued with
        // expiry_timeout_s = 0 fails every subsequent operation.
        let mut store = store_with_instant_expiry();
        let ticket = store.new_session(&no_credentials());

        assert!(store.extend_session(&sref(&ticket)).is_err());
        assert!(store.authenticate_session(&sref(&ticket)).is_err());
        assert!(store.destroy_session(&sref(&ticket)).is_err());
    }

    #[test]
    fn test_independent_tickets_do_not_interfere() {
        let mut store = store_with_long_expiry();
        let a = store.new_session(&no_credentials());
        let b = store.new_session(&no_credentials());

        store.destroy_session(&sref(&a)).unwrap();

        assert!(store.authenticate_session(&sref(&a)).is_err());
        assert!(store.authenticate_session(&sref(&b)).is_ok());
    }
}
