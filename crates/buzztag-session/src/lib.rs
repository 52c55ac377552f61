//! Session ticket management for Buzztag.
//!
//! This crate handles the lifecycle of anonymous session tickets:
//!
//! 1. **Issuing** - a fresh ticket with an initial lifetime, handed out
//!    without any credential check (a deliberate simplification, see
//!    [`TicketStore::new_session`])
//! 2. **Extending** - sliding expiry, recomputed from "now" on each
//!    successful extension
//! 3. **Destroying** - a destroyed ticket is immediately invalid but is
//!    reclaimed lazily
//! 4. **Sweeping** - periodic reclamation of dead tickets, reporting
//!    them so the layer above can deregister the matching players
//!
//! # How it fits in the stack
//!
//! ```text
//! Gateway (above)       - gates every game action on a live ticket
//!     |
//! Session (this crate)  - owns the ticket collection and expiry policy
//!     |
//! Protocol (below)      - provides TicketId
//! ```
//!
//! `TicketStore` has no compile-time dependency on the game engine; the
//! gateway keeps the two registries in sync by identifier value.

mod error;
mod store;
mod ticket;

pub use error::SessionError;
pub use store::TicketStore;
pub use ticket::{SessionConfig, Ticket};
