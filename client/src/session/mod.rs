//! Session
//!
//! Persistent session fields and the route guard that validates them.

mod guard;
mod store;

pub use guard::{is_protected, GuardOutcome, SessionGuard, LOGIN_ROUTE, PROTECTED_PREFIX};
pub use store::{SessionStore, StoredSession};
