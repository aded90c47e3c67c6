//! Console Commands
//!
//! Operations that act on the session rather than on a resource list.

pub mod auth;
pub mod business;

pub use auth::{forgot_password, reset_password, sign_in, sign_out, verify_otp};
pub use business::{list_businesses, set_live_mode, tenant_profile, use_business};
