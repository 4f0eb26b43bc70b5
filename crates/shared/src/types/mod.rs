//! Common types used across the application.

pub mod context;
pub mod id;
pub mod money;

pub use context::RequestContext;
pub use id::*;
pub use money::{Currency, format_amount};
