//! Caller context for mutations.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Identity of the user performing a mutation.
///
/// Threaded explicitly into every ledger operation (there is no ambient
/// "current user" state) and forwarded to the activity recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The acting user's display name, as shown in activity logs.
    pub user_name: String,
}

impl RequestContext {
    /// Creates a new request context.
    #[must_use]
    pub fn new(user_id: UserId, user_name: impl Into<String>) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
        }
    }
}
