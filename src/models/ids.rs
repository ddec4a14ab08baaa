//! Identifier newtypes used across the crate.

use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(i64, SlotId);
define_id_type!(i64, BookingId);
define_id_type!(i64, PreferenceId);
define_id_type!(i64, LabelId);

/// Opaque user identifier. Authentication and authorization of the id are
/// delegated to an external collaborator; the core only carries it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        UserId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(v: String) -> Self {
        UserId(v)
    }
}

impl From<&str> for UserId {
    fn from(v: &str) -> Self {
        UserId(v.to_string())
    }
}

/// The caller performing an operation: a user id plus an operator flag.
///
/// Whether the flag is trustworthy is an authorization concern handled
/// outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub is_operator: bool,
}

impl Actor {
    /// An ordinary end user.
    pub fn user(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            is_operator: false,
        }
    }

    /// An operator (may moderate other users' records).
    pub fn operator(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            is_operator: true,
        }
    }

    /// True when the actor is the owner of `user_id` or an operator.
    pub fn may_act_for(&self, owner: &UserId) -> bool {
        self.is_operator || self.user_id == *owner
    }
}
