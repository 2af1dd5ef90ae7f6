use serde::{Deserialize, Serialize};

use orgdesk_core::UserId;

/// The acting identity for a single request, as resolved by the identity
/// provider. This core never authenticates credentials itself; it only
/// consumes the resolved `(user id, email, authenticated)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Principal {
    Authenticated { user_id: UserId, email: String },
    Anonymous,
}

impl Principal {
    pub fn authenticated(user_id: UserId, email: impl Into<String>) -> Self {
        Self::Authenticated {
            user_id,
            email: email.into(),
        }
    }

    pub fn anonymous() -> Self {
        Self::Anonymous
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Authenticated { user_id, .. } => Some(*user_id),
            Self::Anonymous => None,
        }
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            Self::Authenticated { email, .. } => Some(email),
            Self::Anonymous => None,
        }
    }
}
