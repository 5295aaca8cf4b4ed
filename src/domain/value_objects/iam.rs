use serde::{Deserialize, Serialize};

/// Identity fields used to prefill the external checkout widget. All optional;
/// the widget asks for whatever is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub display_name: Option<String>,
}

/// Explicit per-call session context. Every collaborator call receives one of
/// these instead of reading token or user from ambient storage, so the core
/// stays testable without a simulated browser environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub token: String,
    pub user: UserIdentity,
}

impl SessionContext {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: UserIdentity::default(),
        }
    }

    pub fn with_user(mut self, user: UserIdentity) -> Self {
        self.user = user;
        self
    }
}
