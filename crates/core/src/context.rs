//! Typed per-request execution context.

use crate::roles::Role;
use crate::types::DbId;

/// Identity facts established for the current request by the authorization
/// bridge. Fields stay `None` until the corresponding stage has run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub identity_id: Option<DbId>,
    pub role: Option<Role>,
}

impl RequestContext {
    pub fn authenticated(identity_id: DbId) -> Self {
        Self {
            identity_id: Some(identity_id),
            role: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Whether the resolved role grants privileged visibility.
    /// An unresolved role is treated as unprivileged.
    pub fn is_privileged(&self) -> bool {
        self.role.is_some_and(Role::is_privileged)
    }
}
