//! Identity use-cases: account creation, credential checks, sessions and
//! the resolve operations served over RPC.

use std::sync::Arc;

use async_trait::async_trait;
use banner_core::error::CoreError;
use banner_core::identity::Identity;
use banner_core::roles::Role;
use banner_core::session::Session;
use banner_core::store::IdentityRepository;
use banner_core::types::DbId;
use banner_core::validation::{validate_login, validate_password};
use banner_rpc::{IdentityClient, RpcError};

use crate::auth::{hash_password, verify_dummy, verify_password};
use crate::session::SessionStore;

const INVALID_CREDENTIALS: &str = "Invalid login or password";

pub struct IdentityService {
    identities: Arc<dyn IdentityRepository>,
    sessions: SessionStore,
}

impl IdentityService {
    pub fn new(identities: Arc<dyn IdentityRepository>, sessions: SessionStore) -> Self {
        Self {
            identities,
            sessions,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Create a `user` account. A taken login is `Conflict`.
    pub async fn signup(&self, login: &str, password: &str) -> Result<Identity, CoreError> {
        validate_login(login)?;
        validate_password(password)?;

        if self.identities.login_exists(login).await? {
            return Err(CoreError::Conflict(format!("login '{login}' is taken")));
        }

        let hash = hash_password(password)?;
        let identity = self.identities.create_identity(login, &hash).await?;
        tracing::info!(user_id = identity.id, login, "Identity created");
        Ok(identity)
    }

    /// Check a login/password pair.
    ///
    /// Unknown login and wrong password are indistinguishable.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<Identity, CoreError> {
        validate_login(login)?;
        validate_password(password)?;

        let Some(identity) = self.identities.find_by_login(login).await? else {
            verify_dummy(password);
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !verify_password(password, &identity.credential_hash)? {
            return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
        Ok(identity)
    }

    /// Authenticate and open a session.
    pub async fn signin(&self, login: &str, password: &str) -> Result<Session, CoreError> {
        let identity = self.authenticate(login, password).await?;
        let session = self.sessions.create(&identity.login).await?;
        tracing::info!(user_id = identity.id, "Session created");
        Ok(session)
    }

    /// The login behind an active session token.
    pub async fn find_active_session(&self, token: &str) -> Result<String, CoreError> {
        self.sessions.lookup(token).await
    }

    /// End an active session. A token that does not resolve is `Unauthorized`.
    pub async fn logout(&self, token: &str) -> Result<(), CoreError> {
        let login = self.find_active_session(token).await.map_err(|e| match e {
            CoreError::NotFound { .. } => CoreError::Unauthorized("Session not found".into()),
            other => other,
        })?;
        self.sessions.delete(token).await?;
        tracing::info!(login = %login, "Session ended");
        Ok(())
    }

    /// Session token to identity id.
    pub async fn resolve_identity(&self, token: &str) -> Result<DbId, CoreError> {
        let login = self.sessions.lookup(token).await?;
        self.identities.resolve_id(&login).await
    }

    pub async fn resolve_role(&self, id: DbId) -> Result<Role, CoreError> {
        self.identities.resolve_role(id).await
    }

    /// Create an admin account unless the login already exists.
    pub async fn ensure_admin(&self, login: &str, password: &str) -> Result<(), CoreError> {
        validate_login(login)?;
        validate_password(password)?;

        if self.identities.login_exists(login).await? {
            tracing::debug!(login, "Admin account already present");
            return Ok(());
        }
        let hash = hash_password(password)?;
        let identity = self
            .identities
            .insert_identity(login, &hash, Role::Admin)
            .await?;
        tracing::info!(user_id = identity.id, login, "Admin account created");
        Ok(())
    }

    /// Both backing stores answer.
    pub async fn ping(&self) -> Result<(), CoreError> {
        self.identities.ping().await?;
        self.sessions.ping().await
    }
}

/// In-process client for callers colocated with the identity service.
#[async_trait]
impl IdentityClient for IdentityService {
    async fn resolve_identity(&self, session_token: &str) -> Result<DbId, RpcError> {
        Ok(IdentityService::resolve_identity(self, session_token).await?)
    }

    async fn resolve_role(&self, user_id: DbId) -> Result<Role, RpcError> {
        Ok(IdentityService::resolve_role(self, user_id).await?)
    }

    async fn ping(&self) -> Result<(), RpcError> {
        Ok(IdentityService::ping(self).await?)
    }
}
