//! Login and logout.

use tracing::info;

use library_auth::{AuthOutcome, LocalStrategy, Principal, RejectReason, SessionStore};
use library_core::result::AppResult;
use library_entity::FlashMessage;

use crate::context::RequestContext;
use crate::form::{RawForm, escape};

/// Result of a login attempt.
#[derive(Debug, Clone)]
pub enum LoginResult {
    /// The session now carries the principal; `token` replaces the cookie.
    Authenticated {
        token: String,
        principal: Principal,
    },
    /// Rejected; a flash message has been queued on the session.
    Rejected(RejectReason),
}

/// Session-level account operations.
#[derive(Debug, Clone)]
pub struct AccountService {
    strategy: LocalStrategy,
    sessions: SessionStore,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(strategy: LocalStrategy, sessions: SessionStore) -> Self {
        Self { strategy, sessions }
    }

    /// Authenticate the submitted credentials against the current session.
    ///
    /// Input is normalized the same way registration input is: the
    /// username is trimmed and escaped, the password only trimmed.
    pub async fn login(&self, ctx: &RequestContext, raw: RawForm) -> AppResult<LoginResult> {
        let form = raw.normalize();
        let username = escape(&form.text("username"));
        let password = form.text("password");

        match self.strategy.authenticate(&username, &password).await? {
            AuthOutcome::Success(user) => {
                let token = self.sessions.authenticate(ctx.session_id, user.id).await?;
                Ok(LoginResult::Authenticated {
                    token,
                    principal: Principal::from(user),
                })
            }
            AuthOutcome::Rejected(reason) => {
                self.sessions
                    .push_flash(ctx.session_id, FlashMessage::error(reason.message()))
                    .await?;
                Ok(LoginResult::Rejected(reason))
            }
        }
    }

    /// Destroy the current session.
    pub async fn logout(&self, ctx: &RequestContext) -> AppResult<()> {
        if let Some(principal) = ctx.principal() {
            info!(user_id = %principal.id, "User logged out");
        }
        self.sessions.destroy(ctx.session_id).await
    }

    /// Queue a flash message on the current session.
    pub async fn flash(&self, ctx: &RequestContext, message: FlashMessage) -> AppResult<()> {
        self.sessions.push_flash(ctx.session_id, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use library_auth::PasswordHasher;
    use library_core::config::{AuthConfig, SessionConfig};
    use library_core::traits::DocumentStore;
    use library_core::types::UserId;
    use library_database::{MemoryDocumentStore, Repository};
    use library_entity::{User, UserRole};
    use std::sync::Arc;

    async fn setup() -> (AccountService, SessionStore, RequestContext) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let config = AuthConfig {
            hash_memory_kib: 1024,
            hash_iterations: 1,
            ..AuthConfig::default()
        };
        let hasher = PasswordHasher::new(&config).unwrap();
        let users = Repository::<User>::new(Arc::clone(&store));
        let now = Utc::now();
        users
            .save(&User {
                id: UserId::new(),
                username: "dana".to_string(),
                fullname: "Dana".to_string(),
                email: "dana@example.com".to_string(),
                role: UserRole::Editor,
                password_hash: hasher.hash_password("p4ssword").unwrap(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let sessions =
            SessionStore::new(Repository::new(store), &SessionConfig::default()).unwrap();
        let issued = sessions.create().await.unwrap();
        let ctx = RequestContext::new(issued.session.id, None);
        let service = AccountService::new(LocalStrategy::new(users, hasher), sessions.clone());
        (service, sessions, ctx)
    }

    #[tokio::test]
    async fn test_login_attaches_principal() {
        let (service, sessions, ctx) = setup().await;
        let raw = RawForm::from([("username", "dana"), ("password", "p4ssword")]);
        let LoginResult::Authenticated { token, principal } =
            service.login(&ctx, raw).await.unwrap()
        else {
            panic!("expected success");
        };
        let session = sessions.load(&token).await.unwrap().unwrap();
        assert_eq!(session.user_id, Some(principal.id));
    }

    #[tokio::test]
    async fn test_failed_login_queues_flash() {
        let (service, sessions, ctx) = setup().await;
        let raw = RawForm::from([("username", "dana"), ("password", "wrong")]);
        let outcome = service.login(&ctx, raw).await.unwrap();
        assert!(matches!(
            outcome,
            LoginResult::Rejected(RejectReason::IncorrectPassword)
        ));

        let flash = sessions.take_flash(ctx.session_id).await.unwrap();
        assert_eq!(flash[0].message, "Incorrect password.");
    }

    #[tokio::test]
    async fn test_logout_destroys_session() {
        let (service, sessions, ctx) = setup().await;
        service.logout(&ctx).await.unwrap();
        assert!(sessions.take_flash(ctx.session_id).await.unwrap().is_empty());
        service
            .flash(&ctx, FlashMessage::info("gone"))
            .await
            .unwrap();
        assert!(sessions.take_flash(ctx.session_id).await.unwrap().is_empty());
    }
}
