//! Maps session payloads to principals and back.

use tracing::debug;

use library_core::result::AppResult;
use library_core::types::UserId;
use library_database::Repository;
use library_entity::User;

use crate::principal::Principal;

/// Resolves the principal id stored in a session.
#[derive(Debug, Clone)]
pub struct SessionPrincipalResolver {
    users: Repository<User>,
}

impl SessionPrincipalResolver {
    /// Creates a new resolver.
    pub fn new(users: Repository<User>) -> Self {
        Self { users }
    }

    /// The minimal payload stored in the session.
    pub fn serialize(&self, principal: &Principal) -> UserId {
        principal.id
    }

    /// Look the principal back up. A deleted account resolves to `None`.
    pub async fn deserialize(&self, user_id: UserId) -> AppResult<Option<Principal>> {
        let user = self.users.find_by_id(user_id).await?;
        if user.is_none() {
            debug!(%user_id, "Session refers to a missing user; treating as anonymous");
        }
        Ok(user.map(Principal::from))
    }
}
