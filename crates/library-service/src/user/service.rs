//! Registration, profile lookup and profile updates.

use std::str::FromStr;

use chrono::Utc;
use serde_json::{Map, Value, json};
use tracing::{info, warn};

use library_auth::{PasswordHasher, PasswordPolicy, Principal};
use library_core::error::{AppError, ErrorKind};
use library_core::result::AppResult;
use library_core::types::{Filter, UserId};
use library_database::Repository;
use library_entity::{User, UserRole};

use super::form::{RegisterForm, UpdateUserForm};
use crate::context::RequestContext;
use crate::form::{Form, FormErrors, FormOutcome, RawForm, Received, sanitize};
use crate::parse_id;

const USERNAME_TAKEN: &str = "Username already taken";

/// Handles user account operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    users: Repository<User>,
    /// Password hasher.
    hasher: PasswordHasher,
    /// Password policy.
    policy: PasswordPolicy,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Repository<User>, hasher: PasswordHasher, policy: PasswordPolicy) -> Self {
        Self {
            users,
            hasher,
            policy,
        }
    }

    async fn username_taken(&self, username: &str) -> AppResult<bool> {
        Ok(self
            .users
            .count(&Filter::all().eq("username", username))
            .await?
            > 0)
    }

    /// Validate a registration and create a `User`-role account.
    ///
    /// On success redirects to the login page.
    pub async fn register(&self, raw: RawForm) -> AppResult<FormOutcome<RegisterForm>> {
        let Received {
            form,
            mut errors,
            trimmed,
        } = RegisterForm::receive(raw);
        let password = trimmed.text("password");
        if let Err(e) = self.policy.validate(&password) {
            errors.add("password", e.message);
        }
        if !form.username.is_empty() && self.username_taken(&form.username).await? {
            errors.add_async("username", USERNAME_TAKEN);
        }
        if !errors.is_empty() {
            return Ok(FormOutcome::invalid(form, errors));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: form.username.clone(),
            fullname: form.fullname.clone(),
            email: form.email.clone(),
            role: UserRole::User,
            password_hash: self.hasher.hash_password(&password)?,
            created_at: now,
            updated_at: now,
        };
        match self.users.save(&user).await {
            Ok(_) => {}
            // Lost the race against a concurrent registration.
            Err(e) if e.kind == ErrorKind::Conflict => {
                warn!(username = %user.username, "Username claimed concurrently");
                let mut errors = FormErrors::default();
                errors.add_async("username", USERNAME_TAKEN);
                return Ok(FormOutcome::invalid(form, errors));
            }
            Err(e) => return Err(e),
        }

        info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(FormOutcome::Redirect("/user/login".to_string()))
    }

    /// Create an account with an explicit role, bypassing the form pipeline.
    ///
    /// Used to bootstrap administrators from the command line. Inputs are
    /// normalized like form input (the password is only trimmed) so the
    /// account can log in through the login form.
    pub async fn create_user(
        &self,
        username: &str,
        fullname: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> AppResult<User> {
        let (username, fullname, email, password) = (
            &sanitize(username),
            &sanitize(fullname),
            &sanitize(email),
            password.trim(),
        );
        if username.is_empty() || fullname.is_empty() {
            return Err(AppError::validation("Username and full name are required"));
        }
        self.policy.validate(password)?;
        if self.username_taken(username).await? {
            return Err(AppError::conflict(USERNAME_TAKEN));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: username.to_string(),
            fullname: fullname.to_string(),
            email: email.to_string(),
            role,
            password_hash: self.hasher.hash_password(password)?,
            created_at: now,
            updated_at: now,
        };
        self.users.save(&user).await?;
        info!(user_id = %user.id, username, %role, "User created");
        Ok(user)
    }

    /// List every account.
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    /// Look a user up by path id, without the password hash.
    pub async fn profile(&self, id: &str) -> AppResult<Principal> {
        Ok(Principal::from(self.get(id).await?))
    }

    async fn get(&self, id: &str) -> AppResult<User> {
        let id: UserId = parse_id(id, "User")?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Validate and apply a profile update.
    ///
    /// The password is rehashed only when a new one is supplied. Only an
    /// admin may change a role.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        raw: RawForm,
    ) -> AppResult<FormOutcome<UpdateUserForm>> {
        let user = self.get(id).await?;
        let Received {
            form,
            mut errors,
            trimmed,
        } = UpdateUserForm::receive(raw);
        let password = trimmed.optional("password");

        let mut new_role = None;
        if let Some(raw_role) = &form.role {
            match UserRole::from_str(raw_role) {
                Ok(role) if role == user.role => {}
                Ok(role) if ctx.is_admin() => new_role = Some(role),
                Ok(_) => errors.add("role", "Only an administrator can change roles."),
                Err(_) => errors.add("role", "Invalid role."),
            }
        }
        if let Some(password) = &password {
            if let Err(e) = self.policy.validate(password) {
                errors.add("password", e.message);
            }
        }
        if password != trimmed.optional("confirm_password") {
            errors.add("confirm_password", "Password confirmation does not match.");
        }
        if !errors.is_empty() {
            return Ok(FormOutcome::invalid(form, errors));
        }

        let mut patch = Map::new();
        patch.insert("fullname".into(), json!(form.fullname));
        patch.insert("email".into(), json!(form.email));
        patch.insert("updated_at".into(), json!(Utc::now()));
        if let Some(role) = new_role {
            patch.insert("role".into(), json!(role));
        }
        if let Some(password) = &password {
            patch.insert(
                "password_hash".into(),
                json!(self.hasher.hash_password(password)?),
            );
        }
        self.users.update(user.id, Value::Object(patch)).await?;

        info!(
            user_id = %user.id,
            role_changed = new_role.is_some(),
            password_changed = password.is_some(),
            "User updated"
        );
        Ok(FormOutcome::Redirect(user.url()))
    }
}
