//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use library_auth::{
    LocalStrategy, PasswordHasher, PasswordPolicy, SessionPrincipalResolver, SessionStore,
};
use library_core::config::AppConfig;
use library_core::result::AppResult;
use library_core::traits::DocumentStore;
use library_database::repository::Repository;
use library_entity::{Session, User};
use library_service::{
    AccountService, AuthorService, BookInstanceService, BookService, CatalogRepositories,
    GenreService, SiteService, UserService,
};

use crate::view::{JsonRenderer, Renderer};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Document store backing every repository
    pub store: Arc<dyn DocumentStore>,
    /// Presentation boundary for view models
    pub renderer: Arc<dyn Renderer>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session persistence and flash messages
    pub sessions: Arc<SessionStore>,
    /// Maps session user ids back to principals
    pub resolver: Arc<SessionPrincipalResolver>,

    // ── Services ─────────────────────────────────────────────
    /// Login and logout
    pub accounts: Arc<AccountService>,
    /// Registration and profiles
    pub users: Arc<UserService>,
    /// Home page counts
    pub site: Arc<SiteService>,
    /// Author pages
    pub authors: Arc<AuthorService>,
    /// Book pages
    pub books: Arc<BookService>,
    /// Genre pages
    pub genres: Arc<GenreService>,
    /// Book copy pages
    pub instances: Arc<BookInstanceService>,
}

impl AppState {
    /// Wire every service against the given store, rendering views as JSON.
    pub fn new(config: AppConfig, store: Arc<dyn DocumentStore>) -> AppResult<Self> {
        Self::with_renderer(config, store, Arc::new(JsonRenderer))
    }

    /// Wire every service against the given store and renderer.
    pub fn with_renderer(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        renderer: Arc<dyn Renderer>,
    ) -> AppResult<Self> {
        let user_repo: Repository<User> = Repository::new(Arc::clone(&store));
        let session_repo: Repository<Session> = Repository::new(Arc::clone(&store));
        let catalog = CatalogRepositories::new(Arc::clone(&store));

        let hasher = PasswordHasher::new(&config.auth)?;
        let policy = PasswordPolicy::new(&config.auth);
        let sessions = SessionStore::new(session_repo, &config.session)?;
        let strategy = LocalStrategy::new(user_repo.clone(), hasher.clone());

        Ok(Self {
            resolver: Arc::new(SessionPrincipalResolver::new(user_repo.clone())),
            accounts: Arc::new(AccountService::new(strategy, sessions.clone())),
            users: Arc::new(UserService::new(user_repo, hasher, policy)),
            sessions: Arc::new(sessions),
            site: Arc::new(SiteService::new(catalog.clone())),
            authors: Arc::new(AuthorService::new(catalog.clone())),
            books: Arc::new(BookService::new(catalog.clone())),
            genres: Arc::new(GenreService::new(catalog.clone())),
            instances: Arc::new(BookInstanceService::new(catalog)),
            config: Arc::new(config),
            store,
            renderer,
        })
    }
}
