//! Application state for Axum handlers.

use erudio_config::{AppConfig, PaginationConfig};
use erudio_core::ErudioResult;
use erudio_hateoas::LinkBuilder;
use erudio_repository::Repositories;
use erudio_security::PasswordHasher;
use erudio_service::{AuthService, AuthServiceImpl, BookService, PersonService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub person_service: Arc<PersonService>,
    pub book_service: Arc<BookService>,
    pub auth_service: Arc<dyn AuthService>,
    pub repositories: Repositories,
    pub pagination: PaginationConfig,
}

impl AppState {
    /// Wires the services over `repositories`.
    ///
    /// Links are rooted at `server.base_url`.
    pub fn new(config: &AppConfig, repositories: Repositories, password_hasher: PasswordHasher) -> ErudioResult<Self> {
        let links = LinkBuilder::new(&config.server.base_url)?;

        let person_service = PersonService::new(Arc::clone(&repositories.person), links.clone());
        let book_service = BookService::new(Arc::clone(&repositories.book), links);
        let auth_service = AuthServiceImpl::new(
            Arc::clone(&repositories.user),
            Arc::new(password_hasher),
            Arc::new(config.security.clone()),
        );

        Ok(Self {
            person_service: Arc::new(person_service),
            book_service: Arc::new(book_service),
            auth_service: Arc::new(auth_service),
            repositories,
            pagination: config.pagination,
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("person_service", &self.person_service)
            .field("book_service", &self.book_service)
            .field("repositories", &self.repositories)
            .field("pagination", &self.pagination)
            .finish_non_exhaustive()
    }
}
