//! MySQL repository implementations.

mod book_repository;
mod person_repository;
mod user_repository;

pub use book_repository::MySqlBookRepository;
pub use person_repository::MySqlPersonRepository;
pub use user_repository::MySqlUserRepository;

/// Escapes `%`, `_` and `\` so a fragment matches literally inside `LIKE`.
pub(crate) fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
