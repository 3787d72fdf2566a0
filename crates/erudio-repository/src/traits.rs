//! Repository trait definitions.

use erudio_core::{ErudioResult, Page, PageRequest};
use erudio_domain::{Book, Person, User};
use async_trait::async_trait;

/// Person repository trait.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Finds a person by ID.
    async fn find_by_id(&self, id: i64) -> ErudioResult<Option<Person>>;

    /// Finds a page of people ordered by the request's sort.
    async fn find_all(&self, page: &PageRequest) -> ErudioResult<Page<Person>>;

    /// Finds people whose first name contains `first_name`, ignoring case.
    async fn find_by_name(&self, first_name: &str, page: &PageRequest) -> ErudioResult<Page<Person>>;

    /// Inserts a new person and returns it with its assigned ID.
    async fn save(&self, person: &Person) -> ErudioResult<Person>;

    /// Overwrites an existing person; the ID selects the row.
    async fn update(&self, person: &Person) -> ErudioResult<Person>;

    /// Marks a person as disabled. Returns the number of rows changed.
    async fn disable(&self, id: i64) -> ErudioResult<u64>;

    /// Deletes a person by ID.
    async fn delete(&self, id: i64) -> ErudioResult<bool>;

    /// Counts all people.
    async fn count(&self) -> ErudioResult<u64>;
}

/// Book repository trait.
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> ErudioResult<Option<Book>>;

    async fn find_all(&self, page: &PageRequest) -> ErudioResult<Page<Book>>;

    async fn save(&self, book: &Book) -> ErudioResult<Book>;

    async fn update(&self, book: &Book) -> ErudioResult<Book>;

    async fn delete(&self, id: i64) -> ErudioResult<bool>;

    async fn count(&self) -> ErudioResult<u64>;
}

/// User account repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds an account, with its permissions, by login name.
    async fn find_by_username(&self, user_name: &str) -> ErudioResult<Option<User>>;

    /// Inserts an account together with its permissions.
    async fn save(&self, user: &User) -> ErudioResult<User>;
}

/// Maps a representation property to a person column; unknown names fall back to `first_name`.
#[must_use]
pub fn person_sort_column(property: &str) -> &'static str {
    match property {
        "id" => "id",
        "lastName" => "last_name",
        "address" => "address",
        "gender" => "gender",
        "enabled" => "enabled",
        "birthDay" => "birth_day",
        _ => "first_name",
    }
}

/// Maps a representation property to a book column; unknown names fall back to `title`.
#[must_use]
pub fn book_sort_column(property: &str) -> &'static str {
    match property {
        "id" => "id",
        "author" => "author",
        "launchDate" => "launch_date",
        "price" => "price",
        _ => "title",
    }
}
