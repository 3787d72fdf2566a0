//! In-memory repositories for local runs and tests.
//!
//! Sorting mirrors the MySQL implementations: the sort property is mapped
//! through the same column whitelist, text compares case-insensitively, and
//! ties break on ascending id.

use crate::traits::{book_sort_column, person_sort_column, BookRepository, PersonRepository, UserRepository};
use async_trait::async_trait;
use erudio_core::{Direction, ErudioError, ErudioResult, Page, PageRequest};
use erudio_domain::{Book, Permission, Person, User};
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use tracing::{debug, info};

/// Slices one page out of an already-ordered list.
fn paginate<T>(items: Vec<T>, page: &PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let content = items.into_iter().skip(page.offset()).take(page.limit()).collect();
    Page::new(content, page.page, page.size, total)
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn directed(ordering: Ordering, direction: Direction) -> Ordering {
    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

fn compare_people(a: &Person, b: &Person, page: &PageRequest) -> Ordering {
    let ordering = match person_sort_column(&page.sort.property) {
        "id" => a.id.cmp(&b.id),
        "last_name" => cmp_text(&a.last_name, &b.last_name),
        "address" => cmp_text(&a.address, &b.address),
        "gender" => cmp_text(&a.gender, &b.gender),
        "enabled" => a.enabled.cmp(&b.enabled),
        "birth_day" => a.birth_day.cmp(&b.birth_day),
        _ => cmp_text(&a.first_name, &b.first_name),
    };
    directed(ordering, page.direction()).then_with(|| a.id.cmp(&b.id))
}

fn compare_books(a: &Book, b: &Book, page: &PageRequest) -> Ordering {
    let ordering = match book_sort_column(&page.sort.property) {
        "id" => a.id.cmp(&b.id),
        "author" => cmp_text(&a.author, &b.author),
        "launch_date" => a.launch_date.cmp(&b.launch_date),
        "price" => a.price.total_cmp(&b.price),
        _ => cmp_text(&a.title, &b.title),
    };
    directed(ordering, page.direction()).then_with(|| a.id.cmp(&b.id))
}

/// Process-local person store.
#[derive(Debug)]
pub struct InMemoryPersonRepository {
    rows: RwLock<BTreeMap<i64, Person>>,
    next_id: AtomicI64,
}

impl Default for InMemoryPersonRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPersonRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a store pre-populated with `people`; IDs are assigned in order.
    #[must_use]
    pub fn with_people(people: impl IntoIterator<Item = Person>) -> Self {
        let repo = Self::new();
        {
            let mut rows = repo.rows.write();
            for person in people {
                let id = repo.next_id.fetch_add(1, AtomicOrdering::SeqCst);
                rows.insert(id, person.with_id(id));
            }
        }
        repo
    }

    fn sorted(&self, page: &PageRequest, filter: impl Fn(&Person) -> bool) -> Vec<Person> {
        let mut people: Vec<Person> = self.rows.read().values().filter(|p| filter(p)).cloned().collect();
        people.sort_by(|a, b| compare_people(a, b, page));
        people
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn find_by_id(&self, id: i64) -> ErudioResult<Option<Person>> {
        debug!("Finding person by id: {}", id);
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> ErudioResult<Page<Person>> {
        debug!("Finding all people, page: {}, size: {}", page.page, page.size);
        Ok(paginate(self.sorted(page, |_| true), page))
    }

    async fn find_by_name(&self, first_name: &str, page: &PageRequest) -> ErudioResult<Page<Person>> {
        debug!("Finding people by first name fragment: {}", first_name);
        let needle = first_name.to_lowercase();
        let matches = self.sorted(page, |p| p.first_name.to_lowercase().contains(&needle));
        Ok(paginate(matches, page))
    }

    async fn save(&self, person: &Person) -> ErudioResult<Person> {
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let saved = person.clone().with_id(id);
        self.rows.write().insert(id, saved.clone());
        info!(id, "Person created");
        Ok(saved)
    }

    async fn update(&self, person: &Person) -> ErudioResult<Person> {
        let id = person
            .id
            .ok_or_else(|| ErudioError::internal("cannot update a person without an id"))?;
        let mut rows = self.rows.write();
        match rows.get_mut(&id) {
            Some(row) => {
                *row = person.clone();
                info!(id, "Person updated");
                Ok(person.clone())
            }
            None => Err(ErudioError::not_found("Person", id)),
        }
    }

    async fn disable(&self, id: i64) -> ErudioResult<u64> {
        debug!("Disabling person: {}", id);
        Ok(self.rows.write().get_mut(&id).map_or(0, |row| {
            row.enabled = false;
            1
        }))
    }

    async fn delete(&self, id: i64) -> ErudioResult<bool> {
        debug!("Deleting person: {}", id);
        Ok(self.rows.write().remove(&id).is_some())
    }

    async fn count(&self) -> ErudioResult<u64> {
        Ok(self.rows.read().len() as u64)
    }
}

/// Process-local book store.
#[derive(Debug)]
pub struct InMemoryBookRepository {
    rows: RwLock<BTreeMap<i64, Book>>,
    next_id: AtomicI64,
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBookRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    #[must_use]
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let repo = Self::new();
        {
            let mut rows = repo.rows.write();
            for book in books {
                let id = repo.next_id.fetch_add(1, AtomicOrdering::SeqCst);
                rows.insert(id, book.with_id(id));
            }
        }
        repo
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_by_id(&self, id: i64) -> ErudioResult<Option<Book>> {
        debug!("Finding book by id: {}", id);
        Ok(self.rows.read().get(&id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> ErudioResult<Page<Book>> {
        debug!("Finding all books, page: {}, size: {}", page.page, page.size);
        let mut books: Vec<Book> = self.rows.read().values().cloned().collect();
        books.sort_by(|a, b| compare_books(a, b, page));
        Ok(paginate(books, page))
    }

    async fn save(&self, book: &Book) -> ErudioResult<Book> {
        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let saved = book.clone().with_id(id);
        self.rows.write().insert(id, saved.clone());
        info!(id, "Book created");
        Ok(saved)
    }

    async fn update(&self, book: &Book) -> ErudioResult<Book> {
        let id = book
            .id
            .ok_or_else(|| ErudioError::internal("cannot update a book without an id"))?;
        let mut rows = self.rows.write();
        match rows.get_mut(&id) {
            Some(row) => {
                *row = book.clone();
                info!(id, "Book updated");
                Ok(book.clone())
            }
            None => Err(ErudioError::not_found("Book", id)),
        }
    }

    async fn delete(&self, id: i64) -> ErudioResult<bool> {
        debug!("Deleting book: {}", id);
        Ok(self.rows.write().remove(&id).is_some())
    }

    async fn count(&self) -> ErudioResult<u64> {
        Ok(self.rows.read().len() as u64)
    }
}

/// Process-local account store.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    rows: RwLock<BTreeMap<String, User>>,
    next_id: AtomicI64,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, user_name: &str) -> ErudioResult<Option<User>> {
        debug!("Finding user by username: {}", user_name);
        Ok(self.rows.read().get(user_name).cloned())
    }

    async fn save(&self, user: &User) -> ErudioResult<User> {
        let mut rows = self.rows.write();
        if rows.contains_key(&user.user_name) {
            return Err(ErudioError::Conflict(format!(
                "Duplicate entry '{}' for key 'uk_user_name'",
                user.user_name
            )));
        }

        let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        let saved = User {
            id: Some(id),
            permissions: user
                .permissions
                .iter()
                .map(|p| Permission::new(p.description.clone()))
                .collect(),
            ..user.clone()
        };
        rows.insert(saved.user_name.clone(), saved.clone());
        info!(id, user_name = %saved.user_name, "User created");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use erudio_core::Sort;

    fn request(page: usize, size: usize, property: &str, direction: Direction) -> PageRequest {
        PageRequest::new(page, size, Sort::by(property, direction)).unwrap()
    }

    fn person(first_name: &str) -> Person {
        Person::new(first_name, "Doe", "Somewhere", "Male")
    }

    fn people_repo() -> InMemoryPersonRepository {
        InMemoryPersonRepository::with_people(
            ["ayrton", "Mayra", "Nelson", "Alain", "Rayane"].into_iter().map(person),
        )
    }

    #[tokio::test]
    async fn test_save_assigns_ids_and_find_by_id() {
        let repo = InMemoryPersonRepository::new();
        let saved = repo.save(&person("Nelson")).await.unwrap();
        assert_eq!(saved.id, Some(1));

        let found = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found, saved);
        assert!(repo.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_sorted_ascending() {
        let repo = people_repo();
        let page = repo.find_all(&request(0, 3, "firstName", Direction::Asc)).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|p| p.first_name.as_str()).collect();
        assert_eq!(names, vec!["Alain", "ayrton", "Mayra"]);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages(), 2);
    }

    #[tokio::test]
    async fn test_find_all_sorted_descending_second_page() {
        let repo = people_repo();
        let page = repo.find_all(&request(1, 3, "firstName", Direction::Desc)).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|p| p.first_name.as_str()).collect();
        assert_eq!(names, vec!["ayrton", "Alain"]);
    }

    #[tokio::test]
    async fn test_find_all_beyond_last_page_is_empty() {
        let repo = people_repo();
        let page = repo.find_all(&request(9, 3, "firstName", Direction::Asc)).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 5);

        let page = repo.find_all(&request(usize::MAX, 3, "firstName", Direction::Asc)).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_elements, 5);
    }

    #[tokio::test]
    async fn test_find_by_name_contains_ignoring_case() {
        let repo = people_repo();
        let page = repo.find_by_name("AYR", &request(0, 10, "firstName", Direction::Asc)).await.unwrap();
        let names: Vec<&str> = page.content.iter().map(|p| p.first_name.as_str()).collect();
        assert_eq!(names, vec!["ayrton", "Mayra"]);
        assert_eq!(page.total_elements, 2);
    }

    #[tokio::test]
    async fn test_update_missing_person_is_not_found() {
        let repo = InMemoryPersonRepository::new();
        let err = repo.update(&person("Ghost").with_id(42)).await.unwrap_err();
        assert!(matches!(err, ErudioError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_disable_flips_only_enabled() {
        let repo = people_repo();
        let before = repo.find_by_id(3).await.unwrap().unwrap();
        assert_eq!(repo.disable(3).await.unwrap(), 1);
        let after = repo.find_by_id(3).await.unwrap().unwrap();
        assert!(!after.enabled);
        assert_eq!(after.first_name, before.first_name);
        assert_eq!(repo.disable(99).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = people_repo();
        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_books_sorted_by_price() {
        let launch = NaiveDate::from_ymd_opt(2017, 11, 29).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let repo = InMemoryBookRepository::with_books(vec![
            Book::new("Martin Fowler", launch, 88.0, "Refactoring"),
            Book::new("Eric Evans", launch, 92.0, "Domain Driven Design"),
            Book::new("Robert C. Martin", launch, 77.0, "Clean Code"),
        ]);
        let page = repo.find_all(&request(0, 10, "price", Direction::Desc)).await.unwrap();
        let prices: Vec<f64> = page.content.iter().map(|b| b.price).collect();
        assert_eq!(prices, vec![92.0, 88.0, 77.0]);

        let page = repo.find_all(&request(0, 10, "title", Direction::Asc)).await.unwrap();
        assert_eq!(page.content[0].title, "Clean Code");
    }

    #[tokio::test]
    async fn test_user_save_and_duplicate() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("leandro", "Leandro Costa", "hash", vec![Permission::new("ADMIN")]);
        let saved = repo.save(&user).await.unwrap();
        assert_eq!(saved.id, Some(1));

        let found = repo.find_by_username("leandro").await.unwrap().unwrap();
        assert_eq!(found.roles(), vec!["ADMIN".to_string()]);

        let err = repo.save(&user).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
    }
}
