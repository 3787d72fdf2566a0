//! Integration tests for the MySQL book and user repositories.
//!
//! Requires Docker to be available on the system.

mod common;

use chrono::NaiveDate;
use erudio_core::{Direction, PageRequest, Sort};
use erudio_domain::{Book, Permission, User};
use erudio_repository::{BookRepository, MySqlBookRepository, MySqlUserRepository, UserRepository};
use common::TestDatabase;

fn book(title: &str, price: f64) -> Book {
    let launch = NaiveDate::from_ymd_opt(2017, 11, 29)
        .unwrap()
        .and_hms_micro_opt(13, 50, 5, 878_000)
        .unwrap();
    Book::new("Michael C. Feathers", launch, price, title)
}

#[tokio::test]
async fn test_book_crud() {
    let db = TestDatabase::new().await;
    let repo = MySqlBookRepository::new(db.pool());

    let saved = repo.save(&book("Working effectively with legacy code", 49.0)).await.unwrap();
    let id = saved.id.unwrap();

    let found = repo.find_by_id(id).await.unwrap().expect("Book not found");
    assert_eq!(found, saved);

    let mut changed = found.clone();
    changed.price = 55.5;
    repo.update(&changed).await.unwrap();
    assert_eq!(repo.find_by_id(id).await.unwrap().unwrap().price, 55.5);

    assert!(repo.delete(id).await.unwrap());
    assert!(repo.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_books_sorted_by_title() {
    let db = TestDatabase::new().await;
    let repo = MySqlBookRepository::new(db.pool());

    for (title, price) in [("Refactoring", 88.0), ("Clean Code", 77.0), ("Domain Driven Design", 92.0)] {
        repo.save(&book(title, price)).await.unwrap();
    }

    let request = PageRequest::new(0, 2, Sort::by("title", Direction::Asc)).unwrap();
    let page = repo.find_all(&request).await.unwrap();
    let titles: Vec<&str> = page.content.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Clean Code", "Domain Driven Design"]);
    assert_eq!(page.total_elements, 3);
}

#[tokio::test]
async fn test_user_with_permissions() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let user = User::new(
        "leandro",
        "Leandro Costa",
        "$argon2id$placeholder",
        vec![Permission::new("ADMIN"), Permission::new("MANAGER")],
    );
    let saved = repo.save(&user).await.unwrap();
    assert!(saved.id.is_some());

    let found = repo.find_by_username("leandro").await.unwrap().expect("User not found");
    assert_eq!(found.full_name, "Leandro Costa");
    assert_eq!(found.roles(), vec!["ADMIN".to_string(), "MANAGER".to_string()]);
    assert!(found.can_sign_in());

    let duplicate = repo.save(&user).await.unwrap_err();
    assert_eq!(duplicate.status_code(), 409);

    assert!(repo.find_by_username("nobody").await.unwrap().is_none());
}
