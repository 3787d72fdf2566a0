//! MySQL person repository implementation.

use super::escape_like;
use crate::traits::{person_sort_column, PersonRepository};
use crate::DatabasePool;
use async_trait::async_trait;
use chrono::NaiveDate;
use erudio_core::{ErudioError, ErudioResult, Page, PageRequest};
use erudio_domain::Person;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

/// MySQL person repository implementation.
#[derive(Clone)]
pub struct MySqlPersonRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlPersonRepository {
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a person.
#[derive(Debug, FromRow)]
struct PersonRow {
    id: i64,
    first_name: String,
    last_name: String,
    address: String,
    gender: String,
    enabled: bool,
    birth_day: Option<NaiveDate>,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Person {
            id: Some(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            address: row.address,
            gender: row.gender,
            enabled: row.enabled,
            birth_day: row.birth_day,
        }
    }
}

const COLUMNS: &str = "id, first_name, last_name, address, gender, enabled, birth_day";

fn order_by(page: &PageRequest) -> String {
    format!(
        "ORDER BY {} {}, id ASC",
        person_sort_column(&page.sort.property),
        page.direction().as_sql()
    )
}

#[async_trait]
impl PersonRepository for MySqlPersonRepository {
    async fn find_by_id(&self, id: i64) -> ErudioResult<Option<Person>> {
        debug!("Finding person by id: {}", id);

        let row = sqlx::query_as::<_, PersonRow>(&format!("SELECT {COLUMNS} FROM person WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Person::from))
    }

    async fn find_all(&self, page: &PageRequest) -> ErudioResult<Page<Person>> {
        debug!("Finding all people, page: {}, size: {}", page.page, page.size);

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM person")
            .fetch_one(self.pool.inner())
            .await?;

        let Some((limit, offset)) = page.sql_window(total as u64) else {
            return Ok(Page::empty(page, total as u64));
        };

        let rows = sqlx::query_as::<_, PersonRow>(&format!(
            "SELECT {COLUMNS} FROM person {} LIMIT ? OFFSET ?",
            order_by(page)
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.inner())
        .await?;

        let people = rows.into_iter().map(Person::from).collect();
        Ok(Page::new(people, page.page, page.size, total as u64))
    }

    async fn find_by_name(&self, first_name: &str, page: &PageRequest) -> ErudioResult<Page<Person>> {
        debug!("Finding people by first name fragment: {}", first_name);

        let pattern = format!("%{}%", escape_like(&first_name.to_lowercase()));

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM person WHERE LOWER(first_name) LIKE ?")
            .bind(&pattern)
            .fetch_one(self.pool.inner())
            .await?;

        let Some((limit, offset)) = page.sql_window(total as u64) else {
            return Ok(Page::empty(page, total as u64));
        };

        let rows = sqlx::query_as::<_, PersonRow>(&format!(
            "SELECT {COLUMNS} FROM person WHERE LOWER(first_name) LIKE ? {} LIMIT ? OFFSET ?",
            order_by(page)
        ))
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.inner())
        .await?;

        let people = rows.into_iter().map(Person::from).collect();
        Ok(Page::new(people, page.page, page.size, total as u64))
    }

    async fn save(&self, person: &Person) -> ErudioResult<Person> {
        debug!("Saving person: {}", person.full_name());

        let result = sqlx::query(
            r#"
            INSERT INTO person (first_name, last_name, address, gender, enabled, birth_day)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.address)
        .bind(&person.gender)
        .bind(person.enabled)
        .bind(person.birth_day)
        .execute(self.pool.inner())
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| ErudioError::internal("person id exceeds i64"))?;
        info!(id, "Person created");
        Ok(person.clone().with_id(id))
    }

    async fn update(&self, person: &Person) -> ErudioResult<Person> {
        let id = person
            .id
            .ok_or_else(|| ErudioError::internal("cannot update a person without an id"))?;
        debug!("Updating person: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE person
            SET first_name = ?, last_name = ?, address = ?, gender = ?, enabled = ?, birth_day = ?
            WHERE id = ?
            "#,
        )
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(&person.address)
        .bind(&person.gender)
        .bind(person.enabled)
        .bind(person.birth_day)
        .bind(id)
        .execute(self.pool.inner())
        .await?;

        // MySQL reports zero affected rows when nothing changed, so only a
        // missing row is an error.
        if result.rows_affected() == 0 && self.find_by_id(id).await?.is_none() {
            return Err(ErudioError::not_found("Person", id));
        }

        info!(id, "Person updated");
        Ok(person.clone())
    }

    async fn disable(&self, id: i64) -> ErudioResult<u64> {
        debug!("Disabling person: {}", id);

        let result = sqlx::query("UPDATE person SET enabled = FALSE WHERE id = ?")
            .bind(id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i64) -> ErudioResult<bool> {
        debug!("Deleting person: {}", id);

        let result = sqlx::query("DELETE FROM person WHERE id = ?")
            .bind(id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> ErudioResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM person")
            .fetch_one(self.pool.inner())
            .await?;
        Ok(count as u64)
    }
}
