//! Book use cases.

use crate::mappers::{to_representations, Mapping};
use erudio_core::rules::{non_negative_price, not_blank};
use erudio_core::{check_field, ErudioError, ErudioResult, PageRequest, ValidateExt};
use erudio_domain::Book;
use erudio_hateoas::{LinkBuilder, PagedModel, PagedModelBuilder, Representation};
use erudio_repository::BookRepository;
use std::sync::Arc;
use tracing::{debug, info};

const RESOURCE: &str = "Book";

/// Book service; the collection URI is `{origin}/api/book/{R::VERSION}`.
#[derive(Clone)]
pub struct BookService {
    repository: Arc<dyn BookRepository>,
    links: LinkBuilder,
}

impl BookService {
    #[must_use]
    pub fn new(repository: Arc<dyn BookRepository>, links: LinkBuilder) -> Self {
        Self { repository, links }
    }

    fn collection<R: Representation>(&self) -> PagedModelBuilder {
        PagedModelBuilder::new(self.links.resource(&["api", "book", R::VERSION]))
    }

    fn linked<R>(&self, book: &Book) -> ErudioResult<R>
    where
        Book: Mapping<R>,
        R: Representation,
    {
        let mut representation: R = book.to_representation();
        self.collection::<R>().link_item(&mut representation)?;
        Ok(representation)
    }

    async fn load(&self, id: i64) -> ErudioResult<Book> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ErudioError::not_found(RESOURCE, id))
    }

    pub async fn find_all<R>(&self, request: &PageRequest) -> ErudioResult<PagedModel<R>>
    where
        Book: Mapping<R>,
        R: Representation,
    {
        debug!(page = request.page, size = request.size, version = R::VERSION, "Finding all books");
        let page = self.repository.find_all(request).await?;
        self.collection::<R>().build(to_representations(page), request)
    }

    pub async fn find_by_id<R>(&self, id: i64) -> ErudioResult<R>
    where
        Book: Mapping<R>,
        R: Representation,
    {
        debug!(id, "Finding book");
        let book = self.load(id).await?;
        self.linked(&book)
    }

    pub async fn create<R>(&self, body: Option<R>) -> ErudioResult<R>
    where
        Book: Mapping<R>,
        R: Representation,
    {
        let representation = body.ok_or(ErudioError::RequiredObjectIsNull)?;
        let mut book = Book::to_entity(&representation)?;
        book.id = None;
        validate(&book)?;

        let saved = self.repository.save(&book).await?;
        info!(id = ?saved.id, "Book created");
        self.linked(&saved)
    }

    /// Replaces every field of an existing book.
    pub async fn update<R>(&self, body: Option<R>) -> ErudioResult<R>
    where
        Book: Mapping<R>,
        R: Representation,
    {
        let representation = body.ok_or(ErudioError::RequiredObjectIsNull)?;
        let book = Book::to_existing_entity(&representation)?;
        validate(&book)?;

        if let Some(id) = book.id {
            self.load(id).await?;
        }
        let saved = self.repository.update(&book).await?;
        info!(id = ?saved.id, "Book updated");
        self.linked(&saved)
    }

    pub async fn delete(&self, id: i64) -> ErudioResult<()> {
        self.load(id).await?;
        self.repository.delete(id).await?;
        info!(id, "Book deleted");
        Ok(())
    }
}

fn validate(book: &Book) -> ErudioResult<()> {
    book.validate_request()?;
    check_field("title", not_blank(&book.title))?;
    check_field("price", non_negative_price(book.price))
}

impl std::fmt::Debug for BookService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BookService").field("links", &self.links).finish_non_exhaustive()
    }
}
