//! Person use cases.

use crate::mappers::{to_representations, Mapping};
use erudio_core::{ErudioError, ErudioResult, MappingError, PageRequest, ValidateExt};
use erudio_domain::Person;
use erudio_hateoas::{LinkBuilder, PagedModel, PagedModelBuilder, Representation};
use erudio_repository::PersonRepository;
use std::sync::Arc;
use tracing::{debug, info};

const RESOURCE: &str = "Person";

/// Person service.
///
/// Every operation is generic over the representation version `R`; the
/// collection URI is `{origin}/api/person/{R::VERSION}`.
#[derive(Clone)]
pub struct PersonService {
    repository: Arc<dyn PersonRepository>,
    links: LinkBuilder,
}

impl PersonService {
    #[must_use]
    pub fn new(repository: Arc<dyn PersonRepository>, links: LinkBuilder) -> Self {
        Self { repository, links }
    }

    fn collection<R: Representation>(&self) -> PagedModelBuilder {
        PagedModelBuilder::new(self.links.resource(&["api", "person", R::VERSION]))
    }

    fn linked<R>(&self, person: &Person) -> ErudioResult<R>
    where
        Person: Mapping<R>,
        R: Representation,
    {
        let mut representation: R = person.to_representation();
        self.collection::<R>().link_item(&mut representation)?;
        Ok(representation)
    }

    async fn load(&self, id: i64) -> ErudioResult<Person> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ErudioError::not_found(RESOURCE, id))
    }

    /// Lists a page of people.
    pub async fn find_all<R>(&self, request: &PageRequest) -> ErudioResult<PagedModel<R>>
    where
        Person: Mapping<R>,
        R: Representation,
    {
        debug!(page = request.page, size = request.size, version = R::VERSION, "Finding all people");
        let page = self.repository.find_all(request).await?;
        self.collection::<R>().build(to_representations(page), request)
    }

    /// Lists people whose first name contains `first_name`, ignoring case.
    pub async fn find_by_name<R>(&self, first_name: &str, request: &PageRequest) -> ErudioResult<PagedModel<R>>
    where
        Person: Mapping<R>,
        R: Representation,
    {
        debug!(first_name, page = request.page, version = R::VERSION, "Finding people by name");
        let page = self.repository.find_by_name(first_name, request).await?;
        self.collection::<R>().build(to_representations(page), request)
    }

    pub async fn find_by_id<R>(&self, id: i64) -> ErudioResult<R>
    where
        Person: Mapping<R>,
        R: Representation,
    {
        debug!(id, version = R::VERSION, "Finding person");
        let person = self.load(id).await?;
        self.linked(&person)
    }

    /// Creates a person; any identifier in the body is ignored.
    pub async fn create<R>(&self, body: Option<R>) -> ErudioResult<R>
    where
        Person: Mapping<R>,
        R: Representation,
    {
        let representation = body.ok_or(ErudioError::RequiredObjectIsNull)?;
        let mut person = Person::to_entity(&representation)?;
        person.id = None;
        person.validate_request()?;

        let saved = self.repository.save(&person).await?;
        info!(id = ?saved.id, version = R::VERSION, "Person created");
        self.linked(&saved)
    }

    /// Overwrites the fields the version declares on an existing person.
    pub async fn update<R>(&self, body: Option<R>) -> ErudioResult<R>
    where
        Person: Mapping<R>,
        R: Representation,
    {
        let representation = body.ok_or(ErudioError::RequiredObjectIsNull)?;
        let id = representation.id().ok_or(MappingError::MissingIdentifier {
            entity: <Person as Mapping<R>>::ENTITY,
            version: R::VERSION,
        })?;

        let mut person = self.load(id).await?;
        person.apply(&representation)?;
        person.validate_request()?;

        let saved = self.repository.update(&person).await?;
        info!(id, version = R::VERSION, "Person updated");
        self.linked(&saved)
    }

    /// Disables a person, then reads it back.
    pub async fn disable<R>(&self, id: i64) -> ErudioResult<R>
    where
        Person: Mapping<R>,
        R: Representation,
    {
        let changed = self.repository.disable(id).await?;
        debug!(id, changed, "Disable statement executed");

        let person = self.load(id).await?;
        info!(id, "Person disabled");
        self.linked(&person)
    }

    pub async fn delete(&self, id: i64) -> ErudioResult<()> {
        self.load(id).await?;
        self.repository.delete(id).await?;
        info!(id, "Person deleted");
        Ok(())
    }
}

impl std::fmt::Debug for PersonService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonService").field("links", &self.links).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{PersonVO, PersonVOV2};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use erudio_core::{Direction, Page, Sort};
    use erudio_hateoas::rel;
    use erudio_repository::InMemoryPersonRepository;
    use mockall::mock;

    mock! {
        PersonRepo {}

        #[async_trait]
        impl PersonRepository for PersonRepo {
            async fn find_by_id(&self, id: i64) -> ErudioResult<Option<Person>>;
            async fn find_all(&self, page: &PageRequest) -> ErudioResult<Page<Person>>;
            async fn find_by_name(&self, first_name: &str, page: &PageRequest) -> ErudioResult<Page<Person>>;
            async fn save(&self, person: &Person) -> ErudioResult<Person>;
            async fn update(&self, person: &Person) -> ErudioResult<Person>;
            async fn disable(&self, id: i64) -> ErudioResult<u64>;
            async fn delete(&self, id: i64) -> ErudioResult<bool>;
            async fn count(&self) -> ErudioResult<u64>;
        }
    }

    const ORIGIN: &str = "http://localhost:8888";

    fn service(repository: Arc<dyn PersonRepository>) -> PersonService {
        PersonService::new(repository, LinkBuilder::new(ORIGIN).unwrap())
    }

    fn piquet_vo() -> PersonVO {
        PersonVO {
            first_name: Some("Nelson".to_string()),
            last_name: Some("Piquet".to_string()),
            address: Some("Brasilia - DF - Brasil".to_string()),
            gender: Some("Male".to_string()),
            enabled: Some(true),
            ..PersonVO::default()
        }
    }

    fn numbered(n: i64) -> Person {
        Person::new(format!("Person {n:04}"), "Last", "Address", "Female").with_id(n)
    }

    fn first_name_asc(page: usize, size: usize) -> PageRequest {
        PageRequest::new(page, size, Sort::by("firstName", Direction::Asc)).unwrap()
    }

    #[tokio::test]
    async fn test_create_then_find_by_id() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));

        let created: PersonVO = service.create(Some(piquet_vo())).await.unwrap();
        let id = created.id.unwrap();
        assert_eq!(
            created.self_link().map(|l| l.href.as_str()),
            Some(format!("{ORIGIN}/api/person/v1/{id}").as_str())
        );

        let found: PersonVO = service.find_by_id(id).await.unwrap();
        assert_eq!(found, created);
        assert_eq!(found.first_name.as_deref(), Some("Nelson"));
        assert_eq!(found.last_name.as_deref(), Some("Piquet"));
        assert_eq!(found.address.as_deref(), Some("Brasilia - DF - Brasil"));
        assert_eq!(found.gender.as_deref(), Some("Male"));
        assert_eq!(found.enabled, Some(true));
    }

    #[tokio::test]
    async fn test_create_ignores_body_id() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));
        let body = PersonVO {
            id: Some(777),
            ..piquet_vo()
        };
        let created: PersonVO = service.create(Some(body)).await.unwrap();
        assert_ne!(created.id, Some(777));
    }

    #[tokio::test]
    async fn test_create_without_body() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));
        let err = service.create::<PersonVO>(None).await.unwrap_err();
        assert!(matches!(err, ErudioError::RequiredObjectIsNull));
        let err = service.update::<PersonVO>(None).await.unwrap_err();
        assert!(matches!(err, ErudioError::RequiredObjectIsNull));
    }

    #[tokio::test]
    async fn test_create_missing_field_is_mapping_error() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));
        let body = PersonVO {
            gender: None,
            ..piquet_vo()
        };
        let err = service.create(Some(body)).await.unwrap_err();
        assert!(matches!(err, ErudioError::Mapping(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_v2_links_under_v2_collection() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));
        let body = PersonVOV2 {
            first_name: Some("Ayrton".to_string()),
            last_name: Some("Senna".to_string()),
            address: Some("São Paulo".to_string()),
            gender: Some("Male".to_string()),
            birth_day: NaiveDate::from_ymd_opt(1960, 3, 21),
            ..PersonVOV2::default()
        };
        let created: PersonVOV2 = service.create(Some(body)).await.unwrap();
        let id = created.id.unwrap();
        assert_eq!(created.birth_day, NaiveDate::from_ymd_opt(1960, 3, 21));
        assert_eq!(created.links[0].href, format!("{ORIGIN}/api/person/v2/{id}"));

        let v1: PersonVO = service.find_by_id(id).await.unwrap();
        assert_eq!(v1.links[0].href, format!("{ORIGIN}/api/person/v1/{id}"));
    }

    #[tokio::test]
    async fn test_update_overwrites_declared_fields() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));
        let created: PersonVO = service.create(Some(piquet_vo())).await.unwrap();

        let body = PersonVO {
            last_name: Some("Piquet Souto Maior".to_string()),
            links: Vec::new(),
            ..created.clone()
        };
        let updated: PersonVO = service.update(Some(body)).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.last_name.as_deref(), Some("Piquet Souto Maior"));
        assert_eq!(updated.links.len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_person() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));
        let body = PersonVO {
            id: Some(42),
            ..piquet_vo()
        };
        let err = service.update(Some(body)).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_update_without_id_is_mapping_error() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));
        let err = service.update(Some(piquet_vo())).await.unwrap_err();
        assert_eq!(err.error_code(), "MAPPING_ERROR");
        assert!(matches!(
            err,
            ErudioError::Mapping(MappingError::MissingIdentifier {
                entity: "Person",
                version: "v1"
            })
        ));
    }

    #[tokio::test]
    async fn test_disable_keeps_other_fields() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));
        let created: PersonVO = service.create(Some(piquet_vo())).await.unwrap();
        let id = created.id.unwrap();

        let disabled: PersonVO = service.disable(id).await.unwrap();
        assert_eq!(disabled.enabled, Some(false));
        assert_eq!(disabled.first_name, created.first_name);
        assert_eq!(disabled.last_name, created.last_name);
        assert_eq!(disabled.address, created.address);
        assert_eq!(disabled.gender, created.gender);

        let found: PersonVO = service.find_by_id(id).await.unwrap();
        assert_eq!(found.enabled, Some(false));
    }

    #[tokio::test]
    async fn test_disable_missing_person() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));
        let err = service.disable::<PersonVO>(5).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service(Arc::new(InMemoryPersonRepository::new()));
        let created: PersonVO = service.create(Some(piquet_vo())).await.unwrap();
        let id = created.id.unwrap();

        service.delete(id).await.unwrap();
        assert_eq!(service.find_by_id::<PersonVO>(id).await.unwrap_err().status_code(), 404);
        assert_eq!(service.delete(id).await.unwrap_err().status_code(), 404);
    }

    #[tokio::test]
    async fn test_find_all_over_1007_people() {
        let people: Vec<_> = (1..=1007).map(numbered).collect();
        let service = service(Arc::new(InMemoryPersonRepository::with_people(people)));

        let model: PagedModel<PersonVO> = service.find_all(&first_name_asc(0, 10)).await.unwrap();
        assert_eq!(model.content.len(), 10);
        assert_eq!(model.page.total_elements, 1007);
        assert_eq!(model.page.total_pages, 101);
        assert_eq!(model.page.number, 0);
        assert!(model.link(rel::PREV).is_none());
        assert_eq!(
            model.link(rel::NEXT).map(|l| l.href.as_str()),
            Some("http://localhost:8888/api/person/v1?direction=asc&page=1&size=10&sort=firstName,asc")
        );
        assert_eq!(
            model.link(rel::LAST).map(|l| l.href.as_str()),
            Some("http://localhost:8888/api/person/v1?direction=asc&page=100&size=10&sort=firstName,asc")
        );
        for item in &model.content {
            let href = &item.self_link().unwrap().href;
            assert!(href.ends_with(&format!("/{}", item.id.unwrap())));
        }
    }

    #[tokio::test]
    async fn test_find_all_beyond_last_page() {
        let people: Vec<_> = (1..=15).map(numbered).collect();
        let service = service(Arc::new(InMemoryPersonRepository::with_people(people)));

        let model: PagedModel<PersonVO> = service.find_all(&first_name_asc(9, 10)).await.unwrap();
        assert!(model.content.is_empty());
        assert_eq!(model.page.total_pages, 2);
        assert!(model.link(rel::NEXT).is_none());
        assert!(model.link(rel::PREV).unwrap().href.contains("page=1&"));
    }

    #[tokio::test]
    async fn test_find_by_name_is_case_insensitive() {
        let people = vec![
            Person::new("Nelson", "Piquet", "Brasilia", "Male"),
            Person::new("Nelsinho", "Piquet", "Brasilia", "Male"),
            Person::new("Ayrton", "Senna", "São Paulo", "Male"),
        ];
        let service = service(Arc::new(InMemoryPersonRepository::with_people(people)));

        let model: PagedModel<PersonVO> = service.find_by_name("NELS", &first_name_asc(0, 12)).await.unwrap();
        assert_eq!(model.page.total_elements, 2);
        assert_eq!(model.content[0].first_name.as_deref(), Some("Nelsinho"));
    }

    #[tokio::test]
    async fn test_repository_failure_passes_through() {
        let mut repository = MockPersonRepo::new();
        repository
            .expect_find_all()
            .returning(|_| Err(ErudioError::Database("connection reset".to_string())));
        let service = service(Arc::new(repository));

        let err = service.find_all::<PersonVO>(&first_name_asc(0, 10)).await.unwrap_err();
        assert!(matches!(err, ErudioError::Database(_)));
    }

    #[tokio::test]
    async fn test_disable_reads_back_after_update() {
        let mut repository = MockPersonRepo::new();
        let mut seq = mockall::Sequence::new();
        repository
            .expect_disable()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(1));
        repository
            .expect_find_by_id()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|id| {
                let mut person = Person::new("Nelson", "Piquet", "Brasilia", "Male").with_id(id);
                person.enabled = false;
                Ok(Some(person))
            });
        let service = service(Arc::new(repository));

        let vo: PersonVO = service.disable(3).await.unwrap();
        assert_eq!(vo.enabled, Some(false));
        assert_eq!(vo.links[0].href, "http://localhost:8888/api/person/v1/3");
    }
}
