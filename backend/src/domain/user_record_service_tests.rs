//! Tests for the user record service.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockUserRecordRepository;
use crate::domain::validation::{EMAIL_INVALID, EMAIL_REQUIRED, NAME_REQUIRED};
use rstest::{fixture, rstest};

/// Ordered in-process store mirroring the adapter contract.
#[derive(Default)]
struct StubUserRecordRepository {
    rows: Mutex<Vec<UserRecord>>,
}

impl StubUserRecordRepository {
    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<UserRecord>> {
        self.rows.lock().expect("stub store lock")
    }
}

#[async_trait]
impl UserRecordRepository for StubUserRecordRepository {
    async fn insert(&self, record: &UserRecord) -> Result<(), UserRecordRepositoryError> {
        self.rows().push(record.clone());
        Ok(())
    }

    async fn update(&self, record: &UserRecord) -> Result<u64, UserRecordRepositoryError> {
        let mut rows = self.rows();
        match rows.iter_mut().find(|row| row.id() == record.id()) {
            Some(row) => {
                *row = record.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &UserId) -> Result<u64, UserRecordRepositoryError> {
        let mut rows = self.rows();
        let before = rows.len();
        rows.retain(|row| row.id() != id);
        Ok((before - rows.len()) as u64)
    }

    async fn find_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserRecord>, UserRecordRepositoryError> {
        Ok(self.rows().iter().find(|row| row.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UserRecordRepositoryError> {
        Ok(self.rows().iter().find(|row| row.email() == email).cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserRecord>, UserRecordRepositoryError> {
        Ok(self.rows().clone())
    }
}

fn draft(name: &str, email: &str) -> UserDraft {
    UserDraft {
        name: name.to_owned(),
        email: email.to_owned(),
        website: "http://x.com".to_owned(),
        latitude: 1.0,
        longitude: 2.0,
        email_updates: true,
    }
}

#[fixture]
fn service() -> UserRecordService<StubUserRecordRepository> {
    UserRecordService::new(Arc::new(StubUserRecordRepository::default()))
}

fn mock_service(
    repo: MockUserRecordRepository,
) -> UserRecordService<MockUserRecordRepository> {
    UserRecordService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn add_then_get_returns_the_same_fields(
    service: UserRecordService<StubUserRecordRepository>,
) {
    let id = service
        .add(draft("Alice", "a@b.com"))
        .await
        .expect("add succeeds");

    let record = service
        .get(&id)
        .await
        .expect("get succeeds")
        .expect("record present");

    assert_eq!(record.id(), &id);
    assert_eq!(record.name(), "Alice");
    assert_eq!(record.email(), "a@b.com");
    assert_eq!(record.website(), "http://x.com");
    assert_eq!(record.latitude(), 1.0);
    assert_eq!(record.longitude(), 2.0);
    assert!(record.email_updates());
}

#[rstest]
#[tokio::test]
async fn edit_replaces_every_field(service: UserRecordService<StubUserRecordRepository>) {
    let id = service
        .add(draft("Alice", "a@b.com"))
        .await
        .expect("add succeeds");
    let replacement = UserDraft {
        name: "Alicia".to_owned(),
        email: "alicia@b.com".to_owned(),
        website: String::new(),
        latitude: -33.9,
        longitude: 18.4,
        email_updates: false,
    };

    let edited = service
        .edit(&id, replacement.clone())
        .await
        .expect("edit succeeds");

    assert_eq!(edited, id);
    let record = service
        .get(&id)
        .await
        .expect("get succeeds")
        .expect("record present");
    assert_eq!(record.into_parts().1, replacement);
}

#[rstest]
#[tokio::test]
async fn edit_of_unknown_id_succeeds_without_creating_a_record(
    service: UserRecordService<StubUserRecordRepository>,
) {
    let id = UserId::random();

    let edited = service
        .edit(&id, draft("Ghost", "ghost@b.com"))
        .await
        .expect("edit of unknown id is not an error");

    assert_eq!(edited, id);
    assert!(service.get(&id).await.expect("get succeeds").is_none());
    assert!(service.get_all().await.expect("list succeeds").is_empty());
}

#[rstest]
#[tokio::test]
async fn delete_is_idempotent(service: UserRecordService<StubUserRecordRepository>) {
    let id = service
        .add(draft("Alice", "a@b.com"))
        .await
        .expect("add succeeds");

    service.delete(&id).await.expect("first delete");
    service.delete(&id).await.expect("second delete");

    assert!(service.get(&id).await.expect("get succeeds").is_none());
}

#[rstest]
#[tokio::test]
async fn repeated_adds_yield_distinct_ids(service: UserRecordService<StubUserRecordRepository>) {
    let mut ids = HashSet::new();
    for n in 0..1000 {
        let id = service
            .add(draft(&format!("User {n}"), "same@b.com"))
            .await
            .expect("add succeeds");
        ids.insert(id);
    }

    assert_eq!(ids.len(), 1000);
    assert_eq!(service.get_all().await.expect("list succeeds").len(), 1000);
}

#[rstest]
#[tokio::test]
async fn get_by_email_returns_the_earliest_registration(
    service: UserRecordService<StubUserRecordRepository>,
) {
    let first = service
        .add(draft("First", "shared@b.com"))
        .await
        .expect("add first");
    service
        .add(draft("Second", "shared@b.com"))
        .await
        .expect("add second");

    let found = service
        .get_by_email("shared@b.com")
        .await
        .expect("lookup succeeds")
        .expect("record present");

    assert_eq!(found.id(), &first);
    assert!(
        service
            .get_by_email("nobody@b.com")
            .await
            .expect("lookup succeeds")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn names_with_quotes_are_stored_verbatim(
    service: UserRecordService<StubUserRecordRepository>,
) {
    let name = "O'Brien\"; DROP TABLE users; --";
    let id = service
        .add(draft(name, "ob@b.com"))
        .await
        .expect("add succeeds");

    let record = service
        .get(&id)
        .await
        .expect("get succeeds")
        .expect("record present");
    assert_eq!(record.name(), name);
}

#[rstest]
#[case("", "a@b.com", "name", NAME_REQUIRED)]
#[case("Alice", "   ", "email", EMAIL_REQUIRED)]
#[case("Alice", "not-an-email", "email", EMAIL_INVALID)]
#[tokio::test]
async fn add_rejects_invalid_fields_before_touching_the_store(
    #[case] name: &str,
    #[case] email: &str,
    #[case] field: &str,
    #[case] message: &str,
) {
    let mut repo = MockUserRecordRepository::new();
    repo.expect_insert().times(0);
    let service = mock_service(repo);

    let error = service
        .add(draft(name, email))
        .await
        .expect_err("validation fails");

    assert_eq!(error.kind(), ErrorKind::ValidationFailed);
    let UserRecordError::ValidationFailed(fields) = error else {
        panic!("expected validation failure");
    };
    assert_eq!(fields.get(field), Some(message));
}

#[tokio::test]
async fn edit_rejects_invalid_fields_before_touching_the_store() {
    let mut repo = MockUserRecordRepository::new();
    repo.expect_update().times(0);
    let service = mock_service(repo);

    let error = service
        .edit(&UserId::random(), draft("", ""))
        .await
        .expect_err("validation fails");

    assert_eq!(error.kind(), ErrorKind::ValidationFailed);
}

#[rstest]
#[case(UserRecordRepositoryError::store_unavailable("refused"), ErrorKind::StoreUnavailable)]
#[case(
    UserRecordRepositoryError::constraint_violation("check"),
    ErrorKind::ConstraintViolation
)]
#[case(UserRecordRepositoryError::query("syntax"), ErrorKind::Query)]
#[case(
    UserRecordRepositoryError::unknown_operation("merge"),
    ErrorKind::UnknownOperation
)]
#[tokio::test]
async fn add_surfaces_repository_failures(
    #[case] failure: UserRecordRepositoryError,
    #[case] expected: ErrorKind,
) {
    let mut repo = MockUserRecordRepository::new();
    let returned = failure.clone();
    repo.expect_insert()
        .times(1)
        .return_once(move |_| Err(returned));
    let service = mock_service(repo);

    let error = service
        .add(draft("Alice", "a@b.com"))
        .await
        .expect_err("store failure propagates");

    assert_eq!(error.kind(), expected);
    assert_eq!(error, UserRecordError::Repository(failure));
}

#[tokio::test]
async fn get_all_surfaces_store_unavailable() {
    let mut repo = MockUserRecordRepository::new();
    repo.expect_list_all()
        .times(1)
        .return_once(|| Err(UserRecordRepositoryError::store_unavailable("down")));
    let service = mock_service(repo);

    let error = service.get_all().await.expect_err("list fails");

    assert_eq!(error.kind(), ErrorKind::StoreUnavailable);
}

#[tokio::test]
async fn delete_passes_the_identifier_to_the_repository() {
    let id = UserId::random();
    let expected = id.clone();
    let mut repo = MockUserRecordRepository::new();
    repo.expect_delete()
        .withf(move |candidate| candidate == &expected)
        .times(1)
        .return_once(|_| Ok(1));
    let service = mock_service(repo);

    service.delete(&id).await.expect("delete succeeds");
}

#[rstest]
#[case(UserRecordError::ValidationFailed(FieldErrors::new()), ErrorCode::InvalidRequest)]
#[case(
    UserRecordError::Repository(UserRecordRepositoryError::store_unavailable("x")),
    ErrorCode::ServiceUnavailable
)]
#[case(
    UserRecordError::Repository(UserRecordRepositoryError::constraint_violation("x")),
    ErrorCode::Conflict
)]
#[case(
    UserRecordError::Repository(UserRecordRepositoryError::query("x")),
    ErrorCode::InternalError
)]
#[case(
    UserRecordError::Repository(UserRecordRepositoryError::unknown_operation("x")),
    ErrorCode::InternalError
)]
fn service_errors_map_to_domain_codes(#[case] error: UserRecordError, #[case] code: ErrorCode) {
    assert_eq!(Error::from(error).code(), code);
}

#[test]
fn validation_errors_carry_field_details() {
    let fields = validate_required_fields("", "a@b.com");
    let error = Error::from(UserRecordError::ValidationFailed(fields));

    let details = error.details().expect("details present");
    assert_eq!(details["code"], "validation_failed");
    assert_eq!(details["fields"]["name"], NAME_REQUIRED);
}

#[tokio::test]
async fn driving_ports_translate_service_errors() {
    let mut repo = MockUserRecordRepository::new();
    repo.expect_find_by_email()
        .times(1)
        .return_once(|_| Err(UserRecordRepositoryError::query("bad column")));
    let service = mock_service(repo);
    let query: &dyn UserRecordsQuery = &service;

    let error = query
        .get_by_email("a@b.com")
        .await
        .expect_err("lookup fails");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
