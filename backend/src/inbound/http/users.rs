//! User record REST handlers.
//!
//! ```text
//! GET    /api/v1/users
//! POST   /api/v1/users {"name":"Alice","email":"a@b.com","latitude":1.0,"longitude":2.0}
//! GET    /api/v1/users/lookup?email=a@b.com
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::validation::validate_required_fields;
use crate::domain::{Error, UserDraft, UserId, UserRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{field_errors_error, missing_field_error, parse_user_id};

/// Request payload for creating or replacing a user record.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UserDraftRequest {
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "https://example.com")]
    pub website: String,
    #[schema(example = 51.5)]
    pub latitude: f64,
    #[schema(example = 0.12)]
    pub longitude: f64,
    #[serde(default)]
    pub email_updates: bool,
}

impl From<UserDraftRequest> for UserDraft {
    fn from(value: UserDraftRequest) -> Self {
        let UserDraftRequest {
            name,
            email,
            website,
            latitude,
            longitude,
            email_updates,
        } = value;
        Self {
            name,
            email,
            website,
            latitude,
            longitude,
            email_updates,
        }
    }
}

/// Response payload for a single user record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct UserRecordResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub website: String,
    pub latitude: f64,
    pub longitude: f64,
    pub email_updates: bool,
}

impl From<UserRecord> for UserRecordResponse {
    fn from(record: UserRecord) -> Self {
        let (id, draft) = record.into_parts();
        Self {
            id: id.to_string(),
            name: draft.name,
            email: draft.email,
            website: draft.website,
            latitude: draft.latitude,
            longitude: draft.longitude,
            email_updates: draft.email_updates,
        }
    }
}

/// Listing envelope shared with the map client: `{"users": [...]}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserRecordResponse>,
}

impl FromIterator<UserRecord> for UsersResponse {
    fn from_iter<I: IntoIterator<Item = UserRecord>>(iter: I) -> Self {
        Self {
            users: iter.into_iter().map(UserRecordResponse::from).collect(),
        }
    }
}

/// Identifier of an edited record.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct UserIdResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    email: Option<String>,
}

/// Validate a JSON draft with the same rules the form endpoint applies.
///
/// Text fields are trimmed before validation and storage.
pub(crate) fn parse_draft(payload: UserDraftRequest) -> Result<UserDraft, Error> {
    let mut draft = UserDraft::from(payload);
    draft.name = draft.name.trim().to_owned();
    draft.email = draft.email.trim().to_owned();
    draft.website = draft.website.trim().to_owned();
    validate_required_fields(&draft.name, &draft.email)
        .into_result()
        .map_err(|fields| field_errors_error(&fields))?;
    Ok(draft)
}

/// Read back a freshly added record, falling back to the submitted fields
/// when a concurrent delete already removed it.
pub(crate) async fn added_record(
    state: &HttpState,
    id: UserId,
    draft: UserDraft,
) -> ApiResult<UserRecord> {
    let stored = state.users_query.get(&id).await?;
    Ok(stored.unwrap_or_else(|| UserRecord::new(id, draft)))
}

/// List every user record in registration order.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "User records", body = UsersResponse),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersResponse>> {
    let records = state.users_query.get_all().await?;
    Ok(web::Json(records.into_iter().collect()))
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserDraftRequest,
    responses(
        (status = 201, description = "Created user record", body = UserRecordResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Rejected by the store", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserDraftRequest>,
) -> ApiResult<HttpResponse> {
    let draft = parse_draft(payload.into_inner())?;
    let id = state.users.add(draft.clone()).await?;
    let record = added_record(&state, id, draft).await?;
    let location = format!("/api/v1/users/{}", record.id());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(UserRecordResponse::from(record)))
}

/// Find the earliest registered user with an email address.
#[utoipa::path(
    get,
    path = "/api/v1/users/lookup",
    params(
        ("email" = String, Query, description = "Email address to look up")
    ),
    responses(
        (status = 200, description = "User record", body = UserRecordResponse),
        (status = 400, description = "Missing email", body = ErrorSchema),
        (status = 404, description = "No user with this email", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "lookupUserByEmail"
)]
#[get("/users/lookup")]
pub async fn lookup_user(
    state: web::Data<HttpState>,
    query: web::Query<LookupQuery>,
) -> ApiResult<web::Json<UserRecordResponse>> {
    let email = query
        .into_inner()
        .email
        .ok_or_else(|| missing_field_error("email"))?;
    let record = state
        .users_query
        .get_by_email(&email)
        .await?
        .ok_or_else(|| Error::not_found("no user record with this email"))?;
    Ok(web::Json(record.into()))
}

/// Fetch one user record.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User record", body = UserRecordResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserRecordResponse>> {
    let id = parse_user_id(&path.into_inner())?;
    let record = state
        .users_query
        .get(&id)
        .await?
        .ok_or_else(|| Error::not_found(format!("user record {id} not found")))?;
    Ok(web::Json(record.into()))
}

/// Replace every field of a user record.
///
/// Unknown identifiers succeed without creating a record.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    request_body = UserDraftRequest,
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Edited identifier", body = UserIdResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Rejected by the store", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "editUser"
)]
#[put("/users/{id}")]
pub async fn edit_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserDraftRequest>,
) -> ApiResult<web::Json<UserIdResponse>> {
    let id = parse_user_id(&path.into_inner())?;
    let draft = parse_draft(payload.into_inner())?;
    let edited = state.users.edit(&id, draft).await?;
    Ok(web::Json(UserIdResponse {
        id: edited.to_string(),
    }))
}

/// Remove a user record; unknown identifiers are a no-op.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path.into_inner())?;
    state.users.delete(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the REST handlers; mount under `/api/v1`.
///
/// `lookup_user` is registered ahead of `get_user` so `/users/lookup` is not
/// parsed as an identifier.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(create_user)
        .service(lookup_user)
        .service(get_user)
        .service(edit_user)
        .service(delete_user);
}
