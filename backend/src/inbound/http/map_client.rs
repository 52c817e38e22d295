//! Endpoints consumed by the browser map client.
//!
//! ```text
//! GET|POST /users.json
//! POST     /add_user  (application/x-www-form-urlencoded)
//! ```
//!
//! The form posts every value as text, so coordinates are parsed here and
//! parse failures are reported alongside the other field messages.

use actix_web::{get, post, web};
use serde::Deserialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{FieldErrors, UserDraft};
use crate::domain::validation::{TRUE_TOKEN, validate_user_form};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users::{UsersResponse, added_record};
use crate::inbound::http::validation::field_errors_error;

/// Message recorded when the latitude is not a decimal number.
pub const LATITUDE_INVALID: &str = "Latitude must be a number";
/// Message recorded when the longitude is not a decimal number.
pub const LONGITUDE_INVALID: &str = "Longitude must be a number";

/// Registration form posted by the map client.
///
/// Unknown fields such as the legacy `role` are ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddUserForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    /// `"true"` or `"false"`.
    #[serde(default)]
    pub email_updates: String,
}

/// Parse a form coordinate, recording `message` and yielding zero on failure.
///
/// `NaN` and the infinities parse as `f64` but are not coordinates.
fn parse_coordinate(raw: &str, field: &str, message: &str, errors: &mut FieldErrors) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            errors.insert(field, message);
            0.0
        }
    }
}

fn parse_form(form: AddUserForm) -> ApiResult<UserDraft> {
    let name = form.name.trim();
    let email = form.email.trim();
    let mut errors = validate_user_form(name, email, &form.email_updates);
    let latitude = parse_coordinate(&form.latitude, "latitude", LATITUDE_INVALID, &mut errors);
    let longitude = parse_coordinate(&form.longitude, "longitude", LONGITUDE_INVALID, &mut errors);

    errors.into_result().map_err(|errors| {
        debug!(%errors, "rejecting map client registration");
        field_errors_error(&errors)
    })?;

    Ok(UserDraft {
        name: name.to_owned(),
        email: email.to_owned(),
        website: form.website.trim().to_owned(),
        latitude,
        longitude,
        email_updates: form.email_updates == TRUE_TOKEN,
    })
}

async fn all_users(state: &HttpState) -> ApiResult<web::Json<UsersResponse>> {
    let records = state.users_query.get_all().await?;
    Ok(web::Json(records.into_iter().collect()))
}

/// Roster for the map client.
#[utoipa::path(
    get,
    path = "/users.json",
    responses(
        (status = 200, description = "Every user record", body = UsersResponse),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["map"],
    operation_id = "mapUsers"
)]
#[get("/users.json")]
pub async fn users_json(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersResponse>> {
    all_users(&state).await
}

/// Roster for the map client's POST form.
///
/// The `user_type` field is accepted and ignored; role filtering is not
/// supported.
#[utoipa::path(
    post,
    path = "/users.json",
    responses(
        (status = 200, description = "Every user record", body = UsersResponse),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["map"],
    operation_id = "mapUsersPost"
)]
#[post("/users.json")]
pub async fn users_json_post(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersResponse>> {
    all_users(&state).await
}

/// Register a user from the map form and echo the stored record.
#[utoipa::path(
    post,
    path = "/add_user",
    request_body(content = AddUserForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "The added user as a one-element roster", body = UsersResponse),
        (status = 400, description = "Field validation failed", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["map"],
    operation_id = "mapAddUser"
)]
#[post("/add_user")]
pub async fn add_user(
    state: web::Data<HttpState>,
    form: web::Form<AddUserForm>,
) -> ApiResult<web::Json<UsersResponse>> {
    let draft = parse_form(form.into_inner())?;
    let id = state.users.add(draft.clone()).await?;
    let record = added_record(&state, id, draft).await?;
    Ok(web::Json(std::iter::once(record).collect()))
}

/// Register the map client endpoints at the application root.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users_json)
        .service(users_json_post)
        .service(add_user);
}
