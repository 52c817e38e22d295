//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::ServiceResponse;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};

use crate::domain::UserRecordService;
use crate::inbound::http::error::{form_error_handler, json_error_handler};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{map_client, users};
use crate::outbound::memory::InMemoryUserRecordRepository;

/// Handler state backed by a fresh in-memory repository.
pub fn memory_state() -> HttpState {
    let repository = Arc::new(InMemoryUserRecordRepository::new());
    HttpState::from_service(Arc::new(UserRecordService::new(repository)))
}

/// Serve one request through an app wired like the production server.
///
/// Clones of `state` share their repository, so consecutive calls observe
/// each other's writes.
pub async fn call(state: HttpState, request: TestRequest) -> ServiceResponse {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::FormConfig::default().error_handler(form_error_handler))
            .service(web::scope("/api/v1").configure(users::configure))
            .configure(map_client::configure),
    )
    .await;
    actix_test::call_service(&app, request.to_request()).await
}
