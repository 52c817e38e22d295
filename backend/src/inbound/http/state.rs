//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{UserRecordsCommand, UserRecordsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserRecordsCommand>,
    pub users_query: Arc<dyn UserRecordsQuery>,
}

impl HttpState {
    pub fn new(users: Arc<dyn UserRecordsCommand>, users_query: Arc<dyn UserRecordsQuery>) -> Self {
        Self { users, users_query }
    }

    /// Use one service for both ports.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use user_directory::domain::UserRecordService;
    /// use user_directory::inbound::http::state::HttpState;
    /// use user_directory::outbound::memory::InMemoryUserRecordRepository;
    ///
    /// let service = UserRecordService::new(Arc::new(InMemoryUserRecordRepository::new()));
    /// let _state = HttpState::from_service(Arc::new(service));
    /// ```
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: UserRecordsCommand + UserRecordsQuery + 'static,
    {
        Self {
            users: service.clone(),
            users_query: service,
        }
    }
}
