use crate::service::CustomerService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable: the service holds its store behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Customer operations; owns the storage handle.
    pub customers: CustomerService,
}
