pub mod customer;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /customers                  list, create
/// /customers/{id}             get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/customers", customer::router())
}
