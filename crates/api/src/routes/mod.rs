pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /projects                        list, create
/// /projects/summary                portfolio totals
/// /projects/{id}                   get, update, delete
/// /projects/{id}/payments          record payment
/// /projects/{id}/complete          mark completed
/// /projects/{id}/deliver           mark delivered
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/projects", project::router())
}
