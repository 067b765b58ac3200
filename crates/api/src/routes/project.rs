//! Route definitions for the `/projects` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::project;
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                  -> list (?status=, ?overdue=)
/// POST   /                  -> create
/// GET    /summary           -> summary
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// POST   /{id}/payments     -> record_payment
/// POST   /{id}/complete     -> complete (?force=)
/// POST   /{id}/deliver      -> deliver (?force=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/summary", get(project::summary))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/payments", post(project::record_payment))
        .route("/{id}/complete", post(project::complete))
        .route("/{id}/deliver", post(project::deliver))
}
