//! Handlers for the `/projects` resource.
//!
//! Every response carries a [`ProjectView`], so derived status and link
//! gating are applied in one place regardless of which endpoint was hit.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracker_core::error::CoreError;
use tracker_core::project::ProjectType;
use tracker_core::status::{self, ProjectStatus, PortfolioSummary};
use tracker_core::types::{Amount, ProjectId};
use tracker_core::validation::{
    validate_delivery_monotonic, validate_iso_date, validate_money, validate_optional_date,
    validate_total_amount,
};
use tracker_db::models::project::{CreateProject, Project, UpdateProject};
use tracker_db::repositories::project_repo::now_rfc3339;
use tracker_db::repositories::ProjectRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::{ForceParams, ProjectListParams};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::view::{today, ProjectView};

/// Body for `POST /projects/{id}/payments`.
#[derive(Debug, Deserialize)]
pub struct RecordPayment {
    pub amount: Amount,
}

fn not_found(id: ProjectId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

fn payment_overflow(total_received: Amount) -> AppError {
    AppError::Core(CoreError::Validation(format!(
        "amount would overflow totalReceived (currently {total_received})"
    )))
}

async fn load(state: &AppState, id: &str) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id.to_string()))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_create(input: &CreateProject) -> AppResult<()> {
    if input.name.trim().is_empty()
        || input.project_type.is_empty()
        || input.deadline.is_empty()
        || input.total_amount == 0
    {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    input.validate()?;
    ProjectType::from_str_value(&input.project_type).map_err(CoreError::Validation)?;

    validate_iso_date("Deadline", &input.deadline)?;
    validate_optional_date("StartDate", input.start_date.as_deref())?;
    validate_optional_date("CompletedAt", input.completed_at.as_deref())?;
    validate_optional_date("DeliveredAt", input.delivered_at.as_deref())?;
    validate_optional_date("PartnerShareDate", input.partner_share_date.as_deref())?;
    validate_optional_date("HarshkShareDate", input.harshk_share_date.as_deref())?;
    validate_optional_date("NikkuShareDate", input.nikku_share_date.as_deref())?;

    validate_total_amount(input.total_amount)?;
    validate_money("advanceReceived", input.advance_received)?;
    validate_money("totalReceived", input.total_received)?;
    Ok(())
}

fn validate_update(current: &Project, input: &UpdateProject) -> AppResult<()> {
    input.validate()?;

    if input.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }

    if let Some(project_type) = &input.project_type {
        ProjectType::from_str_value(project_type).map_err(CoreError::Validation)?;
    }
    if let Some(deadline) = &input.deadline {
        if deadline.is_empty() {
            return Err(AppError::BadRequest("deadline must not be empty".to_string()));
        }
        validate_iso_date("Deadline", deadline)?;
    }

    let nullable_dates = [
        ("StartDate", &input.start_date),
        ("CompletedAt", &input.completed_at),
        ("DeliveredAt", &input.delivered_at),
        ("PartnerShareDate", &input.partner_share_date),
        ("HarshkShareDate", &input.harshk_share_date),
        ("NikkuShareDate", &input.nikku_share_date),
    ];
    for (field, value) in nullable_dates {
        validate_optional_date(field, value.as_ref().and_then(|v| v.as_deref()))?;
    }

    if let Some(total) = input.total_amount {
        validate_total_amount(total)?;
    }
    if let Some(advance) = input.advance_received {
        validate_money("advanceReceived", advance)?;
    }
    if let Some(received) = input.total_received {
        validate_money("totalReceived", received)?;
    }

    validate_delivery_monotonic(
        current.delivered_at.as_deref(),
        input.delivered_at.as_ref().map(|v| v.as_deref()),
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<DataResponse<ProjectView>>)> {
    validate_create(&input)?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = %project.id, name = %project.name, "Project created");

    let view = ProjectView::from_row(project, today())?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ProjectListParams>,
) -> AppResult<Json<DataResponse<Vec<ProjectView>>>> {
    let status_filter = params
        .status
        .as_deref()
        .map(ProjectStatus::from_str_value)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let today = today();
    let views = ProjectRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|row| ProjectView::from_row(row, today))
        .collect::<AppResult<Vec<_>>>()?
        .into_iter()
        .filter(|v| status_filter.map_or(true, |s| v.derived.status == s))
        .filter(|v| params.overdue.map_or(true, |o| v.derived.is_overdue == o))
        .collect();

    Ok(Json(DataResponse { data: views }))
}

/// GET /api/v1/projects/summary
pub async fn summary(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<PortfolioSummary>>> {
    let records = ProjectRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(Project::into_record)
        .collect::<Result<Vec<_>, _>>()?;

    let summary = status::summarize(&records, today());
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<Json<DataResponse<ProjectView>>> {
    let project = load(&state, &id).await?;
    Ok(Json(DataResponse {
        data: ProjectView::from_row(project, today())?,
    }))
}

/// PUT /api/v1/projects/{id}
///
/// Partial update: only keys present in the body change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<DataResponse<ProjectView>>> {
    let current = load(&state, &id).await?;
    validate_update(&current, &input)?;

    let project = ProjectRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| not_found(id.clone()))?;
    tracing::info!(project_id = %id, "Project updated");

    Ok(Json(DataResponse {
        data: ProjectView::from_row(project, today())?,
    }))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> AppResult<StatusCode> {
    if ProjectRepo::delete(&state.pool, &id).await? {
        tracing::info!(project_id = %id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Payments and lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/projects/{id}/payments
pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    Json(body): Json<RecordPayment>,
) -> AppResult<Json<DataResponse<ProjectView>>> {
    if body.amount <= 0 {
        return Err(AppError::BadRequest(
            "amount must be greater than 0".to_string(),
        ));
    }

    let current = load(&state, &id).await?;
    if current.total_received.checked_add(body.amount).is_none() {
        return Err(payment_overflow(current.total_received));
    }

    // The repository refuses the increment without touching the row if a
    // concurrent payment has used up the headroom since the load above.
    let project = match ProjectRepo::record_payment(&state.pool, &id, body.amount).await? {
        Some(project) => project,
        None => return Err(payment_overflow(load(&state, &id).await?.total_received)),
    };
    let view = ProjectView::from_row(project, today())?;

    tracing::info!(
        project_id = %id,
        amount = body.amount,
        total_received = view.project.total_received,
        due = view.derived.due_amount,
        status = view.derived.status.as_str(),
        "Payment recorded"
    );

    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/projects/{id}/complete
///
/// Refuses with 409 while completion requirements are missing, unless
/// `?force=true`. Already-completed projects are returned unchanged.
pub async fn complete(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    Query(params): Query<ForceParams>,
) -> AppResult<Json<DataResponse<ProjectView>>> {
    let record = load(&state, &id).await?.into_record()?;

    // Completed, ready and delivered all sit above this point in the lattice.
    let already_completed =
        status::project_status(&record) >= ProjectStatus::CompletedPaymentPending;
    let missing = if already_completed {
        Vec::new()
    } else {
        status::missing_completion_requirements(&record)
    };
    if !missing.is_empty() && !params.force {
        return Err(CoreError::Conflict(format!(
            "Cannot mark project completed; missing: {}",
            missing.join(", ")
        ))
        .into());
    }

    let project = ProjectRepo::mark_completed(&state.pool, &id, &now_rfc3339())
        .await?
        .ok_or_else(|| not_found(id.clone()))?;
    let view = ProjectView::from_row(project, today())?;

    tracing::info!(
        project_id = %id,
        forced = params.force && !missing.is_empty(),
        status = view.derived.status.as_str(),
        "Project marked completed"
    );

    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/projects/{id}/deliver
///
/// Refuses with 409 while delivery links are missing, unless `?force=true`.
/// Delivery is terminal: a second call leaves `deliveredAt` untouched.
pub async fn deliver(
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    Query(params): Query<ForceParams>,
) -> AppResult<Json<DataResponse<ProjectView>>> {
    let record = load(&state, &id).await?.into_record()?;

    if status::project_status(&record) != ProjectStatus::Delivered {
        let missing = status::missing_delivery_requirements(&record);
        if !missing.is_empty() && !params.force {
            return Err(CoreError::Conflict(format!(
                "Cannot mark project delivered; missing: {}",
                missing.join(", ")
            ))
            .into());
        }

        let due = status::due_amount(&record);
        if due > 0 {
            tracing::warn!(project_id = %id, due, "Delivering project with balance due");
        }
    }

    let project = ProjectRepo::mark_delivered(&state.pool, &id, &now_rfc3339())
        .await?
        .ok_or_else(|| not_found(id.clone()))?;
    let view = ProjectView::from_row(project, today())?;

    tracing::info!(project_id = %id, "Project marked delivered");

    Ok(Json(DataResponse { data: view }))
}
