//! Repository for the `projects` table.

use chrono::{SecondsFormat, Utc};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite};
use tracker_core::types::Amount;

use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, client_name, description, type, created_at, start_date, \
    deadline, completed_at, delivered_at, total_amount, advance_received, total_received, \
    partner_share_given, partner_share_date, harshk_share_given, harshk_share_date, \
    nikku_share_given, nikku_share_date, completion_video_link, completion_notes, \
    repo_link, live_link, delivery_notes, tech_stack, deliverables, internal_notes";

/// Current UTC time in the RFC 3339 form stored in timestamp columns.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Provides CRUD and lifecycle operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// Assigns a UUIDv7 `id` and the current `created_at` when the input
    /// leaves them empty.
    pub async fn create(pool: &DbPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let id = input
            .id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::now_v7().to_string());
        let created_at = input
            .created_at
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(now_rfc3339);

        let query = format!(
            "INSERT INTO projects ({COLUMNS})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&id)
            .bind(&input.name)
            .bind(&input.client_name)
            .bind(&input.description)
            .bind(&input.project_type)
            .bind(&created_at)
            .bind(&input.start_date)
            .bind(&input.deadline)
            .bind(&input.completed_at)
            .bind(&input.delivered_at)
            .bind(input.total_amount)
            .bind(input.advance_received)
            .bind(input.total_received)
            .bind(input.partner_share_given)
            .bind(&input.partner_share_date)
            .bind(input.harshk_share_given)
            .bind(&input.harshk_share_date)
            .bind(input.nikku_share_given)
            .bind(&input.nikku_share_date)
            .bind(&input.completion_video_link)
            .bind(&input.completion_notes)
            .bind(&input.repo_link)
            .bind(&input.live_link)
            .bind(&input.delivery_notes)
            .bind(input.tech_stack.clone().map(Json))
            .bind(input.deliverables.clone().map(Json))
            .bind(&input.internal_notes)
            .fetch_one(pool)
            .await
    }

    /// Find a project by ID.
    pub async fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ?");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently created first.
    pub async fn list(pool: &DbPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Partially update a project. Only keys present in `input` are written;
    /// an explicit `null` on a nullable column clears it.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &DbPool,
        id: &str,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE projects SET ");
        let mut changed = 0usize;
        let mut sets = builder.separated(", ");

        macro_rules! set {
            ($column:literal, $value:expr) => {
                if let Some(value) = $value {
                    sets.push(concat!($column, " = ")).push_bind_unseparated(value);
                    changed += 1;
                }
            };
        }

        set!("name", input.name.clone());
        set!("client_name", input.client_name.clone());
        set!("description", input.description.clone());
        set!("type", input.project_type.clone());
        set!("start_date", input.start_date.clone());
        set!("deadline", input.deadline.clone());
        set!("completed_at", input.completed_at.clone());
        set!("delivered_at", input.delivered_at.clone());
        set!("total_amount", input.total_amount);
        set!("advance_received", input.advance_received);
        set!("total_received", input.total_received);
        set!("partner_share_given", input.partner_share_given);
        set!("partner_share_date", input.partner_share_date.clone());
        set!("harshk_share_given", input.harshk_share_given);
        set!("harshk_share_date", input.harshk_share_date.clone());
        set!("nikku_share_given", input.nikku_share_given);
        set!("nikku_share_date", input.nikku_share_date.clone());
        set!("completion_video_link", input.completion_video_link.clone());
        set!("completion_notes", input.completion_notes.clone());
        set!("repo_link", input.repo_link.clone());
        set!("live_link", input.live_link.clone());
        set!("delivery_notes", input.delivery_notes.clone());
        set!(
            "tech_stack",
            input.tech_stack.clone().map(|v| v.map(Json))
        );
        set!(
            "deliverables",
            input.deliverables.clone().map(|v| v.map(Json))
        );
        set!("internal_notes", input.internal_notes.clone());

        if changed == 0 {
            return Self::find_by_id(pool, id).await;
        }

        tracing::debug!(project_id = id, fields = changed, "Applying partial project update");

        builder
            .push(" WHERE id = ")
            .push_bind(id.to_string())
            .push(format!(" RETURNING {COLUMNS}"));
        builder
            .build_query_as::<Project>()
            .fetch_optional(pool)
            .await
    }

    /// Number of stored projects.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await
    }

    /// Permanently delete a project by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &DbPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add a positive `amount` to `total_received` in a single statement.
    ///
    /// The increment happens inside SQLite, so concurrent payments against
    /// the same project serialize on the write lock instead of overwriting
    /// each other. SQLite promotes an overflowing integer sum to REAL, so the
    /// `WHERE` clause only matches rows with headroom for `amount`.
    ///
    /// Returns `None` if the project does not exist or the new total would
    /// not fit in an `i64`; the row is left untouched in both cases.
    pub async fn record_payment(
        pool: &DbPool,
        id: &str,
        amount: Amount,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET total_received = total_received + ?1
             WHERE id = ?2 AND ?1 > 0 AND total_received <= ?3 - ?1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(amount)
            .bind(id)
            .bind(Amount::MAX)
            .fetch_optional(pool)
            .await
    }

    /// Set `completed_at` to `at` unless it is already set.
    pub async fn mark_completed(
        pool: &DbPool,
        id: &str,
        at: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET completed_at = COALESCE(NULLIF(completed_at, ''), ?)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(at)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set `delivered_at` (and `completed_at`, if still empty) to `at`.
    ///
    /// An existing `delivered_at` is never overwritten.
    pub async fn mark_delivered(
        pool: &DbPool,
        id: &str,
        at: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                completed_at = COALESCE(NULLIF(completed_at, ''), ?1),
                delivered_at = COALESCE(NULLIF(delivered_at, ''), ?1)
             WHERE id = ?2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(at)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
