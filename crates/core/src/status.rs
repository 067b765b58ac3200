//! Project status engine.
//!
//! Pure derivation of lifecycle status, due amount, overdue flag, link
//! gating and missing-requirement lists from a [`ProjectRecord`]. Nothing
//! here performs I/O or validation: every function is total over the record
//! shape and only borrows its input.
//!
//! Status precedence (first match wins):
//!
//! ```text
//! delivered_at set                      -> Delivered
//! completed_at set, due == 0            -> ReadyToDeliver
//! completed_at set, due  > 0            -> CompletedPaymentPending
//! total_received > 0                    -> InProgress
//! otherwise                             -> NotStarted
//! ```
//!
//! `due` is always clamped at zero, and [`due_amount`] and
//! [`project_status`] share that clamp.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::project::ProjectRecord;
use crate::types::Amount;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const STATUS_NOT_STARTED: &str = "not_started";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_COMPLETED_PAYMENT_PENDING: &str = "completed_payment_pending";
pub const STATUS_READY_TO_DELIVER: &str = "ready_to_deliver";
pub const STATUS_DELIVERED: &str = "delivered";

/// All valid status strings, in lattice order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_NOT_STARTED,
    STATUS_IN_PROGRESS,
    STATUS_COMPLETED_PAYMENT_PENDING,
    STATUS_READY_TO_DELIVER,
    STATUS_DELIVERED,
];

pub const LABEL_CLIENT_NAME: &str = "Client name";
pub const LABEL_TECH_STACK: &str = "Tech stack";
pub const LABEL_DELIVERABLES: &str = "Deliverables";
pub const LABEL_REPO_LINK: &str = "Repository link";
pub const LABEL_LIVE_LINK: &str = "Live link";
pub const LABEL_COMPLETION_VIDEO: &str = "Completion video";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a project. Later variants are "more complete", so the
/// derived `Ord` follows the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    NotStarted,
    InProgress,
    CompletedPaymentPending,
    ReadyToDeliver,
    Delivered,
}

impl ProjectStatus {
    /// Convert from a string value (query parameters, filters).
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_NOT_STARTED => Ok(Self::NotStarted),
            STATUS_IN_PROGRESS => Ok(Self::InProgress),
            STATUS_COMPLETED_PAYMENT_PENDING => Ok(Self::CompletedPaymentPending),
            STATUS_READY_TO_DELIVER => Ok(Self::ReadyToDeliver),
            STATUS_DELIVERED => Ok(Self::Delivered),
            _ => Err(format!(
                "Invalid project status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => STATUS_NOT_STARTED,
            Self::InProgress => STATUS_IN_PROGRESS,
            Self::CompletedPaymentPending => STATUS_COMPLETED_PAYMENT_PENDING,
            Self::ReadyToDeliver => STATUS_READY_TO_DELIVER,
            Self::Delivered => STATUS_DELIVERED,
        }
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// A string field counts as set only when it has non-whitespace content.
fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

fn has_entries(value: &Option<Vec<String>>) -> bool {
    value
        .as_ref()
        .is_some_and(|items| items.iter().any(|s| !s.trim().is_empty()))
}

/// Parse an ISO-8601 date or datetime down to its calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 (the date is taken in the value's own
/// offset), and naive `YYYY-MM-DDTHH:MM:SS[.fff]`. Returns `None` for
/// anything else.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

// ---------------------------------------------------------------------------
// Derivations
// ---------------------------------------------------------------------------

/// Contract total minus amount received so far, floored at zero.
pub fn due_amount(project: &ProjectRecord) -> Amount {
    project
        .total_amount
        .saturating_sub(project.total_received)
        .max(0)
}

/// Whether delivery artifacts (repo / live links) may be exposed.
///
/// Exactly the zero-due predicate. Callers must withhold the link values,
/// not merely disable them, when this is `false`.
pub fn can_access_links(project: &ProjectRecord) -> bool {
    due_amount(project) == 0
}

/// Derive the lifecycle status.
pub fn project_status(project: &ProjectRecord) -> ProjectStatus {
    if is_present(&project.delivered_at) {
        return ProjectStatus::Delivered;
    }

    if is_present(&project.completed_at) {
        return if due_amount(project) == 0 {
            ProjectStatus::ReadyToDeliver
        } else {
            ProjectStatus::CompletedPaymentPending
        };
    }

    if project.total_received > 0 {
        ProjectStatus::InProgress
    } else {
        ProjectStatus::NotStarted
    }
}

/// Whether the deadline has passed as of `today`.
///
/// Finished or delivered projects are never overdue, and neither is a
/// project whose deadline is absent or unparsable. A deadline equal to
/// `today` is not overdue.
pub fn is_overdue(project: &ProjectRecord, today: NaiveDate) -> bool {
    if is_present(&project.completed_at) || is_present(&project.delivered_at) {
        return false;
    }

    match project.deadline.as_deref().and_then(parse_iso_date) {
        Some(deadline) => deadline < today,
        None => false,
    }
}

/// [`is_overdue`] evaluated against the local calendar date.
pub fn is_overdue_now(project: &ProjectRecord) -> bool {
    is_overdue(project, Local::now().date_naive())
}

/// Fields that should be filled in before the project is marked completed.
///
/// Advisory only; the caller decides whether to block the transition.
pub fn missing_completion_requirements(project: &ProjectRecord) -> Vec<&'static str> {
    let mut missing = Vec::new();

    if !is_present(&project.client_name) {
        missing.push(LABEL_CLIENT_NAME);
    }
    if !has_entries(&project.tech_stack) {
        missing.push(LABEL_TECH_STACK);
    }
    if !has_entries(&project.deliverables) {
        missing.push(LABEL_DELIVERABLES);
    }

    missing
}

/// Links that should exist before the project is marked delivered.
///
/// The completion video is not part of this list; see
/// [`recommended_delivery_items`].
pub fn missing_delivery_requirements(project: &ProjectRecord) -> Vec<&'static str> {
    let mut missing = Vec::new();

    if !is_present(&project.repo_link) {
        missing.push(LABEL_REPO_LINK);
    }
    if !is_present(&project.live_link) {
        missing.push(LABEL_LIVE_LINK);
    }

    missing
}

/// Delivery items that are recommended but never block delivery.
pub fn recommended_delivery_items(project: &ProjectRecord) -> Vec<&'static str> {
    if is_present(&project.completion_video_link) {
        Vec::new()
    } else {
        vec![LABEL_COMPLETION_VIDEO]
    }
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Every derived value for one project, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDerived {
    pub status: ProjectStatus,
    pub due_amount: Amount,
    pub can_access_links: bool,
    pub is_overdue: bool,
    pub missing_completion_requirements: Vec<&'static str>,
    pub missing_delivery_requirements: Vec<&'static str>,
    pub recommended_delivery_items: Vec<&'static str>,
}

/// Compute all derived values for `project` as of `today`.
pub fn derive(project: &ProjectRecord, today: NaiveDate) -> ProjectDerived {
    ProjectDerived {
        status: project_status(project),
        due_amount: due_amount(project),
        can_access_links: can_access_links(project),
        is_overdue: is_overdue(project, today),
        missing_completion_requirements: missing_completion_requirements(project),
        missing_delivery_requirements: missing_delivery_requirements(project),
        recommended_delivery_items: recommended_delivery_items(project),
    }
}

/// Totals across a set of projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total: usize,
    pub not_started: usize,
    pub in_progress: usize,
    pub completed_payment_pending: usize,
    pub ready_to_deliver: usize,
    pub delivered: usize,
    pub overdue: usize,
    pub total_contract_value: Amount,
    pub total_received: Amount,
    pub total_due: Amount,
}

/// Summarize a portfolio as of `today`.
pub fn summarize<'a, I>(projects: I, today: NaiveDate) -> PortfolioSummary
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    let mut summary = PortfolioSummary::default();

    for project in projects {
        summary.total += 1;
        match project_status(project) {
            ProjectStatus::NotStarted => summary.not_started += 1,
            ProjectStatus::InProgress => summary.in_progress += 1,
            ProjectStatus::CompletedPaymentPending => summary.completed_payment_pending += 1,
            ProjectStatus::ReadyToDeliver => summary.ready_to_deliver += 1,
            ProjectStatus::Delivered => summary.delivered += 1,
        }
        if is_overdue(project, today) {
            summary.overdue += 1;
        }
        summary.total_contract_value = summary
            .total_contract_value
            .saturating_add(project.total_amount);
        summary.total_received = summary.total_received.saturating_add(project.total_received);
        summary.total_due = summary.total_due.saturating_add(due_amount(project));
    }

    summary
}
