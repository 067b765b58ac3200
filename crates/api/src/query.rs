//! Query parameter types for API handlers.

use serde::Deserialize;

/// Filters for `GET /projects` (`?status=&overdue=`).
///
/// Both filters apply to derived values, so they are evaluated in memory
/// after the rows are loaded.
#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    pub status: Option<String>,
    pub overdue: Option<bool>,
}

/// `?force=true` skips the advisory requirement check on lifecycle
/// transitions.
#[derive(Debug, Default, Deserialize)]
pub struct ForceParams {
    #[serde(default)]
    pub force: bool,
}
