//! Gated project view returned by every project endpoint.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracker_core::project::ProjectRecord;
use tracker_core::status::{self, ProjectDerived};
use tracker_db::models::project::Project;

use crate::error::AppResult;

/// The calendar date overdue checks are evaluated against.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// A project record plus its derived status.
///
/// While the project has a balance due, `repoLink` and `liveLink` are
/// stripped from the record and `linksLocked` is set. The raw values never
/// leave the server in that state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: ProjectRecord,
    pub links_locked: bool,
    pub derived: ProjectDerived,
}

impl ProjectView {
    pub fn new(mut project: ProjectRecord, today: NaiveDate) -> Self {
        let derived = status::derive(&project, today);
        let links_locked = !derived.can_access_links;
        if links_locked {
            project.repo_link = None;
            project.live_link = None;
        }
        Self {
            project,
            links_locked,
            derived,
        }
    }

    /// Convert a row straight into a gated view.
    pub fn from_row(row: Project, today: NaiveDate) -> AppResult<Self> {
        Ok(Self::new(row.into_record()?, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(total_received: i64) -> ProjectRecord {
        ProjectRecord {
            id: "p1".to_string(),
            name: "Storefront".to_string(),
            total_amount: 1000,
            total_received,
            repo_link: Some("https://git.example.com/acme".to_string()),
            live_link: Some("https://acme.example.com".to_string()),
            ..Default::default()
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn unpaid_project_hides_links() {
        let view = ProjectView::new(record(999), date());
        assert!(view.links_locked);
        assert!(view.project.repo_link.is_none());
        assert!(view.project.live_link.is_none());

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("git.example.com"));
        assert!(!json.contains("acme.example.com"));
    }

    #[test]
    fn settled_project_exposes_links() {
        let view = ProjectView::new(record(1000), date());
        assert!(!view.links_locked);
        assert_eq!(
            view.project.repo_link.as_deref(),
            Some("https://git.example.com/acme")
        );
    }

    #[test]
    fn view_flattens_record_fields() {
        let json = serde_json::to_value(ProjectView::new(record(0), date())).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["linksLocked"], true);
        assert_eq!(json["derived"]["status"], "not_started");
        assert!(json["repoLink"].is_null());
    }
}
