//! Project entity model and DTOs.

use serde::{Deserialize, Deserializer};
use sqlx::types::Json;
use sqlx::FromRow;
use tracker_core::error::CoreError;
use tracker_core::project::{ProjectRecord, ProjectType};
use tracker_core::types::{Amount, ProjectId};
use validator::Validate;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client_name: Option<String>,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    pub project_type: String,
    pub created_at: String,
    pub start_date: Option<String>,
    pub deadline: String,
    pub completed_at: Option<String>,
    pub delivered_at: Option<String>,
    pub total_amount: Amount,
    pub advance_received: Amount,
    pub total_received: Amount,
    pub partner_share_given: Option<Amount>,
    pub partner_share_date: Option<String>,
    pub harshk_share_given: Option<Amount>,
    pub harshk_share_date: Option<String>,
    pub nikku_share_given: Option<Amount>,
    pub nikku_share_date: Option<String>,
    pub completion_video_link: Option<String>,
    pub completion_notes: Option<String>,
    pub repo_link: Option<String>,
    pub live_link: Option<String>,
    pub delivery_notes: Option<String>,
    pub tech_stack: Option<Json<Vec<String>>>,
    pub deliverables: Option<Json<Vec<String>>>,
    pub internal_notes: Option<String>,
}

impl Project {
    /// Convert the row into the domain record the status engine reads.
    ///
    /// Fails only if the stored `type` escaped the CHECK constraint.
    pub fn into_record(self) -> Result<ProjectRecord, CoreError> {
        let project_type = ProjectType::from_str_value(&self.project_type)
            .map_err(|e| CoreError::Internal(format!("project {}: {e}", self.id)))?;

        Ok(ProjectRecord {
            id: self.id,
            name: self.name,
            client_name: self.client_name,
            description: self.description,
            project_type,
            created_at: self.created_at,
            start_date: self.start_date,
            deadline: Some(self.deadline).filter(|d| !d.is_empty()),
            completed_at: self.completed_at,
            delivered_at: self.delivered_at,
            total_amount: self.total_amount,
            advance_received: self.advance_received,
            total_received: self.total_received,
            partner_share_given: self.partner_share_given,
            partner_share_date: self.partner_share_date,
            harshk_share_given: self.harshk_share_given,
            harshk_share_date: self.harshk_share_date,
            nikku_share_given: self.nikku_share_given,
            nikku_share_date: self.nikku_share_date,
            completion_video_link: self.completion_video_link,
            repo_link: self.repo_link,
            live_link: self.live_link,
            completion_notes: self.completion_notes,
            delivery_notes: self.delivery_notes,
            internal_notes: self.internal_notes,
            tech_stack: self.tech_stack.map(|Json(v)| v),
            deliverables: self.deliverables.map(|Json(v)| v),
        })
    }
}

/// DTO for creating a new project.
///
/// Required fields default to empty so a missing key surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    /// Server assigns a UUIDv7 if omitted.
    pub id: Option<ProjectId>,
    #[serde(default)]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub client_name: Option<String>,
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub project_type: String,
    /// Server assigns the current UTC time if omitted.
    pub created_at: Option<String>,
    pub start_date: Option<String>,
    #[serde(default)]
    pub deadline: String,
    pub completed_at: Option<String>,
    pub delivered_at: Option<String>,
    #[serde(default)]
    pub total_amount: Amount,
    #[serde(default)]
    pub advance_received: Amount,
    #[serde(default)]
    pub total_received: Amount,
    pub partner_share_given: Option<Amount>,
    pub partner_share_date: Option<String>,
    pub harshk_share_given: Option<Amount>,
    pub harshk_share_date: Option<String>,
    pub nikku_share_given: Option<Amount>,
    pub nikku_share_date: Option<String>,
    #[validate(url(message = "completionVideoLink must be a valid URL"))]
    pub completion_video_link: Option<String>,
    pub completion_notes: Option<String>,
    #[validate(url(message = "repoLink must be a valid URL"))]
    pub repo_link: Option<String>,
    #[validate(url(message = "liveLink must be a valid URL"))]
    pub live_link: Option<String>,
    pub delivery_notes: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub deliverables: Option<Vec<String>>,
    pub internal_notes: Option<String>,
}

/// DTO for partially updating a project.
///
/// Omitted keys are left untouched. Nullable columns use
/// `Option<Option<T>>`: `None` means omitted, `Some(None)` means an explicit
/// `null` that clears the column.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProject {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub client_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub start_date: Option<Option<String>>,
    pub deadline: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub completed_at: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub delivered_at: Option<Option<String>>,
    pub total_amount: Option<Amount>,
    pub advance_received: Option<Amount>,
    pub total_received: Option<Amount>,
    #[serde(default, deserialize_with = "double_option")]
    pub partner_share_given: Option<Option<Amount>>,
    #[serde(default, deserialize_with = "double_option")]
    pub partner_share_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub harshk_share_given: Option<Option<Amount>>,
    #[serde(default, deserialize_with = "double_option")]
    pub harshk_share_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub nikku_share_given: Option<Option<Amount>>,
    #[serde(default, deserialize_with = "double_option")]
    pub nikku_share_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(url(message = "completionVideoLink must be a valid URL"))]
    pub completion_video_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub completion_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(url(message = "repoLink must be a valid URL"))]
    pub repo_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(url(message = "liveLink must be a valid URL"))]
    pub live_link: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub delivery_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tech_stack: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub deliverables: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub internal_notes: Option<Option<String>>,
}

/// Distinguish an explicit `null` (`Some(None)`) from an omitted key (`None`,
/// via `#[serde(default)]`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_null_from_omitted() {
        let input: UpdateProject =
            serde_json::from_str(r#"{"repoLink": null, "totalReceived": 500}"#).unwrap();
        assert_eq!(input.repo_link, Some(None));
        assert_eq!(input.live_link, None);
        assert_eq!(input.total_received, Some(500));
    }

    #[test]
    fn create_tolerates_missing_required_keys() {
        let input: CreateProject = serde_json::from_str("{}").unwrap();
        assert!(input.name.is_empty());
        assert_eq!(input.total_amount, 0);
        assert!(input.validate().is_err());
    }

    #[test]
    fn create_rejects_malformed_links() {
        let input = CreateProject {
            name: "Kiosk".to_string(),
            repo_link: Some("not a url".to_string()),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("repo_link"));
    }

    #[test]
    fn row_converts_to_record() {
        let row = Project {
            id: "p1".to_string(),
            name: "Kiosk".to_string(),
            client_name: None,
            description: None,
            project_type: "mixed".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            start_date: None,
            deadline: "2024-03-01".to_string(),
            completed_at: None,
            delivered_at: None,
            total_amount: 1000,
            advance_received: 200,
            total_received: 200,
            partner_share_given: None,
            partner_share_date: None,
            harshk_share_given: None,
            harshk_share_date: None,
            nikku_share_given: None,
            nikku_share_date: None,
            completion_video_link: None,
            completion_notes: None,
            repo_link: None,
            live_link: None,
            delivery_notes: None,
            tech_stack: Some(Json(vec!["Rust".to_string()])),
            deliverables: None,
            internal_notes: None,
        };
        let record = row.into_record().unwrap();
        assert_eq!(record.project_type, ProjectType::Mixed);
        assert_eq!(record.deadline.as_deref(), Some("2024-03-01"));
        assert_eq!(record.tech_stack, Some(vec!["Rust".to_string()]));
    }
}
