//! The project record and its enumerations.
//!
//! [`ProjectRecord`] is the store-agnostic view of a project that the
//! status engine reads. The `db` crate converts its row type into this
//! struct; the engine never mutates it.

use serde::{Deserialize, Serialize};

use crate::types::{Amount, ProjectId};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const TYPE_SOFTWARE: &str = "software";
pub const TYPE_HARDWARE: &str = "hardware";
pub const TYPE_MIXED: &str = "mixed";

/// All valid project type strings, in the order the `projects.type` CHECK
/// constraint lists them.
pub const VALID_PROJECT_TYPES: &[&str] = &[TYPE_SOFTWARE, TYPE_HARDWARE, TYPE_MIXED];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of engagement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    #[default]
    Software,
    Hardware,
    Mixed,
}

impl ProjectType {
    /// Convert from a database string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            TYPE_SOFTWARE => Ok(Self::Software),
            TYPE_HARDWARE => Ok(Self::Hardware),
            TYPE_MIXED => Ok(Self::Mixed),
            _ => Err(format!(
                "Invalid project type '{s}'. Must be one of: {}",
                VALID_PROJECT_TYPES.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Software => TYPE_SOFTWARE,
            Self::Hardware => TYPE_HARDWARE,
            Self::Mixed => TYPE_MIXED,
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// A project as the status engine sees it.
///
/// Dates are kept as the ISO-8601 strings the store holds. The engine parses
/// them on demand and treats anything unparsable as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: ProjectId,
    pub name: String,
    pub client_name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub created_at: String,
    pub start_date: Option<String>,
    pub deadline: Option<String>,
    pub completed_at: Option<String>,
    pub delivered_at: Option<String>,

    pub total_amount: Amount,
    pub advance_received: Amount,
    pub total_received: Amount,

    /// Internal bookkeeping only; never affects status or gating.
    pub partner_share_given: Option<Amount>,
    pub partner_share_date: Option<String>,
    pub harshk_share_given: Option<Amount>,
    pub harshk_share_date: Option<String>,
    pub nikku_share_given: Option<Amount>,
    pub nikku_share_date: Option<String>,

    pub completion_video_link: Option<String>,
    pub repo_link: Option<String>,
    pub live_link: Option<String>,

    pub completion_notes: Option<String>,
    pub delivery_notes: Option<String>,
    pub internal_notes: Option<String>,

    pub tech_stack: Option<Vec<String>>,
    pub deliverables: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_type_round_trips_through_db_string() {
        for s in VALID_PROJECT_TYPES {
            assert_eq!(ProjectType::from_str_value(s).unwrap().as_str(), *s);
        }
    }

    #[test]
    fn unknown_project_type_is_rejected() {
        let err = ProjectType::from_str_value("firmware").unwrap_err();
        assert!(err.contains("software, hardware, mixed"));
    }

    #[test]
    fn record_serializes_with_camel_case_and_type_key() {
        let record = ProjectRecord {
            id: "p1".to_string(),
            name: "Kiosk".to_string(),
            project_type: ProjectType::Hardware,
            total_amount: 5000,
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "hardware");
        assert_eq!(json["totalAmount"], 5000);
        assert!(json.get("clientName").is_some());
    }
}
