//! Report entity - a moderation record against a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Report entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: Snowflake,
    pub reporter_id: Snowflake,
    pub reported_id: Snowflake,
    pub reason: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Report {
    pub fn new(
        id: Snowflake,
        reporter_id: Snowflake,
        reported_id: Snowflake,
        reason: String,
    ) -> Self {
        Self {
            id,
            reporter_id,
            reported_id,
            reason,
            status: ReportStatus::Open,
            created_at: Utc::now(),
            resolved_at: None,
        }
    }

    pub fn resolve(&mut self, dismissed: bool) {
        self.status = if dismissed {
            ReportStatus::Dismissed
        } else {
            ReportStatus::Resolved
        };
        self.resolved_at = Some(Utc::now());
    }
}

/// Moderation state of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Open,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Resolved => "resolved",
            Self::Dismissed => "dismissed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Self::Open),
            "resolved" => Some(Self::Resolved),
            "dismissed" => Some(Self::Dismissed),
            _ => None,
        }
    }
}
