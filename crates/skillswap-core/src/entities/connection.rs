//! Connection entity - an edge in the user connection graph
//!
//! One row per requested pair. A user's sent requests are the pending rows
//! they initiated, received requests the pending rows addressed to them,
//! and connections the accepted rows in either direction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A directed connection-request edge between two users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub requester_id: Snowflake,
    pub addressee_id: Snowflake,
    pub status: ConnectionStatus,
    pub created_at: DateTime<Utc>,
}

impl Connection {
    pub fn pending(requester_id: Snowflake, addressee_id: Snowflake) -> Self {
        Self {
            requester_id,
            addressee_id,
            status: ConnectionStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.requester_id == user_id || self.addressee_id == user_id
    }
}

/// State of a connection edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
}

impl ConnectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            _ => None,
        }
    }
}
