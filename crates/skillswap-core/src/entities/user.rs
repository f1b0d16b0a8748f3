//! User entity - a marketplace member who can teach and learn

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Snowflake, TimeOfDay};

/// Credits granted to every freshly registered account.
pub const STARTING_CREDITS: i32 = 3;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub full_name: String,
    pub email: String,
    pub avatar: Option<String>,
    /// Booking currency; debited per booking, refunded on cancel. Never negative.
    pub credits: i32,
    /// Monetary balance convertible to credits 1:1. Never negative.
    pub balance: i64,
    pub availability: WeeklyAvailability,
    pub learning_skills: Vec<String>,
    pub teaching_skills: Vec<String>,
    pub role: UserRole,
    pub banned: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with the signup defaults
    pub fn new(id: Snowflake, full_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            full_name,
            email,
            avatar: None,
            credits: STARTING_CREDITS,
            balance: 0,
            availability: WeeklyAvailability::default(),
            learning_skills: Vec::new(),
            teaching_skills: Vec::new(),
            role: UserRole::User,
            banned: false,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// A booking debits one credit, so zero credits means no booking.
    #[inline]
    pub fn can_book(&self) -> bool {
        self.credits > 0
    }

    pub fn set_skills(&mut self, teaching: Vec<String>, learning: Vec<String>) {
        self.teaching_skills = teaching;
        self.learning_skills = learning;
        self.updated_at = Utc::now();
    }
}

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

/// One week of availability, Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    pub monday: DayAvailability,
    pub tuesday: DayAvailability,
    pub wednesday: DayAvailability,
    pub thursday: DayAvailability,
    pub friday: DayAvailability,
    pub saturday: DayAvailability,
    pub sunday: DayAvailability,
}

impl Default for WeeklyAvailability {
    fn default() -> Self {
        Self {
            monday: DayAvailability::default(),
            tuesday: DayAvailability::default(),
            wednesday: DayAvailability::default(),
            thursday: DayAvailability::default(),
            friday: DayAvailability::default(),
            saturday: DayAvailability::default(),
            sunday: DayAvailability::default(),
        }
    }
}

/// Availability for a single weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub off: bool,
}

impl Default for DayAvailability {
    fn default() -> Self {
        Self {
            start: TimeOfDay::new(9, 0).expect("09:00 is valid"),
            end: TimeOfDay::new(17, 0).expect("17:00 is valid"),
            off: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_starting_credits() {
        let user = User::new(
            Snowflake::new(1),
            "Ada Lovelace".to_string(),
            "ada@example.com".to_string(),
        );
        assert_eq!(user.credits, STARTING_CREDITS);
        assert_eq!(user.balance, 0);
        assert!(user.can_book());
        assert!(!user.is_admin());
        assert!(!user.banned);
    }

    #[test]
    fn default_availability_is_nine_to_five() {
        let availability = WeeklyAvailability::default();
        assert_eq!(availability.monday.start.to_string(), "09:00");
        assert_eq!(availability.sunday.end.to_string(), "17:00");
        assert!(!availability.wednesday.off);
    }

    #[test]
    fn zero_credits_blocks_booking() {
        let mut user = User::new(Snowflake::new(2), "B".to_string(), "b@example.com".to_string());
        user.credits = 0;
        assert!(!user.can_book());
    }
}
