//! Course entity - a peer-to-peer skill exchange with weekly curricula
//!
//! A course pairs two users. In a mutual exchange each side teaches the
//! other; in a one-way exchange user A only learns. Each teaching direction
//! carries an ordered weekly structure of exactly `duration_weeks` entries,
//! built once at proposal time. Progress is always derived from the
//! completed flags, never stored as truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Course entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: Snowflake,
    pub title: String,
    pub description: Option<String>,
    pub user_a: Snowflake,
    pub user_b: Snowflake,
    pub exchange: ExchangeType,
    pub duration_weeks: i32,
    /// What user A teaches user B; `None` for one-way courses
    pub user_a_teaching: Option<TeachingSkill>,
    /// What user B teaches user A; present in both exchange types
    pub user_b_teaching: TeachingSkill,
    pub user_a_structure: Vec<CourseWeek>,
    pub user_b_structure: Vec<CourseWeek>,
    pub status: CourseStatus,
    pub proposed_by: Snowflake,
    pub proposed_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Build a pending course proposal with its weekly structures.
    ///
    /// This is the only constructor; the structures are created here so a
    /// course is fully valid before it ever reaches the store.
    #[allow(clippy::too_many_arguments)]
    pub fn new_proposal(
        id: Snowflake,
        title: String,
        description: Option<String>,
        user_a: Snowflake,
        user_b: Snowflake,
        duration_weeks: i32,
        user_a_teaching: Option<TeachingSkill>,
        user_b_teaching: TeachingSkill,
    ) -> Self {
        let exchange = if user_a_teaching.is_some() {
            ExchangeType::Mutual
        } else {
            ExchangeType::OneWay
        };

        let user_a_structure = match &user_a_teaching {
            Some(teaching) => build_weekly_structure(duration_weeks, &teaching.skill),
            None => Vec::new(),
        };
        let user_b_structure = build_weekly_structure(duration_weeks, &user_b_teaching.skill);

        let now = Utc::now();
        Self {
            id,
            title,
            description,
            user_a,
            user_b,
            exchange,
            duration_weeks,
            user_a_teaching,
            user_b_teaching,
            user_a_structure,
            user_b_structure,
            status: CourseStatus::Pending,
            proposed_by: user_a,
            proposed_at: now,
            accepted_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_participant(&self, user_id: Snowflake) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }

    /// The other participant of a course member
    pub fn counterpart_of(&self, user_id: Snowflake) -> Option<Snowflake> {
        if user_id == self.user_a {
            Some(self.user_b)
        } else if user_id == self.user_b {
            Some(self.user_a)
        } else {
            None
        }
    }

    pub fn structure(&self, side: CourseSide) -> &[CourseWeek] {
        match side {
            CourseSide::A => &self.user_a_structure,
            CourseSide::B => &self.user_b_structure,
        }
    }

    /// The participant who owns (teaches) the given structure side
    pub fn side_owner(&self, side: CourseSide) -> Snowflake {
        match side {
            CourseSide::A => self.user_a,
            CourseSide::B => self.user_b,
        }
    }

    /// Mark a week (1-based) on one side as completed.
    pub fn complete_week(
        &mut self,
        side: CourseSide,
        week_number: i32,
    ) -> Result<&CourseWeek, DomainError> {
        let structure = match side {
            CourseSide::A => &mut self.user_a_structure,
            CourseSide::B => &mut self.user_b_structure,
        };
        let max = structure.len() as i32;
        if week_number < 1 || week_number > max {
            return Err(DomainError::InvalidWeek { week: week_number, max });
        }
        let week = &mut structure[(week_number - 1) as usize];
        week.completed = true;
        self.updated_at = Utc::now();
        Ok(&structure[(week_number - 1) as usize])
    }

    /// Derived progress, recomputed from the completed flags.
    ///
    /// One-way: the learner (user A) progresses through user B's teaching
    /// structure and user B has nothing to learn. Mutual: each side's
    /// progress is the completion of the *other* side's structure, since
    /// each participant learns from the other's curriculum.
    pub fn progress(&self) -> CourseProgress {
        let duration = self.duration_weeks.max(1);
        let percent = |structure: &[CourseWeek]| -> i32 {
            let completed = structure.iter().filter(|w| w.completed).count() as f64;
            ((completed / f64::from(duration)) * 100.0).round() as i32
        };

        match self.exchange {
            ExchangeType::OneWay => {
                let user_a = percent(&self.user_b_structure);
                CourseProgress {
                    user_a,
                    user_b: 0,
                    overall: user_a,
                }
            }
            ExchangeType::Mutual => {
                let user_a = percent(&self.user_b_structure);
                let user_b = percent(&self.user_a_structure);
                CourseProgress {
                    user_a,
                    user_b,
                    overall: ((f64::from(user_a) + f64::from(user_b)) / 2.0).round() as i32,
                }
            }
        }
    }

    /// Whether every required structure is fully completed.
    /// One-way courses only require the teaching (user B) side.
    pub fn all_weeks_completed(&self) -> bool {
        let b_done = self.user_b_structure.iter().all(|w| w.completed);
        match self.exchange {
            ExchangeType::OneWay => b_done,
            ExchangeType::Mutual => b_done && self.user_a_structure.iter().all(|w| w.completed),
        }
    }

    /// Flip to completed if every required week is done. Returns true when
    /// the transition happened.
    pub fn try_complete(&mut self) -> bool {
        if self.status == CourseStatus::Active && self.all_weeks_completed() {
            self.status = CourseStatus::Completed;
            self.completed_at = Some(Utc::now());
            true
        } else {
            false
        }
    }
}

/// Build an ordered weekly structure of `duration` entries for a skill.
fn build_weekly_structure(duration: i32, skill: &str) -> Vec<CourseWeek> {
    (1..=duration)
        .map(|week| CourseWeek {
            week,
            title: format!("Week {week} - {skill}"),
            description: String::new(),
            content: Vec::new(),
            completed: false,
        })
        .collect()
}

/// One week of a teaching structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseWeek {
    pub week: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: Vec<WeekContent>,
    #[serde(default)]
    pub completed: bool,
}

/// A content item attached to a course week (uploaded material or a
/// scheduled session reference)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekContent {
    pub id: String,
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Snowflake>,
    pub added_by: Snowflake,
    pub added_at: DateTime<Utc>,
}

/// Derived completion percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CourseProgress {
    pub user_a: i32,
    pub user_b: i32,
    pub overall: i32,
}

/// Which participant's teaching structure is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseSide {
    A,
    B,
}

impl CourseSide {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "a" | "userA" => Some(Self::A),
            "b" | "userB" => Some(Self::B),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

/// Exchange direction of a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExchangeType {
    Mutual,
    OneWay,
}

impl ExchangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mutual => "mutual",
            Self::OneWay => "one-way",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mutual" => Some(Self::Mutual),
            "one-way" => Some(Self::OneWay),
            _ => None,
        }
    }
}

/// Course lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Pending,
    Active,
    Completed,
    Rejected,
    Cancelled,
}

impl CourseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "rejected" => Some(Self::Rejected),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// What one participant teaches the other
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingSkill {
    pub skill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl TeachingSkill {
    pub fn new(skill: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_way_course(duration: i32) -> Course {
        Course::new_proposal(
            Snowflake::new(1),
            "Learn Rust".to_string(),
            None,
            Snowflake::new(10),
            Snowflake::new(20),
            duration,
            None,
            TeachingSkill::new("Rust"),
        )
    }

    fn mutual_course(duration: i32) -> Course {
        Course::new_proposal(
            Snowflake::new(2),
            "Rust for Spanish".to_string(),
            None,
            Snowflake::new(10),
            Snowflake::new(20),
            duration,
            Some(TeachingSkill::new("Spanish")),
            TeachingSkill::new("Rust"),
        )
    }

    #[test]
    fn one_way_has_empty_learner_structure() {
        let course = one_way_course(8);
        assert_eq!(course.exchange, ExchangeType::OneWay);
        assert!(course.user_a_structure.is_empty());
        assert_eq!(course.user_b_structure.len(), 8);
        assert_eq!(course.user_b_structure[0].title, "Week 1 - Rust");
        assert_eq!(course.user_b_structure[7].week, 8);
    }

    #[test]
    fn mutual_builds_both_structures() {
        let course = mutual_course(4);
        assert_eq!(course.exchange, ExchangeType::Mutual);
        assert_eq!(course.user_a_structure.len(), 4);
        assert_eq!(course.user_b_structure.len(), 4);
        assert_eq!(course.user_a_structure[2].title, "Week 3 - Spanish");
    }

    #[test]
    fn one_way_progress_tracks_teacher_side() {
        let mut course = one_way_course(8);
        for week in 1..=4 {
            course.complete_week(CourseSide::B, week).unwrap();
        }
        let progress = course.progress();
        assert_eq!(progress.user_a, 50);
        assert_eq!(progress.user_b, 0);
        assert_eq!(progress.overall, 50);
    }

    #[test]
    fn mutual_progress_crosses_sides() {
        let mut course = mutual_course(4);
        // User A finishes teaching 3 of 4 weeks; user B none.
        for week in 1..=3 {
            course.complete_week(CourseSide::A, week).unwrap();
        }
        let progress = course.progress();
        // B learns from A's curriculum, A learns from B's.
        assert_eq!(progress.user_b, 75);
        assert_eq!(progress.user_a, 0);
        assert_eq!(progress.overall, 38);
    }

    #[test]
    fn invalid_week_is_rejected() {
        let mut course = one_way_course(4);
        let err = course.complete_week(CourseSide::B, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidWeek { .. }));
        let err = course.complete_week(CourseSide::B, 5).unwrap_err();
        assert!(matches!(err, DomainError::InvalidWeek { week: 5, max: 4 }));
        // The empty learner side rejects everything.
        let err = course.complete_week(CourseSide::A, 1).unwrap_err();
        assert!(matches!(err, DomainError::InvalidWeek { week: 1, max: 0 }));
    }

    #[test]
    fn one_way_completes_on_teacher_side_alone() {
        let mut course = one_way_course(2);
        course.status = CourseStatus::Active;
        course.complete_week(CourseSide::B, 1).unwrap();
        assert!(!course.try_complete());
        course.complete_week(CourseSide::B, 2).unwrap();
        assert!(course.try_complete());
        assert_eq!(course.status, CourseStatus::Completed);
        assert!(course.completed_at.is_some());
    }

    #[test]
    fn mutual_requires_both_sides_to_complete() {
        let mut course = mutual_course(1);
        course.status = CourseStatus::Active;
        course.complete_week(CourseSide::B, 1).unwrap();
        assert!(!course.try_complete());
        course.complete_week(CourseSide::A, 1).unwrap();
        assert!(course.try_complete());
    }

    #[test]
    fn completing_twice_is_harmless() {
        let mut course = one_way_course(2);
        course.complete_week(CourseSide::B, 1).unwrap();
        course.complete_week(CourseSide::B, 1).unwrap();
        assert_eq!(course.progress().user_a, 50);
    }
}
