//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. The multi-step booking mutations
//! (debit+insert, refund+update) live behind single trait methods so an
//! implementation can make them transactional.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{
    Appointment, AppointmentStatus, ChatMessage, Connection, Course, CourseStatus, Notification,
    NotificationKind, Rating, Report, ReportStatus, User,
};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, TimeOfDay};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Delete the account and cascade-delete its appointments
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Add `delta` credits (may be negative). Fails with
    /// `InsufficientCredit` when the result would go below zero; the guard
    /// is part of the same statement as the update. Returns the new total.
    async fn adjust_credits(&self, id: Snowflake, delta: i32) -> RepoResult<i32>;

    /// Convert monetary balance into credits 1:1 in one atomic update.
    /// Fails with `InsufficientFunds` when balance < amount. Returns
    /// (new balance, new credits).
    async fn purchase_credits(&self, id: Snowflake, amount: i64) -> RepoResult<(i64, i32)>;

    async fn set_banned(&self, id: Snowflake, banned: bool) -> RepoResult<()>;

    /// Store the emailed verification code for later confirmation
    async fn set_verification_code(&self, id: Snowflake, code: &str) -> RepoResult<()>;

    /// Confirm the code for the email and flip `email_verified`. Returns
    /// false when the (email, code) pair does not match.
    async fn verify_email(&self, email: &str, code: &str) -> RepoResult<bool>;
}

// ============================================================================
// Appointment Repository
// ============================================================================

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Appointment>>;

    /// Appointments where the user is teacher or student, ordered by date/time
    async fn find_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Appointment>>;

    /// Filtered listing for the HTTP surface
    async fn find_filtered(
        &self,
        teacher: Option<Snowflake>,
        student: Option<Snowflake>,
    ) -> RepoResult<Vec<Appointment>>;

    /// Confirmed appointments of the user, for session-window queries
    async fn find_confirmed(&self, user_id: Snowflake) -> RepoResult<Vec<Appointment>>;

    /// Whether any non-canceled appointment occupies (date, time) for the
    /// teacher or the student, excluding `exclude` if given.
    async fn slot_taken(
        &self,
        teacher_id: Snowflake,
        student_id: Snowflake,
        date: NaiveDate,
        time: TimeOfDay,
        exclude: Option<Snowflake>,
    ) -> RepoResult<bool>;

    /// Insert the appointment and debit one credit from the student as a
    /// single transaction. Fails with `InsufficientCredit` (guard on the
    /// debit) or `SlotConflict` (unique index) without persisting either
    /// half.
    async fn create_booked(&self, appointment: &Appointment) -> RepoResult<()>;

    /// Plain status update for non-cancel transitions
    async fn update_status(
        &self,
        id: Snowflake,
        status: AppointmentStatus,
    ) -> RepoResult<Appointment>;

    /// Cancel and refund one credit to the student in a single
    /// transaction. The update is gated on the previous status being
    /// non-canceled, so re-canceling never refunds twice; in that case the
    /// stored appointment is returned unchanged.
    async fn cancel_with_refund(&self, id: Snowflake) -> RepoResult<Appointment>;

    /// Move the appointment to a new (teacher, date, time). The unique
    /// indexes re-validate the slot invariant; a violation surfaces as
    /// `SlotConflict`.
    async fn reschedule(&self, appointment: &Appointment) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Course Repository
// ============================================================================

#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Course>>;

    /// Courses where the user participates, optionally filtered by status,
    /// newest activity first
    async fn find_for_user(
        &self,
        user_id: Snowflake,
        status: Option<CourseStatus>,
    ) -> RepoResult<Vec<Course>>;

    /// Pending proposals addressed to the user
    async fn find_proposals_for(&self, user_id: Snowflake) -> RepoResult<Vec<Course>>;

    /// Whether a pending or active course already exists between the pair
    async fn exists_between(&self, a: Snowflake, b: Snowflake) -> RepoResult<bool>;

    /// The active course shared by the pair, if any
    async fn find_active_between(&self, a: Snowflake, b: Snowflake)
        -> RepoResult<Option<Course>>;

    async fn create(&self, course: &Course) -> RepoResult<()>;

    /// Persist the course row and its weekly structures
    async fn update(&self, course: &Course) -> RepoResult<()>;
}

// ============================================================================
// Rating Repository
// ============================================================================

#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Rating>>;

    /// Insert; a (session, student) duplicate surfaces as `AlreadyRated`
    async fn create(&self, rating: &Rating) -> RepoResult<()>;

    async fn exists_for_session(
        &self,
        session_id: Snowflake,
        student_id: Snowflake,
    ) -> RepoResult<bool>;

    /// Ratings received by a teacher, newest first
    async fn find_for_teacher(
        &self,
        teacher_id: Snowflake,
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Rating>>;

    async fn average_for_teacher(&self, teacher_id: Snowflake) -> RepoResult<Option<f64>>;

    async fn set_reply(&self, id: Snowflake, reply: &str) -> RepoResult<()>;
}

// ============================================================================
// Message Repository
// ============================================================================

/// A conversation summary: the latest message of a room plus unread count
#[derive(Debug, Clone)]
pub struct Conversation {
    pub room_id: String,
    pub last_message: ChatMessage,
    pub unread: i64,
}

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: &ChatMessage) -> RepoResult<()>;

    /// Room history, oldest first
    async fn find_by_room(&self, room_id: &str) -> RepoResult<Vec<ChatMessage>>;

    /// One entry per room the user participates in, latest message first
    async fn conversations_for(&self, user_id: Snowflake) -> RepoResult<Vec<Conversation>>;

    /// Mark everything addressed to `reader` in the room as read
    async fn mark_room_read(&self, room_id: &str, reader: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Notifications for a recipient, newest first
    async fn find_for_user(&self, user_id: Snowflake) -> RepoResult<Vec<Notification>>;

    async fn unread_count(&self, user_id: Snowflake) -> RepoResult<i64>;

    async fn mark_many_read(&self, user_id: Snowflake, ids: &[Snowflake]) -> RepoResult<u64>;

    async fn set_seen(&self, id: Snowflake) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Delete all notifications of `kind` between the two users (either
    /// direction). Used for stale connection-request suppression.
    async fn delete_between(
        &self,
        a: Snowflake,
        b: Snowflake,
        kind: NotificationKind,
    ) -> RepoResult<u64>;
}

// ============================================================================
// Connection Repository
// ============================================================================

#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Record a pending request. Returns false (no-op) when any edge
    /// already exists between the pair.
    async fn request(&self, from: Snowflake, to: Snowflake) -> RepoResult<bool>;

    /// The edge between the pair, regardless of direction
    async fn find_between(&self, a: Snowflake, b: Snowflake) -> RepoResult<Option<Connection>>;

    /// Promote the pending request `from -> to` to accepted. Returns false
    /// when no such pending request exists.
    async fn accept(&self, from: Snowflake, to: Snowflake) -> RepoResult<bool>;

    /// Drop the pending request `from -> to`. Returns false when absent.
    async fn remove_pending(&self, from: Snowflake, to: Snowflake) -> RepoResult<bool>;

    /// Drop every edge between the pair, pending or accepted
    async fn remove_all_between(&self, a: Snowflake, b: Snowflake) -> RepoResult<u64>;

    /// Pending requests addressed to the user
    async fn pending_for(&self, user_id: Snowflake) -> RepoResult<Vec<Connection>>;

    /// Pending requests initiated by the user
    async fn pending_from(&self, user_id: Snowflake) -> RepoResult<Vec<Connection>>;

    /// Accepted connections of the user (either direction), as the other
    /// party's ID
    async fn connections_of(&self, user_id: Snowflake) -> RepoResult<Vec<Snowflake>>;
}

// ============================================================================
// Report Repository
// ============================================================================

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Report>>;

    async fn create(&self, report: &Report) -> RepoResult<()>;

    async fn list(&self, status: Option<ReportStatus>) -> RepoResult<Vec<Report>>;

    async fn update(&self, report: &Report) -> RepoResult<()>;
}
