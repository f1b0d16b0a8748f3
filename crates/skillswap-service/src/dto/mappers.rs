//! Entity -> response DTO conversions

use skillswap_core::{
    Appointment, ChatMessage, Conversation, Course, Notification, Rating, Report, User,
};

use super::responses::{
    AppointmentResponse, ConversationResponse, CourseResponse, CourseStatsResponse,
    CurrentUserResponse, MessageResponse, NotificationResponse, RatingResponse, ReportResponse,
    UserResponse,
};

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
            teaching_skills: user.teaching_skills.clone(),
            learning_skills: user.learning_skills.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            credits: user.credits,
            balance: user.balance,
            availability: user.availability.clone(),
            teaching_skills: user.teaching_skills.clone(),
            learning_skills: user.learning_skills.clone(),
            role: user.role.as_str().to_string(),
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

impl From<&Appointment> for AppointmentResponse {
    fn from(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            teacher: appointment.teacher_id,
            student: appointment.student_id,
            date: appointment.date,
            time: appointment.time.to_string(),
            status: appointment.status.as_str().to_string(),
            course: appointment.course_id,
            week: appointment.week,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        }
    }
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
            description: course.description.clone(),
            user_a: course.user_a,
            user_b: course.user_b,
            exchange: course.exchange.as_str().to_string(),
            duration_weeks: course.duration_weeks,
            user_a_teaching_skill: course.user_a_teaching.as_ref().map(|t| t.skill.clone()),
            user_b_teaching_skill: course.user_b_teaching.skill.clone(),
            user_a_structure: course.user_a_structure.clone(),
            user_b_structure: course.user_b_structure.clone(),
            status: course.status.as_str().to_string(),
            progress: course.progress(),
            proposed_by: course.proposed_by,
            proposed_at: course.proposed_at,
            accepted_at: course.accepted_at,
            completed_at: course.completed_at,
        }
    }
}

impl From<&Course> for CourseStatsResponse {
    fn from(course: &Course) -> Self {
        let completed = |weeks: &[skillswap_core::CourseWeek]| {
            weeks.iter().filter(|w| w.completed).count() as i32
        };
        Self {
            exchange: course.exchange.as_str().to_string(),
            total_weeks: course.duration_weeks,
            user_a_completed_weeks: completed(&course.user_a_structure),
            user_b_completed_weeks: completed(&course.user_b_structure),
            progress: course.progress(),
            status: course.status.as_str().to_string(),
        }
    }
}

impl From<&Rating> for RatingResponse {
    fn from(rating: &Rating) -> Self {
        Self {
            id: rating.id,
            teacher: rating.teacher_id,
            student: rating.student_id,
            session: rating.session_id,
            rating: rating.score,
            review: rating.review.clone(),
            reply: rating.reply.clone(),
            created_at: rating.created_at,
        }
    }
}

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            user: notification.user_id,
            kind: notification.kind.as_str().to_string(),
            from: notification.from_id,
            content: notification.content.clone(),
            read: notification.read,
            seen: notification.seen,
            created_at: notification.created_at,
        }
    }
}

impl From<&ChatMessage> for MessageResponse {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            room_id: message.room_id.clone(),
            sender: message.sender_id,
            receiver: message.receiver_id,
            text: message.text.clone(),
            read: message.read,
            created_at: message.created_at,
        }
    }
}

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            room_id: conversation.room_id.clone(),
            last_message: MessageResponse::from(&conversation.last_message),
            unread: conversation.unread,
        }
    }
}

impl From<&Report> for ReportResponse {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            reporter: report.reporter_id,
            reported: report.reported_id,
            reason: report.reason.clone(),
            status: report.status.as_str().to_string(),
            created_at: report.created_at,
            resolved_at: report.resolved_at,
        }
    }
}
