//! API integration tests
//!
//! These tests require:
//! - Running PostgreSQL instance with migrations applied
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

/// Register a fresh user and return (auth, register request)
async fn register_user(server: &TestServer) -> (AuthResponse, RegisterRequest) {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (auth, request)
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_register_grants_starting_credits() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (auth, request) = register_user(&server).await;

    assert_eq!(auth.user.full_name, request.full_name);
    assert_eq!(auth.user.credits, 3);
    assert_eq!(auth.user.balance, 0);
    assert!(!auth.access_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let request = RegisterRequest::unique();

    server.post("/api/v1/auth/register", &request).await.unwrap();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_roundtrip() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (_, register) = register_user(&server).await;

    let login = LoginRequest::from_register(&register);
    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.email, register.email);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let login = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_unauthenticated_request_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Booking + credits
// ============================================================================

#[tokio::test]
async fn test_booking_debits_one_credit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (teacher, _) = register_user(&server).await;
    let (student, _) = register_user(&server).await;

    let booking = BookAppointmentRequest {
        teacher: teacher.user.id.clone(),
        date: unique_date(),
        time: "10:00".to_string(),
    };

    let response = server
        .post_auth("/api/v1/appointments", &student.access_token, &booking)
        .await
        .unwrap();
    let appointment: AppointmentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(appointment.status, "pending");
    assert_eq!(appointment.time, "10:00");

    let me = server
        .get_auth("/api/v1/users/@me", &student.access_token)
        .await
        .unwrap();
    let me: UserResponse = assert_json(me, StatusCode::OK).await.unwrap();
    assert_eq!(me.credits, 2);
}

#[tokio::test]
async fn test_booking_scenario_conflict_cancel_rebook() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (teacher, _) = register_user(&server).await;
    let (first, _) = register_user(&server).await;
    let (second, _) = register_user(&server).await;

    let date = unique_date();
    let slot = |teacher_id: &str| BookAppointmentRequest {
        teacher: teacher_id.to_string(),
        date,
        time: "14:00".to_string(),
    };

    // First student books the slot
    let response = server
        .post_auth("/api/v1/appointments", &first.access_token, &slot(&teacher.user.id))
        .await
        .unwrap();
    let booked: AppointmentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Any other student hits a conflict on the same teacher slot
    let response = server
        .post_auth("/api/v1/appointments", &second.access_token, &slot(&teacher.user.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Canceling refunds the first student's credit
    let response = server
        .patch_auth(
            &format!("/api/v1/appointments/{}", booked.id),
            &first.access_token,
            &StatusRequest { status: "canceled".to_string() },
        )
        .await
        .unwrap();
    let canceled: AppointmentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(canceled.status, "canceled");

    let me = server.get_auth("/api/v1/users/@me", &first.access_token).await.unwrap();
    let me: UserResponse = assert_json(me, StatusCode::OK).await.unwrap();
    assert_eq!(me.credits, 3);

    // Re-canceling must not refund a second time
    let response = server
        .patch_auth(
            &format!("/api/v1/appointments/{}", booked.id),
            &first.access_token,
            &StatusRequest { status: "canceled".to_string() },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let me = server.get_auth("/api/v1/users/@me", &first.access_token).await.unwrap();
    let me: UserResponse = assert_json(me, StatusCode::OK).await.unwrap();
    assert_eq!(me.credits, 3);

    // The freed slot accepts a third participant
    let response = server
        .post_auth("/api/v1/appointments", &second.access_token, &slot(&teacher.user.id))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_booking_fails_without_credit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (teacher, _) = register_user(&server).await;
    let (student, _) = register_user(&server).await;

    // Drain the 3 starting credits
    for _ in 0..3 {
        let booking = BookAppointmentRequest {
            teacher: teacher.user.id.clone(),
            date: unique_date(),
            time: "09:00".to_string(),
        };
        let response = server
            .post_auth("/api/v1/appointments", &student.access_token, &booking)
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let booking = BookAppointmentRequest {
        teacher: teacher.user.id.clone(),
        date: unique_date(),
        time: "09:00".to_string(),
    };
    let response = server
        .post_auth("/api/v1/appointments", &student.access_token, &booking)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_invalid_status_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (teacher, _) = register_user(&server).await;
    let (student, _) = register_user(&server).await;

    let booking = BookAppointmentRequest {
        teacher: teacher.user.id.clone(),
        date: unique_date(),
        time: "11:00".to_string(),
    };
    let response = server
        .post_auth("/api/v1/appointments", &student.access_token, &booking)
        .await
        .unwrap();
    let booked: AppointmentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/appointments/{}", booked.id),
            &student.access_token,
            &StatusRequest { status: "postponed".to_string() },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_next_session_returns_confirmed_future_session() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (teacher, _) = register_user(&server).await;
    let (student, _) = register_user(&server).await;

    let booking = BookAppointmentRequest {
        teacher: teacher.user.id.clone(),
        date: unique_date(),
        time: "10:00".to_string(),
    };
    let response = server
        .post_auth("/api/v1/appointments", &student.access_token, &booking)
        .await
        .unwrap();
    let booked: AppointmentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Pending sessions are not surfaced
    let lookup = server
        .get_auth("/api/v1/appointments/next", &student.access_token)
        .await
        .unwrap();
    let lookup: SessionLookupResponse = assert_json(lookup, StatusCode::OK).await.unwrap();
    assert!(lookup.appointment.is_none());

    // Confirm it; now it is the next session for both sides
    server
        .patch_auth(
            &format!("/api/v1/appointments/{}", booked.id),
            &teacher.access_token,
            &StatusRequest { status: "confirmed".to_string() },
        )
        .await
        .unwrap();

    let lookup = server
        .get_auth("/api/v1/appointments/next", &teacher.access_token)
        .await
        .unwrap();
    let lookup: SessionLookupResponse = assert_json(lookup, StatusCode::OK).await.unwrap();
    assert_eq!(lookup.appointment.unwrap().id, booked.id);

    // Nothing is active right now (the session is in the future)
    let active = server
        .get_auth("/api/v1/appointments/active", &student.access_token)
        .await
        .unwrap();
    let active: SessionLookupResponse = assert_json(active, StatusCode::OK).await.unwrap();
    assert!(active.appointment.is_none());
}

// ============================================================================
// Courses
// ============================================================================

#[tokio::test]
async fn test_one_way_course_progress() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (learner, _) = register_user(&server).await;
    let (mentor, _) = register_user(&server).await;

    // Learner proposes a one-way course taught by the mentor
    let proposal = ProposeCourseRequest::one_way(&mentor.user.id, 8);
    let response = server
        .post_auth("/api/v1/courses", &learner.access_token, &proposal)
        .await
        .unwrap();
    let course: CourseResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(course.exchange, "one-way");
    assert!(course.user_a_structure.is_empty());
    assert_eq!(course.user_b_structure.len(), 8);

    // Mentor accepts
    let response = server
        .post_auth(
            &format!("/api/v1/courses/{}/accept", course.id),
            &mentor.access_token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    let course: CourseResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(course.status, "active");

    // Mentor completes 4 of 8 teaching weeks: learner sits at 50%, the
    // mentor has nothing to learn.
    let mut last: Option<CompleteWeekResponse> = None;
    for week in 1..=4 {
        let response = server
            .patch_auth(
                &format!("/api/v1/courses/{}/weeks/{}/b/complete", course.id, week),
                &mentor.access_token,
                &serde_json::json!({}),
            )
            .await
            .unwrap();
        last = Some(assert_json::<CompleteWeekResponse>(response, StatusCode::OK).await.unwrap());
    }
    let halfway = last.as_ref().unwrap();
    assert_eq!(halfway.progress.user_a, 50);
    assert_eq!(halfway.progress.user_b, 0);
    assert_eq!(halfway.status, "active");

    // Week 9 of an 8-week structure is invalid
    let response = server
        .patch_auth(
            &format!("/api/v1/courses/{}/weeks/9/b/complete", course.id),
            &mentor.access_token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Completing the rest finishes the course
    for week in 5..=8 {
        let response = server
            .patch_auth(
                &format!("/api/v1/courses/{}/weeks/{}/b/complete", course.id, week),
                &mentor.access_token,
                &serde_json::json!({}),
            )
            .await
            .unwrap();
        last = Some(assert_json::<CompleteWeekResponse>(response, StatusCode::OK).await.unwrap());
    }
    let done = last.unwrap();
    assert_eq!(done.progress.user_a, 100);
    assert_eq!(done.status, "completed");
}

#[tokio::test]
async fn test_learner_cannot_complete_mentor_weeks() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (learner, _) = register_user(&server).await;
    let (mentor, _) = register_user(&server).await;

    let proposal = ProposeCourseRequest::one_way(&mentor.user.id, 2);
    let response = server
        .post_auth("/api/v1/courses", &learner.access_token, &proposal)
        .await
        .unwrap();
    let course: CourseResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    server
        .post_auth(
            &format!("/api/v1/courses/{}/accept", course.id),
            &mentor.access_token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/courses/{}/weeks/1/b/complete", course.id),
            &learner.access_token,
            &serde_json::json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Credits purchase
// ============================================================================

#[tokio::test]
async fn test_purchase_without_balance_fails() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.unwrap();
    let (user, _) = register_user(&server).await;

    let response = server
        .post_auth(
            "/api/v1/users/@me/credits/purchase",
            &user.access_token,
            &serde_json::json!({ "amount": 5 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
