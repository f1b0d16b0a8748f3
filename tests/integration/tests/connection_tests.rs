//! Connection-request lifecycle tests
//!
//! The connection flow only runs over the socket, so these tests exercise
//! the service layer directly against a live database. Requires
//! DATABASE_URL (migrations applied) and JWT_SECRET is not needed here.
//!
//! Run with: cargo test -p integration-tests --test connection_tests

use std::sync::Arc;

use skillswap_common::JwtService;
use skillswap_core::{NotificationKind, Snowflake, SnowflakeGenerator, User};
use skillswap_db::{
    PgAppointmentRepository, PgConnectionRepository, PgCourseRepository, PgMessageRepository,
    PgNotificationRepository, PgRatingRepository, PgReportRepository, PgUserRepository, PgPool,
};
use skillswap_service::{
    ChatService, ConnectionOutcome, ConnectionService, ServiceContext, ServiceContextBuilder,
    UserService,
};

async fn build_context() -> Option<ServiceContext> {
    let url = std::env::var("DATABASE_URL").ok()?;
    let pool = PgPool::connect(&url).await.ok()?;

    ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .appointment_repo(Arc::new(PgAppointmentRepository::new(pool.clone())))
        .course_repo(Arc::new(PgCourseRepository::new(pool.clone())))
        .rating_repo(Arc::new(PgRatingRepository::new(pool.clone())))
        .message_repo(Arc::new(PgMessageRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
        .connection_repo(Arc::new(PgConnectionRepository::new(pool.clone())))
        .report_repo(Arc::new(PgReportRepository::new(pool)))
        .jwt_service(Arc::new(JwtService::new(
            "integration-test-secret-not-for-production",
            900,
            604_800,
        )))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(5)))
        .build()
        .ok()
}

async fn create_user(ctx: &ServiceContext) -> Snowflake {
    let id = ctx.generate_id();
    let user = User::new(
        id,
        format!("Connection Tester {}", id.into_inner()),
        format!("conn_{}@example.com", id.into_inner()),
    );
    ctx.user_repo().create(&user, "argon2id$test-hash").await.unwrap();
    id
}

#[tokio::test]
async fn reject_empties_both_request_lists_and_leaves_one_notification() {
    let Some(ctx) = build_context().await else { return };
    let service = ConnectionService::new(&ctx);
    let users = UserService::new(&ctx);

    let a = create_user(&ctx).await;
    let b = create_user(&ctx).await;

    // A requests, B rejects
    let outcome = service.send_request(a, b).await.unwrap();
    assert!(matches!(outcome, ConnectionOutcome::RequestSent { .. }));

    let outcome = service.respond(a, b, false).await.unwrap();
    assert!(matches!(outcome, ConnectionOutcome::Responded { accepted: false, .. }));

    // Both pending lists are empty and no connection was formed
    let graph_a = users.connections(a).await.unwrap();
    let graph_b = users.connections(b).await.unwrap();
    assert!(graph_a.sent_requests.is_empty());
    assert!(graph_a.received_requests.is_empty());
    assert!(graph_a.connections.is_empty());
    assert!(graph_b.sent_requests.is_empty());
    assert!(graph_b.received_requests.is_empty());
    assert!(graph_b.connections.is_empty());

    // Exactly one notification for A (the rejection); B's stale request
    // notification was suppressed.
    let for_a = ctx.notification_repo().find_for_user(a).await.unwrap();
    assert_eq!(for_a.len(), 1);
    assert_eq!(for_a[0].kind, NotificationKind::ConnectionRequest);
    assert_eq!(for_a[0].from_id, Some(b));

    let for_b = ctx.notification_repo().find_for_user(b).await.unwrap();
    assert!(for_b.is_empty());
}

#[tokio::test]
async fn accept_links_both_sides() {
    let Some(ctx) = build_context().await else { return };
    let service = ConnectionService::new(&ctx);
    let users = UserService::new(&ctx);

    let a = create_user(&ctx).await;
    let b = create_user(&ctx).await;

    service.send_request(a, b).await.unwrap();
    let outcome = service.respond(a, b, true).await.unwrap();
    assert!(matches!(outcome, ConnectionOutcome::Responded { accepted: true, .. }));

    let graph_a = users.connections(a).await.unwrap();
    let graph_b = users.connections(b).await.unwrap();
    assert_eq!(graph_a.connections, vec![b]);
    assert_eq!(graph_b.connections, vec![a]);
    assert!(graph_a.sent_requests.is_empty());
    assert!(graph_b.received_requests.is_empty());
}

#[tokio::test]
async fn duplicate_request_is_silently_ignored() {
    let Some(ctx) = build_context().await else { return };
    let service = ConnectionService::new(&ctx);

    let a = create_user(&ctx).await;
    let b = create_user(&ctx).await;

    assert!(matches!(
        service.send_request(a, b).await.unwrap(),
        ConnectionOutcome::RequestSent { .. }
    ));
    // Same direction again, and the reverse direction, both no-ops
    assert!(matches!(
        service.send_request(a, b).await.unwrap(),
        ConnectionOutcome::Ignored
    ));
    assert!(matches!(
        service.send_request(b, a).await.unwrap(),
        ConnectionOutcome::Ignored
    ));

    // Only one stored request notification
    let for_b = ctx.notification_repo().find_for_user(b).await.unwrap();
    assert_eq!(for_b.len(), 1);
}

#[tokio::test]
async fn request_to_unknown_user_is_ignored() {
    let Some(ctx) = build_context().await else { return };
    let service = ConnectionService::new(&ctx);

    let a = create_user(&ctx).await;
    let ghost = ctx.generate_id();

    assert!(matches!(
        service.send_request(a, ghost).await.unwrap(),
        ConnectionOutcome::Ignored
    ));
}

#[tokio::test]
async fn cancel_removes_established_connection() {
    let Some(ctx) = build_context().await else { return };
    let service = ConnectionService::new(&ctx);
    let users = UserService::new(&ctx);

    let a = create_user(&ctx).await;
    let b = create_user(&ctx).await;

    service.send_request(a, b).await.unwrap();
    service.respond(a, b, true).await.unwrap();

    let outcome = service.cancel(b, a).await.unwrap();
    assert!(matches!(outcome, ConnectionOutcome::Cancelled { .. }));

    let graph_a = users.connections(a).await.unwrap();
    assert!(graph_a.connections.is_empty());

    // A second cancel has nothing to remove
    assert!(matches!(
        service.cancel(a, b).await.unwrap(),
        ConnectionOutcome::Ignored
    ));
}

#[tokio::test]
async fn message_persists_before_any_push_and_notifies_receiver() {
    let Some(ctx) = build_context().await else { return };
    let chat = ChatService::new(&ctx);

    let a = create_user(&ctx).await;
    let b = create_user(&ctx).await;

    let (message, notification) = chat
        .persist_message(a, b, "see you at the session".to_string())
        .await
        .unwrap();

    assert_eq!(message.room_id, chat.room_for(b, a));
    assert_eq!(notification.user_id, b);
    assert_eq!(notification.kind, NotificationKind::Message);

    // The stored history already contains the message
    let history = chat.room_history(&message.room_id, a).await.unwrap();
    assert_eq!(history.last().unwrap().text, "see you at the session");

    // A third party cannot read the room
    let outsider = create_user(&ctx).await;
    assert!(chat.room_history(&message.room_id, outsider).await.is_err());
}
