//! Connection-request lifecycle events

use skillswap_core::Snowflake;
use skillswap_service::{ConnectionOutcome, ConnectionService, ServiceResult};

use crate::events::{ConnectionUpdateStatus, NotificationPayload, ServerEvent};
use crate::server::HubState;

/// Record a pending request; push to the recipient when connected
pub async fn send_request(state: &HubState, from: Snowflake, to: Snowflake) -> ServiceResult<()> {
    let service = ConnectionService::new(state.service_context());
    let outcome = service.send_request(from, to).await?;

    if let ConnectionOutcome::RequestSent { notification } = outcome {
        state
            .hub()
            .send_to(to, ServerEvent::ConnectionRequest { from_id: from, to_id: to })
            .await;
        state
            .hub()
            .send_to(
                to,
                ServerEvent::Notification {
                    notification: NotificationPayload::from(&notification),
                },
            )
            .await;
    }
    Ok(())
}

/// Accept or reject; both parties get a status update, the requester gets
/// the stored notification pushed as well
pub async fn respond(
    state: &HubState,
    from: Snowflake,
    to: Snowflake,
    accept: bool,
) -> ServiceResult<()> {
    let service = ConnectionService::new(state.service_context());
    let outcome = service.respond(from, to, accept).await?;

    if let ConnectionOutcome::Responded { accepted, requester, addressee, notification } = outcome {
        let status = if accepted {
            ConnectionUpdateStatus::Accepted
        } else {
            ConnectionUpdateStatus::Rejected
        };

        state
            .hub()
            .send_to(
                requester,
                ServerEvent::ConnectionUpdate {
                    user_id: requester,
                    other_id: addressee,
                    status,
                },
            )
            .await;
        state
            .hub()
            .send_to(
                addressee,
                ServerEvent::ConnectionUpdate {
                    user_id: addressee,
                    other_id: requester,
                    status,
                },
            )
            .await;
        state
            .hub()
            .send_to(
                requester,
                ServerEvent::Notification {
                    notification: NotificationPayload::from(&notification),
                },
            )
            .await;
    }
    Ok(())
}

/// Tear the pair's edges down; notify both sides when connected
pub async fn cancel(state: &HubState, from: Snowflake, to: Snowflake) -> ServiceResult<()> {
    let service = ConnectionService::new(state.service_context());
    let outcome = service.cancel(from, to).await?;

    if let ConnectionOutcome::Cancelled { a, b } = outcome {
        for (user, other) in [(a, b), (b, a)] {
            state
                .hub()
                .send_to(
                    user,
                    ServerEvent::ConnectionUpdate {
                        user_id: user,
                        other_id: other,
                        status: ConnectionUpdateStatus::Cancelled,
                    },
                )
                .await;
        }
    }
    Ok(())
}
