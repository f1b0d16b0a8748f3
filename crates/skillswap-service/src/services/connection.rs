//! Connection request service
//!
//! Persistence half of the connection-request lifecycle. Each operation
//! returns a `ConnectionOutcome` describing what was stored, and the
//! gateway turns that into live pushes after the writes have completed.
//!
//! Stale-request suppression: before inserting a new connection_request
//! notification, every prior notification of that kind between the two
//! identities is deleted, in both directions. (The original system had two
//! disagreeing variants of this rule; this is the simple consistent one.)

use skillswap_core::{Notification, NotificationKind, Snowflake};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// What a connection operation actually did; `Ignored` operations must
/// not produce any live push.
#[derive(Debug)]
pub enum ConnectionOutcome {
    /// A pending request was recorded and the addressee notified
    RequestSent { notification: Notification },
    /// The addressee resolved the request; the original requester is
    /// notified either way
    Responded {
        accepted: bool,
        requester: Snowflake,
        addressee: Snowflake,
        notification: Notification,
    },
    /// Every edge between the pair was removed
    Cancelled { a: Snowflake, b: Snowflake },
    /// Nothing to do (unknown user, duplicate request, absent request)
    Ignored,
}

/// Connection service
pub struct ConnectionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ConnectionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a pending request from one user to another. A no-op when
    /// either user is unknown or an edge already exists.
    #[instrument(skip(self))]
    pub async fn send_request(
        &self,
        from: Snowflake,
        to: Snowflake,
    ) -> ServiceResult<ConnectionOutcome> {
        if from == to {
            return Ok(ConnectionOutcome::Ignored);
        }

        let Some(sender) = self.ctx.user_repo().find_by_id(from).await? else {
            return Ok(ConnectionOutcome::Ignored);
        };
        if self.ctx.user_repo().find_by_id(to).await?.is_none() {
            return Ok(ConnectionOutcome::Ignored);
        }

        if !self.ctx.connection_repo().request(from, to).await? {
            return Ok(ConnectionOutcome::Ignored);
        }

        // Suppress any stale request notifications between the pair before
        // inserting the fresh one.
        self.ctx
            .notification_repo()
            .delete_between(from, to, NotificationKind::ConnectionRequest)
            .await?;

        let notification = Notification::new(
            self.ctx.generate_id(),
            to,
            NotificationKind::ConnectionRequest,
            Some(from),
            format!("{} sent you a connection request", sender.full_name),
        );
        self.ctx.notification_repo().create(&notification).await?;

        info!(from = %from, to = %to, "Connection request sent");
        Ok(ConnectionOutcome::RequestSent { notification })
    }

    /// Resolve the pending request `from -> to`; `to` is the responder.
    #[instrument(skip(self))]
    pub async fn respond(
        &self,
        from: Snowflake,
        to: Snowflake,
        accept: bool,
    ) -> ServiceResult<ConnectionOutcome> {
        let resolved = if accept {
            self.ctx.connection_repo().accept(from, to).await?
        } else {
            self.ctx.connection_repo().remove_pending(from, to).await?
        };
        if !resolved {
            return Ok(ConnectionOutcome::Ignored);
        }

        // The request notification the addressee received is stale now.
        self.ctx
            .notification_repo()
            .delete_between(from, to, NotificationKind::ConnectionRequest)
            .await?;

        let responder_name = self
            .ctx
            .user_repo()
            .find_by_id(to)
            .await?
            .map_or_else(|| to.to_string(), |user| user.full_name);

        let notification = Notification::new(
            self.ctx.generate_id(),
            from,
            NotificationKind::ConnectionRequest,
            Some(to),
            if accept {
                format!("{responder_name} accepted your connection request")
            } else {
                format!("{responder_name} declined your connection request")
            },
        );
        self.ctx.notification_repo().create(&notification).await?;

        info!(from = %from, to = %to, accept, "Connection request resolved");
        Ok(ConnectionOutcome::Responded {
            accepted: accept,
            requester: from,
            addressee: to,
            notification,
        })
    }

    /// Remove every pending and established edge between the pair
    #[instrument(skip(self))]
    pub async fn cancel(&self, from: Snowflake, to: Snowflake) -> ServiceResult<ConnectionOutcome> {
        let removed = self.ctx.connection_repo().remove_all_between(from, to).await?;
        if removed == 0 {
            return Ok(ConnectionOutcome::Ignored);
        }

        self.ctx
            .notification_repo()
            .delete_between(from, to, NotificationKind::ConnectionRequest)
            .await?;

        info!(from = %from, to = %to, removed, "Connection removed");
        Ok(ConnectionOutcome::Cancelled { a: from, b: to })
    }
}
