//! Credit ledger service
//!
//! Thin wrapper over the guarded single-statement credit and balance
//! updates. The booking path debits inside its own transaction and does
//! not come through here.

use skillswap_core::Snowflake;
use tracing::{info, instrument};

use crate::dto::CreditsResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Ledger service
pub struct LedgerService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LedgerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add credits unconditionally
    #[instrument(skip(self))]
    pub async fn increment(&self, user_id: Snowflake, amount: i32) -> ServiceResult<i32> {
        let credits = self.ctx.user_repo().adjust_credits(user_id, amount.abs()).await?;
        info!(user_id = %user_id, credits, "Credits incremented");
        Ok(credits)
    }

    /// Remove credits; fails with `InsufficientCredit` rather than going
    /// below zero
    #[instrument(skip(self))]
    pub async fn decrement(&self, user_id: Snowflake, amount: i32) -> ServiceResult<i32> {
        let credits = self.ctx.user_repo().adjust_credits(user_id, -amount.abs()).await?;
        info!(user_id = %user_id, credits, "Credits decremented");
        Ok(credits)
    }

    /// Convert monetary balance to credits 1:1 in a single atomic update
    #[instrument(skip(self))]
    pub async fn purchase(&self, user_id: Snowflake, amount: i64) -> ServiceResult<CreditsResponse> {
        let (balance, credits) = self.ctx.user_repo().purchase_credits(user_id, amount).await?;
        info!(user_id = %user_id, amount, balance, credits, "Credits purchased");
        Ok(CreditsResponse { balance, credits })
    }
}
