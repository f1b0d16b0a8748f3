//! Connection entity <-> model mapper

use skillswap_core::{Connection, ConnectionStatus, DomainError, Snowflake};

use crate::models::ConnectionModel;

impl TryFrom<ConnectionModel> for Connection {
    type Error = DomainError;

    fn try_from(model: ConnectionModel) -> Result<Self, Self::Error> {
        let status = ConnectionStatus::parse(&model.status).ok_or_else(|| {
            DomainError::InternalError(format!(
                "corrupt status '{}' on connection {} -> {}",
                model.status, model.requester_id, model.addressee_id
            ))
        })?;

        Ok(Connection {
            requester_id: Snowflake::new(model.requester_id),
            addressee_id: Snowflake::new(model.addressee_id),
            status,
            created_at: model.created_at,
        })
    }
}
