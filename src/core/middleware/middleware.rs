use async_trait::async_trait;

use crate::common::Result;
use crate::core::UnitOfWork;

/// One stage of the session pipeline.
///
/// Errors returned here are transport failures of the pipeline itself.
/// Outcomes meant for the caller travel through the unit's response sender.
#[async_trait]
pub(crate) trait Middleware {
    async fn apply(&mut self, uow: UnitOfWork) -> Result<()>;
}
