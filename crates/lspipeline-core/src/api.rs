//! Pipeline collaborator interface.
//!
//! The CLI polls through this trait so the dashboard never sees the vendor
//! SDK. Implementations must not retry; failures surface as [`RemoteError`].

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::model::PipelineState;

#[async_trait]
pub trait PipelineApi: Send + Sync {
    /// Names of every pipeline visible to the caller. Pagination is the
    /// implementation's concern; any failed page fails the whole call.
    async fn list_pipeline_names(&self) -> Result<Vec<String>, RemoteError>;

    /// Current state of the named pipeline.
    async fn get_pipeline_state(&self, name: &str) -> Result<PipelineState, RemoteError>;
}
