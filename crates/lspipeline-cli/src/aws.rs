//! AWS CodePipeline adapter.
//!
//! Credentials, region and retries come from the SDK's default chain; this
//! module only turns SDK shapes into [`PipelineState`].

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_codepipeline::Client;
use aws_sdk_codepipeline::config::Region;
use aws_sdk_codepipeline::error::DisplayErrorContext;
use aws_sdk_codepipeline::primitives::DateTime as AwsDateTime;
use aws_sdk_codepipeline::types::StageState as AwsStageState;
use chrono::{DateTime, Utc};
use lspipeline_core::{ExecutionStatus, PipelineApi, PipelineState, RemoteError, StageState};
use tracing::{debug, info};

/// [`PipelineApi`] backed by the CodePipeline SDK client.
#[derive(Debug, Clone)]
pub struct AwsPipelineApi {
    client: Client,
}

impl AwsPipelineApi {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    /// Load shared AWS config, optionally pinning region and profile.
    pub async fn from_env(region: Option<String>, profile: Option<String>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region));
        }
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;
        info!(region = ?config.region(), "AWS config loaded");
        Self::new(Client::new(&config))
    }
}

fn remote_error<E>(operation: &str, err: E) -> RemoteError
where
    E: std::error::Error + 'static,
{
    RemoteError::new(operation, DisplayErrorContext(err).to_string())
}

fn to_chrono(t: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(t.secs(), t.subsec_nanos())
}

/// Map one SDK stage onto our snapshot.
///
/// The displayed status is the first action's latest execution. A stage
/// whose first action never ran falls back to the stage-level execution
/// status (which carries no timestamp), then to `Unknown`.
pub fn stage_from_aws(stage: &AwsStageState) -> StageState {
    let name = stage.stage_name().unwrap_or_default();
    let action = stage
        .action_states()
        .first()
        .and_then(|a| a.latest_execution());

    match action {
        Some(execution) => StageState::new(
            name,
            execution
                .status()
                .map_or(ExecutionStatus::Unknown.as_str(), |s| s.as_str()),
            execution.last_status_change().and_then(to_chrono),
        ),
        None => StageState::new(
            name,
            stage
                .latest_execution()
                .map_or(ExecutionStatus::Unknown.as_str(), |e| e.status().as_str()),
            None,
        ),
    }
}

#[async_trait]
impl PipelineApi for AwsPipelineApi {
    async fn list_pipeline_names(&self) -> Result<Vec<String>, RemoteError> {
        let mut pages = self.client.list_pipelines().into_paginator().send();
        let mut names = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| remote_error("ListPipelines", e))?;
            names.extend(
                page.pipelines()
                    .iter()
                    .filter_map(|p| p.name().map(str::to_string)),
            );
        }
        debug!(count = names.len(), "Listed pipelines");
        Ok(names)
    }

    async fn get_pipeline_state(&self, name: &str) -> Result<PipelineState, RemoteError> {
        let output = self
            .client
            .get_pipeline_state()
            .name(name)
            .send()
            .await
            .map_err(|e| remote_error("GetPipelineState", e))?;

        Ok(PipelineState {
            name: output.pipeline_name().unwrap_or(name).to_string(),
            stages: output.stage_states().iter().map(stage_from_aws).collect(),
        })
    }
}
