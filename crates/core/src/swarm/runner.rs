//! # Swarm Runner
//!
//! The one-call entry point for a full PRD generation run. Builds a
//! fresh context from a brief, drives the orchestrator, and hands back
//! the document together with the execution summary and the context
//! the auxiliary document generators feed on.

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;

use crate::brief::ProjectBrief;
use crate::provider::CapabilityProvider;
use crate::swarm::context::SwarmContext;
use crate::swarm::orchestrator::Orchestrator;

/// Everything a completed run produces.
pub struct PrdRun {
    /// The compiled PRD in Markdown
    pub prd: String,
    /// Plain-text per-agent status report
    pub summary: String,
    /// The run's context, kept for downstream document synthesis
    pub context: Arc<SwarmContext>,
}

/// Run the full swarm pipeline over a brief.
///
/// Fatal only when the outline or compile step fails; individual agent
/// failures surface in the summary and as missing sections.
#[tracing::instrument(skip_all, fields(model = model.unwrap_or("default")))]
pub async fn generate_prd(
    brief: ProjectBrief,
    provider: Arc<dyn CapabilityProvider>,
    model: Option<&str>,
    user_id: Option<&str>,
) -> Result<PrdRun> {
    tracing::info!("prd generation swarm started");
    let started = Instant::now();

    let context = SwarmContext::new(brief, model, user_id);
    let mut orchestrator = Orchestrator::new(&context, provider, model);
    let prd = orchestrator.execute().await?;
    let summary = orchestrator.execution_summary();

    tracing::info!(
        elapsed_secs = format!("{:.2}", started.elapsed().as_secs_f64()),
        "prd generation complete"
    );

    Ok(PrdRun {
        prd,
        summary,
        context,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::AgentSelection;
    use crate::provider::testing::MockProvider;
    use crate::swarm::roles::Role;

    #[tokio::test]
    async fn test_generate_prd_returns_document_and_summary() {
        let mut brief = ProjectBrief::new("a feature flag dashboard");
        let mut selection = AgentSelection::none();
        selection.market_analyst = true;
        brief.agents = Some(selection);

        let run = generate_prd(brief, MockProvider::echo(), None, Some("user-1"))
            .await
            .expect("run");

        assert!(!run.prd.is_empty());
        assert!(run.summary.contains("## Agent Execution Summary"));
        assert!(run.context.section(Role::MarketAnalyst).is_some());
        assert_eq!(run.context.user_id.as_deref(), Some("user-1"));
    }
}
