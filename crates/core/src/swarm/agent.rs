//! # Agent Base
//!
//! The [`Agent`] trait every specialist implements, plus [`AgentCore`],
//! the shared machinery each specialist embeds: bounded generation with
//! per-agent conversation history, dependency-context rendering, state
//! transitions, message sending, and section storage through the
//! agent's own write-once slot.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

use crate::provider::{
    CapabilityProvider, ChatMessage, GenerationRequest, ToolSpec, DEFAULT_MODEL,
};
use crate::swarm::context::{
    AgentMessage, AgentStatus, MessageKind, Recipient, SectionSlot, SwarmContext,
};
use crate::swarm::roles::Role;

/// A unit of work bound to one specialization.
///
/// `execute` is the single operation each specialist owns: read the
/// context, build the role prompt, call the provider, store the
/// section, and report back to the orchestrator.
#[async_trait]
pub trait Agent: Send {
    fn role(&self) -> Role;

    /// Fixed persona/instructions for this role; deterministic.
    fn system_prompt(&self) -> &'static str;

    /// Schema-only tool declarations for multi-step generation.
    fn tools(&self) -> Vec<ToolSpec>;

    async fn execute(&mut self) -> Result<String>;
}

/// Generation knobs for one [`AgentCore::generate`] call
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub tools: Vec<ToolSpec>,
    pub step_limit: u32,
    pub temperature: f32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            tools: Vec::new(),
            step_limit: 1,
            temperature: 0.7,
        }
    }
}

/// Shared behaviors embedded by every specialist (and the orchestrator).
pub struct AgentCore {
    role: Role,
    ctx: Arc<SwarmContext>,
    slot: SectionSlot,
    provider: Arc<dyn CapabilityProvider>,
    model: String,
    history: Vec<ChatMessage>,
}

impl AgentCore {
    /// Bind a role to the shared context. Model resolution: explicit
    /// override, then the context's model, then the process default.
    pub fn new(
        role: Role,
        ctx: &Arc<SwarmContext>,
        provider: Arc<dyn CapabilityProvider>,
        model: Option<&str>,
    ) -> Self {
        let model = model
            .map(str::to_string)
            .or_else(|| ctx.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self {
            role,
            ctx: Arc::clone(ctx),
            slot: ctx.slot(role),
            provider,
            model,
            history: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn context(&self) -> &Arc<SwarmContext> {
        &self.ctx
    }

    /// Rendered "Project Context" block from the brief
    pub fn project_context(&self) -> String {
        self.ctx.brief.context_block()
    }

    /// Labeled subsections for each dependency with a stored output.
    /// Dependencies without output (unselected, failed, or simply not
    /// run yet) are silently omitted — partial context is acceptable.
    pub fn dependency_context(&self) -> String {
        let mut parts = Vec::new();
        for dep in self.role.capability().dependencies {
            if !dep.is_worker() {
                continue;
            }
            if let Some(output) = self.ctx.section(*dep) {
                parts.push(format!("\n## {} Output:\n{}", dep.display_name(), output));
            }
        }
        parts.join("\n")
    }

    /// Mark this agent working on a task
    pub fn set_working(&self, task: &str) {
        self.ctx
            .set_status(self.role, AgentStatus::Working, Some(task));
    }

    /// Run one generation call with this agent's persona and history.
    /// On failure the agent records its own error state and re-raises.
    pub async fn generate(
        &mut self,
        system_prompt: &str,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String> {
        self.history.push(ChatMessage::user(prompt));

        let request = GenerationRequest::new(&self.model, self.history.clone())
            .with_system(system_prompt)
            .with_tools(options.tools, options.step_limit)
            .with_temperature(options.temperature)
            .with_user(self.ctx.user_id.as_deref())
            .with_tags(["agent", self.role.as_str()]);

        match self.provider.generate(request).await {
            Ok(text) => {
                self.history.push(ChatMessage::assistant(&text));
                Ok(text)
            }
            Err(e) => {
                self.ctx.mark_error(self.role, &e.to_string());
                Err(e.into())
            }
        }
    }

    /// Store this agent's section and mark it completed. Only the
    /// owning slot is touched, never another role's.
    pub fn store_output(&self, output: &str) {
        if !self.slot.store(output) {
            tracing::warn!(role = %self.role, "section already stored, keeping first value");
        }
        self.ctx.mark_completed(self.role, output);
    }

    /// Append a message to the swarm log
    pub fn send_message(
        &self,
        to: Recipient,
        kind: MessageKind,
        content: &str,
        artifacts: Option<serde_json::Value>,
    ) {
        self.ctx.push_message(AgentMessage {
            from: self.role,
            to,
            kind,
            content: content.to_string(),
            artifacts,
            timestamp: Utc::now(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::ProjectBrief;
    use crate::provider::testing::MockProvider;
    use crate::provider::ProviderError;

    fn core(role: Role, ctx: &Arc<SwarmContext>) -> AgentCore {
        AgentCore::new(role, ctx, MockProvider::echo(), None)
    }

    #[test]
    fn test_model_resolution_prefers_override_then_context() {
        let ctx = SwarmContext::new(ProjectBrief::new("idea"), Some("ctx/model"), None);
        let with_override = AgentCore::new(
            Role::MarketAnalyst,
            &ctx,
            MockProvider::echo(),
            Some("override/model"),
        );
        assert_eq!(with_override.model, "override/model");
        let from_ctx = core(Role::MarketAnalyst, &ctx);
        assert_eq!(from_ctx.model, "ctx/model");

        let bare = SwarmContext::new(ProjectBrief::new("idea"), None, None);
        assert_eq!(core(Role::MarketAnalyst, &bare).model, DEFAULT_MODEL);
    }

    #[test]
    fn test_dependency_context_renders_only_stored_outputs() {
        let ctx = SwarmContext::new(ProjectBrief::new("idea"), None, None);
        // Scope planner depends on orchestrator + market analyst; only
        // the analyst has output, and orchestrator is never rendered.
        ctx.slot(Role::MarketAnalyst).store("the market is large");
        let core = core(Role::ScopePlanner, &ctx);
        let rendered = core.dependency_context();
        assert!(rendered.contains("## Dev Market & Persona Analyst Output:"));
        assert!(rendered.contains("the market is large"));
        assert_eq!(rendered.matches("## ").count(), 1);
    }

    #[test]
    fn test_dependency_context_empty_when_nothing_completed() {
        let ctx = SwarmContext::new(ProjectBrief::new("idea"), None, None);
        let core = core(Role::SecurityOfficer, &ctx);
        assert!(core.dependency_context().is_empty());
    }

    #[tokio::test]
    async fn test_generate_failure_records_error_and_reraises() {
        let ctx = SwarmContext::new(ProjectBrief::new("idea"), None, None);
        let provider = MockProvider::new(|_| {
            Err(ProviderError::Api {
                status: 500,
                message: "upstream down".into(),
            })
        });
        let mut core = AgentCore::new(Role::MarketAnalyst, &ctx, provider, None);
        let result = core
            .generate("persona", "prompt", GenerateOptions::default())
            .await;
        assert!(result.is_err());
        let state = ctx.agent_state(Role::MarketAnalyst);
        assert_eq!(state.status, AgentStatus::Error);
        assert!(state.error.as_deref().unwrap_or_default().contains("500"));
        assert!(state.output.is_none());
    }

    #[tokio::test]
    async fn test_generate_threads_history_and_attribution() {
        let ctx = SwarmContext::new(ProjectBrief::new("idea"), None, Some("user-7"));
        let provider = MockProvider::echo();
        let mut core = AgentCore::new(Role::QualityLead, &ctx, Arc::clone(&provider) as _, None);
        core.generate("persona", "first", GenerateOptions::default())
            .await
            .expect("generate");
        core.generate("persona", "second", GenerateOptions::default())
            .await
            .expect("generate");

        let requests = provider.requests();
        assert_eq!(requests.len(), 2);
        // Second call carries the first round-trip in history.
        assert_eq!(requests[1].messages.len(), 3);
        assert_eq!(requests[1].user.as_deref(), Some("user-7"));
        assert_eq!(requests[1].tags, vec!["agent", "quality-lead"]);
    }

    #[test]
    fn test_store_output_completes_state_and_section() {
        let ctx = SwarmContext::new(ProjectBrief::new("idea"), None, None);
        let core = core(Role::MarketAnalyst, &ctx);
        core.store_output("analysis text");
        assert_eq!(ctx.section(Role::MarketAnalyst), Some("analysis text"));
        let state = ctx.agent_state(Role::MarketAnalyst);
        assert_eq!(state.status, AgentStatus::Completed);
        assert_eq!(state.output.as_deref(), Some("analysis text"));
    }
}
