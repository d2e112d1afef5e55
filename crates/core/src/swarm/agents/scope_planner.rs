//! # Scope Planner
//!
//! Turns the analyst's insights into prioritized, bounded work.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::provider::{CapabilityProvider, ToolSpec};
use crate::swarm::agent::{Agent, AgentCore, GenerateOptions};
use crate::swarm::context::{MessageKind, Recipient, SwarmContext};
use crate::swarm::roles::Role;
use crate::swarm::tools::tools_for;

const SYSTEM_PROMPT: &str = include_str!("defaults/scope_planner.md");

pub struct ScopePlannerAgent {
    core: AgentCore,
}

impl ScopePlannerAgent {
    pub fn new(
        ctx: &Arc<SwarmContext>,
        provider: Arc<dyn CapabilityProvider>,
        model: Option<&str>,
    ) -> Self {
        Self {
            core: AgentCore::new(Role::ScopePlanner, ctx, provider, model),
        }
    }
}

#[async_trait]
impl Agent for ScopePlannerAgent {
    fn role(&self) -> Role {
        Role::ScopePlanner
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn tools(&self) -> Vec<ToolSpec> {
        tools_for(Role::ScopePlanner)
    }

    async fn execute(&mut self) -> Result<String> {
        self.core.set_working("Planning scope and features");

        let prompt = format!(
            "{}\n{}\n\n\
             Create the **Scope & Features** section for the PRD.\n\n\
             Include:\n\
             1. **Job Stories** - 3-5 core job stories in format: \"When [situation], I want to [motivation], so I can [outcome]\"\n\
             2. **User Journeys** - Key workflows with steps\n\
             3. **Feature List** - Organized by priority:\n   \
                - **Must Have (MVP)** - Critical for launch\n   \
                - **Should Have** - Important but not blocking\n   \
                - **Could Have** - Nice to have\n   \
                - **Won't Have (Yet)** - Explicitly out of scope\n\
             4. **Success Criteria** - How we measure success (specific metrics)\n\
             5. **Risks & Open Questions** - What could go wrong? What's unclear?\n\n\
             Use MoSCoW prioritization. Be specific about MVP scope.",
            self.core.project_context(),
            self.core.dependency_context()
        );

        let output = self
            .core
            .generate(
                SYSTEM_PROMPT,
                &prompt,
                GenerateOptions {
                    tools: self.tools(),
                    step_limit: 3,
                    ..GenerateOptions::default()
                },
            )
            .await?;

        self.core.store_output(&output);
        self.core.send_message(
            Recipient::Role(Role::Orchestrator),
            MessageKind::Response,
            "Scope planning complete",
            None,
        );

        Ok(output)
    }
}
