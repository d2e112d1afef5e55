//! # Stack Architect
//!
//! Owns the technical architecture section. Runs with a slightly higher
//! step cap than most specialists since route and caching design tends
//! to use more tool steps.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::provider::{CapabilityProvider, ToolSpec};
use crate::swarm::agent::{Agent, AgentCore, GenerateOptions};
use crate::swarm::context::{MessageKind, Recipient, SwarmContext};
use crate::swarm::roles::Role;
use crate::swarm::tools::tools_for;

const SYSTEM_PROMPT: &str = include_str!("defaults/stack_architect.md");

pub struct StackArchitectAgent {
    core: AgentCore,
}

impl StackArchitectAgent {
    pub fn new(
        ctx: &Arc<SwarmContext>,
        provider: Arc<dyn CapabilityProvider>,
        model: Option<&str>,
    ) -> Self {
        Self {
            core: AgentCore::new(Role::StackArchitect, ctx, provider, model),
        }
    }
}

#[async_trait]
impl Agent for StackArchitectAgent {
    fn role(&self) -> Role {
        Role::StackArchitect
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn tools(&self) -> Vec<ToolSpec> {
        tools_for(Role::StackArchitect)
    }

    async fn execute(&mut self) -> Result<String> {
        self.core.set_working("Designing architecture");

        let prompt = format!(
            "{}\n{}\n\n\
             Create the **Technical Architecture** section for the PRD.\n\n\
             Include:\n\
             1. **Route Structure** - App Router folder layout with rendering strategy per route\n\
             2. **Rendering Strategy** - When to use RSC, SSR, SSG, or PPR\n\
             3. **Runtime Selection** - Edge vs Node.js per route\n\
             4. **Server Actions** - Where and how to use them\n\
             5. **Caching Strategy** - revalidation approach, cache tags\n\
             6. **Performance Budgets** - LCP, TTFB, bundle size targets\n\
             7. **Dependencies** - Key packages with versions\n\
             8. **Environment Variables** - Required config (no secrets)\n\n\
             Be specific about Next.js 15 App Router patterns. Include code examples where helpful.",
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
                    step_limit: 4,
                    ..GenerateOptions::default()
                },
            )
            .await?;

        self.core.store_output(&output);
        self.core.send_message(
            Recipient::Role(Role::Orchestrator),
            MessageKind::Response,
            "Architecture complete",
            None,
        );

        Ok(output)
    }
}
