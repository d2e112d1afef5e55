//! # Performance Engineer

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::provider::{CapabilityProvider, ToolSpec};
use crate::swarm::agent::{Agent, AgentCore, GenerateOptions};
use crate::swarm::context::{MessageKind, Recipient, SwarmContext};
use crate::swarm::roles::Role;
use crate::swarm::tools::tools_for;

const SYSTEM_PROMPT: &str = include_str!("defaults/performance_engineer.md");

pub struct PerformanceEngineerAgent {
    core: AgentCore,
}

impl PerformanceEngineerAgent {
    pub fn new(
        ctx: &Arc<SwarmContext>,
        provider: Arc<dyn CapabilityProvider>,
        model: Option<&str>,
    ) -> Self {
        Self {
            core: AgentCore::new(Role::PerformanceEngineer, ctx, provider, model),
        }
    }
}

#[async_trait]
impl Agent for PerformanceEngineerAgent {
    fn role(&self) -> Role {
        Role::PerformanceEngineer
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn tools(&self) -> Vec<ToolSpec> {
        tools_for(Role::PerformanceEngineer)
    }

    async fn execute(&mut self) -> Result<String> {
        self.core.set_working("Planning performance & observability");

        let prompt = format!(
            "{}\n{}\n\n\
             Create the **Performance & Observability** section for the PRD.\n\n\
             Include:\n\
             1. **Performance Budgets** - Core Web Vitals targets (LCP, FID, CLS)\n\
             2. **SLIs/SLOs** - Service level indicators and objectives per route type\n\
             3. **Caching Strategy** - Revalidation, cache tags, stale-while-revalidate\n\
             4. **Asset Optimization** - Images, fonts, bundles\n\
             5. **Streaming Strategy** - Progressive rendering, suspense boundaries\n\
             6. **Observability Stack** - Logs, traces, metrics tools\n\
             7. **Monitoring** - Key metrics to track (RUM, synthetic)\n\
             8. **Alerting** - Thresholds for incidents\n\
             9. **CI Gates** - Performance checks in build pipeline\n\n\
             Use Vercel Analytics patterns. Be specific about targets.",
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
            "Performance plan complete",
            None,
        );

        Ok(output)
    }
}
