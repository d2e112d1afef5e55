//! # Market Analyst
//!
//! Builds the who/why for a developer audience. No dependencies beyond
//! the orchestrator, so it always lands in the first wave.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::provider::{CapabilityProvider, ToolSpec};
use crate::swarm::agent::{Agent, AgentCore, GenerateOptions};
use crate::swarm::context::{MessageKind, Recipient, SwarmContext};
use crate::swarm::roles::Role;
use crate::swarm::tools::tools_for;

const SYSTEM_PROMPT: &str = include_str!("defaults/market_analyst.md");

pub struct MarketAnalystAgent {
    core: AgentCore,
}

impl MarketAnalystAgent {
    pub fn new(
        ctx: &Arc<SwarmContext>,
        provider: Arc<dyn CapabilityProvider>,
        model: Option<&str>,
    ) -> Self {
        Self {
            core: AgentCore::new(Role::MarketAnalyst, ctx, provider, model),
        }
    }
}

#[async_trait]
impl Agent for MarketAnalystAgent {
    fn role(&self) -> Role {
        Role::MarketAnalyst
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn tools(&self) -> Vec<ToolSpec> {
        tools_for(Role::MarketAnalyst)
    }

    async fn execute(&mut self) -> Result<String> {
        self.core.set_working("Analyzing market and personas");

        let prompt = format!(
            "{}\n\n\
             Create the **Market Analysis & Personas** section for the PRD.\n\n\
             Include:\n\
             1. **Target Developer Personas** - Who will use this? (e.g., solo dev, startup team, enterprise)\n\
             2. **Problem Statement** - What pain points does this solve?\n\
             3. **Value Proposition** - Why is this better than alternatives?\n\
             4. **Competitive Landscape** - Brief comparison with similar tools/approaches\n\
             5. **Market Opportunity** - TAM/SAM/SOM estimates if applicable\n\n\
             Keep it concise and developer-focused. Use bullet points and clear headings.",
            self.core.project_context()
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
            "Market analysis complete",
            Some(json!({
                "section": Role::MarketAnalyst.as_str(),
                "word_count": output.split_whitespace().count(),
            })),
        );

        Ok(output)
    }
}
