//! # AI Designer
//!
//! Designs the target application's AI features. When the brief opts
//! out of an AI SDK the agent stores a stub section without touching
//! the provider at all.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::provider::{CapabilityProvider, ToolSpec};
use crate::swarm::agent::{Agent, AgentCore, GenerateOptions};
use crate::swarm::context::{MessageKind, Recipient, SwarmContext};
use crate::swarm::roles::Role;
use crate::swarm::tools::tools_for;

const SYSTEM_PROMPT: &str = include_str!("defaults/ai_designer.md");

/// Section body stored when the brief does not use an AI SDK
pub const NO_AI_SDK_SECTION: &str = "# AI Integration\n\nNot using an AI SDK for this project.";

pub struct AiDesignerAgent {
    core: AgentCore,
}

impl AiDesignerAgent {
    pub fn new(
        ctx: &Arc<SwarmContext>,
        provider: Arc<dyn CapabilityProvider>,
        model: Option<&str>,
    ) -> Self {
        Self {
            core: AgentCore::new(Role::AiDesigner, ctx, provider, model),
        }
    }
}

#[async_trait]
impl Agent for AiDesignerAgent {
    fn role(&self) -> Role {
        Role::AiDesigner
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn tools(&self) -> Vec<ToolSpec> {
        tools_for(Role::AiDesigner)
    }

    async fn execute(&mut self) -> Result<String> {
        self.core.set_working("Designing AI interactions");

        if !self.core.context().brief.ai.use_ai_sdk {
            self.core.store_output(NO_AI_SDK_SECTION);
            return Ok(NO_AI_SDK_SECTION.to_string());
        }

        let models = self.core.context().brief.ai.app_models_summary();
        let prompt = format!(
            "{}\n{}\n\n\
             Create the **AI Integration & Interaction Design** section for the PRD.\n\n\
             Include:\n\
             1. **AI Features** - What AI capabilities does the app provide?\n\
             2. **Conversation Patterns** - How users interact with AI (chat, completion, streaming)\n\
             3. **Tool Definitions** - AI SDK tools the model can call (with schemas)\n\
             4. **Model Strategy** - Primary model + fallbacks: {models}\n\
             5. **Streaming UX** - How to show loading, partial results, errors\n\
             6. **Memory/Context** - How to maintain conversation state\n\
             7. **Safety & Guardrails** - Rate limits, content filtering, PII handling\n\
             8. **Evaluation Plan** - How to test AI quality (golden datasets, eval metrics)\n\
             9. **Token Budget** - Cost estimates per interaction\n\n\
             Use Vercel AI SDK 5 patterns. Include code examples for tool definitions.",
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
            "AI design complete",
            None,
        );

        Ok(output)
    }
}
