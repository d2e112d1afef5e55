//! # Security Officer
//!
//! Runs in the last wave of a full selection since it reads the
//! architect, AI, and data sections.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::provider::{CapabilityProvider, ToolSpec};
use crate::swarm::agent::{Agent, AgentCore, GenerateOptions};
use crate::swarm::context::{MessageKind, Recipient, SwarmContext};
use crate::swarm::roles::Role;
use crate::swarm::tools::tools_for;

const SYSTEM_PROMPT: &str = include_str!("defaults/security_officer.md");

pub struct SecurityOfficerAgent {
    core: AgentCore,
}

impl SecurityOfficerAgent {
    pub fn new(
        ctx: &Arc<SwarmContext>,
        provider: Arc<dyn CapabilityProvider>,
        model: Option<&str>,
    ) -> Self {
        Self {
            core: AgentCore::new(Role::SecurityOfficer, ctx, provider, model),
        }
    }
}

#[async_trait]
impl Agent for SecurityOfficerAgent {
    fn role(&self) -> Role {
        Role::SecurityOfficer
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn tools(&self) -> Vec<ToolSpec> {
        tools_for(Role::SecurityOfficer)
    }

    async fn execute(&mut self) -> Result<String> {
        self.core.set_working("Assessing security requirements");

        let auth = self.core.context().brief.backend.auth.label();
        let prompt = format!(
            "{}\n{}\n\n\
             Create the **Security, Privacy & Compliance** section for the PRD.\n\n\
             Include:\n\
             1. **Authentication & Authorization** - Strategy: {auth}\n\
             2. **Session Management** - How sessions work across RSC/Server Actions\n\
             3. **Threat Model** - OWASP Top 10 considerations + AI-specific risks\n\
             4. **Secrets Management** - API keys, tokens, rotation policy\n\
             5. **Rate Limiting** - Abuse prevention and quotas\n\
             6. **Audit Logging** - What to log for security monitoring\n\
             7. **AI Security** - Prompt injection, data leakage, jailbreaking\n\
             8. **Compliance** - GDPR, PII handling, data retention\n\
             9. **Incident Response** - Playbook for security events\n\n\
             Be specific about security controls and their implementation.",
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
            "Security assessment complete",
            None,
        );

        Ok(output)
    }
}
