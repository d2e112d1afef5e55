//! # Data & API Designer

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::provider::{CapabilityProvider, ToolSpec};
use crate::swarm::agent::{Agent, AgentCore, GenerateOptions};
use crate::swarm::context::{MessageKind, Recipient, SwarmContext};
use crate::swarm::roles::Role;
use crate::swarm::tools::tools_for;

const SYSTEM_PROMPT: &str = include_str!("defaults/data_api_designer.md");

pub struct DataApiDesignerAgent {
    core: AgentCore,
}

impl DataApiDesignerAgent {
    pub fn new(
        ctx: &Arc<SwarmContext>,
        provider: Arc<dyn CapabilityProvider>,
        model: Option<&str>,
    ) -> Self {
        Self {
            core: AgentCore::new(Role::DataApiDesigner, ctx, provider, model),
        }
    }
}

#[async_trait]
impl Agent for DataApiDesignerAgent {
    fn role(&self) -> Role {
        Role::DataApiDesigner
    }

    fn system_prompt(&self) -> &'static str {
        SYSTEM_PROMPT
    }

    fn tools(&self) -> Vec<ToolSpec> {
        tools_for(Role::DataApiDesigner)
    }

    async fn execute(&mut self) -> Result<String> {
        self.core.set_working("Designing data model and APIs");

        let db = self.core.context().brief.backend.db.label();
        let prompt = format!(
            "{}\n{}\n\n\
             Create the **Data Model & API Contracts** section for the PRD.\n\n\
             Include:\n\
             1. **Database Schema** - Tables/collections with key fields and relationships\n\
             2. **Migration Strategy** - How to evolve schema over time\n\
             3. **API Design** - Endpoints/queries with request/response formats\n\
             4. **Integration Points** - Webhooks, events, third-party APIs\n\
             5. **Extension Architecture** - How to add plugins/integrations\n\
             6. **Versioning Policy** - How to handle API changes\n\
             7. **Multi-tenant Considerations** - If applicable\n\n\
             Use the database choice: {db}\n\
             Be specific about data types and constraints.",
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
            "Data/API design complete",
            None,
        );

        Ok(output)
    }
}
