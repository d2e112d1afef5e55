//! # Specialist Agents
//!
//! One file per worker role, each carrying its persona prompt from
//! `defaults/` and its section-specific task prompt. [`for_role`] is
//! the factory the orchestrator uses to instantiate the selected set.

pub mod ai_designer;
pub mod data_api_designer;
pub mod market_analyst;
pub mod performance_engineer;
pub mod quality_lead;
pub mod scope_planner;
pub mod security_officer;
pub mod stack_architect;

pub use ai_designer::AiDesignerAgent;
pub use data_api_designer::DataApiDesignerAgent;
pub use market_analyst::MarketAnalystAgent;
pub use performance_engineer::PerformanceEngineerAgent;
pub use quality_lead::QualityLeadAgent;
pub use scope_planner::ScopePlannerAgent;
pub use security_officer::SecurityOfficerAgent;
pub use stack_architect::StackArchitectAgent;

use std::sync::Arc;

use crate::provider::CapabilityProvider;
use crate::swarm::agent::Agent;
use crate::swarm::context::SwarmContext;
use crate::swarm::roles::Role;

/// Instantiate the specialist for a worker role. The orchestrator has
/// no specialist of its own, so it maps to `None`.
pub fn for_role(
    role: Role,
    ctx: &Arc<SwarmContext>,
    provider: Arc<dyn CapabilityProvider>,
    model: Option<&str>,
) -> Option<Box<dyn Agent>> {
    let agent: Box<dyn Agent> = match role {
        Role::Orchestrator => return None,
        Role::MarketAnalyst => Box::new(MarketAnalystAgent::new(ctx, provider, model)),
        Role::ScopePlanner => Box::new(ScopePlannerAgent::new(ctx, provider, model)),
        Role::StackArchitect => Box::new(StackArchitectAgent::new(ctx, provider, model)),
        Role::AiDesigner => Box::new(AiDesignerAgent::new(ctx, provider, model)),
        Role::DataApiDesigner => Box::new(DataApiDesignerAgent::new(ctx, provider, model)),
        Role::SecurityOfficer => Box::new(SecurityOfficerAgent::new(ctx, provider, model)),
        Role::PerformanceEngineer => Box::new(PerformanceEngineerAgent::new(ctx, provider, model)),
        Role::QualityLead => Box::new(QualityLeadAgent::new(ctx, provider, model)),
    };
    Some(agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::ProjectBrief;
    use crate::provider::testing::MockProvider;
    use crate::swarm::context::AgentStatus;

    #[test]
    fn test_factory_covers_every_worker() {
        let ctx = SwarmContext::new(ProjectBrief::new("idea"), None, None);
        assert!(for_role(Role::Orchestrator, &ctx, MockProvider::echo(), None).is_none());
        for role in Role::WORKERS {
            let agent = for_role(role, &ctx, MockProvider::echo(), None).expect("worker agent");
            assert_eq!(agent.role(), role);
            assert!(!agent.system_prompt().is_empty());
        }
    }

    #[tokio::test]
    async fn test_ai_designer_short_circuits_without_sdk() {
        let mut brief = ProjectBrief::new("a static docs site");
        brief.ai.use_ai_sdk = false;
        let ctx = SwarmContext::new(brief, None, None);
        let provider = MockProvider::echo();
        let mut agent = AiDesignerAgent::new(&ctx, Arc::clone(&provider) as _, None);

        let output = agent.execute().await.expect("short circuit");
        assert_eq!(output, ai_designer::NO_AI_SDK_SECTION);
        assert_eq!(provider.call_count(), 0);
        assert_eq!(ctx.section(Role::AiDesigner), Some(ai_designer::NO_AI_SDK_SECTION));
        assert_eq!(ctx.agent_state(Role::AiDesigner).status, AgentStatus::Completed);
    }

    #[tokio::test]
    async fn test_quality_lead_prompt_branches_on_testing() {
        let mut brief = ProjectBrief::new("idea");
        brief.testing.enabled = false;
        let ctx = SwarmContext::new(brief, None, None);
        let provider = MockProvider::echo();
        let mut agent = QualityLeadAgent::new(&ctx, Arc::clone(&provider) as _, None);
        agent.execute().await.expect("execute");

        let requests = provider.requests();
        let prompt = &requests[0].messages[0].content;
        assert!(prompt.contains("Testing is **deferred**"));
        assert!(prompt.contains("Manual Testing Checklist"));
        assert!(prompt.contains("Jest/Vitest"));
        assert!(!prompt.contains("Coverage expectations"));

        let ctx2 = SwarmContext::new(ProjectBrief::new("idea"), None, None);
        let provider2 = MockProvider::echo();
        let mut agent2 = QualityLeadAgent::new(&ctx2, Arc::clone(&provider2) as _, None);
        agent2.execute().await.expect("execute");
        let prompt2 = provider2.requests()[0].messages[0].content.clone();
        assert!(prompt2.contains("Unit tests: Vitest"));
        assert!(prompt2.contains("E2E tests: Playwright"));
        assert!(!prompt2.contains("deferred"));
    }

    #[tokio::test]
    async fn test_scope_planner_embeds_market_output() {
        let ctx = SwarmContext::new(ProjectBrief::new("idea"), None, None);
        ctx.slot(Role::MarketAnalyst).store("solo devs need this");
        let provider = MockProvider::echo();
        let mut agent = ScopePlannerAgent::new(&ctx, Arc::clone(&provider) as _, None);
        agent.execute().await.expect("execute");

        let prompt = provider.requests()[0].messages[0].content.clone();
        assert!(prompt.contains("## Project Context"));
        assert!(prompt.contains("## Dev Market & Persona Analyst Output:"));
        assert!(prompt.contains("solo devs need this"));
    }

    #[tokio::test]
    async fn test_data_designer_names_database_choice() {
        let mut brief = ProjectBrief::new("idea");
        brief.backend.db = crate::brief::DbChoice::Neon;
        let ctx = SwarmContext::new(brief, None, None);
        let provider = MockProvider::echo();
        let mut agent = DataApiDesignerAgent::new(&ctx, Arc::clone(&provider) as _, None);
        agent.execute().await.expect("execute");

        let prompt = provider.requests()[0].messages[0].content.clone();
        assert!(prompt.contains("Use the database choice: Neon"));
    }
}
