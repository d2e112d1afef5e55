//! # Agent Tools
//!
//! Schema-only tool declarations per role. These exist to let the model
//! structure its intermediate reasoning during multi-step generation;
//! the capability provider answers every call by echoing the arguments
//! back. Input shapes are plain structs so the JSON schemas come from
//! the `JsonSchema` derive instead of hand-written JSON.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::provider::ToolSpec;
use crate::swarm::roles::Role;

/// Input for researching one PRD section
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ResearchSectionInput {
    /// Name of the PRD section to research
    pub section: String,
    /// Specific aspects to focus on
    pub focus: String,
    /// Additional context from previous agents
    pub context: Option<String>,
}

/// Input for handing work to another agent
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HandoffInput {
    /// Target agent role to hand off to
    pub to_agent: Role,
    /// Message for the target agent
    pub message: String,
}

/// Input for validating a drafted section
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ValidateSectionInput {
    /// Section name to validate
    pub section: String,
    /// Content to validate
    pub content: String,
    /// Validation criteria
    pub criteria: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeCompetitorsInput {
    pub product_category: String,
    pub target_audience: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DefinePersonasInput {
    pub audience: String,
    pub pain_points: Vec<String>,
    pub goals: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateJobStoriesInput {
    pub persona: String,
    pub situation: String,
    pub motivation: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PrioritizeFeaturesInput {
    pub features: Vec<String>,
    /// Prioritization framework, e.g. RICE or MoSCoW
    pub framework: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DesignRoutesInput {
    pub pages: Vec<String>,
    pub rendering_preferences: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PlanCachingInput {
    pub routes: Vec<String>,
    pub update_frequency: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DefineAiToolsInput {
    pub tool_name: String,
    pub purpose: String,
    pub inputs: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DesignConversationInput {
    pub user_goal: String,
    pub steps: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AssessThreatsInput {
    pub features: Vec<String>,
    pub data_types: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DefineMetricsInput {
    pub routes: Vec<String>,
    /// Metric categories, e.g. web vitals, API latency
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateTestPlanInput {
    pub critical_paths: Vec<String>,
    pub test_levels: Vec<String>,
}

/// Tools every worker role can call
fn common_tools() -> Vec<ToolSpec> {
    vec![
        ToolSpec::of::<ResearchSectionInput>(
            "research_section",
            "Research and draft content for a specific PRD section.",
        ),
        ToolSpec::of::<HandoffInput>(
            "handoff",
            "Hand off work to another agent once your section is done.",
        ),
        ToolSpec::of::<ValidateSectionInput>(
            "validate_section",
            "Validate drafted content for completeness and consistency.",
        ),
    ]
}

/// The declared tool set for a role. Exhaustive over the closed role
/// set; the orchestrator declares none (it manages agents, it does not
/// reason through tools).
pub fn tools_for(role: Role) -> Vec<ToolSpec> {
    let mut tools = match role {
        Role::Orchestrator => return Vec::new(),
        _ => common_tools(),
    };
    match role {
        Role::Orchestrator => unreachable!("handled above"),
        Role::MarketAnalyst => {
            tools.push(ToolSpec::of::<AnalyzeCompetitorsInput>(
                "analyze_competitors",
                "Analyze the competitive landscape for similar products.",
            ));
            tools.push(ToolSpec::of::<DefinePersonasInput>(
                "define_personas",
                "Create detailed developer personas from research.",
            ));
        }
        Role::ScopePlanner => {
            tools.push(ToolSpec::of::<CreateJobStoriesInput>(
                "create_job_stories",
                "Generate job stories in JTBD format.",
            ));
            tools.push(ToolSpec::of::<PrioritizeFeaturesInput>(
                "prioritize_features",
                "Prioritize features using RICE or MoSCoW.",
            ));
        }
        Role::StackArchitect => {
            tools.push(ToolSpec::of::<DesignRoutesInput>(
                "design_routes",
                "Design the route structure with rendering strategies.",
            ));
            tools.push(ToolSpec::of::<PlanCachingInput>(
                "plan_caching",
                "Design the caching and revalidation strategy.",
            ));
        }
        Role::AiDesigner => {
            tools.push(ToolSpec::of::<DefineAiToolsInput>(
                "define_ai_tools",
                "Define AI tool schemas for the target application.",
            ));
            tools.push(ToolSpec::of::<DesignConversationInput>(
                "design_conversation",
                "Design a conversation flow for an AI interaction.",
            ));
        }
        Role::DataApiDesigner => {}
        Role::SecurityOfficer => {
            tools.push(ToolSpec::of::<AssessThreatsInput>(
                "assess_threats",
                "Perform threat modeling for the application.",
            ));
        }
        Role::PerformanceEngineer => {
            tools.push(ToolSpec::of::<DefineMetricsInput>(
                "define_metrics",
                "Define SLIs/SLOs and performance budgets.",
            ));
        }
        Role::QualityLead => {
            tools.push(ToolSpec::of::<CreateTestPlanInput>(
                "create_test_plan",
                "Create a test plan covering the critical paths.",
            ));
        }
    }
    tools
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_match_registry_declaration() {
        for role in Role::WORKERS {
            let declared: Vec<&str> = role.capability().tools.to_vec();
            let built: Vec<String> = tools_for(role).into_iter().map(|t| t.name).collect();
            assert_eq!(declared, built, "tool mismatch for {role}");
        }
    }

    #[test]
    fn test_orchestrator_declares_no_tools() {
        assert!(tools_for(Role::Orchestrator).is_empty());
        assert!(Role::Orchestrator.capability().tools.is_empty());
    }

    #[test]
    fn test_schemas_are_objects_with_properties() {
        for tool in tools_for(Role::MarketAnalyst) {
            let params = tool.parameters;
            assert!(
                params.get("properties").is_some() || params.get("$ref").is_some(),
                "schema for {} looks empty: {params}",
                tool.name
            );
        }
    }
}
