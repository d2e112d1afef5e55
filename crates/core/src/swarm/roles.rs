//! # Roles & Capability Registry
//!
//! The closed set of nine agent specializations and the static metadata
//! describing each one. The registry is pure data: the orchestrator uses
//! the dependency edges for wave planning, agents use the display names
//! when rendering dependency context. Adding a role means adding an enum
//! variant, which forces every dispatch site in the crate to be updated.

use serde::{Deserialize, Serialize};

/// One of the nine fixed agent specializations
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Orchestrator,
    MarketAnalyst,
    ScopePlanner,
    StackArchitect,
    AiDesigner,
    DataApiDesigner,
    SecurityOfficer,
    PerformanceEngineer,
    QualityLead,
}

/// Static, queryable metadata for one role. Pure data, no behavior.
#[derive(Debug, Clone, Serialize)]
pub struct Capability {
    pub role: Role,
    /// Display name used in prompts and summaries
    pub name: &'static str,
    pub description: &'static str,
    /// Documentation of what the role covers; not used for dispatch
    pub responsibilities: &'static [&'static str],
    pub outputs: &'static [&'static str],
    /// Prerequisite roles; edges of the scheduling DAG
    pub dependencies: &'static [Role],
    /// Names of the schema-only tools declared for this role
    pub tools: &'static [&'static str],
}

/// The eight worker roles in canonical compilation order.
///
/// Curated editorially, independent of the dependency DAG; a registry
/// test pins the two against each other so drift is caught.
pub const COMPILE_ORDER: [Role; 8] = [
    Role::MarketAnalyst,
    Role::ScopePlanner,
    Role::StackArchitect,
    Role::AiDesigner,
    Role::DataApiDesigner,
    Role::SecurityOfficer,
    Role::PerformanceEngineer,
    Role::QualityLead,
];

static ORCHESTRATOR: Capability = Capability {
    role: Role::Orchestrator,
    name: "PRD Orchestrator",
    description: "Editor-in-Chief that aligns the swarm and compiles the final PRD",
    responsibilities: &[
        "Create PRD outline and structure",
        "Coordinate agent execution order",
        "Resolve conflicts between agents",
        "Enforce scope boundaries",
        "Compile final PRD document",
    ],
    outputs: &["PRD outline", "Final PRD", "Conflict resolutions"],
    dependencies: &[],
    tools: &[],
};

static MARKET_ANALYST: Capability = Capability {
    role: Role::MarketAnalyst,
    name: "Dev Market & Persona Analyst",
    description: "Builds the who/why for a dev audience",
    responsibilities: &[
        "Segment developer personas",
        "Map pains and jobs-to-be-done",
        "Competitive analysis",
        "Value proposition",
        "TAM/SAM/SOM estimates",
    ],
    outputs: &[
        "Personas",
        "Problem statement",
        "Value prop",
        "Competitive analysis",
        "Market sizing",
    ],
    dependencies: &[Role::Orchestrator],
    tools: &[
        "research_section",
        "handoff",
        "validate_section",
        "analyze_competitors",
        "define_personas",
    ],
};

static SCOPE_PLANNER: Capability = Capability {
    role: Role::ScopePlanner,
    name: "Use-Case & Scope Planner",
    description: "Turns insights into prioritized work using JTBD methodology",
    responsibilities: &[
        "Write job stories",
        "Define user journeys",
        "Set success criteria",
        "Prioritize with RICE/MoSCoW",
        "Define MVP vs v1/vNext",
        "Document anti-goals",
    ],
    outputs: &[
        "Job stories",
        "Feature list",
        "Acceptance criteria",
        "Priorities",
        "Risks",
    ],
    dependencies: &[Role::Orchestrator, Role::MarketAnalyst],
    tools: &[
        "research_section",
        "handoff",
        "validate_section",
        "create_job_stories",
        "prioritize_features",
    ],
};

static STACK_ARCHITECT: Capability = Capability {
    role: Role::StackArchitect,
    name: "Next.js 15 System Architect",
    description: "Owns the technical spine for Next.js applications",
    responsibilities: &[
        "Choose rendering strategies per route",
        "Define Server Actions usage",
        "Select Edge vs Node runtimes",
        "Design folder topology",
        "Plan caching and invalidation",
        "Set bundling strategy",
        "Define env & secrets management",
    ],
    outputs: &[
        "Architecture diagram",
        "Route tree",
        "Performance budgets",
        "Dependency list",
    ],
    dependencies: &[Role::Orchestrator, Role::ScopePlanner],
    tools: &[
        "research_section",
        "handoff",
        "validate_section",
        "design_routes",
        "plan_caching",
    ],
};

static AI_DESIGNER: Capability = Capability {
    role: Role::AiDesigner,
    name: "AI Interaction Designer",
    description: "Designs AI features and agent UX",
    responsibilities: &[
        "Define conversation patterns",
        "Design tool/command schemas",
        "Plan retrieval/memory approach",
        "Specify streaming UX",
        "Handle error states",
        "Set model policies",
        "Define token/latency budgets",
        "Create safety prompts",
        "Design eval goals",
    ],
    outputs: &[
        "Interaction flows",
        "Tool specs",
        "Eval goals",
        "Telemetry requirements",
    ],
    dependencies: &[Role::Orchestrator, Role::ScopePlanner, Role::StackArchitect],
    tools: &[
        "research_section",
        "handoff",
        "validate_section",
        "define_ai_tools",
        "design_conversation",
    ],
};

static DATA_API_DESIGNER: Capability = Capability {
    role: Role::DataApiDesigner,
    name: "Data, API & Extensibility Designer",
    description: "Specifies data contracts and future-proofing",
    responsibilities: &[
        "Choose data stores",
        "Design migration approach",
        "Draft ERD/schema",
        "Specify API contracts",
        "Plan webhooks/events",
        "Define extension points",
        "Version APIs",
        "Multi-tenant considerations",
    ],
    outputs: &[
        "Data model",
        "API spec",
        "Versioning policy",
        "Multi-tenant plan",
    ],
    dependencies: &[Role::Orchestrator, Role::ScopePlanner, Role::StackArchitect],
    tools: &["research_section", "handoff", "validate_section"],
};

static SECURITY_OFFICER: Capability = Capability {
    role: Role::SecurityOfficer,
    name: "Security, Privacy & Trust Officer",
    description: "Prevents security incidents and ensures compliance",
    responsibilities: &[
        "Design AuthN/AuthZ",
        "Plan session strategy",
        "Create threat model",
        "Handle secrets & key rotation",
        "Implement rate limiting",
        "Setup audit logging",
        "Address AI-specific risks",
        "Ensure GDPR/PII compliance",
    ],
    outputs: &[
        "Security requirements",
        "Threat model",
        "Compliance notes",
        "Incident playbook",
    ],
    dependencies: &[
        Role::Orchestrator,
        Role::StackArchitect,
        Role::AiDesigner,
        Role::DataApiDesigner,
    ],
    tools: &[
        "research_section",
        "handoff",
        "validate_section",
        "assess_threats",
    ],
};

static PERFORMANCE_ENGINEER: Capability = Capability {
    role: Role::PerformanceEngineer,
    name: "Performance & Observability Engineer",
    description: "Makes it fast and proves it with metrics",
    responsibilities: &[
        "Define SLIs/SLOs",
        "Set performance budgets",
        "Plan caching strategy",
        "Optimize images/assets",
        "Design streaming approach",
        "Setup observability",
        "Configure monitoring",
        "Define alert thresholds",
    ],
    outputs: &[
        "Performance plan",
        "Observability setup",
        "Budgets",
        "Acceptance gates",
    ],
    dependencies: &[Role::Orchestrator, Role::StackArchitect, Role::AiDesigner],
    tools: &[
        "research_section",
        "handoff",
        "validate_section",
        "define_metrics",
    ],
};

static QUALITY_LEAD: Capability = Capability {
    role: Role::QualityLead,
    name: "Quality, Rollout & Docs Lead",
    description: "Ensures it ships and people can use it",
    responsibilities: &[
        "Create test plan",
        "Design AI eval sets",
        "Plan load tests",
        "Define release strategy",
        "Setup feature flags",
        "Plan canary rollout",
        "Write developer docs",
        "Create examples",
        "Document APIs",
    ],
    outputs: &[
        "Test plan",
        "Release checklist",
        "Documentation outline",
        "Definition of done",
    ],
    dependencies: &[Role::Orchestrator, Role::AiDesigner, Role::PerformanceEngineer],
    tools: &[
        "research_section",
        "handoff",
        "validate_section",
        "create_test_plan",
    ],
};

impl Role {
    /// The eight worker roles (everything but the orchestrator)
    pub const WORKERS: [Role; 8] = COMPILE_ORDER;

    /// Kebab-case identifier, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Orchestrator => "orchestrator",
            Role::MarketAnalyst => "market-analyst",
            Role::ScopePlanner => "scope-planner",
            Role::StackArchitect => "stack-architect",
            Role::AiDesigner => "ai-designer",
            Role::DataApiDesigner => "data-api-designer",
            Role::SecurityOfficer => "security-officer",
            Role::PerformanceEngineer => "performance-engineer",
            Role::QualityLead => "quality-lead",
        }
    }

    /// Registry lookup; total over the closed role set.
    pub fn capability(&self) -> &'static Capability {
        match self {
            Role::Orchestrator => &ORCHESTRATOR,
            Role::MarketAnalyst => &MARKET_ANALYST,
            Role::ScopePlanner => &SCOPE_PLANNER,
            Role::StackArchitect => &STACK_ARCHITECT,
            Role::AiDesigner => &AI_DESIGNER,
            Role::DataApiDesigner => &DATA_API_DESIGNER,
            Role::SecurityOfficer => &SECURITY_OFFICER,
            Role::PerformanceEngineer => &PERFORMANCE_ENGINEER,
            Role::QualityLead => &QUALITY_LEAD,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.capability().name
    }

    pub fn is_worker(&self) -> bool {
        *self != Role::Orchestrator
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orchestrator" => Ok(Role::Orchestrator),
            "market-analyst" => Ok(Role::MarketAnalyst),
            "scope-planner" => Ok(Role::ScopePlanner),
            "stack-architect" => Ok(Role::StackArchitect),
            "ai-designer" => Ok(Role::AiDesigner),
            "data-api-designer" => Ok(Role::DataApiDesigner),
            "security-officer" => Ok(Role::SecurityOfficer),
            "performance-engineer" => Ok(Role::PerformanceEngineer),
            "quality-lead" => Ok(Role::QualityLead),
            other => Err(format!("unknown role: {other}")),
        }
    }
}
