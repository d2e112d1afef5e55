//! # Project Brief
//!
//! The structured questionnaire payload that drives a generation run.
//! The swarm reads these fields but never validates them — the brief is
//! owned by the caller, the core only needs a handful of presence checks
//! (e.g. "is an AI SDK in play") to steer prompt assembly.

use serde::{Deserialize, Serialize};

/// Application framework chosen in the brief
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrameworkChoice {
    #[default]
    NextjsApp,
    Remix,
    Sveltekit,
    Astro,
    Express,
    Other,
}

impl FrameworkChoice {
    /// Human-readable label used in prompt assembly
    pub fn label(&self) -> &'static str {
        match self {
            FrameworkChoice::NextjsApp => "Next.js 15 (App Router)",
            FrameworkChoice::Remix => "Remix",
            FrameworkChoice::Sveltekit => "SvelteKit",
            FrameworkChoice::Astro => "Astro",
            FrameworkChoice::Express => "Express",
            FrameworkChoice::Other => "other",
        }
    }
}

/// Database selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DbChoice {
    #[default]
    None,
    Supabase,
    Firebase,
    Planetscale,
    Neon,
    Sqlite,
    Other,
}

impl DbChoice {
    pub fn label(&self) -> &'static str {
        match self {
            DbChoice::None => "none",
            DbChoice::Supabase => "Supabase",
            DbChoice::Firebase => "Firebase",
            DbChoice::Planetscale => "PlanetScale",
            DbChoice::Neon => "Neon",
            DbChoice::Sqlite => "SQLite",
            DbChoice::Other => "other",
        }
    }
}

/// Authentication strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthChoice {
    #[default]
    None,
    SupabaseAuth,
    Authjs,
    Clerk,
    Other,
}

impl AuthChoice {
    pub fn label(&self) -> &'static str {
        match self {
            AuthChoice::None => "none",
            AuthChoice::SupabaseAuth => "Supabase Auth",
            AuthChoice::Authjs => "Auth.js",
            AuthChoice::Clerk => "Clerk",
            AuthChoice::Other => "other",
        }
    }
}

/// IDE copilot the user works with (drives the MCP guide)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdeCopilot {
    Windsurf,
    Cursor,
    VscodeCopilot,
    ClaudeCode,
    Cline,
    Other,
    #[default]
    None,
}

impl IdeCopilot {
    pub fn label(&self) -> &'static str {
        match self {
            IdeCopilot::Windsurf => "Windsurf",
            IdeCopilot::Cursor => "Cursor",
            IdeCopilot::VscodeCopilot => "VS Code Copilot",
            IdeCopilot::ClaudeCode => "Claude Code",
            IdeCopilot::Cline => "Cline",
            IdeCopilot::Other => "other",
            IdeCopilot::None => "none",
        }
    }
}

/// Unit test runner choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UnitRunner {
    Jest,
    #[default]
    Vitest,
    None,
}

impl UnitRunner {
    pub fn label(&self) -> &'static str {
        match self {
            UnitRunner::Jest => "Jest",
            UnitRunner::Vitest => "Vitest",
            UnitRunner::None => "none",
        }
    }
}

/// End-to-end test runner choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum E2eRunner {
    Cypress,
    #[default]
    Playwright,
    None,
}

impl E2eRunner {
    pub fn label(&self) -> &'static str {
        match self {
            E2eRunner::Cypress => "Cypress",
            E2eRunner::Playwright => "Playwright",
            E2eRunner::None => "none",
        }
    }
}

/// Styling selections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylingChoices {
    pub tailwind: bool,
    pub shadcn: bool,
    #[serde(default)]
    pub other: Option<String>,
}

impl Default for StylingChoices {
    fn default() -> Self {
        Self {
            tailwind: true,
            shadcn: true,
            other: None,
        }
    }
}

impl StylingChoices {
    /// Comma-joined summary, "basic CSS" when nothing was picked
    pub fn summary(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if self.tailwind {
            parts.push("Tailwind CSS v4");
        }
        if self.shadcn {
            parts.push("shadcn/ui");
        }
        if let Some(other) = self.other.as_deref() {
            parts.push(other);
        }
        if parts.is_empty() {
            "basic CSS".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Backend/infra selections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendChoices {
    pub use_vercel: bool,
    #[serde(default)]
    pub db: DbChoice,
    #[serde(default)]
    pub auth: AuthChoice,
}

impl Default for BackendChoices {
    fn default() -> Self {
        Self {
            use_vercel: true,
            db: DbChoice::None,
            auth: AuthChoice::None,
        }
    }
}

/// AI-related selections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiChoices {
    /// Whether the target app will use an AI SDK at all
    pub use_ai_sdk: bool,
    /// Model identifiers the target app plans to call
    #[serde(default)]
    pub app_models: Vec<String>,
    #[serde(default)]
    pub copilot: IdeCopilot,
}

impl Default for AiChoices {
    fn default() -> Self {
        Self {
            use_ai_sdk: true,
            app_models: Vec::new(),
            copilot: IdeCopilot::None,
        }
    }
}

impl AiChoices {
    pub fn app_models_summary(&self) -> String {
        if self.app_models.is_empty() {
            "TBD".to_string()
        } else {
            self.app_models.join(", ")
        }
    }
}

/// Testing selections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestingChoices {
    pub enabled: bool,
    #[serde(default)]
    pub unit: UnitRunner,
    #[serde(default)]
    pub e2e: E2eRunner,
}

impl Default for TestingChoices {
    fn default() -> Self {
        Self {
            enabled: true,
            unit: UnitRunner::Vitest,
            e2e: E2eRunner::Playwright,
        }
    }
}

/// Per-role toggle map for the eight worker agents.
///
/// Absent from the brief means "all selected"; the orchestrator itself is
/// never toggled off.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSelection {
    pub market_analyst: bool,
    pub scope_planner: bool,
    pub stack_architect: bool,
    pub ai_designer: bool,
    pub data_api_designer: bool,
    pub security_officer: bool,
    pub performance_engineer: bool,
    pub quality_lead: bool,
}

impl Default for AgentSelection {
    fn default() -> Self {
        Self {
            market_analyst: true,
            scope_planner: true,
            stack_architect: true,
            ai_designer: true,
            data_api_designer: true,
            security_officer: true,
            performance_engineer: true,
            quality_lead: true,
        }
    }
}

impl AgentSelection {
    /// A selection with every worker toggled off (useful as a base)
    pub fn none() -> Self {
        Self {
            market_analyst: false,
            scope_planner: false,
            stack_architect: false,
            ai_designer: false,
            data_api_designer: false,
            security_officer: false,
            performance_engineer: false,
            quality_lead: false,
        }
    }
}

/// The complete project brief driving one generation run.
///
/// Opaque to the orchestration core: it is read for prompt assembly and a
/// few branch decisions, never validated or mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectBrief {
    /// Free-text idea description
    pub idea: String,
    #[serde(default)]
    pub framework: FrameworkChoice,
    #[serde(default)]
    pub styling: StylingChoices,
    #[serde(default)]
    pub backend: BackendChoices,
    #[serde(default)]
    pub ai: AiChoices,
    #[serde(default)]
    pub testing: TestingChoices,
    /// Per-role selection; `None` means all eight workers run
    #[serde(default)]
    pub agents: Option<AgentSelection>,
    /// Free-text constraints (perf, accessibility, compliance, ...)
    #[serde(default)]
    pub constraints: Option<String>,
    /// Override model id for document generation
    #[serde(default)]
    pub model: Option<String>,
}

impl ProjectBrief {
    /// A brief with sensible defaults around an idea description
    pub fn new(idea: impl Into<String>) -> Self {
        Self {
            idea: idea.into(),
            framework: FrameworkChoice::default(),
            styling: StylingChoices::default(),
            backend: BackendChoices::default(),
            ai: AiChoices::default(),
            testing: TestingChoices::default(),
            agents: None,
            constraints: None,
            model: None,
        }
    }

    /// Render the shared "Project Context" block embedded in every
    /// agent prompt.
    pub fn context_block(&self) -> String {
        let ai_line = if self.ai.use_ai_sdk {
            format!("AI SDK (models: {})", self.ai.app_models_summary())
        } else {
            "TBD".to_string()
        };

        format!(
            "## Project Context\n\
             **Idea:** {}\n\n\
             **Tech Stack:**\n\
             - Framework: {}\n\
             - Styling: {}\n\
             - Backend: {}\n\
             - Database: {}\n\
             - Auth: {}\n\
             - AI: {}\n\
             - IDE/Copilot: {}\n\n\
             **Testing:**\n\
             - Unit: {}\n\
             - E2E: {}\n\n\
             **Constraints:** {}\n",
            self.idea.trim(),
            self.framework.label(),
            self.styling.summary(),
            if self.backend.use_vercel { "Vercel" } else { "Custom" },
            self.backend.db.label(),
            self.backend.auth.label(),
            ai_line,
            self.ai.copilot.label(),
            self.testing.unit.label(),
            self.testing.e2e.label(),
            self.constraints.as_deref().unwrap_or("None specified"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_block_contains_stack() {
        let brief = ProjectBrief::new("A changelog generator for monorepos");
        let block = brief.context_block();
        assert!(block.contains("A changelog generator for monorepos"));
        assert!(block.contains("Next.js 15 (App Router)"));
        assert!(block.contains("Tailwind CSS v4, shadcn/ui"));
        assert!(block.contains("None specified"));
    }

    #[test]
    fn test_styling_summary_falls_back_to_basic_css() {
        let styling = StylingChoices {
            tailwind: false,
            shadcn: false,
            other: None,
        };
        assert_eq!(styling.summary(), "basic CSS");
    }

    #[test]
    fn test_brief_round_trips_through_json() {
        let mut brief = ProjectBrief::new("idea");
        brief.backend.db = DbChoice::Neon;
        brief.agents = Some(AgentSelection::none());
        let json = serde_json::to_string(&brief).expect("serialize");
        let back: ProjectBrief = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.backend.db, DbChoice::Neon);
        assert!(!back.agents.expect("selection").market_analyst);
    }

    #[test]
    fn test_selection_defaults_to_all_enabled() {
        let sel = AgentSelection::default();
        assert!(sel.market_analyst && sel.quality_lead);
    }
}
