//! # Document Synthesis
//!
//! Auxiliary generators that run after the swarm: the implementation
//! guide, the repository operating manual (AGENTS.md), and the MCP
//! configuration guide. Each is a single attributed provider call fed
//! from the brief and the sections a completed run left on the context.

use anyhow::{Context, Result};

use crate::brief::{AuthChoice, DbChoice, IdeCopilot, ProjectBrief};
use crate::provider::{CapabilityProvider, GenerationRequest, DEFAULT_MODEL};
use crate::swarm::context::SwarmContext;
use crate::swarm::roles::Role;

/// Guide body returned when the brief selected no IDE copilot
pub const NO_COPILOT_GUIDE: &str = "# MCP Configuration\n\nMCP is optional. IDE/Copilot not selected.";

fn resolve_model<'a>(model: Option<&'a str>, ctx_model: Option<&'a str>) -> &'a str {
    model.or(ctx_model).unwrap_or(DEFAULT_MODEL)
}

/// The numbered step outline for the implementation guide. Database,
/// auth, and AI SDK steps appear only when the brief opted into them;
/// a deferred-testing brief gets a testing-status step instead of a
/// setup step.
fn implementation_steps(brief: &ProjectBrief) -> Vec<String> {
    let mut steps = Vec::new();
    let mut n = 1;
    let mut push = |steps: &mut Vec<String>, text: String| {
        steps.push(format!("{n}. {text}"));
        n += 1;
    };

    push(
        &mut steps,
        format!(
            "**Project Bootstrap** - Create {} app, add styling",
            brief.framework.label()
        ),
    );
    if brief.backend.db != DbChoice::None {
        push(
            &mut steps,
            "**Database Setup** - Schema, migrations, client setup".to_string(),
        );
    }
    if brief.backend.auth != AuthChoice::None {
        push(
            &mut steps,
            format!("**Authentication** - {} integration", brief.backend.auth.label()),
        );
    }
    if brief.ai.use_ai_sdk {
        push(
            &mut steps,
            "**AI SDK Setup** - Install AI SDK, create API routes, configure Gateway".to_string(),
        );
    }
    if brief.testing.enabled {
        push(
            &mut steps,
            format!(
                "**Testing Setup** - {} + {} configuration, test examples",
                brief.testing.unit.label(),
                brief.testing.e2e.label()
            ),
        );
    } else {
        push(
            &mut steps,
            "**Testing Status** - Document that testing is deferred, manual verification procedures"
                .to_string(),
        );
    }
    push(
        &mut steps,
        format!(
            "**Deployment** - {} setup and env vars",
            if brief.backend.use_vercel { "Vercel" } else { "Host" }
        ),
    );
    push(
        &mut steps,
        format!(
            "**Verification Checklist** - Final {} launch",
            if brief.testing.enabled {
                "automated tests and"
            } else {
                "manual checks before"
            }
        ),
    );

    steps
}

/// Generate a step-by-step IMPLEMENTATION.md from a completed run.
pub async fn generate_implementation_guide(
    ctx: &SwarmContext,
    provider: &dyn CapabilityProvider,
    model: Option<&str>,
) -> Result<String> {
    let brief = &ctx.brief;
    let architect = ctx.section(Role::StackArchitect).unwrap_or_default();
    let quality = ctx.section(Role::QualityLead).unwrap_or_default();
    let ai = ctx.section(Role::AiDesigner).unwrap_or_default();

    let brief_json =
        serde_json::to_string_pretty(brief).context("failed to serialize the brief")?;
    let ai_block = if brief.ai.use_ai_sdk {
        format!("## AI Integration Plan\n{ai}\n\n")
    } else {
        String::new()
    };
    let testing_note = if brief.testing.enabled {
        "Be specific with test setup, include example tests, and show how to run them."
    } else {
        "IMPORTANT: Testing is DEFERRED. Be explicit about this limitation and provide manual \
         testing procedures instead of automated test setup."
    };

    let prompt = format!(
        "Create a step-by-step **IMPLEMENTATION.md** guide for this project.\n\n\
         ## Project Context\n{brief_json}\n\n\
         ## Architecture Plan\n{architect}\n\n\
         ## Testing & Rollout Plan\n{quality}\n\n\
         {ai_block}\
         Create a numbered, actionable implementation plan that:\n\
         1. Starts from an empty IDE/terminal\n\
         2. Includes exact commands with latest package versions\n\
         3. Shows folder structure at each step\n\
         4. Includes code snippets for key files\n\
         5. Has verification steps after each major section\n\
         6. Lists common pitfalls and solutions\n\n\
         Sections:\n{steps}\n\n\
         {testing_note}\n\n\
         Be specific with versions and commands. Include troubleshooting tips.",
        steps = implementation_steps(brief).join("\n"),
    );

    let request = GenerationRequest::from_prompt(
        resolve_model(model, ctx.model.as_deref()),
        prompt,
    )
    .with_user(Some(ctx.user_id.as_deref().unwrap_or("anon")))
    .with_tags(["implementation"]);

    provider
        .generate(request)
        .await
        .context("failed to generate the implementation guide")
}

/// Generate an AGENTS.md repository operating manual from a completed
/// run. The testing section swaps between guidelines and an explicit
/// deferred-testing status depending on the brief.
pub async fn generate_agents_guide(
    ctx: &SwarmContext,
    provider: &dyn CapabilityProvider,
    model: Option<&str>,
) -> Result<String> {
    let brief = &ctx.brief;
    let architect = ctx.section(Role::StackArchitect).unwrap_or_default();
    let quality = ctx.section(Role::QualityLead).unwrap_or_default();
    let brief_json =
        serde_json::to_string_pretty(brief).context("failed to serialize the brief")?;

    let testing_section = if brief.testing.enabled {
        format!(
            "## Testing Guidelines\n\
             How to run tests ({} + {}), what to test, coverage expectations.",
            brief.testing.unit.label(),
            brief.testing.e2e.label()
        )
    } else {
        "## Testing Status\n\
         Explicitly state that automated testing is NOT included in this project. Document \
         manual verification procedures and recommend adding testing in future iterations."
            .to_string()
    };
    let commands = if brief.testing.enabled {
        "install, dev, build, test, deploy"
    } else {
        "install, dev, build, deploy"
    };
    let deferred_note = if brief.testing.enabled {
        ""
    } else {
        "\nIMPORTANT: Be clear that testing is deferred - do not include test commands or \
         test-related setup instructions."
    };

    let prompt = format!(
        "Create an **AGENTS.md** file following the agents.md specification.\n\n\
         ## Project Context\n{brief_json}\n\n\
         ## Architecture\n{architect}\n\n\
         ## Testing Plan\n{quality}\n\n\
         Create a concise guide with these sections:\n\n\
         # Repository Guidelines\n\n\
         ## Project Structure & Module Organization\n\
         Explain folder layout, where files belong, conventions.\n\n\
         ## Build, Test & Development Commands\n\
         Exact commands to {commands}.\n\n\
         ## Coding Style & Naming Conventions\n\
         TypeScript settings, formatting, naming, path aliases.\n\n\
         {testing_section}\n\n\
         ## Commit & Pull Request Guidelines\n\
         Commit message format, PR requirements, review process.\n\n\
         ## Security & Configuration Tips\n\
         Env vars, secrets management, security best practices.\n\n\
         Keep it practical and tool-focused. This is for AI agents and developers.{deferred_note}",
    );

    let request = GenerationRequest::from_prompt(
        resolve_model(model, ctx.model.as_deref()),
        prompt,
    )
    .with_user(Some(ctx.user_id.as_deref().unwrap_or("anon")))
    .with_tags(["agents-guide"]);

    provider
        .generate(request)
        .await
        .context("failed to generate the agents guide")
}

/// Generate a short MCP configuration guide for the brief's IDE
/// copilot. Returns a fixed stub without calling the provider when no
/// copilot was selected.
pub async fn generate_mcp_guide(
    brief: &ProjectBrief,
    provider: &dyn CapabilityProvider,
    model: Option<&str>,
    user_id: Option<&str>,
) -> Result<String> {
    if brief.ai.copilot == IdeCopilot::None {
        return Ok(NO_COPILOT_GUIDE.to_string());
    }

    let copilot = brief.ai.copilot.label();
    let prompt = format!(
        "Create a brief **MCP.md** guide for {copilot}.\n\n\
         Explain:\n\
         1. What MCP is and why it's useful\n\
         2. How to configure MCP in {copilot}\n\
         3. 2-3 recommended MCP servers for this project type\n\
         4. Example configuration snippets\n\
         5. Links to official docs\n\n\
         Keep it concise and practical. Focus on getting started quickly."
    );

    let request = GenerationRequest::from_prompt(resolve_model(model, brief.model.as_deref()), prompt)
        .with_user(Some(user_id.unwrap_or("anon")))
        .with_tags(["mcp"]);

    provider
        .generate(request)
        .await
        .context("failed to generate the MCP guide")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::MockProvider;

    #[test]
    fn test_steps_renumber_around_skipped_sections() {
        // Default brief: no db, no auth, AI on, testing on.
        let brief = ProjectBrief::new("idea");
        let steps = implementation_steps(&brief);
        assert_eq!(steps.len(), 5);
        assert!(steps[0].starts_with("1. **Project Bootstrap**"));
        assert!(steps[1].starts_with("2. **AI SDK Setup**"));
        assert!(steps[2].starts_with("3. **Testing Setup** - Vitest + Playwright"));
        assert!(steps[3].starts_with("4. **Deployment** - Vercel"));
        assert!(steps[4].starts_with("5. **Verification Checklist**"));
    }

    #[test]
    fn test_steps_with_everything_enabled() {
        let mut brief = ProjectBrief::new("idea");
        brief.backend.db = DbChoice::Supabase;
        brief.backend.auth = AuthChoice::Clerk;
        let steps = implementation_steps(&brief);
        assert_eq!(steps.len(), 7);
        assert!(steps[1].starts_with("2. **Database Setup**"));
        assert!(steps[2].starts_with("3. **Authentication** - Clerk integration"));
    }

    #[test]
    fn test_steps_deferred_testing_swaps_step() {
        let mut brief = ProjectBrief::new("idea");
        brief.testing.enabled = false;
        brief.ai.use_ai_sdk = false;
        let steps = implementation_steps(&brief);
        assert!(steps[1].contains("**Testing Status**"));
        assert!(steps.iter().all(|s| !s.contains("AI SDK Setup")));
        assert!(steps.last().unwrap().contains("manual checks before"));
    }

    #[tokio::test]
    async fn test_mcp_guide_short_circuits_without_copilot() {
        let brief = ProjectBrief::new("idea");
        let provider = MockProvider::echo();
        let guide = generate_mcp_guide(&brief, provider.as_ref(), None, None)
            .await
            .expect("guide");
        assert_eq!(guide, NO_COPILOT_GUIDE);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_mcp_guide_names_the_copilot() {
        let mut brief = ProjectBrief::new("idea");
        brief.ai.copilot = IdeCopilot::Cursor;
        let provider = MockProvider::echo();
        generate_mcp_guide(&brief, provider.as_ref(), None, Some("user-9"))
            .await
            .expect("guide");
        let req = provider.requests()[0].clone();
        assert!(req.messages[0].content.contains("guide for Cursor"));
        assert_eq!(req.user.as_deref(), Some("user-9"));
        assert_eq!(req.tags, vec!["mcp"]);
    }

    #[tokio::test]
    async fn test_implementation_guide_embeds_sections_and_brief() {
        use crate::swarm::context::SwarmContext;
        let ctx = SwarmContext::new(ProjectBrief::new("a deploy previewer"), None, None);
        ctx.slot(Role::StackArchitect).store("route layout here");
        ctx.slot(Role::QualityLead).store("test plan here");
        let provider = MockProvider::echo();
        generate_implementation_guide(&ctx, provider.as_ref(), Some("openai/gpt-4.1"))
            .await
            .expect("guide");

        let req = provider.requests()[0].clone();
        assert_eq!(req.model, "openai/gpt-4.1");
        assert_eq!(req.user.as_deref(), Some("anon"));
        let prompt = &req.messages[0].content;
        assert!(prompt.contains("a deploy previewer"));
        assert!(prompt.contains("route layout here"));
        assert!(prompt.contains("test plan here"));
        assert!(prompt.contains("1. **Project Bootstrap**"));
    }

    #[tokio::test]
    async fn test_agents_guide_swaps_testing_section() {
        use crate::swarm::context::SwarmContext;
        let mut brief = ProjectBrief::new("idea");
        brief.testing.enabled = false;
        let ctx = SwarmContext::new(brief, None, None);
        let provider = MockProvider::echo();
        generate_agents_guide(&ctx, provider.as_ref(), None)
            .await
            .expect("guide");
        let prompt = provider.requests()[0].messages[0].content.clone();
        assert!(prompt.contains("## Testing Status"));
        assert!(!prompt.contains("## Testing Guidelines"));
        assert!(prompt.contains("testing is deferred"));
    }
}
