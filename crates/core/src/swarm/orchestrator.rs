//! # Orchestrator
//!
//! The editor-in-chief of the swarm. Plans dependency waves over the
//! selected worker roles, fans each wave out on a `JoinSet`, then
//! compiles the surviving sections into the final PRD. A failing agent
//! never takes the run down with it; a failing outline or compile step
//! does.

use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::brief::AgentSelection;
use crate::provider::CapabilityProvider;
use crate::swarm::agent::{Agent, AgentCore, GenerateOptions};
use crate::swarm::agents;
use crate::swarm::context::{AgentStatus, SwarmContext};
use crate::swarm::roles::Role;

const SYSTEM_PROMPT: &str = include_str!("agents/defaults/orchestrator.md");

/// Group the selected worker roles into parallel execution waves.
///
/// A role joins a wave once each of its dependencies is either already
/// completed or absent from the selection (unselected dependencies are
/// treated as satisfied, the caller gets a thinner document rather
/// than a stall). `deps_of` is injectable so tests can feed graphs the
/// registry would never produce; on a cycle the remaining roles are
/// logged and left unplanned instead of looping forever.
pub fn plan_waves(
    selected: &BTreeSet<Role>,
    deps_of: impl Fn(Role) -> Vec<Role>,
) -> Vec<Vec<Role>> {
    let mut waves = Vec::new();
    let mut completed: BTreeSet<Role> = BTreeSet::from([Role::Orchestrator]);
    let mut remaining: BTreeSet<Role> = selected.iter().copied().collect();

    while !remaining.is_empty() {
        let wave: Vec<Role> = remaining
            .iter()
            .copied()
            .filter(|role| {
                deps_of(*role)
                    .iter()
                    .all(|dep| completed.contains(dep) || !remaining.contains(dep))
            })
            .collect();

        if wave.is_empty() {
            tracing::warn!(
                unplaced = ?remaining.iter().map(Role::as_str).collect::<Vec<_>>(),
                "dependency cycle detected, halting wave planning"
            );
            break;
        }

        for role in &wave {
            remaining.remove(role);
            completed.insert(*role);
        }
        waves.push(wave);
    }

    waves
}

fn selected_roles(selection: &AgentSelection) -> BTreeSet<Role> {
    let pairs = [
        (selection.market_analyst, Role::MarketAnalyst),
        (selection.scope_planner, Role::ScopePlanner),
        (selection.stack_architect, Role::StackArchitect),
        (selection.ai_designer, Role::AiDesigner),
        (selection.data_api_designer, Role::DataApiDesigner),
        (selection.security_officer, Role::SecurityOfficer),
        (selection.performance_engineer, Role::PerformanceEngineer),
        (selection.quality_lead, Role::QualityLead),
    ];
    pairs
        .into_iter()
        .filter_map(|(on, role)| on.then_some(role))
        .collect()
}

pub struct Orchestrator {
    core: AgentCore,
    agents: HashMap<Role, Box<dyn Agent>>,
}

impl Orchestrator {
    /// Instantiate the orchestrator plus the specialists the brief
    /// selected. An absent selection means all eight workers run.
    pub fn new(
        ctx: &Arc<SwarmContext>,
        provider: Arc<dyn CapabilityProvider>,
        model: Option<&str>,
    ) -> Self {
        let selection = ctx.brief.agents.clone().unwrap_or_default();
        let mut agents = HashMap::new();
        for role in selected_roles(&selection) {
            if let Some(agent) = agents::for_role(role, ctx, Arc::clone(&provider), model) {
                agents.insert(role, agent);
            }
        }
        tracing::info!(
            count = agents.len(),
            roles = ?agents.keys().map(Role::as_str).collect::<Vec<_>>(),
            "initialized agent swarm"
        );
        Self {
            core: AgentCore::new(Role::Orchestrator, ctx, provider, model),
            agents,
        }
    }

    /// Execution waves for the current selection, registry dependencies
    pub fn waves(&self) -> Vec<Vec<Role>> {
        let selected: BTreeSet<Role> = self.agents.keys().copied().collect();
        plan_waves(&selected, |role| role.capability().dependencies.to_vec())
    }

    /// Draft the PRD outline and publish it on the context. Fatal on
    /// failure; nothing downstream makes sense without it.
    pub async fn create_outline(&mut self) -> Result<String> {
        let prompt = format!(
            "{}\n\n\
             Create a PRD outline for this project. Include:\n\
             1. Title and overview\n\
             2. Section headers for each major area\n\
             3. Subsections where needed\n\
             4. Brief notes on what each section should contain\n\n\
             Return the outline in Markdown format with clear hierarchy.",
            self.core.project_context()
        );
        let outline = self
            .core
            .generate(SYSTEM_PROMPT, &prompt, GenerateOptions::default())
            .await?;
        self.core.context().set_outline(&outline);
        Ok(outline)
    }

    /// Run every planned wave to completion. Waves are strict barriers:
    /// the next one starts only after every task of the current one has
    /// settled. Agent failures and panics are recorded on the shared
    /// state and the run continues.
    pub async fn run_waves(&mut self) {
        let waves = self.waves();
        tracing::info!(
            agents = self.agents.len(),
            waves = waves.len(),
            "executing agent swarm"
        );

        for (i, wave) in waves.iter().enumerate() {
            tracing::info!(
                wave = i + 1,
                total = waves.len(),
                roles = ?wave.iter().map(Role::as_str).collect::<Vec<_>>(),
                "starting wave"
            );

            let ctx = Arc::clone(self.core.context());
            let mut join_set = JoinSet::new();
            let mut task_roles: HashMap<tokio::task::Id, Role> = HashMap::new();

            for role in wave {
                let Some(mut agent) = self.agents.remove(role) else {
                    continue;
                };
                let role = *role;
                ctx.set_status(
                    role,
                    AgentStatus::Working,
                    Some(&format!("Generating {role} section")),
                );
                let handle = join_set.spawn(async move {
                    let result = agent.execute().await;
                    (role, result)
                });
                task_roles.insert(handle.id(), role);
            }

            while let Some(joined) = join_set.join_next().await {
                match joined {
                    Ok((role, Ok(output))) => {
                        tracing::info!(role = %role, chars = output.len(), "agent completed");
                    }
                    Ok((role, Err(e))) => {
                        tracing::warn!(role = %role, error = %e, "agent failed, continuing");
                        self.core.context().mark_error(role, &e.to_string());
                    }
                    Err(join_err) => {
                        let role = task_roles.get(&join_err.id()).copied();
                        tracing::warn!(role = ?role, error = %join_err, "agent task panicked");
                        if let Some(role) = role {
                            self.core
                                .context()
                                .mark_error(role, &format!("task panicked: {join_err}"));
                        }
                    }
                }
            }

            tracing::info!(wave = i + 1, "wave complete");
        }
    }

    /// Merge the completed sections into one polished document. Roles
    /// without output are skipped; section order is the canonical
    /// editorial one regardless of completion order.
    pub async fn compile(&mut self) -> Result<String> {
        let sections: String = self
            .core
            .context()
            .completed_sections()
            .into_iter()
            .map(|(role, text)| format!("\n### {}\n{}\n", role.display_name(), text))
            .collect::<Vec<_>>()
            .join("\n");

        let prompt = format!(
            "You are compiling the final PRD from multiple agent outputs.\n\n\
             {}\n\n\
             ## Agent Outputs:\n{}\n\n\
             Create a polished, professional PRD document that:\n\
             1. Starts with a clear title and executive summary\n\
             2. Flows logically from market analysis to scope to architecture to implementation concerns\n\
             3. Removes redundancy while keeping critical details\n\
             4. Maintains consistent terminology and formatting\n\
             5. Uses professional Markdown with proper headings, lists, and code blocks\n\
             6. Ends with a summary of open questions and next steps\n\n\
             Return the complete PRD in Markdown format.",
            self.core.project_context(),
            sections
        );

        self.core
            .generate(
                SYSTEM_PROMPT,
                &prompt,
                GenerateOptions {
                    temperature: 0.3,
                    ..GenerateOptions::default()
                },
            )
            .await
    }

    /// Full pipeline: outline, waves, compile.
    pub async fn execute(&mut self) -> Result<String> {
        self.core.set_working("Creating PRD outline");
        self.create_outline()
            .await
            .context("failed to create the PRD outline")?;

        self.core.set_working("Executing agent swarm");
        self.run_waves().await;

        self.core.set_working("Compiling final PRD");
        let prd = self
            .compile()
            .await
            .context("failed to compile the final PRD")?;

        self.core
            .context()
            .mark_completed(Role::Orchestrator, &prd);
        Ok(prd)
    }

    /// Plain-text status report over all tracked agents.
    pub fn execution_summary(&self) -> String {
        let states = self.core.context().agent_states();
        let count = |status: AgentStatus| states.iter().filter(|s| s.status == status).count();
        let completed = count(AgentStatus::Completed);
        let errors = count(AgentStatus::Error);
        let working = count(AgentStatus::Working) + count(AgentStatus::Thinking);

        let lines: String = states
            .iter()
            .map(|s| {
                let marker = match s.status {
                    AgentStatus::Completed => "[x]",
                    AgentStatus::Error => "[!]",
                    AgentStatus::Working | AgentStatus::Thinking => "[~]",
                    AgentStatus::Idle => "[ ]",
                };
                format!("{} {}: {}\n", marker, s.role.display_name(), s.status)
            })
            .collect();

        format!(
            "## Agent Execution Summary\n\n\
             - Completed: {completed}\n\
             - Errors: {errors}\n\
             - In Progress: {working}\n\
             - Total: {}\n\n\
             {lines}",
            states.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brief::ProjectBrief;
    use crate::provider::testing::MockProvider;
    use crate::provider::ProviderError;

    fn registry_deps(role: Role) -> Vec<Role> {
        role.capability().dependencies.to_vec()
    }

    fn all_workers() -> BTreeSet<Role> {
        Role::WORKERS.into_iter().collect()
    }

    #[test]
    fn test_waves_cover_selection_exactly_once() {
        let waves = plan_waves(&all_workers(), registry_deps);
        let placed: Vec<Role> = waves.iter().flatten().copied().collect();
        assert_eq!(placed.len(), Role::WORKERS.len());
        let unique: BTreeSet<Role> = placed.iter().copied().collect();
        assert_eq!(unique, all_workers());
    }

    #[test]
    fn test_waves_respect_dependencies() {
        let waves = plan_waves(&all_workers(), registry_deps);
        let mut seen: BTreeSet<Role> = BTreeSet::from([Role::Orchestrator]);
        for wave in &waves {
            for role in wave {
                for dep in registry_deps(*role) {
                    assert!(
                        seen.contains(&dep),
                        "{role} scheduled before its dependency {dep}"
                    );
                }
            }
            seen.extend(wave.iter().copied());
        }
        // Full selection: the analyst leads, the quality lead closes.
        assert_eq!(waves[0], vec![Role::MarketAnalyst]);
        assert!(waves.last().unwrap().contains(&Role::QualityLead));
    }

    #[test]
    fn test_unselected_dependency_counts_as_satisfied() {
        let selected = BTreeSet::from([Role::ScopePlanner]);
        let waves = plan_waves(&selected, registry_deps);
        assert_eq!(waves, vec![vec![Role::ScopePlanner]]);
    }

    #[test]
    fn test_cycle_halts_instead_of_looping() {
        let selected = BTreeSet::from([Role::MarketAnalyst, Role::ScopePlanner]);
        let waves = plan_waves(&selected, |role| match role {
            Role::MarketAnalyst => vec![Role::ScopePlanner],
            Role::ScopePlanner => vec![Role::MarketAnalyst],
            _ => vec![],
        });
        assert!(waves.is_empty());
    }

    #[test]
    fn test_cycle_still_schedules_independent_roles() {
        let selected = BTreeSet::from([
            Role::MarketAnalyst,
            Role::ScopePlanner,
            Role::QualityLead,
        ]);
        let waves = plan_waves(&selected, |role| match role {
            Role::MarketAnalyst => vec![Role::ScopePlanner],
            Role::ScopePlanner => vec![Role::MarketAnalyst],
            _ => vec![],
        });
        assert_eq!(waves, vec![vec![Role::QualityLead]]);
    }

    fn brief_with(selection: AgentSelection) -> ProjectBrief {
        let mut brief = ProjectBrief::new("a snippet manager for teams");
        brief.agents = Some(selection);
        brief
    }

    #[tokio::test]
    async fn test_two_wave_run_end_to_end() {
        let mut selection = AgentSelection::none();
        selection.market_analyst = true;
        selection.scope_planner = true;
        let ctx = SwarmContext::new(brief_with(selection), None, None);
        let provider = MockProvider::echo();
        let mut orchestrator = Orchestrator::new(&ctx, Arc::clone(&provider) as _, None);

        assert_eq!(
            orchestrator.waves(),
            vec![vec![Role::MarketAnalyst], vec![Role::ScopePlanner]]
        );

        let prd = orchestrator.execute().await.expect("run");
        assert!(!prd.is_empty());
        assert!(ctx.outline().is_some());
        assert!(ctx.section(Role::MarketAnalyst).is_some());
        assert!(ctx.section(Role::ScopePlanner).is_some());
        // Outline + compile for the orchestrator, one call per agent.
        assert_eq!(provider.call_count(), 4);

        let summary = orchestrator.execution_summary();
        assert!(summary.contains("- Completed: 3"));
        assert!(summary.contains("- Errors: 0"));
        assert!(summary.contains("[x] Dev Market & Persona Analyst: completed"));
    }

    #[tokio::test]
    async fn test_agent_failure_does_not_sink_the_run() {
        let mut selection = AgentSelection::none();
        selection.market_analyst = true;
        selection.scope_planner = true;
        let ctx = SwarmContext::new(brief_with(selection), None, None);
        // The analyst's call fails; everything else succeeds.
        let provider = MockProvider::new(|req| {
            if req.tags.contains(&"market-analyst".to_string()) {
                Err(ProviderError::EmptyResponse)
            } else {
                Ok("section text".to_string())
            }
        });
        let mut orchestrator = Orchestrator::new(&ctx, Arc::clone(&provider) as _, None);

        let prd = orchestrator.execute().await.expect("run survives");
        assert_eq!(prd, "section text");
        assert_eq!(
            ctx.agent_state(Role::MarketAnalyst).status,
            AgentStatus::Error
        );
        assert!(ctx.section(Role::MarketAnalyst).is_none());
        // Scope planner still ran and completed.
        assert_eq!(
            ctx.agent_state(Role::ScopePlanner).status,
            AgentStatus::Completed
        );

        let summary = orchestrator.execution_summary();
        assert!(summary.contains("- Errors: 1"));
        assert!(summary.contains("[!] Dev Market & Persona Analyst: error"));
    }

    #[tokio::test]
    async fn test_outline_failure_is_fatal() {
        let ctx = SwarmContext::new(brief_with(AgentSelection::none()), None, None);
        let provider = MockProvider::new(|_| {
            Err(ProviderError::Api {
                status: 429,
                message: "rate limited".into(),
            })
        });
        let mut orchestrator = Orchestrator::new(&ctx, provider, None);
        let err = orchestrator.execute().await.expect_err("fatal");
        assert!(err.to_string().contains("outline"));
    }

    #[tokio::test]
    async fn test_compile_orders_sections_canonically() {
        let ctx = SwarmContext::new(brief_with(AgentSelection::none()), None, None);
        // Store sections in reverse of the canonical order.
        ctx.slot(Role::QualityLead).store("quality text");
        ctx.slot(Role::MarketAnalyst).store("market text");
        let provider = MockProvider::echo();
        let mut orchestrator = Orchestrator::new(&ctx, Arc::clone(&provider) as _, None);
        orchestrator.compile().await.expect("compile");

        let prompt = provider.requests()[0].messages[0].content.clone();
        let market = prompt.find("### Dev Market & Persona Analyst").expect("market header");
        let quality = prompt
            .find("### Quality, Rollout & Docs Lead")
            .expect("quality header");
        assert!(market < quality);
        assert_eq!(provider.requests()[0].temperature, 0.3);
    }
}
