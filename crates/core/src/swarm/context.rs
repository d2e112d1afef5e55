//! # Swarm Context
//!
//! Shared state for one generation run: the brief, per-role section
//! slots, the append-only message log, and the agent state map. The
//! context is `Arc`-shared across the agents of a single run and is
//! never persisted or reused.
//!
//! Section writes are partitioned structurally: the only write path is
//! a [`SectionSlot`] scoped to one role, and each slot is a `OnceLock`,
//! so a mistakenly re-invoked agent cannot clobber or append to an
//! existing section. This is what makes intra-wave concurrency safe
//! without locks around the section data itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::brief::ProjectBrief;
use crate::swarm::roles::Role;

/// Lifecycle status of one agent within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Idle,
    Thinking,
    Working,
    Completed,
    Error,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Idle => "idle",
            AgentStatus::Thinking => "thinking",
            AgentStatus::Working => "working",
            AgentStatus::Completed => "completed",
            AgentStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-role, per-run progress record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentState {
    pub role: Role,
    pub status: AgentStatus,
    #[serde(default)]
    pub current_task: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub artifacts: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AgentState {
    fn idle(role: Role) -> Self {
        Self {
            role,
            status: AgentStatus::Idle,
            current_task: None,
            output: None,
            artifacts: None,
            error: None,
        }
    }
}

/// Message type in the swarm log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Request,
    Response,
    Handoff,
    Error,
}

/// Message recipient: a single role or the whole swarm.
/// Serializes as the role's kebab-case name, or `"all"` for broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Role(Role),
    All,
}

impl Serialize for Recipient {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Recipient::Role(role) => serializer.serialize_str(role.as_str()),
            Recipient::All => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for Recipient {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "all" {
            return Ok(Recipient::All);
        }
        raw.parse::<Role>()
            .map(Recipient::Role)
            .map_err(serde::de::Error::custom)
    }
}

/// An immutable swarm log entry. Used for downstream introspection;
/// the scheduler never blocks on messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentMessage {
    pub from: Role,
    pub to: Recipient,
    pub kind: MessageKind,
    pub content: String,
    #[serde(default)]
    pub artifacts: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

/// Mutable shared state for one generation run.
pub struct SwarmContext {
    pub brief: ProjectBrief,
    /// Run-scoped attribution id forwarded to the provider
    pub user_id: Option<String>,
    /// Run-level model override
    pub model: Option<String>,
    outline: OnceLock<String>,
    sections: HashMap<Role, OnceLock<String>>,
    /// Informational role -> dependency-name map, filled at creation
    dependencies: HashMap<Role, Vec<String>>,
    messages: Mutex<Vec<AgentMessage>>,
    agent_states: Mutex<HashMap<Role, AgentState>>,
}

impl SwarmContext {
    /// Build a fresh context: section slots pre-allocated for the eight
    /// worker roles, all nine agent states idle.
    pub fn new(brief: ProjectBrief, model: Option<&str>, user_id: Option<&str>) -> Arc<Self> {
        let sections = Role::WORKERS
            .into_iter()
            .map(|role| (role, OnceLock::new()))
            .collect();
        let dependencies = Role::WORKERS
            .into_iter()
            .map(|role| {
                let deps = role
                    .capability()
                    .dependencies
                    .iter()
                    .map(|dep| dep.as_str().to_string())
                    .collect();
                (role, deps)
            })
            .collect();
        let mut states = HashMap::new();
        states.insert(Role::Orchestrator, AgentState::idle(Role::Orchestrator));
        for role in Role::WORKERS {
            states.insert(role, AgentState::idle(role));
        }

        Arc::new(Self {
            brief,
            user_id: user_id.map(str::to_string),
            model: model.map(str::to_string),
            outline: OnceLock::new(),
            sections,
            dependencies,
            messages: Mutex::new(Vec::new()),
            agent_states: Mutex::new(states),
        })
    }

    /// Narrow write handle for one role's section. The owning agent is
    /// the only holder, which keeps concurrent wave writes disjoint by
    /// construction.
    pub fn slot(self: &Arc<Self>, role: Role) -> SectionSlot {
        SectionSlot {
            ctx: Arc::clone(self),
            role,
        }
    }

    pub fn section(&self, role: Role) -> Option<&str> {
        self.sections
            .get(&role)
            .and_then(|slot| slot.get())
            .map(String::as_str)
    }

    /// Completed sections in canonical compile order
    pub fn completed_sections(&self) -> Vec<(Role, &str)> {
        crate::swarm::roles::COMPILE_ORDER
            .into_iter()
            .filter_map(|role| self.section(role).map(|text| (role, text)))
            .collect()
    }

    pub fn set_outline(&self, outline: &str) -> bool {
        self.outline.set(outline.to_string()).is_ok()
    }

    pub fn outline(&self) -> Option<&str> {
        self.outline.get().map(String::as_str)
    }

    pub fn dependencies(&self) -> &HashMap<Role, Vec<String>> {
        &self.dependencies
    }

    pub fn push_message(&self, message: AgentMessage) {
        self.messages
            .lock()
            .expect("messages lock poisoned")
            .push(message);
    }

    pub fn messages(&self) -> Vec<AgentMessage> {
        self.messages
            .lock()
            .expect("messages lock poisoned")
            .clone()
    }

    pub fn agent_state(&self, role: Role) -> AgentState {
        self.agent_states
            .lock()
            .expect("agent states lock poisoned")
            .get(&role)
            .cloned()
            .unwrap_or_else(|| AgentState::idle(role))
    }

    /// Snapshot of all tracked states, ordered orchestrator-first
    pub fn agent_states(&self) -> Vec<AgentState> {
        let states = self
            .agent_states
            .lock()
            .expect("agent states lock poisoned");
        let mut out = Vec::with_capacity(states.len());
        out.push(
            states
                .get(&Role::Orchestrator)
                .cloned()
                .unwrap_or_else(|| AgentState::idle(Role::Orchestrator)),
        );
        for role in Role::WORKERS {
            if let Some(state) = states.get(&role) {
                out.push(state.clone());
            }
        }
        out
    }

    /// Only the owning agent or the orchestrator may mutate a role's
    /// state; callers uphold that convention.
    pub fn set_status(&self, role: Role, status: AgentStatus, task: Option<&str>) {
        let mut states = self
            .agent_states
            .lock()
            .expect("agent states lock poisoned");
        let state = states.entry(role).or_insert_with(|| AgentState::idle(role));
        state.status = status;
        state.current_task = task.map(str::to_string);
    }

    pub fn mark_completed(&self, role: Role, output: &str) {
        let mut states = self
            .agent_states
            .lock()
            .expect("agent states lock poisoned");
        let state = states.entry(role).or_insert_with(|| AgentState::idle(role));
        state.status = AgentStatus::Completed;
        state.current_task = None;
        state.output = Some(output.to_string());
        state.error = None;
    }

    pub fn mark_error(&self, role: Role, message: &str) {
        let mut states = self
            .agent_states
            .lock()
            .expect("agent states lock poisoned");
        let state = states.entry(role).or_insert_with(|| AgentState::idle(role));
        state.status = AgentStatus::Error;
        state.error = Some(message.to_string());
    }
}

/// Write-once handle for a single role's section output.
pub struct SectionSlot {
    ctx: Arc<SwarmContext>,
    role: Role,
}

impl SectionSlot {
    pub fn role(&self) -> Role {
        self.role
    }

    /// Store the section text. Returns false when the slot was already
    /// written (or the role has no slot); the first value stands.
    pub fn store(&self, output: &str) -> bool {
        match self.ctx.sections.get(&self.role) {
            Some(slot) => slot.set(output.to_string()).is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Arc<SwarmContext> {
        SwarmContext::new(ProjectBrief::new("test idea"), None, None)
    }

    #[test]
    fn test_all_states_start_idle() {
        let ctx = ctx();
        let states = ctx.agent_states();
        assert_eq!(states.len(), 9);
        assert!(states.iter().all(|s| s.status == AgentStatus::Idle));
        assert_eq!(states[0].role, Role::Orchestrator);
    }

    #[test]
    fn test_slot_is_write_once() {
        let ctx = ctx();
        let slot = ctx.slot(Role::MarketAnalyst);
        assert!(slot.store("first"));
        assert!(!slot.store("second"));
        assert_eq!(ctx.section(Role::MarketAnalyst), Some("first"));
    }

    #[test]
    fn test_orchestrator_has_no_section_slot() {
        let ctx = ctx();
        let slot = ctx.slot(Role::Orchestrator);
        assert!(!slot.store("should not land"));
        assert_eq!(ctx.section(Role::Orchestrator), None);
    }

    #[test]
    fn test_completed_sections_follow_compile_order() {
        let ctx = ctx();
        // Write out of order; read back must be canonical.
        ctx.slot(Role::QualityLead).store("q");
        ctx.slot(Role::MarketAnalyst).store("m");
        ctx.slot(Role::SecurityOfficer).store("s");
        let roles: Vec<Role> = ctx
            .completed_sections()
            .into_iter()
            .map(|(role, _)| role)
            .collect();
        assert_eq!(
            roles,
            vec![Role::MarketAnalyst, Role::SecurityOfficer, Role::QualityLead]
        );
    }

    #[test]
    fn test_concurrent_writes_stay_partitioned() {
        let ctx = ctx();
        let handles: Vec<_> = Role::WORKERS
            .into_iter()
            .map(|role| {
                let slot = ctx.slot(role);
                std::thread::spawn(move || slot.store(slot.role().as_str()))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().expect("writer thread"));
        }
        for role in Role::WORKERS {
            assert_eq!(ctx.section(role), Some(role.as_str()));
        }
    }

    #[test]
    fn test_error_state_records_message() {
        let ctx = ctx();
        ctx.mark_error(Role::ScopePlanner, "provider unreachable");
        let state = ctx.agent_state(Role::ScopePlanner);
        assert_eq!(state.status, AgentStatus::Error);
        assert_eq!(state.error.as_deref(), Some("provider unreachable"));
        assert!(state.output.is_none());
    }

    #[test]
    fn test_recipient_wire_shape() {
        assert_eq!(
            serde_json::to_string(&Recipient::All).expect("serialize"),
            "\"all\""
        );
        assert_eq!(
            serde_json::to_string(&Recipient::Role(Role::QualityLead)).expect("serialize"),
            "\"quality-lead\""
        );
        let back: Recipient = serde_json::from_str("\"market-analyst\"").expect("deserialize");
        assert_eq!(back, Recipient::Role(Role::MarketAnalyst));
    }

    #[test]
    fn test_dependencies_map_mirrors_registry() {
        let ctx = ctx();
        let deps = &ctx.dependencies()[&Role::ScopePlanner];
        assert_eq!(deps, &vec!["orchestrator".to_string(), "market-analyst".to_string()]);
    }
}
