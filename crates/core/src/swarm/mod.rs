//! # Swarm Orchestration
//!
//! Coordinates the PRD generation swarm.
//!
//! ## Pipeline Flow
//!
//! ```text
//! Brief → Outline → Dependency Waves (parallel specialists) → Compile → PRD
//! ```
//!
//! The orchestrator plans waves from the capability registry, runs each
//! wave's specialists concurrently against the shared [`context::SwarmContext`],
//! and compiles whatever sections survived into the final document.

pub mod agent;
pub mod agents;
pub mod context;
pub mod orchestrator;
pub mod roles;
pub mod runner;
pub mod tools;

pub use agent::{Agent, AgentCore, GenerateOptions};
pub use context::{
    AgentMessage, AgentState, AgentStatus, MessageKind, Recipient, SectionSlot, SwarmContext,
};
pub use orchestrator::{plan_waves, Orchestrator};
pub use roles::{Capability, Role, COMPILE_ORDER};
pub use runner::{generate_prd, PrdRun};
pub use tools::tools_for;
