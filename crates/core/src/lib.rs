//! # PRD Swarm Core
//!
//! Orchestration core for a PRD-drafting agent swarm: nine specialized
//! roles coordinated by an orchestrator that plans dependency-aware
//! parallel waves, merges the surviving sections into one document, and
//! reports per-agent status.
//!
//! ## Architecture
//!
//! - `brief` - the structured project brief that drives a run
//! - `provider` - the external text-generation capability boundary
//! - `swarm/` - roles, shared context, agents, wave orchestration
//! - `synthesis` - post-run document generators (implementation guide,
//!   AGENTS.md, MCP guide)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prdswarm_core::brief::ProjectBrief;
//! use prdswarm_core::provider::GatewayClient;
//! use prdswarm_core::swarm::generate_prd;
//!
//! let brief = ProjectBrief::new("Build a stock tracker");
//! let provider = std::sync::Arc::new(GatewayClient::from_env()?);
//! let run = generate_prd(brief, provider, None, None).await?;
//! println!("{}", run.prd);
//! ```

pub mod brief;
pub mod provider;
pub mod swarm;
pub mod synthesis;

pub use brief::ProjectBrief;
pub use provider::{CapabilityProvider, GatewayClient, GenerationRequest, ProviderError};
pub use swarm::{generate_prd, PrdRun, Role, SwarmContext};
