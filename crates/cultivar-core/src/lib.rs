//! Cultivar Core -- the production-simulation engine for grown and
//! synthesized commodities in persistent-world games.
//!
//! This crate provides the quality-tier algebra, the growth state machine,
//! the declarative production configuration layer, and the runtime registry
//! that every Cultivar embedding depends on.
//!
//! # Growth Model
//!
//! A [`plant::Plant`] advances through eight discrete maturity stages
//! (0..=7). Each call to [`plant::Plant::tick`] recomputes the stage from
//! *total* elapsed ticks rather than incrementing it, so instances
//! self-correct after any number of skipped ticks and are safe to advance
//! at irregular intervals -- the engine's answer to server lag and
//! unloaded/reloaded world state.
//!
//! # Key Types
//!
//! - [`quality::TierSystem`] -- an ordered, closed chain of quality grades
//!   with price multipliers and clamped upgrade/downgrade navigation.
//! - [`plant::Plant`] -- the per-instance growth and harvest state machine.
//! - [`policy::PlantPolicy`] -- pluggable growth-speed, yield, and harvest
//!   behavior injected per production type (no subclassing).
//! - [`config::ProductionConfig`] -- immutable, builder-constructed bundle
//!   of a type, its quality tiers, growth requirements, and processing
//!   stages.
//! - [`registry::Registry`] -- mutable, queryable catalog of production
//!   configs, indexed by id and category.
//! - [`state::PlantState`] -- the persisted state shape and the
//!   generic-loader/embedder handoff contract.
//!
//! # Single-Writer Discipline
//!
//! Plant instances carry no internal synchronization: a single simulation
//! driver owns every instance's advancement. The [`registry::Registry`],
//! by contrast, tolerates concurrent readers during occasional writes and
//! always hands out snapshots, never live views.

pub mod config;
pub mod plant;
pub mod policy;
pub mod quality;
pub mod registry;
pub mod rng;
pub mod stage;
pub mod state;
pub mod types;
