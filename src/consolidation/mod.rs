//! Greedy first-fit consolidation.
//!
//! The engine groups items by route, sorts each route bucket and assigns
//! every item to the earliest-created container that admits it, opening
//! a new container when none does. Routes are independent: with the
//! `parallel` feature they can be processed concurrently, one rayon task
//! per route. Within a route, assignment is strictly sequential because
//! each placement depends on every earlier one.
//!
//! This is a first-fit heuristic, not an optimal bin-packer. Containers
//! are never rebalanced once items are placed.

mod config;
mod engine;

pub use config::ConsolidationConfig;
pub use engine::{ConsolidationEngine, ConsolidationResult};
