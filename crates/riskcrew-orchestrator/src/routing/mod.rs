//! Query routing.
//!
//! Classifies free-text queries by keyword and turns them into task units for
//! the execution engine.

pub mod classifier;
pub mod router;

pub use classifier::{classify, Route, AGENT_KEYWORDS, FALLBACK_AGENT, FULL_PIPELINE_KEYWORDS};
pub use router::{Router, RoutingPlan};
