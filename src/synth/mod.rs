//! Synthesis: the recursive SRL-to-circuit translator, its operator
//! gadgets, the two emission strategies, and their supporting scratch
//! allocators.

pub mod constants;
pub mod cost;
pub mod engine;
pub mod gadgets;
pub mod line_aware;

pub use constants::ConstantLinePool;
pub use engine::{Strategy, SynthesisEngine};
