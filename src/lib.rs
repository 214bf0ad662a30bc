//! Reversible-logic synthesizer: compiles an already-parsed SRL AST into a
//! circuit of NOT / CNOT / Toffoli / MCX / Fredkin operations.
//!
//! SRL lexing/parsing isn't implemented here — programs are built directly
//! with the [`ast`] constructors, or deserialized from JSON matching that
//! shape.

pub mod ast;
pub mod circuit;
pub mod codegen;
pub mod error;
pub mod simulate;
pub mod synth;

use std::time::SystemTime;

use ast::Program;
use circuit::CircuitBuilder;
use synth::{Strategy, SynthesisEngine};

pub const VERSION: &str = "0.6.0";

pub fn build_timestamp() -> String {
    let now = SystemTime::now();
    let dt = chrono::DateTime::<chrono::Utc>::from(now);
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn git_commit_hash() -> String {
    env!("GIT_HASH").to_string()
}

/// Options recognized by [`Synthesizer::synthesize`]: a typed stand-in for
/// a properties map, with a `from_properties` constructor that still
/// accepts the raw stringly-typed shape for interop.
#[derive(Debug, Clone, Default)]
pub struct SynthesisOptions {
    pub main_module: Option<String>,
    pub strategy: SynthesisStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynthesisStrategy {
    #[default]
    CostAware,
    LineAware,
}

impl SynthesisOptions {
    pub fn from_properties(props: &std::collections::HashMap<String, String>) -> Self {
        Self {
            main_module: props.get("main_module").cloned(),
            strategy: match props.get("strategy").map(String::as_str) {
                Some("line-aware") | Some("line_aware") => SynthesisStrategy::LineAware,
                _ => SynthesisStrategy::CostAware,
            },
        }
    }
}

/// Timing and size statistics from one synthesis run, useful for a CLI
/// summary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynthesisStats {
    pub runtime_ms: f64,
    pub qubits: usize,
    pub operations: usize,
    pub quantum_cost: u64,
    pub transistor_cost: u64,
}

/// The result of a successful synthesis run.
pub struct SynthesisResult {
    pub circuit: CircuitBuilder,
    pub stats: SynthesisStats,
}

/// Facade over [`SynthesisEngine`]: builds one engine per call so state
/// never leaks across independent synthesis invocations.
pub struct Synthesizer;

impl Synthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn version() -> &'static str {
        VERSION
    }

    pub fn capabilities() -> Vec<&'static str> {
        vec![
            "Cost-aware baseline synthesis strategy",
            "Line-aware shared-operand chain rewrite",
            "Hierarchical control-propagation scopes",
            "Ripple-carry adder/subtractor, comparators, multiplier, divider, shifts",
            "Classical bit-vector simulation",
            "OpenQASM 2 emission",
            "Quantum- and transistor-cost reporting",
        ]
    }

    /// Synthesizes `program` into a circuit, returning the built circuit
    /// plus timing/size statistics. A `false` boolean return from the
    /// underlying engine becomes an `Err` here; the partial circuit is not
    /// exposed, per spec §7 ("partial circuit kept" is an engine-internal
    /// invariant, not part of this facade's contract).
    pub fn synthesize(program: &Program, options: &SynthesisOptions) -> Result<SynthesisResult, error::SynthesisError> {
        if program.modules.is_empty() {
            return Err(error::SynthesisError::EmptyProgram);
        }
        if let Some(name) = &options.main_module {
            if !program.modules.iter().any(|m| &m.name == name) {
                return Err(error::SynthesisError::MainModuleNotFound(name.clone()));
            }
        }

        let strategy = match options.strategy {
            SynthesisStrategy::CostAware => Strategy::CostAware,
            SynthesisStrategy::LineAware => Strategy::LineAware,
        };

        let start = SystemTime::now();
        let mut engine = SynthesisEngine::new(strategy);
        let ok = engine.synthesize(program, options.main_module.as_deref());
        let runtime_ms = start.elapsed().map(|d| d.as_secs_f64() * 1000.0).unwrap_or(0.0);

        if !ok {
            let name = options.main_module.clone().unwrap_or_else(|| "main".to_string());
            return Err(error::SynthesisError::SynthesisFailed(name));
        }

        let circuit = engine.into_builder();
        let stats = SynthesisStats {
            runtime_ms,
            qubits: circuit.registry().len(),
            operations: circuit.len(),
            quantum_cost: synth::cost::quantum_cost(&circuit),
            transistor_cost: synth::cost::transistor_cost(&circuit),
        };
        Ok(SynthesisResult { circuit, stats })
    }
}

impl Default for Synthesizer {
    fn default() -> Self {
        Self::new()
    }
}
