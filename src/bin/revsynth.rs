// src/bin/revsynth.rs
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use revsynth::ast::Program;
use revsynth::circuit::{CircuitBuilder, QubitClass};
use revsynth::{SynthesisOptions, SynthesisStrategy, Synthesizer};

const APP_NAME: &str = "revsynth";

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(author = "QCLang Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reversible-logic synthesizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a circuit from an SRL AST (JSON) and emit OpenQASM 2 / circuit JSON
    #[command(arg_required_else_help = true)]
    Synthesize {
        /// Input AST file, serde_json-encoded `ast::Program`
        input: PathBuf,

        /// Module to synthesize (defaults to the module named "main")
        #[arg(short, long)]
        main: Option<String>,

        /// Synthesis strategy
        #[arg(short, long, value_enum, default_value = "cost-aware")]
        strategy: StrategyArg,

        /// Write OpenQASM 2 text to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the raw circuit (qubits + operation log) as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Report quantum- and transistor-cost for a synthesized circuit, with no QASM emission
    Cost {
        input: PathBuf,

        #[arg(short, long)]
        main: Option<String>,

        #[arg(short, long, value_enum, default_value = "cost-aware")]
        strategy: StrategyArg,
    },

    /// Synthesize, then run the classical bit-vector simulator over the result
    Simulate {
        input: PathBuf,

        #[arg(short, long)]
        main: Option<String>,

        #[arg(short, long, value_enum, default_value = "cost-aware")]
        strategy: StrategyArg,

        /// Initial value for an input variable, as `name=decimal` (repeatable)
        #[arg(long = "set", value_name = "NAME=VALUE")]
        assignments: Vec<String>,
    },

    /// Show synthesizer capabilities
    Capabilities,

    /// Show version and build information
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    CostAware,
    LineAware,
}

impl From<StrategyArg> for SynthesisStrategy {
    fn from(s: StrategyArg) -> Self {
        match s {
            StrategyArg::CostAware => SynthesisStrategy::CostAware,
            StrategyArg::LineAware => SynthesisStrategy::LineAware,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Synthesize { input, main, strategy, output, json } => {
            synthesize_command(&input, main, strategy, output.as_deref(), json.as_deref(), cli.verbose)?;
        }
        Commands::Cost { input, main, strategy } => {
            cost_command(&input, main, strategy, cli.verbose)?;
        }
        Commands::Simulate { input, main, strategy, assignments } => {
            simulate_command(&input, main, strategy, &assignments, cli.verbose)?;
        }
        Commands::Capabilities => show_capabilities(),
        Commands::Version => show_version(),
    }

    Ok(())
}

fn load_program(path: &PathBuf) -> Result<Program, revsynth::error::SynthesisError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

fn run_synthesis(
    input: &PathBuf,
    main: Option<String>,
    strategy: StrategyArg,
    verbose: bool,
) -> Result<revsynth::SynthesisResult, Box<dyn std::error::Error>> {
    let program = load_program(input)?;
    let options = SynthesisOptions { main_module: main, strategy: strategy.into() };

    let pb = spinner("synthesizing");
    let start = Instant::now();
    let result = Synthesizer::synthesize(&program, &options);
    pb.finish_and_clear();

    let result = result.map_err(|e| {
        eprintln!("{} {}", "[ERR]".red().bold(), e);
        e
    })?;

    if verbose {
        eprintln!(
            "{} {} qubits, {} operations in {:.3}ms (wall {:.3}ms)",
            "[OK]".green().bold(),
            result.stats.qubits,
            result.stats.operations,
            result.stats.runtime_ms,
            start.elapsed().as_secs_f64() * 1000.0
        );
    }
    Ok(result)
}

fn synthesize_command(
    input: &PathBuf,
    main: Option<String>,
    strategy: StrategyArg,
    output: Option<&std::path::Path>,
    json: Option<&std::path::Path>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = run_synthesis(input, main, strategy, verbose)?;
    let qasm = revsynth::codegen::to_qasm2(&result.circuit);

    match output {
        Some(path) => fs::write(path, &qasm)?,
        None => print!("{qasm}"),
    }

    if let Some(path) = json {
        fs::write(path, serde_json::to_string_pretty(&CircuitDump::from(&result.circuit))?)?;
    }

    print_stats(&result.stats);
    Ok(())
}

fn cost_command(
    input: &PathBuf,
    main: Option<String>,
    strategy: StrategyArg,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = run_synthesis(input, main, strategy, verbose)?;
    print_stats(&result.stats);
    Ok(())
}

fn simulate_command(
    input: &PathBuf,
    main: Option<String>,
    strategy: StrategyArg,
    assignments: &[String],
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let result = run_synthesis(input, main, strategy, verbose)?;
    let labels = result.circuit.non_ancillary_labels_in_order();

    let mut values: HashMap<String, u64> = HashMap::new();
    for assignment in assignments {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            format!("expected NAME=VALUE, got '{assignment}'")
        })?;
        values.insert(name.to_string(), value.parse::<u64>()?);
    }

    let mut state = vec![false; result.circuit.registry().len()];
    for (qubit, label) in &labels {
        let base = strip_bit_suffix(label);
        if let Some(&v) = values.get(&base) {
            let bit = bit_index(label);
            state[qubit.index()] = (v >> bit) & 1 == 1;
        }
    }

    let sim = revsynth::simulate::BitVectorSimulator::new();
    sim.run(result.circuit.operations(), &mut state);

    println!("{}", "final state".bold());
    for (qubit, label) in &labels {
        println!("  {label:<16} = {}", state[qubit.index()] as u8);
    }
    Ok(())
}

/// Splits a qubit label like `x.3` or `x[1].3` into its variable base
/// (`x` / `x[1]`) and bit index, matching the `name{indices}.{bit}` scheme
/// the engine assigns non-ancillary qubits.
fn strip_bit_suffix(label: &str) -> String {
    match label.rsplit_once('.') {
        Some((base, _)) => base.to_string(),
        None => label.to_string(),
    }
}

fn bit_index(label: &str) -> u32 {
    label.rsplit_once('.').and_then(|(_, bit)| bit.parse().ok()).unwrap_or(0)
}

fn print_stats(stats: &revsynth::SynthesisStats) {
    eprintln!("{:<18} : {}", "qubits", stats.qubits);
    eprintln!("{:<18} : {}", "operations", stats.operations);
    eprintln!("{:<18} : {}", "quantum cost", stats.quantum_cost);
    eprintln!("{:<18} : {}", "transistor cost", stats.transistor_cost);
    eprintln!("{:<18} : {:.3}ms", "runtime", stats.runtime_ms);
}

fn show_capabilities() {
    println!("{}", "capabilities".bold());
    for cap in Synthesizer::capabilities() {
        println!("  - {cap}");
    }
}

fn show_version() {
    println!("{} {}", APP_NAME.cyan().bold(), Synthesizer::version());
    println!("{:<14} : {}", "build", revsynth::build_timestamp());
    println!("{:<14} : {}", "commit", revsynth::git_commit_hash());
}

#[derive(Serialize)]
struct QubitDump {
    index: usize,
    label: String,
    class: String,
}

#[derive(Serialize)]
struct CircuitDump {
    qubits: Vec<QubitDump>,
    operations: Vec<revsynth::circuit::Operation>,
}

impl From<&CircuitBuilder> for CircuitDump {
    fn from(builder: &CircuitBuilder) -> Self {
        let registry = builder.registry();
        let qubits = (0..registry.len())
            .map(|i| {
                let q = revsynth::circuit::QubitId::new(i);
                let class = match registry.class(q).expect("dense register") {
                    QubitClass::NonAncillary { garbage: false } => "output",
                    QubitClass::NonAncillary { garbage: true } => "garbage",
                    QubitClass::PreliminaryAncillary => "ancillary(preliminary)",
                    QubitClass::DefinitiveAncillary => "ancillary",
                };
                QubitDump { index: i, label: registry.label(q).unwrap_or("").to_string(), class: class.to_string() }
            })
            .collect();
        CircuitDump { qubits, operations: builder.operations().to_vec() }
    }
}
