use thiserror::Error;

/// Errors surfaced by the ambient layers around the core synthesizer — the
/// CLI, program loading, and reporting. The core synthesis/gadget/builder
/// calls keep their boolean-return contract; this type is never threaded
/// through that layer.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("no module named '{0}' and no module named 'main' was found")]
    MainModuleNotFound(String),

    #[error("program declares no modules")]
    EmptyProgram,

    #[error("synthesis of module '{0}' failed")]
    SynthesisFailed(String),

    #[error("failed to deserialize AST: {0}")]
    AstDeserialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
