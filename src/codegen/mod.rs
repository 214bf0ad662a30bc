//! Surface-level text emission for a finished circuit.

pub mod qasm;

pub use qasm::to_qasm2;
