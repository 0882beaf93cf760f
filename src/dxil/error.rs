use thiserror::Error;

/// Inconsistencies found in instruction, enumeration or label tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("values in predicate are not sequential and dense, {value} follows {previous} for {name}")]
    Density {
        name: String,
        value: u32,
        previous: u32,
    },
    #[error("overload signature {first_sig} for instruction {first} differs from {other_sig} in {other} (class {class})")]
    SignatureMismatch {
        class: String,
        first: String,
        first_sig: String,
        other: String,
        other_sig: String,
    },
    #[error("overload types for {name}: {reason}")]
    OverloadTypes { name: String, reason: &'static str },
    #[error("{table} row {row} has {found} cells, expected {expected}")]
    NotRectangular {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{table} does not align with {labels}: entry {index} is {found:?}, expected {expected:?}")]
    TableAlignment {
        table: String,
        labels: String,
        index: usize,
        expected: Option<String>,
        found: Option<String>,
    },
    #[error("unknown instruction '{0}'")]
    UnknownInstruction(String),
    #[error("instruction '{0}' is defined more than once")]
    DuplicateInstruction(String),
    #[error("derivative '{0}' is not marked as requiring gradients")]
    DerivativeWithoutGradient(String),
    #[error("invalid shader models '{0}', expected '*' or letters from 'cdghpv'")]
    InvalidShaderModels(String),
    #[error("table '{0}' is empty")]
    EmptyTable(String),
}
