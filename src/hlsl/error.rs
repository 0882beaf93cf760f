use nom::{
    error::{ErrorKind, ParseError},
    IResult,
};
use thiserror::Error;

pub type NomGrammarResult<'a, T> = IResult<&'a str, T, GrammarError<&'a str>>;

#[derive(Debug, Error)]
pub enum GrammarError<I> {
    #[error("Internal Nom error: {1:?}")]
    Nom(I, ErrorKind),
    #[error("Intrinsic semantic error: {0}")]
    Intrinsic(#[from] IntrinsicError),
}
impl<I> ParseError<I> for GrammarError<I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        GrammarError::Nom(input, kind)
    }

    fn append(_: I, _: ErrorKind, other: Self) -> Self {
        other
    }
}
impl<I> From<IntrinsicError> for nom::Err<GrammarError<I>> {
    fn from(value: IntrinsicError) -> Self {
        nom::Err::Failure(GrammarError::Intrinsic(value))
    }
}

/// Run a grammar parser over a whole token.
///
/// Semantic errors raised inside the parser are passed through,
/// purely syntactic failures are replaced by `fallback`.
pub fn finish<'a, T>(
    result: NomGrammarResult<'a, T>,
    fallback: impl FnOnce() -> IntrinsicError,
) -> Result<T, IntrinsicError> {
    match result {
        Ok(("", value)) => Ok(value),
        Ok(_) | Err(nom::Err::Incomplete(_)) => Err(fallback()),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => match e {
            GrammarError::Nom(_, _) => Err(fallback()),
            GrammarError::Intrinsic(i) => Err(i),
        },
    }
}

/// Authoring errors in intrinsic definition text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrinsicError {
    #[error("cannot parse line '{0}'")]
    MalformedDeclaration(String),
    #[error("unbalanced namespace: {0}")]
    UnbalancedNamespace(&'static str),
    #[error("intrinsic declared outside of any namespace: '{0}'")]
    MissingNamespace(String),
    #[error("malformed parameter description '{0}'")]
    MalformedParameter(String),
    #[error("unknown base type '{base}' in '{desc}'")]
    UnknownType { base: String, desc: String },
    #[error("unknown parameter qualifier '{0}'")]
    UnknownQualifier(String),
    #[error("unknown row/col '{0}'")]
    UnknownDimension(String),
    #[error("'{token}' can only be used {allowed}")]
    MisplacedSpecialType {
        token: &'static str,
        allowed: &'static str,
    },
    #[error("argument '{0}' has a forward reference")]
    ForwardReference(String),
    #[error("argument '{0}' can't match an input to the return type")]
    ReturnTypeReference(String),
    #[error("invalid attribute '{0}'")]
    InvalidAttribute(String),
}

/// An [IntrinsicError] together with the definition line it was found on
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_no}: {err} (in '{line}')")]
pub struct IntrinsicErrorContext {
    pub line_no: usize,
    pub line: String,
    #[source]
    pub err: IntrinsicError,
}
impl IntrinsicErrorContext {
    pub fn new(line_no: usize, line: &str, err: IntrinsicError) -> Self {
        Self {
            line_no,
            line: line.to_owned(),
            err,
        }
    }
}
