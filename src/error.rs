//! Crate-wide fatal error type.
//!
//! Translation never recovers: the first lexical, syntax, or semantic
//! violation unwinds the whole pipeline and the process reports a single
//! diagnostic.

use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("lexical error: {0}")]
    Lexical(String),
    #[error("syntax error: {0}")]
    Syntax(String),
    #[error("semantic error: {0}")]
    Semantic(String),
}
