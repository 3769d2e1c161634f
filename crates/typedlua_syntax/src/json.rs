//! JSON AST decoding.
//!
//! The parser is an external collaborator; it hands the checker its AST as JSON in the shape described in
//! [`crate::ast`]. Unknown node tags are rejected here, before any checking begins.

use thiserror::Error;

use crate::ast::Block;

/// Errors from decoding an AST.
#[derive(Debug, Error)]
pub enum AstError {
    #[error("invalid AST: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AstError {
    /// Position of the failure in the JSON input, as reported by the decoder.
    pub fn location(&self) -> (usize, usize) {
        match self {
            AstError::Decode(err) => (err.line(), err.column()),
        }
    }
}

/// Decode a chunk from JSON text.
#[tracing::instrument(skip_all, fields(input_len = input.len()))]
pub fn from_str(input: &str) -> Result<Block, AstError> {
    let block: Block = serde_json::from_str(input)?;
    tracing::debug!(stmt_count = block.stmts.len(), "decoded AST");
    Ok(block)
}

/// Decode a chunk from JSON bytes.
#[tracing::instrument(skip_all, fields(input_len = input.len()))]
pub fn from_slice(input: &[u8]) -> Result<Block, AstError> {
    let block: Block = serde_json::from_slice(input)?;
    tracing::debug!(stmt_count = block.stmts.len(), "decoded AST");
    Ok(block)
}
