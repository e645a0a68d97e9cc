use thiserror::Error;

/// Errors surfaced at the boundary of the core's public operations.
///
/// Propagation stops here: the core attempts no retries, and a failed parse
/// leaves no usable `Board` behind for the caller to keep using.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("malformed position descriptor: {reason}")]
    MalformedDescriptor { reason: String },

    #[error("move is not in the current side's legal move list")]
    IllegalMove,

    #[error("en-passant target is not a legal algebraic square")]
    BadSquare,

    #[error("promotion target must be one of Q, R, B, or N")]
    BadPromotion,

    #[error("undo_move called with an empty history")]
    NoHistory,
}
