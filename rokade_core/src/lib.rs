//! Core board representation, legal move generation, and perft counting
//! for a standard chess position (spec.md §1–§4).

pub mod board;
pub mod error;
pub mod move_gen;
pub mod perft;

pub use board::{
    Board, CastlingRights, Color, Disambiguation, Move, Piece, PieceKind, San, Square,
    TerminalStatus, UciMove,
};
pub use error::BoardError;
