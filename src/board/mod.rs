pub mod encoding;

pub use encoding::{Board, ParseBoardError, Piece};
