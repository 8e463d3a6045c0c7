use std::str::FromStr;

use thiserror::Error;

use crate::network::network::Network;
use crate::network::spec::BOARD_FEATURES;

/// Content of one playable square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    Empty,
    White,
    Black,
    WhiteKing,
    BlackKing,
}

impl Piece {
    /// Network input for this square. Kings are worth `±k`, men `±1`.
    pub fn value(self, k: f64) -> f64 {
        match self {
            Piece::Empty => 0.0,
            Piece::White => 1.0,
            Piece::Black => -1.0,
            Piece::WhiteKing => k,
            Piece::BlackKing => -k,
        }
    }

    /// `.` empty, `w`/`b` men, `W`/`B` kings.
    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            '.' => Some(Piece::Empty),
            'w' => Some(Piece::White),
            'b' => Some(Piece::Black),
            'W' => Some(Piece::WhiteKing),
            'B' => Some(Piece::BlackKing),
            _ => None,
        }
    }
}

/// The 32 playable squares in engine order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board(pub [Piece; BOARD_FEATURES]);

impl Board {
    pub fn encode(&self, k: f64) -> Vec<f64> {
        self.0.iter().map(|piece| piece.value(k)).collect()
    }

    /// Network score in [-1, 1]; positive favours white.
    pub fn evaluate(&self, network: &Network, k: f64) -> f64 {
        network.predict(&self.encode(k))[0]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseBoardError(pub String);

/// Parses 32 square characters; whitespace and `/` separators are ignored.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pieces = s.chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .map(|c| Piece::from_char(c).ok_or_else(|| ParseBoardError(format!("unknown square '{c}'"))))
            .collect::<Result<Vec<_>, _>>()?;

        let squares: [Piece; BOARD_FEATURES] = pieces.try_into()
            .map_err(|v: Vec<Piece>| ParseBoardError(format!("expected {BOARD_FEATURES} squares, got {}", v.len())))?;
        Ok(Board(squares))
    }
}
