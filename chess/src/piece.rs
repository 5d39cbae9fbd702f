use crate::types::{Coord, PieceKind, Side};

use std::fmt;

/// Stable identifier of a piece within its [`Board`](crate::board::Board)
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(u8);

impl PieceId {
    pub(crate) const fn from_index(val: usize) -> PieceId {
        PieceId(val as u8)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "#{}", self.0)
    }
}

/// Where a piece currently is
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Placement {
    OnBoard(Coord),
    /// Off-board position of taken pieces
    Captured,
}

/// Chess piece
///
/// The board records occupancy by [`PieceId`]; the piece keeps its own position in sync with it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    pub(crate) kind: PieceKind,
    pub(crate) side: Side,
    pub(crate) placement: Placement,
    pub(crate) initial: Coord,
    pub(crate) move_count: u16,
}

impl Piece {
    pub(crate) fn new(kind: PieceKind, side: Side, coord: Coord) -> Piece {
        Piece {
            kind,
            side,
            placement: Placement::OnBoard(coord),
            initial: coord,
            move_count: 0,
        }
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the current square, or `None` if the piece was captured
    #[inline]
    pub fn coord(&self) -> Option<Coord> {
        match self.placement {
            Placement::OnBoard(c) => Some(c),
            Placement::Captured => None,
        }
    }

    /// Returns the square the piece was placed on when constructed
    #[inline]
    pub fn initial(&self) -> Coord {
        self.initial
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.placement == Placement::Captured
    }

    #[inline]
    pub fn is_at_initial(&self) -> bool {
        self.coord() == Some(self.initial)
    }

    /// Returns `true` if the piece was ever moved, even if it came back later
    #[inline]
    pub fn has_moved(&self) -> bool {
        self.move_count != 0
    }

    #[inline]
    pub fn move_count(&self) -> u16 {
        self.move_count
    }

    pub fn as_char(&self) -> char {
        self.kind.as_char(self.side)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.placement {
            Placement::OnBoard(c) => write!(f, "{} {} at {}", self.side, self.kind, c),
            Placement::Captured => write!(f, "{} {} (captured)", self.side, self.kind),
        }
    }
}
