//! Catalog of piece kinds and their movement templates

use crate::types::{File, PieceKind};

/// How a piece kind moves across the board
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Movement {
    /// Pushes forward onto empty squares and captures diagonally forward
    Pawn,
    /// Jumps by one of the given `(row, col)` offsets
    Leaper(&'static [(i32, i32)]),
    /// Slides along the given `(row, col)` directions until blocked
    Slider(&'static [(i32, i32)]),
}

pub const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_DELTAS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const ROOK_DIRS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const QUEEN_DIRS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Back rank layout from file `a` to file `h`, the same for both sides
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const fn movement(kind: PieceKind) -> Movement {
    match kind {
        PieceKind::Pawn => Movement::Pawn,
        PieceKind::Knight => Movement::Leaper(&KNIGHT_DELTAS),
        PieceKind::Bishop => Movement::Slider(&BISHOP_DIRS),
        PieceKind::Rook => Movement::Slider(&ROOK_DIRS),
        PieceKind::Queen => Movement::Slider(&QUEEN_DIRS),
        PieceKind::King => Movement::Leaper(&KING_DELTAS),
    }
}

/// Direction a piece image faces
///
/// Only knights have distinct images: the one starting on the queen side faces left.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    pub fn from_initial_file(file: File) -> Facing {
        if file <= File::D {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Returns the image file stem for the given kind
pub fn asset_stem(kind: PieceKind, facing: Facing) -> &'static str {
    match (kind, facing) {
        (PieceKind::Knight, Facing::Left) => "horseleft",
        (PieceKind::Knight, Facing::Right) => "horseright",
        (kind, _) => kind.name(),
    }
}
