use std::fmt;
use std::hint;
use std::str::FromStr;
use thiserror::Error;

/// Coordinate lies outside the 8x8 grid
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("square ({row}, {col}) is outside the board")]
pub struct OutOfRange {
    pub row: i32,
    pub col: i32,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CoordParseError {
    #[error("unexpected file char {0:?}")]
    UnexpectedFileChar(char),
    #[error("unexpected rank char {0:?}")]
    UnexpectedRankChar(char),
    #[error("invalid string length")]
    BadLength,
}

/// Column of the board, `A` is the leftmost one (col 1)
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => File::A,
            1 => File::B,
            2 => File::C,
            3 => File::D,
            4 => File::E,
            5 => File::F,
            6 => File::G,
            7 => File::H,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "file index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Some(Self::from_index((u32::from(c) - u32::from('a')) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'a' + *self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Row of the board, `R1` is the bottom one (the player's back rank)
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub const unsafe fn from_index_unchecked(val: usize) -> Self {
        match val {
            0 => Rank::R1,
            1 => Rank::R2,
            2 => Rank::R3,
            3 => Rank::R4,
            4 => Rank::R5,
            5 => Rank::R6,
            6 => Rank::R7,
            7 => Rank::R8,
            _ => hint::unreachable_unchecked(),
        }
    }

    pub const fn from_index(val: usize) -> Self {
        assert!(val < 8, "rank index must be between 0 and 7");
        unsafe { Self::from_index_unchecked(val) }
    }

    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + Clone {
        (0..8).map(|x| unsafe { Self::from_index_unchecked(x) })
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Self::from_index((u32::from(c) - u32::from('1')) as usize)),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        (b'1' + *self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

/// Square on the board
///
/// Squares are numbered row-major starting from a1: index `0` is (row 1, col 1), index `7`
/// is (row 1, col 8), index `8` is (row 2, col 1), and so on. The public `row()`/`col()`
/// accessors are one-based.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord(u8);

impl Coord {
    pub const fn from_index(val: usize) -> Coord {
        assert!(val < 64, "coord must be between 0 and 63");
        Coord(val as u8)
    }

    pub const fn from_parts(file: File, rank: Rank) -> Coord {
        Coord(((rank as u8) << 3) | file as u8)
    }

    /// Builds a coordinate from one-based `row` and `col`
    pub fn from_row_col(row: i32, col: i32) -> Result<Coord, OutOfRange> {
        if !(1..=8).contains(&row) || !(1..=8).contains(&col) {
            return Err(OutOfRange { row, col });
        }
        Ok(Coord((((row - 1) << 3) | (col - 1)) as u8))
    }

    pub const fn file(&self) -> File {
        unsafe { File::from_index_unchecked((self.0 & 7) as usize) }
    }

    pub const fn rank(&self) -> Rank {
        unsafe { Rank::from_index_unchecked((self.0 >> 3) as usize) }
    }

    /// One-based row, `1` is the bottom of the board
    pub const fn row(&self) -> i32 {
        (self.0 >> 3) as i32 + 1
    }

    /// One-based column, `1` is the leftmost file
    pub const fn col(&self) -> i32 {
        (self.0 & 7) as i32 + 1
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn try_shift(self, delta_row: i32, delta_col: i32) -> Option<Coord> {
        Coord::from_row_col(self.row() + delta_row, self.col() + delta_col).ok()
    }

    pub fn iter() -> impl Iterator<Item = Self> + Clone {
        (0_u8..64_u8).map(Coord)
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.0 < 64 {
            return write!(f, "Coord({})", self);
        }
        write!(f, "Coord(?{:?})", self.0)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.file().as_char(), self.rank().as_char())
    }
}

impl FromStr for Coord {
    type Err = CoordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(CoordParseError::BadLength);
        }
        let bytes = s.as_bytes();
        let (file_ch, rank_ch) = (bytes[0] as char, bytes[1] as char);
        Ok(Coord::from_parts(
            File::from_char(file_ch).ok_or(CoordParseError::UnexpectedFileChar(file_ch))?,
            Rank::from_char(rank_ch).ok_or(CoordParseError::UnexpectedRankChar(rank_ch))?,
        ))
    }
}

/// One of the two competing sides
///
/// The player always starts on rows 1 and 2, the opponent on rows 7 and 8.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Side {
    Player = 0,
    Opponent = 1,
}

impl Side {
    pub const fn inv(&self) -> Side {
        match *self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [Side::Player, Side::Opponent].into_iter()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Side::Player => write!(f, "player"),
            Side::Opponent => write!(f, "opponent"),
        }
    }
}

/// Color of the pieces as drawn on screen
///
/// Which side plays which color is a presentation choice, see `Config::player_color`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const fn inv(&self) -> Color {
        match *self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match *self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    pub const COUNT: usize = 6;

    pub fn iter() -> impl Iterator<Item = Self> {
        [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ]
        .into_iter()
    }

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    /// Returns the letter for this kind, uppercase for the player and lowercase for the opponent
    pub fn as_char(&self, side: Side) -> char {
        let c = b"pnbrqk"[self.index()] as char;
        match side {
            Side::Player => c.to_ascii_uppercase(),
            Side::Opponent => c,
        }
    }

    pub fn as_utf8_char(&self, side: Side) -> char {
        match side {
            Side::Player => ['♙', '♘', '♗', '♖', '♕', '♔'][self.index()],
            Side::Opponent => ['♟', '♞', '♝', '♜', '♛', '♚'][self.index()],
        }
    }

    pub fn from_char(c: char) -> Option<(PieceKind, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::Player
        } else {
            Side::Opponent
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, side))
    }

    pub fn name(&self) -> &'static str {
        match *self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file() {
        for (idx, file) in File::iter().enumerate() {
            assert_eq!(file.index(), idx);
            assert_eq!(File::from_index(idx), file);
        }
    }

    #[test]
    fn test_rank() {
        for (idx, rank) in Rank::iter().enumerate() {
            assert_eq!(rank.index(), idx);
            assert_eq!(Rank::from_index(idx), rank);
        }
    }

    #[test]
    fn test_coord() {
        let mut coords = Vec::new();
        for rank in Rank::iter() {
            for file in File::iter() {
                let coord = Coord::from_parts(file, rank);
                assert_eq!(coord.file(), file);
                assert_eq!(coord.rank(), rank);
                assert_eq!(coord.row(), rank.index() as i32 + 1);
                assert_eq!(coord.col(), file.index() as i32 + 1);
                coords.push(coord);
            }
        }
        assert_eq!(coords, Coord::iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_row_col() {
        let e4 = Coord::from_row_col(4, 5).unwrap();
        assert_eq!(e4, Coord::from_parts(File::E, Rank::R4));
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Coord::from_row_col(1, 1).unwrap().index(), 0);
        assert_eq!(Coord::from_row_col(8, 8).unwrap().index(), 63);

        assert_eq!(Coord::from_row_col(0, 3), Err(OutOfRange { row: 0, col: 3 }));
        assert_eq!(Coord::from_row_col(4, 9), Err(OutOfRange { row: 4, col: 9 }));
        assert_eq!(e4.try_shift(1, -1), Some(Coord::from_parts(File::D, Rank::R5)));
        assert_eq!(e4.try_shift(5, 0), None);
    }

    #[test]
    fn test_coord_str() {
        assert_eq!(
            Coord::from_parts(File::B, Rank::R4).to_string(),
            "b4".to_string()
        );
        assert_eq!(
            Coord::from_str("a1"),
            Ok(Coord::from_parts(File::A, Rank::R1))
        );
        assert_eq!(
            Coord::from_str("h8"),
            Ok(Coord::from_parts(File::H, Rank::R8))
        );
        assert!(Coord::from_str("h9").is_err());
        assert!(Coord::from_str("i4").is_err());
        assert_eq!(Coord::from_str("e"), Err(CoordParseError::BadLength));
    }

    #[test]
    fn test_piece_chars() {
        for side in Side::iter() {
            for kind in PieceKind::iter() {
                assert_eq!(PieceKind::from_char(kind.as_char(side)), Some((kind, side)));
            }
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }
}
