//! Board and related things

use crate::bitboard::Bitboard;
use crate::geometry;
use crate::piece::{Piece, PieceId, Placement};
use crate::registry;
use crate::types::{Coord, File, OutOfRange, PieceKind, Rank, Side};

use std::fmt::{self, Display};
use std::str::FromStr;

use arrayvec::ArrayVec;
use thiserror::Error;

/// Maximum number of pieces a board can hold
pub const MAX_PIECES: usize = 32;

/// Error putting a piece on the board
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlaceError {
    /// Target square already holds another piece
    #[error("square {0} is already occupied")]
    Occupied(Coord),
    /// The roster is full
    #[error("too many pieces on the board")]
    TooManyPieces,
    /// The piece was captured and cannot return to the board
    #[error("piece {0} was captured")]
    Captured(PieceId),
}

/// Error parsing the piece placement part of FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LayoutParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
    /// More pieces than the roster can hold
    #[error("too many pieces")]
    TooManyPieces,
}

/// Board and pieces disagree about where a piece is
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum InconsistentBoard {
    #[error("square {0} points to piece {1}, which is elsewhere")]
    StaleOccupant(Coord, PieceId),
    #[error("piece {0} claims square {1}, which does not point back")]
    LostPiece(PieceId, Coord),
    #[error("square {0} points to unknown piece {1}")]
    UnknownPiece(Coord, PieceId),
}

/// Single square of the board
///
/// The occupant is a weak reference: the square only records which piece stands on it, the
/// piece itself lives in the board roster. The `selected` and `available` flags are UI state
/// managed by [`Selection`](crate::selection::Selection).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    coord: Coord,
    occupant: Option<PieceId>,
    selected: bool,
    available: bool,
}

impl Square {
    const fn new(coord: Coord) -> Square {
        Square {
            coord,
            occupant: None,
            selected: false,
            available: false,
        }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.coord.row()
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.coord.col()
    }

    /// Returns the display name, like `e4`
    pub fn name(&self) -> String {
        self.coord.to_string()
    }

    #[inline]
    pub fn occupant(&self) -> Option<PieceId> {
        self.occupant
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    #[inline]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.available
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.occupant {
            Some(id) => write!(f, "square {} with piece {}", self.coord, id),
            None => write!(f, "empty square {}", self.coord),
        }
    }
}

/// Chess board
///
/// Holds 64 squares in row-major order starting from a1 and the roster of all the pieces ever
/// put on it, captured ones included. Every mutation keeps square occupancy and piece positions
/// in sync, see [`Board::validate()`].
///
/// # Example
///
/// ```
/// # use chesstrack::{Board, Coord, PieceKind, Side};
/// # use std::str::FromStr;
/// #
/// let board = Board::initial();
/// let e1 = board.square_at(1, 5).unwrap();
/// assert_eq!(e1.name(), "e1");
/// let king = board.occupant(e1.coord()).unwrap();
/// assert_eq!((king.kind(), king.side()), (PieceKind::King, Side::Player));
/// assert!(board.square_at(9, 1).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Square; 64],
    pieces: ArrayVec<Piece, MAX_PIECES>,
}

impl Board {
    /// Returns a board without pieces
    pub fn empty() -> Board {
        let mut squares = [Square::new(Coord::from_index(0)); 64];
        for (idx, sq) in squares.iter_mut().enumerate() {
            *sq = Square::new(Coord::from_index(idx));
        }
        Board {
            squares,
            pieces: ArrayVec::new(),
        }
    }

    /// Returns a board with the initial position
    ///
    /// The player's pieces stand on rows 1 and 2, the opponent's ones on rows 8 and 7.
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for side in Side::iter() {
            let back = geometry::back_rank(side);
            for (file, kind) in File::iter().zip(registry::BACK_RANK) {
                res.put_new(kind, side, Coord::from_parts(file, back));
            }
            let pawns = geometry::pawn_rank(side);
            for file in File::iter() {
                res.put_new(PieceKind::Pawn, side, Coord::from_parts(file, pawns));
            }
        }
        res
    }

    /// Parses the piece placement part of FEN
    ///
    /// Uppercase letters are the player's pieces, lowercase ones are the opponent's. As in FEN,
    /// the description starts from row 8. Each piece gets its square as its initial position.
    pub fn from_layout(s: &str) -> Result<Board, LayoutParseError> {
        Board::from_str(s)
    }

    /// Converts the occupancy into the piece placement part of FEN
    pub fn as_layout(&self) -> String {
        self.to_string()
    }

    /// Returns the square at one-based `row` and `col`
    pub fn square_at(&self, row: i32, col: i32) -> Result<&Square, OutOfRange> {
        Ok(self.square(Coord::from_row_col(row, col)?))
    }

    #[inline]
    pub fn square(&self, c: Coord) -> &Square {
        &self.squares[c.index()]
    }

    #[inline]
    fn square_mut(&mut self, c: Coord) -> &mut Square {
        &mut self.squares[c.index()]
    }

    /// Iterates over all the 64 squares in construction order
    ///
    /// The returned iterator is cheap to clone, so it can be restarted.
    pub fn all_squares(&self) -> impl Iterator<Item = &Square> + Clone + '_ {
        self.squares.iter()
    }

    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    /// Iterates over all the pieces, captured ones included
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces
            .iter()
            .enumerate()
            .map(|(i, p)| (PieceId::from_index(i), p))
    }

    /// Iterates over the pieces which are still on the board
    pub fn live_pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.pieces().filter(|(_, p)| !p.is_captured())
    }

    #[inline]
    pub fn occupant_id(&self, c: Coord) -> Option<PieceId> {
        self.square(c).occupant
    }

    #[inline]
    pub fn occupant(&self, c: Coord) -> Option<&Piece> {
        self.occupant_id(c).map(|id| self.piece(id))
    }

    /// Returns the set of occupied squares
    pub fn occupied(&self) -> Bitboard {
        self.squares
            .iter()
            .filter(|sq| sq.occupant.is_some())
            .map(|sq| sq.coord)
            .collect()
    }

    /// Returns the set of squares occupied by `side`
    pub fn occupied_by(&self, side: Side) -> Bitboard {
        self.live_pieces()
            .filter(|(_, p)| p.side == side)
            .filter_map(|(_, p)| p.coord())
            .collect()
    }

    fn put_new(&mut self, kind: PieceKind, side: Side, c: Coord) -> PieceId {
        let id = PieceId::from_index(self.pieces.len());
        self.pieces.push(Piece::new(kind, side, c));
        self.square_mut(c).occupant = Some(id);
        id
    }

    /// Creates a new piece on the empty square `c`
    pub fn add_piece(
        &mut self,
        kind: PieceKind,
        side: Side,
        c: Coord,
    ) -> Result<PieceId, PlaceError> {
        if self.pieces.is_full() {
            return Err(PlaceError::TooManyPieces);
        }
        if self.square(c).occupant.is_some() {
            return Err(PlaceError::Occupied(c));
        }
        Ok(self.put_new(kind, side, c))
    }

    /// Puts the piece `id` onto square `c`
    ///
    /// Sets the occupant of `c` and the stored coordinates of the piece at once. If the piece
    /// still occupies its previous square, that square is cleared. The target square must be
    /// empty or already hold this piece.
    pub fn place_piece(&mut self, id: PieceId, c: Coord) -> Result<(), PlaceError> {
        let piece = *self.piece(id);
        if piece.is_captured() {
            return Err(PlaceError::Captured(id));
        }
        match self.square(c).occupant {
            Some(other) if other != id => return Err(PlaceError::Occupied(c)),
            _ => {}
        }
        if let Some(prev) = piece.coord() {
            if self.square(prev).occupant == Some(id) {
                self.square_mut(prev).occupant = None;
            }
        }
        self.square_mut(c).occupant = Some(id);
        self.piece_mut(id).placement = Placement::OnBoard(c);
        Ok(())
    }

    /// Clears the occupant of square `c` without touching the piece itself
    ///
    /// Returns the former occupant. Until the piece is placed again or captured, the board is
    /// inconsistent, so callers must follow up with [`Board::place_piece()`] or
    /// [`Board::capture_piece()`].
    pub fn remove_piece(&mut self, c: Coord) -> Option<PieceId> {
        self.square_mut(c).occupant.take()
    }

    /// Takes the piece `id` off the board and marks it as captured
    pub fn capture_piece(&mut self, id: PieceId) {
        if let Some(c) = self.piece(id).coord() {
            if self.square(c).occupant == Some(id) {
                self.square_mut(c).occupant = None;
            }
        }
        self.piece_mut(id).placement = Placement::Captured;
    }

    pub(crate) fn set_selected(&mut self, c: Coord, value: bool) {
        self.square_mut(c).selected = value;
    }

    pub(crate) fn set_available(&mut self, set: Bitboard) {
        for c in set {
            self.square_mut(c).available = true;
        }
    }

    pub(crate) fn clear_available(&mut self) {
        for sq in &mut self.squares {
            sq.available = false;
        }
    }

    pub(crate) fn clear_flags(&mut self) {
        for sq in &mut self.squares {
            sq.selected = false;
            sq.available = false;
        }
    }

    /// Returns the set of squares flagged as available
    pub fn available(&self) -> Bitboard {
        self.squares
            .iter()
            .filter(|sq| sq.available)
            .map(|sq| sq.coord)
            .collect()
    }

    /// Returns the set of squares flagged as selected
    pub fn selected(&self) -> Bitboard {
        self.squares
            .iter()
            .filter(|sq| sq.selected)
            .map(|sq| sq.coord)
            .collect()
    }

    /// Checks that squares and pieces agree on every piece position
    pub fn validate(&self) -> Result<(), InconsistentBoard> {
        for sq in &self.squares {
            if let Some(id) = sq.occupant {
                if id.index() >= self.pieces.len() {
                    return Err(InconsistentBoard::UnknownPiece(sq.coord, id));
                }
                if self.piece(id).coord() != Some(sq.coord) {
                    return Err(InconsistentBoard::StaleOccupant(sq.coord, id));
                }
            }
        }
        for (id, piece) in self.pieces() {
            if let Some(c) = piece.coord() {
                if self.square(c).occupant != Some(id) {
                    return Err(InconsistentBoard::LostPiece(id, c));
                }
            }
        }
        Ok(())
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// Empty squares flagged as available are shown with `*`.
    ///
    /// # Example
    ///
    /// ```
    /// # use chesstrack::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    ///  |abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

fn parse_layout(s: &str) -> Result<Board, LayoutParseError> {
    type Error = LayoutParseError;

    // FEN goes from row 8 down to row 1
    let mut file = 0_usize;
    let mut rank = 7_usize;
    let mut board = Board::empty();
    for b in s.bytes() {
        match b {
            b'1'..=b'8' => {
                let add = (b - b'0') as usize;
                if file + add > 8 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                file += add;
            }
            b'/' => {
                if file < 8 {
                    return Err(Error::RankUnderflow(Rank::from_index(rank)));
                }
                if rank == 0 {
                    return Err(Error::Overflow);
                }
                rank -= 1;
                file = 0;
            }
            _ => {
                if file >= 8 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                let (kind, side) =
                    PieceKind::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                let coord = Coord::from_parts(File::from_index(file), Rank::from_index(rank));
                board
                    .add_piece(kind, side, coord)
                    .map_err(|_| Error::TooManyPieces)?;
                file += 1;
            }
        };
    }

    if file < 8 {
        return Err(Error::RankUnderflow(Rank::from_index(rank)));
    }
    if rank > 0 {
        return Err(Error::Underflow);
    }

    Ok(board)
}

impl FromStr for Board {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        parse_layout(s)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter().rev() {
            if rank != Rank::R8 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::iter() {
                let piece = match self.occupant(Coord::from_parts(file, rank)) {
                    Some(p) => p,
                    None => {
                        empty += 1;
                        continue;
                    }
                };
                if empty != 0 {
                    write!(f, "{}", (b'0' + empty) as char)?;
                    empty = 0;
                }
                write!(f, "{}", piece.as_char())?;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }
        Ok(())
    }
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const EMPTY: char;
    const AVAILABLE: char;

    fn piece(p: &Piece) -> char;

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter().rev() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                let sq = b.square(Coord::from_parts(file, rank));
                let ch = match b.occupant(sq.coord) {
                    Some(p) => Self::piece(p),
                    None if sq.available => Self::AVAILABLE,
                    None => Self::EMPTY,
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, " {}", Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const EMPTY: char = '.';
    const AVAILABLE: char = '*';

    fn piece(p: &Piece) -> char {
        p.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const EMPTY: char = '.';
    const AVAILABLE: char = '•';

    fn piece(p: &Piece) -> char {
        p.kind().as_utf8_char(p.side())
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}
