//! Move validation and application

use crate::between;
use crate::board::{Board, PlaceError};
use crate::movegen::{self, KingSafety};
use crate::piece::PieceId;
use crate::types::{Coord, PieceKind};

use std::fmt;

use log::{debug, trace};
use thiserror::Error;

/// Move kind
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Move to an empty square
    Quiet,
    /// Move onto a square held by the other side
    Capture,
    /// King and rook of the same side move together
    Castle,
}

/// Reason why a move was not applied
///
/// Rejections are ordinary outcomes of [`attempt_move()`] and leave the board unchanged.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum IllegalMove {
    /// Origin square is empty
    #[error("no piece on {0}")]
    NoPiece(Coord),
    /// Destination is not among the legal destinations of the piece
    #[error("{dst} is not reachable from {src}")]
    NotReachable { src: Coord, dst: Coord },
    /// Destination holds a piece of the same side and the move is not a castle
    #[error("{0} is occupied by a piece of the same side")]
    OwnPiece(Coord),
    /// King or rook has already moved
    #[error("cannot castle: the king or the rook has already moved")]
    CastleMoved,
    /// King and rook are not on the same row or stand too close
    #[error("cannot castle: the king and the rook are not lined up")]
    CastleMisaligned,
    /// A square between the king and the rook is occupied
    #[error("cannot castle: {0} is occupied")]
    CastleBlocked(Coord),
    /// The king would leave, cross or land on an attacked square
    #[error("cannot castle: {0} is attacked")]
    CastleThroughCheck(Coord),
}

/// Rook part of a castle
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RookMove {
    pub piece: PieceId,
    pub src: Coord,
    pub dst: Coord,
}

/// Applied move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    kind: MoveKind,
    piece: PieceId,
    src: Coord,
    dst: Coord,
    captured: Option<PieceId>,
    rook: Option<RookMove>,
}

impl MoveRecord {
    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the moved piece, the king for castling
    #[inline]
    pub const fn piece(&self) -> PieceId {
        self.piece
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    /// Returns the square the piece landed on
    ///
    /// For castling, this is the final square of the king, not the square of the rook.
    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    #[inline]
    pub const fn captured(&self) -> Option<PieceId> {
        self.captured
    }

    #[inline]
    pub const fn rook(&self) -> Option<RookMove> {
        self.rook
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.kind {
            MoveKind::Quiet => write!(f, "{}-{}", self.src, self.dst),
            MoveKind::Capture => write!(f, "{}x{}", self.src, self.dst),
            MoveKind::Castle => write!(f, "{}-{} (castle)", self.src, self.dst),
        }
    }
}

/// Result of [`attempt_move()`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Quiet(MoveRecord),
    Capture(MoveRecord),
    Castle(MoveRecord),
    Rejected(IllegalMove),
}

impl MoveOutcome {
    /// Returns the applied move, or `None` if the move was rejected
    pub fn record(&self) -> Option<&MoveRecord> {
        match self {
            MoveOutcome::Quiet(r) | MoveOutcome::Capture(r) | MoveOutcome::Castle(r) => Some(r),
            MoveOutcome::Rejected(_) => None,
        }
    }

    #[inline]
    pub fn is_applied(&self) -> bool {
        self.record().is_some()
    }

    /// Converts the outcome into a `Result`, for callers who treat rejection as an error
    pub fn into_result(self) -> Result<MoveRecord, IllegalMove> {
        match self {
            MoveOutcome::Quiet(r) | MoveOutcome::Capture(r) | MoveOutcome::Castle(r) => Ok(r),
            MoveOutcome::Rejected(e) => Err(e),
        }
    }
}

/// Puts the piece `id` onto `dst` and counts the move
///
/// The board and the move counter stay untouched on error.
fn transfer(b: &mut Board, id: PieceId, dst: Coord) -> Result<(), PlaceError> {
    b.place_piece(id, dst)?;
    let piece = b.piece_mut(id);
    piece.move_count = piece.move_count.saturating_add(1);
    Ok(())
}

/// Validates the castle of the king on `king_src` with the rook on `rook_src`
///
/// Returns the final squares of the king and the rook.
fn validate_castle(
    b: &Board,
    king_src: Coord,
    rook_src: Coord,
    safety: KingSafety,
) -> Result<(Coord, Coord), IllegalMove> {
    let (king, rook) = match (b.occupant(king_src), b.occupant(rook_src)) {
        (Some(k), Some(r)) => (k, r),
        _ => return Err(IllegalMove::NoPiece(king_src)),
    };
    if king.has_moved() || rook.has_moved() || !king.is_at_initial() || !rook.is_at_initial() {
        return Err(IllegalMove::CastleMoved);
    }
    if king_src.row() != rook_src.row() || (king_src.col() - rook_src.col()).abs() < 3 {
        return Err(IllegalMove::CastleMisaligned);
    }
    if let Some(blocker) = (between::strict(king_src, rook_src) & b.occupied())
        .into_iter()
        .next()
    {
        return Err(IllegalMove::CastleBlocked(blocker));
    }

    let step = (rook_src.col() - king_src.col()).signum();
    let king_dst = king_src.try_shift(0, 2 * step);
    let rook_dst = king_src.try_shift(0, step);
    let (king_dst, rook_dst) = match (king_dst, rook_dst) {
        (Some(k), Some(r)) => (k, r),
        _ => return Err(IllegalMove::CastleMisaligned),
    };

    if safety == KingSafety::Guarded {
        let them = king.side().inv();
        for c in [king_src, rook_dst, king_dst] {
            if movegen::is_attacked(b, c, them) {
                return Err(IllegalMove::CastleThroughCheck(c));
            }
        }
    }
    Ok((king_dst, rook_dst))
}

/// Validates the move from `src` to `dst` and applies it to `b`
///
/// The decision goes in the following order:
///
/// 1. `dst` is empty and legal: quiet move.
/// 2. `dst` holds a piece of the other side and is legal: capture. The taken piece is moved
///    off the board and marked as captured.
/// 3. `dst` holds a piece of the same side, the piece on `src` is a king and the piece on `dst`
///    is a rook: castle. It is applied only if neither piece has moved and all the squares
///    between them are empty. The king goes two squares towards the rook, and the rook lands
///    on the square the king crossed.
/// 4. Otherwise, the move is rejected and the board is not changed.
///
/// # Example
///
/// ```
/// # use chesstrack::{Board, Coord, moves::{self, MoveOutcome}, movegen::KingSafety};
/// # use std::str::FromStr;
/// #
/// let mut b = Board::initial();
/// let e2 = Coord::from_str("e2").unwrap();
/// let e4 = Coord::from_str("e4").unwrap();
/// let e5 = Coord::from_str("e5").unwrap();
/// let safety = KingSafety::Geometric;
/// assert!(matches!(moves::attempt_move(&mut b, e2, e4, safety), MoveOutcome::Quiet(_)));
/// assert!(matches!(moves::attempt_move(&mut b, e4, e5, safety), MoveOutcome::Quiet(_)));
/// assert!(matches!(moves::attempt_move(&mut b, e2, e4, safety), MoveOutcome::Rejected(_)));
/// ```
pub fn attempt_move(b: &mut Board, src: Coord, dst: Coord, safety: KingSafety) -> MoveOutcome {
    let outcome = do_attempt_move(b, src, dst, safety);
    match &outcome {
        MoveOutcome::Rejected(reason) => debug!("rejected move {}-{}: {}", src, dst, reason),
        _ => debug!("applied move {:?}", outcome.record()),
    }
    outcome
}

fn do_attempt_move(b: &mut Board, src: Coord, dst: Coord, safety: KingSafety) -> MoveOutcome {
    let (id, piece) = match b.occupant_id(src) {
        Some(id) => (id, *b.piece(id)),
        None => return MoveOutcome::Rejected(IllegalMove::NoPiece(src)),
    };
    trace!("attempting move of {} from {} to {}", piece, src, dst);

    let target = b.occupant_id(dst).map(|t| (t, *b.piece(t)));
    match target {
        Some((rook_id, rook)) if rook.side() == piece.side() => {
            if piece.kind() != PieceKind::King || rook.kind() != PieceKind::Rook {
                return MoveOutcome::Rejected(IllegalMove::OwnPiece(dst));
            }
            let (king_dst, rook_dst) = match validate_castle(b, src, dst, safety) {
                Ok(squares) => squares,
                Err(e) => return MoveOutcome::Rejected(e),
            };
            // Both target squares lie strictly between the king and the rook, checked empty above
            let placed = transfer(b, rook_id, rook_dst).and_then(|()| transfer(b, id, king_dst));
            debug_assert_eq!(placed, Ok(()));
            MoveOutcome::Castle(MoveRecord {
                kind: MoveKind::Castle,
                piece: id,
                src,
                dst: king_dst,
                captured: None,
                rook: Some(RookMove {
                    piece: rook_id,
                    src: dst,
                    dst: rook_dst,
                }),
            })
        }
        _ => {
            if !movegen::legal_destinations_with(b, src, safety).has(dst) {
                return MoveOutcome::Rejected(IllegalMove::NotReachable { src, dst });
            }
            let captured = target.map(|(t, _)| t);
            if let Some(t) = captured {
                b.capture_piece(t);
            }
            // `dst` is empty now: either it was, or its occupant was just captured
            let placed = transfer(b, id, dst);
            debug_assert_eq!(placed, Ok(()));
            let record = MoveRecord {
                kind: if captured.is_some() {
                    MoveKind::Capture
                } else {
                    MoveKind::Quiet
                },
                piece: id,
                src,
                dst,
                captured,
                rook: None,
            };
            match captured {
                Some(_) => MoveOutcome::Capture(record),
                None => MoveOutcome::Quiet(record),
            }
        }
    }
}
