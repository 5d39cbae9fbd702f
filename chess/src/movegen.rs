//! Legal destination generation
//!
//! All the functions here are pure: they only read the board.

use crate::between;
use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::geometry;
use crate::piece::Piece;
use crate::registry::{self, Movement};
use crate::types::{Coord, PieceKind, Side};

/// Second pass applied on top of the geometric rules
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KingSafety {
    /// Only the movement rules of each piece kind are considered
    #[default]
    Geometric,
    /// The king may not step onto a square attacked by the other side, and may not castle out
    /// of, through or into an attacked square
    ///
    /// Moves of other pieces are still not checked for pins or discovered checks.
    Guarded,
}

/// Returns the squares the occupant of `src` may move to
///
/// Returns an empty set if `src` is empty. Same as [`legal_destinations_with()`] with
/// [`KingSafety::Geometric`].
///
/// # Example
///
/// ```
/// # use chesstrack::{Board, Coord, movegen};
/// # use std::str::FromStr;
/// #
/// let b = Board::initial();
/// let b1 = Coord::from_str("b1").unwrap();
/// let mut dsts: Vec<_> = movegen::legal_destinations(&b, b1)
///     .into_iter()
///     .map(|c| c.to_string())
///     .collect();
/// dsts.sort();
/// assert_eq!(dsts, vec!["a3", "c3"]);
/// ```
#[inline]
pub fn legal_destinations(b: &Board, src: Coord) -> Bitboard {
    legal_destinations_with(b, src, KingSafety::Geometric)
}

/// Returns the squares the occupant of `src` may move to under the given `safety` policy
pub fn legal_destinations_with(b: &Board, src: Coord, safety: KingSafety) -> Bitboard {
    let piece = match b.occupant(src) {
        Some(p) => p,
        None => return Bitboard::EMPTY,
    };
    let res = geometric_destinations(b, src, piece);
    match (safety, piece.kind()) {
        (KingSafety::Guarded, PieceKind::King) => res
            .into_iter()
            .filter(|&dst| is_king_safe_after(b, src, dst, piece.side()))
            .collect(),
        _ => res,
    }
}

fn geometric_destinations(b: &Board, src: Coord, piece: &Piece) -> Bitboard {
    let ours = b.occupied_by(piece.side());
    match registry::movement(piece.kind()) {
        Movement::Pawn => pawn(b, src, piece),
        Movement::Leaper(deltas) => leaper(src, deltas) & !ours,
        Movement::Slider(dirs) => slider(b.occupied(), src, dirs) & !ours,
    }
}

fn pawn(b: &Board, src: Coord, piece: &Piece) -> Bitboard {
    let side = piece.side();
    let forward = geometry::pawn_forward_delta(side);
    let occupied = b.occupied();

    let mut res = Bitboard::EMPTY;
    if let Some(one) = src.try_shift(forward, 0) {
        if !occupied.has(one) {
            res.set(one);
            if src == piece.initial() {
                if let Some(two) = one.try_shift(forward, 0) {
                    if !occupied.has(two) {
                        res.set(two);
                    }
                }
            }
        }
    }
    res | (pawn_attacks(src, side) & b.occupied_by(side.inv()))
}

/// Returns the squares a pawn of `side` standing on `src` attacks
pub fn pawn_attacks(src: Coord, side: Side) -> Bitboard {
    let forward = geometry::pawn_forward_delta(side);
    [-1, 1]
        .into_iter()
        .filter_map(|dc| src.try_shift(forward, dc))
        .collect()
}

/// Returns the squares reachable by a single jump by one of `deltas`
pub fn leaper(src: Coord, deltas: &[(i32, i32)]) -> Bitboard {
    deltas
        .iter()
        .filter_map(|&(dr, dc)| src.try_shift(dr, dc))
        .collect()
}

/// Casts rays from `src` along `dirs`
///
/// Each ray stops at the first square from `occupied` and includes it.
pub fn slider(occupied: Bitboard, src: Coord, dirs: &[(i32, i32)]) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    for &(dr, dc) in dirs {
        let mut cur = src;
        while let Some(next) = cur.try_shift(dr, dc) {
            res.set(next);
            if occupied.has(next) {
                break;
            }
            cur = next;
        }
    }
    res
}

fn attacks(kind: PieceKind, side: Side, src: Coord, dst: Coord, occupied: Bitboard) -> bool {
    let clear = || (between::strict(src, dst) & occupied).is_empty();
    match kind {
        PieceKind::Pawn => pawn_attacks(src, side).has(dst),
        PieceKind::Knight => leaper(src, &registry::KNIGHT_DELTAS).has(dst),
        PieceKind::King => leaper(src, &registry::KING_DELTAS).has(dst),
        PieceKind::Bishop => between::is_diagonal(src, dst) && clear(),
        PieceKind::Rook => between::is_straight(src, dst) && clear(),
        PieceKind::Queen => between::direction(src, dst).is_some() && clear(),
    }
}

fn attackers_with(b: &Board, dst: Coord, side: Side, occupied: Bitboard) -> Bitboard {
    b.live_pieces()
        .filter(|(_, p)| p.side() == side)
        .filter_map(|(_, p)| p.coord().map(|c| (c, p.kind())))
        .filter(|&(c, kind)| c != dst && occupied.has(c) && attacks(kind, side, c, dst, occupied))
        .map(|(c, _)| c)
        .collect()
}

/// Returns the squares of the pieces of `side` which attack `dst`
///
/// Pawns attack diagonally forward only; sliders are blocked by any piece in between.
#[inline]
pub fn attackers(b: &Board, dst: Coord, side: Side) -> Bitboard {
    attackers_with(b, dst, side, b.occupied())
}

/// Returns `true` if any piece of `by` attacks `dst`
#[inline]
pub fn is_attacked(b: &Board, dst: Coord, by: Side) -> bool {
    attackers(b, dst, by).is_nonempty()
}

fn is_king_safe_after(b: &Board, src: Coord, dst: Coord, side: Side) -> bool {
    let occupied = b.occupied().without(src).with(dst);
    attackers_with(b, dst, side.inv(), occupied).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::str::FromStr;

    fn c(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn set(coords: &[&str]) -> Bitboard {
        coords.iter().map(|s| c(s)).collect()
    }

    fn dsts(layout: &str, src: &str) -> Bitboard {
        legal_destinations(&Board::from_layout(layout).unwrap(), c(src))
    }

    #[test]
    fn test_empty_square() {
        let b = Board::initial();
        assert_eq!(legal_destinations(&b, c("e4")), Bitboard::EMPTY);
    }

    #[test]
    fn test_pawn() {
        assert_eq!(dsts("8/8/8/8/8/8/4P3/8", "e2"), set(&["e3", "e4"]));
        assert_eq!(dsts("8/4p3/8/8/8/8/8/8", "e7"), set(&["e6", "e5"]));

        // Blocked on the second square
        assert_eq!(dsts("8/8/8/8/4p3/8/4P3/8", "e2"), set(&["e3"]));
        // Blocked right in front, even though the second square is free
        assert_eq!(dsts("8/8/8/8/8/4n3/4P3/8", "e2"), set(&[]));
        // Captures only opposing pieces
        assert_eq!(dsts("8/8/8/8/8/3p1N2/4P3/8", "e2"), set(&["d3", "e3", "e4"]));

        // No double step away from the initial square
        let mut b = Board::from_layout("8/8/8/8/8/8/4P3/8").unwrap();
        let id = b.occupant_id(c("e2")).unwrap();
        b.place_piece(id, c("e3")).unwrap();
        assert_eq!(legal_destinations(&b, c("e3")), set(&["e4"]));

        // Last row: nowhere to go
        assert_eq!(dsts("4P3/8/8/8/8/8/8/8", "e8"), set(&[]));
    }

    #[test]
    fn test_knight() {
        let b = Board::initial();
        assert_eq!(legal_destinations(&b, c("b1")), set(&["a3", "c3"]));
        assert_eq!(legal_destinations(&b, c("g8")), set(&["f6", "h6"]));
        assert_eq!(
            dsts("8/8/8/3p4/8/4N3/2P5/8", "e3"),
            set(&["d1", "f1", "g2", "g4", "d5", "f5", "c4"])
        );
    }

    #[test]
    fn test_bishop() {
        assert_eq!(
            dsts("8/8/8/8/8/8/8/2B5", "c1"),
            set(&["b2", "a3", "d2", "e3", "f4", "g5", "h6"])
        );
        assert_eq!(dsts("8/8/8/8/5p2/8/1P6/2B5", "c1"), set(&["d2", "e3", "f4"]));
        assert_eq!(legal_destinations(&Board::initial(), c("c1")), Bitboard::EMPTY);
    }

    #[test]
    fn test_rook_queen_king() {
        assert_eq!(dsts("8/8/8/8/8/8/P7/R3K3", "a1"), set(&["b1", "c1", "d1"]));
        assert_eq!(dsts("8/8/8/8/8/8/P7/R3k3", "a1"), set(&["b1", "c1", "d1", "e1"]));
        assert_eq!(
            dsts("8/8/8/8/8/8/2pP4/3Q4", "d1"),
            set(&["a1", "b1", "c1", "e1", "f1", "g1", "h1", "c2", "e2", "f3", "g4", "h5"])
        );
        assert_eq!(dsts("8/8/8/8/8/8/8/4K3", "e1"), set(&["d1", "f1", "d2", "e2", "f2"]));
        assert_eq!(legal_destinations(&Board::initial(), c("e1")), Bitboard::EMPTY);
    }

    #[test]
    fn test_king_safety() {
        let b = Board::from_layout("8/8/8/8/8/8/8/r3K3").unwrap();
        assert_eq!(legal_destinations(&b, c("e1")), set(&["d1", "f1", "d2", "e2", "f2"]));
        // Row 1 is covered by the rook
        assert_eq!(
            legal_destinations_with(&b, c("e1"), KingSafety::Guarded),
            set(&["d2", "e2", "f2"])
        );

        let b = Board::from_layout("8/8/8/8/8/8/3r4/4K3").unwrap();
        assert_eq!(legal_destinations_with(&b, c("e1"), KingSafety::Guarded), set(&["d2", "f1"]));

        // Safety pass never touches other pieces
        let b = Board::from_layout("8/8/8/8/8/8/r7/1N2K3").unwrap();
        assert_eq!(
            legal_destinations_with(&b, c("b1"), KingSafety::Guarded),
            legal_destinations(&b, c("b1"))
        );
    }

    #[test]
    fn test_attackers() {
        let b = Board::from_layout("8/8/8/3p4/4K3/8/8/4r1B1").unwrap();
        assert_eq!(attackers(&b, c("e4"), Side::Opponent), set(&["d5", "e1"]));
        assert!(!is_attacked(&b, c("e4"), Side::Player));
        // Pawns only attack forward
        assert!(!attackers(&b, c("e6"), Side::Opponent).has(c("d5")));
        assert!(is_attacked(&b, c("f2"), Side::Player));
    }

    fn random_board(rng: &mut StdRng) -> Board {
        let mut b = Board::empty();
        let count = rng.gen_range(2..=24);
        for _ in 0..count {
            let coord = Coord::from_index(rng.gen_range(0..64));
            let kind = PieceKind::iter().nth(rng.gen_range(0..PieceKind::COUNT)).unwrap();
            let side = if rng.gen_bool(0.5) { Side::Player } else { Side::Opponent };
            let _ = b.add_piece(kind, side, coord);
        }
        b
    }

    #[test]
    fn test_properties() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let b = random_board(&mut rng);
            for (_, piece) in b.live_pieces() {
                let src = piece.coord().unwrap();
                let res = legal_destinations(&b, src);
                assert!(!res.has(src));
                for dst in res {
                    let (dr, dc) = ((dst.row() - src.row()).abs(), (dst.col() - src.col()).abs());
                    if let Some(other) = b.occupant(dst) {
                        assert_ne!(other.side(), piece.side());
                    }
                    match piece.kind() {
                        PieceKind::Knight => {
                            let mut d = [dr, dc];
                            d.sort_unstable();
                            assert_eq!(d, [1, 2]);
                        }
                        PieceKind::Bishop => assert_eq!(dr, dc),
                        PieceKind::Rook => assert!(dr == 0 || dc == 0),
                        PieceKind::Queen => assert!(dr == dc || dr == 0 || dc == 0),
                        PieceKind::King => assert!(dr.max(dc) == 1),
                        PieceKind::Pawn => assert!(dc <= 1 && dr <= 2),
                    }
                }
                let guarded = legal_destinations_with(&b, src, KingSafety::Guarded);
                assert_eq!(guarded & res, guarded);
            }
        }
    }

    #[test]
    fn test_pawn_double_step_property() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let b = random_board(&mut rng);
            for (_, piece) in b.live_pieces() {
                if piece.kind() != PieceKind::Pawn {
                    continue;
                }
                let src = piece.coord().unwrap();
                let fwd = geometry::pawn_forward_delta(piece.side());
                let (one, two) = match (src.try_shift(fwd, 0), src.try_shift(2 * fwd, 0)) {
                    (Some(one), Some(two)) => (one, two),
                    _ => continue,
                };
                let expected = b.occupant(one).is_none() && b.occupant(two).is_none();
                assert_eq!(legal_destinations(&b, src).has(two), expected);
            }
        }
    }
}
