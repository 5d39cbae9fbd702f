use crate::bitboard::Bitboard;
use crate::types::Coord;

/// Returns the unit step from `src` towards `dst` if they share a row, a column or a diagonal
pub fn direction(src: Coord, dst: Coord) -> Option<(i32, i32)> {
    if src == dst {
        return None;
    }
    let (dr, dc) = (dst.row() - src.row(), dst.col() - src.col());
    if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
        return None;
    }
    Some((dr.signum(), dc.signum()))
}

/// Returns the squares strictly between `src` and `dst`
///
/// The result is empty if the squares are adjacent or don't lie on a common line.
pub fn strict(src: Coord, dst: Coord) -> Bitboard {
    let (dr, dc) = match direction(src, dst) {
        Some(d) => d,
        None => return Bitboard::EMPTY,
    };
    let mut res = Bitboard::EMPTY;
    let mut cur = src;
    while let Some(next) = cur.try_shift(dr, dc) {
        if next == dst {
            break;
        }
        res.set(next);
        cur = next;
    }
    res
}

#[inline]
pub fn is_diagonal(src: Coord, dst: Coord) -> bool {
    matches!(direction(src, dst), Some((dr, dc)) if dr != 0 && dc != 0)
}

#[inline]
pub fn is_straight(src: Coord, dst: Coord) -> bool {
    matches!(direction(src, dst), Some((dr, dc)) if dr == 0 || dc == 0)
}
