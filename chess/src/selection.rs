//! Two-square selection driven by user clicks

use crate::board::Board;
use crate::movegen::{self, KingSafety};
use crate::types::Coord;

use log::trace;

/// Current selection
///
/// The first chosen square is the origin of a move, the second one is its destination.
/// Choosing more squares shifts the pair, so the two most recent choices are always kept.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Selection {
    #[default]
    Empty,
    One {
        first: Coord,
    },
    Two {
        first: Coord,
        second: Coord,
    },
}

impl Selection {
    /// Handles a click on `coord` and updates the square flags of `b`
    ///
    /// When the first square gets selected and holds a piece, its legal destinations (computed
    /// with `safety`) are flagged as available. The flags are cleared once the second square
    /// is chosen.
    ///
    /// # Example
    ///
    /// ```
    /// # use chesstrack::{Board, Coord, movegen::KingSafety, selection::Selection};
    /// # use std::str::FromStr;
    /// #
    /// let mut b = Board::initial();
    /// let mut sel = Selection::default();
    /// let g1 = Coord::from_str("g1").unwrap();
    /// let f3 = Coord::from_str("f3").unwrap();
    ///
    /// sel.choose(&mut b, g1, KingSafety::Geometric);
    /// assert_eq!(b.available().len(), 2);
    /// sel.choose(&mut b, f3, KingSafety::Geometric);
    /// assert_eq!(sel.pair(), Some((g1, f3)));
    /// assert!(b.available().is_empty());
    /// ```
    pub fn choose(&mut self, b: &mut Board, coord: Coord, safety: KingSafety) {
        *self = match *self {
            Selection::Empty => {
                b.set_selected(coord, true);
                if b.occupant_id(coord).is_some() {
                    let dests = movegen::legal_destinations_with(b, coord, safety);
                    b.set_available(dests);
                }
                Selection::One { first: coord }
            }
            Selection::One { first } => {
                b.set_selected(coord, true);
                b.clear_available();
                Selection::Two {
                    first,
                    second: coord,
                }
            }
            Selection::Two { first, second } => {
                if coord == first && coord == second {
                    b.set_selected(coord, false);
                    Selection::Empty
                } else {
                    b.set_selected(first, false);
                    b.set_selected(coord, true);
                    Selection::Two {
                        first: second,
                        second: coord,
                    }
                }
            }
        };
        trace!("chose {}, selection is now {:?}", coord, self);
    }

    /// Returns the origin and destination if both are chosen
    #[inline]
    pub fn pair(&self) -> Option<(Coord, Coord)> {
        match *self {
            Selection::Two { first, second } => Some((first, second)),
            _ => None,
        }
    }

    #[inline]
    pub fn first(&self) -> Option<Coord> {
        match *self {
            Selection::Empty => None,
            Selection::One { first } | Selection::Two { first, .. } => Some(first),
        }
    }

    #[inline]
    pub fn second(&self) -> Option<Coord> {
        match *self {
            Selection::Two { second, .. } => Some(second),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Selection::Empty
    }

    /// Drops the selection and clears all the `selected` and `available` flags on `b`
    pub fn reset(&mut self, b: &mut Board) {
        b.clear_flags();
        *self = Selection::Empty;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitboard::Bitboard;
    use std::str::FromStr;

    fn c(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn bb(squares: &[&str]) -> Bitboard {
        squares.iter().map(|s| c(s)).collect()
    }

    #[test]
    fn test_first_click() {
        let mut b = Board::initial();
        let mut sel = Selection::default();
        sel.choose(&mut b, c("e2"), KingSafety::Geometric);
        assert_eq!(sel, Selection::One { first: c("e2") });
        assert_eq!(b.selected(), bb(&["e2"]));
        assert_eq!(b.available(), bb(&["e3", "e4"]));
        assert!(b.square(c("e4")).is_available());
    }

    #[test]
    fn test_empty_first_click() {
        let mut b = Board::initial();
        let mut sel = Selection::default();
        sel.choose(&mut b, c("e4"), KingSafety::Geometric);
        assert_eq!(sel.first(), Some(c("e4")));
        assert_eq!(sel.second(), None);
        assert_eq!(b.selected(), bb(&["e4"]));
        assert!(b.available().is_empty());
    }

    #[test]
    fn test_shift() {
        let mut b = Board::initial();
        let mut sel = Selection::default();
        sel.choose(&mut b, c("e2"), KingSafety::Geometric);
        sel.choose(&mut b, c("e4"), KingSafety::Geometric);
        assert_eq!(sel.pair(), Some((c("e2"), c("e4"))));
        assert_eq!(b.selected(), bb(&["e2", "e4"]));
        assert!(b.available().is_empty());

        sel.choose(&mut b, c("e5"), KingSafety::Geometric);
        assert_eq!(sel.pair(), Some((c("e4"), c("e5"))));
        assert_eq!(b.selected(), bb(&["e4", "e5"]));
    }

    #[test]
    fn test_same_square() {
        let mut b = Board::initial();
        let mut sel = Selection::default();
        sel.choose(&mut b, c("d2"), KingSafety::Geometric);
        sel.choose(&mut b, c("d2"), KingSafety::Geometric);
        assert_eq!(sel.pair(), Some((c("d2"), c("d2"))));
        assert_eq!(b.selected(), bb(&["d2"]));

        sel.choose(&mut b, c("d2"), KingSafety::Geometric);
        assert!(sel.is_empty());
        assert!(b.selected().is_empty());
        assert!(b.available().is_empty());
    }

    #[test]
    fn test_shift_from_same_square() {
        let mut b = Board::initial();
        let mut sel = Selection::default();
        sel.choose(&mut b, c("d2"), KingSafety::Geometric);
        sel.choose(&mut b, c("d2"), KingSafety::Geometric);
        sel.choose(&mut b, c("d4"), KingSafety::Geometric);
        assert_eq!(sel.pair(), Some((c("d2"), c("d4"))));
        assert_eq!(b.selected(), bb(&["d4"]));
        assert!(!b.square(c("d2")).is_selected());
    }

    #[test]
    fn test_reset() {
        let mut b = Board::initial();
        let mut sel = Selection::default();
        sel.choose(&mut b, c("b1"), KingSafety::Geometric);
        assert_eq!(b.available(), bb(&["a3", "c3"]));
        sel.reset(&mut b);
        assert!(sel.is_empty());
        assert!(b.selected().is_empty());
        assert!(b.available().is_empty());
    }
}
