use crate::types::{Coord, Rank};
use derive_more::{BitAnd, BitOr, Not};
use std::fmt;
use std::iter::FromIterator;

/// Set of squares
///
/// Bit `i` is set iff the square with index `i` (see [`Coord`]) belongs to the set. Iteration
/// goes in ascending index order, i.e. row by row starting from a1.
#[derive(Default, Copy, Clone, PartialEq, Eq, Hash, BitAnd, BitOr, Not)]
pub struct Bitboard(u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);

    #[inline]
    pub const fn from_coord(coord: Coord) -> Bitboard {
        Bitboard(1_u64 << coord.index())
    }

    /// Returns all the squares of row `rank`
    #[inline]
    pub const fn from_rank(rank: Rank) -> Bitboard {
        Bitboard(0xff_u64 << (rank.index() * 8))
    }

    #[inline]
    pub const fn with(self, coord: Coord) -> Bitboard {
        Bitboard(self.0 | Bitboard::from_coord(coord).0)
    }

    #[inline]
    pub const fn without(self, coord: Coord) -> Bitboard {
        Bitboard(self.0 & !Bitboard::from_coord(coord).0)
    }

    #[inline]
    pub fn set(&mut self, coord: Coord) {
        *self = self.with(coord);
    }

    #[inline]
    pub const fn has(&self, coord: Coord) -> bool {
        self.0 & Bitboard::from_coord(coord).0 != 0
    }

    /// Returns the number of squares in the set
    #[inline]
    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_nonempty(&self) -> bool {
        !self.is_empty()
    }
}

impl FromIterator<Coord> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Bitboard {
        iter.into_iter().fold(Bitboard::EMPTY, Bitboard::with)
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "Bitboard({})", self)
    }
}

/// Prints the rows from 8 down to 1, each row from file `a` to file `h`
impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, rank) in Rank::iter().rev().enumerate() {
            if i != 0 {
                write!(f, "/")?;
            }
            let row = (self.0 >> (rank.index() * 8)) as u8;
            write!(f, "{:08b}", row.reverse_bits())?;
        }
        Ok(())
    }
}

/// Iterator over the squares of a [`Bitboard`]
pub struct Iter(u64);

impl Iterator for Iter {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.0 == 0 {
            return None;
        }
        let idx = self.0.trailing_zeros() as usize;
        // Drop the lowest set bit
        self.0 &= self.0 - 1;
        Some(Coord::from_index(idx))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Iter {}

impl IntoIterator for Bitboard {
    type Item = Coord;
    type IntoIter = Iter;

    #[inline]
    fn into_iter(self) -> Iter {
        Iter(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::File;

    fn sq(file: File, rank: Rank) -> Coord {
        Coord::from_parts(file, rank)
    }

    #[test]
    fn test_iter() {
        let bb: Bitboard = [sq(File::A, Rank::R4), sq(File::E, Rank::R2), sq(File::F, Rank::R3)]
            .into_iter()
            .collect();
        assert_eq!(
            bb.into_iter().collect::<Vec<_>>(),
            vec![sq(File::E, Rank::R2), sq(File::F, Rank::R3), sq(File::A, Rank::R4)],
        );
        assert_eq!(bb.into_iter().len(), 3);
        assert_eq!(bb.into_iter().collect::<Bitboard>(), bb);
        assert_eq!(Bitboard::EMPTY.into_iter().next(), None);
    }

    #[test]
    fn test_set_ops() {
        let a4 = sq(File::A, Rank::R4);
        let e2 = sq(File::E, Rank::R2);
        let f3 = sq(File::F, Rank::R3);

        let left = Bitboard::EMPTY.with(a4).with(e2);
        let right = Bitboard::from_coord(e2).with(f3);
        assert_eq!(left & right, Bitboard::from_coord(e2));
        assert_eq!(left | right, Bitboard::EMPTY.with(a4).with(e2).with(f3));
        assert_eq!(left.without(a4), Bitboard::from_coord(e2));
        assert_eq!((!left).len(), 62);
        assert!(!(!left).has(a4));

        let row = Bitboard::from_rank(Rank::R2);
        assert_eq!(row.len(), 8);
        assert!(row.has(e2));
        assert!(!row.has(f3));

        let mut bb = Bitboard::EMPTY;
        assert!(bb.is_empty());
        bb.set(f3);
        assert!(bb.is_nonempty());
        assert!(bb.has(f3));
    }

    #[test]
    fn test_format() {
        let bb = Bitboard::EMPTY
            .with(sq(File::A, Rank::R4))
            .with(sq(File::E, Rank::R2))
            .with(sq(File::F, Rank::R3))
            .with(sq(File::H, Rank::R8));
        assert_eq!(
            bb.to_string(),
            "00000001/00000000/00000000/00000000/10000000/00000100/00001000/00000000"
        );
    }
}
