use crate::types::{Rank, Side};

pub const fn back_rank(s: Side) -> Rank {
    match s {
        Side::Player => Rank::R1,
        Side::Opponent => Rank::R8,
    }
}

pub const fn pawn_rank(s: Side) -> Rank {
    match s {
        Side::Player => Rank::R2,
        Side::Opponent => Rank::R7,
    }
}

/// Row delta of a single pawn step
pub const fn pawn_forward_delta(s: Side) -> i32 {
    match s {
        Side::Player => 1,
        Side::Opponent => -1,
    }
}
