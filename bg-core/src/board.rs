//! Board geometry: points, rows, home quadrants, and the two seats'
//! mirrored coordinate frames.
//!
//! The board is 24 points, numbered 1..=24 counterclockwise from P1's
//! head. P2 starts on point 13 and walks the same numbering, wrapping
//! through 24 back to 1, so its coordinates have to be normalized into
//! P1's frame for any cross-seat comparison.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// A point on the board (1..=24). The head/end sentinels are ordinary
/// point values (1 for P1, 13 for P2); `Player::all_at_home` tells the
/// start formation apart from borne-off checkers.
pub type HolePosition = i32;

pub const BOARD_HOLE_COUNT: i32 = 24;
pub const P_CHECKERS_COUNT: usize = 15;
/// Total pip distance one seat covers with all 15 checkers.
pub const GAME_HOLE_LENGTH: i32 = P_CHECKERS_COUNT as i32 * BOARD_HOLE_COUNT;

pub const P1_HEAD: HolePosition = 1;
pub const P1_END: HolePosition = P1_HEAD;
pub const P2_HEAD: HolePosition = 13;
pub const P2_END: HolePosition = P2_HEAD;

pub const TOP_ROW: RangeInclusive<HolePosition> = 13..=24;
pub const BOTTOM_ROW: RangeInclusive<HolePosition> = 1..=12;
pub const P1_HOME: RangeInclusive<HolePosition> = 19..=24;
pub const P2_HOME: RangeInclusive<HolePosition> = 7..=12;

/// Maximum run of own points; creating a 6th consecutive point is the
/// blockade the rules forbid (subject to the opponent-progress escapes).
pub const BLOCK_LINE_LENGTH: i32 = 6;

pub(crate) const P1_BOARD_OUT: HolePosition = 24;
pub(crate) const P2_BOARD_OUT: HolePosition = 12;
/// Past this point a P2 move wraps back to point 1.
pub(crate) const P2_JUMP_BOARD: HolePosition = 24;

/// One of the two player seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    P1,
    P2,
}

impl Seat {
    pub fn opponent(self) -> Seat {
        match self {
            Seat::P1 => Seat::P2,
            Seat::P2 => Seat::P1,
        }
    }

    /// The seat's starting point; doubles as the borne-off sentinel.
    pub fn head(self) -> HolePosition {
        match self {
            Seat::P1 => P1_HEAD,
            Seat::P2 => P2_HEAD,
        }
    }

    pub fn end(self) -> HolePosition {
        self.head()
    }

    pub fn home(self) -> RangeInclusive<HolePosition> {
        match self {
            Seat::P1 => P1_HOME,
            Seat::P2 => P2_HOME,
        }
    }

    pub(crate) fn board_out(self) -> HolePosition {
        match self {
            Seat::P1 => P1_BOARD_OUT,
            Seat::P2 => P2_BOARD_OUT,
        }
    }

    /// First checker id owned by this seat (P1: 0..=14, P2: 15..=29).
    pub fn checker_id_base(self) -> u8 {
        match self {
            Seat::P1 => 0,
            Seat::P2 => P_CHECKERS_COUNT as u8,
        }
    }
}

/// Translate a point between P2's frame and P1's frame. The mapping is
/// its own inverse: 13..=24 shifts down by 12, 1..=12 shifts up by 12.
///
/// # Panics
/// Panics if `position` is outside 1..=24; a position escaping the board
/// is an internal-consistency fault, not a recoverable condition.
pub fn normalize_p2(position: HolePosition) -> HolePosition {
    if TOP_ROW.contains(&position) {
        position - P2_HEAD + 1
    } else if BOTTOM_ROW.contains(&position) {
        position + P2_HEAD - 1
    } else {
        panic!("position off the board: {position}");
    }
}

/// The point straight across the table.
pub fn mirror(position: HolePosition) -> HolePosition {
    25 - position
}
