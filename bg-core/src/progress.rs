//! Race-progress query: how far along the board each seat's checkers are,
//! as a fraction of the total pip distance.

use crate::board::{normalize_p2, Seat, BOARD_HOLE_COUNT, GAME_HOLE_LENGTH};
use crate::entity::Game;

/// Fraction of the full pip distance covered by one seat, in `0.0..=1.0`.
/// A checker on its head contributes 0, a borne-off checker contributes
/// the full 24 points.
pub fn seat_progress(game: &Game, seat: Seat) -> f32 {
    let player = game.player(seat);
    let total: i32 = player
        .checkers
        .iter()
        .map(|c| {
            if player.all_at_home && c.position == seat.end() {
                BOARD_HOLE_COUNT
            } else {
                match seat {
                    Seat::P1 => c.position - 1,
                    Seat::P2 => normalize_p2(c.position) - 1,
                }
            }
        })
        .sum();
    total as f32 / GAME_HOLE_LENGTH as f32
}

/// Progress for both seats as `(p1, p2)`.
pub fn progress(game: &Game) -> (f32, f32) {
    (seat_progress(game, Seat::P1), seat_progress(game, Seat::P2))
}
