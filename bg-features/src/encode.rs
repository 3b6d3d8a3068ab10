//! Fixed-width feature planes for model input, and the flat action
//! index the model answers with.
//!
//! Three planes of 15 rows by 24 columns: the turn seat's occupancy,
//! the opponent's occupancy, and the turn seat's legal destinations per
//! checker slot. A slot is a checker id relative to its seat's id base,
//! so a slot means the same physical checker across the whole game.

use bg_core::board::{HolePosition, BOARD_HOLE_COUNT, P_CHECKERS_COUNT};
use bg_core::rules::moves_by_checker;
use bg_core::{Game, Player};

pub const PLANE_LEN: usize = P_CHECKERS_COUNT * BOARD_HOLE_COUNT as usize;
pub const FULL_INPUT: usize = 3 * PLANE_LEN;
pub const MOVES_INPUT: usize = PLANE_LEN;

/// One output per (slot, destination) pair.
pub const ACTION_SPACE: usize = PLANE_LEN;

/// All three planes: [`MOVES_INPUT`] values per plane, occupancy for
/// the seat to move and its opponent then legal destinations for the
/// seat to move.
pub fn encode_full(game: &Game) -> [f32; FULL_INPUT] {
    let mut out = [0.0; FULL_INPUT];
    let seat = game.turn_player;
    occupancy_plane(game.player(seat), &mut out[..PLANE_LEN]);
    occupancy_plane(game.player(seat.opponent()), &mut out[PLANE_LEN..2 * PLANE_LEN]);
    moves_plane(game, &mut out[2 * PLANE_LEN..]);
    out
}

/// The legal-destination plane alone.
pub fn encode_moves(game: &Game) -> [f32; MOVES_INPUT] {
    let mut out = [0.0; MOVES_INPUT];
    moves_plane(game, &mut out);
    out
}

/// Flat action index for moving a checker slot to a point.
///
/// # Panics
/// Panics when `to` is off the board.
pub fn encode_action(slot: usize, to: HolePosition) -> usize {
    assert!(slot < P_CHECKERS_COUNT, "checker slot out of range: {slot}");
    assert!(
        (1..=BOARD_HOLE_COUNT).contains(&to),
        "destination off the board: {to}"
    );
    slot * BOARD_HOLE_COUNT as usize + (to as usize - 1)
}

/// Inverse of [`encode_action`].
///
/// # Panics
/// Panics when `index` is outside the action space.
pub fn decode_action(index: usize) -> (usize, HolePosition) {
    assert!(index < ACTION_SPACE, "action index out of range: {index}");
    let slot = index / BOARD_HOLE_COUNT as usize;
    let to = (index % BOARD_HOLE_COUNT as usize) as HolePosition + 1;
    (slot, to)
}

fn occupancy_plane(player: &Player, out: &mut [f32]) {
    for (row, checker) in player.checkers.iter().enumerate() {
        out[row * BOARD_HOLE_COUNT as usize + (checker.position as usize - 1)] = 1.0;
    }
}

fn moves_plane(game: &Game, out: &mut [f32]) {
    let seat = game.turn_player;
    let player = game.player(seat);
    let opponent = game.player(seat.opponent());
    let grouped = moves_by_checker(player, opponent, &game.dice, seat);
    let base = seat.checker_id_base();

    for slot in 0..P_CHECKERS_COUNT {
        let Some(checker) = player.checker_by_id(base + slot as u8) else {
            continue;
        };
        let Some((_, moves)) = grouped.iter().find(|(c, _)| c.position == checker.position)
        else {
            continue;
        };
        for m in moves {
            out[slot * BOARD_HOLE_COUNT as usize + (m.to as usize - 1)] = 1.0;
        }
    }
}
