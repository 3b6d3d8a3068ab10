use bg_core::board::Seat;
use bg_core::entity::Die;
use bg_core::{Game, SessionKind};

use crate::encode::{
    decode_action, encode_action, encode_full, encode_moves, ACTION_SPACE, FULL_INPUT, PLANE_LEN,
};

fn opening_game(dice: &[u8]) -> Game {
    let mut game = Game::new(SessionKind::Ai, Seat::P1);
    game.dice = dice
        .iter()
        .enumerate()
        .map(|(i, &v)| Die::new(v, i as u64))
        .collect();
    game
}

#[test]
fn action_codec_round_trips_the_whole_space() {
    for index in 0..ACTION_SPACE {
        let (slot, to) = decode_action(index);
        assert_eq!(encode_action(slot, to), index);
    }
}

#[test]
#[should_panic(expected = "out of range")]
fn decode_rejects_indices_past_the_space() {
    decode_action(ACTION_SPACE);
}

#[test]
#[should_panic(expected = "off the board")]
fn encode_rejects_positions_off_the_board() {
    encode_action(0, 25);
}

#[test]
fn opening_planes_mark_every_checker() {
    let input = encode_full(&opening_game(&[6, 5]));
    assert_eq!(input.len(), FULL_INPUT);

    // First seat to move: its 15 checkers stacked on 1, the second
    // seat's on 13.
    let plane0 = &input[..PLANE_LEN];
    let plane1 = &input[PLANE_LEN..2 * PLANE_LEN];
    assert_eq!(plane0.iter().sum::<f32>(), 15.0);
    assert_eq!(plane1.iter().sum::<f32>(), 15.0);
    for row in 0..15 {
        assert_eq!(plane0[row * 24], 1.0);
        assert_eq!(plane1[row * 24 + 12], 1.0);
    }
}

#[test]
fn moves_plane_marks_destinations_for_every_stacked_slot() {
    // Opening roll (6, 5): every checker shares the head, so each of the
    // 15 slots carries the same three destinations (6, 7, 12).
    let game = opening_game(&[6, 5]);
    let plane = encode_moves(&game);
    assert_eq!(plane.iter().sum::<f32>(), 45.0);
    for slot in 0..15 {
        assert_eq!(plane[encode_action(slot, 6)], 1.0);
        assert_eq!(plane[encode_action(slot, 7)], 1.0);
        assert_eq!(plane[encode_action(slot, 12)], 1.0);
        assert_eq!(plane[encode_action(slot, 3)], 0.0);
    }
}

#[test]
fn moves_plane_matches_the_full_encoding() {
    let game = opening_game(&[3, 1]);
    let full = encode_full(&game);
    let moves = encode_moves(&game);
    assert_eq!(&full[2 * PLANE_LEN..], &moves[..]);
}
