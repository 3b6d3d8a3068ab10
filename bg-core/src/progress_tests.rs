use crate::board::{Seat, P1_END};
use crate::entity::{Checker, Player};
use crate::progress::{progress, seat_progress};
use crate::{Game, SessionKind};

#[test]
fn fresh_game_has_zero_progress() {
    let game = Game::new(SessionKind::Ai, Seat::P1);
    assert_eq!(progress(&game), (0.0, 0.0));
}

#[test]
fn borne_off_side_has_full_progress() {
    let mut game = Game::new(SessionKind::Ai, Seat::P1);
    let checkers = (0..15)
        .map(|i| Checker::new(i, P1_END, i))
        .collect();
    game.player1 = Player::new(checkers);
    game.player1.all_at_home = true;
    assert_eq!(seat_progress(&game, Seat::P1), 1.0);
}

#[test]
fn both_frames_measure_from_their_own_head() {
    let mut game = Game::new(SessionKind::Ai, Seat::P1);
    // One checker seven points along in each frame: P1 on 8, P2 on 20.
    game.player1.checkers[0].position = 8;
    game.player2.checkers[0].position = 20;
    let (p1, p2) = progress(&game);
    assert_eq!(p1, p2);
    assert!((p1 - 7.0 / 360.0).abs() < f32::EPSILON);
}
