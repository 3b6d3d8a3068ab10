use bg_core::board::Seat;
use bg_core::config::{SessionConfig, StartSeat};

use crate::session::{GameSession, MoveOutcome, SessionError};

fn session(seed: u64) -> GameSession {
    GameSession::new(&SessionConfig {
        seed,
        start_seat: StartSeat::P1,
    })
}

#[test]
fn same_seed_replays_the_same_game() {
    let mut a = session(11);
    let mut b = session(11);
    for _ in 0..60 {
        if a.is_over() {
            break;
        }
        let seat = a.turn_player();
        let oa = a.ai_move(seat).unwrap();
        let ob = b.ai_move(seat).unwrap();
        assert_eq!(oa, ob);
        assert_eq!(a.game(), b.game());
    }
}

#[test]
fn out_of_turn_move_is_rejected() {
    let mut s = session(0);
    let err = s.ai_move(Seat::P2).unwrap_err();
    assert!(matches!(err, SessionError::WrongTurn { .. }));
}

#[test]
fn illegal_external_move_leaves_the_game_untouched() {
    let mut s = session(3);
    let before = s.game().clone();
    // No opening roll reaches 24 from the head.
    let outcome = s.external_move(Seat::P1, 0, 24).unwrap();
    assert_eq!(
        outcome,
        MoveOutcome::Invalid {
            checker_id: 0,
            to: 24
        }
    );
    assert_eq!(s.game(), &before);
    assert_eq!(s.external_moves_accepted(), 0);
}

#[test]
fn unknown_checker_id_is_invalid() {
    let mut s = session(3);
    let outcome = s.external_move(Seat::P1, 99, 5).unwrap();
    assert!(matches!(outcome, MoveOutcome::Invalid { checker_id: 99, .. }));
}

#[test]
fn self_play_conserves_checkers_and_terminates() {
    let mut s = session(7);
    let mut last_winner = None;
    for _ in 0..20_000 {
        if s.is_over() {
            break;
        }
        let seat = s.turn_player();
        if let MoveOutcome::Played { winner, .. } = s.ai_move(seat).unwrap() {
            last_winner = winner;
        }

        for player in [&s.game().player1, &s.game().player2] {
            assert_eq!(player.checkers.len(), 15);
            assert!(player
                .checkers
                .iter()
                .all(|c| (1..=24).contains(&c.position)));
        }
    }
    assert!(s.is_over(), "self-play did not finish");
    assert!(last_winner.is_some());
    assert!(s.turns_played() > 0);
}

#[test]
fn reset_starts_a_fresh_game() {
    let mut s = session(5);
    let seat = s.turn_player();
    s.ai_move(seat).unwrap();
    s.reset();
    assert!(!s.is_over());
    assert_eq!(s.turn_player(), Seat::P1);
    assert_eq!(s.turns_played(), 0);
    assert!(s.game().player1.checkers.iter().all(|c| c.position == 1));
    assert!(s.game().player2.checkers.iter().all(|c| c.position == 13));
}
