use bg_core::board::Seat;
use bg_core::entity::{Checker, Die, Player};
use bg_core::rules::moves_by_checker;
use bg_core::{Game, SessionKind};

use crate::picker::picker_for;

fn opening_game(turn: Seat, dice: &[u8]) -> Game {
    let mut game = Game::new(SessionKind::Ai, turn);
    game.dice = dice
        .iter()
        .enumerate()
        .map(|(i, &v)| Die::new(v, i as u64))
        .collect();
    game
}

#[test]
fn seat1_opens_from_its_head() {
    let game = opening_game(Seat::P1, &[6, 5]);
    let sel = picker_for(Seat::P1).select(&game).unwrap();
    assert_eq!(sel.from, 1);
    assert!([6, 7, 12].contains(&sel.to));
}

#[test]
fn seat2_opens_from_its_head() {
    let game = opening_game(Seat::P2, &[3, 1]);
    let sel = picker_for(Seat::P2).select(&game).unwrap();
    assert_eq!(sel.from, 13);
}

#[test]
fn selection_is_a_legal_move() {
    let game = opening_game(Seat::P1, &[4, 2]);
    let sel = picker_for(Seat::P1).select(&game).unwrap();
    let grouped = moves_by_checker(&game.player1, &game.player2, &game.dice, Seat::P1);
    let legal = grouped.iter().any(|(c, moves)| {
        c.position == sel.from && moves.iter().any(|m| m.to == sel.to)
    });
    assert!(legal, "picker chose {}->{} which is not legal", sel.from, sel.to);
}

#[test]
fn deltas_account_for_the_whole_cost() {
    for (seat, dice) in [(Seat::P1, [6, 5]), (Seat::P2, [6, 5])] {
        let game = opening_game(seat, &dice);
        let sel = picker_for(seat).select(&game).unwrap();
        let sum: i32 = sel.deltas.iter().map(|d| d.delta).sum();
        assert_eq!(sum, sel.cost);
    }
}

#[test]
fn selection_is_deterministic() {
    let game = opening_game(Seat::P1, &[3, 4]);
    let picker = picker_for(Seat::P1);
    let a = picker.select(&game).unwrap();
    let b = picker.select(&game).unwrap();
    assert_eq!((a.checker_id, a.from, a.to, a.cost), (b.checker_id, b.from, b.to, b.cost));
}

#[test]
fn no_legal_move_yields_no_selection() {
    // Lone mobile checker blocked, every head checker spent this turn.
    let mut game = opening_game(Seat::P1, &[2]);
    let mut positions = vec![1; 15];
    positions[0] = 5;
    game.player1 = Player::new(
        positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Checker::new(i as u8, p, i as u8))
            .collect(),
    );
    game.player1.took_head = true;
    let mut opp_positions = vec![13; 15];
    opp_positions[0] = 7;
    game.player2 = Player::new(
        opp_positions
            .iter()
            .enumerate()
            .map(|(i, &p)| Checker::new(15 + i as u8, p, i as u8))
            .collect(),
    );

    assert!(picker_for(Seat::P1).select(&game).is_none());
}
