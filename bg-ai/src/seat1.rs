//! Cost model for the first seat.
//!
//! Costs are small integers; each rule nudges the total and the best
//! total wins. The model looks at the opponent's rearmost checker (in
//! the first seat's frame) to decide whether a move still contests the
//! race or merely shuffles checkers behind it.

use bg_core::board::{normalize_p2, Seat, P1_END, P1_HOME, P2_HEAD};
use bg_core::entity::Move;
use bg_core::{Checker, Game, HolePosition, Player};

use crate::picker::{best_selection, MovePicker, Score, Selection};

pub struct Seat1Picker;

impl MovePicker for Seat1Picker {
    fn select(&self, game: &Game) -> Option<Selection> {
        debug_assert_eq!(game.turn_player, Seat::P1);
        best_selection(game, Seat::P1, score_move)
    }
}

/// A point is "not disturbing" when it lies behind the opponent's
/// rearmost checker, measured in the opponent's frame.
fn is_not_disturb(position: HolePosition, opponent_last: HolePosition) -> bool {
    normalize_p2(position) < opponent_last
}

fn score_move(ai: &Player, opponent: &Player, from: &Checker, m: &Move) -> Score {
    let mut score = Score::default();
    let move_to = m.to;

    score.add("multi_hop", -((m.dice.len() as i32 - 1) * 4));

    let opponent_last = opponent
        .checkers
        .iter()
        .map(|c| normalize_p2(c.position))
        .min()
        .unwrap_or(0);
    let throw_to_head =
        opponent.all_at_home && opponent.checkers.iter().any(|c| c.position == P2_HEAD);
    let opponent_went_far = opponent_last > 8;
    let not_disturb_to = is_not_disturb(move_to, opponent_last) || throw_to_head;

    if not_disturb_to && !opponent_went_far {
        score.reset("behind_opponent", -8);
        if P1_HOME.contains(&move_to) && !P1_HOME.contains(&from.position) {
            score.add("behind_but_home", 2);
        }
    }

    let one_on_position = ai.count_at(from.position) == 1;
    let take_free_hole = !ai.checkers.iter().any(|c| c.position == move_to);
    let max_position = ai.checkers.iter().map(|c| c.position).max().unwrap_or(0);
    let last_checker_position = ai.checkers.iter().map(|c| c.position).min().unwrap_or(0);
    let is_furthest = max_position <= move_to;
    let middle_position =
        ai.checkers.iter().map(|c| c.position).sum::<i32>() / ai.checkers.len() as i32;
    let not_disturb_from = is_not_disturb(from.position, opponent_last) || throw_to_head;

    if not_disturb_from && !opponent_went_far {
        score.add("from_behind_opponent", 4);
        if !not_disturb_to && take_free_hole {
            score.add("advances_into_play", 4);
        }
    }

    if take_free_hole {
        score.add("free_point", 1);
    }

    // Landing next to own loose checkers extends a wall in the making.
    for dir in [1, -1] {
        let mut i = 1;
        while !not_disturb_to
            && take_free_hole
            && ai.checkers.iter().any(|c| {
                !is_not_disturb(c.position, opponent_last)
                    && (c.id != from.id && one_on_position)
                    && c.position + dir * i == move_to
            })
        {
            i += 1;
        }
        i -= 1;
        if i > 1 {
            score.add("builds_own_line", i * 2);
        }
    }

    // Pulling a lone checker out of a wall tears it down.
    for dir in [1, -1] {
        let mut i = 1;
        while !not_disturb_from
            && one_on_position
            && ai.checkers.iter().any(|c| {
                !is_not_disturb(c.position, opponent_last) && c.position + dir * i == move_to
            })
        {
            i += 1;
        }
        i -= 1;
        if i > 1 {
            score.add("breaks_own_line", -(i * 2));
        }
    }

    // Landing inside a run of opposing checkers splits their wall.
    for dir in [1, -1] {
        let mut i = 1;
        while (!is_furthest || P1_HOME.contains(&from.position))
            && take_free_hole
            && opponent.checkers.iter().any(|c| c.position + dir * i == move_to)
        {
            i += 1;
        }
        i -= 1;
        if i > 1 {
            score.add("lands_inside_enemy_line", i * 2);
        }
    }

    let is_last_checker = last_checker_position == from.position;
    if is_last_checker {
        score.add("rearmost_checker", 3);
    }

    // Vacating a point that splits an opposing wall undoes that work.
    let mut enemy_line_length = 0;
    for dir in [1, -1] {
        let mut i = 1;
        while !is_last_checker
            && one_on_position
            && opponent.checkers.iter().any(|c| c.position + dir * i == from.position)
        {
            i += 1;
        }
        if i > 1 {
            enemy_line_length += i;
            score.add("leaves_enemy_line", -(i * 2));
        }
    }
    if enemy_line_length >= 5 {
        score.add("deep_enemy_line", -5);
    }

    // Distance from the nearest own checker around the destination.
    let mut i = 1;
    while !ai.checkers.iter().any(|c| {
        P1_HOME.contains(&move_to)
            || c.position - i == move_to
            || c.position + i == move_to
            || c.position == move_to
    }) {
        i += 1;
    }
    i -= 1;
    if i > 0 {
        score.add("runs_ahead", (i as f32 * 0.5) as i32);
    }

    score.add("toward_mean", ((middle_position - move_to) as f32 * 0.3) as i32);

    if !P1_HOME.contains(&from.position) && P1_HOME.contains(&move_to) {
        let bonus = match m.dice.len() {
            1 => 4,
            2 => 3,
            3 => 2,
            _ => 1,
        };
        score.add("comes_home", bonus);
    }

    score.add(
        "unstacks",
        ((ai.count_at(from.position) as i32 - 1) as f32 * 1.3) as i32,
    );

    if !ai.all_at_home && move_to != P1_END {
        let coefficient =
            if P1_HOME.contains(&move_to) && !P1_HOME.contains(&from.position) { 1 } else { 2 };
        score.add(
            "stacks_destination",
            -(ai.count_at(move_to) as i32 * coefficient),
        );
    }

    if P1_HOME.contains(&from.position) {
        score.add("shuffles_home", -2);
        if !ai.all_at_home {
            score.add("shuffles_home_early", -2);
        }
    }

    if ai.all_at_home && move_to == P1_END {
        let bonus = match m.dice.len() {
            1 => 8,
            2 => 2,
            3 => 1,
            _ => 0,
        };
        score.add("bears_off", bonus);
    }

    score
}
