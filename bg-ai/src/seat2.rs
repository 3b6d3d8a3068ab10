//! Cost model for the second seat. Same family of rules as the first
//! seat's model, but this seat reasons about walls in its own frame, so
//! most scans normalize positions before comparing.

use bg_core::board::{normalize_p2, Seat, P2_END, P2_HOME};
use bg_core::entity::Move;
use bg_core::{Checker, Game, HolePosition, Player};

use crate::picker::{best_selection, MovePicker, Score, Selection};

pub struct Seat2Picker;

impl MovePicker for Seat2Picker {
    fn select(&self, game: &Game) -> Option<Selection> {
        best_selection(game, Seat::P2, score_move)
    }
}

/// Here "not disturbing" compares raw points: the opponent's frame and
/// the board frame coincide for this seat's opponent.
fn is_not_disturb(position: HolePosition, opponent_last: HolePosition) -> bool {
    position < opponent_last
}

fn score_move(ai: &Player, opponent: &Player, from: &Checker, m: &Move) -> Score {
    let mut score = Score::default();
    let move_to = m.to;

    score.add("multi_hop", -((m.dice.len() as i32 - 1) * 4));

    let opponent_last = opponent.checkers.iter().map(|c| c.position).min().unwrap_or(0);
    let not_disturb = is_not_disturb(move_to, opponent_last);

    if not_disturb {
        score.reset("behind_opponent", -8);
        if P2_HOME.contains(&move_to) && !P2_HOME.contains(&from.position) {
            score.add("behind_but_home", 2);
        }
    }

    let one_on_position = ai.count_at(from.position) == 1;
    let take_free_hole = ai.checkers.iter().any(|c| c.position != move_to);
    let first_position = ai
        .checkers
        .iter()
        .map(|c| normalize_p2(c.position))
        .max()
        .map_or(0, normalize_p2);
    let last_checker_position = ai
        .checkers
        .iter()
        .min_by_key(|c| normalize_p2(c.position))
        .map_or(0, |c| c.position);
    let norm_move_to = normalize_p2(move_to);
    let is_furthest = first_position >= norm_move_to;
    let is_free_hole = ai.count_at(move_to) == 0;
    let middle_position = ai
        .checkers
        .iter()
        .map(|c| normalize_p2(c.position))
        .sum::<i32>()
        / ai.checkers.len() as i32;

    if is_free_hole {
        score.add("free_point", 1);
    }

    for dir in [1, -1] {
        let mut i = 1;
        while !not_disturb
            && ai.checkers.iter().any(|c| {
                !is_not_disturb(c.position, opponent_last)
                    && (c.id != from.id && one_on_position)
                    && normalize_p2(c.position) + dir * i == norm_move_to
            })
        {
            i += 1;
        }
        if i > 1 {
            score.add("builds_own_line", i * 2);
        }
    }

    for dir in [1, -1] {
        let mut i = 1;
        while !not_disturb
            && one_on_position
            && ai.checkers.iter().any(|c| {
                !is_not_disturb(c.position, opponent_last)
                    && normalize_p2(c.position) + dir * i == norm_move_to
            })
        {
            i += 1;
        }
        if i > 1 {
            score.add("breaks_own_line", -(i * 2));
        }
    }

    for dir in [1, -1] {
        let mut i = 1;
        while (!is_furthest || P2_HOME.contains(&from.position))
            && is_free_hole
            && take_free_hole
            && opponent
                .checkers
                .iter()
                .any(|c| normalize_p2(c.position) + dir * i == norm_move_to)
        {
            i += 1;
        }
        if i > 1 {
            score.add("lands_inside_enemy_line", i * 2);
        }
    }

    let is_last_checker = last_checker_position == from.position;
    if is_last_checker {
        score.add("rearmost_checker", 3);
    }

    for dir in [1, -1] {
        let mut i = 1;
        while !is_last_checker
            && one_on_position
            && opponent
                .checkers
                .iter()
                .any(|c| normalize_p2(c.position) + dir * i == normalize_p2(from.position))
        {
            i += 1;
        }
        if i > 1 {
            score.add("leaves_enemy_line", -(i * 2));
        }
    }

    let mut i = 1;
    while !ai.checkers.iter().any(|c| {
        let p = normalize_p2(c.position);
        P2_HOME.contains(&move_to)
            || p - i == norm_move_to
            || p + i == norm_move_to
            || p == norm_move_to
    }) {
        i += 1;
    }
    score.add("runs_ahead", (i as f32 * 0.5) as i32);

    score.add(
        "toward_mean",
        ((middle_position - norm_move_to) as f32 * 0.3) as i32,
    );

    if !P2_HOME.contains(&from.position) && P2_HOME.contains(&move_to) {
        score.add("comes_home", 3);
    }

    score.add(
        "unstacks",
        ((ai.count_at(from.position) as i32 - 1) as f32 * 1.3) as i32,
    );

    if !ai.all_at_home && move_to != P2_END {
        let coefficient =
            if P2_HOME.contains(&move_to) && !P2_HOME.contains(&from.position) { 1 } else { 2 };
        score.add(
            "stacks_destination",
            -(ai.count_at(move_to) as i32 * coefficient),
        );
    }

    if P2_HOME.contains(&from.position) {
        score.add("shuffles_home", -2);
        if !ai.all_at_home {
            score.add("shuffles_home_early", -2);
        }
    }

    if ai.all_at_home && move_to == P2_END && m.dice.len() == 1 {
        score.add("bears_off", 8);
    }

    score
}
