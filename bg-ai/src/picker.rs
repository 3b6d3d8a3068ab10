//! Selection plumbing shared by the two seat scorers.
//!
//! A scorer walks every legal move, prices it, and the best-priced move
//! becomes a [`Selection`]. Ties keep the first-seen candidate, so a
//! fixed board and dice always produce the same selection.

use bg_core::entity::Move;
use bg_core::rules::moves_by_checker;
use bg_core::{Checker, Game, HolePosition, Seat};
use serde::Serialize;

/// One scoring rule's contribution to a move's cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDelta {
    pub rule: &'static str,
    pub delta: i32,
}

/// The chosen move for a turn, with the per-rule cost breakdown that
/// justified it.
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub checker_id: u8,
    pub from: HolePosition,
    pub to: HolePosition,
    pub cost: i32,
    pub deltas: Vec<RuleDelta>,
}

pub trait MovePicker {
    /// Price every legal move for the seat and return the best, or
    /// `None` when the seat cannot move at all.
    fn select(&self, game: &Game) -> Option<Selection>;
}

/// The scripted picker for a seat.
pub fn picker_for(seat: Seat) -> Box<dyn MovePicker + Send + Sync> {
    match seat {
        Seat::P1 => Box::new(crate::seat1::Seat1Picker),
        Seat::P2 => Box::new(crate::seat2::Seat2Picker),
    }
}

/// Running cost with an audit trail of the rules that shaped it.
#[derive(Debug, Default)]
pub(crate) struct Score {
    total: i32,
    deltas: Vec<RuleDelta>,
}

impl Score {
    pub(crate) fn add(&mut self, rule: &'static str, delta: i32) {
        if delta != 0 {
            self.deltas.push(RuleDelta { rule, delta });
        }
        self.total += delta;
    }

    /// Throw away everything priced so far and restart from `value`.
    pub(crate) fn reset(&mut self, rule: &'static str, value: i32) {
        self.deltas.clear();
        self.deltas.push(RuleDelta { rule, delta: value });
        self.total = value;
    }

    pub(crate) fn total(&self) -> i32 {
        self.total
    }

    pub(crate) fn into_deltas(self) -> Vec<RuleDelta> {
        self.deltas
    }
}

/// First-seen-max fold over the grouped legal moves. Checkers stacked on
/// an already-priced point are skipped, they would only repeat the same
/// candidates.
pub(crate) fn best_selection(
    game: &Game,
    seat: Seat,
    score_move: impl Fn(&bg_core::Player, &bg_core::Player, &Checker, &Move) -> Score,
) -> Option<Selection> {
    let ai = game.player(seat);
    let opponent = game.player(seat.opponent());

    let mut priced_positions: Vec<HolePosition> = Vec::new();
    let mut best: Option<Selection> = None;
    for (from, moves) in moves_by_checker(ai, opponent, &game.dice, seat) {
        if priced_positions.contains(&from.position) {
            continue;
        }
        priced_positions.push(from.position);

        for m in &moves {
            let score = score_move(ai, opponent, &from, m);
            let cost = score.total();
            if best.as_ref().map_or(true, |b| cost > b.cost) {
                best = Some(Selection {
                    checker_id: from.id,
                    from: from.position,
                    to: m.to,
                    cost,
                    deltas: score.into_deltas(),
                });
            }
        }
    }
    best
}
