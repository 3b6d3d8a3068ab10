//! Legal-move generation. This module is the single authority on which
//! destinations a checker may take given the unused dice.
//!
//! The core is a fold over the ordered dice sequence: each die extends
//! the previous partial move into a longer chain, and the chain dies at
//! the first invalid hop. Because a blocked intermediate hop can make
//! the two dice orderings reach different destinations, every query runs
//! the fold in both dice orders and merges the results.

use std::collections::HashSet;

use crate::board::{
    HolePosition, Seat, BLOCK_LINE_LENGTH, BOTTOM_ROW, P1_BOARD_OUT, P1_HEAD, P1_HOME, P2_HEAD,
    P2_HOME, P2_JUMP_BOARD, P_CHECKERS_COUNT, TOP_ROW,
};
use crate::entity::{Checker, Die, Game, Move, Player};

/// All legal destinations for one checker. Checkers stacked on the same
/// point share a move set, so the result is keyed by the probe checker's
/// position.
pub fn moves_for_checker(
    checker: &Checker,
    player: &Player,
    opponent: &Player,
    all_dice: &[Die],
    seat: Seat,
) -> Vec<Move> {
    candidate_moves(player, opponent, all_dice, seat)
        .into_iter()
        .filter(|m| m.checker.position == checker.position)
        .collect()
}

/// Legal moves for every checker the seat owns, grouped per checker in
/// first-seen order.
pub fn moves_by_checker(
    player: &Player,
    opponent: &Player,
    all_dice: &[Die],
    seat: Seat,
) -> Vec<(Checker, Vec<Move>)> {
    let mut grouped: Vec<(Checker, Vec<Move>)> = Vec::new();
    for m in candidate_moves(player, opponent, all_dice, seat) {
        if let Some((_, moves)) = grouped.iter_mut().find(|(c, _)| *c == m.checker) {
            moves.push(m);
        } else {
            grouped.push((m.checker, vec![m]));
        }
    }
    grouped
}

/// The subset of the seat's checkers that still have at least one legal
/// move after the longer-move filter.
pub fn available_checkers(
    player: &Player,
    opponent: &Player,
    all_dice: &[Die],
    seat: Seat,
) -> Vec<Checker> {
    let movable: Vec<Checker> = candidate_moves(player, opponent, all_dice, seat)
        .into_iter()
        .map(|m| m.checker)
        .collect();
    player
        .checkers
        .iter()
        .filter(|c| movable.iter().any(|m| m.position == c.position))
        .copied()
        .collect()
}

/// The seat that has borne off all 15 checkers, if any.
pub fn winner(game: &Game) -> Option<Seat> {
    for seat in [Seat::P2, Seat::P1] {
        let p = game.player(seat);
        if p.all_at_home && p.checkers.iter().all(|c| c.position == seat.end()) {
            return Some(seat);
        }
    }
    None
}

/// Full candidate set for the seat: per-position memoized generation,
/// deduplicated by `(checker id, destination)`, then longer-move
/// filtered. The memo lives only for this query.
fn candidate_moves(player: &Player, opponent: &Player, all_dice: &[Die], seat: Seat) -> Vec<Move> {
    let dice: Vec<Die> = all_dice.iter().filter(|d| !d.used).copied().collect();

    let mut computed: Vec<(HolePosition, Vec<Move>)> = Vec::new();
    let mut all: Vec<Move> = Vec::new();
    for checker in &player.checkers {
        if let Some((_, memo)) = computed.iter().find(|(p, _)| *p == checker.position) {
            all.extend(memo.iter().cloned());
            continue;
        }
        let moves = checker_moves(checker, player, opponent, &dice, seat);
        computed.push((checker.position, moves.clone()));
        all.extend(moves);
    }

    let mut seen: HashSet<(u8, HolePosition)> = HashSet::new();
    let deduped: Vec<Move> = all
        .into_iter()
        .filter(|m| seen.insert((m.checker.id, m.to)))
        .collect();

    apply_longer_move_rule(deduped, &dice, seat, &player.checkers)
}

/// Union of the forward and reverse dice-order traversals for one
/// checker.
fn checker_moves(
    checker: &Checker,
    player: &Player,
    opponent: &Player,
    dice: &[Die],
    seat: Seat,
) -> Vec<Move> {
    let forward = ordered_moves(checker, player, opponent, dice, seat);
    let reversed: Vec<Die> = dice.iter().rev().copied().collect();
    let backward = ordered_moves(checker, player, opponent, &reversed, seat);

    let mut out = forward;
    for m in backward {
        if !out.iter().any(|o| o.checker.id == m.checker.id && o.to == m.to) {
            out.push(m);
        }
    }
    out
}

fn ordered_moves(
    checker: &Checker,
    player: &Player,
    opponent: &Player,
    dice: &[Die],
    seat: Seat,
) -> Vec<Move> {
    if player.all_at_home {
        home_moves(checker, player, opponent, dice, seat)
    } else {
        middle_moves(checker, player, opponent, dice, seat)
    }
}

/// Mid-board generation: the checker is still racing, no bear-off yet.
fn middle_moves(
    checker: &Checker,
    player: &Player,
    opponent: &Player,
    dice: &[Die],
    seat: Seat,
) -> Vec<Move> {
    let mut out: Vec<Move> = Vec::new();

    // A head checker after this turn's head departure only moves via the
    // doubles jackpot.
    if player.took_head && checker.position == seat.head() {
        if !dice.is_empty() && dice.iter().all(|d| matches!(d.value, 3 | 4 | 6)) {
            push_head_jackpot(&mut out, dice, seat, player, checker);
        }
        return out;
    }

    // Chain of partial moves: dies at the first invalid hop.
    let mut acc: Option<Move> = None;
    let mut acc_positions: Vec<HolePosition> = Vec::new();

    for (index, die) in dice.iter().enumerate() {
        if index == 0 {
            let raw = checker.position + die.value as i32;
            let move_to = if seat == Seat::P2 && raw > P2_JUMP_BOARD {
                raw - P2_JUMP_BOARD
            } else {
                raw
            };
            let collision = check_collision(opponent, move_to);

            let in_reach = match seat {
                Seat::P1 => move_to <= P1_BOARD_OUT,
                Seat::P2 => {
                    (move_to <= seat.board_out() && BOTTOM_ROW.contains(&checker.position))
                        || TOP_ROW.contains(&checker.position)
                }
            };
            if in_reach && !collision && allowed_block(checker, player, move_to, opponent, seat) {
                let m = Move {
                    checker: *checker,
                    to: move_to,
                    dice: vec![*die],
                };
                out.push(m.clone());
                acc_positions.push(move_to);
                acc = Some(m);
            }
            continue;
        }

        acc = acc.and_then(|prev| {
            let raw = prev.to + die.value as i32;
            let move_to = if seat == Seat::P2 && raw > P2_JUMP_BOARD {
                raw - P2_JUMP_BOARD
            } else {
                raw
            };
            if seat == Seat::P1 && move_to > P1_BOARD_OUT {
                return None;
            }
            if check_collision(opponent, move_to) {
                return None;
            }
            // A P2 chain must not pass its own exit: once a hop reached
            // the bottom row, wrapping back into the top row is out.
            if seat == Seat::P2
                && TOP_ROW.contains(&move_to)
                && acc_positions.iter().any(|p| BOTTOM_ROW.contains(p))
            {
                return None;
            }
            if !allowed_block(checker, player, move_to, opponent, seat) {
                return None;
            }
            let mut dice_used = prev.dice;
            dice_used.push(*die);
            Some(Move {
                checker: *checker,
                to: move_to,
                dice: dice_used,
            })
        });
        if let Some(m) = &acc {
            out.push(m.clone());
            acc_positions.push(m.to);
        }
    }
    out
}

/// The doubles head exception: after one head departure, doubles 6/4/3
/// may synthesize one extra head exit straight to the landing square,
/// provided 14 checkers still sit on the head and the first departure is
/// alone on its landing square.
fn push_head_jackpot(
    out: &mut Vec<Move>,
    dice: &[Die],
    seat: Seat,
    player: &Player,
    checker: &Checker,
) {
    let head = seat.head();
    let on_head = player.count_at(head);
    if on_head != P_CHECKERS_COUNT - 1 {
        return;
    }

    if dice.iter().all(|d| d.value == 6) && player.count_at(head + 6) == 1 {
        out.push(Move {
            checker: *checker,
            to: head + 6,
            dice: vec![dice[0]],
        });
    } else if dice.iter().all(|d| d.value == 4) && player.count_at(head + 8) == 1 {
        out.push(Move {
            checker: *checker,
            to: head + 8,
            dice: dice.to_vec(),
        });
    } else if dice.iter().all(|d| d.value == 3) && player.count_at(head + 9) == 1 {
        out.push(Move {
            checker: *checker,
            to: head + 3,
            dice: dice.to_vec(),
        });
    }
}

/// Bear-off generation once every checker is home.
fn home_moves(
    checker: &Checker,
    player: &Player,
    opponent: &Player,
    dice: &[Die],
    seat: Seat,
) -> Vec<Move> {
    // Already borne off.
    if checker.position == P1_HEAD || checker.position == P2_HEAD {
        return Vec::new();
    }

    let Some(last_home_position) = player
        .checkers
        .iter()
        .filter(|c| P1_HOME.contains(&c.position) || P2_HOME.contains(&c.position))
        .map(|c| c.position)
        .min()
    else {
        return Vec::new();
    };
    let is_last_checker_at_home = checker.position == last_home_position;

    let out_edge = seat.board_out();
    let end = seat.end();
    let mut out: Vec<Move> = Vec::new();
    let mut acc: Option<Move> = None;

    for (index, die) in dice.iter().enumerate() {
        if index == 0 {
            let to = checker.position + die.value as i32;

            // Overshoot exits only the single rearmost home checker.
            if to > out_edge + 1 && is_last_checker_at_home {
                out.push(Move {
                    checker: *checker,
                    to: end,
                    dice: vec![*die],
                });
            }
            // An exact roll always exits.
            if to == out_edge + 1 {
                out.push(Move {
                    checker: *checker,
                    to: end,
                    dice: vec![*die],
                });
            }

            let collision = opponent.checkers.iter().any(|c| c.position == to);
            if !collision && to <= out_edge {
                let m = Move {
                    checker: *checker,
                    to,
                    dice: vec![*die],
                };
                out.push(m.clone());
                acc = Some(m);
            }
            continue;
        }

        acc = acc.and_then(|prev| {
            let to = prev.to + die.value as i32;
            let collision = opponent.checkers.iter().any(|c| c.position == to);
            let mut dice_used = prev.dice.clone();
            dice_used.push(*die);
            if !collision && seat.home().contains(&to) {
                Some(Move {
                    checker: *checker,
                    to,
                    dice: dice_used,
                })
            } else if to == out_edge + 1 {
                Some(Move {
                    checker: *checker,
                    to: end,
                    dice: dice_used,
                })
            } else {
                None
            }
        });
        if let Some(m) = &acc {
            out.push(m.clone());
        }
    }
    out
}

/// A destination is blocked when an opposing checker sits on it. Once
/// the opponent has everything home, only its checkers still on home
/// points guard their squares.
fn check_collision(opponent: &Player, move_to: HolePosition) -> bool {
    opponent
        .checkers
        .iter()
        .filter(|c| {
            if opponent.all_at_home {
                P1_HOME.contains(&c.position) || P2_HOME.contains(&c.position)
            } else {
                true
            }
        })
        .any(|c| c.position == move_to)
}

/// The block rule: refuse a move that completes a contiguous run of 6 of
/// the mover's own points, unless the opponent already has checkers past
/// the blockade or inside the mover's target quadrant.
fn allowed_block(
    checker: &Checker,
    player: &Player,
    move_to: HolePosition,
    opponent: &Player,
    seat: Seat,
) -> bool {
    // Escape checks run in a fixed order; the first hit wins.
    if player.checkers.iter().any(|c| c.position == move_to) {
        return true;
    }
    match seat {
        Seat::P1 => {
            if opponent.checkers.iter().any(|c| P2_HOME.contains(&c.position)) {
                return true;
            }
            if TOP_ROW.contains(&move_to) {
                if opponent.checkers.iter().any(|c| BOTTOM_ROW.contains(&c.position)) {
                    return true;
                }
            } else if BOTTOM_ROW.contains(&move_to) {
                let max_in_bottom = opponent
                    .checkers
                    .iter()
                    .filter(|c| BOTTOM_ROW.contains(&c.position))
                    .map(|c| c.position)
                    .max()
                    .unwrap_or(0);
                if max_in_bottom > move_to {
                    return true;
                }
            }
        }
        Seat::P2 => {
            if opponent.checkers.iter().any(|c| P1_HOME.contains(&c.position)) {
                return true;
            }
            let max_position = opponent
                .checkers
                .iter()
                .map(|c| c.position)
                .max()
                .unwrap_or(0);
            if max_position > move_to {
                return true;
            }
        }
    }

    // Scan upward from the destination, wrapping past 24.
    let mut inc_len: i32 = 1;
    while inc_len < BLOCK_LINE_LENGTH {
        let next = move_to + inc_len;
        let check_position = if next > P1_BOARD_OUT { next - P1_BOARD_OUT } else { next };
        if player.checkers.iter().any(|c| c.position == check_position) {
            inc_len += 1;
        } else {
            break;
        }
    }
    if inc_len >= BLOCK_LINE_LENGTH {
        return false;
    }

    // Scan downward, excluding the moving checker when it is alone on
    // its origin (it is about to leave that point).
    let mut dec_len: i32 = -1;
    let mut dec_jump_offset: i32 = 0;
    while dec_len > -BLOCK_LINE_LENGTH {
        let prev = move_to + dec_len;
        let check_position = if prev < 1 {
            if dec_jump_offset == 0 {
                dec_jump_offset = -dec_len;
            }
            P1_BOARD_OUT + dec_len + dec_jump_offset
        } else {
            prev
        };
        let occupied = player.checkers.iter().any(|c| {
            c.position == check_position
                && !(c.id == checker.id && player.count_at(checker.position) == 1)
        });
        if occupied {
            dec_len -= 1;
        } else {
            break;
        }
    }

    let line_length = inc_len + dec_len.abs() - 1;
    line_length < BLOCK_LINE_LENGTH
}

/// The forced-higher-die rule: with two distinct dice where only one can
/// be played in isolation, the candidate set is pruned so both dice (or
/// the higher one) get used. Die identity, not face value, drives the
/// accounting, because one physical die can appear in several candidate
/// chains.
fn apply_longer_move_rule(
    moves: Vec<Move>,
    dice: &[Die],
    seat: Seat,
    player_checkers: &[Checker],
) -> Vec<Move> {
    if moves.is_empty() {
        return moves;
    }
    if dice.len() != 2 || dice[0].value == dice[1].value {
        return moves;
    }
    if is_one_not_home(player_checkers, seat) {
        return moves;
    }

    let use_count = |die: &Die| -> usize {
        moves
            .iter()
            .flat_map(|m| m.dice.iter())
            .filter(|d| d.id == die.id)
            .count()
    };
    let single_dice: Vec<Die> = dice.iter().filter(|d| use_count(d) == 1).copied().collect();

    match single_dice.len() {
        1 => {
            let single = single_dice[0];
            let only_move = moves
                .iter()
                .find(|m| m.dice.iter().any(|d| d.id == single.id))
                .expect("single-use die must appear in some move")
                .clone();
            let idx = only_move
                .dice
                .iter()
                .position(|d| d.id == single.id)
                .expect("die present");
            match idx {
                0 => moves
                    .into_iter()
                    .filter(|m| *m == only_move || m.checker.id != only_move.checker.id)
                    .collect(),
                1 => moves
                    .into_iter()
                    .filter(|m| {
                        m.checker.id == only_move.checker.id
                            || m.dice.iter().any(|d| d.value == single.value)
                    })
                    .collect(),
                _ => panic!("longer-move rule: die index {idx} out of range"),
            }
        }
        2 => {
            let first = single_dice[0];
            let last = single_dice[1];
            let first_move = moves
                .iter()
                .find(|m| m.dice.iter().any(|d| d.id == first.id))
                .expect("single-use die must appear in some move");
            let last_move = moves
                .iter()
                .find(|m| m.dice.iter().any(|d| d.id == last.id))
                .expect("single-use die must appear in some move");
            if first_move.checker.id == last_move.checker.id {
                // Same checker can use either die but not both: the
                // higher die wins.
                let max_value = first_move.dice[0].value.max(last_move.dice[0].value);
                moves
                    .into_iter()
                    .filter(|m| m.dice.iter().any(|d| d.value == max_value))
                    .collect()
            } else {
                moves
            }
        }
        _ => {
            let first_die_id = moves[0].dice[0].id;
            let has_blocked_die = moves.iter().all(|m| m.dice[0].id == first_die_id);
            if has_blocked_die && moves.iter().any(|m| m.dice.len() == 2) {
                let two_dice_checkers: Vec<u8> = moves
                    .iter()
                    .filter(|m| m.dice.len() == 2)
                    .map(|m| m.checker.id)
                    .collect();
                moves
                    .into_iter()
                    .filter(|m| m.dice.len() != 1 || two_dice_checkers.contains(&m.checker.id))
                    .collect()
            } else {
                moves
            }
        }
    }
}

/// True in the endgame window where 14 of 15 checkers are already home;
/// the longer-move rule stands down there.
fn is_one_not_home(player_checkers: &[Checker], seat: Seat) -> bool {
    let home = seat.home();
    player_checkers
        .iter()
        .filter(|c| home.contains(&c.position))
        .count()
        == P_CHECKERS_COUNT - 1
}
