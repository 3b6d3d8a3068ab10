//! One game from roll to bear-off. The session owns the state, the
//! seeded dice stream, and a scripted picker per seat; callers drive it
//! one ply at a time, either letting a picker choose or injecting an
//! external move.

use bg_ai::{picker_for, MovePicker, Selection};
use bg_core::board::{HolePosition, Seat, P_CHECKERS_COUNT};
use bg_core::config::{SessionConfig, StartSeat};
use bg_core::entity::{roll_turn_dice, Move};
use bg_core::rules::{self, moves_for_checker};
use bg_core::{Game, GameStatus, SessionKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("expected {expected:?} to move, not {actual:?}")]
    WrongTurn { expected: Seat, actual: Seat },
    #[error("scored selection has no matching legal move")]
    MissingMove,
}

/// What one ply did to the game.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    Played {
        checker_id: u8,
        to: HolePosition,
        winner: Option<Seat>,
        turns_played: u64,
        external_moves_accepted: u64,
    },
    /// The seat had no legal move; the turn passed with a fresh roll.
    NoMove,
    /// An injected move that matched no legal move. State is untouched.
    Invalid { checker_id: u8, to: HolePosition },
}

pub struct GameSession {
    game: Game,
    rng: ChaCha8Rng,
    next_die_id: u64,
    first_move: Seat,
    turn_count: u64,
    external_accepted: u64,
    last_selection: Option<Selection>,
    p1_picker: Box<dyn MovePicker + Send + Sync>,
    p2_picker: Box<dyn MovePicker + Send + Sync>,
}

impl GameSession {
    pub fn new(config: &SessionConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let start = match config.start_seat {
            StartSeat::P1 => Seat::P1,
            StartSeat::P2 => Seat::P2,
            StartSeat::Random => {
                if rng.gen_bool(0.5) {
                    Seat::P1
                } else {
                    Seat::P2
                }
            }
        };
        let mut game = Game::new(SessionKind::Ai, start);
        game.status = GameStatus::Playing;
        let mut session = Self {
            game,
            rng,
            next_die_id: 0,
            first_move: start,
            turn_count: 0,
            external_accepted: 0,
            last_selection: None,
            p1_picker: picker_for(Seat::P1),
            p2_picker: picker_for(Seat::P2),
        };
        session.roll();
        session
    }

    /// Start a fresh game on the same dice stream. The first seat opens.
    pub fn reset(&mut self) {
        self.game = Game::new(SessionKind::Ai, Seat::P1);
        self.game.status = GameStatus::Playing;
        self.first_move = Seat::P1;
        self.turn_count = 0;
        self.external_accepted = 0;
        self.last_selection = None;
        self.roll();
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn turn_player(&self) -> Seat {
        self.game.turn_player
    }

    pub fn is_over(&self) -> bool {
        self.game.status == GameStatus::End
    }

    pub fn turns_played(&self) -> u64 {
        self.turn_count
    }

    pub fn external_moves_accepted(&self) -> u64 {
        self.external_accepted
    }

    /// Race progress for both seats, each in `0.0..=1.0`.
    pub fn progress(&self) -> (f32, f32) {
        bg_core::progress::progress(&self.game)
    }

    /// The scored selection behind the most recent picker ply.
    pub fn last_selection(&self) -> Option<&Selection> {
        self.last_selection.as_ref()
    }

    /// Let the seat's picker choose and apply one ply.
    pub fn ai_move(&mut self, seat: Seat) -> Result<MoveOutcome, SessionError> {
        self.check_turn(seat)?;
        let picker = match seat {
            Seat::P1 => &self.p1_picker,
            Seat::P2 => &self.p2_picker,
        };
        let Some(selection) = picker.select(&self.game) else {
            self.last_selection = None;
            self.no_move_next_turn();
            return Ok(MoveOutcome::NoMove);
        };
        let m = self
            .find_move(seat, selection.from, selection.to)
            .ok_or(SessionError::MissingMove)?;
        self.last_selection = Some(selection);
        Ok(self.commit(seat, m))
    }

    /// Apply a move chosen outside the session, typically by a model. An
    /// illegal move is reported, not applied.
    pub fn external_move(
        &mut self,
        seat: Seat,
        checker_id: u8,
        to: HolePosition,
    ) -> Result<MoveOutcome, SessionError> {
        self.check_turn(seat)?;
        let Some(position) = self
            .game
            .player(seat)
            .checker_by_id(checker_id)
            .map(|c| c.position)
        else {
            return Ok(MoveOutcome::Invalid { checker_id, to });
        };
        let Some(m) = self.find_move(seat, position, to) else {
            return Ok(MoveOutcome::Invalid { checker_id, to });
        };
        self.external_accepted += 1;
        Ok(self.commit(seat, m))
    }

    fn check_turn(&self, seat: Seat) -> Result<(), SessionError> {
        if self.game.turn_player != seat {
            return Err(SessionError::WrongTurn {
                expected: self.game.turn_player,
                actual: seat,
            });
        }
        Ok(())
    }

    /// Any checker on the origin point may carry the move.
    fn find_move(&self, seat: Seat, from: HolePosition, to: HolePosition) -> Option<Move> {
        let player = self.game.player(seat);
        let opponent = self.game.player(seat.opponent());
        let probe = player.checkers.iter().find(|c| c.position == from)?;
        moves_for_checker(probe, player, opponent, &self.game.dice, seat)
            .into_iter()
            .find(|m| m.to == to)
    }

    fn commit(&mut self, seat: Seat, m: Move) -> MoveOutcome {
        for die in &mut self.game.dice {
            if m.dice.iter().any(|d| d.id == die.id) {
                die.used = true;
            }
        }
        let move_finished = self.game.dice.iter().all(|d| d.used);
        if move_finished && seat != self.first_move {
            self.turn_count += 1;
        }

        let origin = m.checker.position;
        let home = seat.home();
        let player = self.game.player_mut(seat);
        player.took_head = if move_finished {
            false
        } else {
            player.took_head || origin == seat.head()
        };
        // The latch closes on the move that brings the 15th checker home.
        let home_count = player
            .checkers
            .iter()
            .filter(|c| home.contains(&c.position))
            .count();
        player.all_at_home = player.all_at_home
            || (home_count == P_CHECKERS_COUNT - 1
                && !home.contains(&origin)
                && home.contains(&m.to));
        if let Some(checker) = player.checkers.iter_mut().find(|c| c.id == m.checker.id) {
            checker.position = m.to;
        }

        let winner = rules::winner(&self.game);
        if winner.is_some() {
            self.game.status = GameStatus::End;
        } else if move_finished {
            self.game.turn_player = seat.opponent();
            self.roll();
        }

        MoveOutcome::Played {
            checker_id: m.checker.id,
            to: m.to,
            winner,
            turns_played: self.turn_count,
            external_moves_accepted: self.external_accepted,
        }
    }

    /// Passing a turn forfeits both head latches and rolls fresh dice.
    fn no_move_next_turn(&mut self) {
        self.game.turn_player = self.game.turn_player.opponent();
        self.game.player1.took_head = false;
        self.game.player2.took_head = false;
        self.roll();
    }

    fn roll(&mut self) {
        self.game.dice = roll_turn_dice(&mut self.rng, &mut self.next_die_id);
    }
}
