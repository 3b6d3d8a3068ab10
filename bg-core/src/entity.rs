//! Game entity model: checkers, players, dice, candidate moves, and the
//! per-turn game snapshot. Everything here is a value type; applying a
//! move produces new values rather than mutating shared state.

use rand::Rng;

use crate::board::{HolePosition, Seat, P_CHECKERS_COUNT};

/// A single checker. `id` is globally unique (0..=14 P1, 15..=29 P2) and
/// never changes; `position` is the point it currently occupies.
/// `high_position` is the stacking index among checkers sharing a point
/// (rendering/selection concern, never consulted by the rules).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checker {
    pub id: u8,
    pub position: HolePosition,
    pub high_position: u8,
    pub can_move: bool,
    pub is_selected: bool,
}

impl Checker {
    pub fn new(id: u8, position: HolePosition, high_position: u8) -> Self {
        Self {
            id,
            position,
            high_position,
            can_move: true,
            is_selected: false,
        }
    }
}

/// One seat's side of the board.
///
/// `took_head` is set while a checker has left the head this turn and the
/// turn's dice are not yet fully consumed; it blocks a second head
/// departure. `all_at_home` is a one-way latch: set when the 15th checker
/// enters the home quadrant, never cleared until a new game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub checkers: Vec<Checker>,
    pub took_head: bool,
    pub all_at_home: bool,
}

impl Player {
    pub fn new(checkers: Vec<Checker>) -> Self {
        debug_assert_eq!(checkers.len(), P_CHECKERS_COUNT);
        Self {
            checkers,
            took_head: false,
            all_at_home: false,
        }
    }

    /// Start formation: all 15 checkers stacked on the seat's head.
    pub fn start_formation(seat: Seat) -> Self {
        let base = seat.checker_id_base();
        let checkers = (0..P_CHECKERS_COUNT as u8)
            .map(|i| Checker::new(base + i, seat.head(), i))
            .collect();
        Self::new(checkers)
    }

    pub fn checker_by_id(&self, id: u8) -> Option<&Checker> {
        self.checkers.iter().find(|c| c.id == id)
    }

    pub fn count_at(&self, position: HolePosition) -> usize {
        self.checkers
            .iter()
            .filter(|c| c.position == position)
            .count()
    }
}

/// A physical die on the board. `id` is a session-monotonic counter so a
/// move can name exactly which die it consumed; the longer-move rule
/// reasons about die identity, not just face value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Die {
    pub value: u8,
    pub used: bool,
    pub id: u64,
}

impl Die {
    pub fn new(value: u8, id: u64) -> Self {
        debug_assert!((1..=6).contains(&value));
        Self {
            value,
            used: false,
            id,
        }
    }
}

/// Roll a fresh turn's dice: two independent 1..=6 draws, with a tie
/// expanding into four equal dice (doubles rule). Die ids are drawn from
/// the caller's monotonic counter.
pub fn roll_turn_dice<R: Rng>(rng: &mut R, next_die_id: &mut u64) -> Vec<Die> {
    let a = rng.gen_range(1..=6u8);
    let b = rng.gen_range(1..=6u8);
    expand_doubles(a, b, next_die_id)
}

/// Turn a rolled pair into the turn's dice set, expanding doubles.
pub fn expand_doubles(a: u8, b: u8, next_die_id: &mut u64) -> Vec<Die> {
    let mut take = |value: u8| {
        let d = Die::new(value, *next_die_id);
        *next_die_id += 1;
        d
    };
    if a == b {
        (0..4).map(|_| take(a)).collect()
    } else {
        vec![take(a), take(b)]
    }
}

/// A candidate move: one checker to one destination, consuming one die
/// (single hop) or an ordered sequence of dice (multi-hop). Two
/// candidates are the same move when they share `(checker.id, to)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub checker: Checker,
    pub to: HolePosition,
    pub dice: Vec<Die>,
}

/// Who is sitting across the table. The rules and AI never inspect this;
/// only the turn driver does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKind {
    Ai,
    Person,
    Remote(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Start,
    Playing,
    End,
}

/// One game's full state between plies. The session produces a new
/// snapshot per applied move; the engine never mutates one in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub session: SessionKind,
    pub player1: Player,
    pub player2: Player,
    /// The turn's dice, including already-used ones (visible until the
    /// turn ends).
    pub dice: Vec<Die>,
    pub turn_player: Seat,
    pub status: GameStatus,
}

impl Game {
    pub fn new(session: SessionKind, turn_player: Seat) -> Self {
        Self {
            session,
            player1: Player::start_formation(Seat::P1),
            player2: Player::start_formation(Seat::P2),
            dice: Vec::new(),
            turn_player,
            status: GameStatus::Start,
        }
    }

    pub fn player(&self, seat: Seat) -> &Player {
        match seat {
            Seat::P1 => &self.player1,
            Seat::P2 => &self.player2,
        }
    }

    pub fn player_mut(&mut self, seat: Seat) -> &mut Player {
        match seat {
            Seat::P1 => &mut self.player1,
            Seat::P2 => &mut self.player2,
        }
    }

    pub fn unused_dice(&self) -> Vec<Die> {
        self.dice.iter().filter(|d| !d.used).copied().collect()
    }
}
