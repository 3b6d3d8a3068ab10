//! Round-robin self-play driver. Each task is an independent seeded
//! session; one tick advances every task by one ply and finished games
//! restart in place.

use bg_ai::Selection;
use bg_core::config::Config;
use bg_logging::{
    now_ms, NdjsonError, NdjsonWriter, RuleDeltaV1, RunStatsEventV1, SelectionEventV1, TurnEventV1,
};
use thiserror::Error;

use crate::reward::RewardMax;
use crate::session::{GameSession, MoveOutcome, SessionError};

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Log(#[from] NdjsonError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStats {
    pub ticks: u64,
    pub plies: u64,
    pub no_moves: u64,
    pub games_completed: u64,
}

struct SelfPlayTask {
    id: usize,
    session: GameSession,
    ply: u64,
}

pub struct Scheduler {
    tasks: Vec<SelfPlayTask>,
    stats: SchedulerStats,
}

impl Scheduler {
    /// Tasks get consecutive seeds starting from the configured one, so
    /// a run is reproducible but tasks do not mirror each other.
    pub fn new(config: &Config, task_count: usize) -> Self {
        let tasks = (0..task_count)
            .map(|id| {
                let mut session_config = config.session.clone();
                session_config.seed = config.session.seed.wrapping_add(id as u64);
                SelfPlayTask {
                    id,
                    session: GameSession::new(&session_config),
                    ply: 0,
                }
            })
            .collect();
        Self {
            tasks,
            stats: SchedulerStats::default(),
        }
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Advance every task by one ply.
    pub fn tick(&mut self) -> Result<(), SessionError> {
        self.stats.ticks += 1;
        for task in &mut self.tasks {
            let _ = Self::advance(task, &mut self.stats)?;
        }
        Ok(())
    }

    /// Like [`tick`](Self::tick), appending one turn event per task and,
    /// for every applied ply, the scored selection behind it.
    pub fn tick_and_log(&mut self, writer: &mut NdjsonWriter) -> Result<(), RunError> {
        self.stats.ticks += 1;
        for task in &mut self.tasks {
            let seat = task.session.turn_player();
            let (outcome, selection) = Self::advance(task, &mut self.stats)?;
            let (checker_id, to, winner) = match &outcome {
                MoveOutcome::Played {
                    checker_id,
                    to,
                    winner,
                    ..
                } => (Some(*checker_id), Some(*to), *winner),
                _ => (None, None, None),
            };
            writer.write_event(&TurnEventV1 {
                event: TurnEventV1::EVENT,
                ts_ms: now_ms(),
                task_id: task.id,
                ply: task.ply,
                seat,
                checker_id,
                to,
                winner,
            })?;
            if let Some(selection) = selection {
                writer.write_event(&SelectionEventV1 {
                    event: SelectionEventV1::EVENT,
                    ts_ms: now_ms(),
                    task_id: task.id,
                    ply: task.ply,
                    seat,
                    checker_id: selection.checker_id,
                    from: selection.from,
                    to: selection.to,
                    cost: selection.cost,
                    deltas: selection
                        .deltas
                        .iter()
                        .map(|d| RuleDeltaV1 {
                            rule: d.rule.to_string(),
                            delta: d.delta,
                        })
                        .collect(),
                })?;
            }
        }
        Ok(())
    }

    /// Append a stats snapshot, folding in the shared reward maximum.
    pub fn log_stats(
        &self,
        writer: &mut NdjsonWriter,
        reward_max: &RewardMax,
    ) -> Result<(), NdjsonError> {
        writer.write_event(&RunStatsEventV1 {
            event: RunStatsEventV1::EVENT,
            ts_ms: now_ms(),
            ticks: self.stats.ticks,
            plies: self.stats.plies,
            no_moves: self.stats.no_moves,
            games_completed: self.stats.games_completed,
            reward_max: reward_max.get(),
        })
    }

    /// One ply for one task. The selection is captured before a finished
    /// game resets and clears it.
    fn advance(
        task: &mut SelfPlayTask,
        stats: &mut SchedulerStats,
    ) -> Result<(MoveOutcome, Option<Selection>), SessionError> {
        let seat = task.session.turn_player();
        let outcome = task.session.ai_move(seat)?;
        let selection = match &outcome {
            MoveOutcome::Played { .. } => task.session.last_selection().cloned(),
            _ => None,
        };
        task.ply += 1;
        match &outcome {
            MoveOutcome::Played { winner, .. } => {
                stats.plies += 1;
                if winner.is_some() {
                    stats.games_completed += 1;
                    task.session.reset();
                    task.ply = 0;
                }
            }
            MoveOutcome::NoMove => stats.no_moves += 1,
            MoveOutcome::Invalid { .. } => {}
        }
        Ok((outcome, selection))
    }
}
