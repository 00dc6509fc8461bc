//! One game from first stone to confirmed result.
//!
//! The session owns the engine and the collaborators around it: the profile
//! store, the machine pacer and the RNG. Human input comes in through
//! `play` and `use_skill`; everything the machine side does is driven from
//! here. Rating and history are written only on explicit confirmation, so
//! an abandoned finished game changes nothing on disk.

use rand::Rng;
use serde::{Deserialize, Serialize};

use caro_engine::rating::{self, GameResult, MACHINE_RATING};
use caro_engine::{Coord, Engine, Player, Rules, Stage, planner};

use crate::error::SessionError;
use crate::pacing::Pacer;
use crate::store::{HistoryEntry, ProfileStore, RankedResult};
use crate::view::GameView;

/// Opponent tag recorded in ranked history entries.
pub const MACHINE_OPPONENT: &str = "AI (Ranked)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    CasualVsPlayer,
    RankedVsAi,
}

/// Rating outcome of a finished ranked game, computed once at game end and
/// applied to the store on confirmation. Absent for draws and casual games.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostGame {
    pub initial: i32,
    pub delta: i32,
    pub new_rating: i32,
}

pub struct GameSession<S, P, R> {
    engine: Engine,
    mode: GameMode,
    /// The side the machine controls; `None` in casual games.
    machine: Option<Player>,
    store: S,
    pacer: P,
    rng: R,
    post_game: Option<PostGame>,
    confirmed: bool,
}

impl<S, P, R> GameSession<S, P, R>
where
    S: ProfileStore,
    P: Pacer,
    R: Rng,
{
    /// Casual game: both sides are driven through `play`.
    pub fn casual(rules: Rules, store: S, pacer: P, mut rng: R) -> Self {
        let engine = Engine::new(rules, &mut rng);
        Self::from_engine(engine, GameMode::CasualVsPlayer, store, pacer, rng)
    }

    /// Ranked game against the machine, which controls Long-Chain.
    pub fn ranked(rules: Rules, store: S, pacer: P, mut rng: R) -> Self {
        let engine = Engine::new(rules, &mut rng);
        Self::from_engine(engine, GameMode::RankedVsAi, store, pacer, rng)
    }

    /// Wrap an existing engine (resumed games, harnesses, tests).
    pub fn from_engine(engine: Engine, mode: GameMode, store: S, pacer: P, rng: R) -> Self {
        let machine = match mode {
            GameMode::CasualVsPlayer => None,
            GameMode::RankedVsAi => Some(Player::Long),
        };
        GameSession {
            engine,
            mode,
            machine,
            store,
            pacer,
            rng,
            post_game: None,
            confirmed: false,
        }
    }

    // -- Accessors --

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn post_game(&self) -> Option<&PostGame> {
        self.post_game.as_ref()
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    pub fn view(&self) -> GameView {
        GameView::snapshot(&self.engine)
    }

    // -- Human entry points --

    /// Place a stone for the human side. In ranked games the machine's
    /// whole turn (possibly several placements) runs before this returns.
    pub async fn play(&mut self, coord: Coord) -> Result<Stage, SessionError> {
        self.engine.submit_move(self.human_side(), coord)?;
        self.drive_machine().await?;
        self.settle();
        Ok(self.engine.stage())
    }

    /// Activate the bonus-move skill for the human side.
    pub fn use_skill(&mut self) -> Result<(), SessionError> {
        self.engine.activate_skill(self.human_side())?;
        Ok(())
    }

    /// Apply the result of a finished game to the profile: rating for
    /// ranked wins and losses, a history entry always. Idempotence is the
    /// caller's guarantee here; a second confirmation is an error.
    pub fn confirm_result(&mut self) -> Result<(), SessionError> {
        if !self.engine.is_finished() {
            return Err(SessionError::NotFinished);
        }
        if self.confirmed {
            return Err(SessionError::AlreadyConfirmed);
        }
        self.confirmed = true;

        let winner = self.engine.winner();
        let mut entry = HistoryEntry::now(self.mode, winner);
        if let Some(machine) = self.machine {
            entry.opponent = Some(MACHINE_OPPONENT.to_string());
            match self.post_game {
                Some(pg) => {
                    entry.result = Some(if winner == Some(machine) {
                        RankedResult::Loss
                    } else {
                        RankedResult::Win
                    });
                    entry.rating_delta = Some(pg.delta);
                    entry.rating_after = Some(pg.new_rating);
                    self.store.set_rating(pg.new_rating);
                }
                None => entry.result = Some(RankedResult::Draw),
            }
        }
        self.store.append_history(entry);
        tracing::info!(mode = ?self.mode, winner = ?winner, "result confirmed");
        Ok(())
    }

    // -- Internals --

    fn human_side(&self) -> Player {
        match self.machine {
            Some(machine) => machine.opp(),
            None => self.engine.current_player(),
        }
    }

    /// Run machine placements until the turn comes back to the human or
    /// the game ends. The planner never proposes an illegal cell, so an
    /// engine rejection here is a bug worth surfacing, not swallowing.
    async fn drive_machine(&mut self) -> Result<(), SessionError> {
        let Some(machine) = self.machine else {
            return Ok(());
        };

        while !self.engine.is_finished() && self.engine.current_player() == machine {
            self.pacer.pause().await;

            let plan = planner::plan(
                self.engine.board(),
                self.engine.rules(),
                machine,
                self.engine.skill_ready(machine),
                &mut self.rng,
            );
            let Some(plan) = plan else {
                self.engine.resolve_draw();
                break;
            };

            if plan.activate_skill {
                self.engine.activate_skill(machine)?;
            }
            tracing::debug!(coord = ?plan.coord, skill = plan.activate_skill, "machine move");
            self.engine.submit_move(machine, plan.coord)?;
        }
        Ok(())
    }

    /// Compute the rating outcome once, at the moment a ranked game
    /// finishes with a winner. Draws carry no delta.
    fn settle(&mut self) {
        if self.post_game.is_some() || !self.engine.is_finished() {
            return;
        }
        let Some(machine) = self.machine else {
            return;
        };
        let result = match self.engine.winner() {
            Some(w) if w == machine => GameResult::Loss,
            Some(_) => GameResult::Win,
            None => return,
        };

        let initial = self.store.rating();
        let delta = rating::rating_delta(initial, MACHINE_RATING, result);
        self.post_game = Some(PostGame {
            initial,
            delta,
            new_rating: initial + delta,
        });
        tracing::info!(initial, delta, "ranked game settled");
    }
}
