use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Coord;
use crate::board::{Board, DEFAULT_PALETTE};
use crate::error::CaroError;
use crate::player::Player;
use crate::rules::Rules;
use crate::win;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ShortToPlay,
    LongToPlay,
    Done,
}

impl Stage {
    pub fn is_play(&self) -> bool {
        matches!(self, Stage::ShortToPlay | Stage::LongToPlay)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ShortToPlay => write!(f, "short_to_play"),
            Stage::LongToPlay => write!(f, "long_to_play"),
            Stage::Done => write!(f, "done"),
        }
    }
}

/// Terminal result of a session. `Draw` covers the board filling with no
/// qualifying run; there is no other non-win ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Won(Player),
    Draw,
}

/// Skill cooldowns indexed by player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cooldowns {
    pub short: u8,
    pub long: u8,
}

impl Cooldowns {
    pub fn get(&self, player: Player) -> u8 {
        match player {
            Player::Short => self.short,
            Player::Long => self.long,
        }
    }

    fn set(&mut self, player: Player, value: u8) {
        match player {
            Player::Short => self.short = value,
            Player::Long => self.long = value,
        }
    }

    /// End-of-turn decay for both players, floored at zero.
    fn tick_down(&mut self) {
        self.short = self.short.saturating_sub(1);
        self.long = self.long.saturating_sub(1);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct TurnState {
    current: Player,
    moves_remaining: u8,
    cooldowns: Cooldowns,
    skill_active: bool,
}

impl TurnState {
    fn new(first: Player) -> Self {
        TurnState {
            current: first,
            moves_remaining: first.base_moves(),
            cooldowns: Cooldowns::default(),
            skill_active: false,
        }
    }
}

/// The game state machine: owns the board and the turn state, validates
/// every mutation, and resolves wins and draws. Rejected operations return
/// an error and leave the state untouched; a finished game absorbs all
/// further calls the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    rules: Rules,
    board: Board,
    turn: TurnState,
    outcome: Option<Outcome>,
    winning_line: Vec<Coord>,
    last_move: Option<Coord>,
}

impl Engine {
    /// Start a session on a fresh board with randomly placed obstacles.
    /// Short-Chain moves first.
    pub fn new<R: Rng>(rules: Rules, rng: &mut R) -> Self {
        let board = Board::with_obstacles(rules.size, rules.obstacle_count, &DEFAULT_PALETTE, rng);
        Self::with_board(rules, board)
    }

    /// Start a session on a prepared board (replays, harnesses, tests).
    pub fn with_board(rules: Rules, board: Board) -> Self {
        Engine {
            rules,
            board,
            turn: TurnState::new(Player::Short),
            outcome: None,
            winning_line: Vec::new(),
            last_move: None,
        }
    }

    // -- Accessors --

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.turn.current
    }

    pub fn moves_remaining(&self) -> u8 {
        self.turn.moves_remaining
    }

    pub fn cooldown(&self, player: Player) -> u8 {
        self.turn.cooldowns.get(player)
    }

    pub fn cooldowns(&self) -> Cooldowns {
        self.turn.cooldowns
    }

    pub fn skill_active(&self) -> bool {
        self.turn.skill_active
    }

    pub fn skill_ready(&self, player: Player) -> bool {
        self.turn.cooldowns.get(player) == 0
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Some(Outcome::Won(p)) => Some(p),
            _ => None,
        }
    }

    /// Non-empty exactly when a winner is set; ordered along the winning
    /// axis and exactly the winner's threshold long.
    pub fn winning_line(&self) -> &[Coord] {
        &self.winning_line
    }

    pub fn last_move(&self) -> Option<Coord> {
        self.last_move
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn stage(&self) -> Stage {
        if self.outcome.is_some() {
            Stage::Done
        } else {
            match self.turn.current {
                Player::Short => Stage::ShortToPlay,
                Player::Long => Stage::LongToPlay,
            }
        }
    }

    // -- Game actions --

    /// Place a stone for `player`. On a winning placement the session
    /// finishes immediately; otherwise the move budget is spent and the
    /// turn passes once it reaches zero. Filling the last empty cell with
    /// no win ends the session in a draw.
    pub fn submit_move(&mut self, player: Player, coord: Coord) -> Result<Stage, CaroError> {
        if self.outcome.is_some() {
            return Err(CaroError::GameOver);
        }
        if player != self.turn.current {
            return Err(CaroError::OutOfTurn);
        }

        self.board.place(coord, player)?;
        self.last_move = Some(coord);

        if let Some(line) = win::check_win(&self.board, &self.rules, coord, player) {
            self.winning_line = line;
            self.outcome = Some(Outcome::Won(player));
            return Ok(Stage::Done);
        }

        if self.board.is_full() {
            self.outcome = Some(Outcome::Draw);
            return Ok(Stage::Done);
        }

        self.turn.moves_remaining -= 1;
        if self.turn.moves_remaining == 0 {
            self.switch_turn();
        }
        Ok(self.stage())
    }

    /// Spend the bonus-move skill: one extra placement this turn, then the
    /// player's fixed recovery period. Rejected off-turn, on cooldown, or
    /// after the game has finished.
    pub fn activate_skill(&mut self, player: Player) -> Result<(), CaroError> {
        if self.outcome.is_some() {
            return Err(CaroError::GameOver);
        }
        if player != self.turn.current {
            return Err(CaroError::OutOfTurn);
        }
        if self.turn.cooldowns.get(player) > 0 {
            return Err(CaroError::SkillOnCooldown);
        }

        self.turn.moves_remaining += 1;
        self.turn.skill_active = true;
        self.turn.cooldowns.set(player, player.skill_recovery());
        Ok(())
    }

    /// Terminal non-win resolution for callers whose move source ran dry
    /// (the planner reporting no legal cell). No-op once finished.
    pub fn resolve_draw(&mut self) -> Stage {
        if self.outcome.is_none() {
            self.outcome = Some(Outcome::Draw);
        }
        self.stage()
    }

    fn switch_turn(&mut self) {
        self.turn.cooldowns.tick_down();
        self.turn.skill_active = false;
        self.turn.current = self.turn.current.opp();
        self.turn.moves_remaining = self.turn.current.base_moves();
    }
}
