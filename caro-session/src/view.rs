//! Renderer-facing snapshot of a running game. Everything here is derived
//! from engine state; a renderer never needs to touch the engine directly.

use serde::Serialize;

use caro_engine::{Cell, Cooldowns, Coord, Engine, Outcome, Player, Stage};

#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub size: u8,
    /// Row-major grid, `cells[row][col]`.
    pub cells: Vec<Vec<Cell>>,
    pub stage: Stage,
    pub status: String,
    pub current_player: Option<Player>,
    pub moves_remaining: u8,
    pub cooldowns: Cooldowns,
    pub skill_active: bool,
    pub winner: Option<Player>,
    pub winning_line: Vec<Coord>,
    pub last_move: Option<Coord>,
}

impl GameView {
    pub fn snapshot(engine: &Engine) -> Self {
        let size = engine.board().size();
        let cells = engine
            .board()
            .cells()
            .chunks(size as usize)
            .map(|row| row.to_vec())
            .collect();

        let stage = engine.stage();
        GameView {
            size,
            cells,
            stage,
            status: status_line(engine),
            current_player: stage.is_play().then(|| engine.current_player()),
            moves_remaining: if stage.is_play() {
                engine.moves_remaining()
            } else {
                0
            },
            cooldowns: engine.cooldowns(),
            skill_active: engine.skill_active(),
            winner: engine.winner(),
            winning_line: engine.winning_line().to_vec(),
            last_move: engine.last_move(),
        }
    }
}

fn status_line(engine: &Engine) -> String {
    match engine.outcome() {
        Some(Outcome::Won(player)) => format!("{player} wins!"),
        Some(Outcome::Draw) => "Draw".to_string(),
        None => {
            let player = engine.current_player();
            let moves = engine.moves_remaining();
            if moves == 1 {
                format!("{player} to play (1 move left)")
            } else {
                format!("{player} to play ({moves} moves left)")
            }
        }
    }
}
