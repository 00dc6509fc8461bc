use rand::Rng;

use crate::Coord;
use crate::board::{Board, Cell};
use crate::player::Player;
use crate::rules::{Axis, Rules};

/// Completing a winning run this move.
pub const WIN_SCORE: u32 = 10_000;
/// One stone short of the threshold with at least one open end. Doubles as
/// the emergency-block trigger: an opponent cell at or above this tier gets
/// blocked regardless of the planner's own offense.
pub const NEAR_WIN_SCORE: u32 = 1_000;
/// Two stones short with both ends open.
pub const OPEN_RUN_SCORE: u32 = 100;

/// Blocking outweighs attacking: defense counts at 3/2 of offense.
const DEFENSE_NUM: u32 = 3;
const DEFENSE_DEN: u32 = 2;

/// Below this many stones on the board the planner skips scoring and takes
/// the center.
const OPENING_STONES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub coord: Coord,
    /// Set on an emergency block when the skill is off cooldown, so the
    /// block can be chased by a second placement in the same turn.
    pub activate_skill: bool,
}

/// Choose a placement for `ai`. Single-ply: every empty cell is scored for
/// the planner's own run potential and for the opponent's, and the best
/// weighted sum wins, ties broken uniformly through `rng`. Returns `None`
/// only when no empty cell remains.
pub fn plan<R: Rng>(
    board: &Board,
    rules: &Rules,
    ai: Player,
    skill_ready: bool,
    rng: &mut R,
) -> Option<Plan> {
    let empty = board.empty_cells();
    if empty.is_empty() {
        return None;
    }

    if board.stone_count() < OPENING_STONES {
        let center = rules.center();
        if board.cell_at(center) == Some(Cell::Empty) {
            return Some(Plan {
                coord: center,
                activate_skill: false,
            });
        }
    }

    let opponent = ai.opp();
    let mut best: Vec<Coord> = Vec::new();
    let mut best_total = 0u32;
    let mut threat_cell = empty[0];
    let mut threat_score = 0u32;

    for &coord in &empty {
        let offense = score_cell(board, rules, coord, ai);
        let defense = score_cell(board, rules, coord, opponent);
        let total = offense + defense * DEFENSE_NUM / DEFENSE_DEN;

        if best.is_empty() || total > best_total {
            best_total = total;
            best.clear();
            best.push(coord);
        } else if total == best_total {
            best.push(coord);
        }

        if defense > threat_score {
            threat_score = defense;
            threat_cell = coord;
        }
    }

    if threat_score >= NEAR_WIN_SCORE {
        return Some(Plan {
            coord: threat_cell,
            activate_skill: skill_ready,
        });
    }

    let coord = best[rng.random_range(0..best.len())];
    Some(Plan {
        coord,
        activate_skill: false,
    })
}

/// Score a hypothetical placement of `player` at `coord`: sum of the tier
/// value of the run through the cell on each of the player's axes.
pub fn score_cell(board: &Board, rules: &Rules, coord: Coord, player: Player) -> u32 {
    rules
        .axes(player)
        .iter()
        .map(|&axis| {
            let (len, open_ends) = run_metrics(board, coord, player, axis);
            run_score(player.threshold(), len, open_ends)
        })
        .sum()
}

fn run_score(threshold: usize, len: usize, open_ends: u8) -> u32 {
    if len >= threshold {
        WIN_SCORE
    } else if len + 1 == threshold && open_ends >= 1 {
        NEAR_WIN_SCORE
    } else if len + 2 == threshold && open_ends == 2 {
        OPEN_RUN_SCORE
    } else {
        len as u32
    }
}

/// Length of the run through `coord` (counting the candidate cell as the
/// player's stone) and how many of its two ends border an empty cell.
fn run_metrics(board: &Board, coord: Coord, player: Player, axis: Axis) -> (usize, u8) {
    let (dr, dc) = axis.delta();
    let (back, back_open) = probe(board, coord, player, (-dr, -dc));
    let (fwd, fwd_open) = probe(board, coord, player, (dr, dc));
    (back + 1 + fwd, back_open as u8 + fwd_open as u8)
}

/// Walk one direction from `coord` (exclusive): count contiguous stones of
/// the player, and report whether the cell past the run is empty.
fn probe(board: &Board, coord: Coord, player: Player, (dr, dc): (i16, i16)) -> (usize, bool) {
    let mut count = 0;
    let mut i = 1i16;
    loop {
        let row = coord.0 as i16 + i * dr;
        let col = coord.1 as i16 + i * dc;
        if row < 0 || col < 0 {
            return (count, false);
        }
        match board.cell_at((row as u8, col as u8)) {
            Some(Cell::Stone(p)) if p == player => count += 1,
            Some(Cell::Empty) => return (count, true),
            _ => return (count, false),
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ObstacleColor;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Test helper: build a board from an ASCII layout.
    /// 'S' = Short stone, 'L' = Long stone, '#' = obstacle, '.' = empty.
    fn board_from_layout(layout: &[&str]) -> Board {
        let size = layout.len() as u8;
        let mut board = Board::new(size);
        for (row, line) in layout.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    'S' => Cell::Stone(Player::Short),
                    'L' => Cell::Stone(Player::Long),
                    '#' => Cell::Obstacle(ObstacleColor::Green),
                    _ => continue,
                };
                board.set((row as u8, col as u8), cell);
            }
        }
        board
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    #[test]
    fn opening_takes_the_center() {
        let rules = Rules::default();
        let board = Board::new(15);
        let plan = plan(&board, &rules, Player::Long, true, &mut rng()).unwrap();
        assert_eq!(plan.coord, (7, 7));
        assert!(!plan.activate_skill);
    }

    #[test]
    fn opening_falls_back_to_scoring_when_center_blocked() {
        let rules = Rules::default();
        let mut board = Board::new(15);
        board.set((7, 7), Cell::Obstacle(ObstacleColor::Red));

        let plan = plan(&board, &rules, Player::Long, false, &mut rng()).unwrap();
        assert_ne!(plan.coord, (7, 7));
        assert_eq!(board.cell_at(plan.coord), Some(Cell::Empty));
    }

    #[test]
    fn opening_ends_at_five_stones() {
        let rules = Rules::default();
        let mut board = Board::new(15);
        for col in 0..5 {
            board.set((0, col), Cell::Stone(Player::Long));
        }
        // Five stones down: the planner scores instead of taking the center.
        let plan = plan(&board, &rules, Player::Short, false, &mut rng()).unwrap();
        assert_ne!(plan.coord, (7, 7));
    }

    #[test]
    fn completes_own_winning_run() {
        let rules = Rules::default();
        let mut board = Board::new(15);
        for col in 4..9 {
            board.set((7, col), Cell::Stone(Player::Long));
        }
        let plan = plan(&board, &rules, Player::Long, false, &mut rng()).unwrap();
        assert!(plan.coord == (7, 3) || plan.coord == (7, 9));
    }

    #[test]
    fn emergency_block_overrides_own_win() {
        let rules = Rules::default();
        let mut board = Board::new(15);
        // Opponent Long one move from six in a row, open at (7, 3) and (7, 9).
        for col in 4..9 {
            board.set((7, col), Cell::Stone(Player::Long));
        }
        // The planner's own immediate win at (1, 1) or (1, 4).
        board.set((1, 2), Cell::Stone(Player::Short));
        board.set((1, 3), Cell::Stone(Player::Short));

        let plan = plan(&board, &rules, Player::Short, false, &mut rng()).unwrap();
        assert!(plan.coord == (7, 3) || plan.coord == (7, 9));
    }

    #[test]
    fn emergency_block_requests_skill_when_ready() {
        let rules = Rules::default();
        let mut board = Board::new(15);
        for col in 4..9 {
            board.set((7, col), Cell::Stone(Player::Long));
        }
        board.set((0, 0), Cell::Stone(Player::Short));

        let ready = plan(&board, &rules, Player::Short, true, &mut rng()).unwrap();
        assert!(ready.activate_skill);

        let cooling = plan(&board, &rules, Player::Short, false, &mut rng()).unwrap();
        assert!(!cooling.activate_skill);
    }

    #[test]
    fn blocks_short_chain_open_pair() {
        let rules = Rules::default();
        let mut board = Board::new(15);
        // Short with an open pair threatens a three next move.
        board.set((5, 5), Cell::Stone(Player::Short));
        board.set((5, 6), Cell::Stone(Player::Short));
        // Enough stones to leave the opening book.
        for col in 0..4 {
            board.set((12, col), Cell::Stone(Player::Long));
        }

        let plan = plan(&board, &rules, Player::Long, false, &mut rng()).unwrap();
        assert!(plan.coord == (5, 4) || plan.coord == (5, 7));
    }

    #[test]
    fn never_selects_an_occupied_cell() {
        let rules = Rules::default();
        let board = board_from_layout(&[
            "SL#L.", //
            "L#SS.", //
            "S.LL#", //
            "#LSS.", //
            ".S#L.",
        ]);
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let plan = plan(&board, &rules, Player::Long, false, &mut rng).unwrap();
            assert_eq!(board.cell_at(plan.coord), Some(Cell::Empty), "seed {seed}");
        }
    }

    #[test]
    fn full_board_yields_no_move() {
        let rules = Rules::default();
        let board = board_from_layout(&["SL", "#L"]);
        assert_eq!(plan(&board, &rules, Player::Long, true, &mut rng()), None);
    }

    #[test]
    fn tie_break_is_seed_deterministic() {
        let rules = Rules::default();
        // Scattered stones: past the opening book, no emergency anywhere,
        // and many interior cells tie for the best total.
        let mut board = Board::new(15);
        for col in [0u8, 2, 4, 6, 8] {
            board.set((0, col), Cell::Stone(Player::Long));
        }

        let a = plan(&board, &rules, Player::Short, false, &mut StdRng::seed_from_u64(9));
        let b = plan(&board, &rules, Player::Short, false, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(board.cell_at(a.unwrap().coord), Some(Cell::Empty));
    }

    // -- Scoring tiers --

    #[test]
    fn run_score_tiers() {
        // Long-Chain (threshold 6)
        assert_eq!(run_score(6, 6, 0), WIN_SCORE);
        assert_eq!(run_score(6, 7, 0), WIN_SCORE);
        assert_eq!(run_score(6, 5, 1), NEAR_WIN_SCORE);
        assert_eq!(run_score(6, 5, 0), 5);
        assert_eq!(run_score(6, 4, 2), OPEN_RUN_SCORE);
        assert_eq!(run_score(6, 4, 1), 4);
        assert_eq!(run_score(6, 2, 2), 2);

        // Short-Chain (threshold 3)
        assert_eq!(run_score(3, 3, 0), WIN_SCORE);
        assert_eq!(run_score(3, 2, 2), NEAR_WIN_SCORE);
        assert_eq!(run_score(3, 2, 0), 2);
        assert_eq!(run_score(3, 1, 2), OPEN_RUN_SCORE);
    }

    #[test]
    fn run_metrics_counts_through_candidate() {
        let board = board_from_layout(&[
            ".....", //
            "LL.L.", //
            ".....", //
            ".....", //
            ".....",
        ]);
        let (len, open) = run_metrics(&board, (1, 2), Player::Long, Axis::Horizontal);
        assert_eq!(len, 4);
        assert_eq!(open, 1); // open at (1, 4); closed at the left edge side

        let (len, open) = run_metrics(&board, (1, 2), Player::Long, Axis::Vertical);
        assert_eq!(len, 1);
        assert_eq!(open, 2);
    }

    #[test]
    fn obstacles_close_run_ends() {
        let board = board_from_layout(&[
            ".....", //
            "#SS..", //
            ".....", //
            ".....", //
            ".....",
        ]);
        let (len, open) = run_metrics(&board, (1, 3), Player::Short, Axis::Horizontal);
        assert_eq!(len, 3);
        assert_eq!(open, 1);
    }
}
