use arrayvec::ArrayVec;

use crate::Coord;
use crate::board::Board;
use crate::player::Player;
use crate::rules::{Axis, Rules};

/// Longest run the detector ever collects: 2 * max threshold - 1.
type Run = ArrayVec<Coord, 11>;

/// Check whether the stone just placed at `coord` completes a winning run.
///
/// Axes are scanned in the fixed order of the player's axis set and the
/// first qualifying run wins; there is no search for a "best" line. The
/// returned line is ordered along the axis and trimmed to exactly the
/// player's threshold, always containing the placed cell.
pub fn check_win(
    board: &Board,
    rules: &Rules,
    coord: Coord,
    player: Player,
) -> Option<Vec<Coord>> {
    let threshold = player.threshold();
    for &axis in rules.axes(player) {
        let run = run_through(board, coord, player, axis, threshold);
        if run.len() >= threshold {
            let placed_idx = run.iter().position(|&c| c == coord).unwrap_or(0);
            let start = placed_idx.min(run.len() - threshold);
            return Some(run[start..start + threshold].to_vec());
        }
    }
    None
}

/// Contiguous run of the player's stones through `coord` along `axis`,
/// ordered from the low end to the high end. The placed cell itself is
/// included regardless of the board content at `coord`.
fn run_through(
    board: &Board,
    coord: Coord,
    player: Player,
    axis: Axis,
    threshold: usize,
) -> Run {
    let (dr, dc) = axis.delta();

    let mut run = Run::new();
    for c in walk(board, coord, player, (-dr, -dc), threshold - 1).iter().rev() {
        run.push(*c);
    }
    run.push(coord);
    for c in walk(board, coord, player, (dr, dc), threshold - 1) {
        run.push(c);
    }
    run
}

/// Step outward from `from` (exclusive) collecting up to `limit` contiguous
/// cells holding the player's stones. Stops at the board edge or the first
/// non-matching cell.
fn walk(
    board: &Board,
    from: Coord,
    player: Player,
    (dr, dc): (i16, i16),
    limit: usize,
) -> ArrayVec<Coord, 5> {
    let mut out = ArrayVec::new();
    for i in 1..=limit as i16 {
        let row = from.0 as i16 + i * dr;
        let col = from.1 as i16 + i * dc;
        if row < 0 || col < 0 {
            break;
        }
        let next = (row as u8, col as u8);
        if board.stone_at(next) != Some(player) {
            break;
        }
        out.push(next);
    }
    out
}
