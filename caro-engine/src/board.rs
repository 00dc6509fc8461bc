use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Coord;
use crate::error::CaroError;
use crate::player::Player;

/// Cosmetic obstacle tint, assigned at placement and never read by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleColor {
    Green,
    Red,
    Orange,
    Blue,
}

pub const DEFAULT_PALETTE: [ObstacleColor; 4] = [
    ObstacleColor::Green,
    ObstacleColor::Red,
    ObstacleColor::Orange,
    ObstacleColor::Blue,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    Empty,
    Stone(Player),
    Obstacle(ObstacleColor),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Square grid stored as a flat array. Cells are monotonic: once a stone or
/// obstacle is set, the cell never changes for the rest of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: Vec<Cell>,
    size: u8,
}

impl Board {
    /// Create an empty board with the given side length.
    pub fn new(size: u8) -> Self {
        Board {
            cells: vec![Cell::Empty; size as usize * size as usize],
            size,
        }
    }

    /// Create a board with `obstacle_count` obstacles at distinct random
    /// cells, colored uniformly from `palette`. Samples coordinates until
    /// the exact count is placed, so the count must fit on the board.
    pub fn with_obstacles<R: Rng>(
        size: u8,
        obstacle_count: u16,
        palette: &[ObstacleColor],
        rng: &mut R,
    ) -> Self {
        assert!(
            (obstacle_count as usize) < size as usize * size as usize,
            "obstacle count must be below the cell count"
        );

        let mut board = Board::new(size);
        let mut placed = 0;
        while placed < obstacle_count {
            let row = rng.random_range(0..size);
            let col = rng.random_range(0..size);
            if board.cell_at((row, col)) == Some(Cell::Empty) {
                let color = palette[rng.random_range(0..palette.len())];
                board.set((row, col), Cell::Obstacle(color));
                placed += 1;
            }
        }
        board
    }

    // -- Accessors --

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn on_board(&self, (row, col): Coord) -> bool {
        row < self.size && col < self.size
    }

    /// Pure read; `None` off the board.
    pub fn cell_at(&self, coord: Coord) -> Option<Cell> {
        if self.on_board(coord) {
            Some(self.cells[self.idx(coord)])
        } else {
            None
        }
    }

    pub fn stone_at(&self, coord: Coord) -> Option<Player> {
        match self.cell_at(coord) {
            Some(Cell::Stone(p)) => Some(p),
            _ => None,
        }
    }

    /// True when no empty cell remains.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn empty_cells(&self) -> Vec<Coord> {
        let mut out = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                if self.cells[self.idx((row, col))].is_empty() {
                    out.push((row, col));
                }
            }
        }
        out
    }

    pub fn stone_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Stone(_)))
            .count()
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, Cell::Obstacle(_)))
            .count()
    }

    // -- Mutation --

    /// Place a stone. Rejects out-of-range and non-empty cells without
    /// touching the board.
    pub fn place(&mut self, coord: Coord, player: Player) -> Result<(), CaroError> {
        if !self.on_board(coord) {
            return Err(CaroError::NotOnBoard);
        }
        if !self.cells[self.idx(coord)].is_empty() {
            return Err(CaroError::Occupied);
        }
        self.set(coord, Cell::Stone(player));
        Ok(())
    }

    /// Direct cell write for prepared boards and test layouts. Gameplay
    /// goes through `place`; this skips occupancy checks entirely.
    pub fn set(&mut self, coord: Coord, cell: Cell) {
        let i = self.idx(coord);
        self.cells[i] = cell;
    }

    // -- Internal helpers --

    #[inline]
    fn idx(&self, (row, col): Coord) -> usize {
        row as usize * self.size as usize + col as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
                    _ => Cell::Empty,
                };
                board.set((row as u8, col as u8), cell);
            }
        }
        board
    }

    #[test]
    fn creates_empty_board() {
        let board = Board::new(15);
        assert_eq!(board.size(), 15);
        assert_eq!(board.cells().len(), 225);
        assert!(board.cells().iter().all(|c| c.is_empty()));
    }

    #[test]
    fn obstacles_exact_count_no_overlap() {
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::with_obstacles(15, 20, &DEFAULT_PALETTE, &mut rng);
        assert_eq!(board.obstacle_count(), 20);
        assert_eq!(board.stone_count(), 0);
        assert_eq!(board.empty_cells().len(), 225 - 20);
    }

    #[test]
    fn obstacles_dense_board_still_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        let board = Board::with_obstacles(5, 24, &DEFAULT_PALETTE, &mut rng);
        assert_eq!(board.obstacle_count(), 24);
        assert_eq!(board.empty_cells().len(), 1);
    }

    #[test]
    #[should_panic(expected = "obstacle count")]
    fn rejects_obstacle_count_at_cell_count() {
        let mut rng = StdRng::seed_from_u64(1);
        Board::with_obstacles(3, 9, &DEFAULT_PALETTE, &mut rng);
    }

    #[test]
    fn obstacle_placement_is_seed_deterministic() {
        let a = Board::with_obstacles(9, 10, &DEFAULT_PALETTE, &mut StdRng::seed_from_u64(42));
        let b = Board::with_obstacles(9, 10, &DEFAULT_PALETTE, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn place_on_empty_cell() {
        let mut board = Board::new(4);
        assert!(board.place((1, 2), Player::Short).is_ok());
        assert_eq!(board.stone_at((1, 2)), Some(Player::Short));
    }

    #[test]
    fn place_rejects_occupied_without_mutation() {
        let mut board = board_from_layout(&["....", ".S..", "..#.", "...."]);
        let before = board.clone();

        assert_eq!(board.place((1, 1), Player::Long), Err(CaroError::Occupied));
        assert_eq!(board.place((2, 2), Player::Long), Err(CaroError::Occupied));
        assert_eq!(board, before);
    }

    #[test]
    fn place_rejects_out_of_range() {
        let mut board = Board::new(4);
        let before = board.clone();

        assert_eq!(board.place((4, 0), Player::Short), Err(CaroError::NotOnBoard));
        assert_eq!(board.place((0, 4), Player::Short), Err(CaroError::NotOnBoard));
        assert_eq!(board.place((255, 255), Player::Short), Err(CaroError::NotOnBoard));
        assert_eq!(board, before);
    }

    #[test]
    fn cell_at_reads() {
        let board = board_from_layout(&["L...", "....", "....", "...S"]);
        assert_eq!(board.cell_at((0, 0)), Some(Cell::Stone(Player::Long)));
        assert_eq!(board.cell_at((3, 3)), Some(Cell::Stone(Player::Short)));
        assert_eq!(board.cell_at((1, 1)), Some(Cell::Empty));
        assert_eq!(board.cell_at((4, 4)), None);
    }

    #[test]
    fn full_board_detection() {
        let mut board = board_from_layout(&["SL", "#."]);
        assert!(!board.is_full());
        board.place((1, 1), Player::Short).unwrap();
        assert!(board.is_full());
        assert!(board.empty_cells().is_empty());
    }

    #[test]
    fn empty_cells_row_major_order() {
        let board = board_from_layout(&["S.", ".#"]);
        assert_eq!(board.empty_cells(), vec![(0, 1), (1, 0)]);
    }
}
