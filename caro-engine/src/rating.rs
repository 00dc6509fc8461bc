//! Elo rating updates for ranked play.

/// Standard Elo K-factor.
pub const K_FACTOR: f64 = 32.0;

/// Starting rating for a fresh profile.
pub const DEFAULT_RATING: i32 = 1000;

/// Fixed rating of the built-in opponent.
pub const MACHINE_RATING: i32 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
}

impl GameResult {
    fn actual_score(self) -> f64 {
        match self {
            GameResult::Win => 1.0,
            GameResult::Loss => 0.0,
        }
    }
}

/// Expected score of `rating` against `opponent` on the logistic Elo curve.
pub fn expected_score(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent - rating) as f64 / 400.0))
}

/// Signed rating change for the given result, rounded to the nearest point.
pub fn rating_delta(rating: i32, opponent: i32, result: GameResult) -> i32 {
    let expected = expected_score(rating, opponent);
    (K_FACTOR * (result.actual_score() - expected)).round() as i32
}
