use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaroError {
    OutOfTurn,
    Occupied,
    NotOnBoard,
    SkillOnCooldown,
    GameOver,
}

impl fmt::Display for CaroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaroError::OutOfTurn => write!(f, "out of turn"),
            CaroError::Occupied => write!(f, "cell occupied"),
            CaroError::NotOnBoard => write!(f, "not on board"),
            CaroError::SkillOnCooldown => write!(f, "skill on cooldown"),
            CaroError::GameOver => write!(f, "game over"),
        }
    }
}

impl std::error::Error for CaroError {}
