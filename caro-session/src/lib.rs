pub mod error;
pub mod pacing;
pub mod session;
pub mod store;
pub mod view;

pub use error::SessionError;
pub use pacing::{Immediate, Pacer, ThinkingDelay};
pub use session::{GameMode, GameSession, PostGame};
pub use store::{HistoryEntry, JsonFileStore, MemoryStore, ProfileStore, RankedResult};
pub use view::GameView;
