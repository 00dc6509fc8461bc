//! Pacing for the machine opponent. A human-visible pause before each
//! machine placement keeps the game readable; tests swap in `Immediate`.

use std::time::Duration;

pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(800);

#[allow(async_fn_in_trait)]
pub trait Pacer {
    async fn pause(&self);
}

/// Real-time pause backed by the tokio timer.
#[derive(Debug, Clone, Copy)]
pub struct ThinkingDelay(pub Duration);

impl Default for ThinkingDelay {
    fn default() -> Self {
        ThinkingDelay(DEFAULT_THINKING_DELAY)
    }
}

impl Pacer for ThinkingDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.0).await;
    }
}

/// No pause at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Pacer for Immediate {
    async fn pause(&self) {}
}
