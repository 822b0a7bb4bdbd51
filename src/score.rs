//! Catch/miss scoring

/// Receives score events from the frame driver
pub trait ScoreListener {
    fn on_catch(&mut self);
    fn on_miss(&mut self);
}

/// Highest streak multiplier
pub const MAX_MULTIPLIER: u32 = 10;

/// Score with a streak multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u32,
    pub multiplier: u32,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self { score: 0, multiplier: 1 }
    }
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl ScoreListener for ScoreBoard {
    fn on_catch(&mut self) {
        self.score = self.score.saturating_add(self.multiplier);
        self.multiplier = (self.multiplier + 1).min(MAX_MULTIPLIER);
    }

    fn on_miss(&mut self) {
        self.multiplier = 1;
    }
}

/// Listener that ignores everything (headless runs)
impl ScoreListener for () {
    fn on_catch(&mut self) {}
    fn on_miss(&mut self) {}
}
