//! Input translation shared by the web front-end and tests

use glam::Vec2;

/// Convert a client (viewport) coordinate into canvas-local pixels
pub fn client_to_canvas(client: Vec2, canvas_origin: Vec2) -> Vec2 {
    client - canvas_origin
}

/// Keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePlay,
    /// Set the number of critters
    SetCount(usize),
    NextToy,
    ResetScore,
}

impl Command {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Enter" => Some(Self::TogglePlay),
            "t" | "T" => Some(Self::NextToy),
            "r" | "R" => Some(Self::ResetScore),
            k => match k.parse::<usize>() {
                Ok(n @ 1..=8) => Some(Self::SetCount(n)),
                _ => None,
            },
        }
    }
}
