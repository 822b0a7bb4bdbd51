//! Toy catalog
//!
//! Prey archetypes the game can spawn. A `ToyConfig` is chosen outside the
//! simulation (built-in catalog or a custom JSON description) and stays
//! read-only for the whole session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How a toy's body is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VisualType {
    Laser,
    Mouse,
    Fly,
    Butterfly,
    Beetle,
    Fish,
    Snake,
    /// Glyph fallback, also used for any unrecognised type
    Emoji,
}

impl VisualType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualType::Laser => "laser",
            VisualType::Mouse => "mouse",
            VisualType::Fly => "fly",
            VisualType::Butterfly => "butterfly",
            VisualType::Beetle => "beetle",
            VisualType::Fish => "fish",
            VisualType::Snake => "snake",
            VisualType::Emoji => "emoji",
        }
    }

    /// Parse a visual type; unknown names fall back to the glyph renderer
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "laser" => VisualType::Laser,
            "mouse" => VisualType::Mouse,
            "fly" => VisualType::Fly,
            "butterfly" => VisualType::Butterfly,
            "beetle" => VisualType::Beetle,
            "fish" => VisualType::Fish,
            "snake" => VisualType::Snake,
            _ => VisualType::Emoji,
        }
    }

    /// Whether the renderer draws a trail ribbon behind this body.
    /// Mouse, fish and snake bodies provide their own sense of motion.
    pub fn draws_trail(&self) -> bool {
        !matches!(self, VisualType::Mouse | VisualType::Fish | VisualType::Snake)
    }
}

impl From<String> for VisualType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<VisualType> for String {
    fn from(v: VisualType) -> Self {
        v.as_str().to_string()
    }
}

/// Movement policy applied to every entity of a toy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MovementStyle {
    #[default]
    Smooth,
    Jittery,
    StopGo,
    Teleport,
    Wander,
    Bounce,
}

impl MovementStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementStyle::Smooth => "smooth",
            MovementStyle::Jittery => "jittery",
            MovementStyle::StopGo => "stop_go",
            MovementStyle::Teleport => "teleport",
            MovementStyle::Wander => "wander",
            MovementStyle::Bounce => "bounce",
        }
    }

    /// Parse a movement style; unknown names fall back to `Smooth`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "jittery" => MovementStyle::Jittery,
            "stop_go" | "stopgo" => MovementStyle::StopGo,
            "teleport" => MovementStyle::Teleport,
            "wander" => MovementStyle::Wander,
            "bounce" => MovementStyle::Bounce,
            _ => MovementStyle::Smooth,
        }
    }

    /// Styles that also jump to a new spot when caught
    pub fn relocates_on_catch(&self) -> bool {
        matches!(self, MovementStyle::Teleport | MovementStyle::Jittery)
    }
}

impl From<String> for MovementStyle {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<MovementStyle> for String {
    fn from(m: MovementStyle) -> Self {
        m.as_str().to_string()
    }
}

/// Accepted speed range (px/tick)
pub const SPEED_RANGE: (f32, f32) = (1.0, 20.0);
/// Accepted size range (px)
pub const SIZE_RANGE: (f32, f32) = (20.0, 100.0);
const DEFAULT_SPEED: f32 = 5.0;
const DEFAULT_SIZE: f32 = 50.0;
/// Used when a toy color cannot be parsed
pub const FALLBACK_COLOR: [f32; 4] = [0.45, 0.45, 0.48, 1.0];

/// A prey archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToyConfig {
    pub id: String,
    pub name: String,
    /// Used for UI icons and the glyph fallback
    pub emoji: String,
    pub visual_type: VisualType,
    /// Hex color for trails, effects and body
    pub color: String,
    pub speed: f32,
    pub size: f32,
    pub movement_style: MovementStyle,
    #[serde(default)]
    pub is_system: bool,
}

/// Errors from parsing a custom toy description
#[derive(Debug, Error)]
pub enum ToyError {
    #[error("toy description is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("toy description has an empty name")]
    EmptyName,
}

/// Shape of a generated toy description (no id, nothing trusted)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ToyDraft {
    name: String,
    #[serde(default)]
    emoji: String,
    #[serde(default = "default_visual")]
    visual_type: VisualType,
    #[serde(default)]
    color: String,
    #[serde(default)]
    speed: Option<f32>,
    #[serde(default)]
    size: Option<f32>,
    #[serde(default)]
    movement_style: MovementStyle,
}

fn default_visual() -> VisualType {
    VisualType::Emoji
}

impl ToyConfig {
    /// Catch radius around an entity of this toy
    pub fn hit_radius(&self) -> f32 {
        self.size * CATCH_RADIUS_MULTIPLIER
    }

    /// Startle radius around an entity of this toy
    pub fn scared_radius(&self) -> f32 {
        self.size * SCARED_RADIUS_MULTIPLIER
    }

    /// Body color as linear RGBA, grey when the hex string is malformed
    pub fn rgba(&self) -> [f32; 4] {
        parse_hex_color(&self.color).unwrap_or(FALLBACK_COLOR)
    }

    /// Clamp numeric fields into usable ranges. Non-finite values take defaults.
    pub fn sanitized(mut self) -> Self {
        self.speed = sanitize(self.speed, DEFAULT_SPEED, SPEED_RANGE);
        self.size = sanitize(self.size, DEFAULT_SIZE, SIZE_RANGE);
        self
    }

    /// Build a custom toy from a generated JSON description
    pub fn from_json(json: &str) -> Result<Self, ToyError> {
        let draft: ToyDraft = serde_json::from_str(json)?;
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(ToyError::EmptyName);
        }

        let toy = ToyConfig {
            id: format!("custom_{}", slug(&name)),
            emoji: if draft.emoji.is_empty() {
                "❓".to_string()
            } else {
                draft.emoji
            },
            name,
            visual_type: draft.visual_type,
            color: draft.color,
            speed: draft.speed.unwrap_or(DEFAULT_SPEED),
            size: draft.size.unwrap_or(DEFAULT_SIZE),
            movement_style: draft.movement_style,
            is_system: false,
        }
        .sanitized();

        if parse_hex_color(&toy.color).is_none() {
            log::warn!("Toy '{}' has unusable color '{}'", toy.name, toy.color);
        }
        Ok(toy)
    }
}

fn sanitize(value: f32, default: f32, (lo, hi): (f32, f32)) -> f32 {
    if value.is_finite() {
        value.clamp(lo, hi)
    } else {
        default
    }
}

fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Parse `#rgb` or `#rrggbb` into RGBA (0-1)
pub fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    let digits = hex.trim().strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);

    match digits.len() {
        6 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
            1.0,
        ]),
        3 => {
            let expand = |i: usize| {
                let c = &digits[i..i + 1];
                channel(&format!("{c}{c}"))
            };
            Some([expand(0)?, expand(1)?, expand(2)?, 1.0])
        }
        _ => None,
    }
}

/// id, name, emoji, visual, color, speed, size, movement
type ToyRow = (
    &'static str,
    &'static str,
    &'static str,
    VisualType,
    &'static str,
    f32,
    f32,
    MovementStyle,
);

fn system_toy((id, name, emoji, visual_type, color, speed, size, movement_style): ToyRow) -> ToyConfig {
    ToyConfig {
        id: id.to_string(),
        name: name.to_string(),
        emoji: emoji.to_string(),
        visual_type,
        color: color.to_string(),
        speed,
        size,
        movement_style,
        is_system: true,
    }
}

/// The built-in toys, in picker order
pub fn default_toys() -> Vec<ToyConfig> {
    use MovementStyle::*;
    use VisualType::*;

    const ROWS: [ToyRow; 6] = [
        ("mouse_grey", "Squeaky", "🐭", Mouse, "#52525b", 10.0, 70.0, Wander),
        ("fly_blue", "Buzzy", "🪰", Fly, "#0369a1", 16.0, 35.0, Jittery),
        ("butterfly_orange", "Flutter", "🦋", Butterfly, "#ea580c", 5.0, 60.0, Smooth),
        ("beetle_green", "Scuttle", "🪲", Beetle, "#15803d", 7.0, 45.0, Smooth),
        ("snake_green", "Hiss", "🐍", Snake, "#65a30d", 7.0, 50.0, Wander),
        ("fish_orange", "Finny", "🐟", Fish, "#f97316", 8.0, 65.0, Wander),
    ];
    ROWS.into_iter().map(system_toy).collect()
}

/// The toy selected on first launch
pub fn default_toy() -> ToyConfig {
    default_toys().swap_remove(0)
}

/// Look up a built-in toy by id
pub fn find_toy(id: &str) -> Option<ToyConfig> {
    default_toys().into_iter().find(|t| t.id == id)
}

/// The built-in toy after `current_id`, wrapping around
pub fn next_toy(current_id: &str) -> ToyConfig {
    let toys = default_toys();
    let idx = toys
        .iter()
        .position(|t| t.id == current_id)
        .map(|i| (i + 1) % toys.len())
        .unwrap_or(0);
    toys[idx].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_fields_in_order() {
        let fly = find_toy("fly_blue").unwrap();
        assert_eq!(fly.name, "Buzzy");
        assert_eq!(fly.visual_type, VisualType::Fly);
        assert_eq!(fly.color, "#0369a1");
        assert_eq!((fly.speed, fly.size), (16.0, 35.0));
        assert_eq!(fly.movement_style, MovementStyle::Jittery);
        assert!(fly.is_system);
    }

    #[test]
    fn test_catalog_ids_unique() {
        let toys = default_toys();
        for (i, a) in toys.iter().enumerate() {
            assert!(a.is_system);
            for b in &toys[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_catalog_colors_parse() {
        for toy in default_toys() {
            assert!(parse_hex_color(&toy.color).is_some(), "{}", toy.id);
        }
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some([1.0, 0.0, 0.0, 1.0]));
        assert_eq!(parse_hex_color("#0f0"), Some([0.0, 1.0, 0.0, 1.0]));
        assert_eq!(parse_hex_color("red"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn test_radii() {
        let toy = find_toy("mouse_grey").unwrap();
        assert!((toy.hit_radius() - 91.0).abs() < 1e-4);
        assert!((toy.scared_radius() - 280.0).abs() < 1e-4);
    }

    #[test]
    fn test_from_json_full() {
        let json = r##"{
            "name": "Space Moth",
            "emoji": "🦋",
            "visualType": "butterfly",
            "color": "#a855f7",
            "speed": 6,
            "size": 55,
            "movementStyle": "stop_go"
        }"##;
        let toy = ToyConfig::from_json(json).unwrap();
        assert_eq!(toy.id, "custom_space_moth");
        assert_eq!(toy.visual_type, VisualType::Butterfly);
        assert_eq!(toy.movement_style, MovementStyle::StopGo);
        assert!(!toy.is_system);
    }

    #[test]
    fn test_from_json_fails_closed() {
        let json = r#"{
            "name": "Mystery",
            "visualType": "dragon",
            "color": "sparkly",
            "speed": 900,
            "size": -4,
            "movementStyle": "orbit"
        }"#;
        let toy = ToyConfig::from_json(json).unwrap();
        assert_eq!(toy.visual_type, VisualType::Emoji);
        assert_eq!(toy.movement_style, MovementStyle::Smooth);
        assert_eq!(toy.speed, SPEED_RANGE.1);
        assert_eq!(toy.size, SIZE_RANGE.0);
        assert_eq!(toy.rgba(), FALLBACK_COLOR);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            ToyConfig::from_json("not json"),
            Err(ToyError::Parse(_))
        ));
        assert!(matches!(
            ToyConfig::from_json(r#"{"name": "  "}"#),
            Err(ToyError::EmptyName)
        ));
    }

    #[test]
    fn test_serde_round_trip_names() {
        let toy = find_toy("fish_orange").unwrap();
        let json = serde_json::to_string(&toy).unwrap();
        assert!(json.contains(r#""visualType":"fish""#));
        assert!(json.contains(r#""movementStyle":"wander""#));
    }

    #[test]
    fn test_next_toy_wraps() {
        let toys = default_toys();
        let last = toys.last().unwrap();
        assert_eq!(next_toy(&last.id).id, toys[0].id);
        assert_eq!(next_toy("unknown").id, toys[0].id);
    }
}
