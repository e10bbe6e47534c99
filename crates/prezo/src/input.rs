//! Mapping of raw keyboard, touch and wheel input onto navigation directions.

use crate::deck::Direction;

pub const DEFAULT_HOT_ZONE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Other,
}

impl Key {
    /// Recognize a key from a DOM `KeyboardEvent`.
    ///
    /// `key` is preferred; older engines report `Left`/`Up`/... or only a
    /// `keyCode`, so codes 37-40 are accepted as a fallback.
    pub fn from_dom(key: &str, key_code: u32) -> Self {
        match key {
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "ArrowDown" | "Down" => Self::ArrowDown,
            _ => match key_code {
                37 => Self::ArrowLeft,
                38 => Self::ArrowUp,
                39 => Self::ArrowRight,
                40 => Self::ArrowDown,
                _ => Self::Other,
            },
        }
    }
}

pub fn route_key(key: Key) -> Option<Direction> {
    match key {
        Key::ArrowLeft | Key::ArrowUp => Some(Direction::Backward),
        Key::ArrowRight | Key::ArrowDown => Some(Direction::Forward),
        Key::Other => None,
    }
}

/// A touch start as seen by the router.
#[derive(Debug, Clone)]
pub struct Tap {
    /// Number of simultaneous touch points.
    pub touches: usize,
    /// Tag name of the touched element.
    pub target_tag: String,
    /// Horizontal client position of the first touch point.
    pub x: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapRoute {
    /// Not ours: multi-touch, or a tap on a link or image.
    Ignored,
    /// A single-finger tap; navigates when it landed in a hot zone.
    Handled(Option<Direction>),
}

impl TapRoute {
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::Handled(direction) => *direction,
            Self::Ignored => None,
        }
    }
}

/// Route a tap by the horizontal hot zones of the viewport.
///
/// `hot_zone` is the width fraction of each edge zone. The left zone goes
/// back, the right zone goes forward, the middle does nothing.
pub fn route_tap(tap: &Tap, viewport_width: f64, hot_zone: f64) -> TapRoute {
    if tap.touches != 1 {
        return TapRoute::Ignored;
    }
    if tap.target_tag.eq_ignore_ascii_case("a") || tap.target_tag.eq_ignore_ascii_case("img") {
        return TapRoute::Ignored;
    }

    let zone = viewport_width * hot_zone;
    let direction = if tap.x < zone {
        Some(Direction::Backward)
    } else if tap.x > viewport_width - zone {
        Some(Direction::Forward)
    } else {
        None
    };
    TapRoute::Handled(direction)
}

/// Route a wheel notch. `delta` uses the legacy `wheelDelta` sign: positive
/// means scrolling up, which goes back.
pub fn route_wheel(delta: f64) -> Direction {
    if delta > 0.0 {
        Direction::Backward
    } else {
        Direction::Forward
    }
}

/// What an input handler did, for the adapter to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handled<T> {
    pub prevent_default: bool,
    pub outcome: Option<T>,
}

impl<T> Handled<T> {
    pub fn ignored() -> Self {
        Self {
            prevent_default: false,
            outcome: None,
        }
    }
}
