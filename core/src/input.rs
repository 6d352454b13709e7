use serde::{Deserialize, Serialize};

use crate::*;

/// Minimum travel, in CSS pixels, along the dominant axis for a touch to count as a swipe.
pub const MIN_SWIPE_DISTANCE: f64 = 50.0;

/// Something the player asked for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Slide(Direction),
    Restart,
}

impl Command {
    /// Maps a `KeyboardEvent.code` to a command, arrows and WASD slide, `R` restarts.
    pub fn from_key_code(code: &str) -> Option<Self> {
        use Direction::*;
        match code {
            "ArrowLeft" | "KeyA" => Some(Self::Slide(Left)),
            "ArrowRight" | "KeyD" => Some(Self::Slide(Right)),
            "ArrowUp" | "KeyW" => Some(Self::Slide(Up)),
            "ArrowDown" | "KeyS" => Some(Self::Slide(Down)),
            "KeyR" => Some(Self::Restart),
            _ => None,
        }
    }
}

/// Whether the browser default (page scrolling) must be suppressed for `code`.
pub fn suppresses_scroll(code: &str) -> bool {
    matches!(code, "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight")
}

/// Direction of a single-finger swipe from `start` to `end`, both `(x, y)` in screen space.
pub fn swipe_direction(start: (f64, f64), end: (f64, f64)) -> Option<Direction> {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;

    if dx.abs().max(dy.abs()) < MIN_SWIPE_DISTANCE {
        return None;
    }

    Some(if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    })
}

/// Drops events that arrive less than `interval_ms` after the last admitted one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Debouncer {
    interval_ms: u64,
    last: Option<u64>,
}

impl Debouncer {
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last: None,
        }
    }

    pub fn admit(&mut self, now_ms: u64) -> bool {
        match self.last {
            Some(last) if now_ms.saturating_sub(last) < self.interval_ms => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(MOVE_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        use Direction::*;
        let cases = [
            ("ArrowLeft", Left),
            ("KeyA", Left),
            ("ArrowRight", Right),
            ("KeyD", Right),
            ("ArrowUp", Up),
            ("KeyW", Up),
            ("ArrowDown", Down),
            ("KeyS", Down),
        ];
        for (code, direction) in cases {
            assert_eq!(Command::from_key_code(code), Some(Command::Slide(direction)));
        }
        assert_eq!(Command::from_key_code("KeyR"), Some(Command::Restart));
        assert_eq!(Command::from_key_code("KeyQ"), None);
        assert_eq!(Command::from_key_code("Enter"), None);
    }

    #[test]
    fn only_arrows_suppress_scrolling() {
        assert!(suppresses_scroll("ArrowUp"));
        assert!(suppresses_scroll("ArrowRight"));
        assert!(!suppresses_scroll("KeyW"));
        assert!(!suppresses_scroll("Space"));
    }

    #[test]
    fn short_swipes_are_ignored() {
        assert_eq!(swipe_direction((100.0, 100.0), (149.0, 130.0)), None);
        assert_eq!(swipe_direction((0.0, 0.0), (0.0, 0.0)), None);
    }

    #[test]
    fn swipe_follows_dominant_axis() {
        assert_eq!(swipe_direction((0.0, 0.0), (80.0, 20.0)), Some(Direction::Right));
        assert_eq!(swipe_direction((80.0, 0.0), (0.0, 20.0)), Some(Direction::Left));
        assert_eq!(swipe_direction((0.0, 0.0), (10.0, 60.0)), Some(Direction::Down));
        assert_eq!(swipe_direction((0.0, 60.0), (10.0, 0.0)), Some(Direction::Up));
        // ties go vertical
        assert_eq!(swipe_direction((0.0, 0.0), (60.0, 60.0)), Some(Direction::Down));
    }

    #[test]
    fn debouncer_spaces_out_events() {
        let mut debouncer = Debouncer::new(100);
        assert!(debouncer.admit(1_000));
        assert!(!debouncer.admit(1_050));
        assert!(!debouncer.admit(1_099));
        assert!(debouncer.admit(1_100));
        assert!(debouncer.admit(5_000));
    }
}
