//! Debug coordinate picker.
//!
//! Turns pointer events over a scaled page into reference-frame coordinates
//! for authoring field positions. A press and release within
//! [`CLICK_TOLERANCE`] reference px of each other is a click; anything
//! further apart is a drag, normalized so width and height are never
//! negative.
//!
//! Event positions are offsets from the page's top-left corner in screen
//! pixels (`client - rect`). They are converted with
//! [`unscale`](crate::units::unscale), which rounds.

use serde::{Deserialize, Serialize};

use crate::units::unscale;

/// Clicks move less than this many reference px on both axes.
pub const CLICK_TOLERANCE: f64 = 5.0;

/// Pointer input, as posted by the page script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { page: u32, x: f64, y: f64 },
    Move { page: u32, x: f64, y: f64 },
    Up { page: u32, x: f64, y: f64 },
    /// The pointer left the page; cancels any drag in progress.
    Leave,
}

/// A completed pick, in reference px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickResult {
    Point {
        page: u32,
        top: f64,
        left: f64,
    },
    Rect {
        page: u32,
        top: f64,
        left: f64,
        width: f64,
        height: f64,
    },
}

impl PickResult {
    /// Operator-facing log line.
    pub fn describe(&self) -> String {
        match self {
            PickResult::Point { page, top, left } => {
                format!("📍 클릭 좌표 (Page {}): top: {}, left: {}", page, top, left)
            }
            PickResult::Rect {
                page,
                top,
                left,
                width,
                height,
            } => format!(
                "📦 드래그 영역 (Page {}): top: {}, left: {}, width: {}, height: {}",
                page, top, left, width, height
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    page: u32,
    x: f64,
    y: f64,
}

/// Pointer state machine for one page stack at one scale.
#[derive(Debug, Clone)]
pub struct DebugPicker {
    scale: f64,
    press: Option<Press>,
}

impl DebugPicker {
    pub fn new(scale: f64) -> Self {
        Self { scale, press: None }
    }

    /// Feed one event; returns a result when a press is released.
    pub fn handle(&mut self, event: PointerEvent) -> Option<PickResult> {
        match event {
            PointerEvent::Down { page, x, y } => {
                self.press = Some(Press {
                    page,
                    x: unscale(x, self.scale),
                    y: unscale(y, self.scale),
                });
                None
            }
            // The page script draws the drag box; only the release decides the pick
            PointerEvent::Move { .. } => None,
            PointerEvent::Up { page, x, y } => {
                let press = self.press.take()?;
                let (x, y) = (unscale(x, self.scale), unscale(y, self.scale));
                let result = pick(press, page, x, y);
                tracing::info!(pick = %result.describe(), "debug pick");
                Some(result)
            }
            PointerEvent::Leave => {
                self.press = None;
                None
            }
        }
    }
}

fn pick(press: Press, page: u32, x: f64, y: f64) -> PickResult {
    if (x - press.x).abs() < CLICK_TOLERANCE && (y - press.y).abs() < CLICK_TOLERANCE {
        return PickResult::Point { page, top: y, left: x };
    }
    PickResult::Rect {
        page,
        top: press.y.min(y),
        left: press.x.min(x),
        width: (x - press.x).abs(),
        height: (y - press.y).abs(),
    }
}

/// Run a whole event sequence, collecting every completed pick.
pub fn replay(scale: f64, events: impl IntoIterator<Item = PointerEvent>) -> Vec<PickResult> {
    let mut picker = DebugPicker::new(scale);
    events.into_iter().filter_map(|e| picker.handle(e)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down { page: 1, x, y }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up { page: 1, x, y }
    }

    #[test]
    fn test_click_reports_release_point() {
        // 0.5 scale: screen (104, 64) is reference (208, 128)
        let picks = replay(0.5, [down(103.0, 63.0), up(104.0, 64.0)]);
        assert_eq!(picks, vec![PickResult::Point { page: 1, top: 128.0, left: 208.0 }]);
    }

    #[test]
    fn test_reverse_drag_is_normalized() {
        let picks = replay(1.0, [down(300.0, 200.0), up(100.0, 150.0)]);
        assert_eq!(
            picks,
            vec![PickResult::Rect {
                page: 1,
                top: 150.0,
                left: 100.0,
                width: 200.0,
                height: 50.0,
            }]
        );
    }

    #[test]
    fn test_drag_on_one_axis_only() {
        // moving 10px horizontally is enough to make it a drag
        let picks = replay(1.0, [down(100.0, 100.0), up(110.0, 102.0)]);
        assert!(matches!(picks[0], PickResult::Rect { width: 10.0, height: 2.0, .. }));
    }

    #[test]
    fn test_leave_cancels() {
        let picks = replay(1.0, [down(0.0, 0.0), PointerEvent::Leave, up(50.0, 50.0)]);
        assert!(picks.is_empty());
    }

    #[test]
    fn test_moves_never_pick() {
        let mut picker = DebugPicker::new(1.0);
        assert_eq!(picker.handle(PointerEvent::Move { page: 1, x: 5.0, y: 5.0 }), None);
        let picks = replay(
            1.0,
            [
                down(10.0, 10.0),
                PointerEvent::Move { page: 1, x: 500.0, y: 500.0 },
                PointerEvent::Move { page: 2, x: 90.0, y: 90.0 },
                up(40.0, 30.0),
            ],
        );
        assert!(matches!(picks[..], [PickResult::Rect { width: 30.0, height: 20.0, .. }]));
    }

    #[test]
    fn test_describe() {
        let point = PickResult::Point { page: 2, top: 128.0, left: 208.0 };
        assert_eq!(point.describe(), "📍 클릭 좌표 (Page 2): top: 128, left: 208");
    }

    #[test]
    fn test_event_json() {
        let event: PointerEvent = serde_json::from_str(r#"{"type":"down","page":1,"x":3.5,"y":4}"#).unwrap();
        assert_eq!(event, PointerEvent::Down { page: 1, x: 3.5, y: 4.0 });
        let leave: PointerEvent = serde_json::from_str(r#"{"type":"leave"}"#).unwrap();
        assert_eq!(leave, PointerEvent::Leave);
    }
}
