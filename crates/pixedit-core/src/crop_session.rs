//! Interactive rectangular crop.
//!
//! A crop is a two-phase transform: the shell supplies an anchor point when the
//! user presses, any number of live points while dragging, and a final point on
//! release. Points arrive in display space (the coordinates of the widget the
//! image is drawn in) and are mapped to buffer pixels only at commit.
//!
//! ```text
//!   Idle --begin--> Anchored --update--> Active --update--> Active
//!    ^                 |                    |
//!    +----commit-------+--------commit------+
//!    +----cancel (from any state)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::history::HistoryStack;
use crate::transform::{self, CropRect};

/// A point in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Factors mapping display coordinates to buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayScale {
    pub x: f64,
    pub y: f64,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl DisplayScale {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scale for a `buffer_w` x `buffer_h` image drawn at
    /// `display_w` x `display_h`.
    ///
    /// # Errors
    ///
    /// `InvalidDimensions` if either display dimension is zero.
    pub fn from_dimensions(buffer_w: u32, buffer_h: u32, display_w: u32, display_h: u32) -> Result<Self> {
        if display_w == 0 || display_h == 0 {
            return Err(EngineError::InvalidDimensions {
                width: display_w,
                height: display_h,
            });
        }
        Ok(Self {
            x: buffer_w as f64 / display_w as f64,
            y: buffer_h as f64 / display_h as f64,
        })
    }

    /// Map a display point to buffer pixel coordinates, flooring each axis.
    pub fn to_buffer(self, point: Point) -> (i64, i64) {
        (
            (point.x * self.x).floor() as i64,
            (point.y * self.y).floor() as i64,
        )
    }
}

/// The rectangle currently being dragged, in display coordinates, with
/// non-negative width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Selection {
    fn between(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CropState {
    #[default]
    Idle,
    Anchored {
        anchor: Point,
    },
    Active {
        anchor: Point,
        live: Point,
    },
}

/// Crop selection state machine.
#[derive(Debug, Clone, Default)]
pub struct CropSession {
    state: CropState,
}

impl CropSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CropState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == CropState::Idle
    }

    /// Start a selection at `point`, discarding any selection in progress.
    pub fn begin(&mut self, point: Point) {
        self.state = CropState::Anchored { anchor: point };
    }

    /// Move the free corner of the selection. Ignored when idle.
    pub fn update(&mut self, point: Point) {
        match self.state {
            CropState::Idle => {}
            CropState::Anchored { anchor } | CropState::Active { anchor, .. } => {
                self.state = CropState::Active {
                    anchor,
                    live: point,
                };
            }
        }
    }

    /// The rectangle to draw, if a selection is in progress.
    pub fn selection(&self) -> Option<Selection> {
        match self.state {
            CropState::Idle => None,
            CropState::Anchored { anchor } => Some(Selection::between(anchor, anchor)),
            CropState::Active { anchor, live } => Some(Selection::between(anchor, live)),
        }
    }

    /// The buffer-space rectangle a commit at `end` would crop to.
    pub fn rect_to(&self, end: Point, scale: DisplayScale) -> Option<CropRect> {
        let anchor = match self.state {
            CropState::Idle => return None,
            CropState::Anchored { anchor } | CropState::Active { anchor, .. } => anchor,
        };
        let (x1, y1) = scale.to_buffer(anchor);
        let (x2, y2) = scale.to_buffer(end);
        Some(CropRect::new(x1, y1, x2, y2).normalized())
    }

    /// Finish the selection at `end` and crop the history's current image.
    ///
    /// The session is idle afterwards whether or not the crop succeeded.
    ///
    /// # Errors
    ///
    /// - `SelectionNotStarted` if no selection is in progress
    /// - `EmptyRegion` if the mapped rectangle has no area; history is untouched
    /// - `NoImageLoaded` if the history holds no image
    pub fn commit(&mut self, end: Point, scale: DisplayScale, history: &mut HistoryStack) -> Result<CropRect> {
        let rect = self.rect_to(end, scale);
        self.state = CropState::Idle;

        let rect = rect.ok_or(EngineError::SelectionNotStarted)?;
        log::debug!(
            "Committing crop ({}, {}) - ({}, {})",
            rect.x1,
            rect.y1,
            rect.x2,
            rect.y2
        );
        history.apply(|img| transform::crop(img, rect))?;
        Ok(rect)
    }

    /// Abandon the selection in progress.
    pub fn cancel(&mut self) {
        self.state = CropState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{ColorMode, PixelBuffer};
    use crate::transform::test_support::gradient;

    fn history_with(width: u32, height: u32) -> HistoryStack {
        let mut history = HistoryStack::new();
        history.load(gradient(width, height, ColorMode::Rgb));
        history
    }

    #[test]
    fn test_state_transitions() {
        let mut session = CropSession::new();
        assert!(session.is_idle());

        session.update(Point::new(5.0, 5.0));
        assert!(session.is_idle(), "Update while idle is ignored");

        session.begin(Point::new(1.0, 2.0));
        assert_eq!(
            session.state(),
            CropState::Anchored {
                anchor: Point::new(1.0, 2.0)
            }
        );

        session.update(Point::new(3.0, 4.0));
        session.update(Point::new(6.0, 7.0));
        assert_eq!(
            session.state(),
            CropState::Active {
                anchor: Point::new(1.0, 2.0),
                live: Point::new(6.0, 7.0)
            }
        );

        session.cancel();
        assert!(session.is_idle());
    }

    #[test]
    fn test_begin_restarts_selection() {
        let mut session = CropSession::new();
        session.begin(Point::new(1.0, 1.0));
        session.update(Point::new(9.0, 9.0));
        session.begin(Point::new(4.0, 4.0));
        assert_eq!(
            session.state(),
            CropState::Anchored {
                anchor: Point::new(4.0, 4.0)
            }
        );
    }

    #[test]
    fn test_selection_is_normalized() {
        let mut session = CropSession::new();
        assert_eq!(session.selection(), None);

        session.begin(Point::new(10.0, 8.0));
        session.update(Point::new(4.0, 12.0));
        assert_eq!(
            session.selection(),
            Some(Selection {
                x: 4.0,
                y: 8.0,
                width: 6.0,
                height: 4.0
            })
        );
    }

    #[test]
    fn test_commit_crops_in_buffer_space() {
        let mut history = history_with(20, 20);
        let original = history.current().cloned().unwrap();
        let mut session = CropSession::new();

        // Display is half the buffer size
        let scale = DisplayScale::from_dimensions(20, 20, 10, 10).unwrap();
        session.begin(Point::new(6.9, 1.0));
        let rect = session.commit(Point::new(2.0, 5.0), scale, &mut history).unwrap();

        assert_eq!(rect, CropRect::new(4, 2, 13, 10));
        let current = history.current().unwrap();
        assert_eq!((current.width(), current.height()), (9, 8));
        assert_eq!(current.get_pixel(0, 0).unwrap(), original.get_pixel(4, 2).unwrap());
        assert!(session.is_idle());
        assert_eq!(history.undo_depth(), 1);
    }

    #[test]
    fn test_commit_from_anchored() {
        let mut history = history_with(10, 10);
        let mut session = CropSession::new();
        session.begin(Point::new(0.0, 0.0));
        session
            .commit(Point::new(5.0, 5.0), DisplayScale::default(), &mut history)
            .unwrap();
        assert_eq!(history.current().unwrap().width(), 5);
    }

    #[test]
    fn test_commit_empty_region_leaves_history() {
        let mut history = history_with(10, 10);
        let mut session = CropSession::new();
        session.begin(Point::new(3.0, 3.0));
        session.update(Point::new(3.0, 8.0));

        let result = session.commit(Point::new(3.0, 8.0), DisplayScale::default(), &mut history);
        assert!(matches!(result, Err(EngineError::EmptyRegion)));
        assert!(session.is_idle());
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.current().unwrap().width(), 10);
    }

    #[test]
    fn test_commit_without_selection() {
        let mut history = history_with(4, 4);
        let mut session = CropSession::new();
        let result = session.commit(Point::new(1.0, 1.0), DisplayScale::default(), &mut history);
        assert!(matches!(result, Err(EngineError::SelectionNotStarted)));
    }

    #[test]
    fn test_commit_without_image() {
        let mut history = HistoryStack::new();
        let mut session = CropSession::new();
        session.begin(Point::new(0.0, 0.0));
        let result = session.commit(Point::new(2.0, 2.0), DisplayScale::default(), &mut history);
        assert!(matches!(result, Err(EngineError::NoImageLoaded)));
        assert!(session.is_idle());
    }

    #[test]
    fn test_display_scale() {
        let scale = DisplayScale::from_dimensions(800, 600, 400, 200).unwrap();
        assert_eq!(scale, DisplayScale::new(2.0, 3.0));
        assert_eq!(scale.to_buffer(Point::new(10.4, 1.5)), (20, 4));
        assert_eq!(scale.to_buffer(Point::new(-0.2, 0.0)), (-1, 0));

        assert!(matches!(
            DisplayScale::from_dimensions(10, 10, 0, 5),
            Err(EngineError::InvalidDimensions { width: 0, height: 5 })
        ));
    }

    #[test]
    fn test_selection_outside_image_is_clamped() {
        let mut history = HistoryStack::new();
        history.load(PixelBuffer::filled(6, 6, ColorMode::Gray, 7).unwrap());
        let mut session = CropSession::new();
        session.begin(Point::new(-10.0, -10.0));
        session
            .commit(Point::new(3.0, 100.0), DisplayScale::default(), &mut history)
            .unwrap();
        let current = history.current().unwrap();
        assert_eq!((current.width(), current.height()), (3, 6));
    }
}
