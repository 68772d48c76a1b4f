use std::path::PathBuf;
use std::time::{Duration, Instant};

use iced::window;

/// Drops of several files arrive as a burst of single-file events; anything
/// within this window of an accepted drop belongs to the same gesture.
const GESTURE_WINDOW: Duration = Duration::from_millis(500);

/// The whole window is the drop region. iced reports a leave only when the
/// pointer exits the window, so there is no nested-child leave to filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Over,
    Leave,
    Drop(Vec<PathBuf>),
}

impl DragEvent {
    /// Maps the window's file drag events; everything else is not ours.
    pub fn from_window(event: &window::Event) -> Option<Self> {
        match event {
            window::Event::FileHovered(_) => Some(DragEvent::Over),
            window::Event::FilesHoveredLeft => Some(DragEvent::Leave),
            window::Event::FileDropped(path) => Some(DragEvent::Drop(vec![path.clone()])),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DropTarget {
    is_dragging: bool,
    last_forward: Option<Instant>,
}

impl DropTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Applies one drag event; returns the file to select, if the event
    /// completed a drop gesture.
    pub fn handle(&mut self, event: DragEvent, now: Instant) -> Option<PathBuf> {
        match event {
            DragEvent::Over => {
                self.is_dragging = true;
                self.last_forward = None;
                None
            }
            DragEvent::Leave => {
                self.is_dragging = false;
                None
            }
            DragEvent::Drop(paths) => {
                self.is_dragging = false;

                let same_gesture = self
                    .last_forward
                    .is_some_and(|at| now.saturating_duration_since(at) < GESTURE_WINDOW);
                if same_gesture {
                    tracing::debug!("Ignoring extra dropped item(s): {:?}", paths);
                    return None;
                }

                let first = paths.into_iter().next()?;
                self.last_forward = Some(now);
                Some(first)
            }
        }
    }
}
