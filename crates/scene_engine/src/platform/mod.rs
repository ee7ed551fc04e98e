//! Platform abstraction
//!
//! The frame loop talks to the window/input layer only through [`Platform`]:
//! begin a frame to get its delta time, drain the events it produced, end the
//! frame. Any error is fatal to the run.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::application::AppEvent;

/// Platform errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// A frame could not be started or finished
    #[error("frame {frame} failed: {reason}")]
    FrameFailed {
        /// Frame number, starting at 1
        frame: u64,
        /// What went wrong
        reason: String,
    },
}

/// Frame source for the engine loop
pub trait Platform {
    /// Start a frame and return its delta time in seconds
    fn begin_frame(&mut self) -> Result<f32, PlatformError>;

    /// Append the events produced since the previous call
    fn poll_events(&mut self, events: &mut Vec<AppEvent>);

    /// Finish the frame
    fn end_frame(&mut self) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// Windowless platform with a fixed time step
///
/// Events can be scheduled for specific frames, and a frame limit makes it
/// request a close once reached.
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    delta_time: f32,
    frame: u64,
    frame_limit: Option<u64>,
    fail_at_frame: Option<u64>,
    scheduled: BTreeMap<u64, Vec<AppEvent>>,
}

impl HeadlessPlatform {
    /// Create a platform that reports `delta_time` seconds every frame
    pub fn new(delta_time: f32) -> Self {
        Self {
            delta_time,
            frame: 0,
            frame_limit: None,
            fail_at_frame: None,
            scheduled: BTreeMap::new(),
        }
    }

    /// Request a window close during the given frame
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Fail `begin_frame` for the given frame
    pub fn fail_at_frame(mut self, frame: u64) -> Self {
        self.fail_at_frame = Some(frame);
        self
    }

    /// Deliver events during the given frame (frames count from 1)
    pub fn with_events_at(mut self, frame: u64, events: impl IntoIterator<Item = AppEvent>) -> Self {
        self.scheduled.entry(frame).or_default().extend(events);
        self
    }

    /// Frames started so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Platform for HeadlessPlatform {
    fn begin_frame(&mut self) -> Result<f32, PlatformError> {
        self.frame += 1;
        if self.fail_at_frame == Some(self.frame) {
            return Err(PlatformError::FrameFailed {
                frame: self.frame,
                reason: "scheduled failure".to_string(),
            });
        }
        Ok(self.delta_time)
    }

    fn poll_events(&mut self, events: &mut Vec<AppEvent>) {
        if let Some(scheduled) = self.scheduled.remove(&self.frame) {
            events.extend(scheduled);
        }
        if self.frame_limit.is_some_and(|limit| self.frame >= limit) {
            events.push(AppEvent::WindowCloseRequested);
        }
    }
}
