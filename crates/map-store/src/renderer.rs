//! Seam to the external map renderer.
//!
//! The store never creates or destroys a renderer. The composition root owns
//! it behind an `Rc` and registers a non-owning handle with
//! [`MapStore::set_map_instance`](crate::MapStore::set_map_instance) so that
//! `fly_to` can animate the camera. Move-completed notifications flow back
//! through [`MapStore::set_view_state`](crate::MapStore::set_view_state).

use std::cell::RefCell;

use map_types::CameraTransition;

/// A map renderer that can animate its camera.
pub trait MapRenderer {
    /// Starts an animated camera move. Requests cannot be withdrawn.
    fn fly_to(&self, transition: &CameraTransition);
}

/// Renderer stand-in that records every transition it is asked to play.
///
/// Used by headless runs, where there is no engine to animate.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    transitions: RefCell<Vec<CameraTransition>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all transitions received so far.
    pub fn transitions(&self) -> Vec<CameraTransition> {
        self.transitions.borrow().clone()
    }

    /// Removes and returns the transitions received so far.
    pub fn drain(&self) -> Vec<CameraTransition> {
        self.transitions.borrow_mut().drain(..).collect()
    }

    /// Discards every transition but the most recent one.
    ///
    /// A newer camera move replaces one still in flight.
    pub fn keep_latest(&self) {
        let mut transitions = self.transitions.borrow_mut();
        let len = transitions.len();
        if len > 1 {
            transitions.drain(..len - 1);
        }
    }

    /// Returns the most recent transition, if any.
    pub fn last(&self) -> Option<CameraTransition> {
        self.transitions.borrow().last().copied()
    }
}

impl MapRenderer for RecordingRenderer {
    fn fly_to(&self, transition: &CameraTransition) {
        tracing::debug!(
            "Camera transition to ({}, {}) zoom {} over {}ms",
            transition.center[0],
            transition.center[1],
            transition.zoom,
            transition.duration_ms
        );
        self.transitions.borrow_mut().push(*transition);
    }
}
