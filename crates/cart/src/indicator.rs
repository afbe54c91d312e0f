//! Cart count indicators (the badges next to cart icons).

use std::sync::{Arc, Mutex};

/// Something that displays the number of items in the cart.
pub trait CountIndicator: Send + Sync {
    /// Show `count`. `visible` is false when the cart is empty.
    fn update(&self, count: u64, visible: bool);
}

/// The last state pushed to a [`RecordingIndicator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BadgeState {
    pub count: u64,
    pub visible: bool,
}

/// Indicator that remembers what it was last told to display.
///
/// Useful for headless front ends that render the badge on demand.
#[derive(Debug, Default, Clone)]
pub struct RecordingIndicator {
    state: Arc<Mutex<Option<BadgeState>>>,
}

impl RecordingIndicator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last displayed state, or `None` if never updated.
    #[must_use]
    pub fn state(&self) -> Option<BadgeState> {
        self.state.lock().map_or(None, |state| *state)
    }
}

impl CountIndicator for RecordingIndicator {
    fn update(&self, count: u64, visible: bool) {
        if let Ok(mut state) = self.state.lock() {
            *state = Some(BadgeState { count, visible });
        }
    }
}

/// Indicator that reports the count through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogIndicator;

impl CountIndicator for LogIndicator {
    fn update(&self, count: u64, visible: bool) {
        tracing::info!(count, visible, "Cart badge updated");
    }
}
