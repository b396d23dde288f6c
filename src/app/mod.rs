//! Keypad application state.
//!
//! [`App`] is what the UI draws: the typed text, the keypad layout for the
//! current terminal size, and the latest engine snapshot. The engine runs in
//! its own task; activations arrive here through a channel and are applied
//! to the local [`TextBuffer`].

mod events;

pub use events::{map_event, AppAction};

use crate::config::DwellConfig;
use crate::dwell::{ActivationEvent, EngineSnapshot};
use crate::keypad::{compute_layout, hit_test, Key, Layout, LayoutMetrics, Point, Viewport};
use crate::text_buffer::TextBuffer;
use crate::traits::SourceState;

/// State shared between the event loop and the renderer.
pub struct App {
    buffer: TextBuffer,
    keys: Vec<Key>,
    metrics: LayoutMetrics,
    layout: Layout,
    snapshot: EngineSnapshot,
    source_name: String,
    source_state: SourceState,
    last_activation: Option<ActivationEvent>,
    /// Set when the user asked to quit
    pub should_quit: bool,
    /// Set when something visible changed since the last draw
    pub needs_redraw: bool,
}

impl App {
    pub fn new(config: &DwellConfig, viewport: Viewport, source_name: impl Into<String>) -> Self {
        Self {
            buffer: TextBuffer::new(),
            keys: config.keys.clone(),
            metrics: config.metrics,
            layout: compute_layout(viewport, &config.keys, &config.metrics),
            snapshot: EngineSnapshot::idle(config.dwell_threshold, viewport),
            source_name: source_name.into(),
            source_state: SourceState::Connected,
            last_activation: None,
            should_quit: false,
            needs_redraw: true,
        }
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn snapshot(&self) -> &EngineSnapshot {
        &self.snapshot
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn source_state(&self) -> SourceState {
        self.source_state
    }

    pub fn last_activation(&self) -> Option<&ActivationEvent> {
        self.last_activation.as_ref()
    }

    /// Recompute the layout for a new terminal size.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.layout.viewport() {
            self.layout = compute_layout(viewport, &self.keys, &self.metrics);
            self.mark_dirty();
        }
    }

    /// Apply an activation delivered by the engine.
    pub fn apply_activation(&mut self, event: &ActivationEvent) {
        self.buffer.apply(event.key);
        self.last_activation = Some(*event);
        self.mark_dirty();
    }

    pub fn update_snapshot(&mut self, snapshot: EngineSnapshot) {
        if snapshot != self.snapshot {
            self.snapshot = snapshot;
            self.mark_dirty();
        }
    }

    pub fn set_source_state(&mut self, state: SourceState) {
        if state != self.source_state {
            self.source_state = state;
            self.mark_dirty();
        }
    }

    /// Key drawn at terminal cell (`column`, `row`), if any.
    pub fn key_at_cell(&self, column: u16, row: u16) -> Option<Key> {
        let center = Point::new(f64::from(column) + 0.5, f64::from(row) + 0.5);
        hit_test(center, &self.layout)
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }
}
