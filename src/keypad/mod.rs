//! The keypad: keys, their on-screen rectangles, and hit-testing.
//!
//! This is the spatial half of dwell selection. [`compute_layout`] turns a
//! viewport size and an ordered key set into a [`Layout`] of rectangles, and
//! [`hit_test`] answers which key (if any) contains a point. Both are pure;
//! the dwell engine caches one `Layout` per viewport size and calls
//! `hit_test` once per position sample.
//!
//! ```text
//!  ┌──────────────────────────────┐
//!  │                              │
//!  │   [ 1 ]   [ 2 ]   [ 3 ]      │
//!  │   [ 4 ]   [ 5 ]   [ 6 ]      │
//!  │   [ 7 ]   [ 8 ]   [ 9 ]      │
//!  │  [CLEAR]  [ 0 ]  [SPACE]     │
//!  │          bottom offset       │
//!  └──────────────────────────────┘
//! ```

mod geometry;
mod key;
mod layout;

pub use geometry::{Point, Rect, Viewport};
pub use hit_test::hit_test;
pub use key::{Key, KEYPAD_ORDER};
pub use layout::{compute_layout, KeyRect, Layout, LayoutMetrics, COLUMNS};
