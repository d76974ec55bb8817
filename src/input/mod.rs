//! Input adapters for the explorer.
//!
//! [`view_state`] turns gestures (arrow keys, drags, wheel notches) into
//! whole-pixel pans and anchored zooms and is shared by every front end.

#[cfg(feature = "gui")]
pub mod gui;
pub mod view_state;
