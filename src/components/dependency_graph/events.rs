//! Viewer events and dispatch outcomes.
//!
//! Browser callbacks never mutate viewer state directly; they build a
//! [`ViewerEvent`] and hand it to `DependencyGraphState::dispatch`. Tests
//! replay scripted event sequences against the same entry point.

use super::types::EntityDetail;

/// One interaction or timer step, in canvas screen coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerEvent {
	PointerDown { x: f64, y: f64 },
	PointerMove { x: f64, y: f64 },
	PointerUp,
	PointerLeave,
	/// A completed click. Opens the detail overlay on a node, clears
	/// isolation dimming on empty canvas.
	Click { x: f64, y: f64 },
	/// Isolates the closed one-hop neighborhood of the node under the
	/// pointer, if any.
	DoubleClick { x: f64, y: f64 },
	/// Multiplicative zoom about the pointer. The resulting scale is
	/// clamped to the viewer's fixed 0.5..5 range.
	Zoom { x: f64, y: f64, factor: f64 },
	/// One animation-frame step of the layout simulation.
	Frame { dt: f32 },
	/// Periodic operational re-roll, one boolean per technology entity in
	/// catalog order. Rolled at the DOM boundary so dispatch stays
	/// deterministic.
	StatusTick { rolls: Vec<bool> },
}

/// What the DOM layer must do after dispatching an event.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum ViewerAction {
	None,
	OpenDetail(EntityDetail),
}
