use crate::V2;

/// User actions understood by the editor. Positions are in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControllerMessage {
	TogglePause,
	FrameForward,
	Clear,
	AddPoint(V2),
	RemovePoint(V2),
	// first click picks the start, second click the end
	LinkFrom(V2),
	ToggleLock(V2),
	QuickAdd(V2),
	QuickRemove(V2),
	EndQuickAdd,
	Pan(V2),
}
