use crate::IntervalWindow;

/// A lightweight, serializable snapshot of the controller's navigation state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerState {
    pub current_page: usize,
    pub loaded: IntervalWindow,
    pub content_offset: f32,
    pub scroll_percentage: f32,
}
