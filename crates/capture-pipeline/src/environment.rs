use chrono::{DateTime, Local};
use render_device::Extent;

/// What the hosting editor provides to a capture.
pub trait Environment {
    /// The name of the currently active scene.
    fn active_scene_name(&self) -> String;

    /// The pixel resolution of the main viewport, even when it is not focused or visible.
    fn viewport_resolution(&self) -> Extent;

    /// The current local time, read once per capture.
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
