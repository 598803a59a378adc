use crate::Frame;

/// Something that can render a view of a scene.
pub trait Camera {
    /// The camera's name, used in file names and to track bindings.
    fn name(&self) -> &str;

    /// If the camera is active in its owning hierarchy. Inactive cameras cannot be captured.
    fn is_active(&self) -> bool {
        true
    }

    /// Render the camera's view into a frame.
    fn render(&self, frame: &mut Frame<'_, '_>);
}
