use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive their data as props (struct fields), may borrow
/// presentation state mutably (scroll offsets), and render to a `Frame`
/// within a given `Rect`.
///
/// `render` takes `&mut self` so scroll state can be clamped and cached
/// during the render pass, in line with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}
