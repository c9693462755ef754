/// The viewport - what portion of the line window is visible
///
/// The first visible line lives in the window's [`Cursor`](crate::line_window::Cursor)
/// because pruning has to shift it together with the highlight; the viewport
/// only owns the geometry and the horizontal scroll.
#[derive(Debug, Clone)]
pub struct Viewport {
    /// Terminal dimensions available for file lines
    pub width: u16,
    pub height: u16,

    /// Number of characters hidden on the left of every line
    pub left_column: usize,
}

impl Viewport {
    /// Create a new viewport
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            left_column: 0,
        }
    }

    /// Update terminal dimensions
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Get the number of visible lines (never zero)
    pub fn visible_line_count(&self) -> usize {
        (self.height as usize).max(1)
    }

    /// Get the range of visible logical indices for a given top line
    pub fn visible_range(&self, top: usize) -> std::ops::Range<usize> {
        top..top + self.visible_line_count()
    }

    /// Check if a line is visible
    pub fn is_line_visible(&self, top: usize, line: usize) -> bool {
        self.visible_range(top).contains(&line)
    }

    /// Return the top line that keeps `highlight` on screen, moving as little
    /// as possible from `top`
    pub fn adjust_top(&self, top: usize, highlight: usize) -> usize {
        let visible_count = self.visible_line_count();

        if highlight < top {
            // Scrolled up past the top
            highlight
        } else if highlight >= top + visible_count {
            // Scrolled down past the bottom
            highlight - (visible_count - 1)
        } else {
            top
        }
    }

    /// Scroll horizontally by `delta` characters, never left of column 0
    pub fn scroll_horizontal(&mut self, delta: isize) {
        self.left_column = self.left_column.saturating_add_signed(delta);
    }

    /// Convert a logical line index to a screen row (if visible)
    pub fn line_to_screen_row(&self, top: usize, line: usize) -> Option<u16> {
        if self.is_line_visible(top, line) {
            Some((line - top) as u16)
        } else {
            None
        }
    }
}
