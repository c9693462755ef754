//! Navigation over the line window
//!
//! Every movement funnels through [`LineWindow::ensure`], which is the only
//! place that fetches lines on demand. After each movement the highlight is
//! clamped to the window and the viewport is adjusted so that
//! `top <= highlight < top + height` holds whenever the window is non-empty.

use crate::chunk_reader::ChunkReader;
use crate::error::Result;
use crate::line_window::{Cursor, LineWindow};
use crate::viewport::Viewport;

/// Maps navigation intents onto window operations
pub struct Navigator<R: ChunkReader> {
    window: LineWindow<R>,
    viewport: Viewport,
}

impl<R: ChunkReader> Navigator<R> {
    /// Wrap `window` and prefetch the first page
    pub fn open(window: LineWindow<R>, viewport: Viewport) -> Result<Self> {
        let mut nav = Self { window, viewport };
        nav.window.reserve(nav.page_size());
        nav.window.grow_forward(nav.page_size())?;
        Ok(nav)
    }

    pub fn window(&self) -> &LineWindow<R> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut LineWindow<R> {
        &mut self.window
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn cursor(&self) -> Cursor {
        self.window.cursor()
    }

    /// Number of rows available for file lines
    pub fn page_size(&self) -> usize {
        self.viewport.visible_line_count()
    }

    /// Move the highlight by `delta` lines, fetching lines as needed
    pub fn move_by(&mut self, delta: isize) -> Result<()> {
        let target = self.window.cursor().highlight as isize + delta;
        let target = self.window.ensure(target)?;

        if self.window.is_empty() {
            return Ok(());
        }
        let last = (self.window.len() - 1) as isize;
        self.window.cursor_mut().highlight = target.clamp(0, last) as usize;
        self.adjust_viewport();
        Ok(())
    }

    /// Move the highlight by whole pages
    pub fn page_by(&mut self, pages: isize) -> Result<()> {
        self.move_by(pages * self.page_size() as isize)
    }

    /// Scroll so the highlighted line is on screen
    pub fn adjust_viewport(&mut self) {
        if self.window.is_empty() {
            *self.window.cursor_mut() = Cursor::default();
            return;
        }
        let cursor = self.window.cursor();
        self.window.cursor_mut().top = self.viewport.adjust_top(cursor.top, cursor.highlight);
    }

    /// Show the first page of the file with its first line highlighted
    pub fn jump_to_start(&mut self) -> Result<()> {
        self.window.reset();
        self.window.grow_forward(self.page_size())?;
        *self.window.cursor_mut() = Cursor::default();
        Ok(())
    }

    /// Show the last page of the file with its last line highlighted
    pub fn jump_to_end(&mut self) -> Result<()> {
        self.window.refresh_file_size()?;
        self.window.reset();
        self.window.grow_backward(self.page_size())?;

        if let Some(last) = self.window.len().checked_sub(1) {
            *self.window.cursor_mut() = Cursor {
                highlight: last,
                top: 0,
            };
        }
        self.adjust_viewport();
        Ok(())
    }

    /// Shift every rendered line horizontally; the window is untouched
    pub fn scroll_horizontal(&mut self, delta: isize) {
        self.viewport.scroll_horizontal(delta);
    }

    /// Apply new terminal dimensions and refill the screen
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.viewport.resize(width, height);
        self.window.reserve(self.page_size());
        self.adjust_viewport();
        self.fill_viewport()
    }

    /// Make sure every row of the viewport has a line if the file has one.
    ///
    /// The highlight does not move. An empty window (after a reset) is
    /// refetched from the start of the file.
    pub fn fill_viewport(&mut self) -> Result<()> {
        let bottom = self.window.cursor().top + self.page_size() - 1;
        self.window.ensure(bottom as isize)?;

        if let Some(last) = self.window.len().checked_sub(1) {
            let cursor = self.window.cursor_mut();
            cursor.highlight = cursor.highlight.min(last);
            cursor.top = cursor.top.min(cursor.highlight);
        }
        Ok(())
    }

    /// Whether the highlight is within one page of the window's last line
    pub fn near_bottom(&self) -> bool {
        match self.window.len().checked_sub(1) {
            Some(last) => last - self.window.cursor().highlight < self.page_size(),
            None => true,
        }
    }
}
