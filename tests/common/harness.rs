// Drives a real `Pager` against an in-memory terminal

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fresh_pager::chunk_reader::FileChunkReader;
use fresh_pager::config::Config;
use fresh_pager::{Pager, PagerError};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use std::path::Path;

pub struct PagerTestHarness {
    pager: Pager<FileChunkReader>,
    terminal: Terminal<TestBackend>,
}

impl PagerTestHarness {
    /// Open `path` with the default configuration
    pub fn open(path: &Path, width: u16, height: u16) -> Result<Self, PagerError> {
        Self::with_config(path, Config::default(), width, height)
    }

    pub fn with_config(
        path: &Path,
        config: Config,
        width: u16,
        height: u16,
    ) -> Result<Self, PagerError> {
        let pager = Pager::open(path, &config, width, height)?;
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        Ok(Self { pager, terminal })
    }

    pub fn pager(&self) -> &Pager<FileChunkReader> {
        &self.pager
    }

    /// Send a key with modifiers and redraw
    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.pager.handle_key(KeyEvent::new(code, modifiers));
        self.render();
    }

    /// Send an unmodified key and redraw
    pub fn press(&mut self, code: KeyCode) {
        self.send_key(code, KeyModifiers::empty());
    }

    pub fn render(&mut self) {
        let pager = &self.pager;
        self.terminal
            .draw(|frame| pager.render(frame))
            .expect("draw to test backend");
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal.backend_mut().resize(width, height);
        self.pager.resize(width, height);
        self.render();
    }

    /// Run a growth check now and redraw
    pub fn check_file_growth(&mut self) -> bool {
        let changed = self.pager.check_file_growth();
        self.render();
        changed
    }

    /// Text of the highlighted line, if any
    pub fn highlighted_text(&self) -> Option<String> {
        let nav = self.pager.navigator();
        nav.window()
            .get(nav.cursor().highlight)
            .map(|record| record.text.clone())
    }

    pub fn resident_lines(&self) -> usize {
        self.pager.navigator().window().len()
    }

    pub fn screen_row(&self, y: u16) -> String {
        let buffer = self.terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    pub fn screen_rows(&self) -> Vec<String> {
        let height = self.terminal.backend().buffer().area.height;
        (0..height).map(|y| self.screen_row(y)).collect()
    }

    pub fn screen_to_string(&self) -> String {
        self.screen_rows().join("\n")
    }

    /// The bottom row
    pub fn status_line(&self) -> String {
        let height = self.terminal.backend().buffer().area.height;
        self.screen_row(height.saturating_sub(1))
    }

    pub fn assert_screen_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(text),
            "Expected screen to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }

    pub fn assert_screen_not_contains(&self, text: &str) {
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(text),
            "Expected screen not to contain {:?}\nScreen:\n{}",
            text,
            screen
        );
    }
}
