//! The pager application: one open file, its navigator and growth monitor,
//! the key bindings and what the status line currently says.
//!
//! All window mutation happens on the thread that owns the `Pager`. Key
//! handling, growth checks and rendering are called in turn from the event
//! loop, so no two of them ever touch the window at once.

mod pager_actions;

use crate::chunk_reader::{ChunkReader, FileChunkReader};
use crate::config::Config;
use crate::error::{PagerError, Result};
use crate::growth_monitor::{GrowthEvent, GrowthMonitor};
use crate::keybindings::KeybindingResolver;
use crate::line_window::LineWindow;
use crate::navigation::Navigator;
use crate::theme::Theme;
use crate::view::pager_view::{self, StatusMessage, ViewSnapshot};
use crate::viewport::Viewport;
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::Frame;
use std::path::Path;
use std::time::{Duration, Instant};

/// Rows reserved below the file lines
const STATUS_ROWS: u16 = 1;

pub struct Pager<R: ChunkReader> {
    navigator: Navigator<R>,
    monitor: GrowthMonitor,
    keybindings: KeybindingResolver,
    theme: Theme,
    file_name: String,
    tab_width: usize,
    scroll_step: usize,
    status_message: Option<StatusMessage>,
    should_quit: bool,
}

impl Pager<FileChunkReader> {
    /// Open `path` for paging in a terminal of `width` x `height` cells
    pub fn open(path: &Path, config: &Config, width: u16, height: u16) -> Result<Self> {
        let reader = FileChunkReader::open(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::new(reader, file_name, config, width, height)
    }
}

impl<R: ChunkReader> Pager<R> {
    pub fn new(
        reader: R,
        file_name: impl Into<String>,
        config: &Config,
        width: u16,
        height: u16,
    ) -> Result<Self> {
        let window = LineWindow::new(
            reader,
            config.pager.max_line_buffer,
            config.pager.chunk_size,
        )?;
        let viewport = Viewport::new(width, height.saturating_sub(STATUS_ROWS));
        let navigator = Navigator::open(window, viewport)?;
        let file_name = file_name.into();

        tracing::info!(
            "Paging {} ({} bytes, {} lines prefetched)",
            file_name,
            navigator.window().file_size(),
            navigator.window().len()
        );

        Ok(Self {
            navigator,
            monitor: GrowthMonitor::new(config.pager.poll_interval())
                .with_follow(config.pager.follow),
            keybindings: KeybindingResolver::new(config),
            theme: Theme::from_name(&config.theme),
            file_name,
            tab_width: config.pager.tab_width,
            scroll_step: config.pager.horizontal_scroll_step,
            status_message: None,
            should_quit: false,
        })
    }

    pub fn navigator(&self) -> &Navigator<R> {
        &self.navigator
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn status_message(&self) -> Option<&StatusMessage> {
        self.status_message.as_ref()
    }

    /// Whether file growth would currently move the highlight
    pub fn is_following(&self) -> bool {
        self.monitor.is_following(&self.navigator)
    }

    /// Resolve a key press and run its action
    pub fn handle_key(&mut self, event: KeyEvent) {
        if event.kind != KeyEventKind::Press {
            return;
        }
        let action = self.keybindings.resolve(&event);
        tracing::debug!("Key {:?} -> {:?}", event.code, action);
        self.handle_action(action);
    }

    /// Apply new terminal dimensions
    pub fn resize(&mut self, width: u16, height: u16) {
        let result = self
            .navigator
            .resize(width, height.saturating_sub(STATUS_ROWS));
        self.report(result);
    }

    /// Time the event loop may block before [`tick`](Self::tick) has work
    pub fn time_until_next_check(&self, now: Instant) -> Duration {
        self.monitor.time_until_due(now)
    }

    /// Run the growth monitor if its interval has elapsed. Returns true if
    /// anything on screen may have changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.monitor.poll(&mut self.navigator, now) {
            Ok(Some(event)) => self.on_growth_event(event),
            Ok(None) => false,
            Err(e) => {
                self.set_error(&e);
                true
            }
        }
    }

    /// Check the file right away, ignoring the poll interval
    pub fn check_file_growth(&mut self) -> bool {
        match self.monitor.check(&mut self.navigator) {
            Ok(event) => self.on_growth_event(event),
            Err(e) => {
                self.set_error(&e);
                true
            }
        }
    }

    fn on_growth_event(&mut self, event: GrowthEvent) -> bool {
        match event {
            GrowthEvent::Unchanged => false,
            GrowthEvent::Truncated { .. } => {
                self.status_message = Some(StatusMessage::Info(
                    "file truncated, reloaded from start".to_string(),
                ));
                // The reset window is refetched from offset 0.
                if let Err(e) = self.navigator.fill_viewport() {
                    self.set_error(&e);
                }
                true
            }
            GrowthEvent::Followed { .. } | GrowthEvent::SizeNoted { .. } => true,
        }
    }

    /// Draw the current state. Reads nothing from the file; every path
    /// that changes the window fills the viewport beforehand.
    pub fn render(&self, frame: &mut Frame) {
        let snapshot = ViewSnapshot::capture(
            &self.navigator,
            &self.file_name,
            self.tab_width,
            self.is_following(),
            self.status_message.as_ref(),
        );
        let area = frame.area();
        pager_view::render(frame, area, &snapshot, &self.theme);
    }

    /// Record the outcome of a user action: an error is shown until the
    /// next action succeeds.
    fn report(&mut self, result: Result<()>) {
        match result {
            Ok(()) => self.status_message = None,
            Err(e) => self.set_error(&e),
        }
    }

    fn set_error(&mut self, err: &PagerError) {
        tracing::warn!("{}", err);
        self.status_message = Some(StatusMessage::Error(err.to_string()));
    }
}
