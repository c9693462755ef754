//! Periodic detection of file growth and truncation
//!
//! Another process may append to (or rotate) the file at any time. Each
//! check re-stats the file and reconciles the window:
//!
//! * smaller: every offset held is stale, so the window is reset
//! * larger, viewer near the bottom: new lines are pulled in and the
//!   highlight follows the newest line
//! * larger, viewer scrolled away: only the size is recorded

use crate::chunk_reader::ChunkReader;
use crate::error::Result;
use crate::navigation::Navigator;
use std::time::{Duration, Instant};

/// Default time between two file checks
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Outcome of one monitor check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthEvent {
    /// File size is what we saw last time
    Unchanged,

    /// File shrank; window and cursor were reset
    Truncated { old_size: u64, new_size: u64 },

    /// File grew and the highlight followed the new last line
    Followed {
        old_size: u64,
        new_size: u64,
        lines_scanned: usize,
    },

    /// File grew while the viewer was elsewhere; only the size was stored
    SizeNoted { old_size: u64, new_size: u64 },
}

/// Polls the file size on a fixed interval
#[derive(Debug, Clone)]
pub struct GrowthMonitor {
    interval: Duration,
    last_check: Instant,
    follow: bool,
}

impl GrowthMonitor {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_check: Instant::now(),
            follow: true,
        }
    }

    /// Enable or disable auto-follow on growth
    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    /// Whether growth seen now would be pulled in: the window must reach
    /// the known end of the file and the highlight must be near it.
    pub fn is_following<R: ChunkReader>(&self, nav: &Navigator<R>) -> bool {
        self.follow && nav.near_bottom() && (nav.window().is_empty() || nav.window().at_end())
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_check) >= self.interval
    }

    /// How long the event loop may sleep before the next check is due
    pub fn time_until_due(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last_check))
    }

    /// Run a check if the interval has elapsed since the last one
    pub fn poll<R: ChunkReader>(
        &mut self,
        nav: &mut Navigator<R>,
        now: Instant,
    ) -> Result<Option<GrowthEvent>> {
        if !self.is_due(now) {
            return Ok(None);
        }
        self.last_check = now;
        self.check(nav).map(Some)
    }

    /// Re-stat the file and reconcile the window with its new size
    pub fn check<R: ChunkReader>(&mut self, nav: &mut Navigator<R>) -> Result<GrowthEvent> {
        let old_size = nav.window().file_size();
        let new_size = nav.window_mut().stat()?;

        if new_size == old_size {
            return Ok(GrowthEvent::Unchanged);
        }

        if new_size < old_size {
            tracing::info!("File truncated ({} -> {} bytes), resetting", old_size, new_size);
            let window = nav.window_mut();
            window.set_file_size(new_size);
            window.reset();
            return Ok(GrowthEvent::Truncated { old_size, new_size });
        }

        let following = self.is_following(nav);
        nav.window_mut().set_file_size(new_size);

        if !following {
            tracing::debug!("File grew ({} -> {} bytes), not following", old_size, new_size);
            return Ok(GrowthEvent::SizeNoted { old_size, new_size });
        }

        match Self::follow_growth(nav) {
            Ok(lines_scanned) => {
                tracing::debug!(
                    "File grew ({} -> {} bytes), followed {} lines",
                    old_size,
                    new_size,
                    lines_scanned
                );
                Ok(GrowthEvent::Followed {
                    old_size,
                    new_size,
                    lines_scanned,
                })
            }
            Err(err) => {
                // Forget the new size so the next check sees the growth again.
                nav.window_mut().set_file_size(old_size);
                tracing::warn!("Failed to follow file growth: {}", err);
                Err(err)
            }
        }
    }

    /// Pull in everything up to the new end of file one page at a time,
    /// keeping the highlight on the newest line so pruning drops old lines.
    fn follow_growth<R: ChunkReader>(nav: &mut Navigator<R>) -> Result<usize> {
        let page = nav.page_size();
        let mut lines_scanned = 0;

        loop {
            let window = nav.window_mut();
            let growth = window.follow_forward(page)?;
            lines_scanned += growth.scanned;
            if growth.scanned == 0 || window.at_end() {
                break;
            }
        }

        nav.adjust_viewport();
        Ok(lines_scanned)
    }
}

impl Default for GrowthMonitor {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}
