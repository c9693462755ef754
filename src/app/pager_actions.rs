//! Action handlers.
//!
//! Each resolved [`Action`] maps onto one navigator call, followed by a
//! viewport fill so rendering never has to read.

use super::Pager;
use crate::chunk_reader::ChunkReader;
use crate::keybindings::Action;

impl<R: ChunkReader> Pager<R> {
    /// Run `action`, recording any read error in the status line
    pub fn handle_action(&mut self, action: Action) {
        let step = self.scroll_step as isize;
        let result = match action {
            Action::MoveUp => self.navigator.move_by(-1),
            Action::MoveDown => self.navigator.move_by(1),
            Action::MovePageUp => self.navigator.page_by(-1),
            Action::MovePageDown => self.navigator.page_by(1),
            Action::MoveDocumentStart => self.navigator.jump_to_start(),
            Action::MoveDocumentEnd => self.navigator.jump_to_end(),
            Action::ScrollLeft => {
                self.navigator.scroll_horizontal(-step);
                Ok(())
            }
            Action::ScrollRight => {
                self.navigator.scroll_horizontal(step);
                Ok(())
            }
            Action::Quit => {
                tracing::info!("Quit requested");
                self.should_quit = true;
                return;
            }
            Action::None => return,
        };
        // Fetch whatever the new screen shows before it is drawn.
        let result = result.and_then(|()| self.navigator.fill_viewport());
        self.report(result);
    }
}
