// Key event handling: maps key presses to actions.

use crate::action::Action;
use crate::app::App;
use crate::components::Component;
use crossterm::event::{KeyCode, KeyEvent};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<()> {
        use KeyCode::{Char, Esc};

        // Overlays consume all keys
        if self.show_help {
            self.action_tx.send(Action::HideHelp)?;
            return Ok(());
        }
        if self.add_path_modal.is_visible() {
            self.add_path_modal.handle_key_event(key)?;
            return Ok(());
        }
        if self.mode_selector.is_visible() {
            self.mode_selector.handle_key_event(key)?;
            return Ok(());
        }

        match key.code {
            Char('q') => self.action_tx.send(Action::Quit)?,
            Char('?') => self.action_tx.send(Action::ShowHelp)?,
            Char(' ') => self.action_tx.send(Action::TogglePlayPause)?,
            Char('s') => self.action_tx.send(Action::Stop)?,
            Char('n') => self.action_tx.send(Action::NextTrack)?,
            Char('p') => self.action_tx.send(Action::PrevTrack)?,
            Char(']') => self.action_tx.send(Action::VolumeUp)?,
            Char('[') => self.action_tx.send(Action::VolumeDown)?,
            Char('v') => self.action_tx.send(Action::CycleVisualizer)?,
            Char('m') => self.action_tx.send(Action::OpenModeSelector)?,
            Char('o') => self.action_tx.send(Action::OpenAddPath)?,
            Char('c') => self.action_tx.send(Action::ClearPlaylist)?,
            Char('t') => self.action_tx.send(Action::CycleTheme)?,
            Char('z') => self.action_tx.send(Action::ToggleShuffle)?,
            Char('r') => self.action_tx.send(Action::ToggleRepeat)?,
            Esc if self.error_message.is_some() => self.action_tx.send(Action::ClearError)?,
            _ => {
                self.playlist_view.handle_key_event(key)?;
            }
        }
        Ok(())
    }
}
