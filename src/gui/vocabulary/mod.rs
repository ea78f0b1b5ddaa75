pub mod state;

use eframe::egui;

pub use state::{
    BrowserState,
    FetchRequest,
    ViewMode,
};

use super::theme::Theme;
use crate::audio::{
    PlaybackController,
    PlaybackState,
};

pub enum VocabularyAction {
    Fetch(FetchRequest),
    Play(String),
    Pause,
    Resume,
    Stop,
}

/// The three-level browser: categories → words in a category → one entry
/// with its audio controls.
pub struct VocabularyPage {
    pub state: BrowserState,
    pub started: bool,
}

impl VocabularyPage {
    pub fn new() -> Self {
        Self { state: BrowserState::new(), started: false }
    }

    pub fn reset(&mut self) {
        self.state = BrowserState::new();
        self.started = false;
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        playback: &PlaybackController,
        theme: &Theme,
    ) -> Option<VocabularyAction> {
        match self.state.mode {
            ViewMode::Category => self.show_categories(ui, theme),
            ViewMode::Word => self.show_words(ui, theme),
            ViewMode::Detail => self.show_detail(ui, playback, theme),
        }
    }

    fn show_categories(&mut self, ui: &mut egui::Ui, theme: &Theme) -> Option<VocabularyAction> {
        let mut action = None;

        ui.heading(theme.heading("Vocabulary"));
        ui.label("Pick a category to start browsing.");
        ui.add_space(8.0);

        if let Some(error) = &self.state.error {
            ui.colored_label(theme.red(), error);
            ui.add_space(4.0);
        }

        if self.state.loading {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading categories...");
            });
            return None;
        }

        if self.state.categories.is_empty() {
            ui.label(theme.subtle("No categories yet. Add a vocabulary entry first."));
            return None;
        }

        ui.horizontal_wrapped(|ui| {
            for category in self.state.categories.clone() {
                if ui.button(&category).clicked() {
                    action = Some(VocabularyAction::Fetch(self.state.select_category(&category)));
                }
            }
        });

        action
    }

    fn show_words(&mut self, ui: &mut egui::Ui, theme: &Theme) -> Option<VocabularyAction> {
        let mut action = None;

        let category = self.state.selected_category.clone().unwrap_or_default();

        ui.horizontal(|ui| {
            if ui.button("← Categories").clicked() {
                action = Some(VocabularyAction::Fetch(self.state.back_to_categories()));
            }
            ui.heading(theme.heading(&category));
        });
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.state.search_keyword)
                    .hint_text("Search word or meaning...")
                    .desired_width(220.0),
            );

            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if (ui.button("Search").clicked() || submitted) && action.is_none() {
                if let Some(request) = self.state.submit_search() {
                    action = Some(VocabularyAction::Fetch(request));
                }
            }

            // Emptying the box restores the unfiltered list right away.
            if response.changed() && action.is_none() {
                if let Some(request) = self.state.search_cleared() {
                    action = Some(VocabularyAction::Fetch(request));
                }
            }
        });
        ui.add_space(6.0);

        if let Some(error) = &self.state.error {
            ui.colored_label(theme.red(), error);
            ui.add_space(4.0);
        }

        if self.state.loading {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading words...");
            });
            return action;
        }

        if self.state.entries.is_empty() {
            let keyword = self.state.search_keyword.trim();
            if keyword.is_empty() {
                ui.label(theme.subtle(&format!("No words in \"{}\" yet.", category)));
            } else {
                ui.label(theme.subtle(&format!(
                    "Nothing in \"{}\" matches \"{}\".",
                    category, keyword
                )));
            }
            return action;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in self.state.entries.clone() {
                let label = if entry.audio_url.is_some() {
                    format!("{}  🔊", entry.word)
                } else {
                    entry.word.clone()
                };

                if ui.selectable_label(false, label).clicked() {
                    self.state.open_entry(entry);
                }
            }
        });

        action
    }

    fn show_detail(
        &mut self,
        ui: &mut egui::Ui,
        playback: &PlaybackController,
        theme: &Theme,
    ) -> Option<VocabularyAction> {
        let mut action = None;

        let Some(entry) = self.state.selected_entry.clone() else {
            self.state.back_to_words();
            return None;
        };

        if ui.button("← Word list").clicked() {
            self.state.back_to_words();
            return None;
        }
        ui.add_space(10.0);

        ui.group(|ui| {
            ui.heading(theme.bold(&entry.word));
            ui.add_space(4.0);
            ui.label(&entry.meaning);
            ui.add_space(4.0);
            ui.label(theme.heading(&entry.category));
            ui.label(theme.subtle(&format!(
                "Created {}",
                entry.created_at.format("%Y-%m-%d")
            )));

            ui.add_space(10.0);
            match &entry.audio_url {
                Some(url) => {
                    action = Self::audio_controls(ui, playback, url, theme);
                }
                None => {
                    ui.label(theme.subtle("No audio for this entry."));
                }
            }
        });

        action
    }

    fn audio_controls(
        ui: &mut egui::Ui,
        playback: &PlaybackController,
        url: &str,
        theme: &Theme,
    ) -> Option<VocabularyAction> {
        let mut action = None;

        let is_current = playback.current_url() == Some(url);
        let fetching = playback.pending_url() == Some(url);

        ui.horizontal(|ui| {
            if fetching {
                ui.add(egui::Spinner::new());
                ui.label("Loading audio...");
                return;
            }

            match (playback.state(), is_current) {
                (PlaybackState::Playing, true) => {
                    if ui.button("⏸ Pause").clicked() {
                        action = Some(VocabularyAction::Pause);
                    }
                }
                (PlaybackState::Paused, true) => {
                    if ui.button("▶ Resume").clicked() {
                        action = Some(VocabularyAction::Resume);
                    }
                }
                _ => {
                    if ui.button("🔊 Play").clicked() {
                        action = Some(VocabularyAction::Play(url.to_string()));
                    }
                }
            }

            if is_current && playback.state() != PlaybackState::Idle {
                if ui.button("⏹ Stop").clicked() {
                    action = Some(VocabularyAction::Stop);
                }
                ui.label(theme.subtle(&format_position(playback.position())));
            }
        });

        action
    }
}

impl Default for VocabularyPage {
    fn default() -> Self {
        Self::new()
    }
}

fn format_position(seconds: f32) -> String {
    let minutes = (seconds / 60.0).floor() as u32;
    let secs = (seconds % 60.0).floor() as u32;
    format!("{}:{:02}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_position() {
        assert_eq!(format_position(0.0), "0:00");
        assert_eq!(format_position(9.6), "0:09");
        assert_eq!(format_position(75.2), "1:15");
    }
}
