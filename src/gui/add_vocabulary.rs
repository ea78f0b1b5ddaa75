use eframe::egui;

use super::theme::Theme;
use crate::core::{
    utils::{
        validate_audio_asset,
        AudioAsset,
    },
    VocabEntry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

pub enum AddAction {
    PickFile,
    AddCategory(String),
    Submit { word: String, meaning: String, category: String, asset: AudioAsset },
}

/// Add-entry form. Validation runs locally before anything touches the
/// network; the actual upload-then-insert sequence runs as one background
/// task.
pub struct AddVocabularyPage {
    pub word: String,
    pub meaning: String,
    pub category: String,
    pub new_category_input: String,
    pub show_new_category: bool,
    pub asset: Option<AudioAsset>,
    pub submitting: bool,
    pub message: Option<(MessageKind, String)>,
    pub uploaded_url: Option<String>,
}

impl AddVocabularyPage {
    pub fn new() -> Self {
        Self {
            word: String::new(),
            meaning: String::new(),
            category: String::new(),
            new_category_input: String::new(),
            show_new_category: false,
            asset: None,
            submitting: false,
            message: None,
            uploaded_url: None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.word.trim().is_empty()
            || self.meaning.trim().is_empty()
            || self.category.trim().is_empty()
        {
            return Err("Word, meaning and category are all required".to_string());
        }

        let Some(asset) = &self.asset else {
            return Err("Pick an audio file for the pronunciation".to_string());
        };

        validate_audio_asset(asset).map_err(|e| e.to_string())
    }

    /// Store a picked file, re-running the local checks. A rejected file is
    /// not kept.
    pub fn set_asset(&mut self, asset: AudioAsset) {
        match validate_audio_asset(&asset) {
            Ok(()) => {
                self.asset = Some(asset);
                self.message = None;
            }
            Err(e) => {
                self.asset = None;
                self.message = Some((MessageKind::Error, e.to_string()));
            }
        }
    }

    pub fn finish(&mut self, result: &Result<VocabEntry, String>) {
        self.submitting = false;

        match result {
            Ok(entry) => {
                self.message = Some((
                    MessageKind::Success,
                    format!("Added \"{}\" to \"{}\".", entry.word, entry.category),
                ));
                self.uploaded_url = entry.audio_url.clone();
                self.word.clear();
                self.meaning.clear();
                self.category.clear();
                self.asset = None;
            }
            Err(e) => {
                self.message = Some((MessageKind::Error, e.clone()));
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        known_categories: &[String],
        theme: &Theme,
    ) -> Option<AddAction> {
        let mut action = None;

        ui.heading(theme.heading("Add vocabulary"));
        ui.label("Word, meaning, category and a pronunciation file are required.");
        ui.add_space(10.0);

        if let Some((kind, text)) = &self.message {
            let color = match kind {
                MessageKind::Info => theme.cyan(),
                MessageKind::Success => theme.green(),
                MessageKind::Error => theme.red(),
            };
            ui.colored_label(color, text);
            ui.add_space(6.0);
        }

        egui::Grid::new("add_vocab_form").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
            ui.label("Word");
            ui.add(
                egui::TextEdit::singleline(&mut self.word)
                    .hint_text("e.g. hola")
                    .desired_width(260.0),
            );
            ui.end_row();

            ui.label("Meaning");
            ui.add(
                egui::TextEdit::multiline(&mut self.meaning)
                    .hint_text("What the word means and how it is used")
                    .desired_rows(3)
                    .desired_width(260.0),
            );
            ui.end_row();

            ui.label("Category");
            ui.horizontal(|ui| {
                let selected = if self.category.is_empty() {
                    "Select category".to_string()
                } else {
                    self.category.clone()
                };

                egui::ComboBox::from_id_salt("add_vocab_category")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for category in known_categories {
                            ui.selectable_value(
                                &mut self.category,
                                category.clone(),
                                category,
                            );
                        }
                    });

                if ui.button("➕ New").clicked() {
                    self.show_new_category = !self.show_new_category;
                }
            });
            ui.end_row();

            if self.show_new_category {
                ui.label("");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.new_category_input)
                            .hint_text("New category name")
                            .desired_width(180.0),
                    );
                    if ui.button("Add").clicked() {
                        let name = self.new_category_input.trim().to_string();
                        if !name.is_empty() {
                            self.category = name.clone();
                            self.new_category_input.clear();
                            self.show_new_category = false;
                            action = Some(AddAction::AddCategory(name));
                        }
                    }
                });
                ui.end_row();
            }

            ui.label("Audio");
            ui.vertical(|ui| {
                if ui.button("📁 Choose audio file...").clicked() && action.is_none() {
                    action = Some(AddAction::PickFile);
                }
                ui.label(theme.subtle("MP3, WAV or OGG, at most 10 MB."));

                if let Some(asset) = &self.asset {
                    let mut clear_asset = false;
                    ui.horizontal(|ui| {
                        ui.label(format!("{} ({:.2} MB)", asset.file_name, asset.size_mb()));
                        if ui.button("✕").clicked() {
                            clear_asset = true;
                        }
                    });
                    if clear_asset {
                        self.asset = None;
                    }
                }
            });
            ui.end_row();
        });

        if let Some(url) = &self.uploaded_url {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(theme.subtle("Uploaded audio:"));
                ui.hyperlink(url);
            });
        }

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            let submit_label = if self.submitting { "Adding..." } else { "➕ Add entry" };
            if ui.add_enabled(!self.submitting, egui::Button::new(submit_label)).clicked() {
                match (self.validate(), self.asset.clone()) {
                    (Ok(()), Some(asset)) => {
                        self.submitting = true;
                        self.uploaded_url = None;
                        self.message =
                            Some((MessageKind::Info, "Uploading audio...".to_string()));
                        action = Some(AddAction::Submit {
                            word: self.word.trim().to_string(),
                            meaning: self.meaning.trim().to_string(),
                            category: self.category.trim().to_string(),
                            asset,
                        });
                    }
                    (Ok(()), None) => {
                        self.message = Some((
                            MessageKind::Error,
                            "Pick an audio file for the pronunciation".to_string(),
                        ));
                    }
                    (Err(e), _) => self.message = Some((MessageKind::Error, e)),
                }
            }

            if ui.add_enabled(!self.submitting, egui::Button::new("Reset form")).clicked() {
                self.reset();
            }
        });

        action
    }
}

impl Default for AddVocabularyPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(name: &str, mime: &str, size: usize) -> AudioAsset {
        AudioAsset {
            file_name: name.to_string(),
            mime_type: mime.to_string(),
            bytes: vec![0u8; size],
        }
    }

    fn filled_page() -> AddVocabularyPage {
        let mut page = AddVocabularyPage::new();
        page.word = "hola".to_string();
        page.meaning = "hello".to_string();
        page.category = "Greetings".to_string();
        page.asset = Some(asset("hola.mp3", "audio/mpeg", 1024));
        page
    }

    #[test]
    fn test_requires_all_text_fields() {
        let mut page = filled_page();
        page.meaning = "   ".to_string();

        let err = page.validate().unwrap_err();
        assert!(err.contains("required"));
    }

    #[test]
    fn test_file_is_mandatory() {
        let mut page = filled_page();
        page.asset = None;

        let err = page.validate().unwrap_err();
        assert!(err.contains("audio file"));
    }

    #[test]
    fn test_oversized_file_rejected_locally() {
        let mut page = filled_page();
        page.asset = Some(asset("big.mp3", "audio/mpeg", 12 * 1024 * 1024));

        let err = page.validate().unwrap_err();
        assert!(err.contains("at most 10 MB"));
    }

    #[test]
    fn test_text_file_rejected_locally() {
        let mut page = AddVocabularyPage::new();
        page.set_asset(asset("notes.txt", "text/plain", 512));

        assert!(page.asset.is_none());
        let (kind, text) = page.message.clone().unwrap();
        assert_eq!(kind, MessageKind::Error);
        assert!(text.contains("not an audio file"));
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(filled_page().validate().is_ok());
    }

    #[test]
    fn test_success_clears_form_and_keeps_url() {
        let mut page = filled_page();
        page.submitting = true;

        let entry = VocabEntry {
            id: 1,
            word: "hola".to_string(),
            meaning: "hello".to_string(),
            category: "Greetings".to_string(),
            audio_url: Some("https://cdn/audio/x.mp3".to_string()),
            created_at: chrono::Utc::now(),
        };
        page.finish(&Ok(entry));

        assert!(page.word.is_empty());
        assert!(page.asset.is_none());
        assert!(!page.submitting);
        assert_eq!(page.uploaded_url.as_deref(), Some("https://cdn/audio/x.mp3"));
        assert_eq!(page.message.as_ref().unwrap().0, MessageKind::Success);
    }
}
