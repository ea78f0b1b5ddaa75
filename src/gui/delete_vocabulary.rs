use eframe::egui;
use egui_extras::{
    Column,
    TableBuilder,
};

use super::theme::Theme;
use crate::{
    backend::{
        EntryOrder,
        EntryQuery,
    },
    core::VocabEntry,
};

pub enum DeleteAction {
    Fetch { seq: u64, query: EntryQuery },
    Delete(i64),
}

/// Filterable entry list with a confirm-then-delete flow. A confirmed
/// delete removes the row from the local list immediately; the list is a
/// projection reconciled by the next refresh.
pub struct DeleteVocabularyPage {
    pub entries: Vec<VocabEntry>,
    pub category_filter: Option<String>,
    pub search_keyword: String,
    pub loading: bool,
    pub started: bool,
    pub error: Option<String>,
    pub confirm: Option<VocabEntry>,
    pub deleting: bool,
    seq: u64,
}

impl DeleteVocabularyPage {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            category_filter: None,
            search_keyword: String::new(),
            loading: false,
            started: false,
            error: None,
            confirm: None,
            deleting: false,
            seq: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn request_refresh(&mut self) -> (u64, EntryQuery) {
        self.seq += 1;
        self.loading = true;
        self.error = None;

        let keyword = Some(self.search_keyword.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string);

        (
            self.seq,
            EntryQuery {
                category: self.category_filter.clone(),
                keyword,
                order: EntryOrder::NewestFirst,
            },
        )
    }

    pub fn clear_filters(&mut self) -> (u64, EntryQuery) {
        self.category_filter = None;
        self.search_keyword.clear();
        self.request_refresh()
    }

    /// Apply a finished fetch; stale responses are dropped.
    pub fn apply_entries(&mut self, seq: u64, result: Result<Vec<VocabEntry>, String>) {
        if seq != self.seq {
            return;
        }

        self.loading = false;
        match result {
            Ok(entries) => self.entries = entries,
            Err(e) => self.error = Some(e),
        }
    }

    /// Apply the outcome of a delete. Success removes exactly that id from
    /// the local list; failure leaves the list alone and hands back the
    /// error text for the caller to surface.
    pub fn apply_deleted(&mut self, id: i64, result: &Result<(), String>) -> Option<String> {
        self.deleting = false;
        self.confirm = None;

        match result {
            Ok(()) => {
                self.entries.retain(|entry| entry.id != id);
                None
            }
            Err(e) => Some(e.clone()),
        }
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        known_categories: &[String],
        theme: &Theme,
    ) -> Option<DeleteAction> {
        let mut action = None;

        ui.heading(theme.heading("Delete vocabulary"));
        ui.colored_label(theme.orange(), "⚠ Deleting an entry cannot be undone.");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            let selected = self.category_filter.clone().unwrap_or_else(|| "All categories".to_string());
            let mut changed = false;

            egui::ComboBox::from_id_salt("delete_category_filter")
                .selected_text(selected)
                .show_ui(ui, |ui| {
                    if ui.selectable_label(self.category_filter.is_none(), "All categories").clicked() {
                        self.category_filter = None;
                        changed = true;
                    }
                    for category in known_categories {
                        let is_selected = self.category_filter.as_deref() == Some(category.as_str());
                        if ui.selectable_label(is_selected, category).clicked() {
                            self.category_filter = Some(category.clone());
                            changed = true;
                        }
                    }
                });

            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_keyword)
                    .hint_text("Search word or meaning...")
                    .desired_width(200.0),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if changed || ui.button("🔍 Search").clicked() || submitted {
                let (seq, query) = self.request_refresh();
                action = Some(DeleteAction::Fetch { seq, query });
            }

            if ui.button("Clear filters").clicked() {
                let (seq, query) = self.clear_filters();
                action = Some(DeleteAction::Fetch { seq, query });
            }

            if ui.button("⟳ Refresh").clicked() {
                let (seq, query) = self.request_refresh();
                action = Some(DeleteAction::Fetch { seq, query });
            }
        });
        ui.add_space(6.0);

        if let Some(error) = &self.error {
            ui.colored_label(theme.red(), error);
            ui.add_space(4.0);
        }

        if self.loading {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading entries...");
            });
            return action;
        }

        if self.entries.is_empty() {
            ui.label(theme.subtle("No entries match the current filters."));
            return action;
        }

        ui.label(format!("{} entries", self.entries.len()));
        ui.add_space(4.0);

        let text_height = egui::TextStyle::Body
            .resolve(ui.style())
            .size
            .max(ui.spacing().interact_size.y);

        let entries = self.entries.clone();
        let mut delete_clicked: Option<VocabEntry> = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(100.0))
                .column(Column::remainder())
                .column(Column::auto().at_least(90.0))
                .column(Column::auto().at_least(60.0))
                .column(Column::auto().at_least(80.0))
                .column(Column::auto().at_least(70.0))
                .header(24.0, |mut header| {
                    header.col(|ui| {
                        ui.label(theme.heading("Word"));
                    });
                    header.col(|ui| {
                        ui.label(theme.heading("Meaning"));
                    });
                    header.col(|ui| {
                        ui.label(theme.heading("Category"));
                    });
                    header.col(|ui| {
                        ui.label(theme.heading("Audio"));
                    });
                    header.col(|ui| {
                        ui.label(theme.heading("Created"));
                    });
                    header.col(|_ui| {});
                })
                .body(|mut body| {
                    body.rows(text_height, entries.len(), |mut row| {
                        let entry = &entries[row.index()];

                        row.col(|ui| {
                            ui.strong(theme.bold(&entry.word));
                        });
                        row.col(|ui| {
                            ui.label(&entry.meaning);
                        });
                        row.col(|ui| {
                            ui.label(&entry.category);
                        });
                        row.col(|ui| {
                            ui.label(if entry.audio_url.is_some() { "🔊" } else { "—" });
                        });
                        row.col(|ui| {
                            ui.label(entry.created_at.format("%Y-%m-%d").to_string());
                        });
                        row.col(|ui| {
                            if ui.button("🗑 Delete").clicked() {
                                delete_clicked = Some(entry.clone());
                            }
                        });
                    });
                });
        });

        if let Some(entry) = delete_clicked {
            self.confirm = Some(entry);
        }

        if let Some(confirmed) = self.show_confirm_modal(ui.ctx(), theme) {
            action = Some(DeleteAction::Delete(confirmed));
        }

        action
    }

    fn show_confirm_modal(&mut self, ctx: &egui::Context, theme: &Theme) -> Option<i64> {
        let entry = self.confirm.clone()?;
        let mut confirmed = None;

        let modal = egui::Modal::new(egui::Id::new("delete_confirm_modal")).show(ctx, |ui| {
            ui.set_width(380.0);

            ui.heading(theme.heading("Confirm deletion"));
            ui.add_space(8.0);
            ui.label("This entry will be removed permanently:");
            ui.add_space(6.0);

            ui.group(|ui| {
                ui.label(theme.bold(&entry.word));
                ui.label(&entry.meaning);
                ui.label(theme.subtle(&format!("Category: {}", entry.category)));
                ui.label(theme.subtle(&format!("Id: {}", entry.id)));
            });

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let delete_label = if self.deleting { "Deleting..." } else { "🗑 Delete" };
                if ui.add_enabled(!self.deleting, egui::Button::new(delete_label)).clicked() {
                    self.deleting = true;
                    confirmed = Some(entry.id);
                }
                if ui.add_enabled(!self.deleting, egui::Button::new("Cancel")).clicked() {
                    self.confirm = None;
                    ui.close();
                }
            });
        });

        if modal.should_close() && !self.deleting {
            self.confirm = None;
        }

        confirmed
    }
}

impl Default for DeleteVocabularyPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn entry(id: i64, word: &str) -> VocabEntry {
        VocabEntry {
            id,
            word: word.to_string(),
            meaning: format!("meaning of {}", word),
            category: "Animals".to_string(),
            audio_url: None,
            created_at: Utc::now(),
        }
    }

    fn loaded_page() -> DeleteVocabularyPage {
        let mut page = DeleteVocabularyPage::new();
        let (seq, _) = page.request_refresh();
        page.apply_entries(seq, Ok(vec![entry(3, "cat"), entry(7, "dog"), entry(9, "owl")]));
        page
    }

    #[test]
    fn test_confirmed_delete_removes_exactly_that_id() {
        let mut page = loaded_page();
        page.confirm = Some(entry(7, "dog"));
        page.deleting = true;

        let error = page.apply_deleted(7, &Ok(()));
        assert!(error.is_none());
        assert_eq!(page.entries.len(), 2);
        assert!(page.entries.iter().all(|e| e.id != 7));
        assert!(page.confirm.is_none());
        assert!(!page.deleting);
    }

    #[test]
    fn test_failed_delete_keeps_entry() {
        let mut page = loaded_page();
        page.confirm = Some(entry(7, "dog"));
        page.deleting = true;

        let error = page.apply_deleted(7, &Err("row violates policy\nHint: check RLS".to_string()));
        assert!(error.unwrap().contains("Hint"));
        assert_eq!(page.entries.len(), 3);
        assert!(page.entries.iter().any(|e| e.id == 7));
    }

    #[test]
    fn test_stale_fetch_is_ignored() {
        let mut page = loaded_page();

        let (old_seq, _) = page.request_refresh();
        let (new_seq, _) = page.request_refresh();

        page.apply_entries(old_seq, Ok(vec![entry(1, "stale")]));
        assert_eq!(page.entries.len(), 3);
        assert!(page.loading);

        page.apply_entries(new_seq, Ok(vec![entry(2, "fresh")]));
        assert_eq!(page.entries.len(), 1);
        assert!(!page.loading);
    }

    #[test]
    fn test_filters_feed_the_query() {
        let mut page = DeleteVocabularyPage::new();
        page.category_filter = Some("Animals".to_string());
        page.search_keyword = " dog ".to_string();

        let (_, query) = page.request_refresh();
        assert_eq!(query.category.as_deref(), Some("Animals"));
        assert_eq!(query.keyword.as_deref(), Some("dog"));
        assert_eq!(query.order, EntryOrder::NewestFirst);

        let (_, query) = page.clear_filters();
        assert!(query.category.is_none());
        assert!(query.keyword.is_none());
    }
}
