use eframe::egui;

use super::theme::Theme;
use crate::core::{
    placeholder_profiles,
    Profile,
};

/// Lists the optional `profiles` table. When the table is missing the view
/// degrades to static sample rows instead of failing.
pub struct UsersPage {
    pub profiles: Vec<Profile>,
    pub loading: bool,
    pub loaded: bool,
    pub fallback: bool,
}

impl UsersPage {
    pub fn new() -> Self {
        Self { profiles: Vec::new(), loading: false, loaded: false, fallback: false }
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    pub fn apply(&mut self, result: Result<Vec<Profile>, String>) {
        self.loading = false;
        self.loaded = true;

        match result {
            Ok(profiles) => {
                self.profiles = profiles;
                self.fallback = false;
            }
            Err(e) => {
                log::warn!("profiles table unavailable, showing sample data: {}", e);
                self.profiles = placeholder_profiles();
                self.fallback = true;
            }
        }
    }

    pub fn reset(&mut self) {
        self.profiles.clear();
        self.loaded = false;
        self.fallback = false;
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) {
        ui.heading(theme.heading("Users"));

        if self.fallback {
            ui.label(theme.subtle("Profiles table unavailable; showing sample data."));
        }
        ui.add_space(8.0);

        if self.loading {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.label("Loading users...");
            });
            return;
        }

        if self.profiles.is_empty() {
            ui.label("No users found.");
            return;
        }

        for profile in &self.profiles {
            ui.group(|ui| {
                let display_name = profile.name.as_deref().unwrap_or(&profile.email);
                ui.label(theme.bold(display_name));
                ui.label(format!("Email: {}", profile.email));
                ui.label(theme.subtle(&format!("Id: {}", profile.id)));
                if let Some(created_at) = profile.created_at {
                    ui.label(theme.subtle(&format!(
                        "Joined: {}",
                        created_at.format("%Y-%m-%d")
                    )));
                }
            });
            ui.add_space(4.0);
        }
    }
}

impl Default for UsersPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_table_falls_back_to_samples() {
        let mut page = UsersPage::new();
        page.begin_fetch();
        page.apply(Err("relation \"profiles\" does not exist".to_string()));

        assert!(page.fallback);
        assert_eq!(page.profiles.len(), 3);
        assert!(!page.loading);
        assert!(page.loaded);
    }

    #[test]
    fn test_successful_fetch_replaces_samples() {
        let mut page = UsersPage::new();
        page.apply(Err("missing".to_string()));
        assert!(page.fallback);

        page.apply(Ok(Vec::new()));
        assert!(!page.fallback);
        assert!(page.profiles.is_empty());
    }
}
