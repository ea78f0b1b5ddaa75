use eframe::egui;

use super::theme::Theme;
use crate::backend::auth::Session;

pub fn show(
    ui: &mut egui::Ui,
    session: Option<&Session>,
    backend_configured: bool,
    theme: &Theme,
) {
    ui.heading(theme.heading("Welcome to Vocadex"));
    ui.label("Browse vocabulary by category, listen to pronunciations, and manage entries.");
    ui.add_space(12.0);

    if !backend_configured {
        ui.colored_label(
            theme.orange(),
            "⚠ Backend not configured. Set VOCADEX_BACKEND_URL and VOCADEX_ANON_KEY (or edit settings.json) and restart.",
        );
        ui.add_space(12.0);
    }

    match session {
        Some(session) => {
            ui.group(|ui| {
                ui.label(theme.bold("You are signed in"));
                ui.label(format!("Email: {}", session.user.email));
                ui.label(theme.subtle(&format!("User id: {}", session.user.id)));
            });
        }
        None => {
            ui.group(|ui| {
                ui.label(theme.bold("Not signed in"));
                ui.label("Use \"Sign in\" in the top bar to browse and edit vocabulary.");
            });
        }
    }
}
