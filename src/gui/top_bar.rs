use eframe::egui::{
    self,
    containers,
};

use super::{
    app::Page,
    theme::Theme,
};
use crate::backend::auth::Session;

pub enum TopBarAction {
    Navigate(Page),
    SignOut,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        current_page: Page,
        session: Option<&Session>,
        backend_configured: bool,
        theme: &Theme,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.separator();
                ui.label(theme.bold("Vocadex"));
                ui.separator();

                let mut nav = |ui: &mut egui::Ui, page: Page, label: &str| {
                    if ui.selectable_label(current_page == page, label).clicked() {
                        action = Some(TopBarAction::Navigate(page));
                    }
                };

                nav(ui, Page::Home, "Home");
                nav(ui, Page::Vocabulary, "Vocabulary");
                if session.is_some() {
                    nav(ui, Page::AddVocabulary, "Add");
                    nav(ui, Page::DeleteVocabulary, "Delete");
                }
                nav(ui, Page::Users, "Users");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    match session {
                        Some(session) => {
                            if ui.button("Sign out").clicked() {
                                action = Some(TopBarAction::SignOut);
                            }
                            ui.label(
                                egui::RichText::new(&session.user.email)
                                    .color(theme.green())
                                    .small(),
                            );
                        }
                        None => {
                            if ui
                                .selectable_label(current_page == Page::Login, "Sign in")
                                .clicked()
                            {
                                action = Some(TopBarAction::Navigate(Page::Login));
                            }
                        }
                    }

                    ui.add_space(6.0);
                    Self::backend_status(ui, backend_configured, theme);
                });
            });
        });

        action
    }

    fn backend_status(ui: &mut egui::Ui, configured: bool, theme: &Theme) {
        let (color, tooltip) = if configured {
            (theme.green(), "Backend configured")
        } else {
            (theme.red(), "Backend not configured")
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("backend").on_hover_text(tooltip);
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(tooltip);
        });
    }
}
