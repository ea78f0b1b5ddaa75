use eframe::egui;

use super::theme::Theme;
use crate::backend::auth::Session;

pub enum LoginAction {
    SignIn { email: String, password: String },
    SignUp { email: String, password: String },
}

/// Combined sign-in / sign-up form. Validation failures stay local and
/// never reach the backend.
pub struct LoginPage {
    pub email: String,
    pub password: String,
    pub is_sign_up: bool,
    pub busy: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl LoginPage {
    pub fn new(remembered_email: &str) -> Self {
        Self {
            email: remembered_email.to_string(),
            password: String::new(),
            is_sign_up: false,
            busy: false,
            error: None,
            notice: None,
        }
    }

    fn validate(&self) -> Result<(), String> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("Enter a valid email address".to_string());
        }
        if self.password.len() < 6 {
            return Err("Password must be at least 6 characters".to_string());
        }
        Ok(())
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme) -> Option<LoginAction> {
        let mut action = None;

        ui.vertical_centered(|ui| {
            ui.set_max_width(360.0);

            ui.heading(theme.heading(if self.is_sign_up {
                "Create an account"
            } else {
                "Sign in"
            }));
            ui.add_space(10.0);

            if let Some(error) = &self.error {
                ui.colored_label(theme.red(), error);
                ui.add_space(6.0);
            }
            if let Some(notice) = &self.notice {
                ui.colored_label(theme.green(), notice);
                ui.add_space(6.0);
            }

            egui::Grid::new("login_form").num_columns(2).spacing([10.0, 8.0]).show(ui, |ui| {
                ui.label("Email");
                ui.add(
                    egui::TextEdit::singleline(&mut self.email)
                        .hint_text("you@example.com")
                        .desired_width(240.0),
                );
                ui.end_row();

                ui.label("Password");
                ui.add(
                    egui::TextEdit::singleline(&mut self.password)
                        .password(true)
                        .hint_text("At least 6 characters")
                        .desired_width(240.0),
                );
                ui.end_row();
            });

            ui.add_space(10.0);

            let submit_label = match (self.busy, self.is_sign_up) {
                (true, _) => "Working...",
                (false, true) => "Sign up",
                (false, false) => "Sign in",
            };

            if ui.add_enabled(!self.busy, egui::Button::new(submit_label)).clicked() {
                match self.validate() {
                    Ok(()) => {
                        self.error = None;
                        self.notice = None;
                        self.busy = true;

                        let email = self.email.trim().to_string();
                        let password = self.password.clone();
                        action = Some(if self.is_sign_up {
                            LoginAction::SignUp { email, password }
                        } else {
                            LoginAction::SignIn { email, password }
                        });
                    }
                    Err(e) => self.error = Some(e),
                }
            }

            ui.add_space(8.0);

            let toggle_label = if self.is_sign_up {
                "Already have an account? Sign in"
            } else {
                "No account yet? Sign up"
            };
            if ui.link(toggle_label).clicked() {
                self.is_sign_up = !self.is_sign_up;
                self.error = None;
                self.notice = None;
            }
        });

        action
    }

    pub fn finish_sign_in(&mut self, result: &Result<Session, String>) {
        self.busy = false;
        match result {
            Ok(_) => {
                self.password.clear();
                self.error = None;
            }
            Err(e) => self.error = Some(e.clone()),
        }
    }

    pub fn finish_sign_up(&mut self, result: &Result<String, String>) {
        self.busy = false;
        match result {
            Ok(message) => {
                self.notice = Some(message.clone());
                self.error = None;
                self.is_sign_up = false;
            }
            Err(e) => self.error = Some(e.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_email_and_short_password() {
        let mut page = LoginPage::new("");
        assert!(page.validate().is_err());

        page.email = "someone@example.com".to_string();
        page.password = "abc".to_string();
        assert!(page.validate().unwrap_err().contains("at least 6"));

        page.password = "secret123".to_string();
        assert!(page.validate().is_ok());
    }
}
