use eframe::egui;

use super::{
    add_vocabulary::{
        AddAction,
        AddVocabularyPage,
        MessageKind,
    },
    delete_vocabulary::{
        DeleteAction,
        DeleteVocabularyPage,
    },
    error_modal::ErrorModal,
    home_page,
    login_page::{
        LoginAction,
        LoginPage,
    },
    message_overlay::MessageOverlay,
    settings::SettingsData,
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        TopBar,
        TopBarAction,
    },
    users_page::UsersPage,
    vocabulary::{
        FetchRequest,
        VocabularyAction,
        VocabularyPage,
    },
};
use crate::{
    audio::{
        PlaybackController,
        PlaybackState,
    },
    backend::{
        auth::Session,
        BackendSettings,
        EntryQuery,
        SupabaseClient,
    },
    core::{
        add_known_category,
        tasks::{
            EntryView,
            TaskManager,
            TaskResult,
        },
        utils::{
            self,
            AudioAsset,
        },
        VocadexError,
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Users,
    Login,
    Vocabulary,
    AddVocabulary,
    DeleteVocabulary,
}

pub struct VocadexApp {
    // Configuration
    settings: SettingsData,
    backend: BackendSettings,

    // External services
    client: Option<SupabaseClient>,
    session: Option<Session>,
    task_manager: TaskManager,

    // Shared projections
    known_categories: Vec<String>,

    // UI state
    page: Page,
    login: LoginPage,
    users: UsersPage,
    vocabulary: VocabularyPage,
    add: AddVocabularyPage,
    delete: DeleteVocabularyPage,
    playback: PlaybackController,
    overlay: MessageOverlay,
    error_modal: ErrorModal,
    theme: Theme,
}

impl VocadexApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = load_json_or_default::<SettingsData>(SETTINGS_FILE);
        let backend = settings.backend.clone().resolve();

        let client = match SupabaseClient::new(&backend) {
            Ok(client) => Some(client),
            Err(e) => {
                log::warn!("Remote backend disabled: {}", e);
                None
            }
        };

        let theme = Theme::dracula();
        set_theme(&cc.egui_ctx, theme.clone());
        cc.egui_ctx.options_mut(|options| {
            options.theme_preference = if settings.dark_mode {
                egui::ThemePreference::Dark
            } else {
                egui::ThemePreference::Light
            };
        });

        Self {
            login: LoginPage::new(&settings.remembered_email),
            settings,
            backend,
            client,
            session: None,
            task_manager: TaskManager::new(),
            known_categories: Vec::new(),
            page: Page::Home,
            users: UsersPage::new(),
            vocabulary: VocabularyPage::new(),
            add: AddVocabularyPage::new(),
            delete: DeleteVocabularyPage::new(),
            playback: PlaybackController::new(),
            overlay: MessageOverlay::new(),
            error_modal: ErrorModal::new(),
            theme,
        }
    }
}

impl eframe::App for VocadexApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let task_results = self.task_manager.poll_results();
        for result in task_results {
            self.handle_task_result(result);
        }

        self.playback.update();

        let top_action = TopBar::show(
            ctx,
            self.page,
            self.session.as_ref(),
            self.backend.is_configured(),
            &self.theme,
        );
        if let Some(action) = top_action {
            match action {
                TopBarAction::Navigate(page) => self.navigate(page),
                TopBarAction::SignOut => self.sign_out(),
            }
        }

        let mut login_action = None;
        let mut vocab_action = None;
        let mut add_action = None;
        let mut delete_action = None;
        let mut goto_login = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                match self.page {
                    Page::Home => home_page::show(
                        ui,
                        self.session.as_ref(),
                        self.backend.is_configured(),
                        &self.theme,
                    ),
                    Page::Login => login_action = self.login.show(ui, &self.theme),
                    Page::Users => {
                        if self.session.is_some() {
                            self.users.show(ui, &self.theme);
                        } else {
                            goto_login = show_auth_required(ui, &self.theme);
                        }
                    }
                    Page::Vocabulary => {
                        if self.session.is_some() {
                            vocab_action = self.vocabulary.show(ui, &self.playback, &self.theme);
                        } else {
                            goto_login = show_auth_required(ui, &self.theme);
                        }
                    }
                    Page::AddVocabulary => {
                        if self.session.is_some() {
                            add_action = self.add.show(ui, &self.known_categories, &self.theme);
                        } else {
                            goto_login = show_auth_required(ui, &self.theme);
                        }
                    }
                    Page::DeleteVocabulary => {
                        if self.session.is_some() {
                            delete_action =
                                self.delete.show(ui, &self.known_categories, &self.theme);
                        } else {
                            goto_login = show_auth_required(ui, &self.theme);
                        }
                    }
                }
            });
        });

        if goto_login {
            self.navigate(Page::Login);
        }
        if let Some(action) = login_action {
            self.handle_login_action(action);
        }
        if let Some(action) = vocab_action {
            self.handle_vocabulary_action(action);
        }
        if let Some(action) = add_action {
            self.handle_add_action(action);
        }
        if let Some(action) = delete_action {
            self.handle_delete_action(action);
        }

        self.overlay.show(ctx, &self.theme);
        self.error_modal.show(ctx);

        // Keep the position readout and completion detection ticking.
        if self.playback.state() != PlaybackState::Idle {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }
    }
}

impl VocadexApp {
    fn navigate(&mut self, page: Page) {
        self.page = page;

        if self.session.is_none() {
            return;
        }

        match page {
            Page::Vocabulary => {
                if !self.vocabulary.started {
                    self.refresh_categories();
                }
            }
            Page::AddVocabulary => {
                if self.known_categories.is_empty() && !self.vocabulary.started {
                    self.refresh_categories();
                }
            }
            Page::DeleteVocabulary => {
                if self.known_categories.is_empty() && !self.vocabulary.started {
                    self.refresh_categories();
                }
                if !self.delete.started {
                    self.delete.started = true;
                    let (seq, query) = self.delete.request_refresh();
                    self.spawn_delete_fetch(seq, query);
                }
            }
            Page::Users => {
                if !self.users.loaded && !self.users.loading {
                    if let Some(client) = self.client.clone() {
                        self.users.begin_fetch();
                        self.task_manager.fetch_profiles(client);
                    }
                }
            }
            Page::Home | Page::Login => {}
        }
    }

    /// Re-derive the category list from the backend. All category fetches
    /// run through the browser's sequence counter so late responses cannot
    /// clobber a newer list.
    fn refresh_categories(&mut self) {
        let Some(client) = self.client.clone() else {
            return;
        };

        self.vocabulary.started = true;
        if let FetchRequest::Categories { seq } = self.vocabulary.state.request_categories() {
            self.task_manager.fetch_categories(client, seq);
        }
    }

    fn sign_out(&mut self) {
        if let Some(client) = self.client.clone() {
            self.overlay.set_message("Signing out...".to_string());
            self.task_manager.sign_out(client);
        }
    }

    fn handle_login_action(&mut self, action: LoginAction) {
        let Some(client) = self.client.clone() else {
            self.login.busy = false;
            self.login.error = Some(VocadexError::NotConfigured.to_string());
            return;
        };

        match action {
            LoginAction::SignIn { email, password } => {
                self.overlay.set_message("Signing in...".to_string());
                self.task_manager.sign_in(client, email, password);
            }
            LoginAction::SignUp { email, password } => {
                self.overlay.set_message("Creating account...".to_string());
                self.task_manager.sign_up(client, email, password);
            }
        }
    }

    fn handle_vocabulary_action(&mut self, action: VocabularyAction) {
        match action {
            VocabularyAction::Fetch(request) => self.spawn_browser_fetch(request),
            VocabularyAction::Play(url) => self.start_playback(url),
            VocabularyAction::Pause => {
                if let Err(e) = self.playback.pause() {
                    self.error_modal.show_error("Playback error", e, None::<String>);
                }
            }
            VocabularyAction::Resume => {
                if let Err(e) = self.playback.resume() {
                    self.error_modal.show_error("Playback error", e, None::<String>);
                }
            }
            VocabularyAction::Stop => self.playback.stop(),
        }
    }

    fn handle_add_action(&mut self, action: AddAction) {
        match action {
            AddAction::PickFile => self.pick_audio_file(),
            AddAction::AddCategory(name) => {
                // Optimistic: selectable immediately, reconciled by the
                // next category fetch.
                add_known_category(&mut self.known_categories, &name);
            }
            AddAction::Submit { word, meaning, category, asset } => {
                let Some(client) = self.client.clone() else {
                    self.add.finish(&Err(VocadexError::NotConfigured.to_string()));
                    return;
                };
                self.task_manager.add_entry(client, word, meaning, category, asset);
            }
        }
    }

    fn handle_delete_action(&mut self, action: DeleteAction) {
        match action {
            DeleteAction::Fetch { seq, query } => self.spawn_delete_fetch(seq, query),
            DeleteAction::Delete(id) => {
                let Some(client) = self.client.clone() else {
                    return;
                };
                self.task_manager.delete_entry(client, id);
            }
        }
    }

    fn spawn_browser_fetch(&mut self, request: FetchRequest) {
        let Some(client) = self.client.clone() else {
            return;
        };

        match request {
            FetchRequest::Categories { seq } => {
                self.task_manager.fetch_categories(client, seq);
            }
            FetchRequest::Entries { seq, category, keyword } => {
                let mut query = EntryQuery::for_category(&category);
                query.keyword = keyword;
                self.task_manager.fetch_entries(client, EntryView::Browser, query, seq);
            }
        }
    }

    fn spawn_delete_fetch(&mut self, seq: u64, query: EntryQuery) {
        let Some(client) = self.client.clone() else {
            return;
        };
        self.task_manager.fetch_entries(client, EntryView::DeleteList, query, seq);
    }

    fn start_playback(&mut self, url: String) {
        if url.is_empty() {
            self.error_modal.show_error(
                "Playback error",
                "No audio available for this entry",
                None::<String>,
            );
            return;
        }

        if self.playback.needs_fetch(&url) {
            self.playback.mark_pending(&url);
            self.task_manager.fetch_audio(url);
            return;
        }

        if let Err(e) = self.playback.play(&url) {
            self.error_modal.show_error("Playback error", e, None::<String>);
        }
    }

    fn pick_audio_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Audio", &["mp3", "wav", "ogg", "oga", "m4a", "aac", "flac", "opus"])
            .pick_file()
        else {
            return;
        };

        let file_name =
            path.file_name().and_then(|name| name.to_str()).unwrap_or("audio").to_string();

        match std::fs::read(&path) {
            Ok(bytes) => {
                let mime_type = utils::audio_mime_for(&file_name);
                self.add.set_asset(AudioAsset { file_name, mime_type, bytes });
            }
            Err(e) => {
                self.add.message = Some((
                    MessageKind::Error,
                    format!("Failed to read \"{}\": {}", file_name, e),
                ));
            }
        }
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::SignedIn(result) => {
                self.overlay.clear_message();
                self.login.finish_sign_in(&result);

                if let Ok(session) = result {
                    if let Some(client) = &mut self.client {
                        client.set_access_token(Some(session.access_token.clone()));
                    }
                    self.settings.remembered_email = session.user.email.clone();
                    self.save_settings();
                    self.session = Some(session);
                    self.navigate(Page::Home);
                    self.refresh_categories();
                }
            }

            TaskResult::SignedUp(result) => {
                self.overlay.clear_message();
                self.login.finish_sign_up(&result);
            }

            TaskResult::SignedOut(result) => {
                self.overlay.clear_message();
                if let Err(e) = result {
                    log::warn!("Sign-out request failed, clearing session locally: {}", e);
                }

                self.session = None;
                if let Some(client) = &mut self.client {
                    client.set_access_token(None);
                }
                self.known_categories.clear();
                self.users.reset();
                self.vocabulary.reset();
                self.add.reset();
                self.delete.reset();
                self.playback.stop();
                self.page = Page::Home;
            }

            TaskResult::Categories { seq, result } => {
                if let Ok(categories) = &result {
                    self.known_categories = categories.clone();
                }
                self.vocabulary.state.apply_categories(seq, result);
            }

            TaskResult::Entries { view, seq, result } => match view {
                EntryView::Browser => self.vocabulary.state.apply_entries(seq, result),
                EntryView::DeleteList => self.delete.apply_entries(seq, result),
            },

            TaskResult::EntryAdded(result) => {
                self.overlay.clear_message();
                self.add.finish(&result);

                if let Ok(entry) = &result {
                    if add_known_category(&mut self.known_categories, &entry.category) {
                        self.refresh_categories();
                    }
                }
            }

            TaskResult::EntryDeleted { id, result } => {
                if let Some(error) = self.delete.apply_deleted(id, &result) {
                    self.error_modal.show_error("Delete failed", error, None::<String>);
                }
            }

            TaskResult::Profiles(result) => {
                self.users.apply(result);
            }

            TaskResult::AudioFetched { url, result } => match result {
                Ok(path) => {
                    if self.playback.take_pending(&url, path) {
                        if let Err(e) = self.playback.play(&url) {
                            self.error_modal.show_error("Playback error", e, None::<String>);
                        }
                    }
                }
                Err(e) => {
                    if self.playback.pending_url() == Some(url.as_str()) {
                        self.playback.clear_pending();
                        self.error_modal.show_error("Playback error", e, None::<String>);
                    }
                }
            },

            TaskResult::LoadingMessage(message) => {
                self.overlay.set_message(message);
            }
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings, SETTINGS_FILE) {
            log::warn!("Failed to save settings: {}", e);
        }
    }
}

fn show_auth_required(ui: &mut egui::Ui, theme: &Theme) -> bool {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(theme.heading("Sign in required"));
        ui.label("Sign in first to use this page.");
        ui.add_space(8.0);
        ui.button("Go to sign in").clicked()
    })
    .inner
}
