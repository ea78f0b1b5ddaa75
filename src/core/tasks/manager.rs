use std::{
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use chrono::Utc;
use tokio::runtime::Runtime;

use super::{
    EntryView,
    TaskResult,
};
use crate::{
    backend::{
        auth,
        rows,
        storage,
        EntryQuery,
        SupabaseClient,
    },
    core::{
        utils,
        utils::AudioAsset,
        NewEntry,
    },
};

/// Runs every remote call off the GUI thread. Results come back through an
/// mpsc channel drained once per frame; nothing here blocks the interface.
pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
}

impl TaskManager {
    pub fn new() -> Self {
        let runtime = Arc::new(Runtime::new().expect("Failed to create TaskManager runtime"));

        let (sender, receiver) = mpsc::channel();

        Self { runtime, receiver, sender }
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>) {
        (self.sender.clone(), self.runtime.clone())
    }

    pub fn sign_in(&self, client: SupabaseClient, email: String, password: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                auth::sign_in(&client, &email, &password).await.map_err(|e| e.user_text())
            });

            let _ = sender.send(TaskResult::SignedIn(result));
        });
    }

    pub fn sign_up(&self, client: SupabaseClient, email: String, password: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                auth::sign_up(&client, &email, &password).await.map_err(|e| e.user_text())
            });

            let _ = sender.send(TaskResult::SignedUp(result));
        });
    }

    pub fn sign_out(&self, client: SupabaseClient) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(async { auth::sign_out(&client).await.map_err(|e| e.user_text()) });

            let _ = sender.send(TaskResult::SignedOut(result));
        });
    }

    pub fn fetch_categories(&self, client: SupabaseClient, seq: u64) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                rows::fetch_categories(&client).await.map_err(|e| e.user_text())
            });

            let _ = sender.send(TaskResult::Categories { seq, result });
        });
    }

    pub fn fetch_entries(
        &self,
        client: SupabaseClient,
        view: EntryView,
        query: EntryQuery,
        seq: u64,
    ) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                rows::fetch_entries(&client, &query).await.map_err(|e| e.user_text())
            });

            let _ = sender.send(TaskResult::Entries { view, seq, result });
        });
    }

    /// The two-step add: upload the asset, then insert the row pointing at
    /// its public URL. Upload failure aborts before anything is written; an
    /// insert failure can leave the uploaded asset orphaned (accepted).
    pub fn add_entry(
        &self,
        client: SupabaseClient,
        word: String,
        meaning: String,
        category: String,
        asset: AudioAsset,
    ) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let AudioAsset { file_name, mime_type, bytes } = asset;

            let result = runtime.block_on(async {
                let _ = sender.send(TaskResult::LoadingMessage("Uploading audio...".to_string()));

                let path = utils::generate_audio_path(&file_name);
                storage::upload_blob(&client, storage::AUDIO_BUCKET, &path, bytes, &mime_type)
                    .await
                    .map_err(|e| e.user_text())?;
                let audio_url = storage::public_url(&client, storage::AUDIO_BUCKET, &path);

                let _ = sender.send(TaskResult::LoadingMessage("Saving entry...".to_string()));

                let entry = NewEntry {
                    word,
                    meaning,
                    category,
                    audio_url: Some(audio_url),
                    created_at: Utc::now(),
                };
                rows::insert_entry(&client, &entry).await.map_err(|e| e.user_text())
            });

            let _ = sender.send(TaskResult::EntryAdded(result));
        });
    }

    pub fn delete_entry(&self, client: SupabaseClient, id: i64) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime
                .block_on(async { rows::delete_entry(&client, id).await.map_err(|e| e.user_text()) });

            let _ = sender.send(TaskResult::EntryDeleted { id, result });
        });
    }

    pub fn fetch_profiles(&self, client: SupabaseClient) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                rows::fetch_profiles(&client).await.map_err(|e| e.user_text())
            });

            let _ = sender.send(TaskResult::Profiles(result));
        });
    }

    /// Download an audio asset to a temp file so the playback sink can
    /// stream it from disk.
    pub fn fetch_audio(&self, url: String) {
        let (sender, runtime) = self.task_context();

        thread::spawn(move || {
            let result = runtime.block_on(async {
                let response = reqwest::get(&url)
                    .await
                    .map_err(|e| format!("Failed to fetch audio: {}", e))?;

                if !response.status().is_success() {
                    return Err(format!("HTTP {} while fetching audio", response.status()));
                }

                let bytes =
                    response.bytes().await.map_err(|e| format!("Failed to read audio: {}", e))?;

                // Strip query parameters before guessing the extension.
                let clean = url.split('?').next().unwrap_or(&url);
                let ext = clean
                    .rsplit('/')
                    .next()
                    .and_then(utils::file_extension)
                    .unwrap_or("mp3");

                let path = std::env::temp_dir()
                    .join(format!("vocadex_audio_{}.{}", uuid::Uuid::new_v4(), ext));
                std::fs::write(&path, &bytes)
                    .map_err(|e| format!("Failed to save audio: {}", e))?;

                Ok(path)
            });

            let _ = sender.send(TaskResult::AudioFetched { url, result });
        });
    }
}
