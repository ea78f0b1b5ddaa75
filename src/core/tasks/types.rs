use std::path::PathBuf;

use crate::{
    backend::auth::Session,
    core::{
        Profile,
        VocabEntry,
    },
};

/// Which view an entry fetch belongs to. The browser and the delete page
/// keep independent request sequences, so results must be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryView {
    Browser,
    DeleteList,
}

/// Everything a background task can hand back to the update loop. Fetch
/// variants carry the sequence number of the request that started them so
/// views can drop responses that arrive after the user moved on.
#[derive(Debug, Clone)]
pub enum TaskResult {
    SignedIn(Result<Session, String>),
    SignedUp(Result<String, String>),
    SignedOut(Result<(), String>),

    Categories { seq: u64, result: Result<Vec<String>, String> },
    Entries { view: EntryView, seq: u64, result: Result<Vec<VocabEntry>, String> },

    EntryAdded(Result<VocabEntry, String>),
    EntryDeleted { id: i64, result: Result<(), String> },

    Profiles(Result<Vec<Profile>, String>),

    AudioFetched { url: String, result: Result<PathBuf, String> },

    LoadingMessage(String),
}
