pub mod errors;
pub mod models;
pub mod tasks;
pub mod utils;

pub use errors::VocadexError;
pub use models::{
    add_known_category,
    derive_categories,
    placeholder_profiles,
    NewEntry,
    Profile,
    VocabEntry,
};
