pub mod auth;
pub mod client;
pub mod rows;
pub mod storage;

pub use client::{
    BackendSettings,
    SupabaseClient,
};
pub use rows::{
    EntryOrder,
    EntryQuery,
};
