pub mod controller;
pub mod sink;

pub use controller::{
    PlaybackController,
    PlaybackState,
};
pub use sink::{
    AudioSink,
    KiraSink,
};
