use std::path::Path;

use kira::{
    sound::{
        streaming::{
            StreamingSoundData,
            StreamingSoundHandle,
        },
        FromFileError,
        PlaybackState as SinkPlaybackState,
    },
    AudioManager,
    AudioManagerSettings,
    DefaultBackend,
    Tween,
};

/// Seam between the playback state machine and the audio device, so the
/// controller can be driven by a scripted sink in tests.
pub trait AudioSink {
    fn play_file(&mut self, path: &Path) -> Result<(), String>;
    fn pause(&mut self) -> Result<(), String>;
    fn resume(&mut self) -> Result<(), String>;
    fn stop(&mut self);
    /// Playback position of the current sound, in seconds.
    fn position(&self) -> f32;
    /// True once the current sound has run to its natural end.
    fn finished(&self) -> bool;
}

/// The real sink: kira streaming playback from a local file.
pub struct KiraSink {
    manager: AudioManager<DefaultBackend>,
    handle: Option<StreamingSoundHandle<FromFileError>>,
}

impl KiraSink {
    pub fn new() -> Result<Self, String> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| format!("Failed to initialize audio output: {}", e))?;

        Ok(Self { manager, handle: None })
    }
}

impl AudioSink for KiraSink {
    fn play_file(&mut self, path: &Path) -> Result<(), String> {
        if let Some(mut old) = self.handle.take() {
            old.stop(Tween::default());
        }

        let data = StreamingSoundData::from_file(path)
            .map_err(|e| format!("Failed to load audio file: {}", e))?;

        let handle = self
            .manager
            .play(data)
            .map_err(|e| format!("Failed to start playback: {}", e))?;

        self.handle = Some(handle);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), String> {
        match &mut self.handle {
            Some(handle) => {
                handle.pause(Tween::default());
                Ok(())
            }
            None => Err("No audio playing".to_string()),
        }
    }

    fn resume(&mut self) -> Result<(), String> {
        match &mut self.handle {
            Some(handle) => {
                handle.resume(Tween::default());
                Ok(())
            }
            None => Err("No audio loaded".to_string()),
        }
    }

    fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop(Tween::default());
        }
    }

    fn position(&self) -> f32 {
        self.handle.as_ref().map(|handle| handle.position() as f32).unwrap_or(0.0)
    }

    fn finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| handle.state() == SinkPlaybackState::Stopped)
            .unwrap_or(false)
    }
}
