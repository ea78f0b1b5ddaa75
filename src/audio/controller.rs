use std::{
    collections::HashMap,
    path::PathBuf,
};

use super::sink::{
    AudioSink,
    KiraSink,
};

/// Client-side state of the single audio session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

/// Owns the one active audio session. Starting a new session stops the old
/// one first, so two sounds never play at once. Remote URLs must be
/// downloaded to a local file before `play` (the fetch runs as a background
/// task; `mark_pending`/`take_pending` track which URL the user is waiting
/// on so a fetch finishing after navigation does not start playback).
pub struct PlaybackController {
    sink: Option<Box<dyn AudioSink>>,
    state: PlaybackState,
    current_url: Option<String>,
    pending_url: Option<String>,
    fetched: HashMap<String, PathBuf>,
}

impl PlaybackController {
    pub fn new() -> Self {
        let sink: Option<Box<dyn AudioSink>> = match KiraSink::new() {
            Ok(sink) => Some(Box::new(sink)),
            Err(e) => {
                log::error!("Audio output unavailable: {}", e);
                None
            }
        };

        Self::with_sink(sink)
    }

    pub fn with_sink(sink: Option<Box<dyn AudioSink>>) -> Self {
        Self {
            sink,
            state: PlaybackState::Idle,
            current_url: None,
            pending_url: None,
            fetched: HashMap::new(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn position(&self) -> f32 {
        if self.state == PlaybackState::Idle {
            return 0.0;
        }
        self.sink.as_ref().map(|sink| sink.position()).unwrap_or(0.0)
    }

    /// True when `url` still needs a download before it can be played.
    pub fn needs_fetch(&self, url: &str) -> bool {
        !self.fetched.contains_key(url)
    }

    pub fn mark_pending(&mut self, url: &str) {
        self.pending_url = Some(url.to_string());
    }

    pub fn pending_url(&self) -> Option<&str> {
        self.pending_url.as_deref()
    }

    pub fn clear_pending(&mut self) {
        self.pending_url = None;
    }

    /// Store a finished download. Returns true when it is the one the user
    /// is still waiting on; stale fetches are kept for later but must not
    /// start playback.
    pub fn take_pending(&mut self, url: &str, path: PathBuf) -> bool {
        self.fetched.insert(url.to_string(), path);

        if self.pending_url.as_deref() == Some(url) {
            self.pending_url = None;
            true
        } else {
            false
        }
    }

    /// Start playing `url` from its downloaded file. Any live session is
    /// stopped first; on failure the controller ends up idle.
    pub fn play(&mut self, url: &str) -> Result<(), String> {
        if url.is_empty() {
            return Err("No audio available for this entry".to_string());
        }

        let path = self
            .fetched
            .get(url)
            .cloned()
            .ok_or_else(|| "Audio has not been fetched yet".to_string())?;

        let Some(sink) = self.sink.as_mut() else {
            return Err("Audio output is unavailable on this system".to_string());
        };

        if self.state != PlaybackState::Idle {
            sink.stop();
            self.state = PlaybackState::Idle;
            self.current_url = None;
        }

        match sink.play_file(&path) {
            Ok(()) => {
                self.state = PlaybackState::Playing;
                self.current_url = Some(url.to_string());
                Ok(())
            }
            Err(e) => {
                self.state = PlaybackState::Idle;
                self.current_url = None;
                Err(e)
            }
        }
    }

    /// Valid only while playing; the position is retained. A no-op from any
    /// other state.
    pub fn pause(&mut self) -> Result<(), String> {
        if self.state != PlaybackState::Playing {
            return Ok(());
        }

        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };

        sink.pause()?;
        self.state = PlaybackState::Paused;
        Ok(())
    }

    /// Valid only while paused; resumes from the retained position. If the
    /// sink refuses, the session stays paused with its position intact.
    pub fn resume(&mut self) -> Result<(), String> {
        if self.state != PlaybackState::Paused {
            return Ok(());
        }

        let Some(sink) = self.sink.as_mut() else {
            return Ok(());
        };

        sink.resume()?;
        self.state = PlaybackState::Playing;
        Ok(())
    }

    /// Halt and release the session from any state.
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.stop();
        }
        self.state = PlaybackState::Idle;
        self.current_url = None;
    }

    /// Frame tick: natural completion is an implicit stop.
    pub fn update(&mut self) {
        let finished = self.sink.as_ref().map(|sink| sink.finished()).unwrap_or(false);

        if self.state == PlaybackState::Playing && finished {
            self.stop();
        }
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        path::Path,
        rc::Rc,
    };

    use super::*;

    #[derive(Default)]
    struct StubState {
        events: Vec<String>,
        position: f32,
        finished: bool,
        fail_resume: bool,
        fail_play: bool,
    }

    struct StubSink {
        state: Rc<RefCell<StubState>>,
    }

    impl AudioSink for StubSink {
        fn play_file(&mut self, path: &Path) -> Result<(), String> {
            let mut state = self.state.borrow_mut();
            if state.fail_play {
                state.events.push("play_failed".to_string());
                return Err("decode error".to_string());
            }
            state.events.push(format!("play:{}", path.display()));
            state.position = 0.0;
            Ok(())
        }

        fn pause(&mut self) -> Result<(), String> {
            self.state.borrow_mut().events.push("pause".to_string());
            Ok(())
        }

        fn resume(&mut self) -> Result<(), String> {
            let mut state = self.state.borrow_mut();
            if state.fail_resume {
                return Err("device lost".to_string());
            }
            state.events.push("resume".to_string());
            Ok(())
        }

        fn stop(&mut self) {
            let mut state = self.state.borrow_mut();
            state.events.push("stop".to_string());
            state.position = 0.0;
        }

        fn position(&self) -> f32 {
            self.state.borrow().position
        }

        fn finished(&self) -> bool {
            self.state.borrow().finished
        }
    }

    fn controller_with_stub() -> (PlaybackController, Rc<RefCell<StubState>>) {
        let state = Rc::new(RefCell::new(StubState::default()));
        let sink = StubSink { state: Rc::clone(&state) };
        let mut controller = PlaybackController::with_sink(Some(Box::new(sink)));

        controller.take_pending("https://cdn/a.mp3", PathBuf::from("/tmp/a.mp3"));
        controller.take_pending("https://cdn/b.mp3", PathBuf::from("/tmp/b.mp3"));

        (controller, state)
    }

    #[test]
    fn test_play_stops_previous_session_first() {
        let (mut controller, state) = controller_with_stub();

        controller.play("https://cdn/a.mp3").unwrap();
        controller.play("https://cdn/b.mp3").unwrap();

        let events = state.borrow().events.clone();
        assert_eq!(events, vec!["play:/tmp/a.mp3", "stop", "play:/tmp/b.mp3"]);
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(controller.current_url(), Some("https://cdn/b.mp3"));
    }

    #[test]
    fn test_empty_url_reports_no_audio() {
        let (mut controller, state) = controller_with_stub();

        let err = controller.play("").unwrap_err();
        assert!(err.contains("No audio available"));
        assert!(state.borrow().events.is_empty());
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_pause_then_resume_keeps_position() {
        let (mut controller, state) = controller_with_stub();

        controller.play("https://cdn/a.mp3").unwrap();
        state.borrow_mut().position = 3.5;

        controller.pause().unwrap();
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(controller.position(), 3.5);

        controller.resume().unwrap();
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert_eq!(controller.position(), 3.5);
    }

    #[test]
    fn test_pause_outside_playing_is_noop() {
        let (mut controller, state) = controller_with_stub();

        controller.pause().unwrap();
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(state.borrow().events.is_empty());
    }

    #[test]
    fn test_stop_resets_to_idle_with_zero_position() {
        let (mut controller, state) = controller_with_stub();

        controller.play("https://cdn/a.mp3").unwrap();
        state.borrow_mut().position = 7.0;
        controller.pause().unwrap();

        controller.stop();
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert_eq!(controller.position(), 0.0);
        assert_eq!(controller.current_url(), None);
    }

    #[test]
    fn test_natural_completion_releases_session() {
        let (mut controller, state) = controller_with_stub();

        controller.play("https://cdn/a.mp3").unwrap();
        state.borrow_mut().finished = true;

        controller.update();
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert_eq!(controller.current_url(), None);
    }

    #[test]
    fn test_failed_resume_stays_paused() {
        let (mut controller, state) = controller_with_stub();

        controller.play("https://cdn/a.mp3").unwrap();
        state.borrow_mut().position = 2.0;
        controller.pause().unwrap();
        state.borrow_mut().fail_resume = true;

        assert!(controller.resume().is_err());
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert_eq!(controller.position(), 2.0);
    }

    #[test]
    fn test_failed_play_ends_idle() {
        let (mut controller, state) = controller_with_stub();
        state.borrow_mut().fail_play = true;

        assert!(controller.play("https://cdn/a.mp3").is_err());
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert_eq!(controller.current_url(), None);
    }

    #[test]
    fn test_unfetched_url_requires_download() {
        let (mut controller, _) = controller_with_stub();

        assert!(controller.needs_fetch("https://cdn/c.mp3"));
        assert!(controller.play("https://cdn/c.mp3").is_err());
    }

    #[test]
    fn test_stale_fetch_does_not_start_playback() {
        let (mut controller, _) = controller_with_stub();

        controller.mark_pending("https://cdn/c.mp3");
        assert!(!controller.take_pending("https://cdn/d.mp3", PathBuf::from("/tmp/d.mp3")));
        assert!(controller.take_pending("https://cdn/c.mp3", PathBuf::from("/tmp/c.mp3")));
        assert_eq!(controller.pending_url(), None);
    }
}
