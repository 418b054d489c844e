//! Platform abstraction layer
//!
//! Bridges the pure simulation to the outside world:
//! - [`Host`]: collaborator calls (voice, feedback sounds, session overlays, rendering)
//! - [`apply_events`]: routes the events a tick emitted into a host
//! - [`Game`]: frame driver turning wall-clock timestamps into ticks
//! - [`HeadlessHost`]: audio manager plus counters, for runs without a UI

use serde::Serialize;

use crate::audio::{AudioBackend, AudioManager, SoundEffect};
use crate::consts::{FRAME_MS, MAX_SUBSTEPS};
use crate::settings::GameConfig;
use crate::sim::session;
use crate::sim::{
    Direction, FeedbackKind, GameEvent, GameState, SessionEvent, Snapshot, TickInput, tick,
};

/// Longest wall-clock gap a single frame may cover (tab hidden, debugger)
const MAX_FRAME_GAP_MS: f64 = 100.0;
/// Float slack when comparing the accumulator against a frame period
const ACCUMULATOR_EPSILON: f64 = 1e-6;

/// Effect sinks the core calls into
pub trait Host {
    fn announce(&mut self, glyph: &str, phonetic: &str);
    fn cancel_announce(&mut self);
    fn feedback(&mut self, kind: FeedbackKind);
    fn drop_feedback(&mut self);
    /// Lifecycle change, with the state right after it
    fn session_event(&mut self, event: SessionEvent, snapshot: &Snapshot<'_>);
    fn render(&mut self, snapshot: &Snapshot<'_>);
}

/// Carry out emitted events in order
pub fn apply_events<H: Host>(host: &mut H, state: &GameState, events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::Announce { glyph, phonetic } => host.announce(glyph, phonetic),
            GameEvent::CancelAnnounce => host.cancel_announce(),
            GameEvent::Feedback(kind) => host.feedback(kind),
            GameEvent::DropFeedback => host.drop_feedback(),
            GameEvent::Session(event) => host.session_event(event, &state.snapshot()),
        }
    }
}

/// Game instance holding state, input and the host
pub struct Game<H: Host> {
    state: GameState,
    host: H,
    input: TickInput,
    accumulator: f64,
    last_time: Option<f64>,
}

impl<H: Host> Game<H> {
    pub fn new(config: GameConfig, seed: u64, host: H) -> Self {
        Self {
            state: GameState::new(config, seed),
            host,
            input: TickInput::default(),
            accumulator: 0.0,
            last_time: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Begin a session (no-op unless idle)
    pub fn start(&mut self) -> bool {
        let started = session::start(&mut self.state);
        self.flush();
        started
    }

    /// Reset to idle; call [`Game::start`] to play again
    pub fn restart(&mut self) {
        session::restart(&mut self.state);
        self.accumulator = 0.0;
        self.input = TickInput::default();
        self.flush();
    }

    /// Key or touch press/release
    pub fn on_input(&mut self, direction: Direction, pressed: bool) {
        self.input.set(direction, pressed);
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Run the ticks owed since the previous frame, then render. Returns the
    /// number of ticks run.
    pub fn frame(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => (now_ms - last).clamp(0.0, MAX_FRAME_GAP_MS),
            None => FRAME_MS,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator + ACCUMULATOR_EPSILON >= FRAME_MS && substeps < MAX_SUBSTEPS {
            let events = tick(&mut self.state, &self.input, now_ms);
            apply_events(&mut self.host, &self.state, events);
            self.accumulator -= FRAME_MS;
            substeps += 1;
        }
        self.accumulator = self.accumulator.max(0.0);

        self.host.render(&self.state.snapshot());
        substeps
    }

    fn flush(&mut self) {
        let events = self.state.take_events();
        apply_events(&mut self.host, &self.state, events);
    }
}

/// Counters a headless host keeps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostStats {
    pub announcements: u32,
    pub silent_announcements: u32,
    pub positive_feedback: u32,
    pub negative_feedback: u32,
    pub drops: u32,
    pub frames_rendered: u64,
}

/// Routes voice and sounds to an [`AudioManager`], logs session changes
pub struct HeadlessHost<B: AudioBackend> {
    pub audio: AudioManager<B>,
    pub stats: HostStats,
}

impl<B: AudioBackend> HeadlessHost<B> {
    pub fn new(audio: AudioManager<B>) -> Self {
        Self {
            audio,
            stats: HostStats::default(),
        }
    }
}

impl<B: AudioBackend> Host for HeadlessHost<B> {
    fn announce(&mut self, glyph: &str, phonetic: &str) {
        self.stats.announcements += 1;
        if self.audio.announce(glyph, phonetic).is_none() {
            self.stats.silent_announcements += 1;
        }
    }

    fn cancel_announce(&mut self) {
        self.audio.cancel_announce();
    }

    fn feedback(&mut self, kind: FeedbackKind) {
        match kind {
            FeedbackKind::Positive => self.stats.positive_feedback += 1,
            FeedbackKind::Negative => self.stats.negative_feedback += 1,
        }
        self.audio.play(SoundEffect::from(kind));
    }

    fn drop_feedback(&mut self) {
        self.stats.drops += 1;
        self.audio.play(SoundEffect::WaterDrop);
    }

    fn session_event(&mut self, event: SessionEvent, snapshot: &Snapshot<'_>) {
        log::info!(
            "Session {event:?}: score {}, chances used {}/{}",
            snapshot.score,
            snapshot.misses,
            snapshot.max_misses
        );
    }

    fn render(&mut self, _snapshot: &Snapshot<'_>) {
        self.stats.frames_rendered += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentBackend;
    use crate::settings::AudioSettings;
    use crate::sim::GamePhase;

    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<String>,
        renders: u32,
    }

    impl Host for RecordingHost {
        fn announce(&mut self, _glyph: &str, phonetic: &str) {
            self.calls.push(format!("announce {phonetic}"));
        }

        fn cancel_announce(&mut self) {
            self.calls.push("cancel".to_string());
        }

        fn feedback(&mut self, kind: FeedbackKind) {
            self.calls.push(format!("feedback {kind:?}"));
        }

        fn drop_feedback(&mut self) {
            self.calls.push("drop".to_string());
        }

        fn session_event(&mut self, event: SessionEvent, snapshot: &Snapshot<'_>) {
            self.calls.push(format!("session {event:?} {:?}", snapshot.phase));
        }

        fn render(&mut self, _snapshot: &Snapshot<'_>) {
            self.renders += 1;
        }
    }

    fn game() -> Game<RecordingHost> {
        Game::new(GameConfig::default(), 11, RecordingHost::default())
    }

    #[test]
    fn test_start_and_restart_reach_host() {
        let mut g = game();
        assert!(g.start());
        assert!(!g.start());
        g.restart();
        assert_eq!(
            g.host().calls,
            vec!["session Started Listening", "cancel", "session Restarted Idle"]
        );
    }

    #[test]
    fn test_frame_runs_one_tick_per_period() {
        let mut g = game();
        g.start();
        assert_eq!(g.frame(1000.0), 1);
        assert_eq!(g.state().letters.len(), 1);
        assert_eq!(g.frame(1000.0 + FRAME_MS), 1);
        assert_eq!(g.state().letters.len(), 2);
        // Faster than the frame period: render only
        assert_eq!(g.frame(1000.0 + FRAME_MS * 1.5), 0);
        assert_eq!(g.host().renders, 3);
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut g = game();
        g.start();
        g.frame(0.0);
        assert_eq!(g.frame(5000.0), MAX_SUBSTEPS);
        assert_eq!(g.state().time_ticks, 1 + MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_announce_routed_after_target_spawns() {
        let mut g = game();
        g.start();
        for i in 0..3 {
            g.frame(i as f64 * FRAME_MS);
        }
        let announces = g
            .host()
            .calls
            .iter()
            .filter(|c| c.starts_with("announce "))
            .count();
        assert_eq!(announces, 1);
        assert_eq!(g.state().phase, GamePhase::BatchExhausted);
    }

    #[test]
    fn test_headless_host_counts() {
        let audio = AudioManager::new(SilentBackend, AudioSettings::default());
        let mut g = Game::new(GameConfig::default(), 99, HeadlessHost::new(audio));
        g.set_autopilot(true);
        g.start();
        let mut frame = 0u64;
        while g.state().phase != GamePhase::GameOver && frame < 30_000 {
            g.frame(frame as f64 * FRAME_MS);
            frame += 1;
        }
        let stats = &g.host().stats;
        assert_eq!(stats.positive_feedback, 16);
        assert_eq!(stats.negative_feedback, 0);
        assert!(stats.announcements >= 16);
        assert_eq!(stats.silent_announcements, 0);
        assert_eq!(stats.frames_rendered, frame);
    }
}
