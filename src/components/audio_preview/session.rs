//! Playback session for the audio library: at most one item is audible
//! at any time, and at most one progress poll loop is alive, enforced by
//! an epoch that every transition into or out of playback invalidates.

use std::collections::HashMap;

/// Milliseconds between progress samples while an item is playing.
pub const POLL_INTERVAL_MS: u32 = 100;

/// Handles kept alive at once. Handles are created lazily on first play
/// and reused on replay; past this cap the least recently played
/// inactive handle is paused and dropped.
const MAX_CACHED_HANDLES: usize = 16;

/// The native playback resource bound to one media item.
pub trait MediaHandle {
    fn play(&self);
    fn pause(&self);
    fn set_volume(&self, volume: f64);
    fn set_playback_rate(&self, rate: f64);
    fn set_position(&self, seconds: f64);
    fn position(&self) -> f64;
    /// NaN until the underlying engine has loaded metadata.
    fn duration(&self) -> f64;
    fn has_ended(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Playing { item_id: u64 },
}

/// What `request_play` decided, and what the caller owes the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayRequest {
    /// A new item started; spawn a poll loop bound to this epoch.
    Started { poll_epoch: u64 },
    /// The active item was toggled off; its poll loop is already stale.
    Stopped,
    /// No handle could be opened for the item.
    Unavailable,
}

/// Outcome of one poll sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// The sampling loop no longer owns the session; it must exit.
    Stale,
    /// Playback finished naturally; the session is idle again.
    Finished,
    Progress { current_time: f64, duration: f64 },
}

pub struct AudioSession<H> {
    handles: HashMap<u64, H>,
    /// Item ids in play order, most recent last. Drives handle eviction.
    recent: Vec<u64>,
    phase: PlaybackPhase,
    poll_epoch: u64,
    current_time: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    playback_rate: f64,
}

impl<H: MediaHandle> Default for AudioSession<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: MediaHandle> AudioSession<H> {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
            recent: Vec::new(),
            phase: PlaybackPhase::Idle,
            poll_epoch: 0,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            muted: false,
            playback_rate: 1.0,
        }
    }

    pub fn active_item_id(&self) -> Option<u64> {
        match self.phase {
            PlaybackPhase::Playing { item_id } => Some(item_id),
            PlaybackPhase::Idle => None,
        }
    }

    pub fn is_playing(&self, item_id: u64) -> bool {
        self.active_item_id() == Some(item_id)
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    pub fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    /// Play `item_id`, or toggle it off if it is already the active item.
    ///
    /// Whatever was audible before is paused first and its poll loop is
    /// invalidated, so two items can never sound at once. The item's
    /// handle is opened lazily on first play and reused afterwards;
    /// session-wide volume/mute/rate settings are pushed onto it before
    /// playback starts.
    pub fn request_play(
        &mut self,
        item_id: u64,
        file_url: &str,
        open: impl FnOnce(&str) -> Option<H>,
    ) -> PlayRequest {
        if self.is_playing(item_id) {
            if let Some(handle) = self.handles.get(&item_id) {
                handle.pause();
            }
            self.stop();
            return PlayRequest::Stopped;
        }

        if let Some(previous) = self.active_item_id() {
            if let Some(handle) = self.handles.get(&previous) {
                handle.pause();
            }
        }

        if !self.handles.contains_key(&item_id) {
            let Some(handle) = open(file_url) else {
                self.stop();
                return PlayRequest::Unavailable;
            };
            self.handles.insert(item_id, handle);
        }
        self.touch(item_id);
        self.evict_excess_handles(item_id);

        let handle = &self.handles[&item_id];
        handle.set_volume(if self.muted { 0.0 } else { self.volume });
        handle.set_playback_rate(self.playback_rate);
        handle.play();

        self.current_time = 0.0;
        let known = handle.duration();
        self.duration = if known.is_finite() && known > 0.0 {
            known
        } else {
            0.0
        };
        self.phase = PlaybackPhase::Playing { item_id };
        self.poll_epoch += 1;
        PlayRequest::Started {
            poll_epoch: self.poll_epoch,
        }
    }

    /// One progress sample, driven every `POLL_INTERVAL_MS` by the loop
    /// that owns `poll_epoch`. A loop holding a stale epoch learns so
    /// here and exits without touching anything.
    pub fn tick(&mut self, poll_epoch: u64) -> Tick {
        if poll_epoch != self.poll_epoch {
            return Tick::Stale;
        }
        let Some(item_id) = self.active_item_id() else {
            return Tick::Stale;
        };
        let Some(handle) = self.handles.get(&item_id) else {
            self.stop();
            return Tick::Stale;
        };

        if handle.has_ended() {
            self.stop();
            return Tick::Finished;
        }

        self.current_time = handle.position();
        let duration = handle.duration();
        if duration.is_finite() && duration > 0.0 {
            self.duration = duration;
        }
        Tick::Progress {
            current_time: self.current_time,
            duration: self.duration,
        }
    }

    /// Seek the active item. Meaningless while idle.
    pub fn seek(&mut self, seconds: f64) {
        let Some(item_id) = self.active_item_id() else {
            return;
        };
        if let Some(handle) = self.handles.get(&item_id) {
            handle.set_position(seconds);
            self.current_time = seconds;
        }
    }

    pub fn set_volume(&mut self, volume: f64) {
        if !volume.is_finite() {
            return;
        }
        self.volume = volume.clamp(0.0, 1.0);
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.apply_volume();
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        if !rate.is_finite() || rate <= 0.0 {
            return;
        }
        self.playback_rate = rate;
        if let Some(handle) = self.active_handle() {
            handle.set_playback_rate(rate);
        }
    }

    fn apply_volume(&mut self) {
        let effective = if self.muted { 0.0 } else { self.volume };
        if let Some(handle) = self.active_handle() {
            handle.set_volume(effective);
        }
    }

    fn active_handle(&self) -> Option<&H> {
        self.active_item_id().and_then(|id| self.handles.get(&id))
    }

    fn stop(&mut self) {
        self.phase = PlaybackPhase::Idle;
        // Invalidates whatever poll loop is currently alive.
        self.poll_epoch += 1;
    }

    fn touch(&mut self, item_id: u64) {
        self.recent.retain(|id| *id != item_id);
        self.recent.push(item_id);
    }

    fn evict_excess_handles(&mut self, keep: u64) {
        while self.handles.len() > MAX_CACHED_HANDLES {
            let Some(pos) = self.recent.iter().position(|id| *id != keep) else {
                break;
            };
            let evicted = self.recent.remove(pos);
            if let Some(handle) = self.handles.remove(&evicted) {
                handle.pause();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug)]
    struct FakeState {
        playing: bool,
        volume: f64,
        rate: f64,
        position: f64,
        duration: f64,
        ended: bool,
        play_calls: u32,
        pause_calls: u32,
    }

    impl Default for FakeState {
        fn default() -> Self {
            Self {
                playing: false,
                volume: 1.0,
                rate: 1.0,
                position: 0.0,
                duration: f64::NAN,
                ended: false,
                play_calls: 0,
                pause_calls: 0,
            }
        }
    }

    #[derive(Clone, Default)]
    struct FakeHandle(Rc<RefCell<FakeState>>);

    impl FakeHandle {
        fn state(&self) -> std::cell::Ref<'_, FakeState> {
            self.0.borrow()
        }

        fn set(&self, f: impl FnOnce(&mut FakeState)) {
            f(&mut self.0.borrow_mut());
        }
    }

    impl MediaHandle for FakeHandle {
        fn play(&self) {
            let mut s = self.0.borrow_mut();
            s.playing = true;
            s.play_calls += 1;
        }
        fn pause(&self) {
            let mut s = self.0.borrow_mut();
            s.playing = false;
            s.pause_calls += 1;
        }
        fn set_volume(&self, volume: f64) {
            self.0.borrow_mut().volume = volume;
        }
        fn set_playback_rate(&self, rate: f64) {
            self.0.borrow_mut().rate = rate;
        }
        fn set_position(&self, seconds: f64) {
            self.0.borrow_mut().position = seconds;
        }
        fn position(&self) -> f64 {
            self.0.borrow().position
        }
        fn duration(&self) -> f64 {
            self.0.borrow().duration
        }
        fn has_ended(&self) -> bool {
            self.0.borrow().ended
        }
    }

    /// Session plus the handles it opened, for poking at fake state.
    struct Rig {
        session: AudioSession<FakeHandle>,
        opened: Rc<RefCell<Vec<(u64, FakeHandle)>>>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                session: AudioSession::new(),
                opened: Rc::new(RefCell::new(Vec::new())),
            }
        }

        fn play(&mut self, item_id: u64) -> PlayRequest {
            let opened = self.opened.clone();
            self.session
                .request_play(item_id, "https://cdn.example.com/a.mp3", move |_| {
                    let handle = FakeHandle::default();
                    opened.borrow_mut().push((item_id, handle.clone()));
                    Some(handle)
                })
        }

        fn handle(&self, item_id: u64) -> FakeHandle {
            self.opened
                .borrow()
                .iter()
                .rev()
                .find(|(id, _)| *id == item_id)
                .map(|(_, h)| h.clone())
                .expect("handle was never opened")
        }

        fn open_count(&self, item_id: u64) -> usize {
            self.opened
                .borrow()
                .iter()
                .filter(|(id, _)| *id == item_id)
                .count()
        }
    }

    #[test]
    fn at_most_one_item_plays() {
        let mut rig = Rig::new();
        rig.play(1);
        assert!(rig.session.is_playing(1));

        rig.play(2);

        assert!(rig.session.is_playing(2));
        assert!(!rig.handle(1).state().playing);
        assert_eq!(rig.handle(1).state().pause_calls, 1);
        assert!(rig.handle(2).state().playing);
    }

    #[test]
    fn switching_items_invalidates_the_old_poll_loop() {
        let mut rig = Rig::new();
        let PlayRequest::Started { poll_epoch: first } = rig.play(1) else {
            panic!("expected playback to start");
        };
        let PlayRequest::Started { poll_epoch: second } = rig.play(2) else {
            panic!("expected playback to start");
        };

        assert_ne!(first, second);
        assert_eq!(rig.session.tick(first), Tick::Stale);
        assert!(matches!(rig.session.tick(second), Tick::Progress { .. }));
    }

    #[test]
    fn replaying_the_active_item_toggles_it_off() {
        let mut rig = Rig::new();
        let PlayRequest::Started { poll_epoch } = rig.play(1) else {
            panic!("expected playback to start");
        };

        assert_eq!(rig.play(1), PlayRequest::Stopped);
        assert_eq!(rig.session.active_item_id(), None);
        assert!(!rig.handle(1).state().playing);
        // The toggle-off also cancels the progress loop.
        assert_eq!(rig.session.tick(poll_epoch), Tick::Stale);
    }

    #[test]
    fn handles_are_opened_once_and_reused() {
        let mut rig = Rig::new();
        rig.play(1);
        rig.play(1); // toggle off
        rig.play(1); // play again

        assert_eq!(rig.open_count(1), 1);
        assert_eq!(rig.handle(1).state().play_calls, 2);
    }

    #[test]
    fn settings_set_while_idle_apply_on_next_play() {
        let mut rig = Rig::new();
        rig.session.set_volume(0.3);
        rig.session.set_playback_rate(1.5);

        rig.play(1);

        let handle = rig.handle(1);
        assert_eq!(handle.state().volume, 0.3);
        assert_eq!(handle.state().rate, 1.5);
    }

    #[test]
    fn mute_is_volume_zero_on_the_handle() {
        let mut rig = Rig::new();
        rig.session.set_volume(0.6);
        rig.play(1);
        let handle = rig.handle(1);

        rig.session.toggle_mute();
        assert_eq!(handle.state().volume, 0.0);

        rig.session.toggle_mute();
        assert_eq!(handle.state().volume, 0.6);
    }

    #[test]
    fn muted_session_starts_new_items_silent() {
        let mut rig = Rig::new();
        rig.session.toggle_mute();
        rig.play(1);
        assert_eq!(rig.handle(1).state().volume, 0.0);
    }

    #[test]
    fn rate_changes_reach_the_active_handle_immediately() {
        let mut rig = Rig::new();
        rig.play(1);
        rig.session.set_playback_rate(2.0);
        assert_eq!(rig.handle(1).state().rate, 2.0);
    }

    #[test]
    fn natural_end_returns_to_idle_and_cancels_polling() {
        let mut rig = Rig::new();
        let PlayRequest::Started { poll_epoch } = rig.play(1) else {
            panic!("expected playback to start");
        };
        rig.handle(1).set(|s| s.ended = true);

        assert_eq!(rig.session.tick(poll_epoch), Tick::Finished);
        assert_eq!(rig.session.active_item_id(), None);
        assert_eq!(rig.session.tick(poll_epoch), Tick::Stale);
    }

    #[test]
    fn ticks_mirror_position_and_backfill_duration() {
        let mut rig = Rig::new();
        let PlayRequest::Started { poll_epoch } = rig.play(1) else {
            panic!("expected playback to start");
        };
        assert_eq!(rig.session.duration(), 0.0);

        rig.handle(1).set(|s| {
            s.position = 12.5;
            s.duration = 180.0;
        });

        assert_eq!(
            rig.session.tick(poll_epoch),
            Tick::Progress {
                current_time: 12.5,
                duration: 180.0
            }
        );
        assert_eq!(rig.session.current_time(), 12.5);
        assert_eq!(rig.session.duration(), 180.0);
    }

    #[test]
    fn starting_playback_resets_progress() {
        let mut rig = Rig::new();
        let PlayRequest::Started { poll_epoch } = rig.play(1) else {
            panic!("expected playback to start");
        };
        rig.handle(1).set(|s| s.position = 30.0);
        rig.session.tick(poll_epoch);
        assert_eq!(rig.session.current_time(), 30.0);

        rig.play(2);
        assert_eq!(rig.session.current_time(), 0.0);
    }

    #[test]
    fn seek_writes_through_to_the_active_handle() {
        let mut rig = Rig::new();
        rig.play(1);
        rig.session.seek(42.0);

        assert_eq!(rig.handle(1).state().position, 42.0);
        assert_eq!(rig.session.current_time(), 42.0);
    }

    #[test]
    fn seek_while_idle_is_a_no_op() {
        let mut rig = Rig::new();
        rig.play(1);
        rig.play(1); // toggle off
        rig.session.seek(42.0);
        assert_eq!(rig.handle(1).state().position, 0.0);
    }

    #[test]
    fn failed_handle_open_reports_unavailable() {
        let mut session: AudioSession<FakeHandle> = AudioSession::new();
        let outcome = session.request_play(1, "u", |_| None);
        assert_eq!(outcome, PlayRequest::Unavailable);
        assert_eq!(session.active_item_id(), None);
    }

    #[test]
    fn handle_cache_is_capped_and_evicts_least_recently_played() {
        let mut rig = Rig::new();
        for id in 0..(MAX_CACHED_HANDLES as u64 + 2) {
            rig.play(id);
        }

        assert_eq!(rig.session.handles.len(), MAX_CACHED_HANDLES);
        assert!(!rig.session.handles.contains_key(&0));
        assert!(!rig.session.handles.contains_key(&1));
        // The newest item survived the cap and is still the active one.
        assert!(rig.session.is_playing(MAX_CACHED_HANDLES as u64 + 1));
        // Replaying an evicted item opens a fresh handle.
        rig.play(0);
        assert_eq!(rig.open_count(0), 2);
    }
}
