//! Play session controller: composes the timer and the scoreboard and owns the
//! tick subscription that drives the clock

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    scoreboard::Scoreboard,
    timer::{TimerEngine, TimerKind, FALLBACK_SECONDS},
};
use crate::state::PlaySessionState;

/// Title shown when the catalog hands over a game without a name
pub const UNTITLED_GAME: &str = "Game";

/// Source of one-second ticks for a running clock
///
/// A subscription stays live until it is dropped. Every tick it produces must
/// carry the `epoch` it was created with, so the session can tell a stale tick
/// from a live one.
pub trait TickScheduler {
    type Subscription;

    fn subscribe(&mut self, epoch: u64) -> Self::Subscription;
}

/// Duration range as stored in the game catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// What the catalog tells us about the game being played
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDescriptor {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_min_minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<DurationRange>,
}

impl GameDescriptor {
    pub fn new(name: impl Into<String>, duration_min_minutes: f64) -> Self {
        Self {
            name: name.into(),
            duration_min_minutes: Some(duration_min_minutes),
            duration: None,
        }
    }

    /// Minimum play time in minutes, preferring the flat field over the catalog range
    pub fn min_duration_minutes(&self) -> Option<f64> {
        self.duration_min_minutes
            .or_else(|| self.duration.as_ref().and_then(|d| d.min))
    }

    /// Seed for the countdown, falling back when the duration is missing or unusable
    pub fn default_seconds(&self) -> f64 {
        match self.min_duration_minutes() {
            Some(minutes) if minutes.is_finite() && minutes > 0.0 => minutes * 60.0,
            _ => FALLBACK_SECONDS as f64,
        }
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNTITLED_GAME
        } else {
            &self.name
        }
    }
}

/// Which sub-engine the host is presenting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Timer,
    Scoreboard,
}

/// User intents the host can dispatch into a running session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum Intent {
    ToggleRunning,
    ResetTimer,
    SetTimerKind { kind: TimerKind },
    SetActiveView { view: ActiveView },
    AddTeam,
    RemoveTeam { index: usize },
    RenameTeam { index: usize, name: String },
    UpdateScore { index: usize, delta: i64 },
    ResetAllScores,
}

/// One play session, from `enter` to `exit`
///
/// Holds at most one tick subscription, and only while the clock runs. The
/// subscription is dropped on every path out of the running state, on `exit`,
/// and when the session itself is dropped.
pub struct PlaySession<S: TickScheduler> {
    game_name: String,
    active_view: ActiveView,
    timer: TimerEngine,
    scoreboard: Scoreboard,
    scheduler: S,
    subscription: Option<(u64, S::Subscription)>,
    next_epoch: u64,
}

impl<S: TickScheduler> PlaySession<S> {
    pub fn enter(game: &GameDescriptor, scheduler: S) -> Self {
        let timer = TimerEngine::new(game.default_seconds());
        info!(
            "Entering play mode for {:?} with a {}s countdown",
            game.display_name(),
            timer.default_seconds()
        );
        Self {
            game_name: game.display_name().to_string(),
            active_view: ActiveView::Timer,
            timer,
            scoreboard: Scoreboard::new(),
            scheduler,
            subscription: None,
            next_epoch: 0,
        }
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    /// Epoch of the live tick subscription, if the clock is running
    pub fn live_epoch(&self) -> Option<u64> {
        self.subscription.as_ref().map(|(epoch, _)| *epoch)
    }

    pub fn apply(&mut self, intent: Intent) -> PlaySessionState {
        debug!("Applying intent {:?}", intent);
        match intent {
            Intent::ToggleRunning => self.toggle_running(),
            Intent::ResetTimer => self.reset_timer(),
            Intent::SetTimerKind { kind } => self.set_timer_kind(kind),
            Intent::SetActiveView { view } => self.set_active_view(view),
            Intent::AddTeam => self.add_team(),
            Intent::RemoveTeam { index } => self.remove_team(index),
            Intent::RenameTeam { index, name } => self.rename_team(index, name),
            Intent::UpdateScore { index, delta } => self.update_score(index, delta),
            Intent::ResetAllScores => self.reset_all_scores(),
        }
    }

    pub fn toggle_running(&mut self) -> PlaySessionState {
        self.timer.toggle_running();
        self.sync_subscription();
        self.snapshot()
    }

    pub fn reset_timer(&mut self) -> PlaySessionState {
        self.timer.reset();
        self.sync_subscription();
        self.snapshot()
    }

    pub fn set_timer_kind(&mut self, kind: TimerKind) -> PlaySessionState {
        self.timer.set_kind(kind);
        self.sync_subscription();
        self.snapshot()
    }

    /// Switch the presented view; neither sub-engine is touched
    pub fn set_active_view(&mut self, view: ActiveView) -> PlaySessionState {
        self.active_view = view;
        self.snapshot()
    }

    pub fn add_team(&mut self) -> PlaySessionState {
        self.scoreboard.add_team();
        self.snapshot()
    }

    pub fn remove_team(&mut self, index: usize) -> PlaySessionState {
        self.scoreboard.remove_team(index);
        self.snapshot()
    }

    pub fn rename_team(&mut self, index: usize, name: String) -> PlaySessionState {
        self.scoreboard.rename_team(index, name);
        self.snapshot()
    }

    pub fn update_score(&mut self, index: usize, delta: i64) -> PlaySessionState {
        self.scoreboard.update_score(index, delta);
        self.snapshot()
    }

    pub fn reset_all_scores(&mut self) -> PlaySessionState {
        self.scoreboard.reset_all_scores();
        self.snapshot()
    }

    /// Deliver a tick from the subscription created at `epoch`
    ///
    /// Returns false when the tick is stale and was discarded.
    pub fn tick(&mut self, epoch: u64) -> bool {
        if self.live_epoch() != Some(epoch) {
            debug!("Discarding stale tick from epoch {}", epoch);
            return false;
        }
        self.timer.tick();
        self.sync_subscription();
        true
    }

    pub fn snapshot(&self) -> PlaySessionState {
        PlaySessionState::capture(&self.game_name, self.active_view, &self.timer, &self.scoreboard)
    }

    /// Leave play mode, releasing the tick subscription whether or not the clock runs
    pub fn exit(mut self) -> PlaySessionState {
        self.timer.pause();
        self.release_subscription();
        info!("Exiting play mode for {:?}", self.game_name);
        self.snapshot()
    }

    fn sync_subscription(&mut self) {
        match (self.timer.is_running(), self.subscription.is_some()) {
            (true, false) => {
                let epoch = self.next_epoch;
                self.next_epoch += 1;
                debug!("Acquiring tick subscription for epoch {}", epoch);
                self.subscription = Some((epoch, self.scheduler.subscribe(epoch)));
            }
            (false, true) => self.release_subscription(),
            _ => {}
        }
    }

    fn release_subscription(&mut self) {
        if let Some((epoch, subscription)) = self.subscription.take() {
            debug!("Releasing tick subscription for epoch {}", epoch);
            drop(subscription);
        }
    }
}

impl<S: TickScheduler> Drop for PlaySession<S> {
    fn drop(&mut self) {
        self.release_subscription();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;
    use crate::engine::timer::TimerPhase;

    /// Scheduler that only counts subscriptions; tests deliver ticks by hand
    #[derive(Default, Clone)]
    struct CountingScheduler {
        live: Rc<Cell<usize>>,
        acquired: Rc<Cell<usize>>,
    }

    struct CountingSubscription(Rc<Cell<usize>>);

    impl Drop for CountingSubscription {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    impl TickScheduler for CountingScheduler {
        type Subscription = CountingSubscription;

        fn subscribe(&mut self, _epoch: u64) -> CountingSubscription {
            self.live.set(self.live.get() + 1);
            self.acquired.set(self.acquired.get() + 1);
            assert!(self.live.get() <= 1, "more than one live tick subscription");
            CountingSubscription(Rc::clone(&self.live))
        }
    }

    fn enter(minutes: f64) -> (PlaySession<CountingScheduler>, CountingScheduler) {
        let scheduler = CountingScheduler::default();
        let session = PlaySession::enter(&GameDescriptor::new("X", minutes), scheduler.clone());
        (session, scheduler)
    }

    fn tick_n(session: &mut PlaySession<CountingScheduler>, n: usize) {
        for _ in 0..n {
            if let Some(epoch) = session.live_epoch() {
                session.tick(epoch);
            }
        }
    }

    #[test]
    fn enter_seeds_countdown_and_two_teams() {
        let (session, scheduler) = enter(5.0);
        let state = session.snapshot();
        assert_eq!(state.active_view, ActiveView::Timer);
        assert_eq!(state.timer.kind, TimerKind::Countdown);
        assert_eq!(state.timer.seconds, 300);
        assert_eq!(state.timer.display, "05:00");
        assert!(!state.timer.is_running);
        assert_eq!(state.scoreboard.teams.len(), 2);
        assert_eq!(scheduler.live.get(), 0);
    }

    #[test]
    fn enter_falls_back_on_bad_durations() {
        for minutes in [0.0, -3.0, f64::NAN] {
            let (session, _) = enter(minutes);
            assert_eq!(session.timer().seconds(), FALLBACK_SECONDS);
        }
        let missing = GameDescriptor::default();
        let session = PlaySession::enter(&missing, CountingScheduler::default());
        assert_eq!(session.timer().seconds(), FALLBACK_SECONDS);
        assert_eq!(session.game_name(), UNTITLED_GAME);
    }

    #[test]
    fn catalog_duration_range_is_accepted() {
        let game: GameDescriptor =
            serde_json::from_str(r#"{"name":"Charades","duration":{"min":2.5,"max":10}}"#)
                .unwrap();
        let session = PlaySession::enter(&game, CountingScheduler::default());
        assert_eq!(session.timer().seconds(), 150);
    }

    #[test]
    fn start_tick_pause_scenario() {
        let (mut session, scheduler) = enter(5.0);
        let state = session.apply(Intent::ToggleRunning);
        assert!(state.timer.is_running);
        assert_eq!(scheduler.live.get(), 1);

        tick_n(&mut session, 3);
        assert_eq!(session.snapshot().timer.display, "04:57");

        let epoch = session.live_epoch().unwrap();
        let state = session.apply(Intent::ToggleRunning);
        assert_eq!(scheduler.live.get(), 0);
        assert!(!session.tick(epoch));
        assert!(!session.tick(epoch));
        assert_eq!(state.timer.seconds, 297);
        assert_eq!(session.snapshot().timer.seconds, 297);
        assert_eq!(session.snapshot().timer.phase, TimerPhase::Paused);
    }

    #[test]
    fn switching_to_stopwatch_releases_the_subscription() {
        let (mut session, scheduler) = enter(5.0);
        session.toggle_running();
        tick_n(&mut session, 2);
        let state = session.apply(Intent::SetTimerKind { kind: TimerKind::Stopwatch });
        assert_eq!(state.timer.seconds, 0);
        assert!(!state.timer.is_running);
        assert_eq!(state.timer.display, "00:00");
        assert_eq!(scheduler.live.get(), 0);
    }

    #[test]
    fn countdown_expiry_releases_subscription_and_ignores_stray_ticks() {
        let (mut session, scheduler) = enter(0.5);
        assert_eq!(session.timer().seconds(), 30);
        session.toggle_running();
        let epoch = session.live_epoch().unwrap();
        tick_n(&mut session, 29);
        assert_eq!(session.timer().seconds(), 1);
        assert!(session.timer().is_running());

        assert!(session.tick(epoch));
        let state = session.snapshot();
        assert_eq!(state.timer.seconds, 0);
        assert!(!state.timer.is_running);
        assert_eq!(state.timer.phase, TimerPhase::Expired);
        assert_eq!(scheduler.live.get(), 0);

        assert!(!session.tick(epoch));
        assert_eq!(session.timer().seconds(), 0);

        // starting an expired countdown must not acquire anything
        session.toggle_running();
        assert_eq!(scheduler.live.get(), 0);
        assert_eq!(scheduler.acquired.get(), 1);
    }

    #[test]
    fn restart_uses_a_fresh_epoch() {
        let (mut session, scheduler) = enter(5.0);
        session.toggle_running();
        let first = session.live_epoch().unwrap();
        session.toggle_running();
        session.toggle_running();
        let second = session.live_epoch().unwrap();
        assert_ne!(first, second);
        assert_eq!(scheduler.acquired.get(), 2);

        assert!(!session.tick(first));
        assert!(session.tick(second));
        assert_eq!(session.timer().seconds(), 299);
    }

    #[test]
    fn stopwatch_keeps_one_subscription_while_running() {
        let (mut session, scheduler) = enter(5.0);
        session.set_timer_kind(TimerKind::Stopwatch);
        session.toggle_running();
        tick_n(&mut session, 90);
        assert_eq!(session.snapshot().timer.display, "01:30");
        assert_eq!(scheduler.acquired.get(), 1);
        assert_eq!(scheduler.live.get(), 1);
    }

    #[test]
    fn reset_releases_the_subscription() {
        let (mut session, scheduler) = enter(5.0);
        session.toggle_running();
        tick_n(&mut session, 4);
        let state = session.apply(Intent::ResetTimer);
        assert_eq!(state.timer.seconds, 300);
        assert_eq!(scheduler.live.get(), 0);
    }

    #[test]
    fn view_switch_preserves_both_engines() {
        let (mut session, scheduler) = enter(5.0);
        session.toggle_running();
        tick_n(&mut session, 10);
        session.update_score(1, 4);

        let state = session.apply(Intent::SetActiveView { view: ActiveView::Scoreboard });
        assert_eq!(state.active_view, ActiveView::Scoreboard);
        assert!(state.timer.is_running);
        assert_eq!(state.timer.seconds, 290);
        assert_eq!(scheduler.live.get(), 1);

        let state = session.apply(Intent::SetActiveView { view: ActiveView::Timer });
        assert_eq!(state.scoreboard.teams[1].score, 4);
    }

    #[test]
    fn team_intents_flow_through() {
        let (mut session, _) = enter(5.0);
        let state = session.apply(Intent::AddTeam);
        assert_eq!(state.scoreboard.teams[2].name, "Team 3");

        let state = session.apply(Intent::RemoveTeam { index: 0 });
        let names: Vec<_> = state.scoreboard.teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Team 2", "Team 3"]);
        let state = session.apply(Intent::RemoveTeam { index: 0 });
        assert_eq!(state.scoreboard.teams.len(), 2);

        let state = session.apply(Intent::UpdateScore { index: 0, delta: -5 });
        assert_eq!(state.scoreboard.teams[0].score, 0);

        let state = session.apply(Intent::RenameTeam { index: 1, name: "Owls".into() });
        assert_eq!(state.scoreboard.teams[1].name, "Owls");

        session.apply(Intent::UpdateScore { index: 1, delta: 3 });
        let state = session.apply(Intent::ResetAllScores);
        assert!(state.scoreboard.teams.iter().all(|t| t.score == 0));
        assert_eq!(state.scoreboard.teams[1].name, "Owls");
    }

    #[test]
    fn exit_releases_even_when_stopped() {
        let (mut session, scheduler) = enter(5.0);
        session.toggle_running();
        let state = session.exit();
        assert!(!state.timer.is_running);
        assert_eq!(scheduler.live.get(), 0);

        let (session, scheduler) = enter(5.0);
        session.exit();
        assert_eq!(scheduler.live.get(), 0);
    }

    #[test]
    fn dropping_a_running_session_releases_the_subscription() {
        let (mut session, scheduler) = enter(5.0);
        session.toggle_running();
        drop(session);
        assert_eq!(scheduler.live.get(), 0);
    }

    #[test]
    fn intents_deserialize_from_tagged_json() {
        let intent: Intent =
            serde_json::from_str(r#"{"intent":"updateScore","index":1,"delta":-1}"#).unwrap();
        assert_eq!(intent, Intent::UpdateScore { index: 1, delta: -1 });
        let intent: Intent =
            serde_json::from_str(r#"{"intent":"setTimerKind","kind":"stopwatch"}"#).unwrap();
        assert_eq!(intent, Intent::SetTimerKind { kind: TimerKind::Stopwatch });
    }
}
