//! Screen router
//!
//! A tagged-variant state machine selecting the full-screen view. Each
//! variant owns only the animation state it needs, and every transition is
//! listed in [`Router::handle`]; inputs without an entry for the current
//! screen are ignored.

use std::time::Duration;

use tracing::debug;

use crate::anim::{
    OneShot, SequencerEvent, SequencerTiming, Stage, StageSequencer, TunnelEvent,
    TunnelTiming, TunnelTransition,
};
use crate::core::audio::Cue;

/// Labels typed out by the authorization screen
pub const AUTH_STAGES: [&str; 7] = [
    "Powering Up Core Systems...",
    "Establishing Secure Neural Link...",
    "Running System Diagnostics...",
    "Authenticating User...",
    "Initializing Voice Recognition...",
    "Finalizing Boot Sequence...",
    "All Systems Operational",
];

/// Message shown after a failed login
pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";

/// Accepted username/password pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Exact, case-sensitive comparison
    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::new("VISION", "PROVISION")
    }
}

/// Durations of every timed transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterTiming {
    /// Login panel fade before authorization starts
    pub login_fade: Duration,
    /// Typed authorization sequence
    pub sequencer: SequencerTiming,
    /// Boot screen duration
    pub boot: Duration,
    /// Delay before the welcome greeting on the boot screen
    pub greeting_delay: Duration,
    pub tunnel: TunnelTiming,
}

impl Default for RouterTiming {
    fn default() -> Self {
        Self {
            login_fade: Duration::from_millis(800),
            sequencer: SequencerTiming::default(),
            boot: Duration::from_millis(3000),
            greeting_delay: Duration::from_millis(2000),
            tunnel: TunnelTiming::default(),
        }
    }
}

/// Login panel state
#[derive(Debug, Clone, Default)]
pub struct LoginState {
    pub error: Option<String>,
    /// Running once valid credentials were submitted
    pub fade: Option<OneShot>,
}

impl LoginState {
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Remaining panel opacity, 1.0 until a fade starts
    pub fn opacity(&self) -> f64 {
        self.fade.as_ref().map_or(1.0, |fade| 1.0 - fade.progress())
    }
}

/// Boot screen state
#[derive(Debug, Clone)]
pub struct BootState {
    pub timer: OneShot,
    pub greeting: OneShot,
}

impl BootState {
    fn new(timing: &RouterTiming) -> Self {
        Self {
            timer: OneShot::new(timing.boot),
            greeting: OneShot::new(timing.greeting_delay),
        }
    }

    /// Time since the boot screen appeared
    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }
}

/// The screen currently presented
#[derive(Debug, Clone)]
pub enum Screen {
    LoggedOut(LoginState),
    Authorizing(StageSequencer),
    Booting(BootState),
    Idle,
    Transitioning(TunnelTransition),
    DetailView,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::LoggedOut(_) => "logged-out",
            Screen::Authorizing(_) => "authorizing",
            Screen::Booting(_) => "booting",
            Screen::Idle => "idle",
            Screen::Transitioning(_) => "transitioning",
            Screen::DetailView => "detail-view",
        }
    }
}

/// Inputs accepted by the router
#[derive(Debug, Clone, PartialEq)]
pub enum RouterInput {
    Submit { username: String, password: String },
    Tick(Duration),
    WidgetActivated,
    Close,
}

/// Side effects requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterEffect {
    PlayCue(Cue),
    StopCue,
    FetchLocalWeather,
    StartRefresh,
    StopRefresh,
}

/// Screen state machine
#[derive(Debug, Clone)]
pub struct Router {
    screen: Screen,
    credentials: Credentials,
    timing: RouterTiming,
    /// Distance at which tunnel streaks wrap
    tunnel_extent: f64,
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Credentials::default(), RouterTiming::default())
    }
}

impl Router {
    pub fn new(credentials: Credentials, timing: RouterTiming) -> Self {
        Self {
            screen: Screen::LoggedOut(LoginState::default()),
            credentials,
            timing,
            tunnel_extent: 100.0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The mini weather widget is shown on the idle screen only
    pub fn widget_visible(&self) -> bool {
        matches!(self.screen, Screen::Idle)
    }

    /// Set the distance at which tunnel streaks wrap (half the viewport diagonal)
    pub fn set_tunnel_extent(&mut self, extent: f64) {
        self.tunnel_extent = extent.max(1.0);
    }

    /// Apply one input and return the effects of any transition it caused
    pub fn handle(&mut self, input: RouterInput) -> Vec<RouterEffect> {
        let mut effects = Vec::new();

        let next = match (&mut self.screen, input) {
            (Screen::LoggedOut(login), RouterInput::Submit { username, password }) => {
                if login.is_fading() {
                    None
                } else if self.credentials.matches(&username, &password) {
                    login.error = None;
                    login.fade = Some(OneShot::new(self.timing.login_fade));
                    effects.push(RouterEffect::PlayCue(Cue::Startup));
                    None
                } else {
                    login.error = Some(INVALID_CREDENTIALS.to_string());
                    None
                }
            }
            (Screen::LoggedOut(login), RouterInput::Tick(dt)) => {
                let faded = login.fade.as_mut().is_some_and(|fade| fade.advance(dt));
                if faded {
                    Some(Screen::Authorizing(auth_sequencer(self.timing.sequencer)))
                } else {
                    None
                }
            }
            (Screen::Authorizing(sequencer), RouterInput::Tick(dt)) => {
                let mut done = false;
                for event in sequencer.advance(dt) {
                    match event {
                        SequencerEvent::AudioCue => {
                            effects.push(RouterEffect::PlayCue(Cue::Startup))
                        }
                        SequencerEvent::Completed => done = true,
                        _ => {}
                    }
                }
                if done {
                    effects.push(RouterEffect::StopCue);
                    effects.push(RouterEffect::FetchLocalWeather);
                    Some(Screen::Booting(BootState::new(&self.timing)))
                } else {
                    None
                }
            }
            (Screen::Booting(boot), RouterInput::Tick(dt)) => {
                if boot.greeting.advance(dt) {
                    effects.push(RouterEffect::PlayCue(Cue::Welcome));
                }
                if boot.timer.advance(dt) {
                    Some(Screen::Idle)
                } else {
                    None
                }
            }
            (Screen::Idle, RouterInput::WidgetActivated) => {
                Some(Screen::Transitioning(TunnelTransition::new(self.timing.tunnel)))
            }
            (Screen::Transitioning(tunnel), RouterInput::Tick(dt)) => {
                if tunnel
                    .advance(dt, self.tunnel_extent)
                    .contains(&TunnelEvent::Completed)
                {
                    effects.push(RouterEffect::StartRefresh);
                    Some(Screen::DetailView)
                } else {
                    None
                }
            }
            (Screen::DetailView, RouterInput::Close) => {
                effects.push(RouterEffect::StopRefresh);
                Some(Screen::Idle)
            }
            _ => None,
        };

        if let Some(next) = next {
            debug!(from = self.screen.name(), to = next.name(), "screen transition");
            // Dropping the previous screen drops its animation state
            self.screen = next;
        }

        effects
    }
}

fn auth_sequencer(timing: SequencerTiming) -> StageSequencer {
    StageSequencer::new(AUTH_STAGES.iter().map(|label| Stage::new(*label)).collect(), timing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(username: &str, password: &str) -> RouterInput {
        RouterInput::Submit {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn tick(ms: u64) -> RouterInput {
        RouterInput::Tick(Duration::from_millis(ms))
    }

    /// Tick in 50 ms steps until `done` holds, collecting effects
    fn run_until(
        router: &mut Router,
        limit: Duration,
        done: impl Fn(&Screen) -> bool,
    ) -> Vec<RouterEffect> {
        let mut effects = Vec::new();
        let mut waited = Duration::ZERO;
        while !done(router.screen()) {
            assert!(waited < limit, "still on {} after {:?}", router.screen().name(), waited);
            effects.extend(router.handle(tick(50)));
            waited += Duration::from_millis(50);
        }
        effects
    }

    fn logged_in_router() -> Router {
        let mut router = Router::default();
        router.handle(submit("VISION", "PROVISION"));
        router.handle(tick(800));
        router
    }

    fn idle_router() -> Router {
        let mut router = logged_in_router();
        run_until(&mut router, Duration::from_secs(60), |s| matches!(s, Screen::Idle));
        router
    }

    #[test]
    fn test_bad_credentials_stay_logged_out() {
        let mut router = Router::default();
        let effects = router.handle(submit("vision", "PROVISION"));
        assert!(effects.is_empty());

        router.handle(tick(5000));
        match router.screen() {
            Screen::LoggedOut(login) => {
                assert_eq!(login.error.as_deref(), Some(INVALID_CREDENTIALS));
                assert!(!login.is_fading());
            }
            other => panic!("unexpected screen {}", other.name()),
        }
    }

    #[test]
    fn test_good_credentials_reach_authorizing_after_fade() {
        let mut router = Router::default();
        router.handle(submit("bad", "bad"));

        let effects = router.handle(submit("VISION", "PROVISION"));
        assert_eq!(effects, vec![RouterEffect::PlayCue(Cue::Startup)]);
        match router.screen() {
            Screen::LoggedOut(login) => {
                assert!(login.error.is_none());
                assert!(login.is_fading());
            }
            other => panic!("unexpected screen {}", other.name()),
        }

        router.handle(tick(799));
        assert!(matches!(router.screen(), Screen::LoggedOut(_)));
        router.handle(tick(1));
        assert!(matches!(router.screen(), Screen::Authorizing(_)));
    }

    #[test]
    fn test_submit_during_fade_is_ignored() {
        let mut router = Router::default();
        router.handle(submit("VISION", "PROVISION"));
        router.handle(tick(400));

        assert!(router.handle(submit("VISION", "PROVISION")).is_empty());
        router.handle(submit("x", "y"));
        match router.screen() {
            Screen::LoggedOut(login) => assert!(login.error.is_none()),
            other => panic!("unexpected screen {}", other.name()),
        }

        // The first fade keeps running
        router.handle(tick(400));
        assert!(matches!(router.screen(), Screen::Authorizing(_)));
    }

    #[test]
    fn test_authorization_completion_boots_and_fetches() {
        let mut router = logged_in_router();
        let effects = run_until(&mut router, Duration::from_secs(30), |s| {
            matches!(s, Screen::Booting(_))
        });

        assert_eq!(effects.first(), Some(&RouterEffect::PlayCue(Cue::Startup)));
        let n = effects.len();
        assert_eq!(
            &effects[n - 2..],
            &[RouterEffect::StopCue, RouterEffect::FetchLocalWeather]
        );
    }

    #[test]
    fn test_boot_greets_then_goes_idle() {
        let mut router = logged_in_router();
        run_until(&mut router, Duration::from_secs(30), |s| {
            matches!(s, Screen::Booting(_))
        });
        assert!(!router.widget_visible());

        assert!(router.handle(tick(1999)).is_empty());
        assert_eq!(router.handle(tick(1)), vec![RouterEffect::PlayCue(Cue::Welcome)]);
        router.handle(tick(999));
        assert!(matches!(router.screen(), Screen::Booting(_)));
        router.handle(tick(1));
        assert!(matches!(router.screen(), Screen::Idle));
        assert!(router.widget_visible());
    }

    #[test]
    fn test_widget_opens_detail_view_through_tunnel() {
        let mut router = idle_router();
        assert!(router.handle(RouterInput::WidgetActivated).is_empty());
        assert!(matches!(router.screen(), Screen::Transitioning(_)));
        assert!(!router.widget_visible());

        assert!(router.handle(tick(4999)).is_empty());
        assert_eq!(router.handle(tick(1)), vec![RouterEffect::StartRefresh]);
        assert!(matches!(router.screen(), Screen::DetailView));
        assert!(!router.widget_visible());

        assert_eq!(router.handle(RouterInput::Close), vec![RouterEffect::StopRefresh]);
        assert!(router.widget_visible());
    }

    #[test]
    fn test_unlisted_inputs_are_ignored() {
        let mut router = Router::default();
        assert!(router.handle(RouterInput::WidgetActivated).is_empty());
        assert!(router.handle(RouterInput::Close).is_empty());
        assert!(matches!(router.screen(), Screen::LoggedOut(_)));

        let mut router = idle_router();
        assert!(router.handle(submit("VISION", "PROVISION")).is_empty());
        assert!(router.handle(RouterInput::Close).is_empty());
        assert!(router.handle(tick(60_000)).is_empty());
        assert!(matches!(router.screen(), Screen::Idle));
    }

    #[test]
    fn test_custom_credentials() {
        let mut router = Router::new(Credentials::new("a", "b"), RouterTiming::default());
        router.handle(submit("VISION", "PROVISION"));
        router.handle(tick(800));
        assert!(matches!(router.screen(), Screen::LoggedOut(_)));
        router.handle(submit("a", "b"));
        router.handle(tick(800));
        assert!(matches!(router.screen(), Screen::Authorizing(_)));
    }

    #[test]
    fn test_login_opacity_follows_fade() {
        let mut router = Router::default();
        router.handle(submit("VISION", "PROVISION"));
        router.handle(tick(400));
        match router.screen() {
            Screen::LoggedOut(login) => assert!((login.opacity() - 0.5).abs() < 1e-9),
            other => panic!("unexpected screen {}", other.name()),
        }
    }
}
