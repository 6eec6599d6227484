//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::anim::WindGauge;
use crate::cli::commands::TuiArgs;
use crate::core::audio::{player_from_config, AudioPlayer};
use crate::core::config::Config;
use crate::core::location::{select_provider, LocationProvider};
use crate::error::{Result, VisionError};
use crate::router::{Router, RouterEffect, RouterInput, Screen};
use crate::tui::event::{is_back_key, is_interrupt_key, is_quit_key, AppEvent, EventHandler};
use crate::tui::screens::tunnel::TUNNEL_EXTENT;
use crate::tui::ui;
use crate::weather::client::{HttpWeatherClient, WeatherClient};
use crate::weather::lookup::{lookup_local, search_place, LocalWeather};
use crate::weather::model::{Coordinates, PlaceReport, Unit};
use crate::weather::refresh::{spawn_refresh, RefreshHandle};

/// Animation frame interval
const FRAME_RATE: Duration = Duration::from_millis(33);

/// Longest accepted login field
const MAX_FIELD_LEN: usize = 64;

/// Message type for async operation results
#[derive(Debug)]
pub enum AsyncMessage {
    /// Local weather lookup finished (initial fetch or refresh)
    LocalWeather(LocalWeather),
    /// Place search finished
    SearchCompleted {
        query: String,
        unit: Unit,
        result: std::result::Result<PlaceReport, String>,
    },
}

/// Login field with focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Login form input
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
}

impl LoginForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

/// Tabs of the place search panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchTab {
    #[default]
    Current,
    Hourly,
    Weekly,
    Monthly,
}

impl SearchTab {
    pub fn all() -> &'static [SearchTab] {
        &[
            SearchTab::Current,
            SearchTab::Hourly,
            SearchTab::Weekly,
            SearchTab::Monthly,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            SearchTab::Current => "Current",
            SearchTab::Hourly => "Hourly",
            SearchTab::Weekly => "Weekly",
            SearchTab::Monthly => "Monthly",
        }
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

/// Global place search state
#[derive(Debug, Clone, Default)]
pub struct SearchPanel {
    pub input: String,
    pub editing: bool,
    pub unit: Unit,
    pub tab: SearchTab,
    pub loading: bool,
    /// Query of the last submitted search
    pub query: Option<String>,
    pub result: Option<std::result::Result<PlaceReport, String>>,
}

/// Main application state
pub struct App {
    /// Whether the app should keep running
    pub running: bool,
    pub router: Router,
    pub login: LoginForm,

    // ─────────────────────────────────────────────────────────────────────────
    // Weather
    // ─────────────────────────────────────────────────────────────────────────
    /// Latest local lookup; `None` until the first one completes
    pub weather: Option<LocalWeather>,
    pub weather_loading: bool,
    /// Needle animation, present while the detail view is shown
    pub gauge: Option<WindGauge>,
    pub search: SearchPanel,
    refresh: Option<RefreshHandle>,
    refresh_interval: Duration,

    // ─────────────────────────────────────────────────────────────────────────
    // Capabilities
    // ─────────────────────────────────────────────────────────────────────────
    audio: Arc<dyn AudioPlayer>,
    location: Arc<dyn LocationProvider>,
    client: Arc<dyn WeatherClient>,

    // ─────────────────────────────────────────────────────────────────────────
    // Async communication
    // ─────────────────────────────────────────────────────────────────────────
    /// Sender for async messages (cloned into tasks)
    pub async_tx: mpsc::Sender<AsyncMessage>,
    /// Receiver for async messages
    pub async_rx: mpsc::Receiver<AsyncMessage>,

    /// Total animation time, drives the ring rotation
    pub clock: Duration,
}

impl App {
    /// Create the app from configuration and command-line overrides
    pub fn new(config: &Config, args: &TuiArgs) -> Self {
        let coords = match (args.lat, args.lon) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => config.coordinates(),
        };
        let location = select_provider(coords, args.ip_location || config.ip_location);
        let client: Arc<dyn WeatherClient> = Arc::new(HttpWeatherClient::from_config(config));
        let audio = player_from_config(config, args.mute);

        let mut app = Self::with_services(Router::default(), audio, location, client);
        app.refresh_interval = config.refresh_interval();
        app.search.unit = config.unit;
        app
    }

    /// Create the app around explicit capabilities
    pub fn with_services(
        mut router: Router,
        audio: Arc<dyn AudioPlayer>,
        location: Arc<dyn LocationProvider>,
        client: Arc<dyn WeatherClient>,
    ) -> Self {
        let (async_tx, async_rx) = mpsc::channel(32);
        router.set_tunnel_extent(TUNNEL_EXTENT);

        Self {
            running: true,
            router,
            login: LoginForm::default(),
            weather: None,
            weather_loading: false,
            gauge: None,
            search: SearchPanel::default(),
            refresh: None,
            refresh_interval: Duration::from_secs(600),
            audio,
            location,
            client,
            async_tx,
            async_rx,
            clock: Duration::ZERO,
        }
    }

    /// Setup terminal for TUI
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode().map_err(|e| VisionError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| VisionError::Terminal(e.to_string()))?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).map_err(|e| VisionError::Terminal(e.to_string()))?;
        Ok(terminal)
    }

    /// Restore terminal to normal state
    fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        disable_raw_mode().map_err(|e| VisionError::Terminal(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| VisionError::Terminal(e.to_string()))?;
        terminal
            .show_cursor()
            .map_err(|e| VisionError::Terminal(e.to_string()))?;
        Ok(())
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = Self::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;

        // Stop background work before handing the terminal back
        self.refresh = None;
        self.audio.stop();
        Self::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut events = EventHandler::new(FRAME_RATE);

        // Main event loop
        while self.running {
            // Draw the UI
            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|e| VisionError::Terminal(e.to_string()))?;

            // Check for async messages (non-blocking)
            while let Ok(msg) = self.async_rx.try_recv() {
                self.handle_async_message(msg);
            }

            // Handle events
            match events.next().await {
                Some(AppEvent::Key(key)) => self.handle_key_event(key),
                Some(AppEvent::Resize(_, _)) => {
                    // Terminal resize is handled automatically by ratatui
                }
                Some(AppEvent::Frame(dt)) => self.advance(dt),
                None => self.running = false,
            }
        }

        Ok(())
    }

    /// Advance every animation by `dt`
    pub fn advance(&mut self, dt: Duration) {
        self.clock = self.clock.saturating_add(dt);

        // A gauge created by this frame's effects starts from rest
        if let Some(gauge) = self.gauge.as_mut() {
            gauge.advance(dt);
        }

        let effects = self.router.handle(RouterInput::Tick(dt));
        self.apply_effects(effects);
    }

    /// Handle async message from background tasks
    pub fn handle_async_message(&mut self, msg: AsyncMessage) {
        match msg {
            AsyncMessage::LocalWeather(outcome) => {
                self.weather_loading = false;

                let new_wind = outcome.record().map(|r| r.wind_speed_kmh);
                let old_wind = self
                    .weather
                    .as_ref()
                    .and_then(|w| w.record())
                    .map(|r| r.wind_speed_kmh);
                if matches!(self.router.screen(), Screen::DetailView) && new_wind != old_wind {
                    self.gauge = new_wind.map(WindGauge::new);
                }

                if let LocalWeather::Failed(message) = &outcome {
                    debug!(%message, "local weather unavailable");
                }
                self.weather = Some(outcome);
            }
            AsyncMessage::SearchCompleted {
                query,
                unit,
                result,
            } => {
                // Ignore answers to superseded searches
                if self.search.query.as_deref() != Some(query.as_str()) || self.search.unit != unit
                {
                    return;
                }
                self.search.loading = false;
                self.search.result = Some(result);
            }
        }
    }

    /// Handle keyboard input
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if is_interrupt_key(&key) {
            self.running = false;
            return;
        }

        match self.router.screen() {
            Screen::LoggedOut(_) => self.handle_login_key(key),
            Screen::Idle => self.handle_idle_key(key),
            Screen::DetailView => self.handle_detail_key(key),
            Screen::Authorizing(_) | Screen::Booting(_) | Screen::Transitioning(_) => {
                if is_quit_key(&key) {
                    self.running = false;
                }
            }
        }
    }

    fn handle_idle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('w') => {
                let effects = self.router.handle(RouterInput::WidgetActivated);
                self.apply_effects(effects);
            }
            _ if is_quit_key(&key) => self.running = false,
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.running = false,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus()
            }
            KeyCode::Enter => {
                let effects = self.router.handle(RouterInput::Submit {
                    username: self.login.username.clone(),
                    password: self.login.password.clone(),
                });
                self.apply_effects(effects);
            }
            KeyCode::Backspace => {
                self.login.focused_mut().pop();
            }
            KeyCode::Char(c) => {
                let field = self.login.focused_mut();
                if field.chars().count() < MAX_FIELD_LEN {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        // Search input mode captures every key
        if self.search.editing {
            match key.code {
                KeyCode::Esc => self.search.editing = false,
                KeyCode::Enter => {
                    self.search.editing = false;
                    let query = self.search.input.trim().to_string();
                    if !query.is_empty() {
                        self.spawn_search(query);
                    }
                }
                KeyCode::Backspace => {
                    self.search.input.pop();
                }
                KeyCode::Char(c) => {
                    if self.search.input.chars().count() < MAX_FIELD_LEN {
                        self.search.input.push(c);
                    }
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('/') | KeyCode::Char('s') => self.search.editing = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.search.tab = self.search.tab.next()
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.search.tab = self.search.tab.previous()
            }
            KeyCode::Char('u') => {
                self.search.unit = self.search.unit.next();
                // Re-run the current search in the new unit
                if let Some(query) = self.search.query.clone() {
                    self.spawn_search(query);
                }
            }
            _ if is_back_key(&key) => {
                let effects = self.router.handle(RouterInput::Close);
                self.apply_effects(effects);
            }
            _ if is_quit_key(&key) => self.running = false,
            _ => {}
        }
    }

    /// Carry out router effects
    fn apply_effects(&mut self, effects: Vec<RouterEffect>) {
        for effect in effects {
            debug!(?effect, "router effect");
            match effect {
                RouterEffect::PlayCue(cue) => {
                    if let Err(e) = self.audio.play(cue) {
                        warn!(error = %e, ?cue, "sound cue failed");
                    }
                }
                RouterEffect::StopCue => self.audio.stop(),
                RouterEffect::FetchLocalWeather => self.spawn_local_lookup(),
                RouterEffect::StartRefresh => {
                    self.gauge = self
                        .weather
                        .as_ref()
                        .and_then(|w| w.record())
                        .map(|r| WindGauge::new(r.wind_speed_kmh));
                    self.refresh = Some(spawn_refresh(
                        self.refresh_interval,
                        self.location.clone(),
                        self.client.clone(),
                        self.async_tx.clone(),
                        AsyncMessage::LocalWeather,
                    ));
                }
                RouterEffect::StopRefresh => {
                    self.refresh = None;
                    self.gauge = None;
                }
            }
        }
    }

    /// Whether the periodic refresh task is running
    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_some()
    }

    fn spawn_local_lookup(&mut self) {
        self.weather_loading = true;

        let tx = self.async_tx.clone();
        let location = self.location.clone();
        let client = self.client.clone();

        tokio::spawn(async move {
            let outcome = lookup_local(location.as_ref(), client.as_ref()).await;
            let _ = tx.send(AsyncMessage::LocalWeather(outcome)).await;
        });
    }

    fn spawn_search(&mut self, query: String) {
        self.search.loading = true;
        self.search.query = Some(query.clone());
        self.search.result = None;

        let tx = self.async_tx.clone();
        let client = self.client.clone();
        let unit = self.search.unit;

        tokio::spawn(async move {
            let result = search_place(client.as_ref(), &query, unit).await;
            let _ = tx
                .send(AsyncMessage::SearchCompleted {
                    query,
                    unit,
                    result,
                })
                .await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    use crate::core::audio::{Cue, MockAudioPlayer, SilentPlayer};
    use crate::core::location::{FixedLocation, NoLocation};
    use crate::weather::client::MockWeatherClient;
    use crate::weather::model::WeatherRecord;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
    }

    fn record(wind: f64) -> WeatherRecord {
        WeatherRecord {
            wind_speed_kmh: wind,
            ..WeatherRecord::fallback()
        }
    }

    fn app_with(client: MockWeatherClient) -> App {
        App::with_services(
            Router::default(),
            Arc::new(SilentPlayer),
            Arc::new(FixedLocation::new(Coordinates::new(1.0, 2.0))),
            Arc::new(client),
        )
    }

    fn log_in(app: &mut App) {
        type_text(app, "VISION");
        app.handle_key_event(key(KeyCode::Tab));
        type_text(app, "PROVISION");
        app.handle_key_event(key(KeyCode::Enter));
    }

    /// Advance in frame-sized steps until `done` holds
    fn advance_until(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..2000 {
            if done(app) {
                return;
            }
            app.advance(Duration::from_millis(50));
        }
        panic!("condition not reached; screen {}", app.router.screen().name());
    }

    #[tokio::test]
    async fn test_login_form_editing() {
        let mut app = app_with(MockWeatherClient::new());
        type_text(&mut app, "VISIONX");
        app.handle_key_event(key(KeyCode::Backspace));
        app.handle_key_event(key(KeyCode::Down));
        type_text(&mut app, "q");

        assert_eq!(app.login.username, "VISION");
        assert_eq!(app.login.password, "q");
        assert_eq!(app.login.focus, LoginField::Password);
        // Typing `q` into a field does not quit
        assert!(app.running);
    }

    #[tokio::test]
    async fn test_bad_login_shows_error() {
        let mut app = app_with(MockWeatherClient::new());
        type_text(&mut app, "guest");
        app.handle_key_event(key(KeyCode::Enter));
        app.advance(Duration::from_secs(2));

        match app.router.screen() {
            Screen::LoggedOut(login) => {
                assert_eq!(login.error.as_deref(), Some("Invalid credentials."))
            }
            other => panic!("unexpected screen {}", other.name()),
        }
    }

    #[tokio::test]
    async fn test_startup_cue_is_played_and_failures_swallowed() {
        let mut audio = MockAudioPlayer::new();
        audio
            .expect_play()
            .withf(|cue| *cue == Cue::Startup)
            .times(1)
            .returning(|_| Err(VisionError::Audio("no device".into())));

        let mut app = App::with_services(
            Router::default(),
            Arc::new(audio),
            Arc::new(NoLocation),
            Arc::new(MockWeatherClient::new()),
        );
        log_in(&mut app);
        assert!(app.running);
    }

    #[tokio::test]
    async fn test_full_flow_fetches_weather_and_refreshes_in_detail_view() {
        let mut client = MockWeatherClient::new();
        client.expect_current().returning(|_| Ok(record(42.0)));
        let mut app = app_with(client);

        log_in(&mut app);
        advance_until(&mut app, |app| matches!(app.router.screen(), Screen::Booting(_)));
        assert!(app.weather_loading);

        let msg = app.async_rx.recv().await.unwrap();
        app.handle_async_message(msg);
        assert_eq!(app.weather, Some(LocalWeather::Live(record(42.0))));
        assert!(!app.weather_loading);

        advance_until(&mut app, |app| app.router.widget_visible());
        app.handle_key_event(key(KeyCode::Enter));
        advance_until(&mut app, |app| matches!(app.router.screen(), Screen::DetailView));

        assert!(app.is_refreshing());
        assert_eq!(app.gauge.as_ref().map(|g| g.value()), Some(0.0));

        // The refresh loop fetches immediately on start
        let msg = app.async_rx.recv().await.unwrap();
        app.handle_async_message(msg);

        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.router.widget_visible());
        assert!(!app.is_refreshing());
        assert!(app.gauge.is_none());
    }

    #[tokio::test]
    async fn test_gauge_starts_at_rest_on_entering_detail_view() {
        let mut client = MockWeatherClient::new();
        client.expect_current().returning(|_| Ok(record(30.0)));
        let mut app = app_with(client);
        app.weather = Some(LocalWeather::Live(record(30.0)));

        log_in(&mut app);
        advance_until(&mut app, |app| app.router.widget_visible());
        app.handle_key_event(key(KeyCode::Enter));

        // One long frame finishes the tunnel
        app.advance(Duration::from_secs(10));
        assert!(matches!(app.router.screen(), Screen::DetailView));
        assert_eq!(app.gauge.as_ref().map(|g| g.value()), Some(0.0));

        app.advance(Duration::from_millis(1000));
        assert!((app.gauge.as_ref().map(|g| g.value()).unwrap() - 50.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_gauge_only_in_detail_view() {
        let mut app = app_with(MockWeatherClient::new());
        app.weather = Some(LocalWeather::Live(record(10.0)));

        // Outside the detail view no gauge is created
        app.handle_async_message(AsyncMessage::LocalWeather(LocalWeather::Live(record(20.0))));
        assert!(app.gauge.is_none());
    }

    #[tokio::test]
    async fn test_search_flow_and_stale_results() {
        let mut app = app_with(MockWeatherClient::new());
        app.search.query = Some("Paris".to_string());
        app.search.loading = true;

        app.handle_async_message(AsyncMessage::SearchCompleted {
            query: "London".to_string(),
            unit: Unit::Metric,
            result: Err("No results found".to_string()),
        });
        assert!(app.search.loading);
        assert!(app.search.result.is_none());

        app.handle_async_message(AsyncMessage::SearchCompleted {
            query: "Paris".to_string(),
            unit: Unit::Metric,
            result: Err("No results found".to_string()),
        });
        assert!(!app.search.loading);
        assert_eq!(app.search.result, Some(Err("No results found".to_string())));
    }

    #[test]
    fn test_search_tabs_cycle() {
        assert_eq!(SearchTab::Current.next(), SearchTab::Hourly);
        assert_eq!(SearchTab::Monthly.next(), SearchTab::Current);
        assert_eq!(SearchTab::Current.previous(), SearchTab::Monthly);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_login() {
        let mut app = app_with(MockWeatherClient::new());
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
