//! Dashboard state and the actions that change it.
//!
//! [`Dashboard`] is the single owner of everything on screen. Network calls
//! run on worker threads and report back over a channel; their results are
//! applied in [`Dashboard::drain_events`] on the UI thread, so nothing here
//! needs a lock. After every mutation that can change the background the
//! theme is resolved again and handed to the layer state machine.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use skyglass_background::{
    BackgroundLayers, Resolution, ThemeInputs, WeatherEffect, resolve_theme, select_effect,
};
use skyglass_config::{AppConfig, Settings, SettingsStore};
use skyglass_core::{Location, THEMES, Theme, ThemeMode, WeatherSnapshot};
use tracing::{debug, info, warn};

use crate::debounce::{QueryInput, SearchDebounce};
use crate::gateway::{GatewayError, WeatherGateway};

/// Banner shown above the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No API key has been configured yet.
    Welcome,
    /// The provider rejected the configured key.
    InvalidKey,
    /// Any other fetch failure, with the provider's message.
    Connection(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Welcome => "Welcome! Please configure your Weather API key in the settings.",
            Notice::InvalidKey => "Invalid or expired API key. Please check your settings.",
            Notice::Connection(message) => message,
        }
    }

    /// Whether the key prompt should open for this notice.
    pub fn wants_api_key(&self) -> bool {
        matches!(self, Notice::Welcome | Notice::InvalidKey)
    }
}

/// A snapshot together with the location it was requested for.
#[derive(Debug)]
struct Fetched {
    location: Location,
    snapshot: WeatherSnapshot,
}

/// Results delivered from worker threads, tagged with the request sequence.
#[derive(Debug)]
enum GatewayEvent {
    Weather {
        seq: u64,
        result: Result<Fetched, GatewayError>,
    },
    Suggestions {
        seq: u64,
        results: Vec<Location>,
    },
}

pub struct Dashboard<S, G> {
    store: S,
    gateway: Arc<G>,
    settings: Settings,
    location: Location,
    snapshot: Option<WeatherSnapshot>,
    /// Location the snapshot was requested for.
    shown: Option<Location>,
    notice: Option<Notice>,
    loading: bool,
    layers: BackgroundLayers,
    dark_text: bool,
    query: String,
    suggestions: Vec<Location>,
    searching: bool,
    debounce: SearchDebounce,
    refresh_interval: Duration,
    next_refresh: Option<Instant>,
    /// Sequence of the latest weather request; older responses are dropped.
    weather_seq: u64,
    /// Sequence of the latest search request.
    search_seq: u64,
    events_tx: Sender<GatewayEvent>,
    events_rx: Receiver<GatewayEvent>,
}

impl<S, G> Dashboard<S, G>
where
    S: SettingsStore,
    G: WeatherGateway + 'static,
{
    /// Build a dashboard from persisted settings. Nothing is fetched until [`start`](Self::start).
    pub fn new(store: S, gateway: Arc<G>, config: &AppConfig) -> Self {
        let settings = Settings::load(&store);
        let initial = resolve_theme(&ThemeInputs {
            mode: settings.theme_mode,
            manual_theme: settings.manual_theme,
            dark_mode: settings.dark_mode,
            snapshot: None,
        });
        let (events_tx, events_rx) = mpsc::channel();

        Self {
            store,
            gateway,
            settings,
            location: config.default_location.clone(),
            snapshot: None,
            shown: None,
            notice: None,
            loading: false,
            layers: BackgroundLayers::new(initial.background),
            dark_text: initial.dark_text,
            query: String::new(),
            suggestions: Vec::new(),
            searching: false,
            debounce: SearchDebounce::new(config.search_debounce()),
            refresh_interval: config.refresh_interval(),
            next_refresh: None,
            weather_seq: 0,
            search_seq: 0,
            events_tx,
            events_rx,
        }
    }

    /// Fetch the initial location, or ask for a key if there is none.
    pub fn start(&mut self, now: Instant) {
        self.refresh(now);
    }

    /// Request fresh weather for the current location.
    pub fn refresh(&mut self, now: Instant) {
        let location = self.location.clone();
        info!(location = %location.name, "refreshing weather");
        self.request_weather(now, move |gateway, api_key| {
            let snapshot = gateway.fetch(&location, api_key)?;
            Ok(Fetched { location, snapshot })
        });
    }

    /// Find this machine's location by IP and switch to it once its weather arrives.
    pub fn locate(&mut self, now: Instant) {
        info!("locating by IP");
        self.request_weather(now, |gateway, api_key| {
            let location = gateway.locate(api_key)?;
            let snapshot = gateway.fetch(&location, api_key)?;
            Ok(Fetched { location, snapshot })
        });
    }

    /// Run `job` on a worker thread as the latest weather request.
    fn request_weather<F>(&mut self, now: Instant, job: F)
    where
        F: FnOnce(&G, &str) -> Result<Fetched, GatewayError> + Send + 'static,
    {
        let Some(api_key) = self.settings.api_key.clone() else {
            self.loading = false;
            self.notice = Some(Notice::Welcome);
            return;
        };

        self.weather_seq += 1;
        let seq = self.weather_seq;
        self.loading = true;
        self.notice = None;
        self.next_refresh = Some(now + self.refresh_interval);

        let gateway = Arc::clone(&self.gateway);
        let tx = self.events_tx.clone();
        debug!(seq, "weather request sent");

        thread::spawn(move || {
            let result = job(gateway.as_ref(), api_key.as_str());
            // A closed channel means the dashboard is gone.
            let _ = tx.send(GatewayEvent::Weather { seq, result });
        });
    }

    /// Run timers: auto-refresh and the search debounce.
    pub fn tick(&mut self, now: Instant) {
        if self.settings.api_key.is_some() && self.next_refresh.is_some_and(|due| now >= due) {
            debug!("auto-refresh due");
            self.refresh(now);
        }
        if let Some(query) = self.debounce.poll(now) {
            self.search(query);
        }
    }

    /// Apply every result that has arrived. Returns whether anything did.
    pub fn drain_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            changed = true;
        }
        changed
    }

    fn handle_event(&mut self, event: GatewayEvent) {
        match event {
            GatewayEvent::Weather { seq, .. } if seq != self.weather_seq => {
                debug!(seq, latest = self.weather_seq, "dropping stale weather response");
            }
            GatewayEvent::Weather { result, .. } => {
                self.loading = false;
                match result {
                    Ok(Fetched { location, snapshot }) => {
                        info!(
                            location = %snapshot.location.name,
                            condition = %snapshot.current.condition,
                            "weather updated"
                        );
                        self.location = location.clone();
                        self.shown = Some(location);
                        self.snapshot = Some(snapshot);
                        self.notice = None;
                    }
                    Err(GatewayError::Auth { status, message }) => {
                        warn!(status, %message, "API key rejected");
                        self.notice = Some(Notice::InvalidKey);
                    }
                    Err(GatewayError::Transient { message }) => {
                        warn!(%message, "weather fetch failed");
                        self.notice = Some(Notice::Connection(message));
                    }
                }
                self.apply_theme();
            }
            GatewayEvent::Suggestions { seq, .. } if seq != self.search_seq => {
                debug!(seq, latest = self.search_seq, "dropping stale suggestions");
            }
            GatewayEvent::Suggestions { results, .. } => {
                self.suggestions = results;
                self.searching = false;
            }
        }
    }

    /// Store a new API key and fetch with it. A blank key clears it.
    pub fn set_api_key(&mut self, key: &str, now: Instant) {
        let key = key.trim();
        self.settings.api_key = (!key.is_empty()).then(|| key.to_string());
        self.persist();
        info!(configured = self.settings.api_key.is_some(), "API key updated");
        self.refresh(now);
    }

    /// Update the search box. Short queries clear suggestions at once.
    pub fn set_query(&mut self, query: &str, now: Instant) {
        self.query = query.to_string();
        match self.debounce.input(query, now) {
            QueryInput::Cleared => {
                // Invalidate any search already in flight.
                self.search_seq += 1;
                self.suggestions.clear();
                self.searching = false;
            }
            QueryInput::Scheduled => {
                // Results for an earlier query would be stale once they land.
                self.search_seq += 1;
                self.searching = true;
            }
        }
    }

    fn search(&mut self, query: String) {
        let Some(api_key) = self.settings.api_key.clone() else {
            self.searching = false;
            return;
        };

        self.search_seq += 1;
        let seq = self.search_seq;
        let gateway = Arc::clone(&self.gateway);
        let tx = self.events_tx.clone();
        debug!(seq, %query, "searching locations");

        thread::spawn(move || {
            let results = gateway.search(&query, &api_key);
            let _ = tx.send(GatewayEvent::Suggestions { seq, results });
        });
    }

    /// Switch to `location` and fetch it.
    pub fn select_location(&mut self, location: Location, now: Instant) {
        info!(location = %location.name, "location selected");
        self.location = location;
        self.query.clear();
        self.suggestions.clear();
        self.searching = false;
        self.debounce.cancel();
        self.search_seq += 1;
        self.refresh(now);
    }

    /// Switch to the favorite at `index`. Returns false if there is none.
    pub fn select_favorite(&mut self, index: usize, now: Instant) -> bool {
        let Some(location) = self.settings.favorites.get(index).cloned() else {
            return false;
        };
        self.select_location(location, now);
        true
    }

    /// Save the displayed location as a favorite. Refused while the
    /// snapshot belongs to a location other than the selected one.
    pub fn add_current_favorite(&mut self) -> bool {
        let Some(snapshot) = &self.snapshot else {
            return false;
        };
        if self.is_stale() {
            debug!("not adding a favorite for a stale snapshot");
            return false;
        }
        let added = self.settings.add_favorite(snapshot.location.clone());
        if added {
            self.persist();
        }
        added
    }

    pub fn remove_favorite(&mut self, location: &Location) -> bool {
        let removed = self.settings.remove_favorite(location);
        if removed {
            self.persist();
        }
        removed
    }

    pub fn toggle_dark_mode(&mut self) {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.persist();
        self.apply_theme();
    }

    pub fn toggle_effects(&mut self) {
        self.settings.effects_enabled = !self.settings.effects_enabled;
        self.persist();
    }

    pub fn toggle_theme_mode(&mut self) {
        self.settings.theme_mode = self.settings.theme_mode.toggle();
        self.settings.ensure_manual_theme();
        self.persist();
        self.apply_theme();
    }

    /// Pin the next catalog theme. Only meaningful in manual mode.
    pub fn cycle_manual_theme(&mut self) {
        if self.settings.theme_mode != ThemeMode::Manual {
            return;
        }
        let next = self.settings.manual_theme.map_or(&THEMES[0], Theme::next);
        self.select_manual_theme(next);
    }

    pub fn select_manual_theme(&mut self, theme: &'static Theme) {
        self.settings.manual_theme = Some(theme);
        self.persist();
        self.apply_theme();
    }

    /// Resolve the theme for the current state and hand it to the layers.
    /// Returns whether the layers flipped.
    fn apply_theme(&mut self) -> bool {
        let resolution = self.resolution();
        self.dark_text = resolution.dark_text;
        self.layers.apply(resolution.background)
    }

    pub fn resolution(&self) -> Resolution {
        resolve_theme(&ThemeInputs {
            mode: self.settings.theme_mode,
            manual_theme: self.settings.manual_theme,
            dark_mode: self.settings.dark_mode,
            snapshot: self.snapshot.as_ref(),
        })
    }

    fn persist(&mut self) {
        if let Err(e) = self.settings.save(&mut self.store) {
            warn!(error = %e, "failed to save settings");
        }
    }

    /// Overlay for the current conditions, if any.
    pub fn effect(&self) -> Option<WeatherEffect> {
        let current = &self.snapshot.as_ref()?.current;
        select_effect(&current.condition, current.is_day, self.settings.effects_enabled)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    /// Whether the snapshot on screen is for a different location than the
    /// selected one, e.g. after a failed switch.
    pub fn is_stale(&self) -> bool {
        self.shown
            .as_ref()
            .is_some_and(|shown| !shown.same_place(&self.location))
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn layers(&self) -> &BackgroundLayers {
        &self.layers
    }

    pub fn dark_text(&self) -> bool {
        self.dark_text
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[Location] {
        &self.suggestions
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }
}
