use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, Frame};
use skyglass_background::BackgroundState;
use skyglass_config::{AppConfig, JsonFileStore, Paths, Settings};
use tracing::info;

use crate::dashboard::{Dashboard, Notice};
use crate::gateway::WeatherApiClient;
use crate::ui::{Mode, View};

mod dashboard;
mod debounce;
mod gateway;
mod logging;
mod ui;

/// Environment variable that overrides the stored API key.
const API_KEY_ENV: &str = "SKYGLASS_API_KEY";

/// Frame interval; also how often timers and fetch results are checked.
const FRAME_TIME: Duration = Duration::from_millis(50);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let paths = Paths::discover()?;
    logging::init(&paths.log_file)?;
    let config = AppConfig::load(&paths.config_file)?;
    let mut store = JsonFileStore::open(&paths.settings_file)?;

    if let Ok(key) = std::env::var(API_KEY_ENV)
        && !key.trim().is_empty()
    {
        let mut settings = Settings::load(&store);
        settings.api_key = Some(key.trim().to_string());
        settings.save(&mut store)?;
    }
    info!(settings = %store.path().display(), "starting skyglass");

    let gateway = Arc::new(WeatherApiClient::new(
        &config.api_base_url,
        config.request_timeout(),
        config.forecast_days,
    ));
    let dashboard = Dashboard::new(store, gateway, &config);

    let terminal = ratatui::init();
    let result = App::new(dashboard).run(terminal);
    ratatui::restore();
    result
}

type AppDashboard = Dashboard<JsonFileStore, WeatherApiClient>;

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    dashboard: AppDashboard,
    background: BackgroundState,
    view: View,
    /// Last notice seen, so the key prompt opens once per new notice.
    last_notice: Option<Notice>,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(dashboard: AppDashboard) -> Self {
        Self {
            running: false,
            dashboard,
            background: BackgroundState::new(),
            view: View::default(),
            last_notice: None,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.dashboard.start(Instant::now());
        while self.running {
            self.dashboard.drain_events();
            self.dashboard.tick(Instant::now());
            self.open_key_prompt_on_notice();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        info!("shutting down");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        ui::render(
            frame,
            &self.dashboard,
            &mut self.background,
            &self.view,
            elapsed_ms,
        );
    }

    fn open_key_prompt_on_notice(&mut self) {
        let notice = self.dashboard.notice();
        if notice == self.last_notice.as_ref() {
            return;
        }
        if notice.is_some_and(Notice::wants_api_key) && self.view.mode == Mode::Browse {
            self.view.key_input.clear();
            self.view.mode = Mode::ApiKey;
        }
        self.last_notice = notice.cloned();
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_TIME)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        if key.modifiers == KeyModifiers::CONTROL
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }
        match self.view.mode {
            Mode::Browse => self.on_browse_key(key),
            Mode::Search => self.on_search_key(key),
            Mode::ApiKey => self.on_key_prompt_key(key),
        }
    }

    fn on_browse_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        let favorites = self.dashboard.settings().favorites.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Char('r') => self.dashboard.refresh(now),
            KeyCode::Char('l') => self.dashboard.locate(now),
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.view.suggestion = 0;
                self.view.mode = Mode::Search;
            }
            KeyCode::Char('k') => {
                self.view.key_input.clear();
                self.view.mode = Mode::ApiKey;
            }
            KeyCode::Char('d') => self.dashboard.toggle_dark_mode(),
            KeyCode::Char('e') => self.dashboard.toggle_effects(),
            KeyCode::Char('m') => self.dashboard.toggle_theme_mode(),
            KeyCode::Char('t') => self.dashboard.cycle_manual_theme(),
            KeyCode::Char('f') => {
                self.dashboard.add_current_favorite();
            }
            KeyCode::Char('x') => {
                if let Some(fav) = self.dashboard.settings().favorites.get(self.view.favorite) {
                    let fav = fav.clone();
                    self.dashboard.remove_favorite(&fav);
                    let remaining = self.dashboard.settings().favorites.len();
                    self.view.favorite = self.view.favorite.min(remaining.saturating_sub(1));
                }
            }
            KeyCode::Up => self.view.favorite = self.view.favorite.saturating_sub(1),
            KeyCode::Down if self.view.favorite + 1 < favorites => self.view.favorite += 1,
            KeyCode::Enter => {
                self.dashboard.select_favorite(self.view.favorite, now);
            }
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        let now = Instant::now();
        let mut query = self.dashboard.query().to_string();
        match key.code {
            KeyCode::Esc => {
                self.dashboard.set_query("", now);
                self.view.mode = Mode::Browse;
            }
            KeyCode::Enter => {
                if let Some(location) = self.dashboard.suggestions().get(self.view.suggestion) {
                    let location = location.clone();
                    self.dashboard.select_location(location, now);
                    self.view.mode = Mode::Browse;
                }
            }
            KeyCode::Up => self.view.suggestion = self.view.suggestion.saturating_sub(1),
            KeyCode::Down if self.view.suggestion + 1 < self.dashboard.suggestions().len() => {
                self.view.suggestion += 1;
            }
            KeyCode::Backspace => {
                query.pop();
                self.view.suggestion = 0;
                self.dashboard.set_query(&query, now);
            }
            KeyCode::Char(c) => {
                query.push(c);
                self.view.suggestion = 0;
                self.dashboard.set_query(&query, now);
            }
            _ => {}
        }
    }

    fn on_key_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.view.key_input.clear();
                self.view.mode = Mode::Browse;
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.view.key_input);
                self.view.mode = Mode::Browse;
                self.dashboard.set_api_key(&input, Instant::now());
            }
            KeyCode::Backspace => {
                self.view.key_input.pop();
            }
            KeyCode::Char(c) => self.view.key_input.push(c),
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
