//! Terminal rendering of the dashboard.
//!
//! Widgets only set foreground colors so the animated background drawn by
//! [`BackgroundState`] shows through everywhere except the key prompt.

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
};
use skyglass_background::{BackgroundState, to_color};
use skyglass_config::SettingsStore;
use skyglass_core::{
    HourlyPoint, Pollutant, Pollutants, ThemeMode, WeatherSnapshot, classify_aqi,
    classify_pollutant, compass_direction, select_weather_icon, uv_advisory,
};

use crate::dashboard::Dashboard;
use crate::gateway::{MIN_QUERY_CHARS, WeatherGateway, radar_url};

/// Which input currently receives keystrokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browse,
    Search,
    ApiKey,
}

/// Interaction state owned by the app loop.
#[derive(Debug, Default)]
pub struct View {
    pub mode: Mode,
    /// Highlighted favorite in browse mode.
    pub favorite: usize,
    /// Highlighted suggestion in search mode.
    pub suggestion: usize,
    /// Key being typed into the prompt.
    pub key_input: String,
}

/// Foreground colors chosen for the current background.
#[derive(Debug, Clone, Copy)]
struct Palette {
    text: Color,
    muted: Color,
    accent: Color,
}

impl Palette {
    fn new(dark_text: bool) -> Self {
        if dark_text {
            Self {
                text: Color::Rgb(15, 23, 42),
                muted: Color::Rgb(71, 85, 105),
                accent: Color::Rgb(30, 64, 175),
            }
        } else {
            Self {
                text: Color::White,
                muted: Color::Rgb(203, 213, 225),
                accent: Color::Rgb(250, 204, 21),
            }
        }
    }

    fn block(&self, title: &str) -> Block<'static> {
        Block::bordered()
            .border_style(Style::new().fg(self.muted))
            .title(Line::from(format!(" {title} ")).fg(self.text).bold())
    }
}

/// Draw the whole dashboard.
pub fn render<S, G>(
    frame: &mut Frame,
    dashboard: &Dashboard<S, G>,
    background: &mut BackgroundState,
    view: &View,
    elapsed_ms: u64,
) where
    S: SettingsStore,
    G: WeatherGateway + 'static,
{
    background.render(frame, dashboard.layers(), dashboard.effect(), elapsed_ms);

    let palette = Palette::new(dashboard.dark_text());
    let notice_height = u16::from(dashboard.notice().is_some());
    let [header, notice, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(notice_height),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, header, dashboard, palette);
    if let Some(n) = dashboard.notice() {
        let line = Line::from(vec![" ⚠ ".bold().fg(palette.accent), n.message().fg(palette.text)]);
        frame.render_widget(line, notice);
    }

    let [sidebar, main] =
        Layout::horizontal([Constraint::Length(32), Constraint::Fill(1)]).areas(body);
    render_sidebar(frame, sidebar, dashboard, view, palette);

    match dashboard.snapshot() {
        Some(snapshot) => {
            let [title, panels] =
                Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(main);
            render_snapshot_title(frame, title, snapshot, dashboard.is_stale(), palette);
            render_weather(frame, panels, snapshot, dashboard.settings().dark_mode, palette);
        }
        None => {
            let text = if dashboard.is_loading() {
                "Fetching weather…"
            } else {
                "No weather data yet"
            };
            let [center] = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .areas(main);
            frame.render_widget(
                Paragraph::new(text).fg(palette.muted).alignment(Alignment::Center),
                center,
            );
        }
    }

    render_help(frame, footer, view.mode, palette);

    if view.mode == Mode::ApiKey {
        render_key_prompt(frame, &view.key_input, dashboard.dark_text());
    }
}

fn render_header<S, G>(frame: &mut Frame, area: Rect, dashboard: &Dashboard<S, G>, palette: Palette)
where
    S: SettingsStore,
    G: WeatherGateway + 'static,
{
    let settings = dashboard.settings();
    let mut spans = vec![
        " ☁ skyglass ".bold().fg(palette.accent),
        Span::from(dashboard.location().name.clone()).bold().fg(palette.text),
    ];
    if dashboard.is_loading() {
        spans.push("  ⟳ updating".fg(palette.muted));
    }
    frame.render_widget(Line::from(spans), area);

    let mut status = vec![Span::from(format!("theme: {}", settings.theme_mode.label()))];
    if let Some(theme) = settings.manual_theme
        && settings.theme_mode == ThemeMode::Manual
    {
        status.push(Span::from(format!(" ({})", theme.name)));
    }
    if settings.dark_mode {
        status.push(Span::from("  dark"));
    }
    if !settings.effects_enabled {
        status.push(Span::from("  effects off"));
    }
    status.push(Span::from(format!("  {} ", Local::now().format("%a %H:%M"))));
    frame.render_widget(
        Line::from(status).fg(palette.muted).alignment(Alignment::Right),
        area,
    );
}

fn render_sidebar<S, G>(
    frame: &mut Frame,
    area: Rect,
    dashboard: &Dashboard<S, G>,
    view: &View,
    palette: Palette,
) where
    S: SettingsStore,
    G: WeatherGateway + 'static,
{
    let [search_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

    let searching = view.mode == Mode::Search;
    let cursor = if searching { "▏" } else { "" };
    let placeholder = dashboard.query().is_empty() && !searching;
    let query = if placeholder {
        "press / to search".fg(palette.muted)
    } else {
        Span::from(format!("{}{cursor}", dashboard.query())).fg(palette.text)
    };
    let mut search_block = palette.block("Search");
    if searching {
        search_block = search_block.border_style(Style::new().fg(palette.accent));
    }
    frame.render_widget(Paragraph::new(Line::from(query)).block(search_block), search_area);

    let lines: Vec<Line> = if searching {
        let mut lines: Vec<Line> = dashboard
            .suggestions()
            .iter()
            .enumerate()
            .map(|(i, loc)| selectable(&loc.name, i == view.suggestion, palette))
            .collect();
        if dashboard.is_searching() {
            lines.push(Line::from("searching…").fg(palette.muted));
        } else if lines.is_empty() && dashboard.query().trim().chars().count() >= MIN_QUERY_CHARS {
            lines.push(Line::from("no matches").fg(palette.muted));
        }
        lines
    } else {
        dashboard
            .settings()
            .favorites
            .iter()
            .enumerate()
            .map(|(i, fav)| {
                let marker = if fav.same_place(dashboard.location()) { "● " } else { "" };
                selectable(&format!("{marker}{}", fav.name), i == view.favorite, palette)
            })
            .collect()
    };

    let title = if searching { "Suggestions" } else { "Favorites" };
    frame.render_widget(
        Paragraph::new(lines).block(palette.block(title)),
        list_area,
    );
}

fn selectable(text: &str, selected: bool, palette: Palette) -> Line<'static> {
    if selected {
        Line::from(format!("› {text}")).fg(palette.accent).bold()
    } else {
        Line::from(format!("  {text}")).fg(palette.text)
    }
}

/// Name the place the panels describe. After a failed switch that is not
/// the selected location, so say so.
fn render_snapshot_title(
    frame: &mut Frame,
    area: Rect,
    snapshot: &WeatherSnapshot,
    stale: bool,
    palette: Palette,
) {
    let mut spans = vec![Span::from(format!(" {}", snapshot.location.name)).bold().fg(palette.text)];
    if stale {
        spans.push("  (stale: showing last loaded location)".fg(palette.accent));
    }
    frame.render_widget(Line::from(spans), area);
}

fn render_weather(
    frame: &mut Frame,
    area: Rect,
    snapshot: &WeatherSnapshot,
    dark_radar: bool,
    palette: Palette,
) {
    let alerts_height = if snapshot.alerts.is_empty() {
        0
    } else {
        snapshot.alerts.len().min(3) as u16 + 2
    };
    let [top, hourly, bottom, alerts] = Layout::vertical([
        Constraint::Length(9),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(alerts_height),
    ])
    .areas(area);

    let [now_area, details_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(top);
    render_current(frame, now_area, snapshot, palette);
    render_details(frame, details_area, snapshot, dark_radar, palette);
    render_hourly(frame, hourly, snapshot, palette);

    let [daily_area, air_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(bottom);
    render_daily(frame, daily_area, snapshot, palette);
    render_air_quality(frame, air_area, snapshot, palette);

    if !snapshot.alerts.is_empty() {
        let lines: Vec<Line> = snapshot
            .alerts
            .iter()
            .take(3)
            .map(|a| Line::from(vec!["! ".bold().fg(Color::Red), Span::from(a.clone()).fg(palette.text)]))
            .collect();
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(palette.block("Alerts")),
            alerts,
        );
    }
}

fn render_current(frame: &mut Frame, area: Rect, snapshot: &WeatherSnapshot, palette: Palette) {
    let current = &snapshot.current;
    let icon = select_weather_icon(&current.condition, current.is_day);
    let lines = vec![
        Line::from(vec![
            Span::from(format!("{} ", icon.glyph())),
            Span::from(format!("{}°C", current.temp_c)).bold(),
        ])
        .fg(palette.text),
        Line::from(current.condition.clone()).fg(palette.text),
        Line::from(format!(
            "Feels like {}°C · Humidity {}%",
            current.feels_like_c, current.humidity
        ))
        .fg(palette.muted),
        Line::from(format!(
            "Sunrise {} · Sunset {}",
            snapshot.astro.sunrise, snapshot.astro.sunset
        ))
        .fg(palette.muted),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(palette.block("Now")),
        area,
    );
}

fn render_details(
    frame: &mut Frame,
    area: Rect,
    snapshot: &WeatherSnapshot,
    dark_radar: bool,
    palette: Palette,
) {
    let current = &snapshot.current;
    let lines = vec![
        Line::from(vec![
            "Wind ".fg(palette.muted),
            Span::from(format!(
                "{:.0} km/h {}",
                current.wind_kph,
                compass_direction(current.wind_degree)
            ))
            .fg(palette.text),
        ]),
        Line::from(vec![
            "UV   ".fg(palette.muted),
            Span::from(format!("{:.1} ", current.uv)).fg(palette.text),
            Span::from(uv_advisory(current.uv)).fg(palette.accent),
        ]),
        Line::from(vec![
            "Lat  ".fg(palette.muted),
            Span::from(format!(
                "{:.2}, {:.2}",
                snapshot.location.lat, snapshot.location.lon
            ))
            .fg(palette.text),
        ]),
        Line::from(vec![
            "Radar ".fg(palette.muted),
            Span::from(radar_url(&snapshot.location, dark_radar)).fg(palette.text),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(palette.block("Details")),
        area,
    );
}

fn render_hourly(frame: &mut Frame, area: Rect, snapshot: &WeatherSnapshot, palette: Palette) {
    const CELL: usize = 9;
    let inner_width = area.width.saturating_sub(2) as usize;
    let count = (inner_width / CELL).max(1);

    let cells = |f: &dyn Fn(&HourlyPoint) -> String| -> String {
        snapshot
            .hourly
            .iter()
            .take(count)
            .map(|h| format!("{:<width$}", f(h), width = CELL))
            .collect()
    };
    let lines = vec![
        Line::from(cells(&|h| h.label.clone())).fg(palette.muted),
        Line::from(cells(&|h| {
            let icon = select_weather_icon(&h.condition, h.is_day);
            format!("{} {}°", icon.glyph(), h.temp_c)
        }))
        .fg(palette.text),
        Line::from(cells(&|h| format!("☂ {}%", h.precip_chance))).fg(palette.muted),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(palette.block("Today")),
        area,
    );
}

fn render_daily(frame: &mut Frame, area: Rect, snapshot: &WeatherSnapshot, palette: Palette) {
    let lines: Vec<Line> = snapshot
        .daily
        .iter()
        .map(|day| {
            let icon = select_weather_icon(&day.condition, true);
            Line::from(vec![
                Span::from(format!("{:<10}", day.date.format("%a %m/%d").to_string())).fg(palette.muted),
                Span::from(format!("{} ", icon.glyph())),
                Span::from(format!("{:>3}° / {:>3}°  ", day.min_temp_c, day.max_temp_c))
                    .fg(palette.text),
                Span::from(day.condition.clone()).fg(palette.muted),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(palette.block("Forecast")),
        area,
    );
}

fn render_air_quality(frame: &mut Frame, area: Rect, snapshot: &WeatherSnapshot, palette: Palette) {
    let aqi = classify_aqi(snapshot.current.aqi);
    let mut lines = vec![
        Line::from(vec![
            "AQI ".fg(palette.muted),
            Span::from(aqi.label).bold().fg(to_color(aqi.color)),
        ]),
        Line::from(aqi.advisory).fg(palette.muted),
        Line::default(),
    ];

    let bar_width = area.width.saturating_sub(24).max(5) as usize;
    for kind in Pollutant::ALL {
        let value = pollutant_value(&snapshot.current.pollutants, kind);
        let info = classify_pollutant(kind, value);
        // Five bands share the bar; the band's own percent fills within its slice.
        let severity = (info.band as f64 + info.percent / 100.0) / 5.0;
        let filled = ((severity * bar_width as f64).round() as usize).min(bar_width);
        lines.push(Line::from(vec![
            Span::from(format!("{:<6}", info.name)).fg(palette.text),
            Span::from("█".repeat(filled)).fg(to_color(info.color)),
            Span::from("░".repeat(bar_width.saturating_sub(filled))).fg(palette.muted),
            Span::from(format!(" {value:>6.1}")).fg(palette.muted),
        ]));
    }
    frame.render_widget(
        Paragraph::new(lines).block(palette.block("Air quality")),
        area,
    );
}

fn pollutant_value(pollutants: &Pollutants, kind: Pollutant) -> f64 {
    match kind {
        Pollutant::Pm2_5 => pollutants.pm2_5,
        Pollutant::Ozone => pollutants.o3,
        Pollutant::NitrogenDioxide => pollutants.no2,
    }
}

fn render_help(frame: &mut Frame, area: Rect, mode: Mode, palette: Palette) {
    let keys: &[(&str, &str)] = match mode {
        Mode::Browse => &[
            ("q", "quit"),
            ("r", "refresh"),
            ("l", "my location"),
            ("/", "search"),
            ("↑↓⏎", "favorites"),
            ("f", "add fav"),
            ("x", "remove fav"),
            ("d", "dark"),
            ("e", "effects"),
            ("m", "theme mode"),
            ("t", "next theme"),
            ("k", "api key"),
        ],
        Mode::Search => &[("⏎", "select"), ("↑↓", "move"), ("esc", "cancel")],
        Mode::ApiKey => &[("⏎", "save"), ("esc", "cancel")],
    };
    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::from(*key).bold().fg(palette.accent),
                Span::from(format!(" {label}  ")).fg(palette.muted),
            ]
        })
        .collect();
    frame.render_widget(Line::from(spans).centered(), area);
}

fn render_key_prompt(frame: &mut Frame, input: &str, dark_text: bool) {
    let [row] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::horizontal([Constraint::Length(56)])
        .flex(Flex::Center)
        .areas(row);

    let (bg, fg) = if dark_text {
        (Color::Rgb(241, 245, 249), Color::Rgb(15, 23, 42))
    } else {
        (Color::Rgb(15, 23, 42), Color::White)
    };
    let masked: String = input.chars().map(|_| '•').collect();
    let lines = vec![
        Line::from("WeatherAPI.com key"),
        Line::from(format!("{masked}▏")).add_modifier(Modifier::BOLD),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).style(Style::new().bg(bg).fg(fg)).block(
            Block::bordered()
                .title(" Settings ")
                .style(Style::new().bg(bg).fg(fg)),
        ),
        area,
    );
}
