//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. The
//! same [`layout`] drives both drawing and mouse hit-testing so a click always
//! lands on the row that was drawn under it.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::{App, Focus, InputMode};
use crate::config::{BorderStyle, Settings};

/// Title and subtitle rows at the top of each pane, inside the border.
pub const HEADER_ROWS: u16 = 2;
const MIN_ROWS: usize = 5;
/// Everything that is not a list row: pane borders and headers, the progress
/// line and the help line.
const CHROME_ROWS: u16 = 2 + HEADER_ROWS + 2;

const DEFAULT_ACCENT: Color = Color::Rgb(0x00, 0xff, 0xff);
const DEFAULT_CURSOR_BG: Color = Color::Rgb(0x00, 0x55, 0x55);

const HELP: &str = "[/] search | [tab] pane | [enter] open/play | [space] pause | [,/.] seek \
                    | [-/+] volume | [n] next | [F2] add | [F3] remove | [F5] clear | [q] quit \
                    | [Q] quit & remember";

/// Colors and border shape resolved from the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub cursor_bg: Color,
    pub border: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: DEFAULT_ACCENT,
            cursor_bg: DEFAULT_CURSOR_BG,
            border: BorderType::Rounded,
        }
    }
}

impl Theme {
    /// Invalid colors fall back to their defaults one by one.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            accent: parse_hex(&settings.theme_color).unwrap_or(DEFAULT_ACCENT),
            cursor_bg: parse_hex(&settings.bg_cursor).unwrap_or(DEFAULT_CURSOR_BG),
            border: match settings.border_style {
                BorderStyle::Double => BorderType::Double,
                BorderStyle::Rounded => BorderType::Rounded,
            },
        }
    }
}

/// Parse `#RRGGBB`.
pub fn parse_hex(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// List rows per pane for a terminal `height` rows tall.
pub fn visible_rows(height: u16) -> usize {
    usize::from(height.saturating_sub(CHROME_ROWS)).max(MIN_ROWS)
}

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub browser: Rect,
    pub playlist: Rect,
    pub progress: Rect,
    pub help: Rect,
}

impl Areas {
    fn pane(&self, pane: Focus) -> Rect {
        match pane {
            Focus::Browser => self.browser,
            Focus::Playlist => self.playlist,
        }
    }

    /// Map a screen cell to `(pane, visible row)`; `None` outside the list rows.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<(Focus, usize)> {
        [Focus::Browser, Focus::Playlist].into_iter().find_map(|pane| {
            let r = self.pane(pane);
            let first = r.y + 1 + HEADER_ROWS;
            let last = (r.y + r.height).saturating_sub(1);
            let inside = column > r.x && column + 1 < r.x + r.width;
            (inside && row >= first && row < last).then(|| (pane, usize::from(row - first)))
        })
    }
}

/// Split `area` into two side-by-side panes showing `rows` list rows each,
/// then a progress line and a help line.
pub fn layout(area: Rect, rows: usize) -> Areas {
    let pane_height = u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_add(2 + HEADER_ROWS);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(pane_height),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    Areas {
        browser: panes[0],
        playlist: panes[1],
        progress: chunks[1],
        help: chunks[2],
    }
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn seconds(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or_default()
}

struct PaneView<'a> {
    title: &'a str,
    subtitle: String,
    rows: Vec<Line<'a>>,
}

fn draw_pane(frame: &mut Frame, area: Rect, view: PaneView<'_>, focused: bool, theme: &Theme) {
    let border_color = if focused { theme.accent } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border)
        .border_style(Style::default().fg(border_color));

    let mut lines = Vec::with_capacity(view.rows.len() + 2);
    lines.push(Line::styled(
        view.title,
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::styled(
        view.subtitle,
        Style::default().fg(Color::DarkGray),
    ));
    lines.extend(view.rows);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn browser_view<'a>(app: &'a App, theme: &Theme) -> PaneView<'a> {
    let cursor = app.browser_cursor;
    let focused = app.focus == Focus::Browser;
    let rows = app
        .browser
        .iter()
        .enumerate()
        .skip(cursor.offset)
        .take(app.height)
        .map(|(i, entry)| {
            let mut style = Style::default();
            if entry.is_dir {
                style = style.fg(theme.accent);
            }
            if focused && i == cursor.selected {
                style = style.bg(theme.cursor_bg).add_modifier(Modifier::BOLD);
            }
            let name = if entry.is_dir && !entry.is_parent {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            Line::styled(format!(" {name}"), style)
        })
        .collect();

    PaneView {
        title: "FILE BROWSER",
        subtitle: app.session.cwd.display().to_string(),
        rows,
    }
}

fn playlist_view<'a>(app: &'a App, theme: &Theme) -> PaneView<'a> {
    let cursor = app.playlist_cursor;
    let focused = app.focus == Focus::Playlist;
    let current = app.session.playlist.current();
    let rows = app
        .playlist_rows
        .iter()
        .enumerate()
        .skip(cursor.offset)
        .take(app.height)
        .map(|(i, row)| {
            let playing = current == Some(row.index);
            let mut style = Style::default();
            if playing {
                style = style.fg(theme.accent).add_modifier(Modifier::UNDERLINED);
            }
            if focused && i == cursor.selected {
                style = style.bg(theme.cursor_bg).add_modifier(Modifier::BOLD);
            }
            let marker = if playing { '▶' } else { ' ' };
            Line::styled(format!("{marker}{:>3}. {}", row.index + 1, row.name), style)
        })
        .collect();

    let count = app.session.playlist.len();
    PaneView {
        title: "PLAYLIST",
        subtitle: format!("{count} track{}", if count == 1 { "" } else { "s" }),
        rows,
    }
}

fn progress_line(app: &App, width: u16, theme: &Theme) -> Line<'static> {
    let position = app.position;
    let readout = format!(
        " {} / {}  VOL: {}%",
        format_mmss(seconds(position.elapsed)),
        format_mmss(seconds(position.duration)),
        app.session.volume
    );
    let bar_width = usize::from(width).saturating_sub(readout.chars().count());
    let filled = (position.ratio() * bar_width as f64).round() as usize;
    let filled = filled.min(bar_width);

    Line::from(vec![
        Span::styled("━".repeat(filled), Style::default().fg(theme.accent)),
        Span::styled(
            "─".repeat(bar_width - filled),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(readout),
    ])
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let areas = layout(frame.area(), app.height);

    draw_pane(
        frame,
        areas.browser,
        browser_view(app, theme),
        app.focus == Focus::Browser,
        theme,
    );
    draw_pane(
        frame,
        areas.playlist,
        playlist_view(app, theme),
        app.focus == Focus::Playlist,
        theme,
    );

    frame.render_widget(
        Paragraph::new(progress_line(app, areas.progress.width, theme)),
        areas.progress,
    );

    let help = match app.mode {
        InputMode::Search => Line::styled(
            format!("SEARCH: {}", app.search),
            Style::default().fg(theme.accent),
        ),
        InputMode::Normal => Line::styled(HELP, Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(help), areas.help);
}
