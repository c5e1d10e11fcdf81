//! Terminal renderer - draws a `Frame` with ratatui on a crossterm backend
//!
//! Map coordinates grow downward; the canvas grows upward, so y is flipped.

use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Points},
        Block, Borders, List, ListItem, Paragraph,
    },
    Frame as TermFrame, Terminal,
};
use std::io::{self, Stdout};

use super::state::{GameUI, LogCategory};
use crate::simulation::frame::{Frame, WordView};
use crate::words::EntityKind;

/// Empty space around the outermost nodes (map units)
const MAP_MARGIN: f64 = 60.0;

const ROAD_COLOR: Color = Color::Rgb(0xdb, 0x56, 0x20);
const NODE_COLOR: Color = Color::Rgb(20, 20, 200);
const UNIT_COLOR: Color = Color::Rgb(185, 153, 2);
const TYPED_COLOR: Color = Color::Rgb(200, 20, 20);

pub struct TerminalUi {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    enhanced: bool,
}

impl TerminalUi {
    /// Enter raw mode and the alternate screen
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        tracing::debug!("Keyboard enhancement: {}", enhanced);

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal, enhanced })
    }

    /// Whether key release events are reported
    pub fn keyboard_enhanced(&self) -> bool {
        self.enhanced
    }

    pub fn draw(&mut self, frame: &Frame, ui: &GameUI) -> io::Result<()> {
        self.terminal.draw(|f| draw_frame(f, frame, ui))?;
        Ok(())
    }

    /// Restore the terminal
    pub fn cleanup(&mut self) -> io::Result<()> {
        if self.enhanced {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()
    }
}

fn draw_frame(f: &mut TermFrame, frame: &Frame, ui: &GameUI) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(f.size());

    let map_area = if ui.show_action_log {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(36)])
            .split(rows[0]);
        draw_log(f, cols[1], ui);
        cols[0]
    } else {
        rows[0]
    };

    draw_map(f, map_area, frame);
    draw_buffer(f, rows[1], &frame.buffer);
}

fn draw_map(f: &mut TermFrame, area: Rect, frame: &Frame) {
    let (min_x, min_y, max_x, max_y) = frame.bounds().unwrap_or((0.0, 0.0, 1.0, 1.0));
    let (min_x, min_y, max_x, max_y) = (min_x as f64, min_y as f64, max_x as f64, max_y as f64);
    let flip = move |y: f64| max_y + min_y - y;

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" tick {} ", frame.tick)),
        )
        .marker(Marker::Braille)
        .x_bounds([min_x - MAP_MARGIN, max_x + MAP_MARGIN])
        .y_bounds([min_y - MAP_MARGIN, max_y + MAP_MARGIN])
        .paint(move |ctx| {
            for edge in &frame.edges {
                ctx.draw(&CanvasLine {
                    x1: edge.from.0 as f64,
                    y1: flip(edge.from.1 as f64),
                    x2: edge.to.0 as f64,
                    y2: flip(edge.to.1 as f64),
                    color: ROAD_COLOR,
                });
            }

            let nodes: Vec<(f64, f64)> = frame
                .nodes
                .iter()
                .map(|n| (n.x as f64, flip(n.y as f64)))
                .collect();
            ctx.draw(&Points {
                coords: &nodes,
                color: NODE_COLOR,
            });

            let units: Vec<(f64, f64)> = frame
                .units
                .iter()
                .map(|u| (u.x as f64, flip(u.y as f64)))
                .collect();
            ctx.draw(&Points {
                coords: &units,
                color: UNIT_COLOR,
            });

            ctx.layer();
            for word in &frame.words {
                ctx.print(
                    word.x as f64,
                    flip(word.y as f64),
                    word_line(word, &frame.buffer),
                );
            }
        });

    f.render_widget(canvas, area);
}

/// A word label; the typed prefix is drawn over highlighted words
fn word_line(word: &WordView, buffer: &str) -> Line<'static> {
    let color = match word.kind {
        EntityKind::Node => Color::White,
        EntityKind::Edge => Color::Cyan,
    };
    let base = Style::default().fg(color);

    if word.highlighted && word.text.starts_with(buffer) {
        let (typed, rest) = word.text.split_at(buffer.len());
        Line::from(vec![
            Span::styled(
                typed.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(rest.to_string(), base),
        ])
    } else {
        Line::from(Span::styled(word.text.clone(), base))
    }
}

fn draw_buffer(f: &mut TermFrame, area: Rect, buffer: &str) {
    let line = Line::from(vec![
        Span::raw("> "),
        Span::styled(buffer.to_string(), Style::default().fg(TYPED_COLOR)),
    ]);
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" type a word | Tab: log | Esc: quit "),
    );
    f.render_widget(widget, area);
}

fn draw_log(f: &mut TermFrame, area: Rect, ui: &GameUI) {
    let items: Vec<ListItem> = ui
        .action_log
        .iter()
        .rev()
        .map(|entry| {
            let color = match entry.category {
                LogCategory::Expand => Color::Cyan,
                LogCategory::Dispatch => Color::Yellow,
                LogCategory::Arrival => Color::Green,
                LogCategory::System => Color::Red,
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>6} ", entry.tick), Style::default().fg(Color::DarkGray)),
                Span::styled(entry.message.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" log "));
    f.render_widget(list, area);
}
