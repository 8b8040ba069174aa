use std::io::{self, Stdout, stdout};
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::Frame;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use tracing::{debug, warn};

use crate::cli::keymap::{KeyAction, Keymap, help_lines, key_hint};
use crate::cli::palette::{building_marker, die_face, group_color, player_color, space_glyph};
use crate::engine::RulesEngine;
use crate::types::ActionType;
use crate::view::{BoardFrame, CellView, UiEvent, ViewController};

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

pub struct TuiApp<E> {
    controller: ViewController<E>,
    keymap: Keymap,
    show_help: bool,
    should_quit: bool,
    board_area: Rect,
    last_error: Option<String>,
}

impl<E: RulesEngine> TuiApp<E> {
    pub fn new(controller: ViewController<E>) -> Self {
        Self {
            controller,
            keymap: Keymap::new(),
            show_help: true,
            should_quit: false,
            board_area: Rect::default(),
            last_error: None,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = loop {
            if self.should_quit {
                break Ok(());
            }

            if let Err(err) = terminal.draw(|f| self.render(f)) {
                break Err(err);
            }

            match event::poll(Duration::from_millis(50)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        let action = self.keymap.translate(
                            key,
                            self.controller.context(),
                            self.controller.bid_increments(),
                        );
                        self.apply_key_action(action);
                    }
                    Ok(Event::Mouse(mouse)) => self.handle_mouse(mouse),
                    Ok(_) => {}
                    Err(err) => break Err(err),
                },
                Ok(false) => {}
                Err(err) => break Err(err),
            }
        };

        // Always cleanup terminal state
        let _ = terminal.clear();
        let _ = disable_raw_mode();
        let _ = execute!(terminal.backend_mut(), DisableMouseCapture);
        let _ = terminal.show_cursor();

        result
    }

    fn apply_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Ui(event) => self.dispatch(event),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::ToggleHelp => self.show_help = !self.show_help,
            KeyAction::Resync => match self.controller.resync() {
                Ok(()) => self.last_error = None,
                Err(err) => {
                    warn!(%err, "resync failed");
                    self.last_error = Some(err.to_string());
                }
            },
            KeyAction::AwaitPartner | KeyAction::Nothing => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let size = self.controller.layout().size;
        if let Some((x, y)) = board_point(self.board_area, mouse.column, mouse.row, size) {
            self.dispatch(UiEvent::Click { x, y });
        }
    }

    fn dispatch(&mut self, event: UiEvent) {
        match self.controller.handle(event) {
            Ok(outcome) => {
                debug!(?event, ?outcome, "event resolved");
                self.last_error = None;
            }
            Err(err) => {
                warn!(?event, %err, "event failed");
                self.last_error = Some(err.to_string());
            }
        }
    }

    fn render(&mut self, f: &mut Frame<'_>) {
        let area = f.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(20), Constraint::Length(5)])
            .split(area);

        let main_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[0]);

        self.render_board(f, main_chunks[0]);
        self.render_right_panel(f, main_chunks[1]);
        self.render_status_bar(f, chunks[1]);
    }

    fn render_board(&mut self, f: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Board")
            .title_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        self.board_area = block.inner(area);

        let frame = self.controller.frame();
        let size = frame.size;
        let canvas = Canvas::default()
            .block(block)
            .marker(Marker::Braille)
            .x_bounds([0.0, size])
            .y_bounds([0.0, size])
            .paint(|ctx| {
                for cell in &frame.cells {
                    let color = outline_color(cell);
                    for (from, to) in cell.polygon.edges() {
                        ctx.draw(&CanvasLine {
                            x1: from.x,
                            y1: size - from.y,
                            x2: to.x,
                            y2: size - to.y,
                            color,
                        });
                    }
                }
                ctx.layer();
                let price_drop = size * 0.025;
                for cell in &frame.cells {
                    let centroid = cell.polygon.centroid();
                    ctx.print(centroid.x, size - centroid.y, cell_label(cell));
                    if let Some(price) = price_label(cell) {
                        ctx.print(centroid.x, size - centroid.y - price_drop, price);
                    }
                }
                for piece in &frame.pieces {
                    ctx.print(
                        piece.position.x,
                        size - piece.position.y,
                        Span::styled(
                            format!("{}", piece.player + 1),
                            Style::default()
                                .fg(player_color(piece.player))
                                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
                        ),
                    );
                }
            });
        f.render_widget(canvas, area);
    }

    fn render_right_panel(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Percentage(20),
                Constraint::Percentage(35),
            ])
            .split(area);

        let frame = self.controller.frame();
        self.render_game_state(f, chunks[0], frame);
        self.render_trade(f, chunks[1], frame);
        self.render_controls(f, chunks[2]);
    }

    fn render_game_state(&self, f: &mut Frame<'_>, area: Rect, frame: &BoardFrame) {
        let text = &frame.text;
        let mut lines: Vec<Line<'_>> = text
            .banners
            .iter()
            .map(|banner| {
                Line::from(Span::styled(
                    banner.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();

        lines.push(Line::from(""));
        for row in &text.funds {
            let marker = if row.controlling { "> " } else { "  " };
            let jail = if row.in_jail { " (jail)" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(
                    row.name.clone(),
                    Style::default()
                        .fg(player_color(row.player))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  ${}{jail}", row.funds)),
            ]));
        }

        if let Some((d1, d2)) = text.dice {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("Last Roll: "),
                Span::styled(
                    dice_line(d1, d2),
                    Style::default().fg(Color::Yellow),
                ),
            ]));
        }
        if let Some(auction) = &text.auction {
            lines.push(Line::from(Span::styled(
                auction.clone(),
                Style::default().fg(Color::Magenta),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Game State"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_trade(&self, f: &mut Frame<'_>, area: Rect, frame: &BoardFrame) {
        let lines: Vec<Line<'_>> = if frame.text.trade.is_empty() {
            vec![Line::from("No trade in progress.")]
        } else {
            frame
                .text
                .trade
                .iter()
                .map(|line| Line::from(line.clone()))
                .collect()
        };
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Trade"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_controls(&self, f: &mut Frame<'_>, area: Rect) {
        let enabled = self.controller.enabled();
        let mut items: Vec<ListItem<'_>> = ActionType::ALL
            .iter()
            .filter(|action| enabled.is_enabled(**action))
            .map(|action| ListItem::new(format!("[{}] {action}", key_hint(*action))))
            .collect();
        items.extend(
            enabled
                .bids
                .iter()
                .enumerate()
                .filter(|(_, bid)| bid.enabled)
                .map(|(idx, bid)| ListItem::new(format!("[{}] bid ${}", idx + 1, bid.amount))),
        );
        items.extend(
            enabled
                .trade_partners
                .iter()
                .filter(|(_, open)| *open)
                .map(|(partner, _)| {
                    ListItem::new(format!("[t{}] trade with Player {}", partner + 1, partner + 1))
                }),
        );

        let title = format!("Controls ({})", self.controller.frame().text.mode);
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::White));
        f.render_widget(list, area);
    }

    fn render_status_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let mut lines: Vec<Line<'_>> = Vec::new();
        if let Some(err) = &self.last_error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(Color::Red),
            )));
        } else if let Some(status) = self.controller.status() {
            lines.push(Line::from(Span::styled(
                status.to_string(),
                Style::default().fg(Color::LightRed),
            )));
        }
        if self.keymap.awaiting_partner() {
            lines.push(Line::from("trade with which player? (1-4)"));
        } else if self.show_help {
            lines.extend(
                help_lines(self.controller.context())
                    .iter()
                    .map(|line| Line::from(*line)),
            );
        } else {
            lines.push(Line::from("Press '?' for help"));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }
}

fn outline_color(cell: &CellView) -> Color {
    if cell.selected {
        Color::Yellow
    } else if cell.in_trade.is_some() {
        Color::Cyan
    } else {
        cell.group.map(group_color).unwrap_or(Color::White)
    }
}

fn cell_label(cell: &CellView) -> Span<'static> {
    let mut label = space_glyph(cell.cell.space()).to_string();
    label.push_str(&building_marker(cell.building_level));
    if cell.mortgaged {
        label.push('m');
    }
    let style = match cell.owner {
        Some(owner) => Style::default().fg(player_color(owner)),
        None => Style::default().fg(Color::Gray),
    };
    Span::styled(label, style)
}

fn dice_line(d1: u8, d2: u8) -> String {
    let total = u16::from(d1) + u16::from(d2);
    format!("{} {}  {d1} + {d2} = {total}", die_face(d1), die_face(d2))
}

/// Deeds show their list price, as on a printed board.
fn price_label(cell: &CellView) -> Option<Span<'static>> {
    let price = cell.price?;
    Some(Span::styled(
        format!("${price}"),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Maps a terminal cell inside the board widget to board coordinates,
/// sampling the middle of the character cell.
pub fn board_point(area: Rect, column: u16, row: u16, size: f64) -> Option<(f64, f64)> {
    if area.width == 0 || area.height == 0 {
        return None;
    }
    let inside_x = column >= area.x && column < area.x + area.width;
    let inside_y = row >= area.y && row < area.y + area.height;
    if !inside_x || !inside_y {
        return None;
    }
    let x = (f64::from(column - area.x) + 0.5) * size / f64::from(area.width);
    let y = (f64::from(row - area.y) + 0.5) * size / f64::from(area.height);
    Some((x, y))
}
