pub mod keymap;

use std::io::{stdout, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use detgrid_engine::controller::{Action, GridController};
use detgrid_engine::matrix::MAX_SIZE;

use crate::util;
use keymap::{Command, Focus};

/// Launch options for the interactive grid.
#[derive(Debug, Clone)]
pub struct GridOptions {
    pub size: usize,
    pub seed: Option<u64>,
    pub cell_width: u16,
    pub show_help: bool,
}

struct TuiApp {
    controller: GridController,
    cursor_row: usize,
    cursor_col: usize,
    focus: Focus,
    /// Text of the size field; re-synced to the grid size after every commit
    size_text: String,
    /// Rendered width of one cell, including its padding
    cell_width: usize,
    should_quit: bool,
    show_help: bool,
}

impl TuiApp {
    fn new(controller: GridController, cell_width: u16, show_help: bool) -> Self {
        let size_text = controller.size().to_string();
        Self {
            controller,
            cursor_row: 0,
            cursor_col: 0,
            focus: Focus::Grid,
            size_text,
            cell_width: cell_width as usize,
            should_quit: false,
            show_help,
        }
    }

    fn size(&self) -> usize {
        self.controller.size()
    }

    fn focused_text(&self) -> &str {
        self.controller.grid().cell(self.cursor_row, self.cursor_col)
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            // Any key dismisses help
            self.show_help = false;
            return;
        }
        if let Some(cmd) = keymap::command_for(self.focus, key) {
            self.dispatch(cmd);
        }
    }

    fn dispatch(&mut self, cmd: Command) {
        match cmd {
            Command::Quit => self.should_quit = true,
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::MoveCursor { drow, dcol } => self.move_cursor(drow, dcol),
            Command::NextCell => self.step_cell(1),
            Command::PrevCell => self.step_cell(-1),
            Command::TypeChar(c) => {
                let text = format!("{}{}", self.focused_text(), c);
                self.input(text);
            }
            Command::Backspace => {
                let mut text = self.focused_text().to_string();
                text.pop();
                self.input(text);
            }
            Command::ClearCell => self.input(String::new()),
            Command::Evaluate => {
                self.controller.apply(Action::Evaluate);
            }
            Command::DecreaseSize => self.resize(Action::DecreaseSize),
            Command::IncreaseSize => self.resize(Action::IncreaseSize),
            Command::Randomize => {
                self.controller.apply(Action::Randomize);
            }
            Command::Reset => {
                self.controller.apply(Action::Reset);
            }
            Command::EditSize => self.focus = Focus::SizeField,
            Command::SizeChar(c) => {
                // Two digits is enough for 1..=10
                if self.size_text.len() < 2 {
                    self.size_text.push(c);
                }
            }
            Command::SizeBackspace => {
                self.size_text.pop();
            }
            Command::CommitSize => {
                match self.size_text.parse::<usize>() {
                    Ok(n) => self.resize(Action::SetSize(n)),
                    Err(_) => log::debug!("ignoring size field text {:?}", self.size_text),
                }
                self.sync_size_field();
                self.focus = Focus::Grid;
            }
            Command::CancelSize => {
                self.sync_size_field();
                self.focus = Focus::Grid;
            }
        }
    }

    fn input(&mut self, text: String) {
        self.controller.apply(Action::Input {
            row: self.cursor_row,
            col: self.cursor_col,
            text,
        });
    }

    fn resize(&mut self, action: Action) {
        if self.controller.apply(action) {
            let last = self.size() - 1;
            self.cursor_row = self.cursor_row.min(last);
            self.cursor_col = self.cursor_col.min(last);
        }
        self.sync_size_field();
    }

    fn sync_size_field(&mut self) {
        self.size_text = self.size().to_string();
    }

    fn move_cursor(&mut self, drow: i32, dcol: i32) {
        let max = self.size() as i32 - 1;
        self.cursor_row = (self.cursor_row as i32 + drow).clamp(0, max) as usize;
        self.cursor_col = (self.cursor_col as i32 + dcol).clamp(0, max) as usize;
    }

    /// Move through cells in reading order, wrapping at both ends.
    fn step_cell(&mut self, delta: i32) {
        let n = self.size() as i32;
        let total = n * n;
        let idx = (self.cursor_row as i32 * n + self.cursor_col as i32 + delta).rem_euclid(total);
        self.cursor_row = (idx / n) as usize;
        self.cursor_col = (idx % n) as usize;
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        // Grid block: header row + one line per row + borders
        let grid_height = (self.size() as u16) + 3;
        let chunks = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(grid_height),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

        self.draw_title(frame, chunks[0]);
        self.draw_controls(frame, chunks[1]);
        self.draw_grid(frame, chunks[2]);
        self.draw_result(frame, chunks[3]);
        self.draw_status(frame, chunks[5]);

        if self.show_help {
            self.draw_help(frame, area);
        }
    }

    fn draw_title(&self, frame: &mut Frame, area: Rect) {
        let n = self.size();
        let title = format!(" detgrid: {}x{} determinant ", n, n);
        let para = Paragraph::new(Line::from(vec![Span::styled(
            title,
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )]))
        .style(Style::default().bg(Color::Cyan));
        frame.render_widget(para, area);
    }

    fn draw_controls(&self, frame: &mut Frame, area: Rect) {
        let field_style = match self.focus {
            Focus::SizeField => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            Focus::Grid => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        };
        let field = match self.focus {
            Focus::SizeField => format!("[{:<2}_]", self.size_text),
            Focus::Grid => format!("[{:>2} ]", self.size_text),
        };
        let hint = Style::default().fg(Color::DarkGray);

        let spans = vec![
            Span::styled(" Size ", Style::default().fg(Color::Cyan)),
            Span::styled(field, field_style),
            Span::raw("  "),
            Span::styled("[-] [+]", Style::default().fg(Color::Cyan)),
            Span::styled("  [ ] step  s size  r random  c reset  Enter det", hint),
        ];
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn draw_grid(&self, frame: &mut Frame, area: Rect) {
        let n = self.size();
        let w = self.cell_width;
        let grid = self.controller.grid();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Matrix A ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let gutter = 3;
        let mut lines: Vec<Line> = Vec::with_capacity(n + 1);

        // Header line
        let mut header = vec![Span::raw(" ".repeat(gutter))];
        for c in 0..n {
            let style = if c == self.cursor_col && self.focus == Focus::Grid {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            };
            header.push(Span::styled(util::pad_center(&util::col_to_letter(c), w), style));
        }
        lines.push(Line::from(header));

        for r in 0..n {
            let row_style = if r == self.cursor_row && self.focus == Focus::Grid {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut spans = vec![Span::styled(format!("{:>2} ", r + 1), row_style)];

            for c in 0..n {
                let text = grid.cell(r, c);
                let focused = r == self.cursor_row && c == self.cursor_col;
                let (shown, style) = if text.is_empty() {
                    ("\u{00b7}", Style::default().fg(Color::DarkGray))
                } else {
                    (text, Style::default().fg(Color::White))
                };
                let style = if focused && self.focus == Focus::Grid {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else {
                    style
                };
                let cell = format!("{} ", util::pad_left(shown, w.saturating_sub(1)));
                spans.push(Span::styled(cell, style));
            }
            lines.push(Line::from(spans));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_result(&self, frame: &mut Frame, area: Rect) {
        let line = match self.controller.result_text() {
            Some(text) => Line::from(Span::styled(
                format!(" {}", text),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            None => Line::from(Span::styled(
                " Press Enter to compute the determinant",
                Style::default().fg(Color::DarkGray),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let label = util::cell_label(self.cursor_row, self.cursor_col);
        let text = self.focused_text();
        let value = self.controller.grid().value(self.cursor_row, self.cursor_col);

        let left = format!(" {} = {:?} \u{2192} {}", label, text, value);
        let right = match self.focus {
            Focus::SizeField => "Enter: apply size  Esc: cancel ".to_string(),
            Focus::Grid => format!("{}x{}  ?: help ", self.size(), self.size()),
        };

        let padding = (area.width as usize)
            .saturating_sub(util::display_width(&left) + util::display_width(&right));
        let status = format!("{}{:pad$}{}", left, "", right, pad = padding);

        let para = Paragraph::new(Line::from(vec![Span::styled(
            status,
            Style::default().fg(Color::Black).bg(Color::DarkGray),
        )]))
        .style(Style::default().bg(Color::DarkGray));
        frame.render_widget(para, area);
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let help_lines = [
            "",
            "  Cells",
            "  -----",
            "  arrows / hjkl     Move cursor",
            "  Tab / Shift+Tab   Next/prev cell",
            "  0-9  -            Type into cell",
            "  Backspace         Delete last char",
            "  Delete            Clear cell",
            "",
            "  Grid",
            "  ----",
            "  Enter             Compute determinant",
            "  [ / <             Shrink grid (min 2)",
            "  ] / >             Grow grid (max 10)",
            "  s                 Edit size (1-10)",
            "  r                 Randomize (-10..10)",
            "  c                 Clear all cells",
            "",
            "  General",
            "  -------",
            "  q / Esc           Quit",
            "  ?                 Toggle this help",
            "",
        ];
        let help_width: u16 = 44;
        let help_height: u16 = help_lines.len() as u16 + 2;

        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let popup = Rect::new(
            area.x + x,
            area.y + y,
            help_width.min(area.width),
            help_height.min(area.height),
        );

        let lines: Vec<Line> = help_lines
            .iter()
            .map(|s| Line::from(Span::styled(*s, Style::default().fg(Color::White))))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Keybindings ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black));

        frame.render_widget(Clear, popup);
        frame.render_widget(Paragraph::new(lines).block(block), popup);
    }
}

/// Run the interactive determinant grid until the user quits.
pub fn run(options: GridOptions) -> Result<(), String> {
    let controller = GridController::new(options.size, options.seed)
        .ok_or_else(|| format!("grid size {} is outside 1-{}", options.size, MAX_SIZE))?;
    let app = TuiApp::new(controller, options.cell_width, options.show_help);
    run_app(app)
}

fn run_app(mut app: TuiApp) -> Result<(), String> {
    terminal::enable_raw_mode()
        .map_err(|e| format!("failed to enable raw mode: {}", e))?;

    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    stdout()
        .execute(EnterAlternateScreen)
        .map_err(|e| format!("failed to enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal: Terminal<CrosstermBackend<Stdout>> =
        Terminal::new(backend).map_err(|e| format!("failed to create terminal: {}", e))?;

    event_loop(&mut app, &mut terminal)
}

fn event_loop<B: Backend>(app: &mut TuiApp, terminal: &mut Terminal<B>) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .map_err(|e| format!("draw error: {}", e))?;

        if event::poll(Duration::from_millis(100))
            .map_err(|e| format!("event poll error: {}", e))?
        {
            if let Event::Key(key) =
                event::read().map_err(|e| format!("event read error: {}", e))?
            {
                // Windows reports releases too
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::backend::TestBackend;

    fn app(size: usize) -> TuiApp {
        TuiApp::new(GridController::new(size, Some(3)).unwrap(), 5, false)
    }

    fn press(app: &mut TuiApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(app: &mut TuiApp, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn rendered(app: &TuiApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn typing_and_evaluating_two_by_two() {
        let mut a = app(2);
        for v in ["1", "2", "3", "4"] {
            type_str(&mut a, v);
            press(&mut a, KeyCode::Tab);
        }
        press(&mut a, KeyCode::Enter);
        assert_eq!(a.controller.last_result(), Some(-2));
        assert!(rendered(&a).contains("Determinant: -2"));
    }

    #[test]
    fn keystrokes_go_through_the_filter() {
        let mut a = app(3);
        type_str(&mut a, "1-23");
        assert_eq!(a.focused_text(), "-12");
        press(&mut a, KeyCode::Backspace);
        assert_eq!(a.focused_text(), "-1");
        press(&mut a, KeyCode::Delete);
        assert_eq!(a.focused_text(), "");
    }

    #[test]
    fn tab_wraps_around_the_grid() {
        let mut a = app(2);
        for _ in 0..4 {
            press(&mut a, KeyCode::Tab);
        }
        assert_eq!((a.cursor_row, a.cursor_col), (0, 0));
        press(&mut a, KeyCode::BackTab);
        assert_eq!((a.cursor_row, a.cursor_col), (1, 1));
    }

    #[test]
    fn step_controls_resize_and_clamp_cursor() {
        let mut a = app(3);
        press(&mut a, KeyCode::Right);
        press(&mut a, KeyCode::Right);
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Down);
        assert_eq!((a.cursor_row, a.cursor_col), (2, 2));

        press(&mut a, KeyCode::Char('['));
        assert_eq!(a.size(), 2);
        assert_eq!((a.cursor_row, a.cursor_col), (1, 1));
        assert_eq!(a.size_text, "2");

        press(&mut a, KeyCode::Char('['));
        assert_eq!(a.size(), 2);

        press(&mut a, KeyCode::Char(']'));
        assert_eq!(a.size(), 3);
    }

    #[test]
    fn size_field_commit_and_reject() {
        let mut a = app(3);
        press(&mut a, KeyCode::Char('s'));
        assert_eq!(a.focus, Focus::SizeField);
        press(&mut a, KeyCode::Backspace);
        type_str(&mut a, "1");
        press(&mut a, KeyCode::Enter);
        assert_eq!(a.size(), 1);
        assert_eq!(a.focus, Focus::Grid);

        // Out of range: grid unchanged, field re-synced
        press(&mut a, KeyCode::Char('s'));
        press(&mut a, KeyCode::Backspace);
        type_str(&mut a, "12");
        press(&mut a, KeyCode::Enter);
        assert_eq!(a.size(), 1);
        assert_eq!(a.size_text, "1");

        // Empty field: no-op
        press(&mut a, KeyCode::Char('s'));
        press(&mut a, KeyCode::Backspace);
        press(&mut a, KeyCode::Enter);
        assert_eq!(a.size(), 1);
    }

    #[test]
    fn size_field_escape_cancels() {
        let mut a = app(4);
        press(&mut a, KeyCode::Char('s'));
        type_str(&mut a, "9");
        press(&mut a, KeyCode::Esc);
        assert_eq!(a.size(), 4);
        assert_eq!(a.size_text, "4");
        assert!(!a.should_quit);
    }

    #[test]
    fn randomize_then_reset() {
        let mut a = app(3);
        press(&mut a, KeyCode::Char('r'));
        assert!(a.controller.grid().cell(0, 0).parse::<i64>().is_ok());
        press(&mut a, KeyCode::Char('c'));
        assert_eq!(a.controller.grid().cell(0, 0), "");
    }

    #[test]
    fn help_swallows_next_key() {
        let mut a = app(2);
        press(&mut a, KeyCode::Char('?'));
        assert!(a.show_help);
        assert!(rendered(&a).contains("Keybindings"));
        press(&mut a, KeyCode::Char('q'));
        assert!(!a.show_help);
        assert!(!a.should_quit);
        press(&mut a, KeyCode::Char('q'));
        assert!(a.should_quit);
    }

    #[test]
    fn renders_prompt_before_first_evaluation() {
        let a = app(3);
        let screen = rendered(&a);
        assert!(screen.contains("detgrid: 3x3 determinant"));
        assert!(screen.contains("Press Enter to compute"));
        assert!(screen.contains("A1 = \"\""));
    }
}
