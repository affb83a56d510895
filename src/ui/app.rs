//! Main TUI application state and logic

use crate::listing::{tree_rows, Listing, TreeRow};
use crate::parser::ast::Program;
use crate::parser::parse::ParseError;
use crate::ui::panes::{self, SourceScrollState, TreeView};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Rows moved by PageUp / PageDown
const PAGE_ROWS: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tree,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// Name shown in the status bar
    pub source_name: String,

    /// The source code being inspected
    pub source_code: String,

    /// Printed rows of the syntax tree; empty when parsing failed
    pub rows: Vec<TreeRow>,

    /// The error that ended the parse, with its listing report
    pub error: Option<(ParseError, String)>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index of the selected tree row
    pub selected_row: usize,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub tree_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app for a source file and the outcome of parsing it
    pub fn new(
        source_name: String,
        source_code: String,
        result: Result<Program, ParseError>,
    ) -> Self {
        let (rows, error, status_message) = match result {
            Ok(program) => {
                let message = format!(
                    "Parsed {} top-level declaration(s)",
                    program.declarations.len()
                );
                (tree_rows(&program.declarations), None, message)
            }
            Err(err) => {
                let mut report = Listing::default();
                report.syntax_error(&err);
                let message = format!("Syntax error at line {}", err.line());
                (Vec::new(), Some((err, report.into_string())), message)
            }
        };

        App {
            source_name,
            source_code,
            rows,
            error,
            focused_pane: FocusedPane::Tree,
            selected_row: 0,
            source_scroll: SourceScrollState::default(),
            tree_scroll: 0,
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Source line to highlight: the error line, or the line of the
    /// selected tree row
    pub fn highlighted_line(&self) -> Option<usize> {
        match &self.error {
            Some((err, _)) => Some(err.line()),
            None => self.rows.get(self.selected_row).map(|row| row.line),
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let highlighted = self.highlighted_line();
        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            highlighted,
            self.error.is_some(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        let view = match &self.error {
            Some((_, report)) => TreeView::Error { report },
            None => TreeView::Rows {
                rows: &self.rows,
                selected: self.selected_row,
            },
        };
        panes::render_tree_pane(
            frame,
            columns[1],
            view,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        let position = if self.error.is_none() && !self.rows.is_empty() {
            Some((self.selected_row + 1, self.rows.len()))
        } else {
            None
        };
        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.source_name,
            &self.status_message,
            position,
            self.error.is_some(),
        );
    }

    /// Move the tree selection, clamped to the available rows
    fn select(&mut self, row: usize) {
        self.selected_row = row.min(self.rows.len().saturating_sub(1));
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => self.select(self.selected_row.saturating_sub(1)),
                FocusedPane::Source => {
                    // Scrolling up makes the highlighted line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => self.select(self.selected_row + 1),
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
            },
            KeyCode::PageUp => self.select(self.selected_row.saturating_sub(PAGE_ROWS)),
            KeyCode::PageDown => self.select(self.selected_row + PAGE_ROWS),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(self.rows.len()),
            _ => {}
        }

        if let Some(row) = self.rows.get(self.selected_row) {
            if self.error.is_none() {
                self.status_message = format!("{} (line {})", row.text.trim_end(), row.line);
            }
        }
    }
}
