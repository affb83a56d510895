//! Syntax tree pane rendering
//!
//! Shows the same rows the listing prints, with a movable selection. When the
//! parse failed the pane shows the syntax error report instead.

use crate::listing::TreeRow;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// What the tree pane displays
pub enum TreeView<'a> {
    Rows {
        rows: &'a [TreeRow],
        selected: usize,
    },
    Error {
        report: &'a str,
    },
}

/// Keep `selected` inside the window `[offset, offset + height)`
pub fn scroll_to_selection(offset: usize, selected: usize, height: usize) -> usize {
    if selected < offset {
        selected
    } else if height > 0 && selected >= offset + height {
        selected + 1 - height
    } else {
        offset
    }
}

/// Style for the label part of a row, chosen by what the row describes
fn row_style(text: &str) -> Style {
    if text.starts_with("Function Declare") || text.starts_with("Function Call") {
        Style::default().fg(DEFAULT_THEME.function)
    } else if text.starts_with("Type : ") {
        Style::default().fg(DEFAULT_THEME.type_name)
    } else if text.starts_with("Constant") || text.starts_with("Size") {
        Style::default().fg(DEFAULT_THEME.number)
    } else if text.starts_with("Operator") || text.starts_with("Assign") {
        Style::default().fg(DEFAULT_THEME.secondary)
    } else if matches!(text, "If" | "While" | "Return Statement" | "Compound Statement") {
        Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    }
}

/// Render the syntax tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    view: TreeView<'_>,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    match view {
        TreeView::Error { report } => {
            let paragraph = Paragraph::new(report.trim_start().to_string())
                .block(block)
                .style(Style::default().fg(DEFAULT_THEME.error))
                .wrap(Wrap { trim: false });
            frame.render_widget(paragraph, area);
        }
        TreeView::Rows { rows, selected } => {
            let block = block.padding(Padding::new(1, 0, 0, 0));
            let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

            *scroll_offset = scroll_to_selection(*scroll_offset, selected, visible_height);

            let items: Vec<ListItem> = rows
                .iter()
                .enumerate()
                .skip(*scroll_offset)
                .take(visible_height)
                .map(|(idx, row)| {
                    let line = Line::from(vec![
                        Span::raw(" ".repeat(row.indent())),
                        Span::styled(row.text.clone(), row_style(&row.text)),
                    ]);
                    let item = ListItem::new(line);
                    if idx == selected {
                        item.style(
                            Style::default()
                                .bg(DEFAULT_THEME.current_line_bg)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else {
                        item
                    }
                })
                .collect();

            let list = List::new(items).block(block);
            frame.render_widget(list, area);
        }
    }
}
