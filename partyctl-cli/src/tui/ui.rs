//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use partyctl_core::PartyMember;

use super::app::{App, Mode};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
/// Success color
const SUCCESS: Color = Color::Green;
/// Validation error color
const ERROR: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // Content area
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Party list
            Constraint::Percentage(65), // Member detail
        ])
        .split(rows[0]);

    render_party_list(frame, app, columns[0]);
    render_member_detail(frame, app, columns[1]);
    render_status_bar(frame, app, rows[1]);

    if app.help_text.is_some() {
        render_help_overlay(frame, app);
    }
}

/// Render the numbered party list
fn render_party_list(frame: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.mode == Mode::Normal;

    let block = Block::default()
        .title(format!(" My Party ({}) ", app.view.members().len()))
        .title_style(if is_focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SECONDARY)
        })
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(SECONDARY)
        });

    if app.view.members().is_empty() {
        let placeholder = ListItem::new(Line::from(Span::styled(
            "  No Pokémon in party",
            Style::default().fg(DIM),
        )));
        frame.render_widget(List::new(vec![placeholder]).block(block), area);
        return;
    }

    let visible_height = block.inner(area).height as usize;
    let scroll_offset = app
        .selected_index
        .saturating_sub(visible_height.saturating_sub(1));

    let items: Vec<ListItem> = app
        .view
        .members()
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(visible_height)
        .map(|(idx, member)| {
            let is_selected = idx == app.selected_index;
            let mut markers = String::new();
            if app.view.name_editing() == Some(&member.id) {
                markers.push_str(" ✎");
            }
            if app.view.moves_editing() == Some(&member.id) {
                markers.push_str(" ☰");
            }

            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(Span::styled(
                format!("{:>2}. {}{}", idx + 1, member.name, markers),
                style,
            )))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Render the selected member: name, artwork, moves
fn render_member_detail(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Member ")
        .title_style(Style::default().fg(SECONDARY))
        .borders(Borders::ALL)
        .border_style(if app.mode == Mode::Normal {
            Style::default().fg(SECONDARY)
        } else {
            Style::default().fg(HIGHLIGHT)
        });

    let Some(member) = app.selected_member() else {
        let paragraph = Paragraph::new(Span::styled("Nothing selected", Style::default().fg(DIM)))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = Vec::new();
    lines.push(name_line(app, member));
    lines.push(Line::from(vec![
        Span::styled("Art   ", Style::default().fg(DIM)),
        Span::raw(member.official_artwork.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("ID    ", Style::default().fg(DIM)),
        Span::raw(member.id.to_string()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Moves",
        Style::default().add_modifier(Modifier::BOLD),
    )));

    if app.view.moves_editing() == Some(&member.id) {
        lines.extend(checklist_lines(app, member));
    } else {
        lines.extend(
            member
                .displayed_moves()
                .iter()
                .map(|m| Line::from(format!("  • {}", m))),
        );
    }

    if let Some(msg) = app.view.error_message() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            msg.to_string(),
            Style::default().fg(ERROR).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn name_line<'a>(app: &'a App, member: &'a PartyMember) -> Line<'a> {
    let label = Span::styled("Name  ", Style::default().fg(DIM));

    if app.view.name_editing() == Some(&member.id) {
        let style = if app.mode == Mode::NameEdit {
            Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SUCCESS)
        };
        Line::from(vec![
            label,
            Span::styled(format!("{}|", app.view.name_draft()), style),
        ])
    } else {
        Line::from(vec![
            label,
            Span::styled(
                member.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])
    }
}

fn checklist_lines<'a>(app: &'a App, member: &'a PartyMember) -> Vec<Line<'a>> {
    member
        .learnable_moves
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            let checked = app.view.is_move_checked(&member.id, m);
            let locked = app.view.is_move_locked(&member.id, m);
            let mark = if checked {
                "[x]"
            } else if locked {
                "[-]"
            } else {
                "[ ]"
            };

            let mut style = if locked {
                Style::default().fg(DIM)
            } else {
                Style::default()
            };
            if app.mode == Mode::MoveEdit && idx == app.move_cursor {
                style = style.fg(Color::Black).bg(HIGHLIGHT);
            }

            Line::from(Span::styled(format!("  {} {}", mark, m), style))
        })
        .collect()
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_indicator = match app.mode {
        Mode::Normal => Span::styled(" PARTY ", Style::default().bg(ACCENT).fg(Color::Black)),
        Mode::NameEdit => Span::styled(" NAME ", Style::default().bg(SUCCESS).fg(Color::Black)),
        Mode::MoveEdit => Span::styled(" MOVES ", Style::default().bg(HIGHLIGHT).fg(Color::Black)),
    };

    let help_text = match app.mode {
        Mode::Normal => "j/k:nav  e:name  m:moves  d:delete  r:reload  ?:help  q:quit",
        Mode::NameEdit => "Enter:save  Esc:cancel  Tab:park",
        Mode::MoveEdit => "j/k:nav  Space:toggle  Enter:save  Esc:cancel  Tab:park",
    };

    let status = app.status_message.as_deref().unwrap_or("");

    let line = Line::from(vec![
        mode_indicator,
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
        Span::raw(" "),
        Span::styled(status, Style::default().fg(HIGHLIGHT)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if let Some(ref help_text) = app.help_text {
        let line_count = help_text.lines().count();
        let height = (line_count + 2).min(area.height.saturating_sub(2) as usize) as u16;
        let width = 60.min(area.width.saturating_sub(4));

        let popup_area = Rect {
            x: (area.width.saturating_sub(width)) / 2,
            y: (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help (press any key to close) ")
            .title_style(Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(SUCCESS));

        let paragraph = Paragraph::new(help_text.as_str())
            .block(block)
            .wrap(Wrap { trim: false })
            .style(Style::default().fg(Color::White));

        frame.render_widget(paragraph, popup_area);
    }
}
