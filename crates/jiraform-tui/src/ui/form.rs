use crate::app::{App, FormField};
use crate::ui::helpers::focused_border_style;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let mut constraints: Vec<Constraint> = FormField::ALL
        .iter()
        .map(|_| Constraint::Length(3))
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (field, row) in FormField::ALL.iter().zip(rows.iter()) {
        match field {
            FormField::IssueType => draw_type_selector(f, app, *row),
            FormField::Submit => draw_submit_button(f, app, *row),
            _ => draw_text_field(f, app, *field, *row),
        }
    }
}

fn draw_type_selector(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focused == FormField::IssueType;
    let spans: Vec<Span> = jiraform_core::models::IssueType::ALL
        .iter()
        .flat_map(|t| {
            let style = if *t == app.issue_type {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            [Span::styled(format!(" {} ", t), style), Span::raw(" ")]
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(FormField::IssueType.label())
        .border_style(focused_border_style(is_focused));
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_text_field(f: &mut Frame, app: &App, field: FormField, area: Rect) {
    let is_focused = app.focused == field;
    let enabled = app.is_enabled(field);

    let title = if enabled {
        field.label().to_string()
    } else {
        format!("{} (Bug only)", field.label())
    };

    let text_style = if enabled {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(focused_border_style(is_focused));

    let value = app.value(field);
    f.render_widget(
        Paragraph::new(value).style(text_style).block(block),
        area,
    );

    if is_focused {
        // keep the cursor inside the borders
        let cursor_x = (area.x + 1 + value.chars().count() as u16)
            .min(area.x + area.width.saturating_sub(2));
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_submit_button(f: &mut Frame, app: &App, area: Rect) {
    let is_focused = app.focused == FormField::Submit;
    let style = if is_focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Green)
    };

    let button_area = Rect::new(area.x, area.y, area.width.min(20), area.height);
    let button = Paragraph::new(FormField::Submit.label())
        .style(style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focused_border_style(is_focused)),
        );
    f.render_widget(button, button_area);
}
