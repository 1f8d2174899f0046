mod form;
pub mod helpers;
mod report;

use crate::app::App;
use form::draw_form;
use helpers::hint_line;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use report::draw_outcome_modal;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title_bar(f, app, chunks[0]);
    draw_form(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);

    if let Some(outcome) = &app.outcome {
        draw_outcome_modal(f, outcome);
    }
}

fn draw_title_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            "Jira Issue Creator",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} @ {}", app.project_key, app.server_url),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let line = if app.status_message.is_empty() {
        if app.outcome.is_some() {
            hint_line(&[("[Esc]", "Close")])
        } else {
            hint_line(&[
                ("[Tab]", "Next"),
                ("[←/→]", "Type"),
                ("[Ctrl+s]", "Submit"),
                ("[Esc]", "Quit"),
            ])
        }
    } else {
        Line::from(app.status_message.as_str())
    };

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
