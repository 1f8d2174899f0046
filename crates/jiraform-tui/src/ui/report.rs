use crate::app::Outcome;
use crate::ui::helpers::centered_rect;
use jiraform_core::models::CreationReport;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn subtask_lines(report: &CreationReport) -> Vec<Line<'_>> {
    report
        .subtasks
        .iter()
        .map(|s| {
            Line::from(vec![
                Span::styled(format!("  {}", s.key), Style::default().fg(Color::Cyan)),
                Span::raw(" - "),
                Span::raw(s.summary.as_str()),
            ])
        })
        .collect()
}

pub fn draw_outcome_modal(f: &mut Frame, outcome: &Outcome) {
    let (title, color, mut lines) = match outcome {
        Outcome::Created(report) => {
            let mut lines = vec![
                Line::from(vec![
                    Span::raw("Issue created: "),
                    Span::styled(
                        report.issue.key.as_str(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(""),
                Line::from(format!("Sub-tasks ({}):", report.subtasks.len())),
            ];
            lines.extend(subtask_lines(report));
            (" Success ", Color::Green, lines)
        }
        Outcome::Failed {
            message,
            issue_key,
            partial,
        } => {
            let mut lines = vec![Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(Color::Red),
            ))];
            if let Some(key) = issue_key {
                lines.push(Line::from(""));
                lines.push(Line::from(format!("Issue {} exists on the server.", key)));
            }
            if let Some(report) = partial {
                lines.push(Line::from(format!(
                    "Sub-tasks created before the failure ({}):",
                    report.subtasks.len()
                )));
                lines.extend(subtask_lines(report));
            }
            (" Error ", Color::Red, lines)
        }
    };

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Esc] Close",
        Style::default().fg(Color::Yellow),
    )));

    let height = (lines.len() as u16).saturating_add(2);
    let area = centered_rect(f.area(), 70, height);

    f.render_widget(Clear, area);
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(paragraph, area);
}
