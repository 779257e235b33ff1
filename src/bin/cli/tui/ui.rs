use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::app_state::TuiState;
use super::{card_widget, status_bar};

const HELP: &[(&str, &str)] = &[
    ("Space / Enter", "Flip the card"),
    ("\u{2190} / h", "Previous card"),
    ("\u{2192} / l", "Next card"),
    ("k", "I know this word"),
    ("u", "I don't know this word"),
    ("r", "Review unknown words (when complete)"),
    ("n", "Start over (when complete)"),
    ("q / Esc", "Quit"),
];

pub fn draw(f: &mut Frame, state: &TuiState) {
    let size = f.area();

    // Progress gauge + card + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    status_bar::draw_progress(f, outer[0], state);
    card_widget::draw(f, outer[1], state);
    status_bar::draw(f, outer[2], state);

    if state.show_help {
        draw_help(f, size);
    }
}

fn draw_help(f: &mut Frame, size: Rect) {
    let width = 52.min(size.width);
    let height = (HELP.len() as u16 + 2).min(size.height);
    let area = Rect::new(
        size.x + (size.width - width) / 2,
        size.y + (size.height - height) / 2,
        width,
        height,
    );

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!(" {:<15}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(
        Block::default()
            .title(" Keys ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(Clear, area);
    f.render_widget(help, area);
}
