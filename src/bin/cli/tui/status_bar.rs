use ratatui::prelude::*;
use ratatui::widgets::{Gauge, Paragraph};

use wordbook_lib::review::SessionPhase;

use super::app_state::TuiState;

pub fn draw_progress(f: &mut Frame, area: Rect, state: &TuiState) {
    let progress = state.session.progress();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(progress.ratio())
        .label(format!("{}/{}", progress.reviewed, progress.total));
    f.render_widget(gauge, area);
}

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let hints = match state.session.phase() {
        SessionPhase::Empty => " q: quit ",
        SessionPhase::Active => {
            " Space: flip  \u{2190}/\u{2192}: browse  k: known  u: unknown  ?: help  q: quit "
        }
        SessionPhase::Complete => " r: review unknown  n: start over  q: quit ",
    };

    let status = Paragraph::new(hints).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
