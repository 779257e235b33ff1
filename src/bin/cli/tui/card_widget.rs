use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use wordbook_lib::review::{Card, SessionPhase};

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let title = format!(" {} ", state.group_name);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let lines = match state.session.phase() {
        SessionPhase::Empty => empty_lines(),
        SessionPhase::Active => card_lines(state),
        SessionPhase::Complete => summary_lines(state),
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn empty_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "This group has no words yet.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Add some with `wordbook-cli add <word> <group>`.",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn card_lines(state: &TuiState) -> Vec<Line<'static>> {
    let session = &state.session;
    let Some(card) = session.browsed() else {
        return Vec::new();
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("Card {} of {}", session.cursor() + 1, session.queue().len()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    if session.is_flipped() {
        let back_text = card.back_text();
        let mut back = back_text.lines().map(String::from);
        if let Some(meaning) = back.next() {
            lines.push(Line::from(Span::styled(
                meaning,
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
        for rest in back {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                rest,
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            )));
        }
        if let Some(translation) = &card.example_translation {
            lines.push(Line::from(Span::styled(
                translation.clone(),
                Style::default().fg(Color::DarkGray),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            card.front_text(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(pos) = &card.part_of_speech {
            lines.push(Line::from(Span::styled(
                pos.clone(),
                Style::default().add_modifier(Modifier::ITALIC),
            )));
        }
        let audio = audio_lines(card);
        if !audio.is_empty() {
            lines.push(Line::from(""));
        }
        for line in audio {
            lines.push(Line::from(Span::styled(line, Style::default().fg(Color::Cyan))));
        }
    }

    if session.cursor() > 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "k/u judge the first card in the queue",
            Style::default().fg(Color::DarkGray),
        )));
    }

    lines
}

fn summary_lines(state: &TuiState) -> Vec<Line<'static>> {
    let Some(result) = state.session.result() else {
        return Vec::new();
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Review complete",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Words reviewed: {}", result.total_words)),
        Line::from(Span::styled(
            format!("Known: {}", result.known_count),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            format!("Unknown: {}", result.unknown_count),
            Style::default().fg(Color::Red),
        )),
    ];

    if !state.missed.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Words to practise:",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for card in &state.missed {
            lines.push(Line::from(format!("{}  {}", card.word, card.meaning)));
        }
    }

    lines
}

/// One line per pronunciation recording on the card
fn audio_lines(card: &Card) -> Vec<String> {
    card.audio_refs()
        .into_iter()
        .map(|(accent, url)| format!("\u{266a} {} {}", accent, url))
        .collect()
}
