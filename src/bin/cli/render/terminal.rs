use wordbook_lib::review::Card;
use wordbook_lib::storage::Word;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render a stored word as a dictionary entry
pub fn render_word(word: &Word, use_color: bool) -> String {
    let mut lines = Vec::new();

    let mut heading = paint(&word.word, Color::BOLD, use_color);
    if !word.part_of_speech.is_empty() {
        heading.push(' ');
        heading.push_str(&paint(&word.part_of_speech, Color::ITALIC, use_color));
    }
    lines.push(heading);

    let mut phonetics = Vec::new();
    if !word.phonetic_uk.is_empty() {
        phonetics.push(format!("UK {}", word.phonetic_uk));
    }
    if !word.phonetic_us.is_empty() {
        phonetics.push(format!("US {}", word.phonetic_us));
    }
    if !phonetics.is_empty() {
        lines.push(paint(&phonetics.join("  "), Color::CYAN, use_color));
    }

    let card = Card::from(word.clone());
    for (accent, url) in card.audio_refs() {
        let label = paint(&format!("{} audio", accent), Color::GRAY, use_color);
        lines.push(format!("{} {}", label, url));
    }

    lines.push(String::new());
    lines.extend(wrap_lines(&word.meaning, "  ", 80));

    if !word.example_sentence.is_empty() {
        lines.push(String::new());
        let example = format!("\"{}\"", word.example_sentence);
        for line in wrap_lines(&example, "  ", 80) {
            lines.push(paint(&line, Color::GRAY, use_color));
        }
        if !word.example_translation.is_empty() {
            for line in wrap_lines(&word.example_translation, "  ", 80) {
                lines.push(paint(&line, Color::DIM, use_color));
            }
        }
    }

    lines.join("\n")
}

/// Trim to `width` characters, ending in "..." when cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Simple word-wrapping for terminal output
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(format!("{}{}", prefix, current_line));
                current_line = word.to_string();
            }
        }
        if !current_line.is_empty() {
            lines.push(format!("{}{}", prefix, current_line));
        }
    }

    if lines.is_empty() && !text.is_empty() {
        lines.push(format!("{}{}", prefix, text));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordbook_lib::storage::NewWord;

    #[test]
    fn test_render_word_plain() {
        let word = Word::new(NewWord {
            word: "Serendipity".to_string(),
            meaning: "Luck in finding good things".to_string(),
            part_of_speech: "noun".to_string(),
            phonetic_us: "/ˌserənˈdɪpəti/".to_string(),
            audio_us: "https://audio.test/serendipity-us.mp3".to_string(),
            example_sentence: "It was pure serendipity.".to_string(),
            ..Default::default()
        });

        let out = render_word(&word, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "serendipity noun");
        assert_eq!(lines[1], "US /ˌserənˈdɪpəti/");
        assert_eq!(lines[2], "US audio https://audio.test/serendipity-us.mp3");
        assert!(out.contains("  Luck in finding good things"));
        assert!(out.contains("  \"It was pure serendipity.\""));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_wrap_lines() {
        let lines = wrap_lines("one two three four", "> ", 11);
        assert_eq!(lines, vec!["> one two", "> three", "> four"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long meaning", 10), "a very ...");
    }
}
