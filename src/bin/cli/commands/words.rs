use anyhow::{Context, Result};

use crate::app::App;
use crate::commands::search::fetch_word;
use crate::render::terminal::{truncate, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, group_name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let group = app.find_group(group_name)?;
    let words = app.group_words(group.id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&words)?);
        }
        OutputFormat::Plain => {
            if words.is_empty() {
                println!("Group '{}' has no words.", group.name);
                return Ok(());
            }

            let word_w = words
                .iter()
                .map(|w| w.word.word.chars().count())
                .max()
                .unwrap_or(4)
                .clamp(4, 24);

            for entry in &words {
                let word = format!("{:<word_w$}", entry.word.word, word_w = word_w);
                let word = if use_color {
                    format!("{}{}{}", Color::BOLD, word, Color::RESET)
                } else {
                    word
                };
                let phonetic = if entry.word.phonetic_us.is_empty() {
                    &entry.word.phonetic_uk
                } else {
                    &entry.word.phonetic_us
                };
                println!(
                    "{} {:<20} {}",
                    word,
                    truncate(phonetic, 20),
                    truncate(&entry.word.meaning, 60)
                );
            }

            println!("\n{} words in '{}'", words.len(), group.name);
        }
    }

    Ok(())
}

pub fn run_add(app: &App, word: &str, group_name: &str) -> Result<()> {
    let group = app.find_group(group_name)?;
    let word = fetch_word(app, word)?;
    app.storage
        .add_word_to_group(word.id, group.id)
        .context("Failed to add word to group")?;
    println!("Added '{}' to '{}'", word.word, group.name);
    Ok(())
}

pub fn run_remove(app: &App, word: &str, group_name: &str) -> Result<()> {
    let group = app.find_group(group_name)?;
    let entry = app.find_group_word(&group, word)?;
    app.storage
        .remove_word_from_group(group.id, entry.word_group_id)
        .context("Failed to remove word from group")?;
    println!("Removed '{}' from '{}'", entry.word.word, group.name);
    Ok(())
}
