use anyhow::{Context, Result};

use wordbook_lib::dictionary::lookup_word;
use wordbook_lib::storage::Word;

use crate::app::App;
use crate::render::terminal::render_word;
use crate::OutputFormat;

/// Resolve a word from the store, falling back to the online dictionary
pub fn fetch_word(app: &App, query: &str) -> Result<Word> {
    if let Some(word) = app.storage.find_word(query)? {
        return Ok(word);
    }

    let dictionary = app.dictionary()?;
    let storage = app.shared_storage();
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let word = runtime
        .block_on(lookup_word(&storage, &dictionary, query))
        .with_context(|| format!("Failed to look up '{}'", query.trim()))?;
    Ok(word)
}

pub fn run(
    app: &App,
    query: &str,
    group_name: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    // Resolve the group first so a typo doesn't cost a dictionary request
    let group = group_name.map(|name| app.find_group(name)).transpose()?;
    let word = fetch_word(app, query)?;

    if let Some(group) = &group {
        app.storage
            .add_word_to_group(word.id, group.id)
            .context("Failed to add word to group")?;
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&word)?),
        OutputFormat::Plain => {
            println!("{}", render_word(&word, use_color));
            if let Some(group) = &group {
                println!("\nAdded to '{}'", group.name);
            }
        }
    }

    Ok(())
}
