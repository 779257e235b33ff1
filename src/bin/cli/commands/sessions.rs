use std::collections::HashMap;

use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, limit: usize, format: &OutputFormat) -> Result<()> {
    let sessions = app.recent_sessions(limit)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
        OutputFormat::Plain => {
            if sessions.is_empty() {
                println!("No review sessions yet.");
                return Ok(());
            }

            let group_names: HashMap<_, _> = app
                .list_groups()?
                .into_iter()
                .map(|summary| (summary.group.id, summary.group.name))
                .collect();

            println!(
                "{:<16}  {:<20} {:>5} {:>5} {:>7}",
                "Date", "Group", "Total", "Known", "Unknown"
            );
            println!(
                "{}  {} {} {} {}",
                "\u{2500}".repeat(16),
                "\u{2500}".repeat(20),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(7)
            );

            for session in &sessions {
                let group = session
                    .group_id
                    .and_then(|id| group_names.get(&id).cloned())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<16}  {:<20} {:>5} {:>5} {:>7}",
                    session.created_at.format("%Y-%m-%d %H:%M"),
                    crate::render::terminal::truncate(&group, 20),
                    session.total_words,
                    session.known_words,
                    session.unknown_words
                );
            }
        }
    }

    Ok(())
}
