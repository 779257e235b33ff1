use anyhow::{Context, Result};

use crate::app::App;
use crate::render::terminal::{truncate, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let groups = app.list_groups()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&groups)?);
        }
        OutputFormat::Plain => {
            if groups.is_empty() {
                println!("No groups yet. Create one with `wordbook-cli group-new <name>`.");
                return Ok(());
            }

            let name_w = groups
                .iter()
                .map(|g| g.group.name.chars().count())
                .max()
                .unwrap_or(5)
                .clamp(5, 40);

            println!("{:<name_w$} {:>5}  Updated", "Group", "Words", name_w = name_w);
            println!(
                "{} {}  {}",
                "\u{2500}".repeat(name_w),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(16)
            );

            for summary in &groups {
                let name = truncate(&summary.group.name, name_w);
                let name = if use_color {
                    format!("{}{:<name_w$}{}", Color::BOLD, name, Color::RESET, name_w = name_w)
                } else {
                    format!("{:<name_w$}", name, name_w = name_w)
                };
                println!(
                    "{} {:>5}  {}",
                    name,
                    summary.word_count,
                    summary.group.updated_at.format("%Y-%m-%d %H:%M")
                );
            }

            println!("\n{} groups", groups.len());
        }
    }

    Ok(())
}

pub fn run_new(app: &App, name: &str, format: &OutputFormat) -> Result<()> {
    let group = app
        .storage
        .create_group(name)
        .context("Failed to create group")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&group)?),
        OutputFormat::Plain => println!("Created group '{}'", group.name),
    }
    Ok(())
}

pub fn run_rename(
    app: &App,
    group_name: &str,
    new_name: &str,
    format: &OutputFormat,
) -> Result<()> {
    let group = app.find_group(group_name)?;
    let renamed = app
        .storage
        .rename_group(group.id, new_name)
        .context("Failed to rename group")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&renamed)?),
        OutputFormat::Plain => println!("Renamed '{}' to '{}'", group.name, renamed.name),
    }
    Ok(())
}

pub fn run_delete(app: &App, group_name: &str) -> Result<()> {
    let group = app.find_group(group_name)?;
    app.storage
        .delete_group(group.id)
        .context("Failed to delete group")?;
    println!("Deleted group '{}'", group.name);
    Ok(())
}
