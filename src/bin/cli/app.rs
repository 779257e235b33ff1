use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use uuid::Uuid;

use wordbook_lib::dictionary::DictionaryClient;
use wordbook_lib::review::{BackgroundSink, HttpSink, StorageSink};
use wordbook_lib::storage::{FileStorage, FlashcardSession, Group, GroupSummary, GroupWord};
use wordbook_lib::Config;

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub storage: FileStorage,
}

impl App {
    /// Load config and open the word store
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::load(config_path).context("Failed to load config")?;
        if let Some(dir) = data_dir {
            config.data_dir = Some(dir);
        }

        let data_dir = config.data_dir().context("Failed to get data directory")?;
        let storage = FileStorage::new(data_dir);
        storage.init().context("Failed to initialize storage")?;

        Ok(Self { config, storage })
    }

    /// A separate handle on the same store, for code that needs shared access
    pub fn shared_storage(&self) -> Arc<Mutex<FileStorage>> {
        Arc::new(Mutex::new(FileStorage::new(
            self.storage.base_path().to_path_buf(),
        )))
    }

    pub fn dictionary(&self) -> Result<DictionaryClient> {
        DictionaryClient::new(
            &self.config.dictionary.base_url,
            self.config.dictionary.timeout(),
        )
        .context("Failed to create dictionary client")
    }

    /// Where completed review sessions go: the configured server, else the local store
    pub fn session_sink(&self, group_id: Uuid) -> Result<Arc<BackgroundSink>> {
        let sink = match &self.config.review.sessions_url {
            Some(url) => {
                let sink = HttpSink::new(url.clone(), Some(group_id))
                    .context("Failed to create session upload client")?;
                BackgroundSink::new(sink)
            }
            None => BackgroundSink::new(StorageSink::new(self.shared_storage(), Some(group_id))),
        };
        Ok(Arc::new(sink))
    }

    pub fn list_groups(&self) -> Result<Vec<GroupSummary>> {
        self.storage.list_groups().context("Failed to list groups")
    }

    /// Find a group by name (case-insensitive prefix match)
    pub fn find_group(&self, name: &str) -> Result<Group> {
        let groups: Vec<Group> = self
            .list_groups()?
            .into_iter()
            .map(|summary| summary.group)
            .collect();
        pick_group(groups, name)
    }

    pub fn group_words(&self, group_id: Uuid) -> Result<Vec<GroupWord>> {
        self.storage
            .group_words(group_id)
            .context("Failed to list group words")
    }

    /// Find a word in a group by exact spelling (case-insensitive)
    pub fn find_group_word(&self, group: &Group, word: &str) -> Result<GroupWord> {
        let needle = word.trim().to_lowercase();
        self.group_words(group.id)?
            .into_iter()
            .find(|entry| entry.word.word == needle)
            .with_context(|| format!("'{}' is not in group '{}'", word, group.name))
    }

    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<FlashcardSession>> {
        self.storage
            .recent_sessions(limit)
            .context("Failed to list sessions")
    }
}

/// Exact match first, then a unique prefix match
fn pick_group(groups: Vec<Group>, name: &str) -> Result<Group> {
    let name_lower = name.trim().to_lowercase();

    if let Some(group) = groups.iter().find(|g| g.name.to_lowercase() == name_lower) {
        return Ok(group.clone());
    }

    let matches: Vec<&Group> = groups
        .iter()
        .filter(|g| g.name.to_lowercase().starts_with(&name_lower))
        .collect();

    match matches.len() {
        0 => bail!(
            "No group matching '{}'. Available groups:\n{}",
            name,
            groups
                .iter()
                .map(|g| format!("  - {}", g.name))
                .collect::<Vec<_>>()
                .join("\n")
        ),
        1 => Ok(matches[0].clone()),
        _ => bail!(
            "Ambiguous group name '{}'. Matches:\n{}",
            name,
            matches
                .iter()
                .map(|g| format!("  - {}", g.name))
                .collect::<Vec<_>>()
                .join("\n")
        ),
    }
}
