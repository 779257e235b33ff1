//! JSON file storage for words, groups and review sessions
//!
//! Directory structure:
//! ```text
//! {data_dir}/
//! ├── words.json         # Array of all looked-up words
//! ├── groups.json        # Array of study groups
//! ├── word_groups.json   # Word/group memberships
//! └── sessions.json      # Completed review sessions
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use super::models::*;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Word not found: {0}")]
    WordNotFound(Uuid),

    #[error("Group not found: {0}")]
    GroupNotFound(Uuid),

    #[error("Word is not in this group: {0}")]
    WordGroupNotFound(Uuid),

    #[error("Group name is required")]
    EmptyGroupName,

    #[error("Group with this name already exists: {0}")]
    DuplicateGroup(String),

    #[error("Word already exists: {0}")]
    DuplicateWord(String),

    #[error("Word is already in this group")]
    AlreadyInGroup,
}

impl StorageError {
    /// Whether the error names a record that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WordNotFound(_) | Self::GroupNotFound(_) | Self::WordGroupNotFound(_)
        )
    }

    /// Whether the error was caused by the caller's input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyGroupName
                | Self::DuplicateGroup(_)
                | Self::DuplicateWord(_)
                | Self::AlreadyInGroup
        )
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;

const WORDS_FILE: &str = "words.json";
const GROUPS_FILE: &str = "groups.json";
const WORD_GROUPS_FILE: &str = "word_groups.json";
const SESSIONS_FILE: &str = "sessions.json";

pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("wordbook"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize the data directory and empty collection files
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        for file in [WORDS_FILE, GROUPS_FILE, WORD_GROUPS_FILE, SESSIONS_FILE] {
            let path = self.base_path.join(file);
            if !path.exists() {
                fs::write(&path, "[]")?;
            }
        }
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.base_path.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let items: Vec<T> = serde_json::from_str(&content)?;
        Ok(items)
    }

    fn save<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        let path = self.base_path.join(file);
        fs::write(&path, serde_json::to_string_pretty(items)?)?;
        Ok(())
    }

    // ==================== Word Operations ====================

    pub fn list_words(&self) -> Result<Vec<Word>> {
        self.load(WORDS_FILE)
    }

    pub fn get_word(&self, word_id: Uuid) -> Result<Word> {
        self.list_words()?
            .into_iter()
            .find(|w| w.id == word_id)
            .ok_or(StorageError::WordNotFound(word_id))
    }

    /// Find a word by spelling, ignoring case
    pub fn find_word(&self, text: &str) -> Result<Option<Word>> {
        let needle = text.trim().to_lowercase();
        Ok(self.list_words()?.into_iter().find(|w| w.word == needle))
    }

    pub fn create_word(&self, fields: NewWord) -> Result<Word> {
        let mut words = self.list_words()?;
        let word = Word::new(fields);
        if words.iter().any(|w| w.word == word.word) {
            return Err(StorageError::DuplicateWord(word.word));
        }

        words.push(word.clone());
        self.save(WORDS_FILE, &words)?;

        log::debug!("Stored word '{}'", word.word);
        Ok(word)
    }

    // ==================== Group Operations ====================

    fn load_groups(&self) -> Result<Vec<Group>> {
        self.load(GROUPS_FILE)
    }

    fn load_word_groups(&self) -> Result<Vec<WordGroup>> {
        self.load(WORD_GROUPS_FILE)
    }

    /// List groups with their word counts, newest first
    pub fn list_groups(&self) -> Result<Vec<GroupSummary>> {
        let memberships = self.load_word_groups()?;

        let mut groups: Vec<GroupSummary> = self
            .load_groups()?
            .into_iter()
            .rev()
            .map(|group| {
                let word_count = memberships.iter().filter(|m| m.group_id == group.id).count();
                GroupSummary { group, word_count }
            })
            .collect();

        groups.sort_by(|a, b| b.group.created_at.cmp(&a.group.created_at));
        Ok(groups)
    }

    pub fn get_group(&self, group_id: Uuid) -> Result<Group> {
        self.load_groups()?
            .into_iter()
            .find(|g| g.id == group_id)
            .ok_or(StorageError::GroupNotFound(group_id))
    }

    pub fn find_group_by_name(&self, name: &str) -> Result<Option<Group>> {
        let name = name.trim();
        Ok(self.load_groups()?.into_iter().find(|g| g.name == name))
    }

    fn validate_group_name(groups: &[Group], name: &str, own_id: Option<Uuid>) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::EmptyGroupName);
        }
        if groups.iter().any(|g| g.name == name && Some(g.id) != own_id) {
            return Err(StorageError::DuplicateGroup(name.to_string()));
        }
        Ok(name.to_string())
    }

    pub fn create_group(&self, name: &str) -> Result<Group> {
        let mut groups = self.load_groups()?;
        let name = Self::validate_group_name(&groups, name, None)?;

        let group = Group::new(name);
        groups.push(group.clone());
        self.save(GROUPS_FILE, &groups)?;

        log::info!("Created group '{}'", group.name);
        Ok(group)
    }

    pub fn rename_group(&self, group_id: Uuid, name: &str) -> Result<Group> {
        let mut groups = self.load_groups()?;
        let name = Self::validate_group_name(&groups, name, Some(group_id))?;

        let group = groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(StorageError::GroupNotFound(group_id))?;
        group.name = name;
        group.updated_at = Utc::now();
        let renamed = group.clone();

        self.save(GROUPS_FILE, &groups)?;
        Ok(renamed)
    }

    /// Delete a group and its memberships. The words themselves stay.
    pub fn delete_group(&self, group_id: Uuid) -> Result<()> {
        let mut groups = self.load_groups()?;
        let before = groups.len();
        groups.retain(|g| g.id != group_id);
        if groups.len() == before {
            return Err(StorageError::GroupNotFound(group_id));
        }

        let mut memberships = self.load_word_groups()?;
        memberships.retain(|m| m.group_id != group_id);

        self.save(WORD_GROUPS_FILE, &memberships)?;
        self.save(GROUPS_FILE, &groups)?;

        log::info!("Deleted group {}", group_id);
        Ok(())
    }

    // ==================== Membership Operations ====================

    pub fn add_word_to_group(&self, word_id: Uuid, group_id: Uuid) -> Result<WordGroup> {
        self.get_word(word_id)?;
        self.get_group(group_id)?;

        let mut memberships = self.load_word_groups()?;
        if memberships
            .iter()
            .any(|m| m.word_id == word_id && m.group_id == group_id)
        {
            return Err(StorageError::AlreadyInGroup);
        }

        let membership = WordGroup::new(word_id, group_id);
        memberships.push(membership.clone());
        self.save(WORD_GROUPS_FILE, &memberships)?;

        Ok(membership)
    }

    /// Words in a group, in the order they were added
    pub fn group_words(&self, group_id: Uuid) -> Result<Vec<GroupWord>> {
        let words = self.list_words()?;

        let mut memberships: Vec<WordGroup> = self
            .load_word_groups()?
            .into_iter()
            .filter(|m| m.group_id == group_id)
            .collect();
        memberships.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let mut entries = Vec::with_capacity(memberships.len());
        for membership in memberships {
            match words.iter().find(|w| w.id == membership.word_id) {
                Some(word) => entries.push(GroupWord {
                    word: word.clone(),
                    word_group_id: membership.id,
                    added_at: membership.created_at,
                }),
                None => log::warn!(
                    "Membership {} points at missing word {}",
                    membership.id,
                    membership.word_id
                ),
            }
        }

        Ok(entries)
    }

    pub fn remove_word_from_group(&self, group_id: Uuid, word_group_id: Uuid) -> Result<()> {
        let mut memberships = self.load_word_groups()?;
        let pos = memberships
            .iter()
            .position(|m| m.id == word_group_id && m.group_id == group_id)
            .ok_or(StorageError::WordGroupNotFound(word_group_id))?;

        memberships.remove(pos);
        self.save(WORD_GROUPS_FILE, &memberships)?;
        Ok(())
    }

    // ==================== Session Operations ====================

    pub fn record_session(&self, fields: NewSession) -> Result<FlashcardSession> {
        let mut sessions: Vec<FlashcardSession> = self.load(SESSIONS_FILE)?;
        let session = FlashcardSession::new(fields);
        sessions.push(session.clone());
        self.save(SESSIONS_FILE, &sessions)?;
        Ok(session)
    }

    /// Most recent sessions first
    pub fn recent_sessions(&self, limit: usize) -> Result<Vec<FlashcardSession>> {
        let mut sessions: Vec<FlashcardSession> = self.load(SESSIONS_FILE)?;
        sessions.reverse();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        sessions.truncate(limit);
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::SessionResult;
    use tempfile::TempDir;

    fn create_test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        storage.init().unwrap();
        (storage, temp_dir)
    }

    fn new_word(text: &str) -> NewWord {
        NewWord {
            word: text.to_string(),
            meaning: format!("meaning of {}", text),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_and_find_word() {
        let (storage, _temp) = create_test_storage();

        let created = storage.create_word(new_word("Ephemeral")).unwrap();
        assert_eq!(created.word, "ephemeral");

        let found = storage.find_word("EPHEMERAL ").unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(storage.find_word("lasting").unwrap().is_none());

        let err = storage.create_word(new_word("ephemeral")).unwrap_err();
        assert!(matches!(err, StorageError::DuplicateWord(_)));
    }

    #[test]
    fn test_group_name_validation() {
        let (storage, _temp) = create_test_storage();

        let group = storage.create_group("  Travel  ").unwrap();
        assert_eq!(group.name, "Travel");

        assert!(matches!(
            storage.create_group("   ").unwrap_err(),
            StorageError::EmptyGroupName
        ));
        assert!(matches!(
            storage.create_group("Travel").unwrap_err(),
            StorageError::DuplicateGroup(_)
        ));
    }

    #[test]
    fn test_rename_group() {
        let (storage, _temp) = create_test_storage();
        let travel = storage.create_group("Travel").unwrap();
        storage.create_group("Food").unwrap();

        // Keeping its own name is allowed
        storage.rename_group(travel.id, "Travel").unwrap();

        let err = storage.rename_group(travel.id, "Food").unwrap_err();
        assert!(err.is_invalid_input());

        let renamed = storage.rename_group(travel.id, "Trips").unwrap();
        assert_eq!(renamed.name, "Trips");
        assert_eq!(storage.get_group(travel.id).unwrap().name, "Trips");

        let err = storage.rename_group(Uuid::new_v4(), "Other").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_list_groups_newest_first_with_counts() {
        let (storage, _temp) = create_test_storage();
        let first = storage.create_group("First").unwrap();
        let second = storage.create_group("Second").unwrap();
        let word = storage.create_word(new_word("apple")).unwrap();
        storage.add_word_to_group(word.id, first.id).unwrap();

        let groups = storage.list_groups().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group.id, second.id);
        assert_eq!(groups[0].word_count, 0);
        assert_eq!(groups[1].group.id, first.id);
        assert_eq!(groups[1].word_count, 1);
    }

    #[test]
    fn test_add_word_to_group_checks() {
        let (storage, _temp) = create_test_storage();
        let group = storage.create_group("Verbs").unwrap();
        let word = storage.create_word(new_word("run")).unwrap();

        storage.add_word_to_group(word.id, group.id).unwrap();
        assert!(matches!(
            storage.add_word_to_group(word.id, group.id).unwrap_err(),
            StorageError::AlreadyInGroup
        ));
        assert!(matches!(
            storage.add_word_to_group(Uuid::new_v4(), group.id).unwrap_err(),
            StorageError::WordNotFound(_)
        ));
        assert!(matches!(
            storage.add_word_to_group(word.id, Uuid::new_v4()).unwrap_err(),
            StorageError::GroupNotFound(_)
        ));
    }

    #[test]
    fn test_group_words_in_added_order() {
        let (storage, _temp) = create_test_storage();
        let group = storage.create_group("Animals").unwrap();
        for text in ["zebra", "ant", "moose"] {
            let word = storage.create_word(new_word(text)).unwrap();
            storage.add_word_to_group(word.id, group.id).unwrap();
        }

        let entries = storage.group_words(group.id).unwrap();
        let spelled: Vec<&str> = entries.iter().map(|e| e.word.word.as_str()).collect();
        assert_eq!(spelled, vec!["zebra", "ant", "moose"]);
    }

    #[test]
    fn test_remove_word_from_group() {
        let (storage, _temp) = create_test_storage();
        let group = storage.create_group("Colors").unwrap();
        let other = storage.create_group("Other").unwrap();
        let word = storage.create_word(new_word("teal")).unwrap();
        let membership = storage.add_word_to_group(word.id, group.id).unwrap();

        // Membership must belong to the group named in the request
        let err = storage
            .remove_word_from_group(other.id, membership.id)
            .unwrap_err();
        assert!(err.is_not_found());

        storage.remove_word_from_group(group.id, membership.id).unwrap();
        assert!(storage.group_words(group.id).unwrap().is_empty());
        assert!(storage.get_word(word.id).is_ok());
    }

    #[test]
    fn test_delete_group_cascades_memberships() {
        let (storage, _temp) = create_test_storage();
        let group = storage.create_group("Doomed").unwrap();
        let word = storage.create_word(new_word("fleeting")).unwrap();
        storage.add_word_to_group(word.id, group.id).unwrap();

        storage.delete_group(group.id).unwrap();

        assert!(storage.list_groups().unwrap().is_empty());
        assert!(storage.group_words(group.id).unwrap().is_empty());
        assert_eq!(storage.list_words().unwrap().len(), 1);
        assert!(storage.delete_group(group.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_recent_sessions_limit_and_order() {
        let (storage, _temp) = create_test_storage();
        for total in 1..=12 {
            storage
                .record_session(NewSession {
                    group_id: None,
                    total_words: total,
                    known_words: total,
                    unknown_words: 0,
                    created_at: None,
                })
                .unwrap();
        }

        let sessions = storage.recent_sessions(10).unwrap();
        assert_eq!(sessions.len(), 10);
        assert_eq!(sessions[0].total_words, 12);
        assert_eq!(sessions[9].total_words, 3);
    }

    #[test]
    fn test_session_keeps_finish_time() {
        let (storage, _temp) = create_test_storage();
        let result = SessionResult::new(4, 4, 2);

        let saved = storage
            .record_session(NewSession::from_result(None, &result))
            .unwrap();
        assert_eq!(saved.created_at, result.timestamp);

        let sessions = storage.recent_sessions(10).unwrap();
        assert_eq!(sessions[0].created_at, result.timestamp);
    }

    #[test]
    fn test_missing_files_read_as_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("not-yet-created"));

        assert!(storage.list_words().unwrap().is_empty());
        assert!(storage.list_groups().unwrap().is_empty());
        assert!(storage.recent_sessions(10).unwrap().is_empty());
    }
}
