//! File staging store
//!
//! Three independent per-category collections of files picked for an agent
//! but not yet uploaded. Staging is local and synchronous.

use std::path::Path;

use bytes::Bytes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::domain::{AgentCapability, CapabilityFlags};
use super::error::{FormError, FormResult};

/// Resource category a staged file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// OCR / file context
    Context,
    /// File search knowledge
    Knowledge,
    /// Code interpreter files
    Code,
}

impl FileCategory {
    pub const ALL: [FileCategory; 3] = [FileCategory::Context, FileCategory::Knowledge, FileCategory::Code];

    /// Prefix of locally generated file ids
    pub fn prefix(&self) -> &'static str {
        match self {
            FileCategory::Context => "context",
            FileCategory::Knowledge => "knowledge",
            FileCategory::Code => "code",
        }
    }

    /// The capability that gates this category
    pub fn capability(&self) -> AgentCapability {
        match self {
            FileCategory::Context => AgentCapability::Ocr,
            FileCategory::Knowledge => AgentCapability::FileSearch,
            FileCategory::Code => AgentCapability::ExecuteCode,
        }
    }
}

impl std::fmt::Display for FileCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// A file as handed over by the picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub mime_type: String,
    pub data: Bytes,
}

impl RawFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime_type = mime_guess::from_path(path).first_or_octet_stream().to_string();
        Ok(Self::new(name, mime_type, data))
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// A staged attachment
#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedFile {
    pub file_id: String,
    pub file: RawFile,
    /// Display name
    pub filepath: String,
    pub mime_type: String,
    pub size: u64,
    /// Upload progress in 0..=1; staging does not track uploads so this is always 1
    pub progress: f32,
}

impl ExtendedFile {
    fn staged(file_id: String, file: RawFile) -> Self {
        Self {
            file_id,
            filepath: file.name.clone(),
            mime_type: file.mime_type.clone(),
            size: file.size(),
            progress: 1.0,
            file,
        }
    }
}

/// Generate a local file id: category prefix plus a v4 UUID
pub fn generate_file_id(category: FileCategory) -> String {
    format!("{}_{}", category.prefix(), uuid::Uuid::new_v4().simple())
}

/// Staged files for one open session
#[derive(Debug, Clone, Default)]
pub struct FileStagingStore {
    context: IndexMap<String, ExtendedFile>,
    knowledge: IndexMap<String, ExtendedFile>,
    code: IndexMap<String, ExtendedFile>,
}

impl FileStagingStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, category: FileCategory) -> &IndexMap<String, ExtendedFile> {
        match category {
            FileCategory::Context => &self.context,
            FileCategory::Knowledge => &self.knowledge,
            FileCategory::Code => &self.code,
        }
    }

    fn collection_mut(&mut self, category: FileCategory) -> &mut IndexMap<String, ExtendedFile> {
        match category {
            FileCategory::Context => &mut self.context,
            FileCategory::Knowledge => &mut self.knowledge,
            FileCategory::Code => &mut self.code,
        }
    }

    /// Stage files under `category` and return their ids.
    ///
    /// The picker's files are moved in, so the same file can be picked again.
    pub fn stage(
        &mut self,
        category: FileCategory,
        files: impl IntoIterator<Item = RawFile>,
    ) -> FormResult<Vec<String>> {
        self.stage_with(category, files, generate_file_id)
    }

    /// Stage with a custom id generator
    pub fn stage_with<F>(
        &mut self,
        category: FileCategory,
        files: impl IntoIterator<Item = RawFile>,
        mut next_id: F,
    ) -> FormResult<Vec<String>>
    where
        F: FnMut(FileCategory) -> String,
    {
        let collection = self.collection_mut(category);
        let mut staged = Vec::new();

        for file in files {
            let file_id = next_id(category);
            if collection.contains_key(&file_id) {
                tracing::warn!(%category, %file_id, "Staged file id collision");
                return Err(FormError::StagingCollision { category, file_id });
            }
            tracing::debug!(%category, %file_id, name = %file.name, "Staging file");
            collection.insert(file_id.clone(), ExtendedFile::staged(file_id.clone(), file));
            staged.push(file_id);
        }

        Ok(staged)
    }

    /// Stage only when the category's capability is enabled
    pub fn stage_checked(
        &mut self,
        category: FileCategory,
        files: impl IntoIterator<Item = RawFile>,
        flags: &CapabilityFlags,
    ) -> FormResult<Vec<String>> {
        if !flags.is_enabled(category.capability()) {
            return Err(FormError::CapabilityDisabled(category.capability()));
        }
        self.stage(category, files)
    }

    /// Remove one staged file
    pub fn remove(&mut self, category: FileCategory, file_id: &str) -> Option<ExtendedFile> {
        self.collection_mut(category).shift_remove(file_id)
    }

    pub fn get(&self, category: FileCategory, file_id: &str) -> Option<&ExtendedFile> {
        self.collection(category).get(file_id)
    }

    /// Staged files of one category, in staging order
    pub fn files(&self, category: FileCategory) -> impl Iterator<Item = &ExtendedFile> {
        self.collection(category).values()
    }

    pub fn len(&self, category: FileCategory) -> usize {
        self.collection(category).len()
    }

    pub fn is_empty(&self) -> bool {
        FileCategory::ALL.iter().all(|c| self.collection(*c).is_empty())
    }

    pub fn clear(&mut self) {
        self.context.clear();
        self.knowledge.clear();
        self.code.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::domain::{resolve, CapabilityContext};

    fn raw(name: &str) -> RawFile {
        RawFile::new(name, "text/plain", name.as_bytes().to_vec())
    }

    #[test]
    fn test_stage_builds_extended_files() {
        let mut store = FileStagingStore::new();
        let ids = store.stage(FileCategory::Knowledge, vec![raw("notes.txt")]).unwrap();
        assert_eq!(ids.len(), 1);
        assert!(ids[0].starts_with("knowledge_"));

        let staged = store.get(FileCategory::Knowledge, &ids[0]).unwrap();
        assert_eq!(staged.filepath, "notes.txt");
        assert_eq!(staged.mime_type, "text/plain");
        assert_eq!(staged.size, 9);
        assert_eq!(staged.progress, 1.0);
    }

    #[test]
    fn test_remove_middle_keeps_other_ids() {
        let mut store = FileStagingStore::new();
        let ids = store
            .stage(FileCategory::Code, vec![raw("a.py"), raw("b.py"), raw("c.py")])
            .unwrap();
        assert_eq!(store.len(FileCategory::Code), 3);

        let removed = store.remove(FileCategory::Code, &ids[1]).unwrap();
        assert_eq!(removed.filepath, "b.py");

        let remaining: Vec<&str> = store.files(FileCategory::Code).map(|f| f.file_id.as_str()).collect();
        assert_eq!(remaining, vec![ids[0].as_str(), ids[2].as_str()]);
    }

    #[test]
    fn test_categories_are_isolated() {
        let mut store = FileStagingStore::new();
        let ids = store.stage(FileCategory::Code, vec![raw("main.rs")]).unwrap();
        assert_eq!(store.len(FileCategory::Knowledge), 0);
        assert_eq!(store.len(FileCategory::Context), 0);
        assert!(store.remove(FileCategory::Knowledge, &ids[0]).is_none());
        assert_eq!(store.len(FileCategory::Code), 1);
    }

    #[test]
    fn test_collision_is_reported() {
        let mut store = FileStagingStore::new();
        let result = store.stage_with(
            FileCategory::Context,
            vec![raw("one.pdf"), raw("two.pdf")],
            |_| "context_fixed".to_string(),
        );
        match result {
            Err(FormError::StagingCollision { category, file_id }) => {
                assert_eq!(category, FileCategory::Context);
                assert_eq!(file_id, "context_fixed");
            }
            other => panic!("expected collision, got {:?}", other),
        }
        // the first file stays staged
        assert_eq!(store.len(FileCategory::Context), 1);
    }

    #[test]
    fn test_stage_checked_respects_capabilities() {
        let mut store = FileStagingStore::new();
        let flags = resolve(&CapabilityContext::from_enabled(Some(&[AgentCapability::FileSearch])));

        assert!(store.stage_checked(FileCategory::Knowledge, vec![raw("k.md")], &flags).is_ok());
        assert!(matches!(
            store.stage_checked(FileCategory::Code, vec![raw("c.py")], &flags),
            Err(FormError::CapabilityDisabled(AgentCapability::ExecuteCode))
        ));
        assert!(store.stage_checked(FileCategory::Context, vec![raw("scan.png")], &flags).is_err());
    }

    #[tokio::test]
    async fn test_from_path_guesses_mime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        tokio::fs::write(&path, b"{}").await.unwrap();

        let file = RawFile::from_path(&path).await.unwrap();
        assert_eq!(file.name, "report.json");
        assert_eq!(file.mime_type, "application/json");
        assert_eq!(file.size(), 2);
    }
}
