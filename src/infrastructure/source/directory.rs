use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::domain::{ports::DocumentSource, Document, RagError};

const TEXT_EXTENSIONS: [&str; 2] = ["txt", "md"];

/// Loads plain-text documents from a directory, one document per file.
///
/// Best-effort: unreadable files are skipped with a warning, empty files
/// are skipped silently. The file name becomes the document's source
/// identifier. Files are visited in name order so ingestion is stable.
pub struct DirectorySource {
    path: PathBuf,
}

impl DirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn load(&self) -> Result<Vec<Document>, RagError> {
        let mut entries = tokio::fs::read_dir(&self.path)
            .await
            .map_err(|e| RagError::ingestion(format!("{}: {e}", self.path.display())))?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RagError::ingestion(e.to_string()))?
        {
            let path = entry.path();
            let is_text = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| TEXT_EXTENSIONS.contains(&ext));
            if is_text {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::new();
        for path in paths {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("unknown")
                .to_string();

            match tokio::fs::read_to_string(&path).await {
                Ok(content) if content.trim().is_empty() => continue,
                Ok(content) => documents.push(Document::new(name, content)),
                Err(e) => warn!(file = %name, error = %e, "skipping unreadable file"),
            }
        }

        info!(
            count = documents.len(),
            dir = %self.path.display(),
            "loaded documents"
        );
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn test_loads_only_text_files_in_name_order() {
        let dir = std::env::temp_dir().join(format!("rag-chat-src-{}", uuid::Uuid::new_v4()));
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("b.txt"), "second file").unwrap();
        fs::write(dir.join("a.md"), "first file").unwrap();
        fs::write(dir.join("skip.pdf"), "binary-ish").unwrap();
        fs::write(dir.join("empty.txt"), "   ").unwrap();

        let documents = DirectorySource::new(&dir).load().await.unwrap();
        fs::remove_dir_all(&dir).unwrap();

        let sources: Vec<&str> = documents.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["a.md", "b.txt"]);
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_ingestion_error() {
        let result = DirectorySource::new("/definitely/not/here").load().await;
        assert!(matches!(result, Err(RagError::Ingestion(_))));
    }
}
