//! Shared handle to the current prompt library.
//!
//! Readers take a snapshot (`Arc<PromptLibrary>`) and drop the lock right
//! away. A reload reads every file into a brand-new library first and only
//! then replaces the snapshot in a single assignment, so concurrent readers
//! see either the old library or the new one, never a mix. If the reload
//! fails, the current library stays in place.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::error::LoadError;
use super::library::PromptLibrary;
use super::loader::PromptLoader;

/// The live prompt library plus the loader that (re)builds it.
#[derive(Debug)]
pub struct PromptStore {
    loader: PromptLoader,
    library: RwLock<Arc<PromptLibrary>>,
}

impl PromptStore {
    /// Load the library from the loader's root.
    pub fn open(loader: PromptLoader) -> Result<Self, LoadError> {
        let library = loader.load_all()?;
        Ok(Self::with_library(loader, library))
    }

    /// Wrap an already-built library.
    pub fn with_library(loader: PromptLoader, library: PromptLibrary) -> Self {
        Self {
            loader,
            library: RwLock::new(Arc::new(library)),
        }
    }

    pub fn loader(&self) -> &PromptLoader {
        &self.loader
    }

    /// The library as of now.
    pub async fn snapshot(&self) -> Arc<PromptLibrary> {
        Arc::clone(&*self.library.read().await)
    }

    /// Rebuild the library from disk and swap it in.
    ///
    /// The directory walk runs on the blocking pool. Returns the number of
    /// prompts in the new library.
    pub async fn reload(&self) -> Result<usize, LoadError> {
        info!("Reloading prompts from {}", self.loader.root().display());

        let loader = self.loader.clone();
        let loaded = tokio::task::spawn_blocking(move || loader.load_all())
            .await
            .map_err(LoadError::from)
            .and_then(|result| result);

        let replacement = match loaded {
            Ok(library) => Arc::new(library),
            Err(e) => {
                warn!("Reload failed, keeping current prompts: {}", e);
                return Err(e);
            }
        };

        let count = replacement.len();
        *self.library.write().await = replacement;

        info!("Reloaded {} prompts", count);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_prompt(dir: &Path, file: &str, id: &str) {
        let yaml = format!(
            "metadata:\n  id: {id}\n  name: {id}\n  description: d\n  author: a\n  \
             created: 2025-01-01T00:00:00Z\n  modified: 2025-01-01T00:00:00Z\n  version: '1'\n\
             prompt: static text\n"
        );
        fs::write(dir.join(file), yaml).unwrap();
    }

    #[tokio::test]
    async fn test_open_and_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "a.yaml", "a");

        let store = PromptStore::open(PromptLoader::new(temp_dir.path())).unwrap();
        let library = store.snapshot().await;
        assert_eq!(library.ids(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_reload_swaps_library() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "a.yaml", "a");
        let store = PromptStore::open(PromptLoader::new(temp_dir.path())).unwrap();

        let before = store.snapshot().await;
        write_prompt(temp_dir.path(), "b.yaml", "b");
        assert_eq!(store.reload().await.unwrap(), 2);

        // Old snapshots stay intact; new readers see the new library.
        assert_eq!(before.len(), 1);
        assert_eq!(store.snapshot().await.ids(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_library() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "a.yaml", "a");
        let store = PromptStore::open(PromptLoader::new(temp_dir.path())).unwrap();

        write_prompt(temp_dir.path(), "dup.yaml", "a");
        let err = store.reload().await.unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId { .. }));

        let library = store.snapshot().await;
        assert_eq!(library.ids(), vec!["a"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_readers_progress_during_reload() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..50 {
            write_prompt(temp_dir.path(), &format!("p{i:02}.yaml"), &format!("p{i:02}"));
        }
        let store = Arc::new(PromptStore::open(PromptLoader::new(temp_dir.path())).unwrap());

        let reloads: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.reload().await })
            })
            .collect();
        for _ in 0..20 {
            assert_eq!(store.snapshot().await.len(), 50);
            tokio::task::yield_now().await;
        }
        for reload in reloads {
            assert_eq!(reload.await.unwrap().unwrap(), 50);
        }
    }
}
