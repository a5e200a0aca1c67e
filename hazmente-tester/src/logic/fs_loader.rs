use std::path::{Path, PathBuf};

use hazmente_core::{MemoryStorage, ProfileStorage, ResourceLoader, TrainingEngine};

/// Directory the web crate serves its data documents from.
const WEB_ASSETS: &str = "hazmente-web/static/assets";

/// Reads data documents from a directory laid out like the web app's
/// `static/assets`.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Use `data_dir` when given, otherwise the web crate's assets relative
    /// to the working directory or to this crate.
    pub fn locate(data_dir: Option<&Path>) -> Self {
        if let Some(dir) = data_dir {
            return Self::new(dir);
        }
        let from_cwd = PathBuf::from(WEB_ASSETS);
        if from_cwd.is_dir() {
            return Self::new(from_cwd);
        }
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join(WEB_ASSETS))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fresh engine over these documents with an in-memory store.
    pub fn engine(&self) -> TrainingEngine<Self, MemoryStorage> {
        self.engine_with(MemoryStorage::new())
    }

    pub fn engine_with<S: ProfileStorage>(&self, storage: S) -> TrainingEngine<Self, S> {
        TrainingEngine::new(self.clone(), storage)
    }
}

impl ResourceLoader for FsLoader {
    type Error = std::io::Error;

    fn load_text(&self, path: &str) -> Result<String, Self::Error> {
        std::fs::read_to_string(self.root.join(path.trim_start_matches('/')))
    }
}
