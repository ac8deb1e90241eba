// Memoizing metadata store keyed by file path.
//
// Entries never expire and the map is unbounded: a session that touches many
// distinct files keeps every record until `clear`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{MetadataExtractor, SongMetadata, TagReader};

pub struct MetadataCache<E = TagReader> {
    extractor: E,
    entries: HashMap<PathBuf, Arc<SongMetadata>>,
}

impl MetadataCache<TagReader> {
    pub fn new() -> Self {
        Self::with_extractor(TagReader)
    }
}

impl Default for MetadataCache<TagReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: MetadataExtractor> MetadataCache<E> {
    pub fn with_extractor(extractor: E) -> Self {
        Self {
            extractor,
            entries: HashMap::new(),
        }
    }

    /// Cached record for `path`, extracting it on first use.
    pub fn lookup(&mut self, path: &Path) -> Arc<SongMetadata> {
        if let Some(hit) = self.entries.get(path) {
            return Arc::clone(hit);
        }
        let metadata = Arc::new(self.extractor.extract(path));
        self.entries.insert(path.to_path_buf(), Arc::clone(&metadata));
        metadata
    }

    /// Cached record without extracting.
    pub fn peek(&self, path: &Path) -> Option<Arc<SongMetadata>> {
        self.entries.get(path).cloned()
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }
}
