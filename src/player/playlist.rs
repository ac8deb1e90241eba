// Ordered, de-duplicated list of local audio files with a current position,
// shuffle and repeat.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::metadata::is_supported;

#[derive(Debug, Clone, Default)]
pub struct Playlist {
    items: Vec<PathBuf>,
    current_index: Option<usize>,
    pub shuffle: bool,
    pub repeat: bool,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted state. An out-of-range index is dropped.
    pub fn restore(items: Vec<PathBuf>, current_index: Option<usize>) -> Self {
        let mut playlist = Self::new();
        for item in items {
            playlist.add(item);
        }
        if let Some(i) = current_index.filter(|&i| i < playlist.len()) {
            playlist.current_index = Some(i);
        }
        playlist
    }

    /// Append a path unless it is already listed. Returns whether it was added.
    pub fn add(&mut self, path: PathBuf) -> bool {
        if self.contains(&path) {
            return false;
        }
        self.items.push(path);
        if self.current_index.is_none() {
            self.current_index = Some(0);
        }
        true
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.items.iter().any(|p| p == path)
    }

    /// Remove the item at `index`, keeping the current index on the same track
    /// where possible.
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        if self.items.is_empty() {
            self.current_index = None;
        } else if let Some(curr) = self.current_index {
            if index < curr || curr >= self.items.len() {
                self.current_index = Some(curr - 1);
            }
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.current_index = None;
    }

    pub fn current(&self) -> Option<&Path> {
        self.current_index
            .and_then(|i| self.items.get(i))
            .map(PathBuf::as_path)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Jump to a specific position.
    pub fn play_at(&mut self, index: usize) -> Option<&Path> {
        if index < self.items.len() {
            self.current_index = Some(index);
            self.current()
        } else {
            None
        }
    }

    /// Step forward, wrapping at the end. With shuffle on, any index may follow.
    pub fn next(&mut self, rng: &mut impl Rng) -> Option<&Path> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let next = if self.shuffle {
            rng.random_range(0..len)
        } else {
            self.current_index.map_or(0, |i| (i + 1) % len)
        };
        self.current_index = Some(next);
        self.current()
    }

    /// Step back, wrapping at the start. With shuffle on, any index may follow.
    pub fn prev(&mut self, rng: &mut impl Rng) -> Option<&Path> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let prev = if self.shuffle {
            rng.random_range(0..len)
        } else {
            self.current_index.map_or(0, |i| (i + len - 1) % len)
        };
        self.current_index = Some(prev);
        self.current()
    }

    /// Track to play once the current one ends: itself on repeat, else the next.
    pub fn on_finished(&mut self, rng: &mut impl Rng) -> Option<&Path> {
        if self.repeat && self.current_index.is_some() {
            return self.current();
        }
        self.next(rng)
    }

    pub fn items(&self) -> &[PathBuf] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Supported audio files under `path`: the file itself, or the directory's
/// direct children sorted by name.
pub fn collect_audio_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_supported(p))
            .collect();
        files.sort();
        Ok(files)
    } else if path.is_file() {
        if is_supported(path) {
            Ok(vec![path.to_path_buf()])
        } else {
            anyhow::bail!("Unsupported audio format: {}", path.display())
        }
    } else {
        anyhow::bail!("File not found: {}", path.display())
    }
}
