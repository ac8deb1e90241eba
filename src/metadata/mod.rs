// Song metadata: tag extraction via lofty with filename fallbacks, plus
// display formatting helpers.

pub mod cache;

use std::path::{Path, PathBuf};

use anyhow::Context;
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::prelude::ItemKey;
use lofty::probe::Probe;
use lofty::tag::Tag;

pub use cache::MetadataCache;

/// File extensions the player accepts, lowercase, without the dot.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg"];

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Flat, immutable description of one audio file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: String,
    pub genre: String,
    pub track_number: String,
    pub duration_secs: u64,
    pub bitrate_kbps: u32,
    pub sample_rate: u32,
    pub channels: u8,
    pub file_path: PathBuf,
    pub file_size: u64,
    /// Free-text comment tag, shown as the song's quote.
    pub quote: String,
}

impl SongMetadata {
    pub fn display_title(&self) -> &str {
        non_empty_or(&self.title, UNKNOWN_TITLE)
    }

    pub fn display_artist(&self) -> &str {
        non_empty_or(&self.artist, UNKNOWN_ARTIST)
    }

    pub fn display_album(&self) -> &str {
        non_empty_or(&self.album, UNKNOWN_ALBUM)
    }

    pub fn file_name(&self) -> String {
        base_name(&self.file_path)
    }

    /// Playlist row text: "title - artist" when both are known, else the file name.
    pub fn playlist_label(&self) -> String {
        if !self.title.is_empty() && !self.artist.is_empty() {
            format!("{} - {}", self.title, self.artist)
        } else {
            self.file_name()
        }
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Source of metadata records. The cache is generic over this seam.
pub trait MetadataExtractor {
    /// Never fails: unreadable input degrades to filename-derived defaults.
    fn extract(&self, path: &Path) -> SongMetadata;
}

/// lofty-backed extractor for the supported containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagReader;

impl MetadataExtractor for TagReader {
    fn extract(&self, path: &Path) -> SongMetadata {
        match read_metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "metadata extraction failed");
                fallback_metadata(path)
            }
        }
    }
}

/// Record used when a file's tags cannot be read.
pub fn fallback_metadata(path: &Path) -> SongMetadata {
    SongMetadata {
        title: base_name(path),
        artist: UNKNOWN_ARTIST.to_string(),
        album: UNKNOWN_ALBUM.to_string(),
        file_path: path.to_path_buf(),
        file_size: std::fs::metadata(path).map(|m| m.len()).unwrap_or(0),
        ..SongMetadata::default()
    }
}

pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

pub fn is_supported(path: &Path) -> bool {
    extension(path).is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.as_str()))
}

fn read_metadata(path: &Path) -> anyhow::Result<SongMetadata> {
    let file_size = std::fs::metadata(path)
        .with_context(|| format!("cannot stat {}", path.display()))?
        .len();

    let ext = extension(path).unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        anyhow::bail!("unsupported audio format: .{}", ext);
    }

    let tagged_file = Probe::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .read()
        .with_context(|| format!("failed to parse {}", path.display()))?;

    let mut metadata = SongMetadata {
        file_path: path.to_path_buf(),
        file_size,
        ..SongMetadata::default()
    };
    apply_properties(&tagged_file, &mut metadata);

    if ext == "wav" {
        // RIFF INFO tags are rarely filled in; name the song after the file.
        metadata.title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        metadata.artist = UNKNOWN_ARTIST.to_string();
        metadata.album = UNKNOWN_ALBUM.to_string();
    } else if let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
        apply_tag(tag, &mut metadata);
    }

    // A readable container with missing tags still gets the fallback names.
    if metadata.title.is_empty() {
        metadata.title = base_name(path);
    }
    if metadata.artist.is_empty() {
        metadata.artist = UNKNOWN_ARTIST.to_string();
    }
    if metadata.album.is_empty() {
        metadata.album = UNKNOWN_ALBUM.to_string();
    }

    Ok(metadata)
}

fn apply_properties(tagged_file: &TaggedFile, metadata: &mut SongMetadata) {
    let props = tagged_file.properties();
    metadata.duration_secs = props.duration().as_secs();
    metadata.bitrate_kbps = props.audio_bitrate().unwrap_or(0);
    metadata.sample_rate = props.sample_rate().unwrap_or(0);
    metadata.channels = props.channels().unwrap_or(0);
}

fn apply_tag(tag: &Tag, metadata: &mut SongMetadata) {
    let text = |key: ItemKey| {
        tag.get_string(&key)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };
    metadata.title = text(ItemKey::TrackTitle);
    metadata.artist = text(ItemKey::TrackArtist);
    metadata.album = text(ItemKey::AlbumTitle);
    metadata.year = text(ItemKey::Year);
    if metadata.year.is_empty() {
        metadata.year = text(ItemKey::RecordingDate);
    }
    metadata.genre = text(ItemKey::Genre);
    metadata.track_number = text(ItemKey::TrackNumber);
    metadata.quote = text(ItemKey::Comment);
}

/// `MM:SS` below an hour, `HH:MM:SS` from an hour up.
pub fn format_duration(seconds: u64) -> String {
    if seconds < 3600 {
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    } else {
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}

/// Human-readable size with one decimal, e.g. `3.4 MB`.
pub fn format_file_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}
