// Metadata extraction fallbacks, WAV properties, the memoizing cache, and formatters.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chakrabeats::metadata::{
    fallback_metadata, format_duration, format_file_size, is_supported, MetadataCache,
    MetadataExtractor, SongMetadata, TagReader, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_wav(path: &Path, sample_rate: u32, channels: u16, seconds: u32) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).expect("create wav");
    for i in 0..sample_rate * seconds * channels as u32 {
        let sample = ((i as f32 * 0.05).sin() * 8000.0) as i16;
        writer.write_sample(sample).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

/// Extractor that counts calls and returns a record named after the path.
#[derive(Default)]
struct CountingExtractor {
    calls: AtomicUsize,
}

impl MetadataExtractor for CountingExtractor {
    fn extract(&self, path: &Path) -> SongMetadata {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SongMetadata {
            title: path.display().to_string(),
            file_path: path.to_path_buf(),
            ..SongMetadata::default()
        }
    }
}

impl CountingExtractor {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

// ── Extraction ───────────────────────────────────────────────────────────────

#[test]
fn test_missing_file_falls_back_to_base_name() {
    let meta = TagReader.extract(Path::new("/definitely/not/here/track01.mp3"));
    assert_eq!(meta.title, "track01.mp3");
    assert_eq!(meta.artist, UNKNOWN_ARTIST);
    assert_eq!(meta.album, UNKNOWN_ALBUM);
    assert_eq!(meta.file_size, 0);
    assert_eq!(meta.duration_secs, 0);
}

#[test]
fn test_unsupported_extension_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello").unwrap();

    let meta = TagReader.extract(&path);
    assert_eq!(meta.title, "notes.txt");
    assert_eq!(meta.artist, UNKNOWN_ARTIST);
    assert_eq!(meta.file_size, 5);
}

#[test]
fn test_unparsable_supported_files_fall_back_through_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let mut cache = MetadataCache::new();

    for (name, bytes) in [
        ("garbage.mp3", &b"this is not an mpeg stream at all"[..]),
        ("broken.ogg", &b"OggS but not really an ogg page"[..]),
        ("broken.wav", &b"no riff header in here"[..]),
    ] {
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();

        let meta = cache.lookup(&path);
        assert_eq!(meta.title, name, "{}", name);
        assert_eq!(meta.artist, UNKNOWN_ARTIST, "{}", name);
        assert_eq!(meta.album, UNKNOWN_ALBUM, "{}", name);
        assert_eq!(meta.file_size, bytes.len() as u64, "{}", name);
        assert_eq!(meta.file_path, path);
    }
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_tagless_mp3_gets_fallback_names() {
    // A bare MPEG frame header run: readable container, no ID3 tag.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("untagged.mp3");
    let mut frame = vec![0xFF, 0xFB, 0x90, 0x64];
    frame.resize(417, 0);
    std::fs::write(&path, frame.repeat(8)).unwrap();

    let meta = MetadataCache::new().lookup(&path);
    assert_eq!(meta.title, "untagged.mp3");
    assert_eq!(meta.artist, UNKNOWN_ARTIST);
    assert_eq!(meta.album, UNKNOWN_ALBUM);
}

#[test]
fn test_wav_reads_properties_and_uses_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Rasengan Theme.wav");
    write_wav(&path, 22050, 2, 2);

    let meta = TagReader.extract(&path);
    assert_eq!(meta.title, "Rasengan Theme");
    assert_eq!(meta.artist, UNKNOWN_ARTIST);
    assert_eq!(meta.album, UNKNOWN_ALBUM);
    assert_eq!(meta.sample_rate, 22050);
    assert_eq!(meta.channels, 2);
    assert_eq!(meta.duration_secs, 2);
    assert_eq!(meta.file_size, std::fs::metadata(&path).unwrap().len());
}

#[test]
fn test_extension_check_is_case_insensitive() {
    assert!(is_supported(Path::new("a.MP3")));
    assert!(is_supported(Path::new("b.Ogg")));
    assert!(is_supported(Path::new("c.wav")));
    assert!(!is_supported(Path::new("d.flac")));
    assert!(!is_supported(Path::new("no_extension")));
}

#[test]
fn test_display_helpers() {
    let meta = SongMetadata {
        title: "Blue Bird".into(),
        artist: "Ikimonogakari".into(),
        file_path: PathBuf::from("/music/blue_bird.mp3"),
        ..SongMetadata::default()
    };
    assert_eq!(meta.playlist_label(), "Blue Bird - Ikimonogakari");
    assert_eq!(meta.display_album(), UNKNOWN_ALBUM);

    let bare = fallback_metadata(Path::new("/music/blue_bird.mp3"));
    assert_eq!(bare.file_name(), "blue_bird.mp3");
    let untitled = SongMetadata {
        file_path: PathBuf::from("/music/x.ogg"),
        ..SongMetadata::default()
    };
    assert_eq!(untitled.playlist_label(), "x.ogg");
    assert_eq!(untitled.display_title(), "Unknown Title");
}

// ── Cache ────────────────────────────────────────────────────────────────────

#[test]
fn test_cache_extracts_once_per_path() {
    let mut cache = MetadataCache::with_extractor(CountingExtractor::default());
    let path = Path::new("/music/a.mp3");

    let first = cache.lookup(path);
    let second = cache.lookup(path);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.extractor().calls(), 1);
    assert_eq!(cache.len(), 1);

    cache.lookup(Path::new("/music/b.mp3"));
    assert_eq!(cache.extractor().calls(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn test_cache_invalidate_forces_reextraction() {
    let mut cache = MetadataCache::with_extractor(CountingExtractor::default());
    let path = Path::new("/music/a.mp3");
    let first = cache.lookup(path);

    cache.invalidate(path);
    assert!(cache.peek(path).is_none());
    let again = cache.lookup(path);
    assert!(!Arc::ptr_eq(&first, &again));
    assert_eq!(*first, *again);
    assert_eq!(cache.extractor().calls(), 2);
}

#[test]
fn test_cache_clear() {
    let mut cache = MetadataCache::with_extractor(CountingExtractor::default());
    cache.lookup(Path::new("/a.mp3"));
    cache.lookup(Path::new("/b.mp3"));
    cache.clear();
    assert!(cache.is_empty());
    cache.lookup(Path::new("/a.mp3"));
    assert_eq!(cache.extractor().calls(), 3);
}

#[test]
fn test_default_cache_caches_fallbacks() {
    let mut cache = MetadataCache::new();
    let path = Path::new("/nowhere/ghost.ogg");
    let first = cache.lookup(path);
    assert_eq!(first.title, "ghost.ogg");
    assert!(Arc::ptr_eq(&first, &cache.lookup(path)));
}

// ── Formatting ───────────────────────────────────────────────────────────────

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "00:00");
    assert_eq!(format_duration(75), "01:15");
    assert_eq!(format_duration(3599), "59:59");
    assert_eq!(format_duration(3600), "01:00:00");
    assert_eq!(format_duration(3725), "01:02:05");
}

#[test]
fn test_format_file_size() {
    assert_eq!(format_file_size(512), "512.0 B");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
    assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    assert_eq!(format_file_size(2 * 1024u64.pow(4)), "2.0 TB");
}
