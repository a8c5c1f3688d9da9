use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use common::{track_id_from_path, Track};
use metadata::{format_positive, read_tags, MetadataError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use walkdir::WalkDir;

/// How far below the root the scanner looks for files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// The whole subtree.
    #[default]
    Recursive,
    /// Immediate children of the root only.
    Flat,
}

/// A music directory that is re-read on every scan. Nothing is cached
/// between scans.
#[derive(Clone, Debug)]
pub struct Catalog {
    root: PathBuf,
    traversal: Traversal,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogScan {
    pub tracks: Vec<Track>,
    pub stats: ScanStats,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub files: usize,
    pub tracks: usize,
    pub skipped: usize,
    pub walk_errors: usize,
    pub elapsed: Duration,
}

impl Catalog {
    pub fn new(root: PathBuf, traversal: Traversal) -> Self {
        Self { root, traversal }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    /// Walks the root and extracts a [`Track`] from every regular file
    /// that carries a readable tag container.
    ///
    /// Unreadable entries and files that fail extraction are skipped and
    /// only show up in [`ScanStats`]. Order follows the walk, which visits
    /// each directory's entries sorted by file name.
    pub fn scan(&self) -> CatalogScan {
        let started = Instant::now();
        let mut scan = CatalogScan::default();

        let mut walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();
        if self.traversal == Traversal::Flat {
            walker = walker.max_depth(1);
        }

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!("Skipping unreadable entry: {}", err);
                    scan.stats.walk_errors += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            scan.stats.files += 1;
            match track_from_path(entry.path()) {
                Ok(track) => scan.tracks.push(track),
                Err(err) => {
                    debug!("Skipping {}: {}", entry.path().display(), err);
                    scan.stats.skipped += 1;
                }
            }
        }

        scan.stats.tracks = scan.tracks.len();
        scan.stats.elapsed = started.elapsed();
        info!(
            "Catalog scan of {} finished: {} tracks from {} files ({} skipped, {} walk errors) in {:?}",
            self.root.display(),
            scan.stats.tracks,
            scan.stats.files,
            scan.stats.skipped,
            scan.stats.walk_errors,
            scan.stats.elapsed
        );
        scan
    }
}

/// Builds the catalog record for a single file.
pub fn track_from_path(path: &Path) -> Result<Track, MetadataError> {
    let info = read_tags(path)?;
    Ok(Track {
        track_id: track_id_from_path(path),
        filename: path.to_string_lossy().into_owned(),
        artist: info.artist.unwrap_or_default(),
        year: format_positive(info.year),
        album: info.album.unwrap_or_default(),
        track_number: format_positive(info.track_no),
        track_title: info.title.unwrap_or_default(),
        genre: info.genre.unwrap_or_default(),
    })
}

/// Checks that `root` is an existing directory.
pub fn validate_root(root: &Path) -> Result<(), LibraryError> {
    let meta = match std::fs::metadata(root) {
        Ok(meta) => meta,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(LibraryError::NotFound(root.to_path_buf()))
        }
        Err(err) => return Err(LibraryError::Io(err)),
    };
    if !meta.is_dir() {
        return Err(LibraryError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

#[derive(Debug)]
pub enum LibraryError {
    Io(std::io::Error),
    NotFound(PathBuf),
    NotADirectory(PathBuf),
}

impl std::fmt::Display for LibraryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibraryError::Io(err) => write!(f, "io error: {}", err),
            LibraryError::NotFound(path) => {
                write!(f, "music directory not found: {}", path.display())
            }
            LibraryError::NotADirectory(path) => {
                write!(f, "music root is not a directory: {}", path.display())
            }
        }
    }
}

impl std::error::Error for LibraryError {}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::Io(err)
    }
}
