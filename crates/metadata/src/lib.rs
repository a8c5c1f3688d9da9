use std::path::Path;

use lofty::error::LoftyError;
use lofty::prelude::{ItemKey, TaggedFileExt};
use lofty::tag::Tag;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

/// Raw tag fields of one file, before string normalization.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i64>,
    pub track_no: Option<i64>,
}

#[derive(Debug)]
pub enum MetadataError {
    Io(std::io::Error),
    Lofty(LoftyError),
}

impl std::fmt::Display for MetadataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataError::Io(err) => write!(f, "io error: {}", err),
            MetadataError::Lofty(err) => write!(f, "tag error: {}", err),
        }
    }
}

impl std::error::Error for MetadataError {}

impl From<std::io::Error> for MetadataError {
    fn from(err: std::io::Error) -> Self {
        MetadataError::Io(err)
    }
}

impl From<LoftyError> for MetadataError {
    fn from(err: LoftyError) -> Self {
        MetadataError::Lofty(err)
    }
}

/// Opens `path` as a tagged audio container and reads the catalog fields.
///
/// The file handle lives only for the duration of this call and is closed
/// on every return path. A container that parses but carries no tag yields
/// an empty [`TagInfo`].
pub fn read_tags(path: &Path) -> Result<TagInfo, MetadataError> {
    let tagged_file = lofty::read_from_path(path)?;
    let tag = match tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) {
        Some(tag) => tag,
        None => return Ok(TagInfo::default()),
    };
    Ok(tag_info(tag))
}

fn tag_info(tag: &Tag) -> TagInfo {
    TagInfo {
        artist: text(tag, &ItemKey::TrackArtist),
        album: text(tag, &ItemKey::AlbumTitle),
        title: text(tag, &ItemKey::TrackTitle),
        genre: text(tag, &ItemKey::Genre),
        year: tag
            .get_string(&ItemKey::Year)
            .or_else(|| tag.get_string(&ItemKey::RecordingDate))
            .and_then(parse_year),
        track_no: tag
            .get_string(&ItemKey::TrackNumber)
            .and_then(parse_track_number),
    }
}

fn text(tag: &Tag, key: &ItemKey) -> Option<String> {
    tag.get_string(key).map(|v| v.to_string())
}

/// Renders a numeric tag value; zero, negative and missing values are unset.
pub fn format_positive(value: Option<i64>) -> String {
    match value {
        Some(value) if value > 0 => value.to_string(),
        _ => String::new(),
    }
}

fn parse_track_number(text: &str) -> Option<i64> {
    let head = text.split('/').next().unwrap_or(text).trim();
    head.parse().ok()
}

fn parse_year(text: &str) -> Option<i64> {
    let mut digits = String::new();
    for ch in text.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            if digits.len() == 4 {
                break;
            }
        } else if !digits.is_empty() {
            break;
        }
    }
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}
