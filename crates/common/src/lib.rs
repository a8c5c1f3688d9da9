use std::path::{Path, PathBuf};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// One tagged audio file as returned by the catalog endpoint.
///
/// Every field is a string on the wire. Numeric tag values are already
/// normalized: an unset year or track number is `""`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Track {
    pub track_id: String,
    pub filename: String,
    pub artist: String,
    pub year: String,
    pub album: String,
    pub track_number: String,
    pub track_title: String,
    pub genre: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TracksResponse {
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl From<Vec<Track>> for TracksResponse {
    fn from(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }
}

/// Encodes the raw bytes of `path` as an unpadded, URL-safe base64 id.
pub fn track_id_from_path(path: &Path) -> String {
    URL_SAFE_NO_PAD.encode(path_bytes(path))
}

/// Reverses [`track_id_from_path`]. Returns `None` for ids that are not
/// valid unpadded URL-safe base64.
pub fn path_from_track_id(track_id: &str) -> Option<PathBuf> {
    let bytes = URL_SAFE_NO_PAD.decode(track_id).ok()?;
    path_from_bytes(bytes)
}

#[cfg(unix)]
fn path_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

#[cfg(unix)]
fn path_from_bytes(bytes: Vec<u8>) -> Option<PathBuf> {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;
    Some(PathBuf::from(OsString::from_vec(bytes)))
}

// Non-Unix paths are encoded from UTF-8 text, so anything else is not one of ours.
#[cfg(not(unix))]
fn path_from_bytes(bytes: Vec<u8>) -> Option<PathBuf> {
    String::from_utf8(bytes).ok().map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{path_from_track_id, track_id_from_path, Track, TracksResponse};

    fn round_trip(path: &Path) -> PathBuf {
        path_from_track_id(&track_id_from_path(path)).unwrap()
    }

    #[test]
    fn track_id_round_trips_plain_paths() {
        for raw in ["song.mp3", "/music/Artist/Album/01 Intro.flac", "", "a"] {
            let path = Path::new(raw);
            assert_eq!(round_trip(path), path);
        }
    }

    #[test]
    fn track_id_round_trips_reserved_and_non_ascii_characters() {
        let path = Path::new("/music/Sigur Rós/Ágætis byrjun/02 Svefn-g-englar?#&%+=.mp3");
        assert_eq!(round_trip(path), path);
        let path = Path::new("/музыка/日本語/トラック 01.ogg");
        assert_eq!(round_trip(path), path);
    }

    #[cfg(unix)]
    #[test]
    fn track_id_round_trips_non_utf8_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/music/\xff\xfe latin1 \xe9.mp3"));
        assert_eq!(round_trip(path), path);
    }

    #[test]
    fn track_id_is_url_safe() {
        // "???" and ">>>" hit sextets 63 and 62; seven bytes would need "==" padding.
        let id = track_id_from_path(Path::new("???>>>~"));
        assert!(!id.contains('/'));
        assert!(!id.contains('+'));
        assert!(!id.contains('='));
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn track_id_is_deterministic_and_distinct() {
        let first = track_id_from_path(Path::new("Artist/Album/Track.mp3"));
        let second = track_id_from_path(Path::new("Artist/Album/Track.mp3"));
        assert_eq!(first, second);
        assert_ne!(first, track_id_from_path(Path::new("Artist/Album/Track2.mp3")));
    }

    #[test]
    fn malformed_track_id_is_rejected() {
        assert_eq!(path_from_track_id("not base64!"), None);
        assert_eq!(path_from_track_id("c29uZy5tcDM="), None);
        assert_eq!(path_from_track_id("a"), None);
    }

    #[test]
    fn track_serializes_with_wire_names() {
        let track = Track {
            track_id: "c29uZy5tcDM".to_string(),
            filename: "song.mp3".to_string(),
            artist: "Test Artist".to_string(),
            year: String::new(),
            album: "Album".to_string(),
            track_number: "3".to_string(),
            track_title: "Title".to_string(),
            genre: "Rock".to_string(),
        };
        let value = serde_json::to_value(TracksResponse::from(vec![track])).unwrap();
        let expected = serde_json::json!({
            "Tracks": [{
                "TrackId": "c29uZy5tcDM",
                "Filename": "song.mp3",
                "Artist": "Test Artist",
                "Year": "",
                "Album": "Album",
                "TrackNumber": "3",
                "TrackTitle": "Title",
                "Genre": "Rock"
            }]
        });
        assert_eq!(value, expected);
    }

    #[test]
    fn empty_response_serializes_as_empty_list() {
        let body = serde_json::to_string(&TracksResponse::default()).unwrap();
        assert_eq!(body, r#"{"Tracks":[]}"#);
    }

    #[test]
    fn track_deserializes_with_missing_fields() {
        let track: Track = serde_json::from_str(r#"{"Artist":"Someone"}"#).unwrap();
        assert_eq!(track.artist, "Someone");
        assert_eq!(track.track_id, "");
        assert_eq!(track.year, "");
    }
}
