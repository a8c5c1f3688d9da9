//! Minimal tagged audio files for tests.
//!
//! Produces a short mono 16-bit PCM RIFF/WAVE file, optionally carrying a
//! `LIST/INFO` chunk, so callers can exercise real tag parsing without
//! checking binary fixtures into the tree.

use std::io;
use std::path::Path;

const SAMPLE_RATE: u32 = 8000;
const DATA_LEN: u32 = 1600;

/// Fields written to the `LIST/INFO` chunk. `None` fields are omitted.
#[derive(Debug, Default, Clone, Copy)]
pub struct InfoTag<'a> {
    pub artist: Option<&'a str>,
    pub album: Option<&'a str>,
    pub title: Option<&'a str>,
    pub genre: Option<&'a str>,
    pub date: Option<&'a str>,
    pub track: Option<&'a str>,
}

impl InfoTag<'_> {
    fn entries(&self) -> Vec<(&'static [u8; 4], &str)> {
        let fields: [(&'static [u8; 4], Option<&str>); 6] = [
            (b"IART", self.artist),
            (b"IPRD", self.album),
            (b"INAM", self.title),
            (b"IGNR", self.genre),
            (b"ICRD", self.date),
            (b"ITRK", self.track),
        ];
        fields
            .into_iter()
            .filter_map(|(id, value)| value.map(|value| (id, value)))
            .collect()
    }
}

pub fn write_wav(path: &Path, tag: &InfoTag<'_>) -> io::Result<()> {
    std::fs::write(path, wav_bytes(tag))
}

pub fn wav_bytes(tag: &InfoTag<'_>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(b"WAVE");

    let mut fmt = Vec::with_capacity(16);
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    fmt.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    fmt.extend_from_slice(&2u16.to_le_bytes());
    fmt.extend_from_slice(&16u16.to_le_bytes());
    push_chunk(&mut body, b"fmt ", &fmt);

    push_chunk(&mut body, b"data", &vec![0u8; DATA_LEN as usize]);

    let entries = tag.entries();
    if !entries.is_empty() {
        let mut list = Vec::new();
        list.extend_from_slice(b"INFO");
        for (id, value) in entries {
            let mut text = value.as_bytes().to_vec();
            text.push(0);
            push_chunk(&mut list, id, &text);
        }
        push_chunk(&mut body, b"LIST", &list);
    }

    let mut out = Vec::with_capacity(body.len() + 8);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}

fn push_chunk(out: &mut Vec<u8>, id: &[u8; 4], data: &[u8]) {
    out.extend_from_slice(id);
    out.extend_from_slice(&(data.len() as u32).to_le_bytes());
    out.extend_from_slice(data);
    if data.len() % 2 == 1 {
        out.push(0);
    }
}
