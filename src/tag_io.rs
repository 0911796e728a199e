//! Raw-field-dictionary adapters over real files.
//!
//! The core only maps between `RawFields` and `TrackRecord`; this module is
//! the boundary where an actual tag library reads or writes a container.
//! ID3 frames need raw frame ids and raw `"n/total"` strings, so MP3 goes
//! through the `id3` crate; Vorbis comments go through lofty. Each call
//! opens, reads or writes fully, and closes; library errors propagate
//! untouched.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use id3::frame::Content;
use id3::{Tag, TagLike, Version};
use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::AudioFile;
use lofty::ogg::VorbisFile;
use lofty::prelude::*;

use crate::error::Result;
use crate::track::ContainerFormat;

/// Format-native tag storage shape: field code -> one or more text values.
pub type RawFields = BTreeMap<String, Vec<String>>;

// Frames the model's alias table can consume.
const ID3_FRAMES: [&str; 13] = [
    "TPE1", "TPE2", "TPE3", "TPE4", "TIT1", "TIT2", "TIT3", "TALB", "TRCK", "TPOS", "TYER",
    "TDRC", "TCON",
];

// Vorbis comment keys the model's alias table can consume.
const VORBIS_KEYS: [&str; 7] = [
    "artist",
    "title",
    "album",
    "tracknumber",
    "date",
    "genre",
    "description",
];

/// Read the raw tag fields of the file at `path`.
pub fn read_raw(format: ContainerFormat, path: &Path) -> Result<RawFields> {
    match format {
        ContainerFormat::Mp3 => read_raw_id3(path),
        ContainerFormat::Ogg => read_raw_vorbis(path),
    }
}

/// Write `raw` into the file at `path`, keeping unrelated existing fields.
pub fn write_raw(format: ContainerFormat, path: &Path, raw: &RawFields) -> Result<()> {
    match format {
        ContainerFormat::Mp3 => write_raw_id3(path, raw),
        ContainerFormat::Ogg => write_raw_vorbis(path, raw),
    }
}

fn read_raw_id3(path: &Path) -> Result<RawFields> {
    let tag = Tag::read_from_path(path)?;

    let mut raw = RawFields::new();
    for code in ID3_FRAMES {
        if let Some(text) = text_frame(&tag, code) {
            raw.insert(code.to_string(), vec![text]);
        }
    }
    Ok(raw)
}

fn write_raw_id3(path: &Path, raw: &RawFields) -> Result<()> {
    // Keep whatever frames are already in the file.
    let mut tag = Tag::read_from_path(path).unwrap_or_else(|_| Tag::new());

    for (code, values) in raw {
        if let Some(value) = values.first() {
            tag.set_text(code, value.clone());
        }
    }

    tag.write_to_path(path, Version::Id3v24)?;
    Ok(())
}

/// Best-effort string value of a text frame.
fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),
        _ => None,
    }
}

fn read_raw_vorbis(path: &Path) -> Result<RawFields> {
    let mut file = fs::File::open(path)?;
    let ogg = VorbisFile::read_from(&mut file, ParseOptions::new())?;
    let comments = ogg.vorbis_comments();

    let mut raw = RawFields::new();
    for key in VORBIS_KEYS {
        let values: Vec<String> = comments.get_all(key).map(str::to_string).collect();
        if !values.is_empty() {
            raw.insert(key.to_string(), values);
        }
    }
    Ok(raw)
}

fn write_raw_vorbis(path: &Path, raw: &RawFields) -> Result<()> {
    let mut comments = {
        let mut file = fs::File::open(path)?;
        VorbisFile::read_from(&mut file, ParseOptions::new())?
            .vorbis_comments()
            .clone()
    };

    for (key, values) in raw {
        comments.remove(key).for_each(drop);
        for value in values {
            comments.push(key.clone(), value.clone());
        }
    }

    comments.save_to_path(path, WriteOptions::default())?;
    Ok(())
}
