use std::fmt;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, TagError};
use crate::identity::Identity;
use crate::tag_io::{self, RawFields};

/// Closed set of supported tagging schemes, selected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// ID3v2-tagged MP3 files.
    Mp3,
    /// Ogg Vorbis files with Vorbis comments.
    Ogg,
}

impl ContainerFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ContainerFormat::Mp3 => "mp3",
            ContainerFormat::Ogg => "ogg",
        }
    }

    /// Map a path's extension onto the supported set, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "mp3" => Ok(ContainerFormat::Mp3),
            "ogg" => Ok(ContainerFormat::Ogg),
            _ => Err(TagError::UnsupportedFormat(ext)),
        }
    }
}

// ID3 artist frames in priority order; at most four artists are persisted.
const ID3_ARTIST_FRAMES: [&str; 4] = ["TPE1", "TPE2", "TPE3", "TPE4"];

/// Canonical, format-independent metadata for one audio track.
///
/// Every field always holds a value; empty or missing source fields decode
/// to the type's zero value (empty string, 0, empty vec). Owned exclusively
/// by its caller between `load` and `save`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRecord {
    /// Insertion order follows source field priority; duplicates by
    /// `Identity` equality are suppressed.
    pub artists: Vec<Identity>,
    pub album_title: String,
    pub title: String,
    pub track_number: u32,
    /// 0 means "no multi-disc context".
    pub disc_number: u32,
    /// 0 means "unknown".
    pub year: u32,
    pub genre: String,
    pub description: String,
    pub format: ContainerFormat,
    pub source_path: PathBuf,
}

impl TrackRecord {
    /// An all-defaults record for the given format.
    pub fn new(format: ContainerFormat) -> Self {
        Self {
            artists: Vec::new(),
            album_title: String::new(),
            title: String::new(),
            track_number: 0,
            disc_number: 0,
            year: 0,
            genre: String::new(),
            description: String::new(),
            format,
            source_path: PathBuf::new(),
        }
    }

    /// Read and decode the tags of the file at `path`. Tag-library errors
    /// (missing file, unreadable container) propagate untouched.
    pub fn load(path: &Path) -> Result<Self> {
        let format = ContainerFormat::from_path(path)?;
        let raw = tag_io::read_raw(format, path)?;
        let mut record = Self::decode(format, &raw);
        record.source_path = path.to_path_buf();
        Ok(record)
    }

    /// Encode and write the record back to its `source_path`.
    pub fn save(&self) -> Result<()> {
        let raw = self.encode();
        tag_io::write_raw(self.format, &self.source_path, &raw)
    }

    /// Build a record from a raw field dictionary. Absent fields keep their
    /// zero defaults and are reported with a `warn!`, never an error.
    pub fn decode(format: ContainerFormat, raw: &RawFields) -> Self {
        match format {
            ContainerFormat::Mp3 => Self::decode_id3(raw),
            ContainerFormat::Ogg => Self::decode_vorbis(raw),
        }
    }

    fn decode_id3(raw: &RawFields) -> Self {
        let mut record = Self::new(ContainerFormat::Mp3);

        for code in ID3_ARTIST_FRAMES {
            if let Some(text) = first_value(raw, code) {
                push_artist(&mut record.artists, text);
            }
        }
        if record.artists.is_empty() {
            missing_field("mp3", "TPE1");
        }

        match first_value(raw, "TIT2").or_else(|| first_value(raw, "TIT1")) {
            Some(title) => record.title = title.to_string(),
            None => missing_field("mp3", "TIT2"),
        }

        match first_value(raw, "TALB") {
            Some(album) => record.album_title = album.to_string(),
            None => missing_field("mp3", "TALB"),
        }

        // TRCK carries "position" or "position/total"; only the position
        // matters here.
        match first_value(raw, "TRCK") {
            Some(text) => {
                let position = text.split('/').next().unwrap_or("");
                record.track_number = parse_leading_u32(position).unwrap_or(0);
            }
            None => missing_field("mp3", "TRCK"),
        }

        // TPOS only counts as a multi-disc marker when the set has at least
        // two discs.
        match first_value(raw, "TPOS") {
            Some(text) => {
                let mut parts = text.split('/');
                let position = parts.next().and_then(parse_leading_u32);
                let total = parts.next().and_then(parse_leading_u32);
                if let (Some(position), Some(total)) = (position, total) {
                    if total >= 2 {
                        record.disc_number = position;
                    }
                }
            }
            None => missing_field("mp3", "TPOS"),
        }

        match first_value(raw, "TYER").or_else(|| first_value(raw, "TDRC")) {
            Some(text) => record.year = parse_leading_u32(text).unwrap_or(0),
            None => missing_field("mp3", "TYER"),
        }

        match first_value(raw, "TCON") {
            Some(genre) => record.genre = genre.to_string(),
            None => missing_field("mp3", "TCON"),
        }

        record
    }

    fn decode_vorbis(raw: &RawFields) -> Self {
        let mut record = Self::new(ContainerFormat::Ogg);

        match raw.get("artist") {
            Some(values) => {
                for value in values {
                    push_artist(&mut record.artists, value);
                }
            }
            None => missing_field("ogg", "artist"),
        }

        match first_value(raw, "title") {
            Some(title) => record.title = title.to_string(),
            None => missing_field("ogg", "title"),
        }

        match first_value(raw, "album") {
            Some(album) => record.album_title = album.to_string(),
            None => missing_field("ogg", "album"),
        }

        match first_value(raw, "tracknumber") {
            Some(text) => record.track_number = parse_leading_u32(text).unwrap_or(0),
            None => missing_field("ogg", "tracknumber"),
        }

        match first_value(raw, "date") {
            Some(text) => record.year = parse_leading_u32(text).unwrap_or(0),
            None => missing_field("ogg", "date"),
        }

        match first_value(raw, "genre") {
            Some(genre) => record.genre = genre.to_string(),
            None => missing_field("ogg", "genre"),
        }

        record
    }

    /// Project the record back into its format's raw field dictionary.
    /// Never fails: every attribute always has a value.
    pub fn encode(&self) -> RawFields {
        match self.format {
            ContainerFormat::Mp3 => self.encode_id3(),
            ContainerFormat::Ogg => self.encode_vorbis(),
        }
    }

    fn encode_id3(&self) -> RawFields {
        let mut raw = RawFields::new();

        // At most four artists fit the positional frames; absent slots are
        // omitted, never written as empty.
        for (artist, code) in self.artists.iter().zip(ID3_ARTIST_FRAMES) {
            raw.insert(code.to_string(), vec![artist.name()]);
        }

        raw.insert("TIT2".to_string(), vec![self.title.clone()]);
        raw.insert("TALB".to_string(), vec![self.album_title.clone()]);
        raw.insert("TRCK".to_string(), vec![self.track_number.to_string()]);
        raw.insert("TIT3".to_string(), vec![self.description.clone()]);

        // The record keeps no disc total; anything below 2 would decode back
        // to "no multi-disc context".
        if self.disc_number != 0 {
            let total = self.disc_number.max(2);
            raw.insert(
                "TPOS".to_string(),
                vec![format!("{}/{}", self.disc_number, total)],
            );
        }

        let year = self.year_text();
        raw.insert("TYER".to_string(), vec![year.clone()]);
        raw.insert("TDRC".to_string(), vec![year]);

        raw.insert("TCON".to_string(), vec![self.genre.clone()]);

        raw
    }

    fn encode_vorbis(&self) -> RawFields {
        let mut raw = RawFields::new();

        raw.insert(
            "artist".to_string(),
            self.artists.iter().map(|a| a.name()).collect(),
        );
        raw.insert("title".to_string(), vec![self.title.clone()]);
        raw.insert("album".to_string(), vec![self.album_title.clone()]);
        raw.insert(
            "tracknumber".to_string(),
            vec![self.track_number.to_string()],
        );
        raw.insert("description".to_string(), vec![self.description.clone()]);
        raw.insert("date".to_string(), vec![self.year_text()]);
        raw.insert("genre".to_string(), vec![self.genre.clone()]);

        raw
    }

    // An unknown year is always persisted as the literal "0000".
    fn year_text(&self) -> String {
        if self.year == 0 {
            "0000".to_string()
        } else {
            self.year.to_string()
        }
    }
}

impl fmt::Display for TrackRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let artists = self
            .artists
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(",");
        write!(
            f,
            "{} - {} - {} ({}) by {}",
            self.track_number, self.title, self.album_title, self.year, artists
        )
    }
}

fn first_value<'a>(raw: &'a RawFields, code: &str) -> Option<&'a str> {
    raw.get(code).and_then(|v| v.first()).map(|s| s.as_str())
}

/// Append the parsed identity unless the raw text is empty or an equal
/// identity was already collected.
fn push_artist(artists: &mut Vec<Identity>, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    let artist = Identity::from_display_name(text);
    if !artists.contains(&artist) {
        artists.push(artist);
    }
}

fn parse_leading_u32(text: &str) -> Option<u32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn missing_field(format: &str, code: &str) {
    warn!("{} tag has no {} field; keeping default", format, code);
}
