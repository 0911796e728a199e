use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::decompose_canonical;

use crate::error::{Result, TagError};
use crate::track::TrackRecord;

// Stage order matters: whitelist runs on the lowercased transliteration,
// then every run of non-word characters becomes one underscore.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9()\-\[\]_\s]").unwrap());
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").unwrap());
static UNDERSCORE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

/// Downgrade a Unicode string to ASCII by replacing each non-ASCII character
/// with the root of its canonical decomposition (the base letter, discarding
/// combining marks). Characters with no decomposition are dropped outright:
/// they contribute nothing to the output.
pub fn unicode_to_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }

        let mut root = None;
        decompose_canonical(ch, |c| {
            if root.is_none() {
                root = Some(c);
            }
        });

        match root {
            // The callback echoes the character itself when there is no
            // canonical decomposition; only a real root survives.
            Some(r) if r != ch => out.push(r),
            _ => {}
        }
    }

    out
}

/// Map arbitrary text to a deterministic, filesystem-safe token:
/// transliterate to ASCII, lowercase, strip everything outside the
/// whitelist, then collapse separator runs into single underscores.
/// Idempotent: feeding a slug back in returns it unchanged.
pub fn to_ascii_slug(text: &str) -> String {
    let ascii = unicode_to_ascii(text).to_lowercase();
    let kept = DISALLOWED.replace_all(&ascii, "");
    let worded = NON_WORD.replace_all(&kept, "_");
    UNDERSCORE_RUNS.replace_all(&worded, "_").into_owned()
}

/// Canonical file name for a track: `TT_title.ext`, or `DD-TT_title.ext`
/// when the track belongs to a multi-disc set. Zero-padding is a minimum
/// width; track numbers of 100 and above keep all their digits.
pub fn format_filename(record: &TrackRecord) -> String {
    let slug = to_ascii_slug(&record.title);
    let slug = slug.trim_end_matches('_');
    let ext = record.format.extension();

    if record.disc_number != 0 {
        format!(
            "{:02}-{:02}_{}.{}",
            record.disc_number, record.track_number, slug, ext
        )
    } else {
        format!("{:02}_{}.{}", record.track_number, slug, ext)
    }
}

/// Canonical directory for a track: `<artist>/<album>` as a relative path.
/// Unlike file names, the segments keep any trailing underscore; existing
/// on-disk layouts depend on that.
pub fn format_dirname(record: &TrackRecord) -> Result<PathBuf> {
    let artist = record
        .artists
        .first()
        .ok_or_else(|| TagError::NoArtist(record.source_path.clone()))?;

    let mut dir = PathBuf::from(to_ascii_slug(&artist.name()));
    dir.push(to_ascii_slug(&record.album_title));
    Ok(dir)
}
