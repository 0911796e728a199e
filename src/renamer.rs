use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::slug;
use crate::track::TrackRecord;

/// One pending file move, derived entirely from the track's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Return true if the given path's extension matches any of the configured
/// file_extensions patterns ("*.mp3", "mp3", ".mp3"), case-insensitive.
fn path_matches_extensions(path: &Path, exts: &[String]) -> bool {
    let ext_os = match path.extension() {
        Some(e) => e,
        None => return false,
    };
    let ext = match ext_os.to_str() {
        Some(s) => s.to_ascii_lowercase(),
        None => return false,
    };
    for pat in exts {
        let mut p = pat.trim();
        if p.is_empty() {
            continue;
        }
        // strip common prefixes: "*." or "."
        if let Some(stripped) = p.strip_prefix("*.") {
            p = stripped;
        } else if let Some(stripped) = p.strip_prefix('.') {
            p = stripped;
        }
        if ext == p.to_ascii_lowercase() {
            return true;
        }
    }
    false
}

/// Walk the given directories and plan a move for every readable track:
/// `<output_dir>/<artist>/<album>/<DD->TT_title.ext>`.
///
/// Tracks that cannot be loaded or named (unsupported container, unreadable
/// tags, no artists) are logged and skipped; the caller decides what to do
/// with the rest.
pub fn plan_moves(dirs: &[PathBuf], output_dir: &Path, file_extensions: &[String]) -> Vec<PlannedMove> {
    let mut moves = Vec::new();

    for dir in dirs {
        for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file() || !path_matches_extensions(path, file_extensions) {
                continue;
            }

            let record = match TrackRecord::load(path) {
                Ok(r) => r,
                Err(err) => {
                    warn!("skipping {}: {}", path.display(), err);
                    continue;
                }
            };

            let dirname = match slug::format_dirname(&record) {
                Ok(d) => d,
                Err(err) => {
                    warn!("skipping {}: {}", path.display(), err);
                    continue;
                }
            };

            let target = output_dir.join(dirname).join(slug::format_filename(&record));
            moves.push(PlannedMove {
                source: path.to_path_buf(),
                target,
            });
        }
    }

    moves
}

/// Perform the planned moves, creating target directories as needed.
pub fn apply_moves(moves: &[PlannedMove]) -> anyhow::Result<()> {
    for mv in moves {
        if let Some(parent) = mv.target.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        // fs::rename cannot cross filesystems; fall back to copy + remove.
        if fs::rename(&mv.source, &mv.target).is_err() {
            fs::copy(&mv.source, &mv.target)
                .with_context(|| format!("copying {} -> {}", mv.source.display(), mv.target.display()))?;
            fs::remove_file(&mv.source)
                .with_context(|| format!("removing {}", mv.source.display()))?;
        }

        info!("{} -> {}", mv.source.display(), mv.target.display());
    }

    Ok(())
}
