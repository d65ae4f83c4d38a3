use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::fs::{self, File};
use std::path::Path;

use crate::scoring::{PlayerScore, SessionData};

/// Load stored session rows from a JSON array file.
pub fn load_sessions(path: &Path) -> Result<Vec<SessionData>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open sessions file at {}", path.display()))?;

    let sessions: Vec<SessionData> = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse sessions in {}", path.display()))?;

    log::debug!("Loaded {} session rows from {}", sessions.len(), path.display());
    Ok(sessions)
}

/// Load the players of one session to be scored.
///
/// Each entry needs a `userId` and either a `rawScore` or `scoreDetails`.
pub fn load_score_sheet(path: &Path) -> Result<Vec<PlayerScore>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open score sheet at {}", path.display()))?;

    let players: Vec<PlayerScore> = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse score sheet in {}", path.display()))?;

    Ok(players)
}

/// Read a template file verbatim. Parsing is left to the template module so
/// each caller picks its own strictness.
pub fn load_template_json(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("Failed to read template at {}", path.display()))
}

/// Write `value` as pretty JSON without ever leaving a half-written file.
fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;

    file.commit()
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

/// Save a processed session (placements and points filled in).
pub fn save_scored_session(path: &Path, players: &[PlayerScore]) -> Result<()> {
    write_json_atomic(path, players)
}

/// Append rows to a sessions file, creating it if missing.
///
/// Returns the number of rows in the file afterwards.
pub fn append_sessions(path: &Path, rows: &[SessionData]) -> Result<usize> {
    let mut sessions = if path.exists() {
        load_sessions(path)?
    } else {
        Vec::new()
    };

    sessions.extend_from_slice(rows);
    write_json_atomic(path, &sessions)?;

    log::debug!("Recorded {} rows to {}", rows.len(), path.display());
    Ok(sessions.len())
}
