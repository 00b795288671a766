/// High-score persistence: a single JSON number in a file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

/// `$HOME/.alien_invasion_high_score.json`, or the working directory when
/// `HOME` is unset.
pub fn default_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".alien_invasion_high_score.json")
}

/// The stored high score.  A missing or unreadable file counts as no prior
/// score.
pub fn load(path: &Path) -> u32 {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %path.display(), error = %e, "cannot read high score");
            }
            return 0;
        }
    };
    match serde_json::from_str::<u32>(text.trim()) {
        Ok(score) => score,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "corrupt high score file, starting from 0");
            0
        }
    }
}

pub fn save(path: &Path, score: u32) -> anyhow::Result<()> {
    let json = serde_json::to_string(&score).context("encode high score")?;
    fs::write(path, json).with_context(|| format!("write high score to {}", path.display()))?;
    info!(path = %path.display(), score, "high score saved");
    Ok(())
}
