/// High score persistence — a single integer in a key-value file.
///
/// ## File format:
///   `high_score=<n>` on its own line. A bare number is accepted too.
///   Anything unreadable (missing file, garbage, negative) reads as 0.
///
/// Relative paths are placed in the save directory: the executable's
/// directory when writable, else `~/.local/share/snakeburst`, else CWD.

use std::path::{Path, PathBuf};

/// Get/set of the one persisted value.
pub trait HighScoreStore {
    fn load(&self) -> u32;
    fn store(&mut self, score: u32) -> Result<(), String>;
}

// ══════════════════════════════════════════════════════════════
// File-backed store
// ══════════════════════════════════════════════════════════════

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Relative names resolve against `save_dir()`.
    pub fn new(name: &Path) -> Self {
        let path = if name.is_absolute() {
            name.to_path_buf()
        } else {
            save_dir().join(name)
        };
        FileStore { path }
    }

    #[cfg(test)]
    pub fn at(path: PathBuf) -> Self {
        FileStore { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> u32 {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match parse_high_score(&content) {
                Some(v) => v,
                None => {
                    log::warn!("high score file {} is malformed; using 0", self.path.display());
                    0
                }
            },
            Err(_) => 0,
        }
    }

    fn store(&mut self, score: u32) -> Result<(), String> {
        std::fs::write(&self.path, serialize(score))
            .map_err(|e| format!("Saving high score to {} failed: {}", self.path.display(), e))
    }
}

// ══════════════════════════════════════════════════════════════
// In-memory store (no file access; used when the disk is unavailable)
// ══════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct MemoryStore {
    value: Option<String>,
}

impl MemoryStore {
    #[cfg(test)]
    pub fn with_raw(raw: &str) -> Self {
        MemoryStore { value: Some(raw.to_string()) }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.as_deref().and_then(parse_high_score).unwrap_or(0)
    }

    fn store(&mut self, score: u32) -> Result<(), String> {
        self.value = Some(serialize(score));
        Ok(())
    }
}

// ══════════════════════════════════════════════════════════════
// Paths
// ══════════════════════════════════════════════════════════════

fn save_dir() -> PathBuf {
    // 1. Try exe directory (works for local/portable installs)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            // Check if writable (system installs won't be)
            let test_path = parent.join(".write_test_snakeburst");
            if std::fs::write(&test_path, "").is_ok() {
                let _ = std::fs::remove_file(&test_path);
                return parent.to_path_buf();
            }
        }
    }

    // 2. XDG data home
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/snakeburst");
        if std::fs::create_dir_all(&xdg).is_ok() {
            return xdg;
        }
    }

    // 3. Fallback to CWD
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

// ══════════════════════════════════════════════════════════════
// Serialization
// ══════════════════════════════════════════════════════════════

fn serialize(score: u32) -> String {
    format!("high_score={}\n", score)
}

/// None when no line holds a valid non-negative integer.
fn parse_high_score(content: &str) -> Option<u32> {
    for line in content.lines() {
        let line = line.trim();
        let val = line.strip_prefix("high_score=").unwrap_or(line);
        if let Ok(v) = val.trim().parse::<u32>() {
            return Some(v);
        }
    }
    None
}
