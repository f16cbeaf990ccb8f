// File: src/persistence.rs
use crate::error::{Result, VocabError};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

/// Called before a persisted file is replaced, to free locks held by viewers.
/// Success is never required: the write goes ahead regardless.
pub trait LockRelease {
    fn release(&self, path: &Path);
}

/// Does nothing. The default on platforms where viewers don't lock files.
pub struct NoLockRelease;

impl LockRelease for NoLockRelease {
    fn release(&self, _path: &Path) {}
}

/// Runs each configured command (e.g. `taskkill /f /im EXCEL.EXE`) and
/// ignores its outcome.
pub struct CommandLockRelease {
    commands: Vec<Vec<String>>,
}

impl CommandLockRelease {
    pub fn new(commands: Vec<Vec<String>>) -> Self {
        Self { commands }
    }
}

impl LockRelease for CommandLockRelease {
    fn release(&self, path: &Path) {
        for argv in &self.commands {
            let Some((program, args)) = argv.split_first() else {
                continue;
            };
            let status = Command::new(program)
                .args(args)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status();
            match status {
                Ok(status) => tracing::debug!(%program, %status, path = %path.display(), "lock release ran"),
                Err(e) => tracing::debug!(%program, error = %e, "lock release failed"),
            }
        }
    }
}

/// Writes `path` through a temporary file in the same directory and renames
/// it into place, so readers only ever see the old or the new contents.
pub fn write_atomic<F>(path: &Path, lock: &dyn LockRelease, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }

    lock.release(path);
    temp_file.persist(path).map_err(|e| VocabError::Save {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
