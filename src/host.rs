//=====================================================
// File: host.rs
//=====================================================
// Author: ZobieLabs
// License: Duality Public License (DPL v1.0)
// Goal: Host capability layer for Arcana scripts
// Objective: Isolate output, file-save and clipboard effects behind one trait
//            so the interpreter core never touches the terminal or filesystem
//=====================================================

use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;
use tracing::warn;

//=====================================================
// Section 1.0 - Host Trait
//=====================================================

pub type HostResult<T> = Result<T, HostError>;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid file name '{0}'")]
    InvalidFileName(String),
    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Effects a running script may request. Every call completes before the
/// interpreter moves to the next line.
pub trait Host {
    /// One revealed line, interpolation already resolved.
    fn append(&mut self, text: &str) -> HostResult<()>;

    fn save(&mut self, text: &str, filename: &str) -> HostResult<()>;

    fn copy_to_clipboard(&mut self, text: &str) -> HostResult<()>;
}

//=====================================================
// Section 2.0 - Memory Host
//=====================================================

#[derive(Debug, Default)]
struct Transcript {
    output: Vec<String>,
    saved: Vec<(String, String)>,
    clipboard: Option<String>,
}

/// In-memory host. Clones share one transcript, so a caller can keep a
/// handle while the interpreter owns the boxed copy.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    transcript: Rc<RefCell<Transcript>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> Vec<String> {
        self.transcript.borrow().output.clone()
    }

    /// `(filename, contents)` in the order scripts saved them.
    pub fn saved_files(&self) -> Vec<(String, String)> {
        self.transcript.borrow().saved.clone()
    }

    pub fn clipboard(&self) -> Option<String> {
        self.transcript.borrow().clipboard.clone()
    }

    pub fn clear(&self) {
        let mut transcript = self.transcript.borrow_mut();
        transcript.output.clear();
        transcript.saved.clear();
        transcript.clipboard = None;
    }
}

impl Host for MemoryHost {
    fn append(&mut self, text: &str) -> HostResult<()> {
        self.transcript.borrow_mut().output.push(text.to_string());
        Ok(())
    }

    fn save(&mut self, text: &str, filename: &str) -> HostResult<()> {
        self.transcript
            .borrow_mut()
            .saved
            .push((filename.to_string(), text.to_string()));
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> HostResult<()> {
        self.transcript.borrow_mut().clipboard = Some(text.to_string());
        Ok(())
    }
}

//=====================================================
// Section 3.0 - Console Host
//=====================================================

/// Host used by the command-line runner.
#[derive(Debug)]
pub struct ConsoleHost {
    save_dir: PathBuf,
    clipboard: Option<String>,
}

impl ConsoleHost {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            clipboard: None,
        }
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Only the final component of the requested name is honoured, so a
    /// script cannot write outside the save directory.
    pub fn resolve(&self, filename: &str) -> HostResult<PathBuf> {
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| HostError::InvalidFileName(filename.to_string()))?;
        Ok(self.save_dir.join(name))
    }
}

impl Host for ConsoleHost {
    fn append(&mut self, text: &str) -> HostResult<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        writeln!(handle, "{}", text)?;
        Ok(())
    }

    fn save(&mut self, text: &str, filename: &str) -> HostResult<()> {
        let path = self.resolve(filename)?;
        fs::create_dir_all(&self.save_dir)?;
        fs::write(&path, text)?;
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> HostResult<()> {
        warn!("no system clipboard linked; keeping text in memory");
        self.clipboard = Some(text.to_string());
        Ok(())
    }
}


//=====================================================
// End of file
//=====================================================
