use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WiggumError};
use crate::model::Prd;

/// Storage adapter for a single prd.json document. The path is supplied by
/// the caller at construction time; nothing here consults the environment.
/// Persistence is whole-document: every save replaces the entire file.
pub struct PrdStore {
    path: PathBuf,
}

impl PrdStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty document for a project. Refuses to clobber an
    /// existing file.
    pub fn init(&self, project: &str) -> Result<Prd> {
        if self.path.exists() {
            return Err(WiggumError::PrdExists(self.path.clone()));
        }
        let prd = Prd {
            project: project.to_string(),
            backlog: Vec::new(),
        };
        self.save(&prd)?;
        Ok(prd)
    }

    pub fn load(&self) -> Result<Prd> {
        if !self.path.exists() {
            return Err(WiggumError::PrdNotFound(self.path.clone()));
        }
        let data = fs::read_to_string(&self.path)?;
        let prd: Prd = serde_json::from_str(&data)?;
        Ok(prd)
    }

    /// Serialize with two-space indentation and replace the file via a
    /// temp-file rename in the same directory, so a crash mid-write never
    /// leaves a torn document. Last write wins across processes.
    pub fn save(&self, prd: &Prd) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(prd)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
