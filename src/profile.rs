use crate::error::{KslistError, Result};
use crate::job::Job;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory of saved jobs, one `<name>.json` per profile.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.kslist/profiles`.
    pub fn open_default() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            KslistError::io(
                "~",
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "could not determine home directory",
                ),
            )
        })?;
        Ok(Self::new(home.join(".kslist").join("profiles")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.trim().is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(KslistError::InvalidProfileName(name.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }

    /// Saves `job` under `name`, replacing an existing profile of that name.
    pub fn save(&self, name: &str, job: &Job) -> Result<PathBuf> {
        let path = self.path_of(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| KslistError::io(&self.dir, e))?;
        let json = serde_json::to_string_pretty(job).map_err(|e| KslistError::Profile {
            path: path.clone(),
            message: e.to_string(),
        })?;
        fs::write(&path, json).map_err(|e| KslistError::io(&path, e))?;
        tracing::info!("Saved profile '{}' to {}", name, path.display());
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Job> {
        let path = self.path_of(name)?;
        if !path.is_file() {
            return Err(KslistError::ProfileNotFound(name.to_string()));
        }
        let text = fs::read_to_string(&path).map_err(|e| KslistError::io(&path, e))?;
        serde_json::from_str(&text).map_err(|e| KslistError::Profile {
            path,
            message: e.to_string(),
        })
    }

    /// Names of all saved profiles, sorted. A missing directory means none.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(KslistError::io(&self.dir, e)),
        };
        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        Ok(names)
    }
}
