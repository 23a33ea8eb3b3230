//! Saved dog profiles with file locking.
//!
//! Profiles and the currently selected profile live in a single JSON
//! document. Reads take a shared lock, writes go through a temp file that is
//! renamed over the original. `update` serializes whole read-modify-write
//! cycles across processes with an exclusive lock on a sibling
//! `<store>.lock` file.

use crate::{DogProfile, Error, ProfileDraft, Result};
use chrono::Utc;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Persistent collection of dog profiles
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct ProfileStore {
    #[serde(default)]
    pub profiles: Vec<DogProfile>,
    #[serde(default)]
    pub selected_dog_id: Option<Uuid>,
}

impl ProfileStore {
    /// Load the store from a file with shared locking
    ///
    /// Returns an empty store if the file doesn't exist.
    /// If the file is corrupted, logs a warning and returns an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No profile store found, starting empty");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(
                    "Unable to open profile store {:?}: {}. Starting empty.",
                    path,
                    e
                );
                return Ok(Self::default());
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!(
                "Unable to lock profile store {:?}: {}. Starting empty.",
                path,
                e
            );
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!(
                "Failed to read profile store {:?}: {}. Starting empty.",
                path,
                e
            );
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<ProfileStore>(&contents) {
            Ok(mut store) => {
                store.sort();
                tracing::debug!(
                    "Loaded {} profiles from {:?}",
                    store.profiles.len(),
                    path
                );
                Ok(store)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse profile store {:?}: {}. Starting empty.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save the store
    ///
    /// Atomically writes by:
    /// 1. Writing to a temp file
    /// 2. Syncing to disk
    /// 3. Renaming over the original
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "profile path missing parent")
        })?)?;

        {
            let mut sorted = self.clone();
            sorted.sort();
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string_pretty(&sorted)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved {} profiles to {:?}", self.profiles.len(), path);
        Ok(())
    }

    /// Load the store, modify it, and save it back
    ///
    /// The lock file stays exclusively locked from the load until the save
    /// has been renamed into place, so concurrent updates never lose writes.
    /// Nothing is written if `f` fails.
    pub fn update<T, F>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce(&mut ProfileStore) -> Result<T>,
    {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(Self::lock_path(path))?;
        lock.lock_exclusive()?;

        let outcome = Self::load(path).and_then(|mut store| {
            let value = f(&mut store)?;
            store.save(path)?;
            Ok(value)
        });

        lock.unlock()?;
        outcome
    }

    /// Sibling file guarding read-modify-write cycles on `path`
    pub fn lock_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        path.with_file_name(name)
    }

    /// Most recently updated first
    fn sort(&mut self) {
        self.profiles.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    }

    /// Validate a draft and store it as a new profile
    pub fn add(&mut self, draft: ProfileDraft) -> Result<DogProfile> {
        draft.validate()?;

        let now = Utc::now();
        let profile = DogProfile {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            units: draft.units,
            dog_weight: draft.dog_weight,
            age_years: draft.age_years,
            age_months: draft.age_months,
            size_class: draft.size_class,
            fitness: draft.fitness,
            experience: draft.experience,
            created_at: now,
            updated_at: now,
        };

        tracing::info!("Created profile {} ({})", profile.name, profile.id);
        self.profiles.insert(0, profile.clone());
        self.sort();
        Ok(profile)
    }

    /// Profiles, most recently updated first
    pub fn list(&self) -> &[DogProfile] {
        &self.profiles
    }

    pub fn get(&self, id: Uuid) -> Option<&DogProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Look a profile up by id or, failing that, by case-insensitive name
    ///
    /// A name shared by several profiles is rejected; the id is needed then.
    pub fn find(&self, key: &str) -> Result<&DogProfile> {
        let trimmed = key.trim();
        if let Ok(id) = Uuid::parse_str(trimmed) {
            return self
                .get(id)
                .ok_or_else(|| Error::Profile(format!("No profile matching '{}'", trimmed)));
        }

        let name = trimmed.to_lowercase();
        let mut matches = self.profiles.iter().filter(|p| p.name.to_lowercase() == name);
        match (matches.next(), matches.next()) {
            (Some(profile), None) => Ok(profile),
            (None, _) => Err(Error::Profile(format!("No profile matching '{}'", trimmed))),
            (Some(_), Some(_)) => Err(Error::Profile(format!(
                "Several profiles are named '{}'; use the profile id instead",
                trimmed
            ))),
        }
    }

    /// Mark a profile as the one to use for calculations
    pub fn select(&mut self, id: Uuid) -> Result<()> {
        if self.get(id).is_none() {
            return Err(Error::Profile(format!("No profile with id {}", id)));
        }
        self.selected_dog_id = Some(id);
        tracing::info!("Selected profile {}", id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_dog_id = None;
    }

    /// The selected profile, if it still exists
    pub fn selected(&self) -> Option<&DogProfile> {
        self.selected_dog_id.and_then(|id| self.get(id))
    }

    /// Remove a profile, clearing the selection if it pointed at it
    pub fn delete(&mut self, id: Uuid) -> Result<DogProfile> {
        let index = self
            .profiles
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::Profile(format!("No profile with id {}", id)))?;

        let removed = self.profiles.remove(index);
        if self.selected_dog_id == Some(id) {
            self.selected_dog_id = None;
        }

        tracing::info!("Deleted profile {} ({})", removed.name, removed.id);
        Ok(removed)
    }
}
