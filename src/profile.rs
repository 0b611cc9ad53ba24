use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::{error::Error, utils};

/// Reserved profile name that launches against the active file untouched.
pub const LOCAL_PROFILE: &str = "Local";
pub const ACTIVE_FILE_NAME: &str = "Local.dat";
pub const DEFAULT_BACKUPS: i32 = 2;

const PROFILE_EXT: &str = "dat";
const MARKER_EXT: &str = "bak";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub options: Vec<String>,
    pub preserve: i32,
}

impl Profile {
    pub fn new(name: impl Into<String>, options: Vec<String>, preserve: i32) -> Profile {
        Profile {
            name: name.into(),
            options,
            preserve,
        }
    }

    pub fn is_local(&self) -> bool {
        self.name.eq_ignore_ascii_case(LOCAL_PROFILE)
    }
}

/// Swaps named profile files in and out of the active `Local.dat` slot.
///
/// All state lives on disk:
/// * `Local.dat` is what the game reads and writes
/// * `<name>.dat` is the saved copy of a profile
/// * `<name>.dat.N` are rotated backups, `0` being the newest
/// * `Local.dat.bak` exists only while a profile is loaded over a
///   pre-existing active file
pub struct ProfileManager {
    profile_dir: PathBuf,
    active_path: PathBuf,
}

impl ProfileManager {
    pub fn new(profile_dir: impl Into<PathBuf>) -> ProfileManager {
        let profile_dir = profile_dir.into();
        let active_path = profile_dir.join(ACTIVE_FILE_NAME);
        ProfileManager {
            profile_dir,
            active_path,
        }
    }

    pub fn profile_dir(&self) -> &Path {
        &self.profile_dir
    }

    pub fn active_path(&self) -> &Path {
        &self.active_path
    }

    pub fn marker_path(&self) -> PathBuf {
        Self::with_suffix(&self.active_path, MARKER_EXT)
    }

    pub fn profile_path(&self, profile: &Profile) -> PathBuf {
        self.profile_dir.join(format!("{}.{}", profile.name, PROFILE_EXT))
    }

    pub fn backup_path(&self, profile: &Profile, index: i32) -> PathBuf {
        Self::with_suffix(&self.profile_path(profile), &index.to_string())
    }

    fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
        let mut s = path.as_os_str().to_owned();
        s.push(".");
        s.push(suffix);
        PathBuf::from(s)
    }

    pub fn load(&self, profile: &Profile) -> Result<(), Error> {
        std::fs::create_dir_all(&self.profile_dir)?;

        if utils::path_exists(&self.active_path) {
            info!("backing up original profile");
            std::fs::rename(&self.active_path, self.marker_path())?;
        }

        let saved = self.profile_path(profile);
        if utils::path_exists(&saved) {
            info!("loading profile for {}", profile.name);
            std::fs::copy(&saved, &self.active_path)?;
        } else {
            info!("creating profile for {}", profile.name);
        }
        Ok(())
    }

    pub fn rotate_backups(&self, profile: &Profile) -> Result<(), Error> {
        if profile.preserve < 1 {
            return Ok(());
        }

        info!("managing profile backups (max {})", profile.preserve);
        utils::remove_if_exists(&self.backup_path(profile, profile.preserve - 1))?;

        for i in (1..profile.preserve).rev() {
            let older = self.backup_path(profile, i - 1);
            if utils::path_exists(&older) {
                std::fs::rename(&older, self.backup_path(profile, i))?;
            }
        }

        let saved = self.profile_path(profile);
        if utils::path_exists(&saved) {
            std::fs::rename(&saved, self.backup_path(profile, 0))?;
        } else {
            debug!("no saved profile for {} to back up", profile.name);
        }
        Ok(())
    }

    pub fn unload(&self, profile: &Profile) -> Result<(), Error> {
        if utils::path_exists(&self.active_path) {
            self.rotate_backups(profile)?;

            info!("unloading profile for {}", profile.name);
            std::fs::copy(&self.active_path, self.profile_path(profile))?;
        } else {
            warn!("no active profile to save for {}", profile.name);
        }

        let marker = self.marker_path();
        if utils::path_exists(&marker) {
            info!("restoring original profile");
            std::fs::rename(&marker, &self.active_path)?;
        }
        Ok(())
    }

    /// Runs `launch` with the profile loaded, unloading afterwards even when
    /// the launch fails. The local profile skips load/unload entirely.
    pub fn session<F>(&self, profile: &Profile, launch: F) -> Result<(), Error>
    where
        F: FnOnce(&[String]) -> Result<(), Error>,
    {
        if profile.is_local() {
            return launch(&profile.options);
        }

        self.load(profile)?;
        let launched = launch(&profile.options);
        let unloaded = self.unload(profile);

        match (launched, unloaded) {
            (Err(launch_err), Err(unload_err)) => {
                error!("failed to unload profile for {}: {}", profile.name, unload_err);
                Err(launch_err)
            }
            (launched, unloaded) => launched.and(unloaded),
        }
    }
}
