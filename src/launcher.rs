use std::{path::{Path, PathBuf}, process::Command};

use log::{debug, info};
use steamlocate::SteamDir;

use crate::{config::{Config, GAME_FOLDER_NAME}, error::Error, profile::{Profile, ProfileManager}, utils};

pub const GAME_EXE_NAMES: &[&str] = &["Gw2-64.exe", "Gw2.exe"];

const STEAM_APP_ID: u32 = 1284210;

/// Executable paths to check, in priority order: an explicitly configured
/// game directory, then each install root.
pub fn candidate_paths(config: &Config) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(game_dir) = &config.game_dir {
        candidates.extend(GAME_EXE_NAMES.iter().map(|exe| game_dir.join(exe)));
    }
    for root in &config.install_roots {
        let dir = root.join(GAME_FOLDER_NAME);
        candidates.extend(GAME_EXE_NAMES.iter().map(|exe| dir.join(exe)));
    }
    candidates
}

pub fn first_existing(candidates: &[PathBuf]) -> Option<&PathBuf> {
    candidates.iter().find(|path| utils::path_exists(path))
}

pub fn locate(config: &Config) -> Result<PathBuf, Error> {
    let candidates = candidate_paths(config);
    if let Some(exe) = first_existing(&candidates) {
        return Ok(exe.clone());
    }
    for exe in &candidates {
        debug!("no client at {}", exe.display());
    }

    detect_registry_exe()
        .or_else(detect_steam_exe)
        .ok_or(Error::LauncherNotFound)
}

fn exe_in_dir(dir: &Path) -> Option<PathBuf> {
    GAME_EXE_NAMES.iter().map(|exe| dir.join(exe)).find(|path| utils::path_exists(path))
}

#[cfg(windows)]
fn detect_registry_exe() -> Option<PathBuf> {
    use registry::{Data, Hive, Security};

    for key in [r"SOFTWARE\ArenaNet\Guild Wars 2", r"SOFTWARE\WOW6432Node\ArenaNet\Guild Wars 2"] {
        let Ok(regkey) = Hive::LocalMachine.open(key, Security::Read) else {
            continue;
        };
        let Ok(Data::String(value)) = regkey.value("Path") else {
            continue;
        };

        let path = PathBuf::from(value.to_string_lossy());
        if path.is_file() {
            return Some(path);
        }
        if let Some(exe) = exe_in_dir(&path) {
            return Some(exe);
        }
    }
    None
}

#[cfg(not(windows))]
fn detect_registry_exe() -> Option<PathBuf> {
    None
}

fn detect_steam_exe() -> Option<PathBuf> {
    let steamdir = SteamDir::locate().ok()?;
    let (app, library) = steamdir.find_app(STEAM_APP_ID).ok()??;

    let game_path = library.path()
        .join("steamapps")
        .join("common")
        .join(&app.install_dir);

    exe_in_dir(&game_path)
}

/// Runs the client with inherited stdio and blocks until it exits.
pub fn launch(exe: &Path, options: &[String]) -> Result<(), Error> {
    if let Some(version) = utils::read_product_version(exe) {
        info!("found Guild Wars 2 {} at {}", version, exe.display());
    } else {
        debug!("no version info in {}", exe.display());
    }

    info!("launching Guild Wars 2");
    let status = Command::new(exe).args(options).status();
    info!("exiting Guild Wars 2");

    let status = status?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::GameExited(status.code()))
    }
}

/// Resolves the client before any profile file is touched, so a missing
/// install aborts with the profile directory untouched.
pub fn run_profile(config: &Config, manager: &ProfileManager, profile: &Profile) -> Result<(), Error> {
    let exe = locate(config)?;
    manager.session(profile, |options| launch(&exe, options))
}
