use std::{io, path::{Path, PathBuf}};

use pelite::resources::version_info::{Language, VersionInfo};

/// Anything other than a definite "not found" counts as present, so a
/// permission error surfaces on the following rename/copy instead of being
/// silently skipped.
pub fn path_exists(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

/// Removing a path that is already gone is not an error.
pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[cfg(windows)]
pub fn roaming_app_data_dir() -> Option<PathBuf> {
    use windows::Win32::{System::Com::CoTaskMemFree, UI::Shell::{FOLDERID_RoamingAppData, SHGetKnownFolderPath, KF_FLAG_DEFAULT}};

    let known_folder = unsafe { SHGetKnownFolderPath(&FOLDERID_RoamingAppData, KF_FLAG_DEFAULT, None).ok()? };
    let path = unsafe { known_folder.to_string() };
    unsafe { CoTaskMemFree(Some(known_folder.0 as *const _)) };
    path.ok().map(PathBuf::from).or_else(app_data_from_env)
}

#[cfg(not(windows))]
pub fn roaming_app_data_dir() -> Option<PathBuf> {
    app_data_from_env()
}

fn app_data_from_env() -> Option<PathBuf> {
    std::env::var_os("APPDATA")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub fn read_pe_version_info<'a>(image: &'a [u8]) -> Option<VersionInfo<'a>> {
    pelite::PeFile::from_bytes(image).ok()?.resources().ok()?.version_info().ok()
}

const LANG_NEUTRAL_UNICODE: Language = Language { lang_id: 0x0000, charset_id: 0x04b0 };
const LANG_EN_US_UNICODE: Language = Language { lang_id: 0x0409, charset_id: 0x04b0 };

pub fn read_product_version(exe: &Path) -> Option<String> {
    let map = pelite::FileMap::open(exe).ok()?;
    let version_info = read_pe_version_info(map.as_ref())?;
    [LANG_NEUTRAL_UNICODE, LANG_EN_US_UNICODE]
        .into_iter()
        .find_map(|lang| version_info.value(lang, "ProductVersion"))
}
