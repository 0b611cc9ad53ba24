use crate::i18n::t;

#[derive(Debug)]
pub enum Error {
    NoProfileDir,
    LauncherNotFound,
    IoError(std::io::Error),
    InvalidSettings(String),
    GameExited(Option<i32>),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NoProfileDir => write!(f, "{}", t!("error.no_profile_dir")),
            Error::LauncherNotFound => write!(f, "{}", t!("error.launcher_not_found")),
            Error::IoError(e) => write!(f, "{}", t!("error.io_error", error = e)),
            Error::InvalidSettings(e) => write!(f, "{}", t!("error.invalid_settings", error = e)),
            Error::GameExited(Some(code)) => write!(f, "{}", t!("error.game_exited", status = code)),
            Error::GameExited(None) => write!(f, "{}", t!("error.game_exited_signal")),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(e)
    }
}
