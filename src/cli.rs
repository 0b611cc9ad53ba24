use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::{config::Settings, profile::{Profile, DEFAULT_BACKUPS, LOCAL_PROFILE}};

#[derive(Parser, Debug)]
#[command(author, version, about = "Launch Guild Wars 2 with a named Local.dat profile", long_about = None)]
pub struct Args {
    /// Profile name to load
    #[arg(long, default_value = LOCAL_PROFILE)]
    pub name: String,

    /// Number of profile backups to keep
    #[arg(long = "n", allow_negative_numbers = true)]
    pub n: Option<i32>,

    /// Log in automatically
    #[arg(long, action = ArgAction::Set, default_value_t = true, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub autologin: bool,

    /// Show map load diagnostics
    #[arg(long, action = ArgAction::Set, default_value_t = true, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub loadinfo: bool,

    /// Download updates and exit
    #[arg(long, action = ArgAction::Set, default_value_t = false, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub image: bool,

    /// Email address for login
    #[arg(long, default_value = "")]
    pub email: String,

    /// Password for login
    #[arg(long, default_value = "")]
    pub password: String,

    /// Directory holding Local.dat and saved profiles
    #[arg(long)]
    pub profile_dir: Option<PathBuf>,

    /// Guild Wars 2 installation directory
    #[arg(long)]
    pub game_dir: Option<PathBuf>,

    /// Exit without waiting for [ENTER] when an error occurs
    #[arg(long)]
    pub no_prompt: bool,

    /// Extra arguments passed through to the client; everything from the
    /// first positional on is forwarded as-is
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,
}

impl Args {
    /// Arguments handed to the client: settings options, then pass-through
    /// arguments, then translated flags. Credentials go first when both are
    /// given.
    pub fn forwarded_options(&self, settings: &Settings) -> Vec<String> {
        let mut options: Vec<String> = settings.options.iter().chain(&self.extra).cloned().collect();
        if self.autologin {
            options.push("-autologin".to_string());
        }
        if self.loadinfo {
            options.push("-maploadinfo".to_string());
        }
        if self.image {
            options.push("-image".to_string());
        }
        if !self.email.is_empty() && !self.password.is_empty() {
            let mut credentials = vec![
                format!("-email={}", self.email),
                format!("-password={}", self.password),
                "-nopatchui".to_string(),
            ];
            credentials.append(&mut options);
            options = credentials;
        }
        options
    }

    pub fn profile(&self, settings: &Settings) -> Profile {
        let preserve = self.n.or(settings.backups).unwrap_or(DEFAULT_BACKUPS);
        Profile::new(self.name.clone(), self.forwarded_options(settings), preserve)
    }

    pub fn game_dir(&self, settings: &Settings) -> Option<PathBuf> {
        self.game_dir.clone().or_else(|| settings.game_dir.clone())
    }
}
