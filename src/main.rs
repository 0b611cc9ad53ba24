use std::{io, process, thread, time::Duration};

use clap::Parser;
use log::error;

use gw2_profiles::{cli::Args, launcher, prompt, Config, Error, ProfileManager, Settings};

const EXIT_DELAY: Duration = Duration::from_secs(1);

fn run(args: &Args) -> Result<(), Error> {
    let mut config = Config::from_env(args.profile_dir.clone(), None)?;
    let settings = Settings::load(&config.settings_path())?;
    config.game_dir = args.game_dir(&settings);

    let profile = args.profile(&settings);
    let manager = ProfileManager::new(config.profile_dir.clone());

    launcher::run_profile(&config, &manager, &profile)?;

    if !profile.is_local() {
        thread::sleep(EXIT_DELAY);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        if !args.no_prompt {
            _ = prompt::wait_for_enter(io::stdin().lock(), io::stdout());
        }
        process::exit(1);
    }
}
