use std::fs;

use gw2_profiles::{Error, Profile, ProfileManager};
use tempfile::tempdir;

fn play(manager: &ProfileManager, profile: &Profile, content: &str) {
    manager
        .session(profile, |_| {
            fs::write(manager.active_path(), content).unwrap();
            Ok(())
        })
        .unwrap();
}

fn backups(manager: &ProfileManager, profile: &Profile) -> Vec<String> {
    let mut found = Vec::new();
    for i in 0..16 {
        let path = manager.backup_path(profile, i);
        if path.exists() {
            found.push(format!("{}={}", i, fs::read_to_string(path).unwrap()));
        }
    }
    found
}

#[test]
fn backup_count_is_bounded_after_many_cycles() {
    let dir = tempdir().unwrap();
    let manager = ProfileManager::new(dir.path());
    let alt = Profile::new("Alt", Vec::new(), 3);

    for round in 0..6 {
        play(&manager, &alt, &format!("v{}", round));
    }

    assert_eq!(backups(&manager, &alt), vec!["0=v4", "1=v3", "2=v2"]);
    assert_eq!(fs::read_to_string(manager.profile_path(&alt)).unwrap(), "v5");
}

#[test]
fn two_backups_walkthrough() {
    let dir = tempdir().unwrap();
    let manager = ProfileManager::new(dir.path());
    let alt = Profile::new("Alt", Vec::new(), 2);
    fs::write(manager.profile_path(&alt), "original").unwrap();

    play(&manager, &alt, "first");
    assert_eq!(backups(&manager, &alt), vec!["0=original"]);

    play(&manager, &alt, "second");
    assert_eq!(backups(&manager, &alt), vec!["0=first", "1=original"]);
    assert_eq!(fs::read_to_string(manager.profile_path(&alt)).unwrap(), "second");
}

#[test]
fn disabled_rotation_never_creates_backups() {
    let dir = tempdir().unwrap();
    let manager = ProfileManager::new(dir.path());
    let alt = Profile::new("Alt", Vec::new(), 0);

    play(&manager, &alt, "first");
    play(&manager, &alt, "second");

    assert!(backups(&manager, &alt).is_empty());
    assert_eq!(fs::read_to_string(manager.profile_path(&alt)).unwrap(), "second");
}

#[test]
fn untouched_session_keeps_saved_bytes() {
    let dir = tempdir().unwrap();
    let manager = ProfileManager::new(dir.path());
    let alt = Profile::new("Alt", Vec::new(), 2);
    let saved = vec![0u8, 159, 146, 150, 255, 10, 13];
    fs::write(manager.active_path(), "main").unwrap();
    fs::write(manager.profile_path(&alt), &saved).unwrap();

    manager.load(&alt).unwrap();
    manager.unload(&alt).unwrap();

    assert_eq!(fs::read(manager.profile_path(&alt)).unwrap(), saved);
    assert_eq!(fs::read_to_string(manager.active_path()).unwrap(), "main");
}

#[test]
fn no_marker_left_without_prior_active_file() {
    let dir = tempdir().unwrap();
    let manager = ProfileManager::new(dir.path());
    let alt = Profile::new("Alt", Vec::new(), 2);
    fs::write(manager.profile_path(&alt), "alt").unwrap();

    manager.load(&alt).unwrap();
    assert!(!manager.marker_path().exists());
    manager.unload(&alt).unwrap();

    assert!(!manager.marker_path().exists());
    assert_eq!(fs::read_to_string(manager.active_path()).unwrap(), "alt");
    assert_eq!(fs::read_to_string(manager.profile_path(&alt)).unwrap(), "alt");
}

#[test]
fn local_profile_in_any_case_only_launches() {
    let dir = tempdir().unwrap();
    let manager = ProfileManager::new(dir.path());
    fs::write(manager.active_path(), "main").unwrap();

    for name in ["Local", "local", "LoCaL"] {
        let profile = Profile::new(name, vec!["-bmp".to_string()], 2);
        let mut launches = 0;
        manager
            .session(&profile, |options| {
                launches += 1;
                assert_eq!(options.to_vec(), vec!["-bmp".to_string()]);
                Ok(())
            })
            .unwrap();
        assert_eq!(launches, 1);
    }

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(fs::read_to_string(manager.active_path()).unwrap(), "main");
}

#[test]
fn failed_load_skips_launch() {
    let dir = tempdir().unwrap();
    let manager = ProfileManager::new(dir.path());
    let alt = Profile::new("Alt", Vec::new(), 2);
    // A directory where the saved profile should be makes the copy fail.
    fs::create_dir(manager.profile_path(&alt)).unwrap();

    let mut launched = false;
    let result = manager.session(&alt, |_| {
        launched = true;
        Ok(())
    });

    assert!(matches!(result, Err(Error::IoError(_))));
    assert!(!launched);
}
