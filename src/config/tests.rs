use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn defaults_match_the_classic_player() {
    let s = Settings::default();
    assert_eq!(s.audio.initial_volume, 50);
    assert_eq!(s.audio.volume_step, 10);
    assert_eq!(s.ui.bar_width, 30);
    assert_eq!(s.ui.tick_ms, 100);
    assert_eq!(s.library.extensions, vec!["mp3", "wav", "ogg"]);
    assert!(!s.library.recursive);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.volume_step = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.initial_volume = 101;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.bar_width = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.ui.tick_ms = 0;
    assert!(s.validate().is_err());
}

#[test]
fn resolve_config_path_prefers_spotspot_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SPOTSPOT_CONFIG_PATH", "/tmp/spotspot-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/spotspot-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("spotspot")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("spotspot")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 80
volume_step = 5

[ui]
bar_width = 40
tick_ms = 250
color = false
show_controls = false

[library]
extensions = ["flac"]
recursive = true
max_depth = 2
include_hidden = false
follow_links = false

[log]
level = "debug"
file = "/tmp/spotspot.log"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SPOTSPOT_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SPOTSPOT__UI__BAR_WIDTH");

    let s = Settings::load(None).unwrap();
    assert_eq!(s.audio.initial_volume, 80);
    assert_eq!(s.audio.volume_step, 5);
    assert_eq!(s.ui.bar_width, 40);
    assert_eq!(s.ui.tick_ms, 250);
    assert!(!s.ui.color);
    assert!(!s.ui.show_controls);
    assert_eq!(s.library.extensions, vec!["flac".to_string()]);
    assert!(s.library.recursive);
    assert_eq!(s.library.max_depth, Some(2));
    assert!(!s.library.include_hidden);
    assert!(!s.library.follow_links);
    assert_eq!(s.log.level, "debug");
    assert_eq!(
        s.log.file.as_deref(),
        Some(std::path::Path::new("/tmp/spotspot.log"))
    );
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[ui]
bar_width = 50
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SPOTSPOT_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SPOTSPOT__UI__BAR_WIDTH", "20");

    let s = Settings::load(None).unwrap();
    assert_eq!(s.ui.bar_width, 20);
}

#[test]
fn explicit_config_path_must_exist() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("SPOTSPOT_CONFIG_PATH");

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Settings::load(Some(&missing)).is_err());
}

#[test]
fn settings_serialize_to_toml() {
    let s = Settings::default();
    let text = toml::to_string_pretty(&s).unwrap();
    assert!(text.contains("[audio]"));
    assert!(text.contains("bar_width = 30"));
    assert!(!text.contains("max_depth"));
}
