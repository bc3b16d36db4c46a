use anyhow::Context;
use log::warn;
use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Everything the menu needs from the process environment, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub is_hyprland: bool,
    pub color_file: Option<PathBuf>,
}

impl Environment {
    pub fn detect() -> Self {
        Self::from_lookup(|key| env::var_os(key))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let color_file = match color_file(&lookup) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("{e:?}");
                None
            }
        };

        Self {
            is_hyprland: lookup("HYPRLAND_INSTANCE_SIGNATURE").is_some(),
            color_file,
        }
    }
}

fn color_file(lookup: impl Fn(&str) -> Option<OsString>) -> anyhow::Result<PathBuf> {
    let cache = match lookup("XDG_CACHE_HOME").filter(|dir| !dir.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => Path::new(
            &lookup("HOME").context("Can't find pywal's cache (missing $HOME)")?,
        )
        .join(".cache"),
    };

    Ok(cache.join("wal").join("colors.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn detect(vars: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), OsString::from(v)))
            .collect();
        Environment::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_hyprland_signature() {
        assert!(detect(&[("HYPRLAND_INSTANCE_SIGNATURE", "abc_123")]).is_hyprland);
        assert!(!detect(&[("HOME", "/home/user")]).is_hyprland);
    }

    #[test]
    fn test_color_file_from_home() {
        assert_eq!(
            detect(&[("HOME", "/home/user")]).color_file,
            Some(PathBuf::from("/home/user/.cache/wal/colors.json"))
        );
    }

    #[test]
    fn test_color_file_from_xdg_cache() {
        let environment = detect(&[("HOME", "/home/user"), ("XDG_CACHE_HOME", "/tmp/cache")]);
        assert_eq!(
            environment.color_file,
            Some(PathBuf::from("/tmp/cache/wal/colors.json"))
        );

        let environment = detect(&[("HOME", "/home/user"), ("XDG_CACHE_HOME", "")]);
        assert_eq!(
            environment.color_file,
            Some(PathBuf::from("/home/user/.cache/wal/colors.json"))
        );
    }

    #[test]
    fn test_no_color_file() {
        assert_eq!(detect(&[]).color_file, None);
    }
}
