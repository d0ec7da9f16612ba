//! Settings discovery logic.

use std::path::{Path, PathBuf};

use log::debug;
use miette::{Result, miette};
use presave_core::{PresaveError, Settings};

/// Project settings file name.
pub const SETTINGS_FILE_NAME: &str = ".presave.json";

/// Finds the project settings file by searching from the given directory upwards.
pub fn find_settings_from(start: &Path) -> presave_core::Result<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let candidate = current.join(SETTINGS_FILE_NAME);

        if candidate.is_file() {
            return Ok(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => return Err(PresaveError::SettingsNotFound(start.to_path_buf())),
        }
    }
}

/// Returns the user-level settings path (`<config dir>/presave/settings.json`).
pub fn user_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("presave").join("settings.json"))
}

/// Loads the settings that apply to files under `start_dir`.
///
/// An explicit path is used as-is. Otherwise user settings are merged under
/// the nearest project settings file. Called once per event, never cached.
pub fn load_settings(explicit: Option<&Path>, start_dir: &Path) -> Result<Settings> {
    if let Some(path) = explicit {
        return Settings::load(path).map_err(|e| miette!("{}", e));
    }

    let mut settings = Settings::new(SETTINGS_FILE_NAME);
    let mut found = false;

    if let Some(user) = user_settings_path().filter(|p| p.is_file()) {
        debug!("loading user settings from {}", user.display());
        settings = settings.merge(Settings::load(&user).map_err(|e| miette!("{}", e))?);
        found = true;
    }

    if let Ok(project) = find_settings_from(start_dir) {
        debug!("loading project settings from {}", project.display());
        settings = settings.merge(Settings::load(&project).map_err(|e| miette!("{}", e))?);
        found = true;
    }

    if !found {
        return Err(miette!(
            "No settings found: create {} (see 'presave init') or pass --settings",
            SETTINGS_FILE_NAME
        ));
    }

    Ok(settings)
}

/// Returns the directory settings are searched from for a file.
pub fn start_dir(file: &Path) -> PathBuf {
    let absolute = std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf());
    absolute
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the syntax identifier of a file: the override, or its extension.
pub fn syntax_for(file: &Path, syntax: Option<&str>) -> Result<String> {
    if let Some(syntax) = syntax {
        return Ok(syntax.to_string());
    }

    file.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .ok_or_else(|| {
            miette!(
                "Cannot detect the syntax of {}; pass --syntax",
                file.display()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_find_settings_in_current() {
        let dir = tempdir().unwrap();
        let settings = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&settings, "{}").unwrap();

        let result = find_settings_from(dir.path()).unwrap();
        assert_eq!(result, settings);
    }

    #[test]
    fn test_find_settings_in_parent() {
        let dir = tempdir().unwrap();
        let settings = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&settings, "{}").unwrap();

        let subdir = dir.path().join("src").join("app");
        fs::create_dir_all(&subdir).unwrap();

        let result = find_settings_from(&subdir).unwrap();
        assert_eq!(result, settings);
    }

    #[test]
    fn test_find_settings_not_found() {
        // Searching from / should fail as there's no settings file at the root
        let result = find_settings_from(Path::new("/"));
        assert!(matches!(result, Err(PresaveError::SettingsNotFound(p)) if p == Path::new("/")));
    }

    #[test]
    fn test_load_explicit_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{ "elm": { "command_line": ["elm-format"] } }"#).unwrap();

        let settings = load_settings(Some(&path), Path::new("/")).unwrap();
        assert_eq!(settings.name, "custom.json");
        assert!(settings.is_applicable("elm"));
    }

    #[test]
    fn test_load_project_settings() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE_NAME),
            r#"{ "rs": { "command_line": ["rustfmt"] } }"#,
        )
        .unwrap();

        let settings = load_settings(None, dir.path()).unwrap();
        assert!(settings.is_applicable("rs"));
        assert_eq!(settings.name, SETTINGS_FILE_NAME);
    }

    #[test]
    fn test_start_dir() {
        assert_eq!(
            start_dir(Path::new("/some/project/src/Main.elm")),
            Path::new("/some/project/src")
        );
    }

    #[test]
    fn test_syntax_for() {
        assert_eq!(syntax_for(Path::new("/src/Main.elm"), None).unwrap(), "elm");
        assert_eq!(
            syntax_for(Path::new("/src/Main.elm"), Some("elm-0.19")).unwrap(),
            "elm-0.19"
        );
        assert!(syntax_for(Path::new("/src/Makefile"), None).is_err());
    }
}
