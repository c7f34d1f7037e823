use std::path::PathBuf;

/// Get the XDG config directory, respecting XDG_CONFIG_HOME
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(xdg_config).join("slate")
    } else {
        directories::ProjectDirs::from("com", "slate", "slate")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Get the XDG data directory, respecting XDG_DATA_HOME
pub fn data_dir() -> PathBuf {
    if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("slate")
    } else {
        directories::ProjectDirs::from("com", "slate", "slate")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Saved session (token + user record)
pub fn session_path() -> PathBuf {
    config_dir().join("session.toml")
}

/// App settings file
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// Local workspace snapshot, the client-side cache of the last listing
pub fn snapshot_path() -> PathBuf {
    data_dir().join("workspace.json")
}
