//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "comedor";
const APPLICATION: &str = "comedor";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/comedor` or `~/.config/comedor`
/// - macOS: `~/Library/Application Support/org.comedor.comedor`
/// - Windows: `C:\Users\<User>\AppData\Roaming\comedor\comedor\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the cache directory, where logs live.
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Default table configuration file.
pub fn table_config() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("table.json"))
}
