use std::path::PathBuf;

use directories::ProjectDirs;

pub struct ProjectPath;

impl ProjectPath {
    pub fn project_dir() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "share", "parlor")
    }

    pub fn cache_dir() -> Option<PathBuf> {
        Self::project_dir().map(|v| v.cache_dir().to_path_buf())
    }

    pub fn config_file(config_name: &str) -> Option<PathBuf> {
        Self::project_dir().map(|v| v.config_dir().join(config_name))
    }

    pub fn log_name() -> &'static str {
        "app.log"
    }
}
