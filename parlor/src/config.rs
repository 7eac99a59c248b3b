use std::path::Path;

use crate::project_path::ProjectPath;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Login {
    pub nickname: String,
}

impl Default for Login {
    fn default() -> Self {
        Self {
            nickname: "nickname".into(),
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Rooms {
    #[serde(default)]
    pub list: Vec<String>,
    #[serde(default = "default_server")]
    pub server: String,
}

impl Default for Rooms {
    fn default() -> Self {
        Self {
            list: vec!["#lobby:localhost".into()],
            server: default_server(),
        }
    }
}

fn default_server() -> String {
    "localhost".into()
}

//
// LAYOUT
//

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Layout {
    #[serde(default = "default_room_list_width")]
    pub room_list_width: u16,
    #[serde(default = "default_sender_width")]
    pub sender_width: u16,
    #[serde(default = "default_scroll_step")]
    pub scroll_step: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            room_list_width: default_room_list_width(),
            sender_width: default_sender_width(),
            scroll_step: default_scroll_step(),
        }
    }
}

fn default_room_list_width() -> u16 {
    40
}

fn default_sender_width() -> u16 {
    30
}

fn default_scroll_step() -> usize {
    5
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub login: Login,
    #[serde(default)]
    pub rooms: Rooms,
    #[serde(default, skip_serializing_if = "is_default")]
    pub layout: Layout,
}

fn is_default<T>(t: &T) -> bool
where
    T: Default + PartialEq,
{
    t == &T::default()
}

impl Config {
    /// Falls back to defaults when the file is missing or malformed.
    pub fn new(config_name: &str) -> Self {
        Self::read(config_name).unwrap_or_default()
    }

    pub fn exists(config_name: &str) -> bool {
        ProjectPath::config_file(config_name).is_some_and(|path| path.exists())
    }

    pub fn save(&self, config_name: &str) -> color_eyre::Result<()> {
        let config_path = ProjectPath::config_file(config_name)
            .ok_or(color_eyre::eyre::Error::msg("Invalid Path"))?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> color_eyre::Result<()> {
        let result = toml::to_string(self)?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(config_path, result)?;
        Ok(())
    }

    fn read(config_name: &str) -> color_eyre::Result<Self> {
        let config_path = ProjectPath::config_file(config_name)
            .ok_or(color_eyre::eyre::eyre!("Invalid config"))?;
        Self::read_from(&config_path)
    }

    pub fn read_from(config_path: &Path) -> color_eyre::Result<Self> {
        let content = std::fs::read_to_string(config_path)?;
        Ok(Self::parse(&content))
    }

    pub fn parse(content: &str) -> Self {
        toml::from_str::<Config>(content).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = Config::parse(
            r##"
            [login]
            nickname = "farine"

            [rooms]
            list = ["#rust:example.org", "#tokio:example.org"]
            "##,
        );
        assert_eq!(config.login.nickname, "farine");
        assert_eq!(config.rooms.list.len(), 2);
        assert_eq!(config.rooms.server, "localhost");
        assert_eq!(config.layout, Layout::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        assert_eq!(Config::parse("[login\nnickname ="), Config::default());
    }

    #[test]
    fn default_layout_is_not_written() -> color_eyre::Result<()> {
        let content = toml::to_string(&Config::default())?;
        assert!(!content.contains("[layout]"));
        assert_eq!(Config::parse(&content), Config::default());
        Ok(())
    }

    #[test]
    fn save_then_read_from_disk() -> color_eyre::Result<()> {
        let path = std::env::temp_dir()
            .join(format!("parlor-test-{}", std::process::id()))
            .join("parlor.toml");
        let mut config = Config::default();
        config.layout.scroll_step = 9;
        config.save_to(&path)?;

        assert_eq!(Config::read_from(&path)?, config);
        if let Some(parent) = path.parent() {
            std::fs::remove_dir_all(parent)?;
        }
        Ok(())
    }
}
