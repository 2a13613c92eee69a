use super::{SERVER_DESCRIPTOR, artifact_path, source_path};
use crate::models::{ProjectConfig, ServerConfig};

/// Project name used when nothing else can be inferred
pub const DEFAULT_PROJECT_NAME: &str = "gamemode";

pub const DEFAULT_PROJECT_VERSION: &str = "1.0.0";

/// Compiler directory shipped with the open.mp server package
pub const DEFAULT_PAWNCC_PATH: &str = "qawno";

pub const DEFAULT_PORT: i64 = 7777;

pub const DEFAULT_MAX_PLAYERS: i64 = 50;

/// Project configuration used when there is no descriptor and no source file.
pub fn default_project_config() -> ProjectConfig {
    ProjectConfig {
        name: DEFAULT_PROJECT_NAME.to_string(),
        version: DEFAULT_PROJECT_VERSION.to_string(),
        main_file: source_path(DEFAULT_PROJECT_NAME).into_string(),
        output_file: artifact_path(DEFAULT_PROJECT_NAME).into_string(),
        resources: Vec::new(),
        plugins: Vec::new(),
        server_cfg: SERVER_DESCRIPTOR.to_string(),
        author: String::new(),
        repository: String::new(),
        pawncc_path: DEFAULT_PAWNCC_PATH.to_string(),
    }
}

/// Server configuration used when `config.json` is absent.
pub fn default_server_config() -> ServerConfig {
    ServerConfig {
        hostname: "Open.MP Server".to_string(),
        port: DEFAULT_PORT,
        max_players: DEFAULT_MAX_PLAYERS,
        language: "English".to_string(),
        gamemode: DEFAULT_PROJECT_NAME.to_string(),
        plugins: Vec::new(),
        web_url: "open.mp".to_string(),
        rcon_password: String::new(),
        password: String::new(),
    }
}
