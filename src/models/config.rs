use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Project descriptor from project.json
///
/// Contains build-level configuration: source and output paths, staged
/// resources and plugins, and the location of the pawncc compiler.
///
/// Fields missing from an existing descriptor, or set to `null`, take their
/// zero value; the file is otherwise used verbatim and never merged with
/// inferred defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,

    /// Main `.pwn` source, relative to the project root
    #[serde(deserialize_with = "null_as_default")]
    pub main_file: String,

    /// Compiled `.amx` artifact, relative to the build directory
    #[serde(deserialize_with = "null_as_default")]
    pub output_file: String,

    #[serde(deserialize_with = "null_as_default")]
    pub resources: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub plugins: Vec<String>,

    /// Server descriptor to stage when `config.json` is absent
    #[serde(deserialize_with = "null_as_default")]
    pub server_cfg: String,

    #[serde(deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub repository: String,

    /// Directory containing pawncc; empty means "search PATH"
    #[serde(deserialize_with = "null_as_default")]
    pub pawncc_path: String,
}

impl ProjectConfig {
    /// Directory the compiler is expected in, if one is configured
    pub fn compiler_dir(&self) -> Option<Utf8PathBuf> {
        if self.pawncc_path.is_empty() {
            None
        } else {
            Some(Utf8PathBuf::from(&self.pawncc_path))
        }
    }

    /// Base name of the compiled artifact (e.g. `foo.amx`)
    pub fn output_file_name(&self) -> &str {
        Utf8Path::new(&self.output_file)
            .file_name()
            .unwrap_or(&self.output_file)
    }
}

/// Server descriptor from config.json
///
/// The open.mp server reads this file itself at startup; the CLI only looks at
/// `port` and `gamemode` to decide which launch flags are needed. Numbers are
/// kept as written, out-of-range values included; the server validates them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub port: i64,

    #[serde(rename = "maxplayers", deserialize_with = "null_as_default")]
    pub max_players: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(deserialize_with = "null_as_default")]
    pub gamemode: String,
    #[serde(deserialize_with = "null_as_default")]
    pub plugins: Vec<String>,

    #[serde(rename = "weburl", deserialize_with = "null_as_default")]
    pub web_url: String,

    #[serde(deserialize_with = "null_as_default")]
    pub rcon_password: String,
    #[serde(deserialize_with = "null_as_default")]
    pub password: String,
}
