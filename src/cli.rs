use clap::{Parser, Subcommand};

/// A CLI tool for open.mp projects
#[derive(Parser, Debug)]
#[command(
    name = "ompcli",
    author,
    version,
    about,
    long_about = "ompcli builds and runs open.mp projects.\n\n\
                  It uses project.json for project configuration and config.json for server settings.",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Log filter (e.g. "debug", "ompcli=trace"); overrides settings
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Initialize a new open.mp project (project.json, config.json, gamemodes/)
    Init {
        /// Project name (default: current directory name)
        #[arg(short, long)]
        name: Option<String>,

        /// Project author
        #[arg(short, long)]
        author: Option<String>,

        /// Path to the pawncc compiler directory (default: qawno)
        #[arg(long)]
        pawncc_path: Option<String>,
    },

    /// Build/compile the open.mp project
    Build {
        /// Stream compiler output while building
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the open.mp project
    Run {
        /// Enable debug mode
        #[arg(short, long)]
        debug: bool,

        /// Port to run the server on (default: port from config.json)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_build_verbose() {
        let cli = Cli::parse_from(["ompcli", "build", "-v"]);
        assert_eq!(cli.command, Commands::Build { verbose: true });
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::parse_from(["ompcli", "run", "--debug", "-p", "7778"]);
        assert_eq!(
            cli.command,
            Commands::Run {
                debug: true,
                port: Some(7778)
            }
        );
    }

    #[test]
    fn test_parse_run_without_port() {
        let cli = Cli::parse_from(["ompcli", "run"]);
        assert_eq!(
            cli.command,
            Commands::Run {
                debug: false,
                port: None
            }
        );
    }

    #[test]
    fn test_parse_init_and_global_log_level() {
        let cli = Cli::parse_from([
            "ompcli",
            "init",
            "--name",
            "lvdm",
            "--pawncc-path",
            "tools/qawno",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(
            cli.command,
            Commands::Init {
                name: Some("lvdm".to_string()),
                author: None,
                pawncc_path: Some("tools/qawno".to_string()),
            }
        );
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
