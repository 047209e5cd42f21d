//! Command-line interface.
//!
//! Flags left unset keep the value from the environment (or the built-in
//! default), so `MCP_*` variables and flags can be mixed freely.

use clap::Parser;
use std::path::PathBuf;

use crate::core::Config;

/// Team prompt server - serves a directory of YAML prompt templates over MCP
#[derive(Debug, Parser)]
#[command(
    name = "prompt_mcp_server",
    about = "Serves a directory of YAML prompt templates over the Model Context Protocol",
    disable_version_flag = true,
    after_help = "Environment: MCP_PROMPTS_DIR, MCP_SERVER_NAME, MCP_LOG_LEVEL, MCP_LOG_TIMESTAMPS, MCP_TRANSPORT (stdio, tcp, http)"
)]
pub struct Cli {
    /// Directory containing prompt files [default: ./prompts]
    #[arg(long, value_name = "DIR")]
    pub prompts_dir: Option<PathBuf>,

    /// Print the server name and version, then exit
    #[arg(long)]
    pub version: bool,

    /// Server name reported to clients [default: team-prompt-server]
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Server version reported to clients [default: the crate version]
    #[arg(long = "ver", value_name = "VERSION")]
    pub server_version: Option<String>,
}

impl Cli {
    /// Overlay the flags that were given onto `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.prompts_dir {
            config.prompts.directory = dir.clone();
        }
        if let Some(name) = &self.name {
            config.server.name = name.clone();
        }
        if let Some(version) = &self.server_version {
            config.server.version = version.clone();
        }
    }
}

/// The `--version` banner.
pub fn version_banner(config: &Config) -> String {
    format!("{} v{}", config.server.name, config.server.version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_flags() {
        let cli = Cli::try_parse_from(["prompt_mcp_server"]).unwrap();
        assert!(cli.prompts_dir.is_none());
        assert!(!cli.version);

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.prompts.directory, PathBuf::from("./prompts"));
        assert_eq!(config.server.name, "team-prompt-server");
    }

    #[test]
    fn test_cli_flags_override_config() {
        let cli = Cli::try_parse_from([
            "prompt_mcp_server",
            "--prompts-dir",
            "/srv/prompts",
            "--name",
            "ops-prompts",
            "--ver",
            "9.9.9",
        ])
        .unwrap();

        let mut config = Config::default();
        config.server.name = "from-env".to_string();
        cli.apply(&mut config);

        assert_eq!(config.prompts.directory, PathBuf::from("/srv/prompts"));
        assert_eq!(config.server.name, "ops-prompts");
        assert_eq!(config.server.version, "9.9.9");
    }

    #[test]
    fn test_cli_version_flag() {
        let cli = Cli::try_parse_from(["prompt_mcp_server", "--version", "--name", "x"]).unwrap();
        assert!(cli.version);

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(
            version_banner(&config),
            format!("x v{}", env!("CARGO_PKG_VERSION"))
        );
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["prompt_mcp_server", "--watch"]).is_err());
    }
}
