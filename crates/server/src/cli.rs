//! CLI argument parsing and subcommand dispatch.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use taskhub_core::seed::{self, SeedProblem};
use taskhub_core::Config;

use crate::startup;

#[derive(Parser, Debug)]
#[command(name = "taskhub", version, about = "In-memory task management REST server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server (default).
    Serve {
        /// Override the configured listen port.
        #[arg(long)]
        port: Option<u16>,
        /// Override the configured listen host.
        #[arg(long)]
        host: Option<String>,
    },
    /// Validate a seed file without starting the server.
    CheckSeed {
        /// Seed file; defaults to the configured seed or the embedded dataset.
        path: Option<PathBuf>,
    },
}

/// Run the selected subcommand. No subcommand means `serve`.
pub async fn dispatch(mut config: Config, cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Command::Serve { port: None, host: None });
    match command {
        Command::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            startup::serve(&config).await
        }
        Command::CheckSeed { path } => {
            let path = path.or(config.seed.path);
            check_seed(path.as_deref())
        }
    }
}

fn check_seed(path: Option<&Path>) -> anyhow::Result<()> {
    let (label, json) = match path {
        Some(path) => (path.display().to_string(), std::fs::read_to_string(path)?),
        None => ("embedded dataset".to_string(), seed::DEFAULT_SEED.to_string()),
    };

    let problems = seed::check_seed(&json)?;
    if problems.is_empty() {
        info!("Seed {} is valid", label);
        return Ok(());
    }

    for problem in &problems {
        println!("{}", format_problem(problem));
    }
    anyhow::bail!("{} problem(s) found in seed {}", problems.len(), label)
}

fn format_problem(problem: &SeedProblem) -> String {
    match problem.id {
        Some(id) => format!("  tasks[{}] (id {}): {}", problem.index, id, problem.message),
        None => format!("  tasks[{}]: {}", problem.index, problem.message),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::try_parse_from(["taskhub"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from(["taskhub", "serve", "--port", "8080"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Serve { port: Some(8080), host: None })
        );
    }

    #[test]
    fn check_seed_takes_optional_path() {
        let cli = Cli::try_parse_from(["taskhub", "check-seed", "seed.json"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::CheckSeed { path: Some(PathBuf::from("seed.json")) })
        );
    }

    #[test]
    fn embedded_seed_checks_clean() {
        assert!(check_seed(None).is_ok());
    }

    #[test]
    fn invalid_seed_file_fails_the_check() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"tasks":[{{"id":1,"title":"a","description":"b","completed":"no"}}]}}"#
        )
        .unwrap();
        let err = check_seed(Some(file.path())).unwrap_err();
        assert!(err.to_string().starts_with("1 problem(s) found"));
    }

    #[test]
    fn problems_name_record_and_id() {
        let problem = SeedProblem {
            index: 2,
            id: Some(7),
            message: "duplicate id 7".into(),
        };
        assert_eq!(format_problem(&problem), "  tasks[2] (id 7): duplicate id 7");
    }
}
