mod commands;

use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{Shell, generate};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "acf-press")]
#[command(version, about = "Static site generator for WordPress ACF block pages", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Initialize a new site directory
    Init {
        /// Path to create site directory
        path: PathBuf,

        /// WordPress GraphQL endpoint
        #[arg(long, default_value = "https://example.com/graphql")]
        endpoint: String,

        /// Site title
        #[arg(long)]
        title: Option<String>,

        /// Overwrite an existing site.toml
        #[arg(long)]
        force: bool,
    },

    /// Fetch every page and report blocks that would render as placeholders
    Validate {
        /// Path to site directory
        path: PathBuf,

        /// Read pages from a JSON fixture instead of the GraphQL endpoint
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Render pages live from the CMS on a local server
    Preview {
        /// Path to site directory
        path: PathBuf,

        /// Port to serve on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Read pages from a JSON fixture instead of the GraphQL endpoint
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Generate the static site
    Build {
        /// Path to site directory
        path: PathBuf,

        /// Output directory for generated site
        #[arg(short, long)]
        output: PathBuf,

        /// Read pages from a JSON fixture instead of the GraphQL endpoint
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Init {
            path,
            endpoint,
            title,
            force,
        } => commands::init::run(path, endpoint, title, force).await,
        Command::Validate { path, fixture } => commands::validate::run(path, fixture).await,
        Command::Preview {
            path,
            port,
            fixture,
        } => commands::preview::run(path, port, fixture).await,
        Command::Build {
            path,
            output,
            fixture,
        } => commands::build::run(path, output, fixture).await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "acf-press", &mut io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_with_fixture() {
        let cli = Cli::try_parse_from([
            "acf-press",
            "-vv",
            "build",
            "site",
            "--output",
            "dist",
            "--fixture",
            "pages.json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Build {
                path,
                output,
                fixture,
            } => {
                assert_eq!(path, PathBuf::from("site"));
                assert_eq!(output, PathBuf::from("dist"));
                assert_eq!(fixture, Some(PathBuf::from("pages.json")));
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_build_requires_output() {
        assert!(Cli::try_parse_from(["acf-press", "build", "site"]).is_err());
    }
}
