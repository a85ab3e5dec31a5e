//! Generate command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{info, warn};

use chronicle_changelog::{Changelog, ChangelogGenerator, OutputDispatcher};
use chronicle_core::config::{load_config_or_default, Config, OutputConfig};
use chronicle_git::{GitCli, GitRepo};

use crate::cli::{output, Cli, OutputFormat};

/// Generate the changelog
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Print the changelog to stdout (the default when no output is configured)
    #[arg(short, long)]
    pub print: bool,

    /// Also write Markdown to this path
    #[arg(long, value_name = "PATH")]
    pub markdown: Vec<PathBuf>,

    /// Also write HTML to this path
    #[arg(long, value_name = "PATH")]
    pub html: Vec<PathBuf>,

    /// Also write wiki markup to this path
    #[arg(long, value_name = "PATH")]
    pub wiki: Vec<PathBuf>,

    /// Skip the output files listed in the configuration
    #[arg(long)]
    pub no_config_outputs: bool,

    /// Include all commits (don't filter by type)
    #[arg(long)]
    pub all: bool,

    /// Maximum number of tag lookups running at once
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(all = self.all, print = self.print, "executing generate command");
        let cwd = std::env::current_dir()?;
        let (mut config, _) = load_config_or_default(&cwd);

        let repo = GitRepo::discover(&cwd)?;
        let git = repo.cli()?;

        let repo_url = match config.changelog.repo_url {
            Some(_) => None,
            None => repo
                .repository_url(&config.git.remote)
                .unwrap_or_else(|e| {
                    warn!(remote = %config.git.remote, error = %e, "could not read remote URL");
                    None
                }),
        };

        if self.no_config_outputs {
            config.output = Default::default();
        }
        self.add_targets(&mut config, &cwd);

        let rt = tokio::runtime::Runtime::new()?;
        let changelog = rt.block_on(self.generate(git, &config, repo_url))?;

        if cli.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&changelog.releases)?);
        }

        if changelog.is_empty() {
            if !cli.quiet {
                output::warning("No released or unreleased commits to list.");
            }
            return Ok(());
        }

        let printed = self.prints_document(cli.format, &config.output);
        if printed {
            print!("{}", changelog.document);
        }

        let written =
            OutputDispatcher::new(repo.path()).dispatch(&changelog.document, &config.output)?;

        if !cli.quiet && cli.format == OutputFormat::Text {
            for path in &written {
                let message = format!("Changelog written to {}", output::path(path));
                // stdout carries the document
                if printed {
                    output::success_stderr(&message);
                } else {
                    output::success(&message);
                }
            }
        }

        Ok(())
    }

    async fn generate(
        &self,
        git: GitCli,
        config: &Config,
        repo_url: Option<String>,
    ) -> chronicle_core::Result<Changelog> {
        let records = git.commit_log().await?;

        let mut generator = ChangelogGenerator::new(git, config.changelog.clone())?
            .with_limit(self.jobs.unwrap_or(config.git.max_concurrent_queries))
            .include_all(self.all);
        if let Some(url) = repo_url {
            generator = generator.with_repo_url(url);
        }

        generator.generate(&records).await
    }

    /// Whether the document itself goes to stdout
    fn prints_document(&self, format: OutputFormat, targets: &OutputConfig) -> bool {
        format == OutputFormat::Text && (self.print || targets.is_empty())
    }

    /// Append targets given on the command line, resolved against `cwd`
    fn add_targets(&self, config: &mut Config, cwd: &Path) {
        let resolve = |paths: &[PathBuf]| paths.iter().map(|p| cwd.join(p)).collect::<Vec<_>>();

        config.output.markdown.extend(resolve(&self.markdown));
        config.output.html.extend(resolve(&self.html));
        config.output.wiki.extend(resolve(&self.wiki));
    }
}
