use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use weather_docs_core::{Config, Generator, TopicAssembler, render_file};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-docs",
    version,
    about = "Generate Flare weather topics, TOCs and snippets"
)]
pub struct Cli {
    /// Verbose logging with source locations.
    #[arg(long, global = true)]
    pub debug: bool,

    /// Use this config file instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the Flare project root.
    Configure,

    /// Fetch weather for every city and rewrite topics, TOCs and snippets.
    Generate {
        /// Flare project root; overrides the configured one.
        #[arg(long)]
        root: Option<PathBuf>,

        /// Number of most populous cities (1-100).
        #[arg(long)]
        count: Option<u32>,

        /// Extra city by ASCII name; repeatable. Replaces the configured list.
        #[arg(long = "extra")]
        extra: Vec<String>,
    },

    /// Render one topic from a saved One Call response.
    Render {
        /// Provider JSON file.
        #[arg(long)]
        input: PathBuf,

        /// Topic file to create or update.
        #[arg(long)]
        output: PathBuf,

        /// Page heading used when the topic is created.
        #[arg(long)]
        title: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config_path = match &self.config {
            Some(path) => path.clone(),
            None => Config::config_file_path()?,
        };
        let mut config = Config::load_from(&config_path)?;

        match self.command {
            Command::Configure => {
                let api_key = Password::new("OpenWeather API key:")
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;
                let default_root = config.project.root.display().to_string();
                let root = Text::new("Flare project root:")
                    .with_default(&default_root)
                    .prompt()
                    .context("Failed to read project root")?;

                config.set_api_key(api_key.trim().to_string());
                config.project.root = PathBuf::from(root.trim());
                config.save_to(&config_path)?;

                println!("Configuration saved to {}", config_path.display());
            }
            Command::Generate { root, count, extra } => {
                if let Some(root) = root {
                    config.project.root = root;
                }
                if let Some(count) = count {
                    config.cities.count = count;
                }
                if !extra.is_empty() {
                    config.cities.extra = extra;
                }

                let summary = Generator::from_config(&config)?.run().await?;

                println!("Generated {} topics", summary.topics);
                for (continent, topics) in &summary.per_region {
                    println!("  {continent}: {topics}");
                }
            }
            Command::Render { input, output, title } => {
                let assembler = TopicAssembler::new(config.current_fields()?);
                render_file(&input, &output, &title, &assembler)?;
                println!("Rendered {}", output.display());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_overrides_parse() {
        let cli = Cli::parse_from([
            "weather-docs",
            "generate",
            "--root",
            "/srv/docs",
            "--count",
            "5",
            "--extra",
            "Nuernberg",
            "--extra",
            "Chicago",
        ]);

        match cli.command {
            Command::Generate { root, count, extra } => {
                assert_eq!(root, Some(PathBuf::from("/srv/docs")));
                assert_eq!(count, Some(5));
                assert_eq!(extra, ["Nuernberg", "Chicago"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "weather-docs",
            "render",
            "--input",
            "berlin.json",
            "--output",
            "Berlin.htm",
            "--title",
            "Berlin",
            "--debug",
        ]);
        assert!(cli.debug);
        assert!(matches!(cli.command, Command::Render { .. }));
    }
}
