//! Command line interface.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use folio_render::{ThemeContext, ThemeSet};
use tracing::{debug, info};

use crate::config::{SiteConfig, CONFIG_FILE};

/// Theme and stylesheet tooling for a Folio site.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub struct Cli {
    /// Site configuration file [default: folio.yaml, if present]
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile the site's themes into one stylesheet
    Css {
        /// Extra theme files, named by file stem
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Base path or URL for theme assets, overriding the config
        #[arg(short, long)]
        base: Option<String>,

        /// Write the stylesheet to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Print a resolved section as JSON
    Section {
        /// Section name [default: default]
        key: Option<String>,

        /// Theme to resolve against [default: first configured theme]
        #[arg(short, long)]
        theme: Option<String>,
    },

    /// Print the complete locale as JSON
    Locale,
}

impl Cli {
    /// Loads the configuration named by `--config`, or `folio.yaml` in the
    /// current directory when it exists.
    pub fn load_config(&self) -> Result<SiteConfig> {
        match &self.config {
            Some(path) => SiteConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display())),
            None if Path::new(CONFIG_FILE).is_file() => {
                SiteConfig::from_file(CONFIG_FILE).context("loading folio.yaml")
            }
            None => {
                debug!("no config file, using built-in defaults");
                Ok(SiteConfig::default())
            }
        }
    }
}

/// Runs a parsed command, writing its output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = cli.load_config()?;

    match &cli.command {
        Command::Css {
            files,
            base,
            output,
        } => {
            let config = config.with_base(base.clone());
            let mut themes = config.load_themes().context("loading themes")?;
            add_files(&mut themes, files)?;

            let css = themes.compile(&config.compiler());
            match output {
                Some(path) => {
                    std::fs::write(path, &css)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), themes = themes.len(), "wrote stylesheet");
                }
                None => out.write_all(css.as_bytes())?,
            }
        }
        Command::Section { key, theme } => {
            let mut context = ThemeContext::new(config.load_themes().context("loading themes")?);
            if let Some(name) = theme {
                if !context.select(name) {
                    bail!("unknown theme: {}", name);
                }
            }

            let section = context.section(key.as_deref());
            serde_json::to_writer_pretty(&mut *out, &section)?;
            writeln!(out)?;
        }
        Command::Locale => {
            let locale = config.load_locale().context("loading locale")?;
            serde_json::to_writer_pretty(&mut *out, &locale)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn add_files(themes: &mut ThemeSet, files: &[PathBuf]) -> Result<()> {
    for path in files {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| format!("invalid theme file name: {}", path.display()))?;
        themes
            .add_file(name, path)
            .with_context(|| format!("loading theme {}", path.display()))?;
    }
    Ok(())
}
