//! Command-line interface for tabs-extra.
//!
//! The binary exposes the parts of the controller that work without an
//! editor attached: menu generation and installation, the version check, the
//! JSON sanitizer, and support info.

use crate::menu::{self, MenuPaths, UpgradeCheck};
use crate::support::SupportInfo;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabs_extra_config::{Settings, sanitize_json};

/// tabs-extra - tab session controller utilities
#[derive(Parser)]
#[command(name = "tabs-extra")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set debug log level (overrides RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the tab context menu
    Menu {
        /// Render the override variant
        #[arg(long = "override")]
        override_menu: bool,
    },

    /// Install or upgrade the tab context menu
    InstallMenu {
        /// Install the override menu instead of the default one
        #[arg(long = "override")]
        override_menu: bool,

        /// Package directory to install into
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Remove the override menu and reinstall the default one
    UninstallOverrideMenu {
        /// Package directory to uninstall from
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Install the menu on first run, or report a pending format upgrade
    CheckVersion {
        /// Package directory to check
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Strip comments and dangling commas from a JSON file
    Sanitize {
        file: PathBuf,

        /// Keep line numbers of the original file
        #[arg(long)]
        preserve_lines: bool,
    },

    /// Print environment details for bug reports
    SupportInfo,
}

fn menu_paths(dir: Option<PathBuf>) -> MenuPaths {
    dir.map_or_else(MenuPaths::default_location, |d| MenuPaths::under(&d))
}

fn load_settings() -> Result<Settings> {
    Settings::load().context("Failed to load settings")
}

/// Run a parsed subcommand
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Menu { override_menu } => {
            print!("{}", menu::menu_text(&load_settings()?, override_menu)?);
        }
        Commands::InstallMenu { override_menu, dir } => {
            let paths = menu_paths(dir);
            let settings = load_settings()?;
            if override_menu {
                menu::install_override_menu(&paths, &settings)?;
                println!("Installed override menu to {}", paths.override_menu().display());
            } else {
                menu::install_default_menu(&paths, &settings)?;
                println!("Installed menu to {}", paths.user_menu().display());
            }
        }
        Commands::UninstallOverrideMenu { dir } => {
            let paths = menu_paths(dir);
            menu::uninstall_override_menu(&paths, &load_settings()?)?;
            println!("Override menu removed; default menu reinstalled");
        }
        Commands::CheckVersion { dir } => {
            let paths = menu_paths(dir);
            match menu::check_for_upgrade(&paths, &load_settings()?)? {
                UpgradeCheck::Installed => {
                    println!("Installed menu to {}", paths.user_menu().display())
                }
                UpgradeCheck::UpToDate => println!("Menu is up to date ({})", menu::MENU_FORMAT),
                UpgradeCheck::UpgradeAvailable(message) => print!("{message}"),
            }
        }
        Commands::Sanitize {
            file,
            preserve_lines,
        } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let clean = sanitize_json(&text, preserve_lines);
            serde_json::from_str::<serde_json::Value>(&clean)
                .with_context(|| format!("{} is not valid JSON after sanitizing", file.display()))?;
            print!("{clean}");
        }
        Commands::SupportInfo => {
            print!("{}", SupportInfo::new("standalone").render());
        }
    }
    Ok(())
}
