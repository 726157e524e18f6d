//! Command-line argument parsing for the wizard
//!
//! Supports:
//! - Rendering a configuration from a selection file, share link or preset
//! - Delivering it to stdout, a file, the clipboard, a directory or the listener
//! - Inspecting keymaps and settings of a selection
//! - Share links, installer scripts, import and plugin search

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::TargetOs;
use crate::delivery::SaveEncoding;
use crate::keymap::KeyPress;

/// Generate Neovim configurations
#[derive(Parser, Debug)]
#[command(name = "nvim-wizard", version, about = "Generate Neovim configurations")]
pub struct CliArgs {
    /// Log debug output to the console
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render init.lua and deliver it
    Generate {
        #[command(flatten)]
        source: SelectionSource,
        #[command(flatten)]
        sinks: Sinks,
        /// Regenerate and redeliver whenever the selection file changes
        #[arg(long)]
        watch: bool,
    },
    /// Show effective keybindings and conflicts
    Keymaps {
        #[command(flatten)]
        source: SelectionSource,
        /// Print the overrides as a keymap.yaml instead
        #[arg(long)]
        yaml: bool,
        /// Print every catalog default as a keymap.yaml
        #[arg(long, conflicts_with = "yaml")]
        defaults: bool,
    },
    /// Rebind an action by naming the keys pressed, e.g. `bind save_file ctrl+s`
    Bind {
        #[arg(value_name = "ACTION")]
        action: String,
        /// Key presses: `space w`, `ctrl+s`, `alt+shift+f`
        #[arg(value_name = "KEYS", value_parser = parse_key_press, required_unless_present = "reset")]
        keys: Vec<KeyPress>,
        /// Restore the catalog default instead
        #[arg(long, conflicts_with = "keys")]
        reset: bool,
        /// Selection file to update (default: the persisted selection)
        #[arg(long, value_name = "FILE")]
        selection: Option<PathBuf>,
    },
    /// Show settings with their effective values
    Settings {
        #[command(flatten)]
        source: SelectionSource,
        /// Include settings hidden by their dependencies
        #[arg(long)]
        all: bool,
    },
    /// Print a shareable link for the selection
    Share {
        #[command(flatten)]
        source: SelectionSource,
        /// Open the link in the browser
        #[arg(long)]
        open: bool,
    },
    /// Print an installer script
    InstallScript {
        /// Target OS (macos, linux, windows); defaults to this machine
        #[arg(long, value_parser = parse_os)]
        os: Option<TargetOs>,
        #[command(flatten)]
        source: SelectionSource,
        /// Write the script to its conventional file name instead of stdout
        #[arg(long)]
        save: bool,
    },
    /// Print the Lua snippet that starts the companion listener
    ListenerScript {
        #[arg(long, value_name = "N")]
        port: Option<u16>,
        #[arg(long, value_name = "T")]
        token: Option<String>,
    },
    /// Check that the companion listener is running
    Ping,
    /// Parse an existing init.lua into a selection
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Store the result as the persisted selection
        #[arg(long)]
        save: bool,
    },
    /// Analyze `:checkhealth` output and suggest fixes
    Health {
        /// Report file; reads stdin when omitted or `-`
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Plugin catalog
    Plugins {
        #[command(subcommand)]
        command: PluginCommand,
    },
    /// List preset stacks
    Presets {
        /// Print one preset's selection as YAML
        #[arg(long, value_name = "ID")]
        show: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PluginCommand {
    /// Fuzzy search the catalog
    Search {
        #[arg(value_name = "QUERY")]
        query: String,
    },
    /// List catalog plugins
    List,
}

/// Where the selection comes from; at most one may be given
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct SelectionSource {
    /// Selection YAML file
    #[arg(long, value_name = "FILE")]
    pub selection: Option<PathBuf>,
    /// Share link or its query string
    #[arg(long, value_name = "QUERY")]
    pub share: Option<String>,
    /// Preset id
    #[arg(long, value_name = "ID")]
    pub preset: Option<String>,
}

/// Delivery targets for `generate`
#[derive(Args, Debug, Clone, Default)]
pub struct Sinks {
    /// Write to FILE
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,
    /// Save init.lua into the configured download directory
    #[arg(long)]
    pub download: bool,
    /// Copy to the clipboard
    #[arg(long)]
    pub copy: bool,
    /// Send to the companion listener
    #[arg(long)]
    pub push: bool,
    /// Body encoding used with --push (json, multipart)
    #[arg(long, value_parser = parse_encoding, default_value = "multipart")]
    pub encoding: SaveEncoding,
    /// Write init.lua into DIR, backing up an existing one
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,
    /// Choose the directory with a folder picker
    #[arg(long, conflicts_with = "dir")]
    pub pick_dir: bool,
}

impl Sinks {
    /// No explicit sink means stdout
    pub fn is_empty(&self) -> bool {
        self.output.is_none()
            && !self.download
            && !self.copy
            && !self.push
            && self.dir.is_none()
            && !self.pick_dir
    }
}

/// A resolved selection source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Share(String),
    Preset(String),
    /// The persisted `selection.yaml`, else an empty selection
    Persisted,
}

impl SelectionSource {
    pub fn resolve(&self) -> Source {
        if let Some(path) = &self.selection {
            Source::File(path.clone())
        } else if let Some(query) = &self.share {
            Source::Share(query.clone())
        } else if let Some(id) = &self.preset {
            Source::Preset(id.clone())
        } else {
            Source::Persisted
        }
    }
}

fn parse_os(s: &str) -> Result<TargetOs, String> {
    TargetOs::parse(s).ok_or_else(|| format!("unknown OS '{}' (macos, linux, windows)", s))
}

fn parse_key_press(s: &str) -> Result<KeyPress, String> {
    KeyPress::parse(s).ok_or_else(|| format!("unknown key '{}'", s))
}

fn parse_encoding(s: &str) -> Result<SaveEncoding, String> {
    SaveEncoding::parse(s).ok_or_else(|| format!("unknown encoding '{}' (json, multipart)", s))
}
