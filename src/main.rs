use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use nvim_wizard::catalog::{Action, Plugin, Section, TargetOs, CATEGORIES};
use nvim_wizard::cli::{CliArgs, Command, PluginCommand, SelectionSource, Sinks, Source};
use nvim_wizard::config::WizardConfig;
use nvim_wizard::delivery::{self, installer, DeliveryContext, INIT_LUA};
use nvim_wizard::fs_watcher::{OutputTracker, SelectionWatcher};
use nvim_wizard::keymap::{
    active_actions, compute_conflicts, default_keymap_yaml, display_tokens, effective_chord,
    is_changed, keymap_to_yaml, load_user_overrides, merge_overrides, reset_one, validate_chord,
    ChordRecorder, KeyPress,
};
use nvim_wizard::settings::visible_settings;
use nvim_wizard::health::{self, Severity};
use nvim_wizard::{config_paths, generator, import, presets, share, Selection};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    nvim_wizard::tracing::init(args.verbose);

    let config = WizardConfig::load();

    match args.command {
        Command::Generate {
            source,
            sinks,
            watch,
        } => run_generate(config, &source, &sinks, watch),
        Command::Keymaps {
            source,
            yaml,
            defaults,
        } => run_keymaps(&config, &source, yaml, defaults),
        Command::Bind {
            action,
            keys,
            reset,
            selection,
        } => run_bind(&config, &action, keys, reset, selection),
        Command::Settings { source, all } => run_settings(&config, &source, all),
        Command::Share { source, open } => run_share(&config, &source, open),
        Command::InstallScript { os, source, save } => {
            run_install_script(&config, os.unwrap_or_else(TargetOs::current), &source, save)
        }
        Command::ListenerScript { port, token } => {
            let port = port.unwrap_or(config.listener_port);
            let token = token.or_else(|| config.listener_token.clone());
            print!("{}", delivery::listener_script(port, token.as_deref()));
            Ok(())
        }
        Command::Ping => {
            let url = config.listener_url();
            let mut ctx = DeliveryContext::new(config);
            delivery::ping(&mut ctx).with_context(|| format!("Listener at {}", url))?;
            println!("Listener at {} is running", url);
            Ok(())
        }
        Command::Import { file, save } => run_import(&file, save),
        Command::Health { file } => run_health(file.as_deref()),
        Command::Plugins { command } => {
            run_plugins(command);
            Ok(())
        }
        Command::Presets { show } => run_presets(show.as_deref()),
    }
}

// ============================================================================
// Selection loading
// ============================================================================

/// The selection a command works on, without keymap file layers
fn load_selection(config: &WizardConfig, source: &SelectionSource) -> Result<Selection> {
    let selection = match source.resolve() {
        Source::File(path) => Selection::load(&path)
            .with_context(|| format!("Failed to load selection from {}", path.display()))?,
        Source::Share(link) => share::from_link(&link),
        Source::Preset(id) => {
            presets::find_preset(&id)
                .ok_or_else(|| anyhow!("Unknown preset '{}'", id))?
                .selection
        }
        Source::Persisted => match config_paths::selection_file().filter(|p| p.exists()) {
            Some(path) => Selection::load(&path)
                .with_context(|| format!("Failed to load selection from {}", path.display()))?,
            None => Selection::default().with_leader(&config.leader_key),
        },
    };

    for (id, chord) in &selection.keymaps {
        if let Err(e) = validate_chord(chord) {
            tracing::warn!("Keymap for {}: {}", id, e);
        }
    }
    Ok(selection)
}

/// Layer keymap files under the selection's own overrides
fn with_file_overrides(selection: Selection) -> Selection {
    let keymaps = merge_overrides(load_user_overrides(), selection.keymaps.clone());
    selection.with_keymaps(keymaps)
}

/// The selection file `--watch` follows
fn watched_path(source: &SelectionSource) -> Result<PathBuf> {
    match source.resolve() {
        Source::File(path) => Ok(path),
        Source::Persisted => {
            config_paths::selection_file().context("Could not determine the config directory")
        }
        Source::Share(_) | Source::Preset(_) => {
            bail!("--watch needs a selection file (--selection or the persisted selection)")
        }
    }
}

// ============================================================================
// generate
// ============================================================================

fn run_generate(
    config: WizardConfig,
    source: &SelectionSource,
    sinks: &Sinks,
    watch: bool,
) -> Result<()> {
    let mut ctx = DeliveryContext::new(config);
    if let Some(dir) = &sinks.dir {
        ctx.set_target_dir(dir.clone());
    }
    if sinks.pick_dir {
        choose_target_dir(&mut ctx)?;
    }

    let selection = with_file_overrides(load_selection(ctx.config(), source)?);
    let text = generator::generate(&selection);
    let first = deliver(&mut ctx, sinks, &text);

    if !watch {
        return first;
    }
    if let Err(e) = first {
        eprintln!("{:#}", e);
    }

    let path = watched_path(source)?;
    let watcher = SelectionWatcher::new(path.clone())
        .with_context(|| format!("Failed to watch {}", path.display()))?;
    let mut tracker = OutputTracker::new();
    tracker.update(&text);
    eprintln!("Watching {} (Ctrl-C to stop)", watcher.path().display());

    while let Some(changed) = watcher.wait_changed(Duration::from_secs(1)) {
        if !changed {
            continue;
        }
        let selection = match Selection::load(watcher.path()) {
            Ok(selection) => with_file_overrides(selection),
            Err(e) => {
                tracing::warn!("Skipping regeneration: {}", e);
                eprintln!("Selection file not usable: {}", e);
                continue;
            }
        };
        let text = generator::generate(&selection);
        if !tracker.update(&text) {
            tracing::debug!("Selection changed without affecting the output");
            continue;
        }
        if let Err(e) = deliver(&mut ctx, sinks, &text) {
            eprintln!("{:#}", e);
        }
    }
    Ok(())
}

#[cfg(feature = "picker")]
fn choose_target_dir(ctx: &mut DeliveryContext) -> Result<()> {
    if !delivery::pick_target_dir(ctx) {
        bail!("No directory chosen");
    }
    // Remember the choice for later runs
    if let Some(dir) = ctx.target_dir() {
        let config = WizardConfig {
            target_dir: Some(dir.to_path_buf()),
            ..ctx.config().clone()
        };
        if let Err(e) = config.save() {
            tracing::warn!("Could not remember target directory: {}", e);
        }
    }
    Ok(())
}

#[cfg(not(feature = "picker"))]
fn choose_target_dir(_ctx: &mut DeliveryContext) -> Result<()> {
    bail!("--pick-dir requires a build with the `picker` feature")
}

/// Hand `text` to every requested sink
///
/// Each sink gets one attempt; a failure is reported and the remaining sinks
/// still run.
fn deliver(ctx: &mut DeliveryContext, sinks: &Sinks, text: &str) -> Result<()> {
    if sinks.is_empty() {
        print!("{}", text);
        return Ok(());
    }

    let mut failures = 0;
    let mut report = |what: &str, result: Result<String, delivery::DeliveryError>| match result {
        Ok(done) => eprintln!("{}", done),
        Err(e) => {
            tracing::warn!("{} failed: {}", what, e);
            eprintln!("{} failed: {}", what, e);
            failures += 1;
        }
    };

    if let Some(path) = &sinks.output {
        report(
            "Write",
            delivery::write_file(path, text).map(|p| format!("Wrote {}", p.display())),
        );
    }
    if sinks.download {
        report(
            "Download",
            delivery::download(ctx, INIT_LUA, text).map(|p| format!("Saved {}", p.display())),
        );
    }
    if sinks.copy {
        report(
            "Copy",
            delivery::copy_text(ctx, text).map(|()| "Copied to clipboard".to_string()),
        );
    }
    if sinks.dir.is_some() || sinks.pick_dir {
        report(
            "Directory write",
            delivery::write_init_lua(ctx, text).map(|written| match written.backup {
                Some(backup) => format!(
                    "Wrote {} (previous config saved as {})",
                    written.path.display(),
                    backup.display()
                ),
                None => format!("Wrote {}", written.path.display()),
            }),
        );
    }
    if sinks.push {
        report(
            "Push",
            delivery::save(ctx, INIT_LUA, text, sinks.encoding).map(|reply| {
                format!(
                    "Sent to listener ({})",
                    reply.path.as_deref().unwrap_or(INIT_LUA)
                )
            }),
        );
    }

    if failures > 0 {
        bail!("{} delivery attempt(s) failed", failures);
    }
    Ok(())
}

// ============================================================================
// keymaps / settings
// ============================================================================

fn run_keymaps(
    config: &WizardConfig,
    source: &SelectionSource,
    yaml: bool,
    defaults: bool,
) -> Result<()> {
    if defaults {
        print!("{}", default_keymap_yaml());
        return Ok(());
    }

    let selection = with_file_overrides(load_selection(config, source)?);
    if yaml {
        print!("{}", keymap_to_yaml(&selection.keymaps)?);
        return Ok(());
    }

    let active = active_actions(selection.plugins.as_slice());
    let conflicts = compute_conflicts(&active, &selection.keymaps);

    let sections = [
        Section::General,
        Section::Navigation,
        Section::Display,
        Section::Terminal,
        Section::Plugin,
    ];
    for section in sections {
        let actions: Vec<Action> = active
            .iter()
            .copied()
            .filter(|action| action.section() == section)
            .collect();
        if actions.is_empty() {
            continue;
        }
        println!("{}", section.title());
        for action in actions {
            let chord = effective_chord(action, &selection.keymaps);
            let marker = if conflicts.has_conflict(action) {
                '!'
            } else if is_changed(action, &selection.keymaps) {
                '*'
            } else {
                ' '
            };
            println!(
                "  {} {:<26} {:<18} {:<2} {}",
                marker,
                action.id(),
                display_tokens(&chord).join(" "),
                action.mode().code(),
                action.display_name()
            );
        }
        println!();
    }

    if !conflicts.is_empty() {
        println!("Conflicts:");
        for (key, group) in conflicts.groups() {
            let ids: Vec<&str> = group.iter().map(|action| action.id()).collect();
            println!("  {}  {}", key, ids.join(", "));
        }
    }
    Ok(())
}

fn run_bind(
    config: &WizardConfig,
    action_id: &str,
    keys: Vec<KeyPress>,
    reset: bool,
    selection_path: Option<PathBuf>,
) -> Result<()> {
    let action: Action = action_id
        .parse()
        .map_err(|()| anyhow!("Unknown action '{}'", action_id))?;
    let path = match selection_path {
        Some(path) => path,
        None => config_paths::selection_file().context("Could not determine the config directory")?,
    };
    let selection = if path.exists() {
        Selection::load(&path)?
    } else {
        Selection::default().with_leader(&config.leader_key)
    };

    let keymaps = if reset {
        reset_one(action, &selection.keymaps)
    } else {
        let chord = ChordRecorder::record(&selection.leader_key, keys)
            .ok_or_else(|| anyhow!("Keys did not form a chord"))?;
        validate_chord(&chord)?;
        let mut keymaps = selection.keymaps.clone();
        keymaps.insert(action.id().to_string(), chord);
        keymaps
    };
    let selection = selection.with_keymaps(keymaps);
    selection.save(&path)?;

    let chord = effective_chord(action, &selection.keymaps);
    println!("{} = {}", action.id(), chord);

    let active = active_actions(selection.plugins.as_slice());
    let conflicts = compute_conflicts(&active, &selection.keymaps);
    for other in conflicts.conflicting_with(action) {
        println!("  conflicts with {} ({})", other.id(), other.display_name());
    }
    Ok(())
}

fn run_settings(config: &WizardConfig, source: &SelectionSource, all: bool) -> Result<()> {
    let selection = load_selection(config, source)?;
    let visible = visible_settings(&selection.settings, selection.plugins.as_slice());

    for category in CATEGORIES {
        let defs: Vec<_> = category
            .settings
            .iter()
            .filter(|def| all || visible.iter().any(|v| v.id == def.id))
            .collect();
        if defs.is_empty() {
            continue;
        }
        println!("{}", category.title);
        for def in defs {
            let value = selection
                .settings
                .get_effective(def.id)
                .map(|v| v.to_string())
                .unwrap_or_default();
            let marker = if selection.settings.is_changed(def.id) { '*' } else { ' ' };
            let unit = def.unit.unwrap_or("");
            println!("  {} {:<28} {}{}", marker, def.id, value, unit);
        }
        println!();
    }
    Ok(())
}

// ============================================================================
// share / install-script / import
// ============================================================================

fn run_share(config: &WizardConfig, source: &SelectionSource, open: bool) -> Result<()> {
    let selection = load_selection(config, source)?;
    let link = share::share_url(&config.web_app_url, &selection)
        .with_context(|| format!("Invalid web_app_url '{}'", config.web_app_url))?;
    println!("{}", link);
    if open {
        open::that(&link).context("Failed to open the browser")?;
    }
    Ok(())
}

fn run_install_script(
    config: &WizardConfig,
    os: TargetOs,
    source: &SelectionSource,
    save: bool,
) -> Result<()> {
    let selection = with_file_overrides(load_selection(config, source)?);
    let text = generator::generate(&selection);
    let script = installer::installer_script(os, &selection, &text);

    if save {
        let ctx = DeliveryContext::new(config.clone());
        let path = delivery::download(&ctx, installer::script_file_name(os), &script)?;
        eprintln!("Wrote {}", path.display());
    } else {
        print!("{}", script);
    }
    Ok(())
}

fn run_import(file: &Path, save: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let selection = import::parse_init_lua(&text)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    if save {
        let path = config_paths::selection_file().context("Could not determine the config directory")?;
        selection.save(&path)?;
        eprintln!("Saved selection to {}", path.display());
    }
    print!("{}", selection.to_yaml()?);
    Ok(())
}

fn run_health(file: Option<&Path>) -> Result<()> {
    let text = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read health report from stdin")?;
            text
        }
    };

    let issues = health::analyze(&text);
    if issues.is_empty() {
        eprintln!("No health-check results found");
        return Ok(());
    }

    for severity in Severity::ALL {
        for issue in issues.iter().filter(|issue| issue.severity == severity) {
            println!("[{}] {}: {}", severity, issue.category, issue.message);
            if let Some(suggestion) = &issue.suggestion {
                println!("    fix: {}", suggestion);
            }
        }
    }
    println!(
        "{} errors, {} warnings, {} ok",
        health::count(&issues, Severity::Error),
        health::count(&issues, Severity::Warning),
        health::count(&issues, Severity::Ok)
    );
    Ok(())
}

// ============================================================================
// plugins / presets
// ============================================================================

fn run_plugins(command: PluginCommand) {
    match command {
        PluginCommand::Search { query } => {
            let hits = nvim_wizard::catalog::search::search_plugins(&query);
            if hits.is_empty() {
                eprintln!("No plugins match '{}'", query);
            }
            for hit in hits {
                println!("{:<32} {}", hit.id, hit.description);
            }
        }
        PluginCommand::List => {
            for plugin in Plugin::known() {
                println!("{:<18} {:<18} {}", plugin.id(), plugin.title(), plugin.description());
            }
        }
    }
}

fn run_presets(show: Option<&str>) -> Result<()> {
    match show {
        Some(id) => {
            let preset = presets::find_preset(id).ok_or_else(|| anyhow!("Unknown preset '{}'", id))?;
            print!("{}", preset.selection.to_yaml()?);
        }
        None => {
            for preset in presets::presets() {
                println!("{:<20} {:<22} {}", preset.id, preset.title, preset.description);
            }
        }
    }
    Ok(())
}
