//! OS-specific installer scripts
//!
//! The script installs Neovim if missing, backs up the existing config,
//! writes the generated one and installs per-language tooling.

use crate::catalog::{Language, TargetOs};
use crate::selection::Selection;

const HEREDOC_MARKER: &str = "NVIM_WIZARD_EOF";

/// File name a script for `os` is saved under
pub fn script_file_name(os: TargetOs) -> &'static str {
    match os {
        TargetOs::MacOs => "install-nvim-config-macos.sh",
        TargetOs::Linux => "install-nvim-config-linux.sh",
        TargetOs::Windows => "install-nvim-config.bat",
    }
}

/// Tool install commands for the selection's languages, deduplicated
pub fn tool_commands(selection: &Selection, os: TargetOs) -> Vec<&'static str> {
    let mut commands = Vec::new();
    for lang in selection.languages.iter().map(|id| Language::parse(id)) {
        if let Some(command) = lang.install_command(os) {
            if !commands.contains(&command) {
                commands.push(command);
            }
        }
    }
    commands
}

/// Installer script embedding `config` for the given OS
pub fn installer_script(os: TargetOs, selection: &Selection, config: &str) -> String {
    let tools = tool_commands(selection, os);
    match os {
        TargetOs::MacOs => unix_script(MACOS_INSTALL_NVIM, config, &tools),
        TargetOs::Linux => unix_script(LINUX_INSTALL_NVIM, config, &tools),
        TargetOs::Windows => windows_script(config, &tools),
    }
}

const MACOS_INSTALL_NVIM: &str = "    brew install neovim";

const LINUX_INSTALL_NVIM: &str = "    if command -v apt-get &> /dev/null; then
        sudo apt-get update && sudo apt-get install -y neovim
    elif command -v dnf &> /dev/null; then
        sudo dnf install -y neovim
    elif command -v pacman &> /dev/null; then
        sudo pacman -S --noconfirm neovim
    else
        echo \"Please install Neovim manually from https://neovim.io/\"
        exit 1
    fi";

fn unix_script(install_nvim: &str, config: &str, tools: &[&str]) -> String {
    let mut out = String::new();
    out.push_str("#!/bin/bash\nset -e\n\n");
    out.push_str("echo \"Installing Neovim configuration...\"\n\n");
    out.push_str("if ! command -v nvim &> /dev/null; then\n");
    out.push_str("    echo \"Installing Neovim...\"\n");
    out.push_str(install_nvim);
    out.push_str("\nfi\n\n");
    out.push_str("CONFIG_DIR=\"${XDG_CONFIG_HOME:-$HOME/.config}/nvim\"\n");
    out.push_str("mkdir -p \"$CONFIG_DIR\"\n\n");
    out.push_str("if [ -f \"$CONFIG_DIR/init.lua\" ]; then\n");
    out.push_str("    echo \"Backing up existing config...\"\n");
    out.push_str(
        "    mv \"$CONFIG_DIR/init.lua\" \"$CONFIG_DIR/init.lua.backup.$(date +%Y%m%d_%H%M%S)\"\n",
    );
    out.push_str("fi\n\n");
    out.push_str(&format!(
        "cat > \"$CONFIG_DIR/init.lua\" << '{}'\n",
        HEREDOC_MARKER
    ));
    out.push_str(config);
    if !config.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(HEREDOC_MARKER);
    out.push_str("\n\n");
    if !tools.is_empty() {
        out.push_str("echo \"Installing language tools...\"\n");
        for tool in tools {
            out.push_str(tool);
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str("echo \"Neovim configuration installed successfully!\"\n");
    out.push_str("echo \"Run 'nvim' to start using your new configuration.\"\n");
    out
}

/// Escape a line for `echo(` in a batch file without delayed expansion
fn batch_echo_escape(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '^' | '&' | '|' | '<' | '>' | '(' | ')' => {
                out.push('^');
                out.push(c);
            }
            '%' => out.push_str("%%"),
            c => out.push(c),
        }
    }
    out
}

fn windows_script(config: &str, tools: &[&str]) -> String {
    let mut out = String::new();
    out.push_str("@echo off\r\nsetlocal\r\nchcp 65001 >nul\r\n\r\n");
    out.push_str("echo Installing Neovim configuration...\r\n\r\n");
    out.push_str("where nvim >nul 2>nul\r\n");
    out.push_str("if %errorlevel% neq 0 (\r\n");
    out.push_str("    echo Installing Neovim...\r\n");
    out.push_str("    winget install Neovim.Neovim\r\n");
    out.push_str(")\r\n\r\n");
    out.push_str("set \"CONFIG_DIR=%LOCALAPPDATA%\\nvim\"\r\n");
    out.push_str("if not exist \"%CONFIG_DIR%\" mkdir \"%CONFIG_DIR%\"\r\n\r\n");
    out.push_str(
        "for /f %%i in ('powershell -NoProfile -Command \"Get-Date -Format yyyyMMdd_HHmmss\"') do set \"STAMP=%%i\"\r\n",
    );
    out.push_str("if exist \"%CONFIG_DIR%\\init.lua\" (\r\n");
    out.push_str("    echo Backing up existing config...\r\n");
    out.push_str("    move \"%CONFIG_DIR%\\init.lua\" \"%CONFIG_DIR%\\init.lua.backup.%STAMP%\"\r\n");
    out.push_str(")\r\n\r\n");
    out.push_str("type nul > \"%CONFIG_DIR%\\init.lua\"\r\n");
    for line in config.lines() {
        out.push_str(">> \"%CONFIG_DIR%\\init.lua\" echo(");
        out.push_str(&batch_echo_escape(line));
        out.push_str("\r\n");
    }
    out.push_str("\r\n");
    if !tools.is_empty() {
        out.push_str("echo Installing language tools...\r\n");
        for tool in tools {
            out.push_str("call ");
            out.push_str(tool);
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
    }
    out.push_str("echo Neovim configuration installed successfully!\r\n");
    out.push_str("echo Run 'nvim' to start using your new configuration.\r\n");
    out.push_str("pause\r\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection() -> Selection {
        Selection::default().with_languages(["c", "cpp", "python", "cobol"])
    }

    #[test]
    fn test_tool_commands_are_deduplicated() {
        let tools = tool_commands(&selection(), TargetOs::MacOs);
        assert_eq!(
            tools,
            vec!["brew install clang-format", "pip install pylsp black isort"]
        );
    }

    #[test]
    fn test_unix_script_embeds_config() {
        let script = installer_script(TargetOs::Linux, &selection(), "vim.opt.number = true\n");
        assert!(script.starts_with("#!/bin/bash\nset -e\n"));
        assert!(script.contains("cat > \"$CONFIG_DIR/init.lua\" << 'NVIM_WIZARD_EOF'\nvim.opt.number = true\nNVIM_WIZARD_EOF\n"));
        assert!(script.contains("sudo apt-get install clang-format"));
        assert!(script.contains("init.lua.backup.$(date +%Y%m%d_%H%M%S)"));
    }

    #[test]
    fn test_windows_script_escapes_lines() {
        let script = installer_script(
            TargetOs::Windows,
            &Selection::default(),
            "vim.keymap.set('n', '<C-h>', '<C-w><C-h>')\n\nx = 50%",
        );
        assert!(script.contains(
            ">> \"%CONFIG_DIR%\\init.lua\" echo(vim.keymap.set^('n', '^<C-h^>', '^<C-w^>^<C-h^>'^)\r\n"
        ));
        assert!(script.contains(">> \"%CONFIG_DIR%\\init.lua\" echo(\r\n"));
        assert!(script.contains("echo(x = 50%%\r\n"));
        assert!(!script.contains("Installing language tools"));
    }

    #[test]
    fn test_script_file_names() {
        assert!(script_file_name(TargetOs::Windows).ends_with(".bat"));
        assert!(script_file_name(TargetOs::MacOs).ends_with(".sh"));
    }
}
