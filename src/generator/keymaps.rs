//! Custom keymap statements

use super::lua::{lua_string, LuaWriter};
use super::Render;
use crate::catalog::{is_lua_function, Action};
use crate::keymap::{active_actions, effective_chord};

const FLOATING_TERMINAL: &str = "function() \
local width = math.floor(vim.o.columns * 0.8) \
local height = math.floor(vim.o.lines * 0.8) \
vim.api.nvim_open_win(vim.api.nvim_create_buf(false, true), true, { relative = 'editor', width = width, height = height, \
row = math.floor((vim.o.lines - height) / 2), col = math.floor((vim.o.columns - width) / 2), style = 'minimal', border = 'rounded' }) \
vim.cmd.terminal() end";

/// Right-hand side for an action, honouring settings that reshape it
fn rhs(action: Action, render: &Render<'_>) -> Option<&'static str> {
    if action == Action::TerminalToggle {
        return Some(match render.settings.terminal_position.as_str() {
            "vertical" => "<cmd>botright vsplit | terminal<CR>",
            "floating" => FLOATING_TERMINAL,
            _ => "<cmd>botright split | terminal<CR>",
        });
    }
    action.command()
}

/// One binding statement per active action with a template and a chord
pub(super) fn custom_keymaps(w: &mut LuaWriter, render: &Render<'_>) {
    let mut lines = Vec::new();
    for action in active_actions(render.selection.plugins.as_slice()) {
        let Some(command) = rhs(action, render) else {
            continue;
        };
        let chord = effective_chord(action, &render.selection.keymaps);
        if chord.trim().is_empty() {
            continue;
        }
        let rhs = if is_lua_function(command) {
            command.to_string()
        } else {
            lua_string(command)
        };
        lines.push(format!(
            "vim.keymap.set({}, {}, {}, {{ desc = {} }})",
            lua_string(action.mode().code()),
            lua_string(&chord),
            rhs,
            lua_string(action.binding_description())
        ));
    }

    if lines.is_empty() {
        return;
    }
    w.blank();
    w.line("-- Custom keymaps");
    for line in lines {
        w.line(line);
    }
}
