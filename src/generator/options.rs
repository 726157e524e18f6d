//! Option sections: header, leader, baseline, settings and legacy flags

use chrono::NaiveDate;

use super::lua::{comment_text, lua_string, LuaWriter};
use super::Render;
use crate::catalog::LegacyFlag;
use crate::settings::{LineNumbers, SplitDirection};

/// Prefix of the header line that carries the generation date
pub const GENERATED_ON_PREFIX: &str = "-- Generated on: ";

pub(super) fn header(w: &mut LuaWriter, render: &Render<'_>, date: NaiveDate) {
    let theme = if render.selection.theme.is_empty() {
        "none".to_string()
    } else {
        comment_text(&render.selection.theme)
    };
    w.line("-- Generated Neovim Configuration");
    let languages: Vec<&str> = render
        .languages
        .iter()
        .filter(|lang| lang.is_recognized())
        .map(|lang| lang.id())
        .collect();
    w.line(format!("-- Languages: {}", languages.join(", ")));
    w.line(format!("-- Theme: {}", theme));
    w.line(format!("{}{}", GENERATED_ON_PREFIX, date.format("%Y-%m-%d")));
}

pub(super) fn leader(w: &mut LuaWriter, leader: &str) {
    let display = if leader == " " {
        "Space".to_string()
    } else {
        comment_text(leader)
    };
    let value = lua_string(leader);
    w.blank();
    w.line(format!(
        "-- Set leader key ({}) - Must be set before plugins load",
        display
    ));
    w.line(format!("vim.g.mapleader = {}", value));
    w.line(format!("vim.g.maplocalleader = {}", value));
}

const BASELINE: &str = "\
-- Basic Options
vim.opt.mouse = 'a'
vim.opt.clipboard = 'unnamedplus'
vim.opt.breakindent = true
vim.opt.undofile = true
vim.opt.hlsearch = true

-- Highlight on search, but clear on pressing <Esc> in normal mode
vim.keymap.set('n', '<Esc>', '<cmd>nohlsearch<CR>')";

pub(super) fn baseline(w: &mut LuaWriter) {
    w.blank();
    w.lines(BASELINE);
}

pub(super) fn settings(w: &mut LuaWriter, render: &Render<'_>) {
    let s = &render.settings;

    w.blank();
    w.line("-- Editor Settings");
    match s.line_numbers {
        LineNumbers::None => {}
        LineNumbers::Absolute => w.line("vim.opt.number = true"),
        LineNumbers::Relative => w.line("vim.opt.relativenumber = true"),
        LineNumbers::Both => {
            w.line("vim.opt.number = true");
            w.line("vim.opt.relativenumber = true");
        }
    }
    w.line(format!("vim.opt.tabstop = {}", s.indent_size));
    w.line(format!("vim.opt.shiftwidth = {}", s.indent_size));
    w.line("vim.opt.expandtab = true");
    if s.line_wrapping {
        w.line("vim.opt.wrap = true");
        w.line("vim.opt.linebreak = true");
    } else {
        w.line("vim.opt.wrap = false");
    }
    if s.show_whitespace {
        w.line("vim.opt.list = true");
        w.line("vim.opt.listchars = { space = '·', tab = '→ ', eol = '↴' }");
    }
    if s.cursor_line {
        w.line("vim.opt.cursorline = true");
    }
    if s.color_column > 0 {
        w.line(format!("vim.opt.colorcolumn = '{}'", s.color_column));
    }
    w.line(format!("vim.opt.scrolloff = {}", s.scroll_offset));

    w.blank();
    w.line("-- Behavior Settings");
    if s.auto_save {
        w.line("-- Auto save configuration");
        w.open("vim.api.nvim_create_autocmd({ 'TextChanged', 'TextChangedI' }, {");
        w.line("pattern = '*',");
        w.open("callback = function()");
        w.open("vim.defer_fn(function()");
        w.open("if vim.bo.modified then");
        w.line("vim.cmd('silent! write')");
        w.close("end");
        w.close(format!("end, {})", s.auto_save_delay));
        w.close("end,");
        w.close("})");
    }
    w.line(format!("vim.opt.undolevels = {}", s.undo_levels));
    if s.smart_case {
        w.line("vim.opt.smartcase = true");
    }
    if s.ignore_case {
        w.line("vim.opt.ignorecase = true");
    }
    match s.split_direction {
        SplitDirection::Right => w.line("vim.opt.splitright = true"),
        SplitDirection::Below => w.line("vim.opt.splitbelow = true"),
    }

    w.blank();
    w.line("-- UI Settings");
    if s.show_sign_column {
        w.line("vim.opt.signcolumn = 'yes'");
    }
    if s.show_fold_column {
        w.line("vim.opt.foldcolumn = '1'");
    }

    w.blank();
    w.line("-- Performance Settings");
    w.line(format!("vim.opt.updatetime = {}", s.update_time));
    w.line(format!("vim.opt.timeoutlen = {}", s.timeout_length));
    if s.lazy_redraw {
        w.line("vim.opt.lazyredraw = true");
    }
}

/// Blocks toggled by the legacy flag list, in fixed order
pub(super) fn legacy_flags(w: &mut LuaWriter, render: &Render<'_>) {
    let selection = render.selection;

    if selection.has_flag(LegacyFlag::LineNumbers) {
        w.blank();
        w.line("-- Line numbers enabled");
        w.line("vim.opt.number = true");
        w.line("vim.opt.relativenumber = true");
    }

    // The settings object's debounced auto save supersedes the immediate one
    if selection.has_flag(LegacyFlag::AutoSave) && !render.settings.auto_save {
        w.blank();
        w.line("-- Auto save");
        w.open("vim.api.nvim_create_autocmd({ 'TextChanged', 'TextChangedI' }, {");
        w.line("pattern = '*',");
        w.line("command = 'silent! write',");
        w.close("})");
    }

    if selection.has_flag(LegacyFlag::WrapText) {
        w.blank();
        w.line("-- Text wrapping");
        w.line("vim.opt.wrap = true");
        w.line("vim.opt.linebreak = true");
    }
}

pub(super) fn colorscheme(w: &mut LuaWriter, render: &Render<'_>) {
    match &render.theme {
        Some(theme) if !theme.is_default() => {
            w.blank();
            w.line("-- Set colorscheme");
            w.line(format!("vim.cmd.colorscheme({})", lua_string(theme.id())));
        }
        _ => {}
    }
}

const WINDOW_NAVIGATION: &str = "\
-- Window navigation
vim.keymap.set('n', '<C-h>', '<C-w><C-h>', { desc = 'Move focus to the left window' })
vim.keymap.set('n', '<C-l>', '<C-w><C-l>', { desc = 'Move focus to the right window' })
vim.keymap.set('n', '<C-j>', '<C-w><C-j>', { desc = 'Move focus to the lower window' })
vim.keymap.set('n', '<C-k>', '<C-w><C-k>', { desc = 'Move focus to the upper window' })";

pub(super) fn window_navigation(w: &mut LuaWriter) {
    w.blank();
    w.lines(WINDOW_NAVIGATION);
}
