//! Plugin manager section and per-plugin blocks

use super::lsp;
use super::lua::{comment_text, lua_bool, lua_dq_string, lua_string, LuaWriter};
use super::Render;
use crate::catalog::Plugin;
use crate::settings::EffectiveSettings;

const LAZY_BOOTSTRAP: &str = r#"-- Bootstrap lazy.nvim plugin manager
local lazypath = vim.fn.stdpath("data") .. "/lazy/lazy.nvim"
if not vim.loop.fs_stat(lazypath) then
  vim.fn.system({
    "git",
    "clone",
    "--filter=blob:none",
    "https://github.com/folke/lazy.nvim.git",
    "--branch=stable",
    lazypath,
  })
end
vim.opt.rtp:prepend(lazypath)"#;

/// Marker that opens the plugin list; the leader must be set before it
pub const PLUGIN_SETUP_OPEN: &str = "require(\"lazy\").setup({";

/// Whether the selection needs the plugin manager at all
pub(super) fn needs_plugin_manager(render: &Render<'_>) -> bool {
    render.languages.iter().any(|lang| lang.is_recognized()) || !render.plugins.is_empty()
}

pub(super) fn plugin_section(w: &mut LuaWriter, render: &Render<'_>) {
    w.blank();
    w.lines(LAZY_BOOTSTRAP);
    w.blank();
    w.line("-- Plugin setup");
    w.open(PLUGIN_SETUP_OPEN);

    if let Some(spec) = render.theme.as_ref().and_then(|theme| theme.plugin_spec()) {
        w.line("-- Theme");
        w.line(format!("{},", spec));
    }

    lsp::language_tooling(w, render);

    for plugin in Plugin::known() {
        if render.plugins.contains(&plugin) {
            catalog_plugin(w, &plugin, render);
        }
    }

    let custom: Vec<&str> = render
        .plugins
        .iter()
        .filter_map(|plugin| match plugin {
            Plugin::Custom(slug) => Some(slug.as_str()),
            _ => None,
        })
        .collect();
    if !custom.is_empty() {
        w.line("-- Custom plugins");
        for slug in custom {
            if slug.contains('/') {
                w.line(format!("{{ {} }},", lua_dq_string(slug)));
            } else {
                w.line(format!(
                    "-- {}: add its repository as {{ \"<owner>/{}\" }}",
                    comment_text(slug),
                    comment_text(slug)
                ));
            }
        }
    }

    w.close("})");

    if render.plugins.contains(&Plugin::Tabbufline) {
        w.blank();
        w.lines(NVCONFIG);
    }
}

fn catalog_plugin(w: &mut LuaWriter, plugin: &Plugin, render: &Render<'_>) {
    let s = &render.settings;
    match plugin {
        Plugin::Treesitter => treesitter(w, render),
        Plugin::Telescope => telescope(w, s),
        Plugin::NvimTree => nvim_tree(w, s),
        Plugin::Tabbufline => w.lines(TABBUFLINE),
        Plugin::Dashboard => w.lines(DASHBOARD),
        Plugin::IndentBlankline => w.lines(INDENT_BLANKLINE),
        Plugin::Lualine => lualine(w, s),
        Plugin::NvimSurround => w.lines(NVIM_SURROUND),
        Plugin::Gitsigns => gitsigns(w, s),
        Plugin::WhichKey => which_key(w, s),
        Plugin::NvimDap => nvim_dap(w, s),
        Plugin::NvimNotify => w.lines(NVIM_NOTIFY),
        Plugin::Custom(_) | Plugin::Unrecognized(_) => {}
    }
}

/// Treesitter parser names for every selected language, recognized or not
pub(super) fn treesitter_parsers(render: &Render<'_>) -> Vec<String> {
    let mut parsers: Vec<String> = Vec::new();
    for lang in &render.languages {
        let parser = lang.treesitter_parser();
        if !parser.is_empty() && !parsers.iter().any(|p| p == parser) {
            parsers.push(parser.to_string());
        }
    }
    parsers
}

fn treesitter(w: &mut LuaWriter, render: &Render<'_>) {
    let ts = &render.settings.treesitter;
    let parsers: Vec<String> = treesitter_parsers(render)
        .iter()
        .map(|p| lua_dq_string(p))
        .collect();
    let ensure_installed = if parsers.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", parsers.join(", "))
    };

    w.line("-- Enhanced Syntax highlighting");
    w.open("{");
    w.line("\"nvim-treesitter/nvim-treesitter\",");
    w.line("build = \":TSUpdate\",");
    w.open("config = function()");
    w.open("require(\"nvim-treesitter.configs\").setup({");
    w.line(format!("ensure_installed = {},", ensure_installed));
    w.line(format!("auto_install = {},", lua_bool(ts.auto_install)));
    w.line(format!(
        "highlight = {{ enable = {} }},",
        lua_bool(ts.highlight_enabled)
    ));
    w.line(format!("indent = {{ enable = {} }},", lua_bool(ts.indent_enabled)));
    w.close("})");
    if ts.folding_enabled {
        w.line("vim.opt.foldmethod = 'expr'");
        w.line("vim.opt.foldexpr = 'nvim_treesitter#foldexpr()'");
        w.line("vim.opt.foldenable = false");
    }
    w.close("end,");
    w.close("},");
}

fn telescope(w: &mut LuaWriter, s: &EffectiveSettings) {
    let t = &s.telescope;
    w.line("-- Fuzzy finder");
    w.open("{");
    w.line("\"nvim-telescope/telescope.nvim\",");
    w.line("tag = \"0.1.5\",");
    w.line("dependencies = { \"nvim-lua/plenary.nvim\" },");
    w.open("config = function()");
    w.open("require('telescope').setup({");
    w.open("defaults = {");
    if !t.preview_enabled {
        w.line("preview = false,");
    }
    if !t.ignored_patterns.is_empty() {
        let patterns: Vec<String> = t.ignored_patterns.iter().map(|p| lua_dq_string(p)).collect();
        w.line(format!("file_ignore_patterns = {{ {} }},", patterns.join(", ")));
    }
    w.line(format!("history = {{ limit = {} }},", t.history_limit));
    w.close("},");
    w.close("})");
    w.close("end,");
    w.close("},");
}

fn nvim_tree(w: &mut LuaWriter, s: &EffectiveSettings) {
    let t = &s.nvim_tree;
    w.line("-- File explorer");
    w.open("{");
    w.line("\"nvim-tree/nvim-tree.lua\",");
    w.line("dependencies = { \"nvim-tree/nvim-web-devicons\" },");
    w.open("config = function()");
    w.open("require(\"nvim-tree\").setup({");
    w.line(format!("view = {{ width = {} }},", t.width));
    w.line(format!(
        "actions = {{ open_file = {{ quit_on_open = {} }} }},",
        lua_bool(t.auto_close)
    ));
    w.line(format!(
        "update_focused_file = {{ enable = {} }},",
        lua_bool(t.follow_current_file)
    ));
    w.line(format!("git = {{ enable = {} }},", lua_bool(t.git_integration)));
    w.close("})");
    w.close("end,");
    w.close("},");
}

fn lualine(w: &mut LuaWriter, s: &EffectiveSettings) {
    let l = &s.lualine;
    let lualine_c = if l.show_file_type {
        "{ 'filename', 'filetype' }"
    } else {
        "{ 'filename' }"
    };

    w.line("-- Statusline");
    w.open("{");
    w.line("\"nvim-lualine/lualine.nvim\",");
    w.line("dependencies = { \"nvim-tree/nvim-web-devicons\" },");
    w.open("config = function()");
    w.open("require('lualine').setup({");
    w.open("options = {");
    w.line(format!("theme = {},", lua_string(&l.theme)));
    w.line("component_separators = { left = '', right = '' },");
    w.line("section_separators = { left = '', right = '' },");
    w.close("},");
    w.open("sections = {");
    if l.show_branch {
        w.line("lualine_b = { 'branch', 'diff', 'diagnostics' },");
    } else {
        w.line("lualine_b = { 'diff', 'diagnostics' },");
    }
    w.line(format!("lualine_c = {},", lualine_c));
    if l.show_file_encoding {
        w.line("lualine_y = { 'encoding', 'fileformat', 'progress' },");
    }
    w.close("},");
    w.close("})");
    w.close("end,");
    w.close("},");
}

fn gitsigns(w: &mut LuaWriter, s: &EffectiveSettings) {
    let g = &s.git;
    let signs: [(&str, &str); 5] = if g.show_diff_in_signs {
        [
            ("add", "+"),
            ("change", "~"),
            ("delete", "_"),
            ("topdelete", "‾"),
            ("changedelete", "~"),
        ]
    } else {
        [
            ("add", ""),
            ("change", ""),
            ("delete", ""),
            ("topdelete", ""),
            ("changedelete", ""),
        ]
    };

    w.line("-- Git integration");
    w.open("{");
    w.line("\"lewis6991/gitsigns.nvim\",");
    w.open("config = function()");
    w.open("require('gitsigns').setup({");
    w.open("signs = {");
    for (name, text) in signs {
        w.line(format!("{} = {{ text = {} }},", name, lua_string(text)));
    }
    w.close("},");
    if g.show_line_blame {
        w.line("current_line_blame = true,");
        w.line("current_line_blame_opts = { virt_text = true, virt_text_pos = 'eol' },");
    }
    if g.word_diff {
        w.line("word_diff = true,");
    }
    w.close("})");
    w.close("end,");
    w.close("},");
}

fn which_key(w: &mut LuaWriter, s: &EffectiveSettings) {
    w.line("-- Keybinding helper");
    w.open("{");
    w.line("\"folke/which-key.nvim\",");
    w.line("event = \"VeryLazy\",");
    w.open("config = function()");
    w.line("vim.o.timeout = true");
    w.line(format!("vim.o.timeoutlen = {}", s.timeout_length));
    w.line("require(\"which-key\").setup({})");
    w.close("end,");
    w.close("},");
}

fn nvim_dap(w: &mut LuaWriter, s: &EffectiveSettings) {
    let d = &s.debugging;
    w.line("-- Debug Adapter Protocol");
    w.open("{");
    w.line("\"mfussenegger/nvim-dap\",");
    w.open("dependencies = {");
    w.line("\"rcarriga/nvim-dap-ui\",");
    w.line("\"nvim-neotest/nvim-nio\",");
    w.close("},");
    w.open("config = function()");
    w.line("local dap = require(\"dap\")");
    w.line("local dapui = require(\"dapui\")");
    w.blank();
    w.line("dapui.setup()");
    w.blank();
    if d.auto_open_ui {
        w.open("dap.listeners.after.event_initialized[\"dapui_config\"] = function()");
        w.line("dapui.open()");
        w.close("end");
    }
    w.open("dap.listeners.before.event_terminated[\"dapui_config\"] = function()");
    w.line("dapui.close()");
    w.close("end");
    w.open("dap.listeners.before.event_exited[\"dapui_config\"] = function()");
    w.line("dapui.close()");
    w.close("end");
    if d.show_inline_variables {
        w.line("vim.fn.sign_define('DapBreakpoint', { text = 'B', texthl = 'DapBreakpoint', linehl = '', numhl = '' })");
    }
    if d.break_on_exception {
        w.line("dap.defaults.fallback.exception_breakpoints = { 'raised' }");
    }
    w.close("end,");
    w.close("},");
}

const TABBUFLINE: &str = r#"-- NvChad UI for enhanced tabs and buffers
{
  "nvchad/ui",
  dependencies = { "nvim-tree/nvim-web-devicons", "nvim-lua/plenary.nvim" },
  config = function()
    require("nvconfig")
  end,
},"#;

const DASHBOARD: &str = r#"-- Dashboard start screen
{
  "nvimdev/dashboard-nvim",
  event = "VimEnter",
  config = function()
    require('dashboard').setup({
      theme = 'doom',
      config = {
        header = {
          '',
          '███╗   ██╗███████╗ ██████╗ ██╗   ██╗██╗███╗   ███╗',
          '████╗  ██║██╔════╝██╔═══██╗██║   ██║██║████╗ ████║',
          '██╔██╗ ██║█████╗  ██║   ██║██║   ██║██║██╔████╔██║',
          '██║╚██╗██║██╔══╝  ██║   ██║╚██╗ ██╔╝██║██║╚██╔╝██║',
          '██║ ╚████║███████╗╚██████╔╝ ╚████╔╝ ██║██║ ╚═╝ ██║',
          '╚═╝  ╚═══╝╚══════╝ ╚═════╝   ╚═══╝  ╚═╝╚═╝     ╚═╝',
          '',
        },
        center = {
          { icon = ' ', desc = 'Find File          ', key = 'f', action = 'lua require("telescope.builtin").find_files()' },
          { icon = ' ', desc = 'Recent Files       ', key = 'r', action = 'lua require("telescope.builtin").oldfiles()' },
          { icon = ' ', desc = 'Find Text          ', key = 'g', action = 'lua require("telescope.builtin").live_grep()' },
          { icon = ' ', desc = 'New File           ', key = 'n', action = 'enew' },
          { icon = ' ', desc = 'Quit               ', key = 'q', action = 'qa' },
        },
      },
    })
  end,
},"#;

const INDENT_BLANKLINE: &str = r#"-- Indentation guides
{
  "lukas-reineke/indent-blankline.nvim",
  main = "ibl",
  config = function()
    require("ibl").setup({
      indent = { char = "│" },
      scope = { enabled = false },
    })
  end,
},"#;

const NVIM_SURROUND: &str = r#"-- Surround text objects
{
  "kylechui/nvim-surround",
  version = "*",
  event = "VeryLazy",
  config = function()
    require("nvim-surround").setup({})
  end,
},"#;

const NVIM_NOTIFY: &str = r#"-- Enhanced notifications
{
  "rcarriga/nvim-notify",
  config = function()
    local notify = require("notify")
    notify.setup({
      stages = "fade_in_slide_out",
      timeout = 3000,
    })
    vim.notify = notify
  end,
},"#;

const NVCONFIG: &str = r#"-- NvChad UI configuration file for tabbufline
if vim.fn.isdirectory(vim.fn.stdpath("config") .. "/lua") == 1 then
  vim.g.nvconfig_path = vim.fn.stdpath("config") .. "/lua/nvconfig.lua"
  if vim.fn.filereadable(vim.g.nvconfig_path) == 0 then
    local file = io.open(vim.g.nvconfig_path, "w")
    if file then
      file:write([[
return {
  ui = {
    tabufline = {
      enabled = true,
      lazyload = true,
      order = { "treeOffset", "buffers", "tabs", "btns" },
    },
  },
}
]])
      file:close()
    end
  end
end"#;
