//! Language tooling: mason, lspconfig, none-ls and completion

use super::lua::{lua_dq_string, LuaWriter};
use super::Render;

/// LSP server ids for the selected languages, deduplicated in selection order
pub(super) fn lsp_servers(render: &Render<'_>) -> Vec<&'static str> {
    let mut servers = Vec::new();
    for server in render.languages.iter().filter_map(|lang| lang.lsp_server()) {
        if !servers.contains(&server) {
            servers.push(server);
        }
    }
    servers
}

/// none-ls formatting builtins for the selected languages
pub(super) fn formatters(render: &Render<'_>) -> Vec<&'static str> {
    let mut formatters = Vec::new();
    for formatter in render.languages.iter().filter_map(|lang| lang.formatter()) {
        if !formatters.contains(&formatter) {
            formatters.push(formatter);
        }
    }
    formatters
}

/// Plugin specs wiring language servers, formatters and completion
///
/// Emits nothing when no selected language is recognized.
pub(super) fn language_tooling(w: &mut LuaWriter, render: &Render<'_>) {
    let servers = lsp_servers(render);
    if servers.is_empty() {
        return;
    }

    let quoted: Vec<String> = servers.iter().map(|s| lua_dq_string(s)).collect();

    w.line("-- LSP Manager (auto-included for language support)");
    w.open("{");
    w.line("\"williamboman/mason.nvim\",");
    w.open("config = function()");
    w.line("require(\"mason\").setup()");
    w.close("end,");
    w.close("},");
    w.open("{");
    w.line("\"williamboman/mason-lspconfig.nvim\",");
    w.line("dependencies = { \"williamboman/mason.nvim\" },");
    w.open("config = function()");
    w.open("require(\"mason-lspconfig\").setup({");
    w.line(format!("ensure_installed = {{ {} }},", quoted.join(", ")));
    w.line("automatic_installation = false,");
    w.close("})");
    w.close("end,");
    w.close("},");
    w.open("{");
    w.line("\"neovim/nvim-lspconfig\",");
    w.line("dependencies = { \"hrsh7th/cmp-nvim-lsp\" },");
    w.open("config = function()");
    w.line("local capabilities = require('cmp_nvim_lsp').default_capabilities()");
    w.line("local lspconfig = require('lspconfig')");
    w.blank();
    for server in &servers {
        w.line(format!(
            "lspconfig.{}.setup({{ capabilities = capabilities }})",
            server
        ));
    }
    w.close("end,");
    w.close("},");

    let formatters = formatters(render);
    if !formatters.is_empty() {
        w.line("-- Formatting and Linting (auto-included for selected languages)");
        w.open("{");
        w.line("\"nvimtools/none-ls.nvim\",");
        w.line("dependencies = { \"nvim-lua/plenary.nvim\" },");
        w.open("config = function()");
        w.line("local null_ls = require(\"null-ls\")");
        w.open("null_ls.setup({");
        w.open("sources = {");
        for formatter in &formatters {
            w.line(format!("null_ls.builtins.formatting.{},", formatter));
        }
        w.close("},");
        w.close("})");
        w.close("end,");
        w.close("},");
    }

    completion(w, render.settings.advanced_completion);
}

fn completion(w: &mut LuaWriter, advanced: bool) {
    w.line("-- Autocompletion (auto-included for language support)");
    w.open("{");
    w.line("\"hrsh7th/nvim-cmp\",");
    w.open("dependencies = {");
    w.line("\"hrsh7th/cmp-nvim-lsp\",");
    w.line("\"hrsh7th/cmp-buffer\",");
    if advanced {
        w.line("\"hrsh7th/cmp-path\",");
        w.line("\"L3MON4D3/LuaSnip\",");
        w.line("\"saadparwaiz1/cmp_luasnip\",");
    }
    w.close("},");
    w.open("config = function()");
    w.line("local cmp = require('cmp')");
    w.open("cmp.setup({");
    if advanced {
        w.open("snippet = {");
        w.open("expand = function(args)");
        w.line("require('luasnip').lsp_expand(args.body)");
        w.close("end,");
        w.close("},");
        w.open("window = {");
        w.line("completion = cmp.config.window.bordered(),");
        w.line("documentation = cmp.config.window.bordered(),");
        w.close("},");
    }
    w.open("mapping = cmp.mapping.preset.insert({");
    if advanced {
        w.line("['<C-b>'] = cmp.mapping.scroll_docs(-4),");
        w.line("['<C-f>'] = cmp.mapping.scroll_docs(4),");
    }
    w.line("['<C-Space>'] = cmp.mapping.complete(),");
    w.line("['<C-e>'] = cmp.mapping.abort(),");
    w.line("['<CR>'] = cmp.mapping.confirm({ select = true }),");
    w.close("}),");
    w.open("sources = cmp.config.sources({");
    w.line("{ name = 'nvim_lsp' },");
    if advanced {
        w.line("{ name = 'luasnip' },");
        w.line("{ name = 'path' },");
    }
    w.reopen("}, {");
    w.line("{ name = 'buffer' },");
    w.close("}),");
    w.close("})");
    w.close("end,");
    w.close("},");
}
