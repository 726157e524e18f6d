//! Language catalog and the language → tooling lookup tables

use std::fmt;

/// Operating system targeted by an installer script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetOs {
    MacOs,
    Linux,
    Windows,
}

impl TargetOs {
    pub fn parse(id: &str) -> Option<TargetOs> {
        match id.to_lowercase().as_str() {
            "macos" | "mac" | "darwin" => Some(TargetOs::MacOs),
            "linux" => Some(TargetOs::Linux),
            "windows" | "win" => Some(TargetOs::Windows),
            _ => None,
        }
    }

    /// The OS this binary was built for
    pub fn current() -> TargetOs {
        if cfg!(target_os = "macos") {
            TargetOs::MacOs
        } else if cfg!(target_os = "windows") {
            TargetOs::Windows
        } else {
            TargetOs::Linux
        }
    }
}

/// A selectable language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Rust,
    Go,
    C,
    Cpp,
    CSharp,
    Java,
    Lua,
    /// Any id not in the catalog; contributes nothing except its raw id as a
    /// treesitter parser name
    Unrecognized(String),
}

impl Language {
    /// All catalog languages in display order
    pub fn known() -> [Language; 10] {
        [
            Language::TypeScript,
            Language::JavaScript,
            Language::Python,
            Language::Rust,
            Language::Go,
            Language::C,
            Language::Cpp,
            Language::CSharp,
            Language::Java,
            Language::Lua,
        ]
    }

    /// Parse a language id; unknown ids become `Unrecognized`
    pub fn parse(id: &str) -> Language {
        match id {
            "typescript" => Language::TypeScript,
            "javascript" => Language::JavaScript,
            "python" => Language::Python,
            "rust" => Language::Rust,
            "go" => Language::Go,
            "c" => Language::C,
            "cpp" => Language::Cpp,
            "csharp" => Language::CSharp,
            "java" => Language::Java,
            "lua" => Language::Lua,
            other => Language::Unrecognized(other.to_string()),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::Go => "go",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Java => "java",
            Language::Lua => "lua",
            Language::Unrecognized(id) => id,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Language::Unrecognized(_))
    }

    pub fn title(&self) -> &str {
        match self {
            Language::TypeScript => "TypeScript",
            Language::JavaScript => "JavaScript",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::Go => "Go",
            Language::C => "C",
            Language::Cpp => "C++",
            Language::CSharp => "C#",
            Language::Java => "Java",
            Language::Lua => "Lua",
            Language::Unrecognized(id) => id,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Language::TypeScript => "Strongly typed JavaScript with advanced tooling",
            Language::JavaScript => "Dynamic scripting language for web development",
            Language::Python => "Versatile language for scripting and data science",
            Language::Rust => "Systems programming language focused on safety",
            Language::Go => "Simple, fast, and reliable language for servers",
            Language::C => "Low-level programming language",
            Language::Cpp => "Object-oriented extension of C",
            Language::CSharp => "Microsoft's object-oriented language",
            Language::Java => "Enterprise-grade object-oriented language",
            Language::Lua => "Lightweight scripting language (for Neovim config)",
            Language::Unrecognized(_) => "",
        }
    }

    /// LSP server id installed through mason-lspconfig
    pub fn lsp_server(&self) -> Option<&'static str> {
        match self {
            Language::TypeScript | Language::JavaScript => Some("ts_ls"),
            Language::Python => Some("pyright"),
            Language::Rust => Some("rust_analyzer"),
            Language::Go => Some("gopls"),
            Language::C | Language::Cpp => Some("clangd"),
            Language::CSharp => Some("omnisharp"),
            Language::Java => Some("jdtls"),
            Language::Lua => Some("lua_ls"),
            Language::Unrecognized(_) => None,
        }
    }

    /// none-ls formatting builtin, for languages that have a common one
    pub fn formatter(&self) -> Option<&'static str> {
        match self {
            Language::TypeScript | Language::JavaScript => Some("prettier"),
            Language::Python => Some("black"),
            Language::Rust => Some("rustfmt"),
            Language::Lua => Some("stylua"),
            Language::Go
            | Language::C
            | Language::Cpp
            | Language::CSharp
            | Language::Java
            | Language::Unrecognized(_) => None,
        }
    }

    /// Treesitter parser name
    pub fn treesitter_parser(&self) -> &str {
        match self {
            Language::CSharp => "c_sharp",
            other => other.id(),
        }
    }

    /// Shell command that installs the language tooling on the given OS
    pub fn install_command(&self, os: TargetOs) -> Option<&'static str> {
        let command = match (self, os) {
            (Language::TypeScript | Language::JavaScript, _) => {
                "npm install -g typescript @vscode/vscode-json-languageserver"
            }
            (Language::Python, _) => "pip install pylsp black isort",
            (Language::Rust, _) => "rustup component add rust-analyzer",
            (Language::Go, _) => "go install golang.org/x/tools/gopls@latest",
            (Language::C | Language::Cpp, TargetOs::MacOs) => "brew install clang-format",
            (Language::C | Language::Cpp, TargetOs::Linux) => {
                "sudo apt-get install clang-format || sudo dnf install clang-tools-extra || sudo pacman -S clang"
            }
            (Language::C | Language::Cpp, TargetOs::Windows) => "winget install LLVM.LLVM",
            (Language::CSharp, _) => "dotnet tool install --global csharp-ls",
            (Language::Java, TargetOs::MacOs) => "brew install jdtls",
            (Language::Java, TargetOs::Linux) => {
                "sudo apt-get install openjdk-17-jdk || sudo dnf install java-17-openjdk-devel"
            }
            (Language::Java, TargetOs::Windows) => "winget install Microsoft.OpenJDK.17",
            (Language::Lua, TargetOs::MacOs) => "brew install lua-language-server",
            (Language::Lua, TargetOs::Linux) => {
                "sudo apt-get install lua-language-server || sudo dnf install lua-language-server || sudo pacman -S lua-language-server"
            }
            (Language::Lua, TargetOs::Windows) => "winget install sumneko.lua-language-server",
            (Language::Unrecognized(_), _) => return None,
        };
        Some(command)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrips_known_ids() {
        for lang in Language::known() {
            assert_eq!(Language::parse(lang.id()), lang);
        }
    }

    #[test]
    fn test_unknown_language_is_inert() {
        let lang = Language::parse("cobol");
        assert!(!lang.is_recognized());
        assert_eq!(lang.lsp_server(), None);
        assert_eq!(lang.formatter(), None);
        assert_eq!(lang.install_command(TargetOs::Linux), None);
        assert_eq!(lang.treesitter_parser(), "cobol");
    }

    #[test]
    fn test_csharp_parser_name() {
        assert_eq!(Language::CSharp.treesitter_parser(), "c_sharp");
    }

    #[test]
    fn test_c_family_shares_server() {
        assert_eq!(Language::C.lsp_server(), Language::Cpp.lsp_server());
        assert_eq!(
            Language::TypeScript.lsp_server(),
            Language::JavaScript.lsp_server()
        );
    }
}
