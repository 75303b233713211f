//! Conversion options shared by the library entry points and the CLI.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ROOT_NAME: &str = "RootObject";

/// Nested arrays/objects allowed, the root container included.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Declaration flavor. Only affects naming prefixes and rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// `interface IName { ... }`
    #[default]
    Interface,
    /// `type TName = { ... }`
    #[value(name = "type")]
    #[serde(rename = "type")]
    TypeAlias,
}

impl Style {
    /// Prefix letter for object declarations in this style.
    pub fn prefix(self) -> char {
        match self {
            Style::Interface => 'I',
            Style::TypeAlias => 'T',
        }
    }

    /// Root aliases always use the type-alias prefix, whatever the style.
    pub const ALIAS_PREFIX: char = 'T';
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub root_name: String,
    pub style: Style,
    pub max_depth: usize,
    /// Prefix every declaration with `export`.
    pub export: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            style: Style::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            export: false,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root_name(mut self, value: impl Into<String>) -> Self {
        self.root_name = value.into();
        self
    }

    pub fn style(mut self, value: Style) -> Self {
        self.style = value;
        self
    }

    pub fn max_depth(mut self, value: usize) -> Self {
        self.max_depth = value;
        self
    }

    pub fn export(mut self, value: bool) -> Self {
        self.export = value;
        self
    }
}
