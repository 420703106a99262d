// Build-time version and the plugin's command metadata

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Registered plugin name.
pub const PLUGIN_NAME: &str = "HallOfShame";

/// One command the plugin exposes to the host CLI.
#[derive(Debug, Clone, Copy)]
pub struct CommandMetadata {
    pub name: &'static str,
    pub alias: &'static str,
    pub help_text: &'static str,
    pub usage: &'static str,
    pub options: &'static [(&'static str, &'static str)],
}

pub const HALL_OF_SHAME: CommandMetadata = CommandMetadata {
    name: "Memory Hall of Shame",
    alias: "hall-of-shame",
    help_text: "Reviews memory usage by org and space. To obtain more information use --help",
    usage: "hall-of-shame - list memory in use by org and space.\n   hall-of-shame [--org ORG] [--space SPACE]",
    options: &[
        ("org", "Specify the org to report"),
        ("space", "Specify the space to report (requires --org)"),
    ],
};

impl CommandMetadata {
    /// Help line for a documented option; the CLI uses these for `--org` and `--space`.
    pub fn option_help(&self, option: &str) -> Option<&'static str> {
        self.options
            .iter()
            .find(|(name, _)| *name == option)
            .map(|(_, help)| *help)
    }
}
