//! Configuration module.
//!
//! Layered settings for the console (`loader`) and the key map
//! (`keybindings`).

pub mod keybindings;
mod loader;

pub use keybindings::KeyBindings;
pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, CliOverrides, ColumnSpec,
    ConfigFile, ConfigFileError, ResolvedConfig, UnselectableRule,
};
