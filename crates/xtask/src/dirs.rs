//! Platform-specific directory utilities

use std::path::PathBuf;

/// Directory holding `session_{player}.bin` files.
///
/// `SAVE_DATA_DIR` wins when set; otherwise the platform data directory:
/// - macOS: `~/Library/Application Support/word-quest/saves`
/// - Linux: `~/.local/share/word-quest/saves` (or `$XDG_DATA_HOME/...`)
/// - Windows: `%APPDATA%\word-quest\saves`
/// - Fallback: `./save_data`
pub fn data_dir() -> PathBuf {
    quest_runtime::SessionConfig::from_env().resolved_save_dir()
}

/// Use `custom` if given, the default save directory otherwise.
pub fn data_dir_or(custom: Option<PathBuf>) -> PathBuf {
    custom.unwrap_or_else(data_dir)
}
