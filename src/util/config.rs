// Runtime configuration shared by the file workflows and the CLI

use crate::rsa::ExponentSearch;

/// Inputs above this size are refused before being read
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Configuration for key generation and file encryption/decryption
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub max_file_size: u64,
    pub exponent_search: ExponentSearch,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            exponent_search: ExponentSearch::Sequential,
        }
    }
}

impl Config {
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_exponent_search(mut self, search: ExponentSearch) -> Self {
        self.exponent_search = search;
        self
    }
}

/// Format file size for display
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
