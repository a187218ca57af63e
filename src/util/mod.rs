// Utilities: configuration and file-backed workflows

pub mod config;
pub mod file_ops;

pub use config::{format_file_size, Config, DEFAULT_MAX_FILE_SIZE};
pub use file_ops::{
    decrypt_csv_file, decrypt_text_file, encrypt_csv_file, encrypt_text_file, FileError,
    FileResult,
};
