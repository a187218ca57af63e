// File Operations for RSA Encryption/Decryption
// Text and CSV file pairs around the in-memory transports.
// Every handle lives inside one function, so it is closed on every exit path.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use crate::rsa::{CodecError, RsaPrivateKey, RsaPublicKey};
use crate::transport::{
    decrypt_csv, decrypt_from_text, encrypt_csv, encrypt_to_text, render_ciphertext,
    render_csv_line, rows_from_text, TransportError,
};

use super::config::{format_file_size, Config};

/// Errors that can occur during file operations
#[derive(Debug, Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("file {path:?} is {size} bytes, above the limit of {limit} bytes")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Refuse inputs above the configured size
fn check_size(path: &Path, config: &Config) -> FileResult<u64> {
    let size = fs::metadata(path)?.len();
    if size > config.max_file_size {
        return Err(FileError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: config.max_file_size,
        });
    }
    Ok(size)
}

/// Read entire text file into memory
pub fn read_text(path: &Path, config: &Config) -> FileResult<String> {
    let size = check_size(path, config)?;
    let mut file = File::open(path)?;
    let mut text = String::new();
    file.read_to_string(&mut text)?;
    debug!("read {} from {}", format_file_size(size), path.display());
    Ok(text)
}

/// Write text to file
pub fn write_text(path: &Path, data: &str) -> FileResult<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    debug!("wrote {} to {}", format_file_size(data.len() as u64), path.display());
    Ok(())
}

/// Encrypt a plaintext file into a bracketed ciphertext list.
/// Returns the number of characters encrypted.
pub fn encrypt_text_file(
    public_key: &RsaPublicKey,
    input: &Path,
    output: &Path,
    config: &Config,
) -> FileResult<usize> {
    let plaintext = read_text(input, config)?;
    let ciphertext = encrypt_to_text(public_key, &plaintext);
    write_text(output, &render_ciphertext(&ciphertext))?;
    info!("encrypted {} characters into {}", ciphertext.len(), output.display());
    Ok(ciphertext.len())
}

/// Decrypt a bracketed ciphertext list file into plaintext.
/// The output is only created once the whole input decrypted cleanly.
pub fn decrypt_text_file(
    private_key: &RsaPrivateKey,
    input: &Path,
    output: &Path,
    config: &Config,
) -> FileResult<usize> {
    let serialized = read_text(input, config)?;
    let plaintext = decrypt_from_text(private_key, &serialized)?;
    write_text(output, &plaintext)?;
    let count = plaintext.chars().count();
    info!("decrypted {} characters into {}", count, output.display());
    Ok(count)
}

/// Encrypt every character of a CSV file, delimiters and line breaks
/// included, into a single comma-joined line.
pub fn encrypt_csv_file(
    public_key: &RsaPublicKey,
    input: &Path,
    output: &Path,
    config: &Config,
) -> FileResult<usize> {
    let text = read_text(input, config)?;
    let rows = rows_from_text(&text);
    let ciphertext = encrypt_csv(public_key, &rows);
    write_text(output, &render_csv_line(&ciphertext))?;
    info!(
        "encrypted {} rows ({} characters) into {}",
        rows.len(),
        ciphertext.len(),
        output.display()
    );
    Ok(ciphertext.len())
}

/// Split CSV text into logical lines. Newlines inside quoted fields do not
/// end a line; a final terminator does not start an extra one.
fn csv_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, b) in text.bytes().enumerate() {
        match b {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Read a CSV file as a table of cells: no header row, ragged rows allowed.
/// A blank line is kept as a row with no cells.
pub fn read_csv_table(path: &Path, config: &Config) -> FileResult<Vec<Vec<String>>> {
    let text = read_text(path, config)?;

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    for line in csv_lines(&text) {
        let line = line.strip_suffix('\r').unwrap_or(line);
        // the csv reader skips blank lines, so they never reach it
        if line.is_empty() {
            rows.push(Vec::new());
            continue;
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());
        if reader.read_record(&mut record)? {
            rows.push(record.iter().map(str::to_string).collect());
        } else {
            rows.push(Vec::new());
        }
    }
    debug!("read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Write each string as a single-column CSV record
pub fn write_csv_column(path: &Path, rows: &[String]) -> FileResult<()> {
    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    for row in rows {
        writer.write_record([row.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Decrypt a CSV table of ciphertext cells, one output row per input row.
/// Returns the number of rows written.
pub fn decrypt_csv_file(
    private_key: &RsaPrivateKey,
    input: &Path,
    output: &Path,
    config: &Config,
) -> FileResult<usize> {
    let table = read_csv_table(input, config)?;
    let plaintext = decrypt_csv(private_key, &table)?;
    write_csv_column(output, &plaintext)?;
    info!("decrypted {} rows into {}", plaintext.len(), output.display());
    Ok(plaintext.len())
}
