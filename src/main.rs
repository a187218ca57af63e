use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, LevelFilter};
use num_bigint::BigInt;
use rsa_charwise::util::file_ops::{read_text, write_text};
use rsa_charwise::util::{
    decrypt_csv_file, decrypt_text_file, encrypt_csv_file, encrypt_text_file, Config,
    DEFAULT_MAX_FILE_SIZE,
};
use rsa_charwise::{
    decrypt_from_text, encrypt_to_text, generate_keypair_using, render_ciphertext,
    ExponentSearch, RsaPrivateKey, RsaPublicKey,
};

#[derive(Parser)]
#[command(
    name = "rsa-charwise",
    author,
    version,
    about = "Character-wise RSA encryption for text and CSV files"
)]
struct Cli {
    #[arg(long, global = true)]
    debug: bool,
    /// Refuse input files larger than this many bytes.
    #[arg(long, global = true, value_name = "BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key pair from two primes.
    Keygen {
        #[arg(long, allow_negative_numbers = true)]
        p: BigInt,
        #[arg(long, allow_negative_numbers = true)]
        q: BigInt,
        /// Draw the public exponent at random instead of scanning upward.
        #[arg(long)]
        random_exponent: bool,
    },
    /// Encrypt a message or a text file.
    Encrypt {
        /// Public key as `e,n`.
        #[arg(long, value_name = "E,N")]
        key: RsaPublicKey,
        #[arg(long, value_name = "TEXT")]
        message: Option<String>,
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Decrypt a ciphertext list given inline or in a file.
    Decrypt {
        /// Private key as `d,n`.
        #[arg(long, value_name = "D,N")]
        key: RsaPrivateKey,
        #[arg(long, value_name = "TEXT")]
        ciphertext: Option<String>,
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Encrypt a CSV file into a single comma-joined line.
    EncryptCsv {
        #[arg(long, value_name = "E,N")]
        key: RsaPublicKey,
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
    /// Decrypt a CSV file of ciphertext cells, one output row per input row.
    DecryptCsv {
        #[arg(long, value_name = "D,N")]
        key: RsaPrivateKey,
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);
    let config = Config::default().with_max_file_size(cli.max_file_size);

    match cli.command {
        Commands::Keygen {
            p,
            q,
            random_exponent,
        } => {
            let search = if random_exponent {
                ExponentSearch::Random
            } else {
                ExponentSearch::Sequential
            };
            run_keygen(&p, &q, &config.with_exponent_search(search))
        }
        Commands::Encrypt {
            key,
            message,
            input,
            out,
        } => run_encrypt(&key, message, input, out, &config),
        Commands::Decrypt {
            key,
            ciphertext,
            input,
            out,
        } => run_decrypt(&key, ciphertext, input, out, &config),
        Commands::EncryptCsv { key, input, out } => {
            encrypt_csv_file(&key, &input, &out, &config)
                .with_context(|| format!("encrypting {}", input.display()))?;
            println!("File encrypted successfully.");
            Ok(())
        }
        Commands::DecryptCsv { key, input, out } => {
            decrypt_csv_file(&key, &input, &out, &config)
                .with_context(|| format!("decrypting {}", input.display()))?;
            println!("File decrypted successfully.");
            Ok(())
        }
    }
}

fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default));
    builder.format_timestamp(None);
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn run_keygen(p: &BigInt, q: &BigInt, config: &Config) -> Result<()> {
    debug!("generating key pair from p={} q={} ({:?})", p, q, config.exponent_search);
    let keypair = generate_keypair_using(p, q, config.exponent_search)
        .with_context(|| format!("generating a key pair from p={p}, q={q}"))?;
    println!("Public Key: {}", keypair.public_key);
    println!("Private Key: {}", keypair.private_key);
    Ok(())
}

fn run_encrypt(
    key: &RsaPublicKey,
    message: Option<String>,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let plaintext = match (message, input) {
        (Some(_), Some(_)) => bail!("Provide either --message or --input, not both."),
        (None, None) => bail!("Provide --message TEXT or --input FILE to encrypt."),
        (Some(message), None) => message,
        (None, Some(input)) => {
            if let Some(out) = &out {
                encrypt_text_file(key, &input, out, config)
                    .with_context(|| format!("encrypting {}", input.display()))?;
                println!("Encryption complete.");
                return Ok(());
            }
            read_text(&input, config)
                .with_context(|| format!("reading plaintext from {}", input.display()))?
        }
    };

    let rendered = render_ciphertext(&encrypt_to_text(key, &plaintext));
    match out {
        Some(out) => write_text(&out, &rendered)
            .with_context(|| format!("writing ciphertext to {}", out.display()))?,
        None => println!("Ciphertext: {rendered}"),
    }
    Ok(())
}

fn run_decrypt(
    key: &RsaPrivateKey,
    ciphertext: Option<String>,
    input: Option<PathBuf>,
    out: Option<PathBuf>,
    config: &Config,
) -> Result<()> {
    let serialized = match (ciphertext, input) {
        (Some(_), Some(_)) => bail!("Provide either --ciphertext or --input, not both."),
        (None, None) => bail!("Provide --ciphertext TEXT or --input FILE to decrypt."),
        (Some(ciphertext), None) => ciphertext,
        (None, Some(input)) => {
            if let Some(out) = &out {
                decrypt_text_file(key, &input, out, config)
                    .with_context(|| format!("decrypting {}", input.display()))?;
                println!("Decryption complete.");
                return Ok(());
            }
            read_text(&input, config)
                .with_context(|| format!("reading ciphertext from {}", input.display()))?
        }
    };

    let plaintext = decrypt_from_text(key, &serialized).context("decrypting ciphertext")?;
    match out {
        Some(out) => write_text(&out, &plaintext)
            .with_context(|| format!("writing plaintext to {}", out.display()))?,
        None => println!("Plaintext: {plaintext}"),
    }
    Ok(())
}
