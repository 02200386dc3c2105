//! sealed-props CLI — `sprops` command.
//!
//! Creates, imports, amends and inspects encrypted properties files.
//!
//! Exit status: 0 on success, 2 for I/O failures (including a missing
//! input file), 3 for encryption or decryption failures, 4 for malformed
//! input, 1 for everything else.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use clap::{ArgAction, Args, Parser, Subcommand};

use sealed_props::atomic::write_atomic;
use sealed_props::crypto::generate_key_file;
use sealed_props::properties::escape::{escape_key, escape_value};
use sealed_props::properties::write_plaintext;
use sealed_props::{
    load_properties, store_properties, ChaChaEncryptor, ErrorCategory, KeySource,
    PropertiesError, PropertyStore,
};

/// Environment variable naming a key file, used when no key flag is given.
const KEY_FILE_ENV: &str = "SPROPS_KEY_FILE";
/// Environment variable holding a base64 key, used as the last resort.
const KEY_ENV: &str = "SPROPS_KEY";

const DEFAULT_COMMENT: &str = "Encrypted Properties File generated by sprops";

// ── CLI structure ─────────────────────────────────────────────────────────────

/// sealed-props CLI — keep configuration secrets encrypted at rest.
#[derive(Parser, Debug)]
#[command(
    name = "sprops",
    about = "sealed-props CLI",
    version,
    long_about = "sprops — sealed-props CLI\n\nCreate encrypted properties files, import plaintext ones,\nadd entries, and inspect or export their contents."
)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    keys: KeyArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Where the master key comes from. Checked in the order listed, then
/// $SPROPS_KEY_FILE, then $SPROPS_KEY.
#[derive(Args, Debug)]
struct KeyArgs {
    /// File containing the base64 master key
    #[arg(long, global = true, value_name = "PATH")]
    key_file: Option<PathBuf>,

    /// Environment variable containing the base64 master key
    #[arg(long, global = true, value_name = "VAR")]
    key_env: Option<String>,

    /// Environment variable containing a passphrase (requires --salt)
    #[arg(long, global = true, value_name = "VAR")]
    passphrase_env: Option<String>,

    /// Base64 salt for --passphrase-env
    #[arg(long, global = true, value_name = "BASE64")]
    salt: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create or amend an encrypted properties file
    Seal {
        /// Existing properties file to start from (default: empty)
        #[arg(long = "in", value_name = "PATH")]
        input: Option<PathBuf>,

        /// Whether --in is already encrypted
        #[arg(long, value_name = "BOOL", action = ArgAction::Set, default_value_t = true)]
        in_encrypted: bool,

        /// Encrypted file to write
        #[arg(long, value_name = "PATH")]
        out: PathBuf,

        /// Property to add or overwrite (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_assignment)]
        set: Vec<(String, String)>,

        /// Header comment for the written file
        #[arg(long)]
        comment: Option<String>,

        /// Prompt for further properties on stdin until a blank key
        #[arg(long, short)]
        interactive: bool,
    },

    /// Print one decrypted value
    Get {
        /// Property key
        key: String,

        /// Encrypted properties file
        #[arg(long = "in", value_name = "PATH")]
        input: PathBuf,
    },

    /// List the properties of an encrypted file
    List {
        /// Encrypted properties file
        #[arg(long = "in", value_name = "PATH")]
        input: PathBuf,

        /// Print values as well as keys
        #[arg(long)]
        reveal: bool,
    },

    /// Decrypt to plaintext properties
    Export {
        /// Encrypted properties file
        #[arg(long = "in", value_name = "PATH")]
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Generate a new random master key file
    Keygen {
        /// Key file to write
        #[arg(long, value_name = "PATH")]
        out: PathBuf,

        /// Replace an existing key file
        #[arg(long)]
        force: bool,
    },
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Parse a `KEY=VALUE` argument. Only the first `=` separates.
fn parse_assignment(s: &str) -> std::result::Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))
}

fn key_source(keys: &KeyArgs) -> Result<KeySource> {
    if let Some(path) = &keys.key_file {
        return Ok(KeySource::File(path.clone()));
    }
    if let Some(var) = &keys.key_env {
        return Ok(KeySource::Env(var.clone()));
    }
    if let Some(var) = &keys.passphrase_env {
        let salt = keys
            .salt
            .as_deref()
            .ok_or_else(|| anyhow!("--passphrase-env requires --salt"))?;
        let salt = STANDARD
            .decode(salt.trim())
            .context("--salt is not valid base64")?;
        let passphrase = std::env::var(var)
            .with_context(|| format!("passphrase variable {var} is not set"))?;
        return Ok(KeySource::Passphrase { passphrase, salt });
    }
    if let Some(path) = std::env::var_os(KEY_FILE_ENV) {
        return Ok(KeySource::File(PathBuf::from(path)));
    }
    if std::env::var_os(KEY_ENV).is_some() {
        return Ok(KeySource::Env(KEY_ENV.to_string()));
    }
    Err(anyhow!(
        "no master key configured (use --key-file, --key-env, --passphrase-env, \
         ${KEY_FILE_ENV} or ${KEY_ENV}; `sprops keygen` creates a key file)"
    ))
}

fn resolve_encryptor(keys: &KeyArgs) -> Result<ChaChaEncryptor> {
    let source = key_source(keys)?;
    log::debug!("using key source {source:?}");
    source.resolve().context("failed to load master key")
}

fn load_sealed(path: &Path, encryptor: &ChaChaEncryptor) -> Result<PropertyStore> {
    load_properties(Some(path), Some(true), encryptor)
        .with_context(|| format!("failed to load {}", path.display()))
}

fn report_add(key: &str, replaced: bool) {
    if replaced {
        println!("  updated {key}");
    } else {
        println!("  added   {key}");
    }
}

/// Read one line without its terminator. `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).context("failed to read stdin")? == 0 {
        return Ok(None);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Some(line))
}

/// Prompt for key/value pairs until a blank key or end of input.
fn prompt_properties(
    props: &mut PropertyStore,
    input: &mut impl BufRead,
    prompts: &mut impl Write,
) -> Result<usize> {
    let mut count = 0;
    loop {
        write!(prompts, "Enter key (blank to finish): ")?;
        prompts.flush()?;
        let key = match read_line(input)? {
            Some(key) if !key.is_empty() => key,
            _ => break,
        };

        write!(prompts, "Enter value: ")?;
        prompts.flush()?;
        let value = read_line(input)?.unwrap_or_default();

        let replaced = props.add(key.clone(), value).is_some();
        report_add(&key, replaced);
        count += 1;
    }
    Ok(count)
}

/// One `list` output line, escaped like an export line so that every
/// entry stays on a single line.
fn list_line(key: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!("{}={}", escape_key(key), escape_value(value)),
        None => escape_key(key),
    }
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err
        .downcast_ref::<PropertiesError>()
        .map(PropertiesError::category)
    {
        Some(ErrorCategory::Io) => 2,
        Some(ErrorCategory::Crypto) => 3,
        Some(ErrorCategory::Format) => 4,
        Some(ErrorCategory::Config) | None => 1,
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let verbose = cli.verbose;
    let keys = &cli.keys;

    let result = match cli.command {
        Commands::Seal {
            input,
            in_encrypted,
            out,
            set,
            comment,
            interactive,
        } => cmd_seal(
            keys,
            input.as_deref(),
            in_encrypted,
            &out,
            set,
            comment.as_deref(),
            interactive,
            verbose,
        ),
        Commands::Get { key, input } => cmd_get(keys, &key, &input),
        Commands::List { input, reveal } => cmd_list(keys, &input, reveal, verbose),
        Commands::Export { input, out } => cmd_export(keys, &input, out.as_deref()),
        Commands::Keygen { out, force } => cmd_keygen(&out, force),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(exit_code(&e));
    }
}

// ── Command implementations ───────────────────────────────────────────────────

/// `sprops seal --out PATH [--in PATH] [--in-encrypted BOOL] [--set K=V]... [-i]`
#[allow(clippy::too_many_arguments)]
fn cmd_seal(
    keys: &KeyArgs,
    input: Option<&Path>,
    in_encrypted: bool,
    out: &Path,
    set: Vec<(String, String)>,
    comment: Option<&str>,
    interactive: bool,
    verbose: bool,
) -> Result<()> {
    let encryptor = resolve_encryptor(keys)?;

    let mut props = load_properties(input, Some(in_encrypted), &encryptor).with_context(|| {
        match input {
            Some(path) => format!("failed to load {}", path.display()),
            None => "failed to create property store".to_string(),
        }
    })?;
    if verbose {
        match input {
            Some(path) => println!("Loaded {} properties from {}", props.len(), path.display()),
            None => println!("Starting a new properties file"),
        }
    }

    for (key, value) in set {
        let replaced = props.add(key.clone(), value).is_some();
        report_add(&key, replaced);
    }

    if interactive {
        let stdin = std::io::stdin();
        prompt_properties(&mut props, &mut stdin.lock(), &mut std::io::stderr())?;
    }

    store_properties(out, &props, comment.unwrap_or(DEFAULT_COMMENT), &encryptor)
        .with_context(|| format!("failed to write {}", out.display()))?;

    println!("Stored {} properties to {}", props.len(), out.display());
    Ok(())
}

/// `sprops get KEY --in PATH`
fn cmd_get(keys: &KeyArgs, key: &str, input: &Path) -> Result<()> {
    let encryptor = resolve_encryptor(keys)?;
    let props = load_sealed(input, &encryptor)?;

    let value = props
        .get(key)
        .ok_or_else(|| anyhow!("property '{key}' not found in {}", input.display()))?;
    println!("{value}");
    Ok(())
}

/// `sprops list --in PATH [--reveal]`
fn cmd_list(keys: &KeyArgs, input: &Path, reveal: bool, verbose: bool) -> Result<()> {
    let encryptor = resolve_encryptor(keys)?;
    let props = load_sealed(input, &encryptor)?;

    if props.is_empty() {
        println!("No properties found.");
        return Ok(());
    }

    for (key, value) in props.iter() {
        println!("{}", list_line(key, reveal.then_some(value)));
    }

    if verbose {
        println!("\n{} properties in {}", props.len(), input.display());
    }
    Ok(())
}

/// `sprops export --in PATH [--out PATH]`
fn cmd_export(keys: &KeyArgs, input: &Path, output: Option<&Path>) -> Result<()> {
    let encryptor = resolve_encryptor(keys)?;
    let props = load_sealed(input, &encryptor)?;

    let text = write_plaintext(
        &props,
        &format!("Plaintext export of {}", input.display()),
    );

    if let Some(out_path) = output {
        write_atomic(out_path, text.as_bytes())
            .with_context(|| format!("failed to write to {}", out_path.display()))?;
        println!("Exported {} properties to {}", props.len(), out_path.display());
    } else {
        print!("{text}");
    }
    Ok(())
}

/// `sprops keygen --out PATH [--force]`
fn cmd_keygen(out: &Path, force: bool) -> Result<()> {
    if out.exists() && !force {
        return Err(anyhow!(
            "key file {} already exists (use --force to replace it; files sealed with the old key become unreadable)",
            out.display()
        ));
    }

    generate_key_file(out).with_context(|| format!("failed to write {}", out.display()))?;

    println!("Wrote new master key to {}", out.display());
    println!("  Use it with: --key-file {}", out.display());
    println!("  or:          export {KEY_FILE_ENV}={}", out.display());
    Ok(())
}
