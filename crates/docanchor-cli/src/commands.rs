use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use colored::Colorize;
use docanchor_crypto::render_paired_key_file;
use docanchor_extract::CommandExtractor;
use docanchor_service::{DocAnchor, KeyMaterial, ServiceConfig};
use docanchor_types::{
    AuthenticityRequest, AuthenticityVerdict, Document, DocumentFingerprintPayload, DocumentKind,
    KeyPair,
};
use serde::Serialize;
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let anchor = DocAnchor::new(load_config(cli.config.as_deref())?);
    let format = cli.format;
    match cli.command {
        Command::GenerateKeys(args) => cmd_generate_keys(&anchor, args, format),
        Command::PrepareStore(args) => cmd_prepare_store(&anchor, args, format),
        Command::PrepareLookup(args) => cmd_prepare_lookup(&anchor, args, format),
        Command::Verify(args) => cmd_verify(&anchor, args, format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServiceConfig> {
    let mut config = match path {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };
    config
        .extractors
        .pdf
        .get_or_insert_with(|| CommandExtractor::new("pdftotext").arg("-layout").arg("-").arg("-"));
    config.extractors.word.get_or_insert_with(|| {
        CommandExtractor::new("pandoc")
            .arg("--from=docx")
            .arg("--to=plain")
    });
    debug!(?config, "configuration loaded");
    Ok(config)
}

fn cmd_generate_keys(anchor: &DocAnchor, args: GenerateKeysArgs, format: OutputFormat) -> anyhow::Result<()> {
    let keys = anchor.generate_key_pair()?;
    match args.out {
        Some(path) => {
            write_key_file(&path, &keys)?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "keyFile": path.display().to_string(),
                    "publicKey": keys.public_key,
                    "keyAlgorithm": keys.key_algorithm,
                    "curve": keys.curve,
                })),
                OutputFormat::Text => {
                    println!("{} Wrote key pair to {}", "✓".green().bold(), path.display().to_string().bold());
                    println!("  Algorithm: {} ({})", keys.key_algorithm, keys.curve.cyan());
                    println!("  Public key: {}", keys.public_key.yellow());
                    Ok(())
                }
            }
        }
        None => match format {
            OutputFormat::Json => print_json(&keys),
            OutputFormat::Text => {
                println!("{} Generated {} key pair ({})", "✓".green().bold(), keys.key_algorithm, keys.curve.cyan());
                println!("  Private key: {}", keys.private_key.red());
                println!("  Public key:  {}", keys.public_key.yellow());
                Ok(())
            }
        },
    }
}

fn cmd_prepare_store(anchor: &DocAnchor, args: PrepareStoreArgs, format: OutputFormat) -> anyhow::Result<()> {
    let document = read_document(&args.document)?;
    let keys = match (&args.key_file, args.private_key, args.public_key) {
        (Some(path), _, _) => KeyMaterial::from_key_file(
            fs::read(path).with_context(|| format!("reading key file {}", path.display()))?,
        ),
        (None, private_key, public_key) => KeyMaterial {
            key_file: None,
            private_key,
            public_key,
        },
    };
    let payload = anchor.prepare_to_store(&document, &keys)?;
    match format {
        OutputFormat::Json => print_json(&payload),
        OutputFormat::Text => {
            println!("{} Prepared {} for anchoring", "✓".green().bold(), payload.file_name.bold());
            print_payload(&payload);
            Ok(())
        }
    }
}

fn cmd_prepare_lookup(anchor: &DocAnchor, args: PrepareLookupArgs, format: OutputFormat) -> anyhow::Result<()> {
    let document = read_document(&args.document)?;
    let payload = anchor.prepare_to_lookup(&document)?;
    match format {
        OutputFormat::Json => print_json(&payload),
        OutputFormat::Text => {
            println!("{} Fingerprinted {}", "✓".green().bold(), payload.file_name.bold());
            print_payload(&payload);
            Ok(())
        }
    }
}

fn cmd_verify(anchor: &DocAnchor, args: VerifyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let request = build_request(anchor, args)?;
    let verdict = anchor.evaluate(&request);
    match format {
        OutputFormat::Json => print_json(&verdict)?,
        OutputFormat::Text => print_verdict(&verdict),
    }
    if !verdict.is_valid() {
        bail!("{} failed verification", verdict.file_name);
    }
    Ok(())
}

fn build_request(anchor: &DocAnchor, args: VerifyArgs) -> anyhow::Result<AuthenticityRequest> {
    if let Some(path) = &args.request {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading request {}", path.display()))?;
        return serde_json::from_str(&text)
            .with_context(|| format!("parsing request {}", path.display()));
    }

    let (new_digest, document_name) = match (&args.document, args.new_digest) {
        (Some(file), _) => {
            let document = read_document(&DocumentArgs {
                file: file.clone(),
                content_type: args.content_type.clone(),
            })?;
            let lookup = anchor.prepare_to_lookup(&document)?;
            (lookup.digest, Some(lookup.file_name))
        }
        (None, Some(digest)) => (digest, None),
        (None, None) => bail!("pass --new-digest or --document"),
    };

    Ok(AuthenticityRequest {
        file_name: args.file_name.or(document_name).unwrap_or_default(),
        new_digest,
        stored_digest: required(args.stored_digest, "--stored-digest")?,
        stored_signature: required(args.stored_signature, "--stored-signature")?,
        stored_public_key: required(args.stored_public_key, "--stored-public-key")?,
        anchored_at: args.anchored_at,
    })
}

fn required(value: Option<String>, flag: &str) -> anyhow::Result<String> {
    value.ok_or_else(|| anyhow!("missing {flag}"))
}

fn read_document(args: &DocumentArgs) -> anyhow::Result<Document> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("reading document {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content_type = args
        .content_type
        .clone()
        .unwrap_or_else(|| guess_content_type(&args.file).to_string());
    Ok(Document::new(file_name, content_type, bytes))
}

/// Unknown extensions map to a generic type the service rejects.
fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => DocumentKind::Pdf.content_type(),
        Some("docx") => DocumentKind::Word.content_type(),
        _ => "application/octet-stream",
    }
}

fn write_key_file(path: &Path, keys: &KeyPair) -> anyhow::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(path)
        .with_context(|| format!("creating key file {}", path.display()))?;
    write_or_remove(path, &mut file, render_paired_key_file(keys).as_bytes())
}

/// Write `contents`, deleting the partly written file on failure so a retry
/// is not blocked by `create_new`.
fn write_or_remove(path: &Path, file: &mut impl Write, contents: &[u8]) -> anyhow::Result<()> {
    let written = file.write_all(contents).and_then(|()| file.flush());
    if let Err(err) = written {
        let _ = fs::remove_file(path);
        return Err(err).with_context(|| format!("writing key file {}", path.display()));
    }
    Ok(())
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_payload(payload: &DocumentFingerprintPayload) {
    println!("  Digest:     {}", payload.digest.yellow());
    if let Some(signature) = &payload.signature {
        println!("  Signature:  {}", signature.cyan());
    }
    if let Some(public_key) = &payload.public_key {
        println!("  Public key: {}", public_key.dimmed());
    }
}

fn print_verdict(verdict: &AuthenticityVerdict) {
    let mark = |ok: bool| if ok { "✓ yes".green() } else { "✗ no".red() };
    let headline = if verdict.is_valid() {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("{} {}", headline, verdict.file_name.bold());
    println!("  Integrated:    {}", mark(verdict.integrated));
    println!("  Authenticated: {}", mark(verdict.authenticated));
    println!("  Scheme:        {} ({})", verdict.key_algorithm, verdict.curve.cyan());
    if let Some(at) = verdict.anchored_at {
        println!("  Anchored at:   {at}");
    }
    println!("  Evaluated at:  {}", verdict.evaluated_at.to_rfc3339().dimmed());
    for note in &verdict.notes {
        println!("  {} {}", "note:".yellow(), note);
    }
}
