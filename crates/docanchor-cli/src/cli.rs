use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docanchor",
    about = "Fingerprint, sign and verify administrative documents anchored on a ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration (signature scheme, extraction programs)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a signing key pair
    GenerateKeys(GenerateKeysArgs),
    /// Fingerprint and sign a document for anchoring
    PrepareStore(PrepareStoreArgs),
    /// Fingerprint a document to look up its anchored values
    PrepareLookup(PrepareLookupArgs),
    /// Check a document's integrity and authenticity against anchored values
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct GenerateKeysArgs {
    /// Write a paired key file instead of printing the keys
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct DocumentArgs {
    pub file: PathBuf,
    /// Declared MIME type; guessed from the file extension when omitted
    #[arg(long)]
    pub content_type: Option<String>,
}

#[derive(Args)]
pub struct PrepareStoreArgs {
    #[command(flatten)]
    pub document: DocumentArgs,
    /// Paired key file (private key, then public key)
    #[arg(long, conflicts_with_all = ["private_key", "public_key"])]
    pub key_file: Option<PathBuf>,
    #[arg(long, requires = "public_key")]
    pub private_key: Option<String>,
    #[arg(long, requires = "private_key")]
    pub public_key: Option<String>,
}

#[derive(Args)]
pub struct PrepareLookupArgs {
    #[command(flatten)]
    pub document: DocumentArgs,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// JSON authenticity request; replaces the individual flags
    #[arg(
        long,
        conflicts_with_all = [
            "file_name",
            "new_digest",
            "document",
            "content_type",
            "stored_digest",
            "stored_signature",
            "stored_public_key",
            "anchored_at",
        ]
    )]
    pub request: Option<PathBuf>,
    #[arg(long)]
    pub file_name: Option<String>,
    #[arg(long, conflicts_with = "document")]
    pub new_digest: Option<String>,
    /// Compute the new digest from this document
    #[arg(long)]
    pub document: Option<PathBuf>,
    #[arg(long, requires = "document")]
    pub content_type: Option<String>,
    #[arg(long)]
    pub stored_digest: Option<String>,
    #[arg(long)]
    pub stored_signature: Option<String>,
    #[arg(long)]
    pub stored_public_key: Option<String>,
    /// Ledger timestamp of the anchoring transaction
    #[arg(long)]
    pub anchored_at: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generate_keys() {
        let cli = Cli::try_parse_from(["docanchor", "generate-keys"]).unwrap();
        if let Command::GenerateKeys(args) = cli.command {
            assert!(args.out.is_none());
        } else { panic!("wrong command"); }
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn parse_generate_keys_out() {
        let cli = Cli::try_parse_from(["docanchor", "generate-keys", "-o", "keys.txt"]).unwrap();
        if let Command::GenerateKeys(args) = cli.command {
            assert_eq!(args.out, Some(PathBuf::from("keys.txt")));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_prepare_store_with_key_file() {
        let cli = Cli::try_parse_from([
            "docanchor", "prepare-store", "d.pdf", "--key-file", "keys.txt", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        if let Command::PrepareStore(args) = cli.command {
            assert_eq!(args.document.file, PathBuf::from("d.pdf"));
            assert_eq!(args.key_file, Some(PathBuf::from("keys.txt")));
            assert!(args.document.content_type.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_prepare_store_with_texts() {
        let cli = Cli::try_parse_from([
            "docanchor", "prepare-store", "d.docx", "--private-key", "p", "--public-key", "q",
        ])
        .unwrap();
        if let Command::PrepareStore(args) = cli.command {
            assert_eq!(args.private_key.as_deref(), Some("p"));
            assert_eq!(args.public_key.as_deref(), Some("q"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn key_file_conflicts_with_texts() {
        let result = Cli::try_parse_from([
            "docanchor", "prepare-store", "d.pdf", "--key-file", "k", "--private-key", "p",
            "--public-key", "q",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn private_key_requires_public_key() {
        let result = Cli::try_parse_from(["docanchor", "prepare-store", "d.pdf", "--private-key", "p"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_prepare_lookup() {
        let cli = Cli::try_parse_from([
            "docanchor", "prepare-lookup", "scan", "--content-type", "application/pdf",
        ])
        .unwrap();
        if let Command::PrepareLookup(args) = cli.command {
            assert_eq!(args.document.content_type.as_deref(), Some("application/pdf"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verify_flags() {
        let cli = Cli::try_parse_from([
            "docanchor", "verify", "--file-name", "d.pdf", "--new-digest", "a", "--stored-digest",
            "b", "--stored-signature", "c", "--stored-public-key", "d", "--anchored-at", "7",
        ])
        .unwrap();
        if let Command::Verify(args) = cli.command {
            assert_eq!(args.new_digest.as_deref(), Some("a"));
            assert_eq!(args.anchored_at, Some(7));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_verify_request_with_global_flags() {
        let cli = Cli::try_parse_from([
            "docanchor", "verify", "--request", "req.json", "--config", "anchor.toml", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("anchor.toml")));
        assert!(matches!(cli.command, Command::Verify(VerifyArgs { request: Some(_), .. })));
    }

    #[test]
    fn new_digest_conflicts_with_document() {
        let result = Cli::try_parse_from([
            "docanchor", "verify", "--new-digest", "a", "--document", "d.pdf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn request_conflicts_with_every_request_flag() {
        for flag in [
            ["--file-name", "d.pdf"],
            ["--new-digest", "a"],
            ["--document", "d.pdf"],
            ["--stored-digest", "b"],
            ["--stored-signature", "c"],
            ["--stored-public-key", "d"],
            ["--anchored-at", "7"],
        ] {
            let result = Cli::try_parse_from(
                ["docanchor", "verify", "--request", "req.json"].into_iter().chain(flag),
            );
            assert!(result.is_err(), "--request should conflict with {}", flag[0]);
        }
    }
}
