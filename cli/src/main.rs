//! ballotbox: credential tooling and offline election replay.

mod config;
mod replay;

use std::path::PathBuf;

use anyhow::Context;
use ballotbox_crypto::{
    derive_credential_id, generate_keypair, keypair_from_secret, keypair_from_seed, message_digest,
    recover_signer_from_slice, sign_vote,
};
use ballotbox_types::{CandidateId, CredentialId, SecretKey};
use ballotbox_utils::{init_logging, LogFormat};
use clap::Parser;

use crate::config::ReplayConfig;
use crate::replay::run_replay;

#[derive(Parser)]
#[command(name = "ballotbox", about = "Credential-gated election tooling")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Overrides the replay file's value when set.
    #[arg(long, env = "BALLOTBOX_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOTBOX_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the credential id for an external voter id.
    DeriveCredential { voter_id: String },

    /// Print the digest a holder signs to vote.
    Digest {
        credential: String,
        candidate: String,
    },

    /// Recover the signer of a vote signature.
    Recover {
        credential: String,
        candidate: String,
        signature: String,
    },

    /// Generate a key pair, random unless a 32-byte hex seed is given.
    Keygen {
        #[arg(long)]
        seed: Option<String>,
    },

    /// Sign a vote with a hex secret key.
    Sign {
        credential: String,
        candidate: String,
        #[arg(long, env = "BALLOTBOX_SECRET")]
        secret: String,
    },

    /// Run an election described in a TOML file and print the outcome.
    Replay {
        #[arg(long)]
        config: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let replay_config = match &cli.command {
        Command::Replay { config } => {
            let loaded = ReplayConfig::from_toml_file(config)
                .with_context(|| format!("loading {}", config.display()))?;
            Some(loaded)
        }
        _ => None,
    };

    // flags and env win over the replay file
    let level = match (&cli.log_level, &replay_config) {
        (Some(level), _) => level.clone(),
        (None, Some(config)) => config.log_level.clone(),
        (None, None) => "warn".to_string(),
    };
    let format: LogFormat = match (&cli.log_format, &replay_config) {
        (Some(format), _) => format.parse()?,
        (None, Some(config)) => config.log_format.parse()?,
        (None, None) => LogFormat::default(),
    };
    init_logging(format, &level)?;

    match cli.command {
        Command::DeriveCredential { voter_id } => {
            println!("{}", derive_credential_id(&voter_id));
        }
        Command::Digest {
            credential,
            candidate,
        } => {
            let credential: CredentialId = credential.parse().context("credential id")?;
            let digest = message_digest(&credential, &CandidateId::from(candidate));
            println!("{digest}");
        }
        Command::Recover {
            credential,
            candidate,
            signature,
        } => {
            let credential: CredentialId = credential.parse().context("credential id")?;
            let digest = message_digest(&credential, &CandidateId::from(candidate));
            let bytes = decode_hex(&signature).context("signature")?;
            match recover_signer_from_slice(&digest, &bytes) {
                Some(signer) => println!("{signer}"),
                None => anyhow::bail!("signature does not recover a signer"),
            }
        }
        Command::Keygen { seed } => {
            let keypair = match seed {
                Some(seed) => keypair_from_seed(&decode_key(&seed).context("seed")?),
                None => generate_keypair()?,
            };
            println!("identity {}", keypair.identity);
            println!("secret   0x{}", hex::encode(keypair.secret.0));
        }
        Command::Sign {
            credential,
            candidate,
            secret,
        } => {
            let credential: CredentialId = credential.parse().context("credential id")?;
            let secret = SecretKey(decode_key(&secret).context("secret")?);
            let keypair = keypair_from_secret(secret)?;
            let digest = message_digest(&credential, &CandidateId::from(candidate));
            tracing::debug!(signer = %keypair.identity, %digest, "signing vote");
            println!("{}", sign_vote(&digest, &keypair.secret)?);
        }
        Command::Replay { .. } => {
            let config = replay_config.context("replay config")?;
            let report = run_replay(&config)?;
            for outcome in &report.outcomes {
                let status = match &outcome.result {
                    Ok(()) => "accepted".to_string(),
                    Err(e) => format!("rejected: {e}"),
                };
                let (voter, candidate) = (&outcome.voter_id, outcome.candidate.as_str());
                println!("{voter:<24} {candidate:<16} {status}");
            }
            println!();
            for (candidate, votes) in &report.tally {
                println!("{:<24} {votes}", candidate.as_str());
            }
            println!("accepted {}", report.accepted);
            println!("rejected {}", report.rejected);
            println!("eligible candidates {}", report.eligible);
        }
    }
    Ok(())
}

fn decode_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    Ok(hex::decode(text.strip_prefix("0x").unwrap_or(text))?)
}

fn decode_key(text: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = decode_hex(text)?;
    let len = bytes.len();
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("expected 32 bytes, got {len}"))
}
