//! CLI for s3mirror.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use s3mirror_core::config::{self, MirrorConfig};
use s3mirror_core::logging;
use s3mirror_core::remote::S3Store;
use std::path::PathBuf;

use commands::{run_buckets, run_download, run_list, run_paths, run_sanitize, run_sanitize_path};

/// Top-level CLI for s3mirror.
#[derive(Debug, Parser)]
#[command(name = "s3mirror")]
#[command(about = "Mirror object-storage buckets onto sanitized local paths", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List bucket names visible to the configured credentials.
    Buckets,

    /// List the files in a bucket (empty folder placeholders are skipped).
    List {
        /// Bucket name or s3://bucket/prefix URI.
        bucket: String,
        /// Only list keys under this prefix (overrides a URI prefix).
        #[arg(long)]
        prefix: Option<String>,
        /// Print descriptors as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Download every accessible file in a bucket, reproducing its folders locally.
    Download {
        /// Bucket name or s3://bucket/prefix URI.
        bucket: String,
        /// Only download keys under this prefix (overrides a URI prefix).
        #[arg(long)]
        prefix: Option<String>,
        /// Local base directory (default: the configured `raw` data path).
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
        /// Download up to N files concurrently.
        #[arg(long, default_value = "1", value_name = "N")]
        jobs: usize,
        /// Fail instead of truncating folder paths that exceed the max length.
        #[arg(long)]
        strict: bool,
    },

    /// Print the sanitized form of a filename.
    Sanitize {
        name: String,
    },

    /// Print the sanitized form of a folder path.
    SanitizePath {
        path: String,
        /// Separator for the printed path (default: configured or platform separator).
        #[arg(long)]
        separator: Option<char>,
    },

    /// Print configured data paths, or one of them.
    Paths {
        /// root, data_root, raw, working, outputs or logs.
        name: Option<String>,
        #[arg(long)]
        subfolder: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut cfg = config::load_or_init()?;
        cfg.apply_env();

        if logging::init_logging(&cfg.log_level).is_err() {
            logging::init_logging_stderr(&cfg.log_level);
        }
        tracing::debug!("loaded config: {:?}", redacted(&cfg));

        let cwd = std::env::current_dir()?;
        match self.command {
            CliCommand::Buckets => {
                let store = S3Store::connect(&cfg.aws).await;
                run_buckets(&store).await?;
            }
            CliCommand::List { bucket, prefix, json } => {
                let store = S3Store::connect(&cfg.aws).await;
                run_list(&store, &bucket, prefix.as_deref(), json).await?;
            }
            CliCommand::Download {
                bucket,
                prefix,
                data_dir,
                jobs,
                strict,
            } => {
                let store = S3Store::connect(&cfg.aws).await;
                let data_dir = match data_dir {
                    Some(dir) => dir,
                    None => {
                        let paths = cfg.data_paths(&cwd);
                        paths.ensure_dirs()?;
                        paths.raw
                    }
                };
                let prefix = prefix.as_deref();
                run_download(&store, &cfg, &bucket, prefix, &data_dir, jobs, strict).await?;
            }
            CliCommand::Sanitize { name } => run_sanitize(&cfg, &name),
            CliCommand::SanitizePath { path, separator } => {
                run_sanitize_path(&cfg, &path, separator)
            }
            CliCommand::Paths { name, subfolder } => {
                run_paths(&cfg.data_paths(&cwd), name.as_deref(), subfolder.as_deref())
            }
        }

        Ok(())
    }
}

/// Config with credentials removed, for debug logging.
fn redacted(cfg: &MirrorConfig) -> MirrorConfig {
    let mut cfg = cfg.clone();
    cfg.aws.access_key_id = cfg.aws.access_key_id.map(|_| "<set>".to_string());
    cfg.aws.secret_access_key = cfg.aws.secret_access_key.map(|_| "<set>".to_string());
    cfg.aws.session_token = cfg.aws.session_token.map(|_| "<set>".to_string());
    cfg
}

#[cfg(test)]
mod tests;
