//! `s3mirror sanitize` and `s3mirror sanitize-path` – preview sanitization.

use s3mirror_core::config::MirrorConfig;
use s3mirror_core::sanitize::{sanitize_filename, sanitize_folder_path};

pub fn run_sanitize(cfg: &MirrorConfig, name: &str) {
    println!("{}", sanitize_filename(name, &cfg.sanitize.filename_rules()));
}

pub fn run_sanitize_path(cfg: &MirrorConfig, path: &str, separator: Option<char>) {
    let mut rules = cfg.sanitize.folder_rules();
    if let Some(sep) = separator {
        rules = rules.with_separator(sep);
    }
    println!("{}", sanitize_folder_path(path, &rules));
}
