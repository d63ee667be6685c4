//! `s3mirror paths` – show configured data directories.

use s3mirror_core::config::DataPaths;

pub fn run_paths(paths: &DataPaths, name: Option<&str>, subfolder: Option<&str>) {
    match name {
        Some(name) => println!("{}", paths.get(name, subfolder).display()),
        None => {
            for name in DataPaths::NAMES {
                println!("{:<10} {}", name, paths.get(name, subfolder).display());
            }
        }
    }
}
