//! Local directory layout for mirrored objects.
//!
//! A descriptor's subfolders are appended to a base directory, then the
//! result is sanitized into a [`LocalDestination`] right before download.

mod destination;

pub use destination::{local_destination, local_destination_strict, LocalDestination};

use crate::remote::FileMeta;

/// Appends `subfolders` to `base`, joined with `separator`.
///
/// Pure string composition: nothing is sanitized and the filesystem is not
/// touched. Empty `subfolders` returns `base` unchanged.
pub fn reconstruct_nested_path(base: &str, subfolders: &[String], separator: char) -> String {
    if subfolders.is_empty() {
        return base.to_string();
    }
    let sep = separator.to_string();
    format!("{base}{sep}{}", subfolders.join(&sep))
}

/// Chooses the (unsanitized) local directory for a remote file.
pub trait PathResolver: Send + Sync {
    fn nested_dir(&self, base: &str, meta: &FileMeta) -> String;
}

/// Default resolver: reproduces the key's folder structure under `base`.
#[derive(Debug, Clone, Copy)]
pub struct NestedSubfolders {
    pub separator: char,
}

impl Default for NestedSubfolders {
    fn default() -> Self {
        Self {
            separator: std::path::MAIN_SEPARATOR,
        }
    }
}

impl PathResolver for NestedSubfolders {
    fn nested_dir(&self, base: &str, meta: &FileMeta) -> String {
        reconstruct_nested_path(base, &meta.subfolders, self.separator)
    }
}

/// Flattens everything into `base`, ignoring the key's folders.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatLayout;

impl PathResolver for FlatLayout {
    fn nested_dir(&self, base: &str, _meta: &FileMeta) -> String {
        base.to_string()
    }
}
