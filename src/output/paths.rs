// src/output/paths.rs
//! Where exported pages live on disk.

use crate::types::DocumentUid;
use std::path::{Path, PathBuf};

const PAGE_FILE_NAME: &str = "index.html";
const POST_DIR: &str = "post";

/// `<out>/index.html`
pub fn home_output_path(base: &Path) -> PathBuf {
    base.join(PAGE_FILE_NAME)
}

/// `<out>/post/<uid>/index.html`
///
/// UIDs are validated to a single path segment, so the result always stays
/// under `base`.
pub fn post_output_path(base: &Path, uid: &DocumentUid) -> PathBuf {
    base.join(POST_DIR).join(uid.as_str()).join(PAGE_FILE_NAME)
}
