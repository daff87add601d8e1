//! Computes the relative prefix from a generated page back to the site
//! root, so pages can reference shared assets at any nesting depth without
//! knowing where the site is deployed.

use std::path::Path;

const INDEX_FILE: &str = "index.html";

/// Computes the relative prefix needed to reach `dest` from the directory
/// of `output_path`: `./` for pages directly at the root, otherwise one
/// `../` per directory level.
///
/// The computation is purely textual. `dest` is stripped as a prefix
/// (insensitive to a trailing slash) and a trailing `index.html` file name
/// is dropped; the number of remaining path segments is the nesting depth.
/// A path that doesn't end in `index.html` only ever loses that literal
/// trailing segment, never its actual file name.
pub fn compute_root(output_path: &Path, dest: &Path) -> String {
    let output = output_path.to_string_lossy();
    let prefix = format!("{}/", dest.to_string_lossy().trim_end_matches('/'));
    let relative = output.strip_prefix(prefix.as_str()).unwrap_or(&output);
    let relative = relative.strip_suffix(INDEX_FILE).unwrap_or(relative);

    let depth = relative.split('/').filter(|s| !s.is_empty()).count();
    match depth {
        0 => String::from("./"),
        _ => "../".repeat(depth),
    }
}
