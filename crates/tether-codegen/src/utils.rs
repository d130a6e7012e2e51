//! Path and naming helpers for generated source.

use std::path::{Component, Path, PathBuf};

pub use tether_bridge::case::dash_to_pascal_case;

/// Use forward slashes regardless of platform.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// Lexically resolve `.` and `..` components.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Path of `to` relative to the directory `from_dir`.
pub fn relative_path(from_dir: &Path, to: &Path) -> PathBuf {
    let from = clean_path(from_dir);
    let to = clean_path(to);
    let from_parts: Vec<_> = from.components().collect();
    let to_parts: Vec<_> = to.components().collect();

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from_parts.len() {
        out.push("..");
    }
    for part in &to_parts[common..] {
        out.push(part.as_os_str());
    }
    out
}

/// A module specifier importing `to_file` from `from_file`.
///
/// `extension` is stripped from the target (e.g. ".d.ts"), and the result
/// always starts with `./` or `../`.
pub fn relative_import(from_file: &Path, to_file: &Path, extension: &str) -> String {
    let from_dir = from_file.parent().unwrap_or_else(|| Path::new(""));
    let relative = normalize_path(&relative_path(from_dir, to_file).to_string_lossy());
    let relative = relative.strip_suffix(extension).unwrap_or(&relative);

    if relative.starts_with('.') {
        relative.to_string()
    } else {
        format!("./{relative}")
    }
}

/// Escape a string for a single-quoted JavaScript literal.
pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\n', "\\n")
}
