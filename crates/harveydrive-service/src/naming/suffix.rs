//! Auto-suffix resolution for files and datarooms.

use std::collections::HashSet;

/// Split a file name into base and extension at the last `.`.
///
/// The extension keeps its dot. Names without a dot, or whose only dot
/// leads the name (`.env`), have an empty extension.
pub fn split_file_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Resolve a file name not in `existing`, suffixing as `"{base} (n){ext}"`.
pub fn unique_file_name(candidate: &str, existing: &HashSet<String>) -> String {
    let (base, ext) = split_file_name(candidate);
    first_free(candidate, existing, |n| format!("{base} ({n}){ext}"))
}

/// Resolve a plain name not in `existing`, suffixing as `"{name} (n)"`.
pub fn unique_name(candidate: &str, existing: &HashSet<String>) -> String {
    first_free(candidate, existing, |n| format!("{candidate} ({n})"))
}

// Some n <= existing.len() + 1 is always free.
fn first_free<F>(candidate: &str, existing: &HashSet<String>, suffixed: F) -> String
where
    F: Fn(usize) -> String,
{
    if !existing.contains(candidate) {
        return candidate.to_string();
    }
    let mut n = 1;
    loop {
        let name = suffixed(n);
        if !existing.contains(&name) {
            return name;
        }
        n += 1;
    }
}
