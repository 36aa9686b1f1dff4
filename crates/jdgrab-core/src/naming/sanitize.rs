//! Filesystem-safe relative paths for download targets.

use std::path::PathBuf;

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Sanitizes one path component.
///
/// - Replaces NUL, `\`, `:` and control characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing spaces and dots (so `.` and `..` become empty)
/// - Limits length to 255 bytes
pub fn sanitize_component(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;

    for c in name.chars() {
        let c = if c == '\0' || c == '\\' || c == ':' || c.is_control() {
            '_'
        } else {
            c
        };
        if c == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == ' ' || c == '.');
    if trimmed.len() <= NAME_MAX {
        return trimmed.to_string();
    }
    let mut take = NAME_MAX;
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}

/// Turns a `/`-separated relative filename into a safe relative path.
///
/// Empty, `.` and `..` components are dropped, so the result never escapes the
/// download root. Returns `None` when nothing usable remains.
pub fn sanitize_relative_path(filename: &str) -> Option<PathBuf> {
    let parts: Vec<String> = filename
        .split('/')
        .map(sanitize_component)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        return None;
    }
    Some(parts.iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn component_replaces_unsafe_chars() {
        assert_eq!(sanitize_component("a\\b:c.jpg"), "a_b_c.jpg");
        assert_eq!(sanitize_component("file\x00\x01name.jpg"), "file_name.jpg");
    }

    #[test]
    fn component_trims_dots_and_spaces() {
        assert_eq!(sanitize_component("  ..main_1.jpg.. "), "main_1.jpg");
        assert_eq!(sanitize_component(".."), "");
    }

    #[test]
    fn component_is_bounded() {
        let long = "x".repeat(400);
        assert_eq!(sanitize_component(&long).len(), 255);
    }

    #[test]
    fn relative_path_keeps_structure() {
        assert_eq!(
            sanitize_relative_path("JD_Product_2024_01_02_03_04_1/main_images/main_1.jpg").unwrap(),
            Path::new("JD_Product_2024_01_02_03_04_1")
                .join("main_images")
                .join("main_1.jpg")
        );
    }

    #[test]
    fn relative_path_cannot_escape() {
        assert_eq!(
            sanitize_relative_path("/../../etc/passwd").unwrap(),
            Path::new("etc").join("passwd")
        );
        assert!(sanitize_relative_path("../..").is_none());
        assert!(sanitize_relative_path("").is_none());
    }
}
