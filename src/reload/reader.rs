//! Reading java-style properties files.

use crate::error::{ReloadError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Parsed key/value content of a properties file at one point in time.
///
/// Produced fresh from each file read; never persisted across reloads.
pub type PropertySet = HashMap<String, String>;

/// Read and parse the properties file at `path`.
///
/// # Errors
///
/// Returns [`ReloadError::Read`] when the file is missing, unreadable, or not
/// valid UTF-8. Parsing itself never fails.
pub fn read_properties(path: &Path) -> Result<PropertySet> {
    let text = fs::read_to_string(path).map_err(|source| ReloadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_properties(&text))
}

/// Parse properties text into a [`PropertySet`].
///
/// Supports the common subset of the java properties format: one
/// `key=value` (or `key:value`) mapping per line, `#` and `!` comment lines,
/// blank lines ignored, keys and values trimmed. A line without a separator
/// maps the whole trimmed line to the empty string.
pub fn parse_properties(text: &str) -> PropertySet {
    let mut props = PropertySet::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        match line.split_once(['=', ':']) {
            Some((key, value)) => {
                props.insert(key.trim_end().to_string(), value.trim_start().to_string())
            }
            None => props.insert(line.to_string(), String::new()),
        };
    }
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_key_value_lines() {
        let props = parse_properties("a=1\nb = two\nc: three\n");
        assert_eq!(props.get("a"), Some(&"1".to_string()));
        assert_eq!(props.get("b"), Some(&"two".to_string()));
        assert_eq!(props.get("c"), Some(&"three".to_string()));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let props = parse_properties("# comment\n! also a comment\n\nkey=value\n");
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("key"), Some(&"value".to_string()));
    }

    #[test]
    fn line_without_separator_maps_to_empty() {
        let props = parse_properties("flag.enabled\n");
        assert_eq!(props.get("flag.enabled"), Some(&String::new()));
    }

    #[test]
    fn value_may_contain_separator() {
        let props = parse_properties("url=jdbc:postgresql://localhost/db\n");
        assert_eq!(
            props.get("url"),
            Some(&"jdbc:postgresql://localhost/db".to_string())
        );
    }

    #[test]
    fn reads_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.properties");
        fs::write(&path, "test.property=old\n").unwrap();

        let props = read_properties(&path).unwrap();
        assert_eq!(props.get("test.property"), Some(&"old".to_string()));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_properties(Path::new("/nonexistent/app.properties")).unwrap_err();
        assert!(matches!(err, ReloadError::Read { .. }));
    }
}
