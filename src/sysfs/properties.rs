//! Descriptor reading and parsing.
//!
//! A descriptor is a small text file with one `key value` pair per line:
//!
//! ```text
//! type 11
//! version_major 0
//! node_from 1
//! node_to 2
//! weight 15
//! ```

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use crate::model::PropertyMap;
use crate::{Error, Result};

/// Characters a blank line may consist of (the C `isspace` set, which
/// includes vertical tab unlike `char::is_ascii_whitespace`).
const BLANK: &[char] = &[' ', '\t', '\n', '\x0B', '\x0C', '\r'];

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| BLANK.contains(&c))
}

/// Read the descriptor at `path` as lines, dropping trailing blank lines.
///
/// Missing files and non-regular files are `NotFound`; an empty file
/// yields no lines.
pub fn read_descriptor_lines(path: &Path) -> Result<Vec<String>> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        Err(source) => return Err(Error::Io { path: path.to_path_buf(), source }),
    };
    if !metadata.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let io_err = |source| Error::Io { path: path.to_path_buf(), source };
    let mut content = Vec::new();
    File::open(path)
        .and_then(|mut file| file.read_to_end(&mut content))
        .map_err(io_err)?;

    let mut lines = split_lines(path, &content)?;
    strip_trailing_blank_lines(&mut lines);
    Ok(lines)
}

/// Split raw descriptor bytes on `\n` (dropping a `\r` before it).
///
/// Decoding happens per line so a non-UTF-8 line is reported as malformed
/// content with its line number, not as a read failure.
fn split_lines(path: &Path, content: &[u8]) -> Result<Vec<String>> {
    let content = content.strip_suffix(b"\n").unwrap_or(content);
    if content.is_empty() {
        return Ok(Vec::new());
    }

    content
        .split(|b| *b == b'\n')
        .enumerate()
        .map(|(i, raw)| {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            String::from_utf8(raw.to_vec()).map_err(|e| Error::MalformedDescriptor {
                path: path.to_path_buf(),
                line: i + 1,
                message: format!("not valid UTF-8: {e}"),
            })
        })
        .collect()
}

/// Pop whitespace-only lines off the end. Interior blank lines stay.
pub fn strip_trailing_blank_lines(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|line| is_blank(line)) {
        lines.pop();
    }
}

/// Parse `key value` lines into a property map. Later keys overwrite earlier ones.
///
/// Every line must hold exactly a key and an unsigned 64-bit value; anything
/// else fails the whole descriptor. `path` is only used for error reporting.
pub fn parse_properties(path: &Path, lines: &[String]) -> Result<PropertyMap> {
    let mut properties = PropertyMap::new();

    for (i, line) in lines.iter().enumerate() {
        let malformed = |message: String| Error::MalformedDescriptor {
            path: path.to_path_buf(),
            line: i + 1,
            message,
        };

        let mut tokens = line.split(BLANK).filter(|t| !t.is_empty());
        let (key, value) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(key), Some(value), None) => (key, value),
            (None, _, _) => return Err(malformed("blank line".into())),
            (Some(key), None, _) => return Err(malformed(format!("no value for '{key}'"))),
            (Some(_), Some(_), Some(extra)) => {
                return Err(malformed(format!("unexpected token '{extra}'")));
            }
        };

        let value = value
            .parse::<u64>()
            .map_err(|e| malformed(format!("value '{value}' for '{key}': {e}")))?;

        properties.insert(key.to_string(), value);
    }

    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(String::from).collect()
    }

    fn parse(text: &str) -> Result<PropertyMap> {
        parse_properties(Path::new("properties"), &lines(text))
    }

    #[test]
    fn trailing_blank_lines_are_stripped() {
        let mut v = lines("type 2\n\nweight 10\n \t\n\x0B\n\r\n");
        strip_trailing_blank_lines(&mut v);
        assert_eq!(v, vec!["type 2", "", "weight 10"]);
    }

    #[test]
    fn all_blank_strips_to_empty() {
        let mut v = lines("\n  \n\t\n");
        strip_trailing_blank_lines(&mut v);
        assert!(v.is_empty());
    }

    #[test]
    fn parses_pairs_with_mixed_whitespace() {
        let map = parse("type 2\nnode_from\t0\n  node_to   1  \nweight 10").unwrap();
        let expected: PropertyMap = [("type", 2), ("node_from", 0), ("node_to", 1), ("weight", 10)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(map, expected);
    }

    #[test]
    fn later_lines_win() {
        let map = parse("weight 10\nweight 20").unwrap();
        assert_eq!(map.get("weight"), Some(&20));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn full_u64_range_parses() {
        let map = parse("max_bandwidth 18446744073709551615").unwrap();
        assert_eq!(map["max_bandwidth"], u64::MAX);
    }

    #[test]
    fn malformed_lines_fail_the_descriptor() {
        for text in [
            "type two",
            "type",
            "type 2 3",
            "type -1",
            "type 18446744073709551616",
            "type 2\n\nweight 10",
        ] {
            match parse(text) {
                Err(Error::MalformedDescriptor { .. }) => {}
                other => panic!("{text:?} should be malformed, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_utf8_line_is_malformed_not_io() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("properties");
        fs::write(&path, b"type 2\nnode_from 0\nnode_to 1\nweight 10\nvendor\xff 3\n").unwrap();

        match read_descriptor_lines(&path) {
            Err(Error::MalformedDescriptor { line, .. }) => assert_eq!(line, 5),
            other => panic!("expected MalformedDescriptor, got {other:?}"),
        }
    }

    #[test]
    fn crlf_and_missing_final_newline_split_like_lines() {
        let raw = b"type 2\r\nweight 10";
        assert_eq!(
            split_lines(Path::new("properties"), raw).unwrap(),
            vec!["type 2", "weight 10"]
        );
        assert!(split_lines(Path::new("properties"), b"\n").unwrap().is_empty());
    }

    #[test]
    fn malformed_error_names_the_line() {
        match parse("type 2\nweight x") {
            Err(Error::MalformedDescriptor { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedDescriptor, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_reads_as_no_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("properties");
        fs::write(&path, "").unwrap();
        assert!(read_descriptor_lines(&path).unwrap().is_empty());
    }

    #[test]
    fn reader_strips_trailing_blank_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("properties");
        fs::write(&path, "type 2\nnode_from 0\nnode_to 1\nweight 10\n\n\n").unwrap();
        assert_eq!(
            read_descriptor_lines(&path).unwrap(),
            vec!["type 2", "node_from 0", "node_to 1", "weight 10"]
        );
    }

    #[test]
    fn directory_in_place_of_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("properties");
        fs::create_dir(&path).unwrap();
        assert!(matches!(read_descriptor_lines(&path), Err(Error::NotFound(_))));
    }

    #[test]
    fn absent_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("properties");
        assert!(matches!(read_descriptor_lines(&path), Err(Error::NotFound(p)) if p == path));
    }
}
