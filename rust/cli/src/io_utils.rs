//! File helpers shared by the commands.
//!
//! Transcripts may be plain JSONL or Zstandard-compressed (`.zst`); both are
//! read fully into memory before parsing.

use serde::de::DeserializeOwned;

/// Read a text file, decompressing it first when the path ends in `.zst`.
///
/// A leading UTF-8 byte order mark is dropped.
///
/// ```rust,no_run
/// # use actline_cli::io_utils::read_text_auto;
/// let plain = read_text_auto("hands.jsonl").unwrap();
/// let packed = read_text_auto("hands.jsonl.zst").unwrap();
/// ```
pub fn read_text_auto(path: &str) -> Result<String, String> {
    let mut content = if path.ends_with(".zst") {
        let comp = std::fs::read(path).map_err(|e| e.to_string())?;
        let dec = zstd::stream::decode_all(comp.as_slice()).map_err(|e| e.to_string())?;
        String::from_utf8(dec).map_err(|e| e.to_string())?
    } else {
        std::fs::read_to_string(path).map_err(|e| e.to_string())?
    };
    strip_utf8_bom(&mut content);
    Ok(content)
}

/// Parse every non-blank line of a JSONL document.
///
/// Errors name the 1-based line that failed.
pub fn parse_jsonl<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, String> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| serde_json::from_str(line).map_err(|e| format!("line {}: {}", i + 1, e)))
        .collect()
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &std::path::Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e))?;
    }
    Ok(())
}

fn strip_utf8_bom(s: &mut String) {
    const UTF8_BOM: &str = "\u{feff}";
    if s.starts_with(UTF8_BOM) {
        s.drain(..UTF8_BOM.len());
    }
}
