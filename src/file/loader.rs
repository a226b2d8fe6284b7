//! Document loading.
//!
//! Documents are read from files or stdin and converted into [`Value`]s
//! that paths can be evaluated against. YAML is the base format (JSON is
//! valid YAML); `.jsonl`/`.ndjson` files hold one JSON document per line.
//! Gzip-compressed input is detected by extension for files and by magic
//! bytes for stdin.

use crate::document::{from_json, from_yaml};
use crate::reflect::Value;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Loads and converts a document from the filesystem.
///
/// A file holding several `---` separated documents loads as a `List` of
/// them; a single document loads as its value and an empty file as `Null`.
///
/// # Examples
///
/// ```no_run
/// use pathquill::file::loader::load_document;
///
/// let doc = load_document("config.yaml").unwrap();
/// let host = pathquill::get(&doc, "server.host", &[]);
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file cannot be read
/// - A `.gz` file is not valid gzip or does not decompress to UTF-8
/// - The contents are not valid YAML (or JSON Lines, for `.jsonl`)
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    if determine_jsonl_format(path_ref) {
        parse_jsonl_content(&content)
    } else {
        parse_document(&content)
            .with_context(|| format!("Failed to parse {}", path_ref.display()))
    }
}

/// Parses YAML (or JSON) text, which may hold several documents.
pub fn parse_document(content: &str) -> Result<Value> {
    let mut documents = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        let value = serde_yaml::Value::deserialize(document)
            .with_context(|| format!("Invalid YAML in document {}", index + 1))?;
        documents.push(from_yaml(value));
    }

    Ok(match documents.len() {
        0 => Value::Null,
        1 => documents.remove(0),
        _ => Value::List(documents),
    })
}

/// Parses JSONL content (newline-delimited JSON) into a `List` of lines.
///
/// Each line must be a valid JSON value. Blank lines are skipped.
pub fn parse_jsonl_content(content: &str) -> Result<Value> {
    let mut lines = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let value: serde_json::Value = serde_json::from_str(line)
            .with_context(|| format!("Invalid JSON on line {}", line_num + 1))?;
        lines.push(from_json(value));
    }

    if lines.is_empty() {
        anyhow::bail!("No valid JSON found in JSONL content");
    }

    Ok(Value::List(lines))
}

/// Reads a document from standard input.
///
/// Gzip input is recognised by its magic bytes. The content is parsed as
/// YAML first and as JSON Lines if that fails.
///
/// # Errors
///
/// This function will return an error if:
/// - Reading from stdin fails
/// - The input is neither valid YAML nor valid JSONL
pub fn load_from_stdin() -> Result<Value> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)?
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in stdin")?
    };

    parse_stdin_content(&content)
}

fn parse_stdin_content(content: &str) -> Result<Value> {
    // several JSON objects on consecutive lines are not one YAML document
    if let Ok(value) = parse_document(content) {
        return Ok(value);
    }

    parse_jsonl_content(content)
        .context("Failed to parse stdin: input is neither valid YAML nor valid JSONL")
}

/// Checks for a `.jsonl` or `.ndjson` extension, looking past `.gz`.
///
/// - `data.jsonl` → true
/// - `data.jsonl.gz` → true
/// - `data.json.gz` → false
fn determine_jsonl_format<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    let base = path_str.strip_suffix(".gz").unwrap_or(&path_str);

    base.ends_with(".jsonl") || base.ends_with(".ndjson")
}

/// Reads and decompresses a gzipped file.
fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

/// Decompresses gzip-encoded bytes to a UTF-8 string.
fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped stdin")?;
    Ok(content)
}
