use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Uploaded file is not valid UTF-8 text: {0}")]
    InvalidUtf8(String),
}

/// Splits user input into artist names, one per line.
///
/// Lines are trimmed and blank lines dropped. Order is kept and repeated
/// names are kept as separate entries.
pub fn normalize(raw_text: &str) -> Vec<String> {
    raw_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decodes uploaded file content as text.
pub fn decode_upload(bytes: &[u8]) -> Result<String, InputError> {
    let text = std::str::from_utf8(bytes).map_err(|e| InputError::InvalidUtf8(e.to_string()))?;
    // Editors on Windows like to prepend a BOM
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
}
