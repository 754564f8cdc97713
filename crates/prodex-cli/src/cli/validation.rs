/// Parse an `--alias` value of the form `KEY=DIR`.
///
/// Both sides are trimmed and must be non-empty. Only the first `=`
/// splits, so directories may contain `=`.
///
/// # Errors
///
/// Returns an error message if the value is not `KEY=DIR`.
pub fn parse_alias(s: &str) -> Result<(String, String), String> {
    let Some((key, dir)) = s.split_once('=') else {
        return Err(format!("Alias must be KEY=DIR: '{s}'"));
    };
    let (key, dir) = (key.trim(), dir.trim());
    if key.is_empty() {
        return Err(format!("Alias key cannot be empty: '{s}'"));
    }
    if dir.is_empty() {
        return Err(format!("Alias directory cannot be empty: '{s}'"));
    }
    Ok((key.to_string(), dir.to_string()))
}

/// Whether an entry argument is a glob rather than a literal path.
pub fn is_glob(s: &str) -> bool {
    s.contains(['*', '?', '[', '{'])
}
