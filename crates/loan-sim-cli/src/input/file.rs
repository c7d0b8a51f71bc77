use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON request file and deserialise it into a typed request.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let file = resolve_file(path)?;
    let contents = fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read '{}': {}", file.display(), e))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid request in '{}': {}", file.display(), e).into())
}

/// Resolve relative paths against the working directory and require a
/// regular file.
fn resolve_file(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let file = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !file.is_file() {
        return Err(format!("Request file not found: {}", file.display()).into());
    }
    Ok(file)
}
