pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Typed input from `--input <file>` if given, else from piped stdin.
/// `None` means the caller should fall back to individual flags.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_json(path).map(Some);
    }
    match stdin::read_stdin()? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}
