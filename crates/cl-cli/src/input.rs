use std::fs;
use std::io::{self, Read};

/// Read a whole file, or stdin when no path is given.
pub fn read_text(path: Option<&str>) -> Result<String, String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| format!("Failed to read '{}': {}", path, e))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            Ok(text)
        }
    }
}

/// Non-empty trimmed lines of a file or stdin.
pub fn read_lines(path: Option<&str>) -> Result<Vec<String>, String> {
    Ok(split_lines(&read_text(path)?))
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
