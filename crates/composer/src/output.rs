//! Writing generated documents

use std::fs;
use std::path::Path;

use crate::error::CliError;

/// Write `content` to `path`, or print it to stdout when no path is given
pub fn write_output(content: &str, path: Option<&Path>, label: &str) -> Result<(), CliError> {
    match path {
        Some(path) => {
            fs::write(path, ensure_trailing_newline(content)).map_err(|e| CliError::FileWrite {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            eprintln!("{} written to: {}", label, path.display());
        }
        None => print!("{}", ensure_trailing_newline(content)),
    }
    Ok(())
}

/// Write several named files into `dir`, creating it if needed
pub fn write_files(dir: &Path, files: &[(&str, String)]) -> Result<(), CliError> {
    fs::create_dir_all(dir).map_err(|e| CliError::FileWrite {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    for (name, content) in files {
        let path = dir.join(name);
        fs::write(&path, ensure_trailing_newline(content)).map_err(|e| CliError::FileWrite {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        eprintln!("  - {}", path.display());
    }
    Ok(())
}

fn ensure_trailing_newline(content: &str) -> String {
    if content.ends_with('\n') {
        content.to_string()
    } else {
        format!("{}\n", content)
    }
}
