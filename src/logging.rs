use env_logger::{Env, Target};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

/// Default log location: `<cache_dir>/glider-life/glider-life.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("glider-life").join("glider-life.log"))
}

/// Route `log` output to a file; the terminal belongs to the UI.
///
/// Filter comes from `RUST_LOG`, defaulting to `info`. Returns the path in use,
/// or an error message when the file cannot be opened (logging stays disabled).
pub fn init(path: Option<&Path>) -> Result<PathBuf, String> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_log_path().ok_or("Could not determine cache directory")?,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("Failed to create log directory: {}", e))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))?;

    Ok(path)
}
