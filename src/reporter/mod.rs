pub mod console;
pub mod csv_output;

use crate::app::error::Error;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Writes through a temporary file in the same directory and renames it over
/// `path`, so readers never observe a half-written output.
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let output_error = |source| Error::Output {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(output_error)?;
    file.write_all(contents).map_err(output_error)?;
    file.flush().map_err(output_error)?;
    set_output_permissions(&file, path).map_err(output_error)?;
    file.persist(path).map_err(|err| output_error(err.error))?;
    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Temp files start out as 0600. Keeps an existing target's mode, 0644 otherwise.
#[cfg(unix)]
fn set_output_permissions(file: &NamedTempFile, target: &Path) -> std::io::Result<()> {
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    let permissions = match fs::metadata(target) {
        Ok(metadata) => metadata.permissions(),
        Err(_) => Permissions::from_mode(0o644),
    };
    file.as_file().set_permissions(permissions)
}

#[cfg(not(unix))]
fn set_output_permissions(_file: &NamedTempFile, _target: &Path) -> std::io::Result<()> {
    Ok(())
}
