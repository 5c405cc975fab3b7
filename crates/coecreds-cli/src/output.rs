//! Writing a credentials bundle to disk.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use coecreds_bundle::KEY_FILE;

/// Write every file of a bundle into `dir`, creating it if needed.
///
/// Refuses a directory that already has entries unless `force` is set.
/// The private key is only readable by its owner on Unix.
pub fn write_files(
    dir: &Path,
    files: &BTreeMap<String, Vec<u8>>,
    force: bool,
) -> io::Result<Vec<PathBuf>> {
    if dir.exists() && !force && fs::read_dir(dir)?.next().is_some() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!(
                "output directory {} is not empty (use --force to overwrite)",
                dir.display()
            ),
        ));
    }
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        write_file(&path, contents, name == KEY_FILE)?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(unix)]
fn write_file(path: &Path, contents: &[u8], private: bool) -> io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mode = if private { 0o600 } else { 0o644 };
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)?;
    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(mode))?;
    file.write_all(contents)
}

#[cfg(not(unix))]
fn write_file(path: &Path, contents: &[u8], _private: bool) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)
}
