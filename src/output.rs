use std::{
    fs::{self, File},
    io::{self, Write},
    path::Path,
};

/// Write `data` to `path`, replacing any existing file. If writing fails after the file was
/// created, the partial file is removed before the error is returned.
pub fn write_output<P: AsRef<Path>>(path: P, data: &[u8]) -> io::Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path)?;

    let result = file.write_all(data).and_then(|_| file.flush());
    if let Err(e) = result {
        drop(file);

        if let Err(remove_err) = fs::remove_file(path) {
            log::warn!(
                "Failed to remove partial output {}: {}",
                path.display(),
                remove_err
            );
        }

        return Err(e);
    }

    Ok(())
}
