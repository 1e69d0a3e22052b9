use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempPath};

use crate::domain::transcode::WriteMode;

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Regular files directly inside `dir` whose extension is exactly
/// `extension`, sorted by file name
pub fn list_files_with_extension(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() && !path.is_file() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) == Some(extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// An open destination file that only becomes visible per its write mode
pub enum Destination {
    Direct {
        path: PathBuf,
        file: BufWriter<File>,
    },
    Atomic {
        path: PathBuf,
        file: BufWriter<File>,
        temp: TempPath,
    },
}

impl Destination {
    /// Direct mode removes any existing file before creating the new one.
    /// Atomic mode creates a temporary file in the same directory.
    pub fn create(path: &Path, mode: WriteMode) -> io::Result<Self> {
        match mode {
            WriteMode::Direct => {
                remove_if_exists(path)?;
                let file = File::create(path)?;
                Ok(Destination::Direct {
                    path: path.to_path_buf(),
                    file: BufWriter::new(file),
                })
            }
            WriteMode::Atomic => {
                let dir = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent,
                    _ => Path::new("."),
                };
                let (file, temp) = NamedTempFile::new_in(dir)?.into_parts();
                Ok(Destination::Atomic {
                    path: path.to_path_buf(),
                    file: BufWriter::new(file),
                    temp,
                })
            }
        }
    }

    pub fn writer(&mut self) -> &mut BufWriter<File> {
        match self {
            Destination::Direct { file, .. } | Destination::Atomic { file, .. } => file,
        }
    }

    /// Flush and close; atomic mode renames over the final path here.
    /// Dropping an uncommitted atomic destination deletes its temp file.
    pub fn commit(self) -> io::Result<PathBuf> {
        match self {
            Destination::Direct { path, file } => {
                close(file)?;
                Ok(path)
            }
            Destination::Atomic { path, file, temp } => {
                close(file)?;
                temp.persist(&path).map_err(|e| e.error)?;
                Ok(path)
            }
        }
    }
}

fn close(file: BufWriter<File>) -> io::Result<()> {
    let file = file.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

impl Write for Destination {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer().flush()
    }
}
