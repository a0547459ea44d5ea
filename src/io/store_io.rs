use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Read the backing file as raw bytes. A missing file is `Ok(None)`; any
/// other failure is returned to the caller.
pub fn read_store(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Split file contents on `\n`, like `str::lines` but without decoding.
/// A final newline does not start an extra empty line. A `\r` before the
/// newline stays part of the line.
pub fn split_lines(bytes: &[u8]) -> Vec<&[u8]> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|b| *b == b'\n').collect()
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append one line to the file, creating it if needed. When the existing
/// contents do not end in a newline, one is written first so the new record
/// starts on its own line.
pub fn append_line(path: &Path, existing: Option<&[u8]>, line: &str) -> io::Result<()> {
    let mut out = String::with_capacity(line.len() + 2);
    if let Some(bytes) = existing {
        if bytes.last().is_some_and(|b| *b != b'\n') {
            out.push('\n');
        }
    }
    out.push_str(line);
    out.push('\n');

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(out.as_bytes())?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(read_store(&tmp.path().join("nope.txt")).unwrap().is_none());
    }

    #[test]
    fn test_atomic_write_replaces_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.txt");
        fs::write(&path, "old\n").unwrap();
        atomic_write(&path, b"new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
        // No stray temp files left beside the target
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_atomic_write_into_missing_dir_fails_cleanly() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("tasks.txt");
        assert!(atomic_write(&path, b"x").is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_append_line_creates_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.txt");
        append_line(&path, None, "1,a").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,a\n");
    }

    #[test]
    fn test_append_line_repairs_missing_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.txt");
        fs::write(&path, "1,a").unwrap();
        append_line(&path, Some(&b"1,a"[..]), "2,b").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1,a\n2,b\n");
    }

    #[test]
    fn test_read_keeps_invalid_utf8() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tasks.txt");
        fs::write(&path, b"Caf\xe9\n").unwrap();
        assert_eq!(read_store(&path).unwrap().unwrap(), b"Caf\xe9\n");
    }

    #[test]
    fn test_split_lines() {
        assert!(split_lines(b"").is_empty());
        assert_eq!(split_lines(b"\n"), vec![&b""[..]]);
        assert_eq!(split_lines(b"a\n\nb"), vec![&b"a"[..], &b""[..], &b"b"[..]]);
        assert_eq!(split_lines(b"a\r\nb\n"), vec![&b"a\r"[..], &b"b"[..]]);
    }
}
