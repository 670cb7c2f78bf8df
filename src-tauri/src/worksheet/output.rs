use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Where exported worksheets land: the user's download directory, falling
/// back to the home directory and then the working directory.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Write the PDF atomically: temp file in the target directory, then rename.
/// An existing file with the same name is replaced.
pub fn write_pdf_atomic(bytes: &[u8], target_path: &Path) -> Result<()> {
    let parent = target_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Target path has no parent directory: {:?}", target_path))?;

    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(bytes)?;
    temp.flush()?;
    temp.persist(target_path)?;

    info!("Wrote worksheet to {:?}", target_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested").join("SEO-Worksheet_example.com.pdf");

        write_pdf_atomic(b"%PDF-1.7", &target).unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"%PDF-1.7");
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.pdf");
        std::fs::write(&target, b"old").unwrap();

        write_pdf_atomic(b"new", &target).unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"new");
        // No temp files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
