use crate::error::IngestError;
use crate::models::DocumentUpload;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn discover_pdf_files(folder: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .into_iter()
        .filter_map(|item| item.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let is_pdf = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

        if is_pdf {
            files.push(entry.path().to_path_buf());
        }
    }

    files.sort_unstable();
    files
}

pub fn load_pdf_uploads(folder: &Path) -> Result<Vec<DocumentUpload>, IngestError> {
    let files = discover_pdf_files(folder);

    if files.is_empty() {
        return Err(IngestError::InvalidArgument(format!(
            "no pdf files found in {}",
            folder.display()
        )));
    }

    files.iter().map(|path| load_pdf_upload(path)).collect()
}

pub fn load_pdf_upload(path: &Path) -> Result<DocumentUpload, IngestError> {
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            IngestError::MissingFileName(format!("path missing filename: {}", path.display()))
        })?
        .to_string();

    let bytes = fs::read(path)?;
    Ok(DocumentUpload::new(name, bytes))
}
