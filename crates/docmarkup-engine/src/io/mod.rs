use crate::comment::scan_doc_comments;
use crate::markup::DocumentationMarkup;
use crate::splitter::ParseSection;
use crate::tree::ParseOptions;
use log::debug;
use relative_path::{RelativePath, RelativePathBuf};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid source root: {0}")]
    InvalidRoot(String),
}

/// One documented item found in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDocumentation {
    pub file: RelativePathBuf,
    pub line: usize,
    pub documentation: DocumentationMarkup,
}

/// Read a source file and return its content
pub fn read_source(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Scan `root` for files with one of `extensions`, skipping anything
/// `is_excluded` rejects. Paths are relative to `root` and sorted.
pub fn scan_source_files<F>(
    root: &Path,
    extensions: &[String],
    is_excluded: F,
) -> Result<Vec<RelativePathBuf>, IoError>
where
    F: Fn(&RelativePath) -> bool,
{
    validate_root(root)?;

    let mut files = Vec::new();
    scan_directory_recursive(root, root, extensions, &is_excluded, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive<F>(
    root: &Path,
    dir: &Path,
    extensions: &[String],
    is_excluded: &F,
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), IoError>
where
    F: Fn(&RelativePath) -> bool,
{
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();
        let Some(relative) = relative_to(root, &path) else {
            continue;
        };
        if is_excluded(&relative) {
            debug!("excluded {relative}");
            continue;
        }

        if path.is_dir() {
            scan_directory_recursive(root, &path, extensions, is_excluded, files)?;
        } else if let Some(ext) = path.extension()
            && extensions.iter().any(|wanted| ext == wanted.as_str())
        {
            files.push(relative);
        }
    }

    Ok(())
}

fn relative_to(root: &Path, path: &Path) -> Option<RelativePathBuf> {
    let stripped = path.strip_prefix(root).ok()?;
    RelativePathBuf::from_path(stripped).ok()
}

/// Parse every doc comment in one source file, scanning each no further than
/// `up_to`. Comments with no content are left out.
pub fn document_source(
    relative_path: &RelativePath,
    root: &Path,
    options: &ParseOptions,
    up_to: ParseSection,
) -> Result<Vec<SourceDocumentation>, IoError> {
    let source = read_source(relative_path, root)?;
    let documented = scan_doc_comments(&source)
        .into_iter()
        .filter_map(|comment| {
            let documentation = DocumentationMarkup::from_comment_up_to(&comment.text, options, up_to);
            (!documentation.is_empty()).then(|| SourceDocumentation {
                file: relative_path.to_relative_path_buf(),
                line: comment.line,
                documentation,
            })
        })
        .collect::<Vec<_>>();
    debug!("{relative_path}: {} documented items", documented.len());
    Ok(documented)
}

pub fn validate_root(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidRoot(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}
