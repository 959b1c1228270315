use anyhow::{Context, Result};
use docmarkup_config::Config;
use docmarkup_engine::{Document, DocumentationMarkup, SourceDocumentation, io};
use relative_path::RelativePath;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, process};

/// What the command was pointed at.
enum Input {
    /// A single doc comment on stdin.
    Stdin,
    /// A markdown file, read as comment markup without decoration.
    Markup(PathBuf),
    /// A source file whose doc comments are each parsed.
    Source(PathBuf),
    /// A directory of source files.
    Directory(PathBuf),
}

impl Input {
    fn from_path(path: PathBuf) -> Self {
        if path.is_dir() {
            Self::Directory(path)
        } else if path.extension().is_some_and(|ext| ext == "md") {
            Self::Markup(path)
        } else {
            Self::Source(path)
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

/// Splits a file path into the directory it lives in and its name, the shape
/// the engine's source readers expect.
fn split_file_path(path: &Path) -> Result<(PathBuf, &RelativePath)> {
    let root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("'{}' is not a file path", path.display()))?;
    Ok((root, RelativePath::new(name)))
}

fn document_file(path: &Path, config: &Config) -> Result<Vec<SourceDocumentation>> {
    let (root, name) = split_file_path(path)?;
    let documented = io::document_source(
        name,
        &root,
        &config.parse.options(),
        config.parse.up_to_section,
    )?;
    Ok(documented)
}

fn document_directory(root: &Path, config: &Config) -> Result<Vec<SourceDocumentation>> {
    let files = io::scan_source_files(root, &config.scan.extensions, |path| {
        config.is_excluded(path.as_str())
    })?;
    log::info!("Found {} source files under {}", files.len(), root.display());

    let options = config.parse.options();
    let mut documented = Vec::new();
    for file in &files {
        documented.extend(io::document_source(
            file,
            root,
            &options,
            config.parse.up_to_section,
        )?);
    }
    Ok(documented)
}

fn run(input: Input, config: &Config) -> Result<()> {
    let pretty = config.output.pretty;
    let options = config.parse.options();
    let up_to = config.parse.up_to_section;

    match input {
        Input::Stdin => {
            let mut comment = String::new();
            std::io::stdin()
                .read_to_string(&mut comment)
                .context("Failed to read stdin")?;
            let markup = DocumentationMarkup::from_comment_up_to(&comment, &options, up_to);
            print_json(&markup, pretty)
        }
        Input::Markup(path) => {
            let (root, name) = split_file_path(&path)?;
            let text = io::read_source(name, &root)?;
            let markup = DocumentationMarkup::new(&Document::parse(&text, &options), up_to);
            print_json(&markup, pretty)
        }
        Input::Source(path) => print_json(&document_file(&path, config)?, pretty),
        Input::Directory(path) => print_json(&document_directory(&path, config)?, pretty),
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let input = match args.len() {
        1 => Input::Stdin,
        2 => Input::from_path(PathBuf::from(&args[1])),
        _ => {
            eprintln!("Usage: {} [file-or-directory]", args[0]);
            process::exit(1);
        }
    };

    let config_path = Config::config_path();
    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", config_path.display());
            config
        }
        Ok(None) => Config::default(),
        Err(e) => {
            log::error!("Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run(input, &config) {
        log::error!("{e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let markup = temp_dir.path().join("notes.md");
        let source = temp_dir.path().join("lib.rs");
        std::fs::write(&markup, "Summary.").unwrap();
        std::fs::write(&source, "/// Summary.\nfn f() {}").unwrap();

        assert!(matches!(Input::from_path(markup), Input::Markup(_)));
        assert!(matches!(Input::from_path(source), Input::Source(_)));
        assert!(matches!(
            Input::from_path(temp_dir.path().to_path_buf()),
            Input::Directory(_)
        ));
    }

    #[test]
    fn test_document_directory_honours_exclusions() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("vendor")).unwrap();
        std::fs::write(temp_dir.path().join("lib.rs"), "/// Kept.\nfn f() {}").unwrap();
        std::fs::write(
            temp_dir.path().join("vendor/dep.rs"),
            "/// Skipped.\nfn g() {}",
        )
        .unwrap();

        let mut config = Config::default();
        config.scan.exclude = vec!["vendor".to_string(), "vendor/**".to_string()];

        let documented = document_directory(temp_dir.path(), &config).unwrap();

        assert_eq!(documented.len(), 1);
        assert_eq!(documented[0].file.as_str(), "lib.rs");
    }

    #[test]
    fn test_document_file_reports_lines() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("lib.rs");
        std::fs::write(&source, "fn a() {}\n\n/// Summary.\n/// - Returns: x\nfn b() {}\n").unwrap();

        let documented = document_file(&source, &Config::default()).unwrap();

        assert_eq!(documented.len(), 1);
        assert_eq!(documented[0].line, 3);
        assert!(documented[0].documentation.tags().is_some());
    }
}
