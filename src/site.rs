//! Static site generation: renders a tree of Markdown pages through an HTML
//! template and copies static assets next to them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::convert::document_to_html;
use crate::error::SiteError;
use crate::parser::segment_blocks;

const TITLE_PLACEHOLDER: &str = "{{ Title }}";
const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// The page title: the first block must be a single `# ` heading line.
pub fn extract_title(markdown: &str) -> Option<String> {
    let first = segment_blocks(markdown).into_iter().next()?;
    if first.contains('\n') {
        return None;
    }
    first
        .strip_prefix("# ")
        .map(|title| title.trim().to_string())
}

/// Render a page by filling the template's title and content placeholders.
///
/// `path` only names the source in errors.
pub fn render_page(
    markdown: &str,
    template: &str,
    path: &Path,
    config: &Config,
) -> Result<String, SiteError> {
    let title = extract_title(markdown).ok_or_else(|| SiteError::MissingTitle {
        path: path.to_path_buf(),
    })?;
    let content = document_to_html(markdown, config)?.to_html()?;
    Ok(template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content))
}

pub fn generate_page(
    from: &Path,
    template_path: &Path,
    dest: &Path,
    config: &Config,
) -> Result<(), SiteError> {
    log::info!(
        "Generating page from {} to {} using {}",
        from.display(),
        dest.display(),
        template_path.display()
    );
    let markdown = fs::read_to_string(from).map_err(|e| SiteError::io(from, e))?;
    let template = fs::read_to_string(template_path).map_err(|e| SiteError::io(template_path, e))?;
    let page = render_page(&markdown, &template, from, config)?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
    }
    fs::write(dest, page).map_err(|e| SiteError::io(dest, e))
}

/// Render every file under `content_dir` into the same layout under
/// `dest_dir`, swapping a `.md` suffix for `.html`.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    config: &Config,
) -> Result<(), SiteError> {
    for entry in read_dir_sorted(content_dir)? {
        let name = entry.file_name().unwrap_or_default().to_string_lossy().into_owned();
        if entry.is_file() {
            let stem = name.strip_suffix(".md").unwrap_or(&name);
            let dest = dest_dir.join(format!("{stem}.html"));
            generate_page(&entry, template_path, &dest, config)?;
        } else {
            generate_pages_recursive(&entry, template_path, &dest_dir.join(&name), config)?;
        }
    }
    Ok(())
}

/// Replace `dest` with a copy of the `source` tree.
pub fn copy_static(source: &Path, dest: &Path) -> Result<(), SiteError> {
    if !source.exists() {
        return Err(SiteError::io(
            source,
            std::io::Error::new(std::io::ErrorKind::NotFound, "source directory does not exist"),
        ));
    }
    if dest.exists() {
        fs::remove_dir_all(dest).map_err(|e| SiteError::io(dest, e))?;
    }
    fs::create_dir_all(dest).map_err(|e| SiteError::io(dest, e))?;

    let mut files = Vec::new();
    collect_files(source, &mut files)?;
    for file in files {
        let relative = file.strip_prefix(source).unwrap_or(&file);
        let target = dest.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
        }
        log::info!("Copying {} to {}", file.display(), target.display());
        fs::copy(&file, &target).map_err(|e| SiteError::io(&file, e))?;
    }
    Ok(())
}

/// Copy static assets, then render all content pages.
pub fn build_site(config: &Config) -> Result<(), SiteError> {
    let site = &config.site;
    if site.static_dir.exists() {
        copy_static(&site.static_dir, &site.output_dir)?;
    } else {
        log::warn!(
            "Static directory {} does not exist, skipping",
            site.static_dir.display()
        );
    }
    generate_pages_recursive(&site.content_dir, &site.template, &site.output_dir, config)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SiteError> {
    for path in read_dir_sorted(dir)? {
        if path.is_file() {
            files.push(path);
        } else {
            collect_files(&path, files)?;
        }
    }
    Ok(())
}

fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut paths = fs::read_dir(dir)
        .map_err(|e| SiteError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| SiteError::io(dir, e))?;
    paths.sort();
    Ok(paths)
}
