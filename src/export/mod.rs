//! Export of stored resources onto a directory tree
//!
//! Every record in the store is written to `directory/host/path`. Paths that
//! name a directory (ending in `/`) get a synthetic `__resource__<ext>` file
//! name, with the extension guessed from the resource's `Content-Type`.

use crate::resource::Resource;
use crate::storage::Storage;
use crate::url::Uri;
use crate::ScrapeError;
use std::path::{Component, Path, PathBuf};

/// File name used for resources stored under a directory-like path
pub const RESOURCE_FILE_STEM: &str = "__resource__";

/// Extensions picked for common types where several are registered
const PREFERRED_EXTENSIONS: &[(&str, &str)] = &[
    ("text/html", "html"),
    ("text/plain", "txt"),
    ("text/css", "css"),
    ("text/csv", "csv"),
    ("text/javascript", "js"),
    ("application/javascript", "js"),
    ("application/json", "json"),
    ("application/xml", "xml"),
    ("text/xml", "xml"),
    ("application/pdf", "pdf"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/svg+xml", "svg"),
];

/// Guesses a file extension (with leading dot) from the Content-Type tokens
///
/// Returns `None` when the header is missing or no token is a known MIME type.
pub fn resource_extension(resource: &Resource) -> Option<String> {
    resource
        .content_types()
        .iter()
        .find_map(|content_type| extension_for(content_type))
        .map(|ext| format!(".{}", ext))
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    let content_type = content_type.to_ascii_lowercase();
    PREFERRED_EXTENSIONS
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
        .or_else(|| {
            mime_guess::get_mime_extensions_str(&content_type)
                .and_then(|exts| exts.first().copied())
        })
}

/// Derives where a stored resource lands under `directory`
///
/// `.` and `..` segments are dropped so every export stays inside
/// `directory/host`.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use sumi_cache::export::export_path;
/// use sumi_cache::{Headers, Resource, Uri};
///
/// let uri = Uri { host: "example.com".into(), path: "/docs/".into() };
/// let resource = Resource {
///     status: 200,
///     headers: [("Content-Type", "text/html")].into_iter().collect::<Headers>(),
///     data: Vec::new(),
/// };
/// assert_eq!(
///     export_path(Path::new("out"), &uri, &resource),
///     Path::new("out/example.com/docs/__resource__.html"),
/// );
/// ```
pub fn export_path(directory: &Path, uri: &Uri, resource: &Resource) -> PathBuf {
    let mut path = uri.path.clone();
    if path.ends_with('/') {
        path.push_str(RESOURCE_FILE_STEM);
        if let Some(ext) = resource_extension(resource) {
            path.push_str(&ext);
        }
    }

    let mut target = directory.join(&uri.host);
    for component in Path::new(path.trim_start_matches('/')).components() {
        if let Component::Normal(segment) = component {
            target.push(segment);
        }
    }
    target
}

/// Writes every stored resource under `directory`
///
/// # Arguments
///
/// * `storage` - The store to enumerate
/// * `directory` - Root of the exported tree; created if missing
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - The files written, in store order
/// * `Err(ScrapeError)` - Reading the store or writing a file failed
pub fn export<S: Storage>(storage: &S, directory: &Path) -> Result<Vec<PathBuf>, ScrapeError> {
    let items = storage.items()?;
    tracing::info!("Exporting {} resources to {}", items.len(), directory.display());

    let mut written = Vec::with_capacity(items.len());
    for (uri, resource) in items {
        let target = export_path(directory, &uri, &resource);
        write_file(&target, &resource.data)?;
        tracing::debug!("Wrote {} ({} bytes)", target.display(), resource.data.len());
        written.push(target);
    }

    Ok(written)
}

/// Stores a file, ensuring its parent directory exists
fn write_file(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)
}
