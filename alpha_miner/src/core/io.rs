use std::io::{Read, Write};
use std::path::Path;

/// File extension together with its MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionWithMime {
    /// File extension (without leading dot, e.g., `csv.gz`)
    pub extension: String,
    /// MIME type
    pub mime: String,
}

impl ExtensionWithMime {
    /// Create a new [`ExtensionWithMime`]
    pub fn new(extension: &str, mime: &str) -> Self {
        Self {
            extension: extension.to_string(),
            mime: mime.to_string(),
        }
    }
}

/// Infer the format of a file from its path
///
/// Compound extensions (e.g., `.csv.gz`) are kept together.
pub fn infer_format_from_path(path: &Path) -> Option<String> {
    let path_str = path.to_string_lossy().to_lowercase();
    if path_str.ends_with(".csv.gz") {
        return Some("csv.gz".to_string());
    }
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
}

/// Trait for importing types from a file path or reader
pub trait Importable: Sized {
    /// The error type returned by import operations
    type Error: std::error::Error + Send + Sync + 'static + From<std::io::Error>;

    /// Import from a reader, specifying the format.
    fn import_from_reader<R: Read>(reader: R, format: &str) -> Result<Self, Self::Error>;

    /// Formats supported by [`Importable::import_from_reader`]
    fn known_import_formats() -> Vec<ExtensionWithMime>;

    /// Import from a file path.
    /// The format is inferred from the file extension.
    fn import_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Self::Error> {
        let path = path.as_ref();
        let format = infer_format_from_path(path).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Could not infer format from path",
            )
        })?;

        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Self::import_from_reader(reader, &format)
    }

    /// Import from a byte slice, specifying the format.
    fn import_from_bytes(bytes: &[u8], format: &str) -> Result<Self, Self::Error> {
        Self::import_from_reader(std::io::Cursor::new(bytes), format)
    }
}

/// Trait for exporting types to a file path or writer
pub trait Exportable {
    /// The error type returned by export operations
    type Error: std::error::Error + Send + Sync + 'static + From<std::io::Error>;

    /// Export to a writer, specifying the format.
    fn export_to_writer<W: Write>(&self, writer: W, format: &str) -> Result<(), Self::Error>;

    /// Formats supported by [`Exportable::export_to_writer`]
    fn known_export_formats() -> Vec<ExtensionWithMime>;

    /// Export to a file path.
    /// The format is inferred from the file extension.
    fn export_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Self::Error> {
        let path = path.as_ref();
        let format = infer_format_from_path(path).ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Could not infer format from path",
            )
        })?;

        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        self.export_to_writer(writer, &format)
    }
}
