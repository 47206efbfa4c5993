use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("the file '{}' was not found", path.display())]
    NotFound { path: PathBuf },
    #[error("reading '{}': {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{file} line {line}: '{field}' has malformed value '{value}' ({reason})")]
    Malformed {
        file: String,
        line: u64,
        field: String,
        value: String,
        reason: String,
    },
    #[error("{file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}
