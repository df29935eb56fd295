use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("workbook {path} has no worksheets")]
    NoWorksheets { path: PathBuf },

    #[error("failed to read worksheet from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
}
