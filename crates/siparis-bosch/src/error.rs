use siparis_xlsx::SheetError;

/// Errors raised by the BOSCH reconciliation. Unlike the brand pipeline,
/// a schema problem in any of the three mandatory inputs aborts the whole
/// run rather than degrading to an empty contribution.
#[derive(Debug, thiserror::Error)]
pub enum BoschError {
    #[error("{file}: missing required columns: {}", columns.join(", "))]
    MissingColumns { file: String, columns: Vec<String> },

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to serialize records: {0}")]
    Json(#[from] serde_json::Error),
}
