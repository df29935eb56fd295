#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("required column(s) missing from {file}: {}", columns.join(", "))]
    MissingColumns { file: String, columns: Vec<String> },

    #[error(transparent)]
    Sheet(#[from] siparis_xlsx::SheetError),

    #[error("failed to write workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
