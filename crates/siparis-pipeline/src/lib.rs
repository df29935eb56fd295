//! The order-sheet pipeline: wide-table transform, inbound merge, per-brand
//! supplier-balance reconciliation, parallel brand-file loading, and the
//! xlsx exporter.

pub mod brands;
mod error;
pub mod export;
pub mod inbound;
pub mod loader;
pub mod transform;

pub use brands::profile::{Brand, BrandProfile};
pub use brands::reconcile::reconcile_brands;
pub use error::PipelineError;
pub use export::write_order_workbook;
pub use inbound::merge_inbound;
pub use loader::load_brand_sheets;
pub use transform::transform_main_sheet;
