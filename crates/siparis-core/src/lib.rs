//! Domain leaves shared by both reconciliation flows: the canonical
//! warehouse enumeration and its per-source token tables, product-code
//! normalization, fuzzy code matching, the working-table data model, the
//! canonical output schema, run reporting, and environment configuration.

pub mod app_config;
pub mod config;
pub mod matching;
pub mod normalize;
pub mod record;
pub mod report;
pub mod schema;
pub mod warehouse;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use matching::find_best_match;
pub use normalize::{clean_product_code, compact_code, secondary_code};
pub use record::{ProductRecord, StockMetrics, Table, WarehouseMap};
pub use report::{RunReport, StageReport, StageStatus};
pub use schema::{canonical_columns, month_labels, ColumnKind, ColumnSpec, Metric};
pub use warehouse::{TokenTable, Warehouse, WarehouseSource};
