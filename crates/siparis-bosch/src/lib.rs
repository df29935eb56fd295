//! Three-file BOSCH order reconciliation: a supplier balance report, an
//! inbound delivery list, and an open order-line export are joined into a
//! flat list of depot-filtered order records, written out as both a
//! spreadsheet and pretty-printed JSON.

mod error;
pub mod pipeline;
mod record;

pub use error::BoschError;
pub use pipeline::{reconcile, to_json, write_xlsx, BoschOutput, MatchPolicy};
pub use record::{BoschOrderRecord, MatchStatus};
