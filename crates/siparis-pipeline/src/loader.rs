//! Parallel brand-file loading. Each read is an independent blocking parse;
//! a bounded buffer overlaps them and one overall deadline caps the batch.
//! A brand whose file cannot be read in time contributes an empty sheet,
//! never a failure.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use siparis_xlsx::{read_sheet, Sheet};
use tokio::time::Instant;
use tracing::warn;

use crate::brands::profile::Brand;

/// Reads every brand file concurrently (at most `concurrency` at a time)
/// under one shared deadline. Results are keyed by input position, so the
/// output preserves the input order — one entry per file even when the
/// same brand appears twice — and downstream reconciliation stays
/// deterministic regardless of which read finished first.
pub async fn load_brand_sheets(
    files: Vec<(Brand, PathBuf)>,
    concurrency: usize,
    timeout: Duration,
) -> Vec<(Brand, Sheet)> {
    let deadline = Instant::now() + timeout;
    let order: Vec<Brand> = files.iter().map(|(brand, _)| *brand).collect();

    let mut loaded: HashMap<usize, Sheet> = stream::iter(files.into_iter().enumerate())
        .map(|(slot, (brand, path))| async move {
            (slot, load_one(brand, path, deadline).await)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    order
        .into_iter()
        .enumerate()
        .map(|(slot, brand)| {
            let sheet = loaded
                .remove(&slot)
                .unwrap_or_else(|| Sheet::empty(brand.label()));
            (brand, sheet)
        })
        .collect()
}

async fn load_one(brand: Brand, path: PathBuf, deadline: Instant) -> Sheet {
    let path_str = path.display().to_string();
    let read = tokio::task::spawn_blocking(move || read_sheet(&path));

    match tokio::time::timeout_at(deadline, read).await {
        Ok(Ok(Ok(sheet))) => sheet,
        Ok(Ok(Err(err))) => {
            warn!(brand = %brand, path = %path_str, error = %err, "brand file unreadable");
            Sheet::empty(brand.label())
        }
        Ok(Err(join_err)) => {
            warn!(brand = %brand, path = %path_str, error = %join_err, "brand read task failed");
            Sheet::empty(brand.label())
        }
        Err(_) => {
            warn!(brand = %brand, path = %path_str, "brand read timed out");
            Sheet::empty(brand.label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unreadable_files_become_empty_sheets_in_input_order() {
        let files = vec![
            (Brand::Valeo, PathBuf::from("/nonexistent/valeo.xlsx")),
            (Brand::Mann, PathBuf::from("/nonexistent/mann.xlsx")),
        ];

        let sheets = load_brand_sheets(files, 4, Duration::from_secs(5)).await;

        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].0, Brand::Valeo);
        assert_eq!(sheets[1].0, Brand::Mann);
        assert!(sheets.iter().all(|(_, sheet)| sheet.is_empty()));
    }

    #[tokio::test]
    async fn repeated_brand_keeps_one_entry_per_file() {
        let files = vec![
            (Brand::Valeo, PathBuf::from("/nonexistent/a.xlsx")),
            (Brand::Valeo, PathBuf::from("/nonexistent/b.xlsx")),
        ];

        let sheets = load_brand_sheets(files, 2, Duration::from_secs(5)).await;

        assert_eq!(sheets.len(), 2);
        assert!(sheets.iter().all(|(brand, _)| *brand == Brand::Valeo));
    }

    #[tokio::test]
    async fn zero_concurrency_still_makes_progress() {
        let files = vec![(Brand::Bosch, PathBuf::from("/nonexistent/bosch.xlsx"))];
        let sheets = load_brand_sheets(files, 0, Duration::from_secs(5)).await;
        assert_eq!(sheets.len(), 1);
    }
}
