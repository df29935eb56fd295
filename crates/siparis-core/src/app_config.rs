/// Runtime configuration shared by the transform and reconciliation flows.
///
/// All fields have defaults; every run works with an empty environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    /// Parallelism cap for brand balance-sheet loading. `0` means auto:
    /// `min(available CPUs, 8)`.
    pub max_concurrent_brands: usize,
    /// Deadline for loading all brand sheets; slow or broken files are
    /// replaced by empty sheets past this.
    pub brand_load_timeout_secs: u64,
    /// Similarity floor for the brand reconciliation fuzzy fallbacks.
    pub brand_fuzzy_threshold: f64,
    /// How long cached sheet reads stay fresh.
    pub cache_ttl_secs: u64,
}

impl AppConfig {
    /// Concurrency to actually use for brand loading, resolving the
    /// `0 = auto` convention.
    #[must_use]
    pub fn effective_brand_concurrency(&self) -> usize {
        if self.max_concurrent_brands > 0 {
            return self.max_concurrent_brands;
        }
        let cpus = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1);
        cpus.min(8)
    }
}
