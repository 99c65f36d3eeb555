mod csv_loader;
mod memory;
mod synthetic;

pub use csv_loader::CsvRegionLoader;
pub use memory::InMemoryRegionSource;
pub use synthetic::{SyntheticRegionGenerator, SyntheticRegionSpec};

use super::domain::{AdminLevel, InvalidRegionCode, Region, RegionCode};

/// Read-only access to materialised region data.
///
/// The engine only reads through this trait, so fixture data, CSV exports and
/// the synthetic generator are interchangeable.
pub trait RegionDataSource: Send + Sync {
    fn region(&self, code: &RegionCode) -> Option<&Region>;

    /// Every tracked region in a stable order.
    fn regions(&self) -> Box<dyn Iterator<Item = &Region> + '_>;

    /// Tracked regions directly below `code`, in source order.
    fn children(&self, code: &RegionCode) -> Vec<&Region> {
        self.regions()
            .filter(|region| region.code.is_child_of(code))
            .collect()
    }

    /// Tracked regions sharing `code`'s parent, excluding `code` itself.
    /// Provinces are siblings of every other province.
    fn siblings(&self, code: &RegionCode) -> Vec<&Region> {
        match code.parent() {
            Some(parent) => self
                .children(&parent)
                .into_iter()
                .filter(|region| &region.code != code)
                .collect(),
            None if code.level() == AdminLevel::Province => self
                .regions()
                .filter(|region| region.code.level() == AdminLevel::Province && &region.code != code)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Failure to materialise region data from an external export.
#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("failed to read region data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid region CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: {source}")]
    InvalidCode {
        row: usize,
        #[source]
        source: InvalidRegionCode,
    },
    #[error("row {row}: unknown settlement type '{value}'")]
    InvalidSettlement { row: usize, value: String },
}
