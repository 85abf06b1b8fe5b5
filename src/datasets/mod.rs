pub mod counts;
pub mod errors;
pub mod folder;
pub mod generator;
pub mod split;

pub use counts::{display_counts_per_class, write_counts_per_class};
pub use errors::{LabelOrdinalError, SplitError};
pub use folder::ImageFolder;
pub use generator::{
    generate_splits, listing_fingerprint, FileEntry, SplitDefinition, DEFAULT_SPLIT_FILE,
};
pub use split::DatasetSplit;
