//! Catalog module
//!
//! Snapshots of the live document collections and the machinery around them:
//! loading, publishing, group filtering, and nutrition memoization.

pub mod feed;
pub mod filter;
pub mod memo;
pub mod snapshot;
pub mod source;

pub use feed::CatalogFeed;
pub use filter::{all_group_ids, filter_by_group, GroupOwned};
pub use memo::NutritionMemo;
pub use snapshot::{load_snapshot, CatalogSnapshot};
pub use source::{CatalogError, CatalogSource, SqliteCatalogSource};
