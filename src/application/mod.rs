pub mod preference_store;
pub mod collection;

pub use preference_store::PreferenceStore;
pub use collection::{
    CollectionManager, CollectionStats, LoadOutcome, LoadState, DEFAULT_UNSCOPED_BATCHES,
};
