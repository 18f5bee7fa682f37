//! Customer profile persistence

pub mod storage;

pub use storage::{
    HISTORY_LIMIT, ORDER_HISTORY_KEY, PROFILE_KEY, ProfileStore, StorageError, StorageResult,
};
