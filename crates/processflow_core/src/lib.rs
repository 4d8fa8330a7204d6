//! Core domain logic for ProcessFlow.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::block::{Block, BlockList, BlockType, BlockValidationError, ChecklistItem};
pub use model::generate_id;
pub use model::process::{Process, ShareRole, ShareSettings, ShareVisibility};
pub use model::user::{SessionUser, User, MIN_PASSWORD_LEN};
pub use repo::process_repo::{ProcessStore, StoreError, StoreResult};
pub use repo::user_repo::{DirectoryError, DirectoryResult, UserDirectory, UserUpdate};
pub use service::process_service::{ProcessService, ProcessServiceError, ProcessServiceResult};
pub use service::user_service::{UserService, UserServiceError, UserServiceResult};
pub use storage::{
    open_store, open_store_in_memory, KeyValueStore, SqliteKeyValueStore, StorageError,
    StorageResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
