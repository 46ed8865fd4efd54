//! Export Log Port - append-only record of PDF exports.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::memory::ExportEntry;

/// Port for the export log.
///
/// # Contract
///
/// - Entries come back in the order they were appended
/// - A corrupt log is read as empty (with a diagnostic), never as an error
/// - `append` never modifies or drops existing entries, except that a corrupt
///   log is replaced by one holding only the new entry
#[async_trait]
pub trait ExportLog: Send + Sync {
    /// All logged entries, oldest first.
    async fn entries(&self) -> Result<Vec<ExportEntry>, StorageError>;

    /// Append one entry.
    async fn append(&self, entry: ExportEntry) -> Result<(), StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_log_is_object_safe() {
        fn check<T: ExportLog + ?Sized>() {}
        check::<dyn ExportLog>();
    }
}
