//! # Record Store
//!
//! The persistence boundary. Import writes browsers, hardware platforms and
//! detection records through [`RecordStore`]; negotiation reads the record
//! whose detection substring is the longest one contained in a client's
//! User-Agent header.
//!
//! [`InMemoryRecordStore`] is a complete implementation backed by locked
//! in-process tables. Database-backed stores implement the same trait.

mod error;
mod memory;
mod record;

pub use error::StoreError;
pub use memory::InMemoryRecordStore;
pub use record::{Browser, BrowserId, DetectionRecord, HardwarePlatform, PlatformId};

/// Minimum length of a browser or platform name.
pub const MIN_NAME_LEN: usize = 2;

/// Persistence operations needed by import and negotiation.
///
/// All methods take `&self`: stores are shared between the request-serving
/// threads and synchronize internally.
pub trait RecordStore: Send + Sync {
    fn find_browser_by_name(&self, name: &str) -> Result<Option<BrowserId>, StoreError>;

    fn create_browser(&self, name: &str) -> Result<BrowserId, StoreError>;

    fn find_platform_by_name(&self, name: &str) -> Result<Option<PlatformId>, StoreError>;

    fn create_platform(&self, name: &str) -> Result<PlatformId, StoreError>;

    fn browser_name(&self, id: BrowserId) -> Result<Option<String>, StoreError>;

    fn platform_name(&self, id: PlatformId) -> Result<Option<String>, StoreError>;

    /// Insert a batch of detection records. The batch is atomic: on error
    /// nothing from it is stored. Existing substrings are never overwritten.
    ///
    /// With `validate` set, a duplicate substring fails the batch; without
    /// it, duplicates are skipped. Returns the number of records stored.
    fn bulk_insert(&self, records: &[DetectionRecord], validate: bool) -> Result<usize, StoreError>;

    /// The record with the longest substring contained (case-sensitively) in
    /// `user_agent`. Ties go to the record stored first.
    fn find_longest_matching_detection(
        &self,
        user_agent: &str,
    ) -> Result<Option<DetectionRecord>, StoreError>;

    fn detection_count(&self) -> Result<usize, StoreError>;

    /// Find a browser by name, creating it if needed.
    fn find_or_create_browser(&self, name: &str) -> Result<BrowserId, StoreError> {
        match self.find_browser_by_name(name)? {
            Some(id) => Ok(id),
            None => self.create_browser(name),
        }
    }

    /// Find a platform by name, creating it if needed.
    fn find_or_create_platform(&self, name: &str) -> Result<PlatformId, StoreError> {
        match self.find_platform_by_name(name)? {
            Some(id) => Ok(id),
            None => self.create_platform(name),
        }
    }
}
