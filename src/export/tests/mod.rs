
use crate::capability::{CapabilityFileImporter, CapabilityTree};

/// Five devices under one generic root:
///
/// - `nokia_generic_series60` and `nokia_n96_ver1` have full names
/// - `nokia_n95_ver1` shares the Nokia browser and gets its own platform
/// - `blank_browser` inherits an empty `mobile_browser`
/// - `no_agent` has no detection string
pub(super) const DEVICES: &str = r#"
<devices>
  <device id="generic" user_agent="" fall_back="root">
    <group id="product_info">
      <capability name="brand_name" value=""/>
      <capability name="model_name" value=""/>
      <capability name="mobile_browser" value=""/>
    </group>
  </device>
  <device id="nokia_generic_series60" user_agent="Nokia" fall_back="generic">
    <capability name="brand_name" value="Nokia"/>
    <capability name="model_name" value="Series60"/>
    <capability name="mobile_browser" value="Nokia"/>
  </device>
  <device id="nokia_n96_ver1" user_agent="NokiaN96" fall_back="nokia_generic_series60">
    <capability name="model_name" value="N96"/>
  </device>
  <device id="nokia_n95_ver1" user_agent="NokiaN95" fall_back="nokia_generic_series60">
    <capability name="model_name" value="N95"/>
  </device>
  <device id="blank_browser" user_agent="Blank" fall_back="generic">
    <capability name="brand_name" value="Acme"/>
    <capability name="model_name" value="One"/>
  </device>
  <device id="no_agent" user_agent="" fall_back="nokia_generic_series60">
    <capability name="model_name" value="Ghost"/>
  </device>
</devices>
"#;

pub(super) fn device_tree() -> CapabilityTree {
    let mut importer = CapabilityFileImporter::new();
    importer
        .read_from(DEVICES.as_bytes(), |_| {})
        .expect("in-memory read");
    importer.into_tree()
}

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::store::{
    BrowserId, DetectionRecord, InMemoryRecordStore, PlatformId, RecordStore, StoreError,
};

/// An in-memory store that counts batches and fails on demand.
#[derive(Debug, Default)]
pub(super) struct ScriptedStore {
    pub inner: InMemoryRecordStore,
    /// Number of upcoming `bulk_insert` calls to fail.
    pub failing_batches: AtomicUsize,
    pub fail_browsers: bool,
    pub batch_calls: AtomicUsize,
}

impl ScriptedStore {
    pub fn failing(batches: usize) -> Self {
        Self {
            failing_batches: AtomicUsize::new(batches),
            ..Self::default()
        }
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }
}

impl RecordStore for ScriptedStore {
    fn find_browser_by_name(&self, name: &str) -> Result<Option<BrowserId>, StoreError> {
        self.inner.find_browser_by_name(name)
    }

    fn create_browser(&self, name: &str) -> Result<BrowserId, StoreError> {
        if self.fail_browsers {
            return Err(StoreError::backend("browsers table is read-only"));
        }
        self.inner.create_browser(name)
    }

    fn find_platform_by_name(&self, name: &str) -> Result<Option<PlatformId>, StoreError> {
        self.inner.find_platform_by_name(name)
    }

    fn create_platform(&self, name: &str) -> Result<PlatformId, StoreError> {
        self.inner.create_platform(name)
    }

    fn browser_name(&self, id: BrowserId) -> Result<Option<String>, StoreError> {
        self.inner.browser_name(id)
    }

    fn platform_name(&self, id: PlatformId) -> Result<Option<String>, StoreError> {
        self.inner.platform_name(id)
    }

    fn bulk_insert(&self, records: &[DetectionRecord], validate: bool) -> Result<usize, StoreError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failing_batches
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(StoreError::backend("connection reset"));
        }
        self.inner.bulk_insert(records, validate)
    }

    fn find_longest_matching_detection(
        &self,
        user_agent: &str,
    ) -> Result<Option<DetectionRecord>, StoreError> {
        self.inner.find_longest_matching_detection(user_agent)
    }

    fn detection_count(&self) -> Result<usize, StoreError> {
        self.inner.detection_count()
    }
}
