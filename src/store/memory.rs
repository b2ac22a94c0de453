use indexmap::IndexMap;
use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use super::error::StoreError;
use super::record::{Browser, BrowserId, DetectionRecord, HardwarePlatform, PlatformId};
use super::{MIN_NAME_LEN, RecordStore};

#[derive(Debug, Default)]
struct Tables {
    /// name -> id, ids are 1-based slot positions.
    browsers: IndexMap<String, BrowserId>,
    platforms: IndexMap<String, PlatformId>,
    /// Detection records in insertion order.
    detections: Vec<DetectionRecord>,
    substrings: FxHashSet<String>,
}

/// A [`RecordStore`] held entirely in memory.
///
/// Longest-match lookup is a linear containment scan over all records.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: RwLock<Tables>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all browsers in creation order.
    pub fn browsers(&self) -> Vec<Browser> {
        self.tables
            .read()
            .browsers
            .iter()
            .map(|(name, id)| Browser {
                id: *id,
                name: name.clone(),
            })
            .collect()
    }

    /// Snapshot of all hardware platforms in creation order.
    pub fn platforms(&self) -> Vec<HardwarePlatform> {
        self.tables
            .read()
            .platforms
            .iter()
            .map(|(name, id)| HardwarePlatform {
                id: *id,
                name: name.clone(),
            })
            .collect()
    }

    /// Snapshot of all detection records in store order.
    pub fn detections(&self) -> Vec<DetectionRecord> {
        self.tables.read().detections.clone()
    }

    /// Drop every record.
    pub fn clear(&self) {
        *self.tables.write() = Tables::default();
    }
}

fn validate_name(kind: &str, name: &str) -> Result<(), StoreError> {
    if name.chars().count() < MIN_NAME_LEN {
        return Err(StoreError::validation(format!(
            "{kind} name '{name}' is shorter than {MIN_NAME_LEN} characters"
        )));
    }
    Ok(())
}

impl RecordStore for InMemoryRecordStore {
    fn find_browser_by_name(&self, name: &str) -> Result<Option<BrowserId>, StoreError> {
        Ok(self.tables.read().browsers.get(name).copied())
    }

    fn create_browser(&self, name: &str) -> Result<BrowserId, StoreError> {
        validate_name("browser", name)?;
        let mut tables = self.tables.write();
        if tables.browsers.contains_key(name) {
            return Err(StoreError::duplicate("browser", name));
        }
        let id = BrowserId(tables.browsers.len() as u32 + 1);
        tables.browsers.insert(name.to_string(), id);
        Ok(id)
    }

    fn find_platform_by_name(&self, name: &str) -> Result<Option<PlatformId>, StoreError> {
        Ok(self.tables.read().platforms.get(name).copied())
    }

    fn create_platform(&self, name: &str) -> Result<PlatformId, StoreError> {
        validate_name("hardware platform", name)?;
        let mut tables = self.tables.write();
        if tables.platforms.contains_key(name) {
            return Err(StoreError::duplicate("hardware platform", name));
        }
        let id = PlatformId(tables.platforms.len() as u32 + 1);
        tables.platforms.insert(name.to_string(), id);
        Ok(id)
    }

    fn browser_name(&self, id: BrowserId) -> Result<Option<String>, StoreError> {
        let tables = self.tables.read();
        let name = (id.0 as usize)
            .checked_sub(1)
            .and_then(|slot| tables.browsers.get_index(slot))
            .map(|(name, _)| name.clone());
        Ok(name)
    }

    fn platform_name(&self, id: PlatformId) -> Result<Option<String>, StoreError> {
        let tables = self.tables.read();
        let name = (id.0 as usize)
            .checked_sub(1)
            .and_then(|slot| tables.platforms.get_index(slot))
            .map(|(name, _)| name.clone());
        Ok(name)
    }

    fn bulk_insert(&self, records: &[DetectionRecord], validate: bool) -> Result<usize, StoreError> {
        let mut tables = self.tables.write();

        let mut accepted: Vec<&DetectionRecord> = Vec::with_capacity(records.len());
        let mut batch_keys: FxHashSet<&str> = FxHashSet::default();
        for record in records {
            let duplicate = tables.substrings.contains(&record.substring)
                || !batch_keys.insert(record.substring.as_str());
            if duplicate {
                if validate {
                    return Err(StoreError::duplicate("detection substring", &record.substring));
                }
                tracing::debug!("skipping duplicate detection substring '{}'", record.substring);
                continue;
            }
            accepted.push(record);
        }

        for record in &accepted {
            tables.substrings.insert(record.substring.clone());
            tables.detections.push((*record).clone());
        }
        Ok(accepted.len())
    }

    fn find_longest_matching_detection(
        &self,
        user_agent: &str,
    ) -> Result<Option<DetectionRecord>, StoreError> {
        let tables = self.tables.read();
        let mut best: Option<&DetectionRecord> = None;
        for record in tables.detections.iter().filter(|r| r.matches(user_agent)) {
            // Strictly longer only, so the first stored record wins ties.
            if best.is_none_or(|b| record.substring.len() > b.substring.len()) {
                best = Some(record);
            }
        }
        Ok(best.cloned())
    }

    fn detection_count(&self) -> Result<usize, StoreError> {
        Ok(self.tables.read().detections.len())
    }
}
