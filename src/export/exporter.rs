use indexmap::{IndexMap, IndexSet};

use crate::base::FormatSymbol;
use crate::capability::{CapabilityTree, DeviceEntry};
use crate::store::{DetectionRecord, RecordStore};

use super::error::ExportError;
use super::type_map::TypeMap;

/// Capability naming a device's browser.
pub const BROWSER_CAPABILITY: &str = "mobile_browser";
/// Capability holding the brand half of a platform name.
pub const BRAND_CAPABILITY: &str = "brand_name";
/// Capability holding the model half of a platform name.
pub const MODEL_CAPABILITY: &str = "model_name";

/// Knobs for [`Exporter`].
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Detection records per `bulk_insert` call.
    pub chunk_size: usize,
    /// Extra attempts for a failed batch before it is reported and dropped.
    pub batch_retries: usize,
    pub type_map: TypeMap,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            batch_retries: 1,
            type_map: TypeMap::new(),
        }
    }
}

impl ExportOptions {
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_batch_retries(mut self, retries: usize) -> Self {
        self.batch_retries = retries;
        self
    }

    pub fn with_type_map(mut self, type_map: TypeMap) -> Self {
        self.type_map = type_map;
        self
    }
}

/// What an export run did.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Distinct browser names resolved to ids (created or reused).
    pub browsers: usize,
    /// Distinct platform names resolved to ids (created or reused).
    pub platforms: usize,
    /// Detection records actually stored.
    pub detections: usize,
    /// Devices rejected by the filter.
    pub skipped: usize,
    /// Format symbols of every record in a batch the store accepted, first
    /// use first. Records the store skipped as duplicates are included, so
    /// re-exporting into a populated store reports the same formats.
    pub formats: Vec<FormatSymbol>,
    pub exceptions: Vec<ExportError>,
}

impl ExportReport {
    pub fn is_clean(&self) -> bool {
        self.exceptions.is_empty()
    }
}

/// A device that passed the filter, with its derived names.
#[derive(Debug)]
struct Candidate {
    id: String,
    substring: String,
    browser: Option<String>,
    platform: Option<String>,
}

/// Flattens a capability tree into browser, platform and detection records.
///
/// ```
/// use mime_cascade::capability::CapabilityFileImporter;
/// use mime_cascade::export::{ExportOptions, Exporter};
/// use mime_cascade::store::{InMemoryRecordStore, RecordStore};
///
/// let mut importer = CapabilityFileImporter::new();
/// let source = r#"
/// <device id="nokia_n96" user_agent="NokiaN96" fall_back="root">
///   <capability name="mobile_browser" value="Nokia"/>
///   <capability name="brand_name" value="Nokia"/>
///   <capability name="model_name" value="N96"/>
/// </device>
/// "#;
/// importer.read_from(source.as_bytes(), |_| {}).unwrap();
///
/// let store = InMemoryRecordStore::new();
/// let report = Exporter::new(ExportOptions::default())
///     .export(importer.tree_mut(), &store, |_| true);
///
/// assert_eq!(report.detections, 1);
/// assert_eq!(store.platform_name(store.platforms()[0].id).unwrap().as_deref(), Some("Nokia N96"));
/// ```
#[derive(Debug, Default)]
pub struct Exporter {
    options: ExportOptions,
}

impl Exporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export every device.
    pub fn export_all<S>(&self, tree: &mut CapabilityTree, store: &S) -> ExportReport
    where
        S: RecordStore + ?Sized,
    {
        self.export(tree, store, |_| true)
    }

    /// Export the devices accepted by `filter`.
    ///
    /// The filter runs once per device, in tree order, and may set
    /// capabilities on the device it is given before names are derived.
    pub fn export<S, F>(&self, tree: &mut CapabilityTree, store: &S, mut filter: F) -> ExportReport
    where
        S: RecordStore + ?Sized,
        F: FnMut(&mut DeviceEntry<'_>) -> bool,
    {
        let mut report = ExportReport::default();

        // Pass 1: filter and derive names
        let ids: Vec<String> = tree.ids().map(str::to_string).collect();
        let mut candidates = Vec::with_capacity(ids.len());
        let mut browser_names: IndexSet<String> = IndexSet::new();
        let mut platform_names: IndexSet<String> = IndexSet::new();

        for id in ids {
            let Some(mut entry) = tree.entry(&id) else {
                continue;
            };
            if !filter(&mut entry) {
                tracing::trace!("[EXPORT] filter rejected '{}'", id);
                report.skipped += 1;
                continue;
            }

            let browser = entry.present_capability(BROWSER_CAPABILITY).map(str::to_string);
            let platform = platform_name(&entry);
            if let Some(name) = &browser {
                browser_names.insert(name.clone());
            }
            if let Some(name) = &platform {
                platform_names.insert(name.clone());
            }
            candidates.push(Candidate {
                substring: entry.user_agent().to_string(),
                id,
                browser,
                platform,
            });
        }

        // Pass 2: persist browsers and platforms
        let browsers = persist_names(browser_names, &mut report.exceptions, |name| {
            store
                .find_or_create_browser(name)
                .map_err(|source| ExportError::Browser {
                    name: name.to_string(),
                    source,
                })
        });
        let platforms = persist_names(platform_names, &mut report.exceptions, |name| {
            store
                .find_or_create_platform(name)
                .map_err(|source| ExportError::Platform {
                    name: name.to_string(),
                    source,
                })
        });
        report.browsers = browsers.len();
        report.platforms = platforms.len();
        tracing::debug!(
            "[EXPORT] {} browsers, {} platforms for {} devices",
            report.browsers,
            report.platforms,
            candidates.len()
        );

        // Pass 3: detection records in batches
        let mut batch: Vec<DetectionRecord> = Vec::with_capacity(self.options.chunk_size);
        let mut batch_no = 0;
        let mut formats: IndexSet<FormatSymbol> = IndexSet::new();

        for candidate in candidates {
            if candidate.substring.is_empty() {
                tracing::debug!("[EXPORT] '{}' has no detection string", candidate.id);
                continue;
            }
            let browser = candidate.browser.as_ref().and_then(|n| browsers.get(n));
            let platform = candidate.platform.as_ref().and_then(|n| platforms.get(n));
            let (Some(&browser), Some(&platform)) = (browser, platform) else {
                tracing::trace!("[EXPORT] '{}' lacks a browser or platform", candidate.id);
                continue;
            };

            let format = self
                .options
                .type_map
                .format_for(&candidate.id)
                .cloned()
                .unwrap_or_else(|| FormatSymbol::new(&candidate.id));
            batch.push(DetectionRecord::new(candidate.substring, format, browser, platform));

            if batch.len() >= self.options.chunk_size {
                self.store_batch(store, &mut batch, batch_no, &mut report, &mut formats);
                batch_no += 1;
            }
        }
        if !batch.is_empty() {
            self.store_batch(store, &mut batch, batch_no, &mut report, &mut formats);
        }

        report.formats = formats.into_iter().collect();
        tracing::info!(
            "exported {} detection records ({} skipped, {} exceptions)",
            report.detections,
            report.skipped,
            report.exceptions.len()
        );
        report
    }

    /// Insert one batch, retrying it whole. The batch is emptied either way.
    fn store_batch<S>(
        &self,
        store: &S,
        batch: &mut Vec<DetectionRecord>,
        batch_no: usize,
        report: &mut ExportReport,
        formats: &mut IndexSet<FormatSymbol>,
    ) where
        S: RecordStore + ?Sized,
    {
        let attempts = self.options.batch_retries + 1;
        for attempt in 1..=attempts {
            match store.bulk_insert(batch, false) {
                Ok(stored) => {
                    tracing::debug!("[EXPORT] batch {}: stored {} of {}", batch_no, stored, batch.len());
                    report.detections += stored;
                    formats.extend(batch.iter().map(|r| r.format.clone()));
                    break;
                }
                Err(source) if attempt == attempts => {
                    tracing::warn!("[EXPORT] batch {} dropped: {}", batch_no, source);
                    report.exceptions.push(ExportError::Batch {
                        batch: batch_no,
                        records: batch.len(),
                        attempts,
                        source,
                    });
                }
                Err(e) => {
                    tracing::debug!("[EXPORT] batch {} attempt {} failed: {}", batch_no, attempt, e);
                }
            }
        }
        batch.clear();
    }
}

/// `"{brand} {model}"`, or just the model when the brand is blank.
fn platform_name(entry: &DeviceEntry<'_>) -> Option<String> {
    let model = entry.present_capability(MODEL_CAPABILITY)?;
    Some(match entry.present_capability(BRAND_CAPABILITY) {
        Some(brand) => format!("{brand} {model}"),
        None => model.to_string(),
    })
}

fn persist_names<Id>(
    names: IndexSet<String>,
    exceptions: &mut Vec<ExportError>,
    mut persist: impl FnMut(&str) -> Result<Id, ExportError>,
) -> IndexMap<String, Id> {
    let mut ids = IndexMap::with_capacity(names.len());
    for name in names {
        match persist(&name) {
            Ok(id) => {
                ids.insert(name, id);
            }
            Err(e) => {
                tracing::warn!("[EXPORT] {}", e);
                exceptions.push(e);
            }
        }
    }
    ids
}

