use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::base::{normalize_detection, normalize_device_id};

use super::error::ImportError;
use super::lexer::{LineRecord, parse_line};
use super::tree::CapabilityTree;

/// Where the importer is within the input stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportState {
    /// Outside any device; capability lines are ignored.
    #[default]
    Scanning,
    /// Capability lines apply to the device with this (normalized) id.
    InDevice(String),
}

/// Streams capability files into a [`CapabilityTree`].
///
/// Read the base file first, then any number of patch files. A device that
/// appears again overwrites its identifying fields and gains the newly listed
/// capabilities; capabilities the patch does not mention are left alone.
///
/// ```
/// use mime_cascade::capability::CapabilityFileImporter;
///
/// let mut importer = CapabilityFileImporter::new();
/// let source = r#"
/// <device id="generic" user_agent="" fall_back="root">
///   <capability name="brand_name" value=""/>
/// </device>
/// <device id="Nokia.N96" user_agent="NokiaN96" fall_back="generic">
///   <capability name="brand_name" value="Nokia"/>
/// </device>
/// "#;
/// importer.read_from(source.as_bytes(), |_| {}).unwrap();
///
/// assert_eq!(importer.tree().capability("nokia_n96", "brand_name"), Some("Nokia"));
/// ```
#[derive(Debug, Default)]
pub struct CapabilityFileImporter {
    tree: CapabilityTree,
    state: ImportState,
}

impl CapabilityFileImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue importing into an existing tree.
    pub fn with_tree(tree: CapabilityTree) -> Self {
        Self {
            tree,
            state: ImportState::Scanning,
        }
    }

    pub fn tree(&self) -> &CapabilityTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut CapabilityTree {
        &mut self.tree
    }

    pub fn into_tree(self) -> CapabilityTree {
        self.tree
    }

    pub fn state(&self) -> &ImportState {
        &self.state
    }

    /// Read a capability file from disk.
    ///
    /// `on_progress` is called after every device-open line with the number
    /// of devices read so far in this call. Returns that number.
    ///
    /// Devices parsed before an I/O failure stay in the tree.
    pub fn read(
        &mut self,
        path: impl AsRef<Path>,
        on_progress: impl FnMut(usize),
    ) -> Result<usize, ImportError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ImportError::io(path, e))?;
        tracing::info!("reading capability file {}", path.display());
        let devices = self
            .read_from(BufReader::new(file), on_progress)
            .map_err(|e| ImportError::io(path, e))?;
        tracing::info!(
            "read {} devices from {} ({} in tree)",
            devices,
            path.display(),
            self.tree.len()
        );
        Ok(devices)
    }

    /// Read capability lines from any buffered source.
    ///
    /// Invalid UTF-8 is replaced, never rejected.
    pub fn read_from(
        &mut self,
        mut reader: impl BufRead,
        mut on_progress: impl FnMut(usize),
    ) -> std::io::Result<usize> {
        let mut devices = 0;
        let mut buf = Vec::new();

        let result = loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break Ok(devices),
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    if self.process_line(&line) {
                        devices += 1;
                        on_progress(devices);
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => break Err(e),
            }
        };

        self.state = ImportState::Scanning;
        result
    }

    /// Feed a single line. Returns `true` when the line opened a device.
    pub fn process_line(&mut self, line: &str) -> bool {
        match parse_line(line) {
            Some(LineRecord::Device {
                id,
                user_agent,
                fall_back,
                actual_device_root,
            }) => {
                let id = normalize_device_id(&id);
                let fall_back = normalize_device_id(&fall_back);
                tracing::trace!("device '{}' falls back to '{}'", id, fall_back);
                self.tree.upsert(
                    &id,
                    normalize_detection(&user_agent),
                    fall_back,
                    actual_device_root,
                );
                self.state = ImportState::InDevice(id);
                true
            }
            Some(LineRecord::Capability { name, value }) => {
                if let ImportState::InDevice(id) = &self.state {
                    self.tree.set_capability(id, &name, value);
                }
                false
            }
            None => false,
        }
    }
}
