use rustc_hash::FxHashSet;

use crate::base::ROOT_FORMAT;
use crate::capability::CapabilityTree;
use crate::registry::{FormatRegistry, Registration};

/// Register device ids as formats, mirroring their fallback chains.
///
/// Each id is parented on its nearest fallback device that is itself being
/// registered (or already is a format); devices with no such ancestor hang
/// off the root format. Ancestors are registered before descendants so
/// mimes inherit down the chain. Ids missing from the tree are skipped.
///
/// Returns the number of formats registered.
pub fn register_device_formats<'a, I>(
    tree: &CapabilityTree,
    registry: &mut FormatRegistry,
    ids: I,
) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let selected: FxHashSet<&str> = ids.into_iter().filter(|id| tree.contains(id)).collect();

    // Shallow devices first; ties keep tree order.
    let mut ordered: Vec<(usize, &str)> = tree
        .ids()
        .filter(|id| selected.contains(id))
        .map(|id| (tree.ancestors(id).len(), id))
        .collect();
    ordered.sort_by_key(|(depth, _)| *depth);

    let mut registered = 0;
    for (_, id) in ordered {
        let parent = tree
            .ancestors(id)
            .into_iter()
            .find(|ancestor| selected.contains(ancestor) || registry.exists(ancestor))
            .unwrap_or(ROOT_FORMAT);

        if registry.register(Registration::new(id).with_parent(parent)) {
            registered += 1;
        } else {
            tracing::debug!("[EXPORT] device '{}' not registered as a format", id);
        }
    }
    tracing::info!("registered {} device formats", registered);
    registered
}
