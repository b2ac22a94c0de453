use crate::base::FormatSymbol;
use crate::registry::FormatRegistry;

/// A resource found for a format or one of its ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<R> {
    pub resource: R,
    /// The format the resource was found under.
    pub format: FormatSymbol,
    /// 0 for the requested format, 1 for its parent, and so on.
    pub depth: usize,
}

/// `format` followed by its ancestors, at most `max_depth` entries.
pub fn fallback_chain(registry: &FormatRegistry, format: &str, max_depth: usize) -> Vec<FormatSymbol> {
    std::iter::once(FormatSymbol::new(format))
        .chain(registry.ancestors(format))
        .take(max_depth)
        .collect()
}

/// Try `lookup` on each format of `chain` until one yields a resource.
pub fn resolve_along<R>(
    chain: &[FormatSymbol],
    mut lookup: impl FnMut(&str) -> Option<R>,
) -> Option<Resolved<R>> {
    for (depth, format) in chain.iter().enumerate() {
        if let Some(resource) = lookup(format) {
            tracing::debug!("[RESOURCE] found at '{}' (depth {})", format, depth);
            return Some(Resolved {
                resource,
                format: format.clone(),
                depth,
            });
        }
        tracing::trace!("[RESOURCE] nothing at '{}'", format);
    }
    tracing::debug!("[RESOURCE] exhausted {:?}", chain);
    None
}

/// Find a resource (a template, a layout) for `format`, falling back along
/// its ancestors. At most `max_depth` formats are tried.
pub fn resolve_resource<R>(
    registry: &FormatRegistry,
    format: &str,
    max_depth: usize,
    lookup: impl FnMut(&str) -> Option<R>,
) -> Option<Resolved<R>> {
    resolve_along(&fallback_chain(registry, format, max_depth), lookup)
}
