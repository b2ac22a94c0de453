
use std::convert::Infallible;
use std::sync::Arc;

use crate::base::FormatSymbol;
use crate::negotiate::{Negotiator, RenderOutcome, Renderer};
use crate::registry::{FormatNode, FormatRegistry, Registration, SharedRegistry};
use crate::store::{DetectionRecord, InMemoryRecordStore, RecordStore};

/// `nokia_n96 -> s60 -> mobile -> html`, `iphone -> mobile`, `foo -> html`,
/// `bar -> foo`.
pub(super) fn registry() -> FormatRegistry {
    let mut registry = FormatRegistry::new();
    registry.register(Registration::new("mobile").with_mime("application/vnd.wap.xhtml+xml"));
    registry.register(Registration::new("s60").with_parent("mobile"));
    registry.register(Registration::new("iphone").with_parent("mobile"));
    registry.register(Registration::new("nokia_n96").with_parent("s60"));
    registry.register(Registration::new("foo").with_mime("text/foo"));
    registry.register(Registration::new("bar").with_parent("foo"));
    registry
}

pub(super) fn store() -> InMemoryRecordStore {
    let store = InMemoryRecordStore::new();
    let nokia = store.create_browser("Nokia").unwrap();
    let firefox = store.create_browser("Firefox").unwrap();
    let n96 = store.create_platform("Nokia N96").unwrap();
    let series60 = store.create_platform("Nokia Series60").unwrap();
    let desktop = store.create_platform("Desktop").unwrap();
    store
        .bulk_insert(
            &[
                DetectionRecord::new("Mozilla/5.0 (Foo", "foo", firefox, desktop),
                DetectionRecord::new("foo/BAR", "bar", firefox, desktop),
                DetectionRecord::new("Series60", "s60", nokia, series60),
                DetectionRecord::new("Series60/3.2 NokiaN96", "nokia_n96", nokia, n96),
                DetectionRecord::new("Mozilla", "html", firefox, desktop),
                DetectionRecord::new("Opera Mini", "opera_mini", nokia, series60),
            ],
            true,
        )
        .unwrap();
    store
}

pub(super) fn negotiator() -> Negotiator {
    Negotiator::new(SharedRegistry::from_registry(registry()), Arc::new(store()))
}

/// Renders only formats that have a template, recording every attempt.
#[derive(Debug, Default)]
pub(super) struct Templates {
    available: Vec<&'static str>,
    pub attempts: Vec<FormatSymbol>,
}

impl Templates {
    pub fn with(available: &[&'static str]) -> Self {
        Self {
            available: available.to_vec(),
            attempts: Vec::new(),
        }
    }
}

impl Renderer for Templates {
    type Error = Infallible;

    fn render(&mut self, format: &FormatNode) -> Result<RenderOutcome, Infallible> {
        self.attempts.push(format.symbol.clone());
        if self.available.contains(&format.symbol.as_str()) {
            Ok(RenderOutcome::Rendered)
        } else {
            Ok(RenderOutcome::ResourceNotFound)
        }
    }
}
