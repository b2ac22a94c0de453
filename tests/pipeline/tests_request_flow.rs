#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rstest::rstest;

use mime_cascade::FormatSymbol;
use mime_cascade::export::{Exporter, register_device_formats};
use mime_cascade::negotiate::{NegotiateError, Negotiator};
use mime_cascade::registry::{Registration, SharedRegistry};
use mime_cascade::store::InMemoryRecordStore;

use crate::helpers::fixtures::{
    FIREFOX_UA, IPHONE_UA, PATCH_FILE, S60_UA, UNKNOWN_UA, imported,
};
use crate::helpers::renderers::TemplateSet;

const WAP_MIME: &str = "application/vnd.wap.xhtml+xml";

/// Import, patch, export and register device formats under `generic_xhtml`.
fn negotiator() -> Negotiator {
    let mut importer = imported();
    importer.read_from(PATCH_FILE.as_bytes(), |_| {}).unwrap();

    let store = Arc::new(InMemoryRecordStore::new());
    let report = Exporter::default().export_all(importer.tree_mut(), store.as_ref());
    assert!(report.is_clean());

    let registry = SharedRegistry::new();
    registry.register(Registration::new("generic_xhtml").with_mime(WAP_MIME));
    register_device_formats(
        importer.tree(),
        &mut registry.write(),
        report.formats.iter().map(|f| f.as_str()),
    );

    Negotiator::new(registry, store)
}

#[rstest]
#[case(S60_UA, "nokia_n96_ver1")]
#[case(IPHONE_UA, "apple_iphone_ver1")]
#[case(FIREFOX_UA, "firefox_3")]
#[case(UNKNOWN_UA, "html")]
#[case("NokiaE71-1/100.07.76", "a3_nokia_e71")]
fn test_detection(#[case] user_agent: &str, #[case] format: &str) {
    let client = negotiator().detect(user_agent).unwrap();
    assert_eq!(client.format(), format);
}

#[rstest]
#[case(S60_UA, "Nokia on Nokia N96")]
#[case(IPHONE_UA, "Mobile Safari on Apple iPhone")]
#[case(UNKNOWN_UA, "Generic Browser on Generic Hardware")]
fn test_full_names(#[case] user_agent: &str, #[case] name: &str) {
    let negotiator = negotiator();
    let client = negotiator.detect(user_agent).unwrap();
    assert_eq!(negotiator.full_name(&client).unwrap(), name);
}

#[test]
fn test_mobile_devices_are_variants_of_generic_xhtml() {
    let negotiator = negotiator();
    let s60 = negotiator.detect(S60_UA).unwrap();
    let firefox = negotiator.detect(FIREFOX_UA).unwrap();

    assert!(negotiator.is_variant_of(&s60, "generic_xhtml"));
    assert!(!negotiator.is_variant_of(&firefox, "generic_xhtml"));
    assert!(negotiator.is_variant_of(&firefox, "html"));
}

#[test]
fn test_s60_request_renders_mobile_template() {
    let negotiator = negotiator();
    let client = negotiator.detect(S60_UA).unwrap();
    let selection = negotiator.select_format(Some("html"), None, &client);
    assert!(selection.is_in_view("nokia_n96_ver1"));

    let mut accepted = vec![selection.chosen().clone()];
    accepted.extend(negotiator.accepted_formats([WAP_MIME, "text/html"]));
    let offers = negotiator.offers(["generic_xhtml", "html"]);
    let mut templates = TemplateSet::new("show", &["show.generic_xhtml", "show.html"]);

    let rendered = negotiator.respond(&accepted, &offers, &mut templates).unwrap();

    assert_eq!(rendered.symbol, "generic_xhtml");
    assert_eq!(templates.attempts, ["nokia_n96_ver1", "generic_xhtml"]);
    assert_eq!(templates.content_type.as_deref(), Some(WAP_MIME));
}

#[test]
fn test_layout_resolves_along_device_chain() {
    let negotiator = negotiator();
    let templates = TemplateSet::new("layout", &["layout.nokia_generic_series60", "layout.html"]);

    let resolved = negotiator
        .resolve_resource("nokia_n96_ver1_sub2", |format| templates.find(format))
        .unwrap();

    assert_eq!(resolved.resource, "layout.nokia_generic_series60");
    assert_eq!(resolved.depth, 2);

    let resolved = negotiator
        .resolve_resource("firefox_3", |format| templates.find(format))
        .unwrap();
    assert_eq!(resolved.format, "html");
}

#[test]
fn test_desktop_wildcard_request() {
    let negotiator = negotiator();
    let accepted = negotiator.accepted_formats(["*/*"]);
    let offers = negotiator.offers(["generic_xhtml", "html"]);
    let mut templates = TemplateSet::new("index", &["index.html"]);

    let rendered = negotiator.respond(&accepted, &offers, &mut templates).unwrap();

    assert_eq!(rendered.symbol, "html");
    assert_eq!(templates.attempts, ["html"]);
}

#[test]
fn test_unoffered_request_is_not_acceptable() {
    let negotiator = negotiator();
    let offers = negotiator.offers(["generic_xhtml"]);
    let mut templates = TemplateSet::new("index", &["index.generic_xhtml"]);

    let err = negotiator
        .respond(&[FormatSymbol::new("json")], &offers, &mut templates)
        .unwrap_err();

    assert!(matches!(err, NegotiateError::NotAcceptable { .. }));
    assert_eq!(err.status_code(), 406);
}

#[test]
fn test_concurrent_requests_during_registration() {
    let negotiator = negotiator();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let negotiator = negotiator.clone();
            scope.spawn(move || {
                for _ in 0..50 {
                    let client = negotiator.detect(S60_UA).unwrap();
                    assert_eq!(client.format(), "nokia_n96_ver1");
                    let chain = negotiator
                        .resolve_resource(client.format(), |f| (f == "html").then_some(()))
                        .unwrap();
                    assert_eq!(chain.format, "html");
                }
            });
        }
        scope.spawn(|| {
            for i in 0..50 {
                negotiator
                    .registry()
                    .register(Registration::new(format!("tmp{i}")).with_parent("generic_xhtml"));
            }
        });
    });

    assert!(negotiator.registry().exists("tmp49"));
}
