#![allow(clippy::unwrap_used)]

use mime_cascade::export::{ExportOptions, Exporter, TypeMap, register_device_formats};
use mime_cascade::registry::{FormatRegistry, Registration};
use mime_cascade::store::{InMemoryRecordStore, RecordStore};

use crate::helpers::fixtures::{PATCH_FILE, imported, temp_file};

#[test]
fn test_base_file_then_patch() {
    let mut importer = imported();
    assert_eq!(importer.tree().len(), 7);

    let patch = temp_file(PATCH_FILE);
    let mut seen = Vec::new();
    let count = importer.read(patch.path(), |n| seen.push(n)).unwrap();

    assert_eq!(count, 2);
    assert_eq!(seen, [1, 2]);
    let tree = importer.tree();
    assert_eq!(tree.len(), 8);
    assert_eq!(
        tree.capability("apple_iphone_ver1", "mobile_browser"),
        Some("Mobile Safari")
    );
    assert_eq!(tree.capability("apple_iphone_ver1", "brand_name"), Some("Apple"));
    assert_eq!(tree.capability("a3_nokia_e71", "brand_name"), Some("Nokia"));
    assert_eq!(
        tree.ancestors("a3_nokia_e71"),
        ["nokia_generic_series60", "generic_xhtml", "generic"]
    );
}

#[test]
fn test_export_fixture() {
    let mut importer = imported();
    importer.read_from(PATCH_FILE.as_bytes(), |_| {}).unwrap();
    let store = InMemoryRecordStore::new();

    let report = Exporter::default().export_all(importer.tree_mut(), &store);

    assert!(report.is_clean(), "{:?}", report.exceptions);
    assert_eq!(report.browsers, 3);
    assert_eq!(report.platforms, 5);
    assert_eq!(report.detections, 6);
    assert_eq!(store.detection_count().unwrap(), 6);

    let iphone = store
        .find_longest_matching_detection("Mozilla/5.0 (iPhone; U)")
        .unwrap()
        .unwrap();
    assert_eq!(iphone.format, "apple_iphone_ver1");
    assert_eq!(
        store.browser_name(iphone.browser).unwrap().as_deref(),
        Some("Mobile Safari")
    );
}

#[test]
fn test_export_wireless_devices_only() {
    let mut importer = imported();
    let store = InMemoryRecordStore::new();

    let report = Exporter::default().export(importer.tree_mut(), &store, |device| {
        device.capability("is_wireless_device") == Some("true")
    });

    assert_eq!(report.skipped, 2);
    assert_eq!(report.detections, 4);
    assert!(
        store
            .find_longest_matching_detection("Firefox/3.0")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_type_map_collapses_device_views() {
    let mut importer = imported();
    importer.read_from(PATCH_FILE.as_bytes(), |_| {}).unwrap();
    let store = InMemoryRecordStore::new();
    let type_map =
        TypeMap::from_patterns([("iphone", "^apple_iphone"), ("s60", "series60|nokia_n9|e71")])
            .unwrap();

    let report = Exporter::new(ExportOptions::default().with_type_map(type_map))
        .export_all(importer.tree_mut(), &store);

    assert_eq!(report.formats, ["s60", "iphone", "firefox_3"]);
    let e71 = store.find_longest_matching_detection("NokiaE71-1").unwrap().unwrap();
    assert_eq!(e71.format, "s60");
}

#[test]
fn test_device_formats_mirror_fallbacks() {
    let mut importer = imported();
    let store = InMemoryRecordStore::new();
    let report = Exporter::default().export_all(importer.tree_mut(), &store);

    let mut registry = FormatRegistry::new();
    registry.register(
        Registration::new("generic_xhtml").with_mime("application/vnd.wap.xhtml+xml"),
    );
    let registered = register_device_formats(
        importer.tree(),
        &mut registry,
        report.formats.iter().map(|f| f.as_str()),
    );

    assert_eq!(registered, 5);
    assert_eq!(
        registry.ancestors("nokia_n96_ver1_sub2"),
        [
            "nokia_n96_ver1",
            "nokia_generic_series60",
            "generic_xhtml",
            "html"
        ]
    );
    assert_eq!(
        registry.get("nokia_n96_ver1_sub2").unwrap().mime,
        "application/vnd.wap.xhtml+xml"
    );
    assert_eq!(registry.ancestors("firefox_3"), ["html"]);
    assert_eq!(registry.get("firefox_3").unwrap().mime, "application/xhtml+xml");
}
