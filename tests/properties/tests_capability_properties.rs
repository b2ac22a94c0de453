#![allow(clippy::unwrap_used)]

use mime_cascade::capability::CapabilityFileImporter;

use crate::helpers::fixtures::{CAPABILITY_FILE, imported, temp_file};

#[test]
fn test_own_value_beats_inherited_value() {
    let tree = imported().into_tree();

    for node in tree.iter() {
        for (name, value) in &node.capabilities {
            assert_eq!(tree.capability(&node.id, name), Some(value.as_str()));
        }
    }
}

#[test]
fn test_missing_values_come_from_nearest_ancestor() {
    let tree = imported().into_tree();

    for node in tree.iter() {
        for name in ["brand_name", "model_name", "mobile_browser", "is_wireless_device"] {
            if node.own_capability(name).is_some() {
                continue;
            }
            let expected = tree
                .ancestors(&node.id)
                .into_iter()
                .find_map(|id| tree.get(id).unwrap().own_capability(name));
            assert_eq!(tree.capability(&node.id, name), expected, "{}.{name}", node.id);
        }
    }
}

#[test]
fn test_reading_the_same_file_twice() {
    let file = temp_file(CAPABILITY_FILE);
    let mut importer = CapabilityFileImporter::new();
    importer.read(file.path(), |_| {}).unwrap();
    let first = importer.tree().clone();

    importer.read(file.path(), |_| {}).unwrap();

    assert_eq!(importer.tree().len(), first.len());
    let ids: Vec<_> = importer.tree().ids().collect();
    assert_eq!(ids, first.ids().collect::<Vec<_>>());
    for node in first.iter() {
        assert_eq!(importer.tree().get(&node.id), Some(node));
    }
}
