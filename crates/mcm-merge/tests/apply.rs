use std::collections::BTreeMap;

use mcm_clean::Cleaner;
use mcm_merge::{MappingError, MergeError, NaturalKey, NaturalKeyResolver, apply_row, merge_row};
use mcm_model::{CellValue, DestRecord, GenericRecord, Row, Schema};

const DEFINITION: &str = r#"{
    "fields": {
        "property_id": "float",
        "year_ending": "date",
        "heading_1": "string",
        "heading_2": "string"
    }
}"#;

fn mapping() -> BTreeMap<String, String> {
    [
        ("Property Id", "property_id"),
        ("Year Ending", "year_ending"),
        ("heading1", "heading_1"),
        ("heading2", "heading_2"),
    ]
    .into_iter()
    .map(|(raw, dest)| (raw.to_string(), dest.to_string()))
    .collect()
}

fn sample_row() -> Row {
    [
        ("Property Id", "234235423"),
        ("Year Ending", "2013/03/13"),
        ("heading1", "value1"),
        ("heading2", "value2"),
        ("heading3", "value3"),
    ]
    .into_iter()
    .collect()
}

#[test]
fn mapped_columns_set_attributes_and_the_rest_land_in_the_side_bag() {
    let record: GenericRecord = apply_row(
        &sample_row(),
        &mapping(),
        || GenericRecord::with_fields(["property_id", "year_ending", "heading_1", "heading_2"]),
        None,
        None,
    )
    .unwrap();

    assert_eq!(
        record.get("property_id"),
        Some(&CellValue::Text("234235423".to_string()))
    );
    assert_eq!(record.get("heading_1"), Some(&CellValue::Text("value1".to_string())));
    assert_eq!(record.get("heading_2"), Some(&CellValue::Text("value2".to_string())));
    assert_eq!(
        record.extra.get("heading3"),
        Some(&CellValue::Text("value3".to_string()))
    );
    assert_eq!(record.extra.len(), 1);
}

#[test]
fn every_raw_column_is_accounted_for_exactly_once() {
    let row = sample_row();
    let record: GenericRecord = apply_row(
        &row,
        &mapping(),
        || GenericRecord::with_fields(["property_id", "year_ending", "heading_1", "heading_2"]),
        None,
        None,
    )
    .unwrap();

    let mapping = mapping();
    for column in row.columns() {
        let as_attribute = mapping
            .get(column)
            .is_some_and(|dest| record.get(dest).is_some());
        let in_side_bag = record.extra.contains_key(column);
        assert!(
            as_attribute ^ in_side_bag,
            "column {column} must land in exactly one place"
        );
    }
}

#[test]
fn cleaner_coerces_mapped_columns_through_destination_types() {
    let schema = Schema::from_json_str(DEFINITION).unwrap();
    let cleaner = Cleaner::new(&schema);

    // The raw column name is not float-typed; the mapped destination
    // "property_id" is, and coercion must follow it.
    let row: Row = [("Property Id", "234,235,423")].into_iter().collect();
    let record: GenericRecord = apply_row(
        &row,
        &mapping(),
        || GenericRecord::with_fields(["property_id"]),
        Some(&cleaner),
        None,
    )
    .unwrap();
    assert_eq!(record.get("property_id"), Some(&CellValue::Float(234_235_423.0)));
}

#[test]
fn placeholder_text_cleans_to_null_without_a_cleaner() {
    let row: Row = [("heading1", "Not Available")].into_iter().collect();
    let record: GenericRecord = apply_row(
        &row,
        &mapping(),
        || GenericRecord::with_fields(["heading_1"]),
        None,
        None,
    )
    .unwrap();
    assert_eq!(record.get("heading_1"), Some(&CellValue::Null));
}

#[test]
fn initial_data_seeds_before_row_columns() {
    let mut initial = BTreeMap::new();
    initial.insert("heading_1".to_string(), CellValue::from("seeded"));
    initial.insert("source_note".to_string(), CellValue::from("import batch 7"));

    let row: Row = [("heading1", "value1"), ("heading3", "value3")].into_iter().collect();
    let record: GenericRecord = apply_row(
        &row,
        &mapping(),
        || GenericRecord::with_fields(["heading_1"]),
        None,
        Some(&initial),
    )
    .unwrap();

    // The row's mapped column overrides the seed through the normal path.
    assert_eq!(record.get("heading_1"), Some(&CellValue::Text("value1".to_string())));
    // Unexposed initial keys fold into the side-bag alongside unmapped columns.
    assert_eq!(
        record.extra.get("source_note"),
        Some(&CellValue::Text("import batch 7".to_string()))
    );
    assert_eq!(
        record.extra.get("heading3"),
        Some(&CellValue::Text("value3".to_string()))
    );
}

#[test]
fn mapped_but_unexposed_fields_fall_back_to_the_side_bag() {
    let row: Row = [("heading1", "value1")].into_iter().collect();
    let record: GenericRecord = apply_row(
        &row,
        &mapping(),
        || GenericRecord::with_fields(["something_else"]),
        None,
        None,
    )
    .unwrap();
    assert_eq!(
        record.extra.get("heading1"),
        Some(&CellValue::Text("value1".to_string()))
    );
}

#[test]
fn merge_row_requires_identity_columns() {
    let key = NaturalKey::new(["Property Id", "Year Ending"]);
    let resolver = NaturalKeyResolver::new(key, None, |_criteria| None::<GenericRecord>);

    let row: Row = [("heading1", "value1")].into_iter().collect();
    let result = merge_row(
        &row,
        &mapping(),
        &resolver,
        GenericRecord::default,
        None,
        None,
    );
    match result {
        Err(MergeError::Identity(MappingError::MissingIdentity(column))) => {
            assert_eq!(column, "Property Id");
        }
        other => panic!("expected missing identity, got {other:?}"),
    }
}

#[test]
fn merge_row_reuses_the_resolved_record() {
    let key = NaturalKey::new(["Property Id"]);
    let resolver = NaturalKeyResolver::new(key, None, |criteria| {
        // Pretend the store already has this record, pre-seeded.
        assert!(criteria.contains_key("Property Id"));
        let mut existing = GenericRecord::with_fields(["property_id", "heading_1"]);
        existing.try_set("heading_1", CellValue::from("from the store"));
        Some(existing)
    });

    let row: Row = [("Property Id", "234235423")].into_iter().collect();
    let record = merge_row(
        &row,
        &mapping(),
        &resolver,
        GenericRecord::default,
        None,
        None,
    )
    .unwrap();

    assert_eq!(
        record.get("heading_1"),
        Some(&CellValue::Text("from the store".to_string()))
    );
    assert_eq!(
        record.get("property_id"),
        Some(&CellValue::Text("234235423".to_string()))
    );
}
