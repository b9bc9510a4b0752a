use std::io::Write;

use mcm_ingest::{CsvRowSource, RowSource, load_schema};
use mcm_model::{CellValue, FieldType};

const SAMPLE: &str = "\u{feff}Property Id,Name,Gross Floor Area (ft\u{b2}),Year Ending\n\
234235423,Building One,\"50,000\",2013/03/13\n\
234235424,,1200,\n";

#[test]
fn exposes_cleaned_columns_before_rows() {
    let source = CsvRowSource::new(SAMPLE.as_bytes()).unwrap();
    assert_eq!(
        source.columns(),
        &[
            "Property Id".to_string(),
            "Name".to_string(),
            "Gross Floor Area (ft2)".to_string(),
            "Year Ending".to_string(),
        ]
    );
}

#[test]
fn yields_rows_in_file_order() {
    let mut source = CsvRowSource::new(SAMPLE.as_bytes()).unwrap();
    let rows = source.read_all().unwrap();
    assert_eq!(rows.len(), 2);

    let first = &rows[0];
    let columns: Vec<&str> = first.columns().collect();
    assert_eq!(
        columns,
        vec!["Property Id", "Name", "Gross Floor Area (ft2)", "Year Ending"]
    );
    assert_eq!(
        first.get("Property Id"),
        Some(&CellValue::Text("234235423".to_string()))
    );
    assert_eq!(
        first.get("Gross Floor Area (ft2)"),
        Some(&CellValue::Text("50,000".to_string()))
    );

    // Empty cells come through as nulls, not empty text.
    let second = &rows[1];
    assert_eq!(second.get("Name"), Some(&CellValue::Null));
    assert_eq!(second.get("Year Ending"), Some(&CellValue::Null));
}

#[test]
fn short_records_pad_with_nulls() {
    let data = "a,b,c\n1,2\n";
    let mut source = CsvRowSource::new(data.as_bytes()).unwrap();
    let rows = source.read_all().unwrap();
    assert_eq!(rows[0].get("c"), Some(&CellValue::Null));
}

#[test]
fn loads_schema_definition_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ontology.json");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(
            br#"{"fields": {"property_id": "float", "facility_type": {"type": "enum", "values": ["Commercial"]}}}"#,
        )
        .unwrap();

    let schema = load_schema(&path).unwrap();
    assert_eq!(schema.field_type("property_id"), Some(FieldType::Float));
    assert_eq!(
        schema.enum_choices("facility_type").unwrap(),
        &["Commercial".to_string()]
    );

    assert!(load_schema(&dir.path().join("missing.json")).is_err());
}
