use tabdelta_core::model::{CellValue, Dataset, KeySpec, Row};

/// Build a dataset from column names and positional records.
///
/// Each record must have exactly one value per column.
#[allow(dead_code)]
pub fn table(columns: &[&str], records: Vec<Vec<CellValue>>) -> Dataset {
    let rows = records
        .into_iter()
        .map(|record| {
            assert_eq!(record.len(), columns.len(), "record width mismatch");
            columns
                .iter()
                .copied()
                .zip(record)
                .collect::<Row>()
        })
        .collect();
    Dataset::new(columns.iter().copied(), rows).unwrap()
}

/// `id`/`name` dataset with numeric ids
#[allow(dead_code)]
pub fn people(rows: &[(i64, &str)]) -> Dataset {
    table(
        &["id", "name"],
        rows.iter()
            .map(|(id, name)| vec![CellValue::from(*id), CellValue::text(*name)])
            .collect(),
    )
}

#[allow(dead_code)]
pub fn id_key() -> KeySpec {
    KeySpec::single("id")
}

#[allow(dead_code)]
pub fn text(s: &str) -> CellValue {
    CellValue::text(s)
}

#[allow(dead_code)]
pub fn num(n: f64) -> CellValue {
    CellValue::number(n)
}

#[allow(dead_code)]
pub fn missing() -> CellValue {
    CellValue::Missing
}
