use anyhow::{Result, bail};

use super::matrix::AdjacencyMatrix;
use super::sheet::{Cell, RawTable};

const LABEL_ROW: usize = 1;
const LABEL_COLUMN: usize = 2;
const FIRST_DATA_ROW: usize = 1;
const FIRST_DATA_COLUMN: usize = 3;

pub fn clean_adjacency(table: &RawTable) -> Result<AdjacencyMatrix> {
    if table.height() <= LABEL_ROW {
        bail!(
            "adjacency sheet has {} body rows; the column labels are expected in body row {}",
            table.height(),
            LABEL_ROW + 1
        );
    }
    if table.width() <= LABEL_COLUMN {
        bail!(
            "adjacency sheet has {} columns; the row labels are expected in column {}",
            table.width(),
            LABEL_COLUMN + 1
        );
    }

    let row_labels = (FIRST_DATA_ROW..table.height())
        .map(|row| cell_label(table.cell(row, LABEL_COLUMN)))
        .collect::<Vec<_>>();
    let column_labels = (FIRST_DATA_COLUMN..table.width())
        .map(|col| cell_label(table.cell(LABEL_ROW, col)))
        .collect::<Vec<_>>();

    let mut coerced = 0usize;
    let mut values = Vec::with_capacity(row_labels.len() * column_labels.len());
    for row in FIRST_DATA_ROW..table.height() {
        for col in FIRST_DATA_COLUMN..table.width() {
            let cell = table.cell(row, col);
            match parse_cell(cell) {
                Some(value) => values.push(value),
                None => {
                    if *cell != Cell::Empty {
                        coerced += 1;
                    }
                    values.push(0.0);
                }
            }
        }
    }

    let matrix = AdjacencyMatrix::new(row_labels, column_labels, values)?;
    log::debug!(
        "cleaned adjacency matrix {} x {}; {coerced} non-numeric cells read as 0",
        matrix.rows(),
        matrix.cols()
    );
    if !matrix.labels_aligned() {
        log::warn!("row and column labels differ; some neurons will only appear as sources or targets");
    }

    Ok(matrix)
}

fn parse_cell(cell: &Cell) -> Option<f64> {
    let value = match cell {
        Cell::Number(value) => *value,
        Cell::Text(text) => text.trim().parse::<f64>().ok()?,
        Cell::Bool(flag) => f64::from(u8::from(*flag)),
        Cell::Empty | Cell::Other(_) => return None,
    };
    value.is_finite().then_some(value)
}

fn cell_label(cell: &Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::Number(value) => value.to_string(),
        Cell::Text(text) | Cell::Other(text) => text.clone(),
        Cell::Bool(flag) => flag.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use calamine::{Data, Range};

    use super::*;
    use crate::connectome::sheet::load_sheet;

    fn text(value: &str) -> Data {
        Data::String(value.to_owned())
    }

    fn sample_table() -> RawTable {
        let mut range = Range::new((0, 0), (4, 4));
        range.set_value((0, 0), text("male chemical"));
        range.set_value((1, 3), text("sensory"));
        range.set_value((2, 3), text("ADAL"));
        range.set_value((2, 4), text("ADAR"));
        range.set_value((3, 0), text("sensory"));
        range.set_value((3, 2), text("ADAL"));
        range.set_value((3, 4), Data::Int(7));
        range.set_value((4, 2), text("ADAR"));
        range.set_value((4, 3), Data::Float(2.0));
        range.set_value((4, 4), text("n/a"));
        RawTable::from_range(&range)
    }

    #[test]
    fn cleans_sheet_loaded_from_workbook() {
        let workbook = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("fixtures/male_connectome_mini.xlsx");
        let table = load_sheet(&workbook, "male chemical").unwrap();

        let matrix = clean_adjacency(&table).unwrap();

        assert_eq!(matrix.row_labels(), &["", "ADAL", "ADAR"]);
        assert_eq!(matrix.column_labels(), &["ADAL", "ADAR"]);
        assert_eq!(matrix.values(), &[0.0, 0.0, 0.0, 7.0, 2.0, 0.0]);
    }

    #[test]
    fn labels_follow_fixed_offsets() {
        let matrix = clean_adjacency(&sample_table()).unwrap();

        assert_eq!(matrix.row_labels(), &["", "ADAL", "ADAR"]);
        assert_eq!(matrix.column_labels(), &["ADAL", "ADAR"]);
        assert_eq!(matrix.value("ADAL", "ADAR"), Some(7.0));
        assert_eq!(matrix.value("ADAR", "ADAL"), Some(2.0));
    }

    #[test]
    fn label_row_reads_as_zero_weights() {
        let matrix = clean_adjacency(&sample_table()).unwrap();

        assert_eq!(matrix.get(0, 0), 0.0);
        assert_eq!(matrix.get(0, 1), 0.0);
    }

    #[test]
    fn malformed_cells_become_zero() {
        let matrix = clean_adjacency(&sample_table()).unwrap();

        assert_eq!(matrix.value("ADAR", "ADAR"), Some(0.0));
    }

    #[test]
    fn every_cleaned_cell_is_finite() {
        let mut range = Range::new((0, 0), (3, 5));
        range.set_value((2, 3), text("NaN"));
        range.set_value((2, 4), text("inf"));
        range.set_value((2, 5), Data::Float(f64::NAN));
        range.set_value((3, 3), text(" 12 "));
        range.set_value((3, 4), Data::Bool(true));
        range.set_value((3, 5), text("-inf"));

        let matrix = clean_adjacency(&RawTable::from_range(&range)).unwrap();

        assert!(matrix.values().iter().all(|value| value.is_finite()));
        assert_eq!(matrix.get(1, 0), 12.0);
        assert_eq!(matrix.get(1, 1), 1.0);
    }

    #[test]
    fn numeric_labels_use_short_form() {
        assert_eq!(cell_label(&Cell::Number(3.0)), "3");
        assert_eq!(cell_label(&Cell::Number(2.5)), "2.5");
        assert_eq!(cell_label(&Cell::Empty), "");
    }

    #[test]
    fn parse_covers_every_cell_kind() {
        assert_eq!(parse_cell(&Cell::Number(4.0)), Some(4.0));
        assert_eq!(parse_cell(&Cell::Text("1e2".to_owned())), Some(100.0));
        assert_eq!(parse_cell(&Cell::Text("AVAL".to_owned())), None);
        assert_eq!(parse_cell(&Cell::Bool(false)), Some(0.0));
        assert_eq!(parse_cell(&Cell::Other("#REF!".to_owned())), None);
        assert_eq!(parse_cell(&Cell::Empty), None);
    }

    #[test]
    fn table_without_label_row_is_an_error() {
        let range = Range::<Data>::new((0, 0), (1, 5));

        assert!(clean_adjacency(&RawTable::from_range(&range)).is_err());
    }

    #[test]
    fn table_without_label_column_is_an_error() {
        let range = Range::<Data>::new((0, 0), (4, 1));

        assert!(clean_adjacency(&RawTable::from_range(&range)).is_err());
    }
}
