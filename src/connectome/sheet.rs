use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Range, Reader, open_workbook_auto};

static EMPTY_CELL: Cell = Cell::Empty;

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    Other(String),
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Self::Empty,
            Data::Int(value) => Self::Number(*value as f64),
            Data::Float(value) => Self::Number(*value),
            Data::String(value) => Self::Text(value.clone()),
            Data::Bool(value) => Self::Bool(*value),
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RawTable {
    pub header: Vec<Cell>,
    pub rows: Vec<Vec<Cell>>,
    width: usize,
}

impl RawTable {
    pub fn from_range(range: &Range<Data>) -> Self {
        let Some((end_row, end_col)) = range.end() else {
            return Self::default();
        };

        let mut grid = (0..=end_row).map(|row| {
            (0..=end_col)
                .map(|col| range.get_value((row, col)).map(Cell::from).unwrap_or(Cell::Empty))
                .collect::<Vec<_>>()
        });

        let header = grid.next().unwrap_or_default();
        let rows = grid.collect();

        Self {
            header,
            rows,
            width: end_col as usize + 1,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&EMPTY_CELL)
    }
}

pub fn load_sheet(path: &Path, sheet_name: &str) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|name| name == sheet_name) {
        return Err(anyhow!(
            "sheet {sheet_name:?} not found in {} (available: {})",
            path.display(),
            sheet_names.join(", ")
        ));
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("failed to read sheet {sheet_name:?} from {}", path.display()))?;

    let table = RawTable::from_range(&range);
    log::info!(
        "loaded sheet {sheet_name:?} from {}: {} body rows x {} columns",
        path.display(),
        table.height(),
        table.width()
    );

    Ok(table)
}
