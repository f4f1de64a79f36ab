use std::collections::{HashMap, HashSet};

use anyhow::{Result, bail};

#[derive(Clone, Debug)]
pub struct AdjacencyMatrix {
    row_labels: Vec<String>,
    column_labels: Vec<String>,
    values: Vec<f64>,
    row_index: HashMap<String, usize>,
    column_index: HashMap<String, usize>,
}

impl AdjacencyMatrix {
    pub fn new(row_labels: Vec<String>, column_labels: Vec<String>, values: Vec<f64>) -> Result<Self> {
        let expected = row_labels.len() * column_labels.len();
        if values.len() != expected {
            bail!(
                "adjacency matrix of {} x {} needs {expected} values, got {}",
                row_labels.len(),
                column_labels.len(),
                values.len()
            );
        }

        let values = values
            .into_iter()
            .map(|value| if value.is_finite() { value } else { 0.0 })
            .collect();

        Ok(Self {
            row_index: first_positions(&row_labels),
            column_index: first_positions(&column_labels),
            row_labels,
            column_labels,
            values,
        })
    }

    pub fn rows(&self) -> usize {
        self.row_labels.len()
    }

    pub fn cols(&self) -> usize {
        self.column_labels.len()
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.rows() || col >= self.cols() {
            return 0.0;
        }
        self.values[row * self.cols() + col]
    }

    pub fn value(&self, row_label: &str, column_label: &str) -> Option<f64> {
        let row = *self.row_index.get(row_label)?;
        let col = *self.column_index.get(column_label)?;
        Some(self.get(row, col))
    }

    pub fn labels_aligned(&self) -> bool {
        let rows = self.row_labels.iter().collect::<HashSet<_>>();
        let cols = self.column_labels.iter().collect::<HashSet<_>>();
        rows == cols
    }
}

fn first_positions(labels: &[String]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(labels.len());
    for (position, label) in labels.iter().enumerate() {
        index.entry(label.clone()).or_insert(position);
    }
    index
}
