use std::collections::HashMap;
use std::collections::hash_map::Entry;

use super::matrix::AdjacencyMatrix;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

#[derive(Clone, Debug, Default)]
pub struct ConnectomeGraph {
    nodes: Vec<String>,
    index_by_name: HashMap<String, usize>,
    edges: Vec<Edge>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl ConnectomeGraph {
    pub fn from_adjacency(matrix: &AdjacencyMatrix) -> Self {
        let mut graph = Self::default();

        let sources = matrix
            .row_labels()
            .iter()
            .map(|label| graph.insert_node(label))
            .collect::<Vec<_>>();
        let targets = matrix
            .column_labels()
            .iter()
            .map(|label| graph.insert_node(label))
            .collect::<Vec<_>>();

        let mut edge_by_pair: HashMap<(usize, usize), usize> = HashMap::new();
        for (row, &source) in sources.iter().enumerate() {
            for (col, &target) in targets.iter().enumerate() {
                let weight = matrix.get(row, col);
                if weight == 0.0 {
                    continue;
                }

                match edge_by_pair.entry((source, target)) {
                    Entry::Occupied(entry) => graph.edges[*entry.get()].weight = weight,
                    Entry::Vacant(entry) => {
                        entry.insert(graph.edges.len());
                        graph.edges.push(Edge {
                            source,
                            target,
                            weight,
                        });
                    }
                }
            }
        }

        graph.outgoing = vec![Vec::new(); graph.nodes.len()];
        graph.incoming = vec![Vec::new(); graph.nodes.len()];
        for (index, edge) in graph.edges.iter().enumerate() {
            graph.outgoing[edge.source].push(index);
            graph.incoming[edge.target].push(index);
        }

        log::info!(
            "built connectome graph: {} neurons, {} directed connections",
            graph.node_count(),
            graph.edge_count()
        );

        graph
    }

    fn insert_node(&mut self, name: &str) -> usize {
        if let Some(&index) = self.index_by_name.get(name) {
            return index;
        }

        let index = self.nodes.len();
        self.nodes.push(name.to_owned());
        self.index_by_name.insert(name.to_owned(), index);
        index
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_name(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }

    pub fn edge_weight(&self, source: &str, target: &str) -> Option<f64> {
        let source = self.index_of(source)?;
        let target = self.index_of(target)?;
        self.outgoing(source)
            .find(|(_, edge)| edge.target == target)
            .map(|(_, edge)| edge.weight)
    }

    pub fn outgoing(&self, node: usize) -> impl Iterator<Item = (usize, &Edge)> {
        self.edge_refs(self.outgoing.get(node))
    }

    pub fn incoming(&self, node: usize) -> impl Iterator<Item = (usize, &Edge)> {
        self.edge_refs(self.incoming.get(node))
    }

    fn edge_refs<'a>(
        &'a self,
        indices: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = (usize, &'a Edge)> {
        indices
            .into_iter()
            .flatten()
            .map(move |&index| (index, &self.edges[index]))
    }

    pub fn max_abs_weight(&self) -> f64 {
        self.edges
            .iter()
            .map(|edge| edge.weight.abs())
            .fold(0.0, f64::max)
    }
}
