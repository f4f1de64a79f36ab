use std::collections::HashSet;

use connectome_view::connectome::ConnectomeGraph;

use super::HighlightState;

pub(super) fn build_highlight_state(graph: &ConnectomeGraph, selected: usize) -> Option<HighlightState> {
    if selected >= graph.node_count() {
        return None;
    }

    let mut related_nodes = HashSet::from([selected]);
    let mut related_edges = HashSet::new();

    for (index, edge) in graph.outgoing(selected).chain(graph.incoming(selected)) {
        related_nodes.insert(edge.source);
        related_nodes.insert(edge.target);
        related_edges.insert(index);
    }

    Some(HighlightState {
        related_nodes,
        related_edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectome_view::connectome::AdjacencyMatrix;

    fn graph() -> ConnectomeGraph {
        // a -> b, c -> a, b -> c, d isolated
        let labels = ["a", "b", "c", "d"].map(str::to_owned).to_vec();
        let mut values = vec![0.0; 16];
        values[1] = 1.0;
        values[2 * 4] = 2.0;
        values[4 + 2] = 3.0;
        let matrix = AdjacencyMatrix::new(labels.clone(), labels, values).unwrap();
        ConnectomeGraph::from_adjacency(&matrix)
    }

    #[test]
    fn selection_reaches_direct_partners_only() {
        let graph = graph();
        let a = graph.index_of("a").unwrap();

        let state = build_highlight_state(&graph, a).unwrap();

        let names = state
            .related_nodes
            .iter()
            .map(|&index| graph.node_name(index).unwrap())
            .collect::<HashSet<_>>();
        assert_eq!(names, HashSet::from(["a", "b", "c"]));
        assert_eq!(state.related_edges.len(), 2);
        for &edge in &state.related_edges {
            let edge = graph.edges()[edge];
            assert!(edge.source == a || edge.target == a);
        }
    }

    #[test]
    fn isolated_selection_highlights_itself() {
        let graph = graph();
        let d = graph.index_of("d").unwrap();

        let state = build_highlight_state(&graph, d).unwrap();

        assert_eq!(state.related_nodes, HashSet::from([d]));
        assert!(state.related_edges.is_empty());
    }

    #[test]
    fn unknown_selection_has_no_highlight() {
        assert!(build_highlight_state(&graph(), 99).is_none());
    }
}
