use nalgebra::Vector3;

use connectome_view::connectome::ConnectomeGraph;
use connectome_view::layout::Layout;

pub const SCENE_TITLE: &str = "3D Visualization of C. elegans Male Connectome";
pub const AXIS_TITLES: [&str; 3] = ["X Axis", "Y Axis", "Z Axis"];

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub node: usize,
    pub position: Vector3<f64>,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSegment {
    pub edge: usize,
    pub weight: f64,
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
}

#[derive(Clone, Debug)]
pub struct Scene {
    pub title: String,
    pub axis_titles: [String; 3],
    pub markers: Vec<Marker>,
    pub segments: Vec<EdgeSegment>,
}

impl Scene {
    pub fn build(graph: &ConnectomeGraph, layout: &Layout) -> Self {
        let markers = graph
            .nodes()
            .iter()
            .enumerate()
            .filter_map(|(node, name)| {
                Some(Marker {
                    node,
                    position: layout.position(node)?,
                    label: name.clone(),
                })
            })
            .collect::<Vec<_>>();

        let segments = graph
            .edges()
            .iter()
            .enumerate()
            .filter_map(|(edge, connection)| {
                Some(EdgeSegment {
                    edge,
                    weight: connection.weight,
                    start: layout.position(connection.source)?,
                    end: layout.position(connection.target)?,
                })
            })
            .collect::<Vec<_>>();

        log::debug!(
            "scene holds {} markers and {} edge segments",
            markers.len(),
            segments.len()
        );

        Self {
            title: SCENE_TITLE.to_owned(),
            axis_titles: AXIS_TITLES.map(str::to_owned),
            markers,
            segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use connectome_view::connectome::AdjacencyMatrix;
    use connectome_view::layout::{LayoutConfig, spring_layout};

    fn build_scene(names: &[&str], values: Vec<f64>) -> (ConnectomeGraph, Layout, Scene) {
        let labels = names.iter().map(|name| (*name).to_owned()).collect::<Vec<_>>();
        let matrix = AdjacencyMatrix::new(labels.clone(), labels, values).unwrap();
        let graph = ConnectomeGraph::from_adjacency(&matrix);
        let layout = spring_layout(&graph, &LayoutConfig::default());
        let scene = Scene::build(&graph, &layout);
        (graph, layout, scene)
    }

    #[test]
    fn segments_join_edge_endpoints() {
        let (_graph, layout, scene) = build_scene(&["n1", "n2"], vec![0.0, 1.0, 0.0, 0.0]);

        assert_eq!(scene.markers.len(), 2);
        assert_eq!(scene.segments.len(), 1);
        let segment = scene.segments[0];
        assert_eq!(segment.start, layout.position(0).unwrap());
        assert_eq!(segment.end, layout.position(1).unwrap());
        assert_eq!(segment.weight, 1.0);
    }

    #[test]
    fn markers_are_labelled_with_neuron_names() {
        let (graph, layout, scene) = build_scene(&["AVAL", "AVAR", "PVCL"], vec![0.0; 9]);

        for marker in &scene.markers {
            assert_eq!(Some(marker.label.as_str()), graph.node_name(marker.node));
            assert_eq!(Some(marker.position), layout.position(marker.node));
        }
    }

    #[test]
    fn edgeless_graph_still_has_markers() {
        let (_graph, _layout, scene) = build_scene(&["a", "b", "c"], vec![0.0; 9]);

        assert_eq!(scene.markers.len(), 3);
        assert!(scene.segments.is_empty());
    }

    #[test]
    fn titles_are_fixed() {
        let (_graph, _layout, scene) = build_scene(&["a"], vec![0.0]);

        assert_eq!(scene.title, SCENE_TITLE);
        assert_eq!(scene.axis_titles, ["X Axis", "Y Axis", "Z Axis"]);
    }
}
