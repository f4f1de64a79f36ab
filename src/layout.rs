use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::connectome::ConnectomeGraph;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_ITERATIONS: usize = 50;

const MIN_DISTANCE: f64 = 0.01;

#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    pub seed: u64,
    pub iterations: usize,
    pub threshold: f64,
    pub scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            iterations: DEFAULT_ITERATIONS,
            threshold: 1e-4,
            scale: 1.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    positions: Vec<Vector3<f64>>,
}

impl Layout {
    pub fn position(&self, node: usize) -> Option<Vector3<f64>> {
        self.positions.get(node).copied()
    }

    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }
}

pub fn spring_layout(graph: &ConnectomeGraph, config: &LayoutConfig) -> Layout {
    let n = graph.node_count();
    if n == 0 {
        return Layout::default();
    }
    if n == 1 {
        return Layout {
            positions: vec![Vector3::zeros()],
        };
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut positions = (0..n)
        .map(|_| {
            Vector3::new(
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
                rng.gen_range(0.0..1.0),
            )
        })
        .collect::<Vec<_>>();

    let mut attraction = vec![0.0; n * n];
    for edge in graph.edges() {
        attraction[edge.source * n + edge.target] = edge.weight;
    }

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = planar_span(&positions) * 0.1;
    let cooling = temperature / (config.iterations as f64 + 1.0);
    let mut displacement = vec![Vector3::zeros(); n];

    for iteration in 0..config.iterations {
        displacement.fill(Vector3::zeros());

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }

                let delta = positions[i] - positions[j];
                let distance = delta.norm().max(MIN_DISTANCE);
                let pull = attraction[i * n + j] * distance / k;
                displacement[i] += delta * ((k * k) / (distance * distance) - pull);
            }
        }

        let mut movement_sq = 0.0;
        for (position, shift) in positions.iter_mut().zip(&displacement) {
            let length = shift.norm().max(MIN_DISTANCE);
            let step = *shift * (temperature / length);
            movement_sq += step.norm_squared();
            *position += step;
        }

        temperature -= cooling;
        if movement_sq.sqrt() / (n as f64) < config.threshold {
            log::debug!("spring layout converged after {} iterations", iteration + 1);
            break;
        }
    }

    rescale(&mut positions, config.scale);
    Layout { positions }
}

fn planar_span(positions: &[Vector3<f64>]) -> f64 {
    (0..2)
        .map(|axis| {
            let (min, max) = positions
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), position| {
                    (min.min(position[axis]), max.max(position[axis]))
                });
            max - min
        })
        .fold(0.0, f64::max)
}

fn rescale(positions: &mut [Vector3<f64>], scale: f64) {
    if positions.is_empty() {
        return;
    }

    let mean = positions
        .iter()
        .fold(Vector3::zeros(), |sum, position| sum + position)
        / positions.len() as f64;

    let mut limit = 0.0_f64;
    for position in positions.iter_mut() {
        *position -= mean;
        limit = position.iter().fold(limit, |limit, value| limit.max(value.abs()));
    }

    if limit > 0.0 {
        let factor = scale / limit;
        for position in positions.iter_mut() {
            *position *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectome::AdjacencyMatrix;

    fn graph(names: &[&str], values: Vec<f64>) -> ConnectomeGraph {
        let labels = names.iter().map(|name| (*name).to_owned()).collect::<Vec<_>>();
        let matrix = AdjacencyMatrix::new(labels.clone(), labels, values).unwrap();
        ConnectomeGraph::from_adjacency(&matrix)
    }

    fn ring(size: usize) -> ConnectomeGraph {
        let names = (0..size).map(|index| format!("n{index}")).collect::<Vec<_>>();
        let names = names.iter().map(String::as_str).collect::<Vec<_>>();
        let mut values = vec![0.0; size * size];
        for index in 0..size {
            values[index * size + (index + 1) % size] = 1.0;
        }
        graph(&names, values)
    }

    #[test]
    fn starting_temperature_ignores_depth_axis() {
        let positions = [
            Vector3::new(0.1, 0.2, 0.0),
            Vector3::new(0.4, 0.3, 0.9),
            Vector3::new(0.3, 0.5, 0.05),
        ];

        assert!((planar_span(&positions) - 0.3).abs() < 1e-12);
        assert_eq!(planar_span(&[Vector3::new(0.5, 0.5, 0.5)]), 0.0);
    }

    #[test]
    fn same_seed_gives_identical_coordinates() {
        let graph = ring(12);
        let config = LayoutConfig::default();

        let first = spring_layout(&graph, &config);
        let second = spring_layout(&graph, &config);

        assert_eq!(first, second);
    }

    #[test]
    fn different_seed_moves_nodes() {
        let graph = ring(12);

        let first = spring_layout(&graph, &LayoutConfig::default());
        let second = spring_layout(
            &graph,
            &LayoutConfig {
                seed: 7,
                ..LayoutConfig::default()
            },
        );

        assert_ne!(first, second);
    }

    #[test]
    fn layout_is_centred_and_scaled() {
        let graph = ring(9);

        let layout = spring_layout(&graph, &LayoutConfig::default());

        assert_eq!(layout.positions().len(), 9);
        let limit = layout
            .positions()
            .iter()
            .flat_map(|position| position.iter().copied())
            .fold(0.0_f64, |limit, value| limit.max(value.abs()));
        assert!((limit - 1.0).abs() < 1e-9);

        let mean = layout
            .positions()
            .iter()
            .fold(Vector3::zeros(), |sum, position| sum + position)
            / 9.0;
        assert!(mean.norm() < 1e-9);
        assert!(layout.positions().iter().all(|position| position.iter().all(|value| value.is_finite())));
    }

    #[test]
    fn edgeless_graph_still_gets_positions() {
        let graph = graph(&["a", "b", "c"], vec![0.0; 9]);

        let layout = spring_layout(&graph, &LayoutConfig::default());

        assert_eq!(layout.positions().len(), 3);
        assert!(layout.position(2).is_some());
        assert!(layout.position(3).is_none());
    }

    #[test]
    fn trivial_graphs() {
        let empty = ConnectomeGraph::default();
        let single = graph(&["a"], vec![0.0]);

        assert!(spring_layout(&empty, &LayoutConfig::default()).positions().is_empty());
        assert_eq!(
            spring_layout(&single, &LayoutConfig::default()).position(0),
            Some(Vector3::zeros())
        );
    }

    #[test]
    fn zero_iterations_keeps_scaled_seed_positions() {
        let graph = ring(4);
        let config = LayoutConfig {
            iterations: 0,
            ..LayoutConfig::default()
        };

        let layout = spring_layout(&graph, &config);

        assert_eq!(layout.positions().len(), 4);
        assert_eq!(layout, spring_layout(&graph, &config));
    }
}
