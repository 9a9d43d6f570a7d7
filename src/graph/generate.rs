use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Edge, Graph};
use crate::{Error, Result};

/// Parameters of a random weighted graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub node_count: usize,
    /// Chance that any given pair of nodes is connected, in `[0, 1]`
    pub edge_probability: f64,
    /// Inclusive lower bound on edge weights
    pub min_weight: i64,
    /// Inclusive upper bound on edge weights
    pub max_weight: i64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            node_count: 10,
            edge_probability: 0.3,
            min_weight: 1,
            max_weight: 10,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(Error::InvalidArgument {
                arg: "edge_probability",
                reason: format!("{} is not within [0, 1]", self.edge_probability),
            });
        }
        if self.min_weight > self.max_weight {
            return Err(Error::InvalidArgument {
                arg: "min_weight",
                reason: format!(
                    "{} is greater than max_weight {}",
                    self.min_weight, self.max_weight
                ),
            });
        }
        Ok(())
    }
}

/// Generate a random undirected graph on nodes `0..node_count`.
///
/// Every pair `i < j` is visited in lexicographic order and connected with probability
/// `edge_probability`, with a weight drawn uniformly from `min_weight..=max_weight`. The same
/// seeded `rng` always yields the same graph.
pub fn generate<R: Rng + ?Sized>(config: &GeneratorConfig, rng: &mut R) -> Result<Graph<usize>> {
    config.validate()?;

    let mut graph = Graph::with_nodes(0..config.node_count);
    for i in 0..config.node_count {
        for j in i + 1..config.node_count {
            if rng.gen::<f64>() < config.edge_probability {
                let weight = rng.gen_range(config.min_weight..=config.max_weight);
                graph.push_edge(Edge::new(i, j, weight));
            }
        }
    }

    info!(
        "Generated graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn config(node_count: usize, edge_probability: f64) -> GeneratorConfig {
        GeneratorConfig {
            node_count,
            edge_probability,
            ..Default::default()
        }
    }

    #[test]
    fn creates_every_node_even_without_edges() {
        let graph = generate(&config(5, 0.), &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(graph.nodes(), &[0, 1, 2, 3, 4]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn certain_probability_gives_complete_graph() {
        let graph = generate(&config(6, 1.), &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(graph.edge_count(), 15);
        assert_eq!(graph.connected_components(), 1);
    }

    #[test]
    fn zero_nodes_is_an_empty_graph() {
        let graph = generate(&config(0, 0.5), &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(graph, Graph::new());
    }

    #[test]
    fn rejects_out_of_range_probability() {
        for p in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                generate(&config(3, p), &mut StdRng::seed_from_u64(0)),
                Err(Error::InvalidArgument {
                    arg: "edge_probability",
                    ..
                })
            ));
        }
    }

    #[test]
    fn rejects_inverted_weight_bounds() {
        let config = GeneratorConfig {
            min_weight: 5,
            max_weight: 4,
            ..Default::default()
        };
        assert!(matches!(
            generate(&config, &mut StdRng::seed_from_u64(0)),
            Err(Error::InvalidArgument {
                arg: "min_weight",
                ..
            })
        ));
    }

    #[test]
    fn config_fills_missing_fields_from_defaults() {
        let config: GeneratorConfig = serde_json::from_str(r#"{ "node_count": 20 }"#).unwrap();
        assert_eq!(
            config,
            GeneratorConfig {
                node_count: 20,
                ..Default::default()
            }
        );
    }

    proptest! {
        #[test]
        fn same_seed_same_graph(
            node_count in 0usize..30,
            edge_probability in 0.0..=1.0f64,
            min_weight in -50i64..50,
            spread in 0i64..50,
            seed in any::<u64>(),
        ) {
            let config = GeneratorConfig {
                node_count,
                edge_probability,
                min_weight,
                max_weight: min_weight + spread,
            };
            let first = generate(&config, &mut StdRng::seed_from_u64(seed)).unwrap();
            let second = generate(&config, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(&first, &second);
            for edge in first.edges() {
                prop_assert!(edge.a < edge.b && edge.b < node_count);
                prop_assert!((config.min_weight..=config.max_weight).contains(&edge.weight));
            }
        }
    }
}
