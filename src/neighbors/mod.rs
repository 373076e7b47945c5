//! Neighbor graph construction.
//!
//! Turns a reference point set into a sparse adjacency graph, either through
//! the free functions [`kneighbors_graph`] / [`radius_neighbors_graph`] or
//! through the fit/transform estimators [`KNeighborsTransformer`] and
//! [`RadiusNeighborsTransformer`].
//!
//! When the fit set is queried against itself, [`resolve_include_self`]
//! decides whether each point is its own neighbor: by default yes for
//! `connectivity` graphs and no for `distance` graphs.

pub mod config;
pub mod graph;
pub mod index;
pub mod metric;
pub mod transformer;

pub use config::{resolve_n_jobs, NeighborsConfig, NeighborsConfigBuilder};
pub use graph::{
    kneighbors_graph, radius_neighbors_graph, resolve_include_self, AdjacencyGraph, GraphSource,
};
pub use index::BruteForceIndex;
pub use metric::distance;
pub use transformer::{KNeighborsTransformer, RadiusNeighborsTransformer};
