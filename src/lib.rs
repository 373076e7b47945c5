//! # featurekit
//!
//! Feature discretization and nearest-neighbor graph construction for
//! `ndarray` data, in pure Rust.
//!
//! ## Features
//!
//! - **Binning**: [`KBinsDiscretizer`] bins continuous features with
//!   `uniform`, `quantile` or `kmeans` edges and returns ordinal bin indices
//!   or a one-hot encoding (dense `ndarray` or sparse `sprs` CSR).
//! - **Neighbor graphs**: [`kneighbors_graph`] and [`radius_neighbors_graph`]
//!   build sparse adjacency graphs, nearest neighbor first in every row, with
//!   `connectivity` or `distance` weights.
//! - **Parallel search**: the brute-force index spreads query rows over a
//!   Rayon thread pool sized by `n_jobs`.
//! - **Configuration**: every estimator is driven by a serde config that can
//!   be loaded from TOML or JSON files.
//!
//! ## Quick Start
//!
//! ### Discretizing features
//!
//! ```rust
//! use featurekit::{BinStrategy, Encoding, KBinsConfig, KBinsDiscretizer};
//! use ndarray::array;
//!
//! # fn main() -> featurekit::Result<()> {
//! let x = array![
//!     [-2.0, 1.0, -4.0, -1.0],
//!     [-1.0, 2.0, -3.0, -0.5],
//!     [0.0, 3.0, -2.0, 0.5],
//!     [1.0, 4.0, -1.0, 2.0],
//! ];
//!
//! let config = KBinsConfig::builder()
//!     .n_bins(3)
//!     .strategy(BinStrategy::Uniform)
//!     .encode(Encoding::Ordinal)
//!     .build()?;
//! let mut est = KBinsDiscretizer::new(config)?;
//! let xt = est.fit_transform(&x.view())?;
//!
//! assert_eq!(
//!     xt.to_dense(),
//!     array![
//!         [0.0, 0.0, 0.0, 0.0],
//!         [1.0, 1.0, 1.0, 0.0],
//!         [2.0, 2.0, 2.0, 1.0],
//!         [2.0, 2.0, 2.0, 2.0],
//!     ]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ### Building a neighbor graph
//!
//! ```rust
//! use featurekit::{radius_neighbors_graph, NeighborsConfig};
//! use ndarray::array;
//!
//! # fn main() -> featurekit::Result<()> {
//! let x = array![[0.0], [3.0], [1.0]];
//! let config = NeighborsConfig::builder()
//!     .radius(1.5)
//!     .include_self(true)
//!     .build()?;
//! let graph = radius_neighbors_graph(x.view().into(), &config)?;
//!
//! assert_eq!(
//!     graph.to_dense(),
//!     array![[1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 1.0]]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Types, constants, error handling, input checks and the
//!   collaborator traits
//! - [`config`]: TOML/JSON loading and saving of estimator configurations
//! - [`binning`]: The discretizer and its quantile, k-means and one-hot
//!   collaborators
//! - [`neighbors`]: Distance metrics, the brute-force index, graph builders
//!   and graph transformers

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration file support
pub mod config;

// Feature discretization
pub mod binning;

// Neighbor graphs
pub mod neighbors;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{FeatureKitError, Result},
    traits::*,
    types::*,
};

pub use config::{ConfigFile, ConfigFormat};

pub use binning::{
    BinWidth, BinnedOutput, BinningWarning, FittedBinning, KBinsConfig, KBinsConfigBuilder,
    KBinsDiscretizer, KMeans1D, NBins, OneHotEncoder, PercentileEstimator,
};

pub use neighbors::{
    kneighbors_graph, radius_neighbors_graph, resolve_include_self, AdjacencyGraph,
    BruteForceIndex, GraphSource, KNeighborsTransformer, NeighborsConfig, NeighborsConfigBuilder,
    RadiusNeighborsTransformer,
};

// Version information
pub use crate::core::constants::FEATUREKIT_VERSION as VERSION;

/// Initialize the library.
///
/// Installs an `env_logger` logger (unless the host already installed one)
/// so that fit warnings such as constant features are visible. Calling it
/// is optional and repeated calls are no-ops.
///
/// # Examples
///
/// ```rust
/// fn main() -> featurekit::Result<()> {
///     featurekit::init()?;
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    crate::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    crate::core::is_core_initialized()
}
