//! Sparse neighbor graphs.
//!
//! A graph row lists the neighbors of one query point, nearest first. The
//! builders here take either raw points (an index is built with the
//! request's metric) or an existing [`NeighborIndex`], whose metric
//! configuration must agree with the request.

use crate::core::error::Result;
use crate::core::traits::{NeighborIndex, Neighborhood};
use crate::core::types::*;
use crate::neighbors::config::{validate_n_neighbors, validate_radius, NeighborsConfig};
use crate::neighbors::index::BruteForceIndex;
use ndarray::{Array2, ArrayView2};
use sprs::{CsMat, TriMat};

/// CSR adjacency matrix whose rows keep nearest-first order.
///
/// Row `i`, column `j` holds 1 (connectivity) or the measured distance
/// whenever `j` is a neighbor of query `i`. Zero distances are stored
/// explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyGraph {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<SampleIndex>,
    data: Vec<f64>,
}

impl AdjacencyGraph {
    pub(crate) fn from_neighborhoods(
        neighborhoods: Vec<Neighborhood>,
        n_cols: usize,
        mode: WeightMode,
    ) -> Self {
        let nnz = neighborhoods.iter().map(Neighborhood::len).sum();
        let mut indptr = Vec::with_capacity(neighborhoods.len() + 1);
        let mut indices = Vec::with_capacity(nnz);
        let mut data = Vec::with_capacity(nnz);

        indptr.push(0);
        for neighborhood in neighborhoods {
            indices.extend_from_slice(&neighborhood.indices);
            match mode {
                WeightMode::Connectivity => data.extend(std::iter::repeat(1.0).take(neighborhood.len())),
                WeightMode::Distance => data.extend_from_slice(&neighborhood.distances),
            }
            indptr.push(indices.len());
        }

        AdjacencyGraph {
            n_cols,
            indptr,
            indices,
            data,
        }
    }

    /// `(n_queries, n_samples_fit)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.indptr.len() - 1, self.n_cols)
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Row pointer array.
    pub fn indptr(&self) -> &[usize] {
        &self.indptr
    }

    /// Column index of each stored entry.
    pub fn indices(&self) -> &[SampleIndex] {
        &self.indices
    }

    /// Value of each stored entry.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Column indices and values of row `i`, nearest first.
    pub fn row(&self, i: usize) -> (&[SampleIndex], &[f64]) {
        let range = self.indptr[i]..self.indptr[i + 1];
        (&self.indices[range.clone()], &self.data[range])
    }

    /// Dense copy; absent entries are 0.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros(self.shape());
        for i in 0..self.shape().0 {
            let (cols, values) = self.row(i);
            for (&j, &v) in cols.iter().zip(values) {
                dense[[i, j]] = v;
            }
        }
        dense
    }

    /// Convert to a `sprs` CSR matrix (column-sorted within each row).
    pub fn to_csmat(&self) -> CsMat<f64> {
        let mut triplets = TriMat::with_capacity(self.shape(), self.nnz());
        for i in 0..self.shape().0 {
            let (cols, values) = self.row(i);
            for (&j, &v) in cols.iter().zip(values) {
                triplets.add_triplet(i, j, v);
            }
        }
        triplets.to_csr()
    }

    /// Whether the values of every row are non-decreasing.
    pub fn is_sorted_by_data(&self) -> bool {
        (0..self.shape().0).all(|i| self.row(i).1.windows(2).all(|w| w[0] <= w[1]))
    }

    /// Whether every row stores an entry on the diagonal.
    pub fn has_explicit_diagonal(&self) -> bool {
        let n_rows = self.shape().0;
        let on_diagonal = (0..n_rows).filter(|&i| self.row(i).0.contains(&i)).count();
        on_diagonal == n_rows
    }
}

/// Whether fit points count as their own neighbors.
///
/// | mode         | override | result   |
/// |--------------|----------|----------|
/// | connectivity | none     | true     |
/// | distance     | none     | false    |
/// | any          | `b`      | `b`      |
pub fn resolve_include_self(mode: WeightMode, include_self: Option<bool>) -> bool {
    include_self.unwrap_or(mode == WeightMode::Connectivity)
}

/// Where graph rows come from.
#[derive(Debug, Clone, Copy)]
pub enum GraphSource<'a> {
    /// Raw reference points; an index is built with the request's metric
    Points(ArrayView2<'a, f64>),
    /// A pre-built index
    Index(&'a dyn NeighborIndex),
}

impl<'a> From<ArrayView2<'a, f64>> for GraphSource<'a> {
    fn from(points: ArrayView2<'a, f64>) -> Self {
        GraphSource::Points(points)
    }
}

impl<'a> From<&'a dyn NeighborIndex> for GraphSource<'a> {
    fn from(index: &'a dyn NeighborIndex) -> Self {
        GraphSource::Index(index)
    }
}

/// Neighbor selection rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum NeighborQuery {
    KNearest(usize),
    Radius(f64),
}

/// Query `index` and assemble the graph.
///
/// `query = None` asks the index for the fit set with each point excluded
/// from its own row.
pub(crate) fn query_graph(
    index: &dyn NeighborIndex,
    query: Option<&ArrayView2<'_, f64>>,
    selection: NeighborQuery,
    mode: WeightMode,
) -> Result<AdjacencyGraph> {
    let neighborhoods = match selection {
        NeighborQuery::KNearest(k) => index.k_nearest(query, k)?,
        NeighborQuery::Radius(radius) => index.within_radius(query, radius)?,
    };
    let graph = AdjacencyGraph::from_neighborhoods(neighborhoods, index.n_samples_fit(), mode);
    log::debug!(
        "Built {:?} {} graph: shape {:?}, {} edges",
        selection,
        mode,
        graph.shape(),
        graph.nnz()
    );
    Ok(graph)
}

fn build_from_source(
    source: GraphSource<'_>,
    config: &NeighborsConfig,
    selection: NeighborQuery,
) -> Result<AdjacencyGraph> {
    config.validate()?;
    let include_self = resolve_include_self(config.mode, config.include_self);

    match source {
        GraphSource::Points(points) => {
            let index = BruteForceIndex::from_config(&points, config)?;
            let query = include_self.then_some(&points);
            query_graph(&index, query, selection, config.mode)
        }
        GraphSource::Index(index) => {
            index.metric_config().ensure_matches(&config.metric_config())?;
            let points = index.reference_points();
            let query = include_self.then_some(&points);
            query_graph(index, query, selection, config.mode)
        }
    }
}

/// Graph of the `config.n_neighbors` nearest neighbors of every fit point.
///
/// ```rust
/// use featurekit::neighbors::{kneighbors_graph, NeighborsConfig};
/// use ndarray::array;
///
/// let x = array![[0.0], [3.0], [1.0]];
/// let config = NeighborsConfig::builder()
///     .n_neighbors(2)
///     .include_self(true)
///     .build()?;
/// let graph = kneighbors_graph(x.view().into(), &config)?;
/// assert_eq!(
///     graph.to_dense(),
///     array![[1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0]]
/// );
/// # Ok::<(), featurekit::FeatureKitError>(())
/// ```
pub fn kneighbors_graph(source: GraphSource<'_>, config: &NeighborsConfig) -> Result<AdjacencyGraph> {
    validate_n_neighbors(config.n_neighbors)?;
    build_from_source(source, config, NeighborQuery::KNearest(config.n_neighbors))
}

/// Graph of all fit points within `config.radius` of every fit point.
pub fn radius_neighbors_graph(
    source: GraphSource<'_>,
    config: &NeighborsConfig,
) -> Result<AdjacencyGraph> {
    validate_radius(config.radius)?;
    build_from_source(source, config, NeighborQuery::Radius(config.radius))
}
