//! Estimators that turn samples into neighbor graphs.

use crate::core::error::{FeatureKitError, Result};
use crate::core::traits::NeighborIndex;
use crate::neighbors::config::NeighborsConfig;
use crate::neighbors::graph::{query_graph, resolve_include_self, AdjacencyGraph, NeighborQuery};
use crate::neighbors::index::BruteForceIndex;
use ndarray::ArrayView2;

/// State shared by both transformers.
#[derive(Debug)]
struct GraphTransformer {
    config: NeighborsConfig,
    index: Option<BruteForceIndex>,
    component: &'static str,
}

impl GraphTransformer {
    fn new(config: NeighborsConfig, component: &'static str) -> Result<Self> {
        config.validate()?;
        Ok(GraphTransformer {
            config,
            index: None,
            component,
        })
    }

    fn fit(&mut self, x: &ArrayView2<'_, f64>) -> Result<()> {
        let index = BruteForceIndex::from_config(x, &self.config)?;
        self.index = Some(index);
        Ok(())
    }

    fn index(&self) -> Result<&BruteForceIndex> {
        self.index
            .as_ref()
            .ok_or_else(|| FeatureKitError::not_fitted(self.component))
    }

    fn transform(&self, x: &ArrayView2<'_, f64>, selection: NeighborQuery) -> Result<AdjacencyGraph> {
        query_graph(self.index()?, Some(x), selection, self.config.mode)
    }

    fn fit_transform(
        &mut self,
        x: &ArrayView2<'_, f64>,
        selection: NeighborQuery,
    ) -> Result<AdjacencyGraph> {
        self.fit(x)?;
        if resolve_include_self(self.config.mode, self.config.include_self) {
            self.transform(x, selection)
        } else {
            query_graph(self.index()?, None, selection, self.config.mode)
        }
    }
}

/// Transforms samples into the graph of their `n_neighbors` nearest fit
/// points.
///
/// `transform` always queries its input explicitly, so transforming the fit
/// data yields a zero-distance diagonal. `fit_transform` follows the
/// `include_self` policy instead.
#[derive(Debug)]
pub struct KNeighborsTransformer {
    inner: GraphTransformer,
}

impl KNeighborsTransformer {
    /// Create an unfitted transformer.
    pub fn new(config: NeighborsConfig) -> Result<Self> {
        Ok(KNeighborsTransformer {
            inner: GraphTransformer::new(config, "KNeighborsTransformer")?,
        })
    }

    /// Configuration of this transformer.
    pub fn config(&self) -> &NeighborsConfig {
        &self.inner.config
    }

    /// Fitted index.
    pub fn index(&self) -> Result<&dyn NeighborIndex> {
        Ok(self.inner.index()?)
    }

    /// Index the reference points.
    pub fn fit(&mut self, x: &ArrayView2<'_, f64>) -> Result<()> {
        self.inner.fit(x)
    }

    /// Graph of `x` against the fit points.
    pub fn transform(&self, x: &ArrayView2<'_, f64>) -> Result<AdjacencyGraph> {
        self.inner.transform(x, self.selection())
    }

    /// Fit on `x`, then build its graph under the `include_self` policy.
    pub fn fit_transform(&mut self, x: &ArrayView2<'_, f64>) -> Result<AdjacencyGraph> {
        let selection = self.selection();
        self.inner.fit_transform(x, selection)
    }

    fn selection(&self) -> NeighborQuery {
        NeighborQuery::KNearest(self.inner.config.n_neighbors)
    }
}

/// Transforms samples into the graph of all fit points within `radius`.
#[derive(Debug)]
pub struct RadiusNeighborsTransformer {
    inner: GraphTransformer,
}

impl RadiusNeighborsTransformer {
    /// Create an unfitted transformer.
    pub fn new(config: NeighborsConfig) -> Result<Self> {
        Ok(RadiusNeighborsTransformer {
            inner: GraphTransformer::new(config, "RadiusNeighborsTransformer")?,
        })
    }

    /// Configuration of this transformer.
    pub fn config(&self) -> &NeighborsConfig {
        &self.inner.config
    }

    /// Fitted index.
    pub fn index(&self) -> Result<&dyn NeighborIndex> {
        Ok(self.inner.index()?)
    }

    /// Index the reference points.
    pub fn fit(&mut self, x: &ArrayView2<'_, f64>) -> Result<()> {
        self.inner.fit(x)
    }

    /// Graph of `x` against the fit points.
    pub fn transform(&self, x: &ArrayView2<'_, f64>) -> Result<AdjacencyGraph> {
        self.inner.transform(x, self.selection())
    }

    /// Fit on `x`, then build its graph under the `include_self` policy.
    pub fn fit_transform(&mut self, x: &ArrayView2<'_, f64>) -> Result<AdjacencyGraph> {
        let selection = self.selection();
        self.inner.fit_transform(x, selection)
    }

    fn selection(&self) -> NeighborQuery {
        NeighborQuery::Radius(self.inner.config.radius)
    }
}
