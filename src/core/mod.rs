//! Core infrastructure module for featurekit.
//!
//! This module provides the foundational pieces shared by the binning engine
//! and the neighbor graph builder:
//!
//! - [`types`]: Index aliases and string-backed enumerations
//! - [`constants`]: Defaults and numeric tolerances
//! - [`error`]: The crate-wide error type
//! - [`traits`]: Collaborator traits (quantiles, clustering, encoding, k-NN)
//! - [`validation`]: Input array checks
//!
//! ```rust
//! use featurekit::core::{
//!     types::{BinStrategy, Encoding},
//!     constants::DEFAULT_N_BINS,
//!     error::Result,
//! };
//!
//! let strategy: BinStrategy = "quantile".parse()?;
//! assert_eq!(strategy, BinStrategy::Quantile);
//! assert_eq!(DEFAULT_N_BINS, 2);
//! # Ok::<(), featurekit::FeatureKitError>(())
//! ```

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;
pub mod validation;

pub use constants::*;
pub use error::{FeatureKitError, Result};
pub use traits::*;
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};

static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize logging for the library. Safe to call more than once.
pub fn initialize_core() -> Result<()> {
    if CORE_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    // Another logger may already be installed by the host application.
    let _ = env_logger::try_init();

    log::debug!("featurekit {} initialized", FEATUREKIT_VERSION);
    Ok(())
}

/// Check whether [`initialize_core`] has run.
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::SeqCst)
}
