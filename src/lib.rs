//! Data preparation for class-per-directory image datasets.
//!
//! - [`datasets`]: cached train/validation/test splits and per-class counts
//! - [`filters`]: Gaussian low-pass filtering and FFT magnitude spectra
//! - [`archive`]: unpacking the raw dataset archive
//! - [`config`]: default locations of all of the above

pub mod archive;
pub mod config;
pub mod datasets;
pub mod filters;
pub mod logging;
