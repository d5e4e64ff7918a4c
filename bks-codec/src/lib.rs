#![warn(missing_docs)]

//! Converts RGB images to and from BKS, a run-length encoded container format.
/// Defines the bitmap type and the encoder/decoder traits
pub mod bitmap;
/// Reader and writer for BKS containers
pub mod bks;
mod error;
pub mod raster;
/// Byte-oriented run-length codec used for BKS payloads
pub mod rle;

pub use error::{Error, Result};
