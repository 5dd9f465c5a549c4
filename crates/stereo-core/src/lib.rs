//! Yoon-Kweon adaptive-weight stereo matching engine.
//!
//! Computes a dense per-pixel disparity map between a rectified stereo
//! pair via bilaterally-weighted-patch cost aggregation, followed by
//! left/right consistency occlusion detection and weighted-median
//! densification.

pub mod aggregate;
pub mod cost;
pub mod densify;
pub mod disparity_map;
pub mod error;
pub mod fill;
pub mod gradient;
pub mod image;
pub mod occlusion;
pub mod params;
pub mod pipeline;
pub mod stage;
pub mod support;
pub mod tables;

pub use aggregate::{aggregate, AggregateResult};
pub use cost::CostVolume;
pub use disparity_map::{Disparity, DisparityMap};
pub use error::{Error, Result};
pub use image::{Image, ImageMut};
pub use params::{Combinator, FillSense, MatchParams, PostParams};
pub use pipeline::{run, PipelineOutput};
pub use support::Window;
pub use tables::KernelTables;
