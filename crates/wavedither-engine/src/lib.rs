//! Wavefront-synchronized parallel error diffusion.
//!
//! Floyd-Steinberg dithering is inherently sequential: each cell's error
//! flows east and into the row below. This crate parallelizes it without
//! changing a single output bit by dealing rows out round-robin to scoped
//! worker threads and gating every cell on its upper-right neighbour's
//! completion flag. Rows then advance as a diagonal wavefront, each trailing
//! the row above by a couple of cells.
//!
//! [`DitherEngine`] is the entry point. [`diffuse_parallel`] exposes the raw
//! protocol with an exact, unclamped worker count.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod gate;
pub mod metrics;
pub mod progress;
pub mod shared;
pub mod wavefront;
pub mod worker;

pub use config::{available_workers, resolve_worker_count, EngineConfig};
pub use engine::{DitherEngine, RunReport};
pub use gate::CompletionGrid;
pub use metrics::RunMetrics;
pub use progress::Progress;
pub use shared::{GridView, SharedGrid};
pub use wavefront::diffuse_parallel;
pub use worker::{Worker, WorkerContext, WorkerDescriptor, WorkerState};
