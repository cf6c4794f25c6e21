// crates/sr_algo/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use sr_core::{Argument, Cluster, ClusterId};

// ----------------------------- Statistics (public surface) ---------------------------

pub mod statistics;

pub use statistics::{
    cluster_share, ranked_clusters, top_arguments, total_arguments, ClusterStats, Snapshot,
    DEFAULT_TOP_ARGUMENTS,
};

// ----------------------------- Colours (public surface) ------------------------------

pub mod colors;

pub use colors::{build_color_map, ClusterColorAssigner, Color, ColorMap, PALETTE};
