//! sr_view: which slice of a prepared report is on screen, and how to get back.
//!
//! The controller is synchronous and single-threaded. Hosts supply the device
//! probe, viewport and map renderer; see `collaborators`.

pub mod collaborators;
pub mod controller;
pub mod state;

pub use collaborators::{
    DeviceProbe, FixedDevice, FrameCluster, FramePoint, FrameRecorder, MapFrame, MapRenderer, MapRequest,
    MemoryViewport, Viewport, CLUSTER_MAP_SIZE, OVERVIEW_MAP_SIZE,
};
pub use controller::{PreparedReport, ReportViewController};
pub use state::{MapTarget, Notice, Transition, ViewError, ViewState};
