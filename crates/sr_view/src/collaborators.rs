//! crates/sr_view/src/collaborators.rs
//!
//! Seams to the host environment. The controller never touches a real
//! device, window or drawing surface; it talks to these traits only.

use serde::Serialize;

use sr_algo::ColorMap;
use sr_core::{Cluster, ClusterId};
use sr_report::TranslationResolver;

/// Overview main map edge, in CSS pixels.
pub const OVERVIEW_MAP_SIZE: u32 = 450;
/// Per-cluster map edge in the overview, in CSS pixels.
pub const CLUSTER_MAP_SIZE: u32 = 350;

/// Input-capability query, asked once per full-screen request.
pub trait DeviceProbe {
    fn is_touch_only(&self) -> bool;
}

/// Fixed answer; used by the CLI and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedDevice {
    pub touch_only: bool,
}

impl DeviceProbe for FixedDevice {
    fn is_touch_only(&self) -> bool { self.touch_only }
}

/// Scrollable page that hosts the overview.
pub trait Viewport {
    fn scroll_offset(&self) -> u64;
    fn scroll_to(&mut self, offset: u64);
    /// Inner (width, height) used for full-screen maps.
    fn size(&self) -> (u32, u32);
}

/// In-memory viewport that records every `scroll_to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryViewport {
    pub offset: u64,
    pub width: u32,
    pub height: u32,
    pub scroll_log: Vec<u64>,
}

impl MemoryViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { offset: 0, width, height, scroll_log: Vec::new() }
    }
}

impl Viewport for MemoryViewport {
    fn scroll_offset(&self) -> u64 { self.offset }

    fn scroll_to(&mut self, offset: u64) {
        self.offset = offset;
        self.scroll_log.push(offset);
    }

    fn size(&self) -> (u32, u32) { (self.width, self.height) }
}

/// Everything a map renderer needs for one map.
pub struct MapRequest<'a> {
    /// Clusters to draw; a single cluster when `only_cluster` is set.
    pub clusters: Vec<&'a Cluster>,
    pub colors: &'a ColorMap,
    pub resolver: &'a TranslationResolver<'a>,
    pub width: u32,
    pub height: u32,
    pub only_cluster: Option<&'a ClusterId>,
    pub full_screen: bool,
    /// Localized label for the dismiss control; present in full screen only.
    pub back_label: Option<String>,
}

pub trait MapRenderer {
    fn render_map(&mut self, request: &MapRequest<'_>);
}

// ---- frame recorder ----

/// Serializable snapshot of one map request.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapFrame {
    pub width: u32,
    pub height: u32,
    pub full_screen: bool,
    pub only_cluster: Option<String>,
    pub back_label: Option<String>,
    pub clusters: Vec<FrameCluster>,
    pub points: Vec<FramePoint>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameCluster {
    pub cluster_id: String,
    pub label: String,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FramePoint {
    pub arg_id: String,
    pub cluster_id: String,
    pub x: f64,
    pub y: f64,
}

/// Renderer that keeps each request as a `MapFrame`.
#[derive(Clone, Debug, Default)]
pub struct FrameRecorder {
    pub frames: Vec<MapFrame>,
}

impl MapRenderer for FrameRecorder {
    fn render_map(&mut self, request: &MapRequest<'_>) {
        let clusters = request
            .clusters
            .iter()
            .map(|c| FrameCluster {
                cluster_id: c.cluster_id.to_string(),
                label: request.resolver.t(&c.label),
                color: request.colors.css(&c.cluster_id),
            })
            .collect();
        let points = request
            .clusters
            .iter()
            .flat_map(|c| {
                c.arguments.iter().map(move |a| FramePoint {
                    arg_id: a.arg_id.clone(),
                    cluster_id: c.cluster_id.to_string(),
                    x: a.x,
                    y: a.y,
                })
            })
            .collect();
        self.frames.push(MapFrame {
            width: request.width,
            height: request.height,
            full_screen: request.full_screen,
            only_cluster: request.only_cluster.map(ToString::to_string),
            back_label: request.back_label.clone(),
            clusters,
            points,
        });
    }
}
