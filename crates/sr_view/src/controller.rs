//! crates/sr_view/src/controller.rs
//!
//! Single-writer owner of the view state.
//!
//! - Built only from a `PreparedReport`; derivation is finished before the
//!   first transition request.
//! - Opening a map captures the scroll offset under a new generation.
//! - Going back queues one restoration tagged with that generation;
//!   `finish_render_pass` applies it at most once and drops it if a newer
//!   capture exists.
//! - Rejected requests leave every field untouched.

use tracing::{debug, warn};

use sr_algo::{ClusterColorAssigner, ColorMap, Snapshot};
use sr_core::{Cluster, ClusterId, Report};
use sr_report::{TranslationResolver, UiLabel};

use crate::collaborators::{
    DeviceProbe, MapRenderer, MapRequest, Viewport, CLUSTER_MAP_SIZE, OVERVIEW_MAP_SIZE,
};
use crate::state::{MapTarget, Notice, Transition, ViewError, ViewState};

/// Report data with colours and ranking already derived.
#[derive(Clone, Debug)]
pub struct PreparedReport<'r> {
    report: &'r Report,
    colors: ColorMap,
    ranked: Vec<&'r Cluster>,
    total: usize,
}

impl<'r> PreparedReport<'r> {
    pub fn prepare(report: &'r Report, assigner: &mut ClusterColorAssigner) -> Self {
        let colors = assigner.assign(&report.cluster_ids()).clone();
        let snapshot = Snapshot::new(&report.clusters);
        debug!(clusters = report.clusters.len(), total = snapshot.total(), "report prepared");
        Self { report, colors, ranked: snapshot.ranked(), total: snapshot.total() }
    }

    pub fn report(&self) -> &'r Report { self.report }

    pub fn colors(&self) -> &ColorMap { &self.colors }

    /// Clusters in display order.
    pub fn ranked(&self) -> &[&'r Cluster] { &self.ranked }

    pub fn total_arguments(&self) -> usize { self.total }

    pub fn cluster(&self, id: &ClusterId) -> Option<&'r Cluster> {
        self.report.cluster(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Capture {
    generation: u64,
    offset: u64,
}

pub struct ReportViewController<'r, D: DeviceProbe> {
    prepared: PreparedReport<'r>,
    device: D,
    state: ViewState,
    generation: u64,
    captured: Option<Capture>,
    pending: Option<Capture>,
}

impl<'r, D: DeviceProbe> ReportViewController<'r, D> {
    pub fn new(prepared: PreparedReport<'r>, device: D) -> Self {
        Self { prepared, device, state: ViewState::Overview, generation: 0, captured: None, pending: None }
    }

    pub fn state(&self) -> &ViewState { &self.state }

    pub fn prepared(&self) -> &PreparedReport<'r> { &self.prepared }

    /// Offset captured on the last accepted open, if still held.
    pub fn captured_offset(&self) -> Option<u64> {
        self.captured.map(|c| c.offset)
    }

    /// Offset queued for the next render pass, if any.
    pub fn pending_restore(&self) -> Option<u64> {
        self.pending.map(|p| p.offset)
    }

    pub fn open_map(
        &mut self,
        target: MapTarget,
        viewport: &impl Viewport,
        resolver: &TranslationResolver<'_>,
    ) -> Result<Transition, ViewError> {
        if let ViewState::FullScreenMap { target: open } = &self.state {
            return Err(ViewError::AlreadyFullScreen(open.clone()));
        }
        if let MapTarget::Cluster(id) = &target {
            if self.prepared.cluster(id).is_none() {
                return Err(ViewError::UnknownCluster(id.clone()));
            }
        }
        if self.device.is_touch_only() {
            warn!(map = %target, "full-screen map refused on touch-only device");
            let label = UiLabel::TouchMapUnavailable;
            return Ok(Transition::Refused(Notice { label, text: resolver.label(label) }));
        }

        self.generation += 1;
        let offset = viewport.scroll_offset();
        self.captured = Some(Capture { generation: self.generation, offset });
        self.state = ViewState::FullScreenMap { target: target.clone() };
        debug!(map = %target, offset, generation = self.generation, "entered full-screen map");
        Ok(Transition::Entered(target))
    }

    pub fn back(&mut self) -> Result<Transition, ViewError> {
        if self.state.is_overview() {
            return Err(ViewError::NotInFullScreen);
        }
        self.state = ViewState::Overview;
        self.pending = self.captured.take();
        debug!(restore = ?self.pending_restore(), "returned to overview");
        Ok(Transition::Returned)
    }

    /// Run after the host finished laying out the current state. Applies the
    /// queued restoration if it is still current and returns the offset used.
    pub fn finish_render_pass(&mut self, viewport: &mut impl Viewport) -> Option<u64> {
        let pending = self.pending.take()?;
        if pending.generation != self.generation || !self.state.is_overview() {
            warn!(
                stale = pending.generation,
                current = self.generation,
                "discarding superseded scroll restoration"
            );
            return None;
        }
        viewport.scroll_to(pending.offset);
        debug!(offset = pending.offset, "scroll restored");
        Some(pending.offset)
    }

    /// Issue map requests for the current state; returns how many were sent.
    ///
    /// Overview: the main map, then one map per cluster in ranked order.
    /// Full screen: a single viewport-sized map for the target.
    pub fn render_maps(
        &self,
        renderer: &mut impl MapRenderer,
        viewport: &impl Viewport,
        resolver: &TranslationResolver<'_>,
    ) -> usize {
        let colors = &self.prepared.colors;
        match &self.state {
            ViewState::Overview => {
                renderer.render_map(&MapRequest {
                    clusters: self.prepared.ranked.clone(),
                    colors,
                    resolver,
                    width: OVERVIEW_MAP_SIZE,
                    height: OVERVIEW_MAP_SIZE,
                    only_cluster: None,
                    full_screen: false,
                    back_label: None,
                });
                for c in &self.prepared.ranked {
                    renderer.render_map(&MapRequest {
                        clusters: vec![*c],
                        colors,
                        resolver,
                        width: CLUSTER_MAP_SIZE,
                        height: CLUSTER_MAP_SIZE,
                        only_cluster: Some(&c.cluster_id),
                        full_screen: false,
                        back_label: None,
                    });
                }
                1 + self.prepared.ranked.len()
            }
            ViewState::FullScreenMap { target } => {
                let (width, height) = viewport.size();
                let (clusters, only_cluster) = match target {
                    MapTarget::All => (self.prepared.ranked.clone(), None),
                    MapTarget::Cluster(id) => (self.prepared.cluster(id).into_iter().collect(), Some(id)),
                };
                renderer.render_map(&MapRequest {
                    clusters,
                    colors,
                    resolver,
                    width,
                    height,
                    only_cluster,
                    full_screen: true,
                    back_label: Some(resolver.label(UiLabel::BackToReport)),
                });
                1
            }
        }
    }
}
