// crates/sr_algo/src/colors.rs
//
// Stable colour assignment for a dynamically sized set of cluster ids.
//
// Rules:
// - Input order is the priority order; the first occurrence of an id fixes
//   its index, later repeats are ignored.
// - Index < PALETTE.len() takes the fixed palette colour.
// - Past the palette, hues are generated on a golden-angle ramp. The hue for
//   index k depends only on k, so growing the id set never recolours the
//   clusters that were already there.
// - Recomputation happens only when the ordered id set changes.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use sr_core::determinism::first_seen;
use sr_core::ClusterId;

/// Fixed categorical palette (ten distinct hues).
pub const PALETTE: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd",
    "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22", "#17becf",
];

/// Neutral colour for ids outside the assigned set.
pub const FALLBACK: &str = "#999999";

/// Golden angle in thousandths of a degree (137.508°).
const GOLDEN_ANGLE_MILLIDEG: u64 = 137_508;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Palette(&'static str),
    /// Generated colour; hue in whole degrees, fixed saturation/lightness.
    Hue(u16),
}

impl Color {
    /// Colour for a priority index.
    pub fn for_index(index: usize) -> Self {
        match PALETTE.get(index) {
            Some(hex) => Color::Palette(hex),
            None => {
                let k = (index - PALETTE.len()) as u64;
                // offset by half a step so the ramp does not start on pure red,
                // which the palette already covers.
                let millideg = (k * GOLDEN_ANGLE_MILLIDEG + GOLDEN_ANGLE_MILLIDEG / 2) % 360_000;
                Color::Hue((millideg / 1000) as u16)
            }
        }
    }

    pub fn css(&self) -> String {
        alloc::format!("{self}")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Palette(hex) => f.write_str(hex),
            Color::Hue(h) => write!(f, "hsl({h}, 65%, 50%)"),
        }
    }
}

/// Derived mapping cluster id → colour, plus the ordered id set it was built from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ColorMap {
    order: Vec<ClusterId>,
    colors: BTreeMap<ClusterId, Color>,
}

impl ColorMap {
    pub fn get(&self, id: &ClusterId) -> Option<Color> {
        self.colors.get(id).copied()
    }

    /// Colour as CSS text; unknown ids get the neutral fallback.
    pub fn css(&self, id: &ClusterId) -> String {
        self.get(id).map(|c| c.css()).unwrap_or_else(|| String::from(FALLBACK))
    }

    /// Ids in priority order (first-seen, de-duplicated).
    pub fn order(&self) -> &[ClusterId] { &self.order }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// `(id, colour)` pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (&ClusterId, Color)> + '_ {
        self.order.iter().map(move |id| (id, self.colors[id]))
    }
}

/// Build a fresh colour map. Caller data is only read.
pub fn build_color_map<'a, I>(ids: I) -> ColorMap
where
    I: IntoIterator<Item = &'a ClusterId>,
{
    let order = first_seen(ids.into_iter().cloned());
    let colors = order
        .iter()
        .enumerate()
        .map(|(i, id)| (id.clone(), Color::for_index(i)))
        .collect();
    ColorMap { order, colors }
}

/// Single writer of a report's `ColorMap`. Keeps the last map and rebuilds it
/// only when the ordered id set differs.
#[derive(Debug, Default)]
pub struct ClusterColorAssigner {
    current: Option<ColorMap>,
    builds: usize,
}

impl ClusterColorAssigner {
    pub fn new() -> Self { Self::default() }

    pub fn assign(&mut self, ids: &[ClusterId]) -> &ColorMap {
        let unchanged = self
            .current
            .as_ref()
            .is_some_and(|m| m.order.as_slice() == first_seen(ids.iter().cloned()).as_slice());
        if !unchanged {
            self.current = Some(build_color_map(ids));
            self.builds += 1;
        }
        // populated on the line above when missing
        self.current.get_or_insert_with(ColorMap::default)
    }

    /// How many times a map was (re)built. Exposed for callers that want to
    /// assert stability.
    pub fn builds(&self) -> usize { self.builds }
}
