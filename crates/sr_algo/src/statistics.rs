// crates/sr_algo/src/statistics.rs
//
// Argument statistics over one report's clusters.
//
// Contract:
// - Totals and shares are taken from the same borrowed slice (`Snapshot`), so
//   a share can never be computed against a total from different data.
// - Shares use integer rounding (`sr_core::rounding`), halves up, 0 when the
//   total is 0.
// - Rankings are stable sorts over borrowed views; ties keep input order and
//   the caller's sequences are never reordered.
// - No RNG, no I/O.

extern crate alloc;

use alloc::vec::Vec;

use sr_core::determinism::{cmp_count_desc, cmp_weight_desc, sorted_refs_by};
use sr_core::rounding::share_percent_rounded;
use sr_core::{Argument, Cluster, ClusterId};

/// Number of representative arguments shown per cluster.
pub const DEFAULT_TOP_ARGUMENTS: usize = 5;

/// Sum of argument counts across all clusters; zero for an empty slice.
pub fn total_arguments(clusters: &[Cluster]) -> usize {
    clusters.iter().map(Cluster::argument_count).sum()
}

/// `100 * count / total`, rounded to the nearest integer; 0 when `total == 0`.
pub fn cluster_share(cluster: &Cluster, total: usize) -> u32 {
    share_percent_rounded(cluster.argument_count() as u64, total as u64)
}

/// Clusters by descending argument count. Ties keep input order.
pub fn ranked_clusters(clusters: &[Cluster]) -> Vec<&Cluster> {
    sorted_refs_by(clusters, |a, b| cmp_count_desc(a.argument_count(), b.argument_count()))
}

/// The `n` highest-weighted arguments of a cluster (descending `p`, ties in
/// input order). The cluster's own argument sequence is not touched.
pub fn top_arguments(cluster: &Cluster, n: usize) -> Vec<&Argument> {
    let mut refs = sorted_refs_by(&cluster.arguments, |a, b| cmp_weight_desc(a.p, b.p));
    refs.truncate(n);
    refs
}

/// Derived per-cluster figures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterStats {
    pub cluster_id: ClusterId,
    /// 1-based position in the ranked order.
    pub rank: usize,
    pub argument_count: usize,
    pub share_pct: u32,
}

/// One consistent view over a cluster slice: the total is computed once and
/// every share is derived from it.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    clusters: &'a [Cluster],
    total: usize,
}

impl<'a> Snapshot<'a> {
    pub fn new(clusters: &'a [Cluster]) -> Self {
        Self { clusters, total: total_arguments(clusters) }
    }

    pub fn total(&self) -> usize { self.total }

    pub fn clusters(&self) -> &'a [Cluster] { self.clusters }

    pub fn share(&self, cluster: &Cluster) -> u32 {
        cluster_share(cluster, self.total)
    }

    pub fn ranked(&self) -> Vec<&'a Cluster> {
        ranked_clusters(self.clusters)
    }

    /// Stats rows in ranked order.
    pub fn ranked_stats(&self) -> Vec<ClusterStats> {
        self.ranked()
            .into_iter()
            .enumerate()
            .map(|(i, c)| ClusterStats {
                cluster_id: c.cluster_id.clone(),
                rank: i + 1,
                argument_count: c.argument_count(),
                share_pct: self.share(c),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use proptest::prelude::*;

    fn arg(text: &str, p: f64) -> Argument {
        Argument {
            arg_id: text.to_string(),
            argument: text.to_string(),
            comment_id: None,
            x: 0.0,
            y: 0.0,
            p,
        }
    }

    fn cluster(id: &str, n: usize) -> Cluster {
        Cluster {
            label: String::from(id),
            cluster_id: id.parse().unwrap(),
            takeaways: String::new(),
            arguments: (0..n).map(|i| arg(&alloc::format!("{id}-{i}"), 0.5)).collect(),
        }
    }

    #[test]
    fn totals_and_zero_shares() {
        assert_eq!(total_arguments(&[]), 0);
        let c = cluster("c1", 4);
        assert_eq!(cluster_share(&c, 0), 0);
        assert_eq!(total_arguments(&[c.clone(), cluster("c2", 6)]), 10);
        assert_eq!(cluster_share(&c, 10), 40);
    }

    #[test]
    fn ranking_is_stable_for_equal_counts() {
        let cs = vec![cluster("a", 3), cluster("b", 5), cluster("c", 5), cluster("d", 1)];
        let ids: Vec<&str> = ranked_clusters(&cs).iter().map(|c| c.cluster_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a", "d"]);
        // re-sorting gives the same answer, input untouched
        let again: Vec<&str> = ranked_clusters(&cs).iter().map(|c| c.cluster_id.as_str()).collect();
        assert_eq!(ids, again);
        assert_eq!(cs[0].cluster_id.as_str(), "a");
    }

    #[test]
    fn top_five_of_seven() {
        let mut c = cluster("c", 0);
        c.arguments = vec![
            arg("a", 0.1),
            arg("b", 0.9),
            arg("c", 0.4),
            arg("d", 0.9),
            arg("e", 0.7),
            arg("f", 0.2),
            arg("g", 0.8),
        ];
        let before = c.arguments.clone();
        let top: Vec<&str> = top_arguments(&c, DEFAULT_TOP_ARGUMENTS)
            .iter()
            .map(|a| a.argument.as_str())
            .collect();
        assert_eq!(top, vec!["b", "d", "g", "e", "c"]);
        assert_eq!(c.arguments, before);
    }

    #[test]
    fn top_of_short_cluster_returns_all() {
        let c = cluster("c", 2);
        assert_eq!(top_arguments(&c, 5).len(), 2);
        assert!(top_arguments(&cluster("e", 0), 5).is_empty());
    }

    #[test]
    fn snapshot_rows_follow_rank() {
        let cs = vec![cluster("x", 1), cluster("y", 3)];
        let snap = Snapshot::new(&cs);
        let rows = snap.ranked_stats();
        assert_eq!(snap.total(), 4);
        assert_eq!(rows[0].cluster_id.as_str(), "y");
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].share_pct, 75);
        assert_eq!(rows[1].share_pct, 25);
    }

    proptest! {
        #[test]
        fn ranking_is_a_stable_descending_permutation(counts in proptest::collection::vec(0usize..6, 0..12)) {
            let cs: Vec<Cluster> = counts
                .iter()
                .enumerate()
                .map(|(i, n)| cluster(&alloc::format!("k{i}"), *n))
                .collect();
            let ranked = ranked_clusters(&cs);
            prop_assert_eq!(ranked.len(), cs.len());
            for w in ranked.windows(2) {
                let (a, b) = (w[0], w[1]);
                prop_assert!(a.argument_count() >= b.argument_count());
                if a.argument_count() == b.argument_count() {
                    let ia = cs.iter().position(|c| c.cluster_id == a.cluster_id).unwrap();
                    let ib = cs.iter().position(|c| c.cluster_id == b.cluster_id).unwrap();
                    prop_assert!(ia < ib);
                }
            }
        }

        #[test]
        fn shares_never_exceed_hundred(counts in proptest::collection::vec(0usize..20, 1..8)) {
            let cs: Vec<Cluster> = counts
                .iter()
                .enumerate()
                .map(|(i, n)| cluster(&alloc::format!("k{i}"), *n))
                .collect();
            let snap = Snapshot::new(&cs);
            for c in &cs {
                prop_assert!(snap.share(c) <= 100);
            }
        }

        #[test]
        fn top_arguments_sorted_and_bounded(ps in proptest::collection::vec(0.0f64..1.0, 0..15), n in 0usize..8) {
            let mut c = cluster("c", 0);
            c.arguments = ps.iter().enumerate().map(|(i, p)| arg(&alloc::format!("a{i}"), *p)).collect();
            let top = top_arguments(&c, n);
            prop_assert_eq!(top.len(), n.min(ps.len()));
            for w in top.windows(2) {
                prop_assert!(w[0].p >= w[1].p);
            }
        }
    }
}
