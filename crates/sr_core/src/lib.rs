//! sr_core — Core report types, cluster ids, share rounding, and ordering helpers.
//!
//! This crate is **I/O-free**. It defines the stable types used across the
//! workspace (`sr_io`, `sr_algo`, `sr_report`, `sr_view`, `sr_cli`).
//!
//! - Identifiers: `ClusterId`
//! - Report data: `ReportConfig`, `Cluster`, `Argument`, `Report`
//! - Integer-first share rounding (no float division for percentages)
//! - Stable (input-order preserving) ordering helpers
//!
//! Serialization derives are gated behind the `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod determinism;
pub mod model;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        EmptyId,
        InvalidLanguageColumn,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::EmptyId => write!(f, "cluster id must not be empty"),
                CoreError::InvalidLanguageColumn => write!(f, "language column out of range"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod ids {
    //! Cluster identifier newtype.

    use crate::errors::CoreError;
    use alloc::string::{String, ToString};
    use core::fmt;
    use core::str::FromStr;

    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    /// Identifier of a cluster, unique within one report.
    ///
    /// Any non-blank string is accepted; the data-generation step usually
    /// emits small integers ("0", "1", ...).
    #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct ClusterId(String);

    impl ClusterId {
        pub fn as_str(&self) -> &str { &self.0 }
    }

    impl fmt::Display for ClusterId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl FromStr for ClusterId {
        type Err = CoreError;
        fn from_str(s: &str) -> Result<Self, Self::Err> {
            if s.trim().is_empty() { Err(CoreError::EmptyId) } else { Ok(Self(s.to_string())) }
        }
    }

    impl AsRef<str> for ClusterId {
        fn as_ref(&self) -> &str { &self.0 }
    }
}

pub mod rounding {
    //! Integer-first share helpers.

    /// Percentage of `part` in `total`, rounded to the nearest integer with
    /// halves rounded up. `total == 0` yields `0`.
    ///
    /// Computed as `(200 * part + total) / (2 * total)` so that no float
    /// division is involved and equal inputs always give equal outputs.
    pub fn share_percent_rounded(part: u64, total: u64) -> u32 {
        if total == 0 {
            return 0;
        }
        let num = 200u128 * part as u128 + total as u128;
        let den = 2u128 * total as u128;
        (num / den) as u32
    }
}

pub use ids::ClusterId;
pub use model::{Argument, Cluster, LanguageSelection, Report, ReportConfig, TranslationEntry, TranslationSettings};

#[cfg(test)]
mod tests {
    use super::*;
    use rounding::share_percent_rounded;

    #[test]
    fn cluster_id_rejects_blank() {
        assert!("".parse::<ClusterId>().is_err());
        assert!("   ".parse::<ClusterId>().is_err());
        assert_eq!("c2".parse::<ClusterId>().unwrap().as_str(), "c2");
    }

    #[test]
    fn share_rounds_half_up() {
        assert_eq!(share_percent_rounded(1, 8), 13); // 12.5 -> 13
        assert_eq!(share_percent_rounded(1, 3), 33);
        assert_eq!(share_percent_rounded(2, 3), 67);
        assert_eq!(share_percent_rounded(5, 5), 100);
    }

    #[test]
    fn share_of_zero_total_is_zero() {
        assert_eq!(share_percent_rounded(0, 0), 0);
        assert_eq!(share_percent_rounded(7, 0), 0);
    }
}
