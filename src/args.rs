use crate::{
    error::{Error, Result},
    graph::Timestamp,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the driver orders edges before cutting them into batches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Batches are inserted in file order.
    Unsorted,
    /// Each batch is sorted and deduplicated before insertion.
    PreSort,
    /// The graph is rebuilt from scratch for every batch.
    Snapshot,
}

impl Default for SortMode {
    fn default() -> Self {
        Self::Unsorted
    }
}

/// Benchmark configuration, supplied once at construction and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Args {
    pub num_epochs: usize,
    pub input_path: Option<PathBuf>,
    pub batch_size: usize,
    pub alg_names: Vec<String>,
    pub sort_mode: SortMode,
    /// Fraction of the timeline kept alive, in `(0, 1]`.
    pub window_size: f64,
    pub num_trials: usize,
    /// Sizing hint for engines with bounded edge storage.
    pub max_edges: Option<usize>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            num_epochs: 1,
            input_path: None,
            batch_size: 10000,
            alg_names: vec![],
            sort_mode: SortMode::default(),
            window_size: 1.0,
            num_trials: 1,
            max_edges: None,
        }
    }
}

impl Args {
    pub fn from_json(s: &str) -> Result<Self> {
        let args: Self = serde_json::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        args.validate()?;
        Ok(args)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Config("batch_size must be positive".to_string()));
        }
        if self.num_epochs == 0 {
            return Err(Error::Config("num_epochs must be positive".to_string()));
        }
        if self.num_trials == 0 {
            return Err(Error::Config("num_trials must be positive".to_string()));
        }
        if !(self.window_size > 0.0 && self.window_size <= 1.0) {
            return Err(Error::Config(format!(
                "window_size must be in (0, 1], got {}",
                self.window_size
            )));
        }
        Ok(())
    }

    /// Eviction threshold implied by `window_size`, for a timeline spanning
    /// `[first, newest]`.
    ///
    /// A full window never evicts anything.
    pub fn threshold_for(&self, first: Timestamp, newest: Timestamp) -> Timestamp {
        if self.window_size >= 1.0 || newest <= first {
            return first;
        }
        let (first, newest) = (i128::from(first), i128::from(newest));
        let kept = ((newest - first) as f64 * self.window_size) as i128;
        // Rounding in f64 may push `kept` past the span.
        (newest - kept).clamp(first, newest) as Timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let args = Args::default();
        assert!(args.validate().is_ok());
        assert_eq!(args.sort_mode, SortMode::Unsorted);
        assert!(args.alg_names.is_empty());
    }

    #[test]
    fn parse_partial_json() {
        let args = Args::from_json(r#"{"alg_names": ["bfs", "cc"], "sort_mode": "pre_sort"}"#)
            .unwrap();
        assert_eq!(args.alg_names, vec!["bfs".to_string(), "cc".to_string()]);
        assert_eq!(args.sort_mode, SortMode::PreSort);
        assert_eq!(args.batch_size, 10000);
    }

    #[test]
    fn reject_bad_window() {
        let res = Args::from_json(r#"{"window_size": 0.0}"#);
        assert!(matches!(res, Err(Error::Config(_))));
        let res = Args::from_json(r#"{"window_size": 1.5}"#);
        assert!(matches!(res, Err(Error::Config(_))));
    }

    #[test]
    fn reject_malformed_json() {
        assert!(matches!(Args::from_json("{"), Err(Error::Config(_))));
    }

    #[test]
    fn threshold_follows_window() {
        let mut args = Args::default();
        assert_eq!(args.threshold_for(0, 100), 0);
        args.window_size = 0.25;
        assert_eq!(args.threshold_for(0, 100), 75);
        assert_eq!(args.threshold_for(50, 50), 50);
    }

    #[test]
    fn threshold_over_the_whole_timeline() {
        let mut args = Args {
            window_size: 0.5,
            ..Args::default()
        };
        assert_eq!(args.threshold_for(Timestamp::MIN, Timestamp::MAX), -1);
        args.window_size = 0.999_999_999;
        let t = args.threshold_for(Timestamp::MIN, Timestamp::MAX);
        assert!(t < -(1 << 60));
        args.window_size = 1e-9;
        let t = args.threshold_for(Timestamp::MIN, Timestamp::MAX);
        assert!(t > 1 << 60);
    }
}
