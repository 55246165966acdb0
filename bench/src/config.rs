use std::path::PathBuf;

use graph_repr_core::BackendKind;

pub const DEFAULT_OUT_DIR: &str = "out";

pub const DEFAULT_ORIGIN: usize = 1;

/// Destination labels timed by `study` when none are given.
pub const DEFAULT_TARGETS: [usize; 4] = [10, 100, 1000, 10000];

pub const DEFAULT_SYNTH_VERTICES: usize = 2000;

/// Settings for `describe`.
#[derive(Debug, Clone)]
pub struct DescribeConfig {
    pub out_dir: PathBuf,
    pub origin: usize,
    /// `None` infers from each input file.
    pub weighted: Option<bool>,
    pub backends: Vec<BackendKind>,
}

impl Default for DescribeConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            origin: DEFAULT_ORIGIN,
            weighted: None,
            backends: vec![BackendKind::Matrix, BackendKind::List],
        }
    }
}

/// Settings for `study`.
#[derive(Debug, Clone)]
pub struct StudyConfig {
    pub out_dir: PathBuf,
    pub origin: usize,
    pub targets: Vec<usize>,
    pub weighted: Option<bool>,
    pub backends: Vec<BackendKind>,
    /// Where to write the JSON summary, if anywhere.
    pub json: Option<PathBuf>,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            origin: DEFAULT_ORIGIN,
            targets: DEFAULT_TARGETS.to_vec(),
            weighted: None,
            backends: vec![BackendKind::List, BackendKind::Matrix],
            json: None,
        }
    }
}
