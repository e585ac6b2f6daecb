use std::fs;
use std::path::Path;

use motion_core::{EngineError, SkeletonSource};
use types::SkeletonFrame;

/// Reads a whole newline-delimited JSON replay file up front — the
/// analogue of a recorded camera session (spec.md §6's `SkeletonFrame`
/// wire shape, one per line) — and then yields frames one at a time like
/// a live camera would.
pub struct ReplaySource {
    frames: std::vec::IntoIter<SkeletonFrame>,
}

impl ReplaySource {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        if !path.exists() {
            return Err(EngineError::ReplayNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = fs::read_to_string(path).map_err(|source| EngineError::ReplayRead {
            path: path.to_path_buf(),
            source,
        })?;

        let mut frames = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let frame: SkeletonFrame =
                serde_json::from_str(line).map_err(|source| EngineError::ReplayParse { line: index + 1, source })?;
            frames.push(frame);
        }

        Ok(Self { frames: frames.into_iter() })
    }
}

impl SkeletonSource for ReplaySource {
    fn next_frame(&mut self) -> Option<SkeletonFrame> {
        self.frames.next()
    }
}
