//! Results writer.

use crate::error::Result;
use cogsmith_core::Placement;
use std::path::Path;

/// Writes the text rendering of `placement` to `path`, replacing any previous file.
pub fn write_placement(path: impl AsRef<Path>, placement: &Placement) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, placement.to_string())?;
    tracing::info!(path = %path.display(), "Best placement written");
    Ok(())
}
