//! Input validation: the source SVG must exist before the renderer runs.
//!
//! Only existence is checked. Whether the file is readable or is valid SVG is
//! the renderer's concern; it reports those failures itself.

use crate::error::Svg2PngError;
use std::path::Path;
use tracing::debug;

/// Fail with [`Svg2PngError::InputNotFound`] unless `path` exists.
pub fn ensure_input_exists(path: &Path) -> Result<(), Svg2PngError> {
    if !path.exists() {
        return Err(Svg2PngError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    debug!("Resolved input SVG: {}", path.display());
    Ok(())
}
