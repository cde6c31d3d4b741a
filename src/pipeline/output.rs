//! Output preparation: create every missing ancestor of the output PNG.
//!
//! The renderer writes the file itself and will not create directories, so
//! `dist/social/card.png` needs `dist/social/` beforehand.

use crate::config::RenderRequest;
use crate::error::Svg2PngError;
use tracing::debug;

/// Create the output file's parent directory and any missing intermediates.
///
/// A bare filename (`out.png`) has no parent to create and is a no-op.
pub fn prepare_output_dir(request: &RenderRequest) -> Result<(), Svg2PngError> {
    let Some(dir) = request.output_dir() else {
        return Ok(());
    };

    std::fs::create_dir_all(dir).map_err(|e| Svg2PngError::OutputDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    debug!("Output directory ready: {}", dir.display());
    Ok(())
}
