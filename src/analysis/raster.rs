use rayon::prelude::*;

use crate::{
    foundation::{
        core::Rgb8,
        error::{VennError, VennResult},
    },
    scene::frame::Frame,
};

/// Largest raster side used for color sampling.
pub const MAX_SAMPLE_DIM: u32 = 256;

/// A frame rasterized into premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
}

impl Raster {
    /// Every pixel's color composited over black.
    ///
    /// Premultiplied channels already are the over-black composite.
    pub fn samples(&self) -> Vec<Rgb8> {
        self.rgba8_premul
            .par_chunks_exact(4)
            .map(|px| Rgb8::new(px[0], px[1], px[2]))
            .collect()
    }
}

/// Pixel size for sampling: the declared canvas scaled so the longer side is at most `max_dim`.
pub fn sample_size(tree: &usvg::Tree, max_dim: u32) -> VennResult<(u32, u32)> {
    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(VennError::analysis("svg has invalid width/height"));
    }
    let scale = (max_dim as f32 / w.max(h)).min(1.0);
    let pw = ((w * scale).round() as u32).max(1);
    let ph = ((h * scale).round() as u32).max(1);
    Ok((pw, ph))
}

pub fn rasterize_frame(frame: &Frame, max_dim: u32) -> VennResult<Raster> {
    let markup = frame.to_svg();
    if markup.is_empty() {
        return Err(VennError::analysis("frame has no markup to rasterize"));
    }
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(markup.as_bytes(), &opts)
        .map_err(|e| VennError::analysis(format!("parse svg tree: {e}")))?;
    let (width, height) = sample_size(&tree, max_dim)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| VennError::analysis("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    Ok(Raster {
        width,
        height,
        rgba8_premul: pixmap.data().to_vec(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/analysis/raster.rs"]
mod tests;
