//! One-shot favicon conversion: vector source in, 32x32 PNG out.

use crate::error::ConvertError;
use resvg::usvg::{self, Transform};
use std::path::Path;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Favicon output edge length in pixels.
pub const FAVICON_SIZE: u32 = 32;

/// Rasterizes an SVG icon to a fixed-size PNG favicon.
pub struct FaviconConverter {
    /// Font database for SVG sources containing text
    fontdb: Arc<fontdb::Database>,
}

impl FaviconConverter {
    pub fn new() -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_system_fonts();
        tracing::debug!(font_count = fontdb.len(), "Loaded fonts for SVG rendering");

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Rasterize SVG data to a 32x32 PNG.
    ///
    /// The source is scaled proportionally to fit and centered on a
    /// transparent canvas, then re-compressed with oxipng.
    pub fn rasterize(&self, svg_data: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg_data, &options)
            .map_err(|e| ConvertError::SvgParse(e.to_string()))?;

        let svg_size = tree.size();
        let scale_x = FAVICON_SIZE as f32 / svg_size.width();
        let scale_y = FAVICON_SIZE as f32 / svg_size.height();
        let scale = scale_x.min(scale_y);

        let scaled_width = svg_size.width() * scale;
        let scaled_height = svg_size.height() * scale;
        let offset_x = (FAVICON_SIZE as f32 - scaled_width) / 2.0;
        let offset_y = (FAVICON_SIZE as f32 - scaled_height) / 2.0;

        let mut pixmap =
            Pixmap::new(FAVICON_SIZE, FAVICON_SIZE).ok_or(ConvertError::PixmapAllocation)?;

        let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        let png_bytes = pixmap
            .encode_png()
            .map_err(|e| ConvertError::PngEncode(e.to_string()))?;

        // Re-compress with oxipng; fall back to the plain encoding on failure
        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);

        Ok(optimized)
    }

    /// Read a source SVG, rasterize it and write the destination PNG.
    ///
    /// A single linear chain; a failure at any stage aborts the rest and is
    /// reported once to the caller. No retry, no partial-output cleanup.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<usize, ConvertError> {
        let svg_data = std::fs::read(input)?;
        let png_bytes = self.rasterize(&svg_data)?;
        std::fs::write(output, &png_bytes)?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            bytes = png_bytes.len(),
            "Converted favicon"
        );
        Ok(png_bytes.len())
    }
}

impl Default for FaviconConverter {
    fn default() -> Self {
        Self::new()
    }
}
