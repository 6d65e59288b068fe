//! PNG export for frame documents.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use bordered_core::{ExportError, FrameDocument, RenderError};
use bordered_render::SoftwareRenderer;
use tracing::{debug, info};

/// Which renderer produces the pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// CPU rasterizer. Always available.
    #[default]
    Software,
    /// Headless wgpu device. Needs the `gpu` feature and an adapter.
    Gpu,
}

/// Export options for PNG.
#[derive(Debug, Clone, Default)]
pub struct PngOptions {
    pub backend: Backend,
}

impl PngOptions {
    pub fn with_backend(backend: Backend) -> Self {
        Self { backend }
    }
}

/// Render a document to tightly packed RGBA8 pixels, row-major, top row first.
pub fn render_frame(doc: &FrameDocument, options: &PngOptions) -> Result<Vec<u8>, ExportError> {
    debug!(
        "rendering {}x{} frame with {:?} backend",
        doc.width, doc.height, options.backend
    );
    let pixels = match options.backend {
        Backend::Software => {
            let mut renderer = SoftwareRenderer::new(doc.width, doc.height);
            renderer.render(doc)?.to_vec()
        }
        Backend::Gpu => render_gpu(doc)?,
    };
    Ok(pixels)
}

#[cfg(feature = "gpu")]
fn render_gpu(doc: &FrameDocument) -> Result<Vec<u8>, RenderError> {
    let mut renderer = bordered_render::GpuRenderer::new(doc.width, doc.height)?;
    renderer.render(doc)
}

#[cfg(not(feature = "gpu"))]
fn render_gpu(_doc: &FrameDocument) -> Result<Vec<u8>, RenderError> {
    Err(RenderError::GpuInitFailed {
        reason: "built without the `gpu` feature".to_string(),
    })
}

/// Export a document to PNG bytes.
pub fn export_png(doc: &FrameDocument, options: &PngOptions) -> Result<Vec<u8>, ExportError> {
    let pixels = render_frame(doc, options)?;
    encode_png(&pixels, doc.width, doc.height)
}

/// Render a document and write it to `path` as PNG.
pub fn write_png(
    doc: &FrameDocument,
    options: &PngOptions,
    path: &Path,
) -> Result<(), ExportError> {
    let bytes = export_png(doc, options)?;
    fs::write(path, &bytes)?;
    info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Encode raw RGBA pixels as PNG.
fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = ::png::Encoder::new(&mut buf, width, height);
        encoder.set_color(::png::ColorType::Rgba);
        encoder.set_depth(::png::BitDepth::Eight);
        let mut writer = encoder.write_header().map_err(encode_error)?;
        writer.write_image_data(pixels).map_err(encode_error)?;
    }
    Ok(buf.into_inner())
}

fn encode_error(e: ::png::EncodingError) -> ExportError {
    ExportError::Encode {
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bordered_core::{Bounds, RectStyle, Rgba};

    fn sample_document() -> FrameDocument {
        FrameDocument::new(16, 8)
            .with_background(Rgba::BLACK)
            .with_rect(
                Bounds::from_scalars(0.0, 0.0, 16.0, 8.0),
                RectStyle::new(Rgba::rgb(1.0, 0.0, 0.0), Rgba::rgb(0.0, 0.0, 1.0), 1.0),
            )
    }

    fn decode(bytes: &[u8]) -> (::png::OutputInfo, Vec<u8>) {
        let decoder = ::png::Decoder::new(bytes);
        let mut reader = decoder.read_info().unwrap();
        let mut pixels = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut pixels).unwrap();
        pixels.truncate(info.buffer_size());
        (info, pixels)
    }

    #[test]
    fn test_png_signature() {
        let bytes = export_png(&sample_document(), &PngOptions::default()).unwrap();
        assert_eq!(&bytes[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_png_decodes_to_rendered_pixels() {
        let doc = sample_document();
        let options = PngOptions::default();
        let pixels = render_frame(&doc, &options).unwrap();
        let (info, decoded) = decode(&export_png(&doc, &options).unwrap());

        assert_eq!(info.width, 16);
        assert_eq!(info.height, 8);
        assert_eq!(info.color_type, ::png::ColorType::Rgba);
        assert_eq!(info.bit_depth, ::png::BitDepth::Eight);
        assert_eq!(decoded, pixels);
    }

    #[test]
    fn test_render_frame_border_and_fill() {
        let pixels = render_frame(&sample_document(), &PngOptions::default()).unwrap();
        assert_eq!(pixels.len(), 16 * 8 * 4);
        // Top-left pixel is border, centre is fill.
        assert_eq!(&pixels[..4], &[0, 0, 255, 255]);
        let centre = ((4 * 16 + 8) * 4) as usize;
        assert_eq!(&pixels[centre..centre + 4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_empty_document_is_render_error() {
        let err = export_png(&FrameDocument::new(0, 0), &PngOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            ExportError::Render(RenderError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_write_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        write_png(&sample_document(), &PngOptions::default(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let (info, _) = decode(&bytes);
        assert_eq!((info.width, info.height), (16, 8));
    }

    #[test]
    fn test_write_png_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("frame.png");
        let err = write_png(&sample_document(), &PngOptions::default(), &path).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }

    #[cfg(not(feature = "gpu"))]
    #[test]
    fn test_gpu_backend_unavailable() {
        let options = PngOptions::with_backend(Backend::Gpu);
        let err = render_frame(&sample_document(), &options).unwrap_err();
        assert!(matches!(
            err,
            ExportError::Render(RenderError::GpuInitFailed { .. })
        ));
    }
}
