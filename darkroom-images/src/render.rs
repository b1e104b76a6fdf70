//! Resize-to-fill rendering.

use bytes::Bytes;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader, imageops::FilterType};
use std::io::Cursor;

use crate::{ImageError, ImageResult};

/// Resize filter quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    /// Fastest, lowest quality.
    Nearest,
    /// Fast, decent quality.
    Triangle,
    /// Good balance.
    CatmullRom,
    /// Best quality, slowest.
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    fn to_filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// A rendered variant: re-encoded bytes plus the exact output dimensions.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Encoded image data.
    pub data: Bytes,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Format the output was encoded in (same as the source).
    pub format: ImageFormat,
}

/// Scale the source to fully cover `width x height`, center-crop to the
/// exact box, and re-encode in the source's own format.
pub fn render_fill(
    data: &Bytes,
    width: u32,
    height: u32,
    filter: ResizeFilter,
) -> ImageResult<Rendered> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }

    let (img, format) = load_image(data)?;
    let resized = img.resize_to_fill(width, height, filter.to_filter_type());
    let (out_width, out_height) = resized.dimensions();
    let encoded = encode_image(&resized, format)?;

    Ok(Rendered {
        data: encoded,
        width: out_width,
        height: out_height,
        format,
    })
}

/// Get image dimensions without fully decoding.
pub fn dimensions(data: &Bytes) -> ImageResult<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::Decode(format!("failed to detect format: {e}")))?;

    reader
        .into_dimensions()
        .map_err(|e| ImageError::Decode(format!("failed to get dimensions: {e}")))
}

/// Detect the image format.
pub fn detect_format(data: &Bytes) -> ImageResult<ImageFormat> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::Decode(format!("failed to detect format: {e}")))?;

    reader
        .format()
        .ok_or_else(|| ImageError::UnsupportedFormat("unknown image format".into()))
}

fn load_image(data: &Bytes) -> ImageResult<(DynamicImage, ImageFormat)> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ImageError::Decode(format!("failed to detect format: {e}")))?;

    let format = reader
        .format()
        .ok_or_else(|| ImageError::UnsupportedFormat("unknown image format".into()))?;

    let img = reader
        .decode()
        .map_err(|e| ImageError::Decode(e.to_string()))?;

    Ok((img, format))
}

fn encode_image(img: &DynamicImage, format: ImageFormat) -> ImageResult<Bytes> {
    let mut buffer = Vec::new();

    match format {
        ImageFormat::Jpeg => {
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, 85);
            img.write_with_encoder(encoder)
                .map_err(|e| ImageError::Encode(e.to_string()))?;
        }
        ImageFormat::Png
        | ImageFormat::Gif
        | ImageFormat::Bmp
        | ImageFormat::Tiff
        | ImageFormat::WebP => {
            img.write_to(&mut Cursor::new(&mut buffer), format)
                .map_err(|e| ImageError::Encode(e.to_string()))?;
        }
        other => return Err(ImageError::UnsupportedFormat(format!("{other:?}"))),
    }

    Ok(Bytes::from(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_fixture(width: u32, height: u32) -> Bytes {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        }));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        Bytes::from(buffer)
    }

    fn jpeg_fixture(width: u32, height: u32) -> Bytes {
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, _| {
            image::Rgb([200, 100, 50])
        }));
        let mut buffer = Vec::new();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, 90);
        img.write_with_encoder(encoder).unwrap();
        Bytes::from(buffer)
    }

    #[test]
    fn test_render_fill_exact_dimensions() {
        let source = png_fixture(64, 48);
        let rendered = render_fill(&source, 32, 32, ResizeFilter::default()).unwrap();

        assert_eq!((rendered.width, rendered.height), (32, 32));
        assert_eq!(rendered.format, ImageFormat::Png);
        assert_eq!(dimensions(&rendered.data).unwrap(), (32, 32));
    }

    #[test]
    fn test_render_fill_crops_instead_of_letterboxing() {
        // Wide source into a tall box: fill must crop, never pad.
        let source = png_fixture(200, 50);
        let rendered = render_fill(&source, 40, 80, ResizeFilter::Triangle).unwrap();
        assert_eq!((rendered.width, rendered.height), (40, 80));
    }

    #[test]
    fn test_render_fill_preserves_jpeg_format() {
        let source = jpeg_fixture(120, 90);
        let rendered = render_fill(&source, 100, 100, ResizeFilter::default()).unwrap();

        assert_eq!(rendered.format, ImageFormat::Jpeg);
        assert_eq!(detect_format(&rendered.data).unwrap(), ImageFormat::Jpeg);
        assert_eq!(dimensions(&rendered.data).unwrap(), (100, 100));
    }

    #[test]
    fn test_render_fill_rejects_zero_dimensions() {
        let source = png_fixture(10, 10);
        let err = render_fill(&source, 0, 100, ResizeFilter::default()).unwrap_err();
        assert!(matches!(
            err,
            ImageError::InvalidDimensions {
                width: 0,
                height: 100
            }
        ));
    }

    #[test]
    fn test_render_fill_rejects_garbage_bytes() {
        let garbage = Bytes::from_static(b"definitely not an image");
        assert!(render_fill(&garbage, 10, 10, ResizeFilter::default()).is_err());
    }

    #[test]
    fn test_dimensions_without_decode() {
        let source = png_fixture(77, 33);
        assert_eq!(dimensions(&source).unwrap(), (77, 33));
    }
}
