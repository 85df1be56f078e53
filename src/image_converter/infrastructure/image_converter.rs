use crate::domain::image_converter_trait::ImageConverter;
use crate::domain::target_format::TargetFormat;
use super::error::ConversionError;
use image::{ColorType, DynamicImage, GenericImageView, ImageError, Rgb, RgbImage};
use std::io::Cursor;

/// 透過部分を合成する背景色 (白)
pub const FLATTEN_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Converts `source_bytes` to the format named by `target_format`
/// (`png`, `jpg`/`jpeg`, `gif`; case-insensitive).
///
/// The identifier is validated before any decoding happens.
pub fn convert(source_bytes: &[u8], target_format: &str) -> Result<Vec<u8>, ConversionError> {
    let target = TargetFormat::parse(target_format)
        .map_err(|_| ConversionError::UnsupportedFormat(target_format.trim().to_string()))?;
    convert_image(source_bytes, target)
}

/// Decode, flatten transparency onto white if the source has any, re-encode.
pub fn convert_image(source_bytes: &[u8], target: TargetFormat) -> Result<Vec<u8>, ConversionError> {
    let decoded = decode(source_bytes)?;

    // パレット画像の tRNS / GIF の透過色はデコード時に RGBA へ展開される
    let working = if decoded.color().has_alpha() {
        let (width, height) = decoded.dimensions();
        log::debug!("flattening {:?} {}x{} onto white", decoded.color(), width, height);
        DynamicImage::ImageRgb8(flatten_alpha(&decoded))
    } else {
        decoded
    };
    let working = fit_encoder_color_type(working, target);

    let mut buffer = Cursor::new(Vec::new());
    working
        .write_to(&mut buffer, target.image_format())
        .map_err(ConversionError::Encode)?;
    Ok(buffer.into_inner())
}

/// Reduces opaque color types the target encoder cannot take (16-bit and
/// float samples, gray for GIF) to 8 bits per channel.
fn fit_encoder_color_type(image: DynamicImage, target: TargetFormat) -> DynamicImage {
    let color = image.color();
    match target {
        TargetFormat::Png => match color {
            ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8
            | ColorType::L16 | ColorType::La16 | ColorType::Rgb16 | ColorType::Rgba16 => image,
            _ => DynamicImage::ImageRgb8(image.to_rgb8()),
        },
        TargetFormat::Jpeg => match color {
            ColorType::L8 | ColorType::Rgb8 => image,
            ColorType::L16 => DynamicImage::ImageLuma8(image.to_luma8()),
            _ => DynamicImage::ImageRgb8(image.to_rgb8()),
        },
        // GIF エンコーダは Rgb8 / Rgba8 のみ
        TargetFormat::Gif => match color {
            ColorType::Rgb8 => image,
            _ => DynamicImage::ImageRgb8(image.to_rgb8()),
        },
    }
}

fn decode(source_bytes: &[u8]) -> Result<DynamicImage, ConversionError> {
    let reader = image::io::Reader::new(Cursor::new(source_bytes))
        .with_guessed_format()
        .map_err(|e| ConversionError::Decode(ImageError::IoError(e)))?;
    reader.decode().map_err(ConversionError::Decode)
}

/// Composites `image` over an opaque white canvas of the same size, using
/// the image's own alpha as the mask.
pub fn flatten_alpha(image: &DynamicImage) -> RgbImage {
    let rgba = image.to_rgba8();
    let mut canvas = RgbImage::from_pixel(rgba.width(), rgba.height(), FLATTEN_BACKGROUND);

    for (dst, src) in canvas.pixels_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        let [bg_r, bg_g, bg_b] = FLATTEN_BACKGROUND.0;
        *dst = Rgb([blend(r, bg_r, a), blend(g, bg_g, a), blend(b, bg_b, a)]);
    }
    canvas
}

fn blend(fg: u8, bg: u8, alpha: u8) -> u8 {
    let a = alpha as u16;
    ((fg as u16 * a + bg as u16 * (255 - a) + 127) / 255) as u8
}

pub struct DefaultImageConverter;

impl DefaultImageConverter {
    pub fn new() -> Self {
        Self
    }
}

impl ImageConverter for DefaultImageConverter {
    fn convert(
        &self,
        source_bytes: &[u8],
        target_format: TargetFormat,
    ) -> Result<Vec<u8>, ConversionError> {
        convert_image(source_bytes, target_format)
    }
}
