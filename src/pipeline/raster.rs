//! Image re-encoding using the `image` crate

use std::path::Path;

use image::{imageops, DynamicImage, ImageFormat, Rgba, RgbaImage};

use super::error::Result;
use super::registry::Format;

/// Encoder format for an image target
pub fn encoder_format(target: Format) -> Option<ImageFormat> {
    match target {
        Format::Png => Some(ImageFormat::Png),
        Format::Jpg | Format::Jpeg => Some(ImageFormat::Jpeg),
        Format::Bmp => Some(ImageFormat::Bmp),
        Format::Gif => Some(ImageFormat::Gif),
        _ => None,
    }
}

/// Whether the target encoder keeps an alpha channel
pub fn supports_alpha(format: ImageFormat) -> bool {
    !matches!(format, ImageFormat::Jpeg)
}

/// Open an image, adapt it to the target encoder and save it
pub fn reencode_image(input: &Path, output: &Path, format: ImageFormat) -> Result<()> {
    let img = image::open(input)?;
    log::debug!(
        "Decoded {} ({}x{}, {:?})",
        input.display(),
        img.width(),
        img.height(),
        img.color()
    );

    let prepared = prepare_for_encoder(img, format);
    prepared.save_with_format(output, format)?;
    Ok(())
}

/// Convert the pixel layout into one the target encoder accepts.
///
/// Images with an alpha channel headed for an encoder without alpha are
/// composited onto white rather than having the channel dropped.
pub fn prepare_for_encoder(img: DynamicImage, format: ImageFormat) -> DynamicImage {
    let has_alpha = img.color().has_alpha();

    if !supports_alpha(format) {
        return if has_alpha {
            log::info!("Flattening transparent image onto white background");
            DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(flatten_onto_white(&img)).to_rgb8())
        } else {
            DynamicImage::ImageRgb8(img.to_rgb8())
        };
    }

    match format {
        // The GIF encoder only takes 8-bit RGBA frames
        ImageFormat::Gif => DynamicImage::ImageRgba8(img.to_rgba8()),
        ImageFormat::Bmp if has_alpha => DynamicImage::ImageRgba8(img.to_rgba8()),
        ImageFormat::Bmp => DynamicImage::ImageRgb8(img.to_rgb8()),
        _ => match img {
            DynamicImage::ImageRgb32F(_) => DynamicImage::ImageRgb16(img.to_rgb16()),
            DynamicImage::ImageRgba32F(_) => DynamicImage::ImageRgba16(img.to_rgba16()),
            other => other,
        },
    }
}

/// Composite an image over an opaque white canvas
pub fn flatten_onto_white(img: &DynamicImage) -> RgbaImage {
    let top = img.to_rgba8();
    let mut canvas = RgbaImage::from_pixel(top.width(), top.height(), Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &top, 0, 0);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, GenericImageView};

    #[test]
    fn test_encoder_format_mapping() {
        assert_eq!(encoder_format(Format::Jpg), Some(ImageFormat::Jpeg));
        assert_eq!(encoder_format(Format::Jpeg), Some(ImageFormat::Jpeg));
        assert_eq!(encoder_format(Format::Gif), Some(ImageFormat::Gif));
        assert_eq!(encoder_format(Format::Csv), None);
    }

    #[test]
    fn test_flatten_transparent_pixel_becomes_white() {
        let mut rgba = RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, Rgba([200, 10, 10, 0]));
        rgba.put_pixel(1, 0, Rgba([200, 10, 10, 255]));

        let flat = flatten_onto_white(&DynamicImage::ImageRgba8(rgba));

        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [200, 10, 10, 255]);
    }

    #[test]
    fn test_prepare_for_jpeg_drops_alpha_channel() {
        let rgba = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 0, 128]));
        let prepared = prepare_for_encoder(DynamicImage::ImageRgba8(rgba), ImageFormat::Jpeg);

        assert_eq!(prepared.color(), ColorType::Rgb8);
        let px = prepared.get_pixel(1, 1);
        // Half-transparent black over white lands mid-grey
        assert!(px.0[0] > 100 && px.0[0] < 155, "unexpected pixel {:?}", px);
    }

    #[test]
    fn test_prepare_for_png_keeps_alpha() {
        let rgba = RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 4]));
        let prepared = prepare_for_encoder(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);
        assert_eq!(prepared.color(), ColorType::Rgba8);
    }
}
