use crate::domain::image::Image as DomainImage;
use crate::domain::image_codec_trait::ImageCodec;
use crate::domain::raster::RasterImage;
use super::error::InfrastructureError;
use image::{ColorType, DynamicImage, ImageBuffer, ImageFormat as InnerImageFormat}; // imageクレートの型
use log::debug;
use std::io::Cursor;

pub struct DefaultImageCodec;

impl DefaultImageCodec {
    pub fn new() -> Self {
        Self
    }
}

impl ImageCodec for DefaultImageCodec {
    fn decode(
        &self,
        image_bytes: Vec<u8>,
        input_format_opt: Option<InnerImageFormat>,
    ) -> Result<DomainImage, InfrastructureError> {
        let reader = match input_format_opt {
            Some(format) => image::io::Reader::with_format(Cursor::new(image_bytes), format),
            None => image::io::Reader::new(Cursor::new(image_bytes)).with_guessed_format().map_err(InfrastructureError::IoError)?,
        };
        debug!("decoding image as {:?}", reader.format());
        let img = reader.decode().map_err(InfrastructureError::ImageLibError)?;

        let (width, height, color) = (img.width(), img.height(), img.color());
        // ピクセル変換はせず、デコードされた形式のまま保持する
        Ok(DomainImage::new(width, height, color, img.into_bytes())?)
    }

    fn encode(
        &self,
        image: &DomainImage,
        output_format: InnerImageFormat,
    ) -> Result<Vec<u8>, InfrastructureError> {
        let img = fit_for_format(to_dynamic(image)?, output_format);
        debug!(
            "encoding {}x{} {:?} as {:?}",
            img.width(),
            img.height(),
            img.color(),
            output_format
        );

        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, output_format).map_err(InfrastructureError::ImageLibError)?;
        Ok(buffer.into_inner())
    }
}

// 既定のクレート機能でエンコーダを持つフォーマット
pub fn can_encode(format: InnerImageFormat) -> bool {
    matches!(
        format,
        InnerImageFormat::Png
            | InnerImageFormat::Jpeg
            | InnerImageFormat::Gif
            | InnerImageFormat::Bmp
            | InnerImageFormat::Ico
            | InnerImageFormat::Tiff
            | InnerImageFormat::Tga
            | InnerImageFormat::Pnm
            | InnerImageFormat::Farbfeld
            | InnerImageFormat::OpenExr
    )
}

// 読めるが書けないフォーマット (HDR, DDS, WebP など) の代わりに使う形式
// 浮動小数点の画素は OpenEXR、それ以外は PNG
pub fn writable_equivalent(format: InnerImageFormat, float_pixels: bool) -> InnerImageFormat {
    if can_encode(format) {
        format
    } else if float_pixels {
        InnerImageFormat::OpenExr
    } else {
        InnerImageFormat::Png
    }
}

pub fn is_float(color: ColorType) -> bool {
    matches!(color, ColorType::Rgb32F | ColorType::Rgba32F)
}

// ドメイン画像のバイト列を image クレートの DynamicImage に戻す
fn to_dynamic(image: &DomainImage) -> Result<DynamicImage, InfrastructureError> {
    let (w, h) = (image.width(), image.height());
    let bytes = image.as_bytes();
    let img = match image.color() {
        ColorType::L8 => ImageBuffer::from_raw(w, h, bytes.to_vec()).map(DynamicImage::ImageLuma8),
        ColorType::La8 => ImageBuffer::from_raw(w, h, bytes.to_vec()).map(DynamicImage::ImageLumaA8),
        ColorType::Rgb8 => ImageBuffer::from_raw(w, h, bytes.to_vec()).map(DynamicImage::ImageRgb8),
        ColorType::Rgba8 => ImageBuffer::from_raw(w, h, bytes.to_vec()).map(DynamicImage::ImageRgba8),
        ColorType::L16 => ImageBuffer::from_raw(w, h, ne_u16(bytes)).map(DynamicImage::ImageLuma16),
        ColorType::La16 => ImageBuffer::from_raw(w, h, ne_u16(bytes)).map(DynamicImage::ImageLumaA16),
        ColorType::Rgb16 => ImageBuffer::from_raw(w, h, ne_u16(bytes)).map(DynamicImage::ImageRgb16),
        ColorType::Rgba16 => ImageBuffer::from_raw(w, h, ne_u16(bytes)).map(DynamicImage::ImageRgba16),
        ColorType::Rgb32F => ImageBuffer::from_raw(w, h, ne_f32(bytes)).map(DynamicImage::ImageRgb32F),
        ColorType::Rgba32F => ImageBuffer::from_raw(w, h, ne_f32(bytes)).map(DynamicImage::ImageRgba32F),
        other => return Err(InfrastructureError::UnsupportedColor(format!("{:?}", other))),
    };
    img.ok_or_else(|| {
        InfrastructureError::ImageProcessingError(format!(
            "pixel buffer does not fit a {}x{} {:?} image",
            w,
            h,
            image.color()
        ))
    })
}

// 出力フォーマットが扱えない色形式は、書き出せる最も近い形式に変換する
fn fit_for_format(img: DynamicImage, format: InnerImageFormat) -> DynamicImage {
    match (format, img.color()) {
        (InnerImageFormat::Jpeg, ColorType::L8 | ColorType::Rgb8) => img,
        (InnerImageFormat::Jpeg, ColorType::La8 | ColorType::L16 | ColorType::La16) => {
            DynamicImage::ImageLuma8(img.to_luma8())
        }
        (InnerImageFormat::Jpeg, _) => DynamicImage::ImageRgb8(img.to_rgb8()),
        (InnerImageFormat::Png, ColorType::Rgb32F) => DynamicImage::ImageRgb16(img.to_rgb16()),
        (InnerImageFormat::Png, ColorType::Rgba32F) => DynamicImage::ImageRgba16(img.to_rgba16()),
        (InnerImageFormat::OpenExr, color) if !is_float(color) => {
            if color.has_alpha() {
                DynamicImage::ImageRgba32F(img.to_rgba32f())
            } else {
                DynamicImage::ImageRgb32F(img.to_rgb32f())
            }
        }
        _ => img,
    }
}

fn ne_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|c| u16::from_ne_bytes([c[0], c[1]]))
        .collect()
}

fn ne_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
