use crate::domain::error::DomainError;
use crate::domain::raster::RasterImage;
use crate::domain::region::Region;
use image::ColorType;

// デコード済みの画像。行優先・上の行から順に、ネイティブエンディアンで保持する
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
    color: ColorType,
}

impl Image {
    pub fn new(width: u32, height: u32, color: ColorType, data: Vec<u8>) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::InvalidInput(format!(
                "image dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(color.bytes_per_pixel() as usize))
            .ok_or_else(|| DomainError::InvalidInput(format!("image {}x{} is too large", width, height)))?;
        if data.len() != expected {
            return Err(DomainError::InvalidInput(format!(
                "pixel buffer holds {} bytes, expected {} for {}x{} {:?}",
                data.len(),
                expected,
                width,
                height,
                color
            )));
        }

        Ok(Self {
            data,
            width,
            height,
            color,
        })
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.color.bytes_per_pixel() as usize
    }

    pub fn row_stride(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl RasterImage for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn color(&self) -> ColorType {
        self.color
    }

    fn rows(&self, region: &Region) -> &[u8] {
        let stride = self.row_stride();
        &self.data[region.start() as usize * stride..region.end() as usize * stride]
    }
}
