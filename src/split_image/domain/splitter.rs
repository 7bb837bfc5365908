use crate::domain::error::DomainError;
use crate::domain::image::Image;
use crate::domain::raster::RasterImage;
use crate::domain::region::Region;

#[derive(Clone, Debug, PartialEq)]
pub struct SplitResult {
    pub top: Image,
    pub bottom: Image,
}

impl SplitResult {
    pub fn midpoint(&self) -> u32 {
        self.top.height()
    }
}

// height / 2 の位置で上下に分割する。高さ2未満は DegenerateSplit
pub fn split<R: RasterImage + ?Sized>(image: &R) -> Result<SplitResult, DomainError> {
    let (top, bottom) = Region::halves(image.height())?;
    Ok(SplitResult {
        top: extract(image, &top)?,
        bottom: extract(image, &bottom)?,
    })
}

fn extract<R: RasterImage + ?Sized>(image: &R, region: &Region) -> Result<Image, DomainError> {
    Image::new(image.width(), region.rows(), image.color(), image.rows(region).to_vec())
}
