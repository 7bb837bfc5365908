use crate::domain::region::Region;
use image::ColorType;

// 分割処理が画像に求める最小限の読み取り機能
pub trait RasterImage {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn color(&self) -> ColorType;

    fn rows(&self, region: &Region) -> &[u8];
}
