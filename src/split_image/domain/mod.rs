pub mod error;
pub mod image;
pub mod image_codec_trait;
pub mod raster;
pub mod region;
pub mod splitter;
