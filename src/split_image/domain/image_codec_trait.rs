use crate::domain::image::Image as DomainImage;
use crate::infrastructure::error::InfrastructureError;
use image::ImageFormat as InnerImageFormat;

// バイト列とドメイン画像の相互変換。具体的な実装はインフラ層が持つ
#[cfg_attr(test, mockall::automock)]
pub trait ImageCodec {
    // `input_format_opt` が None の場合はバイト列から推測する
    fn decode(
        &self,
        image_bytes: Vec<u8>,
        input_format_opt: Option<InnerImageFormat>,
    ) -> Result<DomainImage, InfrastructureError>;

    fn encode(
        &self,
        image: &DomainImage,
        output_format: InnerImageFormat,
    ) -> Result<Vec<u8>, InfrastructureError>;
}
