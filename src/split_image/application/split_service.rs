use std::path::{Path, PathBuf};
use std::sync::Arc;
use super::error::ApplicationError;
use super::split_job::SplitJob;
use image::ImageFormat as InnerImageFormat;
use log::{debug, info};
use serde::Serialize;

use crate::domain::image::Image as DomainImage;
use crate::domain::image_codec_trait::ImageCodec;
use crate::domain::raster::RasterImage;
use crate::domain::splitter;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::file_storage::LocalFileStorage;
use crate::infrastructure::image_codec::{can_encode, is_float, writable_equivalent};
use image::ColorType;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HalfReport {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitOutcome {
    pub source_width: u32,
    pub source_height: u32,
    pub top: HalfReport,
    pub bottom: HalfReport,
}

pub struct SplitService {
    codec: Arc<dyn ImageCodec + Send + Sync>, // トレイトオブジェクトとして保持
    storage: Arc<LocalFileStorage>,
}

impl SplitService {
    pub fn new(codec: Arc<dyn ImageCodec + Send + Sync>, storage: Arc<LocalFileStorage>) -> Self {
        Self { codec, storage }
    }

    // 両方のエンコードが終わるまで何も書き込まない
    pub async fn split_file(&self, job: &SplitJob) -> Result<SplitOutcome, ApplicationError> {
        info!("splitting {}", job.input.display());

        let image_bytes = self.storage.read_image(&job.input).await.map_err(|e| match e {
            InfrastructureError::NotFound(path) => ApplicationError::FileNotFound(path),
            other => ApplicationError::InfrastructureError(other),
        })?;

        // 中身から判定し、マジックバイトのない形式 (TGA など) は拡張子で判定する
        let detected_format = image::guess_format(&image_bytes)
            .ok()
            .or_else(|| InnerImageFormat::from_path(&job.input).ok());
        let source = self
            .codec
            .decode(image_bytes, detected_format)
            .map_err(|source| ApplicationError::Decode {
                path: job.input.clone(),
                source,
            })?;
        debug!(
            "decoded {}x{} {:?} ({:?})",
            source.width(),
            source.height(),
            source.color(),
            detected_format
        );

        let halves = splitter::split(&source)?;
        let (source_width, source_height, color) = (source.width(), source.height(), source.color());
        drop(source);
        debug!("cut at row {}", halves.midpoint());

        let top_format = resolve_format(&job.output_top, detected_format, color)?;
        let bottom_format = resolve_format(&job.output_bottom, detected_format, color)?;
        let top_bytes = self.encode_half(&halves.top, top_format, "top")?;
        let bottom_bytes = self.encode_half(&halves.bottom, bottom_format, "bottom")?;

        // 上下は独立しているので並行に書き込む
        tokio::try_join!(
            self.write_half(&job.output_top, &top_bytes),
            self.write_half(&job.output_bottom, &bottom_bytes),
        )?;

        info!(
            "wrote {} and {}",
            job.output_top.display(),
            job.output_bottom.display()
        );

        Ok(SplitOutcome {
            source_width,
            source_height,
            top: HalfReport {
                path: job.output_top.clone(),
                width: halves.top.width(),
                height: halves.top.height(),
            },
            bottom: HalfReport {
                path: job.output_bottom.clone(),
                width: halves.bottom.width(),
                height: halves.bottom.height(),
            },
        })
    }

    fn encode_half(
        &self,
        half: &DomainImage,
        format: InnerImageFormat,
        name: &'static str,
    ) -> Result<Vec<u8>, ApplicationError> {
        self.codec
            .encode(half, format)
            .map_err(|source| ApplicationError::Encode { half: name, source })
    }

    async fn write_half(&self, path: &Path, data: &[u8]) -> Result<(), ApplicationError> {
        self.storage
            .save_image(path, data)
            .await
            .map_err(|source| ApplicationError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}

// 出力パスの拡張子 → 入力のフォーマット (書き出せなければ同等の形式) の順に決める
fn resolve_format(
    output: &Path,
    source_format: Option<InnerImageFormat>,
    color: ColorType,
) -> Result<InnerImageFormat, ApplicationError> {
    if let Ok(format) = InnerImageFormat::from_path(output) {
        if !can_encode(format) {
            return Err(ApplicationError::InvalidJob(format!(
                "{:?} cannot be written to {}",
                format,
                output.display()
            )));
        }
        return Ok(format);
    }
    source_format
        .map(|format| writable_equivalent(format, is_float(color)))
        .ok_or_else(|| {
            ApplicationError::InvalidJob(format!(
                "cannot determine an image format for {}",
                output.display()
            ))
        })
}
