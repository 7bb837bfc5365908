use super::error::ApplicationError;
use crate::infrastructure::image_codec::{can_encode, writable_equivalent};
use image::ImageFormat as InnerImageFormat;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct SplitJob {
    pub input: PathBuf,
    pub output_top: PathBuf,
    pub output_bottom: PathBuf,
}

impl SplitJob {
    // 出力を省略した場合は入力と同じ場所に <stem>_top.<ext> / <stem>_bottom.<ext>
    pub fn new(
        input: PathBuf,
        output_top: Option<PathBuf>,
        output_bottom: Option<PathBuf>,
    ) -> Result<Self, ApplicationError> {
        let output_top = output_top.unwrap_or_else(|| derive_output(&input, "top"));
        let output_bottom = output_bottom.unwrap_or_else(|| derive_output(&input, "bottom"));

        for output in [&output_top, &output_bottom] {
            if let Ok(format) = InnerImageFormat::from_path(output) {
                if !can_encode(format) {
                    return Err(ApplicationError::InvalidJob(format!(
                        "{:?} cannot be written, choose another extension for {}",
                        format,
                        output.display()
                    )));
                }
            }
        }

        let (input_key, top_key, bottom_key) =
            (normalize(&input), normalize(&output_top), normalize(&output_bottom));
        if top_key == input_key || bottom_key == input_key {
            return Err(ApplicationError::InvalidJob(format!(
                "output would overwrite the input {}",
                input.display()
            )));
        }
        if top_key == bottom_key {
            return Err(ApplicationError::InvalidJob(format!(
                "top and bottom halves share the output path {}",
                output_top.display()
            )));
        }

        Ok(Self {
            input,
            output_top,
            output_bottom,
        })
    }
}

fn derive_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let mut name = format!("{}_{}", stem, suffix);
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&output_extension(input, &ext.to_string_lossy()));
    }
    input.with_file_name(name)
}

// 入力が書き出せない形式なら、同等の書き出せる形式の拡張子にする
fn output_extension(input: &Path, ext: &str) -> String {
    match InnerImageFormat::from_path(input) {
        Ok(format) if !can_encode(format) => {
            let target = writable_equivalent(format, format == InnerImageFormat::Hdr);
            target
                .extensions_str()
                .first()
                .map(|e| e.to_string())
                .unwrap_or_else(|| ext.to_string())
        }
        _ => ext.to_string(),
    }
}

// "./in.png" と "in.png" のような表記揺れを吸収して比較する
fn normalize(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => match parent.canonicalize() {
            Ok(parent) => parent.join(name),
            Err(_) => absolute.components().collect(),
        },
        _ => absolute.components().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_input_name() {
        let job = SplitJob::new(PathBuf::from("pano/HW_360_VR.jpg"), None, None).unwrap();
        assert_eq!(job.output_top, PathBuf::from("pano/HW_360_VR_top.jpg"));
        assert_eq!(job.output_bottom, PathBuf::from("pano/HW_360_VR_bottom.jpg"));
    }

    #[test]
    fn test_defaults_without_extension() {
        let job = SplitJob::new(PathBuf::from("frame"), None, None).unwrap();
        assert_eq!(job.output_top, PathBuf::from("frame_top"));
        assert_eq!(job.output_bottom, PathBuf::from("frame_bottom"));
    }

    #[test]
    fn test_explicit_outputs_are_kept() {
        let job = SplitJob::new(
            PathBuf::from("in.png"),
            Some(PathBuf::from("out/a.png")),
            None,
        )
        .unwrap();
        assert_eq!(job.output_top, PathBuf::from("out/a.png"));
        assert_eq!(job.output_bottom, PathBuf::from("in_bottom.png"));
    }

    #[test]
    fn test_rejects_overwriting_input() {
        let result = SplitJob::new(PathBuf::from("in.png"), Some(PathBuf::from("in.png")), None);
        assert!(matches!(result, Err(ApplicationError::InvalidJob(_))));
    }

    #[test]
    fn test_rejects_overwriting_input_through_dot_prefix() {
        let result = SplitJob::new(PathBuf::from("in.png"), Some(PathBuf::from("./in.png")), None);
        assert!(matches!(result, Err(ApplicationError::InvalidJob(_))));

        let result = SplitJob::new(PathBuf::from("./in.png"), None, Some(PathBuf::from("in.png")));
        assert!(matches!(result, Err(ApplicationError::InvalidJob(_))));
    }

    #[test]
    fn test_rejects_overwriting_input_through_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let input = dir.path().join("in.png");
        let sneaky = dir.path().join("sub").join("..").join("in.png");

        let result = SplitJob::new(input, Some(sneaky), None);
        assert!(matches!(result, Err(ApplicationError::InvalidJob(_))));
    }

    #[test]
    fn test_unwritable_input_format_gets_writable_defaults() {
        let job = SplitJob::new(PathBuf::from("pano.hdr"), None, None).unwrap();
        assert_eq!(job.output_top, PathBuf::from("pano_top.exr"));
        assert_eq!(job.output_bottom, PathBuf::from("pano_bottom.exr"));

        let job = SplitJob::new(PathBuf::from("tex.dds"), None, None).unwrap();
        assert_eq!(job.output_top, PathBuf::from("tex_top.png"));

        let job = SplitJob::new(PathBuf::from("photo.webp"), None, None).unwrap();
        assert_eq!(job.output_bottom, PathBuf::from("photo_bottom.png"));
    }

    #[test]
    fn test_rejects_unwritable_explicit_output() {
        let result = SplitJob::new(PathBuf::from("in.png"), Some(PathBuf::from("top.hdr")), None);
        assert!(matches!(result, Err(ApplicationError::InvalidJob(_))));
    }

    #[test]
    fn test_rejects_shared_output() {
        let result = SplitJob::new(
            PathBuf::from("in.png"),
            Some(PathBuf::from("half.png")),
            Some(PathBuf::from("half.png")),
        );
        assert!(matches!(result, Err(ApplicationError::InvalidJob(_))));
    }
}
