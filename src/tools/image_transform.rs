use crate::config::{Color, PixelFormat, ProcessingOptions, Size, ThumbnailQualitySettings};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use log::debug;

/// 縮放濾鏡
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleFilter {
    Fast,
    Smooth,
}

impl ScaleFilter {
    #[must_use]
    pub fn from_settings(quality: &ThumbnailQualitySettings) -> Self {
        if quality.smooth_scaling {
            Self::Smooth
        } else {
            Self::Fast
        }
    }

    fn filter_type(self) -> FilterType {
        match self {
            Self::Fast => FilterType::Nearest,
            Self::Smooth => FilterType::Lanczos3,
        }
    }
}

/// 長寬比處理模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectMode {
    Keep,
    Ignore,
}

impl AspectMode {
    #[must_use]
    pub fn from_settings(quality: &ThumbnailQualitySettings) -> Self {
        if quality.keep_aspect_ratio {
            Self::Keep
        } else {
            Self::Ignore
        }
    }
}

pub(crate) fn color_pixel(color: Color) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// 套用影格處理選項
///
/// 縮放以平滑濾鏡保持長寬比；不支援的目標格式忽略不處理
#[must_use]
pub fn apply_processing(image: DynamicImage, options: &ProcessingOptions) -> DynamicImage {
    let mut processed = image;

    if options.scale_factor > 0.0 && (options.scale_factor - 1.0).abs() > f64::EPSILON {
        let width = (f64::from(processed.width()) * options.scale_factor)
            .round()
            .max(1.0) as u32;
        let height = (f64::from(processed.height()) * options.scale_factor)
            .round()
            .max(1.0) as u32;
        processed = processed.resize_exact(width, height, FilterType::Lanczos3);
    }

    if let Some(format) = options.target_format {
        processed = match format {
            PixelFormat::Rgba8 => DynamicImage::ImageRgba8(processed.to_rgba8()),
            PixelFormat::Rgb8 => DynamicImage::ImageRgb8(processed.to_rgb8()),
            PixelFormat::Luma8 => DynamicImage::ImageLuma8(processed.to_luma8()),
            other => {
                debug!("忽略不支援的目標像素格式: {other:?}");
                processed
            }
        };
    }

    processed
}

/// 將影像縮放到目標尺寸
///
/// `Keep` 模式在目標範圍內等比縮放，結果可能小於目標尺寸；
/// `Ignore` 模式直接拉伸為目標尺寸
#[must_use]
pub fn scale_to(source: &RgbaImage, target: Size, aspect: AspectMode, filter: ScaleFilter) -> RgbaImage {
    let (width, height) = match aspect {
        AspectMode::Ignore => (target.width, target.height),
        AspectMode::Keep => fit_within(source.width(), source.height(), target),
    };

    imageops::resize(source, width.max(1), height.max(1), filter.filter_type())
}

fn fit_within(width: u32, height: u32, target: Size) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (target.width, target.height);
    }

    let scale_x = f64::from(target.width) / f64::from(width);
    let scale_y = f64::from(target.height) / f64::from(height);
    let scale = scale_x.min(scale_y);

    (
        (f64::from(width) * scale).round().max(1.0) as u32,
        (f64::from(height) * scale).round().max(1.0) as u32,
    )
}

/// 將縮放後的影像置中合成到指定尺寸的純色背景上
/// （letterbox / pillarbox 填充）
#[must_use]
pub fn add_background(scaled: &RgbaImage, target: Size, color: Color) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(target.width, target.height, color_pixel(color));

    let x = (i64::from(target.width) - i64::from(scaled.width())) / 2;
    let y = (i64::from(target.height) - i64::from(scaled.height())) / 2;
    imageops::overlay(&mut canvas, scaled, x.max(0), y.max(0));

    canvas
}

/// 在影像邊界內側畫出指定寬度的邊框
pub fn add_border(image: &mut RgbaImage, width: u32, color: Color) {
    let (image_width, image_height) = image.dimensions();
    if width == 0 || image_width == 0 || image_height == 0 {
        return;
    }

    let band = width.min(image_width).min(image_height);
    let pixel = color_pixel(color);

    for y in 0..image_height {
        for x in 0..image_width {
            let on_border = x < band
                || y < band
                || x >= image_width - band
                || y >= image_height - band;
            if on_border {
                image.put_pixel(x, y, pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: Color) -> RgbaImage {
        RgbaImage::from_pixel(width, height, color_pixel(color))
    }

    #[test]
    fn test_scale_keep_aspect_fits_within_target() {
        let source = solid(400, 200, Color::WHITE);
        let scaled = scale_to(&source, Size::new(100, 100), AspectMode::Keep, ScaleFilter::Fast);

        assert_eq!(scaled.dimensions(), (100, 50));
    }

    #[test]
    fn test_scale_ignore_aspect_is_exact() {
        let source = solid(400, 200, Color::WHITE);
        let scaled = scale_to(
            &source,
            Size::new(100, 100),
            AspectMode::Ignore,
            ScaleFilter::Smooth,
        );

        assert_eq!(scaled.dimensions(), (100, 100));
    }

    #[test]
    fn test_background_pads_to_target_size() {
        let scaled = solid(100, 50, Color::WHITE);
        let composited = add_background(&scaled, Size::new(100, 100), Color::BLACK);

        assert_eq!(composited.dimensions(), (100, 100));
        // 上下留白應為背景色，中央為原影像
        assert_eq!(*composited.get_pixel(50, 5), color_pixel(Color::BLACK));
        assert_eq!(*composited.get_pixel(50, 50), color_pixel(Color::WHITE));
        assert_eq!(*composited.get_pixel(50, 95), color_pixel(Color::BLACK));
    }

    #[test]
    fn test_border_is_inset_within_bounds() {
        let mut image = solid(40, 30, Color::WHITE);
        add_border(&mut image, 3, Color::BLACK);

        assert_eq!(image.dimensions(), (40, 30));
        assert_eq!(*image.get_pixel(0, 0), color_pixel(Color::BLACK));
        assert_eq!(*image.get_pixel(39, 29), color_pixel(Color::BLACK));
        assert_eq!(*image.get_pixel(2, 15), color_pixel(Color::BLACK));
        assert_eq!(*image.get_pixel(3, 15), color_pixel(Color::WHITE));
        assert_eq!(*image.get_pixel(20, 15), color_pixel(Color::WHITE));
    }

    #[test]
    fn test_processing_scale_factor() {
        let image = DynamicImage::ImageRgba8(solid(100, 80, Color::WHITE));
        let options = ProcessingOptions {
            scale_factor: 0.5,
            target_format: None,
        };

        let processed = apply_processing(image, &options);
        assert_eq!((processed.width(), processed.height()), (50, 40));
    }

    #[test]
    fn test_processing_default_is_identity() {
        let image = DynamicImage::ImageRgba8(solid(100, 80, Color::WHITE));
        let processed = apply_processing(image, &ProcessingOptions::default());

        assert_eq!((processed.width(), processed.height()), (100, 80));
    }

    #[test]
    fn test_unsupported_target_format_is_ignored() {
        let image = DynamicImage::ImageRgba8(solid(10, 10, Color::WHITE));
        let options = ProcessingOptions {
            scale_factor: 1.0,
            target_format: Some(PixelFormat::Nv12),
        };

        let processed = apply_processing(image, &options);
        assert!(matches!(processed, DynamicImage::ImageRgba8(_)));
    }

    #[test]
    fn test_luma_conversion_applies() {
        let image = DynamicImage::ImageRgba8(solid(10, 10, Color::WHITE));
        let options = ProcessingOptions {
            scale_factor: 1.0,
            target_format: Some(PixelFormat::Luma8),
        };

        let processed = apply_processing(image, &options);
        assert!(matches!(processed, DynamicImage::ImageLuma8(_)));
    }
}
