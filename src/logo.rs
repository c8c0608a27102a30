use image::{imageops, DynamicImage, ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Site background `#0a0a0f` the logo is rendered against.
pub const LOGO_BACKGROUND: Rgb<u8> = Rgb([10, 10, 15]);
pub const BACKGROUND_TOLERANCE: u8 = 10;
pub const CROP_MARGIN: u32 = 2;
pub const PADDING_FRACTION: f64 = 0.15;
pub const DEFAULT_LOGO_PATH: &str = "public/logo.png";

#[derive(Error, Debug)]
pub enum LogoError {
    #[error("Logo not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Inclusive pixel extent of everything that is not background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

/// Region handed to the cropper, `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Grows the box by `margin` and clamps it to a `width` x `height` image.
    ///
    /// The right and bottom edges are exclusive, so `max + margin` lands one
    /// pixel short of a symmetric margin on those sides.
    pub fn with_margin(&self, margin: u32, width: u32, height: u32) -> CropRect {
        let left = self.min_x.saturating_sub(margin);
        let top = self.min_y.saturating_sub(margin);
        let right = (self.max_x + margin).min(width);
        let bottom = (self.max_y + margin).min(height);

        CropRect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    #[cfg(test)]
    fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}

pub fn is_content(pixel: &Rgba<u8>, background: Rgb<u8>, tolerance: u8) -> bool {
    pixel.0[..3]
        .iter()
        .zip(background.0.iter())
        .any(|(&channel, &bg)| channel.abs_diff(bg) > tolerance)
}

/// Single pass over every pixel. Returns `None` when the whole image is background.
pub fn find_content_bounds(
    img: &RgbaImage,
    background: Rgb<u8>,
    tolerance: u8,
) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if !is_content(pixel, background, tolerance) {
            continue;
        }

        bounds = Some(match bounds {
            None => BoundingBox {
                min_x: x,
                min_y: y,
                max_x: x,
                max_y: y,
            },
            Some(b) => BoundingBox {
                min_x: b.min_x.min(x),
                min_y: b.min_y.min(y),
                max_x: b.max_x.max(x),
                max_y: b.max_y.max(y),
            },
        });
    }

    bounds
}

#[derive(Debug)]
pub enum CropOutcome {
    Cropped { image: RgbaImage, rect: CropRect },
    NoContent,
}

pub fn crop_to_content(
    img: &DynamicImage,
    background: Rgb<u8>,
    tolerance: u8,
    margin: u32,
) -> CropOutcome {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let Some(bounds) = find_content_bounds(&rgba, background, tolerance) else {
        return CropOutcome::NoContent;
    };
    debug!("content bounds {:?} in {}x{} image", bounds, width, height);

    let rect = bounds.with_margin(margin, width, height);
    let image = imageops::crop_imm(&rgba, rect.x, rect.y, rect.width, rect.height).to_image();

    CropOutcome::Cropped { image, rect }
}

#[derive(Debug)]
pub struct Padded {
    pub image: RgbImage,
    pub padding: u32,
}

/// Adds `floor(height * fraction)` rows of background above and below the image.
pub fn pad_vertical(img: &DynamicImage, fraction: f64, background: Rgb<u8>) -> Padded {
    let (width, height) = (img.width(), img.height());
    let padding = (height as f64 * fraction) as u32;
    let new_height = height + padding * 2;

    let mut canvas: RgbImage = ImageBuffer::from_pixel(width, new_height, background);

    // Alpha is dropped rather than blended
    let source = img.to_rgb8();
    imageops::replace(&mut canvas, &source, 0, padding as i64);

    Padded {
        image: canvas,
        padding,
    }
}

pub fn load_logo(path: &Path) -> Result<DynamicImage, LogoError> {
    if !path.exists() {
        return Err(LogoError::NotFound(path.to_path_buf()));
    }

    let img = image::open(path)?;
    debug!("loaded {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img)
}

pub fn save_logo(img: DynamicImage, path: &Path) -> Result<(), LogoError> {
    img.save(path)?;
    Ok(())
}
