use brand_tools::logo::{
    self, CropOutcome, LogoError, BACKGROUND_TOLERANCE, CROP_MARGIN, DEFAULT_LOGO_PATH,
    LOGO_BACKGROUND,
};
use image::DynamicImage;
use log::debug;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_LOGO_PATH.to_string()),
    );

    let img = match logo::load_logo(&path) {
        Ok(img) => img,
        Err(LogoError::NotFound(p)) => {
            println!("Logo not found: {}", p.display());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    match logo::crop_to_content(&img, LOGO_BACKGROUND, BACKGROUND_TOLERANCE, CROP_MARGIN) {
        CropOutcome::NoContent => {
            println!("No content found");
        }
        CropOutcome::Cropped { image, rect } => {
            debug!(
                "cropping {}x{} to {}x{} at ({}, {})",
                img.width(),
                img.height(),
                rect.width,
                rect.height,
                rect.x,
                rect.y
            );
            logo::save_logo(DynamicImage::ImageRgba8(image), &path)?;
            println!("Logo cropped to content.");
        }
    }

    Ok(())
}
