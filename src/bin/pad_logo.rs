use brand_tools::logo::{self, LogoError, DEFAULT_LOGO_PATH, LOGO_BACKGROUND, PADDING_FRACTION};
use image::DynamicImage;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let path = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_LOGO_PATH.to_string()),
    );

    // Load original image
    let img = match logo::load_logo(&path) {
        Ok(img) => img,
        Err(LogoError::NotFound(_)) => {
            println!("Logo not found");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    // Background-filled canvas, original pasted at the left edge
    let padded = logo::pad_vertical(&img, PADDING_FRACTION, LOGO_BACKGROUND);

    // Save back over the source
    logo::save_logo(DynamicImage::ImageRgb8(padded.image), &path)?;
    println!(
        "Logo fixed with {}px padding top and bottom.",
        padded.padding
    );
    Ok(())
}
