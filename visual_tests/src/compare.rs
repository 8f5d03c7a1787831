use crate::{Result, VisualTestError};
use image::{Rgba, RgbaImage};
use image_compare::Algorithm;
use std::path::Path;

/// Channel difference above which a pixel counts as changed
pub const PIXEL_TOLERANCE: u8 = 10;

/// Result of comparing two images
pub struct CompareResult {
    /// Similarity score from 0.0 to 1.0
    pub similarity: f64,
    /// Pixels whose largest channel difference exceeds [`PIXEL_TOLERANCE`]
    pub differing_pixels: usize,
}

/// Compare two rendered frames using SSIM
pub fn compare_images(reference: &RgbaImage, captured: &RgbaImage) -> Result<CompareResult> {
    if reference.dimensions() != captured.dimensions() {
        return Err(VisualTestError::Compare(format!(
            "Image dimensions don't match: reference {:?} vs captured {:?}",
            reference.dimensions(),
            captured.dimensions()
        )));
    }

    // SSIM works on grayscale or RGB
    let ref_rgb = image::DynamicImage::ImageRgba8(reference.clone()).to_rgb8();
    let cap_rgb = image::DynamicImage::ImageRgba8(captured.clone()).to_rgb8();

    let result =
        image_compare::rgb_similarity_structure(&Algorithm::MSSIMSimple, &ref_rgb, &cap_rgb)
            .map_err(|e| VisualTestError::Compare(format!("SSIM comparison failed: {}", e)))?;

    Ok(CompareResult {
        similarity: result.score,
        differing_pixels: count_differing_pixels(reference, captured),
    })
}

/// Load a reference PNG from disk
pub fn load_reference(path: &Path) -> Result<RgbaImage> {
    if !path.exists() {
        return Err(VisualTestError::ReferenceNotFound(path.to_path_buf()));
    }
    Ok(image::open(path)?.to_rgba8())
}

/// Write an image highlighting the differences between two frames
pub fn generate_diff_image(reference: &RgbaImage, captured: &RgbaImage, output: &Path) -> Result<()> {
    let (width, height) = reference.dimensions();
    let mut diff_img = RgbaImage::new(width, height);

    for (x, y, ref_pixel) in reference.enumerate_pixels() {
        let Some(cap_pixel) = captured.get_pixel_checked(x, y) else {
            diff_img.put_pixel(x, y, Rgba([255, 0, 255, 255]));
            continue;
        };

        let diff = pixel_difference(ref_pixel, cap_pixel);
        if diff > PIXEL_TOLERANCE {
            // Differences in red
            let intensity = (diff as f32 / 255.0 * 200.0 + 55.0) as u8;
            diff_img.put_pixel(x, y, Rgba([intensity, 0, 0, 255]));
        } else {
            // Everything else dimmed
            let r = (cap_pixel[0] as u16 / 3) as u8;
            let g = (cap_pixel[1] as u16 / 3) as u8;
            let b = (cap_pixel[2] as u16 / 3) as u8;
            diff_img.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }

    diff_img.save(output)?;
    Ok(())
}

/// Number of pixels that differ beyond [`PIXEL_TOLERANCE`]
pub fn count_differing_pixels(a: &RgbaImage, b: &RgbaImage) -> usize {
    a.enumerate_pixels()
        .filter(|(x, y, pixel)| match b.get_pixel_checked(*x, *y) {
            Some(other) => pixel_difference(pixel, other) > PIXEL_TOLERANCE,
            None => true,
        })
        .count()
}

/// Calculate the maximum channel difference between two pixels
fn pixel_difference(a: &Rgba<u8>, b: &Rgba<u8>) -> u8 {
    let dr = (a[0] as i16 - b[0] as i16).unsigned_abs() as u8;
    let dg = (a[1] as i16 - b[1] as i16).unsigned_abs() as u8;
    let db = (a[2] as i16 - b[2] as i16).unsigned_abs() as u8;
    dr.max(dg).max(db)
}
