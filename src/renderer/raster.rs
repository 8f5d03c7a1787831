//! Software rasterization of a display list into an RGBA image.
//!
//! Shapes are sampled once per pixel centre and alpha-blended in recording
//! order. Text commands are skipped. Good enough for snapshots and visual
//! regression tests, not meant for on-screen presentation.

use std::path::Path;

use image::{Rgba, RgbaImage};

use super::{DrawCommand, DrawItem, PaintContext};
use crate::widgets::Color;
use crate::Result;

/// Rasterize every item of `ctx` onto a fresh `width` x `height` image
pub fn rasterize(ctx: &PaintContext, width: u32, height: u32, background: Color) -> RgbaImage {
    let mut image = RgbaImage::from_pixel(width, height, to_rgba(background));
    for item in ctx.items() {
        fill_item(&mut image, item);
    }
    image
}

/// Rasterize and write a PNG
pub fn save_png(
    ctx: &PaintContext,
    width: u32,
    height: u32,
    background: Color,
    path: &Path,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    rasterize(ctx, width, height, background).save(path)?;
    Ok(())
}

fn fill_item(image: &mut RgbaImage, item: &DrawItem) {
    if matches!(item.command, DrawCommand::Text { .. }) {
        return;
    }

    let bounds = item.screen_bounds();
    let (width, height) = image.dimensions();
    let x0 = bounds.x.floor().max(0.0) as u32;
    let y0 = bounds.y.floor().max(0.0) as u32;
    let x1 = (bounds.right().ceil().max(0.0) as u32).min(width);
    let y1 = (bounds.bottom().ceil().max(0.0) as u32).min(height);

    let color = item.command.color();
    for py in y0..y1 {
        for px in x0..x1 {
            if item.hit(px as f32 + 0.5, py as f32 + 0.5) {
                blend(image.get_pixel_mut(px, py), color);
            }
        }
    }
}

fn blend(dst: &mut Rgba<u8>, src: Color) {
    let alpha = src.a.clamp(0.0, 1.0);
    let mix = |d: u8, s: f32| -> u8 {
        let d = d as f32 / 255.0;
        ((s.clamp(0.0, 1.0) * alpha + d * (1.0 - alpha)) * 255.0).round() as u8
    };
    dst.0[0] = mix(dst.0[0], src.r);
    dst.0[1] = mix(dst.0[1], src.g);
    dst.0[2] = mix(dst.0[2], src.b);
    let dst_alpha = dst.0[3] as f32 / 255.0;
    dst.0[3] = ((alpha + dst_alpha * (1.0 - alpha)) * 255.0).round() as u8;
}

fn to_rgba(color: Color) -> Rgba<u8> {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    ])
}
