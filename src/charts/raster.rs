//! Raster Renderer Module
//! Draws a [`Figure`] into an RGB bitmap with plotters and encodes it as PNG.

use crate::charts::figure::{Figure, HAlign, Mark, Rgb, VAlign, WHITE};
use image::RgbImage;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use thiserror::Error;

const POINTS_PER_INCH: f64 = 72.0;
const METERS_PER_INCH: f64 = 0.0254;
const FONT_FAMILY: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RasterError {
    #[error("{0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Pixel size of the figure at `dpi`.
pub fn pixel_size(figure: &Figure, dpi: u32) -> (u32, u32) {
    let scale = f64::from(dpi) / POINTS_PER_INCH;
    (
        (figure.width_pt * scale).round() as u32,
        (figure.height_pt * scale).round() as u32,
    )
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// PNG resolution unit: pixels per meter at `dpi`.
pub fn pixels_per_meter(dpi: u32) -> u32 {
    (f64::from(dpi) / METERS_PER_INCH).round() as u32
}

/// Render `figure` at `dpi` and return the PNG bytes.
pub fn render_png(figure: &Figure, dpi: u32) -> Result<Vec<u8>, RasterError> {
    let (width, height) = pixel_size(figure, dpi);
    let scale = f64::from(dpi) / POINTS_PER_INCH;
    let px = |v: f64| (v * scale).round() as i32;
    let mut canvas = RgbImage::new(width, height);

    {
        let drawing_area =
            BitMapBackend::with_buffer(&mut canvas, (width, height)).into_drawing_area();
        drawing_area
            .fill(&rgb(WHITE))
            .map_err(|error| RasterError::Draw(format!("background fill error: {:?}", error)))?;

        for mark in figure.marks() {
            let result = match mark {
                Mark::Rect { x, y, w, h, fill } => drawing_area.draw(&Rectangle::new(
                    [(px(x), px(y)), (px(x + w), px(y + h))],
                    rgb(fill).filled(),
                )),
                Mark::Line {
                    from,
                    to,
                    width,
                    color,
                } => drawing_area.draw(&PathElement::new(
                    vec![(px(from.0), px(from.1)), (px(to.0), px(to.1))],
                    rgb(color).stroke_width(((width * scale).round() as u32).max(1)),
                )),
                Mark::Text {
                    x,
                    y,
                    text,
                    size,
                    h_align,
                    v_align,
                } => {
                    let pos = Pos::new(
                        match h_align {
                            HAlign::Center => HPos::Center,
                            HAlign::Right => HPos::Right,
                        },
                        match v_align {
                            VAlign::Top => VPos::Top,
                            VAlign::Middle => VPos::Center,
                        },
                    );
                    let style = (FONT_FAMILY, size * scale)
                        .into_font()
                        .color(&BLACK)
                        .pos(pos);
                    drawing_area.draw(&Text::new(text, (px(x), px(y)), style))
                }
            };
            result.map_err(|error| RasterError::Draw(format!("draw error: {:?}", error)))?;
        }

        drawing_area
            .present()
            .map_err(|error| RasterError::Draw(format!("present error: {:?}", error)))?;
    }

    encode_png(&canvas, dpi)
}

/// Encode an RGB canvas as PNG, with a `pHYs` chunk so viewers report `dpi`.
pub fn encode_png(canvas: &RgbImage, dpi: u32) -> Result<Vec<u8>, RasterError> {
    let ppm = pixels_per_meter(dpi);
    let mut output = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut output, canvas.width(), canvas.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));
        let mut writer = encoder.write_header()?;
        writer.write_image_data(canvas.as_raw())?;
        writer.finish()?;
    }
    Ok(output)
}
