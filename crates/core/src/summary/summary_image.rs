//! Best-effort summary image for the last refresh.
//!
//! Renders a horizontal bar chart of the top countries by estimated output
//! to a fixed PNG path. Only ever invoked from the detached task after a
//! successful refresh; callers check `exists()` before serving the file.

use chrono::{DateTime, Utc};
use image::{Rgba, RgbaImage};
use log::info;
use rust_decimal::prelude::ToPrimitive;
use std::fs;
use std::path::{Path, PathBuf};

use crate::countries::TopCountry;
use crate::errors::{Error, Result};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 400;
const MARGIN: u32 = 40;
const HEADER_HEIGHT: u32 = 48;
const BAR_HEIGHT: u32 = 36;
const BAR_GAP: u32 = 20;

const BACKGROUND: Rgba<u8> = Rgba([250, 250, 252, 255]);
const HEADER: Rgba<u8> = Rgba([30, 58, 95, 255]);
const BAR: Rgba<u8> = Rgba([70, 130, 180, 255]);
const BAR_TRACK: Rgba<u8> = Rgba([226, 230, 236, 255]);

/// Renderer with a fixed output path under the service data directory.
pub struct SummaryImage {
    path: PathBuf,
}

impl SummaryImage {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        SummaryImage {
            path: data_dir.as_ref().join("summary.png"),
        }
    }

    /// Fixed path of the generated file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a summary has been generated since the service started
    /// writing to this data directory.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Renders and writes the chart. `top` is expected highest-output first.
    pub fn render(
        &self,
        saved_count: i64,
        top: &[TopCountry],
        refreshed_at: Option<DateTime<Utc>>,
    ) -> Result<()> {
        let mut canvas = RgbaImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

        fill_rect(&mut canvas, 0, 0, WIDTH, HEADER_HEIGHT, HEADER);

        let chart_width = WIDTH - 2 * MARGIN;
        let max_output = top
            .iter()
            .map(|t| t.estimated_output)
            .max()
            .unwrap_or_default();

        for (i, country) in top.iter().enumerate() {
            let y = HEADER_HEIGHT + MARGIN + i as u32 * (BAR_HEIGHT + BAR_GAP);
            if y + BAR_HEIGHT > HEIGHT - MARGIN {
                break;
            }
            fill_rect(&mut canvas, MARGIN, y, chart_width, BAR_HEIGHT, BAR_TRACK);

            let ratio = if max_output.is_zero() {
                0.0
            } else {
                (country.estimated_output / max_output)
                    .to_f64()
                    .unwrap_or(0.0)
            };
            let bar_width = (chart_width as f64 * ratio).round() as u32;
            if bar_width > 0 {
                fill_rect(&mut canvas, MARGIN, y, bar_width, BAR_HEIGHT, BAR);
            }
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        canvas
            .save(&self.path)
            .map_err(|e| Error::Unexpected(format!("Failed to write summary image: {}", e)))?;

        info!(
            "Summary image written to {} ({} countries, refreshed at {:?})",
            self.path.display(),
            saved_count,
            refreshed_at
        );
        Ok(())
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = (x + width).min(canvas.width());
    let y_end = (y + height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    #[test]
    fn test_render_creates_file_at_fixed_path() {
        let dir = tempdir().unwrap();
        let image = SummaryImage::new(dir.path());
        assert!(!image.exists());

        let top = vec![
            TopCountry {
                name: "A".to_string(),
                estimated_output: dec!(100.0),
            },
            TopCountry {
                name: "B".to_string(),
                estimated_output: dec!(40.0),
            },
        ];
        image.render(2, &top, Some(Utc::now())).unwrap();

        assert!(image.exists());
        assert_eq!(image.path(), dir.path().join("summary.png"));
    }

    #[test]
    fn test_render_with_empty_top_list() {
        let dir = tempdir().unwrap();
        let image = SummaryImage::new(dir.path());
        image.render(0, &[], None).unwrap();
        assert!(image.exists());
    }
}
