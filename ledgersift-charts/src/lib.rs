//! ledgersift-charts: rasterize a `ChartSpec` into PNG bytes.
//!
//! Rendering is best-effort from the caller's point of view: any failure
//! here (including a spec with nothing drawable) is an ordinary error the
//! caller downgrades to "no chart".
//!
//! Text uses an embedded DejaVu Sans registered with plotters' ab_glyph
//! backend, so rendering does not depend on system fontconfig.

use std::io::Cursor;
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow, bail};
use image::{ImageFormat, RgbImage};
use ledgersift_core::ChartSpec;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 500;

static FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

fn ensure_fonts() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED
        .get_or_init(|| register_font("sans-serif", FontStyle::Normal, FONT_BYTES).is_ok());
    if !ok {
        bail!("embedded font failed to register");
    }
    Ok(())
}

/// Render a chart spec to PNG bytes.
pub fn render_png(spec: &ChartSpec) -> Result<Vec<u8>> {
    ensure_fonts()?;

    let mut rgb = vec![0u8; (WIDTH * HEIGHT * 3) as usize];
    {
        let backend = BitMapBackend::with_buffer(&mut rgb, (WIDTH, HEIGHT));
        let root = backend.into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("fill canvas: {e}"))?;

        match spec {
            ChartSpec::GroupedBars {
                title,
                x_label,
                y_label,
                categories,
                withdrawals,
                deposits,
            } => draw_grouped_bars(&root, title, x_label, y_label, categories, withdrawals, deposits)?,
            ChartSpec::Histogram {
                title,
                x_label,
                y_label,
                values,
                marker,
                marker_label,
                bins,
            } => draw_histogram(&root, title, x_label, y_label, values, *marker, marker_label, *bins)?,
        }

        root.present().map_err(|e| anyhow!("finalize chart: {e}"))?;
    }

    let img = RgbImage::from_raw(WIDTH, HEIGHT, rgb)
        .context("bitmap buffer has unexpected size")?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("encode chart as PNG")?;
    Ok(png)
}

type Canvas<'a> = DrawingArea<BitMapBackend<'a>, plotters::coord::Shift>;

#[allow(clippy::too_many_arguments)]
fn draw_grouped_bars(
    root: &Canvas<'_>,
    title: &str,
    x_label: &str,
    y_label: &str,
    categories: &[String],
    withdrawals: &[f64],
    deposits: &[f64],
) -> Result<()> {
    if categories.is_empty() {
        bail!("no drawable data");
    }

    let y_max = withdrawals
        .iter()
        .chain(deposits)
        .fold(0.0f64, |acc, v| acc.max(*v));
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..categories.len() as f64, 0.0..y_max)
        .map_err(|e| anyhow!("build chart: {e}"))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .x_labels(categories.len().min(12))
        .x_label_formatter(&|x| {
            categories
                .get(x.floor() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| anyhow!("draw mesh: {e}"))?;

    let withdrawal_style = RED.mix(0.6).filled();
    let deposit_style = BLUE.mix(0.6).filled();

    chart
        .draw_series(withdrawals.iter().enumerate().map(|(i, &v)| {
            let x = i as f64;
            Rectangle::new([(x + 0.10, 0.0), (x + 0.48, v)], withdrawal_style)
        }))
        .map_err(|e| anyhow!("draw withdrawal bars: {e}"))?
        .label("Withdrawal")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], withdrawal_style));

    chart
        .draw_series(deposits.iter().enumerate().map(|(i, &v)| {
            let x = i as f64;
            Rectangle::new([(x + 0.52, 0.0), (x + 0.90, v)], deposit_style)
        }))
        .map_err(|e| anyhow!("draw deposit bars: {e}"))?
        .label("Deposit")
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], deposit_style));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(|e| anyhow!("draw legend: {e}"))?;

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn draw_histogram(
    root: &Canvas<'_>,
    title: &str,
    x_label: &str,
    y_label: &str,
    values: &[f64],
    marker: f64,
    marker_label: &str,
    bins: usize,
) -> Result<()> {
    if values.is_empty() || bins == 0 {
        bail!("no drawable data");
    }

    let lo = values.iter().copied().fold(f64::INFINITY, f64::min).min(marker);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max).max(marker);
    // Degenerate range (single distinct value) still gets a visible bin.
    let hi = if hi > lo { hi } else { lo + 1.0 };
    let bin_width = (hi - lo) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / bin_width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let y_max = counts.iter().copied().max().unwrap_or(1).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(60)
        .build_cartesian_2d(lo..hi, 0.0..y_max)
        .map_err(|e| anyhow!("build chart: {e}"))?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()
        .map_err(|e| anyhow!("draw mesh: {e}"))?;

    chart
        .draw_series(counts.iter().enumerate().filter(|&(_, &c)| c > 0).map(|(i, &c)| {
            let x0 = lo + i as f64 * bin_width;
            Rectangle::new([(x0, 0.0), (x0 + bin_width, c as f64)], BLUE.mix(0.7).filled())
        }))
        .map_err(|e| anyhow!("draw histogram bars: {e}"))?;

    chart
        .draw_series(LineSeries::new(
            [(marker, 0.0), (marker, y_max)],
            RED.stroke_width(2),
        ))
        .map_err(|e| anyhow!("draw marker line: {e}"))?
        .label(marker_label.to_string())
        .legend(|(x, y)| PathElement::new([(x, y), (x + 12, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(|e| anyhow!("draw legend: {e}"))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_grouped_bars_render_to_png() {
        let spec = ChartSpec::GroupedBars {
            title: "Daily Transaction Flow".to_string(),
            x_label: "Date".to_string(),
            y_label: "Amount".to_string(),
            categories: vec!["2024-03-01".to_string(), "2024-03-02".to_string()],
            withdrawals: vec![1500.0, 0.0],
            deposits: vec![0.0, 50000.0],
        };

        let png = render_png(&spec).unwrap();
        assert!(png.len() > PNG_MAGIC.len());
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_histogram_renders_to_png() {
        let spec = ChartSpec::Histogram {
            title: "Distribution of Transaction Amounts greater than 1000".to_string(),
            x_label: "Amount".to_string(),
            y_label: "Frequency".to_string(),
            values: vec![1500.0, 2300.0, 2300.0, 9000.0],
            marker: 1000.0,
            marker_label: "Filter amount: 1000".to_string(),
            bins: 20,
        };

        let png = render_png(&spec).unwrap();
        assert_eq!(&png[..8], &PNG_MAGIC);
    }

    #[test]
    fn test_single_value_histogram_does_not_panic() {
        let spec = ChartSpec::Histogram {
            title: "Distribution of Transaction Amounts equal to 500".to_string(),
            x_label: "Amount".to_string(),
            y_label: "Frequency".to_string(),
            values: vec![500.0],
            marker: 500.0,
            marker_label: "Filter amount: 500".to_string(),
            bins: 20,
        };

        assert!(render_png(&spec).is_ok());
    }

    #[test]
    fn test_empty_bars_is_error_not_panic() {
        let spec = ChartSpec::GroupedBars {
            title: "Empty".to_string(),
            x_label: "Date".to_string(),
            y_label: "Amount".to_string(),
            categories: vec![],
            withdrawals: vec![],
            deposits: vec![],
        };

        assert!(render_png(&spec).is_err());
    }
}
