//! PNG bar charts via Plotters.
//!
//! Figure sizes are given in inches and scaled by the configured DPI, so a
//! 300 DPI weekday chart is 2400x1800 pixels. Font sizes are in points and
//! scaled the same way.
//!
//! Layout:
//! - weekday charts: title band + one bar per weekday
//! - yearly charts: title band + one bar per year colored by heavy-day
//!   intensity + a colorbar on the right

use std::collections::BTreeMap;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::domain::{AggregateTable, AggregationMode, Language, Theme, WeekdayBucket, YearBucket};
use crate::error::AppError;
use crate::render::labels::ChartLabels;
use crate::render::palette::{DEEP_SKY_BLUE, blues};

type DrawResult<T> = Result<T, Box<dyn std::error::Error>>;
type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const WEEKDAY_FIGSIZE: (f64, f64) = (8.0, 6.0);
const YEARLY_FIGSIZE: (f64, f64) = (10.0, 6.0);

const FONT: &str = "sans-serif";

/// Presentation settings for one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub theme: Theme,
    pub dpi: u32,
    pub language: Language,
    pub mode: AggregationMode,
}

impl ChartStyle {
    /// Points (1/72 inch) to pixels.
    fn px(&self, pt: f64) -> f64 {
        pt * self.dpi as f64 / 72.0
    }

    fn background(&self) -> RGBColor {
        match self.theme {
            Theme::Dark => BLACK,
            Theme::Light => WHITE,
        }
    }

    fn foreground(&self) -> RGBColor {
        match self.theme {
            Theme::Dark => WHITE,
            Theme::Light => BLACK,
        }
    }
}

/// Pixel dimensions of a figure.
pub fn figure_pixels(figsize: (f64, f64), dpi: u32) -> (u32, u32) {
    let dpi = dpi.max(1) as f64;
    ((figsize.0 * dpi).round() as u32, (figsize.1 * dpi).round() as u32)
}

/// Render the aggregate table as a PNG at `path`.
pub fn render_chart(
    path: &Path,
    table: &AggregateTable,
    labels: &ChartLabels,
    style: &ChartStyle,
) -> Result<(), AppError> {
    let figsize = match table {
        AggregateTable::Weekday(_) => WEEKDAY_FIGSIZE,
        AggregateTable::Yearly(_) => YEARLY_FIGSIZE,
    };
    let size = figure_pixels(figsize, style.dpi);
    debug!(path = %path.display(), width = size.0, height = size.1, "Rendering chart");

    draw_figure(path, size, table, labels, style)
        .map_err(|e| AppError::render(format!("Failed to render chart '{}': {e}", path.display())))
}

fn draw_figure(
    path: &Path,
    size: (u32, u32),
    table: &AggregateTable,
    labels: &ChartLabels,
    style: &ChartStyle,
) -> DrawResult<()> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&style.background())?;

    let title_lines = labels.title.lines().count().max(1) as f64;
    let title_height = style.px(14.0 * 1.4 * title_lines + 8.0) as u32;
    let (title_area, body) = root.split_vertically(title_height);
    draw_title(&title_area, &labels.title, style)?;

    match table {
        AggregateTable::Weekday(buckets) => draw_weekday_chart(&body, buckets, labels, style)?,
        AggregateTable::Yearly(buckets) => draw_yearly_chart(&body, buckets, labels, style)?,
    }

    root.present()?;
    Ok(())
}

fn draw_title(area: &Area<'_>, title: &str, style: &ChartStyle) -> DrawResult<()> {
    let (width, _) = area.dim_in_pixel();
    let size = style.px(14.0);
    let line_height = (size * 1.4) as i32;
    let fg = style.foreground();

    for (i, line) in title.lines().enumerate() {
        let text_style = TextStyle::from((FONT, size).into_font())
            .color(&fg)
            .pos(Pos::new(HPos::Center, VPos::Top));
        let y = style.px(4.0) as i32 + i as i32 * line_height;
        area.draw(&Text::new(line.to_string(), (width as i32 / 2, y), text_style))?;
    }
    Ok(())
}

/// Segmented x range holding exactly `n` bars.
///
/// Discrete integer ranges in Plotters include their end, so `0..n` would
/// leave an empty trailing slot.
fn bar_slots(n: usize) -> std::ops::Range<i32> {
    0..(n.max(1) as i32 - 1)
}

/// Number of y labels; counts get at most one label per whole unit.
fn y_label_count(mode: AggregationMode, y_max: f64) -> usize {
    match mode {
        AggregationMode::WeekdayCount => (y_max.floor() as usize + 1).clamp(2, 8),
        _ => 8,
    }
}

fn format_weekday_value(mode: AggregationMode, v: f64) -> String {
    match mode {
        AggregationMode::WeekdayCount => format!("{v:.0}"),
        _ => format!("{v:.1}"),
    }
}

/// Upper y bound with headroom above the tallest bar.
fn y_upper(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.1 } else { 1.0 }
}

fn grid_color() -> RGBAColor {
    RGBColor(128, 128, 128).mix(0.5)
}

fn draw_weekday_chart(
    area: &Area<'_>,
    buckets: &[WeekdayBucket],
    labels: &ChartLabels,
    style: &ChartStyle,
) -> DrawResult<()> {
    let y_max = y_upper(buckets.iter().map(|b| b.value));
    let fg = style.foreground();
    let grid = grid_color();
    let codes: Vec<&str> = buckets.iter().map(|b| b.weekday.code(style.language)).collect();

    let mut chart = ChartBuilder::on(area)
        .margin(style.px(10.0) as u32)
        .x_label_area_size(style.px(36.0) as u32)
        .y_label_area_size(style.px(52.0) as u32)
        .build_cartesian_2d(bar_slots(buckets.len()).into_segmented(), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(&grid)
        .x_desc(labels.x.as_str())
        .y_desc(labels.y.as_str())
        .x_labels(codes.len())
        .y_labels(y_label_count(style.mode, y_max))
        .x_label_formatter(&|v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(i) => codes.get(*i as usize).map(|c| c.to_string()).unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v: &f64| format_weekday_value(style.mode, *v))
        .label_style((FONT, style.px(10.0)).into_font().color(&fg))
        .axis_desc_style((FONT, style.px(11.0)).into_font().color(&fg))
        .axis_style(&fg)
        .draw()?;

    let margin = style.px(8.0) as u32;
    let data = || buckets.iter().enumerate().map(|(i, b)| (i as i32, b.value));

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(DEEP_SKY_BLUE.filled())
            .margin(margin)
            .data(data()),
    )?;
    // Outline pass: same geometry, stroke only.
    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLACK.stroke_width(style.px(0.8).max(1.0) as u32))
            .margin(margin)
            .data(data()),
    )?;

    Ok(())
}

fn draw_yearly_chart(
    area: &Area<'_>,
    buckets: &[YearBucket],
    labels: &ChartLabels,
    style: &ChartStyle,
) -> DrawResult<()> {
    let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
        return Ok(());
    };
    let fg = style.foreground();
    let grid = grid_color();
    let y_max = y_upper(buckets.iter().map(|b| b.total));
    let intensity: BTreeMap<i32, f64> = buckets.iter().map(|b| (b.year, b.color_intensity)).collect();

    let (width, _) = area.dim_in_pixel();
    let (plot_area, bar_area) = area.split_horizontally(width * 86 / 100);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(style.px(10.0) as u32)
        .x_label_area_size(style.px(36.0) as u32)
        .y_label_area_size(style.px(60.0) as u32)
        .build_cartesian_2d((first.year..last.year).into_segmented(), 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(&TRANSPARENT)
        .bold_line_style(&grid)
        .x_desc(labels.x.as_str())
        .y_desc(labels.y.as_str())
        .x_labels(12)
        .y_labels(8)
        .x_label_formatter(&|v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(year) => year.to_string(),
            _ => String::new(),
        })
        .y_label_formatter(&|v: &f64| format!("{v:.0}"))
        .label_style((FONT, style.px(10.0)).into_font().color(&fg))
        .axis_desc_style((FONT, style.px(11.0)).into_font().color(&fg))
        .axis_style(&fg)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style_func(|v: &SegmentValue<i32>, _: &f64| {
                let t = match v {
                    SegmentValue::Exact(year) | SegmentValue::CenterOf(year) => {
                        intensity.get(year).copied().unwrap_or(0.0)
                    }
                    SegmentValue::Last => 0.0,
                };
                blues(t).filled()
            })
            .margin(style.px(1.5) as u32)
            .data(buckets.iter().map(|b| (b.year, b.total))),
    )?;

    let min_days = buckets.iter().map(|b| b.heavy_days).min().unwrap_or(0) as f64;
    let max_days = buckets.iter().map(|b| b.heavy_days).max().unwrap_or(0) as f64;
    draw_colorbar(&bar_area, min_days, max_days, labels.colorbar.as_deref().unwrap_or(""), style)
}

/// Vertical blue gradient labeled with the heavy-day count range.
fn draw_colorbar(area: &Area<'_>, lo: f64, hi: f64, label: &str, style: &ChartStyle) -> DrawResult<()> {
    const STEPS: usize = 100;
    let hi = if hi > lo { hi } else { lo + 1.0 };
    let fg = style.foreground();

    let mut bar = ChartBuilder::on(area)
        .margin_top(style.px(10.0) as u32)
        .margin_bottom(style.px(46.0) as u32)
        .margin_right(style.px(40.0) as u32)
        .y_label_area_size(style.px(40.0) as u32)
        .build_cartesian_2d(0.0..1.0, lo..hi)?;

    bar.draw_series((0..STEPS).map(|k| {
        let y0 = lo + (hi - lo) * k as f64 / STEPS as f64;
        let y1 = lo + (hi - lo) * (k + 1) as f64 / STEPS as f64;
        let t = k as f64 / (STEPS - 1) as f64;
        Rectangle::new([(0.0, y0), (1.0, y1)], blues(t).filled())
    }))?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_desc(label)
        .y_label_formatter(&|v: &f64| format!("{v:.0}"))
        .label_style((FONT, style.px(9.0)).into_font().color(&fg))
        .axis_desc_style((FONT, style.px(10.0)).into_font().color(&fg))
        .axis_style(&fg)
        .draw()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn figure_pixels_scale_with_dpi() {
        assert_eq!(figure_pixels(WEEKDAY_FIGSIZE, 300), (2400, 1800));
        assert_eq!(figure_pixels(YEARLY_FIGSIZE, 100), (1000, 600));
        assert_eq!(figure_pixels((8.0, 6.0), 0), (8, 6));
    }

    #[test]
    fn bar_slots_match_bar_count() {
        assert_eq!(bar_slots(7), 0..6);
        assert_eq!(bar_slots(1), 0..0);
        assert_eq!(bar_slots(0), 0..0);
    }

    #[test]
    fn count_axis_uses_whole_numbers() {
        assert_eq!(format_weekday_value(AggregationMode::WeekdayCount, 35.0), "35");
        assert_eq!(format_weekday_value(AggregationMode::WeekdayMean, 2.26), "2.3");
        assert_eq!(y_label_count(AggregationMode::WeekdayCount, 2.2), 3);
        assert_eq!(y_label_count(AggregationMode::WeekdayCount, 40.0), 8);
        assert_eq!(y_label_count(AggregationMode::WeekdayMean, 2.2), 8);
    }

    #[test]
    fn y_upper_has_headroom() {
        assert!((y_upper([1.0, 10.0].into_iter()) - 11.0).abs() < 1e-12);
        assert!((y_upper(std::iter::empty()) - 1.0).abs() < 1e-12);
        assert!((y_upper([0.0].into_iter()) - 1.0).abs() < 1e-12);
    }
}
