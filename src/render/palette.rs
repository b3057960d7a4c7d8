//! Colors used by the chart renderer.

use plotters::style::RGBColor;

/// Bar fill for weekday charts.
pub const DEEP_SKY_BLUE: RGBColor = RGBColor(0, 191, 255);

/// Sequential light-to-dark blue ramp (nine stops, white-ish to navy).
const BLUES: [(u8, u8, u8); 9] = [
    (247, 251, 255),
    (222, 235, 247),
    (198, 219, 239),
    (158, 202, 225),
    (107, 174, 214),
    (66, 146, 198),
    (33, 113, 181),
    (8, 81, 156),
    (8, 48, 107),
];

/// Map `t ∈ [0, 1]` onto the blue ramp. Out-of-range and NaN inputs are clamped.
pub fn blues(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (BLUES.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(BLUES.len() - 1);
    let frac = pos - lo as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (BLUES[lo], BLUES[hi]);
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}
