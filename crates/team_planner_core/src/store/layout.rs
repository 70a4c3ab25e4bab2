//! Radial diagram placement.
//!
//! Teams sit evenly on one circle; team `index` of `count` is placed at angle
//! `2*pi*index/count` measured from the positive x axis.

use std::f64::consts::PI;

pub const LAYOUT_CENTER_X: f64 = 400.0;
pub const LAYOUT_CENTER_Y: f64 = 300.0;
pub const LAYOUT_RADIUS: f64 = 200.0;

/// Returns the circle slot for `index` out of `count` teams.
///
/// `count == 0` is treated as a single slot so the result stays finite.
pub fn circle_position(index: usize, count: usize) -> (f64, f64) {
    let slots = count.max(1) as f64;
    let angle = (index as f64 / slots) * 2.0 * PI;
    (
        LAYOUT_CENTER_X + LAYOUT_RADIUS * angle.cos(),
        LAYOUT_CENTER_Y + LAYOUT_RADIUS * angle.sin(),
    )
}
