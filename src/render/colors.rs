//! Continuous color scales and RGB interpolation
//!
//! A `ColorPalette` is a sorted list of color stops in data units. Named
//! palettes from the registry are spread evenly over the field's value range.

use super::palettes::PaletteDefinition;

/// A color palette with sorted color stops for interpolation
#[derive(Debug, Clone, Default)]
pub struct ColorPalette {
    /// Sorted list of color stops (by value, ascending)
    pub stops: Vec<ColorStop>,
}

/// A single color stop in a palette
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    /// Numeric value at this stop
    pub value: f64,
    /// RGB color at this stop
    pub color: [u8; 3],
}

impl ColorPalette {
    /// Create a new empty palette
    pub fn new() -> Self {
        ColorPalette { stops: Vec::new() }
    }

    /// Distribute all colors of a named palette across `[min, max]`
    pub fn from_definition(def: &PaletteDefinition, min: f64, max: f64) -> Self {
        let mut palette = ColorPalette::new();
        let colors = def.get_colors_rgb();
        let n_colors = colors.len();

        for (i, color) in colors.into_iter().enumerate() {
            let t = if n_colors > 1 {
                i as f64 / (n_colors - 1) as f64
            } else {
                0.5
            };
            palette.add_stop(lerp(min, max, t), color);
        }

        palette
    }

    /// Add a color stop and maintain sorted order
    pub fn add_stop(&mut self, value: f64, color: [u8; 3]) {
        let stop = ColorStop { value, color };
        match self
            .stops
            .binary_search_by(|s| s.value.total_cmp(&value))
        {
            Ok(pos) => self.stops[pos] = stop, // Replace if exists
            Err(pos) => self.stops.insert(pos, stop),
        }
    }
}

/// Point at fraction `t` of `[min, max]`
///
/// Stays finite for any finite bounds, even when `max - min` overflows.
pub fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min * (1.0 - t) + max * t
}

/// Map a value to RGB by linear interpolation between the surrounding stops
///
/// Values outside the palette range clamp to the end colors.
pub fn interpolate_color(value: f64, palette: &ColorPalette) -> [u8; 3] {
    let stops = &palette.stops;
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return [128, 128, 128], // Gray default
    };

    if value <= first.value {
        return first.color;
    }
    if value >= last.value {
        return last.color;
    }

    // Find surrounding stops using binary search
    let idx = stops.partition_point(|stop| stop.value < value);
    let (lower, upper) = match (idx.checked_sub(1), stops.get(idx)) {
        (Some(i), Some(upper)) => (&stops[i], upper),
        _ => return first.color, // NaN value or stops
    };
    if !lower.value.is_finite() || !upper.value.is_finite() {
        return first.color;
    }

    let t = (value - lower.value) / (upper.value - lower.value);
    [
        (lower.color[0] as f64 * (1.0 - t) + upper.color[0] as f64 * t) as u8,
        (lower.color[1] as f64 * (1.0 - t) + upper.color[1] as f64 * t) as u8,
        (lower.color[2] as f64 * (1.0 - t) + upper.color[2] as f64 * t) as u8,
    ]
}
