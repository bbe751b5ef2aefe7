use crate::metric::MetricSelector;

pub type Rgb = (u8, u8, u8);

/// Neutral fill for features with no entity or no data. Checked before a
/// scale is ever invoked; the log scales are undefined at zero.
pub const NO_DATA: Rgb = (255, 255, 255);

const WHITE: Rgb = (255, 255, 255);
const RED: Rgb = (255, 0, 0);
const BLUE: Rgb = (0, 0, 255);
const GREEN: Rgb = (0, 128, 0);
const BLACK: Rgb = (0, 0, 0);

/// Three-point piecewise scale, logarithmic in the value axis and linear
/// per sRGB channel between the anchor colors. Inputs outside the domain
/// clamp to the end colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogColorScale {
    pub domain: [f64; 3],
    pub range: [Rgb; 3],
}

pub const CONFIRMED: LogColorScale = LogColorScale {
    domain: [1.0, 200.0, 10_000.0],
    range: [WHITE, RED, BLACK],
};

pub const CONFIRMED_PER_MILLION: LogColorScale = LogColorScale {
    domain: [100.0, 1_000.0, 10_000.0],
    range: [WHITE, RED, BLACK],
};

pub const DEATH: LogColorScale = LogColorScale {
    domain: [1.0, 100.0, 1_000.0],
    range: [WHITE, BLUE, BLACK],
};

pub const DEATH_PER_MILLION: LogColorScale = LogColorScale {
    domain: [10.0, 100.0, 1_000.0],
    range: [WHITE, BLUE, BLACK],
};

pub const TIME_TO_DOUBLE: LogColorScale = LogColorScale {
    domain: [2.0, 15.0, 300.0],
    range: [WHITE, GREEN, BLACK],
};

fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    let t = t.clamp(0.0, 1.0);
    let value = a as f64 + (b as f64 - a as f64) * t;
    value.round().clamp(0.0, 255.0) as u8
}

fn lerp_rgb(a: Rgb, b: Rgb, t: f64) -> Rgb {
    (
        lerp_u8(a.0, b.0, t),
        lerp_u8(a.1, b.1, t),
        lerp_u8(a.2, b.2, t),
    )
}

impl LogColorScale {
    pub fn color(&self, value: f64) -> Rgb {
        let [lo, mid, hi] = self.domain;
        if value <= lo {
            return self.range[0];
        }
        if value >= hi {
            return self.range[2];
        }
        if value <= mid {
            let t = (value.ln() - lo.ln()) / (mid.ln() - lo.ln());
            lerp_rgb(self.range[0], self.range[1], t)
        } else {
            let t = (value.ln() - mid.ln()) / (hi.ln() - mid.ln());
            lerp_rgb(self.range[1], self.range[2], t)
        }
    }
}

/// Scale selection by metric and per-capita flag. Doubling time has no
/// per-capita variant; the flag selects the same scale either way.
pub const fn scale_for(selector: MetricSelector, per_capita: bool) -> &'static LogColorScale {
    match (selector, per_capita) {
        (MetricSelector::Confirmed, false) => &CONFIRMED,
        (MetricSelector::Confirmed, true) => &CONFIRMED_PER_MILLION,
        (MetricSelector::Death, false) => &DEATH,
        (MetricSelector::Death, true) => &DEATH_PER_MILLION,
        (MetricSelector::DaysToDouble, _) => &TIME_TO_DOUBLE,
    }
}

/// Fill color for an extracted metric value. `None` is the no-data case
/// and short-circuits to the neutral color.
pub fn color_for(selector: MetricSelector, per_capita: bool, value: Option<f64>) -> Rgb {
    match value {
        Some(v) => scale_for(selector, per_capita).color(v),
        None => NO_DATA,
    }
}

/// Format as a CSS color string.
pub fn rgb_css(color: Rgb) -> String {
    let (r, g, b) = color;
    format!("rgb({r},{g},{b})")
}
