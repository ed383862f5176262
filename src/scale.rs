use std::collections::BTreeMap;

use crate::text_metrics::{FontMeasurer, TextMeasurer};

/// Axis contract the geometry builders resolve values through. A scale
/// answers with NaN when it cannot place a value, which the builders
/// treat as "skip this annotation for the pass".
pub trait Scale {
    fn id(&self) -> &str;

    /// Pixel position of a data value. `index` carries the ordinal slot
    /// for band scales; continuous scales ignore it.
    fn pixel_for_value(&self, value: f64, index: Option<usize>) -> f32;

    /// Data value at a pixel position.
    fn value_for_pixel(&self, pixel: f32) -> f64;
}

/// Continuous scale mapping `[min, max]` onto `[pixel_start, pixel_end]`.
/// Either range may be reversed.
#[derive(Debug, Clone)]
pub struct LinearScale {
    pub id: String,
    pub min: f64,
    pub max: f64,
    pub pixel_start: f32,
    pub pixel_end: f32,
}

impl LinearScale {
    pub fn new(id: &str, min: f64, max: f64, pixel_start: f32, pixel_end: f32) -> Self {
        Self {
            id: id.to_string(),
            min,
            max,
            pixel_start,
            pixel_end,
        }
    }
}

impl Scale for LinearScale {
    fn id(&self) -> &str {
        &self.id
    }

    fn pixel_for_value(&self, value: f64, _index: Option<usize>) -> f32 {
        if !value.is_finite() {
            return f32::NAN;
        }
        let span = self.max - self.min;
        if span == 0.0 {
            return f32::NAN;
        }
        let fraction = ((value - self.min) / span) as f32;
        self.pixel_start + fraction * (self.pixel_end - self.pixel_start)
    }

    fn value_for_pixel(&self, pixel: f32) -> f64 {
        let pixel_span = self.pixel_end - self.pixel_start;
        if pixel_span == 0.0 {
            return f64::NAN;
        }
        let fraction = ((pixel - self.pixel_start) / pixel_span) as f64;
        self.min + fraction * (self.max - self.min)
    }
}

/// Band scale addressed by ordinal slot. Values double as fractional
/// indices; an explicit index wins over the value.
#[derive(Debug, Clone)]
pub struct CategoryScale {
    pub id: String,
    pub categories: Vec<String>,
    pub pixel_start: f32,
    pub pixel_end: f32,
}

impl CategoryScale {
    pub fn new(id: &str, categories: Vec<String>, pixel_start: f32, pixel_end: f32) -> Self {
        Self {
            id: id.to_string(),
            categories,
            pixel_start,
            pixel_end,
        }
    }

    fn band_width(&self) -> f32 {
        if self.categories.is_empty() {
            return f32::NAN;
        }
        (self.pixel_end - self.pixel_start) / self.categories.len() as f32
    }

    fn pixel_for_index(&self, index: f32) -> f32 {
        self.pixel_start + (index + 0.5) * self.band_width()
    }
}

impl Scale for CategoryScale {
    fn id(&self) -> &str {
        &self.id
    }

    fn pixel_for_value(&self, value: f64, index: Option<usize>) -> f32 {
        if let Some(index) = index {
            return self.pixel_for_index(index as f32);
        }
        if !value.is_finite() {
            return f32::NAN;
        }
        self.pixel_for_index(value as f32)
    }

    fn value_for_pixel(&self, pixel: f32) -> f64 {
        let band = self.band_width();
        if !band.is_finite() || band == 0.0 {
            return f64::NAN;
        }
        ((pixel - self.pixel_start) / band - 0.5) as f64
    }
}

/// The chart's inner drawing rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotArea {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Read-only snapshot of the host chart for one layout pass: plot area,
/// registered scales and the text measurer labels are sized with.
pub struct ChartState {
    pub area: PlotArea,
    scales: BTreeMap<String, Box<dyn Scale>>,
    measurer: Box<dyn TextMeasurer>,
}

impl ChartState {
    pub fn new(area: PlotArea) -> Self {
        Self {
            area,
            scales: BTreeMap::new(),
            measurer: Box::new(FontMeasurer::new()),
        }
    }

    pub fn with_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn add_scale(&mut self, scale: Box<dyn Scale>) {
        self.scales.insert(scale.id().to_string(), scale);
    }

    pub fn scale(&self, id: &str) -> Option<&dyn Scale> {
        self.scales.get(id).map(|scale| scale.as_ref())
    }

    pub fn set_area(&mut self, area: PlotArea) {
        self.area = area;
    }

    pub fn measure_width(&self, text: &str, font_size: f32, font_family: &str) -> f32 {
        self.measurer.width(text, font_size, font_family)
    }
}
