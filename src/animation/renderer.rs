//! Rendering surface abstraction for bar animations.

use serde::{Deserialize, Serialize};

/// Fixed palette of bar colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    /// Resting color.
    #[default]
    Primary,
    /// Highlight for compared bars.
    Compare,
    /// Highlight for swapped bars.
    Swap,
    /// Highlight for overwritten bars.
    Overwrite,
}

impl BarColor {
    /// CSS color token.
    pub fn css(&self) -> &'static str {
        match self {
            BarColor::Primary => "#10b6d3ff",
            BarColor::Compare => "red",
            BarColor::Swap => "#ff6b6b",
            BarColor::Overwrite => "#4ecdc4",
        }
    }
}

/// A surface of indexed bars that playback paints onto.
///
/// Indices passed in are expected to be below [`Renderer::len`]; an
/// out-of-range index is a caller bug and implementations may panic.
pub trait Renderer {
    /// Number of bars.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Change the number of bars. New bars start at height 0 in the primary color.
    fn resize(&mut self, len: usize);

    fn height(&self, index: usize) -> u32;
    fn set_height(&mut self, index: usize, height: u32);

    fn color(&self, index: usize) -> BarColor;
    fn set_color(&mut self, index: usize, color: BarColor);

    /// Width shared by every bar.
    fn width(&self) -> u32;
    fn set_width(&mut self, width: u32);
}

/// One bar of a [`BarSurface`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Bar {
    pub height: u32,
    pub color: BarColor,
}

/// In-memory renderer, used headless and as the wasm frame buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BarSurface {
    bars: Vec<Bar>,
    width: u32,
}

impl BarSurface {
    pub fn new(len: usize) -> Self {
        Self {
            bars: vec![Bar::default(); len],
            width: 0,
        }
    }

    /// Surface showing `values` in the primary color.
    pub fn from_values(values: &[u32]) -> Self {
        Self {
            bars: values
                .iter()
                .map(|&height| Bar {
                    height,
                    color: BarColor::Primary,
                })
                .collect(),
            width: 0,
        }
    }

    #[inline]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn heights(&self) -> Vec<u32> {
        self.bars.iter().map(|b| b.height).collect()
    }

    pub fn colors(&self) -> Vec<BarColor> {
        self.bars.iter().map(|b| b.color).collect()
    }

    /// True when no bar is highlighted.
    pub fn is_at_rest(&self) -> bool {
        self.bars.iter().all(|b| b.color == BarColor::Primary)
    }
}

impl Renderer for BarSurface {
    fn len(&self) -> usize {
        self.bars.len()
    }

    fn resize(&mut self, len: usize) {
        self.bars.resize(len, Bar::default());
    }

    fn height(&self, index: usize) -> u32 {
        self.bars[index].height
    }

    fn set_height(&mut self, index: usize, height: u32) {
        self.bars[index].height = height;
    }

    fn color(&self, index: usize) -> BarColor {
        self.bars[index].color
    }

    fn set_color(&mut self, index: usize, color: BarColor) {
        self.bars[index].color = color;
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn set_width(&mut self, width: u32) {
        self.width = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_from_values() {
        let surface = BarSurface::from_values(&[3, 1, 2]);
        assert_eq!(surface.len(), 3);
        assert_eq!(surface.heights(), vec![3, 1, 2]);
        assert!(surface.is_at_rest());
    }

    #[test]
    fn test_resize_and_paint() {
        let mut surface = BarSurface::new(2);
        surface.resize(4);
        surface.set_height(3, 40);
        surface.set_color(3, BarColor::Swap);
        surface.set_width(25);

        assert_eq!(surface.height(3), 40);
        assert_eq!(surface.color(3), BarColor::Swap);
        assert_eq!(surface.width(), 25);
        assert!(!surface.is_at_rest());

        surface.resize(1);
        assert_eq!(surface.len(), 1);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let mut surface = BarSurface::new(2);
        surface.set_height(2, 1);
    }

    #[test]
    fn test_palette() {
        assert_eq!(BarColor::default(), BarColor::Primary);
        assert_eq!(BarColor::Compare.css(), "red");
        assert_eq!(
            serde_json::to_string(&BarColor::Overwrite).unwrap(),
            "\"overwrite\""
        );
    }
}
