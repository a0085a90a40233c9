// Geometry value types shared by layout parsing and trait resolution.
// Frames stored on parsed skin models are relative ([0,1] x [0,1]) unless
// the owning item uses `Placement::App`, which keeps authored values as-is.

use serde_json::Value;

/// 2D size in skin mapping units (or relative units once normalized)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Swap width and height (portrait table entries -> landscape)
    pub fn transposed(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Parse a `{"width": w, "height": h}` node
    pub fn from_value(value: &Value) -> Option<Self> {
        let width = value.get("width")?.as_f64()?;
        let height = value.get("height")?.as_f64()?;
        Some(Self { width, height })
    }
}

/// Rectangle in the same units as `Size`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub fn min_x(&self) -> f64 {
        self.x
    }

    pub fn min_y(&self) -> f64 {
        self.y
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True when `other` lies entirely within this rect
    pub fn contains(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.min_y() >= self.min_y()
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Scale every coordinate, used to normalize mapping-space frames
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        Self {
            x: self.x * sx,
            y: self.y * sy,
            width: self.width * sx,
            height: self.height * sy,
        }
    }

    /// Map a relative rect into an absolute container rect
    pub fn scaled_to(&self, container: &Rect) -> Self {
        Self {
            x: container.x + self.x * container.width,
            y: container.y + self.y * container.height,
            width: self.width * container.width,
            height: self.height * container.height,
        }
    }

    /// Parse a `{"x": _, "y": _, "width": _, "height": _}` node
    pub fn from_value(value: &Value) -> Option<Self> {
        let x = value.get("x")?.as_f64()?;
        let y = value.get("y")?.as_f64()?;
        let width = value.get("width")?.as_f64()?;
        let height = value.get("height")?.as_f64()?;
        Some(Self {
            x,
            y,
            width,
            height,
        })
    }
}

/// RGBA color with components in [0,1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`
    pub fn from_hex_str(text: &str) -> Option<Self> {
        let hex = text.strip_prefix('#')?;
        match hex.len() {
            6 => {
                let value = u32::from_str_radix(hex, 16).ok()?;
                let r = ((value & 0xff0000) >> 16) as u8;
                let g = ((value & 0x00ff00) >> 8) as u8;
                let b = (value & 0x0000ff) as u8;
                Some(Self::from_rgb(r, g, b))
            }
            8 => {
                let value = u32::from_str_radix(hex, 16).ok()?;
                let r = ((value & 0xff00_0000) >> 24) as f64 / 255.0;
                let g = ((value & 0x00ff_0000) >> 16) as f64 / 255.0;
                let b = ((value & 0x0000_ff00) >> 8) as f64 / 255.0;
                let a = (value & 0x0000_00ff) as f64 / 255.0;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rect_scaled_to_container() {
        let relative = Rect::new(0.25, 0.5, 0.5, 0.25);
        let container = Rect::new(0.0, 0.0, 400.0, 800.0);
        let absolute = relative.scaled_to(&container);
        assert_eq!(absolute, Rect::new(100.0, 400.0, 200.0, 200.0));
    }

    #[test]
    fn test_rect_contains() {
        let outer = Rect::new(0.0, 0.0, 10.0, 10.0);
        let inner = Rect::new(2.0, 2.0, 4.0, 4.0);
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_rect_from_value() {
        let value = json!({"x": 10.0, "y": 20.0, "width": 30.0, "height": 40.0});
        assert_eq!(
            Rect::from_value(&value),
            Some(Rect::new(10.0, 20.0, 30.0, 40.0))
        );
        assert_eq!(Rect::from_value(&json!({"x": 1.0})), None);
    }

    #[test]
    fn test_color_hex_parsing() {
        let green = Color::from_hex_str("#00FF00").unwrap();
        assert_eq!(green.g, 1.0);
        assert_eq!(green.r, 0.0);
        assert_eq!(green.a, 1.0);

        let translucent = Color::from_hex_str("#FF000080").unwrap();
        assert!(translucent.a < 0.51 && translucent.a > 0.49);

        assert!(Color::from_hex_str("FF0000").is_none());
        assert!(Color::from_hex_str("#XYZ123").is_none());
    }

    #[test]
    fn test_size_transposed() {
        assert_eq!(Size::new(375.0, 812.0).transposed(), Size::new(812.0, 375.0));
    }
}
