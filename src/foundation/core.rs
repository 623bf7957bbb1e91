use serde::{Deserialize, Serialize};

/// Integer canvas coordinate.
///
/// For image layers this is the top-left corner of the placement; for text layers it is the
/// anchor implied by the layer's alignment pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Horizontal coordinate in pixels.
    pub x: i32,
    /// Vertical coordinate in pixels.
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([i32; 2]),
            Obj { x: i32, y: i32 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y]) => Ok(Self { x, y }),
            Repr::Obj { x, y } => Ok(Self { x, y }),
        }
    }
}

/// Pixel size of a placed image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Size an image layer starts with. Only deviations from it produce a resize.
    pub const DEFAULT: Size = Size {
        width: 100,
        height: 100,
    };

    /// Create a size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `true` when either dimension differs from [`Size::DEFAULT`].
    pub fn differs_from_default(self) -> bool {
        self.width != Self::DEFAULT.width || self.height != Self::DEFAULT.height
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque black.
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);

    /// Create a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in `[r, g, b, a]` order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Rgba([u8; 4]),
            Rgb([u8; 3]),
            Obj {
                r: u8,
                g: u8,
                b: u8,
                #[serde(default = "opaque")]
                a: u8,
            },
        }

        fn opaque() -> u8 {
            255
        }

        match Repr::deserialize(deserializer)? {
            Repr::Rgba(c) => Ok(c.into()),
            Repr::Rgb([r, g, b]) => Ok(Self::new(r, g, b, 255)),
            Repr::Obj { r, g, b, a } => Ok(Self::new(r, g, b, a)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_default_boundary_is_per_dimension() {
        assert!(!Size::new(100, 100).differs_from_default());
        assert!(Size::new(100, 101).differs_from_default());
        assert!(Size::new(99, 100).differs_from_default());
    }

    #[test]
    fn position_accepts_array_or_object() {
        let a: Position = serde_json::from_str("[3, -4]").unwrap();
        let b: Position = serde_json::from_str(r#"{"x": 3, "y": -4}"#).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Position::new(3, -4));
    }

    #[test]
    fn color_serializes_as_array() {
        let s = serde_json::to_string(&Rgba8::new(1, 2, 3, 4)).unwrap();
        assert_eq!(s, "[1,2,3,4]");
    }

    #[test]
    fn color_accepts_rgb_and_object_forms() {
        let rgb: Rgba8 = serde_json::from_str("[10, 20, 30]").unwrap();
        assert_eq!(rgb, Rgba8::new(10, 20, 30, 255));
        let obj: Rgba8 = serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3}"#).unwrap();
        assert_eq!(obj.a, 255);
        assert!(serde_json::from_str::<Rgba8>("[300, 0, 0, 0]").is_err());
    }
}
