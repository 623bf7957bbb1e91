use std::fmt;

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Position, Rgba8, Size};

/// Opaque, stable layer identity.
///
/// New layers get a random v4 UUID; ids read from a project file are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    /// Fresh random id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Id taken from an external source (project file, tests).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind tag of a layer. Fixed at creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerType {
    /// The background image.
    Base,
    /// A placed image.
    Image,
    /// A text block.
    Text,
}

impl LayerType {
    /// Lowercase name used in project files and listings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Image => "image",
            Self::Text => "text",
        }
    }
}

/// Horizontal part of a text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    /// Anchor is the left edge.
    #[default]
    Left,
    /// Anchor is the horizontal center.
    Center,
    /// Anchor is the right edge.
    Right,
}

/// Vertical part of a text anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    /// Anchor is the top edge.
    #[default]
    Top,
    /// Anchor is the vertical middle.
    Middle,
    /// Anchor is the bottom edge.
    Bottom,
}

/// Background image of a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseImage {
    pub image_path: String,
    pub is_parameter: bool,
    pub parameter_name: String,
}

impl Default for BaseImage {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            is_parameter: false,
            parameter_name: "base_image_path".to_string(),
        }
    }
}

/// Image placed on top of the background.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageLayer {
    pub image_path: String,
    pub size: Size,
    /// Degrees, emitted verbatim (sign included).
    pub rotation: f64,
    /// `0.0..=1.0`
    pub opacity: f64,
    pub is_path_parameter: bool,
    pub parameter_name: String,
}

impl Default for ImageLayer {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            size: Size::DEFAULT,
            rotation: 0.0,
            opacity: 1.0,
            is_path_parameter: false,
            parameter_name: "image_path".to_string(),
        }
    }
}

/// Text block anchored at the layer position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLayer {
    pub text: String,
    pub font_path: String,
    pub font_size: u32,
    pub color: Rgba8,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    pub is_text_parameter: bool,
    pub text_parameter_name: String,
    pub is_font_parameter: bool,
    pub font_parameter_name: String,
}

impl TextLayer {
    /// `true` when the anchor is the top-left corner, so the position is the draw origin.
    pub fn is_natural_alignment(&self) -> bool {
        self.horizontal_align == HorizontalAlign::Left && self.vertical_align == VerticalAlign::Top
    }
}

impl Default for TextLayer {
    fn default() -> Self {
        Self {
            text: "Sample text".to_string(),
            font_path: String::new(),
            font_size: 24,
            color: Rgba8::BLACK,
            horizontal_align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            is_text_parameter: false,
            text_parameter_name: "text".to_string(),
            is_font_parameter: false,
            font_parameter_name: "font_path".to_string(),
        }
    }
}

/// Kind-specific payload of a [`Layer`], tagged by `layer_type` in documents.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layer_type", rename_all = "lowercase")]
pub enum LayerKind {
    Base(BaseImage),
    Image(ImageLayer),
    Text(TextLayer),
}

/// One visual element of a template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    id: LayerId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub position: Position,
    #[serde(flatten)]
    kind: LayerKind,
}

fn visible_by_default() -> bool {
    true
}

impl Layer {
    /// New visible layer at the origin with a fresh id.
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self::with_id(LayerId::new(), name, kind)
    }

    /// New visible layer at the origin with a caller-supplied id.
    pub fn with_id(id: LayerId, name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id,
            name: name.into(),
            visible: true,
            position: Position::default(),
            kind,
        }
    }

    pub fn id(&self) -> &LayerId {
        &self.id
    }

    pub fn layer_type(&self) -> LayerType {
        match self.kind {
            LayerKind::Base(_) => LayerType::Base,
            LayerKind::Image(_) => LayerType::Image,
            LayerKind::Text(_) => LayerType::Text,
        }
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    /// Mutable access to the payload. The variant itself cannot be swapped through this,
    /// only its fields edited.
    pub fn kind_mut(&mut self) -> LayerKindMut<'_> {
        match &mut self.kind {
            LayerKind::Base(b) => LayerKindMut::Base(b),
            LayerKind::Image(i) => LayerKindMut::Image(i),
            LayerKind::Text(t) => LayerKindMut::Text(t),
        }
    }

    pub fn as_base(&self) -> Option<&BaseImage> {
        match &self.kind {
            LayerKind::Base(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageLayer> {
        match &self.kind {
            LayerKind::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextLayer> {
        match &self.kind {
            LayerKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_image_mut(&mut self) -> Option<&mut ImageLayer> {
        match &mut self.kind {
            LayerKind::Image(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextLayer> {
        match &mut self.kind {
            LayerKind::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Field-level mutable view of a [`LayerKind`].
#[derive(Debug)]
pub enum LayerKindMut<'a> {
    Base(&'a mut BaseImage),
    Image(&'a mut ImageLayer),
    Text(&'a mut TextLayer),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tag_follows_variant() {
        let img = Layer::new("logo", LayerKind::Image(ImageLayer::default()));
        let txt = Layer::new("title", LayerKind::Text(TextLayer::default()));
        let base = Layer::new("bg", LayerKind::Base(BaseImage::default()));
        assert_eq!(img.layer_type(), LayerType::Image);
        assert_eq!(txt.layer_type(), LayerType::Text);
        assert_eq!(base.layer_type(), LayerType::Base);
        assert!(img.as_text().is_none());
        assert!(txt.as_text().is_some());
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = Layer::new("a", LayerKind::Image(ImageLayer::default()));
        let b = Layer::new("a", LayerKind::Image(ImageLayer::default()));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn defaults_match_editor_defaults() {
        let img = ImageLayer::default();
        assert_eq!(img.size, Size::new(100, 100));
        assert_eq!(img.opacity, 1.0);
        assert_eq!(img.parameter_name, "image_path");

        let txt = TextLayer::default();
        assert_eq!(txt.font_size, 24);
        assert_eq!(txt.color, Rgba8::new(0, 0, 0, 255));
        assert!(txt.is_natural_alignment());
        assert_eq!(BaseImage::default().parameter_name, "base_image_path");
    }

    #[test]
    fn kind_mut_edits_in_place() {
        let mut layer = Layer::new("t", LayerKind::Text(TextLayer::default()));
        if let LayerKindMut::Text(t) = layer.kind_mut() {
            t.horizontal_align = HorizontalAlign::Center;
        }
        assert_eq!(
            layer.as_text().map(|t| t.horizontal_align),
            Some(HorizontalAlign::Center)
        );
        assert!(!layer.as_text().unwrap().is_natural_alignment());
    }

    #[test]
    fn layer_json_is_flat_and_tagged() {
        let json = r#"{
            "id": "abc",
            "name": "title",
            "position": {"x": 5, "y": 6},
            "layer_type": "text",
            "text": "Hi",
            "horizontal_align": "right"
        }"#;
        let layer: Layer = serde_json::from_str(json).unwrap();
        assert_eq!(layer.id().as_str(), "abc");
        assert!(layer.visible);
        assert_eq!(layer.position, Position::new(5, 6));
        let t = layer.as_text().unwrap();
        assert_eq!(t.text, "Hi");
        assert_eq!(t.horizontal_align, HorizontalAlign::Right);
        assert_eq!(t.font_size, 24);

        let v = serde_json::to_value(&layer).unwrap();
        assert_eq!(v["layer_type"], "text");
        assert_eq!(v["color"], serde_json::json!([0, 0, 0, 255]));
    }

    #[test]
    fn alignment_names_are_lowercase() {
        let s = serde_json::to_string(&HorizontalAlign::Center).unwrap();
        assert_eq!(s, "\"center\"");
        let v: VerticalAlign = serde_json::from_str("\"bottom\"").unwrap();
        assert_eq!(v, VerticalAlign::Bottom);
    }
}
