use crate::{
    foundation::{
        core::{Position, Rgba8, Size},
        error::{PilgenError, PilgenResult},
    },
    model::layer::{
        HorizontalAlign, ImageLayer, Layer, LayerId, LayerKind, TextLayer, VerticalAlign,
    },
};

pub struct ImageLayerBuilder {
    id: Option<LayerId>,
    name: String,
    visible: bool,
    position: Position,
    props: ImageLayer,
}

impl ImageLayerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            visible: true,
            position: Position::default(),
            props: ImageLayer::default(),
        }
    }

    pub fn id(mut self, id: LayerId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.props.image_path = path.into();
        self
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.props.size = Size::new(width, height);
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.props.rotation = degrees;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.props.opacity = opacity;
        self
    }

    /// Take the image path from a function parameter named `name`.
    pub fn path_parameter(mut self, name: impl Into<String>) -> Self {
        self.props.is_path_parameter = true;
        self.props.parameter_name = name.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn build(self) -> PilgenResult<Layer> {
        let p = &self.props;
        if !p.opacity.is_finite() || !(0.0..=1.0).contains(&p.opacity) {
            return Err(PilgenError::validation(format!(
                "opacity must be within [0, 1], got {}",
                p.opacity
            )));
        }
        if !p.rotation.is_finite() {
            return Err(PilgenError::validation("rotation must be finite"));
        }
        if p.size.width == 0 || p.size.height == 0 {
            return Err(PilgenError::validation("image size must be > 0"));
        }
        if p.is_path_parameter && p.parameter_name.trim().is_empty() {
            return Err(PilgenError::validation("parameter name must be non-empty"));
        }

        let mut layer = Layer::with_id(
            self.id.unwrap_or_default(),
            self.name,
            LayerKind::Image(self.props),
        );
        layer.visible = self.visible;
        layer.position = self.position;
        Ok(layer)
    }
}

pub struct TextLayerBuilder {
    id: Option<LayerId>,
    name: String,
    visible: bool,
    position: Position,
    props: TextLayer,
}

impl TextLayerBuilder {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            visible: true,
            position: Position::default(),
            props: TextLayer {
                text: text.into(),
                ..TextLayer::default()
            },
        }
    }

    pub fn id(mut self, id: LayerId) -> Self {
        self.id = Some(id);
        self
    }

    /// Anchor point; its meaning depends on the alignment pair.
    pub fn anchor(mut self, x: i32, y: i32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn font(mut self, path: impl Into<String>, size: u32) -> Self {
        self.props.font_path = path.into();
        self.props.font_size = size;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.props.font_size = size;
        self
    }

    pub fn color(mut self, color: Rgba8) -> Self {
        self.props.color = color;
        self
    }

    pub fn align(mut self, horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        self.props.horizontal_align = horizontal;
        self.props.vertical_align = vertical;
        self
    }

    /// Take the text from a function parameter named `name`.
    pub fn text_parameter(mut self, name: impl Into<String>) -> Self {
        self.props.is_text_parameter = true;
        self.props.text_parameter_name = name.into();
        self
    }

    /// Take the font path from a function parameter named `name`.
    pub fn font_parameter(mut self, name: impl Into<String>) -> Self {
        self.props.is_font_parameter = true;
        self.props.font_parameter_name = name.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn build(self) -> PilgenResult<Layer> {
        let p = &self.props;
        if p.font_size == 0 {
            return Err(PilgenError::validation("font size must be > 0"));
        }
        if p.is_text_parameter && p.text_parameter_name.trim().is_empty() {
            return Err(PilgenError::validation(
                "text parameter name must be non-empty",
            ));
        }
        if p.is_font_parameter && p.font_parameter_name.trim().is_empty() {
            return Err(PilgenError::validation(
                "font parameter name must be non-empty",
            ));
        }

        let mut layer = Layer::with_id(
            self.id.unwrap_or_default(),
            self.name,
            LayerKind::Text(self.props),
        );
        layer.visible = self.visible;
        layer.position = self.position;
        Ok(layer)
    }
}
