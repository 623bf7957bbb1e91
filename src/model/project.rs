use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{PilgenError, PilgenResult},
    model::layer::{BaseImage, ImageLayer, Layer, LayerId, LayerKind, LayerType, TextLayer},
};

/// Version written into exported documents.
pub const DOCUMENT_VERSION: &str = "1.0.0";

/// In-memory template: an optional background plus an ordered stack of layers.
///
/// Stack order is paint order: index 0 is painted first (bottom), later entries draw on top.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectModel {
    pub project_name: String,
    /// Default name of the generated function.
    pub function_name: String,
    base: Option<Layer>,
    layers: Vec<Layer>,
}

impl Default for ProjectModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectModel {
    pub fn new() -> Self {
        Self {
            project_name: "Untitled project".to_string(),
            function_name: "generate_image".to_string(),
            base: None,
            layers: Vec::new(),
        }
    }

    pub fn base_image(&self) -> Option<&Layer> {
        self.base.as_ref()
    }

    /// Replace the background wholesale. There is never more than one.
    pub fn set_base_image(
        &mut self,
        image_path: impl Into<String>,
        name: impl Into<String>,
        is_parameter: bool,
        parameter_name: impl Into<String>,
    ) -> &Layer {
        let base = Layer::new(
            name,
            LayerKind::Base(BaseImage {
                image_path: image_path.into(),
                is_parameter,
                parameter_name: parameter_name.into(),
            }),
        );
        self.base.insert(base)
    }

    /// Install an already-built base layer (used when loading documents).
    pub fn set_base_layer(&mut self, layer: Layer) -> PilgenResult<()> {
        if layer.layer_type() != LayerType::Base {
            return Err(PilgenError::validation(format!(
                "layer '{}' is not a base layer",
                layer.id()
            )));
        }
        self.base = Some(layer);
        Ok(())
    }

    pub fn clear_base_image(&mut self) -> Option<Layer> {
        self.base.take()
    }

    /// Append `layer` on top of the stack.
    pub fn add_layer(&mut self, layer: Layer) -> PilgenResult<()> {
        if layer.layer_type() == LayerType::Base {
            return Err(PilgenError::validation(
                "base layers are set with set_base_image, not added to the stack",
            ));
        }
        self.layers.push(layer);
        Ok(())
    }

    /// Remove the first layer with `id`. Absent ids are a no-op.
    pub fn remove_layer(&mut self, id: &LayerId) -> Option<Layer> {
        let idx = self.index_of(id)?;
        Some(self.layers.remove(idx))
    }

    pub fn get_layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    pub fn get_layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    /// Replace the layer sharing `layer`'s id. Returns `false` when no such layer exists.
    pub fn update_layer(&mut self, layer: Layer) -> bool {
        match self.index_of(layer.id()) {
            Some(idx) => {
                self.layers[idx] = layer;
                true
            }
            None => false,
        }
    }

    /// Layers of one type in paint order. `Base` yields the background if set.
    pub fn get_layers_by_type(&self, ty: LayerType) -> Vec<&Layer> {
        match ty {
            LayerType::Base => self.base.iter().collect(),
            LayerType::Image | LayerType::Text => {
                self.layers.iter().filter(|l| l.layer_type() == ty).collect()
            }
        }
    }

    /// Image layers in paint order, paired with their payload.
    pub fn image_layers(&self) -> impl Iterator<Item = (&Layer, &ImageLayer)> {
        self.layers
            .iter()
            .filter_map(|l| l.as_image().map(|i| (l, i)))
    }

    /// Text layers in paint order, paired with their payload.
    pub fn text_layers(&self) -> impl Iterator<Item = (&Layer, &TextLayer)> {
        self.layers
            .iter()
            .filter_map(|l| l.as_text().map(|t| (l, t)))
    }

    /// All stacked layers in paint order (the base is not included).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn clear_layers(&mut self) {
        self.layers.clear();
    }

    /// Move a layer to `new_index` in paint order.
    ///
    /// No-op when `id` is unknown or `new_index` is not a valid index of the current stack.
    pub fn move_layer(&mut self, id: &LayerId, new_index: usize) {
        let Some(old_index) = self.index_of(id) else {
            return;
        };
        if new_index >= self.layers.len() {
            return;
        }
        let layer = self.layers.remove(old_index);
        self.layers.insert(new_index, layer);
    }

    fn index_of(&self, id: &LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }

    pub fn validate(&self) -> PilgenResult<()> {
        if let Some(base) = &self.base
            && base.layer_type() != LayerType::Base
        {
            return Err(PilgenError::validation("base slot holds a non-base layer"));
        }

        let mut seen = HashSet::new();
        for layer in self.base.iter().chain(&self.layers) {
            if !seen.insert(layer.id()) {
                return Err(PilgenError::validation(format!(
                    "duplicate layer id '{}'",
                    layer.id()
                )));
            }
        }

        for layer in &self.layers {
            match layer.kind() {
                LayerKind::Base(_) => {
                    return Err(PilgenError::validation(format!(
                        "layer '{}' is a base layer inside the stack",
                        layer.id()
                    )));
                }
                LayerKind::Image(img) => {
                    if !img.opacity.is_finite() || !(0.0..=1.0).contains(&img.opacity) {
                        return Err(PilgenError::validation(format!(
                            "image layer '{}' opacity must be within [0, 1], got {}",
                            layer.name, img.opacity
                        )));
                    }
                    if !img.rotation.is_finite() {
                        return Err(PilgenError::validation(format!(
                            "image layer '{}' rotation must be finite",
                            layer.name
                        )));
                    }
                    if img.size.width == 0 || img.size.height == 0 {
                        return Err(PilgenError::validation(format!(
                            "image layer '{}' size must be > 0",
                            layer.name
                        )));
                    }
                }
                LayerKind::Text(txt) => {
                    if txt.font_size == 0 {
                        return Err(PilgenError::validation(format!(
                            "text layer '{}' font_size must be > 0",
                            layer.name
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Full export of the model as a serializable document.
    pub fn to_document(&self) -> ProjectDocument {
        ProjectDocument {
            version: DOCUMENT_VERSION.to_string(),
            project_name: self.project_name.clone(),
            function_name: self.function_name.clone(),
            base_image: self.base.clone(),
            layers: self.layers.clone(),
        }
    }

    /// Rebuild a model from a document. The result is validated.
    pub fn from_document(doc: ProjectDocument) -> PilgenResult<Self> {
        let mut model = Self::new();
        model.project_name = doc.project_name;
        model.function_name = doc.function_name;
        if let Some(base) = doc.base_image {
            model.set_base_layer(base)?;
        }
        for layer in doc.layers {
            model.add_layer(layer)?;
        }
        model.validate()?;
        Ok(model)
    }
}

/// Serializable snapshot of a [`ProjectModel`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectDocument {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_project_name")]
    pub project_name: String,
    #[serde(default = "default_function_name")]
    pub function_name: String,
    #[serde(default)]
    pub base_image: Option<Layer>,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

fn default_project_name() -> String {
    ProjectModel::new().project_name
}

fn default_function_name() -> String {
    ProjectModel::new().function_name
}
