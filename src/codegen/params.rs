use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{
    codegen::options::{EXAMPLE_OUTPUT_FILE, Finish},
    model::project::ProjectModel,
};

/// Declared type of a generated parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Str,
}

impl ParamType {
    /// Annotation used in the emitted signature.
    pub fn annotation(self) -> &'static str {
        match self {
            Self::Str => "str",
        }
    }
}

/// One formal parameter of the generated function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ParamType,
    pub description: String,
}

impl ParamSpec {
    fn string(name: &str, description: String) -> Self {
        Self {
            name: name.to_string(),
            ty: ParamType::Str,
            description,
        }
    }

    /// Placeholder argument used by the example block.
    pub fn example_value(&self, finish: &Finish) -> &'static str {
        if finish.output_param() == Some(self.name.as_str()) {
            EXAMPLE_OUTPUT_FILE
        } else if self.name.to_lowercase().contains("path") {
            "path/to/file"
        } else {
            "example_value"
        }
    }
}

/// Collect parameters in signature order.
///
/// Order: output path (save mode only), base image, image layers in paint order, then text
/// layers in paint order (text before font). Hidden layers still contribute; names are not
/// deduplicated.
pub fn collect_parameters(model: &ProjectModel, finish: &Finish) -> Vec<ParamSpec> {
    let mut out = Vec::new();

    if let Some(name) = finish.output_param() {
        out.push(ParamSpec::string(name, "Output image path".to_string()));
    }

    if let Some(base) = model.base_image().and_then(|l| l.as_base())
        && base.is_parameter
    {
        out.push(ParamSpec::string(
            &base.parameter_name,
            "Base image path".to_string(),
        ));
    }

    for (layer, img) in model.image_layers() {
        if img.is_path_parameter {
            out.push(ParamSpec::string(
                &img.parameter_name,
                format!("Image path - {}", layer.name),
            ));
        }
    }

    for (layer, txt) in model.text_layers() {
        if txt.is_text_parameter {
            out.push(ParamSpec::string(
                &txt.text_parameter_name,
                format!("Text content - {}", layer.name),
            ));
        }
        if txt.is_font_parameter {
            out.push(ParamSpec::string(
                &txt.font_parameter_name,
                format!("Font path - {}", layer.name),
            ));
        }
    }

    out
}

/// Names that occur more than once, each reported once, in first-repeat order.
pub fn duplicate_names(params: &[ParamSpec]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut dups = Vec::new();
    for p in params {
        if !seen.insert(p.name.as_str()) && reported.insert(p.name.as_str()) {
            dups.push(p.name.as_str());
        }
    }
    dups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dsl::{ImageLayerBuilder, TextLayerBuilder};

    fn names(params: &[ParamSpec]) -> Vec<&str> {
        params.iter().map(|p| p.name.as_str()).collect()
    }

    fn model() -> ProjectModel {
        let mut m = ProjectModel::new();
        m.set_base_image("bg.png", "Base", true, "bg");
        m.add_layer(
            TextLayerBuilder::new("title", "x")
                .text_parameter("msg")
                .font_parameter("font_path")
                .build()
                .unwrap(),
        )
        .unwrap();
        m.add_layer(
            ImageLayerBuilder::new("logo")
                .path_parameter("logo")
                .hidden()
                .build()
                .unwrap(),
        )
        .unwrap();
        m.add_layer(ImageLayerBuilder::new("plain").path("p.png").build().unwrap())
            .unwrap();
        m
    }

    #[test]
    fn order_is_output_base_images_texts() {
        let p = collect_parameters(&model(), &Finish::default());
        assert_eq!(names(&p), ["output_path", "bg", "logo", "msg", "font_path"]);
        assert!(p.iter().all(|p| p.ty == ParamType::Str));
        assert_eq!(p[2].description, "Image path - logo");
        assert_eq!(p[4].description, "Font path - title");
    }

    #[test]
    fn return_mode_has_no_output_param() {
        let p = collect_parameters(&model(), &Finish::ReturnImage);
        assert_eq!(names(&p), ["bg", "logo", "msg", "font_path"]);
    }

    #[test]
    fn example_values_follow_names() {
        let finish = Finish::default();
        let p = collect_parameters(&model(), &finish);
        let values: Vec<_> = p.iter().map(|p| p.example_value(&finish)).collect();
        assert_eq!(
            values,
            [
                "output.png",
                "example_value",
                "example_value",
                "example_value",
                "path/to/file"
            ]
        );
    }

    #[test]
    fn duplicates_are_reported_once() {
        let mut m = ProjectModel::new();
        for _ in 0..3 {
            m.add_layer(
                ImageLayerBuilder::new("i")
                    .path_parameter("img")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        }
        let p = collect_parameters(&m, &Finish::ReturnImage);
        assert_eq!(p.len(), 3);
        assert_eq!(duplicate_names(&p), ["img"]);
    }

    #[test]
    fn record_serializes_type_key() {
        let p = ParamSpec::string("bg", "Base image path".to_string());
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["type"], "str");
    }
}
