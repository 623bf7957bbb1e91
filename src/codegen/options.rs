use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::model::project::ProjectModel;

/// Canvas used when the base layer carries neither a path nor a parameter.
pub const BLANK_CANVAS_SIZE: (u32, u32) = (800, 600);

/// File name the example block saves to.
pub const EXAMPLE_OUTPUT_FILE: &str = "output.png";

/// How the generated function ends. Chosen once per generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Finish {
    /// Save to a path passed as the first parameter.
    SaveToPath { output_param: String },
    /// Return the composed image object.
    ReturnImage,
}

impl Finish {
    pub fn save_to(output_param: impl Into<String>) -> Self {
        Self::SaveToPath {
            output_param: output_param.into(),
        }
    }

    /// Name of the output parameter, when there is one.
    pub fn output_param(&self) -> Option<&str> {
        match self {
            Self::SaveToPath { output_param } => Some(output_param),
            Self::ReturnImage => None,
        }
    }
}

impl Default for Finish {
    fn default() -> Self {
        Self::save_to("output_path")
    }
}

/// Settings for one generation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    pub function_name: String,
    pub finish: Finish,
    /// Directory baked-in paths are made relative to (normally the project file's directory).
    pub project_dir: Option<PathBuf>,
    /// Refuse generation when two parameters share a name instead of passing them through.
    pub strict_parameters: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            function_name: "generate_image".to_string(),
            finish: Finish::default(),
            project_dir: None,
            strict_parameters: false,
        }
    }
}

impl EmitOptions {
    /// Defaults with the project's own function name.
    pub fn for_project(model: &ProjectModel) -> Self {
        Self {
            function_name: model.function_name.clone(),
            ..Self::default()
        }
    }

    pub fn with_finish(mut self, finish: Finish) -> Self {
        self.finish = finish;
        self
    }

    pub fn with_project_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.project_dir = Some(dir.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_parameters = strict;
        self
    }
}
