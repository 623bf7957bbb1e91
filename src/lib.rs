//! `pilgen` compiles layered image templates into Pillow source code.
//!
//! A template is a [`ProjectModel`]: an optional background ([`BaseImage`]) plus an ordered stack
//! of image and text [`Layer`]s. [`generate`] turns a snapshot of it into the text of a Python
//! function that rebuilds the composition, with selected paths, texts and fonts lifted into
//! function parameters.
//!
//! ```no_run
//! use pilgen::{EmitOptions, Finish, ProjectModel, TextLayerBuilder, generate};
//!
//! let mut model = ProjectModel::new();
//! model.set_base_image("bg.png", "Base", false, "base_image_path");
//! model.add_layer(TextLayerBuilder::new("title", "Hello").anchor(10, 10).build()?)?;
//!
//! let opts = EmitOptions::for_project(&model).with_finish(Finish::ReturnImage);
//! let code = generate(&model, &opts)?;
//! println!("{code}");
//! # Ok::<(), pilgen::PilgenError>(())
//! ```
#![forbid(unsafe_code)]

pub mod codegen;
pub mod foundation;
pub mod model;
pub mod project_file;

pub use codegen::{
    EmitOptions, Finish, GeneratedCode, ParamSpec, ParamType, collect_parameters, generate,
};
pub use foundation::core::{Position, Rgba8, Size};
pub use foundation::error::{PilgenError, PilgenResult};
pub use model::dsl::{ImageLayerBuilder, TextLayerBuilder};
pub use model::layer::{
    BaseImage, HorizontalAlign, ImageLayer, Layer, LayerId, LayerKind, LayerKindMut, LayerType,
    TextLayer, VerticalAlign,
};
pub use model::project::{ProjectDocument, ProjectModel};
pub use project_file::{load_project, parse_project, save_project};
