use std::fmt;

use serde::Serialize;

use crate::{
    codegen::{
        literal::{
            color_tuple, comment_text, docstring_text, float_literal, path_literal,
            string_literal,
        },
        options::{BLANK_CANVAS_SIZE, EXAMPLE_OUTPUT_FILE, EmitOptions, Finish},
        params::{ParamSpec, collect_parameters, duplicate_names},
        paths::relative_to,
        writer::SourceWriter,
    },
    foundation::{
        core::{Position, Rgba8},
        error::{PilgenError, PilgenResult},
    },
    model::{
        layer::{BaseImage, HorizontalAlign, ImageLayer, Layer, TextLayer, VerticalAlign},
        project::ProjectModel,
    },
};

/// Output of one generation pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedCode {
    pub function_name: String,
    /// Complete module source: imports, function, example block.
    pub source: String,
    /// Parameter records in signature order.
    pub parameters: Vec<ParamSpec>,
}

impl GeneratedCode {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.source.lines()
    }

    /// Parameter names that appear more than once in the signature.
    pub fn duplicate_parameters(&self) -> Vec<&str> {
        duplicate_names(&self.parameters)
    }
}

impl fmt::Display for GeneratedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Compile `model` into the source of a Pillow function.
///
/// Refuses with [`PilgenError::MissingBaseImage`] when no base layer is set, and with
/// [`PilgenError::DuplicateParameter`] when `opts.strict_parameters` is on and two parameters
/// collide. Otherwise always produces a complete module; layers that cannot be emitted are
/// reduced to an explanatory comment.
#[tracing::instrument(skip(model, opts), fields(function = %opts.function_name))]
pub fn generate(model: &ProjectModel, opts: &EmitOptions) -> PilgenResult<GeneratedCode> {
    let Some(base) = model.base_image().and_then(Layer::as_base) else {
        tracing::warn!("refusing to generate: no base image configured");
        return Err(PilgenError::MissingBaseImage);
    };

    let parameters = collect_parameters(model, &opts.finish);
    let dups = duplicate_names(&parameters);
    if let Some(first) = dups.first() {
        if opts.strict_parameters {
            tracing::warn!(name = %first, "refusing to generate: duplicate parameter");
            return Err(PilgenError::DuplicateParameter((*first).to_string()));
        }
        for name in &dups {
            tracing::warn!(name = %name, "duplicate parameter name passed through to signature");
        }
    }

    let mut emitter = Emitter {
        model,
        opts,
        w: SourceWriter::new(),
        draw_ready: false,
    };
    emitter.imports();
    emitter.signature(&parameters);
    emitter.w.push_indent();
    emitter.docstring(&parameters);
    emitter.base(base);
    emitter.image_layers();
    emitter.text_layers();
    emitter.finish();
    emitter.w.pop_indent();
    emitter.example_block(&parameters);

    let source = emitter.w.finish();
    tracing::debug!(
        lines = source.lines().count(),
        params = parameters.len(),
        "generated function"
    );

    Ok(GeneratedCode {
        function_name: opts.function_name.clone(),
        source,
        parameters,
    })
}

struct Emitter<'a> {
    model: &'a ProjectModel,
    opts: &'a EmitOptions,
    w: SourceWriter,
    draw_ready: bool,
}

impl Emitter<'_> {
    fn baked_path(&self, path: &str) -> String {
        path_literal(&relative_to(path, self.opts.project_dir.as_deref()))
    }

    fn imports(&mut self) {
        self.w.line("from PIL import Image, ImageDraw, ImageFont");
        self.w.blank();
    }

    fn signature(&mut self, params: &[ParamSpec]) {
        let args = params
            .iter()
            .map(|p| format!("{}: {}", p.name, p.ty.annotation()))
            .collect::<Vec<_>>()
            .join(", ");
        self.w
            .line(format!("def {}({}):", self.opts.function_name, args));
    }

    fn docstring(&mut self, params: &[ParamSpec]) {
        let finish = &self.opts.finish;
        let w = &mut self.w;
        w.line("\"\"\"");
        w.line(format!(
            "Generate image - {}",
            docstring_text(&self.model.project_name)
        ));
        if !params.is_empty() {
            w.blank();
            w.line("Args:");
            w.indented(|w| {
                for p in params {
                    w.line(format!("{}: {}", p.name, docstring_text(&p.description)));
                }
            });
        }
        w.blank();
        w.line("Returns:");
        w.indented(|w| match finish {
            Finish::ReturnImage => w.line("PIL.Image.Image: the composed image"),
            Finish::SaveToPath { output_param } => {
                w.line(format!("None: the composed image is saved to {output_param}"))
            }
        });
        w.line("\"\"\"");
    }

    fn base(&mut self, base: &BaseImage) {
        if base.is_parameter {
            self.w.comment("Base image");
            self.w
                .line(format!("base_image = Image.open({})", base.parameter_name));
            self.w.line("result = base_image.copy()");
        } else if !base.image_path.is_empty() {
            let lit = self.baked_path(&base.image_path);
            self.w.comment("Base image");
            self.w.line(format!("base_image = Image.open({lit})"));
            self.w.line("result = base_image.copy()");
        } else {
            let (width, height) = BLANK_CANVAS_SIZE;
            self.w.comment("Blank canvas");
            self.w.line(format!(
                "result = Image.new(\"RGBA\", ({width}, {height}), {})",
                color_tuple(Rgba8::WHITE)
            ));
        }
        self.w.blank();
    }

    fn image_layers(&mut self) {
        let model = self.model;
        let layers: Vec<_> = model.image_layers().collect();
        if layers.is_empty() {
            return;
        }
        self.w.comment("Image layers");
        for (i, (layer, img)) in layers.into_iter().enumerate() {
            self.image_layer(i, layer, img);
        }
    }

    fn image_layer(&mut self, index: usize, layer: &Layer, img: &ImageLayer) {
        let name = comment_text(&layer.name);
        if !layer.visible {
            tracing::debug!(layer = %layer.id(), "skipping hidden image layer");
            self.w.comment(format!("Image layer \"{name}\" is hidden"));
            return;
        }

        let source = if img.is_path_parameter {
            img.parameter_name.clone()
        } else if !img.image_path.is_empty() {
            self.baked_path(&img.image_path)
        } else {
            tracing::debug!(layer = %layer.id(), "skipping image layer without a path");
            self.w.comment(format!(
                "Warning: image layer \"{name}\" has no image path; skipped"
            ));
            return;
        };

        let var = format!("image_{index}");
        let w = &mut self.w;
        w.line(format!("{var} = Image.open({source})"));

        if img.size.differs_from_default() {
            w.line(format!(
                "{var} = {var}.resize(({}, {}))",
                img.size.width, img.size.height
            ));
        }

        if img.opacity < 1.0 {
            w.comment("Opacity");
            w.line(format!("if {var}.mode != \"RGBA\":"));
            w.indented(|w| w.line(format!("{var} = {var}.convert(\"RGBA\")")));
            w.line(format!("alpha = {var}.split()[-1]"));
            w.line(format!(
                "alpha = alpha.point(lambda p: int(p * {}))",
                float_literal(img.opacity)
            ));
            w.line(format!("{var}.putalpha(alpha)"));
        }

        if img.rotation != 0.0 {
            w.line(format!(
                "{var} = {var}.rotate({}, expand=True)",
                float_literal(img.rotation)
            ));
        }

        let Position { x, y } = layer.position;
        w.line(format!("result.paste({var}, ({x}, {y}), {var})"));
        w.blank();
    }

    fn text_layers(&mut self) {
        let model = self.model;
        let layers: Vec<_> = model.text_layers().collect();
        if layers.is_empty() {
            return;
        }
        self.w.comment("Text layers");
        for (i, (layer, txt)) in layers.into_iter().enumerate() {
            self.text_layer(i, layer, txt);
        }
    }

    fn text_layer(&mut self, index: usize, layer: &Layer, txt: &TextLayer) {
        if !layer.visible {
            tracing::debug!(layer = %layer.id(), "skipping hidden text layer");
            self.w.comment(format!(
                "Text layer \"{}\" is hidden",
                comment_text(&layer.name)
            ));
            return;
        }

        if !self.draw_ready {
            self.w.line("draw = ImageDraw.Draw(result)");
            self.draw_ready = true;
        }

        let text = if txt.is_text_parameter {
            txt.text_parameter_name.clone()
        } else {
            string_literal(&txt.text)
        };

        let font = format!("font_{index}");
        let font_source = if txt.is_font_parameter {
            Some(txt.font_parameter_name.clone())
        } else if !txt.font_path.is_empty() {
            Some(self.baked_path(&txt.font_path))
        } else {
            None
        };

        let w = &mut self.w;
        match font_source {
            Some(src) => {
                w.line("try:");
                w.indented(|w| {
                    w.line(format!(
                        "{font} = ImageFont.truetype({src}, {})",
                        txt.font_size
                    ))
                });
                w.line("except Exception:");
                w.indented(|w| w.line(format!("{font} = ImageFont.load_default()")));
            }
            None => w.line(format!("{font} = ImageFont.load_default()")),
        }

        let fill = color_tuple(txt.color);
        let Position { x, y } = layer.position;
        if txt.is_natural_alignment() {
            w.line(format!(
                "draw.text(({x}, {y}), {text}, font={font}, fill={fill})"
            ));
        } else {
            w.comment("Align text to its anchor");
            w.line(format!(
                "text_bbox = draw.textbbox((0, 0), {text}, font={font})"
            ));
            w.line("text_width = text_bbox[2] - text_bbox[0]");
            w.line("text_height = text_bbox[3] - text_bbox[1]");
            w.line(match txt.horizontal_align {
                HorizontalAlign::Left => format!("text_x = {x}"),
                HorizontalAlign::Center => format!("text_x = {x} - text_width // 2"),
                HorizontalAlign::Right => format!("text_x = {x} - text_width"),
            });
            w.line(match txt.vertical_align {
                VerticalAlign::Top => format!("text_y = {y}"),
                VerticalAlign::Middle => format!("text_y = {y} - text_height // 2"),
                VerticalAlign::Bottom => format!("text_y = {y} - text_height"),
            });
            w.line(format!(
                "draw.text((text_x, text_y), {text}, font={font}, fill={fill})"
            ));
        }
        w.blank();
    }

    fn finish(&mut self) {
        match &self.opts.finish {
            Finish::SaveToPath { output_param } => {
                self.w.comment("Save the result");
                self.w.line(format!("result.save({output_param})"));
                self.w
                    .line(format!("print(f\"Image saved to: {{{output_param}}}\")"));
            }
            Finish::ReturnImage => {
                self.w.comment("Return the composed image");
                self.w.line("return result");
            }
        }
    }

    fn example_block(&mut self, params: &[ParamSpec]) {
        let finish = &self.opts.finish;
        let func = &self.opts.function_name;
        let w = &mut self.w;

        w.blank();
        w.blank();
        w.comment("Example usage");
        w.line("if __name__ == \"__main__\":");
        w.indented(|w| {
            let extra_args = match finish {
                Finish::SaveToPath { .. } => params.len() > 1,
                Finish::ReturnImage => !params.is_empty(),
            };

            let call = if extra_args {
                w.line("params = {");
                w.indented(|w| {
                    for p in params {
                        w.line(format!(
                            "{}: {},",
                            string_literal(&p.name),
                            string_literal(p.example_value(finish))
                        ));
                    }
                });
                w.line("}");
                format!("{func}(**params)")
            } else {
                match finish {
                    Finish::SaveToPath { .. } => {
                        format!("{func}({})", string_literal(EXAMPLE_OUTPUT_FILE))
                    }
                    Finish::ReturnImage => format!("{func}()"),
                }
            };

            match finish {
                Finish::SaveToPath { .. } => w.line(call),
                Finish::ReturnImage => {
                    w.line(format!("image = {call}"));
                    w.line(format!(
                        "image.save({})",
                        string_literal(EXAMPLE_OUTPUT_FILE)
                    ));
                    w.line(format!(
                        "print({})",
                        string_literal(&format!("Image saved to: {EXAMPLE_OUTPUT_FILE}"))
                    ));
                }
            }
        });
    }
}
