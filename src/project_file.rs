//! Project files: a pretty-printed JSON [`ProjectDocument`] whose asset paths are stored relative
//! to the file's own directory.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    codegen::paths::{relative_to, resolve_against},
    foundation::error::{PilgenError, PilgenResult},
    model::{
        layer::{Layer, LayerKindMut},
        project::{ProjectDocument, ProjectModel},
    },
};

/// Directory that relative paths inside the project file at `path` refer to.
pub fn project_dir(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    std::path::absolute(parent).unwrap_or_else(|_| parent.to_path_buf())
}

/// Export `model` with every asset path rewritten relative to `dir`.
///
/// Paths with no relative form (another drive) stay absolute.
pub fn to_portable_document(model: &ProjectModel, dir: &Path) -> ProjectDocument {
    let mut doc = model.to_document();
    for layer in doc.base_image.iter_mut().chain(doc.layers.iter_mut()) {
        rewrite_paths(layer, |p| relative_to(p, Some(dir)));
    }
    doc
}

/// Rebuild a model from a document whose relative paths refer to `dir`.
pub fn from_portable_document(mut doc: ProjectDocument, dir: &Path) -> PilgenResult<ProjectModel> {
    for layer in doc.base_image.iter_mut().chain(doc.layers.iter_mut()) {
        rewrite_paths(layer, |p| resolve_against(p, dir));
    }
    ProjectModel::from_document(doc)
}

fn rewrite_paths(layer: &mut Layer, f: impl Fn(&str) -> String) {
    match layer.kind_mut() {
        LayerKindMut::Base(b) if !b.image_path.is_empty() => b.image_path = f(&b.image_path),
        LayerKindMut::Image(i) if !i.image_path.is_empty() => i.image_path = f(&i.image_path),
        LayerKindMut::Text(t) if !t.font_path.is_empty() => t.font_path = f(&t.font_path),
        _ => {}
    }
}

#[tracing::instrument(skip(model))]
pub fn save_project(model: &ProjectModel, path: &Path) -> PilgenResult<()> {
    let doc = to_portable_document(model, &project_dir(path));

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create project dir '{}'", parent.display()))?;
    }

    let f = File::create(path).with_context(|| format!("create project '{}'", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &doc)
        .map_err(|e| PilgenError::project(format!("serialize project: {e}")))?;
    w.flush()
        .with_context(|| format!("write project '{}'", path.display()))?;

    tracing::debug!(layers = doc.layers.len(), "saved project");
    Ok(())
}

#[tracing::instrument]
pub fn load_project(path: &Path) -> PilgenResult<ProjectModel> {
    let f = File::open(path).with_context(|| format!("open project '{}'", path.display()))?;
    let doc: ProjectDocument = serde_json::from_reader(BufReader::new(f))
        .map_err(|e| PilgenError::project(format!("parse project '{}': {e}", path.display())))?;
    let model = from_portable_document(doc, &project_dir(path))?;

    tracing::debug!(layers = model.layers().len(), "loaded project");
    Ok(model)
}

/// Parse a project document from a string; relative paths are kept as written.
pub fn parse_project(json: &str) -> PilgenResult<ProjectModel> {
    let doc: ProjectDocument = serde_json::from_str(json)
        .map_err(|e| PilgenError::project(format!("parse project: {e}")))?;
    ProjectModel::from_document(doc)
}
