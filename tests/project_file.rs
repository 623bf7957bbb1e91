use std::path::PathBuf;

use pilgen::{
    HorizontalAlign, ImageLayerBuilder, LayerId, ProjectModel, TextLayerBuilder, VerticalAlign,
    load_project, save_project,
};

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "pilgen_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn model_under(dir: &std::path::Path) -> ProjectModel {
    let mut m = ProjectModel::new();
    m.project_name = "Badge".to_string();
    m.function_name = "make_badge".to_string();
    m.set_base_image(
        dir.join("assets").join("bg.png").to_string_lossy(),
        "Background",
        true,
        "background",
    );
    m.add_layer(
        ImageLayerBuilder::new("icon")
            .id(LayerId::from_raw("icon"))
            .path(dir.join("assets").join("icon.png").to_string_lossy())
            .position(8, 16)
            .size(32, 32)
            .opacity(0.75)
            .build()
            .unwrap(),
    )
    .unwrap();
    m.add_layer(
        TextLayerBuilder::new("label", "Hi")
            .id(LayerId::from_raw("label"))
            .anchor(50, 60)
            .font(dir.join("fonts").join("a.ttf").to_string_lossy(), 20)
            .align(HorizontalAlign::Right, VerticalAlign::Bottom)
            .hidden()
            .build()
            .unwrap(),
    )
    .unwrap();
    m
}

#[test]
fn save_then_load_restores_model() {
    let dir = temp_dir("roundtrip");
    let path = dir.join("badge.json");
    let m = model_under(&dir);

    save_project(&m, &path).unwrap();
    let back = load_project(&path).unwrap();

    let base = back.base_image().unwrap().as_base().unwrap();
    assert!(base.is_parameter);
    assert_eq!(base.parameter_name, "background");
    assert_eq!(back, m);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn saved_file_stores_relative_paths() {
    let dir = temp_dir("relative");
    let path = dir.join("badge.json");
    save_project(&model_under(&dir), &path).unwrap();

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v["version"], "1.0.0");
    assert_eq!(v["function_name"], "make_badge");
    assert_eq!(v["base_image"]["image_path"], "assets/bg.png");
    assert_eq!(v["base_image"]["layer_type"], "base");
    assert_eq!(v["layers"][0]["image_path"], "assets/icon.png");
    assert_eq!(v["layers"][0]["layer_type"], "image");
    assert_eq!(v["layers"][1]["font_path"], "fonts/a.ttf");
    assert_eq!(v["layers"][1]["horizontal_align"], "right");
    assert_eq!(v["layers"][1]["visible"], false);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_reports_missing_file_and_bad_json() {
    let dir = temp_dir("errors");
    std::fs::create_dir_all(&dir).unwrap();

    assert!(load_project(&dir.join("absent.json")).is_err());

    let bad = dir.join("bad.json");
    std::fs::write(&bad, "{\"layers\": 3}").unwrap();
    let err = load_project(&bad).unwrap_err();
    assert!(matches!(err, pilgen::PilgenError::Project(_)));

    std::fs::remove_dir_all(&dir).unwrap();
}
