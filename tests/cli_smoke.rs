use std::path::PathBuf;

use pilgen::{ProjectModel, TextLayerBuilder, save_project};

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_pilgen")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) { "pilgen.exe" } else { "pilgen" });
            p
        })
}

#[test]
fn cli_generate_writes_python() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let project_path = dir.join("card.json");
    let out_path = dir.join("card.py");
    let _ = std::fs::remove_file(&out_path);

    let mut m = ProjectModel::new();
    m.set_base_image("bg.png", "Background", false, "base_image_path");
    m.add_layer(
        TextLayerBuilder::new("title", "Hello")
            .anchor(10, 10)
            .text_parameter("title")
            .build()
            .unwrap(),
    )
    .unwrap();
    save_project(&m, &project_path).unwrap();

    let status = std::process::Command::new(exe())
        .args(["generate", "--in"])
        .arg(&project_path)
        .args(["--function", "make_card", "--out"])
        .arg(&out_path)
        .status()
        .unwrap();

    assert!(status.success());
    let src = std::fs::read_to_string(&out_path).unwrap();
    assert!(src.starts_with("from PIL import Image, ImageDraw, ImageFont\n"));
    assert!(src.contains("def make_card(output_path: str, title: str):"));
    assert!(src.contains("base_image = Image.open(r\"bg.png\")"));
    assert!(src.ends_with("    make_card(**params)\n"));
}

#[test]
fn cli_params_lists_signature_order() {
    let dir = PathBuf::from("target").join("cli_smoke_params");
    std::fs::create_dir_all(&dir).unwrap();
    let project_path = dir.join("p.json");

    let mut m = ProjectModel::new();
    m.set_base_image("bg.png", "Background", true, "bg");
    save_project(&m, &project_path).unwrap();

    let out = std::process::Command::new(exe())
        .args(["params", "--mode", "return", "--in"])
        .arg(&project_path)
        .output()
        .unwrap();

    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "bg (str) - Base image path\n"
    );
}

#[test]
fn cli_refuses_project_without_base() {
    let dir = PathBuf::from("target").join("cli_smoke_no_base");
    std::fs::create_dir_all(&dir).unwrap();

    let project_path = dir.join("empty.json");
    let out_path = dir.join("empty.py");
    let _ = std::fs::remove_file(&out_path);
    save_project(&ProjectModel::new(), &project_path).unwrap();

    let out = std::process::Command::new(exe())
        .args(["generate", "--in"])
        .arg(&project_path)
        .arg("--out")
        .arg(&out_path)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(2));
    assert!(!out_path.exists());
    assert!(String::from_utf8_lossy(&out.stderr).contains("warning:"));
}
