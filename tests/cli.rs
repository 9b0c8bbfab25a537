use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn stagedraw_cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stagedraw").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn read_png(path: &Path) -> cairo::ImageSurface {
    let mut file = fs::File::open(path).unwrap();
    cairo::ImageSurface::create_from_png(&mut file).unwrap()
}

fn pixel(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> u32 {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    u32::from_ne_bytes([data[offset], data[offset + 1], data[offset + 2], data[offset + 3]])
}

const RECT_SCRIPT: &str = r#"[
    {"event": "tool", "tool": "rectangle"},
    {"event": "fill_color", "color": "Andes Sky"},
    {"event": "pointer_down", "x": 10, "y": 10},
    {"event": "pointer_move", "x": 60, "y": 40},
    {"event": "pointer_up", "x": 60, "y": 40}
]"#;

#[test]
fn stagedraw_help_prints_usage() {
    let temp = TempDir::new().unwrap();
    stagedraw_cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Replay drawing sessions headlessly"));
}

#[test]
fn script_and_output_are_required() {
    let temp = TempDir::new().unwrap();
    stagedraw_cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("required arguments were not provided"));
}

#[test]
fn print_config_schema_outputs_json() {
    let temp = TempDir::new().unwrap();
    stagedraw_cmd(temp.path())
        .arg("--print-config-schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("keybindings").and(predicate::str::contains("canvas")));
}

#[test]
fn replay_writes_composited_png() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("rect.json");
    let output = temp.path().join("rect.png");
    fs::write(&script, RECT_SCRIPT).unwrap();

    stagedraw_cmd(temp.path())
        .args(["--width", "80", "--height", "60", "--script"])
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let mut png = read_png(&output);
    assert_eq!((png.width(), png.height()), (80, 60));
    // fill, stroke, and the white background outside the rectangle
    assert_eq!(pixel(&mut png, 35, 25), 0xFF71_DBD4);
    assert_eq!(pixel(&mut png, 35, 10), 0xFFC7_24B1);
    assert_eq!(pixel(&mut png, 75, 55), 0xFFFF_FFFF);
}

#[test]
fn config_file_sets_canvas_and_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("custom.toml");
    fs::write(
        &config,
        r##"
[drawing]
default_stroke_color = "Grapefruit"
default_stroke_width = 10

[canvas]
width = 120
height = 90
background = "#000000"
"##,
    )
    .unwrap();
    let script = temp.path().join("line.json");
    fs::write(
        &script,
        r#"[
            {"event": "pointer_down", "x": 10, "y": 45},
            {"event": "pointer_move", "x": 110, "y": 45},
            {"event": "pointer_up", "x": 110, "y": 45}
        ]"#,
    )
    .unwrap();
    let output = temp.path().join("line.png");

    stagedraw_cmd(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let mut png = read_png(&output);
    assert_eq!((png.width(), png.height()), (120, 90));
    assert_eq!(pixel(&mut png, 60, 45), 0xFFFF_585D);
    assert_eq!(pixel(&mut png, 60, 10), 0xFF00_0000);
}

#[test]
fn invalid_script_color_is_rejected() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("bad.json");
    fs::write(&script, r#"[{"event": "stroke_color", "color": "red"}]"#).unwrap();

    stagedraw_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(temp.path().join("bad.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown stroke color 'red'"));
}

#[test]
fn surface_unavailable_fails_the_run() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("lost.json");
    let output = temp.path().join("lost.png");
    fs::write(
        &script,
        r#"[{"event": "surface_unavailable", "reason": "no 2d context"}]"#,
    )
    .unwrap();

    stagedraw_cmd(temp.path())
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("drawing surface unavailable: no 2d context"));
    assert!(!output.exists());
}

#[test]
fn missing_explicit_config_fails() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("rect.json");
    fs::write(&script, RECT_SCRIPT).unwrap();

    stagedraw_cmd(temp.path())
        .arg("--config")
        .arg(temp.path().join("missing.toml"))
        .arg("--script")
        .arg(&script)
        .arg("--output")
        .arg(temp.path().join("rect.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}
