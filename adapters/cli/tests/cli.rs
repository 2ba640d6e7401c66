use std::{fs, path::Path, process::Command};

const CORRIDOR: &str = r#"
name = "corridor"
width = 500
height = 500
cell_size = 50.0
walls = [[6, 0], [6, 1], [6, 2], [6, 3], [6, 4], [6, 5], [6, 6], [6, 7], [6, 8], [6, 9]]
doors = [[4, 5]]

[[tokens]]
id = "player_1"
cell = [2, 5]
"#;

fn fogmap(args: &[&str], dir: &Path) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_fogmap"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("binary runs");
    assert!(
        output.status.success(),
        "fogmap failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout is utf-8")
}

#[test]
fn ascii_output_stops_at_the_wall_but_not_the_door() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("corridor.toml"), CORRIDOR).expect("write map");

    let stdout = fogmap(&["corridor.toml"], dir.path());
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 11, "ten rows plus a status line");
    assert_eq!(lines[5], "..@.+.#   ");
    assert_eq!(lines[10], "moves 0/5  radius 10  selected player_1");
}

#[test]
fn scripted_moves_shift_the_vision_origin() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("corridor.toml"), CORRIDOR).expect("write map");
    fs::write(dir.path().join("walk.txt"), "select player_1\nright\n").expect("write script");

    let stdout = fogmap(
        &[
            "corridor.toml",
            "--script",
            "walk.txt",
            "--ticks",
            "20",
            "--format",
            "json",
        ],
        dir.path(),
    );
    let last = stdout.lines().last().expect("a frame is printed");
    let frame: serde_json::Value = serde_json::from_str(last).expect("frame is json");

    assert_eq!(frame["vision_origin"], serde_json::json!({ "x": 3, "y": 5 }));
    assert_eq!(frame["tokens"][0]["id"], "player_1");
}

#[test]
fn placed_locations_are_listed_under_the_map() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("corridor.toml"), CORRIDOR).expect("write map");
    fs::write(
        dir.path().join("mill.txt"),
        "tool location\nname Old_Mill mill\npress 120 80\n",
    )
    .expect("write script");

    let stdout = fogmap(&["corridor.toml", "--script", "mill.txt"], dir.path());
    assert_eq!(
        stdout.lines().last(),
        Some("location Old Mill (mill) at 120, 80")
    );
}

#[test]
fn missing_map_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let status = Command::new(env!("CARGO_BIN_EXE_fogmap"))
        .arg("nowhere.toml")
        .current_dir(dir.path())
        .output()
        .expect("binary runs")
        .status;
    assert!(!status.success());
}
