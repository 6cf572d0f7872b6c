use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};

pub fn pathlab() -> Command {
    cargo_bin_cmd!("pathlab")
}

/// Write `content` to `dir/name` and return the full path
#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// JSON config for an open or walled 3x3 grid
#[allow(dead_code)]
pub fn grid_config(runs_csv: &Path, algorithm: &str, heuristic: &str, trials: usize) -> String {
    serde_json::json!({
        "graph": { "type": "grid", "width": 3, "height": 3 },
        "experiment": {
            "graph_name": "grid3",
            "graph_type": "grid",
            "algorithm": algorithm,
            "heuristic": heuristic,
            "trials": trials,
            "seed": 42
        },
        "output": { "runs_csv": runs_csv }
    })
    .to_string()
}
