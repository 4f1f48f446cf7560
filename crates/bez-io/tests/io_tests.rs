// Integration tests for reading, tessellating, and exporting models

use std::io::Write;

use bez_core::BezError;
use bez_io::{read_model, to_obj_string, write_obj_file};
use bez_mesh::TessellationConfig;

const SADDLE_BEZ: &str = "1
0.0 0.0 0.0   1.0 0.0 0.5   2.0 0.0 0.5   3.0 0.0 0.0
0.0 1.0 0.5   1.0 1.0 1.0   2.0 1.0 1.0   3.0 1.0 0.5
0.0 2.0 0.5   1.0 2.0 1.0   2.0 2.0 1.0   3.0 2.0 0.5
0.0 3.0 0.0   1.0 3.0 0.5   2.0 3.0 0.5   3.0 3.0 0.0

";

fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn integration_bez_file_uniform_export() {
    let input = temp_file(".bez", SADDLE_BEZ);
    let model = read_model(input.path())
        .unwrap()
        .subdivided(&TessellationConfig::uniform(0.25))
        .unwrap();
    assert_eq!(model.triangle_count(), 32);

    let text = to_obj_string(&model).unwrap();
    let v_lines = text.lines().filter(|l| l.starts_with("v ")).count();
    let f_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("f ")).collect();
    assert_eq!(v_lines, 96);
    assert_eq!(f_lines.len(), 32);
    assert_eq!(f_lines[31], "f 94 95 96");
}

#[test]
fn integration_exported_obj_reads_back() {
    let input = temp_file(".bez", SADDLE_BEZ);
    let model = read_model(input.path())
        .unwrap()
        .subdivided(&TessellationConfig::adaptive(0.05))
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("saddle.obj");
    write_obj_file(&model, &out_path).unwrap();

    let reread = read_model(&out_path).unwrap();
    assert!(reread.color.is_none());
    assert_eq!(reread.triangle_count(), model.triangle_count());
    for (a, b) in reread.triangles().zip(model.triangles()) {
        for (pa, pb) in a.positions().iter().zip(b.positions()) {
            assert!((*pa - pb).length() < 1e-12);
        }
    }
}

#[test]
fn integration_obj_bypasses_subdivision() {
    let input = temp_file(".obj", "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
    let model = read_model(input.path()).unwrap();
    let before: Vec<_> = model.triangles().copied().collect();

    let model = model.subdivided(&TessellationConfig::uniform(0.1)).unwrap();
    let after: Vec<_> = model.triangles().copied().collect();
    assert_eq!(before, after);
    assert_eq!(after.len(), 2);
}

#[test]
fn integration_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_model(&dir.path().join("absent.bez")).unwrap_err();
    assert!(matches!(err, BezError::Io(_)));
}

#[test]
fn integration_truncated_bez_is_parse_error() {
    let truncated: String = SADDLE_BEZ.lines().take(3).collect::<Vec<_>>().join("\n");
    let input = temp_file(".bez", &truncated);
    let err = read_model(input.path()).unwrap_err();
    assert!(matches!(err, BezError::Parse { .. }));
}
