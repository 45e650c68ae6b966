//! End-to-end fly-around runs on small canvases.

use std::path::{Path, PathBuf};

use cloudspin::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cloudspin_it_{name}"));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn small_config(dir: &Path, output: &str) -> RunConfig {
    RunConfig {
        output: dir.join(output),
        legend: LegendConfig {
            path: dir.join("legend.png"),
            ..LegendConfig::default()
        },
        viewer: ViewerOptions {
            window_size: [48, 32],
            ..ViewerOptions::default()
        },
        trajectory: TrajectoryPlan {
            turns: 3,
            fps: 4,
            seconds_per_turn: 1.0,
            ..TrajectoryPlan::default()
        },
        style: PointStyle {
            scale: Vec3::ONE,
            point_size: 0.5,
            ..PointStyle::default()
        },
        ..RunConfig::default()
    }
}

fn cube_source() -> PointSource {
    let coordinates = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, 1.0, -1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, 1.0),
        Vec3::new(1.0, 1.0, 1.0),
    ];
    let labels = ["er", "mito", "others", "er", "nucleus", "others", "mito", "er"]
        .iter()
        .map(ToString::to_string)
        .collect();
    PointSource::new(coordinates, labels).unwrap()
}

#[test]
fn png_sequence_run() {
    let dir = scratch_dir("png_sequence");
    let config = small_config(&dir, "frames");

    let summary = run(&cube_source(), &config).unwrap();
    assert_eq!(summary.points, 8);
    assert_eq!(summary.categories, 3);
    assert_eq!(summary.keyframes, 3);
    // 1 + (turns - 1) * fps * seconds_per_turn
    assert_eq!(summary.frames, 9);
    assert_eq!(summary.frames as u64, config.trajectory.total_frames());

    let frames = dir.join("frames");
    for index in 0..9 {
        let frame = image::open(frames.join(format!("frame_{index:05}.png")))
            .unwrap()
            .to_rgba8();
        assert_eq!(frame.dimensions(), (48, 32));
        let background = *frame.get_pixel(0, 0);
        assert!(
            frame.pixels().any(|p| *p != background),
            "frame {index} is blank"
        );
    }
    assert!(!frames.join("frame_00009.png").exists());

    let legend = image::open(dir.join("legend.png")).unwrap();
    // Three categories plus the sentinel row.
    assert!(legend.height() >= 4 * 48);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn gif_run() {
    let dir = scratch_dir("gif");
    let mut config = small_config(&dir, "orbit.gif");
    config.legend.enabled = false;

    let summary = run(&cube_source(), &config).unwrap();
    assert_eq!(summary.frames, 9);

    let bytes = std::fs::read(dir.join("orbit.gif")).unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");
    assert!(!dir.join("legend.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn single_turn_gives_one_frame() {
    let dir = scratch_dir("single_turn");
    let mut config = small_config(&dir, "frames");
    config.trajectory.turns = 1;

    let summary = run(&cube_source(), &config).unwrap();
    assert_eq!(summary.keyframes, 1);
    assert_eq!(summary.frames, 1);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn mismatched_inputs_are_rejected() {
    let err = PointSource::new(vec![Vec3::ZERO; 3], vec!["a".to_string(); 2]).unwrap_err();
    assert!(matches!(
        err,
        CloudspinError::Core(CoreError::InputLengthMismatch {
            coordinates: 3,
            labels: 2
        })
    ));
}

#[test]
fn empty_label_writes_nothing() {
    let dir = scratch_dir("empty_label");
    let config = small_config(&dir, "frames");
    let source = PointSource::new(vec![Vec3::ZERO; 2], vec!["a".into(), String::new()]).unwrap();

    let err = run(&source, &config).unwrap_err();
    assert!(matches!(
        err,
        CloudspinError::Core(CoreError::InvalidLabel { index: 1 })
    ));
    assert!(!dir.join("legend.png").exists());
    assert!(!dir.join("frames").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn failed_recording_leaves_no_legend() {
    let dir = scratch_dir("missing_parent");
    let config = small_config(&dir, "missing_parent/orbit.gif");

    let err = run(&cube_source(), &config).unwrap_err();
    assert!(matches!(err, CloudspinError::Render(RenderError::Io(_))));
    assert!(!dir.join("legend.png").exists());
    assert!(!dir.join("missing_parent").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn source_loaded_from_files() {
    let dir = scratch_dir("load");
    let coordinates = dir.join("coords.json");
    let labels = dir.join("labels.json");
    std::fs::write(&coordinates, "[[0, 0, 0], [1, 0, 0], [0, 1, 0]]").unwrap();
    std::fs::write(
        &labels,
        r#"[["er", "GENE1"], ["others", "GENE2"], ["er", "GENE3"]]"#,
    )
    .unwrap();

    let source = PointSource::load(&coordinates, &labels).unwrap();
    assert_eq!(source.len(), 3);
    assert_eq!(source.labels, ["er", "others", "er"]);

    let _ = std::fs::remove_dir_all(&dir);
}
