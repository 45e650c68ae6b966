use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use cloudspin::{run, CameraTrajectoryGenerator, PointSource, Result, RunConfig};

#[derive(Parser, Debug)]
#[command(name = "cloudspin")]
#[command(about = "Render a rotating fly-around of a categorically colored 3D point cloud", long_about = None)]
struct Args {
    /// Coordinates: JSON array of [x, y, z] triples or an (n, 3) .npy array
    #[arg(short, long, required_unless_present = "keyframes_only")]
    coordinates: Option<PathBuf>,

    /// JSON array of labels (strings, or arrays whose first column is the label)
    #[arg(short, long, required_unless_present = "keyframes_only")]
    labels: Option<PathBuf>,

    /// JSON run configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Animation output: a .gif file or a directory for PNG frames
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Legend image path (.png or .jpg)
    #[arg(long)]
    legend: Option<PathBuf>,

    /// Skip the legend image
    #[arg(long)]
    no_legend: bool,

    /// Number of 180 degree arcs
    #[arg(long)]
    turns: Option<u32>,

    /// Frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Seconds per arc
    #[arg(long)]
    seconds_per_turn: Option<f32>,

    /// Camera zoom during the orbit
    #[arg(long)]
    zoom: Option<f32>,

    /// Rotation of the first keyframe, in degrees
    #[arg(long, allow_hyphen_values = true)]
    start_angle: Option<f32>,

    /// Label colored neutral grey and listed last in the legend
    #[arg(long)]
    sentinel: Option<String>,

    /// Print the camera keyframes as JSON and exit
    #[arg(long)]
    keyframes_only: bool,
}

impl Args {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(legend) = &self.legend {
            config.legend.path.clone_from(legend);
        }
        if self.no_legend {
            config.legend.enabled = false;
        }
        if let Some(sentinel) = &self.sentinel {
            config.sentinel.clone_from(sentinel);
        }

        let plan = &mut config.trajectory;
        if let Some(turns) = self.turns {
            plan.turns = turns;
        }
        if let Some(fps) = self.fps {
            plan.fps = fps;
        }
        if let Some(seconds) = self.seconds_per_turn {
            plan.seconds_per_turn = seconds;
        }
        if let Some(zoom) = self.zoom {
            plan.zoom = zoom;
        }
        if let Some(angle) = self.start_angle {
            plan.start_angle = angle;
        }

        config.validate()?;
        Ok(config)
    }
}

fn execute(args: &Args) -> Result<()> {
    let config = args.run_config()?;

    if args.keyframes_only {
        let keyframes = CameraTrajectoryGenerator::generate(&config.trajectory)?;
        println!("{}", serde_json::to_string_pretty(&keyframes)?);
        return Ok(());
    }

    let (Some(coordinates), Some(labels)) = (&args.coordinates, &args.labels) else {
        return Err(cloudspin::CloudspinError::Config(
            "--coordinates and --labels are required".into(),
        ));
    };
    let source = PointSource::load(coordinates, labels)?;
    let summary = run(&source, &config)?;

    println!(
        "{} points, {} categories, {} keyframes, {} frames -> {}",
        summary.points,
        summary.categories,
        summary.keyframes,
        summary.frames,
        config.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_required_without_keyframes_only() {
        assert!(Args::try_parse_from(["cloudspin"]).is_err());
        assert!(Args::try_parse_from(["cloudspin", "--keyframes-only"]).is_ok());
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "cloudspin",
            "-c",
            "coords.json",
            "-l",
            "labels.json",
            "--turns",
            "4",
            "--fps",
            "30",
            "--start-angle",
            "-90",
            "--output",
            "frames",
            "--no-legend",
        ])
        .unwrap();
        let config = args.run_config().unwrap();
        assert_eq!(config.trajectory.turns, 4);
        assert_eq!(config.trajectory.fps, 30);
        assert_eq!(config.trajectory.start_angle, -90.0);
        assert_eq!(config.trajectory.seconds_per_turn, 3.0);
        assert_eq!(config.output, PathBuf::from("frames"));
        assert!(!config.legend.enabled);
    }

    #[test]
    fn test_empty_sentinel_flag_rejected() {
        let args = Args::try_parse_from(["cloudspin", "--keyframes-only", "--sentinel", ""]).unwrap();
        assert!(args.run_config().is_err());
    }
}
