//! Planetgen CLI - procedural planet mesh generator.
//!
//! Generates an octasphere, displaces it with layered noise and writes the
//! result as OBJ or binary mesh files.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use planetgen::export::{export_mesh, read_raw, MeshFormat};
use planetgen::geometry::{expected_counts, MAX_SUBDIVISIONS};
use planetgen::{NoiseKind, PlanetConfig, PlanetGenerator};

/// Procedural planet mesh generator.
#[derive(Parser)]
#[command(name = "planetgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a planet mesh.
    Generate {
        /// TOML file with planet parameters; flags override its values.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Octasphere subdivision passes (0-24).
        #[arg(short, long)]
        subdivisions: Option<u32>,

        /// Sphere radius before displacement (> 0.01).
        #[arg(short, long)]
        radius: Option<f32>,

        /// Offset in 3D noise space, as X,Y,Z.
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        offset: Option<Vec<f32>>,

        /// Terrain influence (-1.0 to 1.0).
        #[arg(short, long, allow_negative_numbers = true)]
        influence: Option<f32>,

        /// Noise implementation.
        #[arg(long)]
        noise: Option<NoiseKind>,

        /// Noise seed.
        #[arg(long)]
        seed: Option<u32>,

        /// Derive the noise offset from the seed instead of using --offset.
        #[arg(long)]
        random_offset: bool,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "planet")]
        name: String,

        /// Export format.
        #[arg(short, long, default_value = "obj")]
        format: ExportFormat,
    },

    /// Display mesh sizes for a subdivision level.
    Info {
        /// Octasphere subdivision passes.
        #[arg(short, long, default_value = "3")]
        subdivisions: u32,
    },

    /// Summarize a mesh previously exported in the raw format.
    Inspect {
        /// Raw mesh file.
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportFormat {
    /// Wavefront OBJ text.
    Obj,
    /// Little-endian binary positions and indices.
    Raw,
}

impl From<ExportFormat> for MeshFormat {
    fn from(format: ExportFormat) -> Self {
        match format {
            ExportFormat::Obj => MeshFormat::Obj,
            ExportFormat::Raw => MeshFormat::Raw,
        }
    }
}

/// Parameter overrides taken from the command line.
struct Overrides {
    subdivisions: Option<u32>,
    radius: Option<f32>,
    offset: Option<Vec<f32>>,
    influence: Option<f32>,
    noise: Option<NoiseKind>,
    seed: Option<u32>,
    random_offset: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            subdivisions,
            radius,
            offset,
            influence,
            noise,
            seed,
            random_offset,
            output,
            name,
            format,
        } => {
            let overrides = Overrides {
                subdivisions,
                radius,
                offset,
                influence,
                noise,
                seed,
                random_offset,
            };
            run_generate(config, overrides, output, name, format)
        }
        Commands::Info { subdivisions } => run_info(subdivisions),
        Commands::Inspect { file } => run_inspect(&file),
    }
}

fn build_config(path: Option<PathBuf>, overrides: Overrides) -> Result<PlanetConfig> {
    let mut config = match path {
        Some(path) => PlanetConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PlanetConfig::default(),
    };

    if let Some(subdivisions) = overrides.subdivisions {
        config.subdivisions = subdivisions;
    }
    if let Some(radius) = overrides.radius {
        config.radius = radius;
    }
    if let Some(influence) = overrides.influence {
        config.terrain_influence = influence;
    }
    if let Some(noise) = overrides.noise {
        config.noise = noise;
    }
    if let Some(seed) = overrides.seed {
        config.seed = seed;
    }

    if overrides.random_offset {
        if overrides.offset.is_some() {
            bail!("--offset and --random-offset cannot be used together");
        }
        // Generate seed if not provided
        let seed = match overrides.seed {
            Some(seed) => seed as u64,
            None => {
                use std::time::{SystemTime, UNIX_EPOCH};
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .context("system clock is before the Unix epoch")?
                    .as_nanos() as u64
            }
        };
        config.randomize_offset(seed);
    } else if let Some(offset) = overrides.offset {
        let &[x, y, z] = offset.as_slice() else {
            bail!("--offset expects exactly three values (X,Y,Z), got {}", offset.len());
        };
        config.noise_offset = Vec3::new(x, y, z);
    }

    config.validate()?;
    Ok(config)
}

fn run_generate(
    config_path: Option<PathBuf>,
    overrides: Overrides,
    output: PathBuf,
    name: String,
    format: ExportFormat,
) -> Result<()> {
    let config = build_config(config_path, overrides)?;

    println!("Planetgen - Procedural Planet Generator");
    println!("=======================================");
    println!("Subdivisions: {}", config.subdivisions);
    println!("Radius: {}", config.radius);
    println!(
        "Noise: {} (seed {}), offset [{:.3}, {:.3}, {:.3}]",
        config.noise, config.seed, config.noise_offset.x, config.noise_offset.y, config.noise_offset.z
    );
    println!("Terrain influence: {}", config.terrain_influence);
    println!("Output: {}", output.display());

    let start = Instant::now();
    let mut generator = PlanetGenerator::new();
    let planet = generator.generate_with_callbacks(
        config,
        |stage, i, total| {
            println!("  [{}/{}] Starting: {}", i + 1, total, stage);
        },
        |stage, i, total| {
            println!("  [{}/{}] Completed: {}", i + 1, total, stage);
        },
    )?;
    println!("Generation completed in {:.2?}", start.elapsed());

    let (min_h, max_h) = planet.height_range();
    println!(
        "Mesh: {} vertices, {} faces",
        planet.mesh.vertex_count(),
        planet.mesh.face_count()
    );
    println!("Height range: [{:.4}, {:.4}]", min_h, max_h);
    let elevations = planet.elevations();
    let above = elevations.iter().filter(|&&e| e > 0.0).count();
    println!(
        "Above base radius: {:.1}%",
        above as f64 * 100.0 / elevations.len().max(1) as f64
    );

    std::fs::create_dir_all(&output)
        .with_context(|| format!("creating output directory {}", output.display()))?;

    let format = MeshFormat::from(format);
    let path = output.join(format!("{}.{}", name, format.extension()));
    export_mesh(&planet.mesh, &path, format)
        .with_context(|| format!("exporting {}", path.display()))?;
    println!("Exported: {}", path.display());

    Ok(())
}

fn run_info(subdivisions: u32) -> Result<()> {
    if subdivisions > MAX_SUBDIVISIONS {
        bail!("Subdivision level must be between 0 and {}", MAX_SUBDIVISIONS);
    }

    let Some((vertices, faces)) = expected_counts(subdivisions) else {
        bail!("Subdivision level {} is too large to describe", subdivisions);
    };

    // 12 bytes per position, 12 bytes per index triple
    let bytes = (vertices + faces) as f64 * 12.0;

    println!("Planet Configuration");
    println!("====================");
    println!("Subdivisions: {}", subdivisions);
    println!("Vertices: {}", vertices);
    println!("Faces: {}", faces);
    println!("Approx. mesh memory: {:.2} MB", bytes / (1024.0 * 1024.0));
    if vertices > u32::MAX as u64 {
        println!("Note: this level exceeds 32-bit vertex indices and cannot be generated");
    }

    Ok(())
}

fn run_inspect(path: &Path) -> Result<()> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mesh = read_raw(&mut BufReader::new(file))
        .with_context(|| format!("reading {}", path.display()))?;
    let (min_r, max_r) = mesh.radius_range();

    println!("Mesh: {}", path.display());
    println!("Vertices: {}", mesh.vertex_count());
    println!("Faces: {}", mesh.face_count());
    println!("Radius range: [{:.4}, {:.4}]", min_r, max_r);
    println!("Watertight: {}", mesh.is_watertight());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> Overrides {
        Overrides {
            subdivisions: None,
            radius: None,
            offset: None,
            influence: None,
            noise: None,
            seed: None,
            random_offset: false,
        }
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "planetgen", "generate", "-s", "4", "--offset", "1,-2,3", "-i", "-0.5", "--noise", "perlin",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Generate { subdivisions: Some(4), .. }));
    }

    #[test]
    fn test_overrides_apply() {
        let overrides = Overrides {
            subdivisions: Some(5),
            radius: Some(2.0),
            offset: Some(vec![1.0, -2.0, 3.0]),
            influence: Some(-0.5),
            noise: Some(NoiseKind::Perlin),
            seed: Some(11),
            random_offset: false,
        };
        let config = build_config(None, overrides).unwrap();

        assert_eq!(config.subdivisions, 5);
        assert_eq!(config.radius, 2.0);
        assert_eq!(config.noise_offset, Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(config.terrain_influence, -0.5);
        assert_eq!(config.noise, NoiseKind::Perlin);
        assert_eq!(config.seed, 11);
    }

    #[test]
    fn test_overrides_validated() {
        let mut overrides = no_overrides();
        overrides.radius = Some(0.0);
        assert!(build_config(None, overrides).is_err());

        let mut overrides = no_overrides();
        overrides.offset = Some(vec![1.0, 2.0]);
        assert!(build_config(None, overrides).is_err());
    }

    #[test]
    fn test_random_offset_from_seed() {
        let mut overrides = no_overrides();
        overrides.seed = Some(3);
        overrides.random_offset = true;
        let a = build_config(None, overrides).unwrap();

        let mut expected = PlanetConfig::default();
        expected.randomize_offset(3);
        assert_eq!(a.noise_offset, expected.noise_offset);

        let mut conflicting = no_overrides();
        conflicting.random_offset = true;
        conflicting.offset = Some(vec![0.0, 0.0, 0.0]);
        assert!(build_config(None, conflicting).is_err());
    }

    #[test]
    fn test_config_file_with_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planet.toml");
        std::fs::write(&path, "subdivisions = 2\nradius = 3.0\nterrain_influence = 0.1\n").unwrap();

        let mut overrides = no_overrides();
        overrides.radius = Some(4.0);
        let config = build_config(Some(path), overrides).unwrap();

        assert_eq!(config.subdivisions, 2);
        assert_eq!(config.radius, 4.0);
        assert_eq!(config.terrain_influence, 0.1);
    }

    #[test]
    fn test_inspect_reads_raw_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planet.bin");
        let mesh = planetgen::build_sphere(2, 1.0).unwrap();
        export_mesh(&mesh, &path, MeshFormat::Raw).unwrap();

        assert!(run_inspect(&path).is_ok());
        assert!(run_inspect(&dir.path().join("missing.bin")).is_err());
    }

    #[test]
    fn test_noise_kind_parses_on_cli() {
        let cli = Cli::try_parse_from(["planetgen", "generate", "--noise", "simplex"]).unwrap();
        assert!(matches!(cli.command, Commands::Generate { noise: Some(NoiseKind::Simplex), .. }));
        assert!(Cli::try_parse_from(["planetgen", "generate", "--noise", "fractal"]).is_err());
    }
}
