//! Generation stage trait and pipeline orchestration.

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, PlanetConfig};
use crate::geometry::{GeometryError, SphereCache};
use crate::terrain::{form_terrain, Planet, TerrainError};

/// Unique identifier for generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Subdivided octahedral sphere at the base radius.
    Sphere,
    /// Radial noise displacement of the sphere's vertices.
    Terrain,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Sphere => "sphere",
            StageId::Terrain => "terrain",
        }
    }
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid parameters: {0}")]
    Config(#[from] ConfigError),
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
    #[error("Terrain error: {0}")]
    Terrain(#[from] TerrainError),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
}

/// Trait for implementing generation stages.
///
/// Each stage transforms the planet in place, building upon previous
/// stages. Stages get the caller's [`SphereCache`] so geometry can be reused
/// between runs.
pub trait GenerationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the generation stage, modifying the planet in place.
    fn execute(&self, planet: &mut Planet, cache: &mut SphereCache) -> Result<(), PipelineError>;
}

/// Orchestrates multiple generation stages into a complete pipeline.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn GenerationStage>>,
}

impl Pipeline {
    /// Creates a new empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the sphere + terrain pipeline.
    pub fn standard() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(SphereStage).add_stage(TerrainStage);
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GenerationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order on the given planet.
    pub fn run(&self, planet: &mut Planet, cache: &mut SphereCache) -> Result<(), PipelineError> {
        self.run_with_callbacks(planet, cache, |_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `planet` - The planet to generate
    /// * `cache` - Sphere cache reused across runs
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        planet: &mut Planet,
        cache: &mut SphereCache,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<(), PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            // Check dependencies
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            debug!(stage = stage.id().name(), "executing stage");
            stage.execute(planet, cache)?;
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(())
    }
}

/// Builds (or reuses) the undisplaced sphere.
pub struct SphereStage;

impl GenerationStage for SphereStage {
    fn id(&self) -> StageId {
        StageId::Sphere
    }

    fn name(&self) -> &str {
        "Sphere Subdivision"
    }

    fn execute(&self, planet: &mut Planet, cache: &mut SphereCache) -> Result<(), PipelineError> {
        let sphere = cache.get_or_build(planet.config.subdivisions, planet.config.radius)?;
        planet.mesh = sphere.clone();
        Ok(())
    }
}

/// Displaces the sphere with layered noise.
pub struct TerrainStage;

impl GenerationStage for TerrainStage {
    fn id(&self) -> StageId {
        StageId::Terrain
    }

    fn name(&self) -> &str {
        "Terrain Forming"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Sphere]
    }

    fn execute(&self, planet: &mut Planet, _cache: &mut SphereCache) -> Result<(), PipelineError> {
        let config = &planet.config;
        let sampler = config.noise.sampler(config.seed);

        form_terrain(
            &mut planet.mesh.vertices,
            config.radius,
            config.noise_offset,
            config.terrain_influence,
            sampler.as_ref(),
        )?;
        Ok(())
    }
}

/// Generates planets, keeping the base sphere between calls.
///
/// Repeated calls that only change terrain parameters (offset, influence,
/// noise kind, seed) reuse the cached sphere instead of subdividing again.
pub struct PlanetGenerator {
    pipeline: Pipeline,
    cache: SphereCache,
}

impl Default for PlanetGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanetGenerator {
    /// Creates a generator running the standard pipeline.
    pub fn new() -> Self {
        Self::with_pipeline(Pipeline::standard())
    }

    /// Creates a generator running a custom pipeline.
    pub fn with_pipeline(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            cache: SphereCache::new(),
        }
    }

    /// Validates `config` and generates a planet from it.
    pub fn generate(&mut self, config: PlanetConfig) -> Result<Planet, PipelineError> {
        self.generate_with_callbacks(config, |_, _, _| {}, |_, _, _| {})
    }

    /// Like [`PlanetGenerator::generate`], reporting stage progress.
    pub fn generate_with_callbacks<F1, F2>(
        &mut self,
        config: PlanetConfig,
        on_stage_start: F1,
        on_stage_complete: F2,
    ) -> Result<Planet, PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        config.validate()?;

        let reuse = self.cache.contains(config.subdivisions, config.radius);
        info!(
            subdivisions = config.subdivisions,
            radius = config.radius,
            noise = %config.noise,
            cached_sphere = reuse,
            "generating planet"
        );

        let mut planet = Planet::new(config);
        self.pipeline
            .run_with_callbacks(&mut planet, &mut self.cache, on_stage_start, on_stage_complete)?;
        Ok(planet)
    }

    /// The sphere cache owned by this generator.
    pub fn cache(&self) -> &SphereCache {
        &self.cache
    }

    /// Forces the next call to rebuild the sphere.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}
