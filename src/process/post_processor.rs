use crate::process::{
    ComputeSpatialSortProcess, FindDegeneratesProcess, JoinVerticesProcess, PostProcess,
    PostProcessConfig, PostProcessError, ProcessFlags, SharedPostProcessInfo,
    SortByPTypeProcess, TriangulateProcess, ValidateDataStructureProcess,
};
use crate::scene::Scene;

/// Runs the enabled post-processing passes on a scene, in dependency order.
///
/// The passes run in this order, each one only if enabled:
/// 1. [`ValidateDataStructureProcess`]
/// 2. [`FindDegeneratesProcess`]
/// 3. [`ComputeSpatialSortProcess`] (with [`ProcessFlags::JOIN_IDENTICAL_VERTICES`])
/// 4. [`JoinVerticesProcess`]
/// 5. [`TriangulateProcess`]
/// 6. [`SortByPTypeProcess`]
/// 7. [`ValidateDataStructureProcess`] again
pub struct PostProcessor {
    steps: Vec<Box<dyn PostProcess>>,
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new(&PostProcessConfig::default())
    }
}

impl PostProcessor {
    /// Creates the pipeline, configuring every pass from `config`.
    pub fn new(config: &PostProcessConfig) -> Self {
        let steps: Vec<Box<dyn PostProcess>> = vec![
            Box::new(ValidateDataStructureProcess),
            Box::new(FindDegeneratesProcess::new(config)),
            Box::new(ComputeSpatialSortProcess::new(config)),
            Box::new(JoinVerticesProcess::new(config)),
            Box::new(TriangulateProcess),
            Box::new(SortByPTypeProcess::new(config)),
            Box::new(ValidateDataStructureProcess),
        ];

        Self { steps }
    }

    /// The names of the passes `flags` enables, in execution order.
    pub fn active_steps(&self, flags: ProcessFlags) -> impl Iterator<Item = &'static str> + '_ {
        self.steps
            .iter()
            .filter(move |step| step.is_active(flags))
            .map(|step| step.name())
    }

    /// Runs the passes enabled by `flags` on `scene`.
    ///
    /// The first error aborts the run. The scene is then left in the state the failing
    /// pass left it in.
    pub fn apply(&self, scene: &mut Scene, flags: ProcessFlags) -> Result<(), PostProcessError> {
        log::info!("Entering post processing pipeline");

        // Shared data, such as cached spatial indices, only lives for this run.
        let mut shared = SharedPostProcessInfo::default();

        for step in &self.steps {
            if step.is_active(flags) {
                log::debug!("Running {}", step.name());
                step.execute(scene, &mut shared)?;
            }
        }

        log::info!("Leaving post processing pipeline");
        Ok(())
    }
}
