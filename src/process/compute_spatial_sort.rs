use crate::math::Real;
use crate::partitioning::{SpatialSort, SpatialSortCache};
use crate::process::{
    position_epsilon, PostProcess, PostProcessConfig, PostProcessError, ProcessFlags,
    SharedPostProcessInfo,
};
use crate::scene::Scene;

/// Builds the spatial index of every mesh once for the geometry passes that follow.
///
/// Only active along with [`ProcessFlags::JOIN_IDENTICAL_VERTICES`], its single consumer.
/// The cache lives in [`SharedPostProcessInfo::spatial_sorts`] until the end of the run.
#[derive(Copy, Clone, Debug)]
pub struct ComputeSpatialSortProcess {
    epsilon_rel: Real,
}

impl ComputeSpatialSortProcess {
    /// Creates the pass computing tolerances from the welding settings of `config`.
    pub fn new(config: &PostProcessConfig) -> Self {
        Self {
            epsilon_rel: config.join_epsilon,
        }
    }
}

impl PostProcess for ComputeSpatialSortProcess {
    fn name(&self) -> &'static str {
        "ComputeSpatialSortProcess"
    }

    fn is_active(&self, flags: ProcessFlags) -> bool {
        flags.contains(ProcessFlags::JOIN_IDENTICAL_VERTICES)
    }

    fn execute(
        &self,
        scene: &mut Scene,
        shared: &mut SharedPostProcessInfo,
    ) -> Result<(), PostProcessError> {
        log::debug!("ComputeSpatialSortProcess begin");

        let sorts = super::map_meshes(&mut scene.meshes, |_, mesh| {
            (
                SpatialSort::new(&mesh.positions),
                position_epsilon(mesh, self.epsilon_rel),
            )
        });

        let mut cache = SpatialSortCache::new();
        for (i, (sort, epsilon)) in sorts.into_iter().enumerate() {
            cache.insert(i, sort, epsilon);
        }
        shared.spatial_sorts = Some(cache);

        log::debug!("ComputeSpatialSortProcess end");
        Ok(())
    }
}
