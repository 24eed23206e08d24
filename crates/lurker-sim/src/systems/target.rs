//! Scripted target motion.

use glam::Vec3;
use hecs::World;

use crate::components::{Target, TargetPath, TargetPosition};

/// Move the target along its keyframes to time `now`. Returns its position,
/// or `None` when the scenario has no target.
pub fn run(world: &mut World, now: f64) -> Option<Vec3> {
    let mut position = None;
    for (_entity, (_target, path, pos)) in
        world.query_mut::<(&Target, &TargetPath, &mut TargetPosition)>()
    {
        if let Some(p) = path.sample(now) {
            pos.0 = p;
        }
        position = Some(pos.0);
    }
    position
}
