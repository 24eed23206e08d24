//! Navigator integration and body facing.
//!
//! Bodies turn to face their horizontal velocity and keep their last
//! facing while standing.

use hecs::World;

use lurker_ai::Navigator;
use lurker_core::constants::STANDING_SPEED_SQ;

use crate::components::Facing;
use crate::navmesh::KinematicNavigator;
use crate::world_setup::horizontal_dir;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (nav, facing)) in world.query_mut::<(&mut KinematicNavigator, &mut Facing)>() {
        nav.step(dt);
        let velocity = nav.velocity();
        if velocity.length_squared() >= STANDING_SPEED_SQ {
            if let Some(dir) = horizontal_dir(velocity) {
                facing.0 = dir;
            }
        }
    }
}
