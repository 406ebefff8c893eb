pub(crate) mod color;
pub(crate) mod geometry;
pub(crate) mod pollinate;
pub(crate) mod split;
pub(crate) mod swarm;
pub(crate) mod waypoint;
