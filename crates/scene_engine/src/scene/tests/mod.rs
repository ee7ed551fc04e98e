//! End-to-end scene scenarios

mod orbit_camera;
