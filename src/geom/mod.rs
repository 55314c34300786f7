mod core;

pub use core::{Line3, Point3, Vec3};
