// Domain layer - Interval algebra, frame geometry and job rules

pub mod errors;
pub mod geometry;
pub mod model;
pub mod rules;
pub mod timeline;
