pub mod angles;
pub mod vector2d;
