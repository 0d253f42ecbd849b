pub mod path;

pub use self::path::{svg_path_data, QuadraticBezier};
