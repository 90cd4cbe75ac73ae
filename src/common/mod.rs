pub mod error;
pub mod geo;
pub mod model;
pub mod time;
