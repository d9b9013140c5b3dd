pub mod invoke;
pub mod serve;
pub mod submit;
