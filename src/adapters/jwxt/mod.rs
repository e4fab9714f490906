pub mod client;
pub mod mapper;
pub mod sample;

pub use client::JwxtCourseSource;
pub use sample::SampleCourseSource;
