pub mod color_store_json;
pub mod course_cache_json;

pub use color_store_json::ColorStoreJson;
pub use course_cache_json::CourseCacheJson;
