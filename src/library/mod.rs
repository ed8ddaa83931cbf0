pub mod grayscale;
pub mod logger;
