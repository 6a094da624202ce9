pub mod summary_image;

pub use summary_image::SummaryImage;
