pub mod entity;
pub mod error;
pub mod port;
pub mod service;
pub mod video_id;

pub use entity::*;
pub use error::DomainError;
pub use port::*;
pub use service::*;
pub use video_id::extract_video_id;
