pub mod error;
pub mod image_api;
pub mod poster;
pub mod share;
pub mod workflow;

pub use error::{InputError, RequestError};
pub use image_api::{ImageApi, ImgApiBox, OpenAiImages};
pub use share::{ShareBox, ShareTarget};
pub use workflow::PosterWorkflow;
