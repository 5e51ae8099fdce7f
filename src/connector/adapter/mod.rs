mod http_inference_endpoint;
mod mock_inference_endpoint;

pub use http_inference_endpoint::*;
pub use mock_inference_endpoint::*;
