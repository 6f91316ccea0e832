pub mod analysis;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod filter;
pub mod load;
pub use pipeline::Pipeline;
pub mod oncoxtract;
pub mod pipeline;
pub mod transform;
pub(crate) mod utils;
pub mod validation;
