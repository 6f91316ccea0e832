pub mod error;
pub mod strategies;
pub mod traits;
pub mod transform_module;

pub use transform_module::TransformerModule;
