use crate::load::error::LoadError;
use crate::pipeline::PipelineOutput;
use std::fmt::Debug;

pub trait Loadable: Debug {
    /// Persists the tables and the report of a single run.
    fn load(&self, output: &PipelineOutput) -> Result<(), LoadError>;
}
