//! Infrastructure layer.

pub mod dataset;
pub mod source;

pub use self::{
    dataset::{Dataset, DatasetCache},
    source::{Source, Static},
};
