//! Background [`Task`]s definitions.

mod background;
pub mod warm_dataset;

pub use common::Handler as Task;

pub use self::{background::Background, warm_dataset::WarmDataset};
