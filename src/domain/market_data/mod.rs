//! Record model and the filter that selects one company-month of it.

pub mod entities;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use services::{RecordFilterService, filter};
pub use value_objects::*;
