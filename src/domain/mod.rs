pub mod billing;
pub mod commands;
pub mod errors;
pub mod events;
pub mod holder;
pub mod policy;
pub mod reservation;
pub mod resource;
pub mod value_objects;

pub use errors::*;
pub use events::*;
pub use value_objects::*;
