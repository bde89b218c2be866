//! Material domain entities.

pub mod category;
pub mod location;
pub mod model;
pub mod status;

pub use category::{MaterialCategory, MaterialCondition};
pub use location::{Coordinates, Location, PickupSchedule};
pub use model::{CreateMaterial, Material, UpdateMaterial};
pub use status::MaterialStatus;
