pub mod camera;
pub mod view;
pub mod zone;

pub use camera::Camera;
pub use view::{LatLng, ViewState};
pub use zone::{Point, Zone, ZoneType};
