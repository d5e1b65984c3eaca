pub mod console;
pub mod controller;
pub mod surfaces;

pub use controller::{MapView, ViewError, ViewSettings};
pub use surfaces::{ListEntry, ListSurface, MapMarker, MapSurface};
