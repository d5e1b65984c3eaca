pub mod backend;
pub mod geolocation;

pub use backend::{BackendClient, BackendError};
pub use geolocation::{FixedLocator, GeolocationError, Locator, MaxAgeLocator};
