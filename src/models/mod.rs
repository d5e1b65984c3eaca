pub mod city;
pub mod restaurant;
pub mod video;

pub use city::City;
pub use restaurant::{EnrichedRestaurant, Restaurant};
pub use video::VideoRef;
