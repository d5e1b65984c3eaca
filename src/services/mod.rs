pub mod cities;
pub use cities::{CityDirectory, CityError, CityService};

pub mod restaurants;
pub use restaurants::{LoadError, RestaurantDirectory, RestaurantService};

pub mod filter;
pub use filter::{CuisineFilter, FilterPanel, InMemoryPanel};

pub mod presenter;
pub use presenter::{EmbedError, EmbedSurface, FrameInspection, PresentOutcome, VideoPresenter};
