mod cities;
mod init;
mod show;
mod stats;
mod tags;

pub use cities::cmd_list_cities;
pub use init::cmd_init;
pub use show::{cmd_show_city, cmd_watch};
pub use stats::cmd_stats;
pub use tags::cmd_list_tags;
