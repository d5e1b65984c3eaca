use crate::config::Config;
use crate::state::AppState;

pub async fn cmd_list_cities(config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(config.clone())?;
    let cities = state.cities.list_cities().await?;

    if cities.is_empty() {
        println!("No cities available.");
        return Ok(());
    }

    println!("Cities:");
    println!("{:-<40}", "");
    for city in cities {
        println!(
            "[{}] {} ({:.4}, {:.4})",
            city.id, city.name, city.lat, city.lon
        );
    }
    Ok(())
}
