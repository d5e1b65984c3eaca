use crate::clients::geolocation::{FixedLocator, MaxAgeLocator, locate_with_timeout};
use crate::config::Config;
use crate::domain::{CityId, CuisineTag};
use crate::geo::Coordinates;
use crate::services::filter::{CuisineFilter, InMemoryPanel};
use crate::services::presenter::VideoPresenter;
use crate::state::AppState;
use crate::view::console::{ConsoleEmbed, ConsoleList, ConsoleMap};
use crate::view::controller::{MapView, ViewSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub async fn cmd_show_city(
    config: &Config,
    city_id: i64,
    cuisine: &[String],
    at: Option<&str>,
) -> anyhow::Result<()> {
    let state = AppState::new(config.clone())?;
    let city = state.cities.find_city(CityId::new(city_id)).await?;
    let mut view = build_view(config, &state, cuisine);

    if let Some(at) = at {
        view.set_user_position(resolve_position(config, at).await?);
    }

    println!("{}", city.name);
    println!("{:-<40}", "");
    view.select_city(&city).await?;
    Ok(())
}

pub async fn cmd_watch(config: &Config, city_id: i64, number: usize) -> anyhow::Result<()> {
    let state = AppState::new(config.clone())?;
    let city = state.cities.find_city(CityId::new(city_id)).await?;
    let mut view = build_view(config, &state, &[]);

    view.select_city(&city).await?;
    view.select_from_list(number).await?;
    Ok(())
}

fn build_view(config: &Config, state: &AppState, cuisine: &[String]) -> MapView {
    let panel = Arc::new(InMemoryPanel::new());
    for tag in cuisine {
        panel.toggle(&CuisineTag::new(tag));
    }

    let mut filter = CuisineFilter::new();
    filter.register_panel(panel);

    let presenter = VideoPresenter::new(
        Arc::new(ConsoleEmbed),
        Duration::from_millis(config.embed.frame_timeout_ms),
    );

    MapView::new(
        state.restaurants.clone(),
        filter,
        presenter,
        Arc::new(ConsoleList),
        Arc::new(ConsoleMap),
        ViewSettings {
            city_zoom: config.map.city_zoom,
            detail_zoom: config.map.detail_zoom,
        },
    )
}

async fn resolve_position(config: &Config, at: &str) -> anyhow::Result<Option<Coordinates>> {
    let position = parse_position(at)?;
    let locator = MaxAgeLocator::new(
        FixedLocator::new(position),
        Duration::from_secs(config.geolocation.max_age_seconds),
    );
    let timeout = Duration::from_secs(config.geolocation.timeout_seconds);

    match locate_with_timeout(&locator, timeout).await {
        Ok(p) => Ok(Some(p)),
        Err(e) => {
            warn!("geolocation unavailable, distances omitted: {e}");
            Ok(None)
        }
    }
}

fn parse_position(at: &str) -> anyhow::Result<Coordinates> {
    let (lat, lon) = at
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("expected `lat,lon`, got `{at}`"))?;
    Ok(Coordinates::new(
        lat.trim().parse::<f64>()?,
        lon.trim().parse::<f64>()?,
    ))
}
