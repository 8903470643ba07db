//! Writes the map with a marker per workout as GeoJSON.

use crate::{
    libs::{config::Config, data_storage::DataStorage, geolocation::Locator, messages::Message, session},
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

pub const MAP_FILE_NAME: &str = "map.geojson";

#[derive(Debug, Args)]
pub struct MapArgs {
    /// Output file; defaults to the application data directory
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn cmd(args: MapArgs) -> Result<()> {
    let config = Config::read()?;
    let mut session = session::open(&config)?;

    if session::attach_map(&mut session, &Locator::from_config(&config.geolocation_config()), &config.map_config())
        .await
        .is_none()
    {
        return Ok(());
    }
    let Some(map) = session.map() else {
        return Ok(());
    };

    let path = match args.output {
        Some(path) => path,
        None => DataStorage::new().get_path(MAP_FILE_NAME)?,
    };
    map.save(&path)?;

    msg_success!(Message::MapExported(path.display().to_string()));
    msg_info!(Message::MarkersRendered(map.marker_count()));
    msg_print!(Message::MapView(map.url()));
    Ok(())
}
