//! Focuses a workout: centers the map on it, opens its popup and counts
//! the selection.

use crate::{
    libs::{config::Config, geolocation::Locator, messages::Message, session, view::View, workout::WorkoutId},
    msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// Workout ID
    id: String,
}

pub async fn cmd(args: SelectArgs) -> Result<()> {
    let config = Config::read()?;
    let mut session = session::open(&config)?;
    let id = WorkoutId::from(args.id);

    if session.workouts().get(&id).is_none() {
        msg_warning!(Message::WorkoutNotFound(id.to_string()));
        return Ok(());
    }

    session::attach_map(&mut session, &Locator::from_config(&config.geolocation_config()), &config.map_config()).await;

    let Some(workout) = session.select(&id)?.cloned() else {
        msg_warning!(Message::WorkoutNotFound(id.to_string()));
        return Ok(());
    };

    msg_success!(Message::WorkoutSelected(workout.description.clone(), workout.click_count));
    View::workout(&workout);
    if let Some(map) = session.map() {
        msg_print!(Message::MapView(map.url()));
    }
    Ok(())
}
