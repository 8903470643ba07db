use crate::{
    libs::{config::Config, messages::Message, session, workout::WorkoutId},
    msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Workout ID
    id: String,
}

pub fn cmd(args: DeleteArgs) -> Result<()> {
    let config = Config::read()?;
    let mut session = session::open(&config)?;
    let id = WorkoutId::from(args.id);

    if session.remove_workout(&id)? {
        msg_success!(Message::WorkoutDeleted(id.to_string()));
    } else {
        msg_warning!(Message::WorkoutNotFound(id.to_string()));
    }
    Ok(())
}
