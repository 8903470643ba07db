use crate::{
    libs::{
        config::Config,
        messages::Message,
        session,
        store::SortField,
        view::{ListEntry, View},
    },
    msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Sort by field instead of newest first
    #[arg(short, long, value_enum)]
    sort: Option<SortField>,
}

pub fn cmd(args: ListArgs) -> Result<()> {
    let config = Config::read()?;
    let session = session::open(&config)?;

    if session.workouts().is_empty() {
        msg_info!(Message::NoWorkouts);
        return Ok(());
    }

    msg_print!(Message::WorkoutsHeader(session.workouts().len()), true);
    match args.sort {
        Some(field) => {
            let entries: Vec<ListEntry> = session.workouts().sorted_by(field).into_iter().map(ListEntry::from_workout).collect();
            View::workouts(&entries);
        }
        None => View::workouts(session.list().entries()),
    }
    Ok(())
}
