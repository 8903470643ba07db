//! Replaces a workout with re-entered values.
//!
//! The replacement keeps the original position and list slot but gets a new
//! id and creation date.

use super::new::{prompt_fields, settle, FormArgs};
use crate::{
    libs::{
        app::Submission,
        config::Config,
        messages::Message,
        session,
        view::View,
        workout::WorkoutId,
    },
    msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Workout ID
    id: String,
    #[command(flatten)]
    form: FormArgs,
}

pub fn cmd(args: EditArgs) -> Result<()> {
    let config = Config::read()?;
    let mut session = session::open(&config)?;
    let id = WorkoutId::from(args.id);

    if !session.stage_edit(&id) {
        msg_warning!(Message::WorkoutNotFound(id.to_string()));
        return Ok(());
    }
    if let Some(workout) = session.workouts().get(&id) {
        msg_print!(Message::EditingWorkout(workout.description.clone()));
    }

    args.form.apply(session.form_mut());
    let interactive = !args.form.is_complete(session.form().workout_type);

    loop {
        if interactive {
            prompt_fields(session.form_mut(), false)?;
        }

        let Some(submission) = settle(session.submit()?, interactive)? else {
            continue;
        };
        match submission {
            Submission::Updated(new_id) => {
                if let Some(workout) = session.workouts().get(&new_id) {
                    msg_success!(Message::WorkoutUpdated(workout.description.clone()));
                    View::workout(workout);
                }
            }
            Submission::Skipped => msg_warning!(Message::EditSkipped),
            _ => {}
        }
        return Ok(());
    }
}
