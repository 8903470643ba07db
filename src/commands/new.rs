//! Records a new workout at a map position.
//!
//! Without `--lat`/`--lng` the workout is pinned to the current position.
//! Fields not given as flags are asked for interactively; an invalid
//! submission is reported and, in interactive mode, asked for again with
//! the previous answers as defaults.

use crate::{
    libs::{
        app::Submission,
        config::Config,
        form::{InputError, WorkoutForm},
        geolocation::Locator,
        messages::Message,
        session::{self, Session},
        view::View,
        workout::{Coords, WorkoutId, WorkoutType},
    },
    msg_bail_anyhow, msg_error, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Select};

/// Form fields as flags.
///
/// Values are taken as text so they go through the same coercion as
/// typed answers.
#[derive(Debug, Args)]
pub struct FormArgs {
    /// Workout type
    #[arg(short = 't', long = "type", value_enum)]
    pub workout_type: Option<WorkoutType>,
    /// Distance in km
    #[arg(short, long, allow_hyphen_values = true)]
    pub distance: Option<String>,
    /// Duration in minutes
    #[arg(short = 'm', long, allow_hyphen_values = true)]
    pub duration: Option<String>,
    /// Cadence in steps per minute (running)
    #[arg(short, long, allow_hyphen_values = true)]
    pub cadence: Option<String>,
    /// Elevation gain in meters (cycling)
    #[arg(short, long, allow_hyphen_values = true)]
    pub elevation: Option<String>,
}

impl FormArgs {
    /// Whether every field the given type shows was passed as a flag.
    pub fn is_complete(&self, workout_type: WorkoutType) -> bool {
        let specific = match workout_type {
            WorkoutType::Running => self.cadence.is_some(),
            WorkoutType::Cycling => self.elevation.is_some(),
        };
        self.distance.is_some() && self.duration.is_some() && specific
    }

    /// Copies the given flags into the form.
    pub fn apply(&self, form: &mut WorkoutForm) {
        if let Some(workout_type) = self.workout_type {
            form.set_type(workout_type);
        }
        if let Some(distance) = &self.distance {
            form.distance = distance.clone();
        }
        if let Some(duration) = &self.duration {
            form.duration = duration.clone();
        }
        if let Some(cadence) = &self.cadence {
            form.cadence = cadence.clone();
        }
        if let Some(elevation) = &self.elevation {
            form.elevation = elevation.clone();
        }
    }
}

#[derive(Debug, Args)]
pub struct NewArgs {
    #[command(flatten)]
    form: FormArgs,
    /// Latitude of the workout; defaults to the current position
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    lat: Option<f64>,
    /// Longitude of the workout
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lng: Option<f64>,
}

pub async fn cmd(args: NewArgs) -> Result<()> {
    let config = Config::read()?;
    let mut session = session::open(&config)?;
    let map_config = config.map_config();

    let position = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => Some(Coords::new(lat, lng)),
        _ => session::attach_map(&mut session, &Locator::from_config(&config.geolocation_config()), &map_config).await,
    };
    let Some(position) = position else {
        msg_bail_anyhow!(Message::NoPositionSelected);
    };

    session.show_form(position);
    let interactive = !args.form.is_complete(args.form.workout_type.unwrap_or(WorkoutType::Running));
    args.form.apply(session.form_mut());

    let mut ask_type = args.form.workout_type.is_none();
    loop {
        if interactive {
            prompt_fields(session.form_mut(), ask_type)?;
        }

        let Some(submission) = settle(session.submit()?, interactive)? else {
            ask_type = false;
            continue;
        };
        if let Submission::Created(id) = submission {
            report_saved(&session, &id);
        }
        return Ok(());
    }
}

/// Sorts a submission into done (`Some`), ask again (`None`) or failed.
///
/// Invalid numbers are asked for again only while prompting; without
/// prompts every rejection fails the command.
pub fn settle(submission: Submission, interactive: bool) -> Result<Option<Submission>> {
    match submission {
        Submission::Rejected(InputError::NotPositive) if interactive => {
            msg_error!(Message::InvalidInputs);
            Ok(None)
        }
        Submission::Rejected(InputError::NotPositive) => {
            msg_bail_anyhow!(Message::InvalidInputs)
        }
        Submission::Rejected(e) => {
            msg_bail_anyhow!(e)
        }
        done => Ok(Some(done)),
    }
}

fn report_saved(session: &Session, id: &WorkoutId) {
    if let Some(workout) = session.workouts().get(id) {
        msg_success!(Message::WorkoutCreated(workout.description.clone()));
        View::workout(workout);
    }
}

/// Asks for every visible field, offering the form's current values as
/// defaults.
pub fn prompt_fields(form: &mut WorkoutForm, ask_type: bool) -> Result<()> {
    if ask_type {
        let types = [WorkoutType::Running, WorkoutType::Cycling];
        let selected = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptWorkoutType.to_string())
            .items(&types.iter().map(|workout_type| workout_type.label()).collect::<Vec<_>>())
            .default(if form.workout_type == WorkoutType::Cycling { 1 } else { 0 })
            .interact()?;
        form.set_type(types[selected]);
    }

    form.distance = ask(Message::PromptDistance, &form.distance)?;
    form.duration = ask(Message::PromptDuration, &form.duration)?;
    if form.cadence_visible() {
        form.cadence = ask(Message::PromptCadence, &form.cadence)?;
    }
    if form.elevation_visible() {
        form.elevation = ask(Message::PromptElevation, &form.elevation)?;
    }
    Ok(())
}

fn ask(prompt: Message, current: &str) -> Result<String> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt.to_string()).allow_empty(true);
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    Ok(input.interact_text()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_passes_saved_submissions() {
        let id = WorkoutId::from("1710405000");

        assert_eq!(settle(Submission::Created(id.clone()), false).unwrap(), Some(Submission::Created(id.clone())));
        assert_eq!(settle(Submission::Updated(id.clone()), true).unwrap(), Some(Submission::Updated(id)));
        assert_eq!(settle(Submission::Skipped, false).unwrap(), Some(Submission::Skipped));
    }

    #[test]
    fn test_settle_asks_again_while_prompting() {
        assert_eq!(settle(Submission::Rejected(InputError::NotPositive), true).unwrap(), None);
    }

    #[test]
    fn test_settle_fails_rejection_without_prompts() {
        let error = settle(Submission::Rejected(InputError::NotPositive), false).unwrap_err();
        assert!(error.to_string().contains("Inputs have to be positive numbers!"));

        assert!(settle(Submission::Rejected(InputError::NoPosition), true).is_err());
        assert!(settle(Submission::Rejected(InputError::FormClosed), false).is_err());
    }
}
