//! Deletes every stored workout after confirmation.

use crate::{
    libs::{config::Config, messages::Message, session},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    force: bool,
}

pub fn cmd(args: ResetArgs) -> Result<()> {
    let config = Config::read()?;
    let mut session = session::open(&config)?;

    if !args.force {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmReset(session.workouts().len()).to_string())
            .default(false)
            .interact()?;
        if !confirmed {
            msg_info!(Message::ResetCancelled);
            return Ok(());
        }
    }

    session.reset()?;
    msg_success!(Message::WorkoutsCleared);
    Ok(())
}
