pub mod delete;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod map;
pub mod new;
pub mod reset;
pub mod select;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Record a workout at a map position")]
    New(new::NewArgs),
    #[command(about = "List workouts, newest first")]
    List(list::ListArgs),
    #[command(about = "Center the map on a workout and open its popup", arg_required_else_help = true)]
    Select(select::SelectArgs),
    #[command(about = "Replace a workout with new values", arg_required_else_help = true)]
    Edit(edit::EditArgs),
    #[command(about = "Delete a workout", arg_required_else_help = true)]
    Delete(delete::DeleteArgs),
    #[command(about = "Delete all workouts")]
    Reset(reset::ResetArgs),
    #[command(about = "Write the workout map as GeoJSON")]
    Map(map::MapArgs),
    #[command(about = "Export workouts to a file")]
    Export(export::ExportArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::New(args) => new::cmd(args).await,
            Commands::List(args) => list::cmd(args),
            Commands::Select(args) => select::cmd(args).await,
            Commands::Edit(args) => edit::cmd(args),
            Commands::Delete(args) => delete::cmd(args),
            Commands::Reset(args) => reset::cmd(args),
            Commands::Map(args) => map::cmd(args).await,
            Commands::Export(args) => export::cmd(args),
        }
    }
}
