//! Handler for the `run` command.

use tracing::info;

use crate::cli::RunArgs;
use crate::error::Result;
use crate::infrastructure::bootstrap::App;

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = args.load_config()?;
    config.init_logging();

    if args.dry_run {
        info!("Dry-run mode enabled - digests will be logged, not sent");
    }

    App::build(config, args.options())?.run().await;
    Ok(())
}
