//! Handler for the `dispatch` command.

use crate::application::dispatch::CycleReport;
use crate::cli::RunArgs;
use crate::error::Result;
use crate::infrastructure::bootstrap::App;

/// Run one cycle and print its report.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = args.load_config()?;
    config.init_logging();

    let app = App::build(config, args.options())?;
    let report = app.dispatch_once().await?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &CycleReport) {
    println!("Cycle {}", report.cycle_id);
    println!("  Recipients: {}", report.recipients);
    println!("  Delivered:  {}", report.delivered.len());
    println!("  Empty:      {}", report.empty.len());
    println!("  Failed:     {}", report.failures.len());
    if !report.degraded.is_empty() {
        let degraded: Vec<&str> = report.degraded.iter().map(|c| c.as_str()).collect();
        println!("  Fallback:   {}", degraded.join(", "));
    }
    for failure in &report.failures {
        println!("  ✗ {} - {}", failure.recipient, failure.error);
    }
}
