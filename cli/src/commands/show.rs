use std::path::Path;
use std::process::ExitCode;

use color_eyre::eyre::Result;
use juicecheck_platform::{acquire, read_basic_status, BasicStatus};
use juicecheck_report::AdvancedInfo;
use tracing::{debug, info};

use crate::config::UserConfig;
use crate::display::{self, Painter};
use crate::output::{BatteryRecord, OutputFormat};

pub struct ShowOptions<'a> {
    pub format: OutputFormat,
    pub export: Option<&'a Path>,
    pub quiet: bool,
}

pub fn run(options: ShowOptions<'_>, config: &UserConfig) -> Result<ExitCode> {
    let painter = Painter::new(config.color);

    // Machine-readable output stays parseable.
    if !options.quiet && options.format == OutputFormat::Text {
        println!("{}", display::banner(env!("CARGO_PKG_VERSION")));
    }

    let Some(basic) = basic_status() else {
        println!("Could not retrieve battery information");
        return Ok(ExitCode::FAILURE);
    };

    let advanced = AdvancedInfo::from_result(
        acquire(&config.acquire_options()).map(|acquisition| acquisition.fields),
    );
    if let Some(error) = advanced.error() {
        debug!(error, "advanced battery data unavailable");
    }

    let record = BatteryRecord::new(basic, advanced);

    match options.format {
        OutputFormat::Text => {
            print!("{}", display::render_basic(&record.basic, painter));
            println!();
            print!("{}", display::render_advanced(&record.advanced, painter));

            let alerts = display::alerts(&record.basic, &record.advanced, &config.alerts);
            if !alerts.is_empty() {
                println!();
            }
            for alert in alerts {
                println!("{}", alert);
            }
        }
        OutputFormat::Json => println!("{}", record.to_json()?),
        OutputFormat::Csv => println!("{}", record.to_csv()),
    }

    if let Some(path) = options.export {
        match record.export(path) {
            Ok(()) => {
                info!(path = %path.display(), "exported battery record");
                println!("Data exported to {}", path.display());
            }
            Err(e) => eprintln!("Error exporting data: {:#}", e),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn basic_status() -> Option<BasicStatus> {
    match read_basic_status() {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error getting battery data: {}", e);
            None
        }
    }
}
