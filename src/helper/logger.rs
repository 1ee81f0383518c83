#[cfg(feature = "colored-term")]
use colored::{Color, ColoredString, Colorize};
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

static LOGGER: ConsoleLogger = ConsoleLogger;

/// A simple [`log`] implimentation printing to stdout. Filtering is done through
/// [`log::max_level`] so the level can be changed after [`init`].
pub struct ConsoleLogger;

/// Installs [`ConsoleLogger`] as the global logger. Can only succeed once per process.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    #[cfg(feature = "colored-term")]
    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let color = match record.level() {
            Level::Error => Color::BrightRed,
            Level::Warn => Color::Yellow,
            Level::Info => Color::Cyan,
            Level::Debug => Color::Magenta,
            Level::Trace => Color::Blue,
        };
        let args = format!("{}", record.args());
        let args = if record.level() == Level::Error {
            // only color error message to make them stand out
            args.color(Color::Red)
        } else {
            ColoredString::from(args.as_str())
        };
        println!(
            "{} {} {} {}",
            level_str(record.level()).color(color),
            record
                .module_path()
                .unwrap_or("(unknown module)")
                .color(color),
            ">".color(color),
            args,
        );
    }

    #[cfg(not(feature = "colored-term"))]
    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!(
                "{} {} > {}",
                level_str(record.level()),
                record.module_path().unwrap_or("(unknown module)"),
                record.args(),
            );
        }
    }

    fn flush(&self) {}
}

fn level_str(level: Level) -> &'static str {
    match level {
        Level::Error => "[E]",
        Level::Warn => "[W]",
        Level::Info => "[I]",
        Level::Debug => "[D]",
        Level::Trace => "[T]",
    }
}
