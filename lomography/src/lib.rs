//! Lomography
//!
//! Interactive front end for the `lomo-effect` filters: one window showing the
//! picture, a slider per filter, `s` to save the displayed image and quit,
//! `q` to quit without saving.

slint::include_modules!();

mod cli;
mod config;
mod logic;

pub use cli::Cli;
pub use config::Config;

use anyhow::Result;
use lomo_effect::FilterSession;
use std::{cell::RefCell, rc::Rc};

/// Initializes the logger.
///
/// Each line carries a local timestamp, the level, the source file name and
/// line. Defaults to `info` when `RUST_LOG` is unset.
pub fn init_logger() {
    use std::io::Write;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            let ts = chrono::Local::now().format("%H:%M:%S");

            writeln!(
                buf,
                "[{} {style}{}{style:#} {} {}] {}",
                ts,
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

/// Main entry point for the desktop application.
///
/// # Tasks
/// - Resolves configuration file and command line overrides
/// - Decodes the picture; nothing is shown if that fails
/// - Creates the window with both sliders at their configured values
/// - Runs the event loop until a key or the window ends it
pub fn desktop_main(cli: Cli) -> Result<()> {
    log::debug!("start...");

    let config = match cli.no_config {
        true => Config::default(),
        false => Config::init()?,
    };
    let config = config.merge_cli(&cli);

    let session = FilterSession::open(&cli.image)?.with_radius_mode(config.radius_mode());
    let session = Rc::new(RefCell::new(session));
    let fatal: logic::FatalError = Rc::new(RefCell::new(None));

    #[cfg(target_os = "linux")]
    {
        _ = slint::set_xdg_app_id("lomography".to_string());
    }

    let ui = AppWindow::new()?;
    ui.set_steepness(config.filter.steepness);
    ui.set_radius(config.filter.radius);
    logic::init(&ui, session, config.output.path.clone(), fatal.clone());

    ui.run()?;

    log::debug!("exit...");

    match fatal.borrow_mut().take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
