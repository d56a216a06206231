//! Main application entry point (native).

#[cfg(feature = "native")]
mod native {
    use std::path::PathBuf;
    use tablemark_app::{Replay, Script, ScriptError};
    use tablemark_core::{EditorConfig, FileStorage};

    #[derive(Default)]
    pub struct Options {
        script: Option<PathBuf>,
        config: Option<PathBuf>,
        storage_dir: Option<PathBuf>,
    }

    pub fn parse_options(mut args: impl Iterator<Item = String>) -> Result<Options, ()> {
        let mut options = Options::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => options.config = Some(PathBuf::from(args.next().ok_or(())?)),
                "--storage" => options.storage_dir = Some(PathBuf::from(args.next().ok_or(())?)),
                _ if arg.starts_with("--") => return Err(()),
                _ if options.script.is_none() => options.script = Some(PathBuf::from(arg)),
                _ => return Err(()),
            }
        }
        if options.script.is_none() {
            return Err(());
        }
        Ok(options)
    }

    pub fn print_usage(program: &str) {
        eprintln!("Usage: {} <script.json> [--config <config.json>] [--storage <dir>]", program);
    }

    pub async fn run(options: Options) -> Result<(), ScriptError> {
        let config = match &options.config {
            Some(path) => EditorConfig::load(path)?,
            None => EditorConfig::default(),
        };
        let script_path = options.script.unwrap_or_default();
        let script = Script::load(&script_path)?;
        let storage = match options.storage_dir {
            Some(dir) => FileStorage::new(dir)?,
            None => FileStorage::default_location()?,
        };
        log::info!("Replaying {} steps for {}", script.steps.len(), script.project);

        let mut replay = Replay::open(config, &script, storage).await?;
        replay.run(&script.steps).await?;

        for alert in replay.alerts() {
            eprintln!("{}", alert);
        }
        print!("{}", replay.render());
        Ok(())
    }
}

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Tablemark");

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "tablemark".to_owned());
    let options = match native::parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            native::print_usage(&program);
            std::process::exit(2);
        }
    };

    if let Err(err) = pollster::block_on(native::run(options)) {
        log::error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
