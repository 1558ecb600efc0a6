use std::io::Write;
use std::path::{Path, PathBuf};

use argh::FromArgs;
use common::*;
use config::ConfigType;
use engine::Engine;
use simulation::{Exit, Simulation, SimulationBackend};

/// Drive a four motor stick car with the arrow keys.
#[derive(FromArgs)]
struct Args {
    /// path to the config file
    #[argh(option, short = 'c', default = "PathBuf::from(\"config.ron\")")]
    config: PathBuf,

    /// don't reload the config file when it changes
    #[argh(switch)]
    no_watch: bool,

    /// run without a window, replaying the scripted input from the config
    #[argh(switch)]
    headless: bool,
}

fn log_timestamp(out: &mut dyn Write) -> std::io::Result<()> {
    write!(out, "T{:06}", simulation::current_tick())
}

fn run<B: SimulationBackend>() -> BoxedResult<()> {
    let mut backend = B::new(&config::get())?;
    info!("initialized backend"; "backend" => B::name());

    loop {
        let simulation = Simulation::<B::Renderer>::new(&config::get())?;

        let engine = Engine::new(simulation, &mut backend);
        let exit = engine.run()?;

        if let Exit::Stop = exit {
            break;
        }

        info!("restarting simulation");
        backend.reset();
    }

    Ok(())
}

fn init_config(path: &Path, watch: bool) -> BoxedResult<()> {
    info!("loading config"; "path" => %path.display(), "watch" => watch);

    let cfg = if watch {
        ConfigType::WatchedFile(path)
    } else {
        ConfigType::File(path)
    };

    config::init(cfg)?;
    Ok(())
}

fn do_main(args: Args) -> BoxedResult<()> {
    init_config(&args.config, !args.no_watch)?;

    #[cfg(feature = "use-sdl")]
    {
        if !args.headless {
            return run::<engine::SdlBackend>();
        }
    }

    #[cfg(not(feature = "use-sdl"))]
    {
        if !args.headless {
            info!("built without a window backend, running headless");
        }
    }

    run::<engine::HeadlessBackend>()
}

fn log_error(e: &dyn std::error::Error) {
    error!("error: {}", e);

    let mut src = e.source();
    while let Some(source) = src {
        error!(" caused by: {}", source);
        src = source.source();
    }
}

fn main() {
    let args: Args = argh::from_env();

    let logger = match logging::LoggerBuilder::with_env().and_then(|b| b.init(log_timestamp)) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };
    debug!("initialized logging"; "level" => ?logger.level());

    common::panic::init_panic_detection();

    let exit = match common::panic::run_and_handle_panics(move || do_main(args)) {
        Some(Ok(())) => 0,
        Some(Err(e)) => {
            log_error(&*e);
            1
        }
        None => 2,
    };

    info!("exiting with exit code {}", exit);

    // flush async logger
    drop(logger);
    std::process::exit(exit);
}
