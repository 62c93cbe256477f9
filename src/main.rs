use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use crossterm::event::EventStream;

use copter_tracker::camera::CameraCapture;
use copter_tracker::cli::{self, Args, Command};
use copter_tracker::config::Config;
use copter_tracker::event_loop::{self, HeadlessOptions, LoopSummary, Screen, FRAME_INTERVAL};
use copter_tracker::logging::{self, LogTarget};
use copter_tracker::session::Session;
use copter_tracker::terminal::ScreenGuard;
use copter_tracker::AppError;

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    match &args.command {
        Some(Command::ListCameras) => return cli::list_cameras(),
        Some(Command::Config { action }) => return cli::handle_config_action(action.clone(), &args),
        None => {}
    }

    // CLI > config file > built-in defaults
    let mut config = Config::load(args.config.as_deref())?;
    config.apply_args(&args);

    let log_target = match (&config.log.file, args.headless) {
        (Some(path), _) => LogTarget::File(path.as_path()),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Discard,
    };
    logging::init(config.log.level.into(), log_target)?;

    let mut camera = CameraCapture::open(config.camera_settings())?;
    camera.start()?;
    let frame_size = camera.actual_resolution().unwrap_or_else(|| config.resolution());
    log::info!(
        "Tracking on camera {} at {}x{}",
        config.camera.device,
        frame_size.width,
        frame_size.height
    );

    let tracker = config.tracker(frame_size);
    let runtime = tokio::runtime::Runtime::new()?;

    let result = if args.headless {
        let stop = Arc::new(AtomicBool::new(false));
        let handler_stop = Arc::clone(&stop);
        ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst))?;

        let options = HeadlessOptions {
            max_frames: args.frames,
            ..HeadlessOptions::default()
        };
        let mut stdout = io::stdout().lock();
        runtime.block_on(event_loop::run_headless(
            &mut camera,
            &tracker,
            options,
            &stop,
            &mut stdout,
        ))
    } else {
        let mut session = Session::new(
            tracker,
            config.display.view.into(),
            config.display.charset.into(),
            config.guides,
        );
        session.invert = config.display.invert;

        let mut guard = ScreenGuard::enter().map_err(AppError::Terminal)?;
        let mut stdout = io::stdout();
        let size = crossterm::terminal::size().unwrap_or((80, 24));
        let result = runtime.block_on(async {
            let mut events = EventStream::new();
            let screen = Screen {
                events: &mut events,
                out: &mut stdout,
                size,
            };
            event_loop::run_interactive(&mut camera, &mut session, screen, FRAME_INTERVAL).await
        });
        guard.exit().map_err(AppError::Terminal)?;

        log::info!("Final filter: {:?}", session.range());
        println!("{}", session.trackbar_line());
        result
    };

    camera.stop();
    let LoopSummary { frames, tracked } = result?;
    log::info!("Processed {} frames, object tracked in {}", frames, tracked);
    Ok(())
}
