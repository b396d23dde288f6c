use dwellpad::adapters::{ChannelHandler, EstimatorSource, PointerSource};
use dwellpad::app::{map_event, App, AppAction};
use dwellpad::cli::{parse_args, version_string, CliCommand, SourceChoice, USAGE, VERSION};
use dwellpad::config::DwellConfig;
use dwellpad::keypad::Viewport;
use dwellpad::runtime::{spawn_engine, EngineHandle};
use dwellpad::sample::SampleSpace;
use dwellpad::terminal::{setup_panic_hook, TerminalManager};
use dwellpad::traits::PositionSource;
use dwellpad::{logging, ui};

use color_eyre::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use tracing::{info, warn};

/// The position source picked on the command line.
enum ActiveSource {
    Pointer(PointerSource),
    Estimator(EstimatorSource),
}

impl ActiveSource {
    /// Connect before the terminal is taken over, so failures print normally.
    async fn open(choice: &SourceChoice, config: &DwellConfig) -> Result<Self> {
        Ok(match choice {
            SourceChoice::Pointer => {
                ActiveSource::Pointer(PointerSource::new(config.tick_interval))
            }
            SourceChoice::Estimator(_) => {
                info!(url = %config.estimator.url, "Connecting to gaze estimator");
                ActiveSource::Estimator(EstimatorSource::connect(config.estimator.clone()).await?)
            }
        })
    }

    fn position_source(&self) -> &dyn PositionSource {
        match self {
            ActiveSource::Pointer(source) => source,
            ActiveSource::Estimator(source) => source,
        }
    }

    fn pointer(&self) -> Option<&PointerSource> {
        match self {
            ActiveSource::Pointer(source) => Some(source),
            ActiveSource::Estimator(_) => None,
        }
    }

    fn name(&self, config: &DwellConfig) -> String {
        match self {
            ActiveSource::Pointer(_) => "pointer".to_string(),
            ActiveSource::Estimator(_) => format!("estimator {}", config.estimator.url),
        }
    }
}

/// Terminal preset, with the sample space of the chosen source.
fn base_config(choice: &SourceChoice) -> DwellConfig {
    let space = match choice {
        SourceChoice::Pointer => SampleSpace::Pixels,
        SourceChoice::Estimator(_) => SampleSpace::Normalized,
    };
    DwellConfig::terminal().with_sample_space(space)
}

fn main() -> Result<()> {
    let options = match parse_args(std::env::args()) {
        Ok(CliCommand::Version) => {
            println!("{}", version_string());
            return Ok(());
        }
        Ok(CliCommand::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Ok(CliCommand::Run(options)) => options,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    color_eyre::install()?;

    let log_path = logging::init(options.log_path.clone())?;
    info!(version = VERSION, log = %log_path.display(), "dwellpad starting");

    // Environment first, command line wins
    let config = options.apply(base_config(&options.source).with_env_overrides()?);
    config.validate()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run(config, options.source))
}

async fn run(config: DwellConfig, choice: SourceChoice) -> Result<()> {
    let source = ActiveSource::open(&choice, &config).await?;

    setup_panic_hook();
    let mut manager = TerminalManager::new()?;
    let size = manager.size()?;
    let viewport = Viewport::from_cells(size.width, size.height);

    let (handler, activations) = ChannelHandler::channel();
    let engine = spawn_engine(&config, viewport, source.position_source(), handler);
    let mut app = App::new(&config, viewport, source.name(&config));

    let result = run_app(&mut manager, &mut app, &engine, &source, activations).await;

    source.position_source().shutdown();
    if let Err(e) = engine.shutdown().await {
        warn!("Engine did not shut down cleanly: {}", e);
    }
    manager.restore();
    info!(typed = app.buffer().as_str(), "dwellpad exiting");
    result
}

async fn run_app(
    manager: &mut TerminalManager,
    app: &mut App,
    engine: &EngineHandle<ChannelHandler>,
    source: &ActiveSource,
    mut activations: tokio::sync::mpsc::UnboundedReceiver<dwellpad::dwell::ActivationEvent>,
) -> Result<()> {
    let mut events = EventStream::new();
    let mut snapshots = engine.subscribe();
    let mut source_state = source.position_source().state();
    app.set_source_state(*source_state.borrow_and_update());

    while !app.should_quit {
        if app.needs_redraw {
            manager.terminal().draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => apply_action(map_event(app, &event), app, engine, source),
                Some(Err(e)) => return Err(e.into()),
                None => app.quit(),
            },

            Some(activation) = activations.recv() => app.apply_activation(&activation),

            Ok(()) = snapshots.changed() => {
                let snapshot = *snapshots.borrow_and_update();
                app.update_snapshot(snapshot);
            }

            Ok(()) = source_state.changed() => {
                let state = *source_state.borrow_and_update();
                app.set_source_state(state);
            }
        }
    }

    Ok(())
}

fn apply_action(
    action: AppAction,
    app: &mut App,
    engine: &EngineHandle<ChannelHandler>,
    source: &ActiveSource,
) {
    match action {
        AppAction::None => {}
        AppAction::Quit => app.quit(),
        AppAction::Activate(key) => {
            if let Err(e) = engine.activate_now(key) {
                warn!(%key, "Manual activation dropped: {}", e);
            }
        }
        AppAction::PointerMoved { column, row } => {
            if let Some(pointer) = source.pointer() {
                pointer.pointer_moved(column, row);
            }
        }
        AppAction::Resize { columns, rows } => {
            let viewport = Viewport::from_cells(columns, rows);
            app.resize(viewport);
            if let Err(e) = engine.resize(viewport) {
                warn!("Resize not delivered to engine: {}", e);
            }
        }
    }
}
