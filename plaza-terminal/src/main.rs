/// Plaza Terminal Demo - Stair Tower and Primitives
///
/// Renders the plaza scene with the terminal-based ASCII rasterizer.
/// Usage: plaza-terminal [--log-file PATH] [RESOLUTION]
/// Logs go to plaza-terminal.log unless --log-file names another file.
/// Controls:
///   - Mouse drag / A D / Arrow Keys: Turn the scene
///   - Q/ESC: Quit
use plaza_terminal::{init_logging, AppConfig, TerminalApp};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_args(std::env::args().skip(1))?;
    init_logging(config.logging.clone());

    log::info!(
        "Starting plaza renderer at {}x{} resolution",
        config.tessellation.columns,
        config.tessellation.rows
    );

    let mut app = TerminalApp::new(&config)?;
    app.run()?;

    log::info!("Renderer closed");
    Ok(())
}
