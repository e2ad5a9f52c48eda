use tracing::info;
use via_covergen::startup;

fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting via-covergen");

    // Load configuration
    let config = startup::load_config()?;

    // Run the pipeline; the output path is the program's only stdout
    let path = startup::run(&config)?;
    println!("{}", path.display());

    Ok(())
}
