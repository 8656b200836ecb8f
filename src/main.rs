use std::time::Instant;

use log::info;

use trip_route_core::{Result, RouteInput, RouteOptions, logging, output, run};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = RouteOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let input = RouteInput::load(&options)?;
    let result = run(input, &options)?;
    output::write_output(&options, &result.render(options.output_format)?)?;

    info!("output: time={:.3}s", now.elapsed().as_secs_f32());

    Ok(())
}
