use geocoords::{Coordinate, CoordinateInput, FormatOptions};
use std::error::Error;
use tracing_subscriber::EnvFilter;

const PROGRAM: &str = "coords";

fn usage() -> String {
    format!(
        "Usage: {} [--strict] [--json] [-f dd|dms] [-d <decimals>] <coordinates> [<longitude>]",
        PROGRAM
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{}", usage());
        return Ok(());
    }
    if args.contains(["-V", "--version"]) {
        println!("{} {}", PROGRAM, env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let strict = args.contains("--strict");
    let json = args.contains("--json");
    let kind: Option<String> = args.opt_value_from_str(["-f", "--format"])?;
    let decimals: Option<u32> = args.opt_value_from_str(["-d", "--decimals"])?;
    let options = FormatOptions::new(kind.unwrap_or_default().as_str(), decimals);

    let free: Vec<String> = args
        .finish()
        .into_iter()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let input = match free.as_slice() {
        [coordinates] => CoordinateInput::from(coordinates.as_str()),
        [latitude, longitude] => CoordinateInput::from((latitude.as_str(), longitude.as_str())),
        _ => return Err(usage().into()),
    };

    let coordinate = if strict {
        Coordinate::parse_strict(input)?
    } else {
        Coordinate::new(input)
    };

    if json {
        println!("{}", serde_json::to_string(&coordinate)?);
    } else {
        println!("{}", coordinate.format_with(&options));
    }

    Ok(())
}
