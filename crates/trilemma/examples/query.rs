//! Answer a trade-off query from the command line.
//!
//! Pass the query as `key=value` arguments, e.g.:
//!
//! ```sh
//! cargo run --example query -- x=512 y=84 mode=p3
//! ```
//!
//! The example uses the same canvas geometry as the web page, an equilateral
//! triangle of size 300 centered on a 1024x768 canvas, and prints the JSON
//! response. Set `RUST_LOG=debug` to watch the point-to-weights mapping.

use trilemma::query::{respond, Request};
use trilemma::{Palette, Point, Triangle};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let pairs = args
        .iter()
        .map(|arg| arg.split_once('=').unwrap_or((arg.as_str(), "")));

    let request = Request::from_query_pairs(pairs)?;
    let triangle = Triangle::equilateral(Point::new(512.0, 384.0), 300.0)?;
    let response = respond(&triangle, &Palette::DEFAULT, &request)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
