extern crate clap;
extern crate env_logger;
extern crate failure;
#[macro_use]
extern crate log;
extern crate mandelzoom;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use mandelzoom::{
    ConsoleProgress, FrameSequencer, FrameSink, NoProgress, PngSink, Progress, RenderConfig,
    Renderer, SequenceConfig,
};
use num::Complex;
use std::str::FromStr;

/// Given a string and a separator, returns the two values
/// separated by the separator.
fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + PartialOrd>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

/// Parse a flag whose validator already accepted it.
fn value<T: FromStr>(matches: &ArgMatches, name: &str) -> Result<T, Error> {
    let raw = matches
        .value_of(name)
        .ok_or_else(|| failure::err_msg(format!("missing value for --{}", name)))?;
    T::from_str(raw).map_err(|_| failure::err_msg(format!("could not parse --{} {}", name, raw)))
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const ZOOM: &str = "zoom";
const ZOOMGROWTH: &str = "growth";
const START: &str = "start";
const COUNT: &str = "frames";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const MIN_ITERATIONS: &str = "min-iterations";
const MAX_ITERATIONS: &str = "max-iterations";
const QUIET: &str = "quiet";

const DEFAULT_CENTER: &str = "-0.7448617666197486,-0.1225611668766516";
const DEFAULT_GROWTH: &str = "1.05";
const DEFAULT_FRAMES: &str = "1000000000";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandelzoom")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders an endless zoom into the Mandelbrot set, one PNG per frame")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .default_value("frames")
                .help("Directory the frames are written to"),
        )
        .arg(
            Arg::with_name(SIZE)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1080x1080")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of each frame"),
        )
        .arg(
            Arg::with_name(CENTER)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value(DEFAULT_CENTER)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse the zoom center"))
                .help("Point of the complex plane the zoom closes in on, as RE,IM"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .default_value("1")
                .validator(|s| {
                    validate_range(
                        &s,
                        std::f64::MIN_POSITIVE,
                        std::f64::MAX,
                        "Could not parse the zoom",
                        "Zoom must be greater than zero",
                    )
                })
                .help("Zoom of the first frame"),
        )
        .arg(
            Arg::with_name(ZOOMGROWTH)
                .long(ZOOMGROWTH)
                .short("g")
                .takes_value(true)
                .default_value(DEFAULT_GROWTH)
                .validator(|s| {
                    validate_range(
                        &s,
                        1.0 + std::f64::EPSILON,
                        std::f64::MAX,
                        "Could not parse the zoom growth",
                        "Zoom growth must be greater than 1",
                    )
                })
                .help("Zoom multiplier from one frame to the next"),
        )
        .arg(
            Arg::with_name(START)
                .long(START)
                .takes_value(true)
                .default_value("0")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        std::u64::MAX,
                        "Could not parse the start frame",
                        "Start frame out of range",
                    )
                })
                .help("Frame to resume from"),
        )
        .arg(
            Arg::with_name(COUNT)
                .long(COUNT)
                .short("n")
                .takes_value(true)
                .default_value(DEFAULT_FRAMES)
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        std::u64::MAX,
                        "Could not parse the frame count",
                        "Frame count out of range",
                    )
                })
                .help("Number of frames to render"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads each frame's rows are shared among [default: one per CPU]"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("1000")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        1_000_000,
                        "Could not parse iteration count",
                        "Base iteration count must be between 0 and 1000000",
                    )
                })
                .help("Base iterations per point, before zoom and resolution are added"),
        )
        .arg(
            Arg::with_name(MIN_ITERATIONS)
                .long(MIN_ITERATIONS)
                .takes_value(true)
                .default_value("500")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        10_000_000,
                        "Could not parse minimum iteration count",
                        "Minimum iteration count must be between 1 and 10000000",
                    )
                })
                .help("Fewest iterations any frame gets"),
        )
        .arg(
            Arg::with_name(MAX_ITERATIONS)
                .long(MAX_ITERATIONS)
                .takes_value(true)
                .default_value("100000")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        10_000_000,
                        "Could not parse maximum iteration count",
                        "Maximum iteration count must be between 1 and 10000000",
                    )
                })
                .help("Most iterations any frame gets"),
        )
        .arg(
            Arg::with_name(QUIET)
                .long(QUIET)
                .short("q")
                .help("No progress line, warnings and errors only"),
        )
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let (width, height) = parse_pair::<u16>(matches.value_of(SIZE).unwrap_or(""), 'x')
        .ok_or_else(|| failure::err_msg("could not parse image size"))?;
    let center = parse_complex(matches.value_of(CENTER).unwrap_or(""))
        .ok_or_else(|| failure::err_msg("could not parse the zoom center"))?;
    let quiet = matches.is_present(QUIET);

    let render = RenderConfig {
        width: width as usize,
        height: height as usize,
        base_iterations: value(matches, ITERATIONS)?,
        min_iterations: value(matches, MIN_ITERATIONS)?,
        max_iterations_cap: value(matches, MAX_ITERATIONS)?,
    };
    let sequence = SequenceConfig {
        center,
        initial_zoom: value(matches, ZOOM)?,
        growth: value(matches, ZOOMGROWTH)?,
        start_frame: value(matches, START)?,
        frames: value(matches, COUNT)?,
    };

    let threads = match matches.value_of(THREADS) {
        Some(_) => value(matches, THREADS)?,
        None => num_cpus::get(),
    };
    let renderer = Renderer::new(render, threads)?;
    let frames = FrameSequencer::from_config(&sequence)?;
    let mut sink = PngSink::new(matches.value_of(OUTPUT).unwrap_or("frames"))?;
    info!(
        "Rendering {}x{} frames into {} with {} threads",
        width,
        height,
        sink.directory().display(),
        renderer.threads()
    );

    for (frame, viewport) in frames {
        let console = ConsoleProgress::new(frame);
        let progress: &dyn Progress = if quiet { &NoProgress } else { &console };
        let buffer = renderer.render_frame(&viewport, progress)?;
        match sink.save(frame, &buffer) {
            Ok(path) => info!("Saved frame {:04} to {}", frame, path.display()),
            Err(e) => error!("Error saving frame {:04}: {}", frame, e),
        }
    }

    info!("Finished rendering frames");
    Ok(())
}

fn main() {
    let matches = args();
    let level = if matches.is_present(QUIET) { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
