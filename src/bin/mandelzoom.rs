extern crate clap;
extern crate image;
extern crate mandelzoom;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use mandelzoom::{apply_command, Command, EscapeTime, Grayscale, Renderer, Viewport};
use std::str::FromStr;
use std::time::Duration;

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

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
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

fn validate_zoom(s: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(z) if z > 0.0 => Ok(()),
        Ok(_) => Err("Zoom must be positive".to_string()),
        Err(_) => Err("Could not parse zoom".to_string()),
    }
}

fn validate_script(s: &str) -> Result<(), String> {
    for token in s.split(',').filter(|t| !t.is_empty()) {
        token.parse::<Command>()?;
    }
    Ok(())
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const ZOOM: &str = "zoom";
const OFFSET: &str = "offset";
const ITERATIONS: &str = "iterations";
const THREADS: &str = "threads";
const DEADLINE: &str = "deadline";
const COMMANDS: &str = "commands";

fn args<'a>() -> ArgMatches<'a> {
    App::new("mandelzoom")
        .version("0.1.0")
        .about("Mandelbrot explorer: replay a navigation script, render the final frame")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output image file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x800")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(ZOOM)
                .required(false)
                .long(ZOOM)
                .short("z")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("200")
                .validator(|s| validate_zoom(&s))
                .help("Initial zoom, in pixels per plane unit"),
        )
        .arg(
            Arg::with_name(OFFSET)
                .required(false)
                .long(OFFSET)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-2.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse plane offset"))
                .help("Plane coordinate under the upper-left pixel"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("256")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration cap",
                        "Iteration cap must be between 1 and 1000000",
                    )
                })
                .help("Escape-time iteration cap"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("0")
                .validator(|s| {
                    validate_range(
                        &s,
                        0,
                        4096,
                        "Could not parse thread count",
                        "Thread count must be between 0 and 4096",
                    )
                })
                .help("Worker threads (0 means one per CPU)"),
        )
        .arg(
            Arg::with_name(DEADLINE)
                .required(false)
                .long(DEADLINE)
                .short("d")
                .takes_value(true)
                .default_value("60")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        86_400,
                        "Could not parse deadline",
                        "Deadline must be between 1 and 86400 seconds",
                    )
                })
                .help("Render deadline in seconds"),
        )
        .arg(
            Arg::with_name(COMMANDS)
                .required(false)
                .long(COMMANDS)
                .short("c")
                .takes_value(true)
                .default_value("")
                .validator(|s| validate_script(&s))
                .help("Comma-separated navigation script: in, out, left, right, up, down"),
        )
        .get_matches()
}

fn main() {
    let matches = args();
    let (width, height) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let zoom = f64::from_str(matches.value_of(ZOOM).unwrap()).expect("Error parsing zoom");
    let (offset_x, offset_y) =
        parse_pair(matches.value_of(OFFSET).unwrap(), ',').expect("Error parsing plane offset");
    let iterations =
        u32::from_str(matches.value_of(ITERATIONS).unwrap()).expect("Error parsing iteration cap");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Error parsing thread count");
    let deadline =
        u64::from_str(matches.value_of(DEADLINE).unwrap()).expect("Error parsing deadline");

    let mut viewport = match Viewport::new(zoom, offset_x, offset_y) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Bad viewport: {}", e);
            std::process::exit(1);
        }
    };

    // Replay the navigation script the way an interactive session
    // would: one command per frame, each applied before the next.
    for token in matches
        .value_of(COMMANDS)
        .unwrap()
        .split(',')
        .filter(|t| !t.is_empty())
    {
        let command = token.parse::<Command>().expect("validated above");
        viewport = apply_command(&viewport, command, width, height);
    }

    let escape = match EscapeTime::new(iterations) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("Bad iteration cap: {}", e);
            std::process::exit(1);
        }
    };
    let renderer = match Renderer::new(width, height) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Bad image size: {}", e);
            std::process::exit(1);
        }
    };
    let renderer = renderer
        .with_threads(if threads == 0 {
            num_cpus::get()
        } else {
            threads
        })
        .with_deadline(Duration::from_secs(deadline));

    match renderer.render(&viewport, &escape, &Grayscale) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(buffer) => {
            if let Err(e) = image::save_buffer(
                matches.value_of(OUTPUT).unwrap(),
                buffer.as_bytes(),
                buffer.width() as u32,
                buffer.height() as u32,
                image::ColorType::RGB(8),
            ) {
                eprintln!("Could not write image: {}", e);
                std::process::exit(1);
            }
        }
    }
}
