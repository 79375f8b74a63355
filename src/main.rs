// main.rs
//
// Demo driver: load (or build) a closed mesh, split it by a plane, pull the
// halves apart along the cut normal, and write the results as STL files.
//
// Usage:
//   cleaver [input.stl [px py pz nx ny nz [output-dir]]]
//
// With no arguments a unit sphere is split through its center by the Y plane.

use cleaver::float_types::Real;
use cleaver::{Mesh, Plane};
use nalgebra::{Point3, Vector3};
use std::{env, fs, path::PathBuf, process::ExitCode};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("cleaver: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let mesh = match args.first() {
        Some(path) => Mesh::from_stl_file(path).map_err(|e| format!("{path}: {e}"))?,
        None => Mesh::sphere(1.0, 32, 16),
    };

    let (point, normal) = if args.len() >= 7 {
        let mut parsed = [0.0 as Real; 6];
        for (slot, arg) in parsed.iter_mut().zip(&args[1..7]) {
            *slot = arg
                .parse()
                .map_err(|_| format!("not a number: {arg}"))?;
        }
        (
            Point3::new(parsed[0], parsed[1], parsed[2]),
            Vector3::new(parsed[3], parsed[4], parsed[5]),
        )
    } else {
        (mesh.bounding_box().center(), Vector3::y())
    };

    let out_dir = PathBuf::from(args.get(7).map(String::as_str).unwrap_or("stl"));
    fs::create_dir_all(&out_dir).map_err(|e| e.to_string())?;

    let plane = Plane::from_point_normal(point, normal).map_err(|e| e.to_string())?;
    let halves = mesh.split(&plane).map_err(|e| e.to_string())?;

    // pull the halves apart along the cut normal, then re-aggregate
    let gap = mesh.bounding_box().diagonal() * 0.1;
    let positive = halves.positive.translate_vector(plane.normal() * gap);
    let negative = halves.negative.translate_vector(plane.normal() * -gap);
    let exploded = positive.merge(&negative);

    for (name, half) in [
        ("positive", &positive),
        ("negative", &negative),
        ("exploded", &exploded),
    ] {
        let path = out_dir.join(format!("{name}.stl"));
        let bytes = half.to_stl_binary().map_err(|e| e.to_string())?;
        fs::write(&path, bytes).map_err(|e| e.to_string())?;
        println!(
            "{}: {} triangles, volume {:.6}",
            path.display(),
            half.triangle_count(),
            half.volume()
        );
    }
    Ok(())
}
