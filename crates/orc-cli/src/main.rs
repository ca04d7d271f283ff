use std::process::ExitCode;
use std::sync::Arc;

use orc_component::{
    ClusterConfiguration, Component, ComponentConfig, RingComponent, RingKind, TracingListener,
};
use orc_material::{Material, MaterialKind, MaterialLibrary};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn usage() {
    eprintln!("usage: orc-cli material <KIND|name|density>");
    eprintln!("       orc-cli ring <KIND|name|density> <outer> <inner> <length>");
    eprintln!("                    [--kind KIND] [--cluster NAME] [--radial DIST DEG] [--config FILE]");
    eprintln!("       orc-cli library [LINE|SURFACE|BULK]");
}

#[derive(Debug, Serialize)]
struct MassReport {
    component: String,
    material: String,
    cluster_count: u32,
    mass: f64,
    cg: [f64; 3],
    longitudinal_unit_inertia: f64,
    rotational_unit_inertia: f64,
    longitudinal_inertia: f64,
    rotational_inertia: f64,
    radial_shift: [f64; 2],
    bounds: Vec<[f64; 3]>,
}

impl MassReport {
    fn from_component(component: &dyn Component) -> Self {
        let (longitudinal_inertia, rotational_inertia) = component.component_inertia();
        let (shift_y, shift_z) = component.radial_shift();
        Self {
            component: component.name().to_string(),
            material: component.material().encode(),
            cluster_count: component.cluster_count(),
            mass: component.component_mass(),
            cg: component.component_cg().to_array(),
            longitudinal_unit_inertia: component.longitudinal_unit_inertia(),
            rotational_unit_inertia: component.rotational_unit_inertia(),
            longitudinal_inertia,
            rotational_inertia,
            radial_shift: [shift_y, shift_z],
            bounds: component
                .shift_coordinates(component.component_bounds())
                .iter()
                .map(|c| c.to_array())
                .collect(),
        }
    }
}

#[derive(Debug)]
struct RingArgs {
    material: Material,
    outer_radius: f64,
    inner_radius: f64,
    length: f64,
    kind: RingKind,
    cluster: Option<ClusterConfiguration>,
    radial: Option<(f64, f64)>,
    config: Option<String>,
}

fn parse_number(raw: &str, what: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .map_err(|_| format!("invalid {what}: {raw}"))
}

fn parse_ring_kind(raw: &str) -> Result<RingKind, String> {
    RingKind::from_key(raw).ok_or_else(|| format!("unknown ring kind: {raw}"))
}

fn parse_ring_args(args: &[String]) -> Result<RingArgs, String> {
    if args.len() < 4 {
        return Err("ring needs a material and three dimensions".to_string());
    }
    let material = Material::decode(&args[0]).map_err(|e| e.to_string())?;
    let mut parsed = RingArgs {
        material,
        outer_radius: parse_number(&args[1], "outer radius")?,
        inner_radius: parse_number(&args[2], "inner radius")?,
        length: parse_number(&args[3], "length")?,
        kind: RingKind::InnerTube,
        cluster: None,
        radial: None,
        config: None,
    };

    let mut rest = args[4..].iter();
    while let Some(flag) = rest.next() {
        let mut value = |name: &str| {
            rest.next()
                .cloned()
                .ok_or_else(|| format!("{flag} expects {name}"))
        };
        match flag.as_str() {
            "--kind" => parsed.kind = parse_ring_kind(&value("a ring kind")?)?,
            "--cluster" => {
                let name = value("a cluster name")?;
                let cluster = ClusterConfiguration::from_name(&name)
                    .ok_or_else(|| format!("unknown cluster configuration: {name}"))?;
                parsed.cluster = Some(cluster);
            }
            "--radial" => {
                let distance = parse_number(&value("a distance")?, "radial distance")?;
                let degrees = parse_number(&value("a direction")?, "radial direction")?;
                parsed.radial = Some((distance, degrees.to_radians()));
            }
            "--config" => parsed.config = Some(value("a file")?),
            other => return Err(format!("unknown option: {other}")),
        }
    }
    Ok(parsed)
}

fn run_material(encoded: &str) -> ExitCode {
    let material = match Material::decode(encoded) {
        Ok(material) => material,
        Err(err) => {
            eprintln!("material error: {err}");
            return ExitCode::from(1);
        }
    };
    println!("name: {}", material.name());
    println!("kind: {}", material.kind());
    println!("density: {}", material.density());
    println!("display: {material}");
    println!("encoded: {}", material.encode());
    ExitCode::SUCCESS
}

fn run_ring(args: &[String]) -> ExitCode {
    let parsed = match parse_ring_args(args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("argument error: {err}");
            usage();
            return ExitCode::from(2);
        }
    };

    let config = match &parsed.config {
        Some(path) => match ComponentConfig::from_json_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("config error: {err}");
                return ExitCode::from(1);
            }
        },
        None => ComponentConfig::default(),
    };

    let mut ring = RingComponent::from_config(parsed.kind, &config);
    ring.add_listener(Arc::new(TracingListener));
    ring.set_material(parsed.material.shared());
    ring.set_outer_radius(parsed.outer_radius);
    ring.set_inner_radius(parsed.inner_radius);
    ring.set_length(parsed.length);
    if let Some(cluster) = parsed.cluster {
        ring.set_cluster_configuration(cluster);
    }
    if let Some((distance, direction)) = parsed.radial {
        ring.set_radial_position(distance);
        ring.set_radial_direction(direction);
    }

    let report = MassReport::from_component(&ring);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("output error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run_library(kind: Option<&str>) -> ExitCode {
    let kinds = match kind {
        None => MaterialKind::ALL.to_vec(),
        Some(token) => match token.parse::<MaterialKind>() {
            Ok(kind) => vec![kind],
            Err(err) => {
                eprintln!("argument error: {err}");
                return ExitCode::from(2);
            }
        },
    };
    let library = MaterialLibrary::with_defaults();
    for kind in kinds {
        for material in library.of_kind(kind) {
            println!("{}", material.encode());
        }
    }
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("material") if args.len() == 3 => run_material(&args[2]),
        Some("ring") => run_ring(&args[2..]),
        Some("library") if args.len() <= 3 => run_library(args.get(2).map(String::as_str)),
        _ => {
            usage();
            ExitCode::from(2)
        }
    }
}
