use std::path::PathBuf;

use anyhow::{anyhow, bail};
use clap::{Args, Parser};
use svg::node::element::{path::Data, Group, Line, Path};

use fortune::{generators, parabola, sweep, Diagram, Point};

#[derive(Parser)]
struct Cli {
    #[arg(long)]
    output: PathBuf,

    #[command(flatten)]
    input: Input,

    /// Stop the sweep at this height, and draw its state at that point.
    #[arg(long)]
    cutoff: Option<f64>,

    /// Log every event.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct Input {
    /// One of the built-in site sets.
    #[arg(long)]
    example: Option<String>,

    /// This many random sites.
    #[arg(long)]
    random: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let level = if args.verbose {
        tracing::Level::TRACE
    } else {
        tracing::Level::DEBUG
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let sites = if let Some(name) = &args.input.example {
        generators::named(name).ok_or_else(|| {
            anyhow!(
                "unknown example {name}, try one of {}",
                generators::NAMES.join(", ")
            )
        })?
    } else if let Some(n) = args.input.random {
        generators::random(n, 600.0, 0)
    } else {
        bail!("no input");
    };

    let cutoff = args.cutoff.unwrap_or(f64::NEG_INFINITY);
    let diagram = sweep(sites.iter().copied(), cutoff)?;
    println!(
        "{} edges, {} unencountered events, {:?}",
        diagram.edges.len(),
        diagram.unencountered.len(),
        diagram.stats
    );

    let mut document = diagram.dump_svg();
    if cutoff.is_finite() {
        document = document.add(sweep_state(&diagram, &sites, cutoff));
    }
    svg::save(&args.output, &document)?;
    Ok(())
}

// Draws the sweep line and the arcs of the beachline.
fn sweep_state(diagram: &Diagram, sites: &[Point], cutoff: f64) -> Group {
    let min_x = sites.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = sites.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let margin = (max_x - min_x).max(1.0);
    let (lo, hi) = (min_x - margin, max_x + margin);
    let stroke_width = margin / 256.0;

    let mut group = Group::new().set("transform", "scale(1, -1)").add(
        Line::new()
            .set("x1", lo)
            .set("y1", cutoff)
            .set("x2", hi)
            .set("y2", cutoff)
            .set("stroke", "blue")
            .set("stroke-width", stroke_width),
    );

    let Some(line) = &diagram.beachline else {
        return group;
    };
    for (idx, arc) in line.arcs() {
        if parabola::is_degenerate(arc.focus, cutoff) {
            continue;
        }
        let left = line
            .left_edge(idx)
            .and_then(|e| line.breakpoint(e, cutoff))
            .map_or(lo, |p| p.x.max(lo));
        let right = line
            .right_edge(idx)
            .and_then(|e| line.breakpoint(e, cutoff))
            .map_or(hi, |p| p.x.min(hi));
        if left >= right {
            continue;
        }

        let steps = 64;
        let point = |i: usize| {
            let x = left + (right - left) * i as f64 / steps as f64;
            (x, parabola::arc_height(arc.focus, x, cutoff))
        };
        let mut data = Data::new().move_to(point(0));
        for i in 1..=steps {
            data = data.line_to(point(i));
        }
        group = group.add(
            Path::new()
                .set("d", data)
                .set("fill", "none")
                .set("stroke", "green")
                .set("stroke-width", stroke_width),
        );
    }
    group
}
