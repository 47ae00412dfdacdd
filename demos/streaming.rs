//! Stream noisy samples into three dynamic lines while the view follows the
//! newest data, then report what the recording backend saw.
//!
//! Run with `RUST_LOG=linegraph=debug` to see the chart's own logging.
use linegraph::{Color, DrawCommand, Line, LineGraph, RecordingBackend, Rect};

use rand_distr::{Distribution, Normal};

const WINDOW: f64 = 500.0;
const TICKS: usize = 2000;

fn main() -> Result<(), linegraph::ChartError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut rng = rand::rng();
    let noise = Normal::new(0.0, 1.5).unwrap();

    let mut graph = LineGraph::new(RecordingBackend::new(1024, 768));
    graph.display(Rect::new(0.0, -20.0, WINDOW, 50.0), false)?;

    let colors = [
        Color::from_rgb(0.85, 0.2, 0.2),
        Color::from_rgb(0.2, 0.6, 0.2),
        Color::from_rgb(0.2, 0.3, 0.85),
    ];
    let ids = colors
        .iter()
        .map(|&color| {
            let line = Line::new(1.5, color, Vec::<[f64; 2]>::new()).with_dynamic(true);
            graph.add_line(line)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut frames = 0;
    let mut compiled = 0;
    let mut labels = 0;
    for t in 0..TICKS {
        let x = t as f64;
        for (k, &id) in ids.iter().enumerate() {
            let base = 10.0 * ((x / 40.0) + k as f64).sin() + 5.0 * k as f64;
            let y = base + noise.sample(&mut rng);
            graph.update_line(id, |line| line.add_point([x, y], true))?;
        }

        let start = (x - WINDOW).max(0.0);
        graph.display(Rect::new(start, -20.0, WINDOW, 50.0), true)?;

        for command in graph.backend_mut().take_commands() {
            match command {
                DrawCommand::Present => frames += 1,
                DrawCommand::CompileGeometry { .. } => compiled += 1,
                DrawCommand::RasterizeText { .. } => labels += 1,
                _ => {}
            }
        }
    }

    let vp = graph.viewport().expect("displayed above");
    println!(
        "{} frames, {} geometry compiles, {} labels rasterized",
        frames, compiled, labels
    );
    println!(
        "final view: x {:.1}..{:.1}, y {:.1}..{:.1}",
        vp.start(),
        vp.finish(),
        vp.bottom(),
        vp.top()
    );
    for (id, line) in graph.lines() {
        println!("{}: {} points", id, line.len());
    }

    graph.cleanup()?;
    println!(
        "after cleanup: {} geometries, {} textures live",
        graph.backend().live_geometry(),
        graph.backend().live_textures()
    );
    Ok(())
}
