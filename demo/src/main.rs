mod kitti;
mod settings;

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::bail;
use tracing::info;
use tracing_subscriber::EnvFilter;
use zindex::{LinearIndex, ZIndex};

use kitti::{Frames, DIMENSION};
use settings::Settings;

const DEFAULT_LABELS: &str = "data/data_tracking_label_2/all_data.txt";

#[derive(Default)]
struct Report {
    zindex_insert: Duration,
    linear_insert: Duration,
    zindex_query: Duration,
    linear_query: Duration,
    queries: usize,
    candidates: usize,
    found: usize,
    expected: usize,
}

impl Report {
    fn recall(&self) -> f64 {
        if self.expected == 0 {
            1.0
        } else {
            self.found as f64 / self.expected as f64
        }
    }

    fn print(&self) {
        println!("--- Total Insert Time ---");
        println!("Z-order index : {:.6} seconds", self.zindex_insert.as_secs_f64());
        println!("Linear scan   : {:.6} seconds", self.linear_insert.as_secs_f64());
        println!("--- Total Query Time ({} queries) ---", self.queries);
        println!("Z-order index : {:.6} seconds", self.zindex_query.as_secs_f64());
        println!("Linear scan   : {:.6} seconds", self.linear_query.as_secs_f64());
        println!("--- Recall ---");
        println!("Candidates scanned: {}", self.candidates);
        println!("Found {} of {} ({:.2}%)", self.found, self.expected, 100.0 * self.recall());
    }
}

fn run(frames: &Frames, settings: &Settings) -> anyhow::Result<Report> {
    let driver = &settings.driver;
    let mut zindex = ZIndex::<DIMENSION>::new(settings.index)?;
    let mut linear = LinearIndex::<DIMENSION>::new();
    let mut report = Report::default();

    for (&frame, points) in frames {
        if frame % driver.log_every == 0 {
            info!(frame, objects = points.len(), "processing frame");
        }

        let start = Instant::now();
        for point in points {
            zindex.insert(*point)?;
        }
        report.zindex_insert += start.elapsed();

        let start = Instant::now();
        for point in points {
            linear.insert(*point);
        }
        report.linear_insert += start.elapsed();

        if frame % driver.query_every != 0 {
            continue;
        }
        let Some(center) = points.first() else { continue };

        let start = Instant::now();
        let mut query = zindex.query_radius_iter(center, driver.radius)?;
        let found = query.by_ref().count();
        report.zindex_query += start.elapsed();

        let start = Instant::now();
        let mut expected = 0;
        linear.query_radius(center, driver.radius, |_| expected += 1)?;
        report.linear_query += start.elapsed();

        report.queries += 1;
        report.candidates += query.candidates();
        report.found += found;
        report.expected += expected;
    }
    Ok(report)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Usage: demo [LABELS] [SETTINGS.toml]
    let mut args = std::env::args_os().skip(1);
    let labels = args.next().map_or_else(|| PathBuf::from(DEFAULT_LABELS), PathBuf::from);
    let settings_path = args.next().map(PathBuf::from);

    let settings = Settings::load(settings_path.as_deref())?;
    let frames = kitti::load(&labels, settings.driver.scale)?;
    if frames.is_empty() {
        bail!("no labelled objects in {}", labels.display());
    }

    let report = run(&frames, &settings)?;
    report.print();
    Ok(())
}
