#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::pedantic)]

//! Standalone simulation comparing separate chaining against linear probing.
//!
//! Fills a fixed prime-sized table to a range of load factors with random
//! keys, measures the average number of slot inspections per successful
//! lookup under each strategy, prints the numbers, and renders a chart to
//! `probe_sim.png`.

use plotters::prelude::*;
use rand::Rng;

/// A prime table size, matching the crate's prime-capacity policy.
const TABLE_SIZE: usize = 10_007;
/// Load factors to sample, as percentages.
const LOAD_PERCENTS: [usize; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];
/// Output path for the rendered chart.
const CHART_PATH: &str = "probe_sim.png";

fn hash(key: u64, size: usize) -> usize {
    (key % size as u64) as usize
}

/// Separate chaining: cost of a lookup is the entry's position in its chain.
fn chained_avg_probes(keys: &[u64]) -> f64 {
    let mut buckets: Vec<Vec<u64>> = vec![Vec::new(); TABLE_SIZE];
    for &key in keys {
        buckets[hash(key, TABLE_SIZE)].push(key);
    }

    let mut total = 0usize;
    for &key in keys {
        let bucket = &buckets[hash(key, TABLE_SIZE)];
        let position = bucket.iter().position(|&stored| stored == key).unwrap_or(0);
        total += position + 1;
    }
    total as f64 / keys.len() as f64
}

/// Linear probing: cost of a lookup is the number of slots inspected before
/// the key is found.
fn probing_avg_probes(keys: &[u64]) -> f64 {
    let mut slots: Vec<Option<u64>> = vec![None; TABLE_SIZE];
    for &key in keys {
        let mut index = hash(key, TABLE_SIZE);
        while slots[index].is_some() {
            index = (index + 1) % TABLE_SIZE;
        }
        slots[index] = Some(key);
    }

    let mut total = 0usize;
    for &key in keys {
        let mut index = hash(key, TABLE_SIZE);
        let mut probes = 1usize;
        while slots[index] != Some(key) {
            index = (index + 1) % TABLE_SIZE;
            probes += 1;
        }
        total += probes;
    }
    total as f64 / keys.len() as f64
}

fn render_chart(
    chained: &[(f64, f64)],
    probing: &[(f64, f64)],
) -> Result<(), Box<dyn std::error::Error>> {
    let max_probes = probing.iter().map(|&(_, y)| y).fold(1.0f64, f64::max) * 1.1;

    let root = BitMapBackend::new(CHART_PATH, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Average probes per successful lookup", ("sans-serif", 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0f64..1.0, 0.0f64..max_probes)?;

    chart.configure_mesh().x_desc("load factor").y_desc("average probes").draw()?;

    chart
        .draw_series(LineSeries::new(chained.iter().copied(), &BLUE))?
        .label("separate chaining")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart
        .draw_series(LineSeries::new(probing.iter().copied(), &RED))?
        .label("linear probing")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));

    chart.configure_series_labels().border_style(BLACK).background_style(WHITE).draw()?;
    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let mut chained_points = Vec::new();
    let mut probing_points = Vec::new();

    println!("{:>12} {:>20} {:>16}", "load factor", "separate chaining", "linear probing");
    for percent in LOAD_PERCENTS {
        let load = percent as f64 / 100.0;
        let count = TABLE_SIZE * percent / 100;
        let keys: Vec<u64> = (0..count).map(|_| rng.random::<u64>()).collect();

        let chained = chained_avg_probes(&keys);
        let probing = probing_avg_probes(&keys);
        println!("{load:>12.2} {chained:>20.3} {probing:>16.3}");

        chained_points.push((load, chained));
        probing_points.push((load, probing));
    }

    render_chart(&chained_points, &probing_points)?;
    println!("chart written to {CHART_PATH}");
    Ok(())
}
