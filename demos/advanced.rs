//! Advanced pedometer demonstration
//!
//! Replays a recorded accelerometer trace through the pedometer and plots the
//! signal the detector works on together with its internal states.
//!
//! Features demonstrated:
//! - Custom pedometer settings
//! - Batch replay from CSV at the sensor's callback size
//! - Composite magnitude per smoothing group
//! - Dynamic threshold, filtered signal, and regulation monitoring
//! - Step count and the counter-changed signal
//!
//! Run with: `cargo run --example advanced`

use plotters::prelude::*;
use serde::Deserialize;
use std::error::Error;
use stride_pedometer::{
    CadenceState, Pedometer, PedometerSettings, RawSample, SampleSmoother, Vector3Ext,
};

#[derive(Debug, Deserialize)]
struct TraceRecord {
    #[serde(rename = "Time (s)")]
    time: f32,
    #[serde(rename = "Accelerometer X (mg)")]
    accel_x: i16,
    #[serde(rename = "Accelerometer Y (mg)")]
    accel_y: i16,
    #[serde(rename = "Accelerometer Z (mg)")]
    accel_z: i16,
}

/// Per-batch snapshot for plotting
struct BatchRecord {
    time: f32,
    threshold: i32,
    sample_new: i32,
    regulation: u32,
    steps: u32,
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("Advanced pedometer example - trace replay with diagnostics");

    let mut reader = csv::Reader::from_path("testdata/walking_trace.csv")?;
    let mut trace = Vec::new();
    for result in reader.deserialize() {
        let record: TraceRecord = result?;
        trace.push(record);
    }

    let settings = PedometerSettings {
        sensitivity: 60,           // watch default
        min_step_gap: 10,          // 0.2 s at 50 Hz
        max_batches_since_step: 3, // 2 s at 25 samples per batch
        ..Default::default()
    };
    let mut pedometer = Pedometer::with_settings(settings)?;
    let smoother = SampleSmoother::new(settings.group_size);

    let (shortest, longest) = settings.cadence_window();
    println!(
        "Accepting {:.2}s to {:.2}s between steps, sensitivity {}",
        shortest,
        longest,
        pedometer.sensitivity()
    );
    println!("Processing {} samples...", trace.len());

    let mut magnitudes = Vec::new();
    let mut batches = Vec::new();

    for chunk in trace.chunks_exact(settings.batch_size) {
        let batch: Vec<RawSample> = chunk
            .iter()
            .map(|r| RawSample::new(r.accel_x, r.accel_y, r.accel_z))
            .collect();

        // The same magnitudes the detector sees, for plotting
        for group in smoother.groups(&batch)? {
            let time = chunk[group.position].time;
            magnitudes.push((time, group.vector.composite_magnitude()));
        }

        let report = pedometer.process_batch(&batch)?;
        let states = pedometer.internal_states();
        let time = chunk[settings.batch_size - 1].time;

        if pedometer.take_counter_changed() {
            println!(
                "t={:6.2}s steps={:3} (+{}) regulation={} {:?}",
                time,
                report.steps_total,
                report.steps_added,
                states.regulation,
                pedometer.cadence_state()
            );
        }

        batches.push(BatchRecord {
            time,
            threshold: states.threshold,
            sample_new: states.sample_new,
            regulation: states.regulation,
            steps: report.steps_total,
        });
    }

    if pedometer.cadence_state() == CadenceState::Crediting {
        println!("Trace ended mid-walk");
    }

    println!("Generating diagnostic plots...");
    create_plots(&magnitudes, &batches)?;

    println!("✓ Plots saved to pedometer_plots.png");
    println!("✓ Total steps: {}", pedometer.steps_on_shutdown());
    Ok(())
}

/// Create a three-panel plot: signal and threshold, regulation, step count
fn create_plots(magnitudes: &[(f32, i32)], batches: &[BatchRecord]) -> Result<(), Box<dyn Error>> {
    let Some(last) = batches.last() else {
        return Ok(());
    };

    let root = BitMapBackend::new("pedometer_plots.png", (1000, 900)).into_drawing_area();
    root.fill(&WHITE)?;

    let panels = root.split_evenly((3, 1));
    let time_range = 0f32..last.time;

    let magnitude_max = magnitudes.iter().map(|&(_, m)| m).max().unwrap_or(0) + 100;
    let magnitude_min = magnitudes.iter().map(|&(_, m)| m).min().unwrap_or(0) - 100;

    // 1. Composite magnitude, filtered signal, and threshold
    let mut signal_chart = ChartBuilder::on(&panels[0])
        .caption("Composite Magnitude and Dynamic Threshold", ("sans-serif", 20))
        .margin(5)
        .x_label_area_size(0)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range.clone(), magnitude_min..magnitude_max)?;

    signal_chart.configure_mesh().y_desc("milli-g").draw()?;

    signal_chart
        .draw_series(LineSeries::new(magnitudes.iter().copied(), &BLUE))?
        .label("Magnitude")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], BLUE));

    signal_chart
        .draw_series(LineSeries::new(
            batches.iter().map(|b| (b.time, b.sample_new)),
            &GREEN,
        ))?
        .label("Filtered (batch end)")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], GREEN));

    // Each batch is judged against the threshold published by the one before
    signal_chart
        .draw_series(LineSeries::new(
            batches.windows(2).map(|w| (w[1].time, w[0].threshold)),
            &RED,
        ))?
        .label("Threshold")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], RED));

    signal_chart.configure_series_labels().draw()?;

    // 2. Regulation counter
    let regulation_max = batches.iter().map(|b| b.regulation).max().unwrap_or(0) + 1;
    let mut regulation_chart = ChartBuilder::on(&panels[1])
        .margin(5)
        .x_label_area_size(0)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range.clone(), 0u32..regulation_max)?;

    regulation_chart.configure_mesh().y_desc("Regulation").draw()?;

    regulation_chart
        .draw_series(LineSeries::new(
            batches.iter().map(|b| (b.time, b.regulation)),
            &RGBColor(255, 165, 0), // orange
        ))?
        .label("Regulation")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], RGBColor(255, 165, 0)));

    regulation_chart.configure_series_labels().draw()?;

    // 3. Step count
    let mut steps_chart = ChartBuilder::on(&panels[2])
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(time_range, 0u32..last.steps + 1)?;

    steps_chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Steps")
        .draw()?;

    steps_chart
        .draw_series(LineSeries::new(
            batches.iter().map(|b| (b.time, b.steps)),
            &RGBColor(128, 128, 0), // olive
        ))?
        .label("Steps")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], RGBColor(128, 128, 0)));

    steps_chart.configure_series_labels().draw()?;

    root.present()?;
    Ok(())
}
