use stride_pedometer::{Pedometer, RawSample};

const BATCH_SIZE: usize = 25; // samples per sensor callback
const SAMPLE_RATE: f32 = 50.0; // Hz

fn main() {
    let mut pedometer = Pedometer::new();
    pedometer.load_steps(0); // replace this with the count saved by the previous run

    for callback in 0..40 {
        // this loop should repeat each time the sensor delivers a batch
        let batch: Vec<RawSample> = (0..BATCH_SIZE)
            .map(|i| {
                // replace this with actual accelerometer data in milli-g
                let time = (callback * BATCH_SIZE + i) as f32 / SAMPLE_RATE;
                let bounce = 300.0 * (2.0 * std::f32::consts::PI * 2.0 * time).sin();
                RawSample::new(0, 0, (-1000.0 - bounce) as i16)
            })
            .collect();

        match pedometer.process_batch(&batch) {
            Ok(report) if report.changed => println!(
                "t={:.1}s steps: {} (+{})",
                (callback + 1) as f32 * BATCH_SIZE as f32 / SAMPLE_RATE,
                report.steps_total,
                report.steps_added
            ),
            Ok(_) => {}
            Err(err) => eprintln!("dropped batch: {}", err),
        }
    }

    println!("steps to persist: {}", pedometer.steps_on_shutdown());
}
