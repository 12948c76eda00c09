//! Bandpass filter demo.
//!
//! Prints the frequency response of 50-70 Hz Butterworth bandpass filters of
//! order 1, 2 and 5 at 256 Hz, then runs a 2-25 Hz bandpass over a six-tone
//! test waveform and reports the level of each tone before and after.
//!
//! Run with `RUST_LOG=debug cargo run --example bandpass_demo` to see design logs.

use std::time::Duration;

use iir_bandpass::utils::generation::{ToneComponent, compound_tone};
use iir_bandpass::{
    DEFAULT_FREQUENCY_COUNT, FilterResult, FilterSpecification, HALF_POWER, IirFiltering, design,
};
use ndarray::{Array1, Axis};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const SAMPLE_RATE: f64 = 256.0;
const TABLE_STEP_HZ: f64 = 4.0;

fn main() -> FilterResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bandpass_demo=info,iir_bandpass=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    response_table()?;
    filter_waveform()
}

fn response_table() -> FilterResult<()> {
    let orders = [1, 2, 5];
    let mut responses = Vec::with_capacity(orders.len());
    for order in orders {
        let filter = design(&FilterSpecification::bandpass(50.0, 70.0, SAMPLE_RATE).with_order(order))?;
        info!(order, corners = ?filter.corners(), "designed bandpass");
        responses.push(filter.frequency_response(DEFAULT_FREQUENCY_COUNT)?);
    }

    println!("Filter Frequency Response (half power = {HALF_POWER:.4})");
    println!("{:>10} {:>10} {:>10} {:>10}", "Hz", "order 1", "order 2", "order 5");
    let bin_width = SAMPLE_RATE / 2.0 / DEFAULT_FREQUENCY_COUNT as f64;
    let stride = (TABLE_STEP_HZ / bin_width).round() as usize;
    for k in (0..DEFAULT_FREQUENCY_COUNT).step_by(stride) {
        println!(
            "{:>10.1} {:>10.4} {:>10.4} {:>10.4}",
            responses[0].frequencies[k],
            responses[0].response[k].norm(),
            responses[1].response[k].norm(),
            responses[2].response[k].norm(),
        );
    }
    Ok(())
}

fn filter_waveform() -> FilterResult<()> {
    let freqs = [8.0, 14.0, 20.0, 30.0, 40.0, 60.0];
    let components: Vec<ToneComponent> = freqs
        .iter()
        .enumerate()
        .map(|(i, &f)| {
            let amplitude = 1.0 - i as f64 / (freqs.len() - 1) as f64;
            ToneComponent::new(f, amplitude).with_phase(i as f64)
        })
        .collect();

    let wave = compound_tone(&components, Duration::from_secs(3), SAMPLE_RATE);
    let filter = design(&FilterSpecification::bandpass(2.0, 25.0, SAMPLE_RATE))?;
    let filtered = wave.filter_with(&filter, Axis(0))?;

    println!();
    println!("{:>10} {:>10} {:>10}", "tone Hz", "raw", "filtered");
    for c in &components {
        println!(
            "{:>10.1} {:>10.4} {:>10.4}",
            c.frequency,
            tone_amplitude(&wave, c.frequency),
            tone_amplitude(&filtered, c.frequency),
        );
    }
    Ok(())
}

/// Amplitude of the `frequency` component, by correlation with a complex exponential.
fn tone_amplitude(signal: &Array1<f64>, frequency: f64) -> f64 {
    let omega = 2.0 * std::f64::consts::PI * frequency / SAMPLE_RATE;
    let (re, im) = signal
        .iter()
        .enumerate()
        .fold((0.0, 0.0), |(re, im), (i, &x)| {
            let phase = omega * i as f64;
            (re + x * phase.cos(), im - x * phase.sin())
        });
    2.0 * (re * re + im * im).sqrt() / signal.len() as f64
}
