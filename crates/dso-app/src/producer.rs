//! Synthetic capture producer — a background thread standing in for the
//! acquisition and post-processing pipeline, which is out of scope here. It
//! publishes display-ready snapshots into the shared slot at a fixed rate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use dso_core::snapshot::{CaptureSnapshot, ChannelTraces};
use dso_core::view::DIVS_TIME;
use dso_gui::SnapshotSlot;

const SAMPLES_PER_TRACE: usize = 512;
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct CaptureProducer {
    running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl CaptureProducer {
    /// Start publishing synthetic frames for `channels` channels until
    /// dropped.
    pub fn start(slot: Arc<SnapshotSlot>, channels: usize) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        let thread = thread::Builder::new()
            .name("capture-producer".to_string())
            .spawn(move || {
                let mut phase = 0.0_f32;
                while running_clone.load(Ordering::Relaxed) {
                    slot.offer(Arc::new(synth_snapshot(phase, channels)));
                    phase += 0.05;
                    thread::sleep(FRAME_INTERVAL);
                }
            })
            .expect("failed to spawn capture producer thread");

        Self {
            running,
            thread: Some(thread),
        }
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for CaptureProducer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One frame of fabricated sines plus a matching fake spectrum per channel.
fn synth_snapshot(phase: f32, channels: usize) -> CaptureSnapshot {
    let traces = (0..channels)
        .map(|channel| {
            let cycles = 2.0 + channel as f32;
            let amplitude = 1.5 / (channel + 1) as f32;
            let half_time = DIVS_TIME as f32 / 2.0;

            let voltage: Vec<[f32; 2]> = (0..SAMPLES_PER_TRACE)
                .map(|i| {
                    let t = i as f32 / (SAMPLES_PER_TRACE - 1) as f32;
                    let x = -half_time + DIVS_TIME as f32 * t;
                    let y = amplitude
                        * (std::f32::consts::TAU * cycles * t + phase * (channel + 1) as f32)
                            .sin();
                    [x, y]
                })
                .collect();

            // A single spectral peak where the sine lives.
            let peak_x = -half_time + DIVS_TIME as f32 * (cycles / 10.0);
            let spectrum: Vec<[f32; 2]> = (0..SAMPLES_PER_TRACE)
                .map(|i| {
                    let t = i as f32 / (SAMPLES_PER_TRACE - 1) as f32;
                    let x = -half_time + DIVS_TIME as f32 * t;
                    let d = x - peak_x;
                    let y = -3.0 + 3.5 * amplitude * (-d * d * 8.0).exp();
                    [x, y]
                })
                .collect();

            Some(ChannelTraces {
                voltage,
                spectrum,
                amplitude: 2.0 * amplitude as f64,
                frequency: 1000.0 * cycles as f64,
            })
        })
        .collect();

    let mut snapshot = CaptureSnapshot::new(traces, SAMPLES_PER_TRACE * channels);
    snapshot.software_trigger_triggered = true;
    snapshot
}
