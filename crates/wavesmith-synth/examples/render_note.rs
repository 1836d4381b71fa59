//! Render one note through a wavetable voice and print its envelope.
//!
//! Run with: cargo run -p wavesmith-synth --example render_note

use wavesmith_synth::{
    AdsrParams, AudioBuffer, PITCH_WHEEL_CENTER, SynthVoice, WAVETABLE_LENGTH, WavetableVoice,
};

fn main() {
    let sample_rate = 48000.0;
    let block_size = 480;

    let mut voice = WavetableVoice::new(sample_rate);
    voice.set_envelope(AdsrParams {
        attack_ms: 20.0,
        decay_ms: 200.0,
        sustain: 0.6,
        release_ms: 150.0,
    });

    // A few cycles of a stepped waveform standing in for a sample file
    let source: Vec<f32> = (0..WAVETABLE_LENGTH * 4)
        .map(|i| ((i % WAVETABLE_LENGTH) / 64) as f32 / 4.0 - 1.0)
        .collect();
    if let Err(err) = voice.load_wavetable(&source, 0.25) {
        eprintln!("could not load wavetable: {err}");
        return;
    }

    println!("=== A3 (220 Hz), 10 ms blocks ===\n");
    println!("{:>6} {:>8} {:>10}", "ms", "state", "peak");

    voice.note_on(57, 0.9, PITCH_WHEEL_CENTER);

    let mut output = AudioBuffer::new(1, block_size);
    let mut elapsed_ms = 0;
    while voice.is_playing() {
        if elapsed_ms == 500 {
            voice.note_off();
        }

        output.clear();
        voice.render_block(&mut output, 0, block_size);
        let peak = output
            .channel(0)
            .map_or(0.0, |c| c.iter().fold(0.0f32, |m, &s| m.max(s.abs())));

        if elapsed_ms % 50 == 0 {
            let state = format!("{:?}", voice.envelope().state());
            println!("{elapsed_ms:>6} {state:>8} {peak:>10.4}");
        }
        elapsed_ms += 10;
    }

    println!("\nvoice idle after {elapsed_ms} ms");
}
