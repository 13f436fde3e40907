use csv::Writer;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Magnitude response at `freq` for a transformer-like sweep: a gentle
/// roll-off with a handful of resonant dips placed in log-frequency space.
fn sweep_magnitude(
    freq: f64,
    dips: &[(f64, f64, f64)],
    offset_db: f64,
    rng: &mut SimpleRng,
) -> f64 {
    let lf = freq.log10();
    let base = -42.0 - 2.5 * (lf - 1.3);
    let resonances: f64 = dips
        .iter()
        .map(|&(mu, sigma, depth)| gaussian(lf, mu, sigma, depth))
        .sum();
    base + resonances + offset_db + rng.gauss(0.0, 0.15)
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // Frequencies: 500 log-spaced points, 20 Hz → 1 MHz
    let n = 500;
    let (lo, hi) = (20f64.log10(), 1_000_000f64.log10());
    let frequencies: Vec<f64> = (0..n)
        .map(|i| 10f64.powf(lo + (hi - lo) * i as f64 / (n - 1) as f64))
        .collect();

    // (path, resonant dips as (log10 centre, width, depth dB), overall shift)
    let sweeps: [(&str, Vec<(f64, f64, f64)>, f64); 2] = [
        (
            "sample_sweep.csv",
            vec![(2.9, 0.12, -18.0), (4.1, 0.10, -12.0), (5.2, 0.15, -9.0)],
            0.0,
        ),
        (
            "sample_baseline.csv",
            vec![(2.88, 0.12, -17.0), (4.15, 0.10, -13.0), (5.2, 0.15, -8.0)],
            -1.5,
        ),
    ];

    for (path, dips, offset_db) in &sweeps {
        let mut writer = Writer::from_path(path).expect("Failed to create output file");
        writer
            .write_record(["Frequency (Hz)", "Magnitude (dB)"])
            .expect("Failed to write header");

        for &freq in &frequencies {
            let magnitude = sweep_magnitude(freq, dips, *offset_db, &mut rng);
            writer
                .write_record([format!("{freq:.2}"), format!("{magnitude:.2}")])
                .expect("Failed to write row");
        }
        writer.flush().expect("Failed to flush writer");

        println!("Wrote {} points to {path}", frequencies.len());
    }
}
