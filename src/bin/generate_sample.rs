use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use clap::Parser;

use in_malmo::data::district::{DistrictKey, RoomBucket};

/// Write the sample housing, index and inflation files.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Directory the CSV files are written to
    #[arg(default_value = "resources")]
    out_dir: PathBuf,

    /// Seed of the noise generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
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

fn months(start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count)
        .filter_map(|i| start.checked_add_months(chrono::Months::new(i as u32)))
        .collect()
}

/// Seasonal sales multiplier: busy spring and autumn, quiet July and December.
fn season(month: u32) -> f64 {
    match month {
        3..=5 | 9..=10 => 1.2,
        7 => 0.6,
        12 | 1 => 0.8,
        _ => 1.0,
    }
}

fn write_housing(path: &Path, rng: &mut SimpleRng) {
    let start = NaiveDate::from_ymd_opt(2018, 12, 1).unwrap();
    let dates = months(start, 37);

    // (base price per sqm, monthly growth, base sales)
    let profiles: [(f64, f64, f64); 8] = [
        (46_000.0, 0.004, 95.0),
        (27_000.0, 0.003, 60.0),
        (38_000.0, 0.006, 55.0),
        (33_000.0, 0.004, 35.0),
        (41_000.0, 0.005, 40.0),
        (24_000.0, 0.002, 45.0),
        (39_000.0, 0.005, 110.0),
        (44_000.0, 0.004, 90.0),
    ];
    let room_factor = [1.12, 1.02, 0.95, 0.9];

    let mut header = vec!["DATE".to_string()];
    for district in DistrictKey::ALL {
        header.push(district.ppsm_column());
        header.push(district.nos_column());
        for bucket in RoomBucket::ALL {
            header.push(district.room_column(bucket));
        }
    }
    header.push("MMA_NOS".to_string());

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .expect("Failed to create housing file");
    writer.write_record(&header).expect("Failed to write header");

    for (i, date) in dates.iter().enumerate() {
        let mut record = vec![date.format("%Y-%m-%d").to_string()];
        let mut total_sales = 0.0;
        for (base, growth, sales) in profiles {
            let ppsm = base * (1.0 + growth).powi(i as i32) + rng.gauss(0.0, base * 0.01);
            let nos = (sales * season(date.month()) + rng.gauss(0.0, sales * 0.1)).max(0.0).round();
            total_sales += nos;
            record.push(format!("{ppsm:.0}"));
            record.push(format!("{nos:.0}"));
            for factor in room_factor {
                let room_ppsm = ppsm * factor + rng.gauss(0.0, base * 0.02);
                record.push(format!("{room_ppsm:.0}"));
            }
        }
        record.push(format!("{total_sales:.0}"));
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush housing file");
    println!("Wrote {} months of district data to {}", dates.len(), path.display());
}

fn write_index(path: &Path, rng: &mut SimpleRng) {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .expect("Failed to create index file");
    writer
        .write_record(["DATE", "REI_HOUSES", "REI_APARTMENTS"])
        .expect("Failed to write header");

    let mut houses = 100.0;
    let mut apartments = 100.0;
    for year in 1986..=2021 {
        houses *= 1.0 + rng.gauss(0.05, 0.04);
        apartments *= 1.0 + rng.gauss(0.07, 0.06);
        writer
            .write_record([
                year.to_string(),
                format!("{houses:.1}"),
                format!("{apartments:.1}"),
            ])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush index file");
    println!("Wrote yearly real estate index to {}", path.display());
}

fn write_inflation(path: &Path, rng: &mut SimpleRng) {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let dates = months(start, 83);

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .expect("Failed to create inflation file");
    writer
        .write_record(["DATE", "KPI", "KPIF"])
        .expect("Failed to write header");

    let mut kpif: f64 = 0.5;
    for date in &dates {
        kpif = (kpif + rng.gauss(0.03, 0.25)).clamp(-0.5, 5.0);
        let kpi = kpif + rng.gauss(-0.2, 0.3);
        // Swedish decimal comma, as published by Statistics Sweden.
        writer
            .write_record([
                date.format("%YM%m").to_string(),
                format!("{kpi:.1}").replace('.', ","),
                format!("{kpif:.1}").replace('.', ","),
            ])
            .expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush inflation file");
    println!("Wrote {} months of KPI/KPIF to {}", dates.len(), path.display());
}

fn main() {
    let Args { out_dir, seed } = Args::parse();
    std::fs::create_dir_all(&out_dir).expect("Failed to create output directory");

    let mut rng = SimpleRng::new(seed);
    write_housing(&out_dir.join("housing_data.csv"), &mut rng);
    write_index(&out_dir.join("real_estate_index.csv"), &mut rng);
    write_inflation(&out_dir.join("inflation_rate.csv"), &mut rng);
}
