use rowblock_sobel::diagnostics::{duration_ms, efficiency, speedup};
use rowblock_sobel::{baseline_edges, distributed_edges, GrayImageU8, PartitionOptions};
use std::time::Instant;

fn main() {
    // Demo stub: convolves a synthetic 8-bit gradient both ways and compares.
    let w = 1920usize;
    let h = 1080usize;
    let data = (0..w * h)
        .map(|i| ((i % w) * 255 / w) as u8 ^ ((i / w) as u8 & 0x20))
        .collect();
    let gray = GrayImageU8::new(w, h, data);
    let workers = num_cpus::get().max(1);

    let start = Instant::now();
    let base = match baseline_edges(&gray) {
        Ok(edges) => edges,
        Err(err) => {
            eprintln!("baseline failed: {err}");
            return;
        }
    };
    let base_ms = duration_ms(start.elapsed());

    let start = Instant::now();
    let dist = match distributed_edges(&gray, workers, PartitionOptions::exact()) {
        Ok(edges) => edges,
        Err(err) => {
            eprintln!("distributed pass failed: {err}");
            return;
        }
    };
    let dist_ms = duration_ms(start.elapsed());

    let s = speedup(base_ms, dist_ms);
    println!(
        "workers={workers} baseline_ms={base_ms:.3} distributed_ms={dist_ms:.3} speedup={s:.3} efficiency={:.3} identical={}",
        efficiency(s, workers),
        base == dist
    );
}
