use rowblock_sobel::config::load_config;
use rowblock_sobel::image::io::write_json_file;
use rowblock_sobel::pipeline;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let config_path = args.next().ok_or_else(usage)?;
    let mut config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    if let Some(workers) = args.next() {
        config.workers = workers
            .parse()
            .map_err(|e| format!("Invalid worker count {workers:?}: {e}"))?;
    }

    let report = pipeline::run(&config).map_err(|e| e.to_string())?;

    println!(
        "baseline: {} image(s) in {:.6} seconds",
        report.baseline.written(),
        report.baseline.timing.total_secs()
    );
    println!(
        "distributed ({} workers): {} image(s) in {:.6} seconds",
        report.workers,
        report.distributed.written(),
        report.distributed.timing.total_secs()
    );
    println!(
        "speed-up: {:.6}, efficiency: {:.6}",
        report.speedup, report.efficiency
    );
    let failures = report.baseline.encode_failures() + report.distributed.encode_failures();
    if failures > 0 {
        println!("{failures} output image(s) could not be written");
    }

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report).map_err(|e| e.to_string())?;
        println!("Saved run report to {}", path.display());
    }

    Ok(())
}

fn usage() -> String {
    "Usage: sobel_bench <config.json> [workers]".to_string()
}
