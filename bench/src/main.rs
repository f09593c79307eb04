use std::time::{Duration, Instant};

use alphablend::{BlendThreading, SurfaceSize};
use anyhow::Context as _;
use serde_json::json;
use sha2::Digest as _;

#[derive(Clone, Debug)]
struct BenchArgs {
    warmup: u32,
    repeats: u32,
    threads: Option<usize>,
    sizes: Vec<u32>,
}

#[derive(Clone, Debug)]
struct ModeReport {
    p50: Duration,
    p90: Duration,
    digest: String,
}

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = parse_args()?;

    if args.repeats == 0 {
        anyhow::bail!("--repeats must be >= 1");
    }
    if let Some(n) = args.threads
        && n == 0
    {
        anyhow::bail!("--threads must be >= 1 when set");
    }

    let sequential = BlendThreading::sequential();
    let parallel = BlendThreading {
        threads: args.threads,
        ..BlendThreading::default()
    };

    let mut cases = Vec::with_capacity(args.sizes.len());
    for &side in &args.sizes {
        let size = SurfaceSize::new(side, side);
        let pixels = u64::from(side) * u64::from(side);
        let src = pattern(size, 0x5a);
        let dst = pattern(size, 0xc3);

        let seq = run_mode(&src, &dst, size, &sequential, &args)
            .with_context(|| format!("sequential {size}"))?;
        let par = run_mode(&src, &dst, size, &parallel, &args)
            .with_context(|| format!("parallel {size}"))?;

        if seq.digest != par.digest {
            anyhow::bail!(
                "{size}: parallel output differs from sequential ({} vs {})",
                par.digest,
                seq.digest
            );
        }

        eprintln!(
            "{:>9}  seq p50={:>10}  par p50={:>10}",
            size.to_string(),
            fmt_ms(seq.p50),
            fmt_ms(par.p50)
        );
        cases.push(json!({
            "size": size,
            "pixels": pixels,
            "sha256": seq.digest,
            "sequential": mode_json(&seq, pixels),
            "parallel": mode_json(&par, pixels),
        }));
    }

    let report = json!({
        "warmup": args.warmup,
        "repeats": args.repeats,
        "threads": args.threads,
        "cases": cases,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_mode(
    src: &[u8],
    dst: &[u8],
    size: SurfaceSize,
    threading: &BlendThreading,
    args: &BenchArgs,
) -> anyhow::Result<ModeReport> {
    for _ in 0..args.warmup {
        alphablend::blend_surface_with(src, dst, size, threading)?;
    }

    let mut times = Vec::with_capacity(args.repeats as usize);
    let mut last = Vec::new();
    for _ in 0..args.repeats {
        let t0 = Instant::now();
        last = alphablend::blend_surface_with(src, dst, size, threading)?;
        times.push(t0.elapsed());
    }
    times.sort_by_key(|d| d.as_nanos());

    Ok(ModeReport {
        p50: percentile(&times, 0.50),
        p90: percentile(&times, 0.90),
        digest: sha256_hex(&last),
    })
}

fn pattern(size: SurfaceSize, salt: u32) -> Vec<u8> {
    let mut out = Vec::with_capacity(size.width as usize * size.height as usize * 4);
    for y in 0..size.height {
        for x in 0..size.width {
            let v = x.wrapping_mul(31) ^ y.wrapping_mul(17) ^ salt;
            out.extend_from_slice(&[
                v as u8,
                (v >> 3) as u8,
                (v >> 5) as u8,
                (v.wrapping_mul(7) >> 2) as u8,
            ]);
        }
    }
    out
}

fn mode_json(r: &ModeReport, pixels: u64) -> serde_json::Value {
    let secs = r.p50.as_secs_f64();
    let pixels_per_sec = if secs > 0.0 {
        pixels as f64 / secs
    } else {
        f64::INFINITY
    };
    json!({
        "p50_ms": r.p50.as_secs_f64() * 1000.0,
        "p90_ms": r.p90.as_secs_f64() * 1000.0,
        "pixels_per_sec": pixels_per_sec,
    })
}

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let n = sorted.len();
    let rank = (p * (n as f64)).ceil().clamp(1.0, n as f64) as usize;
    sorted[rank - 1]
}

fn fmt_ms(d: Duration) -> String {
    format!("{:.3}ms", d.as_secs_f64() * 1000.0)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

fn parse_args() -> anyhow::Result<BenchArgs> {
    let mut args = std::env::args().skip(1);

    let mut out = BenchArgs {
        warmup: 2,
        repeats: 20,
        threads: None,
        sizes: vec![64, 256, 512, 1024],
    };

    while let Some(a) = args.next() {
        match a.as_str() {
            "--warmup" => out.warmup = parse_u32(args.next(), "--warmup")?,
            "--repeats" => out.repeats = parse_u32(args.next(), "--repeats")?,
            "--threads" => out.threads = Some(parse_usize(args.next(), "--threads")?),
            "--sizes" => {
                let v = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("missing value for --sizes (e.g. 64,256)"))?;
                out.sizes = v
                    .split(',')
                    .map(|s| {
                        s.trim()
                            .parse::<u32>()
                            .with_context(|| format!("parse --sizes entry '{s}'"))
                    })
                    .collect::<anyhow::Result<_>>()?;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => anyhow::bail!("unknown arg '{a}' (try --help)"),
        }
    }

    Ok(out)
}

fn print_help() {
    eprintln!(
        r#"alphablend-bench

Blends two patterned, partly transparent surfaces at several square sizes, sequentially and
in parallel, and prints p50/p90 timings plus output digests as JSON.

Usage:
  cargo run -q -p alphablend-bench --release
  cargo run -q -p alphablend-bench --release -- --sizes 256,2048 --threads 4

Args:
  --warmup N     untimed runs per mode (default 2)
  --repeats N    timed runs per mode (default 20)
  --threads N    dedicated rayon workers for the parallel mode
  --sizes A,B    square surface side lengths (default 64,256,512,1024)
"#
    );
}

fn parse_u32(v: Option<String>, flag: &str) -> anyhow::Result<u32> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<u32>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}

fn parse_usize(v: Option<String>, flag: &str) -> anyhow::Result<usize> {
    let v = v.ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))?;
    v.parse::<usize>()
        .with_context(|| format!("parse {flag} value '{v}'"))
}
