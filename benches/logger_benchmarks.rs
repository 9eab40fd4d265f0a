//! Criterion benchmarks for rust_log_dispatch

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_dispatch::prelude::*;
use rust_log_dispatch::DEFAULT_BUFFER_SIZE;
use std::io;
use std::thread;

/// Target that discards everything, so benchmarks measure the engine
struct NullTarget;

impl Target for NullTarget {
    fn open(&mut self, _errors: ErrorSink) -> Result<()> {
        Ok(())
    }

    fn process(&mut self, entry: &LogEntry) {
        black_box(entry);
    }

    fn close(&mut self) {}

    fn name(&self) -> &str {
        "null"
    }
}

fn null_logger(sync: bool, buffer_size: usize) -> Logger {
    Logger::builder()
        .error_writer(io::sink())
        .buffer_size(buffer_size)
        .sync_mode(sync)
        .target(NullTarget)
        .build()
        .expect("logger opens")
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_sync_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_logging");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger(true, DEFAULT_BUFFER_SIZE);

    group.bench_function("debug", |b| {
        b.iter(|| logger.debug(black_box("Debug message")));
    });

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("Info message")));
    });

    group.bench_function("infof", |b| {
        b.iter(|| logger.infof(format_args!("request {} took {}ms", black_box(42), 7)));
    });

    group.bench_function("error", |b| {
        b.iter(|| logger.error(black_box("Error message")));
    });

    group.finish();
    logger.close();
}

fn bench_async_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("async_logging");
    group.throughput(Throughput::Elements(1));

    for buffer_size in [0, 64, DEFAULT_BUFFER_SIZE] {
        let logger = null_logger(false, buffer_size);
        group.bench_function(format!("info_buffer_{}", buffer_size), |b| {
            b.iter(|| logger.info(black_box("Info message")));
        });
        logger.close();
    }

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2, 4, 8] {
        let per_thread = 1000;
        group.throughput(Throughput::Elements((threads * per_thread) as u64));
        group.bench_function(format!("{}_threads", threads), |b| {
            b.iter(|| {
                let logger = null_logger(false, DEFAULT_BUFFER_SIZE);
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let logger = logger.get_logger(format!("worker-{}", t));
                        thread::spawn(move || {
                            for i in 0..per_thread {
                                logger.infof(format_args!("message {}", i));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
                logger.close();
            });
        });
    }

    group.finish();
}

// ============================================================================
// Filtering and Formatting Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger(true, DEFAULT_BUFFER_SIZE);
    logger.set_max_level(LogLevel::Warn);

    group.bench_function("filtered_debug", |b| {
        b.iter(|| logger.debugf(format_args!("hidden {}", black_box(1))));
    });

    group.bench_function("passed_warn", |b| {
        b.iter(|| logger.warnf(format_args!("shown {}", black_box(1))));
    });

    group.finish();
    logger.close();
}

fn bench_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatters");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger(true, DEFAULT_BUFFER_SIZE);
    let entry = LogEntry::new(LogLevel::Info, "bench", "User logged in");

    group.bench_function("default", |b| {
        b.iter(|| formatter::default_formatter(&logger, black_box(&entry)));
    });

    group.bench_function("normal", |b| {
        b.iter(|| formatter::normal_formatter(&logger, black_box(&entry)));
    });

    group.bench_function("json", |b| {
        b.iter(|| formatter::json_formatter(&logger, black_box(&entry)));
    });

    group.finish();
    logger.close();
}

fn bench_call_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_stack");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger(true, DEFAULT_BUFFER_SIZE);
    logger.set_call_stack(5, "");

    group.bench_function("info_depth_5", |b| {
        b.iter(|| logger.info(black_box("with stack")));
    });

    group.finish();
    logger.close();
}

criterion_group!(
    benches,
    bench_sync_logging,
    bench_async_logging,
    bench_concurrent_logging,
    bench_level_filtering,
    bench_formatters,
    bench_call_stack,
);
criterion_main!(benches);
