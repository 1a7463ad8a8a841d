use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use quick_term::{decoder::decode_escape, InputEvent, MemoryTty, Size, Terminal, TerminalConfig};

const BOUNDS: Size = Size {
    height: 50,
    width: 200,
};

const KEYS: [&str; 6] = ["[A", "[3~", "[15~", "[24~", "OR", "[1;5C"];

fn escape_decoder_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_escape");
    group
        .throughput(Throughput::Elements(KEYS.len() as u64))
        .bench_function("keys", |b| {
            b.iter(|| {
                for key in KEYS {
                    decode_escape(key.as_bytes(), BOUNDS, |_| {});
                }
            })
        });

    for count in [1, 8, 64] {
        let mut batch = Vec::new();
        for index in 0..count {
            if index != 0 {
                batch.push(0x1b);
            }
            let click = format!("[<0;{};{}M", index % 200 + 1, index % 50 + 1);
            batch.extend_from_slice(click.as_bytes());
        }
        group
            .throughput(Throughput::Elements(count as u64))
            .bench_with_input(BenchmarkId::new("mouse", count), &batch, |b, batch| {
                b.iter(|| {
                    let mut clicks = 0;
                    decode_escape(batch, BOUNDS, |_| clicks += 1);
                    assert_eq!(clicks, count);
                })
            });
    }
    group.finish();
}

const SMALL_SET: &str = "hello\x1b[A\x1b[<0;24;14M\x1b[<0;24;14m\x1bOR\x1b[15~\x1b";

fn poll_benchmark(c: &mut Criterion) {
    let config = TerminalConfig {
        catch_signals: false,
        mouse_reminder: false,
        ..TerminalConfig::default()
    };
    let mut term = Terminal::from_device(MemoryTty::new(BOUNDS), config).unwrap();
    term.enable_raw_mode().unwrap();

    let mut group = c.benchmark_group("poll");
    group
        .throughput(Throughput::Bytes(SMALL_SET.len() as u64))
        .bench_function("memory", |b| {
            b.iter(|| {
                term.device_mut().feed(SMALL_SET);
                let mut events: Vec<InputEvent> = Vec::new();
                while term.device().pending() > 0 {
                    if let Some(event) = term.poll().unwrap() {
                        events.push(event);
                    }
                }
                events
            })
        });
    group.finish();
}

criterion_group!(benches, escape_decoder_benchmark, poll_benchmark);
criterion_main!(benches);
