use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use mask_core::{KeyIntent, MaskConfig, MaskState, admit_key, format, sanitize_paste};

// Longer inputs overflow f64 and take the non-numeric fallback.
const LONG_DIGITS: usize = 256;

fn make_digits(len: usize) -> String {
    (0..len).map(|i| char::from(b'1' + (i % 9) as u8)).collect()
}

fn bench_format_small(c: &mut Criterion) {
    let config = MaskConfig::default();
    c.bench_function("bench_format_small", |b| {
        b.iter(|| black_box(format(black_box(Some("1234567.891")), &config)));
    });
}

fn bench_format_long(c: &mut Criterion) {
    let config = MaskConfig::default();
    let raw = format!("{}.5", make_digits(LONG_DIGITS));
    c.bench_function("bench_format_long", |b| {
        b.iter(|| black_box(format(black_box(Some(raw.as_str())), &config)));
    });
}

fn bench_sanitize_paste(c: &mut Criterion) {
    let config = MaskConfig::default();
    let clipboard = format(Some(&make_digits(LONG_DIGITS)), &config);
    c.bench_function("bench_sanitize_paste", |b| {
        b.iter(|| black_box(sanitize_paste(black_box(&clipboard), &config)));
    });
}

fn bench_admit_key(c: &mut Criterion) {
    let config = MaskConfig::default();
    let text = format!("{}.4", make_digits(64));
    let caret = text.len();
    c.bench_function("bench_admit_key", |b| {
        b.iter(|| black_box(admit_key(&KeyIntent::new(black_box(&text), caret, '2'), &config)));
    });
}

fn bench_typing_session(c: &mut Criterion) {
    let keys = "123456789.123";
    c.bench_function("bench_typing_session", |b| {
        b.iter_batched(
            || MaskState::new(MaskConfig::default()),
            |mut state| {
                state.handle_focus_enter();
                for ch in keys.chars() {
                    black_box(state.type_char(ch));
                }
                black_box(state.handle_focus_leave().len());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_format_small,
    bench_format_long,
    bench_sanitize_paste,
    bench_admit_key,
    bench_typing_session
);
criterion_main!(benches);
