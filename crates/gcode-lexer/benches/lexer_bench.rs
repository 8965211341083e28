use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gcode_lexer::{Lexer, LexerSink, TokenKind};

#[derive(Default)]
struct Discard;

impl LexerSink for Discard {
    fn lex_error(&mut self, _message: &str) -> bool {
        true
    }
    fn lex_keyword(&mut self, _kind: TokenKind) -> bool {
        true
    }
    fn lex_identifier(&mut self, _name: &str) -> bool {
        true
    }
    fn lex_str_literal(&mut self, _text: &str) -> bool {
        true
    }
    fn lex_int_literal(&mut self, _value: i64) -> bool {
        true
    }
    fn lex_float_literal(&mut self, _value: f64) -> bool {
        true
    }
    fn lex_bridge(&mut self) -> bool {
        true
    }
    fn lex_end_statement(&mut self) -> bool {
        true
    }
}

fn scan(source: &str) {
    let mut lexer = Lexer::new();
    let mut sink = Discard;
    lexer.scan(source.as_bytes(), &mut sink);
    lexer.finish(&mut sink);
}

fn bench_traditional(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_traditional");
    let source = "G1 X10.5 Y-20.25 Z0.1 F3000\n".repeat(50);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("moves", |b| b.iter(|| scan(black_box(&source))));
    group.finish();
}

fn bench_extended(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_extended");
    let source = "SET_HEATER_TEMPERATURE HEATER=extruder TARGET=210.0\n".repeat(50);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("parameters", |b| b.iter(|| scan(black_box(&source))));
    group.finish();
}

fn bench_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_expressions");
    let source = "G1 X{printer.toolhead.position.x + 1} Y{1 IF flag ELSE 2}\n".repeat(50);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("braced_expressions", |b| b.iter(|| scan(black_box(&source))));
    group.finish();
}

fn bench_raw(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_raw");
    let source = "M117 Printing layer 12 of 340, 35% complete\n".repeat(50);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("display_text", |b| b.iter(|| scan(black_box(&source))));
    group.finish();
}

fn bench_chunked(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_chunked");
    let source = "G1 X10 Y20 Z30\n".repeat(200);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("4kib_chunks", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new();
            let mut sink = Discard;
            for chunk in source.as_bytes().chunks(4096) {
                lexer.scan(black_box(chunk), &mut sink);
            }
            lexer.finish(&mut sink);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_traditional,
    bench_extended,
    bench_expressions,
    bench_raw,
    bench_chunked
);
criterion_main!(benches);
