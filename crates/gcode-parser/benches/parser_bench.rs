use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gcode_ast::Node;
use gcode_parser::{Parser, StatementSink};

#[derive(Default)]
struct Discard;

impl StatementSink for Discard {
    fn error(&mut self, _message: &str) -> bool {
        true
    }
    fn statement(&mut self, _node: Node) -> bool {
        true
    }
}

fn parse(source: &str) {
    let mut parser = Parser::new(Discard);
    parser.parse(source.as_bytes());
    parser.finish();
}

fn bench_traditional_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_traditional");
    let source = "G1 X10.5 Y-20.25 Z0.1 F3000\n".repeat(50);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("moves", |b| b.iter(|| parse(black_box(&source))));
    group.finish();
}

fn bench_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_expressions");
    let source =
        "G1 X{printer.toolhead.position.x + 1} Y{1 IF flag ELSE 2 * scale}\n".repeat(50);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("braced_expressions", |b| b.iter(|| parse(black_box(&source))));
    group.finish();
}

fn bench_function_calls(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser_calls");
    let source = "SET_GCODE_VARIABLE MACRO=m VARIABLE=v VALUE={clamp(value, 0, 1)}\n".repeat(50);
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("calls", |b| b.iter(|| parse(black_box(&source))));
    group.finish();
}

criterion_group!(
    benches,
    bench_traditional_moves,
    bench_expressions,
    bench_function_calls
);
criterion_main!(benches);
