use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use minic_parser::{parse, tokenize};

fn program(source: &str) {
    let tokens = tokenize(source).unwrap();
    let _ast = parse(&tokens).unwrap();
}

fn long_expr(c: &mut Criterion) {
    let mut group = c.benchmark_group("long-expr");

    let mut source = "int main() { return 1".to_string();
    for _i in 0..1000 {
        source.push_str(" + 1");
    }
    source.push_str("; }");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("long-expr", |b| b.iter(|| program(&source)));
}

fn stress_precedence(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress-precedence");

    let mut source = "int main() { return 1".to_string();
    for _i in 0..200 {
        source.push_str(" == 2 < 3 + 5 * 5 && !x || -y % 7");
    }
    source.push_str("; }");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("stress-precedence", |b| b.iter(|| program(&source)));
}

fn many_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("many-functions");

    let mut source = String::new();
    for i in 0..200 {
        source.push_str(&format!(
            "int f{}(int a, int b) {{ int c = a * b; while (c > 0) {{ c = c - 1; }} if (a) {{ return c; }} else {{ return b; }} }}\n",
            i
        ));
    }
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("many-functions", |b| b.iter(|| program(&source)));
}

criterion_group!(benches, long_expr, stress_precedence, many_functions);
criterion_main!(benches);
