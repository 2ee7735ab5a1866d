//! Lexer benchmarks. Run with `cargo bench --package lexkit-lex`.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lexkit_lex::{Lexer, LexerKernel};

fn sample_kernel() -> Arc<LexerKernel> {
    Arc::new(
        LexerKernel::builder()
            .delimiter("+", 1)
            .delimiter("-", 2)
            .delimiter("*", 3)
            .delimiter("/", 4)
            .delimiter("=", 5)
            .delimiter("==", 6)
            .delimiter("(", 7)
            .delimiter(")", 8)
            .delimiter("{", 9)
            .delimiter("}", 10)
            .delimiter(",", 11)
            .delimiter(";", 12)
            .delimiter(":", 13)
            .delimiter("->", 14)
            .delimiter("<=", 15)
            .delimiter("<", 16)
            .comment_start("/*", 20)
            .comment_end("*/", 21)
            .comment_line("//", 22)
            .string_delim('"', '"')
            .keyword("let", 100)
            .keyword("fn", 101)
            .keyword("return", 102)
            .keyword("if", 103)
            .keyword("struct", 104)
            .keyword("enum", 105)
            .keyword("trait", 106)
            .keyword("impl", 107)
            .build(),
    )
}

fn lexer_token_count(source: &str) -> usize {
    let kernel = sample_kernel();
    let mut lexer = Lexer::new(kernel, "bench", source.to_string());
    let mut count = 0;
    while lexer.next_token().unwrap().is_some() {
        count += 1;
    }
    count
}

fn bench_lexer_keywords(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    let source = "let x = 42; fn main() { let y = x + 1; return y; }";
    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("simple_let", |b| {
        b.iter(|| lexer_token_count(black_box("let x = 42;")))
    });

    group.bench_function("function_with_body", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_complex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_complex");

    let source = r#"
        fn fibonacci(n) -> n {
            if n <= 1 {
                return n;
            }
            return fibonacci(n - 1) + fibonacci(n - 2);
        }

        struct Point {
            x,
            y,
        }
    "#;

    group.throughput(Throughput::Bytes(source.len() as u64));

    group.bench_function("complex_source", |b| {
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_strings(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_strings");

    group.bench_function("short_string", |b| {
        b.iter(|| lexer_token_count(black_box("let s = \"hello\";")))
    });

    group.bench_function("long_string", |b| {
        let source = "let s = \"This is a longer string that contains some text for benchmarking purposes.\";";
        b.iter(|| lexer_token_count(black_box(source)))
    });

    group.finish();
}

fn bench_lexer_numbers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_numbers");

    group.bench_function("integer", |b| {
        b.iter(|| lexer_token_count(black_box("let x = 123456;")))
    });

    group.bench_function("float", |b| {
        b.iter(|| lexer_token_count(black_box("let x = 3.14159;")))
    });

    group.bench_function("hex", |b| {
        b.iter(|| lexer_token_count(black_box("let x = 0xDEADBEEF;")))
    });

    group.finish();
}

fn bench_lexer_identifiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_identifiers");

    group.bench_function("short_ident", |b| {
        b.iter(|| lexer_token_count(black_box("let x = 42;")))
    });

    group.bench_function("long_ident", |b| {
        b.iter(|| lexer_token_count(black_box("let very_long_variable_name = 42;")))
    });

    group.bench_function("many_ident", |b| {
        b.iter(|| {
            lexer_token_count(black_box(
                "let a = 1; let b = 2; let c = 3; let d = 4; let e = 5;",
            ))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_lexer_keywords,
    bench_lexer_complex,
    bench_lexer_strings,
    bench_lexer_numbers,
    bench_lexer_identifiers
);
criterion_main!(benches);
