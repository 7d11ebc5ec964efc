use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};

static TABLES: &str = r#"
[server] # primary
host = "127.0.0.1"
port = 8080
timeouts = [1.5, 3, 10] # seconds

[[peers]]
name = 'alpha'
weights = { read = 0.75, write = 0.25 }
enabled = true
"#;

static SCALARS: &str = "key = 1_000 other = -0.5e+3 flag = false hex = 0xff name = 'literal' \
     key = 1_000 other = -0.5e+3 flag = false hex = 0xff name = 'literal' key = 1_000 \
     other = -0.5e+3 flag = false hex = 0xff name = 'literal' key = 1_000 other = -0.5e+3 \
     flag = false hex = 0xff name = 'literal' key = 1_000 other = -0.5e+3 flag = false";

fn iterate(s: &str) {
    use lexis_toml::{SyntaxKind, Tokenizer};

    let mut tokenizer = Tokenizer::new(s);

    loop {
        let token = tokenizer.next_token();

        if token.kind == SyntaxKind::EOF {
            break;
        }

        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    let tables = TABLES.repeat(30);

    for (name, source) in [("tables_and_comments", tables.as_str()), ("scalars", SCALARS)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);
