use criterion::{Criterion, black_box, criterion_group, criterion_main};
use revex::{BracePattern, ReverseRegex, TemplateMode, ValueBag, translate};

const NESTED: &str = r"^1(\d+([a-z]+)(\d+([a-z]+)))(?P<foo>\d+)3([a-z]+(\d+))(?P<bar>\d+)$";

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_nested", |b| {
        b.iter(|| black_box(ReverseRegex::new(black_box(NESTED))))
    });
}

fn bench_values(c: &mut Criterion) {
    let pattern = ReverseRegex::new(r"^/users/(?P<id>\d+)/posts/(?P<slug>[\w-]+)$").unwrap();
    let input = "/users/1234/posts/hello-world";

    c.bench_function("values", |b| {
        b.iter(|| black_box(pattern.values(black_box(input))))
    });
}

fn bench_revert(c: &mut Criterion) {
    let pattern = ReverseRegex::new(r"^/users/(?P<id>\d+)/posts/(?P<slug>[\w-]+)$").unwrap();
    let values: ValueBag = [("id", "1234"), ("slug", "hello-world")].into_iter().collect();

    c.bench_function("revert", |b| {
        b.iter(|| black_box(pattern.revert(&mut values.clone())))
    });

    c.bench_function("revert_valid", |b| {
        b.iter(|| black_box(pattern.revert_valid(&mut values.clone())))
    });
}

fn bench_translate(c: &mut Criterion) {
    let template = "/api/{version:v[0-9]+}/{resource}/{id:[0-9a-f]{8}}/";

    c.bench_function("translate", |b| {
        b.iter(|| black_box(translate(black_box(template), TemplateMode::Path, true)))
    });

    c.bench_function("brace_pattern", |b| {
        b.iter(|| black_box(BracePattern::path(black_box(template), true)))
    });
}

criterion_group!(
    benches,
    bench_compile,
    bench_values,
    bench_revert,
    bench_translate,
);

criterion_main!(benches);
