use calcula::{Calcula, parse};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use rand::Rng;
use std::collections::HashMap;
use std::hint::black_box;

const EXPRESSIONS: [(&str, &str); 4] = [
    ("constant", "(1 + 2) * 3 - 4 / 2 + 10 * (7 - 5)"),
    ("damage", "power * (100 / (100 + defense)) * (1 + critical_bonus * 2.5)"),
    ("mixed", "(2 * 3 + 4) * power - (defense / (8 - 6)) + 0.5 * 4"),
    ("deep", "((((power + 1) * 2 + 3) * 4 + 5) * 6 + 7) / (1 + 2 + 3 + 4)"),
];

fn create_vars() -> HashMap<String, f64> {
    let mut vars = HashMap::new();
    vars.insert("power".to_string(), 100.0);
    vars.insert("defense".to_string(), 50.0);
    vars.insert("critical_bonus".to_string(), 0.5);
    vars
}

fn benchmark_eval(c: &mut Criterion) {
    let calc = Calcula::new();
    let vars = create_vars();

    for (name, expr_str) in EXPRESSIONS {
        let ast = parse(expr_str).unwrap();
        c.bench_function(&format!("optimize_{}", name), |b| {
            b.iter(|| black_box(calc.optimize(Some(black_box(&ast))).unwrap()));
        });

        let optimized = calc.optimize(Some(&ast)).unwrap().unwrap();
        println!(
            "{}: {} nodes -> {} nodes, result {}",
            name,
            ast.node.size(),
            optimized.node.size(),
            optimized.evaluate_with(&vars).unwrap()
        );
        c.bench_function(&format!("eval_optimized_{}", name), |b| {
            b.iter_batched(
                || {
                    let mut rng = rand::thread_rng();
                    let mut vars = vars.clone();
                    vars.insert("power".to_string(), rng.gen_range(1.0..1000.0));
                    vars
                },
                |vars| black_box(optimized.evaluate_with(&vars).unwrap()),
                BatchSize::SmallInput,
            );
        });
    }

    let text = EXPRESSIONS[0].1;
    c.bench_function("evaluate_text_constant", |b| {
        b.iter(|| black_box(calc.evaluate(black_box(text)).unwrap()));
    });
    let ast = parse(text).unwrap();
    c.bench_function("evaluate_ast_constant", |b| {
        b.iter(|| black_box(calc.evaluate_ast(black_box(&ast)).unwrap()));
    });
}

criterion_group!(benches, benchmark_eval);
criterion_main!(benches);
