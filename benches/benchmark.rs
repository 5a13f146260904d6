use criterion::{Criterion, criterion_group, criterion_main};

use kumiko::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Expr {
    Number(i64),
    Variable(String),
    Binary(Box<Expr>, String, Box<Expr>),
}

fn expr_grammar() -> Forward<str, Expr> {
    fix(|expr: Forward<str, Expr>| {
        let atom = move || {
            choice(vec![
                Box::new(delimited(token(string("(")), expr.clone(), token(string(")"))))
                    as BoxedParser<str, Expr>,
                Box::new(map(token(regex(r"-?[0-9]+")), |s: String| {
                    Expr::Number(s.parse().unwrap())
                })),
                Box::new(map(token(regex(r"[A-Za-z_]+")), Expr::Variable)),
            ])
        };
        let binary = map(
            tuple3(atom(), token(regex(r"[+*/-]")), atom()),
            lift3(|left: Expr, op: String, right: Expr| {
                Expr::Binary(Box::new(left), op, Box::new(right))
            }),
        );
        choice(vec![
            Box::new(binary) as BoxedParser<str, Expr>,
            Box::new(atom()),
        ])
    })
}

fn bench_nested_arithmetic(c: &mut Criterion) {
    let grammar = expr_grammar();
    let input = "17 / (1 + (2 * (x + 4)))";

    c.bench_function("parse nested arithmetic", |b| {
        b.iter(|| grammar.parse(input, 0))
    });
}

// ベンチマークグループの定義
criterion_group!(benches, bench_nested_arithmetic);
criterion_main!(benches);
