use calcula::{Ast, CalcError, Calcula, Limits, NoVars, Node, NodeType};

fn chain(depth: usize) -> Ast {
    // 1 + (1 + (1 + ...)), `depth` levels deep
    let mut node = Node::integer("1");
    for _ in 1..depth {
        node = Node::binary(NodeType::Addition, Node::integer("1"), node);
    }
    Ast::new(node)
}

#[test]
fn default_limits_are_unbounded() {
    assert_eq!(Calcula::new().limits(), Limits::default());
    assert_eq!(Limits::default().max_depth, None);
    assert_eq!(Calcula::new().evaluate_ast(&chain(500)).unwrap(), 500.0);
}

#[test]
fn depth_at_limit_is_accepted() {
    let calc = Calcula::with_limits(Limits::with_max_depth(10));
    assert_eq!(calc.evaluate_ast(&chain(10)).unwrap(), 10.0);
    let folded = calc.optimize(Some(&chain(10))).unwrap().unwrap();
    assert_eq!(folded.node.value, 10.0);
}

#[test]
fn depth_over_limit_fails_everywhere() {
    let calc = Calcula::with_limits(Limits::with_max_depth(10));
    let deep = chain(11);
    let expected = CalcError::DepthLimitExceeded { limit: 10 };
    assert_eq!(calc.evaluate_ast(&deep).unwrap_err(), expected);
    assert_eq!(calc.optimize(Some(&deep)).unwrap_err(), expected);

    let unbounded = Calcula::new().optimize(Some(&deep)).unwrap().unwrap();
    assert_eq!(
        calc.evaluate_optimized(&unbounded, &NoVars).unwrap(),
        11.0,
        "a folded tree is a single leaf"
    );
}

#[test]
fn text_entry_point_honours_limits() {
    let calc = Calcula::with_limits(Limits::with_max_depth(3));
    assert_eq!(calc.evaluate("1 + 2").unwrap(), 3.0);
    assert_eq!(
        calc.evaluate("1 + (2 + (3 + 4))").unwrap_err(),
        vec![CalcError::DepthLimitExceeded { limit: 3 }]
    );
}

#[test]
fn deeply_nested_parentheses_fail_while_parsing() {
    let calc = Calcula::with_limits(Limits::with_max_depth(100));
    let src = format!("{}1{}", "(".repeat(200_000), ")".repeat(200_000));
    assert_eq!(
        calc.evaluate(&src).unwrap_err(),
        vec![CalcError::DepthLimitExceeded { limit: 100 }]
    );
}

#[test]
fn long_unary_minus_chain_fails_while_parsing() {
    let calc = Calcula::with_limits(Limits::with_max_depth(100));
    let src = format!("{}1", "-".repeat(200_000));
    assert_eq!(
        calc.evaluate(&src).unwrap_err(),
        vec![CalcError::DepthLimitExceeded { limit: 100 }]
    );
}

#[test]
fn long_operator_chain_is_cut_off_while_parsing() {
    // Left-deep tree: every `+` adds one level.
    let calc = Calcula::with_limits(Limits::with_max_depth(100));
    let src = format!("1{}", " + 1".repeat(200_000));
    assert_eq!(
        calc.evaluate(&src).unwrap_err(),
        vec![CalcError::DepthLimitExceeded { limit: 100 }]
    );
}

#[test]
fn nesting_within_limit_still_parses() {
    let calc = Calcula::with_limits(Limits::with_max_depth(100));
    let src = format!("{}7{}", "(".repeat(50), ")".repeat(50));
    assert_eq!(calc.evaluate(&src).unwrap(), 7.0);
    assert_eq!(calc.evaluate(&format!("{}3", "-".repeat(50))).unwrap(), 3.0);
}
