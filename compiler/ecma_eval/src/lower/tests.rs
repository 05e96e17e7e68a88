#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use ecma_ir::{FunctionKind, SharedInterner};
use pretty_assertions::assert_eq;

use crate::interpreter::Interpreter;

#[test]
fn literal_addition_folds_to_constant() {
    let interner = SharedInterner::default();
    let mut arena = ExprArena::new();
    let two = arena.number(2.0);
    let three = arena.number(3.0);
    let sum = arena.binary(BinaryOp::Add, two, three);

    let mut lowerer = Lowerer::new(&arena, &interner);
    let node = lowerer.lower(sum).unwrap();
    assert_eq!(node.as_constant(), Some(&Value::int(5)));
    assert_eq!(lowerer.folded_count(), 1);

    let mut interp = Interpreter::new(&interner);
    assert_eq!(interp.evaluate(&node), Ok(Value::int(5)));
    assert_eq!(interp.stats().binary_evaluations, 0);
}

#[test]
fn nested_constants_fold_bottom_up() {
    let interner = SharedInterner::default();
    let mut arena = ExprArena::new();
    let a = arena.number(2.0);
    let b = arena.number(3.0);
    let c = arena.number(4.0);
    let product = arena.binary(BinaryOp::Mul, b, c);
    let sum = arena.binary(BinaryOp::Add, a, product);

    let mut lowerer = Lowerer::new(&arena, &interner);
    let node = lowerer.lower(sum).unwrap();
    assert_eq!(node.as_constant(), Some(&Value::int(14)));
    assert_eq!(lowerer.folded_count(), 2);
}

#[test]
fn identifier_operand_is_not_folded() {
    let interner = SharedInterner::default();
    let mut arena = ExprArena::new();
    let x = arena.ident(interner.intern("x"));
    let one = arena.number(1.0);
    let sum = arena.binary(BinaryOp::Add, x, one);

    let node = lower(&arena, &interner, sum).unwrap();
    match node {
        Node::Binary(binary) => {
            assert_eq!(binary.op, BinaryOp::Add);
            assert!(binary.right.is_constant());
        }
        other => panic!("expected a binary node, got {other:?}"),
    }
}

#[test]
fn instanceof_and_in_are_never_folded() {
    for op in [BinaryOp::InstanceOf, BinaryOp::In] {
        let node = binary(
            op,
            Node::Constant(Value::int(1)),
            Node::Constant(Value::int(2)),
            Span::DUMMY,
        );
        assert!(!node.is_constant(), "{op} was folded");
    }
}

#[test]
fn failing_constant_expression_is_left_for_run_time() {
    let node = binary(
        BinaryOp::In,
        Node::Constant(Value::string("x")),
        Node::Constant(Value::Null),
        Span::new(0, 8),
    );
    let interner = SharedInterner::default();
    let mut interp = Interpreter::new(&interner);
    let err = interp.evaluate(&node).unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(err.span, Some(Span::new(0, 8)));
}

#[test]
fn every_foldable_operator_folds() {
    for op in BinaryOp::ALL.into_iter().filter(|op| op.is_foldable()) {
        let node = binary(
            op,
            Node::Constant(Value::int(6)),
            Node::Constant(Value::int(3)),
            Span::DUMMY,
        );
        assert!(node.is_constant(), "{op} was not folded");
    }
}

#[test]
fn token_is_parsed_to_operator() {
    let node = binary_from_token(
        "**",
        Node::Constant(Value::int(2)),
        Node::Constant(Value::int(10)),
        Span::DUMMY,
    )
    .unwrap();
    assert_eq!(node.as_constant(), Some(&Value::int(1024)));
}

#[test]
fn unknown_token_is_a_build_error() {
    let err = binary_from_token(
        "<=>",
        Node::Constant(Value::int(1)),
        Node::Constant(Value::int(2)),
        Span::DUMMY,
    )
    .unwrap_err();
    assert_eq!(
        err,
        BuildError::UnknownOperator(UnknownOperator("<=>".to_string()))
    );
}

#[test]
fn id_from_another_arena_is_rejected() {
    let interner = SharedInterner::default();
    let mut other = ExprArena::new();
    other.number(1.0);
    let foreign = other.number(2.0);

    let arena = ExprArena::new();
    assert_eq!(
        lower(&arena, &interner, foreign).unwrap_err(),
        BuildError::InvalidExprId(foreign)
    );
}

#[test]
fn pattern_outside_plain_assignment_is_rejected() {
    let interner = SharedInterner::default();
    let mut arena = ExprArena::new();
    let a = arena.ident(interner.intern("a"));
    let pattern = arena.alloc(ExprKind::ArrayPattern(vec![Some(a)]), Span::new(3, 6));
    let one = arena.number(1.0);
    let compound = arena.assign(AssignOp::AddAssign, pattern, one);

    assert_eq!(
        lower(&arena, &interner, compound).unwrap_err(),
        BuildError::MisplacedPattern(Span::new(3, 6))
    );
    assert_eq!(
        lower(&arena, &interner, pattern).unwrap_err(),
        BuildError::MisplacedPattern(Span::new(3, 6))
    );
}

#[test]
fn non_reference_target_lowers_to_invalid() {
    let interner = SharedInterner::default();
    let mut arena = ExprArena::new();
    let f = arena.ident(interner.intern("f"));
    let call = arena.call(f, vec![]);
    let one = arena.number(1.0);
    let assign = arena.assign(AssignOp::Assign, call, one);

    match lower(&arena, &interner, assign).unwrap() {
        Node::Assign(node) => assert!(matches!(node.target, AssignTarget::Invalid(_))),
        other => panic!("expected an assignment, got {other:?}"),
    }
}

#[test]
fn function_literal_keeps_its_name() {
    let interner = SharedInterner::default();
    let mut arena = ExprArena::new();
    let anon = arena.alloc(
        ExprKind::Function {
            name: None,
            kind: FunctionKind::Arrow,
        },
        Span::DUMMY,
    );
    let named = arena.alloc(
        ExprKind::Function {
            name: Some(interner.intern("g")),
            kind: FunctionKind::Function,
        },
        Span::DUMMY,
    );

    assert!(lower(&arena, &interner, anon)
        .unwrap()
        .is_anonymous_function());
    match lower(&arena, &interner, named).unwrap() {
        Node::Function { name, kind } => {
            assert_eq!(name.as_deref(), Some("g"));
            assert_eq!(kind, FunctionKind::Function);
        }
        other => panic!("expected a function literal, got {other:?}"),
    }
}
