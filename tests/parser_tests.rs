// Integration tests for the C- parser

use cminus::listing::print_tree;
use cminus::parser::ast::{DeclType, NodeFamily, NodeKind, Operator, Program, TreeNode};
use cminus::parser::lexer::{TokenKind, COMMENT_ERROR};
use cminus::parser::parse::{ParseError, Parser, MAX_NESTING_DEPTH};

fn parse(source: &str) -> Program {
    Parser::new(source).parse_program().expect("Parsing failed")
}

fn parse_err(source: &str) -> ParseError {
    match Parser::new(source).parse_program() {
        Ok(program) => panic!("Expected a syntax error, got {:?}", program),
        Err(e) => e,
    }
}

/// Statements of the body of the only function in `source`
fn body_of(program: &Program) -> &[TreeNode] {
    match &program.declarations.last().expect("no declarations").kind {
        NodeKind::FuncDecl { body, .. } => match &body.kind {
            NodeKind::Compound { statements, .. } => statements,
            other => panic!("Expected compound body, got {:?}", other),
        },
        other => panic!("Expected function, got {:?}", other),
    }
}

fn in_function(statements: &str) -> String {
    format!("void f(void)\n{{\n{}\n}}\n", statements)
}

#[test]
fn test_top_level_order() {
    let program = parse("int x;\nint y[3];\nvoid f(void) { }\nint z;");

    let names: Vec<&str> = program
        .declarations
        .iter()
        .filter_map(|d| d.name())
        .collect();
    assert_eq!(names, vec!["x", "y", "f", "z"]);

    let kinds: Vec<&str> = program.declarations.iter().map(|d| d.kind_name()).collect();
    assert_eq!(kinds, vec!["VarDecl", "ArrayDecl", "FuncDecl", "VarDecl"]);
    assert!(program
        .declarations
        .iter()
        .all(|d| d.family() == NodeFamily::Expression));
}

#[test]
fn test_precedence_multiplication_binds_tighter() {
    let program = parse("int main(void){ return 1 + 2 * 3; }");

    let statements = body_of(&program);
    let value = match &statements[0].kind {
        NodeKind::Return { value: Some(value) } => value,
        other => panic!("Expected return with value, got {:?}", other),
    };

    match &value.kind {
        NodeKind::AdditiveExpr { left, op, right } => {
            assert_eq!(left.value(), Some(1));
            assert_eq!(op.operator(), Some(Operator::Plus));
            assert_eq!(right.binary_operator(), Some(Operator::Times));
            let children = right.children();
            assert_eq!(children[0].value(), Some(2));
            assert_eq!(children[2].value(), Some(3));
        }
        other => panic!("Expected additive expression, got {:?}", other),
    }
}

#[test]
fn test_additive_is_left_associative() {
    let program = parse(&in_function("x = 1 - 2 - 3;"));

    let value = match &body_of(&program)[0].kind {
        NodeKind::Assign { value, .. } => value,
        other => panic!("Expected assignment, got {:?}", other),
    };
    match &value.kind {
        NodeKind::AdditiveExpr { left, right, .. } => {
            assert_eq!(left.binary_operator(), Some(Operator::Minus));
            assert_eq!(left.children()[0].value(), Some(1));
            assert_eq!(right.value(), Some(3));
        }
        other => panic!("Expected additive expression, got {:?}", other),
    }
}

#[test]
fn test_parentheses_override_precedence() {
    let program = parse(&in_function("x = (1 + 2) * 3;"));

    let value = match &body_of(&program)[0].kind {
        NodeKind::Assign { value, .. } => value,
        other => panic!("Expected assignment, got {:?}", other),
    };
    assert_eq!(value.binary_operator(), Some(Operator::Times));
    assert_eq!(value.children()[0].binary_operator(), Some(Operator::Plus));
}

#[test]
fn test_assignment_is_right_associative() {
    let program = parse(&in_function("x = y = 3;"));

    match &body_of(&program)[0].kind {
        NodeKind::Assign { target, value } => {
            assert_eq!(target.name(), Some("x"));
            match &value.kind {
                NodeKind::Assign { target, value } => {
                    assert_eq!(target.name(), Some("y"));
                    assert_eq!(value.value(), Some(3));
                }
                other => panic!("Expected nested assignment, got {:?}", other),
            }
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_assignment_to_constant_is_rejected() {
    let err = parse_err(&in_function("3 = x;"));
    assert_eq!(err.token.kind, TokenKind::Assign);
    assert_eq!(err.line(), 3);
}

#[test]
fn test_assignment_to_call_is_rejected() {
    let err = parse_err(&in_function("f() = 1;"));
    assert_eq!(err.token.kind, TokenKind::Assign);
}

#[test]
fn test_assignment_to_parenthesized_variable_is_rejected() {
    let err = parse_err(&in_function("(x) = 1;"));
    assert_eq!(err.token.kind, TokenKind::Assign);
}

#[test]
fn test_assignment_to_indexed_variable() {
    let program = parse(&in_function("a[i + 1] = 5;"));

    match &body_of(&program)[0].kind {
        NodeKind::Assign { target, .. } => match &target.kind {
            NodeKind::Id {
                name,
                index: Some(index),
            } => {
                assert_eq!(name, "a");
                assert_eq!(index.binary_operator(), Some(Operator::Plus));
            }
            other => panic!("Expected indexed variable, got {:?}", other),
        },
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_relational_operators_do_not_chain() {
    let err = parse_err(&in_function("x = a < b < c;"));
    assert_eq!(err.token.kind, TokenKind::Lt);

    let program = parse(&in_function("x = a + 1 <= b * 2;"));
    match &body_of(&program)[0].kind {
        NodeKind::Assign { value, .. } => {
            assert_eq!(value.kind_name(), "SimpleExpr");
            assert_eq!(value.binary_operator(), Some(Operator::Le));
            assert_eq!(value.family(), NodeFamily::Statement);
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_array_and_scalar_declarations() {
    let program = parse("int a[10];\nint x;");

    let array = &program.declarations[0];
    assert!(matches!(array.kind, NodeKind::ArrayDecl { .. }));
    assert_eq!(array.size(), Some(10));
    assert!(!array.is_param());
    assert_eq!(array.decl_type(), Some(DeclType::Integer));

    let scalar = &program.declarations[1];
    assert!(matches!(scalar.kind, NodeKind::VarDecl { .. }));
    assert_eq!(scalar.size(), None);
    assert!(scalar.children().is_empty());
}

#[test]
fn test_function_with_void_parameters() {
    let program = parse("int f(void){}");

    match &program.declarations[0].kind {
        NodeKind::FuncDecl {
            name,
            return_type,
            params,
            body,
        } => {
            assert_eq!(name, "f");
            assert_eq!(*return_type, DeclType::Integer);
            assert!(params.is_empty());
            assert!(matches!(body.kind, NodeKind::Compound { .. }));
            assert!(body.children().is_empty());
        }
        other => panic!("Expected function, got {:?}", other),
    }
}

#[test]
fn test_parameters() {
    let program = parse("void sort(int a[], int low, int high) { }");

    match &program.declarations[0].kind {
        NodeKind::FuncDecl { params, .. } => {
            assert_eq!(params.len(), 3);
            assert!(matches!(params[0].kind, NodeKind::ArrayDecl { size: None, .. }));
            assert!(params.iter().all(|p| p.is_param()));
            assert_eq!(params[2].name(), Some("high"));
        }
        other => panic!("Expected function, got {:?}", other),
    }
}

#[test]
fn test_empty_parameter_list_needs_void() {
    let err = parse_err("int f() { }");
    assert_eq!(err.token.kind, TokenKind::RParen);
}

#[test]
fn test_sized_array_parameter_is_rejected() {
    let err = parse_err("int f(int a[10]) { }");
    assert_eq!(err.token.kind, TokenKind::Num);
}

#[test]
fn test_local_declarations_precede_statements() {
    let program = parse("void f(void) { int i; int buf[4]; i = 0; }");

    match &program.declarations[0].kind {
        NodeKind::FuncDecl { body, .. } => match &body.kind {
            NodeKind::Compound { locals, statements } => {
                assert_eq!(locals.len(), 2);
                assert_eq!(locals[1].size(), Some(4));
                assert_eq!(statements.len(), 1);
            }
            other => panic!("Expected compound, got {:?}", other),
        },
        other => panic!("Expected function, got {:?}", other),
    }

    // A declaration after a statement is not part of the grammar
    let err = parse_err("void f(void) { i = 0; int j; }");
    assert_eq!(err.token.kind, TokenKind::Int);
}

#[test]
fn test_missing_initializer_is_a_syntax_error() {
    let err = parse_err("int a;\n\nint x = ;");
    assert_eq!(err.line(), 3);
    assert_eq!(err.token.kind, TokenKind::Assign);
}

#[test]
fn test_empty_program_is_a_syntax_error() {
    let err = parse_err("/* nothing here */\n");
    assert_eq!(err.token.kind, TokenKind::EndFile);
}

#[test]
fn test_missing_closing_brace() {
    let err = parse_err("void f(void) {\n  x = 1;\n");
    assert_eq!(err.token.kind, TokenKind::EndFile);
    assert_eq!(err.line(), 2);
}

#[test]
fn test_end_of_file_is_on_last_source_line() {
    let err = parse_err("int main(void)\n{\n  return 0;\n");
    assert_eq!(err.token.kind, TokenKind::EndFile);
    assert_eq!(err.line(), 3);

    // A trailing declaration takes the line of end of file after its ';'
    let program = parse("int x;\nint y;\n");
    assert_eq!(program.declarations[1].line, 2);
}

#[test]
fn test_error_token_is_a_syntax_error() {
    let err = parse_err("int x;\n/* never closed");
    assert_eq!(err.token.kind, TokenKind::Error);
    assert_eq!(err.token.lexeme, COMMENT_ERROR);
    assert_eq!(err.line(), 2);

    let err = parse_err(&in_function("x = !y;"));
    assert_eq!(err.token.lexeme, "!");
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    let program = parse(&in_function("if (a) if (b) x = 1; else x = 2;"));

    match &body_of(&program)[0].kind {
        NodeKind::Selection {
            then_branch: Some(inner),
            else_branch: None,
            ..
        } => {
            assert!(matches!(
                inner.kind,
                NodeKind::Selection {
                    else_branch: Some(_),
                    ..
                }
            ));
        }
        other => panic!("Expected outer if without else, got {:?}", other),
    }
}

#[test]
fn test_empty_statements() {
    let program = parse(&in_function(";\nif (a) ; else x = 1;\nwhile (a) ;\n;"));

    let statements = body_of(&program);
    assert_eq!(statements.len(), 2);
    assert!(matches!(
        statements[0].kind,
        NodeKind::Selection {
            then_branch: None,
            else_branch: Some(_),
            ..
        }
    ));
    assert!(matches!(statements[1].kind, NodeKind::Iteration { body: None, .. }));
}

#[test]
fn test_return_without_value() {
    let program = parse(&in_function("return;"));
    assert!(matches!(body_of(&program)[0].kind, NodeKind::Return { value: None }));
}

#[test]
fn test_calls_and_arguments() {
    let program = parse(&in_function("output(a, b + 1, input());"));

    match &body_of(&program)[0].kind {
        NodeKind::Call { name, args } => {
            assert_eq!(name, "output");
            assert_eq!(args.len(), 3);
            assert!(matches!(&args[2].kind, NodeKind::Call { args, .. } if args.is_empty()));
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_line_attribution() {
    let source = "int g;\n\
                  int arr[5];\n\
                  int add(int a, int b[])\n\
                  {\n\
                  \x20 int t;\n\
                  \x20 t = a +\n\
                  \x20     b[0];\n\
                  \x20 return t;\n\
                  }\n";
    let program = parse(source);
    let decls = &program.declarations;

    // Scalars are created once their ';' is consumed, arrays once their '[' is
    assert_eq!(decls[0].line, 2);
    assert_eq!(decls[1].line, 2);

    let add = &decls[2];
    assert_eq!(add.line, 3);
    let (params, body) = match &add.kind {
        NodeKind::FuncDecl { params, body, .. } => (params, body),
        other => panic!("Expected function, got {:?}", other),
    };
    assert_eq!(params[0].line, 3);
    assert_eq!(params[1].line, 3);
    assert_eq!(body.line, 4);

    let (locals, statements) = match &body.kind {
        NodeKind::Compound { locals, statements } => (locals, statements),
        other => panic!("Expected compound, got {:?}", other),
    };
    // `int t;` ends on line 5, but the lookahead is already `t` on line 6
    assert_eq!(locals[0].line, 6);

    match &statements[0].kind {
        NodeKind::Assign { target, value } => {
            assert_eq!(statements[0].line, 6);
            assert_eq!(target.line, 6);
            assert_eq!(value.line, 6);
            match &value.kind {
                NodeKind::AdditiveExpr { left, op, right } => {
                    assert_eq!(left.line, 6);
                    assert_eq!(op.line, 6);
                    assert_eq!(right.line, 7);
                    assert_eq!(right.children()[0].line, 7);
                }
                other => panic!("Expected additive expression, got {:?}", other),
            }
        }
        other => panic!("Expected assignment, got {:?}", other),
    }

    let ret = &statements[1];
    assert_eq!(ret.line, 8);
    assert_eq!(ret.children()[0].line, 8);
}

#[test]
fn test_relational_nodes_take_line_after_operator() {
    let program = parse(&in_function("if (a <\n b) x = 1;"));

    match &body_of(&program)[0].kind {
        NodeKind::Selection { condition, .. } => {
            assert_eq!(condition.line, 4);
            assert_eq!(condition.children()[1].line, 4);
            assert_eq!(condition.children()[0].line, 3);
        }
        other => panic!("Expected if, got {:?}", other),
    }
}

#[test]
fn test_call_takes_line_after_open_paren() {
    let program = parse(&in_function("f\n(\n1);\ng(\n);"));
    let statements = body_of(&program);

    assert_eq!(statements[0].kind_name(), "Call");
    assert_eq!(statements[0].line, 5);
    assert_eq!(statements[0].children()[0].line, 5);

    assert_eq!(statements[1].name(), Some("g"));
    assert_eq!(statements[1].line, 7);
}

#[test]
fn test_term_takes_line_before_operator() {
    let program = parse(&in_function("x = a *\n b / c;"));

    let outer = match &body_of(&program)[0].kind {
        NodeKind::Assign { value, .. } => value,
        other => panic!("Expected assignment, got {:?}", other),
    };
    assert_eq!(outer.binary_operator(), Some(Operator::Over));
    assert_eq!(outer.line, 4);
    assert_eq!(outer.children()[1].line, 4);
    assert_eq!(outer.children()[2].line, 4);

    let inner = outer.children()[0];
    assert_eq!(inner.binary_operator(), Some(Operator::Times));
    let lines: Vec<usize> = std::iter::once(inner)
        .chain(inner.children())
        .map(|node| node.line)
        .collect();
    // Term, a, '*', b
    assert_eq!(lines, vec![3, 3, 3, 4]);
}

#[test]
fn test_selection_and_iteration_take_line_before_keyword() {
    let program = parse(&in_function("if\n(a) x = 1;\nwhile\n(b) ;"));
    let statements = body_of(&program);

    let selection = &statements[0];
    assert_eq!(selection.kind_name(), "SelectionStmt");
    assert_eq!(selection.line, 3);
    let children = selection.children();
    assert_eq!(children[0].line, 4);
    assert_eq!(children[1].line, 4);

    let iteration = &statements[1];
    assert_eq!(iteration.kind_name(), "IterationStmt");
    assert_eq!(iteration.line, 5);
    assert_eq!(iteration.children()[0].line, 6);
}

#[test]
fn test_assign_constant_and_index_lines() {
    let program = parse(&in_function("x\n=\n7;\ny = a\n[\ni];"));
    let statements = body_of(&program);

    // Assign after '=', target after its name, constant at its own token
    let first = &statements[0];
    assert_eq!(first.line, 5);
    assert_eq!(first.children()[0].line, 4);
    assert_eq!(first.children()[1].line, 5);
    assert_eq!(first.children()[1].value(), Some(7));

    // Indexed reference after '['
    let second = &statements[1];
    assert_eq!(second.line, 6);
    let target = second.children()[1];
    assert_eq!(target.name(), Some("a"));
    assert_eq!(target.line, 8);
    assert_eq!(target.children()[0].line, 8);
}

#[test]
fn test_parameter_takes_line_after_brackets() {
    let program = parse("int f(int a\n[\n]\n) { }");

    let func = &program.declarations[0];
    assert_eq!(func.line, 1);
    match &func.kind {
        NodeKind::FuncDecl { params, body, .. } => {
            assert_eq!(params[0].line, 4);
            assert_eq!(body.line, 4);
        }
        other => panic!("Expected function, got {:?}", other),
    }
}

#[test]
fn test_deep_parentheses_are_a_syntax_error() {
    let source = format!(
        "int f(void) {{ return {}1{}; }}",
        "(".repeat(10_000),
        ")".repeat(10_000)
    );
    let err = parse_err(&source);
    assert!(err.message.starts_with("nesting too deep"));
    assert_eq!(err.token.kind, TokenKind::LParen);
}

#[test]
fn test_deep_statements_are_a_syntax_error() {
    let blocks = format!("void f(void) {}{}", "{".repeat(10_000), "}".repeat(10_000));
    assert!(parse_err(&blocks).message.starts_with("nesting too deep"));

    let ifs = in_function(&format!("{};", "if (a) ".repeat(10_000)));
    assert!(parse_err(&ifs).message.starts_with("nesting too deep"));
}

#[test]
fn test_nesting_below_limit_is_accepted() {
    let levels = MAX_NESTING_DEPTH - 28;
    let source = format!(
        "int f(void) {{ return {}1{}; }}",
        "(".repeat(levels),
        ")".repeat(levels)
    );
    let program = parse(&source);
    match &body_of(&program)[0].kind {
        NodeKind::Return { value: Some(value) } => assert_eq!(value.value(), Some(1)),
        other => panic!("Expected return with value, got {:?}", other),
    }

    let blocks = format!(
        "void f(void) {}x = 1;{}",
        "{".repeat(levels),
        "}".repeat(levels)
    );
    assert!(Parser::new(&blocks).parse_program().is_ok());
}

#[test]
fn test_printing_is_idempotent() {
    let program = parse(
        "int v[3];\nint f(int x) { if (x > 0) return f(x - 1) * 2; else return 1; }\n",
    );
    let first = print_tree(&program.declarations);
    let second = print_tree(&program.declarations);
    assert_eq!(first, second);
    assert!(!first.is_empty());
}
