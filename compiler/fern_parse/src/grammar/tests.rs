#![allow(clippy::unwrap_used, clippy::expect_used)]

use fern_diagnostic::ErrorCode;
use fern_syntax::{SyntaxElement, SyntaxKind, SyntaxNode};
use pretty_assertions::assert_eq;

use crate::{parse, ParseOptions, SyntaxTree};

fn parse_clean(text: &str) -> SyntaxTree {
    let tree = parse(text, ParseOptions::default());
    assert_eq!(codes(&tree), vec![], "unexpected diagnostics for {text:?}");
    assert_eq!(tree.full_text(), text);
    tree
}

fn codes(tree: &SyntaxTree) -> Vec<(u32, ErrorCode)> {
    tree.diagnostics()
        .iter()
        .map(|d| (d.position(), d.code()))
        .collect()
}

fn statements(tree: &SyntaxTree) -> Vec<SyntaxNode> {
    tree.root()
        .child_node(0)
        .unwrap()
        .children()
        .map(|element| element.as_node().unwrap().clone())
        .collect()
}

fn first_statement(tree: &SyntaxTree) -> SyntaxNode {
    statements(tree).remove(0)
}

/// The expression of a leading expression statement.
fn expression(text: &str) -> SyntaxElement {
    let tree = parse_clean(text);
    let statement = first_statement(&tree);
    assert_eq!(statement.kind(), SyntaxKind::ExpressionStatement);
    statement.child(0).unwrap().clone()
}

/// Parenthesized rendering without trivia; missing tokens show as `?`.
fn render(element: &SyntaxElement) -> String {
    match element {
        SyntaxElement::Token(token) if token.is_missing() => "?".to_owned(),
        SyntaxElement::Token(token) => token.text().to_owned(),
        SyntaxElement::Node(node) => {
            let parts: Vec<String> = node.children().map(render).collect();
            format!("({})", parts.join(" "))
        }
    }
}

fn list_kinds(list: &SyntaxNode) -> Vec<SyntaxKind> {
    list.children()
        .filter_map(SyntaxElement::as_node)
        .map(SyntaxNode::kind)
        .collect()
}

// --- Statements ---

#[test]
fn variable_statement_structure() {
    let tree = parse_clean("var x: number = 1, y;");
    let statement = first_statement(&tree);
    assert_eq!(statement.kind(), SyntaxKind::VariableStatement);
    assert_eq!(statement.child_node(0).unwrap().child_count(), 0);

    let declaration = statement.child_node(1).unwrap();
    assert_eq!(declaration.kind(), SyntaxKind::VariableDeclaration);
    let declarators = declaration.child_node(1).unwrap();
    assert_eq!(declarators.kind(), SyntaxKind::SeparatedList);
    assert_eq!(declarators.child_count(), 3);

    let x = declarators.child_node(0).unwrap();
    assert_eq!(x.child_token(0).unwrap().text(), "x");
    assert_eq!(x.child_node(1).unwrap().kind(), SyntaxKind::TypeAnnotation);
    assert_eq!(x.child_node(2).unwrap().kind(), SyntaxKind::EqualsValueClause);

    let y = declarators.child_node(2).unwrap();
    assert_eq!(y.child_count(), 1);
}

#[test]
fn control_flow_statements() {
    let tree = parse_clean(
        "label: while (true) { break label; }\n\
         if (a) b; else c;\n\
         do x++; while (x < 3)\n\
         switch (k) { case 1: y; default: z; }\n\
         try { } catch (e) { } finally { }\n\
         debugger;",
    );
    let kinds: Vec<SyntaxKind> = statements(&tree).iter().map(SyntaxNode::kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::LabeledStatement,
            SyntaxKind::IfStatement,
            SyntaxKind::DoStatement,
            SyntaxKind::SwitchStatement,
            SyntaxKind::TryStatement,
            SyntaxKind::DebuggerStatement,
        ]
    );
    let switch = &statements(&tree)[3];
    assert_eq!(
        list_kinds(switch.child_node(5).unwrap()),
        vec![SyntaxKind::CaseSwitchClause, SyntaxKind::DefaultSwitchClause]
    );
}

#[test]
fn for_and_for_in() {
    let tree = parse_clean("for (var i = 0; i < n; i++) {}");
    let statement = first_statement(&tree);
    assert_eq!(statement.kind(), SyntaxKind::ForStatement);
    assert_eq!(
        statement.child_node(2).unwrap().kind(),
        SyntaxKind::VariableDeclaration
    );
    assert!(statement.child(3).is_none());

    let tree = parse_clean("for (var k in obj) {}");
    let statement = first_statement(&tree);
    assert_eq!(statement.kind(), SyntaxKind::ForInStatement);
    assert!(statement.child(3).is_none());
    assert_eq!(statement.child_token(4).unwrap().kind(), SyntaxKind::InKeyword);

    let tree = parse_clean("for (k in obj) ;");
    let statement = first_statement(&tree);
    assert_eq!(statement.kind(), SyntaxKind::ForInStatement);
    assert!(statement.child(2).is_none());
    assert_eq!(statement.child_token(3).unwrap().text(), "k");
}

#[test]
fn use_strict_prologue() {
    let tree = parse_clean("'use strict'; var x;");
    let statements = statements(&tree);
    assert!(!statements[0].parsed_in_strict_mode());
    assert!(statements[1].parsed_in_strict_mode());
    assert!(!tree.root().parsed_in_strict_mode());
}

#[test]
fn strict_mode_of_a_function_body_ends_with_it() {
    let tree = parse_clean("function f() { 'use strict'; var a; } var b;");
    let statements = statements(&tree);
    let body = statements[0].child_node(4).unwrap();
    let inner = body.child_node(1).unwrap().child_node(1).unwrap();
    assert_eq!(inner.kind(), SyntaxKind::VariableStatement);
    assert!(inner.parsed_in_strict_mode());
    assert!(!statements[1].parsed_in_strict_mode());
}

#[test]
fn directive_after_a_statement_is_not_a_prologue() {
    let tree = parse_clean("x; 'use strict'; var y;");
    assert!(statements(&tree).iter().all(|s| !s.parsed_in_strict_mode()));
}

// --- Expressions ---

#[test]
fn binary_precedence_and_right_associative_assignment() {
    assert_eq!(
        render(&expression("a = b = c + d * e;")),
        "(a = (b = (c + (d * e))))"
    );
    assert_eq!(render(&expression("a - b - c;")), "((a - b) - c)");
}

#[test]
fn conditional_binds_looser_than_logical_or() {
    assert_eq!(
        render(&expression("x = a || b ? c : d;")),
        "(x = ((a || b) ? c : d))"
    );
}

#[test]
fn greater_than_tokens_merge_in_operator_position() {
    assert_eq!(render(&expression("a >> b;")), "(a >> b)");
    assert_eq!(render(&expression("a >>>= b;")), "(a >>>= b)");
    assert_eq!(render(&expression("a > b;")), "(a > b)");
}

#[test]
fn nested_generic_types_close_with_adjacent_greater_thans() {
    let tree = parse_clean("var x: Array<Array<number>>;");
    let declarator = first_statement(&tree)
        .child_node(1)
        .unwrap()
        .child_node(1)
        .unwrap()
        .child_node(0)
        .unwrap()
        .clone();
    let ty = declarator.child_node(1).unwrap().child_node(1).unwrap();
    assert_eq!(ty.kind(), SyntaxKind::GenericType);
}

#[test]
fn slash_is_divide_after_an_operand_and_regex_elsewhere() {
    assert_eq!(render(&expression("x = a / b / c;")), "(x = ((a / b) / c))");
    assert_eq!(render(&expression("x = /ab+c/g;")), "(x = /ab+c/g)");
    let regex = expression("/a/.test(s);");
    assert_eq!(regex.as_node().unwrap().kind(), SyntaxKind::InvocationExpression);
}

#[test]
fn slash_after_a_statement_header_starts_a_regex() {
    for text in [
        "if (a) /x/.test(s);",
        "while (a) /x/g.exec(s);",
        "for (;;) /x/;",
        "for (k in o) /x/;",
    ] {
        let tree = parse_clean(text);
        let regexes = tree
            .tokens()
            .filter(|(_, token)| token.kind() == SyntaxKind::RegularExpressionLiteral)
            .count();
        assert_eq!(regexes, 1, "{text:?}");
    }
}

#[test]
fn arrow_functions_and_parenthesized_expressions() {
    let right = |text: &str| expression(text).as_node().unwrap().child(2).unwrap().kind();
    assert_eq!(
        right("f = (a, b) => a + b;"),
        SyntaxKind::ParenthesizedArrowFunctionExpression
    );
    assert_eq!(right("f = () => {};"), SyntaxKind::ParenthesizedArrowFunctionExpression);
    assert_eq!(right("f = (a) => a;"), SyntaxKind::ParenthesizedArrowFunctionExpression);
    assert_eq!(right("f = x => x;"), SyntaxKind::SimpleArrowFunctionExpression);
    assert_eq!(right("f = (a + b) * c;"), SyntaxKind::BinaryExpression);
    assert_eq!(
        expression("(x);").as_node().unwrap().kind(),
        SyntaxKind::ParenthesizedExpression
    );
}

#[test]
fn type_assertion_is_not_an_arrow() {
    assert_eq!(render(&expression("x = <number>y;")), "(x = (< number > y))");
}

#[test]
fn object_and_array_literals() {
    let object = expression("o = { a: 1, m() { }, get g() { return 2; }, };");
    let literal = object.as_node().unwrap().child_node(2).unwrap().clone();
    assert_eq!(literal.kind(), SyntaxKind::ObjectLiteralExpression);
    assert_eq!(
        list_kinds(literal.child_node(1).unwrap()),
        vec![
            SyntaxKind::SimplePropertyAssignment,
            SyntaxKind::FunctionPropertyAssignment,
            SyntaxKind::GetAccessor,
        ]
    );

    let array = expression("a = [1, , 2];");
    let literal = array.as_node().unwrap().child_node(2).unwrap().clone();
    assert_eq!(render(&SyntaxElement::Node(literal)), "([ (1 , () , 2) ])");
}

#[test]
fn member_access_calls_and_new() {
    let call = expression("x = new Foo(1).baz;");
    let member = call.as_node().unwrap().child_node(2).unwrap().clone();
    assert_eq!(member.kind(), SyntaxKind::MemberAccessExpression);
    assert_eq!(
        member.child_node(0).unwrap().kind(),
        SyntaxKind::ObjectCreationExpression
    );
    assert_eq!(
        expression("a.b[c](d);").as_node().unwrap().kind(),
        SyntaxKind::InvocationExpression
    );
}

// --- Declarations ---

#[test]
fn class_declaration_elements() {
    let tree = parse_clean(
        "class C<T> extends B implements I, J {\n\
         constructor(x: T) {}\n\
         private m(): void {}\n\
         get p() { return 1; }\n\
         static v = 1;\n\
         }",
    );
    let class = first_statement(&tree);
    assert_eq!(class.kind(), SyntaxKind::ClassDeclaration);
    assert_eq!(
        class.child_node(3).unwrap().kind(),
        SyntaxKind::TypeParameterList
    );
    assert_eq!(
        list_kinds(class.child_node(4).unwrap()),
        vec![SyntaxKind::HeritageClause, SyntaxKind::HeritageClause]
    );
    assert_eq!(
        list_kinds(class.child_node(6).unwrap()),
        vec![
            SyntaxKind::ConstructorDeclaration,
            SyntaxKind::MemberFunctionDeclaration,
            SyntaxKind::GetAccessor,
            SyntaxKind::MemberVariableDeclaration,
        ]
    );
}

#[test]
fn interface_members() {
    let tree = parse_clean(
        "interface I extends J { x: number; m?(a): string; [key: string]: any; new (): I; (): void }",
    );
    let interface = first_statement(&tree);
    assert_eq!(interface.kind(), SyntaxKind::InterfaceDeclaration);
    let body = interface.child_node(5).unwrap();
    assert_eq!(
        list_kinds(body.child_node(1).unwrap()),
        vec![
            SyntaxKind::PropertySignature,
            SyntaxKind::MethodSignature,
            SyntaxKind::IndexSignature,
            SyntaxKind::ConstructSignature,
            SyntaxKind::CallSignature,
        ]
    );
}

#[test]
fn enum_with_trailing_comma() {
    let tree = parse_clean("enum Color { Red, Green = 2, Blue, }");
    let declaration = first_statement(&tree);
    assert_eq!(declaration.kind(), SyntaxKind::EnumDeclaration);
    assert_eq!(declaration.child_node(4).unwrap().child_count(), 6);
}

#[test]
fn dotted_module_with_exported_class() {
    let tree = parse_clean("module A.B.C { export class D {} }");
    let module = first_statement(&tree);
    assert_eq!(module.kind(), SyntaxKind::ModuleDeclaration);
    assert_eq!(render(module.child(2).unwrap()), "((A . B) . C)");
    let class = module.child_node(4).unwrap().child_node(0).unwrap();
    assert_eq!(class.kind(), SyntaxKind::ClassDeclaration);
    assert_eq!(class.child_node(0).unwrap().child_count(), 1);
}

#[test]
fn module_as_an_identifier() {
    let statement = expression("module = 1;");
    assert_eq!(render(&statement), "(module = 1)");
}

// --- Recovery ---

#[test]
fn hole_in_an_argument_list_is_a_missing_identifier() {
    let tree = parse("f(a,,b);", ParseOptions::default());
    assert_eq!(codes(&tree), vec![(4, ErrorCode::E1002)]);
}

#[test]
fn trailing_comma_in_an_argument_list() {
    let tree = parse("f(a,);", ParseOptions::default());
    assert_eq!(codes(&tree), vec![(3, ErrorCode::E1006)]);
}

#[test]
fn empty_variable_declaration() {
    let tree = parse("var ;", ParseOptions::default());
    assert_eq!(codes(&tree), vec![(4, ErrorCode::E1007)]);
    assert_eq!(
        tree.diagnostics()[0].message(),
        "'identifier' list cannot be empty."
    );
}

#[test]
fn empty_required_lists_name_their_items() {
    let tree = parse("class C<> {}", ParseOptions::default());
    let messages: Vec<String> = tree
        .diagnostics()
        .iter()
        .filter(|d| d.code() == ErrorCode::E1007)
        .map(fern_diagnostic::Diagnostic::message)
        .collect();
    assert_eq!(messages, vec!["'type parameter' list cannot be empty."]);
    assert_eq!(tree.full_text(), "class C<> {}");
}

#[test]
fn throw_followed_by_a_line_break() {
    let tree = parse("throw\nx;", ParseOptions::default());
    assert_eq!(codes(&tree), vec![(6, ErrorCode::E1002)]);
    let kinds: Vec<SyntaxKind> = statements(&tree).iter().map(SyntaxNode::kind).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::ThrowStatement, SyntaxKind::ExpressionStatement]
    );
}

#[test]
fn line_break_before_an_arrow() {
    let tree = parse("f = x\n=> x;", ParseOptions::default());
    assert_eq!(codes(&tree), vec![(6, ErrorCode::E1008)]);
    assert_eq!(statements(&tree).len(), 1);
}
