//! Closed set of node kinds the engine distinguishes.

use serde::Serialize;

/// Kind tag of a syntax node.
///
/// Grammar constructs that no rule inspects collapse into [`NodeKind::Other`];
/// recovery nodes emitted by the parser become [`NodeKind::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// Root of a source file
    Program,
    /// `function f() {}`
    FunctionDeclaration,
    /// `function () {}` used as a value
    FunctionExpression,
    /// `(a) => a`
    ArrowFunction,
    /// Class method
    MethodDefinition,
    /// `class C {}`
    ClassDeclaration,
    /// Body of a class
    ClassBody,
    /// `{ ... }` statement block
    StatementBlock,
    /// `return x;`
    ReturnStatement,
    /// `x;`
    ExpressionStatement,
    /// `const x = 1;` / `var x = 1;`
    VariableDeclaration,
    /// `x = 1` inside a declaration
    VariableDeclarator,
    /// `new X()`
    NewExpression,
    /// `f()`
    CallExpression,
    /// Argument list of a call or construction
    Arguments,
    /// `a.b`
    MemberExpression,
    /// `a[b]`
    SubscriptExpression,
    /// `this`
    ThisExpression,
    /// `a = b`
    AssignmentExpression,
    /// `a += b`
    AugmentedAssignmentExpression,
    /// `a + b`
    BinaryExpression,
    /// `(a)`
    ParenthesizedExpression,
    /// Plain identifier
    Identifier,
    /// Identifier in property position
    PropertyIdentifier,
    /// Identifier in type position
    TypeIdentifier,
    /// String literal
    StringLiteral,
    /// Numeric literal
    NumberLiteral,
    /// Template literal
    TemplateString,
    /// `...x`
    SpreadElement,
    /// `<A>...</A>`
    JsxElement,
    /// `<A ...>`
    JsxOpeningElement,
    /// `</A>`
    JsxClosingElement,
    /// `<A ... />`
    JsxSelfClosingElement,
    /// `name="value"` on a JSX element
    JsxAttribute,
    /// `{expr}` inside JSX
    JsxExpression,
    /// Text between JSX tags
    JsxText,
    /// `interface I {}`
    InterfaceDeclaration,
    /// Member list of an interface
    InterfaceBody,
    /// `{ a: string }` type literal
    ObjectType,
    /// `a: T` member
    PropertySignature,
    /// `a(): T` member
    MethodSignature,
    /// `[k: string]: T` member
    IndexSignature,
    /// `(): T` member
    CallSignature,
    /// `new (): T` member
    ConstructSignature,
    /// `: T`
    TypeAnnotation,
    /// `() => T` type
    FunctionType,
    /// `A | B` type
    UnionType,
    /// Line or block comment
    Comment,
    /// Parser recovery node
    Error,
    /// Any construct the rules do not distinguish
    Other,
}

impl NodeKind {
    /// Map a tree-sitter grammar node name onto a kind.
    #[must_use]
    pub fn from_grammar(name: &str) -> Self {
        match name {
            "program" => Self::Program,
            "function_declaration" | "generator_function_declaration" => {
                Self::FunctionDeclaration
            }
            "function_expression" | "function" | "generator_function" => Self::FunctionExpression,
            "arrow_function" => Self::ArrowFunction,
            "method_definition" => Self::MethodDefinition,
            "class_declaration" | "class" | "abstract_class_declaration" => {
                Self::ClassDeclaration
            }
            "class_body" => Self::ClassBody,
            "statement_block" => Self::StatementBlock,
            "return_statement" => Self::ReturnStatement,
            "expression_statement" => Self::ExpressionStatement,
            "lexical_declaration" | "variable_declaration" => Self::VariableDeclaration,
            "variable_declarator" => Self::VariableDeclarator,
            "new_expression" => Self::NewExpression,
            "call_expression" => Self::CallExpression,
            "arguments" => Self::Arguments,
            "member_expression" => Self::MemberExpression,
            "subscript_expression" => Self::SubscriptExpression,
            "this" => Self::ThisExpression,
            "assignment_expression" => Self::AssignmentExpression,
            "augmented_assignment_expression" => Self::AugmentedAssignmentExpression,
            "binary_expression" => Self::BinaryExpression,
            "parenthesized_expression" => Self::ParenthesizedExpression,
            "identifier" | "shorthand_property_identifier" => Self::Identifier,
            "property_identifier" => Self::PropertyIdentifier,
            "type_identifier" => Self::TypeIdentifier,
            "string" => Self::StringLiteral,
            "number" => Self::NumberLiteral,
            "template_string" => Self::TemplateString,
            "spread_element" => Self::SpreadElement,
            "jsx_element" => Self::JsxElement,
            "jsx_opening_element" => Self::JsxOpeningElement,
            "jsx_closing_element" => Self::JsxClosingElement,
            "jsx_self_closing_element" => Self::JsxSelfClosingElement,
            "jsx_attribute" => Self::JsxAttribute,
            "jsx_expression" => Self::JsxExpression,
            "jsx_text" => Self::JsxText,
            "interface_declaration" => Self::InterfaceDeclaration,
            "interface_body" => Self::InterfaceBody,
            "object_type" => Self::ObjectType,
            "property_signature" => Self::PropertySignature,
            "method_signature" => Self::MethodSignature,
            "index_signature" => Self::IndexSignature,
            "call_signature" => Self::CallSignature,
            "construct_signature" => Self::ConstructSignature,
            "type_annotation" => Self::TypeAnnotation,
            "function_type" => Self::FunctionType,
            "union_type" => Self::UnionType,
            "comment" | "html_comment" => Self::Comment,
            "ERROR" => Self::Error,
            _ => Self::Other,
        }
    }

    /// Whether this kind is trivia rather than code.
    #[must_use]
    pub const fn is_comment(self) -> bool {
        matches!(self, Self::Comment)
    }

    /// Whether this kind opens a JSX element and therefore carries attributes.
    #[must_use]
    pub const fn is_jsx_opening_like(self) -> bool {
        matches!(self, Self::JsxOpeningElement | Self::JsxSelfClosingElement)
    }
}
