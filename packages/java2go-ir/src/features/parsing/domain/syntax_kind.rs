//! Closed set of Java grammar node kinds

/// Java syntax node kind
///
/// Named grammar nodes the translator knows about get their own variant;
/// anonymous tokens (keywords, operators, punctuation) are `Token`, and any
/// other named node is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // Compilation unit
    Program,
    PackageDeclaration,
    ImportDeclaration,

    // Type declarations
    ClassDeclaration,
    InterfaceDeclaration,
    EnumDeclaration,
    RecordDeclaration,
    AnnotationTypeDeclaration,
    ClassBody,
    InterfaceBody,
    EnumBody,
    EnumBodyDeclarations,
    EnumConstant,
    Superclass,
    SuperInterfaces,
    ExtendsInterfaces,
    TypeList,
    TypeParameters,
    TypeParameter,
    TypeBound,
    Modifiers,
    MarkerAnnotation,
    Annotation,

    // Members
    FieldDeclaration,
    ConstantDeclaration,
    MethodDeclaration,
    ConstructorDeclaration,
    CompactConstructorDeclaration,
    ConstructorBody,
    ExplicitConstructorInvocation,
    StaticInitializer,
    FormalParameters,
    FormalParameter,
    SpreadParameter,
    ReceiverParameter,
    VariableDeclarator,
    Throws,
    Dimensions,

    // Types
    VoidType,
    IntegralType,
    FloatingPointType,
    BooleanType,
    TypeIdentifier,
    ScopedTypeIdentifier,
    GenericType,
    ArrayType,
    TypeArguments,
    Wildcard,

    // Statements
    Block,
    LocalVariableDeclaration,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    ForStatement,
    EnhancedForStatement,
    DoStatement,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ThrowStatement,
    TryStatement,
    TryWithResourcesStatement,
    ResourceSpecification,
    Resource,
    CatchClause,
    CatchFormalParameter,
    CatchType,
    FinallyClause,
    SwitchBlock,
    SwitchBlockStatementGroup,
    SwitchRule,
    SwitchLabel,
    YieldStatement,
    LabeledStatement,
    AssertStatement,
    SynchronizedStatement,

    // Expressions
    AssignmentExpression,
    BinaryExpression,
    UnaryExpression,
    UpdateExpression,
    InstanceofExpression,
    TernaryExpression,
    CastExpression,
    LambdaExpression,
    InferredParameters,
    SwitchExpression,
    MethodInvocation,
    ArgumentList,
    ObjectCreationExpression,
    ArrayCreationExpression,
    DimensionsExpr,
    ArrayInitializer,
    ArrayAccess,
    FieldAccess,
    MethodReference,
    ParenthesizedExpression,
    ClassLiteral,
    This,
    Super,
    Identifier,

    // Literals
    DecimalIntegerLiteral,
    HexIntegerLiteral,
    OctalIntegerLiteral,
    BinaryIntegerLiteral,
    DecimalFloatingPointLiteral,
    HexFloatingPointLiteral,
    True,
    False,
    CharacterLiteral,
    StringLiteral,
    TextBlock,
    NullLiteral,

    // Trivia
    LineComment,
    BlockComment,
    Error,

    /// Anonymous token (keyword, operator, punctuation)
    Token(&'static str),
    /// Named node with no dedicated variant
    Other(&'static str),
}

impl SyntaxKind {
    /// Classify a tree-sitter node kind
    pub fn from_raw(raw: &'static str, named: bool) -> Self {
        if !named {
            return SyntaxKind::Token(raw);
        }
        match raw {
            "program" => SyntaxKind::Program,
            "package_declaration" => SyntaxKind::PackageDeclaration,
            "import_declaration" => SyntaxKind::ImportDeclaration,
            "class_declaration" => SyntaxKind::ClassDeclaration,
            "interface_declaration" => SyntaxKind::InterfaceDeclaration,
            "enum_declaration" => SyntaxKind::EnumDeclaration,
            "record_declaration" => SyntaxKind::RecordDeclaration,
            "annotation_type_declaration" => SyntaxKind::AnnotationTypeDeclaration,
            "class_body" => SyntaxKind::ClassBody,
            "interface_body" => SyntaxKind::InterfaceBody,
            "enum_body" => SyntaxKind::EnumBody,
            "enum_body_declarations" => SyntaxKind::EnumBodyDeclarations,
            "enum_constant" => SyntaxKind::EnumConstant,
            "superclass" => SyntaxKind::Superclass,
            "super_interfaces" => SyntaxKind::SuperInterfaces,
            "extends_interfaces" => SyntaxKind::ExtendsInterfaces,
            "type_list" => SyntaxKind::TypeList,
            "type_parameters" => SyntaxKind::TypeParameters,
            "type_parameter" => SyntaxKind::TypeParameter,
            "type_bound" => SyntaxKind::TypeBound,
            "modifiers" => SyntaxKind::Modifiers,
            "marker_annotation" => SyntaxKind::MarkerAnnotation,
            "annotation" => SyntaxKind::Annotation,
            "field_declaration" => SyntaxKind::FieldDeclaration,
            "constant_declaration" => SyntaxKind::ConstantDeclaration,
            "method_declaration" => SyntaxKind::MethodDeclaration,
            "constructor_declaration" => SyntaxKind::ConstructorDeclaration,
            "compact_constructor_declaration" => SyntaxKind::CompactConstructorDeclaration,
            "constructor_body" => SyntaxKind::ConstructorBody,
            "explicit_constructor_invocation" => SyntaxKind::ExplicitConstructorInvocation,
            "static_initializer" => SyntaxKind::StaticInitializer,
            "formal_parameters" => SyntaxKind::FormalParameters,
            "formal_parameter" => SyntaxKind::FormalParameter,
            "spread_parameter" => SyntaxKind::SpreadParameter,
            "receiver_parameter" => SyntaxKind::ReceiverParameter,
            "variable_declarator" => SyntaxKind::VariableDeclarator,
            "throws" => SyntaxKind::Throws,
            "dimensions" => SyntaxKind::Dimensions,
            "void_type" => SyntaxKind::VoidType,
            "integral_type" => SyntaxKind::IntegralType,
            "floating_point_type" => SyntaxKind::FloatingPointType,
            "boolean_type" => SyntaxKind::BooleanType,
            "type_identifier" => SyntaxKind::TypeIdentifier,
            "scoped_type_identifier" => SyntaxKind::ScopedTypeIdentifier,
            "generic_type" => SyntaxKind::GenericType,
            "array_type" => SyntaxKind::ArrayType,
            "type_arguments" => SyntaxKind::TypeArguments,
            "wildcard" => SyntaxKind::Wildcard,
            "block" => SyntaxKind::Block,
            "local_variable_declaration" => SyntaxKind::LocalVariableDeclaration,
            "expression_statement" => SyntaxKind::ExpressionStatement,
            "if_statement" => SyntaxKind::IfStatement,
            "while_statement" => SyntaxKind::WhileStatement,
            "for_statement" => SyntaxKind::ForStatement,
            "enhanced_for_statement" => SyntaxKind::EnhancedForStatement,
            "do_statement" => SyntaxKind::DoStatement,
            "return_statement" => SyntaxKind::ReturnStatement,
            "break_statement" => SyntaxKind::BreakStatement,
            "continue_statement" => SyntaxKind::ContinueStatement,
            "throw_statement" => SyntaxKind::ThrowStatement,
            "try_statement" => SyntaxKind::TryStatement,
            "try_with_resources_statement" => SyntaxKind::TryWithResourcesStatement,
            "resource_specification" => SyntaxKind::ResourceSpecification,
            "resource" => SyntaxKind::Resource,
            "catch_clause" => SyntaxKind::CatchClause,
            "catch_formal_parameter" => SyntaxKind::CatchFormalParameter,
            "catch_type" => SyntaxKind::CatchType,
            "finally_clause" => SyntaxKind::FinallyClause,
            "switch_block" => SyntaxKind::SwitchBlock,
            "switch_block_statement_group" => SyntaxKind::SwitchBlockStatementGroup,
            "switch_rule" => SyntaxKind::SwitchRule,
            "switch_label" => SyntaxKind::SwitchLabel,
            "yield_statement" => SyntaxKind::YieldStatement,
            "labeled_statement" => SyntaxKind::LabeledStatement,
            "assert_statement" => SyntaxKind::AssertStatement,
            "synchronized_statement" => SyntaxKind::SynchronizedStatement,
            "assignment_expression" => SyntaxKind::AssignmentExpression,
            "binary_expression" => SyntaxKind::BinaryExpression,
            "unary_expression" => SyntaxKind::UnaryExpression,
            "update_expression" => SyntaxKind::UpdateExpression,
            "instanceof_expression" => SyntaxKind::InstanceofExpression,
            "ternary_expression" => SyntaxKind::TernaryExpression,
            "cast_expression" => SyntaxKind::CastExpression,
            "lambda_expression" => SyntaxKind::LambdaExpression,
            "inferred_parameters" => SyntaxKind::InferredParameters,
            "switch_expression" => SyntaxKind::SwitchExpression,
            "method_invocation" => SyntaxKind::MethodInvocation,
            "argument_list" => SyntaxKind::ArgumentList,
            "object_creation_expression" => SyntaxKind::ObjectCreationExpression,
            "array_creation_expression" => SyntaxKind::ArrayCreationExpression,
            "dimensions_expr" => SyntaxKind::DimensionsExpr,
            "array_initializer" => SyntaxKind::ArrayInitializer,
            "array_access" => SyntaxKind::ArrayAccess,
            "field_access" => SyntaxKind::FieldAccess,
            "method_reference" => SyntaxKind::MethodReference,
            "parenthesized_expression" => SyntaxKind::ParenthesizedExpression,
            "class_literal" => SyntaxKind::ClassLiteral,
            "this" => SyntaxKind::This,
            "super" => SyntaxKind::Super,
            "identifier" => SyntaxKind::Identifier,
            "decimal_integer_literal" => SyntaxKind::DecimalIntegerLiteral,
            "hex_integer_literal" => SyntaxKind::HexIntegerLiteral,
            "octal_integer_literal" => SyntaxKind::OctalIntegerLiteral,
            "binary_integer_literal" => SyntaxKind::BinaryIntegerLiteral,
            "decimal_floating_point_literal" => SyntaxKind::DecimalFloatingPointLiteral,
            "hex_floating_point_literal" => SyntaxKind::HexFloatingPointLiteral,
            "true" => SyntaxKind::True,
            "false" => SyntaxKind::False,
            "character_literal" => SyntaxKind::CharacterLiteral,
            "string_literal" => SyntaxKind::StringLiteral,
            "text_block" => SyntaxKind::TextBlock,
            "null_literal" => SyntaxKind::NullLiteral,
            "line_comment" => SyntaxKind::LineComment,
            "block_comment" => SyntaxKind::BlockComment,
            "ERROR" => SyntaxKind::Error,
            other => SyntaxKind::Other(other),
        }
    }

    /// Type declarations that own a body of members
    pub fn is_type_declaration(&self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::EnumDeclaration
                | SyntaxKind::RecordDeclaration
                | SyntaxKind::AnnotationTypeDeclaration
        )
    }

    /// Nodes that denote a type expression
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            SyntaxKind::VoidType
                | SyntaxKind::IntegralType
                | SyntaxKind::FloatingPointType
                | SyntaxKind::BooleanType
                | SyntaxKind::TypeIdentifier
                | SyntaxKind::ScopedTypeIdentifier
                | SyntaxKind::GenericType
                | SyntaxKind::ArrayType
        )
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, SyntaxKind::LineComment | SyntaxKind::BlockComment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_nodes_are_tokens() {
        assert_eq!(SyntaxKind::from_raw("this", false), SyntaxKind::Token("this"));
        assert_eq!(SyntaxKind::from_raw("this", true), SyntaxKind::This);
    }

    #[test]
    fn test_unknown_named_kind() {
        let kind = SyntaxKind::from_raw("template_expression", true);
        assert_eq!(kind, SyntaxKind::Other("template_expression"));
        assert!(!kind.is_type_declaration());
        assert!(SyntaxKind::ArrayType.is_type());
    }
}
