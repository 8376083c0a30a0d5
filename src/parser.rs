use crate::ast::{
    AssignExpression, AssignOperator, BinaryExpression, BinaryOperator, Block, CallExpression,
    Definition, Expression, ForStatement, ForeachStatement, IfStatement, LoopBody, Program,
    RepeatStatement, Statement, UnaryExpression, UnaryOperator, WhileStatement,
};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use crate::value::Value;
use custom_error::custom_error;
use log::trace;
use std::sync::Arc;

custom_error! {
    #[derive(Clone, PartialEq)]
    pub SyntaxError

    Unexpected{row: usize, col: usize, lexeme: String, expected: String} = "syntax error at {row}:{col}: expected {expected}, found `{lexeme}`",
    Illegal{row: usize, col: usize, lexeme: String} = "syntax error at {row}:{col}: unrecognized input `{lexeme}`",
    InvalidNumber{row: usize, col: usize, lexeme: String} = "syntax error at {row}:{col}: invalid number `{lexeme}`",
    UnexpectedEnd{expected: String} = "syntax error: unexpected end of input, expected {expected}",
    TooDeep{row: usize, col: usize, limit: usize} = "syntax error at {row}:{col}: nesting deeper than {limit} levels",
}

impl SyntaxError {
    fn unexpected(token: &Token, expected: &str) -> Self {
        if token.is(TokenKind::Illegal) {
            Self::Illegal {
                row: token.row,
                col: token.col,
                lexeme: token.lexeme.clone(),
            }
        } else {
            Self::Unexpected {
                row: token.row,
                col: token.col,
                lexeme: token.lexeme.clone(),
                expected: expected.to_owned(),
            }
        }
    }
}

type Result<T> = std::result::Result<T, SyntaxError>;

/// Statements and expressions nested deeper than this are rejected, so that
/// parsing and evaluation stay within the stack.
pub static MAX_NESTING: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Logical,
    Comparison,
    Sum,
    Product,
    Power,
    Member,
    Index,
    Prefix,
}

impl From<BinaryOperator> for Precedence {
    fn from(operator: BinaryOperator) -> Self {
        use BinaryOperator::*;

        match operator {
            And | Or => Self::Logical,
            Eq | NotEq | Ge | Gt | Le | Lt => Self::Comparison,
            Plus | Minus => Self::Sum,
            Asterisk | Slash | Percent => Self::Product,
            Caret => Self::Power,
            Dot => Self::Member,
            Index => Self::Index,
        }
    }
}

/// Lexes and parses a whole source text.
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(Lexer::new(source.to_owned())).parse_program()
}

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        let tokens = lexer.tokenize();
        trace!("lexed {} tokens", tokens.len());

        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Runs `f` one nesting level deeper, failing once [`MAX_NESTING`] is
    /// reached.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING {
            let (row, col) = self.current().map_or((0, 0), |t| (t.row, t.col));
            return Err(SyntaxError::TooDeep {
                row,
                col,
                limit: MAX_NESTING,
            });
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position + 1)
    }

    fn current_is(&self, test: impl Fn(&Token) -> bool) -> bool {
        self.current().map_or(false, test)
    }

    /// Takes the current token, failing at end of input.
    fn next_token(&mut self, expected: &str) -> Result<Token> {
        let token = self
            .tokens
            .get(self.position)
            .cloned()
            .ok_or_else(|| SyntaxError::UnexpectedEnd {
                expected: expected.to_owned(),
            })?;
        self.position += 1;
        Ok(token)
    }

    /// Advances past the current token only if it satisfies `test`.
    fn consume(&mut self, expected: &str, test: impl Fn(&Token) -> bool) -> Result<Token> {
        match self.current() {
            Some(token) if !test(token) => Err(SyntaxError::unexpected(token, expected)),
            _ => self.next_token(expected),
        }
    }

    fn expect_symbol(&mut self, symbol: &str) -> Result<()> {
        self.consume(&format!("`{}`", symbol), |t| t.is_symbol(symbol))
            .map(|_| ())
    }

    fn expect_identifier(&mut self) -> Result<String> {
        self.consume("an identifier", |t| t.is(TokenKind::Identifier))
            .map(|t| t.lexeme)
    }

    pub fn parse_program(mut self) -> Result<Program> {
        let mut program = Program::default();

        while self.current().is_some() {
            program.statements.push(self.parse_statement()?);
        }

        trace!("parsed {} top-level statements", program.statements.len());
        Ok(program)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        self.nested(Self::parse_nested_statement)
    }

    fn parse_nested_statement(&mut self) -> Result<Statement> {
        let token = match self.current() {
            Some(token) => token.clone(),
            None => {
                return Err(SyntaxError::UnexpectedEnd {
                    expected: "a statement".to_owned(),
                })
            }
        };

        match (token.kind, token.lexeme.as_str()) {
            (TokenKind::Symbol, "{") => Ok(Statement::Block(self.parse_block()?)),
            (TokenKind::Symbol, ";") => {
                self.position += 1;
                Ok(Statement::Empty)
            }
            (TokenKind::Keyword, "if") => self.parse_if_statement().map(Statement::If),
            (TokenKind::Keyword, "while") => self.parse_while_statement().map(Statement::While),
            (TokenKind::Keyword, "for") => self.parse_for_statement(),
            (TokenKind::Keyword, "repeat") => {
                self.parse_repeat_statement().map(Statement::Repeat)
            }
            (TokenKind::Keyword, "def")
                if self.peek().map_or(false, |t| t.is(TokenKind::Identifier)) =>
            {
                self.parse_definition().map(Statement::Definition)
            }
            (TokenKind::Keyword, "ret") => {
                self.position += 1;
                let value = self.parse_expression(Precedence::Lowest)?;
                self.expect_symbol(";")?;
                Ok(Statement::Return(value))
            }
            (TokenKind::Keyword, "break") => {
                self.position += 1;
                self.expect_symbol(";")?;
                Ok(Statement::Break)
            }
            (TokenKind::Keyword, "continue") => {
                self.position += 1;
                self.expect_symbol(";")?;
                Ok(Statement::Continue)
            }
            _ => {
                let expression = self.parse_expression(Precedence::Lowest)?;
                self.expect_symbol(";")?;
                Ok(Statement::Expr(expression))
            }
        }
    }

    fn parse_statement_list(&mut self) -> Result<Vec<Statement>> {
        self.expect_symbol("{")?;

        let mut statements = vec![];
        loop {
            match self.current() {
                Some(token) if token.is_symbol("}") => break,
                Some(_) => statements.push(self.parse_statement()?),
                None => {
                    return Err(SyntaxError::UnexpectedEnd {
                        expected: "`}`".to_owned(),
                    })
                }
            }
        }

        self.expect_symbol("}")?;
        Ok(statements)
    }

    fn parse_block(&mut self) -> Result<Block> {
        Ok(Block {
            statements: self.parse_statement_list()?,
        })
    }

    fn parse_loop_body(&mut self) -> Result<LoopBody> {
        Ok(LoopBody {
            statements: self.parse_statement_list()?,
        })
    }

    fn parse_condition(&mut self) -> Result<Expression> {
        self.expect_symbol("(")?;
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_symbol(")")?;
        Ok(condition)
    }

    fn parse_if_statement(&mut self) -> Result<IfStatement> {
        self.position += 1;
        let condition = self.parse_condition()?;
        let consequence = self.parse_loop_body()?;

        let mut alternatives = vec![];
        while self.current_is(|t| t.is_keyword("elif")) {
            self.position += 1;
            let condition = self.parse_condition()?;
            alternatives.push((condition, self.parse_loop_body()?));
        }

        let otherwise = if self.current_is(|t| t.is_keyword("else")) {
            self.position += 1;
            Some(self.parse_loop_body()?)
        } else {
            None
        };

        Ok(IfStatement {
            condition,
            consequence,
            alternatives,
            otherwise,
        })
    }

    fn parse_while_statement(&mut self) -> Result<WhileStatement> {
        self.position += 1;
        let condition = self.parse_condition()?;
        let body = self.parse_loop_body()?;

        Ok(WhileStatement { condition, body })
    }

    fn parse_for_statement(&mut self) -> Result<Statement> {
        self.position += 1;
        self.expect_symbol("(")?;

        let is_foreach = self.current_is(|t| t.is(TokenKind::Identifier))
            && self.peek().map_or(false, |t| t.is_symbol(":"));
        if is_foreach {
            let variable = self.expect_identifier()?;
            self.expect_symbol(":")?;
            let iterable = self.parse_expression(Precedence::Lowest)?;
            self.expect_symbol(")")?;
            let body = self.parse_loop_body()?;

            return Ok(Statement::Foreach(ForeachStatement {
                variable,
                iterable,
                body,
            }));
        }

        let init = self.parse_expression(Precedence::Lowest)?;
        self.expect_symbol(",")?;
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_symbol(",")?;
        let step = self.parse_expression(Precedence::Lowest)?;
        self.expect_symbol(")")?;
        let body = self.parse_loop_body()?;

        Ok(Statement::For(ForStatement {
            init,
            condition,
            step,
            body,
        }))
    }

    fn parse_repeat_statement(&mut self) -> Result<RepeatStatement> {
        self.position += 1;
        let count = self.parse_condition()?;
        let body = self.parse_loop_body()?;

        Ok(RepeatStatement { count, body })
    }

    /// `def name(params) { ... }` as a statement, or with the name omitted as
    /// an inline function literal.
    fn parse_definition(&mut self) -> Result<Arc<Definition>> {
        self.position += 1;

        let name = if self.current_is(|t| t.is(TokenKind::Identifier)) {
            Some(self.expect_identifier()?)
        } else {
            None
        };

        self.expect_symbol("(")?;
        let mut parameters = vec![];
        if self.current_is(|t| t.is_symbol(")")) {
            self.position += 1;
        } else {
            loop {
                parameters.push(self.expect_identifier()?);
                let separator =
                    self.consume("`,` or `)`", |t| t.is_symbol(",") || t.is_symbol(")"))?;
                if separator.is_symbol(")") {
                    break;
                }
            }
        }

        let body = self.parse_block()?;

        Ok(Arc::new(Definition {
            name,
            parameters,
            body,
        }))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        self.nested(|parser| parser.parse_nested_expression(precedence))
    }

    fn parse_nested_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        let mut left = self.parse_prefix(precedence)?;

        while let Some(next) = self.infix_precedence() {
            if precedence >= next {
                break;
            }
            left = self.parse_infix(left)?;
        }

        Ok(left)
    }

    fn infix_precedence(&self) -> Option<Precedence> {
        let token = self.current()?;
        match token.kind {
            TokenKind::Operator => BinaryOperator::from_lexeme(&token.lexeme).map(Precedence::from),
            TokenKind::Symbol if token.lexeme == "[" => Some(Precedence::Index),
            _ => None,
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Result<Expression> {
        let token = self.next_token("an operator")?;

        if token.is_symbol("[") {
            let index = self.parse_expression(Precedence::Lowest)?;
            self.expect_symbol("]")?;
            return Ok(Expression::Binary(BinaryExpression {
                left: Box::new(left),
                operator: BinaryOperator::Index,
                right: Box::new(index),
            }));
        }

        let operator = BinaryOperator::from_lexeme(&token.lexeme)
            .ok_or_else(|| SyntaxError::unexpected(&token, "a binary operator"))?;
        let right = self.parse_expression(Precedence::from(operator))?;

        Ok(Expression::Binary(BinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_prefix(&mut self, precedence: Precedence) -> Result<Expression> {
        let token = match self.current() {
            Some(token) => token.clone(),
            None => {
                return Err(SyntaxError::UnexpectedEnd {
                    expected: "an expression".to_owned(),
                })
            }
        };

        match token.kind {
            TokenKind::Number => {
                self.position += 1;
                token
                    .lexeme
                    .trim_end_matches('.')
                    .parse::<f64>()
                    .map(|n| Expression::Literal(Value::Number(n)))
                    .map_err(|_| SyntaxError::InvalidNumber {
                        row: token.row,
                        col: token.col,
                        lexeme: token.lexeme.clone(),
                    })
            }
            TokenKind::Text => {
                self.position += 1;
                Ok(Expression::Literal(Value::Text(token.lexeme)))
            }
            TokenKind::Identifier => {
                self.position += 1;
                self.parse_identifier(token.lexeme, precedence)
            }
            TokenKind::Operator => match UnaryOperator::prefix_from_lexeme(&token.lexeme) {
                Some(operator) => {
                    self.position += 1;
                    let operand = self.parse_expression(Precedence::Prefix)?;
                    Ok(Expression::Unary(UnaryExpression {
                        operator,
                        operand: Box::new(operand),
                    }))
                }
                None => Err(SyntaxError::unexpected(&token, "an expression")),
            },
            TokenKind::Symbol if token.lexeme == "(" => {
                self.position += 1;
                let expression = self.parse_expression(Precedence::Lowest)?;
                self.expect_symbol(")")?;
                Ok(expression)
            }
            TokenKind::Symbol if token.lexeme == "[" => {
                self.position += 1;
                self.parse_expression_list("]").map(Expression::List)
            }
            TokenKind::Keyword if token.lexeme == "def" => {
                self.parse_definition().map(Expression::Function)
            }
            _ => Err(SyntaxError::unexpected(&token, "an expression")),
        }
    }

    /// An identifier that has just been consumed, plus whatever directly
    /// follows it: a call, an assignment or a postfix operator. Assignment is
    /// only taken when the identifier starts an expression at the lowest
    /// precedence, so `a + b = 3` is not read as `a + (b = 3)`.
    fn parse_identifier(&mut self, name: String, precedence: Precedence) -> Result<Expression> {
        let next = match self.current() {
            Some(token) => token.clone(),
            None => return Ok(Expression::Identifier(name)),
        };

        if next.is_symbol("(") {
            self.position += 1;
            let arguments = self.parse_expression_list(")")?;
            return Ok(Expression::Call(CallExpression { name, arguments }));
        }

        if next.is(TokenKind::Operator) {
            let assignment = AssignOperator::from_lexeme(&next.lexeme)
                .filter(|_| precedence == Precedence::Lowest);
            if let Some(operator) = assignment {
                self.position += 1;
                let value = self.parse_expression(Precedence::Lowest)?;
                return Ok(Expression::Assign(AssignExpression {
                    operator,
                    name,
                    value: Box::new(value),
                }));
            }

            if let Some(operator) = UnaryOperator::postfix_from_lexeme(&next.lexeme) {
                self.position += 1;
                return Ok(Expression::Unary(UnaryExpression {
                    operator,
                    operand: Box::new(Expression::Identifier(name)),
                }));
            }
        }

        Ok(Expression::Identifier(name))
    }

    /// Comma-separated expressions up to `close`; the opening symbol has
    /// already been consumed.
    fn parse_expression_list(&mut self, close: &str) -> Result<Vec<Expression>> {
        let mut items = vec![];

        if self.current_is(|t| t.is_symbol(close)) {
            self.position += 1;
            return Ok(items);
        }

        let expected = format!("`,` or `{}`", close);
        loop {
            items.push(self.parse_expression(Precedence::Lowest)?);
            let separator = self.consume(&expected, |t| t.is_symbol(",") || t.is_symbol(close))?;
            if separator.is_symbol(close) {
                return Ok(items);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse_ok(input: &str) -> Program {
        parse(input).unwrap_or_else(|err| panic!("parse error for {:?}: {}", input, err))
    }

    fn single_expression(input: &str) -> Expression {
        let program = parse_ok(input);
        assert_eq!(program.statements.len(), 1, "in {:?}", input);
        match program.statements.into_iter().next() {
            Some(Statement::Expr(expr)) => expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_operator_precedence_parsing() {
        let cases = vec![
            ("-a * b;", "((-a) * b)"),
            ("!-a;", "(!(-a))"),
            ("a + b + c;", "((a + b) + c)"),
            ("a + b - c;", "((a + b) - c)"),
            ("a * b * c;", "((a * b) * c)"),
            ("a * b / c % d;", "(((a * b) / c) % d)"),
            ("a + b * c + d / e - f;", "(((a + (b * c)) + (d / e)) - f)"),
            ("5 > 4 == 3 < 4;", "(((5 > 4) == 3) < 4)"),
            ("3 + 4 * 5 == 3 * 1 + 4 * 5;", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"),
            ("a && b || c;", "((a && b) || c)"),
            ("a == 1 && b != 2;", "((a == 1) && (b != 2))"),
            ("x >= 1 || y <= 2;", "((x >= 1) || (y <= 2))"),
            ("2 ^ 3 ^ 2;", "((2 ^ 3) ^ 2)"),
            ("2 * 3 ^ 2;", "(2 * (3 ^ 2))"),
            ("-2 ^ 2;", "((-2) ^ 2)"),
            ("(5 + 5) * 2;", "((5 + 5) * 2)"),
            ("-(5 + 5);", "(-(5 + 5))"),
            ("a * [1, 2, 3, 4][b * c] * d;", "((a * ([1, 2, 3, 4][(b * c)])) * d)"),
            ("add(a * b[2], b[1], 2 * [1, 2][1]);", "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))"),
            ("a.b + c;", "((a.b) + c)"),
            ("a.b[0];", "(a.(b[0]))"),
            ("-a[0];", "((-a)[0])"),
            ("i++ + ++j;", "((i++) + (++j))"),
            ("x-- - --y;", "((x--) - (--y))"),
            ("\"a\" + \"b\";", "(\"a\" + \"b\")"),
            ("1.5 * 2.;", "(1.5 * 2)"),
        ];

        for (input, expected) in cases {
            assert_eq!(single_expression(input).to_string(), expected, "parsing {}", input);
        }
    }

    #[test]
    fn test_assignments() {
        let cases = vec![
            ("x = 5;", "x", AssignOperator::Assign, "5"),
            ("x += y * 2;", "x", AssignOperator::PlusAssign, "(y * 2)"),
            ("x -= 1;", "x", AssignOperator::MinusAssign, "1"),
            ("x *= 1;", "x", AssignOperator::AsteriskAssign, "1"),
            ("x /= 1;", "x", AssignOperator::SlashAssign, "1"),
            ("x %= 1;", "x", AssignOperator::PercentAssign, "1"),
            ("x ^= 1;", "x", AssignOperator::CaretAssign, "1"),
            ("x = y = 3;", "x", AssignOperator::Assign, "y = 3"),
        ];

        for (input, name, operator, value) in cases {
            match single_expression(input) {
                Expression::Assign(assign) => {
                    assert_eq!(assign.name, name);
                    assert_eq!(assign.operator, operator);
                    assert_eq!(assign.value.to_string(), value);
                }
                other => panic!("expected assignment, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_calls_and_literals() {
        match single_expression("print(1, \"two\", [3], f());") {
            Expression::Call(call) => {
                assert_eq!(call.name, "print");
                assert_eq!(
                    call.arguments,
                    vec![
                        Expression::Literal(Value::Number(1.0)),
                        Expression::Literal(Value::Text("\"two\"".to_owned())),
                        Expression::List(vec![Expression::Literal(Value::Number(3.0))]),
                        Expression::Call(CallExpression {
                            name: "f".to_owned(),
                            arguments: vec![],
                        }),
                    ]
                );
            }
            other => panic!("expected call, got {:?}", other),
        }

        assert_eq!(single_expression("[];"), Expression::List(vec![]));
    }

    #[test]
    fn test_statements() {
        let cases = vec![
            ("{ x = 1; { y = 2; } }", "{ x = 1; { y = 2; } }"),
            (
                "if (a) { b; } elif (c) { d; } elif (e) { f; } else { g; }",
                "if (a) { b; } elif (c) { d; } elif (e) { f; } else { g; }",
            ),
            ("if (a) { }", "if (a) { }"),
            ("while (x < 3) { x++; }", "while ((x < 3)) { (x++); }"),
            (
                "for (i = 0, i < 3, i++) { continue; }",
                "for (i = 0, (i < 3), (i++)) { continue; }",
            ),
            ("for (x : items) { print(x); }", "for (x : items) { print(x); }"),
            ("repeat (3) { break; }", "repeat (3) { break; }"),
            (
                "def add(a, b) { ret a + b; }",
                "def add(a, b) { ret (a + b); }",
            ),
            ("def none() { }", "def none() { }"),
            (
                "f = def (x) { ret x; };",
                "f = def (x) { ret x; };",
            ),
            (";", ";"),
        ];

        for (input, expected) in cases {
            assert_eq!(parse_ok(input).to_string(), expected, "parsing {}", input);
        }
    }

    #[test]
    fn test_statement_shapes() {
        let program = parse_ok("while (1) { x = 1; }");
        match &program.statements[0] {
            Statement::While(stmt) => {
                assert_eq!(stmt.body.statements.len(), 1);
            }
            other => panic!("expected while, got {:?}", other),
        }

        let program = parse_ok("def f() { }");
        match &program.statements[0] {
            Statement::Definition(def) => {
                assert_eq!(def.name.as_deref(), Some("f"));
                assert!(def.parameters.is_empty());
            }
            other => panic!("expected definition, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_errors() {
        let cases = vec![
            (
                "x = 1",
                SyntaxError::UnexpectedEnd {
                    expected: "`;`".to_owned(),
                },
            ),
            (
                "{ x = 1;",
                SyntaxError::UnexpectedEnd {
                    expected: "`}`".to_owned(),
                },
            ),
            (
                "if x { }",
                SyntaxError::Unexpected {
                    row: 1,
                    col: 4,
                    lexeme: "x".to_owned(),
                    expected: "`(`".to_owned(),
                },
            ),
            (
                "x = ;",
                SyntaxError::Unexpected {
                    row: 1,
                    col: 5,
                    lexeme: ";".to_owned(),
                    expected: "an expression".to_owned(),
                },
            ),
            (
                "{\n  x = 1 $ 2;\n}",
                SyntaxError::Illegal {
                    row: 2,
                    col: 9,
                    lexeme: "$".to_owned(),
                },
            ),
            (
                "f(1 2);",
                SyntaxError::Unexpected {
                    row: 1,
                    col: 5,
                    lexeme: "2".to_owned(),
                    expected: "`,` or `)`".to_owned(),
                },
            ),
            (
                "else { }",
                SyntaxError::Unexpected {
                    row: 1,
                    col: 1,
                    lexeme: "else".to_owned(),
                    expected: "an expression".to_owned(),
                },
            ),
            (
                "def f(a, 1) { }",
                SyntaxError::Unexpected {
                    row: 1,
                    col: 10,
                    lexeme: "1".to_owned(),
                    expected: "an identifier".to_owned(),
                },
            ),
            (
                "ret",
                SyntaxError::UnexpectedEnd {
                    expected: "an expression".to_owned(),
                },
            ),
            (
                "a + b = 3;",
                SyntaxError::Unexpected {
                    row: 1,
                    col: 7,
                    lexeme: "=".to_owned(),
                    expected: "`;`".to_owned(),
                },
            ),
            (
                "-x = 3;",
                SyntaxError::Unexpected {
                    row: 1,
                    col: 4,
                    lexeme: "=".to_owned(),
                    expected: "`;`".to_owned(),
                },
            ),
            (
                "y < x += 1;",
                SyntaxError::Unexpected {
                    row: 1,
                    col: 7,
                    lexeme: "+=".to_owned(),
                    expected: "`;`".to_owned(),
                },
            ),
        ];

        for (input, expected) in cases {
            assert_eq!(parse(input), Err(expected), "parsing {:?}", input);
        }
    }

    #[test]
    fn test_nesting_limit() {
        let nested = |depth: usize| format!("{}1{};", "(".repeat(depth), ")".repeat(depth));

        assert!(parse(&nested(MAX_NESTING - 2)).is_ok());
        assert_eq!(
            parse(&nested(600)),
            Err(SyntaxError::TooDeep {
                row: 1,
                col: MAX_NESTING,
                limit: MAX_NESTING,
            })
        );
        assert!(matches!(
            parse(&nested(100_000)),
            Err(SyntaxError::TooDeep { .. })
        ));

        let blocks = format!("{}{}", "{".repeat(600), "}".repeat(600));
        assert!(matches!(parse(&blocks), Err(SyntaxError::TooDeep { .. })));
        assert!(matches!(
            parse(&format!("{}x;", "!".repeat(1_000))),
            Err(SyntaxError::TooDeep { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = parse("x = 1 $;").unwrap_err();
        assert_eq!(err.to_string(), "syntax error at 1:7: unrecognized input `$`");

        let err = parse("(1;").unwrap_err();
        assert_eq!(
            err.to_string(),
            "syntax error at 1:3: expected `)`, found `;`"
        );
    }
}
