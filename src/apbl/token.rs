use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    FloatNum,
    StringLiteral,
    BooleanVal,
    DateVal,
    TimeVal,
    Identifier,

    // Operators
    Equals,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    Plus,
    Minus,
    Times,
    Divide,

    // Punctuation
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Eol,

    // Built-in functions
    Book,
    Gen,
    Reg,
    Display,

    // Control flow
    If,
    While,
    Foreach,
    Until,
    Return,
    Break,
    Continue,

    // Data structures
    Array,
    Dictionary,
    Map,
    Set,

    // Types
    IntType,
    FloatType,
    StringType,
    BoolType,
    DateType,
    TimeType,
    Void,

    // Logic
    And,
    Or,
    Not,

    Then,
    Else,
    Function,
}

impl TokenKind {
    /// Maps a reserved word to its keyword kind.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        use TokenKind::*;
        let kind = match word {
            "book" => Book,
            "gen" => Gen,
            "reg" => Reg,
            "display" => Display,
            "if" => If,
            "while" => While,
            "foreach" => Foreach,
            "until" => Until,
            "return" => Return,
            "break" => Break,
            "continue" => Continue,
            "array" => Array,
            "dictionary" => Dictionary,
            "map" => Map,
            "set" => Set,
            "int" => IntType,
            "float" => FloatType,
            "string" => StringType,
            "bool" => BoolType,
            "date" => DateType,
            "time" => TimeType,
            "void" => Void,
            "and" => And,
            "or" => Or,
            "not" => Not,
            "then" => Then,
            "else" => Else,
            "function" => Function,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_type(self) -> bool {
        matches!(
            self,
            TokenKind::IntType
                | TokenKind::FloatType
                | TokenKind::StringType
                | TokenKind::BoolType
                | TokenKind::DateType
                | TokenKind::TimeType
                | TokenKind::Void
        )
    }

    /// Identifiers and the built-ins that may be called like functions.
    pub fn is_callable(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Book
                | TokenKind::Gen
                | TokenKind::Reg
                | TokenKind::Display
        )
    }

    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Number => "NUMBER",
            FloatNum => "FLOAT_NUM",
            StringLiteral => "STRING_LITERAL",
            BooleanVal => "BOOLEAN_VAL",
            DateVal => "DATE_VAL",
            TimeVal => "TIME_VAL",
            Identifier => "IDENTIFIER",
            Equals => "EQUALS",
            Eq => "EQ",
            Neq => "NEQ",
            Lt => "LT",
            Gt => "GT",
            Le => "LE",
            Ge => "GE",
            Plus => "PLUS",
            Minus => "MINUS",
            Times => "TIMES",
            Divide => "DIVIDE",
            LParen => "LPAREN",
            RParen => "RPAREN",
            LBracket => "LBRACKET",
            RBracket => "RBRACKET",
            Comma => "COMMA",
            Eol => "EOL",
            Book => "BOOK",
            Gen => "GEN",
            Reg => "REG",
            Display => "DISPLAY",
            If => "IF",
            While => "WHILE",
            Foreach => "FOREACH",
            Until => "UNTIL",
            Return => "RETURN",
            Break => "BREAK",
            Continue => "CONTINUE",
            Array => "ARRAY",
            Dictionary => "DICTIONARY",
            Map => "MAP",
            Set => "SET",
            IntType => "INT_TYPE",
            FloatType => "FLOAT_TYPE",
            StringType => "STRING_TYPE",
            BoolType => "BOOL_TYPE",
            DateType => "DATE_TYPE",
            TimeType => "TIME_TYPE",
            Void => "VOID",
            And => "AND",
            Or => "OR",
            Not => "NOT",
            Then => "THEN",
            Else => "ELSE",
            Function => "FUNCTION",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Int(n) => write!(f, "{}", n),
            // Debug keeps the fractional part visible, e.g. `2.0` rather than `2`.
            TokenValue::Float(x) => write!(f, "{:?}", x),
            TokenValue::Bool(true) => f.write_str("True"),
            TokenValue::Bool(false) => f.write_str("False"),
            TokenValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, line: usize) -> Self {
        Self { kind, value, line }
    }

    pub fn text(&self) -> String {
        self.value.to_string()
    }
}
