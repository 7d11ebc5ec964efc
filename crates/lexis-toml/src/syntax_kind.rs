#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum SyntaxKind {
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    EQ,
    DOT,
    COMMA,

    BARE,
    BASIC_STRING,
    LITERAL_STRING,
    MULTILINE_BASIC_STRING,
    MULTILINE_LITERAL_STRING,
    INTEGER,
    FLOAT,
    BOOLEAN,

    COMMENT,
    UNKNOWN,
    EOF,

    DOCUMENT,
    TABLE,
    ARRAY_TABLE,
    KEY_VALUE,
    KEY,
    VALUE,
    ARRAY,
    INLINE_TABLE,
    ERROR,

    TOMBSTONE,
}

impl SyntaxKind {
    /// Comments are the only trivia that survives tokenization.
    pub fn is_trivia(self) -> bool {
        self == SyntaxKind::COMMENT
    }

    /// Token category as shown to users.
    pub fn category(self) -> &'static str {
        use SyntaxKind::*;

        match self {
            LEFT_BRACKET | RIGHT_BRACKET | LEFT_BRACE | RIGHT_BRACE | EQ | DOT | COMMA => {
                "Punctuator"
            }
            BARE => "Bare",
            BASIC_STRING => "BasicString",
            LITERAL_STRING => "LiteralString",
            MULTILINE_BASIC_STRING => "MultiLineBasicString",
            MULTILINE_LITERAL_STRING => "MultiLineLiteralString",
            INTEGER => "Integer",
            FLOAT => "Float",
            BOOLEAN => "Boolean",
            COMMENT => "Line",
            UNKNOWN => "Unknown",
            EOF => "EOF",
            DOCUMENT | TABLE | ARRAY_TABLE | KEY_VALUE | KEY | VALUE | ARRAY | INLINE_TABLE
            | ERROR | TOMBSTONE => "Node",
        }
    }

    pub(crate) fn describe(self) -> &'static str {
        use SyntaxKind::*;

        match self {
            LEFT_BRACKET => "`[`",
            RIGHT_BRACKET => "`]`",
            LEFT_BRACE => "`{`",
            RIGHT_BRACE => "`}`",
            EQ => "`=`",
            DOT => "`.`",
            COMMA => "`,`",
            EOF => "end of file",
            _ => "token",
        }
    }
}
