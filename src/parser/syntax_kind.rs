//! Token kinds produced by the ADQL lexer
//!
//! Keywords are only those words the grammar of at least one ADQL version
//! gives a meaning to. Other reserved words (SQL-92 words ADQL never uses)
//! lex as `IDENT` and are classified by [`super::keywords`].

use super::AdqlVersion;

/// All token kinds of ADQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum TokenKind {
    // =========================================================================
    // TRIVIA (whitespace and comments)
    // =========================================================================
    WHITESPACE,
    COMMENT,

    // =========================================================================
    // LITERALS AND IDENTIFIERS
    // =========================================================================
    IDENT,              // regular identifier candidate
    DELIMITED_IDENT,    // "Name"
    UNSIGNED_INTEGER,   // 42
    UNSIGNED_FLOAT,     // 4.2 or .42
    SCIENTIFIC_NUMBER,  // 4.2e-3
    STRING,             // 'text'

    // =========================================================================
    // PUNCTUATION AND OPERATORS
    // =========================================================================
    L_PAREN,            // (
    R_PAREN,            // )
    COMMA,              // ,
    DOT,                // .
    SEMICOLON,          // ; (end of query)
    STAR,               // *
    PLUS,               // +
    MINUS,              // -
    SLASH,              // /
    PIPE_PIPE,          // ||
    EQ,                 // =
    NOT_EQ,             // != or <>
    LT,                 // <
    LT_EQ,              // <=
    GT,                 // >
    GT_EQ,              // >=

    // =========================================================================
    // CLAUSE KEYWORDS
    // =========================================================================
    SELECT_KW,
    FROM_KW,
    WHERE_KW,
    GROUP_KW,
    BY_KW,
    HAVING_KW,
    ORDER_KW,
    ASC_KW,
    DESC_KW,
    ALL_KW,
    DISTINCT_KW,
    TOP_KW,
    AS_KW,
    AND_KW,
    OR_KW,
    NOT_KW,
    IS_KW,
    NULL_KW,
    LIKE_KW,
    ILIKE_KW,
    BETWEEN_KW,
    IN_KW,
    EXISTS_KW,
    JOIN_KW,
    NATURAL_KW,
    INNER_KW,
    LEFT_KW,
    RIGHT_KW,
    FULL_KW,
    OUTER_KW,
    CROSS_KW,
    ON_KW,
    USING_KW,
    WITH_KW,
    UNION_KW,
    INTERSECT_KW,
    EXCEPT_KW,
    OFFSET_KW,

    // =========================================================================
    // AGGREGATE FUNCTIONS
    // =========================================================================
    COUNT_KW,
    AVG_KW,
    MAX_KW,
    MIN_KW,
    SUM_KW,

    // =========================================================================
    // MATH AND TRIGONOMETRIC FUNCTIONS
    // =========================================================================
    ABS_KW,
    CEILING_KW,
    DEGREES_KW,
    EXP_KW,
    FLOOR_KW,
    LOG_KW,
    LOG10_KW,
    MOD_KW,
    PI_KW,
    POWER_KW,
    RADIANS_KW,
    RAND_KW,
    ROUND_KW,
    SQRT_KW,
    TRUNCATE_KW,
    ACOS_KW,
    ASIN_KW,
    ATAN_KW,
    ATAN2_KW,
    COS_KW,
    COT_KW,
    SIN_KW,
    TAN_KW,

    // =========================================================================
    // GEOMETRY FUNCTIONS
    // =========================================================================
    AREA_KW,
    BOX_KW,
    CENTROID_KW,
    CIRCLE_KW,
    CONTAINS_KW,
    COORD1_KW,
    COORD2_KW,
    COORDSYS_KW,
    DISTANCE_KW,
    INTERSECTS_KW,
    POINT_KW,
    POLYGON_KW,
    REGION_KW,

    // =========================================================================
    // STRING, CONDITIONAL, UNIT AND TYPE FUNCTIONS
    // =========================================================================
    LOWER_KW,
    UPPER_KW,
    COALESCE_KW,
    IN_UNIT_KW,
    CAST_KW,

    // =========================================================================
    // LEXICAL ERRORS
    // =========================================================================
    ERROR,                  // unknown ASCII character
    NON_ASCII,              // non-ASCII character outside strings and comments
    UNTERMINATED_STRING,    // 'text...
    UNTERMINATED_IDENT,     // "Name...

    EOF,
}

impl TokenKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        self >= Self::SELECT_KW && self <= Self::CAST_KW
    }

    /// Check if this keyword names a built-in function
    pub fn is_function(self) -> bool {
        matches!(
            self,
            Self::COUNT_KW
                | Self::AVG_KW
                | Self::MAX_KW
                | Self::MIN_KW
                | Self::SUM_KW
                | Self::ABS_KW
                | Self::CEILING_KW
                | Self::DEGREES_KW
                | Self::EXP_KW
                | Self::FLOOR_KW
                | Self::LOG_KW
                | Self::LOG10_KW
                | Self::MOD_KW
                | Self::PI_KW
                | Self::POWER_KW
                | Self::RADIANS_KW
                | Self::RAND_KW
                | Self::ROUND_KW
                | Self::SQRT_KW
                | Self::TRUNCATE_KW
                | Self::ACOS_KW
                | Self::ASIN_KW
                | Self::ATAN_KW
                | Self::ATAN2_KW
                | Self::COS_KW
                | Self::COT_KW
                | Self::SIN_KW
                | Self::TAN_KW
                | Self::AREA_KW
                | Self::BOX_KW
                | Self::CENTROID_KW
                | Self::CIRCLE_KW
                | Self::CONTAINS_KW
                | Self::COORD1_KW
                | Self::COORD2_KW
                | Self::COORDSYS_KW
                | Self::DISTANCE_KW
                | Self::INTERSECTS_KW
                | Self::POINT_KW
                | Self::POLYGON_KW
                | Self::REGION_KW
                | Self::LOWER_KW
                | Self::UPPER_KW
                | Self::COALESCE_KW
                | Self::IN_UNIT_KW
                | Self::CAST_KW
        )
    }

    /// Check if this is a lexical error token
    pub fn is_error(self) -> bool {
        matches!(
            self,
            Self::ERROR | Self::NON_ASCII | Self::UNTERMINATED_STRING | Self::UNTERMINATED_IDENT
        )
    }

    /// Check if this is a numeric literal
    pub fn is_number(self) -> bool {
        matches!(
            self,
            Self::UNSIGNED_INTEGER | Self::UNSIGNED_FLOAT | Self::SCIENTIFIC_NUMBER
        )
    }

    /// Whether the grammar of `version` gives this keyword a meaning
    ///
    /// Always true for non-keyword tokens.
    pub fn is_available_in(self, version: AdqlVersion) -> bool {
        match self {
            Self::WITH_KW
            | Self::UNION_KW
            | Self::INTERSECT_KW
            | Self::EXCEPT_KW
            | Self::OFFSET_KW
            | Self::ILIKE_KW
            | Self::LOWER_KW
            | Self::UPPER_KW
            | Self::COALESCE_KW
            | Self::IN_UNIT_KW
            | Self::CAST_KW => version >= AdqlVersion::V2_1,
            Self::REGION_KW => version == AdqlVersion::V2_0,
            _ => true,
        }
    }

    /// Human-readable description used in "Was expecting one of" lists
    pub fn describe(self) -> &'static str {
        match self {
            Self::WHITESPACE => "<WHITESPACE>",
            Self::COMMENT => "<COMMENT>",
            Self::IDENT => "<REGULAR_IDENTIFIER_CANDIDATE>",
            Self::DELIMITED_IDENT => "<DELIMITED_IDENTIFIER>",
            Self::UNSIGNED_INTEGER => "<UNSIGNED_INTEGER>",
            Self::UNSIGNED_FLOAT => "<UNSIGNED_FLOAT>",
            Self::SCIENTIFIC_NUMBER => "<SCIENTIFIC_NUMBER>",
            Self::STRING => "<STRING_LITERAL>",
            Self::L_PAREN => "\"(\"",
            Self::R_PAREN => "\")\"",
            Self::COMMA => "\",\"",
            Self::DOT => "\".\"",
            Self::SEMICOLON => "\";\"",
            Self::STAR => "\"*\"",
            Self::PLUS => "\"+\"",
            Self::MINUS => "\"-\"",
            Self::SLASH => "\"/\"",
            Self::PIPE_PIPE => "\"||\"",
            Self::EQ => "\"=\"",
            Self::NOT_EQ => "\"!=\"",
            Self::LT => "\"<\"",
            Self::LT_EQ => "\"<=\"",
            Self::GT => "\">\"",
            Self::GT_EQ => "\">=\"",
            Self::ERROR
            | Self::NON_ASCII
            | Self::UNTERMINATED_STRING
            | Self::UNTERMINATED_IDENT => "<INVALID>",
            Self::EOF => "<EOF>",
            kw => kw.keyword_quoted(),
        }
    }

    /// Upper-case text of a keyword (`None` for other tokens)
    pub fn keyword_text(self) -> Option<&'static str> {
        let quoted = match self {
            kw if kw.is_keyword() => kw.keyword_quoted(),
            _ => return None,
        };
        Some(&quoted[1..quoted.len() - 1])
    }

    fn keyword_quoted(self) -> &'static str {
        match self {
            Self::SELECT_KW => "\"SELECT\"",
            Self::FROM_KW => "\"FROM\"",
            Self::WHERE_KW => "\"WHERE\"",
            Self::GROUP_KW => "\"GROUP\"",
            Self::BY_KW => "\"BY\"",
            Self::HAVING_KW => "\"HAVING\"",
            Self::ORDER_KW => "\"ORDER\"",
            Self::ASC_KW => "\"ASC\"",
            Self::DESC_KW => "\"DESC\"",
            Self::ALL_KW => "\"ALL\"",
            Self::DISTINCT_KW => "\"DISTINCT\"",
            Self::TOP_KW => "\"TOP\"",
            Self::AS_KW => "\"AS\"",
            Self::AND_KW => "\"AND\"",
            Self::OR_KW => "\"OR\"",
            Self::NOT_KW => "\"NOT\"",
            Self::IS_KW => "\"IS\"",
            Self::NULL_KW => "\"NULL\"",
            Self::LIKE_KW => "\"LIKE\"",
            Self::ILIKE_KW => "\"ILIKE\"",
            Self::BETWEEN_KW => "\"BETWEEN\"",
            Self::IN_KW => "\"IN\"",
            Self::EXISTS_KW => "\"EXISTS\"",
            Self::JOIN_KW => "\"JOIN\"",
            Self::NATURAL_KW => "\"NATURAL\"",
            Self::INNER_KW => "\"INNER\"",
            Self::LEFT_KW => "\"LEFT\"",
            Self::RIGHT_KW => "\"RIGHT\"",
            Self::FULL_KW => "\"FULL\"",
            Self::OUTER_KW => "\"OUTER\"",
            Self::CROSS_KW => "\"CROSS\"",
            Self::ON_KW => "\"ON\"",
            Self::USING_KW => "\"USING\"",
            Self::WITH_KW => "\"WITH\"",
            Self::UNION_KW => "\"UNION\"",
            Self::INTERSECT_KW => "\"INTERSECT\"",
            Self::EXCEPT_KW => "\"EXCEPT\"",
            Self::OFFSET_KW => "\"OFFSET\"",
            Self::COUNT_KW => "\"COUNT\"",
            Self::AVG_KW => "\"AVG\"",
            Self::MAX_KW => "\"MAX\"",
            Self::MIN_KW => "\"MIN\"",
            Self::SUM_KW => "\"SUM\"",
            Self::ABS_KW => "\"ABS\"",
            Self::CEILING_KW => "\"CEILING\"",
            Self::DEGREES_KW => "\"DEGREES\"",
            Self::EXP_KW => "\"EXP\"",
            Self::FLOOR_KW => "\"FLOOR\"",
            Self::LOG_KW => "\"LOG\"",
            Self::LOG10_KW => "\"LOG10\"",
            Self::MOD_KW => "\"MOD\"",
            Self::PI_KW => "\"PI\"",
            Self::POWER_KW => "\"POWER\"",
            Self::RADIANS_KW => "\"RADIANS\"",
            Self::RAND_KW => "\"RAND\"",
            Self::ROUND_KW => "\"ROUND\"",
            Self::SQRT_KW => "\"SQRT\"",
            Self::TRUNCATE_KW => "\"TRUNCATE\"",
            Self::ACOS_KW => "\"ACOS\"",
            Self::ASIN_KW => "\"ASIN\"",
            Self::ATAN_KW => "\"ATAN\"",
            Self::ATAN2_KW => "\"ATAN2\"",
            Self::COS_KW => "\"COS\"",
            Self::COT_KW => "\"COT\"",
            Self::SIN_KW => "\"SIN\"",
            Self::TAN_KW => "\"TAN\"",
            Self::AREA_KW => "\"AREA\"",
            Self::BOX_KW => "\"BOX\"",
            Self::CENTROID_KW => "\"CENTROID\"",
            Self::CIRCLE_KW => "\"CIRCLE\"",
            Self::CONTAINS_KW => "\"CONTAINS\"",
            Self::COORD1_KW => "\"COORD1\"",
            Self::COORD2_KW => "\"COORD2\"",
            Self::COORDSYS_KW => "\"COORDSYS\"",
            Self::DISTANCE_KW => "\"DISTANCE\"",
            Self::INTERSECTS_KW => "\"INTERSECTS\"",
            Self::POINT_KW => "\"POINT\"",
            Self::POLYGON_KW => "\"POLYGON\"",
            Self::REGION_KW => "\"REGION\"",
            Self::LOWER_KW => "\"LOWER\"",
            Self::UPPER_KW => "\"UPPER\"",
            Self::COALESCE_KW => "\"COALESCE\"",
            Self::IN_UNIT_KW => "\"IN_UNIT\"",
            Self::CAST_KW => "\"CAST\"",
            _ => "<TOKEN>",
        }
    }
}
