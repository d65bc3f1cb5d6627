//! Logos-based lexer for ADQL
//!
//! Keywords are matched case-insensitively. Lexical errors (unknown or
//! non-ASCII characters, unterminated literals) are fatal: [`tokenize`]
//! stops at the first one.

use logos::Logos;
use text_size::{TextRange, TextSize};

use super::errors::{ErrorCode, ParseError};
use super::syntax_kind::TokenKind;
use crate::base::LineIndex;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl Token<'_> {
    pub fn offset(&self) -> TextSize {
        self.range.start()
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let span = self.inner.span();
        let range = TextRange::new(
            TextSize::new(span.start as u32),
            TextSize::new(span.end as u32),
        );

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => TokenKind::ERROR,
        };

        Some(Token { kind, text, range })
    }
}

/// Tokenize a whole query
///
/// Trivia are dropped and the sequence always ends with an `EOF` token.
/// With `stop_at_end`, tokens after the first `;` are not returned and the
/// `;` itself is replaced by the final `EOF`.
pub fn tokenize(input: &str, stop_at_end: bool) -> Result<Vec<Token<'_>>, ParseError> {
    let mut tokens = Vec::new();
    let mut end = TextSize::of(input);

    for token in Lexer::new(input) {
        if token.kind.is_trivia() {
            continue;
        }
        if token.kind.is_error() {
            return Err(lexical_error(input, &token));
        }
        if stop_at_end && token.kind == TokenKind::SEMICOLON {
            end = token.range.start();
            break;
        }
        tokens.push(token);
    }

    tokens.push(Token {
        kind: TokenKind::EOF,
        text: "",
        range: TextRange::empty(end),
    });
    tracing::trace!(count = tokens.len(), "tokenized query");
    Ok(tokens)
}

fn lexical_error(input: &str, token: &Token<'_>) -> ParseError {
    let index = LineIndex::new(input);
    let position = index.position(token.range);
    let (line, column) = (position.begin_line, position.begin_column);

    match token.kind {
        TokenKind::UNTERMINATED_STRING => ParseError::new(
            format!("Incomplete string literal starting at l.{line}, c.{column}!"),
            ErrorCode::E0102,
        )
        .with_position(position)
        .with_hint("Possible cause: a string literal must end with a simple quote (')."),
        TokenKind::UNTERMINATED_IDENT => ParseError::new(
            format!("Incomplete delimited identifier starting at l.{line}, c.{column}!"),
            ErrorCode::E0103,
        )
        .with_position(position)
        .with_hint("Possible cause: a delimited identifier must end with a double quote (\")."),
        _ => {
            let c = token.text.chars().next().unwrap_or('?');
            let message = format!(
                "Incorrect character encountered at l.{line}, c.{column}: \"{c}\" ({})!",
                c as u32
            );
            let error = ParseError::new(message, ErrorCode::E0101).with_position(position);
            if !c.is_ascii() {
                error.with_hint(
                    "Possible cause: a non-ASCII character (solution: remove/replace it).",
                )
            } else if c == '_' {
                error.with_hint(
                    "Possible cause: a regular identifier must start with a letter (solution: \
                     write the identifier between double quotes).",
                )
            } else {
                error
            }
        }
    }
}

/// Logos token enum - maps to TokenKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"--[^\n]*")]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r#""([^"]|"")*""#)]
    DelimitedIdent,

    #[regex(r#""([^"]|"")*"#)]
    UnterminatedIdent,

    #[regex(r"'([^']|'')*'")]
    String,

    #[regex(r"'([^']|'')*")]
    UnterminatedString,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]*|\.[0-9]+")]
    Float,

    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)[eE][+-]?[0-9]+")]
    Scientific,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("||")]
    PipePipe,
    #[token("!=")]
    #[token("<>")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("/")]
    Slash,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,

    #[regex(r"[^\x00-\x7F]")]
    NonAscii,

    // =========================================================================
    // CLAUSE KEYWORDS
    // =========================================================================
    #[token("select", ignore(ascii_case))]
    SelectKw,
    #[token("from", ignore(ascii_case))]
    FromKw,
    #[token("where", ignore(ascii_case))]
    WhereKw,
    #[token("group", ignore(ascii_case))]
    GroupKw,
    #[token("by", ignore(ascii_case))]
    ByKw,
    #[token("having", ignore(ascii_case))]
    HavingKw,
    #[token("order", ignore(ascii_case))]
    OrderKw,
    #[token("asc", ignore(ascii_case))]
    AscKw,
    #[token("desc", ignore(ascii_case))]
    DescKw,
    #[token("all", ignore(ascii_case))]
    AllKw,
    #[token("distinct", ignore(ascii_case))]
    DistinctKw,
    #[token("top", ignore(ascii_case))]
    TopKw,
    #[token("as", ignore(ascii_case))]
    AsKw,
    #[token("and", ignore(ascii_case))]
    AndKw,
    #[token("or", ignore(ascii_case))]
    OrKw,
    #[token("not", ignore(ascii_case))]
    NotKw,
    #[token("is", ignore(ascii_case))]
    IsKw,
    #[token("null", ignore(ascii_case))]
    NullKw,
    #[token("like", ignore(ascii_case))]
    LikeKw,
    #[token("ilike", ignore(ascii_case))]
    IlikeKw,
    #[token("between", ignore(ascii_case))]
    BetweenKw,
    #[token("in", ignore(ascii_case))]
    InKw,
    #[token("exists", ignore(ascii_case))]
    ExistsKw,
    #[token("join", ignore(ascii_case))]
    JoinKw,
    #[token("natural", ignore(ascii_case))]
    NaturalKw,
    #[token("inner", ignore(ascii_case))]
    InnerKw,
    #[token("left", ignore(ascii_case))]
    LeftKw,
    #[token("right", ignore(ascii_case))]
    RightKw,
    #[token("full", ignore(ascii_case))]
    FullKw,
    #[token("outer", ignore(ascii_case))]
    OuterKw,
    #[token("cross", ignore(ascii_case))]
    CrossKw,
    #[token("on", ignore(ascii_case))]
    OnKw,
    #[token("using", ignore(ascii_case))]
    UsingKw,
    #[token("with", ignore(ascii_case))]
    WithKw,
    #[token("union", ignore(ascii_case))]
    UnionKw,
    #[token("intersect", ignore(ascii_case))]
    IntersectKw,
    #[token("except", ignore(ascii_case))]
    ExceptKw,
    #[token("offset", ignore(ascii_case))]
    OffsetKw,

    // =========================================================================
    // AGGREGATES
    // =========================================================================
    #[token("count", ignore(ascii_case))]
    CountKw,
    #[token("avg", ignore(ascii_case))]
    AvgKw,
    #[token("max", ignore(ascii_case))]
    MaxKw,
    #[token("min", ignore(ascii_case))]
    MinKw,
    #[token("sum", ignore(ascii_case))]
    SumKw,

    // =========================================================================
    // MATH AND TRIGONOMETRIC FUNCTIONS
    // =========================================================================
    #[token("abs", ignore(ascii_case))]
    AbsKw,
    #[token("ceiling", ignore(ascii_case))]
    CeilingKw,
    #[token("degrees", ignore(ascii_case))]
    DegreesKw,
    #[token("exp", ignore(ascii_case))]
    ExpKw,
    #[token("floor", ignore(ascii_case))]
    FloorKw,
    #[token("log", ignore(ascii_case))]
    LogKw,
    #[token("log10", ignore(ascii_case))]
    Log10Kw,
    #[token("mod", ignore(ascii_case))]
    ModKw,
    #[token("pi", ignore(ascii_case))]
    PiKw,
    #[token("power", ignore(ascii_case))]
    PowerKw,
    #[token("radians", ignore(ascii_case))]
    RadiansKw,
    #[token("rand", ignore(ascii_case))]
    RandKw,
    #[token("round", ignore(ascii_case))]
    RoundKw,
    #[token("sqrt", ignore(ascii_case))]
    SqrtKw,
    #[token("truncate", ignore(ascii_case))]
    TruncateKw,
    #[token("acos", ignore(ascii_case))]
    AcosKw,
    #[token("asin", ignore(ascii_case))]
    AsinKw,
    #[token("atan", ignore(ascii_case))]
    AtanKw,
    #[token("atan2", ignore(ascii_case))]
    Atan2Kw,
    #[token("cos", ignore(ascii_case))]
    CosKw,
    #[token("cot", ignore(ascii_case))]
    CotKw,
    #[token("sin", ignore(ascii_case))]
    SinKw,
    #[token("tan", ignore(ascii_case))]
    TanKw,

    // =========================================================================
    // GEOMETRY FUNCTIONS
    // =========================================================================
    #[token("area", ignore(ascii_case))]
    AreaKw,
    #[token("box", ignore(ascii_case))]
    BoxKw,
    #[token("centroid", ignore(ascii_case))]
    CentroidKw,
    #[token("circle", ignore(ascii_case))]
    CircleKw,
    #[token("contains", ignore(ascii_case))]
    ContainsKw,
    #[token("coord1", ignore(ascii_case))]
    Coord1Kw,
    #[token("coord2", ignore(ascii_case))]
    Coord2Kw,
    #[token("coordsys", ignore(ascii_case))]
    CoordsysKw,
    #[token("distance", ignore(ascii_case))]
    DistanceKw,
    #[token("intersects", ignore(ascii_case))]
    IntersectsKw,
    #[token("point", ignore(ascii_case))]
    PointKw,
    #[token("polygon", ignore(ascii_case))]
    PolygonKw,
    #[token("region", ignore(ascii_case))]
    RegionKw,

    // =========================================================================
    // STRING, CONDITIONAL, UNIT AND TYPE FUNCTIONS
    // =========================================================================
    #[token("lower", ignore(ascii_case))]
    LowerKw,
    #[token("upper", ignore(ascii_case))]
    UpperKw,
    #[token("coalesce", ignore(ascii_case))]
    CoalesceKw,
    #[token("in_unit", ignore(ascii_case))]
    InUnitKw,
    #[token("cast", ignore(ascii_case))]
    CastKw,
}

impl From<LogosToken> for TokenKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => TokenKind::WHITESPACE,
            Comment => TokenKind::COMMENT,

            // Literals
            Ident => TokenKind::IDENT,
            DelimitedIdent => TokenKind::DELIMITED_IDENT,
            UnterminatedIdent => TokenKind::UNTERMINATED_IDENT,
            String => TokenKind::STRING,
            UnterminatedString => TokenKind::UNTERMINATED_STRING,
            Integer => TokenKind::UNSIGNED_INTEGER,
            Float => TokenKind::UNSIGNED_FLOAT,
            Scientific => TokenKind::SCIENTIFIC_NUMBER,

            // Punctuation
            PipePipe => TokenKind::PIPE_PIPE,
            NotEq => TokenKind::NOT_EQ,
            LtEq => TokenKind::LT_EQ,
            GtEq => TokenKind::GT_EQ,
            LParen => TokenKind::L_PAREN,
            RParen => TokenKind::R_PAREN,
            Comma => TokenKind::COMMA,
            Dot => TokenKind::DOT,
            Semicolon => TokenKind::SEMICOLON,
            Star => TokenKind::STAR,
            Plus => TokenKind::PLUS,
            Minus => TokenKind::MINUS,
            Slash => TokenKind::SLASH,
            Eq => TokenKind::EQ,
            Lt => TokenKind::LT,
            Gt => TokenKind::GT,
            NonAscii => TokenKind::NON_ASCII,

            // Clause keywords
            SelectKw => TokenKind::SELECT_KW,
            FromKw => TokenKind::FROM_KW,
            WhereKw => TokenKind::WHERE_KW,
            GroupKw => TokenKind::GROUP_KW,
            ByKw => TokenKind::BY_KW,
            HavingKw => TokenKind::HAVING_KW,
            OrderKw => TokenKind::ORDER_KW,
            AscKw => TokenKind::ASC_KW,
            DescKw => TokenKind::DESC_KW,
            AllKw => TokenKind::ALL_KW,
            DistinctKw => TokenKind::DISTINCT_KW,
            TopKw => TokenKind::TOP_KW,
            AsKw => TokenKind::AS_KW,
            AndKw => TokenKind::AND_KW,
            OrKw => TokenKind::OR_KW,
            NotKw => TokenKind::NOT_KW,
            IsKw => TokenKind::IS_KW,
            NullKw => TokenKind::NULL_KW,
            LikeKw => TokenKind::LIKE_KW,
            IlikeKw => TokenKind::ILIKE_KW,
            BetweenKw => TokenKind::BETWEEN_KW,
            InKw => TokenKind::IN_KW,
            ExistsKw => TokenKind::EXISTS_KW,
            JoinKw => TokenKind::JOIN_KW,
            NaturalKw => TokenKind::NATURAL_KW,
            InnerKw => TokenKind::INNER_KW,
            LeftKw => TokenKind::LEFT_KW,
            RightKw => TokenKind::RIGHT_KW,
            FullKw => TokenKind::FULL_KW,
            OuterKw => TokenKind::OUTER_KW,
            CrossKw => TokenKind::CROSS_KW,
            OnKw => TokenKind::ON_KW,
            UsingKw => TokenKind::USING_KW,
            WithKw => TokenKind::WITH_KW,
            UnionKw => TokenKind::UNION_KW,
            IntersectKw => TokenKind::INTERSECT_KW,
            ExceptKw => TokenKind::EXCEPT_KW,
            OffsetKw => TokenKind::OFFSET_KW,

            // Aggregates
            CountKw => TokenKind::COUNT_KW,
            AvgKw => TokenKind::AVG_KW,
            MaxKw => TokenKind::MAX_KW,
            MinKw => TokenKind::MIN_KW,
            SumKw => TokenKind::SUM_KW,

            // Math
            AbsKw => TokenKind::ABS_KW,
            CeilingKw => TokenKind::CEILING_KW,
            DegreesKw => TokenKind::DEGREES_KW,
            ExpKw => TokenKind::EXP_KW,
            FloorKw => TokenKind::FLOOR_KW,
            LogKw => TokenKind::LOG_KW,
            Log10Kw => TokenKind::LOG10_KW,
            ModKw => TokenKind::MOD_KW,
            PiKw => TokenKind::PI_KW,
            PowerKw => TokenKind::POWER_KW,
            RadiansKw => TokenKind::RADIANS_KW,
            RandKw => TokenKind::RAND_KW,
            RoundKw => TokenKind::ROUND_KW,
            SqrtKw => TokenKind::SQRT_KW,
            TruncateKw => TokenKind::TRUNCATE_KW,
            AcosKw => TokenKind::ACOS_KW,
            AsinKw => TokenKind::ASIN_KW,
            AtanKw => TokenKind::ATAN_KW,
            Atan2Kw => TokenKind::ATAN2_KW,
            CosKw => TokenKind::COS_KW,
            CotKw => TokenKind::COT_KW,
            SinKw => TokenKind::SIN_KW,
            TanKw => TokenKind::TAN_KW,

            // Geometry
            AreaKw => TokenKind::AREA_KW,
            BoxKw => TokenKind::BOX_KW,
            CentroidKw => TokenKind::CENTROID_KW,
            CircleKw => TokenKind::CIRCLE_KW,
            ContainsKw => TokenKind::CONTAINS_KW,
            Coord1Kw => TokenKind::COORD1_KW,
            Coord2Kw => TokenKind::COORD2_KW,
            CoordsysKw => TokenKind::COORDSYS_KW,
            DistanceKw => TokenKind::DISTANCE_KW,
            IntersectsKw => TokenKind::INTERSECTS_KW,
            PointKw => TokenKind::POINT_KW,
            PolygonKw => TokenKind::POLYGON_KW,
            RegionKw => TokenKind::REGION_KW,

            // String, conditional, unit, type
            LowerKw => TokenKind::LOWER_KW,
            UpperKw => TokenKind::UPPER_KW,
            CoalesceKw => TokenKind::COALESCE_KW,
            InUnitKw => TokenKind::IN_UNIT_KW,
            CastKw => TokenKind::CAST_KW,
        }
    }
}
